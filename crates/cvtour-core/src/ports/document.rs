//! DocumentQuery port - ホストページの要素検索
//!
//! ステップのアンカーになるナビゲーション要素を CSS セレクタで探します。
//! 見つからないのは正常系です（そのステップを省くだけ）。

use crate::domain::ElementRef;

/// Read-only view of the elements currently present in the page.
pub trait DocumentQuery: Send + Sync {
    /// First element matching `selector`, like `document.querySelector`.
    fn query_selector(&self, selector: &str) -> Option<ElementRef>;

    /// Parent element of `element`, if it has one.
    fn parent_of(&self, element: &ElementRef) -> Option<ElementRef>;
}
