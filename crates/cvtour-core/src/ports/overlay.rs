//! OverlayHost port - ウェルカムオーバーレイの表示と削除
//!
//! オーバーレイはページ全体をロックしない（非排他的）ノードです。
//! mount / unmount の対応付けは `app::welcome::OverlayGuard` が保証します。

use async_trait::async_trait;

use crate::domain::{OverlayError, OverlayId, PromptChoice, WelcomeContent};

#[async_trait]
pub trait OverlayHost: Send + Sync {
    /// Insert the overlay node into the live document.
    fn mount(&self, id: OverlayId, content: &WelcomeContent) -> Result<(), OverlayError>;

    /// Wait until the user presses one of the overlay's buttons.
    async fn choice(&self, id: OverlayId) -> Result<PromptChoice, OverlayError>;

    /// Remove the overlay node. Removing an unknown id is a no-op.
    fn unmount(&self, id: OverlayId);
}
