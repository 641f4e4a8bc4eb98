//! StaticDocument - 要素のスナップショットによる DocumentQuery
//!
//! セレクタの評価はせず、登録済みセレクタとの完全一致で引きます。
//! ページのフィクスチャ（JSON）から作れるので、CLI ホストとテストで使います。

use serde::Deserialize;

use crate::domain::ElementRef;
use crate::ports::DocumentQuery;

/// One element of the snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementEntry {
    pub selector: String,
    pub id: String,
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct StaticDocument {
    elements: Vec<ElementEntry>,
}

impl StaticDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element reachable through `selector`.
    pub fn with_element(mut self, selector: &str, id: &str) -> Self {
        self.elements.push(ElementEntry {
            selector: selector.to_string(),
            id: id.to_string(),
            parent: None,
        });
        self
    }

    /// Register an element together with its parent element id.
    pub fn with_child(mut self, selector: &str, id: &str, parent: &str) -> Self {
        self.elements.push(ElementEntry {
            selector: selector.to_string(),
            id: id.to_string(),
            parent: Some(parent.to_string()),
        });
        self
    }
}

impl From<Vec<ElementEntry>> for StaticDocument {
    fn from(elements: Vec<ElementEntry>) -> Self {
        Self { elements }
    }
}

impl DocumentQuery for StaticDocument {
    fn query_selector(&self, selector: &str) -> Option<ElementRef> {
        self.elements
            .iter()
            .find(|e| e.selector == selector)
            .map(|e| ElementRef::new(e.id.clone()))
    }

    fn parent_of(&self, element: &ElementRef) -> Option<ElementRef> {
        self.elements
            .iter()
            .find(|e| e.id == element.as_str())
            .and_then(|e| e.parent.clone())
            .map(ElementRef::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins() {
        let doc = StaticDocument::new()
            .with_element("a", "first")
            .with_element("a", "second");
        assert_eq!(doc.query_selector("a"), Some(ElementRef::new("first")));
        assert_eq!(doc.query_selector("b"), None);
    }

    #[test]
    fn parent_lookup() {
        let doc = StaticDocument::new().with_child("a.gen", "gen-link", "gen-item");
        let link = doc.query_selector("a.gen").unwrap();
        assert_eq!(doc.parent_of(&link), Some(ElementRef::new("gen-item")));
        assert_eq!(doc.parent_of(&ElementRef::new("gen-item")), None);
    }

    #[test]
    fn deserializes_from_fixture_array() {
        let doc: StaticDocument = serde_json::from_str(
            r#"[{"selector": ".nav-dropdown", "id": "sections"}]"#,
        )
        .unwrap();
        assert_eq!(doc.query_selector(".nav-dropdown"), Some(ElementRef::new("sections")));
    }
}
