//! Page fixtures: the path and the elements the terminal host pretends to show.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use cvtour_core::impls::StaticDocument;
use cvtour_core::ports::{HostPage, ReadyState};

/// `{ "path": "/", "elements": [{ "selector": "...", "id": "...", "parent": "..." }] }`
#[derive(Debug, Deserialize)]
pub struct PageFixture {
    pub path: String,
    #[serde(default)]
    pub elements: StaticDocument,
}

impl PageFixture {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read page fixture {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid page fixture {}", path.display()))
    }
}

/// A page that is already loaded and only records navigation requests.
pub struct FixturePage {
    path: String,
    navigated: Mutex<Option<String>>,
}

impl FixturePage {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            navigated: Mutex::new(None),
        }
    }

    pub fn navigated(&self) -> Option<String> {
        self.navigated.lock().ok().and_then(|n| n.clone())
    }
}

#[async_trait]
impl HostPage for FixturePage {
    fn path(&self) -> String {
        self.path.clone()
    }

    fn ready_state(&self) -> ReadyState {
        ReadyState::Complete
    }

    async fn ready(&self) {}

    fn navigate(&self, path: &str) {
        info!(from = %self.path, to = %path, "navigation requested");
        if let Ok(mut navigated) = self.navigated.lock() {
            *navigated = Some(path.to_string());
        }
    }
}
