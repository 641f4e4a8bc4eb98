//! WelcomePrompt - 初回訪問時のウェルカムオーバーレイ
//!
//! # 学習ポイント
//! - RAII（Drop）によるリソース解放の保証
//! - async の途中で future が drop されても unmount される
//!
//! オーバーレイの mount / unmount は `OverlayGuard` だけが行います。
//! 「開始」「今はしない」、ホスト側のエラー、待機中のキャンセルのどの経路でも
//! ノードが残りません。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::domain::{OverlayError, OverlayId, PromptChoice, WelcomeContent};
use crate::ports::OverlayHost;

/// A mounted overlay node. Unmounted when dropped.
pub struct OverlayGuard {
    host: Arc<dyn OverlayHost>,
    id: OverlayId,
}

impl OverlayGuard {
    pub fn mount(
        host: Arc<dyn OverlayHost>,
        id: OverlayId,
        content: &WelcomeContent,
    ) -> Result<Self, OverlayError> {
        host.mount(id, content)?;
        debug!(overlay = %id, "welcome overlay mounted");
        Ok(Self { host, id })
    }

    pub fn id(&self) -> OverlayId {
        self.id
    }
}

impl Drop for OverlayGuard {
    fn drop(&mut self) {
        self.host.unmount(self.id);
        debug!(overlay = %self.id, "welcome overlay removed");
    }
}

/// Shows the welcome overlay and reports the user's choice.
pub struct WelcomePrompt {
    host: Arc<dyn OverlayHost>,
    content: WelcomeContent,
    shown: AtomicU64,
}

impl WelcomePrompt {
    pub fn new(host: Arc<dyn OverlayHost>, content: WelcomeContent) -> Self {
        Self {
            host,
            content,
            shown: AtomicU64::new(0),
        }
    }

    /// Mount a fresh overlay, wait for a button, remove the overlay.
    pub async fn show(&self) -> Result<PromptChoice, OverlayError> {
        let id = OverlayId::new(self.shown.fetch_add(1, Ordering::Relaxed) + 1);
        let guard = OverlayGuard::mount(self.host.clone(), id, &self.content)?;
        self.host.choice(guard.id()).await
    }
}
