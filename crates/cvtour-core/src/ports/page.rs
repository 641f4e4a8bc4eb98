//! HostPage port - ページの識別・読み込み状態・遷移

use async_trait::async_trait;

/// Loading state of the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

/// The page the controller is running on.
#[async_trait]
pub trait HostPage: Send + Sync {
    /// Current location path, e.g. `/` or `/contact`.
    fn path(&self) -> String;

    fn ready_state(&self) -> ReadyState;

    /// Resolves once the document has finished loading its markup.
    async fn ready(&self);

    /// Navigate the browser away. The current page does not survive this.
    fn navigate(&self, path: &str);
}
