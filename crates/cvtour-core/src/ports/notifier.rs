//! Notifier / Alerter ports - 完了メッセージの表示
//!
//! Notifier（トースト）は任意の依存で、コントローラ構築時に注入します。
//! 注入されなかった場合は Alerter（ブロッキングなアラート）で代替します。

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Severity tag understood by the toast utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient, non-blocking message.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity, duration: Duration);
}

/// Blocking alert, always available on the host.
pub trait Alerter: Send + Sync {
    fn alert(&self, message: &str);
}
