//! Errors - エラー型と分類
//!
//! # 分類
//! - StorageError: 永続ストレージの読み書き失敗（ポリシーで扱いを決める）
//! - DriverError: プレゼンテーションドライバの失敗
//! - OverlayError: ウェルカムオーバーレイのマウント・入力・待機の失敗
//! - TourError: コントローラ操作のエラー（上記を `#[from]` で包む）
//!
//! アンカー要素が見つからないことはエラーではありません（ステップを省くだけ）。

use super::session::TourState;

/// Persistent key-value storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage is unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Presentation driver failures.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("driver rejected the tour configuration: {0}")]
    Configure(String),

    #[error("driver failed to start: {0}")]
    Start(String),
}

/// Welcome overlay failures.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("failed to mount the welcome overlay: {0}")]
    Mount(String),

    #[error("failed to read the welcome overlay choice: {0}")]
    Input(String),

    #[error("welcome overlay closed without a choice")]
    Dismissed,
}

/// Errors returned by controller operations.
#[derive(Debug, thiserror::Error)]
pub enum TourError {
    #[error("presentation driver is unavailable; the tour cannot start")]
    DriverUnavailable,

    #[error("a tour is already running")]
    AlreadyRunning,

    #[error("invalid tour transition from {from} to {to}")]
    InvalidTransition { from: TourState, to: TourState },

    #[error("driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("overlay error: {0}")]
    Overlay(#[from] OverlayError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
