//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてツアーのロジックを実装します。
//!
//! # 主要コンポーネント
//! - **CompletionStore**: 完了マーカーの読み書き
//! - **StepBuilder**: ページの要素からステップ列を組み立てる
//! - **WelcomePrompt**: ウェルカムオーバーレイ（OverlayGuard で確実に削除）
//! - **TourController**: 判定・プロンプト・ドライバ・永続化のオーケストレーション
//! - **TourControllerBuilder**: 依存の注入と起動時検証

pub mod builder;
pub mod completion_store;
pub mod controller;
pub mod step_builder;
pub mod welcome;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, TourControllerBuilder};
pub use self::completion_store::CompletionStore;
pub use self::controller::{COMPLETION_MESSAGE, Decision, Restart, TourController};
pub use self::step_builder::{AnchorTarget, StepBuilder, StepTemplate};
pub use self::welcome::{OverlayGuard, WelcomePrompt};
