//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait はブラウザ側のコラボレータ（localStorage, DOM, オーバーレイ,
//! ツアー描画エンジン, 通知）へのインターフェースを提供します。
//!
//! # 設計原則
//! - コントローラはグローバルを参照しない（すべて構築時に注入）
//! - 任意の依存（Notifier）は Option で表現し、代替手段を明示する

pub mod clock;
pub mod document;
pub mod driver;
pub mod id_generator;
pub mod notifier;
pub mod overlay;
pub mod page;
pub mod storage;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::document::DocumentQuery;
pub use self::driver::{DriverOptions, PresentationDriver, TourInstance};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::notifier::{Alerter, Notifier, Severity};
pub use self::overlay::OverlayHost;
pub use self::page::{HostPage, ReadyState};
pub use self::storage::KeyValueStorage;
