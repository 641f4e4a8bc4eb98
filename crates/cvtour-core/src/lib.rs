//! cvtour-core
//!
//! First-visit onboarding tour for the CV Generator home page.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, marker, step, session, events, errors）
//! - **ports**: 抽象化レイヤー（KeyValueStorage, HostPage, DocumentQuery, OverlayHost,
//!   PresentationDriver, Notifier, など）
//! - **app**: アプリケーションロジック（builder, controller, step_builder, welcome,
//!   completion_store）
//! - **impls**: 実装（InMemoryStorage, JsonFileStorage, StaticDocument）
//! - **config**: ストレージキー・ホームパス・待機時間などの設定

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

#[cfg(test)]
mod testing;

pub use crate::app::{BuildError, Decision, Restart, TourController, TourControllerBuilder};
pub use crate::config::{StoragePolicy, TourConfig};
