//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryStorage**: テスト・組み込み用のストレージ
//! - **JsonFileStorage**: JSON ファイルに永続化するストレージ
//! - **StaticDocument**: 要素スナップショットによる DocumentQuery
//!
//! ブラウザ上の実装（localStorage, DOM, ドライバ）はホスト側に置きます。

pub mod file_storage;
pub mod inmem_storage;
pub mod static_document;

pub use self::file_storage::JsonFileStorage;
pub use self::inmem_storage::InMemoryStorage;
pub use self::static_document::{ElementEntry, StaticDocument};
