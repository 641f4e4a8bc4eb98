//! KeyValueStorage port - 永続キーバリューストレージ
//!
//! ブラウザの localStorage に相当します（オリジン単位、再起動後も残る）。
//!
//! # 実装
//! - **InMemoryStorage**: テスト・組み込み用
//! - **JsonFileStorage**: JSON ファイルに保存（CLI ホスト用）

use crate::domain::errors::StorageError;

/// KeyValueStorage は文字列キーに文字列値を保存
///
/// 失敗は `StorageError` で返します。握りつぶすかどうかは呼び出し側
/// （`StoragePolicy`）が決めます。
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// 存在しないキーの削除は成功扱い
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
