use thiserror::Error;

use crate::domain::DomainError;

/// リポジトリ（永続化層）のエラー
///
/// 「見つからない」はエラーではなく`None`で表現する。
/// ここに来るのはインフラ障害と、保存済みデータの変換失敗のみ。
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    /// 保存済みの値がドメインの不変条件を満たさない
    #[error("Corrupted row: {0}")]
    Conversion(#[from] DomainError),

    #[error("Value out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
