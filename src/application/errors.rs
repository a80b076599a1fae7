use thiserror::Error;

use crate::domain::DomainError;
use crate::ports::RepositoryError;

/// アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum LibraryApplicationError {
    /// 会員が存在しない
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// 書籍が存在しない
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// 書籍が既に貸出中
    #[error("The book is already on loan: {0}")]
    BookAlreadyLoaned(String),

    /// ドメイン層のエラー（バリデーション、返却対象なしなど）
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// リポジトリのエラー
    #[error("Repository error")]
    Repository(#[from] RepositoryError),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LibraryApplicationError>;
