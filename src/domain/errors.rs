use thiserror::Error;

/// ドメイン層のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// 書籍名が空
    #[error("Book name must not be blank")]
    BlankBookName,

    /// 会員名が空
    #[error("User name must not be blank")]
    BlankUserName,

    #[error("Age is out of range: {0}")]
    InvalidAge(u32),

    /// 返却対象の貸出履歴がない
    #[error("No loaned history for book: {0}")]
    LoanNotFound(String),

    #[error("Invalid book type: {0}")]
    InvalidBookType(String),

    #[error("Invalid loan status: {0}")]
    InvalidLoanStatus(String),
}
