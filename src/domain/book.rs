use serde::{Deserialize, Serialize};

use super::{BookId, BookType, DomainError};

/// 書籍 - カタログに登録された1冊の本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub book_type: BookType,
}

impl Book {
    /// 新しい書籍を作成する
    ///
    /// # エラー
    /// 書籍名が空白のみの場合は`DomainError::BlankBookName`を返す
    pub fn new(name: impl Into<String>, book_type: BookType) -> Result<Self, DomainError> {
        Self::restore(BookId::new(), name, book_type)
    }

    /// 永続化済みの値から復元する
    pub fn restore(
        id: BookId,
        name: impl Into<String>,
        book_type: BookType,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::BlankBookName);
        }
        Ok(Self {
            id,
            name,
            book_type,
        })
    }
}
