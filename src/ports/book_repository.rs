use crate::domain::{Book, BookType};
use async_trait::async_trait;

use super::errors::Result;

/// 書籍リポジトリポート
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn save(&self, book: &Book) -> Result<()>;

    /// 書籍名の完全一致で1件検索する
    async fn find_by_name(&self, name: &str) -> Result<Option<Book>>;

    async fn find_all(&self) -> Result<Vec<Book>>;

    /// 分野ごとの書籍数
    ///
    /// 1冊以上ある分野のみを返す。
    async fn count_by_type(&self) -> Result<Vec<(BookType, i64)>>;

    async fn delete_all(&self) -> Result<()>;

    async fn save_all(&self, books: &[Book]) -> Result<()> {
        for book in books {
            self.save(book).await?;
        }
        Ok(())
    }
}
