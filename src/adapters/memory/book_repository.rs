use crate::domain::{Book, BookType};
use crate::ports::book_repository::BookRepository as BookRepositoryTrait;
use crate::ports::errors::Result;
use async_trait::async_trait;

use super::store::InMemoryStore;

/// BookRepositoryのインメモリ実装
#[derive(Debug, Clone)]
pub struct BookRepository {
    store: InMemoryStore,
}

impl BookRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn save(&self, book: &Book) -> Result<()> {
        let mut tables = self.store.lock();
        match tables.books.iter_mut().find(|b| b.id == book.id) {
            Some(existing) => *existing = book.clone(),
            None => tables.books.push(book.clone()),
        }
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Book>> {
        let tables = self.store.lock();
        Ok(tables.books.iter().find(|b| b.name == name).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Book>> {
        Ok(self.store.lock().books.clone())
    }

    /// 分野は最初に登録された順に並ぶ
    async fn count_by_type(&self) -> Result<Vec<(BookType, i64)>> {
        let tables = self.store.lock();
        let mut counts: Vec<(BookType, i64)> = Vec::new();
        for book in &tables.books {
            match counts.iter_mut().find(|(t, _)| *t == book.book_type) {
                Some((_, count)) => *count += 1,
                None => counts.push((book.book_type, 1)),
            }
        }
        Ok(counts)
    }

    async fn delete_all(&self) -> Result<()> {
        self.store.lock().books.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_count_by_type() {
        let repo = BookRepository::new(InMemoryStore::new());
        repo.save_all(&[
            Book::new("A", BookType::Computer).unwrap(),
            Book::new("B", BookType::Computer).unwrap(),
            Book::new("C", BookType::Science).unwrap(),
        ])
        .await
        .unwrap();

        let counts = repo.count_by_type().await.unwrap();
        assert_eq!(
            counts,
            vec![(BookType::Computer, 2), (BookType::Science, 1)]
        );
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let repo = BookRepository::new(InMemoryStore::new());
        let book = Book::new("Object", BookType::Computer).unwrap();
        repo.save(&book).await.unwrap();

        assert_eq!(repo.find_by_name("Object").await.unwrap(), Some(book));
        assert!(repo.find_by_name("Missing").await.unwrap().is_none());
    }
}
