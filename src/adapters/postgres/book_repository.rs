use crate::domain::{Book, BookId, BookType};
use crate::ports::book_repository::BookRepository as BookRepositoryTrait;
use crate::ports::errors::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    name: String,
    book_type: String,
}

impl TryFrom<BookRow> for Book {
    type Error = crate::ports::RepositoryError;

    fn try_from(row: BookRow) -> std::result::Result<Self, Self::Error> {
        let book_type = row.book_type.parse::<BookType>()?;
        Ok(Book::restore(BookId::from_uuid(row.id), row.name, book_type)?)
    }
}

/// BookRepositoryのPostgreSQL実装
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn save(&self, book: &Book) -> Result<()> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO books (id, name, book_type)
            VALUES ($1, $2, $3)
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                book_type = EXCLUDED.book_type
            "#,
        )
        .bind(book.id.value())
        .bind(&book.name)
        .bind(book.book_type.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, name, book_type
            FROM books
            WHERE name = $1
            ORDER BY seq ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Book::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, name, book_type
            FROM books
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn count_by_type(&self) -> Result<Vec<(BookType, i64)>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            // language=postgresql
            r#"
            SELECT book_type, COUNT(*)
            FROM books
            GROUP BY book_type
            ORDER BY MIN(seq) ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(book_type, count)| -> Result<(BookType, i64)> {
                Ok((book_type.parse::<BookType>()?, count))
            })
            .collect()
    }

    async fn delete_all(&self) -> Result<()> {
        sqlx::query("DELETE FROM books").execute(&self.pool).await?;
        Ok(())
    }
}
