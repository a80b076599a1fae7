use crate::domain::{User, UserId, UserLoanHistory};
use crate::ports::errors::{RepositoryError, Result};
use crate::ports::user_repository::UserRepository as UserRepositoryTrait;
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use super::user_loan_history_repository::{find_by_user_id, map_row_to_history, upsert_history};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    age: Option<i32>,
}

impl UserRow {
    fn into_user(self, loan_histories: Vec<UserLoanHistory>) -> Result<User> {
        let age = self
            .age
            .map(u32::try_from)
            .transpose()
            .map_err(|_| RepositoryError::OutOfRange(format!("age: {:?}", self.age)))?;
        Ok(User::restore(
            UserId::from_uuid(self.id),
            self.name,
            age,
            loan_histories,
        )?)
    }
}

fn age_to_db(age: Option<u32>) -> Result<Option<i32>> {
    age.map(i32::try_from)
        .transpose()
        .map_err(|_| RepositoryError::OutOfRange(format!("age: {:?}", age)))
}

/// UserRepositoryのPostgreSQL実装
///
/// 会員と貸出履歴は1トランザクションで保存される。
/// 貸出履歴の削除は外部キーの`ON DELETE CASCADE`に任せる。
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_with_histories(
        con: &mut PgConnection,
        row: Option<UserRow>,
    ) -> Result<Option<User>> {
        match row {
            Some(row) => {
                let histories = find_by_user_id(con, UserId::from_uuid(row.id)).await?;
                row.into_user(histories).map(Some)
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn save(&self, user: &User) -> Result<()> {
        let age = age_to_db(user.age)?;
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO users (id, name, age)
            VALUES ($1, $2, $3)
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                age = EXCLUDED.age,
                updated_at = NOW()
            "#,
        )
        .bind(user.id.value())
        .bind(&user.name)
        .bind(age)
        .execute(&mut *tx)
        .await?;

        for history in &user.loan_histories {
            upsert_history(&mut tx, history).await?;
        }

        tx.commit().await?;
        tracing::debug!(user_id = %user.id.value(), "user saved");
        Ok(())
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>> {
        let mut con = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT id, name, age
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.value())
        .fetch_optional(&mut *con)
        .await?;

        Self::load_with_histories(&mut con, row).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>> {
        let mut con = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT id, name, age
            FROM users
            WHERE name = $1
            ORDER BY seq ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *con)
        .await?;

        Self::load_with_histories(&mut con, row).await
    }

    /// 会員と貸出履歴をそれぞれ1クエリで取得し、メモリ上で結合する
    ///
    /// 2つのクエリは同じスナップショットを読む。
    async fn find_all(&self) -> Result<Vec<User>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let users = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT id, name, age
            FROM users
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let history_rows = sqlx::query(
            // language=postgresql
            r#"
            SELECT id, user_id, book_name, status
            FROM user_loan_histories
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        let mut histories: HashMap<UserId, Vec<UserLoanHistory>> = HashMap::new();
        for row in &history_rows {
            let history = map_row_to_history(row)?;
            histories.entry(history.user_id).or_default().push(history);
        }

        users
            .into_iter()
            .map(|row| {
                let loan_histories = histories
                    .remove(&UserId::from_uuid(row.id))
                    .unwrap_or_default();
                row.into_user(loan_histories)
            })
            .collect()
    }

    async fn delete(&self, user_id: UserId) -> Result<()> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.value())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        Ok(())
    }
}
