use crate::domain::{UserId, UserLoanHistory, UserLoanHistoryId, UserLoanStatus};
use crate::ports::errors::Result;
use crate::ports::user_loan_history_repository::UserLoanHistoryRepository as UserLoanHistoryRepositoryTrait;
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Row, postgres::PgRow};

/// PostgreSQLの行データをUserLoanHistoryに変換する
///
/// statusの文字列からの変換に失敗した場合は`RepositoryError::Conversion`を返す。
pub(super) fn map_row_to_history(row: &PgRow) -> Result<UserLoanHistory> {
    let status_str: &str = row.try_get("status")?;
    let status = status_str.parse::<UserLoanStatus>()?;

    Ok(UserLoanHistory {
        id: UserLoanHistoryId::from_uuid(row.try_get("id")?),
        user_id: UserId::from_uuid(row.try_get("user_id")?),
        book_name: row.try_get("book_name")?,
        status,
    })
}

/// 貸出履歴をupsertする
///
/// 会員リポジトリのトランザクション内からも使われる。
pub(super) async fn upsert_history(
    con: &mut PgConnection,
    history: &UserLoanHistory,
) -> Result<()> {
    sqlx::query(
        // language=postgresql
        r#"
        INSERT INTO user_loan_histories (id, user_id, book_name, status)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id)
        DO UPDATE SET
            book_name = EXCLUDED.book_name,
            status = EXCLUDED.status,
            updated_at = NOW()
        "#,
    )
    .bind(history.id.value())
    .bind(history.user_id.value())
    .bind(&history.book_name)
    .bind(history.status.as_str())
    .execute(con)
    .await?;

    Ok(())
}

/// UserLoanHistoryRepositoryのPostgreSQL実装
pub struct UserLoanHistoryRepository {
    pool: PgPool,
}

impl UserLoanHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserLoanHistoryRepositoryTrait for UserLoanHistoryRepository {
    /// (book_name, status)のインデックスを使用する。
    /// statusがNULLの場合は条件から外れる。
    async fn find(
        &self,
        book_name: &str,
        status: Option<UserLoanStatus>,
    ) -> Result<Option<UserLoanHistory>> {
        let row = sqlx::query(
            // language=postgresql
            r#"
            SELECT id, user_id, book_name, status
            FROM user_loan_histories
            WHERE book_name = $1
              AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY seq ASC
            LIMIT 1
            "#,
        )
        .bind(book_name)
        .bind(status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_history).transpose()
    }

    async fn count_by_status(&self, status: UserLoanStatus) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            // language=postgresql
            r#"
            SELECT COUNT(*)
            FROM user_loan_histories
            WHERE status = $1
            "#,
        )
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn save(&self, history: &UserLoanHistory) -> Result<()> {
        let mut con = self.pool.acquire().await?;
        upsert_history(&mut con, history).await
    }

    async fn find_all(&self) -> Result<Vec<UserLoanHistory>> {
        let rows = sqlx::query(
            // language=postgresql
            r#"
            SELECT id, user_id, book_name, status
            FROM user_loan_histories
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_history).collect()
    }

    async fn find_all_by_user_id(&self, user_id: UserId) -> Result<Vec<UserLoanHistory>> {
        let mut con = self.pool.acquire().await?;
        find_by_user_id(&mut con, user_id).await
    }

    /// 1トランザクションでまとめて保存する
    async fn save_all(&self, histories: &[UserLoanHistory]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for history in histories {
            upsert_history(&mut tx, history).await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

pub(super) async fn find_by_user_id(
    con: &mut PgConnection,
    user_id: UserId,
) -> Result<Vec<UserLoanHistory>> {
    let rows = sqlx::query(
        // language=postgresql
        r#"
        SELECT id, user_id, book_name, status
        FROM user_loan_histories
        WHERE user_id = $1
        ORDER BY seq ASC
        "#,
    )
    .bind(user_id.value())
    .fetch_all(con)
    .await?;

    rows.iter().map(map_row_to_history).collect()
}
