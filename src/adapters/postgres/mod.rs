pub mod book_repository;
pub mod user_loan_history_repository;
pub mod user_repository;

use sqlx::{PgPool, migrate::MigrateError, postgres::PgPoolOptions};

use crate::config::AppConfig;

// パブリックに型を再エクスポート
pub use book_repository::BookRepository as PostgresBookRepository;
pub use user_loan_history_repository::UserLoanHistoryRepository as PostgresUserLoanHistoryRepository;
pub use user_repository::UserRepository as PostgresUserRepository;

/// 設定からコネクションプールを作成する
pub async fn connect(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
}

/// `migrations/`のマイグレーションを適用する
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
