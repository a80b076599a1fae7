use crate::adapters::memory::{self, InMemoryStore};
use crate::adapters::postgres::{
    PostgresBookRepository, PostgresUserLoanHistoryRepository, PostgresUserRepository,
};
use crate::ports::*;
use sqlx::PgPool;
use std::sync::Arc;

/// サービスの依存関係
///
/// ユースケースは振る舞いを持たない関数として定義し、
/// リポジトリはこの構造体経由で明示的に渡す。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub user_repository: Arc<dyn UserRepository>,
    pub book_repository: Arc<dyn BookRepository>,
    pub user_loan_history_repository: Arc<dyn UserLoanHistoryRepository>,
}

impl ServiceDependencies {
    /// PostgreSQLアダプターで組み立てる
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            user_repository: Arc::new(PostgresUserRepository::new(pool.clone())),
            book_repository: Arc::new(PostgresBookRepository::new(pool.clone())),
            user_loan_history_repository: Arc::new(PostgresUserLoanHistoryRepository::new(pool)),
        }
    }

    /// 1つのストアを共有するインメモリアダプターで組み立てる
    pub fn in_memory(store: InMemoryStore) -> Self {
        Self {
            user_repository: Arc::new(memory::UserRepository::new(store.clone())),
            book_repository: Arc::new(memory::BookRepository::new(store.clone())),
            user_loan_history_repository: Arc::new(memory::UserLoanHistoryRepository::new(store)),
        }
    }
}
