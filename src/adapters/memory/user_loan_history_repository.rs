use crate::domain::{UserId, UserLoanHistory, UserLoanStatus};
use crate::ports::errors::Result;
use crate::ports::user_loan_history_repository::UserLoanHistoryRepository as UserLoanHistoryRepositoryTrait;
use async_trait::async_trait;

use super::store::InMemoryStore;

/// UserLoanHistoryRepositoryのインメモリ実装
///
/// 検索は保存順に走査し、最初に一致した履歴を返す。
#[derive(Debug, Clone)]
pub struct UserLoanHistoryRepository {
    store: InMemoryStore,
}

impl UserLoanHistoryRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserLoanHistoryRepositoryTrait for UserLoanHistoryRepository {
    async fn find(
        &self,
        book_name: &str,
        status: Option<UserLoanStatus>,
    ) -> Result<Option<UserLoanHistory>> {
        let tables = self.store.lock();
        Ok(tables
            .histories
            .iter()
            .find(|h| h.book_name == book_name && status.is_none_or(|s| h.status == s))
            .cloned())
    }

    async fn count_by_status(&self, status: UserLoanStatus) -> Result<i64> {
        let tables = self.store.lock();
        let count = tables.histories.iter().filter(|h| h.status == status).count();
        Ok(count as i64)
    }

    /// 外部キーがないため、未登録の会員の履歴も保存できる
    async fn save(&self, history: &UserLoanHistory) -> Result<()> {
        self.store.lock().upsert_history(history);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<UserLoanHistory>> {
        Ok(self.store.lock().histories.clone())
    }

    async fn find_all_by_user_id(&self, user_id: UserId) -> Result<Vec<UserLoanHistory>> {
        Ok(self.store.lock().histories_of(user_id))
    }
}
