use crate::domain::{Book, UserId, UserLoanHistory};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// 会員行（貸出履歴は`histories`で別管理）
#[derive(Debug, Clone)]
pub(super) struct UserRow {
    pub id: UserId,
    pub name: String,
    pub age: Option<u32>,
}

#[derive(Debug, Default)]
pub(super) struct Tables {
    pub users: Vec<UserRow>,
    pub books: Vec<Book>,
    pub histories: Vec<UserLoanHistory>,
}

/// インメモリリポジトリ群が共有するテーブル
///
/// 会員削除時の貸出履歴のカスケード削除と、会員保存時の履歴の反映を
/// 3つのリポジトリ間で一貫させるために1つのロックで保護する。
/// 各Vecは挿入順を保持する。
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Tables {
    /// IDが一致する履歴を置き換え、なければ末尾に追加する
    pub fn upsert_history(&mut self, history: &UserLoanHistory) {
        match self.histories.iter_mut().find(|h| h.id == history.id) {
            Some(existing) => *existing = history.clone(),
            None => self.histories.push(history.clone()),
        }
    }

    pub fn histories_of(&self, user_id: UserId) -> Vec<UserLoanHistory> {
        self.histories
            .iter()
            .filter(|h| h.user_id == user_id)
            .cloned()
            .collect()
    }
}
