use crate::domain::{User, UserId};
use crate::ports::errors::Result;
use crate::ports::user_repository::UserRepository as UserRepositoryTrait;
use async_trait::async_trait;

use super::store::{InMemoryStore, Tables, UserRow};

/// UserRepositoryのインメモリ実装
///
/// 貸出履歴は共有ストアに書き込むので、会員の保存結果は
/// 貸出履歴リポジトリからも見える。
#[derive(Debug, Clone)]
pub struct UserRepository {
    store: InMemoryStore,
}

impl UserRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

fn to_user(tables: &Tables, row: &UserRow) -> Result<User> {
    let user = User::restore(
        row.id,
        row.name.clone(),
        row.age,
        tables.histories_of(row.id),
    )?;
    Ok(user)
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn save(&self, user: &User) -> Result<()> {
        let mut tables = self.store.lock();
        let row = UserRow {
            id: user.id,
            name: user.name.clone(),
            age: user.age,
        };
        match tables.users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = row,
            None => tables.users.push(row),
        }
        for history in &user.loan_histories {
            tables.upsert_history(history);
        }
        Ok(())
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>> {
        let tables = self.store.lock();
        tables
            .users
            .iter()
            .find(|u| u.id == user_id)
            .map(|row| to_user(&tables, row))
            .transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>> {
        let tables = self.store.lock();
        tables
            .users
            .iter()
            .find(|u| u.name == name)
            .map(|row| to_user(&tables, row))
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let tables = self.store.lock();
        tables.users.iter().map(|row| to_user(&tables, row)).collect()
    }

    async fn delete(&self, user_id: UserId) -> Result<()> {
        let mut tables = self.store.lock();
        tables.users.retain(|u| u.id != user_id);
        tables.histories.retain(|h| h.user_id != user_id);
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        let mut tables = self.store.lock();
        tables.users.clear();
        tables.histories.clear();
        Ok(())
    }
}
