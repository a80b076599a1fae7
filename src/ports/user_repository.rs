use crate::domain::{User, UserId};
use async_trait::async_trait;

use super::errors::Result;

/// 会員リポジトリポート
///
/// 会員集約は貸出履歴を含めて保存・取得・削除される。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 会員と貸出履歴を保存する（upsert）
    async fn save(&self, user: &User) -> Result<()>;

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>>;

    /// 名前の完全一致で会員を1件検索する
    async fn find_by_name(&self, name: &str) -> Result<Option<User>>;

    /// すべての会員を貸出履歴付きで取得する
    async fn find_all(&self) -> Result<Vec<User>>;

    /// 会員を削除する。貸出履歴も一緒に削除される。
    async fn delete(&self, user_id: UserId) -> Result<()>;

    async fn delete_all(&self) -> Result<()>;

    async fn save_all(&self, users: &[User]) -> Result<()> {
        for user in users {
            self.save(user).await?;
        }
        Ok(())
    }
}
