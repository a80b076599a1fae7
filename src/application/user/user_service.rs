use crate::domain::{User, UserId};

use super::super::dependencies::ServiceDependencies;
use super::super::errors::{LibraryApplicationError, Result};

/// コマンド：会員を登録する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveUser {
    pub name: String,
    pub age: Option<u32>,
}

/// コマンド：会員名を変更する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserName {
    pub id: UserId,
    pub name: String,
}

/// 貸出履歴の1冊分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookHistory {
    pub name: String,
    pub is_return: bool,
}

/// 会員ごとの貸出履歴
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLoanHistories {
    pub name: String,
    pub books: Vec<BookHistory>,
}

impl From<User> for UserLoanHistories {
    fn from(user: User) -> Self {
        let books = user
            .loan_histories
            .iter()
            .map(|history| BookHistory {
                name: history.book_name.clone(),
                is_return: history.is_return(),
            })
            .collect();
        Self {
            name: user.name,
            books,
        }
    }
}

pub async fn save_user(deps: &ServiceDependencies, cmd: SaveUser) -> Result<User> {
    let user = User::new(cmd.name, cmd.age)?;
    deps.user_repository.save(&user).await?;
    tracing::info!(user_id = %user.id.value(), user_name = %user.name, "user registered");
    Ok(user)
}

pub async fn get_users(deps: &ServiceDependencies) -> Result<Vec<User>> {
    Ok(deps.user_repository.find_all().await?)
}

pub async fn update_user_name(deps: &ServiceDependencies, cmd: UpdateUserName) -> Result<()> {
    let mut user = deps
        .user_repository
        .find_by_id(cmd.id)
        .await?
        .ok_or_else(|| LibraryApplicationError::UserNotFound(cmd.id.value().to_string()))?;

    user.update_name(cmd.name)?;
    deps.user_repository.save(&user).await?;
    Ok(())
}

/// 会員を削除する（貸出履歴も削除される）
pub async fn delete_user(deps: &ServiceDependencies, name: &str) -> Result<()> {
    let user = deps
        .user_repository
        .find_by_name(name)
        .await?
        .ok_or_else(|| LibraryApplicationError::UserNotFound(name.to_string()))?;

    deps.user_repository.delete(user.id).await?;
    tracing::info!(user_id = %user.id.value(), "user deleted");
    Ok(())
}

/// すべての会員の貸出履歴
///
/// 貸出履歴のない会員も空の`books`で含まれる。
pub async fn get_user_loan_histories(
    deps: &ServiceDependencies,
) -> Result<Vec<UserLoanHistories>> {
    let users = deps.user_repository.find_all().await?;
    Ok(users.into_iter().map(UserLoanHistories::from).collect())
}
