use crate::domain::{UserId, UserLoanHistory, UserLoanStatus};
use async_trait::async_trait;

use super::errors::Result;

/// 貸出履歴リポジトリポート
///
/// 書籍名とステータスによる検索を提供する。
/// 一致する履歴がない場合は`Ok(None)`を返し、エラーにはしない。
#[async_trait]
pub trait UserLoanHistoryRepository: Send + Sync {
    /// 書籍名（と任意でステータス）で貸出履歴を1件検索する
    ///
    /// `status`が`None`の場合はステータスを問わない。
    /// 複数件一致する場合は最初に保存されたものを返す。
    async fn find(
        &self,
        book_name: &str,
        status: Option<UserLoanStatus>,
    ) -> Result<Option<UserLoanHistory>>;

    /// ステータスごとの件数を数える（一致なしは0）
    async fn count_by_status(&self, status: UserLoanStatus) -> Result<i64>;

    /// 貸出履歴を保存する（IDによるupsert）
    async fn save(&self, history: &UserLoanHistory) -> Result<()>;

    /// 保存順にすべての貸出履歴を取得する
    async fn find_all(&self) -> Result<Vec<UserLoanHistory>>;

    /// 会員の貸出履歴を保存順に取得する
    async fn find_all_by_user_id(&self, user_id: UserId) -> Result<Vec<UserLoanHistory>>;

    /// 書籍名の完全一致で貸出履歴を1件検索する
    async fn find_by_book_name(&self, book_name: &str) -> Result<Option<UserLoanHistory>> {
        self.find(book_name, None).await
    }

    /// 書籍名とステータスの完全一致で貸出履歴を1件検索する
    ///
    /// 書籍が貸出中かどうかの確認に使用される。
    async fn find_by_book_name_and_status(
        &self,
        book_name: &str,
        status: UserLoanStatus,
    ) -> Result<Option<UserLoanHistory>> {
        self.find(book_name, Some(status)).await
    }

    async fn save_all(&self, histories: &[UserLoanHistory]) -> Result<()> {
        for history in histories {
            self.save(history).await?;
        }
        Ok(())
    }
}
