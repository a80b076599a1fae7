use serde::{Deserialize, Serialize};

use super::{UserId, UserLoanHistoryId, UserLoanStatus};

/// 貸出履歴 - 会員による1冊の書籍の1回の貸出
///
/// 書籍はIDではなく書籍名で参照する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLoanHistory {
    pub id: UserLoanHistoryId,
    pub user_id: UserId,
    pub book_name: String,
    pub status: UserLoanStatus,
}

impl UserLoanHistory {
    /// 貸出中の履歴を新規作成する
    pub fn loaned(user_id: UserId, book_name: impl Into<String>) -> Self {
        Self {
            id: UserLoanHistoryId::new(),
            user_id,
            book_name: book_name.into(),
            status: UserLoanStatus::Loaned,
        }
    }

    /// 返却済みにする（既に返却済みでも何もしない）
    pub fn do_return(&mut self) {
        self.status = UserLoanStatus::Returned;
    }

    pub fn is_return(&self) -> bool {
        self.status == UserLoanStatus::Returned
    }
}
