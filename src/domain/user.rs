use serde::{Deserialize, Serialize};

use super::{Book, DomainError, UserId, UserLoanHistory, UserLoanStatus};

/// 会員集約
///
/// 貸出履歴は会員に所有され、会員の保存・削除と一緒に永続化される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub age: Option<u32>,
    pub loan_histories: Vec<UserLoanHistory>,
}

/// 年齢の上限（永続化先の`INTEGER`列に収まる値）
pub const MAX_AGE: u32 = i32::MAX as u32;

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::BlankUserName);
    }
    Ok(())
}

fn validate_age(age: Option<u32>) -> Result<(), DomainError> {
    match age {
        Some(age) if age > MAX_AGE => Err(DomainError::InvalidAge(age)),
        _ => Ok(()),
    }
}

impl User {
    /// 新しい会員を作成する
    ///
    /// # エラー
    /// 会員名が空白のみの場合は`DomainError::BlankUserName`を、
    /// 年齢が`MAX_AGE`を超える場合は`DomainError::InvalidAge`を返す
    pub fn new(name: impl Into<String>, age: Option<u32>) -> Result<Self, DomainError> {
        Self::restore(UserId::new(), name, age, Vec::new())
    }

    /// 永続化済みの値から復元する
    pub fn restore(
        id: UserId,
        name: impl Into<String>,
        age: Option<u32>,
        loan_histories: Vec<UserLoanHistory>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        validate_name(&name)?;
        validate_age(age)?;
        Ok(Self {
            id,
            name,
            age,
            loan_histories,
        })
    }

    pub fn update_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// 書籍を借りる
    ///
    /// 貸出中の履歴を追加し、その履歴を返す。
    /// 同じ書籍が他の会員に貸出中かどうかはアプリケーション層で確認する。
    pub fn loan_book(&mut self, book: &Book) -> &UserLoanHistory {
        self.loan_histories
            .push(UserLoanHistory::loaned(self.id, book.name.clone()));
        &self.loan_histories[self.loan_histories.len() - 1]
    }

    /// 書籍を返却する
    ///
    /// # エラー
    /// 書籍名に一致する貸出中の履歴がない場合は`DomainError::LoanNotFound`を返す
    pub fn return_book(&mut self, book_name: &str) -> Result<&UserLoanHistory, DomainError> {
        let history = self
            .loan_histories
            .iter_mut()
            .find(|h| h.book_name == book_name && h.status == UserLoanStatus::Loaned)
            .ok_or_else(|| DomainError::LoanNotFound(book_name.to_string()))?;
        history.do_return();
        Ok(&*history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookType;

    fn book(name: &str) -> Book {
        Book::new(name, BookType::Computer).unwrap()
    }

    #[test]
    fn test_user_new() {
        let user = User::new("A", Some(20)).unwrap();
        assert_eq!(user.name, "A");
        assert_eq!(user.age, Some(20));
        assert!(user.loan_histories.is_empty());
    }

    #[test]
    fn test_user_blank_name_rejected() {
        assert_eq!(User::new(" ", None).unwrap_err(), DomainError::BlankUserName);
    }

    #[test]
    fn test_user_age_out_of_range_rejected() {
        assert!(User::new("A", Some(MAX_AGE)).is_ok());
        assert_eq!(
            User::new("A", Some(MAX_AGE + 1)).unwrap_err(),
            DomainError::InvalidAge(MAX_AGE + 1)
        );
    }

    #[test]
    fn test_update_name() {
        let mut user = User::new("A", None).unwrap();
        user.update_name("B").unwrap();
        assert_eq!(user.name, "B");

        assert_eq!(user.update_name("").unwrap_err(), DomainError::BlankUserName);
        assert_eq!(user.name, "B");
    }

    #[test]
    fn test_loan_book_adds_loaned_history() {
        let mut user = User::new("A", None).unwrap();
        let history = user.loan_book(&book("Object")).clone();

        assert_eq!(history.book_name, "Object");
        assert_eq!(history.user_id, user.id);
        assert_eq!(history.status, UserLoanStatus::Loaned);
        assert_eq!(user.loan_histories.len(), 1);
    }

    #[test]
    fn test_return_book_marks_returned() {
        let mut user = User::new("A", None).unwrap();
        user.loan_book(&book("Object"));

        let returned = user.return_book("Object").unwrap();
        assert!(returned.is_return());
        assert!(user.loan_histories[0].is_return());
    }

    #[test]
    fn test_return_book_skips_already_returned_history() {
        let mut user = User::new("A", None).unwrap();
        user.loan_book(&book("Object"));
        user.return_book("Object").unwrap();
        user.loan_book(&book("Object"));

        user.return_book("Object").unwrap();
        assert!(user.loan_histories.iter().all(UserLoanHistory::is_return));
    }

    #[test]
    fn test_return_book_without_loan_fails() {
        let mut user = User::new("A", None).unwrap();
        assert_eq!(
            user.return_book("Object").unwrap_err(),
            DomainError::LoanNotFound("Object".to_string())
        );
    }
}
