use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::book::{BookStat, LoanBook, ReturnBook, SaveBook};
use crate::application::user::{BookHistory, SaveUser, UpdateUserName, UserLoanHistories};
use crate::domain::{BookType, User, UserId};

// ============================================================================
// 会員
// ============================================================================

/// POST /user
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateRequest {
    pub name: String,
    pub age: Option<u32>,
}

impl UserCreateRequest {
    pub fn to_command(self) -> SaveUser {
        SaveUser {
            name: self.name,
            age: self.age,
        }
    }
}

/// PUT /user
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    pub id: Uuid,
    pub name: String,
}

impl UserUpdateRequest {
    pub fn to_command(self) -> UpdateUserName {
        UpdateUserName {
            id: UserId::from_uuid(self.id),
            name: self.name,
        }
    }
}

/// DELETE /user?name=
#[derive(Debug, Deserialize)]
pub struct UserDeleteQuery {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub age: Option<u32>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.value(),
            name: user.name,
            age: user.age,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookHistoryResponse {
    pub name: String,
    pub is_return: bool,
}

impl From<BookHistory> for BookHistoryResponse {
    fn from(history: BookHistory) -> Self {
        Self {
            name: history.name,
            is_return: history.is_return,
        }
    }
}

/// GET /user/loan
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLoanHistoryResponse {
    pub name: String,
    pub books: Vec<BookHistoryResponse>,
}

impl From<UserLoanHistories> for UserLoanHistoryResponse {
    fn from(histories: UserLoanHistories) -> Self {
        Self {
            name: histories.name,
            books: histories
                .books
                .into_iter()
                .map(BookHistoryResponse::from)
                .collect(),
        }
    }
}

// ============================================================================
// 書籍
// ============================================================================

/// POST /book
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub book_type: BookType,
}

impl BookRequest {
    pub fn to_command(self) -> SaveBook {
        SaveBook {
            name: self.name,
            book_type: self.book_type,
        }
    }
}

/// POST /book/loan
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookLoanRequest {
    pub user_name: String,
    pub book_name: String,
}

impl BookLoanRequest {
    pub fn to_command(self) -> LoanBook {
        LoanBook {
            user_name: self.user_name,
            book_name: self.book_name,
        }
    }
}

/// PUT /book/return
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookReturnRequest {
    pub user_name: String,
    pub book_name: String,
}

impl BookReturnRequest {
    pub fn to_command(self) -> ReturnBook {
        ReturnBook {
            user_name: self.user_name,
            book_name: self.book_name,
        }
    }
}

/// GET /book/stat
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookStatResponse {
    #[serde(rename = "type")]
    pub book_type: BookType,
    pub count: i64,
}

impl From<BookStat> for BookStatResponse {
    fn from(stat: BookStat) -> Self {
        Self {
            book_type: stat.book_type,
            count: stat.count,
        }
    }
}

// ============================================================================
// エラー
// ============================================================================

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
