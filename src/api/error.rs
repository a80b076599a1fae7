use crate::application::LibraryApplicationError;
use crate::domain::DomainError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーと、リクエストの抽出失敗をHTTPレスポンスへマッピングする。
#[derive(Debug)]
pub enum ApiError {
    Application(LibraryApplicationError),
    /// ボディやクエリを要求の型に変換できない
    InvalidRequest(String),
}

impl From<LibraryApplicationError> for ApiError {
    fn from(err: LibraryApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            ApiError::Application(err) => err,
            ApiError::InvalidRequest(message) => {
                tracing::debug!(%message, "rejected request");
                let body = Json(ErrorResponse::new("VALIDATION_ERROR", message));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
        };

        let message = err.to_string();
        let (status, error_type, message) = match err {
            // 404 Not Found
            LibraryApplicationError::UserNotFound(_) => {
                (StatusCode::NOT_FOUND, "USER_NOT_FOUND", message)
            }
            LibraryApplicationError::BookNotFound(_) => {
                (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND", message)
            }
            LibraryApplicationError::Domain(DomainError::LoanNotFound(_)) => {
                (StatusCode::NOT_FOUND, "LOAN_NOT_FOUND", message)
            }

            // 422 Unprocessable Entity - ビジネスルール違反
            LibraryApplicationError::BookAlreadyLoaned(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "BOOK_ALREADY_LOANED",
                message,
            ),
            LibraryApplicationError::Domain(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", message)
            }

            // 500 Internal Server Error
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            LibraryApplicationError::Repository(ref e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Repository error"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "REPOSITORY_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
