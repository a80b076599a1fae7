use crate::application::{ServiceDependencies, book, user};
use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::{
    error::ApiError,
    extractor::{AppJson, AppQuery},
    types::{
        BookLoanRequest, BookRequest, BookReturnRequest, BookStatResponse, UserCreateRequest,
        UserDeleteQuery, UserLoanHistoryResponse, UserResponse, UserUpdateRequest,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// 会員
// ============================================================================

/// POST /user - 会員を登録
pub async fn save_user(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<UserCreateRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = user::save_user(&state.service_deps, req.to_command()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /user - 会員一覧
pub async fn get_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = user::get_users(&state.service_deps).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// PUT /user - 会員名を変更
pub async fn update_user_name(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<UserUpdateRequest>,
) -> Result<StatusCode, ApiError> {
    user::update_user_name(&state.service_deps, req.to_command()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /user?name= - 会員を削除
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<UserDeleteQuery>,
) -> Result<StatusCode, ApiError> {
    user::delete_user(&state.service_deps, &query.name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /user/loan - 会員ごとの貸出履歴
pub async fn get_user_loan_histories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserLoanHistoryResponse>>, ApiError> {
    let histories = user::get_user_loan_histories(&state.service_deps).await?;
    Ok(Json(
        histories
            .into_iter()
            .map(UserLoanHistoryResponse::from)
            .collect(),
    ))
}

// ============================================================================
// 書籍
// ============================================================================

/// POST /book - 書籍を登録
pub async fn save_book(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<BookRequest>,
) -> Result<StatusCode, ApiError> {
    book::save_book(&state.service_deps, req.to_command()).await?;
    Ok(StatusCode::CREATED)
}

/// POST /book/loan - 書籍を貸し出す
///
/// 書籍が貸出中の場合は422を返す。
pub async fn loan_book(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<BookLoanRequest>,
) -> Result<StatusCode, ApiError> {
    book::loan_book(&state.service_deps, req.to_command()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /book/return - 書籍を返却
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<BookReturnRequest>,
) -> Result<StatusCode, ApiError> {
    book::return_book(&state.service_deps, req.to_command()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /book/loan - 貸出中の冊数
pub async fn count_loaned_book(
    State(state): State<Arc<AppState>>,
) -> Result<Json<i64>, ApiError> {
    let count = book::count_loaned_book(&state.service_deps).await?;
    Ok(Json(count))
}

/// GET /book/stat - 分野ごとの書籍数
pub async fn get_book_statistics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookStatResponse>>, ApiError> {
    let stats = book::get_book_statistics(&state.service_deps).await?;
    Ok(Json(stats.into_iter().map(BookStatResponse::from).collect()))
}
