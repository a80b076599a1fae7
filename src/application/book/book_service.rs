use crate::domain::{Book, BookType, UserLoanStatus};

use super::super::dependencies::ServiceDependencies;
use super::super::errors::{LibraryApplicationError, Result};

/// コマンド：書籍を登録する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveBook {
    pub name: String,
    pub book_type: BookType,
}

/// コマンド：書籍を貸し出す
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanBook {
    pub user_name: String,
    pub book_name: String,
}

/// コマンド：書籍を返却する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnBook {
    pub user_name: String,
    pub book_name: String,
}

/// 分野ごとの書籍数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookStat {
    pub book_type: BookType,
    pub count: i64,
}

/// 書籍を登録する
pub async fn save_book(deps: &ServiceDependencies, cmd: SaveBook) -> Result<Book> {
    let book = Book::new(cmd.name, cmd.book_type)?;
    deps.book_repository.save(&book).await?;
    tracing::info!(book_name = %book.name, book_type = %book.book_type, "book registered");
    Ok(book)
}

/// 書籍を貸し出す
///
/// ビジネスルール：
/// - 書籍がカタログに存在すること
/// - 同じ書籍名の貸出中の履歴がないこと
/// - 会員が存在すること
///
/// 返却済みの履歴があっても再貸出は可能。
pub async fn loan_book(deps: &ServiceDependencies, cmd: LoanBook) -> Result<()> {
    // 1. 書籍の存在確認
    let book = deps
        .book_repository
        .find_by_name(&cmd.book_name)
        .await?
        .ok_or_else(|| LibraryApplicationError::BookNotFound(cmd.book_name.clone()))?;

    // 2. 貸出中かどうかの確認
    let on_loan = deps
        .user_loan_history_repository
        .find_by_book_name_and_status(&book.name, UserLoanStatus::Loaned)
        .await?;

    if on_loan.is_some() {
        return Err(LibraryApplicationError::BookAlreadyLoaned(book.name));
    }

    // 3. 会員の存在確認
    let mut user = deps
        .user_repository
        .find_by_name(&cmd.user_name)
        .await?
        .ok_or_else(|| LibraryApplicationError::UserNotFound(cmd.user_name.clone()))?;

    // 4. 貸出履歴を追加して保存
    user.loan_book(&book);
    deps.user_repository.save(&user).await?;

    tracing::info!(user_name = %user.name, book_name = %book.name, "book loaned");
    Ok(())
}

/// 書籍を返却する
///
/// 書籍がカタログから削除されていても、貸出中の履歴があれば返却できる。
pub async fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> Result<()> {
    let mut user = deps
        .user_repository
        .find_by_name(&cmd.user_name)
        .await?
        .ok_or_else(|| LibraryApplicationError::UserNotFound(cmd.user_name.clone()))?;

    user.return_book(&cmd.book_name)?;
    deps.user_repository.save(&user).await?;

    tracing::info!(user_name = %user.name, book_name = %cmd.book_name, "book returned");
    Ok(())
}

/// 貸出中の冊数
pub async fn count_loaned_book(deps: &ServiceDependencies) -> Result<i64> {
    let count = deps
        .user_loan_history_repository
        .count_by_status(UserLoanStatus::Loaned)
        .await?;
    Ok(count)
}

/// 分野ごとの書籍数（1冊以上ある分野のみ）
pub async fn get_book_statistics(deps: &ServiceDependencies) -> Result<Vec<BookStat>> {
    let stats = deps
        .book_repository
        .count_by_type()
        .await?
        .into_iter()
        .map(|(book_type, count)| BookStat { book_type, count })
        .collect();
    Ok(stats)
}
