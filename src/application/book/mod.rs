mod book_service;

pub use book_service::{
    BookStat, LoanBook, ReturnBook, SaveBook, count_loaned_book, get_book_statistics, loan_book,
    return_book, save_book,
};
