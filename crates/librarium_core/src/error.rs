//! Error types for the Librarium catalog core.

use crate::member::MAX_BORROWED;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur in catalog operations.
///
/// Every anticipated failure is a value of this enum, never a panic:
/// callers match on the variant and may surface the `Display` text to an
/// end user. The message wording is not a stable interface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A book with this ISBN is already in the catalog.
    #[error("book with ISBN {isbn} already exists")]
    DuplicateIsbn {
        /// The ISBN that was already present.
        isbn: String,
    },

    /// No book with this ISBN is in the catalog.
    #[error("book with ISBN {isbn} not found")]
    BookNotFound {
        /// The ISBN that was not found.
        isbn: String,
    },

    /// A member with this ID is already registered.
    #[error("member with ID {member_id} already exists")]
    DuplicateMemberId {
        /// The member ID that was already present.
        member_id: String,
    },

    /// No member with this ID is registered.
    #[error("member with ID {member_id} not found")]
    MemberNotFound {
        /// The member ID that was not found.
        member_id: String,
    },

    /// Genre text outside the closed set.
    #[error("unknown genre: {value}")]
    UnknownGenre {
        /// The rejected genre text.
        value: String,
    },

    /// All copies of the book are currently lent out.
    #[error("no copies of book {isbn} are currently available")]
    NoCopiesAvailable {
        /// The book with nothing on the shelf.
        isbn: String,
    },

    /// The member already holds the maximum number of books.
    #[error("member {member_id} has reached the borrowing limit ({limit} books)")]
    BorrowLimitReached {
        /// The member at the limit.
        member_id: String,
        /// The borrowing limit that was hit.
        limit: usize,
    },

    /// The member already holds a copy of this book.
    #[error("member {member_id} has already borrowed a copy of book {isbn}")]
    AlreadyBorrowed {
        /// The book already held.
        isbn: String,
        /// The member holding it.
        member_id: String,
    },

    /// The member does not hold a copy of this book.
    #[error("book {isbn} was not borrowed by member {member_id}")]
    NotBorrowed {
        /// The book that was not held.
        isbn: String,
        /// The member who does not hold it.
        member_id: String,
    },

    /// An update would set total copies below the outstanding-loan count.
    #[error(
        "cannot set total copies of book {isbn} to {requested}: \
         {on_loan} copies are currently on loan"
    )]
    CopiesBelowLoans {
        /// The book being updated.
        isbn: String,
        /// The requested total copy count.
        requested: u32,
        /// Copies currently lent out.
        on_loan: u32,
    },

    /// The book cannot be deleted while copies are on loan.
    #[error("cannot delete book {isbn}: {on_loan} copies are currently on loan")]
    BookHasLoans {
        /// The book with outstanding loans.
        isbn: String,
        /// Copies currently lent out.
        on_loan: u32,
    },

    /// The member cannot be deleted while holding borrowed books.
    #[error("cannot delete member {member_id}: {count} borrowed books outstanding")]
    MemberHasLoans {
        /// The member with outstanding loans.
        member_id: String,
        /// Number of books still held.
        count: usize,
    },
}

impl CatalogError {
    /// Creates a duplicate-ISBN error.
    pub fn duplicate_isbn(isbn: impl Into<String>) -> Self {
        Self::DuplicateIsbn { isbn: isbn.into() }
    }

    /// Creates a book-not-found error.
    pub fn book_not_found(isbn: impl Into<String>) -> Self {
        Self::BookNotFound { isbn: isbn.into() }
    }

    /// Creates a duplicate-member-ID error.
    pub fn duplicate_member_id(member_id: impl Into<String>) -> Self {
        Self::DuplicateMemberId {
            member_id: member_id.into(),
        }
    }

    /// Creates a member-not-found error.
    pub fn member_not_found(member_id: impl Into<String>) -> Self {
        Self::MemberNotFound {
            member_id: member_id.into(),
        }
    }

    /// Creates an unknown-genre error.
    pub fn unknown_genre(value: impl Into<String>) -> Self {
        Self::UnknownGenre {
            value: value.into(),
        }
    }

    /// Creates a no-copies-available error.
    pub fn no_copies_available(isbn: impl Into<String>) -> Self {
        Self::NoCopiesAvailable { isbn: isbn.into() }
    }

    /// Creates a borrow-limit error for a member.
    pub fn borrow_limit_reached(member_id: impl Into<String>) -> Self {
        Self::BorrowLimitReached {
            member_id: member_id.into(),
            limit: MAX_BORROWED,
        }
    }
}
