//! End-to-end scenario and invariant suites.
//!
//! The catalog's business rules are global: loan lists and copy counts
//! must agree across both collections no matter which operations ran.
//! [`check_invariants`] asserts that agreement; the test modules drive
//! the engine through fixed scenarios and generated operation sequences
//! and call it after every step.

use librarium_core::{Catalog, MAX_BORROWED};
use std::collections::HashSet;

/// Asserts every cross-collection invariant of a catalog.
///
/// Panics with a descriptive message on the first violation. Checked
/// invariants:
///
/// - no member holds more than [`MAX_BORROWED`] books;
/// - no member holds the same ISBN twice;
/// - every held ISBN refers to a book still in the catalog;
/// - each book's loaned-copy count equals the number of members holding
///   it.
pub fn check_invariants(catalog: &Catalog) {
    for member in catalog.members() {
        assert!(
            member.loan_count() <= MAX_BORROWED,
            "member {} holds {} books, over the limit",
            member.member_id(),
            member.loan_count()
        );

        let distinct: HashSet<&String> = member.borrowed_books().iter().collect();
        assert_eq!(
            distinct.len(),
            member.loan_count(),
            "member {} holds a duplicate ISBN",
            member.member_id()
        );

        for isbn in member.borrowed_books() {
            assert!(
                catalog.book(isbn).is_some(),
                "member {} holds {}, which is not in the catalog",
                member.member_id(),
                isbn
            );
        }
    }

    for (isbn, book) in catalog.books() {
        let holders = catalog.members().filter(|m| m.holds(isbn)).count() as u32;
        assert_eq!(
            book.loaned_copies(),
            holders,
            "book {isbn} reports {} loaned copies but {holders} members hold it",
            book.loaned_copies()
        );
    }
}
