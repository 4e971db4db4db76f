//! Seeded catalog fixtures and helpers.
//!
//! Provides convenience functions for setting up catalogs with known
//! contents and common loan scenarios.

use librarium_core::{Catalog, Genre};

/// The ISBNs present in a [`seeded_catalog`], in key order.
pub const SEEDED_ISBNS: [&str; 5] = ["978-A", "978-B", "978-C", "978-D", "978-E"];

/// The member IDs present in a [`seeded_catalog`].
pub const SEEDED_MEMBER_IDS: [&str; 2] = ["M001", "M002"];

/// Creates a catalog with five books across the genre set and two members.
///
/// Contents are fixed so tests can name records directly: `978-A` has two
/// copies, every other book has one, and no loans are outstanding.
pub fn seeded_catalog() -> Catalog {
    let mut catalog = Catalog::new();

    let books = [
        ("978-A", "The Test Book", "Test Author", Genre::Fiction, 2),
        ("978-B", "Sci-Fi Trial", "Trial Author", Genre::SciFi, 1),
        ("978-C", "Limit Test 1", "L Author", Genre::Mystery, 1),
        ("978-D", "Limit Test 2", "L Author", Genre::Mystery, 1),
        ("978-E", "Limit Test 3", "L Author", Genre::Biography, 1),
    ];
    for (isbn, title, author, genre, copies) in books {
        catalog
            .add_book(isbn, title, author, genre, copies)
            .expect("seed book");
    }

    catalog
        .add_member("M001", "Alice Test", "alice@test.com")
        .expect("seed member");
    catalog
        .add_member("M002", "Bob Test", "bob@test.com")
        .expect("seed member");

    catalog
}

/// Creates a seeded catalog with one loan outstanding: `978-A` → `M001`.
pub fn catalog_with_loan() -> Catalog {
    let mut catalog = seeded_catalog();
    catalog.borrow_book("978-A", "M001").expect("seed loan");
    catalog
}

/// Runs a test against a freshly seeded catalog.
pub fn with_catalog<F, R>(f: F) -> R
where
    F: FnOnce(&mut Catalog) -> R,
{
    let mut catalog = seeded_catalog();
    f(&mut catalog)
}
