//! Demo data for the shell.

use librarium_core::{Catalog, CatalogResult, Genre};

const DEMO_BOOKS: [(&str, &str, &str, Genre, u32); 5] = [
    (
        "978-0001",
        "The Quiet Library",
        "M. Harwood",
        Genre::Fiction,
        3,
    ),
    (
        "978-0002",
        "Signals from Nowhere",
        "V. Okafor",
        Genre::SciFi,
        2,
    ),
    (
        "978-0003",
        "The Cartographer's Secret",
        "E. Lindqvist",
        Genre::Mystery,
        1,
    ),
    (
        "978-0004",
        "A Life in Margins",
        "T. Bellamy",
        Genre::Biography,
        2,
    ),
    ("978-0005", "The Ember Crown", "R. Ashvale", Genre::Fantasy, 2),
];

const DEMO_MEMBERS: [(&str, &str, &str); 2] = [
    ("M001", "Alice Example", "alice@example.com"),
    ("M002", "Bob Example", "bob@example.com"),
];

/// Preloads a small set of books and members.
///
/// Only fails if the catalog already contains one of the demo keys.
pub fn seed(catalog: &mut Catalog) -> CatalogResult<()> {
    for (isbn, title, author, genre, copies) in DEMO_BOOKS {
        catalog.add_book(isbn, title, author, genre, copies)?;
    }
    for (member_id, name, email) in DEMO_MEMBERS {
        catalog.add_member(member_id, name, email)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_a_fresh_catalog() {
        let mut catalog = Catalog::new();
        seed(&mut catalog).unwrap();
        assert_eq!(catalog.book_count(), 5);
        assert_eq!(catalog.member_count(), 2);
    }

    #[test]
    fn seeding_twice_fails_on_duplicates() {
        let mut catalog = Catalog::new();
        seed(&mut catalog).unwrap();
        assert!(seed(&mut catalog).is_err());
    }
}
