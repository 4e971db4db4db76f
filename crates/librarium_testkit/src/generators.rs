//! Property-based test generators using proptest.
//!
//! Identifier pools are deliberately small so generated operation
//! sequences collide: the same books get borrowed, returned, resized,
//! and deleted repeatedly, which is where the catalog rules do their
//! work.

use librarium_core::{Catalog, CatalogResult, Genre};
use proptest::prelude::*;

/// ISBNs drawn by the operation generators.
pub const ISBN_POOL: [&str; 4] = ["978-A", "978-B", "978-C", "978-D"];

/// Member IDs drawn by the operation generators.
pub const MEMBER_ID_POOL: [&str; 3] = ["M001", "M002", "M003"];

/// Strategy for generating genres.
pub fn genre_strategy() -> impl Strategy<Value = Genre> {
    prop::sample::select(&Genre::ALL[..])
}

/// Strategy for generating ISBNs from the fixed pool.
pub fn isbn_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(&ISBN_POOL[..]).prop_map(str::to_owned)
}

/// Strategy for generating member IDs from the fixed pool.
pub fn member_id_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(&MEMBER_ID_POOL[..]).prop_map(str::to_owned)
}

/// Strategy for generating short title/author/name text.
pub fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z ]{0,19}").expect("valid regex")
}

/// Strategy for generating copy counts.
pub fn copy_count_strategy() -> impl Strategy<Value = u32> {
    0..6u32
}

/// One catalog operation, ready to apply.
#[derive(Debug, Clone)]
pub enum CatalogOperation {
    /// Add a book.
    AddBook {
        /// Target ISBN.
        isbn: String,
        /// Title text.
        title: String,
        /// Author text.
        author: String,
        /// Genre value.
        genre: Genre,
        /// Fleet size.
        total_copies: u32,
    },
    /// Register a member.
    AddMember {
        /// Target member ID.
        member_id: String,
        /// Member name.
        name: String,
    },
    /// Borrow a book.
    Borrow {
        /// Target ISBN.
        isbn: String,
        /// Borrowing member.
        member_id: String,
    },
    /// Return a book.
    Return {
        /// Target ISBN.
        isbn: String,
        /// Returning member.
        member_id: String,
    },
    /// Resize a book's fleet.
    Resize {
        /// Target ISBN.
        isbn: String,
        /// New fleet size.
        total_copies: u32,
    },
    /// Delete a book.
    DeleteBook {
        /// Target ISBN.
        isbn: String,
    },
    /// Delete a member.
    DeleteMember {
        /// Target member ID.
        member_id: String,
    },
}

/// Strategy for generating a single operation.
pub fn operation_strategy() -> impl Strategy<Value = CatalogOperation> {
    prop_oneof![
        3 => (
            isbn_strategy(),
            text_strategy(),
            text_strategy(),
            genre_strategy(),
            copy_count_strategy(),
        )
            .prop_map(|(isbn, title, author, genre, total_copies)| {
                CatalogOperation::AddBook {
                    isbn,
                    title,
                    author,
                    genre,
                    total_copies,
                }
            }),
        2 => (member_id_strategy(), text_strategy())
            .prop_map(|(member_id, name)| CatalogOperation::AddMember { member_id, name }),
        4 => (isbn_strategy(), member_id_strategy())
            .prop_map(|(isbn, member_id)| CatalogOperation::Borrow { isbn, member_id }),
        3 => (isbn_strategy(), member_id_strategy())
            .prop_map(|(isbn, member_id)| CatalogOperation::Return { isbn, member_id }),
        2 => (isbn_strategy(), copy_count_strategy())
            .prop_map(|(isbn, total_copies)| CatalogOperation::Resize { isbn, total_copies }),
        1 => isbn_strategy().prop_map(|isbn| CatalogOperation::DeleteBook { isbn }),
        1 => member_id_strategy()
            .prop_map(|member_id| CatalogOperation::DeleteMember { member_id }),
    ]
}

/// Strategy for generating an operation sequence.
pub fn operation_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<CatalogOperation>> {
    prop::collection::vec(operation_strategy(), 0..max_len)
}

/// Applies one operation to a catalog, returning the engine's verdict.
///
/// Rejections are part of normal operation here: the property suites
/// apply whatever the generator produced and assert the invariants
/// afterwards.
pub fn apply(catalog: &mut Catalog, op: &CatalogOperation) -> CatalogResult<()> {
    match op {
        CatalogOperation::AddBook {
            isbn,
            title,
            author,
            genre,
            total_copies,
        } => catalog.add_book(isbn, title, author, *genre, *total_copies),
        CatalogOperation::AddMember { member_id, name } => {
            let email = format!("{}@test.com", member_id.to_lowercase());
            catalog.add_member(member_id, name, &email)
        }
        CatalogOperation::Borrow { isbn, member_id } => catalog.borrow_book(isbn, member_id),
        CatalogOperation::Return { isbn, member_id } => catalog.return_book(isbn, member_id),
        CatalogOperation::Resize { isbn, total_copies } => catalog.update_book(
            isbn,
            librarium_core::BookPatch::new().total_copies(*total_copies),
        ),
        CatalogOperation::DeleteBook { isbn } => catalog.delete_book(isbn),
        CatalogOperation::DeleteMember { member_id } => catalog.delete_member(member_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_genres_are_in_the_closed_set(genre in genre_strategy()) {
            prop_assert!(Genre::ALL.contains(&genre));
        }

        #[test]
        fn generated_isbns_come_from_the_pool(isbn in isbn_strategy()) {
            prop_assert!(ISBN_POOL.contains(&isbn.as_str()));
        }
    }
}
