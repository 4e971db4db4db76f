//! The catalog rule engine.

use crate::book::{Book, BookPatch, BookRecord};
use crate::error::{CatalogError, CatalogResult};
use crate::genre::Genre;
use crate::member::{Member, MemberPatch};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Which book field a search matches against.
///
/// Unrecognized text passed to [`SearchField::parse_lossy`] falls back to
/// the title field rather than failing the search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchField {
    /// Match against the title.
    #[default]
    Title,
    /// Match against the author.
    Author,
}

impl SearchField {
    /// Parses a field name, defaulting to [`SearchField::Title`].
    #[must_use]
    pub fn parse_lossy(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "author" => SearchField::Author,
            "title" => SearchField::Title,
            other => {
                debug!(field = other, "unknown search field, defaulting to title");
                SearchField::Title
            }
        }
    }

    /// Returns the field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The in-memory catalog: books, members, and loan state.
///
/// The catalog exclusively owns both collections and is the only mutation
/// path, so the business rules hold at all times:
///
/// - ISBNs and member IDs are unique keys.
/// - A book's shelf count never exceeds its fleet size.
/// - A member holds at most [`MAX_BORROWED`](crate::MAX_BORROWED) books,
///   each ISBN at most once.
/// - Books with copies on loan and members holding books cannot be
///   deleted.
///
/// Every operation validates before mutating: a failed call returns a
/// [`CatalogError`] and leaves the catalog exactly as it was. Construct
/// one instance per run or test; there is no process-wide state.
///
/// # Example
///
/// ```rust,ignore
/// use librarium_core::{BookPatch, Catalog, Genre};
///
/// let mut catalog = Catalog::new();
/// catalog.add_book("978-A", "The Test Book", "Test Author", Genre::Fiction, 2)?;
/// catalog.add_member("M001", "Alice", "alice@example.com")?;
/// catalog.borrow_book("978-A", "M001")?;
/// ```
#[derive(Debug, Default)]
pub struct Catalog {
    /// Books keyed by ISBN.
    books: BTreeMap<String, Book>,
    /// Members keyed by member ID.
    members: BTreeMap<String, Member>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a book with all copies on the shelf.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateIsbn`] if a book with this ISBN is
    /// already present. Genre validity and copy-count non-negativity are
    /// enforced by the argument types at the boundary.
    pub fn add_book(
        &mut self,
        isbn: &str,
        title: &str,
        author: &str,
        genre: Genre,
        total_copies: u32,
    ) -> CatalogResult<()> {
        if self.books.contains_key(isbn) {
            debug!(%isbn, "add_book rejected: duplicate ISBN");
            return Err(CatalogError::duplicate_isbn(isbn));
        }

        self.books
            .insert(isbn.to_owned(), Book::new(title, author, genre, total_copies));
        debug!(%isbn, %title, %genre, total_copies, "book added");
        Ok(())
    }

    /// Registers a member with an empty loan list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateMemberId`] if the ID is taken.
    pub fn add_member(&mut self, member_id: &str, name: &str, email: &str) -> CatalogResult<()> {
        if self.members.contains_key(member_id) {
            debug!(%member_id, "add_member rejected: duplicate ID");
            return Err(CatalogError::duplicate_member_id(member_id));
        }

        self.members
            .insert(member_id.to_owned(), Member::new(member_id, name, email));
        debug!(%member_id, %name, "member added");
        Ok(())
    }

    /// Searches books by case-insensitive substring match on one field.
    ///
    /// Returns a fresh snapshot per call, in ISBN order. The empty query
    /// matches every book.
    #[must_use]
    pub fn search_books(&self, query: &str, by: SearchField) -> Vec<BookRecord> {
        let needle = query.to_lowercase();
        self.books
            .iter()
            .filter(|(_, book)| {
                let haystack = match by {
                    SearchField::Title => book.title(),
                    SearchField::Author => book.author(),
                };
                haystack.to_lowercase().contains(&needle)
            })
            .map(|(isbn, book)| BookRecord::new(isbn, book))
            .collect()
    }

    /// Applies a partial update to a book.
    ///
    /// A supplied `total_copies` is the new fleet size: the shelf count
    /// becomes `total_copies − loaned_copies`, and the outstanding-loan
    /// count is untouched, so repeated updates can never discard it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BookNotFound`] for an unknown ISBN, or
    /// [`CatalogError::CopiesBelowLoans`] if the requested fleet size is
    /// smaller than the outstanding-loan count. On error nothing changes.
    pub fn update_book(&mut self, isbn: &str, patch: BookPatch) -> CatalogResult<()> {
        let book = self
            .books
            .get_mut(isbn)
            .ok_or_else(|| CatalogError::book_not_found(isbn))?;

        // Validate everything before touching the record.
        if let Some(requested) = patch.total_copies {
            if requested < book.loaned_copies {
                debug!(%isbn, requested, on_loan = book.loaned_copies,
                    "update_book rejected: below outstanding loans");
                return Err(CatalogError::CopiesBelowLoans {
                    isbn: isbn.to_owned(),
                    requested,
                    on_loan: book.loaned_copies,
                });
            }
        }

        if let Some(title) = patch.title {
            book.title = title;
        }
        if let Some(author) = patch.author {
            book.author = author;
        }
        if let Some(genre) = patch.genre {
            book.genre = genre;
        }
        if let Some(requested) = patch.total_copies {
            book.available_copies = requested - book.loaned_copies;
        }

        debug!(%isbn, "book updated");
        Ok(())
    }

    /// Applies a partial update to a member.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MemberNotFound`] for an unknown ID.
    pub fn update_member(&mut self, member_id: &str, patch: MemberPatch) -> CatalogResult<()> {
        let member = self
            .members
            .get_mut(member_id)
            .ok_or_else(|| CatalogError::member_not_found(member_id))?;

        if let Some(name) = patch.name {
            member.name = name;
        }
        if let Some(email) = patch.email {
            member.email = email;
        }

        debug!(%member_id, "member updated");
        Ok(())
    }

    /// Removes a book.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BookNotFound`] for an unknown ISBN, or
    /// [`CatalogError::BookHasLoans`] while any copies are lent out.
    pub fn delete_book(&mut self, isbn: &str) -> CatalogResult<()> {
        let book = self
            .books
            .get(isbn)
            .ok_or_else(|| CatalogError::book_not_found(isbn))?;

        if book.has_loans() {
            debug!(%isbn, on_loan = book.loaned_copies, "delete_book rejected: loans outstanding");
            return Err(CatalogError::BookHasLoans {
                isbn: isbn.to_owned(),
                on_loan: book.loaned_copies,
            });
        }

        self.books.remove(isbn);
        debug!(%isbn, "book deleted");
        Ok(())
    }

    /// Removes a member.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MemberNotFound`] for an unknown ID, or
    /// [`CatalogError::MemberHasLoans`] while the loan list is non-empty.
    pub fn delete_member(&mut self, member_id: &str) -> CatalogResult<()> {
        let member = self
            .members
            .get(member_id)
            .ok_or_else(|| CatalogError::member_not_found(member_id))?;

        if member.has_loans() {
            debug!(%member_id, count = member.loan_count(),
                "delete_member rejected: loans outstanding");
            return Err(CatalogError::MemberHasLoans {
                member_id: member_id.to_owned(),
                count: member.loan_count(),
            });
        }

        self.members.remove(member_id);
        debug!(%member_id, "member deleted");
        Ok(())
    }

    /// Lends one copy of a book to a member.
    ///
    /// Checks run in a fixed order so the reported reason is stable when
    /// several rules would reject the call: unknown book, unknown member,
    /// availability, borrowing limit, duplicate hold.
    ///
    /// # Errors
    ///
    /// Returns the corresponding [`CatalogError`] variant for each rule
    /// above. On error nothing changes.
    pub fn borrow_book(&mut self, isbn: &str, member_id: &str) -> CatalogResult<()> {
        let book = self
            .books
            .get_mut(isbn)
            .ok_or_else(|| CatalogError::book_not_found(isbn))?;
        let member = self
            .members
            .get_mut(member_id)
            .ok_or_else(|| CatalogError::member_not_found(member_id))?;

        if book.available_copies == 0 {
            debug!(%isbn, %member_id, "borrow rejected: nothing on the shelf");
            return Err(CatalogError::no_copies_available(isbn));
        }
        if member.at_limit() {
            debug!(%isbn, %member_id, "borrow rejected: member at limit");
            return Err(CatalogError::borrow_limit_reached(member_id));
        }
        if member.holds(isbn) {
            debug!(%isbn, %member_id, "borrow rejected: already held");
            return Err(CatalogError::AlreadyBorrowed {
                isbn: isbn.to_owned(),
                member_id: member_id.to_owned(),
            });
        }

        book.available_copies -= 1;
        book.loaned_copies += 1;
        member.record_loan(isbn);
        debug!(%isbn, %member_id, "book borrowed");
        Ok(())
    }

    /// Takes back a copy of a book from a member.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BookNotFound`] or
    /// [`CatalogError::MemberNotFound`] for unknown identifiers, or
    /// [`CatalogError::NotBorrowed`] if the member does not hold the ISBN.
    pub fn return_book(&mut self, isbn: &str, member_id: &str) -> CatalogResult<()> {
        let book = self
            .books
            .get_mut(isbn)
            .ok_or_else(|| CatalogError::book_not_found(isbn))?;
        let member = self
            .members
            .get_mut(member_id)
            .ok_or_else(|| CatalogError::member_not_found(member_id))?;

        if !member.holds(isbn) {
            debug!(%isbn, %member_id, "return rejected: not held by member");
            return Err(CatalogError::NotBorrowed {
                isbn: isbn.to_owned(),
                member_id: member_id.to_owned(),
            });
        }

        book.available_copies += 1;
        book.loaned_copies -= 1;
        member.record_return(isbn);
        debug!(%isbn, %member_id, "book returned");
        Ok(())
    }

    /// Gets a book by ISBN.
    #[must_use]
    pub fn book(&self, isbn: &str) -> Option<&Book> {
        self.books.get(isbn)
    }

    /// Gets a member by ID.
    #[must_use]
    pub fn member(&self, member_id: &str) -> Option<&Member> {
        self.members.get(member_id)
    }

    /// Iterates over all books in ISBN order.
    pub fn books(&self) -> impl Iterator<Item = (&str, &Book)> {
        self.books.iter().map(|(isbn, book)| (isbn.as_str(), book))
    }

    /// Iterates over all members in ID order.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    /// Returns the number of books in the catalog.
    #[must_use]
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Returns the number of registered members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with_book(isbn: &str, copies: u32) -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .add_book(isbn, "The Test Book", "Test Author", Genre::Fiction, copies)
            .unwrap();
        catalog
    }

    #[test]
    fn add_book_rejects_duplicate_isbn_and_keeps_original() {
        let mut catalog = catalog_with_book("X1", 1);

        let err = catalog
            .add_book("X1", "Duplicate", "Someone Else", Genre::Mystery, 5)
            .unwrap_err();
        assert_eq!(err, CatalogError::duplicate_isbn("X1"));

        // Original record untouched.
        let book = catalog.book("X1").unwrap();
        assert_eq!(book.title(), "The Test Book");
        assert_eq!(book.genre(), Genre::Fiction);
        assert_eq!(book.total_copies(), 1);
    }

    #[test]
    fn add_book_with_zero_copies_is_valid() {
        let catalog = catalog_with_book("X1", 0);
        assert_eq!(catalog.book("X1").unwrap().available_copies(), 0);
    }

    #[test]
    fn add_member_rejects_duplicate_id() {
        let mut catalog = Catalog::new();
        catalog
            .add_member("M001", "Alice", "alice@example.com")
            .unwrap();

        let err = catalog
            .add_member("M001", "Impostor", "other@example.com")
            .unwrap_err();
        assert_eq!(err, CatalogError::duplicate_member_id("M001"));
        assert_eq!(catalog.member("M001").unwrap().name(), "Alice");
    }

    #[test]
    fn search_matches_substring_case_insensitively() {
        let mut catalog = Catalog::new();
        catalog
            .add_book("978-1", "Python Fun", "A. Coder", Genre::NonFiction, 1)
            .unwrap();
        catalog
            .add_book("978-2", "Serious Rust", "B. Coder", Genre::NonFiction, 1)
            .unwrap();

        let hits = catalog.search_books("fun", SearchField::Title);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].isbn, "978-1");
        assert_eq!(hits[0].book.title(), "Python Fun");
    }

    #[test]
    fn search_by_author() {
        let mut catalog = Catalog::new();
        catalog
            .add_book("978-1", "One", "Ursula Vernon", Genre::Fantasy, 1)
            .unwrap();
        catalog
            .add_book("978-2", "Two", "Somebody", Genre::Fantasy, 1)
            .unwrap();

        let hits = catalog.search_books("vernon", SearchField::Author);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].isbn, "978-1");
    }

    #[test]
    fn empty_query_matches_every_book() {
        let mut catalog = Catalog::new();
        catalog
            .add_book("978-1", "One", "A", Genre::Fiction, 1)
            .unwrap();
        catalog
            .add_book("978-2", "Two", "B", Genre::Mystery, 1)
            .unwrap();

        assert_eq!(catalog.search_books("", SearchField::Title).len(), 2);
    }

    #[test]
    fn search_field_parse_lossy_defaults_to_title() {
        assert_eq!(SearchField::parse_lossy("author"), SearchField::Author);
        assert_eq!(SearchField::parse_lossy("Title"), SearchField::Title);
        assert_eq!(SearchField::parse_lossy("isbn"), SearchField::Title);
    }

    #[test]
    fn update_book_applies_supplied_fields_only() {
        let mut catalog = catalog_with_book("X1", 2);

        catalog
            .update_book("X1", BookPatch::new().title("Renamed").genre(Genre::SciFi))
            .unwrap();

        let book = catalog.book("X1").unwrap();
        assert_eq!(book.title(), "Renamed");
        assert_eq!(book.author(), "Test Author");
        assert_eq!(book.genre(), Genre::SciFi);
        assert_eq!(book.total_copies(), 2);
    }

    #[test]
    fn update_book_unknown_isbn() {
        let mut catalog = Catalog::new();
        let err = catalog
            .update_book("missing", BookPatch::new().title("x"))
            .unwrap_err();
        assert_eq!(err, CatalogError::book_not_found("missing"));
    }

    #[test]
    fn update_book_rejects_total_below_outstanding() {
        let mut catalog = catalog_with_book("X1", 1);
        catalog
            .add_member("M001", "Alice", "alice@example.com")
            .unwrap();
        catalog.borrow_book("X1", "M001").unwrap();

        let err = catalog
            .update_book("X1", BookPatch::new().total_copies(0))
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::CopiesBelowLoans {
                isbn: "X1".into(),
                requested: 0,
                on_loan: 1,
            }
        );

        // Nothing changed.
        let book = catalog.book("X1").unwrap();
        assert_eq!(book.available_copies(), 0);
        assert_eq!(book.loaned_copies(), 1);
    }

    #[test]
    fn update_book_preserves_outstanding_loans() {
        let mut catalog = catalog_with_book("X1", 2);
        catalog
            .add_member("M001", "Alice", "alice@example.com")
            .unwrap();
        catalog.borrow_book("X1", "M001").unwrap();

        // Grow the fleet to 5: one copy stays out, four on the shelf.
        catalog
            .update_book("X1", BookPatch::new().total_copies(5))
            .unwrap();
        let book = catalog.book("X1").unwrap();
        assert_eq!(book.available_copies(), 4);
        assert_eq!(book.loaned_copies(), 1);

        // A second update still sees the loan.
        catalog
            .update_book("X1", BookPatch::new().total_copies(1))
            .unwrap();
        let book = catalog.book("X1").unwrap();
        assert_eq!(book.available_copies(), 0);
        assert_eq!(book.loaned_copies(), 1);

        // Returning the copy restores the shelf.
        catalog.return_book("X1", "M001").unwrap();
        assert_eq!(catalog.book("X1").unwrap().available_copies(), 1);
    }

    #[test]
    fn update_member_fails_only_on_unknown_id() {
        let mut catalog = Catalog::new();
        catalog
            .add_member("M001", "Alice", "alice@example.com")
            .unwrap();

        catalog
            .update_member("M001", MemberPatch::new().email("new@example.com"))
            .unwrap();
        let member = catalog.member("M001").unwrap();
        assert_eq!(member.name(), "Alice");
        assert_eq!(member.email(), "new@example.com");

        let err = catalog
            .update_member("M404", MemberPatch::new().name("Nobody"))
            .unwrap_err();
        assert_eq!(err, CatalogError::member_not_found("M404"));
    }

    #[test]
    fn delete_book_guarded_by_outstanding_loans() {
        let mut catalog = catalog_with_book("X1", 1);
        catalog
            .add_member("M001", "Alice", "alice@example.com")
            .unwrap();
        catalog.borrow_book("X1", "M001").unwrap();

        let err = catalog.delete_book("X1").unwrap_err();
        assert_eq!(
            err,
            CatalogError::BookHasLoans {
                isbn: "X1".into(),
                on_loan: 1,
            }
        );
        assert!(catalog.book("X1").is_some());

        catalog.return_book("X1", "M001").unwrap();
        catalog.delete_book("X1").unwrap();
        assert!(catalog.book("X1").is_none());
    }

    #[test]
    fn delete_member_guarded_by_held_books() {
        let mut catalog = catalog_with_book("X1", 1);
        catalog
            .add_member("M001", "Alice", "alice@example.com")
            .unwrap();
        catalog.borrow_book("X1", "M001").unwrap();

        let err = catalog.delete_member("M001").unwrap_err();
        assert_eq!(
            err,
            CatalogError::MemberHasLoans {
                member_id: "M001".into(),
                count: 1,
            }
        );

        catalog.return_book("X1", "M001").unwrap();
        catalog.delete_member("M001").unwrap();
        assert!(catalog.member("M001").is_none());
    }

    #[test]
    fn borrow_moves_one_copy_to_the_member() {
        let mut catalog = catalog_with_book("X1", 2);
        catalog
            .add_member("M001", "Alice", "alice@example.com")
            .unwrap();

        catalog.borrow_book("X1", "M001").unwrap();

        let book = catalog.book("X1").unwrap();
        assert_eq!(book.available_copies(), 1);
        assert_eq!(book.loaned_copies(), 1);
        assert!(catalog.member("M001").unwrap().holds("X1"));
    }

    #[test]
    fn borrow_fails_when_nothing_on_the_shelf() {
        let mut catalog = catalog_with_book("X1", 0);
        catalog
            .add_member("M001", "Alice", "alice@example.com")
            .unwrap();

        let err = catalog.borrow_book("X1", "M001").unwrap_err();
        assert_eq!(err, CatalogError::no_copies_available("X1"));

        // No state change.
        assert_eq!(catalog.book("X1").unwrap().loaned_copies(), 0);
        assert!(!catalog.member("M001").unwrap().has_loans());
    }

    #[test]
    fn fourth_borrow_hits_the_limit() {
        let mut catalog = Catalog::new();
        for isbn in ["978-C", "978-D", "978-E", "978-F"] {
            catalog
                .add_book(isbn, "Limit Test", "L Author", Genre::Mystery, 1)
                .unwrap();
        }
        catalog
            .add_member("M001", "Alice", "alice@example.com")
            .unwrap();

        for isbn in ["978-C", "978-D", "978-E"] {
            catalog.borrow_book(isbn, "M001").unwrap();
        }

        let err = catalog.borrow_book("978-F", "M001").unwrap_err();
        assert_eq!(err, CatalogError::borrow_limit_reached("M001"));
        assert_eq!(catalog.member("M001").unwrap().loan_count(), 3);
        assert_eq!(catalog.book("978-F").unwrap().available_copies(), 1);
    }

    #[test]
    fn borrowing_the_same_isbn_twice_fails() {
        let mut catalog = catalog_with_book("X1", 2);
        catalog
            .add_member("M001", "Alice", "alice@example.com")
            .unwrap();

        catalog.borrow_book("X1", "M001").unwrap();
        let err = catalog.borrow_book("X1", "M001").unwrap_err();
        assert_eq!(
            err,
            CatalogError::AlreadyBorrowed {
                isbn: "X1".into(),
                member_id: "M001".into(),
            }
        );
        assert_eq!(catalog.book("X1").unwrap().available_copies(), 1);
    }

    #[test]
    fn borrow_reports_unknown_book_before_unknown_member() {
        let mut catalog = Catalog::new();
        let err = catalog.borrow_book("missing", "M404").unwrap_err();
        assert_eq!(err, CatalogError::book_not_found("missing"));
    }

    #[test]
    fn return_requires_the_member_to_hold_the_book() {
        let mut catalog = catalog_with_book("X1", 1);
        catalog
            .add_member("M001", "Alice", "alice@example.com")
            .unwrap();

        let err = catalog.return_book("X1", "M001").unwrap_err();
        assert_eq!(
            err,
            CatalogError::NotBorrowed {
                isbn: "X1".into(),
                member_id: "M001".into(),
            }
        );
    }

    #[test]
    fn borrow_then_return_round_trips() {
        let mut catalog = catalog_with_book("X1", 2);
        catalog
            .add_member("M001", "Alice", "alice@example.com")
            .unwrap();

        let before_book = catalog.book("X1").unwrap().clone();
        let before_member = catalog.member("M001").unwrap().clone();

        catalog.borrow_book("X1", "M001").unwrap();
        catalog.return_book("X1", "M001").unwrap();

        assert_eq!(catalog.book("X1").unwrap(), &before_book);
        assert_eq!(catalog.member("M001").unwrap(), &before_member);
    }

    #[test]
    fn listing_is_in_key_order() {
        let mut catalog = Catalog::new();
        catalog
            .add_book("978-B", "Second", "A", Genre::Fiction, 1)
            .unwrap();
        catalog
            .add_book("978-A", "First", "A", Genre::Fiction, 1)
            .unwrap();

        let isbns: Vec<&str> = catalog.books().map(|(isbn, _)| isbn).collect();
        assert_eq!(isbns, ["978-A", "978-B"]);
        assert_eq!(catalog.book_count(), 2);
    }
}
