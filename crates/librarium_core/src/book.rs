//! Book records and partial updates.

use crate::genre::Genre;
use serde::Serialize;

/// A single title tracked by the catalog.
///
/// Copy accounting is split into two explicit counts: `available_copies`
/// sit on the shelf, `loaned_copies` are lent out. Their sum is the fleet
/// size. Tracking the outstanding count directly means administrative
/// updates can never conflate it with the shelf count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) genre: Genre,
    pub(crate) available_copies: u32,
    pub(crate) loaned_copies: u32,
}

impl Book {
    /// Creates a record with all copies on the shelf and none on loan.
    pub(crate) fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: Genre,
        total_copies: u32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre,
            available_copies: total_copies,
            loaned_copies: 0,
        }
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the author.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the genre.
    #[must_use]
    pub fn genre(&self) -> Genre {
        self.genre
    }

    /// Returns the number of copies currently on the shelf.
    #[must_use]
    pub fn available_copies(&self) -> u32 {
        self.available_copies
    }

    /// Returns the number of copies currently lent out.
    #[must_use]
    pub fn loaned_copies(&self) -> u32 {
        self.loaned_copies
    }

    /// Returns the fleet size: shelf copies plus lent-out copies.
    #[must_use]
    pub fn total_copies(&self) -> u32 {
        self.available_copies + self.loaned_copies
    }

    /// Returns `true` if any copies are lent out.
    #[must_use]
    pub fn has_loans(&self) -> bool {
        self.loaned_copies > 0
    }
}

/// A partial update to a book record.
///
/// Absent fields mean "no change". A supplied `total_copies` is the new
/// fleet size; the catalog derives the shelf count from it and the
/// outstanding-loan count.
///
/// # Example
///
/// ```rust,ignore
/// let patch = BookPatch::new().title("Revised Title").total_copies(5);
/// catalog.update_book("978-A", patch)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    /// New title, if any.
    pub title: Option<String>,
    /// New author, if any.
    pub author: Option<String>,
    /// New genre, if any.
    pub genre: Option<Genre>,
    /// New fleet size, if any.
    pub total_copies: Option<u32>,
}

impl BookPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new author.
    #[must_use]
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets a new genre.
    #[must_use]
    pub fn genre(mut self, genre: Genre) -> Self {
        self.genre = Some(genre);
        self
    }

    /// Sets a new fleet size.
    #[must_use]
    pub fn total_copies(mut self, total_copies: u32) -> Self {
        self.total_copies = Some(total_copies);
        self
    }

    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.genre.is_none()
            && self.total_copies.is_none()
    }
}

/// A search or listing result row: a book merged with its ISBN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookRecord {
    /// The book's unique identifier.
    pub isbn: String,
    /// Snapshot of the book's fields at the time of the query.
    #[serde(flatten)]
    pub book: Book,
}

impl BookRecord {
    pub(crate) fn new(isbn: &str, book: &Book) -> Self {
        Self {
            isbn: isbn.to_owned(),
            book: book.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_book_has_no_loans() {
        let book = Book::new("The Test Book", "Test Author", Genre::Fiction, 2);
        assert_eq!(book.available_copies(), 2);
        assert_eq!(book.loaned_copies(), 0);
        assert_eq!(book.total_copies(), 2);
        assert!(!book.has_loans());
    }

    #[test]
    fn patch_builder_collects_fields() {
        let patch = BookPatch::new()
            .title("New Title")
            .genre(Genre::Mystery)
            .total_copies(7);

        assert_eq!(patch.title.as_deref(), Some("New Title"));
        assert!(patch.author.is_none());
        assert_eq!(patch.genre, Some(Genre::Mystery));
        assert_eq!(patch.total_copies, Some(7));
        assert!(!patch.is_empty());
    }

    #[test]
    fn empty_patch() {
        assert!(BookPatch::new().is_empty());
    }
}
