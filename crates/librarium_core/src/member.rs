//! Member records and partial updates.

use serde::Serialize;

/// Maximum number of books a member may hold simultaneously.
pub const MAX_BORROWED: usize = 3;

/// A registered library member.
///
/// The loan list is ordered by borrow time, holds each ISBN at most once,
/// and never exceeds [`MAX_BORROWED`] entries. It is only mutated through
/// catalog borrow/return operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub(crate) member_id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) borrowed_books: Vec<String>,
}

impl Member {
    /// Creates a member with an empty loan list.
    pub(crate) fn new(
        member_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            member_id: member_id.into(),
            name: name.into(),
            email: email.into(),
            borrowed_books: Vec::new(),
        }
    }

    /// Returns the member's unique identifier.
    #[must_use]
    pub fn member_id(&self) -> &str {
        &self.member_id
    }

    /// Returns the member's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the member's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the ISBNs currently held, in borrow order.
    #[must_use]
    pub fn borrowed_books(&self) -> &[String] {
        &self.borrowed_books
    }

    /// Returns the number of books currently held.
    #[must_use]
    pub fn loan_count(&self) -> usize {
        self.borrowed_books.len()
    }

    /// Returns `true` if the member holds any books.
    #[must_use]
    pub fn has_loans(&self) -> bool {
        !self.borrowed_books.is_empty()
    }

    /// Returns `true` if the member holds a copy of this ISBN.
    #[must_use]
    pub fn holds(&self, isbn: &str) -> bool {
        self.borrowed_books.iter().any(|held| held == isbn)
    }

    /// Returns `true` if the member is at the borrowing limit.
    #[must_use]
    pub fn at_limit(&self) -> bool {
        self.borrowed_books.len() >= MAX_BORROWED
    }

    /// Appends an ISBN to the loan list.
    ///
    /// Caller must have checked the limit and duplicate-hold rules.
    pub(crate) fn record_loan(&mut self, isbn: &str) {
        self.borrowed_books.push(isbn.to_owned());
    }

    /// Removes an ISBN from the loan list.
    ///
    /// Caller must have checked that the ISBN is held.
    pub(crate) fn record_return(&mut self, isbn: &str) {
        self.borrowed_books.retain(|held| held != isbn);
    }
}

/// A partial update to a member record.
///
/// Absent fields mean "no change".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberPatch {
    /// New name, if any.
    pub name: Option<String>,
    /// New email address, if any.
    pub email: Option<String>,
}

impl MemberPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a new email address.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_member_holds_nothing() {
        let member = Member::new("M001", "Alice", "alice@example.com");
        assert_eq!(member.loan_count(), 0);
        assert!(!member.has_loans());
        assert!(!member.at_limit());
    }

    #[test]
    fn loan_list_tracks_holds_in_order() {
        let mut member = Member::new("M001", "Alice", "alice@example.com");
        member.record_loan("978-A");
        member.record_loan("978-B");

        assert!(member.holds("978-A"));
        assert!(!member.holds("978-C"));
        assert_eq!(member.borrowed_books(), ["978-A", "978-B"]);

        member.record_return("978-A");
        assert_eq!(member.borrowed_books(), ["978-B"]);
    }

    #[test]
    fn limit_is_three() {
        let mut member = Member::new("M001", "Alice", "alice@example.com");
        for isbn in ["978-A", "978-B", "978-C"] {
            member.record_loan(isbn);
        }
        assert!(member.at_limit());
    }

    #[test]
    fn patch_builder_collects_fields() {
        let patch = MemberPatch::new().email("new@example.com");
        assert!(patch.name.is_none());
        assert_eq!(patch.email.as_deref(), Some("new@example.com"));
    }
}
