//! Output formatters for catalog listings.

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use librarium_core::{BookRecord, Member};

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Formats book records in the requested format.
pub fn books(records: &[BookRecord], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => Ok(books_table(records)),
        OutputFormat::Json => serde_json::to_string_pretty(records),
    }
}

/// Formats members in the requested format.
pub fn members(members: &[&Member], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => Ok(members_table(members)),
        OutputFormat::Json => serde_json::to_string_pretty(members),
    }
}

fn books_table(records: &[BookRecord]) -> String {
    if records.is_empty() {
        return "No books".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ISBN",
        "Title",
        "Author",
        "Genre",
        "Available",
        "On loan",
    ]);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.isbn),
            Cell::new(record.book.title()),
            Cell::new(record.book.author()),
            Cell::new(record.book.genre()),
            Cell::new(record.book.available_copies()),
            Cell::new(record.book.loaned_copies()),
        ]);
    }
    table.to_string()
}

fn members_table(members: &[&Member]) -> String {
    if members.is_empty() {
        return "No members".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Email", "Borrowed"]);
    for member in members {
        table.add_row(vec![
            Cell::new(member.member_id()),
            Cell::new(member.name()),
            Cell::new(member.email()),
            Cell::new(member.borrowed_books().join(", ")),
        ]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use librarium_core::{Catalog, Genre, SearchField};

    fn sample_records() -> Vec<BookRecord> {
        let mut catalog = Catalog::new();
        catalog
            .add_book("978-1", "Python Fun", "A. Coder", Genre::NonFiction, 2)
            .unwrap();
        catalog.search_books("", SearchField::Title)
    }

    #[test]
    fn table_lists_every_book() {
        let rendered = books(&sample_records(), OutputFormat::Table).unwrap();
        assert!(rendered.contains("978-1"));
        assert!(rendered.contains("Python Fun"));
    }

    #[test]
    fn json_merges_isbn_into_the_record() {
        let rendered = books(&sample_records(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed[0]["isbn"], "978-1");
        assert_eq!(parsed[0]["title"], "Python Fun");
        assert_eq!(parsed[0]["genre"], "Non-Fiction");
        assert_eq!(parsed[0]["available_copies"], 2);
    }

    #[test]
    fn empty_listings() {
        assert_eq!(books(&[], OutputFormat::Table).unwrap(), "No books");
        assert_eq!(members(&[], OutputFormat::Table).unwrap(), "No members");
    }
}
