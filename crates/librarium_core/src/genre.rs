//! The closed genre enumeration.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Genre classification for catalog books.
///
/// The set is closed: a `Genre` value is valid by construction, and the
/// only way to obtain one from text is the case-insensitive [`FromStr`]
/// parse, which rejects anything outside the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    /// Fiction.
    Fiction,
    /// Non-fiction.
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    /// Science fiction.
    #[serde(rename = "Sci-Fi")]
    SciFi,
    /// Mystery.
    Mystery,
    /// Biography.
    Biography,
    /// Fantasy.
    Fantasy,
}

impl Genre {
    /// The complete set of genres, in declaration order.
    pub const ALL: [Genre; 6] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::SciFi,
        Genre::Mystery,
        Genre::Biography,
        Genre::Fantasy,
    ];

    /// Returns the canonical label for this genre.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::SciFi => "Sci-Fi",
            Genre::Mystery => "Mystery",
            Genre::Biography => "Biography",
            Genre::Fantasy => "Fantasy",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fiction" => Ok(Genre::Fiction),
            "non-fiction" => Ok(Genre::NonFiction),
            "sci-fi" => Ok(Genre::SciFi),
            "mystery" => Ok(Genre::Mystery),
            "biography" => Ok(Genre::Biography),
            "fantasy" => Ok(Genre::Fantasy),
            _ => Err(CatalogError::unknown_genre(s)),
        }
    }
}
