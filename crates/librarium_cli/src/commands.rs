//! Shell command parsing.
//!
//! Lines are tokenized with double-quote support so titles, names, and
//! queries may contain spaces, then mapped onto a [`Command`]. All
//! text-to-type coercion happens here: genres and copy counts are parsed
//! before the core ever sees them, and a parse failure is reported as a
//! usage message rather than reaching the catalog.

use crate::formatter::OutputFormat;
use librarium_core::{BookPatch, Genre, MemberPatch, SearchField};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a book to the catalog.
    AddBook {
        /// The book's unique identifier.
        isbn: String,
        /// Title text.
        title: String,
        /// Author text.
        author: String,
        /// Parsed genre.
        genre: Genre,
        /// Fleet size.
        total_copies: u32,
    },
    /// Register a member.
    AddMember {
        /// The member's unique identifier.
        member_id: String,
        /// Member name.
        name: String,
        /// Member email address.
        email: String,
    },
    /// Apply a partial update to a book.
    UpdateBook {
        /// The book to update.
        isbn: String,
        /// Fields to change.
        patch: BookPatch,
    },
    /// Apply a partial update to a member.
    UpdateMember {
        /// The member to update.
        member_id: String,
        /// Fields to change.
        patch: MemberPatch,
    },
    /// Remove a book.
    DeleteBook {
        /// The book to remove.
        isbn: String,
    },
    /// Remove a member.
    DeleteMember {
        /// The member to remove.
        member_id: String,
    },
    /// Lend a book to a member.
    Borrow {
        /// The book to lend.
        isbn: String,
        /// The borrowing member.
        member_id: String,
    },
    /// Take a book back from a member.
    Return {
        /// The book coming back.
        isbn: String,
        /// The returning member.
        member_id: String,
    },
    /// Search books by title or author substring.
    Search {
        /// Case-insensitive query text.
        query: String,
        /// Field to match against.
        by: SearchField,
    },
    /// List all books.
    Books,
    /// List all members.
    Members,
    /// Show counts and both listings.
    Status,
    /// Show or set the output format.
    Format(Option<OutputFormat>),
    /// Show the command list.
    Help,
    /// Leave the shell.
    Quit,
}

/// Splits a line into tokens, honoring double quotes.
pub fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut pending = false;
    let mut in_quotes = false;

    for ch in line.chars() {
        if in_quotes {
            if ch == '"' {
                in_quotes = false;
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
            pending = true;
        } else if ch.is_whitespace() {
            if pending {
                tokens.push(std::mem::take(&mut current));
                pending = false;
            }
        } else {
            current.push(ch);
            pending = true;
        }
    }

    if in_quotes {
        return Err("unterminated quote".to_string());
    }
    if pending {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Parses one shell line into a [`Command`].
///
/// Returns a usage or diagnostic message for anything that cannot be
/// parsed. The caller is expected to skip empty lines.
pub fn parse(line: &str) -> Result<Command, String> {
    let tokens = tokenize(line)?;
    let Some((name, args)) = tokens.split_first() else {
        return Err("empty command".to_string());
    };

    match name.as_str() {
        "add-book" => {
            let [isbn, title, author, genre, copies] = expect_args(args, ADD_BOOK_USAGE)?;
            Ok(Command::AddBook {
                isbn: isbn.clone(),
                title: title.clone(),
                author: author.clone(),
                genre: parse_genre(genre)?,
                total_copies: parse_copies(copies)?,
            })
        }
        "add-member" => {
            let [member_id, name, email] =
                expect_args(args, "usage: add-member <id> <name> <email>")?;
            Ok(Command::AddMember {
                member_id: member_id.clone(),
                name: name.clone(),
                email: email.clone(),
            })
        }
        "update-book" => {
            let Some((isbn, fields)) = args.split_first() else {
                return Err(UPDATE_BOOK_USAGE.to_string());
            };
            Ok(Command::UpdateBook {
                isbn: isbn.clone(),
                patch: parse_book_patch(fields)?,
            })
        }
        "update-member" => {
            let Some((member_id, fields)) = args.split_first() else {
                return Err(UPDATE_MEMBER_USAGE.to_string());
            };
            Ok(Command::UpdateMember {
                member_id: member_id.clone(),
                patch: parse_member_patch(fields)?,
            })
        }
        "delete-book" => {
            let [isbn] = expect_args(args, "usage: delete-book <isbn>")?;
            Ok(Command::DeleteBook { isbn: isbn.clone() })
        }
        "delete-member" => {
            let [member_id] = expect_args(args, "usage: delete-member <id>")?;
            Ok(Command::DeleteMember {
                member_id: member_id.clone(),
            })
        }
        "borrow" => {
            let [isbn, member_id] = expect_args(args, "usage: borrow <isbn> <member-id>")?;
            Ok(Command::Borrow {
                isbn: isbn.clone(),
                member_id: member_id.clone(),
            })
        }
        "return" => {
            let [isbn, member_id] = expect_args(args, "usage: return <isbn> <member-id>")?;
            Ok(Command::Return {
                isbn: isbn.clone(),
                member_id: member_id.clone(),
            })
        }
        "search" => {
            let Some((query, rest)) = args.split_first() else {
                return Err("usage: search <query> [title|author]".to_string());
            };
            let by = rest
                .first()
                .map(|field| SearchField::parse_lossy(field))
                .unwrap_or_default();
            Ok(Command::Search {
                query: query.clone(),
                by,
            })
        }
        "books" => Ok(Command::Books),
        "members" => Ok(Command::Members),
        "status" => Ok(Command::Status),
        "format" => match args.first().map(String::as_str) {
            None => Ok(Command::Format(None)),
            Some("table") => Ok(Command::Format(Some(OutputFormat::Table))),
            Some("json") => Ok(Command::Format(Some(OutputFormat::Json))),
            Some(other) => Err(format!("unknown format '{other}'; use: table, json")),
        },
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!(
            "unknown command '{other}'; type 'help' for the command list"
        )),
    }
}

const ADD_BOOK_USAGE: &str = "usage: add-book <isbn> <title> <author> <genre> <copies>";
const UPDATE_BOOK_USAGE: &str =
    "usage: update-book <isbn> [title=..] [author=..] [genre=..] [copies=N]";
const UPDATE_MEMBER_USAGE: &str = "usage: update-member <id> [name=..] [email=..]";

/// The help text shown by the `help` command.
pub fn help_text() -> String {
    let genres: Vec<&str> = Genre::ALL.iter().map(|g| g.as_str()).collect();
    format!(
        "Commands:\n\
         \x20 add-book <isbn> <title> <author> <genre> <copies>\n\
         \x20 add-member <id> <name> <email>\n\
         \x20 update-book <isbn> [title=..] [author=..] [genre=..] [copies=N]\n\
         \x20 update-member <id> [name=..] [email=..]\n\
         \x20 delete-book <isbn>\n\
         \x20 delete-member <id>\n\
         \x20 borrow <isbn> <member-id>\n\
         \x20 return <isbn> <member-id>\n\
         \x20 search <query> [title|author]\n\
         \x20 books | members | status\n\
         \x20 format [table|json]\n\
         \x20 help | quit\n\
         Quote arguments containing spaces: add-book 978-1 \"Python Fun\" ...\n\
         Genres: {}",
        genres.join(", ")
    )
}

fn expect_args<'a, const N: usize>(
    args: &'a [String],
    usage: &str,
) -> Result<&'a [String; N], String> {
    args.try_into().map_err(|_| usage.to_string())
}

fn parse_genre(text: &str) -> Result<Genre, String> {
    text.parse::<Genre>().map_err(|err| {
        let genres: Vec<&str> = Genre::ALL.iter().map(|g| g.as_str()).collect();
        format!("{err}; must be one of: {}", genres.join(", "))
    })
}

fn parse_copies(text: &str) -> Result<u32, String> {
    text.parse::<u32>()
        .map_err(|_| "copies must be a non-negative integer".to_string())
}

fn parse_book_patch(fields: &[String]) -> Result<BookPatch, String> {
    let mut patch = BookPatch::new();
    for field in fields {
        let Some((key, value)) = field.split_once('=') else {
            return Err(UPDATE_BOOK_USAGE.to_string());
        };
        patch = match key {
            "title" => patch.title(value),
            "author" => patch.author(value),
            "genre" => patch.genre(parse_genre(value)?),
            "copies" => patch.total_copies(parse_copies(value)?),
            other => return Err(format!("unknown field '{other}'; {UPDATE_BOOK_USAGE}")),
        };
    }
    if patch.is_empty() {
        return Err(UPDATE_BOOK_USAGE.to_string());
    }
    Ok(patch)
}

fn parse_member_patch(fields: &[String]) -> Result<MemberPatch, String> {
    let mut patch = MemberPatch::new();
    for field in fields {
        let Some((key, value)) = field.split_once('=') else {
            return Err(UPDATE_MEMBER_USAGE.to_string());
        };
        patch = match key {
            "name" => patch.name(value),
            "email" => patch.email(value),
            other => return Err(format!("unknown field '{other}'; {UPDATE_MEMBER_USAGE}")),
        };
    }
    if patch.is_empty() {
        return Err(UPDATE_MEMBER_USAGE.to_string());
    }
    Ok(patch)
}
