//! Interactive shell over one in-memory catalog.

use crate::commands::{self, Command};
use crate::formatter::{self, OutputFormat};
use librarium_core::{Catalog, Member};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};

/// Runs the read-eval-print loop until `quit` or end of input.
///
/// Catalog failures are printed and survived; only I/O problems (terminal
/// gone, serialization) end the loop with an error.
pub fn run(
    mut catalog: Catalog,
    initial_format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let rl_config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .build();
    let mut rl: Editor<(), DefaultHistory> = Editor::with_config(rl_config)?;

    let mut format = initial_format;

    println!(
        "Librarium v{} - type 'help' for commands, 'quit' to leave",
        librarium_core::VERSION
    );

    loop {
        match rl.readline("librarium> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let command = match commands::parse(line) {
                    Ok(command) => command,
                    Err(message) => {
                        println!("{message}");
                        continue;
                    }
                };

                match command {
                    Command::Quit => {
                        println!("Goodbye!");
                        break;
                    }
                    Command::Help => println!("{}", commands::help_text()),
                    Command::Format(None) => println!("Current format: {format}"),
                    Command::Format(Some(new_format)) => {
                        format = new_format;
                        println!("Output format set to {format}");
                    }
                    other => dispatch(&mut catalog, other, format)?,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Executes one catalog command and prints the outcome.
fn dispatch(
    catalog: &mut Catalog,
    command: Command,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::AddBook {
            isbn,
            title,
            author,
            genre,
            total_copies,
        } => report(
            catalog.add_book(&isbn, &title, &author, genre, total_copies),
            "Book added.",
        ),
        Command::AddMember {
            member_id,
            name,
            email,
        } => report(catalog.add_member(&member_id, &name, &email), "Member added."),
        Command::UpdateBook { isbn, patch } => {
            report(catalog.update_book(&isbn, patch), "Book updated.")
        }
        Command::UpdateMember { member_id, patch } => {
            report(catalog.update_member(&member_id, patch), "Member updated.")
        }
        Command::DeleteBook { isbn } => report(catalog.delete_book(&isbn), "Book deleted."),
        Command::DeleteMember { member_id } => {
            report(catalog.delete_member(&member_id), "Member deleted.")
        }
        Command::Borrow { isbn, member_id } => {
            report(catalog.borrow_book(&isbn, &member_id), "Book borrowed.")
        }
        Command::Return { isbn, member_id } => {
            report(catalog.return_book(&isbn, &member_id), "Book returned.")
        }
        Command::Search { query, by } => {
            let records = catalog.search_books(&query, by);
            println!("{}", formatter::books(&records, format)?);
        }
        Command::Books => {
            let records = catalog.search_books("", Default::default());
            println!("{}", formatter::books(&records, format)?);
        }
        Command::Members => {
            let members: Vec<&Member> = catalog.members().collect();
            println!("{}", formatter::members(&members, format)?);
        }
        Command::Status => {
            println!(
                "{} books, {} members",
                catalog.book_count(),
                catalog.member_count()
            );
            let records = catalog.search_books("", Default::default());
            println!("{}", formatter::books(&records, format)?);
            let members: Vec<&Member> = catalog.members().collect();
            println!("{}", formatter::members(&members, format)?);
        }
        // Handled by the caller.
        Command::Format(_) | Command::Help | Command::Quit => {}
    }
    Ok(())
}

/// Prints a confirmation on success or the failure reason otherwise.
fn report(result: librarium_core::CatalogResult<()>, confirmation: &str) {
    match result {
        Ok(()) => println!("{confirmation}"),
        Err(err) => println!("Error: {err}"),
    }
}
