//! Interactive catalog shell
//!
//! Lines are split with shell quoting rules, so titles with spaces go in
//! quotes:
//!
//! ```text
//! folio> add 0441013597 "Dune" "Frank Herbert" 1965 Sci-Fi
//! folio> search genre sci-fi
//! ```

use folio_primitives::{Book, Library, SearchType};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;
use tracing::info;

const HELP: &str = "\
Commands:
  add <isbn> <title> <author> <year> <genre>   add a book
  remove <isbn>                                 remove a book
  get <isbn>                                    show one book
  search <title|author|genre|year|isbn> <query> search the catalog
  range <start-year> <end-year>                 books published in a year range
  regenre <isbn> <genre>                        change a book's genre
  list                                          all books, by ISBN
  stats                                         index statistics
  check                                         verify index consistency
  help                                          this text
  quit                                          leave the shell";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a book
    Add(Book),
    /// Remove by ISBN
    Remove(String),
    /// Show by ISBN
    Get(String),
    /// Search by type
    Search(SearchType, String),
    /// Year range
    Range(i32, i32),
    /// Change genre
    Regenre(String, String),
    /// List everything
    List,
    /// Index statistics
    Stats,
    /// Invariant check
    Check,
    /// Usage
    Help,
    /// Exit
    Quit,
}

/// Why a line could not be parsed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Unbalanced quotes
    #[error("unbalanced quotes")]
    Quoting,
    /// Unknown command word
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),
    /// Wrong number of arguments
    #[error("usage: {0}")]
    Usage(&'static str),
    /// Argument that should be a year
    #[error("invalid year '{0}'")]
    Year(String),
    /// Unknown search type
    #[error("{0}")]
    SearchType(#[from] folio_primitives::ParseSearchTypeError),
}

fn parse_year(s: &str) -> Result<i32, ParseError> {
    s.parse().map_err(|_| ParseError::Year(s.to_string()))
}

/// Parse one input line; blank lines yield None
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let words = shlex::split(line).ok_or(ParseError::Quoting)?;
    let Some((head, args)) = words.split_first() else {
        return Ok(None);
    };

    let cmd = match (head.to_ascii_lowercase().as_str(), args) {
        ("add", [isbn, title, author, year, genre]) => {
            Command::Add(Book::new(title, author, parse_year(year)?, genre, isbn))
        }
        ("add", _) => return Err(ParseError::Usage("add <isbn> <title> <author> <year> <genre>")),
        ("remove", [isbn]) => Command::Remove(isbn.clone()),
        ("remove", _) => return Err(ParseError::Usage("remove <isbn>")),
        ("get", [isbn]) => Command::Get(isbn.clone()),
        ("get", _) => return Err(ParseError::Usage("get <isbn>")),
        ("search", [kind, query @ ..]) if !query.is_empty() => {
            Command::Search(kind.parse()?, query.join(" "))
        }
        ("search", _) => return Err(ParseError::Usage("search <type> <query>")),
        ("range", [start, end]) => Command::Range(parse_year(start)?, parse_year(end)?),
        ("range", _) => return Err(ParseError::Usage("range <start-year> <end-year>")),
        ("regenre", [isbn, genre]) => Command::Regenre(isbn.clone(), genre.clone()),
        ("regenre", _) => return Err(ParseError::Usage("regenre <isbn> <genre>")),
        ("list", []) => Command::List,
        ("stats", []) => Command::Stats,
        ("check", []) => Command::Check,
        ("help", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        (other, _) => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(cmd))
}

fn render(books: &[&Book]) -> String {
    if books.is_empty() {
        return "(no books)".to_string();
    }
    books
        .iter()
        .map(|b| format!("{}  {} [{}]", b.isbn, b, b.genre))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Execute a command against the catalog and return the text to print
pub fn execute(library: &mut Library, cmd: Command) -> String {
    let result = match cmd {
        Command::Add(book) => {
            let shown = book.to_string();
            library.add_book(book).map(|()| format!("added {}", shown))
        }
        Command::Remove(isbn) => library
            .remove_book(&isbn)
            .map(|b| format!("removed {}", b)),
        Command::Get(isbn) => Ok(match library.search_by_isbn(&isbn) {
            Some(book) => render(&[book]),
            None => format!("no book with ISBN {}", isbn),
        }),
        Command::Search(kind, query) => library.search(&query, kind).map(|hits| render(&hits)),
        Command::Range(start, end) => library
            .books_in_year_range(start, end)
            .map(|hits| render(&hits)),
        Command::Regenre(isbn, genre) => library
            .update_book(&isbn, |b| b.genre = genre)
            .map(|old| format!("moved {} out of {}", old, old.genre)),
        Command::List => {
            let books: Vec<&Book> = library
                .isbns()
                .into_iter()
                .filter_map(|isbn| library.search_by_isbn(isbn))
                .collect();
            Ok(render(&books))
        }
        Command::Stats => Ok(format!("{}\n{}", library.display_info(), library.stats())),
        Command::Check => library.check_indices().map(|()| "indices consistent".to_string()),
        Command::Help => Ok(HELP.to_string()),
        Command::Quit => Ok(String::new()),
    };
    result.unwrap_or_else(|e| format!("error: {}", e))
}

/// Run the interactive shell until `quit` or end of input
pub fn run(library_name: &str) -> anyhow::Result<()> {
    let mut library = Library::new(library_name)?;
    let mut editor = DefaultEditor::new()?;
    info!(library = %library_name, "starting catalog shell");
    println!("{} (type 'help' for commands)", library.display_info());

    loop {
        let line = match editor.readline("folio> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        editor.add_history_entry(line.as_str())?;

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(cmd)) => println!("{}", execute(&mut library, cmd)),
            Err(e) => println!("error: {}", e),
        }
    }
    Ok(())
}
