use std::fmt::Write as _;

use crate::config::CONFIG_FILE;
use crate::error::Error;
use crate::scanner::Rejection;

/// ANSI bold.
const BOLD: &str = "\x1b[1m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Render an error as markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic: what happened and,
/// where there is one, how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::InvalidAlias { alias, target } => render_invalid_alias(alias, target),
        Error::InvalidBookCode { code } => render_invalid_book_code(code),
        Error::UnknownBook { book } => render_unknown_book(book),
        Error::FileNotFound { path } => format!(
            "\
# Error: File Not Found

`{}` does not exist.
",
            path.display()
        ),
        Error::Io(e) => format!(
            "\
# Error: I/O

{e}
"
        ),
        Error::TomlDe(e) => format!(
            "\
# Error: Invalid TOML

{e}

## Fix

Check `{CONFIG_FILE}` against `tvtms info`.
"
        ),
        Error::InvalidChapter { .. }
        | Error::InvalidVerse { .. }
        | Error::MissingBook { .. }
        | Error::MissingChapter { .. }
        | Error::RangeTooLong { .. }
        | Error::ReversedRange { .. }
        | Error::UnrecognizedReference { .. } => format!(
            "\
# Error: Unparseable Reference

{e}
"
        ),
    };
}

/// One line per rejected field: `REJECTED file:line  text  (reason)`.
pub fn render_rejection(rejection: &Rejection) -> String {
    let mut out = format!(
        "REJECTED {}:{}  {}  ({})",
        rejection.file.display(),
        rejection.line,
        rejection.text,
        rejection.reason
    );
    if let Some(book) = &rejection.current_book {
        let _ = write!(out, " [current book: {book}]");
    }
    return out;
}

/// Alias whose target is not a book.
fn render_invalid_alias(alias: &str, target: &str) -> String {
    return format!(
        "\
# Error: Invalid Alias

Alias `{alias}` points at `{target}`, which is not a known book code.

## Fix

Point the alias at a canonical code, or declare the book first:

    extra_books = [\"{target}\"]

    [aliases]
    {alias} = \"{target}\"
"
    );
}

/// Malformed code in config.
fn render_invalid_book_code(code: &str) -> String {
    return format!(
        "\
# Error: Invalid Book Code

`{code}` cannot appear in a reference. Book codes are an optional digit,
a letter, then letters or digits (`Gen`, `1Sa`, `Ps2`).
"
    );
}

/// Book code missing from the registry.
fn render_unknown_book(book: &str) -> String {
    return format!(
        "\
# Error: Unknown Book

`{book}` is neither a TVTMS book code nor a configured alias.

## Fix

Add it to `{CONFIG_FILE}`:

    extra_books = [\"{book}\"]

Run `tvtms info` for the list of known codes.
"
    );
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn unknown_book_suggests_config_fix() {
        let md = render_error(&Error::UnknownBook { book: "Eno".to_string() });
        assert!(md.starts_with("# Error: Unknown Book"));
        assert!(md.contains("extra_books = [\"Eno\"]"));
    }

    #[test]
    fn rejection_line_names_location_and_context() {
        let rejection = Rejection {
            current_book: Some("Gen".to_string()),
            file: PathBuf::from("data/refs.txt"),
            line: 7,
            reason: Error::UnrecognizedReference { text: "1.1".to_string() },
            text: "1.1".to_string(),
        };
        let line = render_rejection(&rejection);
        assert!(line.starts_with("REJECTED data/refs.txt:7  1.1"));
        assert!(line.ends_with("[current book: Gen]"));
    }
}
