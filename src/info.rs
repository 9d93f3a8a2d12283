use std::path::PathBuf;

use serde::Serialize;

use tvtms::books::{BookRegistry, ChapterShape};
use tvtms::config::{CONFIG_FILE, Config};
use tvtms::types::MarkerKind;

/// Marker tokens with a fixed classification.
const KNOWN_MARKERS: &[&str] = &["!a", "!b", "!LXX"];

/// Output the tvtms reference document.
pub fn run(json: bool) {
    let root = PathBuf::from(".");
    let state = gather_state(&root);

    if json {
        print_json(&state);
    } else {
        print_markdown(&state);
    }
}

// ── State gathering ───────────────────────────────────────────────────

/// What the current directory's config resolves to.
struct CurrentState {
    /// Alias count from config, if it loaded.
    aliases: usize,
    /// Effective registry; the built-in table if config failed to load.
    books: BookRegistry,
    /// Whether `.tvtms.toml` exists.
    config_found: bool,
    /// Config or registry error, rendered.
    config_error: Option<String>,
}

/// Load config and registry without failing: errors are reported, not raised.
fn gather_state(root: &std::path::Path) -> CurrentState {
    let config_found = root.join(CONFIG_FILE).exists();
    let loaded = Config::load(root).and_then(|config| {
        let registry = config.book_registry()?;
        return Ok((config.aliases.len(), registry));
    });

    return match loaded {
        Ok((aliases, books)) => CurrentState {
            aliases,
            books,
            config_found,
            config_error: None,
        },
        Err(e) => CurrentState {
            aliases: 0,
            books: BookRegistry::default(),
            config_found,
            config_error: Some(e.to_string()),
        },
    };
}

/// Codes of all books with the given chapter shape.
fn codes_with_shape(books: &BookRegistry, shape: ChapterShape) -> Vec<String> {
    return books
        .books()
        .into_iter()
        .filter(|b| return b.shape == shape)
        .map(|b| return b.code.clone())
        .collect();
}

// ── Markdown output ───────────────────────────────────────────────────

/// Human-readable reference document.
fn print_markdown(state: &CurrentState) {
    let version = env!("CARGO_PKG_VERSION");
    print_markdown_header(version);
    print_markdown_books(&state.books);
    print_markdown_state(state);
    println!();
    print_markdown_exit_codes();
}

/// Grammar summary.
fn print_markdown_header(version: &str) {
    print!(
        "\
# tvtms {version}

Parser for STEPBible TVTMS versification references.

## Reference Syntax

    Gen.1:1                 book, chapter, verse
    Gen.1:1.a               sub-verse
    Psa.3:title             title pseudo-verse (verse 0)
    Est.A:1                 lettered chapter (A-F, Esther only)
    Gen.1:1(LXX)            manuscript tag
    Gen.1:1[=Gen.1:2]       annotation (kept verbatim)
    Gen.1:1-3               same-chapter range, one record per verse
    Gen.1:31-2:1            cross-chapter range, start and end records
    2:3                     relative to the current book
    Jud.5                   chapterless, single-chapter books only
    !a  !b  !LXX            special markers

## Commands

    tvtms parse <REF>... [--book <CODE>] [--json]
    tvtms check [PATH]...
    tvtms mapping-type <LABEL>
    tvtms category <LABEL>
    tvtms info [--json]

## Configuration ({CONFIG_FILE})

    include = [\"data/\"]               # only scan these paths
    exclude = [\"data/archive/\"]       # skip these paths
    extra_books = [\"Eno\"]             # additional book codes
    single_chapter_books = [\"Eno\"]    # codes taking chapterless references

    [aliases]
    Psalm = \"Psa\"                     # alias -> canonical code

"
    );
}

/// Known books grouped by chapter shape, plus markers.
fn print_markdown_books(books: &BookRegistry) {
    println!("## Books\n");
    println!("Numbered:  {}", codes_with_shape(books, ChapterShape::Numbered).join(" "));
    println!("Single:    {}", codes_with_shape(books, ChapterShape::Single).join(" "));
    println!("Lettered:  {}", codes_with_shape(books, ChapterShape::Lettered).join(" "));
    println!("\n## Markers\n");
    for token in KNOWN_MARKERS {
        println!("{token:<6} {}", MarkerKind::of(token).description());
    }
    println!("{:<6} {}", "!*", MarkerKind::Unknown.description());
    println!("\n## Current State\n");
}

/// Config and registry status.
fn print_markdown_state(state: &CurrentState) {
    if state.config_found {
        println!("Config:     {CONFIG_FILE} (found)");
    } else {
        println!("Config:     {CONFIG_FILE} (not found)");
    }
    if let Some(error) = &state.config_error {
        println!("Error:      {error}");
    }
    println!("Books:      {}", state.books.len());
    println!("Aliases:    {} configured", state.aliases);
}

/// Exit code table.
fn print_markdown_exit_codes() {
    print!(
        "\
## Exit Codes

| Code | Meaning |
|------|---------|
| 0    | Success / every field parsed |
| 1    | Some fields were rejected |
| 3    | Runtime error |
"
    );
}

// ── JSON output ───────────────────────────────────────────────────────

/// Top-level JSON document.
#[derive(Serialize)]
struct InfoJson {
    /// Crate version.
    version: String,
    /// Book codes by chapter shape.
    books: BooksJson,
    /// Marker table.
    markers: Vec<MarkerJson>,
    /// Exit code table.
    exit_codes: Vec<ExitCodeInfo>,
    /// Config state.
    current_state: StateJson,
}

/// Book codes by chapter shape.
#[derive(Serialize)]
struct BooksJson {
    /// Lettered-chapter codes.
    lettered: Vec<String>,
    /// Ordinary codes.
    numbered: Vec<String>,
    /// Single-chapter codes.
    single: Vec<String>,
}

/// One marker row.
#[derive(Serialize)]
struct MarkerJson {
    /// Literal token.
    token: String,
    /// Classification.
    marker_type: String,
}

/// One exit code row.
#[derive(Serialize)]
struct ExitCodeInfo {
    /// Process exit code.
    code: u8,
    /// What it means.
    meaning: String,
}

/// Config state.
#[derive(Serialize)]
struct StateJson {
    /// Whether the config file exists.
    config_found: bool,
    /// Config error, if any.
    config_error: Option<String>,
    /// Registry size.
    books: usize,
    /// Configured alias count.
    aliases: usize,
}

/// Machine-readable reference document.
fn print_json(state: &CurrentState) {
    let info = InfoJson {
        version: env!("CARGO_PKG_VERSION").to_string(),
        books: BooksJson {
            lettered: codes_with_shape(&state.books, ChapterShape::Lettered),
            numbered: codes_with_shape(&state.books, ChapterShape::Numbered),
            single: codes_with_shape(&state.books, ChapterShape::Single),
        },
        markers: KNOWN_MARKERS
            .iter()
            .map(|token| {
                return MarkerJson {
                    token: (*token).to_string(),
                    marker_type: MarkerKind::of(token).description().to_string(),
                };
            })
            .collect(),
        exit_codes: vec![
            ExitCodeInfo { code: 0, meaning: "Success / every field parsed".to_string() },
            ExitCodeInfo { code: 1, meaning: "Some fields were rejected".to_string() },
            ExitCodeInfo { code: 3, meaning: "Runtime error".to_string() },
        ],
        current_state: StateJson {
            config_found: state.config_found,
            config_error: state.config_error.clone(),
            books: state.books.len(),
            aliases: state.aliases,
        },
    };

    // serde_json::to_string_pretty won't fail on this structure.
    let json = serde_json::to_string_pretty(&info).unwrap_or_default();
    println!("{json}");
}
