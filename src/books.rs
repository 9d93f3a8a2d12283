//! Book code registry: the TVTMS book codes, their chapter shapes, and the
//! alias spellings that resolve to them.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Error;

/// Accepted shape of a book code: optional leading digit, a letter, then
/// letters or digits (`Gen`, `1Sa`, `Ps2`).
pub(crate) const BOOK_CODE_PATTERN: &str = r"[1-4]?[A-Za-z][A-Za-z0-9]*";

/// Anchored form of [`BOOK_CODE_PATTERN`] for validating config entries.
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
static BOOK_CODE: Lazy<Regex> =
    Lazy::new(|| return Regex::new(&format!("^{BOOK_CODE_PATTERN}$")).expect("valid book code regex"));

/// How a book numbers its chapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterShape {
    /// Numeric chapters plus lettered sections `A`..`F` (Additions to Esther).
    Lettered,
    /// Ordinary numeric chapters.
    Numbered,
    /// Only chapter 1; chapterless references resolve to it.
    Single,
}

/// A known book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInfo {
    /// Canonical TVTMS code.
    pub code: String,
    /// Chapter numbering of this book.
    pub shape: ChapterShape,
}

/// Lookup table from canonical codes and aliases to book info.
/// Immutable once built and shared freely across threads.
#[derive(Debug, Clone)]
pub struct BookRegistry {
    /// Alias spelling to canonical code.
    aliases: HashMap<String, String>,
    /// Canonical code to book info.
    books: HashMap<String, BookInfo>,
}

/// TVTMS codes for the protocanonical books and the deuterocanonical books
/// that appear in the versification tables.
const CANONICAL_BOOKS: &[(&str, ChapterShape)] = &[
    ("Gen", ChapterShape::Numbered),
    ("Exo", ChapterShape::Numbered),
    ("Lev", ChapterShape::Numbered),
    ("Num", ChapterShape::Numbered),
    ("Deu", ChapterShape::Numbered),
    ("Jos", ChapterShape::Numbered),
    ("Jdg", ChapterShape::Numbered),
    ("Rut", ChapterShape::Numbered),
    ("1Sa", ChapterShape::Numbered),
    ("2Sa", ChapterShape::Numbered),
    ("1Ki", ChapterShape::Numbered),
    ("2Ki", ChapterShape::Numbered),
    ("1Ch", ChapterShape::Numbered),
    ("2Ch", ChapterShape::Numbered),
    ("Ezr", ChapterShape::Numbered),
    ("Neh", ChapterShape::Numbered),
    ("Est", ChapterShape::Lettered),
    ("Job", ChapterShape::Numbered),
    ("Psa", ChapterShape::Numbered),
    ("Pro", ChapterShape::Numbered),
    ("Ecc", ChapterShape::Numbered),
    ("Sng", ChapterShape::Numbered),
    ("Isa", ChapterShape::Numbered),
    ("Jer", ChapterShape::Numbered),
    ("Lam", ChapterShape::Numbered),
    ("Ezk", ChapterShape::Numbered),
    ("Dan", ChapterShape::Numbered),
    ("Hos", ChapterShape::Numbered),
    ("Jol", ChapterShape::Numbered),
    ("Amo", ChapterShape::Numbered),
    ("Oba", ChapterShape::Single),
    ("Jon", ChapterShape::Numbered),
    ("Mic", ChapterShape::Numbered),
    ("Nam", ChapterShape::Numbered),
    ("Hab", ChapterShape::Numbered),
    ("Zep", ChapterShape::Numbered),
    ("Hag", ChapterShape::Numbered),
    ("Zec", ChapterShape::Numbered),
    ("Mal", ChapterShape::Numbered),
    ("Mat", ChapterShape::Numbered),
    ("Mrk", ChapterShape::Numbered),
    ("Luk", ChapterShape::Numbered),
    ("Jhn", ChapterShape::Numbered),
    ("Act", ChapterShape::Numbered),
    ("Rom", ChapterShape::Numbered),
    ("1Co", ChapterShape::Numbered),
    ("2Co", ChapterShape::Numbered),
    ("Gal", ChapterShape::Numbered),
    ("Eph", ChapterShape::Numbered),
    ("Php", ChapterShape::Numbered),
    ("Col", ChapterShape::Numbered),
    ("1Th", ChapterShape::Numbered),
    ("2Th", ChapterShape::Numbered),
    ("1Ti", ChapterShape::Numbered),
    ("2Ti", ChapterShape::Numbered),
    ("Tit", ChapterShape::Numbered),
    ("Phm", ChapterShape::Single),
    ("Heb", ChapterShape::Numbered),
    ("Jas", ChapterShape::Numbered),
    ("1Pe", ChapterShape::Numbered),
    ("2Pe", ChapterShape::Numbered),
    ("1Jn", ChapterShape::Numbered),
    ("2Jn", ChapterShape::Single),
    ("3Jn", ChapterShape::Single),
    ("Jud", ChapterShape::Single),
    ("Rev", ChapterShape::Numbered),
    // Deuterocanon / apocrypha
    ("Tob", ChapterShape::Numbered),
    ("Jdt", ChapterShape::Numbered),
    ("Esg", ChapterShape::Lettered),
    ("Aes", ChapterShape::Lettered),
    ("Wis", ChapterShape::Numbered),
    ("Sir", ChapterShape::Numbered),
    ("Bar", ChapterShape::Numbered),
    ("Lje", ChapterShape::Single),
    ("S3y", ChapterShape::Single),
    ("Sus", ChapterShape::Single),
    ("Bel", ChapterShape::Single),
    ("1Ma", ChapterShape::Numbered),
    ("2Ma", ChapterShape::Numbered),
    ("3Ma", ChapterShape::Numbered),
    ("4Ma", ChapterShape::Numbered),
    ("1Es", ChapterShape::Numbered),
    ("2Es", ChapterShape::Numbered),
    ("Man", ChapterShape::Single),
    ("Ps2", ChapterShape::Single),
    ("Ode", ChapterShape::Numbered),
    ("Pss", ChapterShape::Numbered),
    ("Lao", ChapterShape::Single),
];

/// OSIS and other common spellings seen in hand-edited rows.
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("Exod", "Exo"),
    ("Deut", "Deu"),
    ("Josh", "Jos"),
    ("Judg", "Jdg"),
    ("Ruth", "Rut"),
    ("1Sam", "1Sa"),
    ("2Sam", "2Sa"),
    ("1Kgs", "1Ki"),
    ("2Kgs", "2Ki"),
    ("1Chr", "1Ch"),
    ("2Chr", "2Ch"),
    ("Ezra", "Ezr"),
    ("Esth", "Est"),
    ("Ps", "Psa"),
    ("Prov", "Pro"),
    ("Eccl", "Ecc"),
    ("Song", "Sng"),
    ("Ezek", "Ezk"),
    ("Joel", "Jol"),
    ("Amos", "Amo"),
    ("Obad", "Oba"),
    ("Jonah", "Jon"),
    ("Nah", "Nam"),
    ("Zeph", "Zep"),
    ("Zech", "Zec"),
    ("Matt", "Mat"),
    ("Mark", "Mrk"),
    ("Luke", "Luk"),
    ("John", "Jhn"),
    ("Acts", "Act"),
    ("1Cor", "1Co"),
    ("2Cor", "2Co"),
    ("Phil", "Php"),
    ("1Thess", "1Th"),
    ("2Thess", "2Th"),
    ("1Tim", "1Ti"),
    ("2Tim", "2Ti"),
    ("Titus", "Tit"),
    ("Phlm", "Phm"),
    ("1Pet", "1Pe"),
    ("2Pet", "2Pe"),
    ("1John", "1Jn"),
    ("2John", "2Jn"),
    ("3John", "3Jn"),
    ("Jude", "Jud"),
    ("AddEsth", "Aes"),
    ("EpJer", "Lje"),
    ("PrMan", "Man"),
];

impl BookRegistry {
    /// Register an alias for an existing canonical code.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBookCode` if the alias is not shaped like a
    /// book code, or `Error::InvalidAlias` if the target is unknown.
    pub fn add_alias(&mut self, alias: &str, target: &str) -> Result<(), Error> {
        ensure_book_code_shape(alias)?;
        let Some(info) = self.lookup(target) else {
            return Err(Error::InvalidAlias {
                alias: alias.to_string(),
                target: target.to_string(),
            });
        };
        let canonical = info.code.clone();
        self.aliases.insert(alias.to_string(), canonical);
        return Ok(());
    }

    /// Register an additional canonical book. Re-adding a known code
    /// replaces its chapter shape.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBookCode` if the code is not shaped like a book code.
    pub fn add_book(&mut self, code: &str, shape: ChapterShape) -> Result<(), Error> {
        ensure_book_code_shape(code)?;
        self.books.insert(code.to_string(), BookInfo {
            code: code.to_string(),
            shape,
        });
        return Ok(());
    }

    /// Iterate over canonical books in code order.
    pub fn books(&self) -> Vec<&BookInfo> {
        let mut books: Vec<&BookInfo> = self.books.values().collect();
        books.sort_by(|a, b| return a.code.cmp(&b.code));
        return books;
    }

    /// Number of canonical books.
    pub fn len(&self) -> usize {
        return self.books.len();
    }

    /// Whether the registry has no books at all.
    pub fn is_empty(&self) -> bool {
        return self.books.is_empty();
    }

    /// Resolve a canonical code or alias. Canonical codes win over aliases.
    pub fn lookup(&self, code: &str) -> Option<&BookInfo> {
        if let Some(info) = self.books.get(code) {
            return Some(info);
        }
        return self
            .aliases
            .get(code)
            .and_then(|canonical| return self.books.get(canonical));
    }
}

impl Default for BookRegistry {
    /// The built-in TVTMS book table and alias list.
    fn default() -> Self {
        let books = CANONICAL_BOOKS
            .iter()
            .map(|&(code, shape)| {
                return (code.to_string(), BookInfo {
                    code: code.to_string(),
                    shape,
                });
            })
            .collect();
        let aliases = DEFAULT_ALIASES
            .iter()
            .map(|&(alias, code)| return (alias.to_string(), code.to_string()))
            .collect();
        return Self { aliases, books };
    }
}

/// Reject config entries that the reference grammar could never match.
///
/// # Errors
///
/// Returns `Error::InvalidBookCode` on a malformed code.
fn ensure_book_code_shape(code: &str) -> Result<(), Error> {
    if BOOK_CODE.is_match(code) {
        return Ok(());
    }
    return Err(Error::InvalidBookCode {
        code: code.to_string(),
    });
}
