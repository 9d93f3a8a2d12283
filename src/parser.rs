//! Reference grammar: markers, single references, ranges, and references
//! relative to a current book.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::books::{BOOK_CODE_PATTERN, BookInfo, BookRegistry, ChapterShape};
use crate::error::Error;
use crate::types::{Chapter, ParsedReference, RangeNote, RangePosition, SpecialMarker, VerseRef};

/// Widest same-chapter range that will be expanded verse by verse.
/// Psalm 119, the longest chapter, has 176 verses.
pub const MAX_RANGE_SPAN: u32 = 200;

/// `!` followed by a non-blank word.
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
static MARKER: Lazy<Regex> = Lazy::new(|| return Regex::new(r"^!\S+$").expect("valid marker regex"));

/// Splits trailing `(MS)` and `[annotation]` suffixes from the locator body.
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
static SUFFIXES: Lazy<Regex> = Lazy::new(|| {
    return Regex::new(r"^(?P<body>[^()\[\]]+?)(?:\((?P<ms>[^()\[\]]+)\))?(?:\[(?P<ann>[^()\[\]]+)\])?$")
        .expect("valid suffix regex");
});

/// `[Book.][Chapter:]Verse[.Subverse]`. Chapter letters are validated
/// against the book afterwards so the error can name the chapter.
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
static LOCATOR: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"^(?:(?P<book>{BOOK_CODE_PATTERN})\.)?(?:(?P<chapter>[0-9]+|[A-Za-z]):)?(?P<verse>[0-9]+|title)(?:\.(?P<sub>[A-Za-z0-9]+))?$"
    );
    return Regex::new(&pattern).expect("valid locator regex");
});

/// Shared parser over the built-in book table.
static DEFAULT_PARSER: Lazy<ReferenceParser> = Lazy::new(ReferenceParser::default);

/// Parses reference fields against a fixed book registry. Holds no state
/// between calls; one instance can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct ReferenceParser {
    /// Known books and aliases.
    books: BookRegistry,
}

/// One side of a reference as written, before book and chapter resolution.
struct Locator<'t> {
    /// Book code as written, if present.
    book: Option<&'t str>,
    /// Chapter text as written, if present.
    chapter: Option<&'t str>,
    /// Sub-verse suffix.
    subverse: Option<&'t str>,
    /// Verse number, `0` for `title`.
    verse: u32,
}

/// A locator with book and chapter filled in.
struct Endpoint<'t> {
    /// Canonical book code.
    book: String,
    /// Resolved chapter.
    chapter: Chapter,
    /// Sub-verse suffix.
    subverse: Option<&'t str>,
    /// Verse number.
    verse: u32,
}

/// Suffixes written after a reference or after the end of a range.
struct Suffixes<'t> {
    /// Bracket content, kept verbatim.
    annotation: Option<&'t str>,
    /// Parenthesized manuscript tag.
    manuscript: Option<&'t str>,
}

impl ReferenceParser {
    /// Create a parser over the given registry.
    pub const fn new(books: BookRegistry) -> Self {
        return Self { books };
    }

    /// Parse one reference field, returning an empty list for anything that
    /// cannot be parsed. Rejections are logged at debug level.
    ///
    /// A bare verse with no chapter resolves only when `current_book` is a
    /// single-chapter book; elsewhere it is rejected as a missing chapter.
    pub fn parse_reference(&self, text: &str, current_book: Option<&str>) -> Vec<ParsedReference> {
        return match self.try_parse(text, current_book) {
            Ok(refs) => refs,
            Err(e) => {
                log::debug!("skipping reference {text:?}: {e}");
                Vec::new()
            },
        };
    }

    /// Parse one reference field, reporting why it was rejected.
    ///
    /// Blank input is not an error; it yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownBook`, `Error::InvalidChapter`, `Error::InvalidVerse`,
    /// `Error::MissingBook`, `Error::MissingChapter`, `Error::ReversedRange`,
    /// `Error::RangeTooLong`, or `Error::UnrecognizedReference` when the text is
    /// not a well-formed reference. No partial result is ever returned.
    pub fn try_parse(&self, text: &str, current_book: Option<&str>) -> Result<Vec<ParsedReference>, Error> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        if MARKER.is_match(text) {
            return Ok(vec![ParsedReference::Marker(SpecialMarker::new(text))]);
        }

        let caps = SUFFIXES.captures(text).ok_or_else(|| return unrecognized(text))?;
        let body = caps.name("body").map_or("", |m| return m.as_str());
        let suffixes = Suffixes {
            annotation: caps.name("ann").map(|m| return m.as_str()),
            manuscript: caps.name("ms").map(|m| return m.as_str()),
        };

        let sides: Vec<&str> = body.split('-').map(str::trim).collect();
        return match sides.as_slice() {
            [single] => self.parse_single(text, single, current_book, &suffixes),
            [start, end] => self.parse_range(text, start, end, current_book, &suffixes),
            _ => Err(unrecognized(text)),
        };
    }

    /// A single reference: exactly one record, no range note.
    ///
    /// # Errors
    ///
    /// Returns locator and resolution errors.
    fn parse_single(
        &self,
        text: &str,
        raw: &str,
        current_book: Option<&str>,
        suffixes: &Suffixes<'_>,
    ) -> Result<Vec<ParsedReference>, Error> {
        let locator = parse_locator(text, raw)?;
        let endpoint = self.resolve(text, &locator, current_book, None)?;
        return Ok(vec![build_record(endpoint, suffixes, None)]);
    }

    /// Two references joined by `-`. The end inherits book and chapter from
    /// the start when it omits them.
    ///
    /// # Errors
    ///
    /// Returns locator and resolution errors, `Error::ReversedRange`, or
    /// `Error::RangeTooLong`.
    fn parse_range(
        &self,
        text: &str,
        raw_start: &str,
        raw_end: &str,
        current_book: Option<&str>,
        suffixes: &Suffixes<'_>,
    ) -> Result<Vec<ParsedReference>, Error> {
        let start_locator = parse_locator(text, raw_start)?;
        let end_locator = parse_locator(text, raw_end)?;

        let start = self.resolve(text, &start_locator, current_book, None)?;
        let end_changes_book = end_locator.book.is_some_and(|book| {
            return self.books.lookup(book).map(|info| return info.code.as_str()) != Some(start.book.as_str());
        });
        let inherited = if end_changes_book { None } else { Some(start.chapter) };
        let end = self.resolve(text, &end_locator, Some(start.book.as_str()), inherited)?;

        // A range with no book prefix is relative: its note names the book
        // as the caller gave it.
        let range = if start_locator.book.is_none() {
            format!("{}.{text}", current_book.map_or(start.book.as_str(), str::trim))
        } else {
            text.to_string()
        };

        if start.book != end.book {
            return Ok(boundary_pair(start, end, suffixes, &range));
        }
        if is_reversed(&start, &end) {
            return Err(Error::ReversedRange { text: text.to_string() });
        }
        if start.chapter != end.chapter || start.subverse.is_some() || end.subverse.is_some() {
            return Ok(boundary_pair(start, end, suffixes, &range));
        }
        return expand_verses(text, &start, end.verse, suffixes, &range);
    }

    /// Fill in book and chapter for a locator.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingBook`, `Error::UnknownBook`, `Error::InvalidChapter`,
    /// or `Error::MissingChapter`.
    fn resolve<'t>(
        &self,
        text: &str,
        locator: &Locator<'t>,
        fallback_book: Option<&str>,
        inherited_chapter: Option<Chapter>,
    ) -> Result<Endpoint<'t>, Error> {
        let raw_book: &str = match locator.book {
            Some(book) => book,
            None => fallback_book.ok_or_else(|| {
                return Error::MissingBook { text: text.to_string() };
            })?,
        };
        let info = self.books.lookup(raw_book).ok_or_else(|| {
            return Error::UnknownBook { book: raw_book.to_string() };
        })?;

        let chapter = match locator.chapter {
            Some(raw) => parse_chapter(info, raw)?,
            None => inherited_chapter
                .or_else(|| return default_chapter(info))
                .ok_or_else(|| {
                    return Error::MissingChapter {
                        book: info.code.clone(),
                        text: text.to_string(),
                    };
                })?,
        };

        return Ok(Endpoint {
            book: info.code.clone(),
            chapter,
            subverse: locator.subverse,
            verse: locator.verse,
        });
    }
}

/// Parse one reference field with the built-in book table.
///
/// Returns an empty list for blank or unparseable input; never panics.
/// A bare verse such as `5` resolves only against a single-chapter
/// `current_book`.
pub fn parse_reference(text: &str, current_book: Option<&str>) -> Vec<ParsedReference> {
    return DEFAULT_PARSER.parse_reference(text, current_book);
}

/// The book a line-by-line reader should carry forward after parsing a
/// field: the book of the last verse record, if any.
pub fn trailing_book(refs: &[ParsedReference]) -> Option<&str> {
    return refs.iter().rev().find_map(ParsedReference::book);
}

/// Start and end records for a range that crosses a chapter or book.
fn boundary_pair(start: Endpoint<'_>, end: Endpoint<'_>, suffixes: &Suffixes<'_>, range: &str) -> Vec<ParsedReference> {
    let start_note = RangeNote {
        position: RangePosition::Start,
        range: range.to_string(),
    };
    let end_note = RangeNote {
        position: RangePosition::End,
        range: range.to_string(),
    };
    return vec![
        build_record(start, suffixes, Some(start_note)),
        build_record(end, suffixes, Some(end_note)),
    ];
}

/// Assemble a record from a resolved endpoint.
fn build_record(endpoint: Endpoint<'_>, suffixes: &Suffixes<'_>, range_note: Option<RangeNote>) -> ParsedReference {
    return ParsedReference::Verse(VerseRef {
        annotation: suffixes.annotation.map(str::to_string),
        book: endpoint.book,
        chapter: endpoint.chapter,
        manuscript: suffixes.manuscript.map(str::to_string),
        range_note,
        subverse: endpoint.subverse.map(str::to_string),
        verse: endpoint.verse,
    });
}

/// Chapter implied when a reference omits it.
const fn default_chapter(info: &BookInfo) -> Option<Chapter> {
    return match info.shape {
        ChapterShape::Single => Some(Chapter::Number(1)),
        ChapterShape::Lettered | ChapterShape::Numbered => None,
    };
}

/// One record per verse of a same-chapter range.
///
/// # Errors
///
/// Returns `Error::RangeTooLong` if the range spans more than [`MAX_RANGE_SPAN`] verses.
fn expand_verses(
    text: &str,
    start: &Endpoint<'_>,
    end_verse: u32,
    suffixes: &Suffixes<'_>,
    range: &str,
) -> Result<Vec<ParsedReference>, Error> {
    let span = end_verse.saturating_sub(start.verse).saturating_add(1);
    if span > MAX_RANGE_SPAN {
        return Err(Error::RangeTooLong {
            max: MAX_RANGE_SPAN,
            span,
            text: text.to_string(),
        });
    }

    return Ok((start.verse..=end_verse)
        .map(|verse| {
            let endpoint = Endpoint {
                book: start.book.clone(),
                chapter: start.chapter,
                subverse: None,
                verse,
            };
            let note = RangeNote {
                position: RangePosition::Part,
                range: range.to_string(),
            };
            return build_record(endpoint, suffixes, Some(note));
        })
        .collect());
}

/// Whether the end of a same-book range precedes its start. Letter and
/// numeric chapters of Esther are not ordered against each other.
fn is_reversed(start: &Endpoint<'_>, end: &Endpoint<'_>) -> bool {
    return match (start.chapter, end.chapter) {
        (Chapter::Number(a), Chapter::Number(b)) => b < a || (a == b && end.verse < start.verse),
        (Chapter::Letter(a), Chapter::Letter(b)) => b < a || (a == b && end.verse < start.verse),
        (Chapter::Letter(_), Chapter::Number(_)) | (Chapter::Number(_), Chapter::Letter(_)) => false,
    };
}

/// Validate a chapter token against the book's chapter shape.
///
/// # Errors
///
/// Returns `Error::InvalidChapter` for zero, overflow, or a disallowed letter.
fn parse_chapter(info: &BookInfo, raw: &str) -> Result<Chapter, Error> {
    let invalid = || {
        return Error::InvalidChapter {
            book: info.code.clone(),
            chapter: raw.to_string(),
        };
    };

    if let Ok(number) = raw.parse::<u32>() {
        if number == 0 {
            return Err(invalid());
        }
        return Ok(Chapter::Number(number));
    }

    let mut chars = raw.chars();
    let (Some(letter), None) = (chars.next(), chars.next()) else {
        return Err(invalid());
    };
    if info.shape == ChapterShape::Lettered && ('A'..='F').contains(&letter) {
        return Ok(Chapter::Letter(letter));
    }
    return Err(invalid());
}

/// Match one side of a reference against the locator grammar.
///
/// # Errors
///
/// Returns `Error::UnrecognizedReference` if the side does not match or has a
/// sub-verse without a chapter, or `Error::InvalidVerse` for verse `0` written
/// as a number or an overflowing verse.
fn parse_locator<'t>(text: &str, raw: &'t str) -> Result<Locator<'t>, Error> {
    let caps = LOCATOR.captures(raw).ok_or_else(|| return unrecognized(text))?;
    // `Jud.1.1` is `Jud.1:1.1` with the separator lost, not a chapterless form.
    if caps.name("sub").is_some() && caps.name("chapter").is_none() {
        return Err(unrecognized(text));
    }
    let raw_verse = caps.name("verse").map_or("", |m| return m.as_str());

    let verse = if raw_verse == "title" {
        0
    } else {
        match raw_verse.parse::<u32>() {
            Ok(n) if n > 0 => n,
            Ok(_) | Err(_) => {
                return Err(Error::InvalidVerse {
                    text: text.to_string(),
                    verse: raw_verse.to_string(),
                });
            },
        }
    };

    return Ok(Locator {
        book: caps.name("book").map(|m| return m.as_str()),
        chapter: caps.name("chapter").map(|m| return m.as_str()),
        subverse: caps.name("sub").map(|m| return m.as_str()),
        verse,
    });
}

/// Rejection for text that matches no reference form.
fn unrecognized(text: &str) -> Error {
    return Error::UnrecognizedReference { text: text.to_string() };
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, reason = "tests index into known-length results")]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<ParsedReference> {
        return parse_reference(text, None);
    }

    fn rejection(text: &str, current_book: Option<&str>) -> Error {
        return ReferenceParser::default().try_parse(text, current_book).unwrap_err();
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
        assert!(ReferenceParser::default().try_parse("", None).unwrap().is_empty());
    }

    #[test]
    fn standard_reference() {
        let refs = parse("Gen.1:1");
        assert_eq!(refs.len(), 1);
        let r = &refs[0];
        assert_eq!(r.book(), Some("Gen"));
        assert_eq!(r.chapter(), Some(Chapter::Number(1)));
        assert_eq!(r.verse(), Some(1));
        assert_eq!(r.subverse(), None);
        assert_eq!(r.manuscript(), None);
        assert_eq!(r.annotation(), None);
        assert_eq!(r.range_note(), None);
        assert_eq!(r.special_marker(), None);
        assert_eq!(r.marker_type(), None);
    }

    #[test]
    fn subverse_suffix() {
        let refs = parse("Psa.51:1.a");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].verse(), Some(1));
        assert_eq!(refs[0].subverse(), Some("a"));
    }

    #[test]
    fn title_is_verse_zero() {
        let refs = parse("Psa.3:title");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].verse(), Some(0));
    }

    #[test]
    fn numeric_zero_verse_is_rejected() {
        assert!(parse("Gen.1:0").is_empty());
        assert!(matches!(rejection("Gen.1:0", None), Error::InvalidVerse { .. }));
    }

    #[test]
    fn manuscript_and_annotation() {
        let refs = parse("Gen.1:1(LXX)[=Gen.1:2]");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].manuscript(), Some("LXX"));
        assert_eq!(refs[0].annotation(), Some("=Gen.1:2"));
        assert!(refs[0].annotation().unwrap().contains("Gen.1:2"));
    }

    #[test]
    fn annotation_may_contain_a_range() {
        let refs = parse("Gen.1:1[=Gen.1:2-3]");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].annotation(), Some("=Gen.1:2-3"));
        assert_eq!(refs[0].range_note(), None);
    }

    #[test]
    fn same_chapter_range_expands() {
        let refs = parse("Gen.1:1-3");
        assert_eq!(refs.len(), 3);
        for (r, verse) in refs.iter().zip(1..=3) {
            assert_eq!(r.book(), Some("Gen"));
            assert_eq!(r.chapter(), Some(Chapter::Number(1)));
            assert_eq!(r.verse(), Some(verse));
            assert_eq!(r.range_note().as_deref(), Some("Part of range Gen.1:1-3"));
        }
    }

    #[test]
    fn cross_chapter_range_yields_boundaries() {
        let refs = parse("Gen.1:1-2:3");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].chapter(), Some(Chapter::Number(1)));
        assert_eq!(refs[0].verse(), Some(1));
        assert_eq!(refs[0].range_note().as_deref(), Some("Start of range Gen.1:1-2:3"));
        assert_eq!(refs[1].chapter(), Some(Chapter::Number(2)));
        assert_eq!(refs[1].verse(), Some(3));
        assert_eq!(refs[1].range_note().as_deref(), Some("End of range Gen.1:1-2:3"));
    }

    #[test]
    fn cross_book_range_yields_boundaries() {
        let refs = parse("Mal.4:6-Mat.1:1");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].book(), Some("Mal"));
        assert_eq!(refs[1].book(), Some("Mat"));
        assert_eq!(refs[1].chapter(), Some(Chapter::Number(1)));
    }

    #[test]
    fn range_manuscript_applies_to_both_boundaries() {
        let refs = parse("Gen.31:55-32:1(LXX)");
        assert_eq!(refs.len(), 2);
        assert!(refs.iter().all(|r| r.manuscript() == Some("LXX")));
        assert_eq!(refs[0].range_note().as_deref(), Some("Start of range Gen.31:55-32:1(LXX)"));
    }

    #[test]
    fn range_manuscript_applies_to_every_expanded_verse() {
        let refs = parse("Psa.9:1-2(A)");
        assert_eq!(refs.len(), 2);
        assert!(refs.iter().all(|r| r.manuscript() == Some("A")));
    }

    #[test]
    fn subverse_range_is_not_expanded() {
        let refs = parse("Rom.16:25.a-16:27.b");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].subverse(), Some("a"));
        assert_eq!(refs[1].subverse(), Some("b"));
    }

    #[test]
    fn manuscript_on_range_start_is_rejected() {
        assert!(parse("Gen.1:1(A)-3").is_empty());
    }

    #[test]
    fn reversed_ranges_are_rejected() {
        assert!(matches!(rejection("Gen.1:5-2", None), Error::ReversedRange { .. }));
        assert!(matches!(rejection("Gen.3:1-2:1", None), Error::ReversedRange { .. }));
    }

    #[test]
    fn oversized_range_is_rejected() {
        assert!(matches!(rejection("Psa.119:1-999", None), Error::RangeTooLong { .. }));
        assert_eq!(parse("Psa.119:1-176").len(), 176);
    }

    #[test]
    fn letter_chapters_for_esther() {
        let refs = parse("Est.A:1");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].book(), Some("Est"));
        assert_eq!(refs[0].chapter(), Some(Chapter::Letter('A')));
        assert_eq!(parse("Est.F:11")[0].chapter(), Some(Chapter::Letter('F')));
    }

    #[test]
    fn letter_chapter_outside_a_to_f_is_rejected() {
        assert!(parse("Est.G:1").is_empty());
        assert!(parse("Est.a:1").is_empty());
        assert!(matches!(rejection("Est.G:1", None), Error::InvalidChapter { .. }));
    }

    #[test]
    fn letter_chapter_on_other_books_is_rejected() {
        assert!(parse("Gen.A:1").is_empty());
    }

    #[test]
    fn letter_chapter_range() {
        let refs = parse("Est.A:1-B:3");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[1].chapter(), Some(Chapter::Letter('B')));
    }

    #[test]
    fn zero_chapter_is_rejected() {
        assert!(parse("Gen.0:1").is_empty());
    }

    #[test]
    fn unknown_book_is_rejected() {
        assert!(parse("Xyz.1:1").is_empty());
        assert!(matches!(rejection("Xyz.1:1", None), Error::UnknownBook { .. }));
    }

    #[test]
    fn malformed_separators_are_rejected() {
        for text in ["Gen 1:1", "Gen1:1", "Gen:1.1", "Gen.1:", "Gen.1:1-", "Gen.1:1-2-3", "Gen.1:x", "!"] {
            assert!(parse(text).is_empty(), "{text} should not parse");
        }
    }

    #[test]
    fn markers() {
        let cases = [
            ("!a", "First alternative reading"),
            ("!b", "Second alternative reading"),
            ("!LXX", "Septuagint reading"),
            ("!MT", "Unknown marker"),
        ];
        for (token, kind) in cases {
            let refs = parse(token);
            assert_eq!(refs.len(), 1);
            assert_eq!(refs[0].special_marker(), Some(token));
            assert_eq!(refs[0].marker_type(), Some(kind));
            assert_eq!(refs[0].book(), None);
            assert_eq!(refs[0].chapter(), None);
            assert_eq!(refs[0].verse(), None);
        }
    }

    #[test]
    fn relative_reference_matches_qualified() {
        assert_eq!(parse_reference("2:3", Some("Gen")), parse("Gen.2:3"));
        assert_eq!(parse_reference("2:3.a", Some("Gen")), parse("Gen.2:3.a"));
    }

    #[test]
    fn relative_range_note_is_qualified() {
        let relative = parse_reference("1:1-3", Some("Gen"));
        assert_eq!(relative, parse("Gen.1:1-3"));
        assert_eq!(relative[0].range_note().as_deref(), Some("Part of range Gen.1:1-3"));

        let boundary = parse_reference("1:31-2:1", Some("Gen"));
        assert_eq!(boundary[1].range_note().as_deref(), Some("End of range Gen.1:31-2:1"));
    }

    #[test]
    fn relative_range_note_keeps_the_book_as_given() {
        let relative = parse_reference("1:1-3", Some("Ps"));
        assert_eq!(relative, parse("Ps.1:1-3"));
        assert_eq!(relative.len(), 3);
        assert_eq!(relative[0].book(), Some("Psa"));
        assert_eq!(relative[2].range_note().as_deref(), Some("Part of range Ps.1:1-3"));
    }

    #[test]
    fn relative_reference_needs_a_book() {
        assert!(parse("2:3").is_empty());
        assert!(matches!(rejection("2:3", None), Error::MissingBook { .. }));
    }

    #[test]
    fn explicit_book_wins_over_current_book() {
        let refs = parse_reference("Exo.2:3", Some("Gen"));
        assert_eq!(refs[0].book(), Some("Exo"));
    }

    #[test]
    fn alias_resolves_to_canonical_code() {
        let refs = parse("Ps.23:1");
        assert_eq!(refs[0].book(), Some("Psa"));
        assert_eq!(parse_reference("23:1", Some("Ps")), refs);
    }

    #[test]
    fn single_chapter_books_accept_chapterless_forms() {
        let refs = parse("Jud.5");
        assert_eq!(refs[0].chapter(), Some(Chapter::Number(1)));
        assert_eq!(refs[0].verse(), Some(5));
        assert_eq!(parse_reference("5", Some("Jud")), refs);
    }

    #[test]
    fn chapterless_forms_need_a_single_chapter_book() {
        assert!(parse("Gen.5").is_empty());
        assert!(parse_reference("5", Some("Gen")).is_empty());
        assert!(matches!(rejection("5", Some("Gen")), Error::MissingChapter { .. }));
    }

    #[test]
    fn sub_verse_needs_an_explicit_chapter() {
        assert!(parse("Jud.1.1").is_empty());
        assert!(matches!(rejection("Jud.1.1", None), Error::UnrecognizedReference { .. }));
        assert!(matches!(rejection("1.a", Some("Jud")), Error::UnrecognizedReference { .. }));
        assert_eq!(parse("Jud.1:1.1")[0].subverse(), Some("1"));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse("  Gen.1:1 "), parse("Gen.1:1"));
        assert_eq!(parse("Gen.1:1 - 3").len(), 3);
    }

    #[test]
    fn trailing_book_follows_last_verse_record() {
        let refs = parse("Mal.4:6-Mat.1:1");
        assert_eq!(trailing_book(&refs), Some("Mat"));
        assert_eq!(trailing_book(&parse("!a")), None);
        assert_eq!(trailing_book(&[]), None);
    }

    #[test]
    fn default_parser_is_shareable_across_threads() {
        let handles: Vec<_> = ["Gen.1:1", "Exo.2:1-3", "!b"]
            .into_iter()
            .map(|text| std::thread::spawn(move || parse_reference(text, None).len()))
            .collect();
        let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(counts, vec![1, 3, 1]);
    }
}
