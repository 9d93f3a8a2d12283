/// Core domain types for parsed versification references.
use std::fmt;

use serde::ser::{Serialize, Serializer};

/// One resolved token from a reference field. Either a verse locator or a
/// special marker; the two never share fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReference {
    /// Marker token such as `!a` or `!LXX`.
    Marker(SpecialMarker),
    /// Book, chapter and verse, with optional qualifiers.
    Verse(VerseRef),
}

/// A chapter is numeric, except in the Additions to Esther where the
/// sections are lettered `A` through `F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Chapter {
    /// Letter chapter, always within `A..=F`.
    Letter(char),
    /// Numeric chapter, always at least 1.
    Number(u32),
}

/// Classification of a `!`-prefixed marker token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// `!a`
    FirstAlternative,
    /// `!b`
    SecondAlternative,
    /// `!LXX`
    Septuagint,
    /// Any other `!` token.
    Unknown,
}

/// Where a record sits within the range it was expanded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangePosition {
    /// Last boundary of a cross-chapter or cross-book range.
    End,
    /// One verse of a same-chapter range.
    Part,
    /// First boundary of a cross-chapter or cross-book range.
    Start,
}

/// Note attached to records produced by range expansion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeNote {
    /// Position of the record in the range.
    pub position: RangePosition,
    /// Fully qualified text of the whole range, e.g. `Gen.1:1-3`.
    pub range: String,
}

/// A `!`-prefixed marker token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpecialMarker {
    /// Classification looked up from the token.
    pub kind: MarkerKind,
    /// The literal token, including the leading `!`.
    pub token: String,
}

/// A verse locator. Constructed by the parser, which guarantees the book is
/// a known canonical code and the chapter is valid for that book.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerseRef {
    /// Raw bracket content, e.g. `=Gen.1:2`.
    pub annotation: Option<String>,
    /// Canonical book code.
    pub book: String,
    /// Numeric or letter chapter.
    pub chapter: Chapter,
    /// Manuscript tag from the parenthesized suffix, e.g. `LXX`.
    pub manuscript: Option<String>,
    /// Set only on records produced by range expansion.
    pub range_note: Option<RangeNote>,
    /// Sub-verse suffix such as `a` or `1`.
    pub subverse: Option<String>,
    /// Verse number; `0` is the title pseudo-verse.
    pub verse: u32,
}

impl Chapter {
    /// The letter for a letter chapter.
    pub const fn letter(self) -> Option<char> {
        return match self {
            Chapter::Letter(c) => Some(c),
            Chapter::Number(_) => None,
        };
    }

    /// The number for a numeric chapter.
    pub const fn number(self) -> Option<u32> {
        return match self {
            Chapter::Letter(_) => None,
            Chapter::Number(n) => Some(n),
        };
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Chapter::Letter(c) => write!(f, "{c}"),
            Chapter::Number(n) => write!(f, "{n}"),
        };
    }
}

impl Serialize for Chapter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        return match self {
            Chapter::Letter(c) => serializer.serialize_char(*c),
            Chapter::Number(n) => serializer.serialize_u32(*n),
        };
    }
}

impl MarkerKind {
    /// Classify a marker token. The token must include its leading `!`.
    pub fn of(token: &str) -> Self {
        return match token {
            "!a" => MarkerKind::FirstAlternative,
            "!b" => MarkerKind::SecondAlternative,
            "!LXX" => MarkerKind::Septuagint,
            _ => MarkerKind::Unknown,
        };
    }

    /// Human-readable description stored as `marker_type`.
    pub const fn description(self) -> &'static str {
        return match self {
            MarkerKind::FirstAlternative => "First alternative reading",
            MarkerKind::SecondAlternative => "Second alternative reading",
            MarkerKind::Septuagint => "Septuagint reading",
            MarkerKind::Unknown => "Unknown marker",
        };
    }
}

impl fmt::Display for RangeNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.position {
            RangePosition::End => "End",
            RangePosition::Part => "Part",
            RangePosition::Start => "Start",
        };
        return write!(f, "{label} of range {}", self.range);
    }
}

impl SpecialMarker {
    /// Build a marker record from its literal token.
    pub fn new(token: &str) -> Self {
        return Self {
            kind: MarkerKind::of(token),
            token: token.to_string(),
        };
    }
}

impl VerseRef {
    /// `Book.Chapter:Verse[.Subverse]`, without manuscript or annotation.
    pub fn canonical(&self) -> String {
        let verse = if self.verse == 0 {
            "title".to_string()
        } else {
            self.verse.to_string()
        };
        return match &self.subverse {
            Some(sub) => format!("{}.{}:{verse}.{sub}", self.book, self.chapter),
            None => format!("{}.{}:{verse}", self.book, self.chapter),
        };
    }

    /// Whether this is a title pseudo-verse.
    pub const fn is_title(&self) -> bool {
        return self.verse == 0;
    }
}

impl fmt::Display for VerseRef {
    /// Full form: canonical locator plus `(MS)` and `[annotation]` suffixes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())?;
        if let Some(ms) = &self.manuscript {
            write!(f, "({ms})")?;
        }
        if let Some(annotation) = &self.annotation {
            write!(f, "[{annotation}]")?;
        }
        return Ok(());
    }
}

impl ParsedReference {
    /// Bracket annotation, if any.
    pub fn annotation(&self) -> Option<&str> {
        return self.as_verse().and_then(|v| return v.annotation.as_deref());
    }

    /// The verse locator, if this is not a marker.
    pub const fn as_verse(&self) -> Option<&VerseRef> {
        return match self {
            ParsedReference::Marker(_) => None,
            ParsedReference::Verse(v) => Some(v),
        };
    }

    /// Canonical book code, absent for markers.
    pub fn book(&self) -> Option<&str> {
        return self.as_verse().map(|v| return v.book.as_str());
    }

    /// Chapter, absent for markers.
    pub fn chapter(&self) -> Option<Chapter> {
        return self.as_verse().map(|v| return v.chapter);
    }

    /// Manuscript tag, if any.
    pub fn manuscript(&self) -> Option<&str> {
        return self.as_verse().and_then(|v| return v.manuscript.as_deref());
    }

    /// Marker description, present only for markers.
    pub const fn marker_type(&self) -> Option<&'static str> {
        return match self {
            ParsedReference::Marker(m) => Some(m.kind.description()),
            ParsedReference::Verse(_) => None,
        };
    }

    /// Rendered range note, e.g. `Part of range Gen.1:1-3`.
    pub fn range_note(&self) -> Option<String> {
        return self
            .as_verse()
            .and_then(|v| return v.range_note.as_ref())
            .map(ToString::to_string);
    }

    /// Literal marker token, present only for markers.
    pub fn special_marker(&self) -> Option<&str> {
        return match self {
            ParsedReference::Marker(m) => Some(m.token.as_str()),
            ParsedReference::Verse(_) => None,
        };
    }

    /// Sub-verse suffix, if any.
    pub fn subverse(&self) -> Option<&str> {
        return self.as_verse().and_then(|v| return v.subverse.as_deref());
    }

    /// Verse number, absent for markers.
    pub fn verse(&self) -> Option<u32> {
        return self.as_verse().map(|v| return v.verse);
    }

    /// Copy of this record with any range note dropped. Range notes depend
    /// on the expansion that produced a record, so comparisons across
    /// separately parsed records go through this.
    pub fn without_range_note(&self) -> Self {
        return match self {
            ParsedReference::Marker(m) => ParsedReference::Marker(m.clone()),
            ParsedReference::Verse(v) => ParsedReference::Verse(VerseRef {
                range_note: None,
                ..v.clone()
            }),
        };
    }
}

impl fmt::Display for ParsedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            ParsedReference::Marker(m) => f.write_str(&m.token),
            ParsedReference::Verse(v) => write!(f, "{v}"),
        };
    }
}

/// Flat nine-field view used for serialization. Downstream loaders expect
/// every field present, with `null` for absent values.
#[derive(serde::Serialize)]
struct FlatRecord<'a> {
    /// See [`ParsedReference::book`].
    book: Option<&'a str>,
    /// See [`ParsedReference::chapter`].
    chapter: Option<Chapter>,
    /// See [`ParsedReference::verse`].
    verse: Option<u32>,
    /// See [`ParsedReference::subverse`].
    subverse: Option<&'a str>,
    /// See [`ParsedReference::manuscript`].
    manuscript: Option<&'a str>,
    /// See [`ParsedReference::annotation`].
    annotation: Option<&'a str>,
    /// See [`ParsedReference::range_note`].
    range_note: Option<String>,
    /// See [`ParsedReference::special_marker`].
    special_marker: Option<&'a str>,
    /// See [`ParsedReference::marker_type`].
    marker_type: Option<&'static str>,
}

impl Serialize for ParsedReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let flat = FlatRecord {
            book: self.book(),
            chapter: self.chapter(),
            verse: self.verse(),
            subverse: self.subverse(),
            manuscript: self.manuscript(),
            annotation: self.annotation(),
            range_note: self.range_note(),
            special_marker: self.special_marker(),
            marker_type: self.marker_type(),
        };
        return flat.serialize(serializer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse(book: &str, chapter: Chapter, verse: u32) -> VerseRef {
        return VerseRef {
            annotation: None,
            book: book.to_string(),
            chapter,
            manuscript: None,
            range_note: None,
            subverse: None,
            verse,
        };
    }

    #[test]
    fn canonical_renders_title_verse() {
        let title = verse("Psa", Chapter::Number(3), 0);
        assert_eq!(title.canonical(), "Psa.3:title");
        assert!(title.is_title());
    }

    #[test]
    fn display_appends_manuscript_and_annotation() {
        let mut v = verse("Gen", Chapter::Number(1), 1);
        v.subverse = Some("a".to_string());
        v.manuscript = Some("LXX".to_string());
        v.annotation = Some("=Gen.1:2".to_string());
        assert_eq!(v.to_string(), "Gen.1:1.a(LXX)[=Gen.1:2]");
        assert_eq!(v.canonical(), "Gen.1:1.a");
    }

    #[test]
    fn letter_chapter_displays_as_letter() {
        let v = verse("Est", Chapter::Letter('C'), 4);
        assert_eq!(v.canonical(), "Est.C:4");
        assert_eq!(Chapter::Letter('C').letter(), Some('C'));
        assert_eq!(Chapter::Letter('C').number(), None);
    }

    #[test]
    fn range_note_wording() {
        let note = RangeNote {
            position: RangePosition::Start,
            range: "Gen.1:1-2:3".to_string(),
        };
        assert_eq!(note.to_string(), "Start of range Gen.1:1-2:3");
    }

    #[test]
    fn marker_accessors_hide_verse_fields() {
        let marker = ParsedReference::Marker(SpecialMarker::new("!LXX"));
        assert_eq!(marker.special_marker(), Some("!LXX"));
        assert_eq!(marker.marker_type(), Some("Septuagint reading"));
        assert_eq!(marker.book(), None);
        assert_eq!(marker.chapter(), None);
        assert_eq!(marker.verse(), None);
    }

    #[test]
    fn unknown_marker_kind() {
        assert_eq!(MarkerKind::of("!c"), MarkerKind::Unknown);
        assert_eq!(MarkerKind::of("!c").description(), "Unknown marker");
    }

    #[test]
    fn serializes_flat_record_with_nulls() {
        let record = ParsedReference::Verse(verse("Est", Chapter::Letter('A'), 2));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["book"], "Est");
        assert_eq!(json["chapter"], "A");
        assert_eq!(json["verse"], 2);
        assert!(json["special_marker"].is_null());
        assert!(json["range_note"].is_null());
    }
}
