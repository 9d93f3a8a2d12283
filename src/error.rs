/// Crate-level error types for reference parsing and configuration.
use std::path::PathBuf;

/// Every rejection names the text or file that caused it, so a caller that
/// skips a field can still log a useful reason.
#[allow(clippy::error_impl_error, reason = "crate-level error type")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A config alias points at a book code the registry does not know.
    #[error("alias `{alias}` targets unknown book `{target}`")]
    InvalidAlias {
        /// Alias spelling from the config.
        alias: String,
        /// Canonical code the alias was meant to resolve to.
        target: String,
    },

    /// A config book code is not shaped like a book code.
    #[error("invalid book code in config: `{code}`")]
    InvalidBookCode {
        /// Offending code.
        code: String,
    },

    /// Chapter is zero, out of range, or a letter the book does not use.
    #[error("invalid chapter `{chapter}` for {book}")]
    InvalidChapter {
        /// Book the chapter was applied to.
        book: String,
        /// Chapter text as written.
        chapter: String,
    },

    /// Verse is zero, out of range, or otherwise not a verse number.
    #[error("invalid verse `{verse}` in `{text}`")]
    InvalidVerse {
        /// Full reference text.
        text: String,
        /// Verse text as written.
        verse: String,
    },

    /// A referenced file or directory does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// A reference has no book prefix and no current book was supplied.
    #[error("no book in `{text}` and no current book")]
    MissingBook {
        /// Reference text.
        text: String,
    },

    /// A chapterless reference to a book with more than one chapter.
    #[error("missing chapter in `{text}`: {book} has more than one chapter")]
    MissingChapter {
        /// Book the reference resolved to.
        book: String,
        /// Reference text.
        text: String,
    },

    /// A same-chapter range expands to more verses than any chapter holds.
    #[error("range `{text}` spans {span} verses (max {max})")]
    RangeTooLong {
        /// Maximum expandable span.
        max: u32,
        /// Number of verses the range would expand to.
        span: u32,
        /// Range text.
        text: String,
    },

    /// The end of a range comes before its start.
    #[error("reversed range: `{text}`")]
    ReversedRange {
        /// Range text.
        text: String,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// Book code is neither canonical nor a known alias.
    #[error("unknown book: `{book}`")]
    UnknownBook {
        /// Book code as written.
        book: String,
    },

    /// Text matches none of the reference forms.
    #[error("unrecognized reference: `{text}`")]
    UnrecognizedReference {
        /// Reference text.
        text: String,
    },
}
