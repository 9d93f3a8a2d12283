use std::collections::BTreeMap;
use std::path::Path;

use crate::books::{BookRegistry, ChapterShape};
use crate::error::Error;

/// Name of the optional project config file.
pub const CONFIG_FILE: &str = ".tvtms.toml";

/// Project configuration loaded from `.tvtms.toml`.
/// Include/exclude patterns are path prefixes applied to reference lists.
#[derive(Debug, Default)]
pub struct Config {
    /// Alias spelling to canonical code.
    pub aliases: BTreeMap<String, String>,
    /// Prefixes never scanned.
    exclude: Vec<String>,
    /// Additional canonical codes.
    pub extra_books: Vec<String>,
    /// Prefixes to scan; empty means everything.
    include: Vec<String>,
    /// Codes, new or built-in, that take chapterless references.
    pub single_chapter_books: Vec<String>,
}

/// Raw TOML structure for `.tvtms.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct TvtmsTomlConfig {
    /// See [`Config::aliases`].
    #[serde(default)]
    aliases: BTreeMap<String, String>,
    /// See [`Config::exclude`].
    #[serde(default)]
    exclude: Vec<String>,
    /// See [`Config::extra_books`].
    #[serde(default)]
    extra_books: Vec<String>,
    /// See [`Config::include`].
    #[serde(default)]
    include: Vec<String>,
    /// See [`Config::single_chapter_books`].
    #[serde(default)]
    single_chapter_books: Vec<String>,
}

impl Config {
    /// Build the book registry: the built-in table extended by this config.
    /// Books are added before aliases so an alias may target an extra book.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBookCode` for malformed codes or aliases, or
    /// `Error::InvalidAlias` for an alias whose target is unknown.
    pub fn book_registry(&self) -> Result<BookRegistry, Error> {
        let mut registry = BookRegistry::default();
        for code in &self.extra_books {
            registry.add_book(code, ChapterShape::Numbered)?;
        }
        for code in &self.single_chapter_books {
            registry.add_book(code, ChapterShape::Single)?;
        }
        for (alias, target) in &self.aliases {
            registry.add_alias(alias, target)?;
        }
        return Ok(registry);
    }

    /// Load config from `.tvtms.toml` in the given root directory.
    /// Returns a default that scans everything if the file doesn't exist.
    /// Returns an error if the file exists but is malformed; a config the
    /// user wrote is never silently replaced by defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };
        return Self::parse(&content);
    }

    /// Parse config from TOML content.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: TvtmsTomlConfig = toml::from_str(content)?;
        return Ok(Self {
            aliases: raw.aliases,
            exclude: raw.exclude,
            extra_books: raw.extra_books,
            include: raw.include,
            single_chapter_books: raw.single_chapter_books,
        });
    }

    /// Check whether a reference list path should be scanned.
    ///
    /// A path is included if no include patterns are set (scan everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| return relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        return !self.exclude.iter().any(|p| return relative_path.starts_with(p.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_scans_everything() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert!(config.should_scan("anything/refs.txt"));
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "include = [").unwrap();
        assert!(matches!(Config::load(dir.path()), Err(Error::TomlDe(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(Config::parse("inclde = []"), Err(Error::TomlDe(_))));
    }

    #[test]
    fn include_and_exclude_prefixes() {
        let config = Config::parse(
            r#"
include = ["data/"]
exclude = ["data/archive/"]
"#,
        )
        .unwrap();
        assert!(config.should_scan("data/psalms.txt"));
        assert!(!config.should_scan("data/archive/old.txt"));
        assert!(!config.should_scan("notes/todo.txt"));
    }

    #[test]
    fn registry_includes_extra_books_and_aliases() {
        let config = Config::parse(
            r#"
extra_books = ["Eno"]
single_chapter_books = ["Jub"]

[aliases]
Enoch = "Eno"
Psalm = "Psa"
"#,
        )
        .unwrap();
        let registry = config.book_registry().unwrap();
        assert_eq!(registry.lookup("Enoch").unwrap().code, "Eno");
        assert_eq!(registry.lookup("Psalm").unwrap().code, "Psa");
        assert_eq!(registry.lookup("Jub").unwrap().shape, ChapterShape::Single);
    }

    #[test]
    fn alias_to_unknown_book_fails_registry_build() {
        let config = Config::parse("[aliases]\nFoo = \"Bar\"\n").unwrap();
        assert!(matches!(config.book_registry(), Err(Error::InvalidAlias { .. })));
    }
}
