use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;
use crate::error::Error;
use crate::parser::{ReferenceParser, trailing_book};
use crate::types::ParsedReference;

/// Extension of reference list files picked up when walking a directory.
const LIST_EXTENSION: &str = "txt";

/// A reference field that did not parse.
#[derive(Debug)]
pub struct Rejection {
    /// Book context the field was parsed with.
    pub current_book: Option<String>,
    /// Reference list containing the field.
    pub file: PathBuf,
    /// One-based line number.
    pub line: u32,
    /// Why the field was rejected.
    pub reason: Error,
    /// The field as written.
    pub text: String,
}

/// Outcome of scanning one or more reference lists.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Number of fields that produced at least one record.
    pub accepted: usize,
    /// Number of files scanned.
    pub files: usize,
    /// Number of records produced across all accepted fields.
    pub records: usize,
    /// Fields that produced nothing, in file and line order.
    pub rejections: Vec<Rejection>,
}

impl ScanReport {
    /// Whether every field parsed.
    pub fn is_clean(&self) -> bool {
        return self.rejections.is_empty();
    }

    /// Fold another report into this one.
    fn merge(&mut self, other: Self) {
        self.accepted = self.accepted.saturating_add(other.accepted);
        self.files = self.files.saturating_add(other.files);
        self.records = self.records.saturating_add(other.records);
        self.rejections.extend(other.rejections);
    }
}

/// Scan reference lists under each path. Directories are walked for `.txt`
/// files, filtered by the config's include/exclude prefixes relative to
/// `root`; files named directly are always scanned.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if a path does not exist, or `Error::Io`
/// if a file cannot be read.
pub fn scan(
    root: &Path,
    paths: &[PathBuf],
    config: &Config,
    parser: &ReferenceParser,
) -> Result<ScanReport, Error> {
    let mut report = ScanReport::default();

    for path in paths {
        if path.is_file() {
            report.merge(scan_file(path, parser)?);
            continue;
        }
        if !path.is_dir() {
            return Err(Error::FileNotFound { path: path.clone() });
        }

        let mut lists: Vec<PathBuf> = WalkDir::new(path)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| return e.file_type().is_file())
            .filter(|e| return e.path().extension().is_some_and(|ext| return ext == LIST_EXTENSION))
            .map(walkdir::DirEntry::into_path)
            .collect();
        lists.sort();

        for list in lists {
            let relative = list.strip_prefix(root).unwrap_or(&list);
            if !config.should_scan(&relative.to_string_lossy()) {
                log::debug!("skipping {} (excluded by config)", list.display());
                continue;
            }
            report.merge(scan_file(&list, parser)?);
        }
    }

    return Ok(report);
}

/// Scan one reference list.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read.
pub fn scan_file(path: &Path, parser: &ReferenceParser) -> Result<ScanReport, Error> {
    log::info!("scanning {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let mut report = scan_content(&content, path, parser);
    report.files = 1;
    return Ok(report);
}

/// Parse every field in a reference list, carrying the book of each parsed
/// field forward as the context for the next.
pub fn scan_content(content: &str, source: &Path, parser: &ReferenceParser) -> ScanReport {
    let mut report = ScanReport::default();
    let mut current_book: Option<String> = None;

    for (index, raw) in content.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let line = u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1);

        match parser.try_parse(text, current_book.as_deref()) {
            Ok(refs) => {
                report.accepted = report.accepted.saturating_add(1);
                report.records = report.records.saturating_add(refs.len());
                carry_book_forward(&refs, &mut current_book);
            },
            Err(reason) => {
                log::debug!("{}:{line}: {reason}", source.display());
                report.rejections.push(Rejection {
                    current_book: current_book.clone(),
                    file: source.to_path_buf(),
                    line,
                    reason,
                    text: text.to_string(),
                });
            },
        }
    }

    return report;
}

/// Replace the current book with the book of the last verse record, if any.
/// Marker-only fields leave the context unchanged.
fn carry_book_forward(refs: &[ParsedReference], current_book: &mut Option<String>) {
    if let Some(book) = trailing_book(refs) {
        *current_book = Some(book.to_string());
    }
}
