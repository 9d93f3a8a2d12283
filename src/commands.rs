use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tvtms::config::Config;
use tvtms::diagnostics;
use tvtms::error::Error;
use tvtms::normalize::{normalize_category, normalize_mapping_type};
use tvtms::parser::{ReferenceParser, trailing_book};
use tvtms::scanner;
use tvtms::types::ParsedReference;

/// Build a parser from the config in `root`.
///
/// # Errors
///
/// Returns config loading or registry errors.
fn load_parser(root: &Path) -> Result<(Config, ReferenceParser), Error> {
    let config = Config::load(root)?;
    let parser = ReferenceParser::new(config.book_registry()?);
    return Ok((config, parser));
}

/// Parse each reference argument in order, threading the current book from
/// one argument to the next. Exit 1 if any argument was rejected.
///
/// # Errors
///
/// Returns config errors; rejected references are reported, not raised.
pub fn cmd_parse(refs: &[String], book: Option<&str>, json: bool) -> Result<ExitCode, Error> {
    let (_, parser) = load_parser(Path::new("."))?;
    let mut current_book = book.map(str::to_string);
    let mut all = Vec::new();
    let mut rejected = 0u32;

    for text in refs {
        match parser.try_parse(text, current_book.as_deref()) {
            Ok(parsed) => {
                if let Some(next) = trailing_book(&parsed) {
                    current_book = Some(next.to_string());
                }
                all.extend(parsed);
            },
            Err(e) => {
                rejected = rejected.saturating_add(1);
                eprintln!("REJECTED {text}  ({e})");
            },
        }
    }

    if json {
        // Flat records of strings and numbers always serialize.
        let out = serde_json::to_string_pretty(&all).unwrap_or_default();
        println!("{out}");
    } else {
        for record in &all {
            println!("{}", describe(record));
        }
    }

    if rejected > 0 {
        return Ok(ExitCode::from(1));
    }
    return Ok(ExitCode::SUCCESS);
}

/// Canonical text plus any marker classification or range note.
fn describe(record: &ParsedReference) -> String {
    if let Some(kind) = record.marker_type() {
        return format!("{record}  ({kind})");
    }
    return match record.range_note() {
        Some(note) => format!("{record}  ({note})"),
        None => record.to_string(),
    };
}

/// Scan reference lists and report every field that did not parse.
///
/// # Errors
///
/// Returns config, missing-path, or I/O errors.
pub fn cmd_check(paths: &[PathBuf]) -> Result<ExitCode, Error> {
    let root = PathBuf::from(".");
    let (config, parser) = load_parser(&root)?;
    let targets = if paths.is_empty() { vec![root.clone()] } else { paths.to_vec() };

    let report = scanner::scan(&root, &targets, &config, &parser)?;
    for rejection in &report.rejections {
        println!("{}", diagnostics::render_rejection(rejection));
    }

    let rejected = report.rejections.len();
    if !report.is_clean() {
        println!();
        println!(
            "{rejected} rejected, {} parsed ({} records) in {} files",
            report.accepted, report.records, report.files
        );
        return Ok(ExitCode::from(1));
    }

    println!(
        "All {} fields parsed ({} records) in {} files",
        report.accepted, report.records, report.files
    );
    return Ok(ExitCode::SUCCESS);
}

/// Print the normalized mapping type of a label.
pub fn cmd_mapping_type(raw: &str) {
    println!("{}", normalize_mapping_type(raw));
}

/// Print the normalized category of a label, `none` if unclassified.
pub fn cmd_category(raw: &str) {
    match normalize_category(raw) {
        Some(category) => println!("{category}"),
        None => println!("none"),
    }
}
