//! Parser for the cross-tradition Bible references used in the STEPBible
//! TVTMS versification tables, plus the label normalizers used when building
//! mapping rows.
//!
//! ```text
//! Gen.1:1-3        -> Gen 1:1, 1:2, 1:3  (Part of range Gen.1:1-3)
//! Gen.1:31-2:1     -> Gen 1:31 (Start …), Gen 2:1 (End …)
//! 2:3 with "Gen"   -> Gen 2:3
//! !LXX             -> marker, "Septuagint reading"
//! ```

pub mod books;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod scanner;
pub mod types;

pub use error::Error;
pub use normalize::{Category, MappingType, normalize_category, normalize_mapping_type};
pub use parser::{ReferenceParser, parse_reference, trailing_book};
pub use types::{Chapter, ParsedReference, VerseRef};
