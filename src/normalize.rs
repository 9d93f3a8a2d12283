//! Normalization of the free-text mapping-type and category labels found in
//! TVTMS rows into closed enums.

use std::fmt;

use serde::Serialize;

/// How a source verse maps onto a target tradition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingType {
    /// Extra verse present in the target tradition.
    Insert,
    /// Verse merged into the following one.
    MergeNext,
    /// Verse merged into the preceding one.
    MergePrev,
    /// Verse left empty in the target tradition.
    Omit,
    /// Same content under a different number.
    Renumbering,
    /// Verse split into parts.
    Split,
    /// Identical numbering in both traditions.
    Standard,
}

/// Importance class of a mapping row. An unclassified row is `None` at the
/// call site rather than a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    /// Of interest to academic users only.
    Acd,
    /// Informational; no change to verse content.
    Inf,
    /// Must be applied for the target text to be correct.
    Nec,
    /// May be applied at the publisher's discretion.
    Opt,
}

/// Substring keywords in priority order, checked against the lowercased label.
/// The merge rules are handled first because they need two keywords.
const MAPPING_KEYWORDS: &[(&str, MappingType)] = &[
    ("ifempty", MappingType::Omit),
    ("subdivided", MappingType::Split),
    ("longverse", MappingType::Insert),
    ("renumber", MappingType::Renumbering),
    ("keep", MappingType::Standard),
    ("standard", MappingType::Standard),
    ("identical", MappingType::Standard),
];

/// Three-letter prefixes and the categories they select.
const CATEGORY_PREFIXES: &[(&str, Category)] = &[
    ("Opt", Category::Opt),
    ("Nec", Category::Nec),
    ("Acd", Category::Acd),
    ("Inf", Category::Inf),
];

impl MappingType {
    /// Stable snake_case name, as stored by the loader.
    pub const fn as_str(self) -> &'static str {
        return match self {
            MappingType::Insert => "insert",
            MappingType::MergeNext => "merge_next",
            MappingType::MergePrev => "merge_prev",
            MappingType::Omit => "omit",
            MappingType::Renumbering => "renumbering",
            MappingType::Split => "split",
            MappingType::Standard => "standard",
        };
    }
}

impl fmt::Display for MappingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(self.as_str());
    }
}

impl Category {
    /// Three-letter code, as stored by the loader.
    pub const fn as_str(self) -> &'static str {
        return match self {
            Category::Acd => "Acd",
            Category::Inf => "Inf",
            Category::Nec => "Nec",
            Category::Opt => "Opt",
        };
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(self.as_str());
    }
}

/// Map a free-text mapping label to a [`MappingType`].
///
/// Case-insensitive keyword match; unrecognized and empty labels are
/// `Standard`.
pub fn normalize_mapping_type(raw: &str) -> MappingType {
    let label = raw.to_lowercase();

    if label.contains("merge") {
        if label.contains("prev") {
            return MappingType::MergePrev;
        }
        if label.contains("next") {
            return MappingType::MergeNext;
        }
    }

    return MAPPING_KEYWORDS
        .iter()
        .find(|(keyword, _)| return label.contains(*keyword))
        .map_or(MappingType::Standard, |&(_, mapping)| return mapping);
}

/// Map a free-text category label to a [`Category`].
///
/// The label is trimmed and a trailing period dropped, then its first three
/// characters are matched case-sensitively. Anything else is `None`.
pub fn normalize_category(raw: &str) -> Option<Category> {
    let label = raw.trim();
    let label = label.strip_suffix('.').unwrap_or(label);

    return CATEGORY_PREFIXES
        .iter()
        .find(|(prefix, _)| return label.starts_with(*prefix))
        .map(|&(_, category)| return category);
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("MergedPrev verse", MappingType::MergePrev)]
    #[case("MergedNext verse", MappingType::MergeNext)]
    #[case("merge with prev and next", MappingType::MergePrev)]
    #[case("IfEmpty", MappingType::Omit)]
    #[case("Subdivided", MappingType::Split)]
    #[case("LongVerse", MappingType::Insert)]
    #[case("Renumber verse", MappingType::Renumbering)]
    #[case("Renumbered", MappingType::Renumbering)]
    #[case("Keep verse", MappingType::Standard)]
    #[case("Identical", MappingType::Standard)]
    #[case("", MappingType::Standard)]
    #[case("invalid", MappingType::Standard)]
    fn mapping_type_keywords(#[case] raw: &str, #[case] expected: MappingType) {
        assert_eq!(normalize_mapping_type(raw), expected);
    }

    #[test]
    fn merge_without_direction_falls_through() {
        assert_eq!(normalize_mapping_type("merged"), MappingType::Standard);
        assert_eq!(normalize_mapping_type("merged, renumber"), MappingType::Renumbering);
    }

    #[rstest]
    #[case("Opt", Some(Category::Opt))]
    #[case("Optional", Some(Category::Opt))]
    #[case("Nec.", Some(Category::Nec))]
    #[case("Necessary", Some(Category::Nec))]
    #[case(" Acd ", Some(Category::Acd))]
    #[case("Academic", Some(Category::Acd))]
    #[case("Inf", Some(Category::Inf))]
    #[case("Information.", Some(Category::Inf))]
    #[case("", None)]
    #[case("Invalid", None)]
    #[case("opt", None)]
    fn category_prefixes(#[case] raw: &str, #[case] expected: Option<Category>) {
        assert_eq!(normalize_category(raw), expected);
    }

    #[test]
    fn serialized_names() {
        assert_eq!(serde_json::to_string(&MappingType::MergePrev).unwrap(), "\"merge_prev\"");
        assert_eq!(MappingType::MergeNext.to_string(), "merge_next");
        assert_eq!(serde_json::to_string(&Category::Nec).unwrap(), "\"Nec\"");
    }
}
