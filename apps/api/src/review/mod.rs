//! Review form: turns a `Profile` into read-only display fields with a status badge.
//!
//! Object entries (education, experience, projects) are flattened by taking,
//! for each group of synonymous keys, the first present value, and joining
//! the parts with `" - "`. Entries are separated by a blank line; primitive
//! lists are one item per line.

use serde_json::{Map, Value};

use crate::models::profile::{Profile, ProfileSource};

pub mod handlers;
pub mod render;

/// Synonym groups, in display order. The first key present in a group wins.
const FIELD_GROUPS: &[&[&str]] = &[
    &["institution", "school", "university"],
    &["degree", "course"],
    &["duration", "dates", "time_period"],
    &["company", "organization"],
    &["position", "role", "title"],
    &["description", "details"],
    &["name", "project_name"],
];

const PART_SEPARATOR: &str = " - ";
const ENTRY_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    /// Non-empty, produced by the language model.
    AutoFilled,
    /// Non-empty, produced by the regex fallback.
    Filled,
    NeedsReview,
}

impl FieldStatus {
    fn of(value: &str, source: ProfileSource) -> Self {
        match (value.is_empty(), source) {
            (true, _) => FieldStatus::NeedsReview,
            (false, ProfileSource::Model) => FieldStatus::AutoFilled,
            (false, ProfileSource::Fallback) => FieldStatus::Filled,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldStatus::AutoFilled => "Auto-filled",
            FieldStatus::Filled => "Filled",
            FieldStatus::NeedsReview => "Needs review",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            FieldStatus::AutoFilled => "auto",
            FieldStatus::Filled => "filled",
            FieldStatus::NeedsReview => "review",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewField {
    pub label: &'static str,
    pub value: String,
    /// Rendered as a textarea rather than a single-line input.
    pub multiline: bool,
    pub status: FieldStatus,
}

#[derive(Debug, Clone)]
pub struct ReviewForm {
    pub fields: Vec<ReviewField>,
    pub source: ProfileSource,
}

impl ReviewForm {
    pub fn from_profile(profile: &Profile, source: ProfileSource) -> Self {
        let field = |label: &'static str, value: String, multiline: bool| ReviewField {
            label,
            status: FieldStatus::of(&value, source),
            value,
            multiline,
        };

        let fields = vec![
            field("Full Name", profile.full_name.clone(), false),
            field("Email", profile.email.clone(), false),
            field("Phone", profile.phone_number.clone(), false),
            field("Areas of Interest", profile.areas_of_interest.join("\n"), true),
            field("Skills", profile.skills.join("\n"), true),
            field("Education", display_objects(&profile.education), true),
            field("Experience", display_objects(&profile.experience), true),
            field("Projects", display_objects(&profile.projects), true),
            field("Certifications", display_mixed(&profile.certifications), true),
            field("Achievements", profile.achievements.join("\n"), true),
        ];

        Self { fields, source }
    }

    pub fn needs_review_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| f.status == FieldStatus::NeedsReview)
            .count()
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Flattens one object entry; empty when no known key is present.
pub fn flatten_entry(entry: &Map<String, Value>) -> String {
    FIELD_GROUPS
        .iter()
        .filter_map(|group| group.iter().find_map(|key| entry.get(*key).and_then(value_text)))
        .collect::<Vec<_>>()
        .join(PART_SEPARATOR)
}

fn display_objects(entries: &[Map<String, Value>]) -> String {
    entries
        .iter()
        .map(flatten_entry)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(ENTRY_SEPARATOR)
}

fn display_mixed(items: &[Value]) -> String {
    let has_objects = items.iter().any(Value::is_object);
    let parts: Vec<String> = items
        .iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(flatten_entry(map)),
            other => value_text(other),
        })
        .filter(|s| !s.is_empty())
        .collect();
    parts.join(if has_objects { ENTRY_SEPARATOR } else { "\n" })
}
