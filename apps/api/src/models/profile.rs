//! The structured profile extracted from a resume.
//!
//! Every field is always present when serialized: strings default to `""` and
//! sequences to `[]`. Model output is never trusted as-is; it goes through
//! `Profile::from_model_value`, which coerces each key to its declared type.

use serde::Serialize;
use serde_json::{Map, Value};

/// Keys in the order they appear in the prompt schema and the JSON response.
#[cfg(test)]
pub const PROFILE_KEYS: [&str; 10] = [
    "full_name",
    "email",
    "phone_number",
    "skills",
    "education",
    "experience",
    "projects",
    "certifications",
    "achievements",
    "areas_of_interest",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Profile {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub skills: Vec<String>,
    /// Unstructured mappings: institution, degree, duration, ...
    pub education: Vec<Map<String, Value>>,
    /// Unstructured mappings: company, role, duration, description.
    pub experience: Vec<Map<String, Value>>,
    pub projects: Vec<Map<String, Value>>,
    /// Strings or objects, as the model produced them.
    pub certifications: Vec<Value>,
    pub achievements: Vec<String>,
    pub areas_of_interest: Vec<String>,
}

/// Which path produced a profile. Not part of the JSON response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSource {
    Model,
    Fallback,
}

/// Error returned when the model output is not a JSON object at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotAnObject;

impl Profile {
    /// Validates parsed model output against the schema.
    ///
    /// Missing, null, or mistyped keys become empty defaults; unknown keys are dropped.
    pub fn from_model_value(value: Value) -> Result<Self, NotAnObject> {
        let Value::Object(mut obj) = value else {
            return Err(NotAnObject);
        };

        Ok(Profile {
            full_name: coerce_string(obj.remove("full_name")),
            email: coerce_string(obj.remove("email")),
            phone_number: coerce_string(obj.remove("phone_number")),
            skills: coerce_string_seq(obj.remove("skills")),
            education: coerce_object_seq(obj.remove("education")),
            experience: coerce_object_seq(obj.remove("experience")),
            projects: coerce_object_seq(obj.remove("projects")),
            certifications: coerce_mixed_seq(obj.remove("certifications")),
            achievements: coerce_string_seq(obj.remove("achievements")),
            areas_of_interest: coerce_string_seq(obj.remove("areas_of_interest")),
        })
    }

    /// Number of fields holding a non-empty value.
    pub fn filled_count(&self) -> usize {
        [
            !self.full_name.is_empty(),
            !self.email.is_empty(),
            !self.phone_number.is_empty(),
            !self.skills.is_empty(),
            !self.education.is_empty(),
            !self.experience.is_empty(),
            !self.projects.is_empty(),
            !self.certifications.is_empty(),
            !self.achievements.is_empty(),
            !self.areas_of_interest.is_empty(),
        ]
        .iter()
        .filter(|filled| **filled)
        .count()
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_string(value: Option<Value>) -> String {
    match value {
        // Phone numbers frequently come back as bare numbers.
        Some(v @ (Value::String(_) | Value::Number(_))) => {
            scalar_to_string(&v).unwrap_or_default()
        }
        _ => String::new(),
    }
}

fn coerce_string_seq(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(scalar_to_string)
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn coerce_object_seq(value: Option<Value>) -> Vec<Map<String, Value>> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                Value::String(s) if !s.trim().is_empty() => {
                    let mut map = Map::new();
                    map.insert("description".to_string(), Value::String(s.trim().to_string()));
                    Some(map)
                }
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn coerce_mixed_seq(value: Option<Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter(|item| match item {
                Value::String(s) => !s.trim().is_empty(),
                Value::Object(_) => true,
                _ => false,
            })
            .collect(),
        _ => Vec::new(),
    }
}
