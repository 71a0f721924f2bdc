//! Persisted user profile.

use crate::types::{Reward, ThemeName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Completion history for one lesson.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Completion {
    pub times: u32,
    /// Unix timestamp, seconds.
    pub last_completed: i64,
}

impl Completion {
    pub fn last_completed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.last_completed, 0)
    }
}

/// User settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeName,
}

/// Everything saved between runs.
///
/// Deserialization merges over defaults one top-level key at a time; keys this
/// version does not know are kept in `extra` and written back on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub gems: u64,
    pub xp: u64,
    pub owned_items: Vec<String>,
    pub completed_lessons: BTreeMap<String, Completion>,
    pub settings: Settings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Parse a profile document. Anything but a well-typed JSON object is an error.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str::<Value>(content)? {
            value @ Value::Object(_) => serde_json::from_value(value),
            other => Err(serde::de::Error::invalid_type(
                serde::de::Unexpected::Other(json_kind(&other)),
                &"a JSON object",
            )),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Count one completion of `lesson_id` at `now` and add the reward.
    pub fn record_completion(&mut self, lesson_id: &str, reward: Reward, now: i64) -> Completion {
        let completion = self
            .completed_lessons
            .entry(lesson_id.to_string())
            .or_default();
        completion.times = completion.times.saturating_add(1);
        completion.last_completed = now;
        let completion = *completion;

        self.gems = self.gems.saturating_add(reward.gems);
        self.xp = self.xp.saturating_add(reward.xp);
        completion
    }

    pub fn completion(&self, lesson_id: &str) -> Option<&Completion> {
        self.completed_lessons.get(lesson_id)
    }

    pub fn has_item(&self, item_id: &str) -> bool {
        self.owned_items.iter().any(|i| i == item_id)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_document_merges_over_defaults() {
        let profile = Profile::from_json(r#"{"gems": 5}"#).unwrap();
        assert_eq!(profile.gems, 5);
        assert_eq!(profile.xp, 0);
        assert!(profile.owned_items.is_empty());
        assert!(profile.completed_lessons.is_empty());
        assert_eq!(profile.settings.theme, ThemeName::Light);
    }

    #[test]
    fn settings_theme_defaults_individually() {
        let profile = Profile::from_json(r#"{"settings": {}}"#).unwrap();
        assert_eq!(profile.settings.theme, ThemeName::Light);

        let profile = Profile::from_json(r#"{"settings": {"theme": "dark"}}"#).unwrap();
        assert_eq!(profile.settings.theme, ThemeName::Dark);
    }

    #[test]
    fn malformed_documents_are_errors() {
        assert!(Profile::from_json("{not json").is_err());
        assert!(Profile::from_json("[1, 2]").is_err());
        assert!(Profile::from_json("null").is_err());
        assert!(Profile::from_json(r#"{"gems": "many"}"#).is_err());
    }

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let profile = Profile::from_json(r#"{"gems": 1, "streak": 4}"#).unwrap();
        let saved: Value = serde_json::from_str(&profile.to_json().unwrap()).unwrap();
        assert_eq!(saved["streak"], 4);
        assert_eq!(saved["settings"]["theme"], "light");
    }

    #[test]
    fn completing_twice_accumulates() {
        let mut profile = Profile::default();
        profile.record_completion("l01", Reward::new(10, 5), 100);
        let completion = profile.record_completion("l01", Reward::new(10, 5), 200);

        assert_eq!(profile.gems, 20);
        assert_eq!(profile.xp, 10);
        assert_eq!(completion, Completion { times: 2, last_completed: 200 });
        assert_eq!(profile.completion("l01").map(|c| c.times), Some(2));
        assert_eq!(
            completion.last_completed_at().map(|t| t.timestamp()),
            Some(200)
        );
    }

    #[test]
    fn totals_near_the_limit_saturate() {
        let mut profile = Profile::from_json(r#"{"gems": 18446744073709551610, "xp": 3}"#).unwrap();
        profile.completed_lessons.insert(
            "l01".to_string(),
            Completion { times: u32::MAX, last_completed: 0 },
        );
        let completion = profile.record_completion("l01", Reward::new(100, u64::MAX), 5);

        assert_eq!(profile.gems, u64::MAX);
        assert_eq!(profile.xp, u64::MAX);
        assert_eq!(completion.times, u32::MAX);
    }
}
