//! Core types shared by the registry, builders and host.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Title given to lessons that do not declare one.
pub const DEFAULT_TITLE: &str = "Untitled Lesson";
/// Icon given to lessons that do not declare one.
pub const DEFAULT_ICON: &str = "📘";
/// Category given to lessons that do not declare one.
pub const DEFAULT_CATEGORY: &str = "learn";
/// Sort key given to lessons that do not declare one, so they sort last.
pub const DEFAULT_ORDER: i64 = 999;

/// Lesson metadata as written in a lesson file; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonMeta {
    pub id: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
    pub order: Option<i64>,
}

impl LessonMeta {
    /// Apply defaults, using `fallback_id` (the file stem) when no id is set.
    pub fn normalize(self, fallback_id: &str) -> LessonDescriptor {
        LessonDescriptor {
            id: non_empty(self.id).unwrap_or_else(|| fallback_id.to_string()),
            title: non_empty(self.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            subtitle: self.subtitle.unwrap_or_default(),
            icon: non_empty(self.icon).unwrap_or_else(|| DEFAULT_ICON.to_string()),
            category: non_empty(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            order: self.order.unwrap_or(DEFAULT_ORDER),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Normalized metadata identifying one lesson in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonDescriptor {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub icon: String,
    pub category: String,
    pub order: i64,
}

/// Gems and XP granted by a completed lesson.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub gems: u64,
    pub xp: u64,
}

impl Reward {
    pub fn new(gems: u64, xp: u64) -> Self {
        Self { gems, xp }
    }
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warn,
    Error,
}

impl Default for Severity {
    fn default() -> Self {
        Self::Info
    }
}

/// Theme choice stored in the profile settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    Light,
    Dark,
}

impl Default for ThemeName {
    fn default() -> Self {
        Self::Light
    }
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Matching mode for typed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    Exact,
    CaseInsensitive,
    Fuzzy,
}

impl Default for MatchingMode {
    fn default() -> Self {
        Self::CaseInsensitive
    }
}

impl MatchingMode {
    /// Parse from an option value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "exact" => Some(Self::Exact),
            "case_insensitive" => Some(Self::CaseInsensitive),
            "fuzzy" => Some(Self::Fuzzy),
            _ => None,
        }
    }
}

/// One exercise parsed from a lesson body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub question: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    pub line_number: usize,
}

/// A parsed lesson file, before shape validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonSource {
    /// `None` when the file has no metadata header at all.
    pub meta: Option<LessonMeta>,
    /// Name of the builder capability the lesson asks for.
    pub builder: Option<String>,
    /// Header keys that are not descriptor fields, for the builder to read.
    pub options: BTreeMap<String, String>,
    pub items: Vec<LessonItem>,
}

impl LessonSource {
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_applies_all_defaults() {
        let descriptor = LessonMeta::default().normalize("x01_untitled");
        assert_eq!(
            descriptor,
            LessonDescriptor {
                id: "x01_untitled".to_string(),
                title: DEFAULT_TITLE.to_string(),
                subtitle: String::new(),
                icon: DEFAULT_ICON.to_string(),
                category: "learn".to_string(),
                order: 999,
            }
        );
    }

    #[test]
    fn normalize_keeps_declared_fields() {
        let meta = LessonMeta {
            id: Some("p01".to_string()),
            title: Some("Speed review".to_string()),
            subtitle: Some("Quick-fire practice".to_string()),
            icon: Some("⚡".to_string()),
            category: Some("practice".to_string()),
            order: Some(1),
        };
        let descriptor = meta.normalize("ignored");
        assert_eq!(descriptor.id, "p01");
        assert_eq!(descriptor.category, "practice");
        assert_eq!(descriptor.order, 1);
    }

    #[test]
    fn blank_id_falls_back_to_stem() {
        let meta = LessonMeta {
            id: Some("  ".to_string()),
            ..LessonMeta::default()
        };
        assert_eq!(meta.normalize("stem").id, "stem");
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let meta = LessonMeta {
            id: Some(String::new()),
            title: Some(" ".to_string()),
            subtitle: Some(String::new()),
            icon: Some("\t".to_string()),
            category: Some(String::new()),
            order: None,
        };
        let descriptor = meta.normalize("l07_blank");
        assert_eq!(descriptor.id, "l07_blank");
        assert_eq!(descriptor.title, DEFAULT_TITLE);
        assert_eq!(descriptor.subtitle, "");
        assert_eq!(descriptor.icon, DEFAULT_ICON);
        assert_eq!(descriptor.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn theme_toggles() {
        assert_eq!(ThemeName::Light.toggled(), ThemeName::Dark);
        assert_eq!(ThemeName::Dark.toggled().as_str(), "light");
    }
}
