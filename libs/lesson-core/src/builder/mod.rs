//! Builder capabilities that turn a lesson file into an interactive view.
//!
//! Lesson files are data. The only code a lesson can reach is a builder
//! registered here, selected by the `builder:` key of its header.

pub mod choice;
pub mod pairs;
pub mod typed;

use crate::error::BuildError;
use crate::host::LessonHost;
use crate::types::{LessonDescriptor, LessonSource, Reward};
use crate::view::{LessonView, Surface};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A capability that constructs lesson views.
pub trait LessonBuilder: Send + Sync {
    /// Name lesson files use to select this builder.
    fn name(&self) -> &'static str;

    /// Construct a view for `descriptor` from the parsed lesson file.
    fn build(
        &self,
        surface: &Surface,
        host: &dyn LessonHost,
        descriptor: &LessonDescriptor,
        source: &LessonSource,
    ) -> Result<Box<dyn LessonView>, BuildError>;
}

/// Statically linked set of builders, keyed by name.
#[derive(Clone)]
pub struct BuilderRegistry {
    builders: BTreeMap<&'static str, Arc<dyn LessonBuilder>>,
}

impl BuilderRegistry {
    /// Registry without any builders.
    pub fn empty() -> Self {
        Self {
            builders: BTreeMap::new(),
        }
    }

    /// Registry with the built-in `choice`, `match` and `typed` builders.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(choice::ChoiceBuilder));
        registry.register(Arc::new(pairs::PairsBuilder));
        registry.register(Arc::new(typed::TypedBuilder));
        registry
    }

    /// Add a builder, replacing any with the same name.
    pub fn register(&mut self, builder: Arc<dyn LessonBuilder>) {
        self.builders.insert(builder.name(), builder);
    }

    /// Get builder by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn LessonBuilder>> {
        self.builders.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.builders.keys().copied()
    }
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for BuilderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// A builder paired with the lesson file it was discovered with.
#[derive(Clone)]
pub struct BoundBuilder {
    builder: Arc<dyn LessonBuilder>,
    source: Arc<LessonSource>,
}

impl BoundBuilder {
    pub fn new(builder: Arc<dyn LessonBuilder>, source: LessonSource) -> Self {
        Self {
            builder,
            source: Arc::new(source),
        }
    }

    pub fn name(&self) -> &'static str {
        self.builder.name()
    }

    pub fn source(&self) -> &LessonSource {
        &self.source
    }

    /// Build a fresh view. Each call starts the lesson over.
    pub fn build(
        &self,
        surface: &Surface,
        host: &dyn LessonHost,
        descriptor: &LessonDescriptor,
    ) -> Result<Box<dyn LessonView>, BuildError> {
        self.builder.build(surface, host, descriptor, &self.source)
    }
}

impl fmt::Debug for BoundBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundBuilder")
            .field("builder", &self.builder.name())
            .field("items", &self.source.items.len())
            .finish()
    }
}

/// Read a typed option from the lesson header, falling back to `default`.
pub(crate) fn option_or<T: FromStr>(source: &LessonSource, key: &str, default: T) -> Result<T, BuildError> {
    match source.option(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| BuildError::InvalidOption {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Reward rules shared by all built-in builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoring {
    pub base: Reward,
    pub per_point: Reward,
    pub message: String,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            base: Reward::new(15, 10),
            per_point: Reward::default(),
            message: "Lesson completed!".to_string(),
        }
    }
}

impl Scoring {
    /// Read `gems`, `gems_per_point`, `xp`, `xp_per_point` and `message`.
    pub fn from_source(source: &LessonSource) -> Result<Self, BuildError> {
        let defaults = Self::default();
        Ok(Self {
            base: Reward::new(
                option_or(source, "gems", defaults.base.gems)?,
                option_or(source, "xp", defaults.base.xp)?,
            ),
            per_point: Reward::new(
                option_or(source, "gems_per_point", 0)?,
                option_or(source, "xp_per_point", 0)?,
            ),
            message: source
                .option("message")
                .map(str::to_string)
                .unwrap_or(defaults.message),
        })
    }

    pub fn reward(&self, score: usize) -> Reward {
        let score = score as u64;
        Reward::new(
            self.base
                .gems
                .saturating_add(self.per_point.gems.saturating_mul(score)),
            self.base.xp.saturating_add(self.per_point.xp.saturating_mul(score)),
        )
    }

    /// Completion message with `{score}` and `{total}` filled in.
    pub fn message(&self, score: usize, total: usize) -> String {
        self.message
            .replace("{score}", &score.to_string())
            .replace("{total}", &total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn builtins_are_registered() {
        let registry = BuilderRegistry::with_builtins();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["choice", "match", "typed"]);
        assert!(registry.get("script").is_none());
        assert!(BuilderRegistry::empty().get("choice").is_none());
    }

    #[test]
    fn scoring_reads_header_options() {
        let source = parse("---\ngems: 20\ngems_per_point: 5\nxp: 15\nxp_per_point: 5\nmessage: Score {score}/{total}\n---\n").unwrap();
        let scoring = Scoring::from_source(&source).unwrap();
        assert_eq!(scoring.reward(3), Reward::new(35, 30));
        assert_eq!(scoring.message(2, 3), "Score 2/3");
    }

    #[test]
    fn scoring_defaults_match_plain_completion() {
        let source = parse("---\n---\n").unwrap();
        let scoring = Scoring::from_source(&source).unwrap();
        assert_eq!(scoring.reward(10), Reward::new(15, 10));
        assert_eq!(scoring.message(0, 0), "Lesson completed!");
    }

    #[test]
    fn huge_rewards_saturate() {
        let source = parse("---\ngems_per_point: 18446744073709551615\nxp: 18446744073709551615\n---\n").unwrap();
        let scoring = Scoring::from_source(&source).unwrap();
        assert_eq!(scoring.reward(2), Reward::new(u64::MAX, u64::MAX));
        assert_eq!(scoring.reward(0), Reward::new(15, u64::MAX));
    }

    #[test]
    fn scoring_rejects_bad_numbers() {
        let source = parse("---\ngems: lots\n---\n").unwrap();
        assert!(matches!(
            Scoring::from_source(&source),
            Err(BuildError::InvalidOption { .. })
        ));
    }
}
