//! Core library for the QuadroLingo lesson app.
//!
//! Provides:
//! - Lesson file parser and the registry that scans a lessons directory
//! - Builder capabilities (choice, match, typed) and the views they build
//! - The `LessonHost` callback contract views use to talk to the app
//! - Profile, shop, theme, toast and tween types the host is built from

pub mod builder;
pub mod error;
pub mod host;
pub mod matching;
pub mod parser;
pub mod profile;
pub mod registry;
pub mod shop;
pub mod theme;
pub mod toast;
pub mod tween;
pub mod types;
pub mod view;

pub use builder::{BoundBuilder, BuilderRegistry, LessonBuilder, Scoring};
pub use error::{BuildError, LoadError, ParseError, PurchaseError, RegistryError, Result};
pub use host::LessonHost;
pub use parser::parse;
pub use profile::{Completion, Profile, Settings};
pub use registry::{Catalog, CatalogEntry, LessonRegistry};
pub use shop::{purchase, ShopItem, SHOP_ITEMS};
pub use theme::Theme;
pub use toast::{Toast, ToastSlot};
pub use tween::{Easing, Tween, TweenScheduler};
pub use types::{
    LessonDescriptor, LessonItem, LessonMeta, LessonSource, MatchingMode, Reward, Severity,
    ThemeName,
};
pub use view::{Frame, LessonView, Line, Surface};
