//! Lesson discovery.
//!
//! Scans a directory for lesson files, validates that each carries metadata
//! and names a registered builder, and produces a sorted [`Catalog`]. Bad
//! files are skipped and reported; only an unreadable directory is an error.

use crate::builder::{BoundBuilder, BuilderRegistry};
use crate::error::{LoadError, RegistryError};
use crate::parser;
use crate::types::LessonDescriptor;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extension of lesson files.
pub const LESSON_EXTENSION: &str = "md";
/// Files starting with this prefix are never loaded.
pub const PRIVATE_PREFIX: &str = "_";

const SHAPE_REASON: &str = "needs metadata + builder";

/// One discovered lesson.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub descriptor: LessonDescriptor,
    pub builder: BoundBuilder,
    pub source: PathBuf,
}

/// Ordered lessons from one scan, plus the files that were skipped.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    diagnostics: Vec<LoadError>,
}

impl Catalog {
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.descriptor.id == id)
    }

    /// Entries of one category, in catalog order.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.descriptor.category == category)
    }

    /// Files skipped during the scan, in file-name order.
    pub fn diagnostics(&self) -> &[LoadError] {
        &self.diagnostics
    }
}

/// Loads lesson catalogs using a fixed set of builders.
#[derive(Debug, Clone, Default)]
pub struct LessonRegistry {
    builders: BuilderRegistry,
}

impl LessonRegistry {
    pub fn new(builders: BuilderRegistry) -> Self {
        Self { builders }
    }

    pub fn builders(&self) -> &BuilderRegistry {
        &self.builders
    }

    /// Scan `dir` and build a fresh catalog.
    ///
    /// A missing directory yields an empty catalog.
    pub fn scan(&self, dir: &Path) -> Result<Catalog, RegistryError> {
        let mut catalog = Catalog::default();
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "lessons directory not found");
            return Ok(catalog);
        }

        let mut first_seen: HashMap<String, PathBuf> = HashMap::new();
        for path in candidate_files(dir)? {
            match self.load(&path) {
                Ok(entry) => {
                    if let Some(first) = first_seen.get(&entry.descriptor.id) {
                        catalog.diagnostics.push(LoadError::DuplicateId {
                            path: path.clone(),
                            id: entry.descriptor.id.clone(),
                            first: first.clone(),
                        });
                        continue;
                    }
                    first_seen.insert(entry.descriptor.id.clone(), path);
                    catalog.entries.push(entry);
                }
                Err(err) => catalog.diagnostics.push(err),
            }
        }

        for err in &catalog.diagnostics {
            warn!("lesson skipped: {err}");
        }

        catalog.entries.sort_by(|a, b| {
            let (a, b) = (&a.descriptor, &b.descriptor);
            (&a.category, a.order, &a.title).cmp(&(&b.category, b.order, &b.title))
        });

        info!(
            dir = %dir.display(),
            loaded = catalog.entries.len(),
            skipped = catalog.diagnostics.len(),
            "lesson catalog loaded"
        );
        Ok(catalog)
    }

    /// Load one lesson file into a catalog entry.
    pub fn load(&self, path: &Path) -> Result<CatalogEntry, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = parser::parse(&content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let shape_error = |reason: String| LoadError::Shape {
            path: path.to_path_buf(),
            reason,
        };
        let (Some(meta), Some(builder_name)) = (source.meta.clone(), source.builder.clone()) else {
            return Err(shape_error(SHAPE_REASON.to_string()));
        };
        let builder = self
            .builders
            .get(&builder_name)
            .ok_or_else(|| shape_error(format!("unknown builder '{builder_name}'")))?;

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(CatalogEntry {
            descriptor: meta.normalize(&stem),
            builder: BoundBuilder::new(builder, source),
            source: path.to_path_buf(),
        })
    }
}

/// Lesson files in `dir`, sorted by file name.
fn candidate_files(dir: &Path) -> Result<Vec<PathBuf>, RegistryError> {
    let read_dir_error = |source| RegistryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let path = entry.path();

        let is_lesson = path.extension().map_or(false, |ext| ext == LESSON_EXTENSION);
        let is_private = entry
            .file_name()
            .to_string_lossy()
            .starts_with(PRIVATE_PREFIX);
        if is_lesson && !is_private && !path.is_dir() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
