//! Geocode to boundary lookup used by the geographic renderers.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Markup flavour of a boundary description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    Kml,
    Gml,
}

impl Representation {
    /// Subdirectory of the gazetteer root holding this representation.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Kml => "kml",
            Self::Gml => "gml",
        }
    }
}

/// Resolves a geocode value to a boundary fragment. A missing mapping is not
/// an error; renderers simply leave the geocode out.
pub trait GeocodeResolver: Send + Sync {
    fn resolve(&self, code: &str, representation: Representation) -> Option<String>;
}

/// File-backed gazetteer.
///
/// The layout is `<root>/kml/` and `<root>/gml/`, each holding one file per
/// code named `<code>-<anything>`. The boundary is the first line of the file.
/// When several files match, the first in file-name order wins.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    root: PathBuf,
}

impl DirectoryResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn first_line(path: &Path) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    BufReader::new(File::open(path)?).read_line(&mut line)?;
    let line = line.trim_end_matches(|c| c == '\r' || c == '\n');
    Ok(if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    })
}

impl GeocodeResolver for DirectoryResolver {
    fn resolve(&self, code: &str, representation: Representation) -> Option<String> {
        if code.is_empty() {
            return None;
        }
        let dir = self.root.join(representation.dir_name());
        let prefix = format!("{code}-");

        let entry = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .find(|e| {
                e.file_name()
                    .to_str()
                    .map_or(false, |name| name.starts_with(&prefix))
            });

        let Some(entry) = entry else {
            tracing::debug!(code, dir = %dir.display(), "no boundary for geocode");
            return None;
        };

        match first_line(entry.path()) {
            Ok(boundary) => boundary,
            Err(e) => {
                tracing::warn!(path = %entry.path().display(), error = %e, "failed to read geocode boundary");
                None
            }
        }
    }
}

/// In-memory gazetteer.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    boundaries: HashMap<(String, Representation), String>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        code: impl Into<String>,
        representation: Representation,
        boundary: impl Into<String>,
    ) -> Self {
        self.boundaries
            .insert((code.into(), representation), boundary.into());
        self
    }
}

impl GeocodeResolver for MapResolver {
    fn resolve(&self, code: &str, representation: Representation) -> Option<String> {
        self.boundaries
            .get(&(code.to_string(), representation))
            .cloned()
    }
}

/// Resolves nothing; geocodes are left out of geographic output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl GeocodeResolver for NoopResolver {
    fn resolve(&self, _code: &str, _representation: Representation) -> Option<String> {
        None
    }
}
