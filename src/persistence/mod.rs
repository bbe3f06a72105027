//! Level files on disk
//!
//! Features:
//! - Directory scan for one extension, sorted by path
//! - Every level parsed up front; the first bad file aborts the load
//! - 1-based level lookup

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::sim::level::{LevelDescription, ParseError, parse_level};

/// Failure to load levels
#[derive(Debug)]
pub enum LevelError {
    /// The file or directory could not be read
    Io { path: PathBuf, source: io::Error },
    /// The file content is not a valid level
    Parse { path: PathBuf, source: ParseError },
    /// The directory holds no level files
    NoLevels { dir: PathBuf },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Parse { path, source } => write!(f, "invalid level {}: {source}", path.display()),
            Self::NoLevels { dir } => write!(f, "no level files found in {}", dir.display()),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::NoLevels { .. } => None,
        }
    }
}

/// Files in `dir` with the given extension, sorted lexicographically
pub fn level_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, LevelError> {
    let io_err = |source| LevelError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read and parse one level file
pub fn read_level(path: &Path) -> Result<LevelDescription, LevelError> {
    let text = fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_level(&text).map_err(|source| LevelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// A named, parsed level
#[derive(Debug, Clone)]
pub struct LevelEntry {
    pub name: String,
    pub description: LevelDescription,
}

/// The ordered set of levels a session plays through
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelEntry>,
}

impl LevelCatalog {
    /// Load every level file in `dir`
    pub fn from_dir(dir: &Path, extension: &str) -> Result<Self, LevelError> {
        let files = level_files(dir, extension)?;
        if files.is_empty() {
            return Err(LevelError::NoLevels {
                dir: dir.to_path_buf(),
            });
        }

        let mut levels = Vec::with_capacity(files.len());
        for path in files {
            let description = read_level(&path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            log::info!(
                "Loaded level {name}: {}x{}, {} bricks, {} indestructible",
                description.grid_width,
                description.grid_height,
                description.bricks.len(),
                description.indestructible_bricks.len()
            );
            levels.push(LevelEntry { name, description });
        }

        log::info!("Found {} levels in {}", levels.len(), dir.display());
        Ok(Self { levels })
    }

    /// In-memory catalog; `None` when `descriptions` is empty
    pub fn from_descriptions(
        descriptions: impl IntoIterator<Item = LevelDescription>,
    ) -> Option<Self> {
        let levels: Vec<_> = descriptions
            .into_iter()
            .enumerate()
            .map(|(i, description)| LevelEntry {
                name: format!("level {}", i + 1),
                description,
            })
            .collect();
        (!levels.is_empty()).then_some(Self { levels })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false: a catalog holds at least one level
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level by 1-based index
    pub fn get(&self, index: usize) -> Option<&LevelEntry> {
        index.checked_sub(1).and_then(|i| self.levels.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelEntry> {
        self.levels.iter()
    }
}
