use crate::dom::DocumentTree;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Menu source not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Menu source is not valid UTF-8 text: {path}")]
    NotText { path: PathBuf },
}

#[derive(Debug, thiserror::Error)]
pub enum PageStateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid page state: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the delimited menu text comes from.
pub trait MenuSource {
    fn fetch(&self) -> Result<String, SourceError>;
}

/// Menu exported to a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MenuSource for FileSource {
    fn fetch(&self) -> Result<String, SourceError> {
        if !self.path.exists() {
            return Err(SourceError::NotFound(self.path.clone()));
        }
        let bytes = fs::read(&self.path)?;
        String::from_utf8(bytes).map_err(|_| SourceError::NotText {
            path: self.path.clone(),
        })
    }
}

/// Menu text held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource(pub String);

impl MenuSource for StaticSource {
    fn fetch(&self) -> Result<String, SourceError> {
        Ok(self.0.clone())
    }
}

/// Load a previously saved page. `Ok(None)` when nothing was saved yet.
pub fn load_page(path: &Path) -> Result<Option<DocumentTree>, PageStateError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

/// Persist the page so the next run compares against what was published.
pub fn save_page(path: &Path, tree: &DocumentTree) -> Result<(), PageStateError> {
    let content = serde_json::to_string_pretty(tree)?;
    write_file(path, &content)?;
    Ok(())
}

/// Write text to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<(), std::io::Error> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}
