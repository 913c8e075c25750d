//! Design persistence.
//!
//! [`DesignRepository`] is the seam between the editor and wherever designs
//! live. [`FileRepository`] keeps one pretty-printed JSON file per design in a
//! data directory; [`MemoryRepository`] keeps them in process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::schema::DesignDocument;
use crate::validation::validate_design_id;
use crate::{CanvasError, CanvasResult};

/// Confirmation returned by a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReceipt {
    /// The design that was written.
    pub design_id: String,
    /// Number of elements written.
    pub element_count: usize,
    /// Save time in milliseconds since the Unix epoch.
    pub saved_at: u64,
}

/// Storage for design documents.
pub trait DesignRepository {
    /// Store `document` under `design_id`, replacing any previous version.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is invalid or the write fails.
    fn save(&self, design_id: &str, document: &DesignDocument) -> CanvasResult<SaveReceipt>;

    /// Fetch the document stored under `design_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::DesignNotFound`] if nothing is stored there.
    fn load(&self, design_id: &str) -> CanvasResult<DesignDocument>;

    /// Ids of every stored design, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be listed.
    fn list(&self) -> CanvasResult<Vec<String>>;

    /// Remove a stored design. Removing a missing design is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is invalid or the removal fails.
    fn delete(&self, design_id: &str) -> CanvasResult<()>;
}

/// One JSON file per design in a data directory.
#[derive(Debug, Clone)]
pub struct FileRepository {
    data_dir: PathBuf,
}

impl FileRepository {
    /// Open a repository rooted at `data_dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Io`] if the directory cannot be created.
    pub fn new(data_dir: impl Into<PathBuf>) -> CanvasResult<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// The directory designs are stored in.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, design_id: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.json", sanitize_filename(design_id)))
    }
}

impl DesignRepository for FileRepository {
    fn save(&self, design_id: &str, document: &DesignDocument) -> CanvasResult<SaveReceipt> {
        validate_design_id(design_id)?;
        let json = serde_json::to_string_pretty(document)?;
        let path = self.path_for(design_id);
        std::fs::write(&path, json)?;
        tracing::info!(
            "Saved design {design_id} ({} elements) to {}",
            document.elements.len(),
            path.display()
        );
        Ok(SaveReceipt {
            design_id: design_id.to_string(),
            element_count: document.elements.len(),
            saved_at: document.timestamp,
        })
    }

    fn load(&self, design_id: &str) -> CanvasResult<DesignDocument> {
        validate_design_id(design_id)?;
        let path = self.path_for(design_id);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CanvasError::DesignNotFound(design_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let document: DesignDocument = serde_json::from_str(&contents)?;
        tracing::info!("Loaded design {design_id} from {}", path.display());
        Ok(document)
    }

    fn list(&self) -> CanvasResult<Vec<String>> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn delete(&self, design_id: &str) -> CanvasResult<()> {
        validate_design_id(design_id)?;
        let path = self.path_for(design_id);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Designs held in memory.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    designs: RwLock<HashMap<String, DesignDocument>>,
}

impl MemoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DesignRepository for MemoryRepository {
    fn save(&self, design_id: &str, document: &DesignDocument) -> CanvasResult<SaveReceipt> {
        validate_design_id(design_id)?;
        self.designs
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(design_id.to_string(), document.clone());
        Ok(SaveReceipt {
            design_id: design_id.to_string(),
            element_count: document.elements.len(),
            saved_at: document.timestamp,
        })
    }

    fn load(&self, design_id: &str) -> CanvasResult<DesignDocument> {
        self.designs
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(design_id)
            .cloned()
            .ok_or_else(|| CanvasError::DesignNotFound(design_id.to_string()))
    }

    fn list(&self) -> CanvasResult<Vec<String>> {
        let mut ids: Vec<String> = self
            .designs
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn delete(&self, design_id: &str) -> CanvasResult<()> {
        self.designs
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(design_id);
        Ok(())
    }
}

/// Sanitize a design id for use as a filename.
///
/// Replaces any character that is not ASCII alphanumeric, `-`, or `_` with `_`.
fn sanitize_filename(design_id: &str) -> String {
    design_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Get the current Unix timestamp in milliseconds.
#[allow(clippy::cast_possible_truncation)] // u64 millis won't overflow for ~584 million years
pub(crate) fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
