//! Cart persisted between CLI invocations.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use pizza_commerce::cart::{CartLineItem, CartStore};
use pizza_commerce::CommerceError;
use serde::{Deserialize, Serialize};

/// On-disk cart document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CartFile {
    #[serde(default)]
    items: Vec<CartLineItem>,
    updated_at: DateTime<Utc>,
}

/// A [`CartStore`] backed by a JSON file, so `add` and `checkout` can run as
/// separate commands. A missing file is an empty cart.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    path: PathBuf,
}

impl FileCartStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the cart was last written, if it exists.
    pub fn updated_at(&self) -> Result<Option<DateTime<Utc>>, CommerceError> {
        Ok(self.read()?.map(|file| file.updated_at))
    }

    fn read(&self) -> Result<Option<CartFile>, CommerceError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).map(Some).map_err(|e| {
                CommerceError::CartStore(format!("{}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write(&self, items: Vec<CartLineItem>) -> Result<(), CommerceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let file = CartFile {
            items,
            updated_at: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, content).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, e: std::io::Error) -> CommerceError {
        CommerceError::CartStore(format!("{}: {}", self.path.display(), e))
    }
}

impl CartStore for FileCartStore {
    fn items(&self) -> Result<Vec<CartLineItem>, CommerceError> {
        Ok(self.read()?.map(|file| file.items).unwrap_or_default())
    }

    fn append(&self, item: CartLineItem) -> Result<(), CommerceError> {
        let mut items = self.items()?;
        items.push(item);
        self.write(items)
    }

    fn clear(&self) -> Result<(), CommerceError> {
        self.write(Vec::new())
    }
}
