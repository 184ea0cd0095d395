//! Extension to file type resolution with a process-wide cache

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Source of file type information for an extension.
///
/// Extensions are handed over normalized: lowercase with a leading dot.
pub trait TypeProvider: Send + Sync {
    /// Human-readable type name, e.g. "TXT Text Document"
    fn type_description(&self, extension: &str) -> String;

    /// Encoded icon image, if the platform has one for this extension
    fn icon_for_extension(&self, extension: &str) -> Option<Vec<u8>>;
}

/// Resolved type identity for one extension
#[derive(Debug, PartialEq, Eq)]
pub struct Classification {
    pub extension: String,
    pub description: String,
    pub icon: Option<Vec<u8>>,
}

pub type ClassificationToken = Arc<Classification>;

/// Lazily populated extension cache.
///
/// Create one at startup and share it (it is `Sync`) for the life of the
/// process; mappings do not depend on any particular archive.
pub struct IconCache {
    provider: Box<dyn TypeProvider>,
    entries: Mutex<HashMap<String, ClassificationToken>>,
}

impl IconCache {
    pub fn new(provider: impl TypeProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Cache backed by the MIME type database
    pub fn with_mime_types() -> Self {
        Self::new(MimeTypeProvider)
    }

    pub fn resolve(&self, extension: &str) -> ClassificationToken {
        let key = normalize_extension(extension);
        // Held across the lookup so one extension never reaches the provider twice
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = entries.get(&key) {
            return Arc::clone(token);
        }

        log::debug!("type cache miss for '{key}'");
        let token = Arc::new(Classification {
            description: self.provider.type_description(&key),
            icon: self.provider.icon_for_extension(&key),
            extension: key.clone(),
        });
        entries.insert(key, Arc::clone(&token));
        token
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lowercase with a single leading dot; empty stays empty
pub fn normalize_extension(extension: &str) -> String {
    let bare = extension.trim().trim_start_matches('.');
    if bare.is_empty() {
        String::new()
    } else {
        format!(".{}", bare.to_lowercase())
    }
}

/// Type descriptions derived from `mime_guess`; no icons
pub struct MimeTypeProvider;

impl TypeProvider for MimeTypeProvider {
    fn type_description(&self, extension: &str) -> String {
        let bare = extension.trim_start_matches('.');
        let label = bare.to_uppercase();
        let kind = mime_guess::from_ext(bare)
            .first()
            .map(|mime| match mime.type_().as_str() {
                "text" => "Text Document",
                "image" => "Image",
                "audio" => "Audio File",
                "video" => "Video File",
                "font" => "Font File",
                _ => "File",
            })
            .unwrap_or("File");

        if label.is_empty() {
            kind.to_string()
        } else {
            format!("{label} {kind}")
        }
    }

    fn icon_for_extension(&self, _extension: &str) -> Option<Vec<u8>> {
        None
    }
}
