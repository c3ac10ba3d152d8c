//! Plugin registration and lookup.
//!
//! Each plugin kind has its own registry. The process-wide instances live behind
//! `Arc<RwLock<..>>` and are only written during registration.

use crate::plugins::DocumentExtractor;
#[cfg(feature = "ocr")]
use crate::plugins::OcrBackend;
use crate::types::FormatTag;
use crate::{DoctextError, Result};
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

fn validate_plugin_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DoctextError::validation("Plugin name cannot be empty"));
    }

    if name.contains(char::is_whitespace) {
        return Err(DoctextError::validation(format!(
            "Plugin name '{}' cannot contain whitespace",
            name
        )));
    }

    Ok(())
}

/// Registry of OCR backends, keyed by name.
#[cfg(feature = "ocr")]
pub struct OcrBackendRegistry {
    backends: HashMap<String, Arc<dyn OcrBackend>>,
}

#[cfg(feature = "ocr")]
impl OcrBackendRegistry {
    /// Registry with the built-in Tesseract backend.
    pub fn new() -> Self {
        let mut registry = Self::new_empty();
        let tesseract = Arc::new(crate::ocr::TesseractBackend::new());
        if let Err(e) = registry.register(tesseract) {
            tracing::warn!(error = %e, "Failed to register the tesseract OCR backend");
        }
        registry
    }

    pub fn new_empty() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    /// Register a backend, replacing any backend with the same name.
    pub fn register(&mut self, backend: Arc<dyn OcrBackend>) -> Result<()> {
        let name = backend.name().to_string();

        validate_plugin_name(&name)?;

        backend.initialize()?;

        if let Some(previous) = self.backends.insert(name, backend) {
            previous.shutdown()?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn OcrBackend>> {
        self.backends.get(name).cloned().ok_or_else(|| DoctextError::Plugin {
            message: format!("OCR backend '{}' not registered", name),
            plugin_name: name.to_string(),
        })
    }

    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.backends.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn remove(&mut self, name: &str) -> Result<()> {
        if let Some(backend) = self.backends.remove(name) {
            backend.shutdown()?;
        }
        Ok(())
    }

    pub fn shutdown_all(&mut self) -> Result<()> {
        for name in self.list() {
            self.remove(&name)?;
        }
        Ok(())
    }
}

#[cfg(feature = "ocr")]
impl Default for OcrBackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of document extractors, keyed by format then priority.
pub struct DocumentExtractorRegistry {
    extractors: HashMap<FormatTag, BTreeMap<i32, Arc<dyn DocumentExtractor>>>,
    name_index: HashMap<String, Vec<(FormatTag, i32)>>,
}

impl DocumentExtractorRegistry {
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
            name_index: HashMap::new(),
        }
    }

    /// Register an extractor for every format it supports.
    ///
    /// Registering a name that is already present replaces the old extractor.
    /// An extractor claiming `Unknown`, or a priority slot another extractor holds for
    /// one of its formats, is rejected.
    pub fn register(&mut self, extractor: Arc<dyn DocumentExtractor>) -> Result<()> {
        let name = extractor.name().to_string();
        let priority = extractor.priority();
        let formats: Vec<FormatTag> = extractor.supported_formats().to_vec();

        validate_plugin_name(&name)?;

        if formats.is_empty() {
            return Err(DoctextError::Plugin {
                message: "Extractor supports no formats".to_string(),
                plugin_name: name,
            });
        }
        if formats.contains(&FormatTag::Unknown) {
            return Err(DoctextError::Plugin {
                message: "Extractors cannot be registered for the unknown format".to_string(),
                plugin_name: name,
            });
        }

        for format in &formats {
            if let Some(existing) = self.extractors.get(format).and_then(|map| map.get(&priority))
                && existing.name() != name
            {
                return Err(DoctextError::Plugin {
                    message: format!(
                        "Priority {} for {} is already taken by '{}'",
                        priority,
                        format,
                        existing.name()
                    ),
                    plugin_name: name,
                });
            }
        }

        extractor.initialize()?;

        if self.name_index.contains_key(&name) {
            self.remove(&name)?;
        }

        let mut index_entries = Vec::with_capacity(formats.len());
        for format in formats {
            self.extractors
                .entry(format)
                .or_default()
                .insert(priority, Arc::clone(&extractor));
            index_entries.push((format, priority));
        }

        tracing::debug!(extractor = %name, priority, "Registered document extractor");
        self.name_index.insert(name, index_entries);

        Ok(())
    }

    /// Highest-priority extractor for `format`.
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` for `Unknown` and for formats nothing is registered for.
    pub fn get(&self, format: FormatTag) -> Result<Arc<dyn DocumentExtractor>> {
        if !format.is_known() {
            return Err(DoctextError::UnsupportedFormat(format.to_string()));
        }

        self.extractors
            .get(&format)
            .and_then(|priority_map| priority_map.values().next_back())
            .cloned()
            .ok_or_else(|| DoctextError::UnsupportedFormat(format!("no extractor registered for {}", format)))
    }

    /// Formats that currently have at least one extractor, in stable order.
    pub fn formats(&self) -> Vec<FormatTag> {
        let mut formats: Vec<FormatTag> = self
            .extractors
            .iter()
            .filter(|(_, priority_map)| !priority_map.is_empty())
            .map(|(format, _)| *format)
            .collect();
        formats.sort();
        formats
    }

    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.name_index.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn remove(&mut self, name: &str) -> Result<()> {
        let Some(index_entries) = self.name_index.remove(name) else {
            return Ok(());
        };

        let mut extractor_to_shutdown: Option<Arc<dyn DocumentExtractor>> = None;

        for (format, priority) in index_entries {
            if let Some(priority_map) = self.extractors.get_mut(&format) {
                if let Some(extractor) = priority_map.remove(&priority)
                    && extractor_to_shutdown.is_none()
                {
                    extractor_to_shutdown = Some(extractor);
                }

                if priority_map.is_empty() {
                    self.extractors.remove(&format);
                }
            }
        }

        if let Some(extractor) = extractor_to_shutdown {
            extractor.shutdown()?;
        }

        Ok(())
    }

    pub fn shutdown_all(&mut self) -> Result<()> {
        for name in self.list() {
            self.remove(&name)?;
        }
        Ok(())
    }
}

impl Default for DocumentExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "ocr")]
pub static OCR_BACKEND_REGISTRY: Lazy<Arc<RwLock<OcrBackendRegistry>>> =
    Lazy::new(|| Arc::new(RwLock::new(OcrBackendRegistry::new())));

pub static DOCUMENT_EXTRACTOR_REGISTRY: Lazy<Arc<RwLock<DocumentExtractorRegistry>>> =
    Lazy::new(|| Arc::new(RwLock::new(DocumentExtractorRegistry::new())));

/// Process-wide OCR backend registry.
#[cfg(feature = "ocr")]
pub fn get_ocr_backend_registry() -> Arc<RwLock<OcrBackendRegistry>> {
    Arc::clone(&OCR_BACKEND_REGISTRY)
}

/// Process-wide document extractor registry.
pub fn get_document_extractor_registry() -> Arc<RwLock<DocumentExtractorRegistry>> {
    Arc::clone(&DOCUMENT_EXTRACTOR_REGISTRY)
}
