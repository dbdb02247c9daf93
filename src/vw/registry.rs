//! Modality schema of a collection.
//!
//! The schema is fixed by the first document and never changes afterwards.
//! It is a plain value: pipelines own their registry, there is no global state.
use std::collections::HashSet;

use log::debug;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalityRegistry {
    modalities: Vec<String>,
    known: HashSet<String>,
}

impl ModalityRegistry {
    /// Fix the canonical modality list from the first document.
    ///
    /// `id_modality` is the name of the identifier channel, which can't be used as a data modality
    /// since both would share the same output file.
    /// Names holding a path separator are rejected too.
    pub fn register<'a, I>(modalities: I, id_modality: &str) -> Result<Self, Error>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut registry = Self {
            modalities: Vec::new(),
            known: HashSet::new(),
        };

        for name in modalities {
            if name == id_modality {
                return Err(Error::ReservedModality(name.to_string()));
            }
            if name.chars().any(std::path::is_separator) {
                return Err(Error::InvalidModalityName(name.to_string()));
            }
            if !registry.known.insert(name.to_string()) {
                return Err(Error::DuplicateModality {
                    line: 1,
                    modality: name.to_string(),
                });
            }
            registry.modalities.push(name.to_string());
        }

        debug!("registered modalities: {:?}", registry.modalities);
        Ok(registry)
    }

    /// Check that a later document only uses registered modalities.
    ///
    /// `line` is the 1-based line number of the document, used in the error.
    pub fn validate<'a, I>(&self, modalities: I, line: usize) -> Result<(), Error>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match modalities.into_iter().find(|m| !self.known.contains(*m)) {
            Some(modality) => Err(Error::UnknownModality {
                line,
                modality: modality.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Canonical modalities, in first-document order.
    pub fn modalities(&self) -> &[String] {
        &self.modalities
    }
}
