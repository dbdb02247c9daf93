//! Collection manifest.
//!
//! Written by decoding next to the raw files as `<collection>.modalities.json`,
//! it keeps the modality order of the source so that encoding can restore it.
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Suffix of manifest files, after the collection name.
pub const SUFFIX: &str = ".modalities.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub collection: String,
    pub id_modality: String,
    /// Data modalities, in first-document order.
    pub modalities: Vec<String>,
    /// Number of documents (lines of each raw file).
    pub documents: usize,
}

impl Manifest {
    pub fn path(dir: &Path, collection: &str) -> PathBuf {
        dir.join(format!("{}{}", collection, SUFFIX))
    }

    /// Names of the collections that have a manifest in `dir`, sorted.
    pub fn collections(dir: &Path) -> Result<Vec<String>, Error> {
        let dir_str = dir
            .to_str()
            .ok_or_else(|| Error::Custom(format!("invalid folder: {:?}", dir)))?;
        let pattern = format!("{}/*{}", glob::Pattern::escape(dir_str), SUFFIX);

        let mut collections = Vec::new();
        for path in glob::glob(&pattern)? {
            let path = path?;
            match path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_suffix(SUFFIX))
            {
                Some(c) if !c.is_empty() => collections.push(c.to_string()),
                _ => warn!("skipping manifest {:?}", path),
            }
        }
        collections.sort();
        Ok(collections)
    }

    pub fn write(&self, dir: &Path) -> Result<(), Error> {
        let f = File::create(Self::path(dir, &self.collection))?;
        serde_json::to_writer_pretty(BufWriter::new(f), self)?;
        Ok(())
    }

    /// Read the manifest of `collection` if there is one.
    pub fn read(dir: &Path, collection: &str) -> Result<Option<Self>, Error> {
        let path = Self::path(dir, collection);
        if !path.is_file() {
            return Ok(None);
        }
        let f = File::open(path)?;
        Ok(Some(serde_json::from_reader(BufReader::new(f))?))
    }
}
