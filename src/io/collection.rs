/*! Raw collection layout

A raw collection named `C` is a set of files `C.<modality>.txt` living in the same folder,
one line per document and aligned by position.
The identifier channel is just another one of these files (`C.id.txt` by default).
!*/
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::Error;
use crate::io::Manifest;

/// Extension of raw modality files.
pub const EXTENSION: &str = "txt";

/// `<collection>.<modality>.txt`
pub fn file_name(collection: &str, modality: &str) -> String {
    format!("{}.{}.{}", collection, modality, EXTENSION)
}

pub fn file_path(dir: &Path, collection: &str, modality: &str) -> PathBuf {
    dir.join(file_name(collection, modality))
}

/// Split a raw file name into `(collection, modality)`.
///
/// The modality is the last dot-separated component before the extension,
/// so collections may contain dots but modalities can't.
pub fn split_file_name(file_name: &str) -> Option<(&str, &str)> {
    let stem = file_name.strip_suffix(EXTENSION)?.strip_suffix('.')?;
    let (collection, modality) = stem.rsplit_once('.')?;
    if collection.is_empty() || modality.is_empty() {
        return None;
    }
    Some((collection, modality))
}

/// Modality of `file_name` when it belongs to `collection`.
///
/// Unlike [split_file_name], the modality is everything between the collection prefix and the
/// extension, dots included.
pub fn modality_name<'a>(file_name: &'a str, collection: &str) -> Option<&'a str> {
    let modality = file_name
        .strip_prefix(collection)?
        .strip_prefix('.')?
        .strip_suffix(EXTENSION)?
        .strip_suffix('.')?;
    if modality.is_empty() {
        return None;
    }
    Some(modality)
}

/// Raw files found for one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionFiles {
    pub collection: String,
    /// Data modalities, sorted by name.
    pub modalities: BTreeMap<String, PathBuf>,
    /// Identifier file, if there is one.
    pub id: Option<PathBuf>,
}

impl CollectionFiles {
    /// Find the raw files of `collection` in `src`.
    ///
    /// If `collection` is [None], it is taken from the only manifest of `src` if there is one,
    /// otherwise `src` must hold exactly one collection.
    /// Modality names may contain dots as long as the collection is known.
    pub fn discover(
        src: &Path,
        collection: Option<&str>,
        id_modality: &str,
    ) -> Result<Self, Error> {
        let src_str = src
            .to_str()
            .ok_or_else(|| Error::Custom(format!("invalid source folder: {:?}", src)))?;

        let collection = match collection {
            Some(c) => Some(c.to_string()),
            None => {
                let mut described = Manifest::collections(src)?;
                if described.len() == 1 {
                    debug!("collection {:?} found from its manifest", described[0]);
                }
                described.pop().filter(|_| described.is_empty())
            }
        };

        // forge pattern for globbing
        let pattern = format!(
            "{}/{}.*.{}",
            glob::Pattern::escape(src_str),
            collection
                .as_deref()
                .map_or_else(|| "*".to_string(), glob::Pattern::escape),
            EXTENSION
        );
        debug!("looking for modality files with {}", pattern);

        let mut found: BTreeMap<String, BTreeMap<String, PathBuf>> = BTreeMap::new();
        for path in glob::glob(&pattern)? {
            let path = path?;
            if !path.is_file() {
                continue;
            }
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => {
                    warn!("skipping non UTF-8 file name {:?}", path);
                    continue;
                }
            };
            let parsed = match collection.as_deref() {
                Some(c) => modality_name(&name, c).map(|m| (c, m)),
                None => split_file_name(&name),
            };
            match parsed {
                Some((c, m)) => {
                    debug!("found {} modality {:?}", c, m);
                    found
                        .entry(c.to_string())
                        .or_default()
                        .insert(m.to_string(), path);
                }
                None => warn!("skipping {:?}: does not match the collection naming", path),
            }
        }

        if found.len() > 1 {
            return Err(Error::AmbiguousCollection(found.into_keys().collect()));
        }

        let (collection, mut modalities) = found
            .into_iter()
            .next()
            .ok_or_else(|| Error::EmptySourceDirectory(src.to_path_buf()))?;
        let id = modalities.remove(id_modality);

        // an identifier file alone is not a collection
        if modalities.is_empty() {
            return Err(Error::EmptySourceDirectory(src.to_path_buf()));
        }

        Ok(Self {
            collection,
            modalities,
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use super::*;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn names() {
        assert_eq!(file_name("coll", "text"), "coll.text.txt");
        assert_eq!(split_file_name("coll.text.txt"), Some(("coll", "text")));
        assert_eq!(split_file_name("my.coll.text.txt"), Some(("my.coll", "text")));
        assert_eq!(split_file_name("coll.txt"), None);
        assert_eq!(split_file_name("coll.text.json"), None);
        assert_eq!(split_file_name(".text.txt"), None);

        assert_eq!(modality_name("coll.tag.v2.txt", "coll"), Some("tag.v2"));
        assert_eq!(modality_name("my.coll.text.txt", "my.coll"), Some("text"));
        assert_eq!(modality_name("coll.txt", "coll"), None);
        assert_eq!(modality_name("other.text.txt", "coll"), None);
        assert_eq!(modality_name("collection.text.txt", "coll"), None);
    }

    #[test]
    fn discover_dotted_modality() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "c.text.txt");
        touch(dir.path(), "c.tag.v2.txt");

        // without a manifest, the last dot wins
        assert!(matches!(
            CollectionFiles::discover(dir.path(), None, "id"),
            Err(Error::AmbiguousCollection(_))
        ));

        let files = CollectionFiles::discover(dir.path(), Some("c"), "id").unwrap();
        let modalities: Vec<&String> = files.modalities.keys().collect();
        assert_eq!(modalities, vec!["tag.v2", "text"]);

        // the manifest names the collection
        touch(dir.path(), "c.modalities.json");
        let files = CollectionFiles::discover(dir.path(), None, "id").unwrap();
        assert_eq!(files.collection, "c");
        let modalities: Vec<&String> = files.modalities.keys().collect();
        assert_eq!(modalities, vec!["tag.v2", "text"]);
    }

    #[test]
    fn discover_single() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "c.text.txt");
        touch(dir.path(), "c.author.txt");
        touch(dir.path(), "c.id.txt");
        touch(dir.path(), "c.modalities.json");

        let files = CollectionFiles::discover(dir.path(), None, "id").unwrap();
        assert_eq!(files.collection, "c");
        let modalities: Vec<&String> = files.modalities.keys().collect();
        assert_eq!(modalities, vec!["author", "text"]);
        assert_eq!(files.id, Some(dir.path().join("c.id.txt")));
    }

    #[test]
    fn discover_without_ids() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "c.text.txt");
        let files = CollectionFiles::discover(dir.path(), Some("c"), "id").unwrap();
        assert!(files.id.is_none());
    }

    #[test]
    fn discover_ambiguous() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.text.txt");
        touch(dir.path(), "b.text.txt");
        match CollectionFiles::discover(dir.path(), None, "id") {
            Err(Error::AmbiguousCollection(names)) => assert_eq!(names, vec!["a", "b"]),
            other => panic!("unexpected result {:?}", other),
        }

        let files = CollectionFiles::discover(dir.path(), Some("b"), "id").unwrap();
        assert_eq!(files.collection, "b");
    }

    #[test]
    fn discover_empty() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "notes.md");
        assert!(matches!(
            CollectionFiles::discover(dir.path(), None, "id"),
            Err(Error::EmptySourceDirectory(_))
        ));

        // identifiers only
        touch(dir.path(), "c.id.txt");
        assert!(matches!(
            CollectionFiles::discover(dir.path(), Some("c"), "id"),
            Err(Error::EmptySourceDirectory(_))
        ));
    }
}
