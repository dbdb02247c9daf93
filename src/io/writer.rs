/*! Modality-separated line writers.

Each modality of a collection (plus the identifier channel) gets its own [LineWriter].
Every file is opened once, when [ModalityFiles] is created, and stays open until the set is
dropped or [ModalityFiles::finish] is called.
!*/
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::Error;
use crate::io::collection;
use crate::vw::ModalityRegistry;

/// Buffered writer emitting one line per document.
pub struct LineWriter {
    path: PathBuf,
    out: BufWriter<File>,
    nb_lines: usize,
}

impl LineWriter {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: &Path) -> Result<Self, Error> {
        info!("creating {:?}", path);
        let file = File::create(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            out: BufWriter::new(file),
            nb_lines: 0,
        })
    }

    /// Write `line` followed by a newline. `line` must not contain newlines.
    pub fn write_line(&mut self, line: &str) -> Result<(), Error> {
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.nb_lines += 1;
        Ok(())
    }

    pub fn nb_lines(&self) -> usize {
        self.nb_lines
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        Ok(self.out.flush()?)
    }
}

/// Holds one [LineWriter] per registered modality, and one for identifiers.
pub struct ModalityFiles {
    writers: HashMap<String, LineWriter>,
    ids: LineWriter,
}

impl ModalityFiles {
    /// Open `<collection>.<modality>.txt` for every modality of `registry`
    /// and `<collection>.<id_modality>.txt` for identifiers, all in `dst`.
    pub fn new(
        dst: &Path,
        collection: &str,
        registry: &ModalityRegistry,
        id_modality: &str,
    ) -> Result<Self, Error> {
        let mut writers = HashMap::with_capacity(registry.modalities().len());
        for modality in registry.modalities() {
            let path = collection::file_path(dst, collection, modality);
            writers.insert(modality.clone(), LineWriter::create(&path)?);
        }
        let ids = LineWriter::create(&collection::file_path(dst, collection, id_modality))?;

        Ok(Self { writers, ids })
    }

    /// Append a line to `modality`'s file.
    pub fn write(&mut self, modality: &str, content: &str) -> Result<(), Error> {
        self.writers
            .get_mut(modality)
            .ok_or_else(|| Error::Custom(format!("no open file for modality {:?}", modality)))?
            .write_line(content)
    }

    /// Append an identifier.
    pub fn write_id(&mut self, id: &str) -> Result<(), Error> {
        self.ids.write_line(id)
    }

    /// Number of lines written for `modality`.
    pub fn nb_lines(&self, modality: &str) -> Option<usize> {
        self.writers.get(modality).map(LineWriter::nb_lines)
    }

    /// Flush every file and close them.
    pub fn finish(mut self) -> Result<(), Error> {
        for writer in self.writers.values_mut() {
            writer.flush()?;
            debug!("{:?}: {} lines", writer.path(), writer.nb_lines());
        }
        self.ids.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_file_per_modality() {
        let dst = tempfile::tempdir().unwrap();
        let registry = ModalityRegistry::register(vec!["text", "author"], "id").unwrap();
        let mut files = ModalityFiles::new(dst.path(), "c", &registry, "id").unwrap();

        files.write("text", "cat cat dog").unwrap();
        files.write("author", "alice").unwrap();
        files.write_id("id1").unwrap();
        files.write("text", "").unwrap();
        files.write("author", "bob").unwrap();
        files.write_id("id2").unwrap();

        assert_eq!(files.nb_lines("text"), Some(2));
        assert_eq!(files.nb_lines("tags"), None);
        files.finish().unwrap();

        let read = |m: &str| {
            std::fs::read_to_string(dst.path().join(format!("c.{}.txt", m))).unwrap()
        };
        assert_eq!(read("text"), "cat cat dog\n\n");
        assert_eq!(read("author"), "alice\nbob\n");
        assert_eq!(read("id"), "id1\nid2\n");
    }

    #[test]
    fn unknown_modality() {
        let dst = tempfile::tempdir().unwrap();
        let registry = ModalityRegistry::register(vec!["text"], "id").unwrap();
        let mut files = ModalityFiles::new(dst.path(), "c", &registry, "id").unwrap();
        assert!(files.write("tags", "a").is_err());
    }
}
