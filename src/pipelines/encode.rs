//! Raw collection to sparse format.
//!
//! Reads every `<collection>.<modality>.txt` file of a folder in lock-step and writes one
//! sparse-format line per document, where repeated tokens are counted (`token:count`).
//!
//! Identifiers come from the identifier file when it exists, and are numbered from 1 otherwise.
//! Modalities are written in the order given by the caller, or by the manifest left by decoding,
//! or else in file name order.
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::error::Error;
use crate::io::{AlignedReader, CollectionFiles, LineWriter, Manifest};
use crate::pipelines::decode::ID_MODALITY;
use crate::pipelines::pipeline::Pipeline;
use crate::vw::{multiplicity, render_line};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Collection to encode. Inferred when the source folder holds only one.
    pub collection: Option<String>,
    /// Name of the identifier file's modality.
    pub id_modality: String,
    /// Modalities to encode, in output order.
    pub modalities: Option<Vec<String>>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            collection: None,
            id_modality: ID_MODALITY.to_string(),
            modalities: None,
        }
    }
}

pub struct Encode {
    src: PathBuf,
    dst: PathBuf,
    options: EncodeOptions,
}

impl Encode {
    pub fn new(src: PathBuf, dst: PathBuf, options: EncodeOptions) -> Self {
        debug!("encode options: {:?}", options);
        Self { src, dst, options }
    }

    /// Pick the modalities to encode and their order.
    fn ordered_modalities(
        &self,
        files: &mut CollectionFiles,
    ) -> Result<Vec<(String, PathBuf)>, Error> {
        let order: Vec<String> = match &self.options.modalities {
            Some(wanted) => wanted.clone(),
            None => match Manifest::read(&self.src, &files.collection)? {
                Some(manifest) => {
                    debug!("using manifest order {:?}", manifest.modalities);
                    let mut order = manifest.modalities;
                    // files that were added after decoding go last
                    for extra in files.modalities.keys() {
                        if !order.contains(extra) {
                            warn!("modality {:?} is not in the manifest", extra);
                            order.push(extra.clone());
                        }
                    }
                    order
                }
                None => files.modalities.keys().cloned().collect(),
            },
        };

        order
            .into_iter()
            .map(|modality| match files.modalities.remove(&modality) {
                Some(path) => Ok((modality, path)),
                None => Err(Error::MissingModalityFile(crate::io::collection::file_path(
                    &self.src,
                    &files.collection,
                    &modality,
                ))),
            })
            .collect()
    }
}

impl Pipeline<usize> for Encode {
    /// Returns the number of encoded documents.
    fn run(&self) -> Result<usize, Error> {
        info!("encoding {:?} into {:?}", self.src, self.dst);
        let mut files = CollectionFiles::discover(
            &self.src,
            self.options.collection.as_deref(),
            &self.options.id_modality,
        )?;
        info!("collection: {}", files.collection);

        let modalities = self.ordered_modalities(&mut files)?;
        if modalities.is_empty() {
            return Err(Error::EmptySourceDirectory(self.src.clone()));
        }
        info!(
            "modalities: {:?}",
            modalities.iter().map(|(m, _)| m).collect::<Vec<_>>()
        );

        let reader = AlignedReader::open(&modalities, files.id.as_deref())?;
        let mut out = LineWriter::create(&self.dst)?;

        for row in reader {
            let row = row?;
            let encoded: Vec<String> = row
                .contents
                .iter()
                .map(|c| multiplicity::encode(c))
                .collect();
            let line = render_line(
                row.id.trim(),
                modalities
                    .iter()
                    .map(|(m, _)| m.as_str())
                    .zip(encoded.iter().map(String::as_str)),
            );
            out.write_line(&line)?;
        }

        out.flush()?;
        info!("encoded {} documents", out.nb_lines());
        Ok(out.nb_lines())
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;

    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    fn encode(src: &Path, options: EncodeOptions) -> Result<String, Error> {
        let out = tempfile::tempdir().unwrap();
        let dst = out.path().join("out.vw");
        Encode::new(src.to_path_buf(), dst.clone(), options).run()?;
        Ok(std::fs::read_to_string(dst).unwrap())
    }

    #[test]
    fn with_ids_and_explicit_order() {
        let src = tempfile::tempdir().unwrap();
        write(src.path(), "c.text.txt", "cat cat dog\n");
        write(src.path(), "c.author.txt", "alice\n");
        write(src.path(), "c.id.txt", "id1\n");

        let options = EncodeOptions {
            modalities: Some(vec!["text".to_string(), "author".to_string()]),
            ..Default::default()
        };
        let res = encode(src.path(), options).unwrap();
        assert_eq!(res, "id1 |text cat:2 dog |author alice\n");
    }

    #[test]
    fn file_name_order() {
        let src = tempfile::tempdir().unwrap();
        write(src.path(), "c.text.txt", "cat cat dog\n");
        write(src.path(), "c.author.txt", "alice\n");
        write(src.path(), "c.id.txt", "id1\n");
        let res = encode(src.path(), EncodeOptions::default()).unwrap();
        assert_eq!(res, "id1 |author alice |text cat:2 dog\n");
    }

    #[test]
    fn manifest_order() {
        let src = tempfile::tempdir().unwrap();
        write(src.path(), "c.text.txt", "a\n");
        write(src.path(), "c.author.txt", "b\n");
        write(src.path(), "c.tags.txt", "t\n");
        Manifest {
            collection: "c".to_string(),
            id_modality: "id".to_string(),
            modalities: vec!["text".to_string(), "author".to_string()],
            documents: 1,
        }
        .write(src.path())
        .unwrap();

        let res = encode(src.path(), EncodeOptions::default()).unwrap();
        assert_eq!(res, "1 |text a |author b |tags t\n");
    }

    #[test]
    fn sequential_ids() {
        let src = tempfile::tempdir().unwrap();
        write(src.path(), "c.text.txt", "a a\nb\nc\n");
        let res = encode(src.path(), EncodeOptions::default()).unwrap();
        assert_eq!(res, "1 |text a:2\n2 |text b\n3 |text c\n");
    }

    #[test]
    fn empty_modality_keeps_marker() {
        let src = tempfile::tempdir().unwrap();
        write(src.path(), "c.text.txt", "\nx\n");
        write(src.path(), "c.tags.txt", "t\n\n");
        let options = EncodeOptions {
            modalities: Some(vec!["text".to_string(), "tags".to_string()]),
            ..Default::default()
        };
        let res = encode(src.path(), options).unwrap();
        assert_eq!(res, "1 |text |tags t\n2 |text x |tags\n");
    }

    #[test]
    fn misaligned() {
        let src = tempfile::tempdir().unwrap();
        write(src.path(), "c.text.txt", "a\nb\nc\n");
        write(src.path(), "c.author.txt", "x\ny\n");
        let res = encode(src.path(), EncodeOptions::default());
        match res {
            Err(Error::MisalignedCollection { path, line }) => {
                assert_eq!(path, src.path().join("c.author.txt"));
                assert_eq!(line, 3);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn empty_source() {
        let src = tempfile::tempdir().unwrap();
        let res = encode(src.path(), EncodeOptions::default());
        assert!(matches!(res, Err(Error::EmptySourceDirectory(_))));
    }

    #[test]
    fn unknown_requested_modality() {
        let src = tempfile::tempdir().unwrap();
        write(src.path(), "c.text.txt", "a\n");
        let options = EncodeOptions {
            modalities: Some(vec!["author".to_string()]),
            ..Default::default()
        };
        let res = encode(src.path(), options);
        assert!(matches!(res, Err(Error::MissingModalityFile(_))));
    }
}
