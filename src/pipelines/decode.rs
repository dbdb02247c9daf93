//! Sparse format to raw collection.
//!
//! Streams a sparse-format file and splits every document into one line per modality file,
//! plus one line in the identifier file.
//!
//! # Processing
//! 1. The destination folder is checked (must be absent or empty) and created.
//! 1. The first document fixes the modality schema, and the output files are opened.
//! 1. Every later document is checked against the schema: new modalities abort the run.
//! 1. Each modality content is normalized (whitespace runs collapsed) and appended to its file.
//! 1. A manifest keeping the modality order is written once every document is done.
//!
//! Any error stops the run. Files written so far are left on disk.
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::Error;
use crate::io::{LineReader, Manifest, ModalityFiles};
use crate::pipelines::pipeline::Pipeline;
use crate::vw::{multiplicity, scan, ModalityRegistry, ScannedLine, Section};

/// Default name of the identifier channel.
pub const ID_MODALITY: &str = "id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Prefix of every produced file.
    pub collection: String,
    /// Name of the identifier file's modality.
    pub id_modality: String,
    /// Fail on documents without identifier instead of numbering them.
    pub require_ids: bool,
    /// Write an empty line for modalities a document lacks,
    /// so that every file keeps the same length.
    pub strict_alignment: bool,
    /// Write `token:n` as `n` repetitions of `token`.
    pub expand_counts: bool,
}

impl DecodeOptions {
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            id_modality: ID_MODALITY.to_string(),
            require_ids: false,
            strict_alignment: true,
            expand_counts: false,
        }
    }
}

pub struct Decode {
    src: PathBuf,
    dst: PathBuf,
    options: DecodeOptions,
}

impl Decode {
    pub fn new(src: PathBuf, dst: PathBuf, options: DecodeOptions) -> Self {
        debug!("decode options: {:?}", options);
        Self { src, dst, options }
    }

    /// Create `dst` if it does not exist, ensure it is an empty folder otherwise.
    fn prepare_dst(dst: &Path) -> Result<(), Error> {
        if dst.exists() {
            if !dst.is_dir() {
                return Err(Error::NotADirectory(dst.to_path_buf()));
            }
            if std::fs::read_dir(dst)?.next().is_some() {
                return Err(Error::DirectoryNotEmpty(dst.to_path_buf()));
            }
        } else {
            info!("creating {:?}", dst);
            std::fs::create_dir_all(dst)?;
        }
        Ok(())
    }

    /// Identifier of the `doc_idx`-th (0-based) document found at `line`.
    fn identifier(
        &self,
        scanned: &ScannedLine,
        doc_idx: usize,
        line: usize,
    ) -> Result<String, Error> {
        match scanned.id() {
            "" if self.options.require_ids => Err(Error::MissingIdentifier { line }),
            "" => Ok((doc_idx + 1).to_string()),
            id => Ok(id.to_string()),
        }
    }

    fn content(&self, section: &Section) -> String {
        let content = section.normalized();
        if self.options.expand_counts {
            multiplicity::expand(&content)
        } else {
            content
        }
    }

    /// Fix the schema from the first document and open the output files.
    fn open_files(&self, first: &ScannedLine) -> Result<(ModalityRegistry, ModalityFiles), Error> {
        let registry = ModalityRegistry::register(first.names(), &self.options.id_modality)?;
        info!("modalities: {:?}", registry.modalities());
        let files = ModalityFiles::new(
            &self.dst,
            &self.options.collection,
            &registry,
            &self.options.id_modality,
        )?;
        Ok((registry, files))
    }

    /// Write a document in every modality file.
    fn write_document(
        &self,
        files: &mut ModalityFiles,
        registry: &ModalityRegistry,
        scanned: &ScannedLine,
        id: &str,
    ) -> Result<(), Error> {
        for modality in registry.modalities() {
            match scanned.get(modality) {
                Some(section) => files.write(modality, &self.content(section))?,
                None if self.options.strict_alignment => files.write(modality, "")?,
                None => (),
            }
        }
        files.write_id(id)
    }
}

impl Pipeline<Manifest> for Decode {
    fn run(&self) -> Result<Manifest, Error> {
        info!("decoding {:?} into {:?}", self.src, self.dst);
        let lines = LineReader::new(&self.src)?;
        Self::prepare_dst(&self.dst)?;

        // files are opened on the first document, and closed when dropped
        let mut state: Option<(ModalityRegistry, ModalityFiles)> = None;
        let mut nb_docs = 0;

        for (idx, line) in lines.enumerate() {
            let line = line?;
            let line_no = idx + 1;
            if line.trim().is_empty() {
                debug!("skipping blank line {}", line_no);
                continue;
            }

            let scanned = scan(&line).map_err(|e| e.at(line_no))?;
            let id = self.identifier(&scanned, nb_docs, line_no)?;

            if let Some((registry, _)) = &state {
                registry.validate(scanned.names(), line_no)?;
            } else {
                state = Some(self.open_files(&scanned)?);
            }
            if let Some((registry, files)) = &mut state {
                self.write_document(files, registry, &scanned, &id)?;
            }
            nb_docs += 1;
        }

        let modalities = match state {
            Some((registry, files)) => {
                files.finish()?;
                registry.modalities().to_vec()
            }
            None => {
                warn!("{:?} holds no document", self.src);
                Vec::new()
            }
        };

        let manifest = Manifest {
            collection: self.options.collection.clone(),
            id_modality: self.options.id_modality.clone(),
            modalities,
            documents: nb_docs,
        };
        if nb_docs > 0 {
            manifest.write(&self.dst)?;
        }

        info!("decoded {} documents", nb_docs);
        Ok(manifest)
    }
}
