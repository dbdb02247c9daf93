//! Error enum
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    Custom(String),

    /// Decode destination exists and already holds entries.
    DirectoryNotEmpty(PathBuf),
    /// Decode destination exists but is a file.
    NotADirectory(PathBuf),
    /// No `<collection>.<modality>.txt` file found in the encode source.
    EmptySourceDirectory(PathBuf),
    /// Several collections share the encode source and none was chosen.
    AmbiguousCollection(Vec<String>),
    /// A modality listed in the manifest (or asked for) has no file.
    MissingModalityFile(PathBuf),
    /// A data modality uses the name reserved for identifiers.
    ReservedModality(String),
    /// A modality name that can't be part of a file name.
    InvalidModalityName(String),

    MissingIdentifier {
        line: usize,
    },
    NoModalitiesFound {
        line: usize,
    },
    EmptyModalityName {
        line: usize,
    },
    DuplicateModality {
        line: usize,
        modality: String,
    },
    /// Schema violation: a modality unseen on the first document.
    UnknownModality {
        line: usize,
        modality: String,
    },
    /// `path` ran out (or kept going) at `line` while other streams did not.
    MisalignedCollection {
        path: PathBuf,
        line: usize,
    },

    EmptyClassifier,
    LabelMismatch {
        documents: usize,
        labels: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Serde(e) => write!(f, "serialization error: {}", e),
            Error::Glob(e) => write!(f, "glob error: {}", e),
            Error::GlobPattern(e) => write!(f, "invalid glob pattern: {}", e),
            Error::Custom(s) => write!(f, "{}", s),
            Error::DirectoryNotEmpty(p) => write!(f, "directory {:?} is not empty", p),
            Error::NotADirectory(p) => {
                write!(f, "directory is expected, but {:?} is a file", p)
            }
            Error::EmptySourceDirectory(p) => {
                write!(f, "no modality files found in {:?}", p)
            }
            Error::AmbiguousCollection(names) => write!(
                f,
                "several collections found ({}), please pick one",
                names.join(", ")
            ),
            Error::MissingModalityFile(p) => write!(f, "modality file {:?} not found", p),
            Error::ReservedModality(m) => write!(
                f,
                "modality {:?} clashes with the identifier channel name",
                m
            ),
            Error::InvalidModalityName(m) => {
                write!(f, "modality {:?} can't be used in a file name", m)
            }
            Error::MissingIdentifier { line } => {
                write!(f, "line {}: no identifier before the first modality", line)
            }
            Error::NoModalitiesFound { line } => write!(f, "line {}: no modality found", line),
            Error::EmptyModalityName { line } => {
                write!(f, "line {}: modality marker without a name", line)
            }
            Error::DuplicateModality { line, modality } => {
                write!(f, "line {}: modality {:?} appears twice", line, modality)
            }
            Error::UnknownModality { line, modality } => write!(
                f,
                "line {}: modality {:?} is not declared by the first document",
                line, modality
            ),
            Error::MisalignedCollection { path, line } => write!(
                f,
                "{:?} is not aligned with the other modality files (line {})",
                path, line
            ),
            Error::EmptyClassifier => write!(f, "classifier has no keywords, fit it first"),
            Error::LabelMismatch { documents, labels } => write!(
                f,
                "got {} documents but {} labels",
                documents, labels
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Serde(e) => Some(e),
            Error::Glob(e) => Some(e),
            Error::GlobPattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}
