/*!
# IO utilities

Loading and saving of raw (per-modality) collections.
!*/
pub mod collection;
pub mod manifest;
pub mod reader;
pub mod writer;

pub use collection::CollectionFiles;
pub use manifest::Manifest;
pub use reader::{AlignedReader, AlignedRow, IdSource, LineReader, SequentialIds};
pub use writer::{LineWriter, ModalityFiles};
