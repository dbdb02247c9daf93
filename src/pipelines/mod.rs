//! Pipelines.
//!
//! Both conversion directions are implemented here, behind the light [pipeline::Pipeline] trait:
//!
//! - [Decode]: sparse-format file → raw per-modality files.
//! - [Encode]: raw per-modality files → sparse-format file.
pub mod decode;
pub mod encode;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use decode::{Decode, DecodeOptions};
pub use encode::{Encode, EncodeOptions};
pub use pipeline::Pipeline;
