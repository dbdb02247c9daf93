/*!
# vwraw

Conversion between two representations of a multi-modal sparse text collection:

- a sparse line-oriented file, one document per line:
  `<identifier> |<modality1> token token:count ... |<modality2> token ...`
- a folder of raw files `<collection>.<modality>.txt`, one line per document, aligned by position.

Both directions stream their input and hold a single document at a time.

```no_run
use std::path::PathBuf;
use vwraw::pipelines::{Decode, DecodeOptions, Encode, EncodeOptions, Pipeline};

let decode = Decode::new(
    PathBuf::from("collection.vw"),
    PathBuf::from("raw"),
    DecodeOptions::new("collection"),
);
decode.run().unwrap();

let encode = Encode::new(
    PathBuf::from("raw"),
    PathBuf::from("collection.vw"),
    EncodeOptions::default(),
);
encode.run().unwrap();
```
!*/
pub mod classify;
pub mod error;
pub mod io;
pub mod pipelines;
pub mod vw;
