//! # vwraw
//!
//! Converter between multi-modal sparse collections (one document per line, modalities marked
//! with `|name`) and folders of raw per-modality text files, one line per document.
//!
//! ## Getting started
//!
//! ```sh
//! vwraw 0.1.0
//! sparse (Vowpal Wabbit-like) collection converter.
//!
//! USAGE:
//!     vwraw <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     decode      Split a sparse-format file into per-modality raw files
//!     encode      Merge per-modality raw files into a sparse-format file
//!     help        Prints this message or the help of the given subcommand(s)
//!     keywords    Find per-class keywords of a decoded modality file
//! ```
//!
//! Logging is configured with `RUST_LOG` (e.g. `RUST_LOG=info vwraw decode data.vw`).
use std::path::{Path, PathBuf};

use serde::Serialize;
use structopt::StructOpt;

use vwraw::classify::{self, Keyword, KeywordsClassifier};
use vwraw::error::Error;
use vwraw::pipelines::{Decode, DecodeOptions, Encode, EncodeOptions, Pipeline};

#[macro_use]
extern crate log;

mod cli;

#[derive(Serialize)]
struct KeywordsReport<'a> {
    tf: &'a std::collections::BTreeMap<String, Vec<Keyword>>,
    df: &'a std::collections::BTreeMap<String, Vec<Keyword>>,
}

/// `folder_with_<file name>`, next to `src`.
fn default_dst(src: &Path) -> PathBuf {
    let name = src
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    src.with_file_name(format!("folder_with_{}", name))
}

fn default_collection(src: &Path) -> String {
    src.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "collection".to_string())
}

fn run(opt: cli::Vwraw) -> Result<(), Error> {
    match opt {
        cli::Vwraw::Decode(d) => {
            let mut options =
                DecodeOptions::new(&d.collection.unwrap_or_else(|| default_collection(&d.src)));
            options.id_modality = d.id_modality;
            options.require_ids = d.require_ids;
            options.strict_alignment = !d.ragged;
            options.expand_counts = d.expand_counts;

            let dst = d.dst.unwrap_or_else(|| default_dst(&d.src));
            let manifest = Decode::new(d.src, dst, options).run()?;
            info!(
                "{} documents, modalities {:?}",
                manifest.documents, manifest.modalities
            );
        }

        cli::Vwraw::Encode(e) => {
            let options = EncodeOptions {
                collection: e.collection,
                id_modality: e.id_modality,
                modalities: if e.modalities.is_empty() {
                    None
                } else {
                    Some(e.modalities)
                },
            };
            Encode::new(e.src, e.dst, options).run()?;
        }

        cli::Vwraw::Keywords(k) => {
            let stop_words = match &k.stop_words {
                Some(path) => classify::read_stop_words(path)?,
                None => Default::default(),
            };
            let documents = classify::read_documents(&k.documents)?;
            let labels = classify::read_documents(&k.labels)?;

            let mut cls = KeywordsClassifier::new(Some(k.n_tf), Some(k.n_df), stop_words)?;
            cls.fit(&documents, &labels)?;

            match &k.predict {
                Some(path) => {
                    let to_predict = classify::read_documents(path)?;
                    for label in cls.predict(&to_predict, !k.use_tf, !k.distinct)? {
                        println!("{}", label);
                    }
                }
                None => {
                    let report = KeywordsReport {
                        tf: cls.keywords(false),
                        df: cls.keywords(true),
                    };
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
        }
    };
    Ok(())
}

fn main() {
    env_logger::init();

    let opt = cli::Vwraw::from_args();
    debug!("cli args\n{:#?}", opt);

    if let Err(e) = run(opt) {
        error!("{}", e);
        std::process::exit(1);
    }
}
