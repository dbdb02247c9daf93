//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "vwraw",
    about = "sparse (Vowpal Wabbit-like) collection converter."
)]
/// Holds every command that is callable by the `vwraw` command.
pub enum Vwraw {
    #[structopt(about = "Split a sparse-format file into per-modality raw files")]
    Decode(Decode),
    #[structopt(about = "Merge per-modality raw files into a sparse-format file")]
    Encode(Encode),
    #[structopt(about = "Find per-class keywords of a decoded modality file")]
    Keywords(Keywords),
}

#[derive(Debug, StructOpt)]
/// Decode command and parameters.
///
/// ```sh
/// vwraw-decode 0.1.0
/// Split a sparse-format file into per-modality raw files
///
/// USAGE:
///     vwraw decode [FLAGS] [OPTIONS] <src> [dst]
///
/// FLAGS:
///         --expand-counts    write token:n as n repetitions of token
///         --ragged           do not write empty lines for missing modalities
///         --require-ids      fail on documents without identifier
///
/// OPTIONS:
///     -c, --collection <collection>
///             prefix of produced files. Defaults to the source file stem.
///         --id-modality <id-modality>    name of the identifier file modality [default: id]
///
/// ARGS:
///     <src>    sparse-format file
///     <dst>    destination folder. Defaults to folder_with_<src file name>
/// ```
pub struct Decode {
    #[structopt(parse(from_os_str), help = "sparse-format file")]
    pub src: PathBuf,
    #[structopt(
        parse(from_os_str),
        help = "destination folder. Defaults to folder_with_<src file name>"
    )]
    pub dst: Option<PathBuf>,
    #[structopt(
        short = "c",
        long = "collection",
        help = "prefix of produced files. Defaults to the source file stem."
    )]
    pub collection: Option<String>,
    #[structopt(
        long = "id-modality",
        help = "name of the identifier file modality",
        default_value = "id"
    )]
    pub id_modality: String,
    #[structopt(long = "require-ids", help = "fail on documents without identifier")]
    pub require_ids: bool,
    #[structopt(long = "ragged", help = "do not write empty lines for missing modalities")]
    pub ragged: bool,
    #[structopt(long = "expand-counts", help = "write token:n as n repetitions of token")]
    pub expand_counts: bool,
}

#[derive(Debug, StructOpt)]
/// Encode command and parameters.
pub struct Encode {
    #[structopt(parse(from_os_str), help = "folder holding <collection>.<modality>.txt files")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "sparse-format destination file")]
    pub dst: PathBuf,
    #[structopt(
        short = "c",
        long = "collection",
        help = "collection to encode. Needed only if src holds several ones."
    )]
    pub collection: Option<String>,
    #[structopt(
        long = "id-modality",
        help = "name of the identifier file modality",
        default_value = "id"
    )]
    pub id_modality: String,
    #[structopt(
        short = "m",
        long = "modality",
        help = "modality to encode, in output order (repeatable). Defaults to all of them."
    )]
    pub modalities: Vec<String>,
}

#[derive(Debug, StructOpt)]
/// Keywords command and parameters.
pub struct Keywords {
    #[structopt(parse(from_os_str), help = "decoded modality file (one document per line)")]
    pub documents: PathBuf,
    #[structopt(parse(from_os_str), help = "labels file (one class per line)")]
    pub labels: PathBuf,
    #[structopt(
        long = "n-tf",
        help = "number of keywords by total frequency",
        default_value = "10"
    )]
    pub n_tf: usize,
    #[structopt(
        long = "n-df",
        help = "number of keywords by document frequency",
        default_value = "10"
    )]
    pub n_df: usize,
    #[structopt(
        parse(from_os_str),
        long = "stop-words",
        help = "whitespace-separated stop words file"
    )]
    pub stop_words: Option<PathBuf>,
    #[structopt(
        parse(from_os_str),
        long = "predict",
        help = "documents file to classify. Predictions are printed instead of keywords."
    )]
    pub predict: Option<PathBuf>,
    #[structopt(long = "use-tf", help = "predict with total frequency keywords")]
    pub use_tf: bool,
    #[structopt(long = "distinct", help = "count each keyword once per document when predicting")]
    pub distinct: bool,
}
