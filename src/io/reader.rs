/*! Reading facilities

- [LineReader]: reads a raw modality file line by line.
- [SequentialIds]: endless `1, 2, 3, ...` identifiers, used when a collection has no identifier
  file.
- [AlignedReader]: reads every modality file of a collection in lock-step, one document at a time.
!*/
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::Error;

/// Reader that yields lines, without their line terminator.
#[derive(Debug)]
pub struct LineReader<T> {
    path: PathBuf,
    lines: Lines<BufReader<T>>,
}

impl LineReader<File> {
    pub fn new(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)?;
        Ok(Self::from_reader(path, file))
    }
}

impl<T: Read> LineReader<T> {
    /// Wrap an arbitrary reader. `path` is only used to report errors.
    pub fn from_reader(path: &Path, reader: T) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: BufReader::new(reader).lines(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: Read> Iterator for LineReader<T> {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        // lines() strips "\n" and "\r\n"
        self.lines.next().map(|line| line.map_err(Error::Io))
    }
}

/// Unbounded sequence of synthetic identifiers, starting at 1.
///
/// It never ends on its own: whoever zips it with finite streams bounds it.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    last: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Iterator for SequentialIds {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.last += 1;
        Some(self.last.to_string())
    }
}

/// Where document identifiers come from.
#[derive(Debug)]
pub enum IdSource<T> {
    File(LineReader<T>),
    Sequential(SequentialIds),
}

/// One document worth of raw lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedRow {
    pub id: String,
    /// One line per modality, in the reader's modality order.
    pub contents: Vec<String>,
}

/// Reads aligned modality files in lock-step.
///
/// Fails with [Error::MisalignedCollection] as soon as one stream ends before the others.
#[derive(Debug)]
pub struct AlignedReader<T> {
    readers: Vec<LineReader<T>>,
    ids: IdSource<T>,
    nb_rows: usize,
    done: bool,
}

impl AlignedReader<File> {
    /// Open every `(modality, path)` and the optional identifier file.
    pub fn open(modalities: &[(String, PathBuf)], ids: Option<&Path>) -> Result<Self, Error> {
        let mut readers = Vec::with_capacity(modalities.len());
        for (modality, path) in modalities {
            debug!("opening {} file {:?}", modality, path);
            readers.push((modality.clone(), LineReader::new(path)?));
        }
        let ids = match ids {
            Some(path) => IdSource::File(LineReader::new(path)?),
            None => {
                info!("no identifier file, using sequential identifiers");
                IdSource::Sequential(SequentialIds::new())
            }
        };
        Ok(Self::new(readers, ids))
    }
}

impl<T: Read> AlignedReader<T> {
    pub fn new(readers: Vec<(String, LineReader<T>)>, ids: IdSource<T>) -> Self {
        let readers = readers
            .into_iter()
            .map(|(modality, reader)| {
                debug!("reading {} from {:?}", modality, reader.path());
                reader
            })
            .collect();
        Self {
            readers,
            ids,
            nb_rows: 0,
            done: false,
        }
    }

    fn next_row(&mut self) -> Result<Option<AlignedRow>, Error> {
        let mut lines = Vec::with_capacity(self.readers.len());
        for reader in self.readers.iter_mut() {
            lines.push(reader.next().transpose()?);
        }
        let id = match &mut self.ids {
            IdSource::File(reader) => reader.next().transpose()?,
            IdSource::Sequential(seq) => seq.next(),
        };

        let line = self.nb_rows + 1;
        let ended = lines.iter().filter(|l| l.is_none()).count();

        // every modality stream is over
        if ended == lines.len() {
            return match (&self.ids, id) {
                (IdSource::File(reader), Some(_)) => Err(Error::MisalignedCollection {
                    path: reader.path().to_path_buf(),
                    line,
                }),
                _ => Ok(None),
            };
        }

        // some streams are over, some are not: blame the first short one
        if ended > 0 {
            let short = lines
                .iter()
                .position(Option::is_none)
                .map(|idx| self.readers[idx].path().to_path_buf())
                .unwrap_or_default();
            return Err(Error::MisalignedCollection { path: short, line });
        }

        let id = match (&self.ids, id) {
            (_, Some(id)) => id,
            (IdSource::File(reader), None) => {
                return Err(Error::MisalignedCollection {
                    path: reader.path().to_path_buf(),
                    line,
                })
            }
            // sequential identifiers never run out
            (IdSource::Sequential(_), None) => line.to_string(),
        };

        self.nb_rows += 1;
        Ok(Some(AlignedRow {
            id,
            contents: lines.into_iter().flatten().collect(),
        }))
    }
}

impl<T: Read> Iterator for AlignedReader<T> {
    type Item = Result<AlignedRow, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let row = self.next_row().transpose();
        if !matches!(row, Some(Ok(_))) {
            self.done = true;
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn reader(name: &str, content: &'static str) -> LineReader<Cursor<&'static str>> {
        LineReader::from_reader(Path::new(name), Cursor::new(content))
    }

    #[test]
    fn sequential_ids() {
        let mut ids = SequentialIds::new();
        let first: Vec<String> = ids.by_ref().take(3).collect();
        assert_eq!(first, vec!["1", "2", "3"]);
        assert_eq!(ids.next(), Some("4".to_string()));
        assert_eq!(SequentialIds::new().nth(99), Some("100".to_string()));
    }

    #[test]
    fn line_reader_strips_terminators() {
        let lines: Vec<String> = reader("x", "a b\r\nc\n\nd")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(lines, vec!["a b", "c", "", "d"]);
    }

    #[test]
    fn lock_step() {
        let ar = AlignedReader::new(
            vec![
                ("text".to_string(), reader("text", "cat cat dog\nfoo\n")),
                ("author".to_string(), reader("author", "alice\nbob\n")),
            ],
            IdSource::File(reader("id", "id1\nid2\n")),
        );
        let rows: Vec<AlignedRow> = ar.collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "id1");
        assert_eq!(rows[0].contents, vec!["cat cat dog", "alice"]);
        assert_eq!(rows[1].contents, vec!["foo", "bob"]);
    }

    #[test]
    fn sequential_fallback() {
        let ar = AlignedReader::new(
            vec![("text".to_string(), reader("text", "a\nb\nc\n"))],
            IdSource::Sequential(SequentialIds::new()),
        );
        let ids: Vec<String> = ar.map(|r| r.unwrap().id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn short_modality() {
        let mut ar = AlignedReader::new(
            vec![
                ("text".to_string(), reader("text", "a\nb\nc\n")),
                ("author".to_string(), reader("author", "x\ny\n")),
            ],
            IdSource::Sequential(SequentialIds::new()),
        );
        assert!(ar.next().unwrap().is_ok());
        assert!(ar.next().unwrap().is_ok());
        match ar.next() {
            Some(Err(Error::MisalignedCollection { path, line })) => {
                assert_eq!(path, PathBuf::from("author"));
                assert_eq!(line, 3);
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert!(ar.next().is_none());
    }

    #[test]
    fn long_id_file() {
        let ar = AlignedReader::new(
            vec![("text".to_string(), reader("text", "a\n"))],
            IdSource::File(reader("id", "1\n2\n")),
        );
        let rows: Vec<Result<AlignedRow, Error>> = ar.collect();
        assert_eq!(rows.len(), 2);
        assert!(matches!(
            &rows[1],
            Err(Error::MisalignedCollection { line: 2, .. })
        ));
    }

    #[test]
    fn short_id_file() {
        let ar = AlignedReader::new(
            vec![("text".to_string(), reader("text", "a\nb\n"))],
            IdSource::File(reader("id", "1\n")),
        );
        let res: Result<Vec<AlignedRow>, Error> = ar.collect();
        assert!(matches!(res, Err(Error::MisalignedCollection { line: 2, .. })));
    }
}
