/*! Marker scanning

Splits one sparse-format line into its identifier prefix and its modality sections.

```text
<identifier> |<modality1> token token:count ... |<modality2> token ...
```

Marker positions are found in one forward pass over the line, and sections are then sliced
between consecutive markers, so a line is never searched twice.
!*/
use crate::error::Error;

/// Marker character opening a modality section.
pub const MARKER: char = '|';

/// Errors that can be raised while scanning a single line.
///
/// They do not know about line numbers: use [ScanError::at] to lift them into an [Error].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    NoModalitiesFound,
    EmptyModalityName,
    DuplicateModality(String),
}

impl ScanError {
    /// Attach a (1-based) line number.
    pub fn at(self, line: usize) -> Error {
        match self {
            ScanError::NoModalitiesFound => Error::NoModalitiesFound { line },
            ScanError::EmptyModalityName => Error::EmptyModalityName { line },
            ScanError::DuplicateModality(modality) => Error::DuplicateModality { line, modality },
        }
    }
}

/// A modality section, borrowed from the scanned line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    name: &'a str,
    content: &'a str,
}

impl<'a> Section<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Raw content, trimmed of surrounding whitespace but otherwise untouched.
    pub fn content(&self) -> &'a str {
        self.content
    }

    /// Content with inner whitespace runs collapsed to single spaces.
    pub fn normalized(&self) -> String {
        normalize(self.content)
    }
}

/// A scanned line: identifier prefix and sections in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine<'a> {
    id: &'a str,
    sections: Vec<Section<'a>>,
}

impl<'a> ScannedLine<'a> {
    /// Identifier prefix. Empty if nothing precedes the first marker.
    pub fn id(&self) -> &'a str {
        self.id
    }

    pub fn sections(&self) -> &[Section<'a>] {
        &self.sections
    }

    /// Modality names in order of appearance.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.sections.iter().map(|s| s.name)
    }

    pub fn get(&self, name: &str) -> Option<&Section<'a>> {
        self.sections.iter().find(|s| s.name == name)
    }
}

/// Scan a line.
///
/// A marker is `|` immediately followed by the modality name, which runs until the next whitespace.
/// The content of a section runs from the end of the name to the next marker (or end of line).
pub fn scan(line: &str) -> Result<ScannedLine<'_>, ScanError> {
    let markers: Vec<usize> = line.match_indices(MARKER).map(|(pos, _)| pos).collect();

    let first = *markers.first().ok_or(ScanError::NoModalitiesFound)?;
    let id = line[..first].trim();

    let mut sections: Vec<Section> = Vec::with_capacity(markers.len());
    for (idx, start) in markers.iter().enumerate() {
        let end = markers.get(idx + 1).copied().unwrap_or(line.len());

        // skip the marker itself, it is one byte long
        let body = &line[start + MARKER.len_utf8()..end];
        let name_end = body.find(is_delimiter).unwrap_or(body.len());
        let (name, content) = body.split_at(name_end);

        if name.is_empty() {
            return Err(ScanError::EmptyModalityName);
        }
        if sections.iter().any(|s| s.name == name) {
            return Err(ScanError::DuplicateModality(name.to_string()));
        }

        sections.push(Section {
            name,
            content: content.trim(),
        });
    }

    Ok(ScannedLine { id, sections })
}

#[inline]
fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Collapse tab/space/newline runs into single spaces, dropping leading and trailing ones.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for token in text.split(is_delimiter).filter(|t| !t.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}
