/*!
# Sparse format primitives

Line-level building blocks of the Vowpal Wabbit-like sparse format:

- [scanner]: splits a line into identifier and modality sections.
- [registry]: the modality schema fixed by the first document.
- [multiplicity]: `token:count` encoding and expansion.
!*/
pub mod multiplicity;
pub mod registry;
pub mod scanner;

pub use multiplicity::TokenCounts;
pub use registry::ModalityRegistry;
pub use scanner::{scan, ScanError, ScannedLine, Section};

/// Render one sparse-format line.
///
/// Empty contents still get their marker, so that an empty modality stays distinguishable
/// from an absent one. An empty identifier is omitted.
pub fn render_line<'a, I>(id: &str, sections: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut line = String::from(id);
    for (name, content) in sections {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push(scanner::MARKER);
        line.push_str(name);
        if !content.is_empty() {
            line.push(' ');
            line.push_str(content);
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render() {
        let line = render_line("id1", vec![("text", "cat:2 dog"), ("author", "alice")]);
        assert_eq!(line, "id1 |text cat:2 dog |author alice");
    }

    #[test]
    fn render_empty_content() {
        let line = render_line("7", vec![("text", ""), ("author", "bob")]);
        assert_eq!(line, "7 |text |author bob");
        let scanned = scan(&line).unwrap();
        assert_eq!(scanned.get("text").unwrap().content(), "");
    }

    #[test]
    fn render_without_id() {
        assert_eq!(render_line("", vec![("text", "a")]), "|text a");
    }
}
