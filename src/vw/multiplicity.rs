/*! Token multiplicities

Encoding direction turns a whitespace-tokenized line into counted tokens
(`token` when seen once, `token:count` otherwise), keeping distinct tokens in order of first
occurrence.

```text
cat dog cat bird  ->  cat:2 dog bird
```

This is lossy on purpose: only the first-occurrence order and the counts survive,
not where the repetitions were in the line.

Decoding direction normally has nothing to do (repetitions are written as-is),
but [expand] can turn `token:count` back into repetitions.
!*/
use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;

/// Separates a token from its count.
pub const COUNT_SEPARATOR: char = ':';

/// Token → count mapping, in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCounts {
    tokens: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl TokenCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count whitespace-separated tokens of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut counts = Self::new();
        for token in text.split_whitespace() {
            counts.add(token);
        }
        counts
    }

    /// Add one occurrence of `token`.
    pub fn add(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&pos) => self.tokens[pos].1 += 1,
            None => {
                self.index.insert(token.to_string(), self.tokens.len());
                self.tokens.push((token.to_string(), 1));
            }
        }
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.index.get(token).map(|&pos| self.tokens[pos].1)
    }

    /// Distinct tokens with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.tokens.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for TokenCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.iter().format_with(" ", |(token, count), f| {
            if count > 1 {
                f(&format_args!("{}{}{}", token, COUNT_SEPARATOR, count))
            } else {
                f(&token)
            }
        });
        write!(f, "{}", rendered)
    }
}

/// Encode a raw line into its counted form.
pub fn encode(text: &str) -> String {
    TokenCounts::from_text(text).to_string()
}

/// Split `token:count` into its parts.
///
/// Returns [None] if there is no separator, if the token part is empty or if the count
/// is not a positive integer (weights such as `word:0.5` are left alone).
pub fn split_count(token: &str) -> Option<(&str, usize)> {
    let (word, count) = token.rsplit_once(COUNT_SEPARATOR)?;
    if word.is_empty() {
        return None;
    }
    match count.parse::<usize>() {
        Ok(n) if n > 0 => Some((word, n)),
        _ => None,
    }
}

/// Expand `token:count` tokens into `count` repetitions of `token`.
pub fn expand(text: &str) -> String {
    text.split_whitespace()
        .flat_map(|token| match split_count(token) {
            Some((word, n)) => std::iter::repeat(word).take(n),
            None => std::iter::repeat(token).take(1),
        })
        .join(" ")
}
