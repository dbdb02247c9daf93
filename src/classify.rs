/*! Keyword classifier

A small frequency-based classifier consuming decoded modality files, one document per line.

Fitting keeps, for each class, the most common tokens of its documents, either by
total frequency (tf) or by document frequency (df). Prediction counts the keywords of each class
found in a document and picks the class with the most hits.
!*/
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use itertools::Itertools;
use log::{debug, info};
use serde::Serialize;

use crate::error::Error;
use crate::io::LineReader;

/// A keyword and its count in the class it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keyword {
    pub token: String,
    pub count: usize,
}

type ClassKeywords = BTreeMap<String, Vec<Keyword>>;

#[derive(Debug, Clone)]
pub struct KeywordsClassifier {
    n_tf: Option<usize>,
    n_df: Option<usize>,
    stop_words: HashSet<String>,
    top_tf: ClassKeywords,
    top_df: ClassKeywords,
}

impl KeywordsClassifier {
    /// `n_tf`/`n_df` are the number of keywords kept by class (by total and document frequency).
    /// [None] keeps all of them, but at least one has to be set.
    pub fn new(
        n_tf: Option<usize>,
        n_df: Option<usize>,
        stop_words: HashSet<String>,
    ) -> Result<Self, Error> {
        if n_tf.is_none() && n_df.is_none() {
            return Err(Error::Custom(
                "either n_tf or n_df must be set".to_string(),
            ));
        }
        Ok(Self {
            n_tf,
            n_df,
            stop_words,
            top_tf: BTreeMap::new(),
            top_df: BTreeMap::new(),
        })
    }

    /// Most common tokens first, ties broken by token.
    fn top(counts: HashMap<&str, usize>, n: Option<usize>) -> Vec<Keyword> {
        counts
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
            .take(n.unwrap_or(usize::MAX))
            .map(|(token, count)| Keyword {
                token: token.to_string(),
                count,
            })
            .collect()
    }

    /// Find the keywords of every class. `labels[i]` is the class of `documents[i]`.
    pub fn fit<D, L>(&mut self, documents: &[D], labels: &[L]) -> Result<(), Error>
    where
        D: AsRef<str>,
        L: AsRef<str>,
    {
        if documents.len() != labels.len() {
            return Err(Error::LabelMismatch {
                documents: documents.len(),
                labels: labels.len(),
            });
        }

        let mut tf: BTreeMap<&str, HashMap<&str, usize>> = BTreeMap::new();
        let mut df: BTreeMap<&str, HashMap<&str, usize>> = BTreeMap::new();

        for (doc, label) in documents.iter().zip(labels) {
            let tokens: Vec<&str> = doc
                .as_ref()
                .split_whitespace()
                .filter(|t| !self.stop_words.contains(*t))
                .collect();

            let class_tf = tf.entry(label.as_ref()).or_default();
            for &token in tokens.iter() {
                *class_tf.entry(token).or_insert(0) += 1;
            }
            let class_df = df.entry(label.as_ref()).or_default();
            for token in tokens.into_iter().unique() {
                *class_df.entry(token).or_insert(0) += 1;
            }
        }

        self.top_tf = tf
            .into_iter()
            .map(|(class, counts)| (class.to_string(), Self::top(counts, self.n_tf)))
            .collect();
        self.top_df = df
            .into_iter()
            .map(|(class, counts)| (class.to_string(), Self::top(counts, self.n_df)))
            .collect();

        info!("fitted {} classes on {} documents", self.top_tf.len(), documents.len());
        Ok(())
    }

    /// Keywords of each class.
    pub fn keywords(&self, use_df: bool) -> &BTreeMap<String, Vec<Keyword>> {
        if use_df {
            &self.top_df
        } else {
            &self.top_tf
        }
    }

    /// Number of keyword hits of each class in `document`.
    ///
    /// With `consider_repeated`, every occurrence of a keyword counts,
    /// otherwise only distinct tokens do.
    pub fn count_keywords(
        &self,
        document: &str,
        use_df: bool,
        consider_repeated: bool,
    ) -> BTreeMap<&str, usize> {
        let tokens: Vec<&str> = if consider_repeated {
            document.split_whitespace().collect()
        } else {
            document.split_whitespace().unique().collect()
        };

        self.keywords(use_df)
            .iter()
            .map(|(class, keywords)| {
                let keywords: HashSet<&str> = keywords.iter().map(|k| k.token.as_str()).collect();
                let hits = tokens.iter().filter(|t| keywords.contains(*t)).count();
                (class.as_str(), hits)
            })
            .collect()
    }

    /// Predict the class of each document.
    ///
    /// Ties go to the greatest class label.
    pub fn predict<D>(
        &self,
        documents: &[D],
        use_df: bool,
        consider_repeated: bool,
    ) -> Result<Vec<String>, Error>
    where
        D: AsRef<str>,
    {
        let mut predictions = Vec::with_capacity(documents.len());
        for doc in documents {
            let counts = self.count_keywords(doc.as_ref(), use_df, consider_repeated);
            // max_by_key keeps the last maximum, classes are sorted
            let (class, hits) = counts
                .into_iter()
                .max_by_key(|(_, hits)| *hits)
                .ok_or(Error::EmptyClassifier)?;
            debug!("predicted {} with {} keywords", class, hits);
            predictions.push(class.to_string());
        }
        Ok(predictions)
    }
}

/// Read one document per line.
pub fn read_documents(path: &Path) -> Result<Vec<String>, Error> {
    LineReader::new(path)?.collect()
}

/// Read whitespace-separated stop words.
pub fn read_stop_words(path: &Path) -> Result<HashSet<String>, Error> {
    let mut stop_words = HashSet::new();
    for line in LineReader::new(path)? {
        stop_words.extend(line?.split_whitespace().map(String::from));
    }
    Ok(stop_words)
}
