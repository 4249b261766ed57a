//! Document-level co-occurrence statistics for a vocabulary of search terms.
//!
//! Counts are taken per document (article): `f(x)` is the number of
//! documents containing `x`, `f(x, y)` the number containing both `x` and
//! `y`, and `N` the number of documents.
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;

use log::warn;

use crate::error::{Error, Result};

/// Records single words, in order of appearance
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
  /// word -> id
  pub map: HashMap<String, usize>,
  /// id -> word
  words: Vec<String>,
}

impl Dictionary {
  /// create a new dictionary
  pub fn new() -> Self { Dictionary::default() }
  /// insert a new word into the dictionary (if it hasn't been inserted yet), returning its id
  pub fn insert(&mut self, word: &str) -> usize {
    if let Some(&id) = self.map.get(word) {
      return id;
    }
    let id = self.words.len();
    self.map.insert(word.to_string(), id);
    self.words.push(word.to_string());
    id
  }
  /// the id of `word`, if recorded
  pub fn id(&self, word: &str) -> Option<usize> { self.map.get(word).copied() }
  /// the word with id `id`
  pub fn word(&self, id: usize) -> Option<&str> { self.words.get(id).map(String::as_str) }
  /// get the number of entries in the dictionary
  pub fn count(&self) -> usize { self.words.len() }
}

/// Term counts per document
#[derive(Debug, Clone, Default)]
pub struct DocumentTermMatrix {
  /// The vocabulary, ids in order of first appearance
  pub dictionary: Dictionary,
  rows: Vec<HashMap<usize, u64>>,
}

impl DocumentTermMatrix {
  /// Count the terms of each tokenised document
  pub fn from_documents(documents: &[Vec<String>]) -> Self {
    let mut dictionary = Dictionary::new();
    let mut rows = Vec::with_capacity(documents.len());
    for document in documents {
      let mut row = HashMap::new();
      for term in document {
        let id = dictionary.insert(term);
        *row.entry(id).or_insert(0) += 1;
      }
      rows.push(row);
    }
    DocumentTermMatrix { dictionary, rows }
  }

  /// How often `term` occurs in document `document`
  pub fn get(&self, document: usize, term: &str) -> u64 {
    match (self.rows.get(document), self.dictionary.id(term)) {
      (Some(row), Some(id)) => row.get(&id).copied().unwrap_or(0),
      _ => 0,
    }
  }

  /// Number of documents
  pub fn documents(&self) -> usize { self.rows.len() }
}

/// Symmetric document co-occurrence counts; the diagonal holds document frequencies
#[derive(Debug, Clone, Default)]
pub struct TermTermMatrix {
  /// The vocabulary shared with the document-term matrix
  pub dictionary: Dictionary,
  counts: Vec<HashMap<usize, u64>>,
  documents: usize,
}

/// Association measure used to rank co-occurring terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
  /// `14 + log2(2 f(x,y) / (f(x) + f(y)))`
  LogDice,
  /// `log2(N f(x,y) / (f(x) f(y)))`
  MutualInformation,
}

impl Statistic {
  /// Both statistics, in report order
  pub const ALL: [Statistic; 2] = [Statistic::LogDice, Statistic::MutualInformation];

  /// Score a pair from its joint and marginal document frequencies
  pub fn score(self, joint: u64, first: u64, second: u64, documents: usize) -> f64 {
    let (joint, first, second) = (joint as f64, first as f64, second as f64);
    match self {
      Statistic::LogDice => 14.0 + (2.0 * joint / (first + second)).log2(),
      Statistic::MutualInformation => (documents as f64 * joint / (first * second)).log2(),
    }
  }
}

impl fmt::Display for Statistic {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Statistic::LogDice => write!(f, "log dice"),
      Statistic::MutualInformation => write!(f, "mi"),
    }
  }
}

impl TermTermMatrix {
  /// Count, for every pair of terms, the documents containing both
  pub fn from_dtm(dtm: &DocumentTermMatrix) -> Self {
    let mut counts: Vec<HashMap<usize, u64>> = vec![HashMap::new(); dtm.dictionary.count()];
    for row in &dtm.rows {
      let present: Vec<usize> = row.keys().copied().collect();
      for &x in &present {
        let x_counts = &mut counts[x];
        for &y in &present {
          *x_counts.entry(y).or_insert(0) += 1;
        }
      }
    }
    TermTermMatrix {
      dictionary: dtm.dictionary.clone(),
      counts,
      documents: dtm.documents(),
    }
  }

  /// Number of documents containing both terms
  pub fn joint_frequency(&self, first: &str, second: &str) -> u64 {
    match (self.dictionary.id(first), self.dictionary.id(second)) {
      (Some(x), Some(y)) => self.counts[x].get(&y).copied().unwrap_or(0),
      _ => 0,
    }
  }

  /// Number of documents containing `term`
  pub fn document_frequency(&self, term: &str) -> u64 { self.joint_frequency(term, term) }

  /// The `limit` terms most strongly associated with `term`, best first.
  /// Ties are broken alphabetically; `term` itself is never included.
  pub fn top_cooccurrences(&self, term: &str, statistic: Statistic, limit: usize) -> Result<Vec<(String, f64)>> {
    let x = self.dictionary.id(term).ok_or_else(|| Error::UnknownTerm {
      term: term.to_string(),
    })?;
    let x_frequency = self.counts[x].get(&x).copied().unwrap_or(0);
    let mut scored: Vec<(String, f64)> = self.counts[x]
      .iter()
      .filter(|&(&y, _)| y != x)
      .filter_map(|(&y, &joint)| {
        let y_frequency = self.counts[y].get(&y).copied().unwrap_or(0);
        let score = statistic.score(joint, x_frequency, y_frequency, self.documents);
        self.dictionary.word(y).map(|word| (word.to_string(), score))
      })
      .collect();
    scored.sort_by(|a, b| {
      b.1
        .partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0))
    });
    scored.truncate(limit);
    Ok(scored)
  }

  /// Shorthand for [`Statistic::LogDice`] rankings
  pub fn log_dice(&self, term: &str, limit: usize) -> Result<Vec<(String, f64)>> {
    self.top_cooccurrences(term, Statistic::LogDice, limit)
  }

  /// Shorthand for [`Statistic::MutualInformation`] rankings
  pub fn mutual_information(&self, term: &str, limit: usize) -> Result<Vec<(String, f64)>> {
    self.top_cooccurrences(term, Statistic::MutualInformation, limit)
  }
}

/// Rows of ranked co-occurrences keyed `"{term}_{statistic}"`, in insertion order
#[derive(Debug, Clone, Default)]
pub struct CooccurrenceTable {
  rows: Vec<(String, Vec<(String, f64)>)>,
  keys: HashSet<String>,
}

impl CooccurrenceTable {
  /// An empty table
  pub fn new() -> Self { CooccurrenceTable::default() }

  /// Add a row for each search term and, one level deep, for each of its
  /// co-occurring terms not yet in the table. Search terms outside the
  /// vocabulary are logged and skipped.
  pub fn populate(&mut self, ttm: &TermTermMatrix, statistic: Statistic, search_terms: &[String], limit: usize) {
    for term in search_terms {
      let coocs = match ttm.top_cooccurrences(term, statistic, limit) {
        Ok(coocs) => coocs,
        Err(e) => {
          warn!("{}", e);
          continue;
        },
      };
      let secondary: Vec<String> = coocs.iter().map(|(word, _)| word.clone()).collect();
      self.insert(row_key(term, statistic), coocs);
      for word in secondary {
        let key = row_key(&word, statistic);
        if self.keys.contains(&key) {
          continue;
        }
        // the term came out of the vocabulary, so it is always present
        if let Ok(secondary_coocs) = ttm.top_cooccurrences(&word, statistic, limit) {
          self.insert(key, secondary_coocs);
        }
      }
    }
  }

  fn insert(&mut self, key: String, coocs: Vec<(String, f64)>) {
    if self.keys.insert(key.clone()) {
      self.rows.push((key, coocs));
    } else if let Some(row) = self.rows.iter_mut().find(|row| row.0 == key) {
      row.1 = coocs;
    }
  }

  /// The ranked co-occurrences stored under `key`
  pub fn get(&self, key: &str) -> Option<&[(String, f64)]> {
    self
      .rows
      .iter()
      .find(|row| row.0 == key)
      .map(|row| row.1.as_slice())
  }

  /// Rows in insertion order
  pub fn rows(&self) -> &[(String, Vec<(String, f64)>)] { &self.rows }

  /// Number of rows
  pub fn len(&self) -> usize { self.rows.len() }

  /// Whether the table has no rows
  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  /// Write the table as CSV: a key column, `limit` term columns, then `limit` score columns
  pub fn write_csv<W: std::io::Write>(&self, writer: W, limit: usize) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut header = vec![String::from("key")];
    header.extend((0..limit).map(|i| format!("Term {}", i)));
    header.extend((0..limit).map(|i| format!("Score {}", i)));
    csv_writer.write_record(&header)?;
    for (key, coocs) in &self.rows {
      let mut record = vec![key.clone()];
      record.extend((0..limit).map(|i| coocs.get(i).map(|c| c.0.clone()).unwrap_or_default()));
      record.extend((0..limit).map(|i| coocs.get(i).map(|c| c.1.to_string()).unwrap_or_default()));
      csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;
    Ok(())
  }
}

/// The table key of `term` under `statistic`, e.g. `darwin_log dice`
pub fn row_key(term: &str, statistic: Statistic) -> String { format!("{}_{}", term, statistic) }
