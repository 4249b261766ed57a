//! Error types for reading an archive and computing statistics over it

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for nlod operations
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort the processing of an issue (or of a statistics run)
#[derive(Error, Debug)]
pub enum Error {
  /// The structural-metadata document has no "Logical Structure" structMap
  #[error("{path}: no structMap labelled \"Logical Structure\"")]
  MissingStructure {
    /// the structural-metadata file
    path: PathBuf,
  },

  /// An ARTICLE node lacks its `DMDID` identifier
  #[error("{path}: ARTICLE node #{position} has no DMDID attribute")]
  MissingIdentifier {
    /// the structural-metadata file
    path: PathBuf,
    /// 1-based position of the ARTICLE node in document order
    position: usize,
  },

  /// A TEXT node has no area descendant, or the area has no BEGIN
  #[error("article {article_id}: TEXT node #{position} has no area with a BEGIN attribute")]
  MissingBlockCode {
    /// the article owning the TEXT node
    article_id: String,
    /// 1-based position of the TEXT node within the article
    position: usize,
  },

  /// The structural-metadata document is not well-formed
  #[error("failed to parse structural metadata {path}")]
  StructureParse {
    /// the offending file
    path: PathBuf,
  },

  /// A page document is not well-formed
  #[error("failed to parse page document {path}")]
  PageParse {
    /// the offending file
    path: PathBuf,
  },

  /// A text-block reference names a page that is not in the page index
  #[error("article {article_id}: block {ref_code} refers to a page missing from the issue")]
  UnknownPage {
    /// the unresolved reference code
    ref_code: String,
    /// the article containing the reference
    article_id: String,
  },

  /// A text-block reference names a block its page does not contain
  #[error("article {article_id}: no TextBlock with ID {ref_code} on its page")]
  UnknownBlock {
    /// the unresolved reference code
    ref_code: String,
    /// the article containing the reference
    article_id: String,
  },

  /// An issue directory has no structural-metadata file
  #[error("no structural-metadata file found in {dir}")]
  MissingMets {
    /// the issue content directory that was searched
    dir: PathBuf,
  },

  /// An issue directory name is not of the form `{publication_code}_{date}`
  #[error("issue directory name {name:?} is not of the form <publication>_<date>")]
  InvalidIssueName {
    /// the offending directory name
    name: String,
  },

  /// libxml could not set up or evaluate an XPath query
  #[error("XPath evaluation failed for {query}")]
  XPath {
    /// the query that failed
    query: String,
  },

  /// A co-occurrence lookup for a term outside the vocabulary
  #[error("{term} not in dictionary")]
  UnknownTerm {
    /// the missing term
    term: String,
  },

  /// A search or highlight pattern failed to compile
  #[error("invalid pattern: {0}")]
  InvalidPattern(#[from] regex::Error),

  /// I/O error when walking the archive or writing reports
  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  /// Error writing a CSV report
  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),
}
