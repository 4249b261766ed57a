//! # nlod
//! Article reconstruction for a digitized newspaper archive stored as
//! METS structural metadata plus per-page ALTO text recognition, and
//! document-level co-occurrence statistics over the reconstructed articles.
//!
//! ```no_run
//! use std::path::Path;
//! use nlod::issue::{issue_to_articles, IssueLayout};
//!
//! let articles = issue_to_articles(Path::new("archive/ODT_18700212"), &IssueLayout::default())?;
//! for article in articles {
//!   println!("{}: {} blocks", article.title, article.blocks.len());
//! }
//! # Ok::<(), nlod::Error>(())
//! ```

#![deny(
  missing_docs,
  trivial_casts,
  trivial_numeric_casts,
  unused_import_braces,
  unused_qualifications
)]

pub mod alto;
pub mod archive;
pub mod assembler;
pub mod cooccurrence;
pub mod error;
pub mod issue;
pub mod mets;
pub mod render;
pub mod stopwords;
pub mod tokenizer;
pub mod xml;

pub use error::{Error, Result};
