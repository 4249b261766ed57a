//! Batch processing of a whole archive, one issue per rayon task.
//!
//! A failing issue never stops the run: its error is logged, recorded in the
//! report, and the remaining issues are assembled as usual.
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use crate::assembler::Article;
use crate::error::Result;
use crate::issue::{issue_to_articles, Issue, IssueLayout};

/// Separator between blocks when an article's text is flattened to one field
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// A directory of issue directories
#[derive(Debug, Clone)]
pub struct Archive {
  /// root directory
  pub path: PathBuf,
  /// naming conventions inside each issue
  pub layout: IssueLayout,
}

/// One article with the issue-level fields attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
  /// The publication code of the issue
  pub newspaper: String,
  /// The date of the issue
  pub date: String,
  /// The structural-index identifier
  pub article_id: String,
  /// The article title
  pub title: String,
  /// The block strings, in reading order
  pub text: Vec<String>,
}

/// Flat CSV row of an `ArticleRecord`
#[derive(Debug, Serialize)]
pub struct ArticleRow<'a> {
  newspaper: &'a str,
  date: &'a str,
  article_id: &'a str,
  title: &'a str,
  text: String,
}

/// An issue that was skipped, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedIssue {
  /// The issue directory
  pub dir: PathBuf,
  /// The error that aborted it
  pub reason: String,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
  /// All assembled articles, issue by issue in directory order
  pub records: Vec<ArticleRecord>,
  /// Issues that failed, in directory order
  pub skipped: Vec<SkippedIssue>,
  /// Number of issues assembled successfully
  pub issue_count: usize,
}

impl ArticleRecord {
  /// Attach the fields of `issue` to an assembled article
  pub fn new(issue: &Issue, article: Article) -> Self {
    ArticleRecord {
      newspaper: issue.publication_code.clone(),
      date: issue.date.clone(),
      article_id: article.article_id,
      title: article.title,
      text: article.blocks,
    }
  }

  /// The row written to CSV reports, blocks joined by [`BLOCK_SEPARATOR`]
  pub fn to_row(&self) -> ArticleRow<'_> {
    ArticleRow {
      newspaper: &self.newspaper,
      date: &self.date,
      article_id: &self.article_id,
      title: &self.title,
      text: self.text.join(BLOCK_SEPARATOR),
    }
  }
}

impl Default for Archive {
  fn default() -> Archive {
    Archive {
      path: PathBuf::from("."),
      layout: IssueLayout::default(),
    }
  }
}

impl Archive {
  /// An archive rooted at `path` with the default issue layout
  pub fn new<P: AsRef<Path>>(path: P) -> Self {
    Archive {
      path: path.as_ref().to_path_buf(),
      ..Archive::default()
    }
  }

  /// The issue directories directly below the root, sorted by name
  pub fn issue_dirs(&self) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(&self.path)
      .min_depth(1)
      .max_depth(1)
      .sort_by(|a, b| a.file_name().cmp(b.file_name()))
    {
      let entry = entry.map_err(io::Error::from)?;
      let hidden = entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false);
      if entry.file_type().is_dir() && !hidden {
        dirs.push(entry.into_path());
      }
    }
    Ok(dirs)
  }

  /// Assemble one issue into records
  pub fn load_issue(&self, dir: &Path) -> Result<Vec<ArticleRecord>> {
    let issue = Issue::from_dir(dir)?;
    let articles = issue_to_articles(dir, &self.layout)?;
    Ok(
      articles
        .into_iter()
        .map(|article| ArticleRecord::new(&issue, article))
        .collect(),
    )
  }

  /// Assemble every issue in parallel, logging and skipping the ones that fail
  pub fn assemble_all(&self) -> Result<BatchReport> {
    let dirs = self.issue_dirs()?;
    info!("assembling {} issues below {}", dirs.len(), self.path.display());
    let outcomes: Vec<(PathBuf, Result<Vec<ArticleRecord>>)> = dirs
      .into_par_iter()
      .map(|dir| {
        let outcome = self.load_issue(&dir);
        (dir, outcome)
      })
      .collect();

    let mut report = BatchReport::default();
    for (dir, outcome) in outcomes {
      match outcome {
        Ok(mut records) => {
          report.issue_count += 1;
          report.records.append(&mut records);
        },
        Err(e) => {
          warn!("skipping issue {}: {}", dir.display(), e);
          report.skipped.push(SkippedIssue {
            dir,
            reason: e.to_string(),
          });
        },
      }
    }
    info!(
      "{} articles from {} issues, {} issues skipped",
      report.records.len(),
      report.issue_count,
      report.skipped.len()
    );
    Ok(report)
  }
}

/// Write `records` as CSV to `writer`, one row per article
pub fn write_records<W: io::Write>(records: &[ArticleRecord], writer: W) -> Result<()> {
  let mut csv_writer = csv::Writer::from_writer(writer);
  for record in records {
    csv_writer.serialize(record.to_row())?;
  }
  csv_writer.flush()?;
  Ok(())
}
