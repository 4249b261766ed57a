//! The on-disk layout of one issue: `{publication_code}_{date}/MM_01/`
//! holding `mets.xml` and the `0001.xml`, `0002.xml`, ... page files.
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::assembler::{self, Article};
use crate::error::{Error, Result};
use crate::mets;

/// Naming conventions of an issue directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueLayout {
  /// Sub-directory of the issue directory holding all its files
  pub content_dir: String,
  /// Filename of the structural-metadata document
  pub mets_file: String,
  /// Leading characters shared by all page filenames
  pub page_prefix: String,
  /// Extension shared by all page filenames
  pub page_extension: String,
}

impl Default for IssueLayout {
  fn default() -> IssueLayout {
    IssueLayout {
      content_dir: "MM_01".to_string(),
      mets_file: "mets.xml".to_string(),
      page_prefix: "0".to_string(),
      page_extension: ".xml".to_string(),
    }
  }
}

impl IssueLayout {
  /// Whether `file_name` names a page document
  pub fn is_page_file(&self, file_name: &str) -> bool {
    file_name.starts_with(&self.page_prefix) && file_name.ends_with(&self.page_extension)
  }
}

/// One dated edition of a periodical
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
  /// The publication code, e.g. `ODT`
  pub publication_code: String,
  /// The date part of the directory name, e.g. `18700212`
  pub date: String,
  /// The issue directory
  pub dir: PathBuf,
}

impl Issue {
  /// Describe the issue stored in `dir`, named `{publication_code}_{date}`
  pub fn from_dir(dir: &Path) -> Result<Self> {
    let name = dir
      .file_name()
      .map(|name| name.to_string_lossy())
      .unwrap_or_default();
    let (publication_code, date) = split_issue_name(&name)?;
    Ok(Issue {
      publication_code: publication_code.to_string(),
      date: date.to_string(),
      dir: dir.to_path_buf(),
    })
  }
}

/// Split an issue directory name at its first underscore
pub fn split_issue_name(name: &str) -> Result<(&str, &str)> {
  match name.find('_') {
    Some(end) if end > 0 && end + 1 < name.len() => Ok((&name[..end], &name[end + 1..])),
    _ => Err(Error::InvalidIssueName {
      name: name.to_string(),
    }),
  }
}

/// The files making up one issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueFiles {
  /// The structural-metadata document
  pub mets: PathBuf,
  /// The page documents, in directory listing order
  pub pages: Vec<PathBuf>,
}

/// Locate the structural-metadata file and page files of the issue in `dir`
pub fn read_issue_dir(dir: &Path, layout: &IssueLayout) -> Result<IssueFiles> {
  let content_dir = dir.join(&layout.content_dir);
  let mets = content_dir.join(&layout.mets_file);
  if !mets.is_file() {
    return Err(Error::MissingMets { dir: content_dir });
  }
  let mut pages = Vec::new();
  for entry in WalkDir::new(&content_dir).min_depth(1).max_depth(1) {
    let entry = entry.map_err(io::Error::from)?;
    let selected = entry
      .file_name()
      .to_str()
      .map(|name| layout.is_page_file(name))
      .unwrap_or(false);
    if selected && entry.file_type().is_file() {
      pages.push(entry.into_path());
    }
  }
  debug!("{}: {} page files", content_dir.display(), pages.len());
  Ok(IssueFiles { mets, pages })
}

/// Read, index and assemble every article of the issue in `dir`
pub fn issue_to_articles(dir: &Path, layout: &IssueLayout) -> Result<Vec<Article>> {
  let files = read_issue_dir(dir, layout)?;
  let index = mets::parse(&files.mets)?;
  assembler::assemble(&index, &files.pages)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn splits_issue_names() {
    assert_eq!(split_issue_name("ODT_18700212").unwrap(), ("ODT", "18700212"));
    assert_eq!(
      split_issue_name("NZ_TABLET_18800101").unwrap(),
      ("NZ", "TABLET_18800101")
    );
    assert!(split_issue_name("ODT18700212").is_err());
    assert!(split_issue_name("_18700212").is_err());
    assert!(split_issue_name("ODT_").is_err());
  }

  #[test]
  fn issue_from_dir_uses_last_component() {
    let issue = Issue::from_dir(Path::new("/archive/ODT_18700212")).unwrap();
    assert_eq!(issue.publication_code, "ODT");
    assert_eq!(issue.date, "18700212");
    assert_eq!(issue.dir, PathBuf::from("/archive/ODT_18700212"));
  }

  #[cfg(unix)]
  #[test]
  fn non_utf8_issue_name_is_reported() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = Path::new("/archive").join(OsStr::from_bytes(b"ODT\xff18700212"));
    match Issue::from_dir(&dir) {
      Err(Error::InvalidIssueName { name }) => assert_eq!(name, "ODT\u{FFFD}18700212"),
      other => panic!("expected InvalidIssueName, got {:?}", other),
    }
  }

  #[test]
  fn page_files_follow_layout() {
    let layout = IssueLayout::default();
    assert!(layout.is_page_file("0001.xml"));
    assert!(!layout.is_page_file("mets.xml"));
    assert!(!layout.is_page_file("0001.jp2"));
  }
}
