//! Page documents (ALTO text-recognition output) and the page index that maps
//! the archive's `P1`, `P2`, ... page keys onto them.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use libxml::readonly::RoNode;
use log::{debug, warn};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::xml::{parse_well_formed, Query, Traversal, XPathTraversal};

/// The recognized text of one page, block by block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageDocument {
  /// The file this page was read from
  pub path: PathBuf,
  /// TextBlock ID -> space-joined word contents
  blocks: HashMap<String, String>,
}

impl PageDocument {
  /// Parse the page file at `path` and extract the text of every TextBlock
  pub fn load(path: &Path) -> Result<Self> {
    let dom = parse_well_formed(path).map_err(|_| Error::PageParse {
      path: path.to_path_buf(),
    })?;
    let root = dom.get_root_readonly().ok_or_else(|| Error::PageParse {
      path: path.to_path_buf(),
    })?;
    let traversal = XPathTraversal::new(&dom)?;
    let page = PageDocument::from_tree(&traversal, root, path)?;
    debug!("{}: {} text blocks", path.display(), page.blocks.len());
    Ok(page)
  }

  /// Collect the text of every TextBlock below `root`
  pub fn from_tree<T: Traversal>(traversal: &T, root: RoNode, path: &Path) -> Result<Self> {
    let mut blocks = HashMap::new();
    for block in traversal.find_all(root, &Query::element("TextBlock"))? {
      let id = match block.get_attribute("ID") {
        Some(id) => id,
        None => continue,
      };
      if blocks.contains_key(&id) {
        warn!("{}: repeated TextBlock ID {}, keeping the first", path.display(), id);
        continue;
      }
      let text = block_text(traversal, block)?;
      blocks.insert(id, text);
    }
    Ok(PageDocument {
      path: path.to_path_buf(),
      blocks,
    })
  }

  /// A page made of already-extracted `(ID, text)` blocks
  pub fn from_blocks<I>(path: PathBuf, blocks: I) -> Self
  where I: IntoIterator<Item = (String, String)> {
    PageDocument {
      path,
      blocks: blocks.into_iter().collect(),
    }
  }

  /// The text of the block whose ID is exactly `id`
  pub fn block(&self, id: &str) -> Option<&str> { self.blocks.get(id).map(String::as_str) }

  /// Number of identified TextBlocks on this page
  pub fn block_count(&self) -> usize { self.blocks.len() }
}

/// The CONTENT of every String element inside `block`, in document order,
/// joined by single spaces. A String without CONTENT counts as an empty word.
pub fn block_text<T: Traversal>(traversal: &T, block: RoNode) -> Result<String> {
  let words: Vec<String> = traversal
    .find_all(block, &Query::element("String"))?
    .iter()
    .map(|word| word.get_attribute("CONTENT").unwrap_or_default())
    .collect();
  Ok(words.join(" "))
}

/// Page documents of one issue keyed `P1..Pn` by sorted filename
#[derive(Debug, Clone, Default)]
pub struct PageIndex {
  pages: Vec<PageDocument>,
  keys: HashMap<String, usize>,
}

impl PageIndex {
  /// Sort `paths` lexicographically, parse each page and number them from 1.
  /// Pages are parsed in parallel; their keys depend only on the sort.
  pub fn load(paths: &[PathBuf]) -> Result<Self> {
    let sorted = sorted_page_paths(paths);
    let pages = sorted
      .par_iter()
      .map(|path| PageDocument::load(path))
      .collect::<Result<Vec<_>>>()?;
    Ok(PageIndex::from_pages(pages))
  }

  /// Build an index over already-loaded pages, keyed in the given order
  pub fn from_pages(pages: Vec<PageDocument>) -> Self {
    let keys = (0..pages.len()).map(|position| (page_key(position), position)).collect();
    PageIndex { pages, keys }
  }

  /// The page stored under `key` (e.g. `P3`)
  pub fn get(&self, key: &str) -> Option<&PageDocument> {
    self.keys.get(key).map(|&position| &self.pages[position])
  }

  /// `(key, page)` pairs in page order
  pub fn iter(&self) -> impl Iterator<Item = (String, &PageDocument)> {
    self
      .pages
      .iter()
      .enumerate()
      .map(|(position, page)| (page_key(position), page))
  }

  /// Number of pages
  pub fn len(&self) -> usize { self.pages.len() }

  /// Whether the issue has no pages
  pub fn is_empty(&self) -> bool { self.pages.is_empty() }
}

/// The key of the page at 0-based `position` in filename order
pub fn page_key(position: usize) -> String { format!("P{}", position + 1) }

/// Page paths in lexicographic filename order.
///
/// Filename order is taken to be page order. That holds for the archive's
/// zero-padded `0001.xml` naming; when it would disagree with the numeric
/// order of the filenames a warning is logged, but the lexicographic order
/// is still used.
pub fn sorted_page_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
  let mut sorted = paths.to_vec();
  sorted.sort();
  if !numeric_order_agrees(&sorted) {
    warn!(
      "page filenames in {:?} do not sort numerically; page keys may not match page order",
      sorted.first().and_then(|path| path.parent())
    );
  }
  sorted
}

fn numeric_prefix(path: &Path) -> Option<u64> {
  let name = path.file_name()?.to_str()?;
  let digits: String = name.chars().take_while(char::is_ascii_digit).collect();
  digits.parse().ok()
}

fn numeric_order_agrees(sorted: &[PathBuf]) -> bool {
  let numbers: Option<Vec<u64>> = sorted.iter().map(|path| numeric_prefix(path)).collect();
  match numbers {
    Some(numbers) => numbers.windows(2).all(|pair| pair[0] <= pair[1]),
    // Nothing numeric to compare against
    None => true,
  }
}
