//! Reading an issue's structural-metadata (METS) document into the ordered
//! list of articles and the text blocks each article is made of.
use std::collections::HashMap;
use std::path::Path;

use libxml::readonly::RoNode;
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::xml::{parse_well_formed, Query, Traversal, XPathTraversal};

/// Title given to articles whose ARTICLE node carries no LABEL
pub const UNTITLED: &str = "UNTITLED";

/// Label of the structMap holding the article tree
pub const LOGICAL_STRUCTURE: &str = "Logical Structure";

/// The code of one text region, `{page_token}_{rest}`, e.g. `P2_TB00004`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextBlockRef(String);

impl TextBlockRef {
  /// Wrap a reference code as read from an area's BEGIN attribute
  pub fn new(code: &str) -> Self { TextBlockRef(code.to_string()) }

  /// The full reference code, which is also the TextBlock ID on the page
  pub fn code(&self) -> &str { &self.0 }

  /// The page this block lives on, see [`page_token`]
  pub fn page_token(&self) -> &str { page_token(&self.0) }
}

/// Everything before the first underscore of a reference code.
///
/// The archive names pages `P1`, `P2`, ... in both the block codes and (by
/// convention) in page order, so this token doubles as the page index key.
/// A code without any underscore is its own page token.
pub fn page_token(code: &str) -> &str {
  match code.find('_') {
    Some(end) => &code[..end],
    None => code,
  }
}

/// One ARTICLE node of the logical structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleEntry {
  /// The DMDID of the ARTICLE node
  pub article_id: String,
  /// The LABEL of the ARTICLE node, or [`UNTITLED`]
  pub title: String,
  /// Text block references in reading order
  pub blocks: Vec<TextBlockRef>,
}

/// All articles of one issue, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralIndex {
  articles: Vec<ArticleEntry>,
  positions: HashMap<String, usize>,
}

impl StructuralIndex {
  /// An empty index
  pub fn new() -> Self { StructuralIndex::default() }

  /// Record an article. A repeated id replaces the earlier entry in place, so
  /// the article keeps its first position but gets its last content.
  pub fn insert(&mut self, entry: ArticleEntry) {
    match self.positions.get(&entry.article_id) {
      Some(&position) => {
        warn!(
          "duplicate article id {}, replacing earlier entry {:?}",
          entry.article_id, self.articles[position].title
        );
        self.articles[position] = entry;
      },
      None => {
        self
          .positions
          .insert(entry.article_id.clone(), self.articles.len());
        self.articles.push(entry);
      },
    }
  }

  /// Look up an article by id
  pub fn get(&self, article_id: &str) -> Option<&ArticleEntry> {
    self
      .positions
      .get(article_id)
      .map(|&position| &self.articles[position])
  }

  /// Articles in document order
  pub fn articles(&self) -> &[ArticleEntry] { &self.articles }

  /// Number of distinct articles
  pub fn len(&self) -> usize { self.articles.len() }

  /// Whether the issue has no articles at all
  pub fn is_empty(&self) -> bool { self.articles.is_empty() }
}

/// Parse the structural-metadata file at `path`
pub fn parse(path: &Path) -> Result<StructuralIndex> {
  let dom = parse_well_formed(path).map_err(|_| Error::StructureParse {
    path: path.to_path_buf(),
  })?;
  let root = dom.get_root_readonly().ok_or_else(|| Error::StructureParse {
    path: path.to_path_buf(),
  })?;
  let traversal = XPathTraversal::new(&dom)?;
  let index = read_index(&traversal, root, path)?;
  debug!("{}: {} articles", path.display(), index.len());
  Ok(index)
}

/// Walk the logical structure below `root`
pub fn read_index<T: Traversal>(traversal: &T, root: RoNode, path: &Path) -> Result<StructuralIndex> {
  let logical_query = Query::element("structMap").with_attribute("LABEL", LOGICAL_STRUCTURE);
  let logical_structure = match traversal.find_first(root, &logical_query)? {
    Some(node) => node,
    None => {
      return Err(Error::MissingStructure {
        path: path.to_path_buf(),
      })
    },
  };

  let article_query = Query::element("div").with_attribute("TYPE", "ARTICLE");
  let mut index = StructuralIndex::new();
  for (offset, article) in traversal
    .find_all(logical_structure, &article_query)?
    .into_iter()
    .enumerate()
  {
    let article_id = article
      .get_attribute("DMDID")
      .ok_or_else(|| Error::MissingIdentifier {
        path: path.to_path_buf(),
        position: offset + 1,
      })?;
    let title = article
      .get_attribute("LABEL")
      .unwrap_or_else(|| UNTITLED.to_string());
    let blocks = read_block_refs(traversal, article, &article_id)?;
    index.insert(ArticleEntry {
      article_id,
      title,
      blocks,
    });
  }
  Ok(index)
}

fn read_block_refs<T: Traversal>(traversal: &T, article: RoNode, article_id: &str) -> Result<Vec<TextBlockRef>> {
  let text_query = Query::element("div").with_attribute("TYPE", "TEXT");
  let area_query = Query::element("area");
  let mut blocks = Vec::new();
  for (offset, text) in traversal.find_all(article, &text_query)?.into_iter().enumerate() {
    let code = traversal
      .find_first(text, &area_query)?
      .and_then(|area| area.get_attribute("BEGIN"))
      .ok_or_else(|| Error::MissingBlockCode {
        article_id: article_id.to_string(),
        position: offset + 1,
      })?;
    blocks.push(TextBlockRef(code));
  }
  Ok(blocks)
}
