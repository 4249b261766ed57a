//! Joining the structural index against the page documents to produce the
//! text of every article, block by block, in reading order.
use std::path::PathBuf;

use log::debug;
use serde::Serialize;

use crate::alto::PageIndex;
use crate::error::{Error, Result};
use crate::mets::{ArticleEntry, StructuralIndex};

/// An assembled article
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
  /// The structural-index identifier
  pub article_id: String,
  /// The article title, or `UNTITLED`
  pub title: String,
  /// One string per text block reference, in reference order
  pub blocks: Vec<String>,
}

/// Resolves text block references against one issue's pages
pub struct ArticleAssembler {
  pages: PageIndex,
}

impl ArticleAssembler {
  /// Parse and index the given page files
  pub fn new(page_paths: &[PathBuf]) -> Result<Self> {
    Ok(ArticleAssembler {
      pages: PageIndex::load(page_paths)?,
    })
  }

  /// Assemble over an already-built page index
  pub fn from_pages(pages: PageIndex) -> Self { ArticleAssembler { pages } }

  /// The page index in use
  pub fn pages(&self) -> &PageIndex { &self.pages }

  /// Assemble every article of `index`, in index order
  pub fn assemble(&self, index: &StructuralIndex) -> Result<Vec<Article>> {
    index
      .articles()
      .iter()
      .map(|entry| self.assemble_article(entry))
      .collect()
  }

  /// Resolve each reference of one article to its block text
  pub fn assemble_article(&self, entry: &ArticleEntry) -> Result<Article> {
    let mut blocks = Vec::with_capacity(entry.blocks.len());
    for block_ref in &entry.blocks {
      let page = self
        .pages
        .get(block_ref.page_token())
        .ok_or_else(|| Error::UnknownPage {
          ref_code: block_ref.code().to_string(),
          article_id: entry.article_id.clone(),
        })?;
      let text = page
        .block(block_ref.code())
        .ok_or_else(|| Error::UnknownBlock {
          ref_code: block_ref.code().to_string(),
          article_id: entry.article_id.clone(),
        })?;
      blocks.push(text.to_string());
    }
    debug!("article {}: {} blocks", entry.article_id, blocks.len());
    Ok(Article {
      article_id: entry.article_id.clone(),
      title: entry.title.clone(),
      blocks,
    })
  }
}

/// Build the page index from `page_paths` and assemble every article of `index`
pub fn assemble(index: &StructuralIndex, page_paths: &[PathBuf]) -> Result<Vec<Article>> {
  ArticleAssembler::new(page_paths)?.assemble(index)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::alto::PageDocument;
  use crate::mets::TextBlockRef;

  fn page(name: &str, blocks: &[(&str, &str)]) -> PageDocument {
    PageDocument::from_blocks(
      PathBuf::from(name),
      blocks
        .iter()
        .map(|(id, text)| (id.to_string(), text.to_string())),
    )
  }

  fn assembler() -> ArticleAssembler {
    ArticleAssembler::from_pages(PageIndex::from_pages(vec![
      page("0001.xml", &[("P1_1", "Gale at"), ("P1_2", "")]),
      page("0002.xml", &[("P2_1", "the heads.")]),
    ]))
  }

  fn entry(codes: &[&str]) -> ArticleEntry {
    ArticleEntry {
      article_id: "A7".to_string(),
      title: "Shipping".to_string(),
      blocks: codes.iter().map(|code| TextBlockRef::new(code)).collect(),
    }
  }

  #[test]
  fn keeps_reference_order_across_pages() {
    let article = assembler().assemble_article(&entry(&["P2_1", "P1_1"])).unwrap();
    assert_eq!(article.blocks, vec!["the heads.", "Gale at"]);
  }

  #[test]
  fn empty_blocks_hold_their_position() {
    let article = assembler()
      .assemble_article(&entry(&["P1_1", "P1_2", "P2_1"]))
      .unwrap();
    assert_eq!(article.blocks, vec!["Gale at", "", "the heads."]);
  }

  #[test]
  fn article_without_references_is_empty() {
    let article = assembler().assemble_article(&entry(&[])).unwrap();
    assert!(article.blocks.is_empty());
    assert_eq!(article.title, "Shipping");
  }

  #[test]
  fn unresolvable_references_are_errors() {
    match assembler().assemble_article(&entry(&["P1_1", "P5_12"])) {
      Err(Error::UnknownPage {
        ref_code,
        article_id,
      }) => {
        assert_eq!(ref_code, "P5_12");
        assert_eq!(article_id, "A7");
      },
      other => panic!("expected UnknownPage, got {:?}", other),
    }
    match assembler().assemble_article(&entry(&["P2_9"])) {
      Err(Error::UnknownBlock { ref_code, .. }) => assert_eq!(ref_code, "P2_9"),
      other => panic!("expected UnknownBlock, got {:?}", other),
    }
  }
}
