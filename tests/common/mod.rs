//! Fixture writers shared by the integration tests
#![allow(dead_code)]
use std::fs;
use std::path::{Path, PathBuf};

/// A METS document whose logical structure holds the given `ARTICLE` divs
pub fn mets_with_articles(articles: &str) -> String {
  format!(
    r#"<?xml version="1.0" encoding="UTF-8"?>
<mets:mets xmlns:mets="http://www.loc.gov/METS/">
  <mets:structMap LABEL="Logical Structure" TYPE="LOGICAL">
    <mets:div TYPE="Newspaper">{}</mets:div>
  </mets:structMap>
</mets:mets>"#,
    articles
  )
}

/// One `ARTICLE` div; `label` is omitted when `None`
pub fn article_div(id: &str, label: Option<&str>, codes: &[&str]) -> String {
  let label = label
    .map(|label| format!(" LABEL=\"{}\"", label))
    .unwrap_or_default();
  let texts: String = codes
    .iter()
    .map(|code| {
      format!(
        r#"<mets:div TYPE="TEXT"><mets:fptr><mets:area BEGIN="{}" BETYPE="IDREF"/></mets:fptr></mets:div>"#,
        code
      )
    })
    .collect();
  format!(
    r#"<mets:div TYPE="ARTICLE" DMDID="{}"{}>{}</mets:div>"#,
    id, label, texts
  )
}

/// An ALTO page holding `(block id, words)` text blocks
pub fn alto_page(blocks: &[(&str, &[&str])]) -> String {
  let blocks: String = blocks
    .iter()
    .map(|(id, words)| {
      let strings: String = words
        .iter()
        .map(|word| format!(r#"<String CONTENT="{}"/>"#, word))
        .collect();
      format!(
        r#"<TextBlock ID="{}"><TextLine>{}</TextLine></TextBlock>"#,
        id, strings
      )
    })
    .collect();
  format!(
    r#"<?xml version="1.0" encoding="UTF-8"?><alto><Layout><Page><PrintSpace>{}</PrintSpace></Page></Layout></alto>"#,
    blocks
  )
}

/// Write `contents` to `dir/name`, returning the path
pub fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
  let path = dir.join(name);
  fs::write(&path, contents).unwrap();
  path
}
