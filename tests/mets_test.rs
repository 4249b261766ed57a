mod common;

use nlod::mets::{self, UNTITLED};
use nlod::Error;
use std::path::Path;
use tempfile::tempdir;

use common::{article_div, mets_with_articles, write};

#[test]
fn reads_resource_issue_in_document_order() {
  let index = mets::parse(Path::new("tests/resources/ODT_18700212/MM_01/mets.xml")).unwrap();
  let ids: Vec<&str> = index
    .articles()
    .iter()
    .map(|article| article.article_id.as_str())
    .collect();
  assert_eq!(ids, vec!["MODSMD_ARTICLE1", "MODSMD_ARTICLE2", "MODSMD_ARTICLE3"]);

  let synod = index.get("MODSMD_ARTICLE1").unwrap();
  assert_eq!(synod.title, "THE SYNOD");
  let codes: Vec<&str> = synod.blocks.iter().map(|block| block.code()).collect();
  assert_eq!(codes, vec!["P1_TB00001", "P1_TB00002", "P2_TB00001"]);

  // reading order is the structural order, not page order
  let untitled = index.get("MODSMD_ARTICLE2").unwrap();
  let codes: Vec<&str> = untitled.blocks.iter().map(|block| block.code()).collect();
  assert_eq!(codes, vec!["P2_TB00002", "P1_TB00003"]);

  assert!(index.get("MODSMD_ARTICLE3").unwrap().blocks.is_empty());
}

#[test]
fn missing_label_defaults_to_untitled() {
  let dir = tempdir().unwrap();
  let path = write(
    dir.path(),
    "mets.xml",
    &mets_with_articles(&article_div("A1", None, &["P1_1"])),
  );
  let index = mets::parse(&path).unwrap();
  assert_eq!(index.get("A1").unwrap().title, UNTITLED);
  assert_eq!(index.get("A1").unwrap().title, "UNTITLED");
}

#[test]
fn physical_structure_is_ignored() {
  let dir = tempdir().unwrap();
  let path = write(
    dir.path(),
    "mets.xml",
    r#"<mets:mets xmlns:mets="http://www.loc.gov/METS/">
  <mets:structMap LABEL="Physical Structure">
    <mets:div TYPE="ARTICLE" DMDID="PHYS"><mets:div TYPE="TEXT"><mets:area BEGIN="P1_9"/></mets:div></mets:div>
  </mets:structMap>
  <mets:structMap LABEL="Logical Structure">
    <mets:div TYPE="ARTICLE" DMDID="LOG"/>
  </mets:structMap>
</mets:mets>"#,
  );
  let index = mets::parse(&path).unwrap();
  assert_eq!(index.len(), 1);
  assert!(index.get("PHYS").is_none());
  assert!(index.get("LOG").is_some());
}

#[test]
fn missing_logical_structure_is_an_error() {
  let dir = tempdir().unwrap();
  let path = write(
    dir.path(),
    "mets.xml",
    r#"<mets:mets xmlns:mets="http://www.loc.gov/METS/"><mets:structMap LABEL="Physical Structure"/></mets:mets>"#,
  );
  match mets::parse(&path) {
    Err(Error::MissingStructure { path: reported }) => assert_eq!(reported, path),
    other => panic!("expected MissingStructure, got {:?}", other),
  }
}

#[test]
fn missing_identifier_is_an_error() {
  let dir = tempdir().unwrap();
  let articles = format!(
    "{}{}",
    article_div("A1", Some("Fine"), &["P1_1"]),
    r#"<mets:div TYPE="ARTICLE" LABEL="No id"/>"#
  );
  let path = write(dir.path(), "mets.xml", &mets_with_articles(&articles));
  match mets::parse(&path) {
    Err(Error::MissingIdentifier { position, .. }) => assert_eq!(position, 2),
    other => panic!("expected MissingIdentifier, got {:?}", other),
  }
}

#[test]
fn missing_block_code_is_an_error() {
  let dir = tempdir().unwrap();
  let articles = r#"<mets:div TYPE="ARTICLE" DMDID="A1">
    <mets:div TYPE="TEXT"><mets:area BEGIN="P1_1"/></mets:div>
    <mets:div TYPE="TEXT"><mets:area FILEID="ALTO0001"/></mets:div>
  </mets:div>"#;
  let path = write(dir.path(), "mets.xml", &mets_with_articles(articles));
  match mets::parse(&path) {
    Err(Error::MissingBlockCode {
      article_id,
      position,
    }) => {
      assert_eq!(article_id, "A1");
      assert_eq!(position, 2);
    },
    other => panic!("expected MissingBlockCode, got {:?}", other),
  }

  let no_area = r#"<mets:div TYPE="ARTICLE" DMDID="A2"><mets:div TYPE="TEXT"/></mets:div>"#;
  let path = write(dir.path(), "mets2.xml", &mets_with_articles(no_area));
  assert!(matches!(
    mets::parse(&path),
    Err(Error::MissingBlockCode { .. })
  ));
}

#[test]
fn duplicate_ids_last_write_wins() {
  let dir = tempdir().unwrap();
  let articles = format!(
    "{}{}",
    article_div("A1", Some("First"), &["P1_1"]),
    article_div("A1", Some("Second"), &["P1_2", "P1_3"])
  );
  let path = write(dir.path(), "mets.xml", &mets_with_articles(&articles));
  let index = mets::parse(&path).unwrap();
  assert_eq!(index.len(), 1);
  let entry = index.get("A1").unwrap();
  assert_eq!(entry.title, "Second");
  assert_eq!(entry.blocks.len(), 2);
}

#[test]
fn unparseable_metadata_is_an_error() {
  let dir = tempdir().unwrap();
  let path = write(dir.path(), "mets.xml", "");
  assert!(matches!(
    mets::parse(&path),
    Err(Error::StructureParse { .. })
  ));
}

#[test]
fn truncated_metadata_is_an_error() {
  let dir = tempdir().unwrap();
  let complete = mets_with_articles(&article_div("ARTICLE1", Some("CUT"), &["P1_1"]));
  let cut = &complete[..complete.len() / 2];
  let path = write(dir.path(), "mets.xml", cut);
  match mets::parse(&path) {
    Err(Error::StructureParse { path: reported }) => assert_eq!(reported, path),
    other => panic!("expected StructureParse, got {:?}", other),
  }
}
