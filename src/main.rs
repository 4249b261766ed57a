//! Assembles every issue of an archive into an article table, and optionally
//! a co-occurrence table for a list of search terms.
//!
//! $ RUST_LOG=info nlod /path/to/archive/ articles.csv cooc.csv darwin huxley synod
use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::process;
use std::time::Instant;

use log::{error, info};
use nlod::archive::{self, Archive};
use nlod::cooccurrence::{CooccurrenceTable, DocumentTermMatrix, Statistic, TermTermMatrix};
use nlod::tokenizer::Tokenizer;

static BUFFER_CAPACITY: usize = 10_485_760;
static NUM_COOCS: usize = 50;

fn run() -> nlod::Result<()> {
  let start = Instant::now();
  // Read input arguments
  let mut input_args = env::args();
  let _ = input_args.next(); // skip process name
  let archive_path = match input_args.next() {
    Some(path) => path,
    None => "tests/resources/".to_string(),
  };
  let articles_filename = match input_args.next() {
    Some(path) => path,
    None => "articles.csv".to_string(),
  };
  let cooc_filename = input_args.next();
  let search_terms: Vec<String> = input_args.map(|term| term.to_lowercase()).collect();

  let archive = Archive::new(&archive_path);
  let report = archive.assemble_all()?;
  for skipped in &report.skipped {
    error!("{}: {}", skipped.dir.display(), skipped.reason);
  }

  let articles_file = File::create(&articles_filename)?;
  archive::write_records(
    &report.records,
    BufWriter::with_capacity(BUFFER_CAPACITY, articles_file),
  )?;
  info!(
    "wrote {} articles from {} issues to {}",
    report.records.len(),
    report.issue_count,
    articles_filename
  );

  if let Some(cooc_filename) = cooc_filename {
    let tokenizer = Tokenizer::default();
    let documents: Vec<Vec<String>> = report
      .records
      .iter()
      .map(|record| tokenizer.tokenise_and_stop(&record.text))
      .collect();
    let dtm = DocumentTermMatrix::from_documents(&documents);
    let ttm = TermTermMatrix::from_dtm(&dtm);
    info!(
      "vocabulary of {} terms over {} articles",
      dtm.dictionary.count(),
      dtm.documents()
    );

    let mut table = CooccurrenceTable::new();
    for statistic in Statistic::ALL.iter() {
      table.populate(&ttm, *statistic, &search_terms, NUM_COOCS);
    }
    let cooc_file = File::create(&cooc_filename)?;
    table.write_csv(BufWriter::new(cooc_file), NUM_COOCS)?;
    info!("wrote {} co-occurrence rows to {}", table.len(), cooc_filename);
  }

  info!("finished in {:?}s", start.elapsed().as_secs());
  Ok(())
}

fn main() {
  env_logger::init();
  if let Err(e) = run() {
    error!("{}", e);
    process::exit(1);
  }
}
