//! Word tokenization of assembled article text for counting purposes
use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::stopwords;

lazy_static! {
  // Three or more word characters, apostrophes allowed inside
  static ref WORD: Regex = Regex::new(r"\w[\w']+\w").unwrap();
}

/// Splits article text into lowercase count terms, minus a stopword set
pub struct Tokenizer {
  /// set of stopwords
  pub stopwords: HashSet<&'static str>,
}

impl Default for Tokenizer {
  fn default() -> Tokenizer {
    Tokenizer {
      stopwords: stopwords::load(),
    }
  }
}

impl Tokenizer {
  /// Lowercased words of `text`, in order, stopwords included
  pub fn words(&self, text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD
      .find_iter(&lowered)
      .map(|word| word.as_str().to_string())
      .collect()
  }

  /// Join the blocks of an article, tokenize, and drop stopwords
  pub fn tokenise_and_stop(&self, blocks: &[String]) -> Vec<String> {
    self
      .words(&blocks.join(" "))
      .into_iter()
      .filter(|word| !self.stopwords.contains(word.as_str()))
      .collect()
  }
}
