//! Reading views of assembled articles: wrapped plain text, HTML with an
//! optional highlighted match, and regex search over a set of records.
use regex::Regex;

use crate::archive::ArticleRecord;
use crate::error::Result;

/// Default wrapping width for plain-text output
pub const TEXT_WIDTH: usize = 80;

/// Title, source line and wrapped blocks separated by blank lines
pub fn to_plain_text(record: &ArticleRecord, width: usize) -> String {
  let wrapped: Vec<String> = record.text.iter().map(|block| wrap(block, width)).collect();
  format!(
    "{}\n{} - {}\n\n{}",
    record.title,
    record.newspaper,
    record.date,
    wrapped.join("\n\n")
  )
}

/// Greedy word wrap at `width` columns. A word longer than `width` fills
/// the rest of the current line and is then split into `width`-sized pieces.
pub fn wrap(text: &str, width: usize) -> String {
  let width = width.max(1);
  let mut lines: Vec<String> = Vec::new();
  let mut line = String::new();
  let mut line_len = 0;
  for word in text.split_whitespace() {
    let word_len = word.chars().count();
    if line_len > 0 && line_len + 1 + word_len <= width {
      line.push(' ');
      line.push_str(word);
      line_len += 1 + word_len;
      continue;
    }
    if word_len <= width {
      if line_len > 0 {
        lines.push(std::mem::take(&mut line));
      }
      line.push_str(word);
      line_len = word_len;
      continue;
    }
    let mut chars: Vec<char> = word.chars().collect();
    if line_len > 0 {
      let room = width.saturating_sub(line_len + 1);
      if room > 0 {
        line.push(' ');
        line.extend(chars.drain(..room));
      }
      lines.push(std::mem::take(&mut line));
    }
    while chars.len() > width {
      lines.push(chars.drain(..width).collect());
    }
    line = chars.into_iter().collect();
    line_len = line.chars().count();
  }
  if line_len > 0 {
    lines.push(line);
  }
  lines.join("\n")
}

/// HTML fragment of the article. With `highlight`, the text of the first
/// match is wrapped in `<b>` wherever the pattern matches.
pub fn to_html(record: &ArticleRecord, highlight: Option<&str>) -> Result<String> {
  let mut text: String = record
    .text
    .iter()
    .map(|block| format!("<p>{}</p>", block))
    .collect();
  if let Some(pattern) = highlight {
    let regex = Regex::new(pattern)?;
    let first = regex.find(&text).map(|found| found.as_str().to_string());
    if let Some(matched) = first {
      let bolded = format!("<b>{}</b>", matched);
      text = regex
        .replace_all(&text, regex::NoExpand(&bolded))
        .into_owned();
    }
  }
  Ok(format!(
    "<h3>{}</h3><h4>{} - {}</h4>{}",
    record.title, record.newspaper, record.date, text
  ))
}

/// Article ids of the records with a block matching `pattern`, once per matching block
pub fn search(records: &[ArticleRecord], pattern: &str) -> Result<Vec<String>> {
  let regex = Regex::new(pattern)?;
  let mut found = Vec::new();
  for record in records {
    for block in &record.text {
      if regex.is_match(block) {
        found.push(record.article_id.clone());
      }
    }
  }
  Ok(found)
}
