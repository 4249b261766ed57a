//! A thin traversal layer over libxml's XPath engine.
//!
//! The archive readers only ever need two questions answered: "all
//! descendants of this node that are element X with attributes Y" and "the
//! first such descendant". `Query` describes the element, `Traversal` answers
//! the questions. Queries match on local names, so the same query works for
//! namespace-qualified METS and for un-namespaced ALTO.
use std::path::Path;

use libxml::parser::{Parser, ParserOptions, XmlParseError};
use libxml::readonly::RoNode;
use libxml::tree::Document as XmlDoc;
use libxml::xpath::Context;

use crate::error::{Error, Result};

/// An element selector: a local name plus exact-match attribute predicates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
  element: String,
  attributes: Vec<(String, String)>,
}

impl Query {
  /// Select elements with the given local name
  pub fn element(name: &str) -> Self {
    Query {
      element: name.to_string(),
      attributes: Vec::new(),
    }
  }

  /// Additionally require `name` to equal `value`
  pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
    self.attributes.push((name.to_string(), value.to_string()));
    self
  }

  /// The XPath expression selecting matching descendants of the context node
  pub fn to_descendant_xpath(&self) -> String {
    let mut xpath = format!(".//*[local-name()={}", xpath_literal(&self.element));
    for (name, value) in &self.attributes {
      xpath.push_str(&format!(" and @{}={}", name, xpath_literal(value)));
    }
    xpath.push(']');
    xpath
  }
}

/// Quote `value` as an XPath 1.0 string literal. XPath has no escapes, so
/// values holding both quote kinds are spliced together with `concat()`.
fn xpath_literal(value: &str) -> String {
  if !value.contains('\'') {
    format!("'{}'", value)
  } else if !value.contains('"') {
    format!("\"{}\"", value)
  } else {
    let parts: Vec<String> = value.split('\'').map(|part| format!("'{}'", part)).collect();
    format!("concat({})", parts.join(", \"'\", "))
  }
}

/// Parse the file at `path`, rejecting anything that is not well-formed.
/// libxml's default options recover a partial tree from broken markup.
pub fn parse_well_formed(path: &Path) -> std::result::Result<XmlDoc, XmlParseError> {
  let options = ParserOptions {
    recover: false,
    ..ParserOptions::default()
  };
  Parser::default().parse_file_with_options(&path.to_string_lossy(), options)
}

/// Descendant lookups over a parsed tree, in document order
pub trait Traversal {
  /// All descendants of `scope` matching `query`, in document order
  fn find_all(&self, scope: RoNode, query: &Query) -> Result<Vec<RoNode>>;

  /// The first descendant of `scope` matching `query`, if any
  fn find_first(&self, scope: RoNode, query: &Query) -> Result<Option<RoNode>> {
    Ok(self.find_all(scope, query)?.into_iter().next())
  }
}

/// `Traversal` backed by a libxml XPath context bound to one document
pub struct XPathTraversal {
  context: Context,
}

impl XPathTraversal {
  /// Bind a new XPath context to `doc`
  pub fn new(doc: &XmlDoc) -> Result<Self> {
    let context = Context::new(doc).map_err(|_| Error::XPath {
      query: String::from("<context>"),
    })?;
    Ok(XPathTraversal { context })
  }
}

impl Traversal for XPathTraversal {
  fn find_all(&self, scope: RoNode, query: &Query) -> Result<Vec<RoNode>> {
    let xpath = query.to_descendant_xpath();
    match self.context.node_evaluate_readonly(&xpath, scope) {
      Ok(found_payload) => Ok(found_payload.get_readonly_nodes_as_vec()),
      Err(_) => Err(Error::XPath { query: xpath }),
    }
  }
}
