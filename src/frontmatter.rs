//! YAML metadata block at the top of a note.

use crate::error::{Error, IoResultExt, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("{0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("frontmatter must be a YAML mapping at the top level")]
    InvalidRootType,
}

/// A note split into its metadata mapping and markdown body.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub metadata: Mapping,
    /// Everything after the closing `---` line, byte for byte.
    pub body: String,
    has_block: bool,
}

impl Document {
    /// `published: true` (or the string `"true"` in any case). Missing means unpublished.
    pub fn published(&self) -> bool {
        match self.metadata.get("published") {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.metadata.insert(Value::from(key), value.into());
    }

    /// Writes the metadata block back in front of the untouched body.
    pub fn to_markdown(&self) -> Result<String, FrontmatterError> {
        if !self.has_block && self.metadata.is_empty() {
            return Ok(self.body.clone());
        }
        let yaml = if self.metadata.is_empty() {
            String::new()
        } else {
            serde_yaml::to_string(&self.metadata)?
        };
        Ok(format!("---\n{yaml}---\n{}", self.body))
    }
}

/// Splits a leading `---` block into its raw YAML and the body that follows
/// the closing `---` line. `None` when the text does not open with a closed block.
fn split_block(text: &str) -> Option<(&str, &str)> {
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let mut offset = first.len();
    for line in lines {
        if line.trim_end() == "---" {
            return Some((&text[first.len()..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

pub fn parse_document(text: &str) -> Result<Document, FrontmatterError> {
    let Some((yaml, body)) = split_block(text) else {
        return Ok(Document {
            metadata: Mapping::new(),
            body: text.to_string(),
            has_block: false,
        });
    };

    let metadata = if yaml.trim().is_empty() {
        Mapping::new()
    } else {
        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Mapping(mapping) => mapping,
            Value::Null => Mapping::new(),
            _ => return Err(FrontmatterError::InvalidRootType),
        }
    };

    Ok(Document {
        metadata,
        body: body.to_string(),
        has_block: true,
    })
}

pub fn read_document(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path).at(path)?;
    parse_document(&text).map_err(|e| Error::frontmatter(path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_published_flag() {
        let doc = parse_document("---\ntitle: Hello\npublished: true\n---\nBody\n").unwrap();
        assert!(doc.published());
        assert_eq!(doc.body, "Body\n");
    }

    #[test]
    fn missing_flag_is_unpublished() {
        let doc = parse_document("---\ntitle: Hello\n---\nBody\n").unwrap();
        assert!(!doc.published());
    }

    #[test]
    fn no_block_is_unpublished() {
        let doc = parse_document("# Just a note\n").unwrap();
        assert!(!doc.published());
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, "# Just a note\n");
    }

    #[test]
    fn string_flag_is_case_insensitive() {
        let doc = parse_document("---\npublished: \"True\"\n---\n").unwrap();
        assert!(doc.published());
        let doc = parse_document("---\npublished: \"yes\"\n---\n").unwrap();
        assert!(!doc.published());
    }

    #[test]
    fn malformed_block_is_an_error() {
        let err = parse_document("---\npublished: [true\n---\nBody\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Parse(_)));
    }

    #[test]
    fn non_mapping_block_is_an_error() {
        let err = parse_document("---\n- a\n- b\n---\nBody\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::InvalidRootType));
    }

    #[test]
    fn set_key_and_reserialize() {
        let body = "\nBody $x$\n\n";
        let input = format!("---\ntitle: Hello\npublished: true\n---\n{body}");
        let mut doc = parse_document(&input).unwrap();
        assert_eq!(doc.body, body);

        doc.set("mathjax", true);
        let out = doc.to_markdown().unwrap();
        assert_eq!(out, format!("---\ntitle: Hello\npublished: true\nmathjax: true\n---\n{body}"));

        let reparsed = parse_document(&out).unwrap();
        assert!(reparsed.published());
        assert_eq!(reparsed.body, body);
        assert_eq!(reparsed.metadata.get("title"), Some(&Value::from("Hello")));
        assert_eq!(reparsed.metadata.get("mathjax"), Some(&Value::Bool(true)));
    }

    #[test]
    fn body_keeps_crlf_and_missing_trailing_newline() {
        let doc = parse_document("---\r\npublished: true\r\n---\r\n\r\nLast line").unwrap();
        assert!(doc.published());
        assert_eq!(doc.body, "\r\nLast line");
    }

    #[test]
    fn empty_block_round_trips() {
        let text = "---\n---\nBody\n";
        let doc = parse_document(text).unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.to_markdown().unwrap(), text);
    }

    #[test]
    fn unclosed_block_is_plain_body() {
        let text = "---\npublished: true\nno closing line\n";
        let doc = parse_document(text).unwrap();
        assert!(!doc.published());
        assert_eq!(doc.body, text);
        assert_eq!(doc.to_markdown().unwrap(), text);
    }
}
