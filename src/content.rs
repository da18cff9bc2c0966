use crate::callout::convert_callouts;
use crate::domain::{Note, Post};
use crate::error::{Error, IoResultExt, Result};
use crate::frontmatter::parse_document;
use crate::links::{LinkResolver, rewrite_links};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;

static MATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\$[\s\S]+?\$\$|\$[^\s$]([^$\n]*[^\s$])?\$").expect("valid math regex")
});

#[derive(Debug, Default, Clone, Copy)]
pub struct FormatOptions {
    /// Mark posts containing TeX formulas with `mathjax: true`.
    pub math: bool,
}

/// Rewrites a post's text: links first, then callouts, then the math flag.
pub fn format_content<R: LinkResolver>(
    content: &str,
    note: &Note,
    post: &Post,
    resolver: &R,
    options: &FormatOptions,
) -> Result<String> {
    let rewritten = rewrite_links(content, resolver, &note.path, &post.slug);
    let rewritten = convert_callouts(&rewritten);

    if !options.math {
        return Ok(rewritten);
    }

    let mut doc =
        parse_document(&rewritten).map_err(|e| Error::frontmatter(&note.path, e.to_string()))?;
    if !contains_math(&doc.body) {
        return Ok(rewritten);
    }
    debug!("Enabling mathjax for {}", post.path.display());
    doc.set("mathjax", true);
    doc.to_markdown()
        .map_err(|e| Error::frontmatter(&note.path, e.to_string()))
}

/// Formats the copied post in place.
pub fn format_post<R: LinkResolver>(
    note: &Note,
    post: &Post,
    resolver: &R,
    options: &FormatOptions,
) -> Result<()> {
    let content = fs::read_to_string(&post.path).at(&post.path)?;
    let formatted = format_content(&content, note, post, resolver, options)?;
    fs::write(&post.path, formatted).at(&post.path)?;
    Ok(())
}

pub fn contains_math(body: &str) -> bool {
    MATH_RE.is_match(body)
}
