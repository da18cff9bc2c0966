use crate::domain::{Link, LinkKind};
use crate::frontmatter::read_document;
use crate::slug;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::path::{Component, Path, PathBuf};

static MD_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("valid link regex"));

const ASSETS_SEGMENT: &str = "assets/";

/// Answers questions about other notes while links are rewritten.
pub trait LinkResolver {
    /// Whether the note at `path` will become a post.
    fn is_published(&self, path: &Path) -> bool;

    /// Absolute path of `relative_link` as seen from the note at `note_path`.
    fn resolve(&self, note_path: &Path, relative_link: &str) -> PathBuf {
        let decoded = relative_link.replace("%20", " ");
        let dir = note_path.parent().unwrap_or_else(|| Path::new(""));
        clean_path(&dir.join(decoded))
    }
}

/// Reads the publish flag straight from the staged vault.
#[derive(Debug, Default, Clone, Copy)]
pub struct VaultResolver;

impl LinkResolver for VaultResolver {
    fn is_published(&self, path: &Path) -> bool {
        if !path.is_file() {
            return false;
        }
        match read_document(path) {
            Ok(doc) => doc.published(),
            Err(e) => {
                warn!("Treating linked note as unpublished: {e}");
                false
            }
        }
    }
}

/// Rewrites the links of one note for its post.
pub struct LinkRewriter<'a, R: LinkResolver> {
    resolver: &'a R,
    note_path: &'a Path,
    post_slug: &'a str,
}

impl<'a, R: LinkResolver> LinkRewriter<'a, R> {
    pub fn new(resolver: &'a R, note_path: &'a Path, post_slug: &'a str) -> Self {
        Self {
            resolver,
            note_path,
            post_slug,
        }
    }

    pub fn rewrite(&self, content: &str) -> String {
        MD_LINK_RE
            .replace_all(content, |caps: &Captures| {
                let link = Link::new(&caps[1], &caps[2]);
                let rewritten = self.rewrite_link(&link);
                debug!("Link {} -> {}", &caps[0], rewritten);
                rewritten
            })
            .into_owned()
    }

    pub fn rewrite_link(&self, link: &Link) -> String {
        let (mut path, fragment) = match link.kind() {
            LinkKind::External => return format!("[{}]({})", link.text, link.target),
            LinkKind::Note => {
                let target = self.resolver.resolve(self.note_path, link.path());
                if !self.resolver.is_published(&target) {
                    return link.text.clone();
                }
                (format!("/{}", note_stem(link.path())), heading(link.fragment()))
            }
            LinkKind::Anchor => (format!("/{}", self.post_slug), heading(link.fragment())),
            LinkKind::Asset | LinkKind::Site => (link.target.clone(), String::new()),
        };

        let mut text = link.text.as_str();
        if let Some(idx) = path.find(ASSETS_SEGMENT) {
            path = format!("/{}", &path[idx + ASSETS_SEGMENT.len()..]);
            text = strip_size_suffix(text);
        }

        format!("[{}]({}{})", text, slug::normalize(&path), fragment)
    }
}

/// Convenience wrapper over [`LinkRewriter`].
pub fn rewrite_links<R: LinkResolver>(
    content: &str,
    resolver: &R,
    note_path: &Path,
    post_slug: &str,
) -> String {
    LinkRewriter::new(resolver, note_path, post_slug).rewrite(content)
}

fn heading(fragment: Option<&str>) -> String {
    fragment
        .map(|f| format!("/#{}", slug::normalize_fragment(f)))
        .unwrap_or_default()
}

/// Drops Obsidian's image width hint: `shot|500` -> `shot`.
fn strip_size_suffix(text: &str) -> &str {
    match text.rsplit_once('|') {
        Some((alt, size)) if !size.is_empty() && size.bytes().all(|b| b.is_ascii_digit()) => alt,
        _ => text,
    }
}

/// `sub/dir/Other Note.md` -> `Other Note`; every post sits at the site root.
fn note_stem(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.strip_suffix(".md") {
        Some(stem) => stem.to_string(),
        None => name.replace(".md", ""),
    }
}

/// Resolves `.` and `..` without touching the filesystem.
fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
