use std::path::PathBuf;

/// A source markdown file staged from the vault.
#[derive(Debug, Clone)]
pub struct Note {
    pub path: PathBuf,
    /// File name without the `.md` extension.
    pub name: String,
    pub published: bool,
}

impl Note {
    /// `<note dir>/assets/<note name>`, the folder Obsidian keeps the note's attachments in.
    pub fn asset_dir(&self) -> Option<PathBuf> {
        let dir = self.path.parent()?.join("assets").join(&self.name);
        dir.is_dir().then_some(dir)
    }
}

/// A Hexo post written into the output directory.
#[derive(Debug, Clone)]
pub struct Post {
    pub path: PathBuf,
    /// Normalized note name; the post's file stem and its asset folder name.
    pub slug: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Points at another note (`other.md`, `dir/other.md#heading`).
    Note,
    /// Heading in the current note (`#heading`).
    Anchor,
    /// File under an `assets/` folder.
    Asset,
    /// Anything else local to the site; only slug-normalized.
    Site,
    /// Has a URL scheme (`https:`, `mailto:`); left untouched.
    External,
}

/// An inline `[text](target)` link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub target: String,
}

impl Link {
    pub fn new(text: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: target.into(),
        }
    }

    /// Target without its `#fragment`.
    pub fn path(&self) -> &str {
        self.target
            .split_once('#')
            .map_or(self.target.as_str(), |(path, _)| path)
    }

    pub fn fragment(&self) -> Option<&str> {
        self.target.split_once('#').map(|(_, fragment)| fragment)
    }

    pub fn kind(&self) -> LinkKind {
        if has_scheme(&self.target) {
            LinkKind::External
        } else if self.path().contains(".md") {
            LinkKind::Note
        } else if self.target.starts_with('#') {
            LinkKind::Anchor
        } else if self.target.contains("assets/") {
            LinkKind::Asset
        } else {
            LinkKind::Site
        }
    }
}

/// URL schemes that point off the site.
const EXTERNAL_SCHEMES: [&str; 9] = [
    "http", "https", "mailto", "ftp", "ftps", "file", "tel", "data", "obsidian",
];

fn has_scheme(target: &str) -> bool {
    target.split_once(':').is_some_and(|(scheme, _)| {
        EXTERNAL_SCHEMES
            .iter()
            .any(|known| scheme.eq_ignore_ascii_case(known))
    })
}

/// Counts gathered over one conversion run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub published: usize,
    pub skipped: usize,
    pub failed: usize,
    pub assets: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_links() {
        let cases = vec![
            ("other.md", LinkKind::Note),
            ("sub/dir/other-note.md#Some Heading", LinkKind::Note),
            ("#Heading", LinkKind::Anchor),
            ("../assets/My Note/pic 1.png", LinkKind::Asset),
            ("/tags/rust", LinkKind::Site),
            ("https://example.com/README.md", LinkKind::External),
            ("mailto:me@example.com", LinkKind::External),
            ("HTTPS://example.com", LinkKind::External),
            ("Chapter:1.md", LinkKind::Note),
            ("assets/N/Time:1.png", LinkKind::Asset),
        ];
        for (target, expected) in cases {
            assert_eq!(Link::new("x", target).kind(), expected, "Mismatch for {:?}", target);
        }
    }

    #[test]
    fn splits_fragment() {
        let link = Link::new("x", "notes/a.md#Part Two");
        assert_eq!(link.path(), "notes/a.md");
        assert_eq!(link.fragment(), Some("Part Two"));

        let link = Link::new("x", "notes/a.md");
        assert_eq!(link.path(), "notes/a.md");
        assert_eq!(link.fragment(), None);
    }

    #[test]
    fn md_after_fragment_is_not_a_note() {
        assert_eq!(Link::new("x", "#see.md").kind(), LinkKind::Anchor);
    }
}
