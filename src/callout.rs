use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt;

static AD_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(ad-(?:note|tip|warning|quote|fail))\s*([\s\S]*?)```")
        .expect("valid admonition regex")
});

/// Severity of a `{% note %}` block in the Butterfly theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

impl Severity {
    /// Maps an admonition fence tag (`ad-warning`) to a severity. Unknown tags are `Info`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.strip_prefix("ad-").unwrap_or(tag) {
            "warning" => Severity::Warning,
            "fail" => Severity::Danger,
            _ => Severity::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn note_block(severity: Severity, content: &str) -> String {
    format!("{{% note {severity} %}}\n{content}\n{{% endnote %}}")
}

/// Replaces ```` ```ad-note ```` style fenced blocks with Hexo `{% note %}` tags.
pub fn convert_callouts(text: &str) -> String {
    AD_BLOCK_RE
        .replace_all(text, |caps: &Captures| {
            note_block(Severity::from_tag(&caps[1]), caps[2].trim())
        })
        .into_owned()
}
