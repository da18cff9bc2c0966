use std::path::{Path, PathBuf};
use clap::Parser;
use log::{debug, info, warn};
use crate::content::{FormatOptions, format_post};
use crate::domain::{BuildReport, Note, Post};
use crate::frontmatter::read_document;
use crate::links::VaultResolver;

pub mod callout;
pub mod content;
pub mod domain;
pub mod error;
pub mod frontmatter;
pub mod fs;
pub mod links;
pub mod slug;

pub use error::{Error, Result};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the Obsidian vault
    #[arg(short, long)]
    pub vault_path: PathBuf,

    /// Path to the Hexo posts directory (usually `source/_posts`)
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Extra file or folder names to leave out of the conversion
    #[arg(short, long)]
    pub ignore: Vec<String>,

    /// Set `mathjax: true` on posts that contain TeX formulas
    #[arg(long)]
    pub math: bool,

    /// Log every note and link decision
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Debug, Default, Clone)]
pub struct BuildOptions {
    pub ignore: Vec<String>,
    pub format: FormatOptions,
}

impl Args {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            ignore: self.ignore.clone(),
            format: FormatOptions { math: self.math },
        }
    }
}

pub fn validate_dir(role: &'static str, path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::InvalidDirectory {
            role,
            path: path.to_path_buf(),
        })
    }
}

/// Converts every published note of the vault into a Hexo post bundle in `output_dir`.
pub fn build_posts(vault_path: &Path, output_dir: &Path, options: &BuildOptions) -> Result<BuildReport> {
    validate_dir("Obsidian vault", vault_path)?;
    validate_dir("Hexo posts", output_dir)?;
    info!("Converting {} into {}", vault_path.display(), output_dir.display());

    // Every note stays readable in the staging copy until all posts are
    // written, since links are checked against the target's publish flag.
    let staging = fs::stage_vault(vault_path, &options.ignore)?;
    let resolver = VaultResolver;
    let mut report = BuildReport::default();

    for note_path in fs::markdown_files(staging.path())? {
        let note = match load_note(&note_path) {
            Ok(note) => note,
            Err(e @ Error::Frontmatter { .. }) => {
                warn!("Skipping note: {e}");
                report.failed += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        if !note.published {
            debug!("Not published: {}", note.path.display());
            report.skipped += 1;
            continue;
        }

        let post = create_post_bundle(&note, output_dir, &mut report)?;
        format_post(&note, &post, &resolver, &options.format)?;
        info!("Wrote post: {}", post.path.display());
        report.published += 1;
    }

    fs::remove_staging(staging)?;
    info!(
        "Converted {} notes ({} unpublished, {} failed, {} assets)",
        report.published, report.skipped, report.failed, report.assets
    );
    Ok(report)
}

fn load_note(path: &Path) -> Result<Note> {
    let doc = read_document(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    Ok(Note {
        path: path.to_path_buf(),
        name,
        published: doc.published(),
    })
}

/// Copies the note to `<output_dir>/<slug>.md` and its assets to `<output_dir>/<slug>/`.
fn create_post_bundle(note: &Note, output_dir: &Path, report: &mut BuildReport) -> Result<Post> {
    let slug = slug::normalize(&note.name);
    let post = Post {
        path: output_dir.join(format!("{slug}.md")),
        slug,
    };
    fs::replace_file(&note.path, &post.path)?;

    if let Some(asset_dir) = note.asset_dir() {
        let post_assets = output_dir.join(&post.slug);
        let copied = fs::copy_asset_bundle(&asset_dir, &post_assets)?;
        info!("Copied {copied} assets into {}", post_assets.display());
        report.assets += copied;
    }
    Ok(post)
}
