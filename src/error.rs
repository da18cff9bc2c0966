use std::path::{Path, PathBuf};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while turning a vault into Hexo posts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required input or output directory is missing or not a directory.
    #[error("{role} directory does not exist: {}", path.display())]
    InvalidDirectory { role: &'static str, path: PathBuf },
    /// The metadata block at the top of a note could not be parsed.
    #[error("Frontmatter parse error in {}: {message}", path.display())]
    Frontmatter { path: PathBuf, message: String },
    /// A filesystem operation failed.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

impl Error {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn frontmatter(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }
}

/// Attaches the offending path to a bare `std::io::Error`.
pub(crate) trait IoResultExt<T> {
    fn at(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn at(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| Error::io(path, e))
    }
}
