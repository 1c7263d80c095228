//! On-disk snippet content.
//!
//! Layout: `<root>/<language>/<derived name>.txt`, where the derived name is
//! the title with every whitespace run collapsed to `_`. Writes go through a
//! temp file in the target directory and are persisted to the destination,
//! so readers never see a half-written snippet.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config::{CollisionPolicy, StoreConfig};
use crate::error::{Result, SnippetError};

const EXTENSION: &str = "txt";

#[derive(Debug, Clone)]
pub struct SnippetStore {
    root: PathBuf,
    on_collision: CollisionPolicy,
}

impl SnippetStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            root: config.root.clone(),
            on_collision: config.on_collision,
        }
    }

    /// Create the root directory if it is missing.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Create (if absent) and return the directory for `language`.
    ///
    /// Concurrent callers for the same language all succeed.
    pub fn ensure_language_dir(&self, language: &str) -> Result<PathBuf> {
        check_language(language)?;
        let dir = self.root.join(language);
        if !dir.is_dir() {
            log::debug!("creating language directory {}", dir.display());
        }
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Write `text` verbatim for `(language, title)` and return its path.
    ///
    /// An existing file of the same derived name is handled according to
    /// the configured [`CollisionPolicy`]. `Fail` and `Suffix` never replace
    /// a file, even one created by another process after the lookup.
    pub fn write(&self, language: &str, title: &str, text: &str) -> Result<PathBuf> {
        let name = derived_file_name(title)?;
        let dir = self.ensure_language_dir(language)?;
        let dest = dir.join(format!("{}.{}", name, EXTENSION));

        let mut tmp = temp_file_in(&dir)?;
        tmp.write_all(text.as_bytes())?;

        match self.on_collision {
            CollisionPolicy::Overwrite => {
                if dest.exists() {
                    log::debug!("overwriting existing snippet file {}", dest.display());
                }
                tmp.persist(&dest).map_err(|e| SnippetError::Io(e.error))?;
                Ok(dest)
            }
            CollisionPolicy::Fail => match tmp.persist_noclobber(&dest) {
                Ok(_) => Ok(dest),
                Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                    Err(SnippetError::validation(format!(
                        "snippet file already exists: {}",
                        dest.display()
                    )))
                }
                Err(e) => Err(SnippetError::Io(e.error)),
            },
            CollisionPolicy::Suffix => {
                let mut n = 1u32;
                loop {
                    let candidate = if n == 1 {
                        dest.clone()
                    } else {
                        dir.join(format!("{}_{}.{}", name, n, EXTENSION))
                    };
                    match tmp.persist_noclobber(&candidate) {
                        Ok(_) => {
                            if n > 1 {
                                log::debug!("title collision, wrote {}", candidate.display());
                            }
                            return Ok(candidate);
                        }
                        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                            tmp = e.file;
                            n += 1;
                        }
                        Err(e) => return Err(SnippetError::Io(e.error)),
                    }
                }
            }
        }
    }

    /// Read a snippet body back by the path recorded in the index.
    pub fn read(&self, file_path: &Path) -> Result<String> {
        fs::read_to_string(file_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                SnippetError::NotFound(format!("snippet file {}", file_path.display()))
            }
            _ => SnippetError::Io(e),
        })
    }
}

/// Collapse every whitespace run in `title` to a single `_`.
///
/// Leading and trailing whitespace is dropped. Fails when the result could
/// not serve as a plain file name.
pub fn derived_file_name(title: &str) -> Result<String> {
    let name = title.split_whitespace().collect::<Vec<_>>().join("_");
    if name.is_empty() || name.contains(['/', '\\']) {
        return Err(SnippetError::validation(format!(
            "title cannot be used as a file name: {:?}",
            title
        )));
    }
    Ok(name)
}

/// Languages are used verbatim as directory names and must stay under the root.
pub fn check_language(language: &str) -> Result<()> {
    if language.trim().is_empty() {
        return Err(SnippetError::validation("empty language"));
    }
    if language == "." || language == ".." || language.contains(['/', '\\']) {
        return Err(SnippetError::validation(format!(
            "language cannot be used as a directory name: {:?}",
            language
        )));
    }
    Ok(())
}

/// Temp file in `dir` created with the same default mode as a plain
/// `File::create` (0666 less the umask), rather than tempfile's 0600.
fn temp_file_in(dir: &Path) -> Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".snip-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    Ok(builder.tempfile_in(dir)?)
}
