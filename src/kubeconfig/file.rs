//! Loading and persisting a kubeconfig file.

use super::document::Document;
use super::error::{KubeconfigError, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// ConfigFile ties a document to the path it was loaded from and will be
/// saved to.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    is_new: bool,
    pub document: Document,
}

impl ConfigFile {
    /// Loads the document at `path`, or starts an empty one when no file
    /// exists there.
    ///
    /// A missing file is not an error. An unreadable or malformed file is,
    /// and no partial document is returned.
    pub fn load_or_init(path: impl AsRef<Path>) -> Result<ConfigFile> {
        let path = path.as_ref().to_path_buf();

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no kubeconfig found, starting a new one");
                return Ok(ConfigFile {
                    path,
                    is_new: true,
                    document: Document::new(),
                });
            }
            Err(e) => return Err(KubeconfigError::read(&path, e)),
        };

        let text = String::from_utf8(bytes)
            .map_err(|e| KubeconfigError::parse(format!("file is not valid UTF-8: {}", e)))?;
        let document = Document::from_yaml(&text)?;
        debug!(path = %path.display(), keys = document.root().len(), "loaded kubeconfig");

        Ok(ConfigFile {
            path,
            is_new: false,
            document,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when no file existed at load time.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Writes the document back, replacing the whole file.
    ///
    /// A file created here is readable and writable by its owner only.
    /// Missing parent directories are created.
    pub fn save(&self) -> Result<()> {
        let yaml = self.document.to_yaml()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| KubeconfigError::write(&self.path, e))?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(&self.path)
            .map_err(|e| KubeconfigError::write(&self.path, e))?;
        file.write_all(yaml.as_bytes())
            .map_err(|e| KubeconfigError::write(&self.path, e))?;

        debug!(path = %self.path.display(), bytes = yaml.len(), "saved kubeconfig");
        Ok(())
    }
}
