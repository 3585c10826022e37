//! One load, merge and save pass over a kubeconfig file.

use crate::kubeconfig::{ConfigFile, KubeconfigError, Result};
use crate::source::ParameterSource;
use once_cell::sync::Lazy;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;

static HOME_DIR: Lazy<Option<PathBuf>> = Lazy::new(dirs::home_dir);

/// Environment variable listing kubeconfig files, separated like `PATH`.
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "~/.kube/config";

pub const DEFAULT_CLUSTER_KEY: &str = "eks-cluster";
pub const DEFAULT_USER_KEY: &str = "eks-user";
pub const DEFAULT_CONTEXT_KEY: &str = "eks-cluster";

/// Request names the cluster to register and where to register it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub region: String,
    pub cluster: String,
    pub config_path: PathBuf,
    pub cluster_key: String,
    pub user_key: String,
    pub context_key: String,
}

impl Request {
    /// A request using the default entry names.
    pub fn new(region: impl Into<String>, cluster: impl Into<String>, config_path: impl Into<PathBuf>) -> Self {
        Request {
            region: region.into(),
            cluster: cluster.into(),
            config_path: config_path.into(),
            cluster_key: DEFAULT_CLUSTER_KEY.to_string(),
            user_key: DEFAULT_USER_KEY.to_string(),
            context_key: DEFAULT_CONTEXT_KEY.to_string(),
        }
    }

    /// Rejects empty inputs before anything is fetched or read.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("region", self.region.as_str()),
            ("name", self.cluster.as_str()),
            ("config-key-cluster", self.cluster_key.as_str()),
            ("config-key-user", self.user_key.as_str()),
            ("config-key-context", self.context_key.as_str()),
        ];
        for (flag, value) in required {
            if value.is_empty() {
                return Err(KubeconfigError::empty_argument(flag));
            }
        }
        if self.config_path.as_os_str().is_empty() {
            return Err(KubeconfigError::empty_argument("config"));
        }
        Ok(())
    }
}

/// Outcome reports which file was written and whether it was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub path: PathBuf,
    pub created: bool,
}

impl Outcome {
    /// The line printed for a successful run.
    pub fn message(&self) -> String {
        let verb = if self.created { "generated" } else { "updated" };
        format!(
            "[Success] kubeconfig file '{}' has been {}.",
            self.path.display(),
            verb
        )
    }
}

/// Expands a leading `~` to the home directory and anchors relative paths
/// at the current directory.
pub fn resolve_config_path(raw: &str) -> PathBuf {
    let expanded = match (raw.strip_prefix('~'), HOME_DIR.as_ref()) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(raw),
    };
    absolutize(&expanded)
}

/// The file to write when no `--config` is given.
///
/// `kubeconfig` is the value of `KUBECONFIG`. Its first non-empty entry is
/// used, like `kubectl` does for writes; otherwise `~/.kube/config`.
pub fn default_config_path(kubeconfig: Option<&OsStr>) -> PathBuf {
    kubeconfig
        .into_iter()
        .flat_map(std::env::split_paths)
        .find(|p| !p.as_os_str().is_empty())
        .map(|p| absolutize(&p))
        .unwrap_or_else(|| resolve_config_path(DEFAULT_CONFIG_PATH))
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() || path.as_os_str().is_empty() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Registers the requested cluster in the kubeconfig.
///
/// Parameters are fetched before the file is opened, so a failed fetch
/// leaves the file alone. Any error stops the run before the file is
/// written.
pub fn execute(request: &Request, source: &dyn ParameterSource) -> Result<Outcome> {
    request.validate()?;

    let params = source.fetch(&request.region, &request.cluster)?;
    info!(cluster = %params.cluster_name, endpoint = %params.endpoint, "fetched cluster parameters");

    let mut file = ConfigFile::load_or_init(&request.config_path)?;
    let doc = &mut file.document;
    doc.set_cluster(&request.cluster_key, &params.endpoint, &params.ca_data)?;
    doc.set_user(&request.user_key, &params.cluster_name)?;
    doc.set_context(&request.context_key, &request.cluster_key, &request.user_key)?;
    doc.set_current_context(&request.context_key);
    file.save()?;

    info!(path = %file.path().display(), created = file.is_new(), "kubeconfig written");
    Ok(Outcome {
        path: file.path().to_path_buf(),
        created: file.is_new(),
    })
}
