//! # kubeconfig-eks
//!
//! Generates or updates a kubeconfig file with the connection parameters of
//! an Amazon EKS cluster.
//!
//! Existing files are merged rather than overwritten: the cluster, user and
//! context entries are upserted by name, so hand-edited content, unknown keys
//! and entry order survive, and repeated runs produce identical output.
//!
//! ## Modules
//!
//! - [`value`] - Order-preserving in-memory representation of YAML documents
//! - [`kubeconfig`] - Document loading, named-entry upserts and saving
//! - [`source`] - Where cluster connection parameters come from
//! - [`run`] - A single fetch, merge and save pass
//! - [`logging`] - Diagnostic logging setup

pub mod kubeconfig;
pub mod logging;
pub mod run;
pub mod source;
pub mod value;

pub use kubeconfig::{ConfigFile, Document, KubeconfigError, Upsert};
pub use run::{execute, Outcome, Request};
pub use source::{AwsCliSource, ClusterParameters, ParameterSource, StaticSource};
pub use value::Value;
