//! Typed records for the named entries of the `clusters`, `users` and
//! `contexts` lists.

use crate::value::{Map, Value};

/// API version of the exec credential plugin protocol.
pub const EXEC_API_VERSION: &str = "client.authentication.k8s.io/v1alpha1";

/// Credential plugin invoked by clients to obtain a token.
pub const EXEC_COMMAND: &str = "heptio-authenticator-aws";

/// Entry is a named element of one of the reserved top-level lists.
pub trait Entry {
    /// Top-level key of the list this entry lives in.
    const LIST_KEY: &'static str;
    /// Key of the nested mapping holding the type-specific fields.
    const PAYLOAD_KEY: &'static str;

    /// Unique name of the entry within its list.
    fn name(&self) -> &str;

    /// The type-specific fields.
    fn payload(&self) -> Map;

    /// Renders the entry as a document node.
    ///
    /// Keys are written in alphabetical order, the layout kubectl produces.
    fn to_value(&self) -> Value {
        let name = ("name", Value::from(self.name()));
        let payload = (Self::PAYLOAD_KEY, Value::Map(self.payload()));
        let fields = if Self::PAYLOAD_KEY < "name" {
            [payload, name]
        } else {
            [name, payload]
        };
        Value::Map(fields.into_iter().collect())
    }
}

/// A cluster endpoint and the CA bundle used to verify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterEntry {
    pub name: String,
    pub server: String,
    pub certificate_authority_data: String,
}

impl ClusterEntry {
    pub fn new(
        name: impl Into<String>,
        server: impl Into<String>,
        certificate_authority_data: impl Into<String>,
    ) -> Self {
        ClusterEntry {
            name: name.into(),
            server: server.into(),
            certificate_authority_data: certificate_authority_data.into(),
        }
    }
}

impl Entry for ClusterEntry {
    const LIST_KEY: &'static str = "clusters";
    const PAYLOAD_KEY: &'static str = "cluster";

    fn name(&self) -> &str {
        &self.name
    }

    fn payload(&self) -> Map {
        [
            ("certificate-authority-data", self.certificate_authority_data.as_str()),
            ("server", self.server.as_str()),
        ]
        .into_iter()
        .collect()
    }
}

/// An exec credential plugin invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecConfig {
    pub api_version: String,
    pub command: String,
    pub args: Vec<String>,
}

impl ExecConfig {
    /// The authenticator call that issues a token for `cluster_name`.
    ///
    /// Argument order is positional and must stay `token -i <cluster>`.
    pub fn aws_authenticator(cluster_name: impl Into<String>) -> Self {
        ExecConfig {
            api_version: EXEC_API_VERSION.to_string(),
            command: EXEC_COMMAND.to_string(),
            args: vec!["token".to_string(), "-i".to_string(), cluster_name.into()],
        }
    }

    fn to_map(&self) -> Map {
        let args: Vec<Value> = self.args.iter().map(|a| Value::from(a.as_str())).collect();
        let mut exec = Map::new();
        exec.set("apiVersion", self.api_version.as_str());
        exec.set("args", args);
        exec.set("command", self.command.as_str());
        exec
    }
}

/// A credential source that runs an exec plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntry {
    pub name: String,
    pub exec: ExecConfig,
}

impl UserEntry {
    pub fn new(name: impl Into<String>, exec: ExecConfig) -> Self {
        UserEntry {
            name: name.into(),
            exec,
        }
    }
}

impl Entry for UserEntry {
    const LIST_KEY: &'static str = "users";
    const PAYLOAD_KEY: &'static str = "user";

    fn name(&self) -> &str {
        &self.name
    }

    fn payload(&self) -> Map {
        let mut user = Map::new();
        user.set("exec", self.exec.to_map());
        user
    }
}

/// A named pairing of a cluster entry with a user entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextEntry {
    pub name: String,
    pub cluster: String,
    pub user: String,
}

impl ContextEntry {
    pub fn new(name: impl Into<String>, cluster: impl Into<String>, user: impl Into<String>) -> Self {
        ContextEntry {
            name: name.into(),
            cluster: cluster.into(),
            user: user.into(),
        }
    }
}

impl Entry for ContextEntry {
    const LIST_KEY: &'static str = "contexts";
    const PAYLOAD_KEY: &'static str = "context";

    fn name(&self) -> &str {
        &self.name
    }

    fn payload(&self) -> Map {
        [("cluster", self.cluster.as_str()), ("user", self.user.as_str())]
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::to_yaml;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cluster_entry_layout() {
        let entry = ClusterEntry::new("eks-cluster", "https://x.example", "QUJD");
        let expected = "\
cluster:
  certificate-authority-data: QUJD
  server: https://x.example
name: eks-cluster
";
        assert_eq!(to_yaml(&entry.to_value()).unwrap(), expected);
    }

    #[test]
    fn test_user_entry_layout() {
        let entry = UserEntry::new("eks-user", ExecConfig::aws_authenticator("prod"));
        let expected = "\
name: eks-user
user:
  exec:
    apiVersion: client.authentication.k8s.io/v1alpha1
    args:
    - token
    - -i
    - prod
    command: heptio-authenticator-aws
";
        assert_eq!(to_yaml(&entry.to_value()).unwrap(), expected);
    }

    #[test]
    fn test_context_entry_layout() {
        let entry = ContextEntry::new("eks-cluster", "eks-cluster", "eks-user");
        let expected = "\
context:
  cluster: eks-cluster
  user: eks-user
name: eks-cluster
";
        assert_eq!(to_yaml(&entry.to_value()).unwrap(), expected);
    }

    #[test]
    fn test_exec_args_order() {
        let exec = ExecConfig::aws_authenticator("prod");
        assert_eq!(exec.args, vec!["token", "-i", "prod"]);
        assert_eq!(exec.command, EXEC_COMMAND);
        assert_eq!(exec.api_version, EXEC_API_VERSION);
    }
}
