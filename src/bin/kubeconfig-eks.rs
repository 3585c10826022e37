//! kubeconfig-eks - generate/update a kubeconfig file from Amazon EKS
//! cluster information.

use std::process::ExitCode;

use clap::Parser;
use kubeconfig_eks::logging::{init_logging, Verbosity};
use kubeconfig_eks::run::{
    self, Request, DEFAULT_CLUSTER_KEY, DEFAULT_CONTEXT_KEY, DEFAULT_USER_KEY, KUBECONFIG_ENV,
};
use kubeconfig_eks::AwsCliSource;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "kubeconfig-eks", version)]
#[command(about = "generate/update kubeconfig file from Amazon EKS cluster information")]
struct Cli {
    /// Kubeconfig file to create or update [default: first entry of $KUBECONFIG, else ~/.kube/config]
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Cluster name
    #[arg(short, long, env = "EKS_CLUSTER_NAME")]
    name: String,

    /// Cluster region
    #[arg(short, long, env = "AWS_REGION")]
    region: String,

    /// Name of the 'cluster' entry in the config file
    #[arg(long, default_value = DEFAULT_CLUSTER_KEY)]
    config_key_cluster: String,

    /// Name of the 'user' entry in the config file
    #[arg(long, default_value = DEFAULT_USER_KEY)]
    config_key_user: String,

    /// Name of the 'context' entry in the config file
    #[arg(long, default_value = DEFAULT_CONTEXT_KEY)]
    config_key_context: String,

    /// AWS command line client used to describe the cluster
    #[arg(long, env = "KUBECONFIG_EKS_AWS", default_value = "aws")]
    aws_command: String,

    /// Log every step to stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Disable diagnostic logging
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn verbosity(&self) -> Verbosity {
        if self.verbose {
            Verbosity::Verbose
        } else if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }

    fn request(&self) -> Request {
        Request {
            region: self.region.clone(),
            cluster: self.name.clone(),
            config_path: match &self.config {
                Some(raw) => run::resolve_config_path(raw),
                None => run::default_config_path(std::env::var_os(KUBECONFIG_ENV).as_deref()),
            },
            cluster_key: self.config_key_cluster.clone(),
            user_key: self.config_key_user.clone(),
            context_key: self.config_key_context.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    let source = AwsCliSource::new(cli.aws_command.as_str());
    match run::execute(&cli.request(), &source) {
        Ok(outcome) => {
            println!("{}", outcome.message());
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!(code = e.exit_code(), "run failed");
            eprintln!("{}", e.diagnostic());
            ExitCode::from(e.exit_code())
        }
    }
}
