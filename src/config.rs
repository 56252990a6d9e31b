use crate::application::OutboundPolicy;
use clap::{Parser, Subcommand};
use std::fmt;

/// Account used when neither `--user` nor `FOLIO_GITHUB_USER` is given at runtime
pub const DEFAULT_USERNAME: &str = match option_env!("FOLIO_GITHUB_USER") {
    Some(user) => user,
    None => "octocat",
};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// folio - GitHub activity for a personal portfolio
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version)]
#[command(about = "Public repositories and a contribution heatmap from the GitHub API", long_about = None)]
pub struct Cli {
    /// GitHub account whose public data is shown
    #[arg(global = true, long, env = "FOLIO_GITHUB_USER", default_value = DEFAULT_USERNAME)]
    pub user: String,

    /// GitHub REST API base URL
    #[arg(global = true, long, env = "FOLIO_GITHUB_API", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Deployment context, decides whether GitHub is called at all
    #[arg(global = true, long, env = "FOLIO_CONTEXT", value_enum, default_value_t = DeploymentContext::ProductionClient)]
    pub context: DeploymentContext,

    /// Never call the GitHub API
    #[arg(global = true, long, env = "FOLIO_SKIP_GITHUB")]
    pub skip_github: bool,

    /// Allow GitHub calls from a production client
    #[arg(global = true, long, env = "FOLIO_ENABLE_GITHUB")]
    pub enable_github: bool,

    /// Suppress progress indicators and non-error output
    #[arg(global = true, long, short)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List public, non-fork, non-archived repositories
    Repos {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the contribution heatmap and streak statistics
    Activity {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open a repository's GitHub page in the browser
    Open {
        /// Repository name or owner/name
        name: String,
    },

    /// Snapshot cache commands
    Data {
        #[command(subcommand)]
        action: DataCommands,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type
        shell: clap_complete::Shell,
    },

    /// Show the current version
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum DataCommands {
    /// Fetch repositories and activity and store them locally
    Refresh,
    /// Clear local cache
    Clear,
    /// Show cache statistics
    Status,
    /// Export cached data as JSON to stdout
    Export,
    /// Show the database file path
    Reveal,
}

/// Where the pipeline is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DeploymentContext {
    Test,
    Development,
    ProductionServer,
    ProductionClient,
}

impl fmt::Display for DeploymentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentContext::Test => write!(f, "test"),
            DeploymentContext::Development => write!(f, "development"),
            DeploymentContext::ProductionServer => write!(f, "production-server"),
            DeploymentContext::ProductionClient => write!(f, "production-client"),
        }
    }
}

/// Fixed account and endpoint the client talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubSettings {
    pub username: String,
    pub api_base: String,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl Cli {
    pub fn github_settings(&self) -> GitHubSettings {
        GitHubSettings {
            username: self.user.clone(),
            api_base: self.api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn outbound_policy(&self) -> OutboundPolicy {
        OutboundPolicy {
            context: self.context,
            force_skip: self.skip_github,
            force_enable: self.enable_github,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployment_context_display() {
        assert_eq!(DeploymentContext::Test.to_string(), "test");
        assert_eq!(DeploymentContext::ProductionServer.to_string(), "production-server");
        assert_eq!(DeploymentContext::ProductionClient.to_string(), "production-client");
    }

    #[test]
    fn test_cli_builds_settings_and_policy() {
        let cli = Cli::try_parse_from([
            "folio",
            "--user",
            "someone",
            "--api-base",
            "http://localhost:8080/",
            "--context",
            "development",
            "--enable-github",
            "repos",
        ])
        .unwrap();

        let settings = cli.github_settings();
        assert_eq!(settings.username, "someone");
        assert_eq!(settings.api_base, "http://localhost:8080");

        let policy = cli.outbound_policy();
        assert_eq!(policy.context, DeploymentContext::Development);
        assert!(policy.force_enable);
        assert!(!policy.force_skip);
        assert!(matches!(cli.command, Some(Commands::Repos { json: false })));
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
