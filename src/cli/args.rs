//! Command-line argument parsing

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "craas")]
#[command(about = "Manage container registries, repositories and tokens through the CRaaS API")]
#[command(version)]
pub struct Args {
    /// API token
    #[arg(long, env = "CRAAS_TOKEN", hide_env_values = true)]
    pub token: String,

    /// API endpoint; its suffix (v1 or v2) selects the API generation
    #[arg(long, env = "CRAAS_ENDPOINT")]
    pub endpoint: String,

    /// Overall request timeout in seconds
    #[arg(long, short = 't', default_value = "120")]
    pub timeout: u64,

    #[arg(long, short = 'v', help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, short = 'q', conflicts_with = "verbose", help = "Only print results and errors")]
    pub quiet: bool,

    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Registries (v1)
    #[command(subcommand)]
    Registries(RegistryCommand),
    /// Repositories, images and tags (v1)
    #[command(subcommand)]
    Repositories(RepositoryCommand),
    /// Garbage collection (v1)
    #[command(subcommand)]
    Gc(GcCommand),
    /// Access tokens (v2)
    #[command(subcommand)]
    Tokens(TokenCommand),
}

impl Command {
    /// Heading shown above text output
    pub fn title(&self) -> &'static str {
        match self {
            Command::Registries(_) => "Registries",
            Command::Repositories(_) => "Repositories",
            Command::Gc(_) => "Garbage collection",
            Command::Tokens(_) => "Tokens",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum RegistryCommand {
    List,
    Get { registry_id: String },
    Create { name: String },
    Delete { registry_id: String },
}

#[derive(Subcommand, Debug)]
pub enum RepositoryCommand {
    List { registry_id: String },
    Images { registry_id: String, repository: String },
    Tags { registry_id: String, repository: String },
}

#[derive(Subcommand, Debug)]
pub enum GcCommand {
    /// Show how much garbage a registry holds
    Size { registry_id: String },
    Start {
        registry_id: String,
        /// Also delete untagged images
        #[arg(long)]
        delete_untagged: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    List {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
        #[arg(long)]
        search: Option<String>,
    },
    Get { token_id: String },
    Create {
        name: String,
        /// Grant read-write access instead of read-only
        #[arg(long)]
        read_write: bool,
        /// Registries the token may access; all registries when omitted
        #[arg(long = "registry")]
        registry_ids: Vec<String>,
    },
    Revoke { token_id: String },
    Delete { token_id: String },
}
