//! Command line configuration for the graph loader.

mod dependencies;

pub use dependencies::Dependencies;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use graph_loader_pipeline::config::DEFAULT_BATCH_SIZE;
use graph_loader_repository::config::{DEFAULT_AUTH, DEFAULT_URL};

#[derive(Parser, Debug)]
#[command(name = "graph-loader")]
#[command(about = "Bulk-load CSV entities and relations into a graph database", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the data directory described by metadata.json into Neo4j
    #[command(name = "import-to-neo4j")]
    ImportToNeo4j(ImportArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Bolt URL of the Neo4j server
    #[arg(long, env = "NEO4J_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Credentials as user:password
    #[arg(long, env = "NEO4J_AUTH", default_value = DEFAULT_AUTH, hide_env_values = true)]
    pub auth: String,

    /// Database to load into (server default when omitted)
    #[arg(long, env = "NEO4J_DATABASE")]
    pub database: Option<String>,

    /// Directory holding metadata.json and the CSV files
    #[arg(short = 'd', long)]
    pub data_dir: PathBuf,

    /// Records per bulk write
    #[arg(
        short = 'b',
        long,
        default_value_t = DEFAULT_BATCH_SIZE as i64,
        allow_negative_numbers = true
    )]
    pub batch_size: i64,

    /// Delete all nodes and relationships before loading
    #[arg(long)]
    pub dropall: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import_args(args: &[&str]) -> ImportArgs {
        let mut argv = vec!["graph-loader", "import-to-neo4j"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::ImportToNeo4j(args) => args,
        }
    }

    #[test]
    fn test_defaults() {
        let args = import_args(&["-d", "/data"]);

        assert_eq!(args.data_dir, PathBuf::from("/data"));
        assert_eq!(args.batch_size, 1000);
        assert!(!args.dropall);
    }

    #[test]
    fn test_short_and_long_flags() {
        let args = import_args(&[
            "--data-dir",
            "/data",
            "-b",
            "25",
            "--dropall",
            "--url",
            "bolt://db:7687",
            "--auth",
            "admin:secret",
        ]);

        assert_eq!(args.batch_size, 25);
        assert!(args.dropall);
        assert_eq!(args.url, "bolt://db:7687");
        assert_eq!(args.auth, "admin:secret");
    }

    #[test]
    fn test_negative_batch_size_parses() {
        let args = import_args(&["-d", "/data", "-b", "-3"]);
        assert_eq!(args.batch_size, -3);
    }

    #[test]
    fn test_data_dir_is_required() {
        let result = Cli::try_parse_from(["graph-loader", "import-to-neo4j"]);
        assert!(result.is_err());
    }
}
