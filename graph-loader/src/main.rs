use std::error::Error;
use std::process;

use clap::Parser;
use tracing::{error, info};

use graph_loader::{init_tracing, Cli, Commands, Dependencies, GraphLoaderError, ImportArgs};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::ImportToNeo4j(args) => {
            info!("Starting import to Neo4j");
            import_to_neo4j(&args).await
        }
    };

    if let Err(e) = result {
        error!(error = %e, "Import failed");
        eprintln!("\nError: {}", e);

        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("  Caused by: {}", err);
            source = err.source();
        }

        process::exit(1);
    }
}

async fn import_to_neo4j(args: &ImportArgs) -> Result<(), GraphLoaderError> {
    let Dependencies { mut orchestrator } = Dependencies::new(args)?;
    let summary = orchestrator.run().await?;

    info!(
        entities = summary.entities_written,
        relations = summary.relations_written,
        "Import finished"
    );
    Ok(())
}
