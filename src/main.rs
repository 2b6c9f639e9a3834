//! CLI interface for the recommendation engine

use anyhow::Result;
use clap::{Parser, Subcommand};
use dinerec::{ModelPaths, Recommender, SearchParams};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dinerec")]
#[command(about = "A content-based restaurant recommendation engine", long_about = None)]
struct Cli {
    /// Path to the catalog CSV
    #[arg(long, default_value = "models/restaurant_data.csv")]
    catalog: PathBuf,

    /// Path to the similarity matrix artifact
    #[arg(long, default_value = "models/similarity_matrix.bin")]
    matrix: PathBuf,

    /// Path to the model metadata JSON
    #[arg(long, default_value = "models/recommender_meta.json")]
    model: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend restaurants similar to the given one
    Recommend {
        /// Restaurant name (exact or partial)
        name: String,
        /// Number of recommendations to return
        #[arg(short = 'n', long, default_value = "10")]
        top_n: usize,
        /// Minimum similarity score to include
        #[arg(short, long, default_value = "0.3")]
        min_similarity: f32,
    },
    /// Print catalog-wide analytics
    Analytics,
    /// Search the catalog by name or cuisine
    Search {
        /// Search query
        query: String,
        /// Filter by location (substring)
        #[arg(long)]
        location: Option<String>,
        /// Filter by cuisine (substring)
        #[arg(long)]
        cuisine: Option<String>,
        /// Minimum rating
        #[arg(long)]
        min_rating: Option<f32>,
        /// Maximum cost
        #[arg(long)]
        max_cost: Option<f32>,
        /// Number of results to return
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Start the HTTP API server
    Serve {
        /// Address to bind to
        #[arg(long, default_value = "0.0.0.0:3000")]
        addr: String,
    },
}

fn run(service: &Recommender, command: Commands) -> Result<()> {
    match command {
        Commands::Recommend {
            name,
            top_n,
            min_similarity,
        } => {
            let result = service.recommend(&name, top_n, min_similarity)?;
            println!(
                "Recommendations for {} ({}):",
                result.query_restaurant.name, result.query_restaurant.location
            );
            for (i, rec) in result.recommendations.iter().enumerate() {
                println!(
                    "{}. {} — {} [{}] (score: {:.4})",
                    i + 1,
                    rec.restaurant.name,
                    rec.restaurant.location,
                    rec.restaurant.cuisines,
                    rec.similarity_score
                );
            }
            println!(
                "avg similarity: {:.4}, diversity: {:.2}, coverage: {:.2}",
                result.avg_similarity, result.diversity_score, result.coverage_score
            );
        }
        Commands::Analytics => {
            let report = service.analyze()?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Search {
            query,
            location,
            cuisine,
            min_rating,
            max_cost,
            limit,
        } => {
            let params = SearchParams {
                query,
                location,
                cuisine,
                min_rating,
                max_cost,
                limit,
            };
            let results = service.search(&params)?;
            if results.is_empty() {
                println!("No matching restaurants");
            } else {
                println!("Matches ({} total):", results.len());
                for row in results {
                    println!(
                        "  - {} — {} [{}] rating {:.1}, cost {:.0}",
                        row.name, row.location, row.cuisines, row.rating, row.cost
                    );
                }
            }
        }
        Commands::Serve { .. } => {
            unreachable!("Serve handled separately");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let paths = ModelPaths {
        catalog: cli.catalog,
        matrix: cli.matrix,
        artifact: cli.model,
    };

    let service = Recommender::load(&paths);

    // The server runs even when loading failed: health reports not-ready and
    // the read endpoints answer 503.
    if let Commands::Serve { ref addr } = cli.command {
        dinerec::server::start(addr, service).await?;
        return Ok(());
    }

    if !service.is_ready() {
        anyhow::bail!("model artifacts failed to load, see log output");
    }
    run(&service, cli.command)
}
