mod combine;
mod run;
mod scrape;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "reviewscrape")]
#[command(about = "Scrape paginated review listings into one CSV table")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape one lodging entity and write its reviews as `title,content` CSV
    Hotel {
        /// Hotel review page URL
        #[arg(long)]
        url: String,

        /// Output file; prints to stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Scrape one dining entity and persist its bundle to the data directory
    Resto {
        /// Restaurant review page URL
        #[arg(long)]
        url: String,

        /// Display name; defaults to the name in the URL
        #[arg(long)]
        name: Option<String>,

        /// Entity id; defaults to the `d<digits>` id in the URL
        #[arg(long)]
        id: Option<String>,

        /// Ordering key in the combined table
        #[arg(long, allow_negative_numbers = true, default_value_t = 0)]
        position: i64,

        /// Bundle directory; defaults to `REVIEWSCRAPE_DATA_DIR`
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Combine every persisted bundle into one CSV table
    Combine {
        /// Bundle directory; defaults to `REVIEWSCRAPE_DATA_DIR`
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Output file; defaults to `REVIEWSCRAPE_OUTPUT_PATH`
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Scrape every entity in the entities file, then combine
    Run {
        /// Entities file; defaults to `REVIEWSCRAPE_ENTITIES_PATH`
        #[arg(long)]
        entities: Option<PathBuf>,

        /// Bundle directory; defaults to `REVIEWSCRAPE_DATA_DIR`
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Output file; defaults to `REVIEWSCRAPE_OUTPUT_PATH`
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = reviewscrape_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Hotel { url, out } => scrape::run_hotel(&config, &url, out.as_deref()).await,
        Commands::Resto {
            url,
            name,
            id,
            position,
            data_dir,
        } => {
            let request = scrape::RestoRequest {
                url,
                name,
                id,
                position,
            };
            let data_dir = data_dir.unwrap_or_else(|| config.data_dir.clone());
            scrape::run_resto(&config, request, &data_dir).await
        }
        Commands::Combine { data_dir, out } => {
            let data_dir = data_dir.unwrap_or_else(|| config.data_dir.clone());
            let out = out.unwrap_or_else(|| config.output_path.clone());
            combine::run_combine(&data_dir, &out)
        }
        Commands::Run {
            entities,
            data_dir,
            out,
        } => {
            let paths = run::BatchPaths {
                entities: entities.unwrap_or_else(|| config.entities_path.clone()),
                data_dir: data_dir.unwrap_or_else(|| config.data_dir.clone()),
                out: out.unwrap_or_else(|| config.output_path.clone()),
            };
            run::run_batch(&config, &paths).await
        }
    }
}

#[cfg(test)]
mod tests;
