//! Command-line entry point: run one catalog query and print JSON.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use cinedex_cache::{CacheBackend, CacheConfig};
use cinedex_catalog::{CatalogConfig, MemoryCatalog};
use cinedex_query::{telemetry, MovieService, QueryConfig, QueryContext};

#[derive(Debug, Parser)]
#[command(name = "cinedex", version, about = "Query the movie catalog")]
struct Cli {
    /// Catalog snapshot (JSON array of movie records); overrides CATALOG_SNAPSHOT_PATH
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Cache backend (redis, memory, none); overrides CACHE_BACKEND
    #[arg(long)]
    cache: Option<CacheBackend>,

    /// Abort the query after this many milliseconds; overrides QUERY_TIMEOUT_MS
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search titles and print matches with facets
    Search { text: String },
    /// Highest-rated movies
    TopRated,
    /// Latest releases
    Recent,
    /// Full record of one movie
    Details { id: i64 },
    /// Movies similar to one movie; uses its own genres unless --genre is given
    Similar {
        id: i64,
        #[arg(long = "genre")]
        genres: Vec<String>,
    },
    /// Users who like a movie
    Likes {
        id: i64,
        #[arg(long)]
        user: String,
    },
    /// Recommendations for a user
    Recommend {
        #[arg(long)]
        user: String,
    },
    /// Details, similar movies and likes of one movie
    Movie {
        id: i64,
        #[arg(long)]
        user: Option<String>,
    },
    /// Top rated, recent releases and recommendations
    Home {
        #[arg(long)]
        user: Option<String>,
    },
}

fn render<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let cli = Cli::parse();

    // Load configuration
    let mut catalog_config = CatalogConfig::from_env();
    if let Some(path) = cli.snapshot.clone() {
        catalog_config.snapshot_path = path;
    }

    let mut cache_config = CacheConfig::from_env()?;
    if let Some(backend) = cli.cache {
        cache_config.backend = backend;
    }

    let mut query_config = QueryConfig::from_env().with_cache_ttl(cache_config.ttl);
    if let Some(ms) = cli.timeout_ms {
        query_config.request_timeout = Some(Duration::from_millis(ms));
    }

    // Build the service
    let catalog = MemoryCatalog::load_json(&catalog_config.snapshot_path)
        .await
        .with_context(|| {
            format!(
                "loading catalog snapshot {}",
                catalog_config.snapshot_path.display()
            )
        })?;
    info!(movies = catalog.len(), "Catalog loaded");

    let cache = cinedex_cache::connect(&cache_config).context("building cache layer")?;

    let mut ctx = QueryContext::new();
    if let Some(timeout) = query_config.request_timeout {
        ctx = ctx.with_timeout(timeout);
    }

    let service = MovieService::new(Arc::new(catalog), cache, query_config);

    // Ctrl-C abandons the in-flight query
    let token = ctx.cancellation_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling query");
            token.cancel();
        }
    });

    let pretty = cli.pretty;
    let output = match cli.command {
        Command::Search { text } => render(&service.search_movie(&ctx, &text).await?, pretty)?,
        Command::TopRated => render(&service.get_top_rated_movies(&ctx).await?, pretty)?,
        Command::Recent => render(&service.get_recent_released_movies(&ctx).await?, pretty)?,
        Command::Details { id } => render(&service.get_movie_details(&ctx, id).await?, pretty)?,
        Command::Similar { id, genres } => {
            let genres = if genres.is_empty() {
                match service.get_movie_details(&ctx, id).await? {
                    Some(movie) => movie.genres.iter().map(|g| g.to_string()).collect(),
                    None => Vec::new(),
                }
            } else {
                genres
            };
            let similar = service.get_similar_movies(&ctx, id, &genres).await?;
            render(&similar, pretty)?
        }
        Command::Likes { id, user } => {
            render(&service.get_movie_likes(&ctx, &user, id).await?, pretty)?
        }
        Command::Recommend { user } => {
            let recommendations = service.get_recommendations_for_me(&ctx, &user).await?;
            render(&recommendations, pretty)?
        }
        Command::Movie { id, user } => {
            let page = service.movie_page(&ctx, id, user.as_deref()).await?;
            render(&page, pretty)?
        }
        Command::Home { user } => render(&service.home_page(&ctx, user.as_deref()).await?, pretty)?,
    };

    println!("{}", output);
    Ok(())
}
