use clap::Parser;
use spotify_import::{
    review_bad_matches, ImportOptions, Importer, Library, QueryBuilder, RetryConfig,
    SpotifyCatalogClient, StdinPrompt, DEFAULT_IGNORE_TAGS,
};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

/// Import an exported music library into Spotify
#[derive(Parser)]
#[command(
    name = "spotify-import",
    about = "Import an exported music library into Spotify",
    long_about = None
)]
struct Cli {
    /// Library JSON file; reads standard input when omitted
    input: Option<PathBuf>,

    /// Delete and recreate playlists whose names already exist
    #[arg(long)]
    replace_existing_playlists: bool,

    /// Where to write the failure report
    #[arg(long, default_value = "spotify_import_failures.json")]
    failures_output: PathBuf,

    /// Description attached to every created playlist
    #[arg(long, default_value = "Imported from JSON")]
    description: String,

    /// Attempt budget for rate-limited or gateway-failed API calls
    #[arg(long, default_value_t = 10)]
    max_retry_count: u32,

    /// Field values to treat as absent (repeatable)
    #[arg(long = "ignore-tag")]
    ignore_tags: Vec<String>,

    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let token = match std::env::var("SPOTIFY_IMPORT_TOKEN") {
        Ok(token) => token,
        Err(_) => {
            eprintln!("Error: SPOTIFY_IMPORT_TOKEN is not set");
            eprintln!();
            eprintln!("Provide a user-scoped Spotify OAuth bearer token:");
            eprintln!("  export SPOTIFY_IMPORT_TOKEN=\"...\"");
            std::process::exit(1);
        }
    };

    let library = match &args.input {
        Some(path) => Library::from_reader(BufReader::new(File::open(path)?))?,
        None => Library::from_reader(BufReader::new(io::stdin()))?,
    };

    let ignore_tags: Vec<String> = if args.ignore_tags.is_empty() {
        DEFAULT_IGNORE_TAGS.iter().map(|s| s.to_string()).collect()
    } else {
        args.ignore_tags.clone()
    };
    let query_builder = QueryBuilder::new(&ignore_tags);
    let retry = RetryConfig {
        max_retry_count: args.max_retry_count,
    };
    let options = ImportOptions {
        replace_existing_playlists: args.replace_existing_playlists,
        description: args.description.clone(),
    };

    let http_client = http_client::native::NativeClient::new();
    let catalog = SpotifyCatalogClient::new(Box::new(http_client), token);

    let mut importer = Importer::new(&catalog, query_builder.clone(), retry.clone(), options);
    let summary = match importer.import(&library).await {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Import failed: {e}");
            std::process::exit(1);
        }
    };

    let mut failures = importer.into_failures();
    if !failures.bad_matches().is_empty() {
        let mut prompt = StdinPrompt;
        if let Err(e) =
            review_bad_matches(&catalog, &retry, &query_builder, &mut failures, &mut prompt).await
        {
            eprintln!("Review failed: {e}");
            // The report below still reflects everything reviewed so far.
        }
    }

    failures.save(&args.failures_output)?;

    println!(
        "Imported {} songs into {} playlists",
        summary.imported, summary.playlists
    );
    if !failures.is_empty() {
        println!("\nFailed to import {} songs:", failures.total());
        for (playlist_name, records) in failures.iter() {
            if records.is_empty() {
                continue;
            }
            println!(" Playlist: {playlist_name}");
            for record in records {
                let query = query_builder.build(&record.song, &[], true);
                println!("  {query} [{}]", record.reason);
            }
        }
    }

    Ok(())
}
