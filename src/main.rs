use anyhow::{bail, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use playlist_capture::capture::Termination;
use playlist_capture::extract::{FingerprintGate, ListGeometry, PageDocument, VirtualList};
use playlist_capture::model::Platform;
use playlist_capture::summary::PlaylistSummary;
use playlist_capture::{CaptureConfig, CaptureEngine, CaptureRequest, SnapshotStore, StoreSink};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "playlist-capture")]
#[command(about = "Capture playlists from streaming-service pages", long_about = None)]
struct Args {
    /// Snapshot store directory
    #[arg(short = 's', long, global = true, default_value = "~/.local/share/playlist-capture")]
    store: String,

    /// Verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scroll through a saved page and capture every track
    Capture(CaptureArgs),

    /// Save only the rows currently rendered on a saved page
    Scrape(PageArgs),

    /// Show the latest captured playlist and status
    Show,

    /// Forget the latest captured playlist
    Clear,
}

#[derive(ClapArgs, Debug)]
struct PageArgs {
    /// Saved HTML of the playlist page
    #[arg(short = 'p', long)]
    page: PathBuf,

    /// URL the page was saved from (selects the platform)
    #[arg(short = 'u', long)]
    url: String,
}

#[derive(ClapArgs, Debug)]
struct CaptureArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Override the playlist title read from the page
    #[arg(long)]
    title: Option<String>,

    /// Maximum loop iterations (default: 200)
    #[arg(long, default_value = "200")]
    max_iterations: u32,

    /// Pixels scrolled per iteration (default: 350)
    #[arg(long, default_value = "350")]
    scroll_step: f64,

    /// Delay between iterations in milliseconds (default: 1500)
    #[arg(long, default_value = "1500")]
    delay_ms: u64,

    /// Give up after this many seconds (default: 300)
    #[arg(long, default_value = "300")]
    max_duration_secs: u64,

    /// Simulated row height in pixels
    #[arg(long, default_value = "56")]
    row_height: f64,

    /// Simulated viewport height in pixels
    #[arg(long, default_value = "720")]
    viewport_height: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let store_path = shellexpand::tilde(&args.store);
    let store = SnapshotStore::open(PathBuf::from(store_path.as_ref()))?;

    match args.command {
        Command::Capture(capture) => run_capture(capture, store),
        Command::Scrape(page) => run_scrape(page, store),
        Command::Show => {
            let playlist = store.load_playlist()?;
            let status = store.load_status()?;
            print!("{}", PlaylistSummary::new(playlist.as_ref(), status.as_deref()));
            Ok(())
        }
        Command::Clear => {
            store.clear_playlist()?;
            log::info!("Cleared latest playlist in {:?}", store.root());
            Ok(())
        }
    }
}

fn run_capture(args: CaptureArgs, store: SnapshotStore) -> Result<()> {
    let config = CaptureConfig::new()
        .with_max_iterations(args.max_iterations)
        .with_scroll_step(args.scroll_step)
        .with_delay(Duration::from_millis(args.delay_ms))
        .with_max_duration(Duration::from_secs(args.max_duration_secs));
    let geometry = ListGeometry {
        row_height: args.row_height,
        viewport_height: args.viewport_height,
        ..ListGeometry::default()
    };

    let (request, list) = match Platform::detect(&args.page.url) {
        Some(platform) => {
            let document = PageDocument::load(platform, &args.page.page)?;
            let title = args.title.unwrap_or_else(|| document.playlist_title.clone());
            log::info!(
                "Loaded {} page {:?} with {} rows",
                platform,
                title,
                document.rows.len()
            );
            (
                CaptureRequest::new(platform, title),
                VirtualList::from_document(&document, geometry),
            )
        }
        None => (
            CaptureRequest::for_url(&args.page.url, args.title.unwrap_or_default()),
            VirtualList::new(Vec::new(), geometry),
        ),
    };

    let engine = CaptureEngine::new(config);
    let sink = StoreSink::new(store);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let report = runtime.block_on(engine.capture(&request, &list, &list, Some(&sink)))?;

    match report.termination {
        Termination::UnsupportedPage => {
            bail!("Open a playlist on Spotify, YouTube Music, or Apple Music: {}", args.page.url)
        }
        Termination::NoRowsFound => {
            log::warn!("No track rows found on the page");
            println!("No rows found. Nothing saved.");
        }
        termination => {
            if !termination.is_complete() {
                log::warn!("Capture stopped early ({}), snapshot may be partial", termination);
            }
            log::info!(
                "Captured {} tracks in {} iterations ({})",
                report.tracks.len(),
                report.iterations,
                termination
            );
            println!("Capture complete. {} songs saved.", report.tracks.len());
        }
    }
    Ok(())
}

fn run_scrape(args: PageArgs, store: SnapshotStore) -> Result<()> {
    let Some(platform) = Platform::detect(&args.url) else {
        bail!("Open a playlist on Spotify, YouTube Music, or Apple Music: {}", args.url);
    };

    let document = PageDocument::load(platform, &args.page)?;
    let playlist = document.scrape_visible();

    let mut gate = FingerprintGate::new();
    if let Some(previous) = store.load_playlist()? {
        gate.admit(&previous);
    }

    if !gate.admit(&playlist) {
        log::info!("No new playlist data to save ({} visible tracks)", playlist.len());
        return Ok(());
    }

    store.save_playlist(&playlist)?;
    log::info!(
        "Saved {} playlist {:?} with {} visible tracks",
        platform,
        playlist.playlist_title,
        playlist.len()
    );
    Ok(())
}
