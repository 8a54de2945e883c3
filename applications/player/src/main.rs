/// Narrated Deck Player - terminal presentation host
use clap::{Parser, Subcommand};
use deck_core::SlideRegistry;
use deck_player::{config::PlayerConfig, report, session, Session};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "deck-player")]
#[command(about = "Narrated slide deck player", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Present a deck in the terminal, advancing on slide timers
    Play {
        /// Manifest path (presentation.json)
        manifest: PathBuf,
        /// Slide to open on (1-based)
        #[arg(short, long)]
        slide: Option<usize>,
        /// Start playing immediately
        #[arg(short, long)]
        autoplay: bool,
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List the slides of a deck with their narration addresses
    Inspect {
        /// Manifest path (presentation.json)
        manifest: PathBuf,
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show how a deep link resolves
    Route {
        /// Address such as `#/slide/3`
        address: String,
        /// Deck size to check the address against
        #[arg(long)]
        slides: Option<usize>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deck_player=info,deck_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            manifest,
            slide,
            autoplay,
            config,
        } => {
            play(manifest, slide, autoplay, config).await?;
        }
        Commands::Inspect { manifest, config } => {
            inspect(manifest, config)?;
        }
        Commands::Route { address, slides } => {
            println!("{}", report::route(&address, slides));
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<PlayerConfig> {
    let config = PlayerConfig::load(path.as_deref())?;
    config.validate()?;
    Ok(config)
}

async fn play(
    manifest: PathBuf,
    slide: Option<usize>,
    autoplay: bool,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = PlayerConfig::load(config.as_deref())?;
    config.apply_overrides(slide, autoplay);
    config.validate()?;

    let registry = SlideRegistry::load(&manifest, config.default_duration())?;
    tracing::info!("Presenting {}", manifest.display());
    tracing::info!("Tick: {:?}", config.tick());

    let session = Session::new(Arc::new(registry), config.player_options()?)?;
    session::run(session, config.tick()).await?;

    Ok(())
}

fn inspect(manifest: PathBuf, config: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let registry = SlideRegistry::load(&manifest, config.default_duration())?;
    let template = config.player_options()?.asset_template;

    for line in report::deck_inventory(&registry, &template) {
        println!("{}", line);
    }

    Ok(())
}
