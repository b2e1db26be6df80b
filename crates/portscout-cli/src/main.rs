use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portscout_api::FeedClient;
use portscout_cache::SessionStore;
use portscout_core::{filter_ports, CatalogStore, Config, FilterState, PortCard};

#[derive(Parser)]
#[command(name = "portscout")]
#[command(version, about = "Terminal browser for the PortMaster ports catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Browse the catalog interactively (the default)
    Browse,
    /// Print the filtered catalog
    List(FilterArgs),
    /// Fuzzy-search port titles and print the matches
    Search {
        /// Search query
        query: String,
        #[command(flatten)]
        args: FilterArgs,
    },
}

#[derive(clap::Args, Default)]
struct FilterArgs {
    /// Only ports that need no extra files
    #[arg(long)]
    ready_to_run: bool,

    /// Only ports that need user-supplied files
    #[arg(long)]
    files_needed: bool,

    /// Restrict to a device code (repeatable)
    #[arg(long)]
    device: Vec<String>,

    /// Restrict to a genre (repeatable)
    #[arg(long)]
    genre: Vec<String>,

    /// Sort newest first
    #[arg(long)]
    newest: bool,

    /// Sort alphabetically by title
    #[arg(long)]
    az: bool,

    /// Sort by download count
    #[arg(long)]
    downloaded: bool,
}

impl FilterArgs {
    /// Map CLI flags onto a filter state.
    ///
    /// The engine shows nothing until an availability mode is chosen; for a
    /// one-shot command that default is useless, so with neither flag given
    /// both modes are enabled and the flags act as narrowing filters.
    fn to_state(&self, query: Option<&str>) -> FilterState {
        let (ready_to_run, files_needed) = if !self.ready_to_run && !self.files_needed {
            (true, true)
        } else {
            (self.ready_to_run, self.files_needed)
        };

        let mut state = FilterState {
            search_query: query.unwrap_or("").to_string(),
            ready_to_run,
            files_needed,
            newest: self.newest,
            az: self.az,
            downloaded: self.downloaded,
            ..Default::default()
        };
        for device in &self.device {
            state.set_device(device, true);
        }
        for genre in &self.genre {
            state.set_genre(genre, true);
        }
        state
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portscout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("falling back to default config: {}", e);
        Config::default()
    });

    let client = FeedClient::with_urls(config.feeds.to_urls());
    let catalog = CatalogStore::load(&client).await;
    if catalog.ports.is_empty() {
        tracing::warn!("no catalog data available; the port list will be empty");
    }

    match cli.command {
        None | Some(Commands::Browse) => {
            let session = open_session_store();
            let state =
                portscout_core::state::load_filter_state(&session).unwrap_or_default();
            let app = portscout_tui::App::new(catalog, state, &session);
            portscout_tui::run_tui(app, session, config.ui.mouse_enabled).await?;
        }
        Some(Commands::List(args)) => {
            print_cards(&catalog, &args.to_state(None));
        }
        Some(Commands::Search { query, args }) => {
            print_cards(&catalog, &args.to_state(Some(&query)));
        }
    }

    Ok(())
}

/// Open the session store in the user data directory, or fall back to an
/// in-memory store so a broken disk never blocks browsing.
fn open_session_store() -> SessionStore {
    let path = dirs::data_dir().map(|dir| dir.join("portscout").join("session.db"));

    if let Some(path) = path {
        match SessionStore::open(&path) {
            Ok(store) => return store,
            Err(e) => tracing::warn!("failed to open session store at {:?}: {}", path, e),
        }
    }

    SessionStore::open_in_memory().expect("in-memory session store")
}

fn print_cards(catalog: &CatalogStore, state: &FilterState) {
    let outcome = filter_ports(&catalog.ports, state);

    for filtered in &outcome.ports {
        let port = &catalog.ports[filtered.index];
        let card = PortCard::build(port, &filtered.supported, &catalog.devices);
        println!("{}", card.title);
        let mut badges = Vec::new();
        if card.ready_to_run {
            badges.push("Ready to Run");
        }
        if card.experimental {
            badges.push("Experimental");
        }
        if card.multiverse {
            badges.push("Multiverse");
        }
        if !badges.is_empty() {
            println!("  {}", badges.join(" | "));
        }
        if !card.porters.is_empty() {
            let porters: Vec<&str> = card.porters.iter().map(|p| p.name.as_str()).collect();
            println!("  Porter: {}", porters.join(", "));
        }
        for detail in &card.device_details {
            println!("  {}", detail);
        }
        println!("  Added: {}  Downloads: {}", card.date_added, card.download_count);
        println!("  {}", card.image_url);
        println!();
    }

    println!("{} Ports Available", outcome.total);
}
