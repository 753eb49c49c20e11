mod app;
mod categories;
mod config;
mod filter;
mod gallery;
mod html;
mod input;
mod lightbox;
mod logging;
mod manifest;
mod ui;
mod view;

use app::App;
use clap::{Parser, Subcommand};
use config::GalleryConfig;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use gallery::Gallery;
use html::HtmlView;
use manifest::Manifest;
use std::path::PathBuf;

/// Browse a category-filtered image gallery with search and a lightbox preview
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Manifest file path or http(s) URL (default: data/gallery.json)
    #[arg(short, long, global = true)]
    source: Option<String>,

    /// Directory or URL that image paths are resolved against
    #[arg(long, global = true)]
    site_root: Option<String>,

    /// Path to a config.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "gallery_explorer=trace"
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive gallery (default)
    Run,
    /// Write the rendered gallery as a static HTML page
    Export {
        /// Output HTML file
        #[arg(short, long)]
        output: PathBuf,
        /// Active category chip
        #[arg(long)]
        category: Option<String>,
        /// Search query
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Print the items that pass the filter, one per line
    List {
        /// Active category chip
        #[arg(long)]
        category: Option<String>,
        /// Search query
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Print the category chip labels
    Categories,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = GalleryConfig::load(cli.config.as_deref())?;
    config.apply_overrides(cli.source, cli.site_root);
    let filter = logging::env_filter(cli.log_level.as_deref(), &config.log_level);

    let command = cli.command.unwrap_or(Commands::Run);
    // The terminal UI owns stdout and stderr, so it logs to a file.
    let log_guard = match command {
        Commands::Run => Some(logging::init_file(filter, &logging::default_log_dir())?),
        _ => {
            logging::init_stderr(filter);
            None
        }
    };
    tracing::debug!(?config, "config loaded");

    match command {
        Commands::Run => {
            if let Some(guard) = &log_guard {
                tracing::info!(log = %guard.path.display(), source = %config.source, "starting");
            }

            // The manifest is fetched once, before the first frame.
            let mut app = App::load(&config).await;

            // Init terminal
            let mut terminal = ratatui::init();
            crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;

            let size = terminal.size()?;
            app.update_area(size.width, size.height);

            // Main loop
            let result = run_app(&mut terminal, &mut app);

            // Restore terminal
            let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
            ratatui::restore();

            if let Err(e) = result {
                tracing::error!(error = %e, "terminal loop failed");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Export {
            output,
            category,
            query,
        } => {
            let manifest = load_or_exit(&config).await;
            let mut gallery = Gallery::new(manifest, config.labels.clone(), config.asset_paths());
            let mut view = HtmlView::new();
            apply_filter(&mut gallery, &mut view, category.as_deref(), query.as_deref());

            let page = view.page("Gallery", gallery.filter().query());
            std::fs::write(&output, page)?;
            tracing::info!(
                output = %output.display(),
                cards = gallery.cards().len(),
                "gallery exported"
            );
        }
        Commands::List { category, query } => {
            let manifest = load_or_exit(&config).await;
            let mut gallery = Gallery::new(manifest, config.labels.clone(), config.asset_paths());
            let mut view = HtmlView::new();
            apply_filter(&mut gallery, &mut view, category.as_deref(), query.as_deref());

            if let Some(text) = view.notice_text() {
                eprintln!("{text}");
            }
            for card in gallery.cards() {
                println!("{}\t{}\t{}", card.category, card.title, card.thumb_src);
            }
        }
        Commands::Categories => {
            let manifest = load_or_exit(&config).await;
            let gallery = Gallery::new(manifest, config.labels.clone(), config.asset_paths());
            for label in gallery.categories().chip_labels() {
                println!("{label}");
            }
        }
    }

    Ok(())
}

/// One-shot commands stop at the load-failure notice.
async fn load_or_exit(config: &GalleryConfig) -> Manifest {
    match manifest::open(&config.source, config.site_root.as_deref()).await {
        Ok((manifest, _)) => manifest,
        Err(e) => {
            tracing::error!(source = %config.source, error = %e, "{}", e.user_message());
            eprintln!("{}", config.labels.load_failed);
            std::process::exit(1);
        }
    }
}

fn apply_filter(
    gallery: &mut Gallery,
    view: &mut HtmlView,
    category: Option<&str>,
    query: Option<&str>,
) {
    if let Some(query) = query {
        gallery.set_query(query, view);
    }
    match category {
        Some(category) => gallery.select_category(category, view),
        None => gallery.render(view),
    }
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Handlers run to completion before the next event is read.
        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                input::handle_key(app, key);
            }
            Event::Mouse(mouse) => input::handle_mouse(app, mouse),
            Event::Resize(width, height) => app.update_area(width, height),
            _ => {}
        }
    }
}
