use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;

use vitae::config::{SiteConfig, DEFAULT_CONFIG_FILE};
use vitae::detail::{DetailOutcome, PARAM_ID};
use vitae::error::BuildError;
use vitae::filter::FilterState;
use vitae::loader::source_for;
use vitae::page::Page;
use vitae::pipeline::{open_listing, render_detail_page};
use vitae::prerender::build_site;
use vitae::sections::{RenderContext, FILTER_TYPE, FILTER_YEAR, LISTING_PAGE, PUB_DETAIL, PUB_LIST};
use vitae::theme::{FileStorage, ThemePreference};

/// Render an academic portfolio site from its JSON data files.
#[derive(Debug, Parser)]
#[command(name = "vitae", version)]
struct Cli {
    /// Site root holding the page templates and data directory.
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Config file (defaults to vitae.toml under the site root).
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Pre-render every page, publication page and the sitemap.
    Build {
        /// Include resume/CV links in the about section.
        #[arg(long, overrides_with = "no_publish_resume")]
        publish_resume: bool,
        #[arg(long)]
        no_publish_resume: bool,
    },
    /// Print the publication listing for a filter.
    List {
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
    },
    /// Render one publication's detail view.
    Show {
        #[arg(long)]
        id: String,
    },
    /// Show or toggle the stored theme preference.
    Theme {
        /// Preference file, relative to the site root.
        #[arg(long, default_value = ".vitae-prefs.json")]
        store: PathBuf,
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum ThemeAction {
    Show,
    Toggle,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        eprintln!("vitae error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BuildError> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join(DEFAULT_CONFIG_FILE));
    let mut config = SiteConfig::load(&config_path)?;

    match cli.command {
        Command::Build { publish_resume, no_publish_resume } => {
            if publish_resume {
                config.publish_resume = true;
            } else if no_publish_resume {
                config.publish_resume = false;
            }
            let report = build_site(&cli.root, &config).await?;
            info!(
                "Built {} publication pages, wrote {} files",
                report.publication_pages,
                report.written.len()
            );
        }
        Command::List { q, year, kind } => {
            let source = source_for(&config, &cli.root)?;
            let ctx = RenderContext::resolve(config, std::iter::empty::<&str>());
            let mut page = Page::new(&format!("/{}", LISTING_PAGE))
                .with_mount(FILTER_YEAR)
                .with_mount(FILTER_TYPE)
                .with_mount(PUB_LIST);
            let mut controller = open_listing(&mut page, &ctx, source.as_ref()).await?;
            let state = FilterState {
                query: q.unwrap_or_default(),
                year: year.unwrap_or_default(),
                kind: kind.unwrap_or_default(),
            };
            controller.set_state(&mut page, &ctx, state);
            println!("{}", page.url());
            let visible = controller.visible();
            if visible.is_empty() {
                println!("No publications found.");
            }
            for p in visible {
                println!("{}  {:<24}  {}", p.year, p.id, p.title);
            }
        }
        Command::Show { id } => {
            let source = source_for(&config, &cli.root)?;
            let ctx = RenderContext::resolve(config, std::iter::empty::<&str>());
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair(PARAM_ID, &id)
                .finish();
            let mut page = Page::new("/publication.html")
                .with_query(&query)
                .with_mount(PUB_DETAIL);
            let outcome = render_detail_page(&mut page, &ctx, source.as_ref()).await?;
            if outcome == DetailOutcome::Rendered {
                if let Some(title) = page.title() {
                    println!("{}\n", title);
                }
            }
            println!("{}", page.content(PUB_DETAIL).unwrap_or_default());
        }
        Command::Theme { store, action } => {
            let mut pref = ThemePreference::load(FileStorage::new(cli.root.join(store)));
            if let Some(ThemeAction::Toggle) = action {
                pref.toggle();
            }
            println!("{:?} ({})", pref.theme(), pref.icon());
        }
    }
    Ok(())
}
