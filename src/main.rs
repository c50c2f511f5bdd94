//! Command-line console for the travel booking backend.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use serde::Serialize;

use travel_admin::confirm::{AssumeYes, Confirm, ConfirmPrompt};
use travel_admin::context::{AppContext, sidebar_counts};
use travel_admin::controller::{FetchOutcome, ListController, Removal};
use travel_admin::domain::client::Client;
use travel_admin::domain::content::{Banner, Blog};
use travel_admin::domain::entity::Entity;
use travel_admin::domain::inquiry::{Quote, TailorMadeRequest};
use travel_admin::domain::resource::ResourceKind;
use travel_admin::domain::trip::{Accommodation, Destination, Tour, Trek};
use travel_admin::domain::types::{EntityId, FilterKey, FlagName, PageSize, SortKey};
use travel_admin::models::config::ConsoleConfig;
use travel_admin::notifications::LogNotifier;
use travel_admin::pagination::{PageLink, Paginated};
use travel_admin::repository::HttpRepository;
use travel_admin::services::dashboard::refresh_sidebar_counts;

#[derive(Parser)]
#[command(name = "travel-admin", version, about = "Manage the travel booking collections")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show one page of a collection.
    List {
        resource: ResourceKind,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        search: Option<String>,
        /// `field` or `-field`.
        #[arg(long)]
        sort: Option<String>,
        /// `key=value`, may be repeated.
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
        /// Print the page as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Delete a record after confirmation.
    Delete {
        resource: ResourceKind,
        id: String,
        /// Do not ask for confirmation.
        #[arg(long)]
        yes: bool,
    },
    /// Set a boolean field such as `isActive` on a record.
    Toggle {
        resource: ResourceKind,
        id: String,
        flag: String,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Print the record count of every collection.
    Counts,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

/// Asks on the terminal.
struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        let message = prompt.message();
        let answer = tokio::task::spawn_blocking(move || {
            print!("{message} [y/N] ");
            io::stdout().flush().ok();
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line).ok()?;
            Some(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
        })
        .await;

        matches!(answer, Ok(Some(true)))
    }
}

struct ListArgs {
    page: u32,
    limit: Option<u32>,
    search: Option<String>,
    sort: Option<String>,
    filters: Vec<(String, String)>,
    json: bool,
}

type CliResult = Result<(), String>;

fn controller<E: Entity>(
    ctx: &AppContext,
    repo: &Arc<HttpRepository>,
    confirm: Arc<dyn Confirm>,
) -> ListController<E, HttpRepository> {
    ctx.list_controller(repo.clone(), Arc::new(LogNotifier), confirm)
}

async fn list<E: Entity + Serialize>(
    ctx: &AppContext,
    repo: &Arc<HttpRepository>,
    args: ListArgs,
) -> CliResult {
    let controller = controller::<E>(ctx, repo, Arc::new(AssumeYes));

    // The screen is not mounted yet, so these only shape the first query.
    if let Some(search) = args.search {
        controller.set_search(search);
    }
    if let Some(sort) = args.sort {
        let sort = SortKey::new(sort).map_err(|e| e.to_string())?;
        controller.set_sort(sort).await;
    }
    for (key, value) in args.filters {
        let key = FilterKey::new(key).map_err(|e| e.to_string())?;
        controller.set_filter(key, value).await;
    }
    if let Some(limit) = args.limit {
        let limit = PageSize::new(limit).map_err(|e| e.to_string())?;
        controller.set_limit(limit).await;
    }
    controller.set_page(args.page).await;

    if controller.mount().await != FetchOutcome::Applied {
        return Err(format!("could not load {}", E::KIND));
    }

    let cache = controller.snapshot();
    let page = controller.query().page();
    let paginated = Paginated::new(cache.items, page, cache.total_pages);

    if args.json {
        let out = serde_json::to_string_pretty(&paginated).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    for item in &paginated.items {
        println!("{:<26} {}", item.id().as_str(), item.label());
    }
    let pager: Vec<String> = paginated
        .pages
        .iter()
        .map(|link| match link {
            PageLink::Page(p) if *p == page => format!("[{p}]"),
            other => other.to_string(),
        })
        .collect();
    println!("{}", pager.join(" "));
    Ok(())
}

async fn delete<E: Entity>(
    ctx: &AppContext,
    repo: &Arc<HttpRepository>,
    id: EntityId,
    yes: bool,
) -> CliResult {
    let confirm: Arc<dyn Confirm> = if yes {
        Arc::new(AssumeYes)
    } else {
        Arc::new(StdinConfirm)
    };
    let controller = controller::<E>(ctx, repo, confirm);

    match controller.remove(&id).await.map_err(|e| e.to_string())? {
        Removal::Removed(_) => Ok(()),
        Removal::Declined => {
            println!("Nothing deleted.");
            Ok(())
        }
    }
}

async fn toggle<E: Entity>(
    ctx: &AppContext,
    repo: &Arc<HttpRepository>,
    id: EntityId,
    flag: FlagName,
    value: bool,
) -> CliResult {
    let controller = controller::<E>(ctx, repo, Arc::new(AssumeYes));
    controller
        .toggle_flag(&id, &flag, value)
        .await
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Runs `$call` with the entity type of `$kind`.
macro_rules! with_entity {
    ($kind:expr, $call:ident ( $($arg:expr),* $(,)? )) => {
        match $kind {
            ResourceKind::Tours => $call::<Tour>($($arg),*).await,
            ResourceKind::Treks => $call::<Trek>($($arg),*).await,
            ResourceKind::Accommodations => $call::<Accommodation>($($arg),*).await,
            ResourceKind::Destinations => $call::<Destination>($($arg),*).await,
            ResourceKind::Blogs => $call::<Blog>($($arg),*).await,
            ResourceKind::Clients => $call::<Client>($($arg),*).await,
            ResourceKind::Banners => $call::<Banner>($($arg),*).await,
            ResourceKind::Quotes => $call::<Quote>($($arg),*).await,
            ResourceKind::TailorMade => $call::<TailorMadeRequest>($($arg),*).await,
        }
    };
}

async fn run(cli: Cli, config: ConsoleConfig) -> CliResult {
    let repo = HttpRepository::with_timeout(&config.api_base_url, config.request_timeout())
        .map_err(|e| e.to_string())?;
    let repo = Arc::new(repo);

    let (writer, reader) = sidebar_counts();
    let ctx = AppContext::new(config, reader);

    match cli.command {
        Command::List {
            resource,
            page,
            limit,
            search,
            sort,
            filters,
            json,
        } => {
            let args = ListArgs {
                page,
                limit,
                search,
                sort,
                filters,
                json,
            };
            with_entity!(resource, list(&ctx, &repo, args))
        }
        Command::Delete { resource, id, yes } => {
            let id = EntityId::new(id).map_err(|e| e.to_string())?;
            with_entity!(resource, delete(&ctx, &repo, id, yes))
        }
        Command::Toggle {
            resource,
            id,
            flag,
            value,
        } => {
            let id = EntityId::new(id).map_err(|e| e.to_string())?;
            let flag = FlagName::new(flag).map_err(|e| e.to_string())?;
            with_entity!(resource, toggle(&ctx, &repo, id, flag, value))
        }
        Command::Counts => {
            let counts =
                refresh_sidebar_counts(repo.as_ref(), &ctx.config.dashboard_endpoint, &writer)
                    .await
                    .map_err(|e| e.to_string())?;
            for kind in ResourceKind::ALL {
                println!("{:<16} {}", kind.slug(), ctx.sidebar.current().get(kind));
            }
            log::debug!("{} collections reported", counts.iter().count());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    dotenvy::dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match ConsoleConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading console config: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
