//! # CLI Layer
//!
//! One UI client for quotebook. This is the only place that touches stdout,
//! stderr, signals and process configuration.
//!
//! - `run()`: parse arguments, install logging, dispatch
//! - `init_context()`: data dir, config, gateway choice, `QuotebookApi`
//! - `handle_*()`: call the API and print the `CmdResult`

use super::print::{
    print_categories, print_messages, print_quote, print_quotes, print_status,
};
use super::setup::{BrowseCommands, Cli, Commands, CoreCommands, DataCommands, SyncCommands};
use clap::Parser;
use quotebook::api::{CmdMessage, CmdResult, ExportTarget, QuotebookApi};
use quotebook::config::{data_dir, QuotebookConfig, REMOTE_URL_ENV};
use quotebook::error::{QuoteError, Result};
use quotebook::gateway::http::HttpGateway;
use quotebook::gateway::{ConfiguredGateway, OfflineGateway};
use quotebook::store::fs::FileStore;
use quotebook::sync::Synchronizer;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

struct AppContext {
    api: QuotebookApi<FileStore, ConfiguredGateway>,
    config: QuotebookConfig,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Core(cmd)) => match cmd {
            CoreCommands::Show { category } => handle_show(&mut ctx, category),
            CoreCommands::Add { text, category } => handle_add(&mut ctx, text, category).await,
            CoreCommands::Remove { id } => handle_remove(&mut ctx, id).await,
            CoreCommands::List { category } => handle_list(&ctx, category),
        },
        Some(Commands::Browse(cmd)) => match cmd {
            BrowseCommands::Categories => handle_categories(&ctx),
            BrowseCommands::Filter { category } => handle_filter(&mut ctx, category),
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Import { path, merge } => handle_import(&mut ctx, path, merge).await,
            DataCommands::Export { output } => handle_export(&ctx, output),
        },
        Some(Commands::Sync(cmd)) => match cmd {
            SyncCommands::Sync => handle_sync(&mut ctx).await,
            SyncCommands::Watch { interval } => handle_watch(&mut ctx, interval).await,
            SyncCommands::Status => handle_status(&ctx),
        },
        None => handle_show(&mut ctx, None),
    }
}

/// Logs go to stderr so they never mix with command output. `RUST_LOG` wins
/// over `--verbose`.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("quotebook=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn init_context() -> Result<AppContext> {
    let data_dir = data_dir()?;
    let config = QuotebookConfig::load(&data_dir)?
        .with_remote_override(std::env::var(REMOTE_URL_ENV).ok());

    let gateway = match config.remote_url() {
        Some(url) => ConfiguredGateway::Http(HttpGateway::new(
            url,
            Duration::from_secs(config.request_timeout_secs),
        )?),
        None => ConfiguredGateway::Offline(OfflineGateway),
    };
    tracing::debug!(data_dir = %data_dir.display(), remote = ?config.remote_url(), "starting");

    let synchronizer = Synchronizer::new(gateway).with_push_on_sync(config.push_on_sync);
    let api = QuotebookApi::new(FileStore::new(data_dir), synchronizer)?;

    Ok(AppContext { api, config })
}

fn print_shown(result: &CmdResult) {
    for quote in &result.listed_quotes {
        print_quote(quote);
    }
    print_messages(&result.messages);
}

fn handle_show(ctx: &mut AppContext, category: Option<String>) -> Result<()> {
    let result = ctx.api.show_random(category.as_deref())?;
    print_shown(&result);
    Ok(())
}

async fn handle_add(ctx: &mut AppContext, text: String, category: String) -> Result<()> {
    let result = ctx.api.add_quote(&text, &category).await?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_remove(ctx: &mut AppContext, id: i64) -> Result<()> {
    let result = ctx.api.remove_quote(id).await?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, category: Option<String>) -> Result<()> {
    let result = ctx.api.list_quotes(category.as_deref())?;
    print_quotes(&result.listed_quotes);
    print_messages(&result.messages);
    Ok(())
}

fn handle_categories(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.categories()?;
    let selected = ctx.api.catalog().selected_category()?;
    print_categories(&result.categories, selected.as_deref());
    Ok(())
}

fn handle_filter(ctx: &mut AppContext, category: String) -> Result<()> {
    let result = ctx.api.filter_quotes(&category)?;
    if !result.listed_quotes.is_empty() {
        print_quotes(&result.listed_quotes);
    }
    print_messages(&result.messages);
    Ok(())
}

async fn handle_import(ctx: &mut AppContext, path: PathBuf, merge: bool) -> Result<()> {
    let result = ctx.api.import_quotes(&path, merge).await?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, output: String) -> Result<()> {
    let target = if output == "-" {
        ExportTarget::Inline
    } else {
        ExportTarget::File(PathBuf::from(output))
    };

    let result = ctx.api.export_quotes(target)?;
    if let Some(json) = &result.exported {
        println!("{}", json);
    }
    print_messages(&result.messages);
    Ok(())
}

async fn handle_sync(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.sync().await?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_watch(ctx: &mut AppContext, interval: Option<u64>) -> Result<()> {
    let secs = interval.unwrap_or(ctx.config.sync_interval_secs);
    if secs == 0 {
        return Err(QuoteError::Validation(
            "Interval must be at least one second".to_string(),
        ));
    }
    if !ctx.api.remote_configured() {
        print_messages(&[CmdMessage::warning(
            "No remote configured; set remote_url or QUOTEBOOK_REMOTE_URL",
        )]);
        return Ok(());
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "could not listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    ctx.api
        .watch(Duration::from_secs(secs), shutdown, |result| {
            print_shown(&result);
            println!();
        })
        .await;
    Ok(())
}

fn handle_status(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.status()?;
    if let Some(status) = &result.status {
        print_status(status);
    }
    print_messages(&result.messages);
    Ok(())
}
