//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::export::{CsvWriter, ExportSpec};
use crate::pager::{PageView, Pager, Turn};
use crate::store::{DocumentStore, HttpStore};
use std::path::Path;
use tokio::io::AsyncBufReadExt;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Check => self.check().await,
            Commands::Browse { filter } => self.browse(filter.as_deref()).await,
            Commands::Export { filter, output } => self.export(filter.as_deref(), output).await,
            Commands::Validate => self.validate(),
        }
    }

    /// Load the session configuration named on the command line
    fn load_config(&self) -> Result<SessionConfig> {
        SessionConfig::from_file(&self.cli.config)
    }

    /// Probe store connectivity
    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        let store = HttpStore::from_session(&config)?;

        let result = store.check().await?;
        if result.success {
            println!("Connection OK: {}", config.store.base_url);
            Ok(())
        } else {
            Err(Error::store(format!(
                "connection check failed: {}",
                result.message.unwrap_or_default()
            )))
        }
    }

    /// Parse and validate the session configuration
    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;
        println!(
            "Configuration OK: collection '{}' ordered by '{}' {}, page size {}",
            config.collection,
            config.order_field,
            config.direction,
            config.page_size
        );
        Ok(())
    }

    /// Write the filtered result set to CSV
    async fn export(&self, filter: Option<&str>, output: &Path) -> Result<()> {
        let config = self.load_config()?;
        let store = HttpStore::from_session(&config)?;
        let exporter = config.exporter();

        let records = exporter.export_all(&store, filter).await?;
        CsvWriter::new().write_to_path(output, exporter.columns(), &records)?;

        println!("Exported {} records to {}", records.len(), output.display());
        Ok(())
    }

    /// Step through the collection interactively
    async fn browse(&self, filter: Option<&str>) -> Result<()> {
        let config = self.load_config()?;
        let store = HttpStore::from_session(&config)?;
        let exporter = config.exporter();
        let mut pager = Pager::new(store, config.pager_config()?);

        let view = pager.load_initial(filter).await?;
        print_page(&config.export, &view, pager.history_depth());
        println!("commands: [n]ext  [p]rev  [f <keyword>]  [r]eset  [x] export  [q]uit");

        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            let (command, argument) = line.split_once(' ').unwrap_or((line, ""));
            let argument = argument.trim();

            match command {
                "n" | "next" => match pager.load_next().await {
                    Ok(Turn::Page(view)) => {
                        print_page(&config.export, &view, pager.history_depth());
                    }
                    Ok(_) => println!("(no more data)"),
                    Err(e) => report_navigation_error(&mut pager, &config.export, e).await?,
                },
                "p" | "prev" => match pager.load_previous().await {
                    Ok(Turn::Page(view)) => {
                        print_page(&config.export, &view, pager.history_depth());
                    }
                    Ok(_) => println!("(already at the first page)"),
                    Err(e) => report_navigation_error(&mut pager, &config.export, e).await?,
                },
                "f" | "filter" => {
                    if argument.is_empty() {
                        println!("usage: f <keyword>");
                    } else {
                        let view = pager.set_filter(Some(argument)).await?;
                        print_page(&config.export, &view, pager.history_depth());
                    }
                }
                "r" | "reset" => {
                    let view = pager.clear_filter().await?;
                    print_page(&config.export, &view, pager.history_depth());
                }
                "x" | "export" => {
                    let filter = pager.filter().map(str::to_string);
                    let records = exporter
                        .export_all(pager.store(), filter.as_deref())
                        .await?;
                    let output = Path::new("docstep-export.csv");
                    CsvWriter::new().write_to_path(output, exporter.columns(), &records)?;
                    println!("Exported {} records to {}", records.len(), output.display());
                }
                "q" | "quit" | "exit" => break,
                "" => {}
                other => println!("unknown command: {other}"),
            }
        }

        Ok(())
    }
}

/// Report a failed navigation without losing the session
///
/// Transport failures leave pager state untouched, so the same command can
/// simply be retried. A consistency fault means the history went stale; the
/// documented recovery is a fresh initial load, applied here.
async fn report_navigation_error<S: DocumentStore>(
    pager: &mut Pager<S>,
    spec: &ExportSpec,
    error: Error,
) -> Result<()> {
    match error {
        Error::Consistency { .. } => {
            println!("{error}; reloading from the start");
            let filter = pager.filter().map(str::to_string);
            let view = pager.load_initial(filter.as_deref()).await?;
            print_page(spec, &view, pager.history_depth());
            Ok(())
        }
        e if e.is_retryable() => {
            println!("request failed ({e}); try again");
            Ok(())
        }
        e => Err(e),
    }
}

/// Render a page as a delimited table using the export projection
fn print_page(spec: &ExportSpec, view: &PageView, depth: usize) {
    if view.items.is_empty() {
        println!("(no matches)");
        return;
    }

    println!("{}", spec.columns().join(" | "));
    for item in &view.items {
        let record = spec.project(item);
        println!("{}", record.values.join(" | "));
    }

    let back_hint = if view.can_go_back { ", p steps back" } else { "" };
    println!("-- page {depth} ({} records{back_hint})", view.items.len());
}
