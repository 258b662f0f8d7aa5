pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::cli::OutputFormat;
use crate::cli::customers::CustomerCommand;
use crate::core::config::AppConfig;
use crate::core::{CustomerService, CustomerStore, FanOut, ReportService};
use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Monthly { customer_id: String },
    Consolidated { customer_id: String },
    Products { start: NaiveDate, end: NaiveDate },
    Customer(CustomerCommand),
}

/// Loads the configuration, runs `command` and prints its output to stdout.
pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    info!("Customer aggregation starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let output = execute(command, &config, format).await?;
    println!("{output}");
    Ok(())
}

fn report_service(
    customers: Arc<dyn CustomerStore>,
    config: &AppConfig,
) -> Result<ReportService> {
    Ok(ReportService::new(
        customers,
        providers::record_sources(config),
        FanOut::new(config.timeout()),
        config.locale()?,
    ))
}

/// Runs `command` against the services and customer store named in `config`
/// and returns the rendered output.
pub async fn execute(
    command: AppCommand,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<String> {
    let customers = store::open_customer_store(config)?;

    match command {
        AppCommand::Monthly { customer_id } => {
            let reports = report_service(customers, config)?;
            cli::monthly::run(&reports, &customer_id, format).await
        }
        AppCommand::Consolidated { customer_id } => {
            let reports = report_service(customers, config)?;
            cli::consolidated::run(&reports, &customer_id, format).await
        }
        AppCommand::Products { start, end } => {
            let reports = report_service(customers, config)?;
            cli::products::run(&reports, start, end, format).await
        }
        AppCommand::Customer(command) => {
            cli::customers::run(&CustomerService::new(customers), command, format).await
        }
    }
}
