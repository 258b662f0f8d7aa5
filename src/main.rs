use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use custagg::cli::OutputFormat;
use custagg::cli::customers::CustomerCommand;
use custagg::core::log::init_logging;
use custagg::core::model::{CustomerDraft, CustomerType};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Daily-average position of a customer for the current month
    Monthly { customer_id: String },
    /// Net balance and product details of a customer
    Consolidated { customer_id: String },
    /// Portfolio-wide product report for a date range
    Products {
        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Last day of the range (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },
    /// Manage customers
    #[command(subcommand)]
    Customer(CustomerCommands),
}

#[derive(Subcommand)]
enum CustomerCommands {
    /// List all customers
    List,
    /// Show one customer, by id or by document number
    Show(ShowArgs),
    /// Register a new customer
    Add(CustomerArgs),
    /// Replace the details of an existing customer
    Update {
        id: String,
        #[command(flatten)]
        details: CustomerArgs,
    },
    /// Remove a customer
    Delete { id: String },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ShowArgs {
    id: Option<String>,
    /// Look the customer up by document number instead of id
    #[arg(long)]
    document: Option<String>,
}

#[derive(Args)]
struct CustomerArgs {
    /// DNI, CEX or PASSPORT
    #[arg(long)]
    document_type: String,
    #[arg(long)]
    document_number: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    /// PERSONAL or BUSINESS
    #[arg(long, default_value = "PERSONAL")]
    customer_type: CustomerType,
}

impl From<CustomerArgs> for CustomerDraft {
    fn from(args: CustomerArgs) -> CustomerDraft {
        CustomerDraft {
            document_type: args.document_type,
            document_number: args.document_number,
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            customer_type: args.customer_type,
        }
    }
}

impl From<CustomerCommands> for CustomerCommand {
    fn from(cmd: CustomerCommands) -> CustomerCommand {
        match cmd {
            CustomerCommands::List => CustomerCommand::List,
            CustomerCommands::Show(ShowArgs {
                document: Some(document_number),
                ..
            }) => CustomerCommand::ShowByDocument { document_number },
            CustomerCommands::Show(ShowArgs { id, .. }) => CustomerCommand::Show {
                id: id.unwrap_or_default(),
            },
            CustomerCommands::Add(args) => CustomerCommand::Add(args.into()),
            CustomerCommands::Update { id, details } => CustomerCommand::Update {
                id,
                draft: details.into(),
            },
            CustomerCommands::Delete { id } => CustomerCommand::Delete { id },
        }
    }
}

impl Commands {
    fn into_app_command(self) -> Option<custagg::AppCommand> {
        match self {
            Commands::Setup => None,
            Commands::Monthly { customer_id } => {
                Some(custagg::AppCommand::Monthly { customer_id })
            }
            Commands::Consolidated { customer_id } => {
                Some(custagg::AppCommand::Consolidated { customer_id })
            }
            Commands::Products { start, end } => Some(custagg::AppCommand::Products { start, end }),
            Commands::Customer(cmd) => Some(custagg::AppCommand::Customer(cmd.into())),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    let result = match cli.command.map(Commands::into_app_command) {
        Some(None) => custagg::cli::setup::setup(),
        Some(Some(cmd)) => custagg::run_command(cmd, cli.config_path.as_deref(), format).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer_command(args: &[&str]) -> CustomerCommand {
        match Cli::try_parse_from(args).unwrap().command {
            Some(Commands::Customer(cmd)) => cmd.into(),
            _ => panic!("Expected a customer command"),
        }
    }

    #[test]
    fn test_show_by_id_or_document() {
        assert!(matches!(
            customer_command(&["custagg", "customer", "show", "c-1"]),
            CustomerCommand::Show { id } if id == "c-1"
        ));
        assert!(matches!(
            customer_command(&["custagg", "customer", "show", "--document", "70112233"]),
            CustomerCommand::ShowByDocument { document_number } if document_number == "70112233"
        ));
    }

    #[test]
    fn test_show_requires_exactly_one_lookup() {
        assert!(Cli::try_parse_from(["custagg", "customer", "show"]).is_err());
        assert!(
            Cli::try_parse_from(["custagg", "customer", "show", "c-1", "--document", "7011"])
                .is_err()
        );
    }
}
