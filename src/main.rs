use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use supportdesk::commands::{
    OutputOptions, SubmitOptions, cmd_config_get, cmd_config_set, cmd_config_show, cmd_form,
    cmd_issue_types, cmd_submit,
};
use supportdesk::logging::{self, LogTarget};
use supportdesk::types::{ContactMethod, IssueType, SubReason, VALID_ISSUE_TYPES};

#[derive(Parser)]
#[command(name = "supportdesk")]
#[command(about = "File customer support tickets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive ticket form
    #[command(visible_alias = "f")]
    Form {
        /// Submission endpoint (overrides config and environment)
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Submit a ticket without the interactive form
    #[command(group(ArgGroup::new("name").args(["full_name", "first_name"]).multiple(false)))]
    Submit {
        /// Customer email address
        #[arg(long, default_value = "")]
        email: String,

        /// Contact number (formatting characters are stripped)
        #[arg(long, default_value = "")]
        phone: String,

        /// Issue type (see `supportdesk issue-types`)
        #[arg(short = 't', long = "issue-type", value_parser = parse_issue_type)]
        issue_type: Option<IssueType>,

        /// Reason, required for return and exchange
        #[arg(short = 'r', long = "sub-reason", value_parser = parse_sub_reason)]
        sub_reason: Option<SubReason>,

        /// What happened
        #[arg(short, long, default_value = "")]
        description: String,

        /// Order ID, with or without the configured prefix
        #[arg(short, long)]
        order: Option<String>,

        /// Full name
        #[arg(long = "full-name")]
        full_name: Option<String>,

        /// First name (joined with --last-name)
        #[arg(long = "first-name")]
        first_name: Option<String>,

        /// Last name
        #[arg(long = "last-name", requires = "first_name")]
        last_name: Option<String>,

        /// Preferred contact method: email or phone
        #[arg(long = "contact-method", value_parser = parse_contact_method)]
        contact_method: Option<ContactMethod>,

        /// File to attach
        #[arg(short, long)]
        attachment: Option<PathBuf>,

        /// Submission endpoint (overrides config and environment)
        #[arg(long)]
        endpoint: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List issue types and their reasons
    IssueTypes {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (endpoint.url, order.prefix, success.contract, request.timeout,
        /// attachment.max_bytes, attachment.extensions, accept.json)
        key: String,
        /// Value to set
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_issue_type(s: &str) -> Result<IssueType, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid issue type. Must be one of: {}",
            VALID_ISSUE_TYPES.join(", ")
        )
    })
}

fn parse_sub_reason(s: &str) -> Result<SubReason, String> {
    s.parse().map_err(|_| {
        let valid: Vec<&str> = SubReason::ALL.iter().map(|r| r.slug()).collect();
        format!("Invalid reason. Must be one of: {}", valid.join(", "))
    })
}

fn parse_contact_method(s: &str) -> Result<ContactMethod, String> {
    s.parse().map_err(|e| format!("{e}"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // The form owns the terminal
    if matches!(cli.command, Commands::Form { .. }) {
        logging::init(LogTarget::File);
    } else {
        logging::init(LogTarget::Stderr);
    }

    let result = match cli.command {
        Commands::Form { endpoint } => cmd_form(endpoint).await,

        Commands::Submit {
            email,
            phone,
            issue_type,
            sub_reason,
            description,
            order,
            full_name,
            first_name,
            last_name,
            contact_method,
            attachment,
            endpoint,
            json,
        } => {
            cmd_submit(
                SubmitOptions {
                    email,
                    phone,
                    issue_type,
                    sub_reason,
                    description,
                    order,
                    full_name,
                    first_name,
                    last_name,
                    contact_method,
                    attachment,
                    endpoint,
                },
                OutputOptions { json },
            )
            .await
        }

        Commands::IssueTypes { json } => cmd_issue_types(OutputOptions { json }),

        Commands::Config { action } => match action {
            ConfigAction::Show { json } => cmd_config_show(OutputOptions { json }),
            ConfigAction::Set { key, value, json } => {
                cmd_config_set(&key, &value, OutputOptions { json })
            }
            ConfigAction::Get { key, json } => cmd_config_get(&key, OutputOptions { json }),
        },
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
