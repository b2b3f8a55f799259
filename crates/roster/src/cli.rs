//! CLI command definitions.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use roster_core::employee::UpdateEmployeeRequest;

/// Roster - employee records with a cache-aside repository
#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum CliCommand {
    #[command(flatten)]
    Run(Commands),
    /// Read commands from stdin, one per line, against one open repository.
    ///
    /// The store and cache stay open for the whole session, so cached
    /// entries carry over from one command to the next.
    Shell,
}

/// One line of `roster shell` input.
#[derive(Debug, Parser)]
#[command(name = "roster", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Employee commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an employee.
    Create {
        /// Full name.
        #[arg(long)]
        name: String,
        /// Job title.
        #[arg(long)]
        position: String,
        /// Salary in whole currency units.
        #[arg(long)]
        salary: i64,
        /// Hire date (YYYY-MM-DD), defaults to today.
        #[arg(long)]
        hired_date: Option<NaiveDate>,
    },
    /// Show an employee.
    Get {
        /// Employee ID.
        id: Uuid,
    },
    /// Change some fields of an employee.
    Update {
        /// Employee ID.
        id: Uuid,
        #[command(flatten)]
        changes: UpdateArgs,
    },
    /// Delete an employee.
    Delete {
        /// Employee ID.
        id: Uuid,
    },
    /// List all employees.
    List,
}

/// Fields accepted by `update`; omitted fields keep their current value.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UpdateArgs {
    /// New full name.
    #[arg(long)]
    pub name: Option<String>,
    /// New job title.
    #[arg(long)]
    pub position: Option<String>,
    /// New salary.
    #[arg(long)]
    pub salary: Option<i64>,
    /// New hire date (YYYY-MM-DD).
    #[arg(long)]
    pub hired_date: Option<NaiveDate>,
}

impl From<UpdateArgs> for UpdateEmployeeRequest {
    fn from(args: UpdateArgs) -> Self {
        Self {
            name: args.name,
            position: args.position,
            salary: args.salary,
            hired_date: args.hired_date,
        }
    }
}
