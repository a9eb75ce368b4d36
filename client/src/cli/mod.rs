//! Command line definitions for the `ipl` binary.

pub mod commands;
pub mod render;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use ipl_client::app::SortKey;
use ipl_client::PaymentOutcome;
use shared::{FeeStatus, PaymentStatus, UserRole};

/// IPL: pay and manage neighborhood maintenance dues
#[derive(Parser, Debug)]
#[command(name = "ipl", version)]
#[command(about = "Client for the IPL dues backend")]
pub struct Args {
    /// Backend base URL (overrides IPL_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Log out and forget the stored token
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List your dues
    Fees {
        #[arg(long)]
        status: Option<FeeStatus>,
        #[arg(long)]
        year: Option<i32>,
    },

    /// Start a payment for a fee
    Pay {
        fee_id: String,
        /// Open the gateway page in the browser
        #[arg(long)]
        open: bool,
        /// Wait until the payment settles
        #[arg(long)]
        wait: bool,
    },

    /// Inspect a single payment
    Payment {
        #[command(subcommand)]
        command: PaymentCommand,
    },

    /// Review payments
    Payments(PaymentsArgs),

    /// Administration
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },

    /// Show and manage notifications
    Notifications(NotificationsArgs),
}

#[derive(Subcommand, Debug)]
pub enum PaymentCommand {
    /// Show the latest status of a payment
    Status {
        payment_id: String,
        /// Poll until the payment settles
        #[arg(long)]
        wait: bool,
        /// Ask the backend to re-query the gateway first
        #[arg(long)]
        force: bool,
    },

    /// Resolve a gateway redirect (query string or full URL)
    Callback { query: String },
}

#[derive(ClapArgs, Debug)]
pub struct PaymentsArgs {
    /// Keep only these outcomes (repeatable); gateway statuses such as
    /// `settlement` or `expire` are accepted too
    #[arg(long = "status", value_parser = parse_outcome)]
    pub statuses: Vec<PaymentOutcome>,

    /// First day included (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day included (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Match user name, order id or payment id
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub fee_id: Option<String>,

    /// created_at, amount, status or user_name
    #[arg(long, default_value = "created_at")]
    pub sort: SortKey,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Write the filtered list to a CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Keep refreshing until interrupted
    #[arg(long)]
    pub follow: bool,
}

/// Outcome name, or a raw gateway status mapped to its outcome.
fn parse_outcome(s: &str) -> Result<PaymentOutcome, String> {
    if let Ok(outcome) = s.parse::<PaymentOutcome>() {
        return Ok(outcome);
    }
    match s.parse().unwrap_or(PaymentStatus::Unknown) {
        PaymentStatus::Unknown => Err(format!("unknown payment status: {}", s)),
        status => Ok(PaymentOutcome::from(status)),
    }
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Generate a month of fees for every resident
    Generate {
        #[arg(long)]
        month: u32,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        amount: i64,
        /// YYYY-MM-DD
        #[arg(long)]
        due_date: NaiveDate,
        #[arg(long)]
        description: Option<String>,
    },

    /// Collection summary with paid and unpaid residents
    Summary {
        #[arg(long)]
        month: u32,
        #[arg(long)]
        year: i32,
    },

    /// List users
    Users {
        #[arg(long)]
        role: Option<UserRole>,
        #[arg(long)]
        search: Option<String>,
        /// Sort by house number instead of name
        #[arg(long)]
        by_house: bool,
    },

    /// Create a user
    CreateUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "resident")]
        role: UserRole,
        #[arg(long)]
        house_number: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },

    /// Delete a user
    DeleteUser { user_id: String },
}

#[derive(ClapArgs, Debug)]
pub struct NotificationsArgs {
    /// Only unread notifications
    #[arg(long)]
    pub unread: bool,

    #[arg(long, value_name = "ID", conflicts_with = "mark_all")]
    pub mark_read: Option<String>,

    #[arg(long)]
    pub mark_all: bool,

    #[arg(long, value_name = "ID")]
    pub delete: Option<String>,

    /// Keep polling until interrupted
    #[arg(long)]
    pub follow: bool,
}
