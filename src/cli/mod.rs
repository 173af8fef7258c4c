//! Command-line interface definitions

pub mod handlers;
pub mod output;

pub use output::OutputFormatter;

use clap::{Parser, Subcommand};

/// helpdesk - log, triage, and resolve support tickets
#[derive(Parser)]
#[command(name = "helpdesk", version)]
pub struct Cli {
    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory (defaults to the current directory)
    #[arg(long, global = true)]
    pub dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the helpdesk data directory
    Init {
        /// Re-initialize even if a data directory already exists
        #[arg(long)]
        force: bool,
    },

    /// Create an account and sign in
    Signup {
        /// Email address, used to sign in
        email: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        surname: String,
        #[arg(long)]
        password: String,
        /// Register with the technician role
        #[arg(long)]
        technician: bool,
    },

    /// Sign in with an existing account
    Signin {
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out of the current session
    Signout,

    /// Show the signed-in user
    Whoami,

    /// Log a new ticket
    Log {
        title: String,
        description: String,
        /// Log on behalf of another user, by email (technician only)
        #[arg(long = "for")]
        for_email: Option<String>,
        /// Skip the notification email
        #[arg(long)]
        no_notify: bool,
    },

    /// List tickets you are allowed to see
    List {
        /// Match against title, description, or logged-by
        #[arg(long)]
        search: Option<String>,
        /// Filter by status: open, resolved, or all
        #[arg(long)]
        status: Option<String>,
        /// Show only tickets logged for this user, by email (technician only)
        #[arg(long = "for")]
        for_email: Option<String>,
    },

    /// Show a ticket and its comments
    Show {
        /// Ticket id (a unique prefix is enough)
        ticket: String,
    },

    /// Add a comment to a ticket
    Comment {
        ticket: String,
        text: String,
    },

    /// Mark a ticket resolved (technician only)
    Resolve {
        ticket: String,
    },

    /// Delete a ticket, irreversibly (technician only)
    Delete {
        ticket: String,
        /// Skip the confirmation requirement
        #[arg(long)]
        force: bool,
    },

    /// Export the filtered ticket set to a semicolon-delimited report
    /// (technician only)
    Report {
        /// Output path; defaults to filtered_tickets_<date>.csv
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long = "for")]
        for_email: Option<String>,
    },
}
