//! helpdesk - ticket logging and triage from the command line
//!
//! This is the main entry point for the helpdesk CLI. It parses arguments
//! and dispatches to the command handlers.

use clap::Parser;
use helpdesk::cli::{Cli, Commands, OutputFormatter, handlers};
use helpdesk::error::Result;
use std::process;

fn main() {
    let cli = Cli::parse();

    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    if let Err(e) = run(cli, &formatter) {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// Run the CLI application with the parsed arguments
fn run(cli: Cli, formatter: &OutputFormatter) -> Result<()> {
    if cli.verbose {
        tracing_subscriber::fmt().with_env_filter("debug").init();
    }

    dispatch_command(cli.command, cli.dir.as_deref(), formatter)
}

fn dispatch_command(
    command: Commands,
    dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        Commands::Init { force } => handlers::handle_init(force, dir, formatter),
        Commands::Signup {
            email,
            name,
            surname,
            password,
            technician,
        } => handlers::handle_signup(
            handlers::SignupParams {
                email,
                name,
                surname,
                password,
                technician,
            },
            dir,
            formatter,
        ),
        Commands::Signin { email, password } => {
            handlers::handle_signin(&email, &password, dir, formatter)
        },
        Commands::Signout => handlers::handle_signout(dir, formatter),
        Commands::Whoami => handlers::handle_whoami(dir, formatter),
        Commands::Log {
            title,
            description,
            for_email,
            no_notify,
        } => handlers::handle_log_command(
            handlers::LogParams {
                title,
                description,
                for_email,
                no_notify,
            },
            dir,
            formatter,
        ),
        Commands::List {
            search,
            status,
            for_email,
        } => handlers::handle_list(
            search.as_deref(),
            status.as_deref(),
            for_email.as_deref(),
            dir,
            formatter,
        ),
        Commands::Show { ticket } => handlers::handle_show(&ticket, dir, formatter),
        Commands::Comment { ticket, text } => {
            handlers::handle_comment(&ticket, &text, dir, formatter)
        },
        Commands::Resolve { ticket } => handlers::handle_resolve(&ticket, dir, formatter),
        Commands::Delete { ticket, force } => {
            handlers::handle_delete(&ticket, force, dir, formatter)
        },
        Commands::Report {
            output,
            search,
            status,
            for_email,
        } => handlers::handle_report(
            output.as_deref(),
            search.as_deref(),
            status.as_deref(),
            for_email.as_deref(),
            dir,
            formatter,
        ),
    }
}

/// Format an error for the user: the message, then any suggestions, then the
/// debug chain when verbose logging is active
fn handle_error(error: &helpdesk::error::HelpdeskError, formatter: &OutputFormatter) {
    formatter.error(&error.user_message());

    let suggestions = error.suggestions();
    if !suggestions.is_empty() {
        formatter.info("\nSuggestions:");
        for suggestion in &suggestions {
            formatter.info(&format!("  • {suggestion}"));
        }
    }

    if formatter.is_json() {
        let _ = formatter.print_json(&serde_json::json!({
            "status": "error",
            "error": error.to_string(),
            "suggestions": suggestions,
            "recoverable": error.is_recoverable(),
        }));
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let _cli = Cli::parse_from(["helpdesk", "init"]);
        let _cli = Cli::parse_from(["helpdesk", "list", "--status", "open"]);
        let _cli = Cli::parse_from(["helpdesk", "log", "Broken keyboard", "Keys stuck"]);
    }
}
