//! Account command handlers: signup, signin, signout, whoami
//!
//! Sign-up registers credentials before writing the directory profile, so a
//! rejected sign-up (duplicate email, empty password) leaves no trace in the
//! directory.

use super::base::{HandlerContext, validation};
use crate::auth::AuthProvider;
use crate::cli::output::OutputFormatter;
use crate::core::{Role, User};
use crate::error::Result;
use crate::storage::TicketStore;
use tracing::debug;

/// Parameters for creating an account
pub struct SignupParams {
    pub email: String,
    pub name: String,
    pub surname: String,
    pub password: String,
    pub technician: bool,
}

/// Handle the signup command
pub fn handle_signup(
    params: SignupParams,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    validation::require_non_empty("email", &params.email)?;
    validation::require_non_empty("password", &params.password)?;

    let ctx = HandlerContext::new(project_dir)?;

    let role = if params.technician {
        Role::Technician
    } else {
        Role::Regular
    };
    let user = User::new(params.name, params.surname, &params.email, role);

    // Credentials first: the duplicate-email check must run before the
    // profile write, or a rejected sign-up leaves an orphan directory entry
    ctx.auth.sign_up(&user, &params.password)?;
    ctx.store.save_user(&user)?;
    debug!(user = %user.id, "created account");

    if formatter.is_json() {
        formatter.print_json(&serde_json::json!({
            "status": "success",
            "user_id": user.id,
            "email": user.email,
            "is_technician": role.is_technician(),
        }))?;
    } else {
        formatter.success(&format!(
            "Signed up and signed in as {} ({})",
            user.display_name(),
            user.email
        ));
        if role.is_technician() {
            formatter.info("This account has the technician role.");
        }
    }

    Ok(())
}

/// Handle the signin command
pub fn handle_signin(
    email: &str,
    password: &str,
    project_dir: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    validation::require_non_empty("email", email)?;
    validation::require_non_empty("password", password)?;

    let ctx = HandlerContext::new(project_dir)?;
    let user_id = ctx.auth.sign_in(email, password)?;
    let session = ctx.session()?;
    debug!(user = %user_id, "signed in");

    if formatter.is_json() {
        formatter.print_json(&serde_json::json!({
            "status": "success",
            "user_id": user_id,
            "email": session.email,
            "is_technician": session.is_technician(),
        }))?;
    } else {
        formatter.success(&format!("Signed in as {}", session.email));
    }

    Ok(())
}

/// Handle the signout command
pub fn handle_signout(project_dir: Option<&str>, formatter: &OutputFormatter) -> Result<()> {
    let ctx = HandlerContext::new(project_dir)?;
    ctx.auth.sign_out()?;

    if formatter.is_json() {
        formatter.print_json(&serde_json::json!({ "status": "success" }))?;
    } else {
        formatter.success("Signed out");
    }
    Ok(())
}


/// Handle the whoami command
pub fn handle_whoami(project_dir: Option<&str>, formatter: &OutputFormatter) -> Result<()> {
    let ctx = HandlerContext::new(project_dir)?;
    let session = ctx.session()?;

    if formatter.is_json() {
        formatter.print_json(&serde_json::json!({
            "user_id": session.user_id,
            "email": session.email,
            "is_technician": session.is_technician(),
        }))?;
    } else {
        let role = if session.is_technician() {
            "technician"
        } else {
            "user"
        };
        formatter.info(&format!("{} ({role})", session.email));
    }
    Ok(())
}
