//! Init command handler

use super::base::HandlerContext;
use crate::cli::output::OutputFormatter;
use crate::error::Result;

/// Create the helpdesk data directory layout
pub fn handle_init(force: bool, project_dir: Option<&str>, formatter: &OutputFormatter) -> Result<()> {
    let ctx = HandlerContext::init(project_dir, force)?;

    if formatter.is_json() {
        formatter.print_json(&serde_json::json!({
            "status": "success",
            "data_dir": ctx.store.root(),
        }))?;
    } else {
        formatter.success(&format!(
            "Initialized helpdesk in {}",
            ctx.store.root().display()
        ));
        formatter.info("Next: create an account with 'helpdesk signup <email> --password <password>'");
    }

    Ok(())
}
