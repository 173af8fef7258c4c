//! Command handlers

pub mod account;
pub mod base;
pub mod comment;
pub mod delete;
pub mod init;
pub mod list;
pub mod log;
pub mod report;
pub mod resolve;
pub mod show;

pub use account::{SignupParams, handle_signin, handle_signout, handle_signup, handle_whoami};
pub use comment::handle_comment;
pub use delete::handle_delete;
pub use init::handle_init;
pub use list::handle_list;
pub use log::{LogParams, handle_log_command};
pub use report::handle_report;
pub use resolve::handle_resolve;
pub use show::handle_show;
