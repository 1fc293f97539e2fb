//! One module per subcommand.  Each exposes an `execute` function.

pub mod add;
#[cfg(feature = "audit-log")]
pub mod audit_cmd;
pub mod categories;
pub mod completions;
pub mod find;
pub mod generate;
pub mod init;
pub mod list;
pub mod remove;
pub mod reveal;
pub mod rotate;
pub mod update;
