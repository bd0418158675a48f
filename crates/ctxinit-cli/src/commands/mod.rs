//! Command handlers.  One module per subcommand; shared scaffold plumbing
//! lives in [`init`].

pub mod completions;
pub mod init;
pub mod new;
pub mod remove;
pub mod status;
