//! Config management commands (`init`, `config validate`, `config show`).

pub mod config;
pub mod init;
