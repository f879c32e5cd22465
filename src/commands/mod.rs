//! CLI commands for linkpath

pub mod dispatch;
pub mod expand;
pub mod find;
pub mod oracle;
