mod args;
mod commands;
mod handlers;
mod output;
pub mod types;

pub use args::{
    CaseCommand, Cli, ClientCommand, Commands, FilterArgs, QueryCommand, ReportCommand,
    SessionCommand,
};
pub use commands::run;
