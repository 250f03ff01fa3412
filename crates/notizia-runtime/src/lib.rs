pub mod config;
pub mod demo;
pub mod error;
pub mod export;
pub mod practice;
pub mod queries;

pub use config::{Config, DatabaseConfig, ExportConfig, resolve_workspace_path};
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use practice::{Crosstab, CrosstabKind, Practice, Report};
pub use queries::{SavedQueries, SavedQuery};
