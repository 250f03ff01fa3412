use crate::{Error, Result};
use notizia_engine::Query;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const QUERIES_FILE: &str = "queries.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQuery {
    pub name: String,
    /// RFC 3339 timestamp of the last save.
    pub saved_at: String,
    #[serde(default)]
    pub query: Query,
}

/// Named report filters, most recently saved first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedQueries {
    #[serde(default)]
    queries: Vec<SavedQuery>,
}

impl SavedQueries {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Store `query` under `name`, replacing an entry of the same name.
    pub fn save(&mut self, name: &str, query: Query) -> Result<&SavedQuery> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidOperation(
                "saved query name must not be empty".to_string(),
            ));
        }

        self.queries.retain(|q| q.name != name);
        self.queries.insert(
            0,
            SavedQuery {
                name: name.to_string(),
                saved_at: chrono::Utc::now().to_rfc3339(),
                query,
            },
        );
        Ok(&self.queries[0])
    }

    pub fn get(&self, name: &str) -> Option<&SavedQuery> {
        self.queries.iter().find(|q| q.name == name.trim())
    }

    /// Returns whether an entry was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.queries.len();
        self.queries.retain(|q| q.name != name.trim());
        self.queries.len() != before
    }

    pub fn list(&self) -> &[SavedQuery] {
        &self.queries
    }
}
