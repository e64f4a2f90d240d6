use crate::core::DinnerError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DinnerConfig {
    /// Base URL of the recipe match engine, deployment-supplied.
    pub api_base_url: String,
    /// Seed terms for an interactive session.
    #[serde(default = "default_ingredients")]
    pub default_ingredients: Vec<String>,
}

// Default configuration if file is missing
impl Default for DinnerConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            default_ingredients: default_ingredients(),
        }
    }
}

fn default_ingredients() -> Vec<String> {
    ["Yogurt", "Milk", "Vanilla", "Sugar"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join("config.toml"),
        }
    }

    // Load config or create default if missing
    pub async fn load(&self) -> Result<DinnerConfig, DinnerError> {
        if !self.path.exists() {
            let default_config = DinnerConfig::default();
            self.save(&default_config).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&self.path).await?;
        toml::from_str(&content).map_err(DinnerError::Parse)
    }

    pub async fn save(&self, config: &DinnerConfig) -> Result<(), DinnerError> {
        let content = toml::to_string_pretty(config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

        fs::write(&self.path, content).await?;
        Ok(())
    }
}
