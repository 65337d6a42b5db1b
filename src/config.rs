//! ==============================================================================
//! config.rs - Runtime Configuration Loader
//! ==============================================================================
//!
//! purpose:
//!     defines the schema for `monitor.toml`.
//!     loads configuration from file or falls back to defaults.
//!
//! structure:
//!     - ServerConfig: bind address and port for the hub.
//!     - DashboardConfig: poll interval and the card labels for this site.
//!     - PlaceholderCard: fixed demo values for bins not yet wired up.
//!
//! ==============================================================================

use std::path::Path;

use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MonitorConfig {
    pub server: ServerConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    /// browser poll cadence in milliseconds
    pub poll_interval_ms: u64,
    /// page heading
    pub title: String,
    /// name/location shown on the live card
    pub live_card: CardLabel,
    /// bins not yet wired up, rendered with fixed demo values
    pub placeholders: Vec<PlaceholderCard>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CardLabel {
    pub name: String,
    pub location: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlaceholderCard {
    pub name: String,
    pub location: String,
    pub fill_level: f64,
    pub distance: f64,
}

impl MonitorConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let config: MonitorConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config: {}", e))?;

        Ok(config)
    }

    /// Load with default fallback
    pub fn load_or_default() -> Self {
        let paths = [
            std::path::PathBuf::from("config").join("monitor.toml"),
            std::path::PathBuf::from("monitor.toml"),
        ];

        for path in &paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "loaded configuration");
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "failed to load config");
                    }
                }
            }
        }

        tracing::warn!("no config file found - using defaults");
        Self::default()
    }

    /// socket address string the hub binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2000,
            title: "Smart Dustbin Monitor".to_string(),
            live_card: CardLabel {
                name: "Room No 201".to_string(),
                location: "2nd floor".to_string(),
            },
            placeholders: vec![
                PlaceholderCard {
                    name: "Room No 202".to_string(),
                    location: "2nd floor".to_string(),
                    fill_level: 35.0,
                    distance: 65.0,
                },
                PlaceholderCard {
                    name: "Room No 203".to_string(),
                    location: "2nd floor".to_string(),
                    fill_level: 72.0,
                    distance: 28.0,
                },
            ],
        }
    }
}
