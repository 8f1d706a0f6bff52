//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding `index.html` and the other static assets.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    // === Simulated Processing ===
    /// Delay before acknowledging a contact form submission.
    #[serde(default = "default_contact_delay")]
    pub contact_delay_ms: u64,

    /// Delay before acknowledging an appointment booking.
    #[serde(default = "default_appointment_delay")]
    pub appointment_delay_ms: u64,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_contact_delay() -> u64 {
    1000
}

fn default_appointment_delay() -> u64 {
    1500
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: default_static_dir(),
            contact_delay_ms: default_contact_delay(),
            appointment_delay_ms: default_appointment_delay(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.static_dir.as_os_str().is_empty() {
            return Err("STATIC_DIR must not be empty".to_string());
        }

        Ok(())
    }

    /// Path of the landing page served on `GET /`.
    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }

    pub fn contact_delay(&self) -> Duration {
        Duration::from_millis(self.contact_delay_ms)
    }

    pub fn appointment_delay(&self) -> Duration {
        Duration::from_millis(self.appointment_delay_ms)
    }
}
