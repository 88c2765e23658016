//! Configuration management for the diagram store
//!
//! Loads configuration from environment variables with validation.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub server_addr: SocketAddr,

    /// Directory holding document payloads and metadata sidecars
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse::<u16>()
            .context("Invalid PORT")?;

        let server_addr = format!("{}:{}", host, port)
            .parse()
            .context("Invalid server address")?;

        let data_dir = std::env::var("DATA_DIR")
            .unwrap_or_else(|_| "./diagrams".to_string())
            .into();

        Ok(Config {
            server_addr,
            data_dir,
        })
    }
}
