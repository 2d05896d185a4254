use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "DRUG_PRICE_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub webview_data_dir: PathBuf,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let project_dirs = ProjectDirs::from("tw", "drugprice", "drug-price-history")
            .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
        let data_dir = project_dirs.data_local_dir().to_path_buf();
        let webview_data_dir = ensure_webview_data_dir(&data_dir)?;

        Ok(Self {
            data_dir,
            webview_data_dir,
            log_filter: log_filter_from(env::var(LOG_ENV).ok(), env::var("RUST_LOG").ok()),
        })
    }

    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_new(&self.log_filter)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        // A subscriber may already be installed (tests, embedding).
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn log_filter_from(primary: Option<String>, fallback: Option<String>) -> String {
    [primary, fallback]
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}
