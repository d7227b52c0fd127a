use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

/// Language substituted when the requested one has no word list.
pub const DEFAULT_LANGUAGE: &str = "english";

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        data_dir: get_env("STOPWORDS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir),
        language: get_env_or_default("STOPWORDS_LANGUAGE", DEFAULT_LANGUAGE),
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub language: String,
}

fn get_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    get_env(key).unwrap_or_else(|| default.to_string())
}

/// `data/` beside the installed executable, falling back to `./data`.
fn default_data_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("data")))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from("data"))
}
