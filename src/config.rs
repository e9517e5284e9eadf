use std::net::SocketAddr;
use std::path::PathBuf;

use crate::table::ColumnLabels;

pub const DEFAULT_DATA_FILE: &str = "items.csv";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Where the data lives, where the server listens and how the columns are labelled.
#[derive(Clone, Debug)]
pub struct Config {
    pub data_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub labels: ColumnLabels,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            bind_addr: default_bind_addr(),
            labels: ColumnLabels::english(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

impl Config {
    /// Build from positional arguments: `[DATA_FILE] [BIND_ADDR] [en|zh]`
    ///
    /// The first item is the program name. Missing or unparsable values keep their
    /// defaults.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let args: Vec<String> = args.into_iter().collect();
        let mut config = Config::default();

        if let Some(path) = args.get(1).filter(|p| !p.is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(addr) = args.get(2) {
            match addr.parse() {
                Ok(addr) => config.bind_addr = addr,
                Err(_) => log::warn!("ignoring invalid address '{}', using {}", addr, DEFAULT_BIND_ADDR),
            }
        }
        if let Some(lang) = args.get(3) {
            match lang.as_str() {
                "en" => config.labels = ColumnLabels::english(),
                "zh" => config.labels = ColumnLabels::chinese(),
                other => log::warn!("unknown label set '{}', using English", other),
            }
        }

        config
    }
}
