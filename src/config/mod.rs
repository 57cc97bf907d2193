use std::{
    fs::read_to_string,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use serde::Deserialize;

use crate::geofile::feature::FeatureValidation;

pub const DEFAULT_PORT: u16 = 5000;
pub const OUTPUT_DIR_NAME: &str = "output";

/// Optional settings read from a YAML config file. Every key may be omitted.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub output_dir: Option<PathBuf>,
    pub open_browser: Option<bool>,
    pub validation: Option<FeatureValidation>,
}

impl FileConfig {
    pub fn from_yaml(contents: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(contents).context("Parsing config file")
    }

    pub fn from_file(filepath: &Path) -> anyhow::Result<Self> {
        if !filepath.exists() {
            return Err(anyhow!("Config file {:?} not found", filepath));
        }
        Self::from_yaml(&read_to_string(filepath)?)
    }
}

/// Settings given on the command line. These take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub output_dir: Option<PathBuf>,
    pub no_browser: bool,
    pub validation: Option<FeatureValidation>,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    pub output_dir: PathBuf,
    pub open_browser: bool,
    pub validation: FeatureValidation,
}

impl Config {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        let host = overrides
            .host
            .or(file.host)
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
        let port = overrides.port.or(file.port).unwrap_or(DEFAULT_PORT);
        let output_dir = overrides
            .output_dir
            .or(file.output_dir)
            .unwrap_or_else(default_output_dir);
        Self {
            addr: SocketAddr::new(host, port),
            output_dir,
            open_browser: !overrides.no_browser && file.open_browser.unwrap_or(true),
            validation: overrides
                .validation
                .or(file.validation)
                .unwrap_or_default(),
        }
    }

    /// Address a browser should be pointed at.
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

/// `output/` next to the running executable, or in the working directory if the executable
/// location is unknown.
pub fn default_output_dir() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe_path) => match exe_path.parent() {
            Some(exe_dir) => exe_dir.join(OUTPUT_DIR_NAME),
            None => PathBuf::from(OUTPUT_DIR_NAME),
        },
        Err(err) => {
            log::warn!("Could not locate executable, exporting relative to working dir: {}", err);
            PathBuf::from(OUTPUT_DIR_NAME)
        }
    }
}
