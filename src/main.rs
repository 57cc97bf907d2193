extern crate log;
pub mod config;
pub mod geofile;
pub mod server;
pub mod store;
use crate::config::{Config, FileConfig, Overrides};
use crate::geofile::feature::FeatureValidation;
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

/// Draw polygons on a map in the browser and export them as GeoJSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to an optional YAML config file.
    #[arg(short, long)]
    config_filepath: Option<PathBuf>,

    /// Address to listen on.
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on.
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory exported GeoJSON files are written to.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Do not open a browser window on startup.
    #[arg(long)]
    no_browser: bool,

    /// How strictly submitted features are checked.
    #[arg(long, value_enum)]
    validation: Option<FeatureValidation>,
}

impl Args {
    fn load_config(self) -> anyhow::Result<Config> {
        let file_config = match &self.config_filepath {
            Some(filepath) => {
                log::info!("Reading config from {:?}", filepath);
                FileConfig::from_file(filepath)?
            }
            None => FileConfig::default(),
        };
        let overrides = Overrides {
            host: self.host,
            port: self.port,
            output_dir: self.output_dir,
            no_browser: self.no_browser,
            validation: self.validation,
        };
        Ok(Config::resolve(file_config, overrides))
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    let config = args.load_config()?;
    log::debug!("{:?}", config);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::run(config))
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}
