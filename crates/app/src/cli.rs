use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Listen address, overrides VIEWFINDER_HTTP_ADDR.
    #[arg(long)]
    pub addr: Option<SocketAddr>,
    /// Data directory, overrides VIEWFINDER_DATA_DIR.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl Cli {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(addr) = self.addr {
            config.http_addr = addr;
        }
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
    }
}
