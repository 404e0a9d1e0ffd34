//! Application context for the Fundbook CLI.
//!
//! Resolves the runtime paths once (CLI flags over config file over XDG
//! defaults) so handlers do not re-derive them.

use std::path::PathBuf;

use fundbook_core::auth::Credentials;
use fundbook_core::LedgerService;

use crate::cli::Cli;
use crate::config;

pub struct AppContext {
    pub data_dir: PathBuf,
    pub users_file: PathBuf,
    pub quiet: bool,
}

impl AppContext {
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let file_config = config::load_config_if_present()?;

        let data_dir = match cli.data_dir.clone().or(file_config.ledger.data_dir) {
            Some(dir) => PathBuf::from(dir),
            None => config::default_data_dir()?,
        };
        let users_file = match cli.users_file.clone().or(file_config.auth.users_file) {
            Some(path) => PathBuf::from(path),
            None => data_dir.join("users.json"),
        };

        Ok(Self {
            data_dir,
            users_file,
            quiet: cli.quiet,
        })
    }

    /// The ledger rooted at the resolved data directory.
    pub fn service(&self) -> LedgerService {
        LedgerService::open(&self.data_dir)
    }

    pub fn credentials(&self) -> anyhow::Result<Credentials> {
        Credentials::load(&self.users_file).map_err(|e| {
            anyhow::anyhow!("{}\nHint: run `fundbook init` to set up the ledger.", e)
        })
    }
}
