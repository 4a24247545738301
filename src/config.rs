//! Runtime configuration.
//!
//! Values come from the environment first and may then be overridden by command-line flags:
//!
//! | Setting        | Variable           | Flag         | Default          |
//! |----------------|--------------------|--------------|------------------|
//! | Listen address | `CATALOG_BIND`     | `--bind`     | `127.0.0.1:3000` |
//! | Database file  | `CATALOG_DATABASE` | `--database` | `catalog.db`     |
//! | Seed file      | `CATALOG_SEED`     | `--seed`     | none             |
//!
//! `--database :memory:` runs against a throwaway in-memory database.

use anyhow::{anyhow, Context};
use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_DATABASE: &str = "catalog.db";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database: String,
    pub seed_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            bind_addr: try_load("CATALOG_BIND", DEFAULT_BIND)?,
            database: try_load("CATALOG_DATABASE", DEFAULT_DATABASE)?,
            seed_file: env::var("CATALOG_SEED").ok().map(PathBuf::from),
        })
    }

    /// Applies `--flag value` overrides. `args` excludes the program name. Unknown arguments
    /// are skipped.
    pub fn apply_args(&mut self, args: &[String]) -> anyhow::Result<()> {
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    let value = flag_value(args, i)?;
                    self.bind_addr = value
                        .parse()
                        .with_context(|| format!("Invalid --bind value '{}'", value))?;
                    i += 2;
                }
                "--database" => {
                    self.database = flag_value(args, i)?.to_string();
                    i += 2;
                }
                "--seed" => {
                    self.seed_file = Some(PathBuf::from(flag_value(args, i)?));
                    i += 2;
                }
                other => {
                    tracing::debug!("Ignoring unknown argument '{}'", other);
                    i += 1;
                }
            }
        }
        Ok(())
    }
}

fn flag_value(args: &[String], i: usize) -> anyhow::Result<&str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{} requires a value", args[i]))
}

fn try_load<T: FromStr>(key: &str, default: &str) -> anyhow::Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        tracing::info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse()
        .map_err(|e| anyhow!("Invalid {key} value '{raw}': {e}"))
}
