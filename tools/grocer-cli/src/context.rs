//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use grocer_core::catalog::CatalogStore;
use grocer_core::Storefront;

use crate::config::CliConfig;
use crate::output::Output;

pub const CONFIG_NAMES: [&str; 3] = ["grocer.toml", ".grocer.toml", "grocer.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory relative config paths resolve against.
    pub config_dir: PathBuf,
    /// Catalog file given on the command line.
    catalog_override: Option<PathBuf>,
}

impl Context {
    /// Load context from an explicit config file or the nearest one above cwd.
    pub fn load(config_path: Option<&str>, catalog: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_dir) = if let Some(path) = config_path {
            let dir = Path::new(path)
                .parent()
                .map(|p| cwd.join(p))
                .unwrap_or_else(|| cwd.clone());
            (CliConfig::load(path)?, dir)
        } else {
            Self::find_config(&cwd).unwrap_or_else(|| (CliConfig::default(), cwd.clone()))
        };

        let catalog_override = catalog.map(|c| cwd.join(c));

        Ok(Self {
            config,
            output,
            cwd,
            config_dir,
            catalog_override,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, current));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Catalog file from `--catalog` or `storefront.catalog`.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog_override.clone().or_else(|| {
            self.config
                .storefront
                .catalog
                .as_ref()
                .map(|c| self.config_dir.join(c))
        })
    }

    pub fn load_catalog(&self) -> Result<CatalogStore> {
        let Some(path) = self.catalog_path() else {
            bail!("No catalog configured. Pass --catalog or set storefront.catalog in grocer.toml");
        };
        self.output
            .debug(&format!("Loading catalog: {}", path.display()));
        let catalog = CatalogStore::load(&path, self.config.currency()?)?;
        Ok(catalog)
    }

    /// Build a fresh storefront from config and catalog.
    pub fn storefront(&self) -> Result<Storefront> {
        let catalog = self.load_catalog()?;
        let promotions = self.config.promotion_table()?;
        let store = Storefront::new(catalog, promotions, self.config.currency()?)?;
        Ok(store.with_dark_theme(self.config.storefront.dark_theme))
    }

    /// Context rooted at `dir` with quiet output.
    #[cfg(test)]
    pub fn for_dir(config: CliConfig, dir: PathBuf) -> Self {
        Self {
            config,
            output: Output::new(false, true),
            cwd: dir.clone(),
            config_dir: dir,
            catalog_override: None,
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}
