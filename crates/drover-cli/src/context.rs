//! Runtime context for CLI commands

use anyhow::{Context, Result};
use drover_core::Registry;
use drover_db::{Database, DuckDbBackend};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalArgs;
use crate::config::Config;
use crate::loader;

/// Runtime context containing the loaded config, the registry built from
/// the migration directories, and the database connection
#[allow(dead_code)]
pub struct RuntimeContext {
    /// The loaded project configuration
    pub config: Config,

    /// Project root directory
    pub root: PathBuf,

    /// Database connection
    pub db: Arc<dyn Database>,

    /// Migrations discovered under the configured paths
    pub registry: Registry,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&args.project_dir);

        let config = if let Some(config_path) = &args.config {
            Config::load(Path::new(config_path)).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(&root).context("Failed to load project configuration")?
        };

        let migrations = loader::load_paths(&root, &config.migration_paths)?;
        let mut registry = Registry::new();
        registry.register(migrations);

        // Relative database paths resolve against the project root
        let db_path = if config.database.path == ":memory:"
            || Path::new(&config.database.path).is_absolute()
        {
            config.database.path.clone()
        } else {
            root.join(&config.database.path).to_string_lossy().into_owned()
        };
        let db: Arc<dyn Database> =
            Arc::new(DuckDbBackend::new(&db_path).context("Failed to connect to database")?);

        Ok(Self {
            config,
            root,
            db,
            registry,
            verbose: args.verbose,
        })
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }
}
