//! New command implementation - creates a migration file pair

use anyhow::{bail, Context, Result};
use chrono::Utc;
use std::fs;
use std::path::Path;

use crate::cli::{GlobalArgs, NewArgs};
use crate::config::Config;

/// Execute the new command
pub(crate) fn execute(args: &NewArgs, global: &GlobalArgs) -> Result<()> {
    if args.name.is_empty()
        || !args
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        bail!(
            "Invalid migration name '{}': use ASCII letters, digits, and underscores",
            args.name
        );
    }

    let root = Path::new(&global.project_dir);
    let config = if let Some(config_path) = &global.config {
        Config::load(Path::new(config_path))?
    } else {
        Config::load_from_dir(root)?
    };

    // New migrations land in the first configured path
    let dir = root.join(
        config
            .migration_paths
            .first()
            .map(String::as_str)
            .unwrap_or("migrations"),
    );
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let prefix = if args.timestamp {
        Utc::now().format("%Y%m%d%H%M%S").to_string()
    } else {
        format!("{:03}", next_sequence(&dir)?)
    };
    let stem = format!("{prefix}_{}", args.name);

    let up_path = dir.join(format!("{stem}.up.sql"));
    let down_path = dir.join(format!("{stem}.down.sql"));
    if up_path.exists() || down_path.exists() {
        bail!("Migration '{stem}' already exists in {}", dir.display());
    }

    fs::write(&up_path, "-- forward script\n")
        .with_context(|| format!("Failed to write {}", up_path.display()))?;
    fs::write(&down_path, "-- reverse script\n")
        .with_context(|| format!("Failed to write {}", down_path.display()))?;

    println!("Created {}", up_path.display());
    println!("Created {}", down_path.display());

    Ok(())
}

/// Next sequence number: one past the highest numeric file prefix.
fn next_sequence(dir: &Path) -> Result<u64> {
    let mut max = 0u64;
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let file_name = entry?.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let digits: String = name.chars().take_while(|c| c.is_ascii_digit()).collect();
        if let Ok(n) = digits.parse::<u64>() {
            max = max.max(n);
        }
    }
    Ok(max + 1)
}

#[cfg(test)]
#[path = "new_test.rs"]
mod tests;
