//! Migration discovery from paired .up.sql / .down.sql files.

use anyhow::{bail, Context, Result};
use drover_core::Migration;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const UP_SUFFIX: &str = ".up.sql";
const DOWN_SUFFIX: &str = ".down.sql";

/// Load migration definitions from one directory.
///
/// Each migration is a pair of files sharing one stem, e.g.
/// `001_create_table_user.up.sql` and `001_create_table_user.down.sql`.
/// The stem becomes the migration name. A stem with only one half of the
/// pair is an error; files matching neither suffix are ignored.
pub fn load_dir(dir: &Path) -> Result<Vec<Migration>> {
    #[derive(Default)]
    struct Pair {
        up: Option<String>,
        down: Option<String>,
    }

    let mut pairs: BTreeMap<String, Pair> = BTreeMap::new();

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read migrations directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let (stem, is_up) = if let Some(stem) = file_name.strip_suffix(UP_SUFFIX) {
            (stem, true)
        } else if let Some(stem) = file_name.strip_suffix(DOWN_SUFFIX) {
            (stem, false)
        } else {
            log::debug!("ignoring non-migration file {}", path.display());
            continue;
        };

        let sql = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let pair = pairs.entry(stem.to_string()).or_default();
        if is_up {
            pair.up = Some(sql);
        } else {
            pair.down = Some(sql);
        }
    }

    let mut migrations = Vec::with_capacity(pairs.len());
    for (name, pair) in pairs {
        match (pair.up, pair.down) {
            (Some(up), Some(down)) => migrations.push(Migration::new(name, up, down)),
            (up, _) => {
                let missing = if up.is_none() { UP_SUFFIX } else { DOWN_SUFFIX };
                bail!("migration '{name}' is missing its {missing} file");
            }
        }
    }
    Ok(migrations)
}

/// Load migrations from every configured path, relative to the project
/// root. Paths that do not exist are skipped with a warning.
pub fn load_paths(root: &Path, paths: &[String]) -> Result<Vec<Migration>> {
    let mut migrations = Vec::new();
    for path in paths {
        let dir = root.join(path);
        if !dir.exists() {
            log::warn!("migration path {} does not exist", dir.display());
            continue;
        }
        migrations.extend(load_dir(&dir)?);
    }
    Ok(migrations)
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
