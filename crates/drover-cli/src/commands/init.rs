//! Init command implementation - scaffolds a new Drover project

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cli::InitArgs;

/// Execute the init command
pub(crate) fn execute(args: &InitArgs) -> Result<()> {
    // Reject names that could cause path traversal or confusing directory names
    if args.name.contains('/')
        || args.name.contains('\\')
        || args.name.contains("..")
        || args.name.starts_with('.')
        || args.name.starts_with('-')
    {
        anyhow::bail!(
            "Invalid project name '{}': must not contain '/', '\\', '..', or start with '.' or '-'",
            args.name
        );
    }

    let project_dir = Path::new(&args.name);

    if project_dir.exists() {
        anyhow::bail!(
            "Directory '{}' already exists. Choose a different project name.",
            args.name
        );
    }

    println!("Creating new Drover project: {}\n", args.name);

    let migrations_dir = project_dir.join("migrations");
    fs::create_dir_all(&migrations_dir)
        .with_context(|| format!("Failed to create directory: {}", migrations_dir.display()))?;

    // Generate drover.yml
    // Escape YAML special characters in interpolated values
    let safe_name = args.name.replace('"', "\\\"");
    let safe_db_path = args.database_path.replace('"', "\\\"");
    let config_content = format!(
        r#"name: "{safe_name}"

migration_paths: ["migrations"]

database:
  type: duckdb
  path: "{safe_db_path}"
"#
    );
    let config_path = project_dir.join("drover.yml");
    fs::write(&config_path, config_content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("  Created {}", config_path.display());

    // Starter migration pair
    let up_path = migrations_dir.join("001_create_table_example.up.sql");
    let down_path = migrations_dir.join("001_create_table_example.down.sql");
    fs::write(
        &up_path,
        "CREATE TABLE example (\n    id BIGINT PRIMARY KEY,\n    label VARCHAR\n);\n",
    )
    .with_context(|| format!("Failed to write {}", up_path.display()))?;
    fs::write(&down_path, "DROP TABLE example;\n")
        .with_context(|| format!("Failed to write {}", down_path.display()))?;
    println!("  Created {}", up_path.display());
    println!("  Created {}", down_path.display());

    println!(
        "\nDone. Next steps:\n  cd {}\n  drover up\n  drover status",
        args.name
    );

    Ok(())
}
