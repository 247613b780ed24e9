//! Tests for migration scaffolding.

use super::*;
use crate::cli::GlobalArgs;

fn global_for(dir: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: dir.to_string_lossy().into_owned(),
        config: None,
    }
}

fn new_args(name: &str) -> NewArgs {
    NewArgs {
        name: name.to_string(),
        timestamp: false,
    }
}

#[test]
fn creates_numbered_pairs_in_sequence() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("drover.yml"), "name: demo").unwrap();

    execute(&new_args("create_table_user"), &global_for(dir.path())).unwrap();
    execute(&new_args("create_table_post"), &global_for(dir.path())).unwrap();

    let migrations = dir.path().join("migrations");
    assert!(migrations.join("001_create_table_user.up.sql").exists());
    assert!(migrations.join("001_create_table_user.down.sql").exists());
    assert!(migrations.join("002_create_table_post.up.sql").exists());
    assert!(migrations.join("002_create_table_post.down.sql").exists());
}

#[test]
fn rejects_unsafe_names() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("drover.yml"), "name: demo").unwrap();

    assert!(execute(&new_args("../escape"), &global_for(dir.path())).is_err());
    assert!(execute(&new_args(""), &global_for(dir.path())).is_err());
}

#[test]
fn next_sequence_scans_numeric_prefixes() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("001_a.up.sql"), "").unwrap();
    std::fs::write(dir.path().join("001_a.down.sql"), "").unwrap();
    std::fs::write(dir.path().join("007_b.up.sql"), "").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "").unwrap();

    assert_eq!(next_sequence(dir.path()).unwrap(), 8);
}
