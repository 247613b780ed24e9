//! Owned collection of migration definitions.

use crate::migration::{Direction, Migration};

/// The set of migrations known to this process, in registration order.
///
/// Owned and passed explicitly so independent runners and concurrent test
/// runs do not interfere; nothing here is process-global. Mutate only
/// during a startup registration phase, never while a run is in progress.
#[derive(Debug, Default)]
pub struct Registry {
    migrations: Vec<Migration>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append definitions in registration order.
    ///
    /// No validation is performed: duplicate names and empty scripts are
    /// accepted as-is.
    pub fn register<I>(&mut self, migrations: I)
    where
        I: IntoIterator<Item = Migration>,
    {
        self.migrations.extend(migrations);
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Migration> {
        self.migrations.iter()
    }

    /// First registered definition with the given name.
    pub fn find(&self, name: &str) -> Option<&Migration> {
        self.migrations.iter().find(|m| m.name == name)
    }

    /// Definitions sorted by name: ascending for `Up`, descending for
    /// `Down`, so dependent objects are created before their dependents
    /// and torn down after them.
    ///
    /// Ordering never consults the ledger; already-applied filtering
    /// happens per item during a run.
    pub fn ordered(&self, direction: Direction) -> Vec<&Migration> {
        let mut ordered: Vec<&Migration> = self.migrations.iter().collect();
        match direction {
            Direction::Up => ordered.sort_by(|a, b| a.name.cmp(&b.name)),
            Direction::Down => ordered.sort_by(|a, b| b.name.cmp(&a.name)),
        }
        ordered
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
