//! Registered fixture priorities.
//!
//! Priorities are collected in a registration phase, before any ordering
//! happens, and are only read afterwards. A [`PriorityRegistry`] can be passed
//! to the engine directly, or installed once as the process-wide registry with
//! [`PriorityRegistry::install`] so that host integrations can pick it up via
//! [`PriorityRegistry::global`].

use std::{collections::HashMap, sync::OnceLock};

use thiserror::Error;
use tracing::debug;

use crate::{key::FixtureId, scope::ScopeLevel};

static GLOBAL: OnceLock<PriorityRegistry> = OnceLock::new();
static EMPTY: PriorityRegistry = PriorityRegistry::new();

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("a global priority registry is already installed")]
    AlreadyInstalled,

    #[error("fixture {argname:?} is function scoped and cannot carry a priority")]
    Ungrouped { argname: String },
}

/// Mapping from scope level to fixture to priority.
///
/// Lower numbers mean higher priority. A fixture that was never registered has
/// no priority here; the engine puts it into the lowest band and leaves its
/// relative order alone.
#[derive(Debug, Clone, Default)]
pub struct PriorityRegistry {
    levels: Vec<HashMap<FixtureId, u32>>,
}

impl PriorityRegistry {
    pub const fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Register `priority` for `fixture` at `level`, returning the previous one.
    pub fn register(&mut self, level: ScopeLevel, fixture: FixtureId, priority: u32) -> Option<u32> {
        let index = level.index();
        if self.levels.len() <= index {
            self.levels.resize_with(index + 1, HashMap::new);
        }
        self.levels[index].insert(fixture, priority)
    }

    pub fn with(mut self, level: ScopeLevel, fixture: FixtureId, priority: u32) -> Self {
        self.register(level, fixture, priority);
        self
    }

    /// The registered priority of `fixture` at `level`, if any.
    pub fn resolve(&self, level: ScopeLevel, fixture: &FixtureId) -> Option<u32> {
        self.levels.get(level.index())?.get(fixture).copied()
    }

    /// The priority of `fixture` at `level`, defaulting to `lowest`.
    pub fn priority_of(&self, level: ScopeLevel, fixture: &FixtureId, lowest: u32) -> u32 {
        self.resolve(level, fixture)
            .map_or(lowest, |priority| priority.min(lowest))
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Install this registry as the process-wide one.
    ///
    /// This ends the registration phase: the installed registry can no longer
    /// be changed.
    pub fn install(self) -> Result<&'static PriorityRegistry, RegistryError> {
        let entries = self.len();
        GLOBAL
            .set(self)
            .map_err(|_| RegistryError::AlreadyInstalled)?;
        debug!(entries, "installed global priority registry");
        Ok(Self::global())
    }

    /// The process-wide registry, or an empty one if none was installed.
    pub fn global() -> &'static PriorityRegistry {
        GLOBAL.get().unwrap_or(&EMPTY)
    }
}
