//! Scope levels and the virtual scopes the ordering passes run over.
//!
//! A [`ScopeLevel`] says how long a parametrized resource lives: for the whole
//! session, per package, per module or per class. Levels are ordered from the
//! coarsest to the finest. The innermost level, [`ScopeLevel::FUNCTION`], does
//! not group anything and never produces resource keys.
//!
//! Combining a level with a priority band gives a [`VirtualScope`]. The engine
//! runs one partitioning pass per explicit virtual scope, in the order produced by
//! [`OrderConfig::virtual_scopes`](crate::config::OrderConfig::virtual_scopes).

use std::{fmt::Display, str::FromStr};

use thiserror::Error;

/// A scope level, ordered from coarsest (`0`) to finest.
///
/// The named constants follow the usual test framework levels, but any index
/// is valid as long as the [`OrderConfig`](crate::config::OrderConfig) covers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeLevel(usize);

impl ScopeLevel {
    pub const SESSION: Self = Self(0);
    pub const PACKAGE: Self = Self(1);
    pub const MODULE: Self = Self(2);
    pub const CLASS: Self = Self(3);

    /// The ungrouped level. Asking for resource keys here is a contract violation.
    pub const FUNCTION: Self = Self(4);

    const NAMES: [&'static str; 5] = ["session", "package", "module", "class", "function"];

    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }

    /// The conventional name of this level, if it has one.
    pub fn name(self) -> Option<&'static str> {
        Self::NAMES.get(self.0).copied()
    }
}

impl Display for ScopeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "scope#{}", self.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scope {0:?}, expected one of session, package, module, class, function")]
pub struct ParseScopeError(pub String);

impl FromStr for ScopeLevel {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::NAMES
            .iter()
            .position(|name| *name == s)
            .map(Self)
            .ok_or_else(|| ParseScopeError(s.to_owned()))
    }
}

/// A `(scope level, priority band)` pair.
///
/// Band `0` is the highest priority. Every band but the lowest gets its own
/// partitioning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualScope {
    pub level: ScopeLevel,
    pub band: u32,
}

impl Display for VirtualScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.level, self.band)
    }
}
