//! Resource keys and the seam through which the host supplies them.
//!
//! A [`ResourceKey`] identifies one parametrized, scoped setup: the fixture
//! (argument name plus the components that tell two same-named fixtures at the
//! same level apart) and the index of the parameter in use. Two items that
//! agree on a key can share that setup, so the engine tries to run them back
//! to back.
//!
//! How keys are derived is up to the host. The engine only asks a
//! [`ResourceKeys`] implementation for the keys of an item at a given level.

use std::{borrow::Cow, fmt::Display};

use crate::scope::ScopeLevel;

/// The components that disambiguate a fixture at its scope level.
///
/// Empty for session scope, the package directory for package scope, the
/// module path for module scope and the module path plus class name for class
/// scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(Vec<Cow<'static, str>>);

impl ScopeId {
    pub const fn session() -> Self {
        Self(Vec::new())
    }

    pub fn with(mut self, component: impl Into<Cow<'static, str>>) -> Self {
        self.0.push(component.into());
        self
    }

    pub fn components(&self) -> &[Cow<'static, str>] {
        &self.0
    }
}

impl<C: Into<Cow<'static, str>>> FromIterator<C> for ScopeId {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A fixture as priorities are registered against it: a resource key without
/// its parameter index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixtureId {
    pub argname: Cow<'static, str>,
    pub scope_id: ScopeId,
}

impl FixtureId {
    pub fn new(argname: impl Into<Cow<'static, str>>, scope_id: ScopeId) -> Self {
        Self {
            argname: argname.into(),
            scope_id,
        }
    }

    pub fn param(self, param_index: usize) -> ResourceKey {
        ResourceKey {
            fixture: self,
            param_index,
        }
    }
}

/// One parametrized resource at one scope level.
///
/// Ordering is structural with the argument name first, which is the order the
/// engine sorts an item's keys in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceKey {
    pub fixture: FixtureId,
    pub param_index: usize,
}

impl ResourceKey {
    pub fn new(
        argname: impl Into<Cow<'static, str>>,
        param_index: usize,
        scope_id: ScopeId,
    ) -> Self {
        FixtureId::new(argname, scope_id).param(param_index)
    }

    pub fn argname(&self) -> &str {
        &self.fixture.argname
    }
}

impl Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.fixture.argname, self.param_index)?;
        for component in self.fixture.scope_id.components() {
            write!(f, "@{component}")?;
        }
        Ok(())
    }
}

/// Supplies the resource keys of an item at a scope level.
///
/// The engine calls this once per item and level, for every level the
/// [`OrderConfig`](crate::config::OrderConfig) covers. Returned keys do not
/// need to be sorted or unique; the engine does both. An item with nothing to
/// report at a level simply returns no keys.
///
/// Implemented for `Fn(&T, ScopeLevel) -> impl IntoIterator<Item = ResourceKey>`,
/// so a closure can act as a key provider.
pub trait ResourceKeys<T> {
    fn resource_keys(&self, item: &T, level: ScopeLevel) -> impl IntoIterator<Item = ResourceKey>;
}

impl<T, F, I> ResourceKeys<T> for F
where
    F: Fn(&T, ScopeLevel) -> I,
    I: IntoIterator<Item = ResourceKey>,
{
    fn resource_keys(&self, item: &T, level: ScopeLevel) -> impl IntoIterator<Item = ResourceKey> {
        self(item, level)
    }
}
