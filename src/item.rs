//! A host-side model of parametrized test items.
//!
//! The engine itself is generic over the item type. This module provides a
//! ready made item type for hosts that report their tests the way common
//! fixture based frameworks do: a test function in a module file, optionally
//! inside a class, with a call spec that records which parameter index every
//! parametrized fixture was instantiated with and at which scope.
//!
//! [`CallSpecKeys`] turns such items into resource keys, and [`FixtureDef`]
//! computes the matching identity for registering a priority.

use std::{
    borrow::Cow,
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::{
    engine::OrderingEngine,
    key::{FixtureId, ResourceKey, ResourceKeys, ScopeId},
    registry::{PriorityRegistry, RegistryError},
    scope::ScopeLevel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub index: usize,
    pub scope: ScopeLevel,
}

/// The parametrization of a single test item.
///
/// Parameters are kept sorted by argument name so that keys come out in the
/// same order on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallSpec {
    params: BTreeMap<Cow<'static, str>, Param>,
}

impl CallSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(
        mut self,
        argname: impl Into<Cow<'static, str>>,
        index: usize,
        scope: ScopeLevel,
    ) -> Self {
        self.params.insert(argname.into(), Param { index, scope });
        self
    }

    pub fn params(&self) -> impl ExactSizeIterator<Item = (&str, Param)> {
        self.params.iter().map(|(argname, param)| (argname.as_ref(), *param))
    }

    pub fn param(&self, argname: &str) -> Option<Param> {
        self.params.get(argname).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestItem {
    pub name: Cow<'static, str>,
    pub path: PathBuf,
    pub class: Option<Cow<'static, str>>,
    pub callspec: Option<CallSpec>,
}

impl TestItem {
    pub fn new(name: impl Into<Cow<'static, str>>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            class: None,
            callspec: None,
        }
    }

    pub fn with_class(self, class: impl Into<Cow<'static, str>>) -> Self {
        Self {
            class: Some(class.into()),
            ..self
        }
    }

    pub fn with_callspec(self, callspec: CallSpec) -> Self {
        Self {
            callspec: Some(callspec),
            ..self
        }
    }
}

/// The scope components for something living at `path` (and `class`) when
/// grouped at `level`.
///
/// # Panics
///
/// Panics for [`ScopeLevel::FUNCTION`] and finer, which do not group.
pub fn scope_id(level: ScopeLevel, path: &Path, class: Option<&str>) -> ScopeId {
    assert!(
        level < ScopeLevel::FUNCTION,
        "no resource keys exist at the {level} level"
    );

    let lossy = |path: &Path| Cow::Owned(path.to_string_lossy().into_owned());
    match level {
        ScopeLevel::SESSION => ScopeId::session(),
        ScopeLevel::PACKAGE => {
            ScopeId::session().with(lossy(path.parent().unwrap_or(Path::new(""))))
        }
        ScopeLevel::MODULE => ScopeId::session().with(lossy(path)),
        _ => ScopeId::session()
            .with(lossy(path))
            .with(class.map(str::to_owned).unwrap_or_default()),
    }
}

/// Derives resource keys from an item's [`CallSpec`].
///
/// Only parameters whose fixture scope equals the requested level produce a
/// key. Items without a call spec produce none.
#[derive(Debug, Default, Clone, Copy)]
pub struct CallSpecKeys;

impl ResourceKeys<TestItem> for CallSpecKeys {
    fn resource_keys(
        &self,
        item: &TestItem,
        level: ScopeLevel,
    ) -> impl IntoIterator<Item = ResourceKey> {
        assert!(
            level < ScopeLevel::FUNCTION,
            "resource keys requested for the ungrouped {level} level"
        );

        item.callspec
            .iter()
            .flat_map(|callspec| callspec.params())
            .filter(move |(_, param)| param.scope == level)
            .map(move |(argname, param)| {
                ResourceKey::new(
                    argname.to_owned(),
                    param.index,
                    scope_id(level, &item.path, item.class.as_deref()),
                )
            })
            .collect::<Vec<_>>()
    }
}

/// A parametrized fixture as declared by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureDef {
    pub argname: Cow<'static, str>,
    pub scope: ScopeLevel,
    pub path: PathBuf,
    pub class: Option<Cow<'static, str>>,
}

impl FixtureDef {
    pub fn new(
        argname: impl Into<Cow<'static, str>>,
        scope: ScopeLevel,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            argname: argname.into(),
            scope,
            path: path.into(),
            class: None,
        }
    }

    pub fn with_class(self, class: impl Into<Cow<'static, str>>) -> Self {
        Self {
            class: Some(class.into()),
            ..self
        }
    }

    pub fn fixture_id(&self) -> Result<FixtureId, RegistryError> {
        if self.scope >= ScopeLevel::FUNCTION {
            return Err(RegistryError::Ungrouped {
                argname: self.argname.to_string(),
            });
        }
        Ok(FixtureId::new(
            self.argname.clone(),
            scope_id(self.scope, &self.path, self.class.as_deref()),
        ))
    }

    /// Register `priority` for this fixture at its own scope level.
    pub fn register_priority(
        &self,
        registry: &mut PriorityRegistry,
        priority: u32,
    ) -> Result<(), RegistryError> {
        registry.register(self.scope, self.fixture_id()?, priority);
        Ok(())
    }
}

/// Reorder collected items in place using the process-wide registry.
pub fn reorder_items(items: &mut Vec<TestItem>) {
    OrderingEngine::new(CallSpecKeys).reorder_in_place(items);
}
