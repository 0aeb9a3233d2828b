//! The ordering engine.
//!
//! The engine turns a flat list of items into an order that keeps items
//! sharing an expensive, high priority resource next to each other. It runs
//! one partitioning pass per [`VirtualScope`](crate::scope::VirtualScope),
//! coarsest scope and highest priority first, and recurses into every group it
//! carves out with the next pass.

use std::collections::{HashSet, VecDeque};

use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::{
    config::OrderConfig,
    index::{ItemId, KeyIndex},
    key::ResourceKeys,
    registry::PriorityRegistry,
};

/// Reorders items by their resource keys and the registered priorities.
///
/// Built in the usual builder style:
///
/// ```
/// use param_priority::{OrderingEngine, OrderConfig, PriorityRegistry, ResourceKey, ScopeId, ScopeLevel};
///
/// let items = [("a", 1), ("b", 0), ("c", 1)];
/// let registry = PriorityRegistry::new();
/// let engine = OrderingEngine::new(|item: &(&str, usize), level: ScopeLevel| {
///     (level == ScopeLevel::SESSION)
///         .then(|| ResourceKey::new("param", item.1, ScopeId::session()))
/// })
/// .with_registry(&registry)
/// .with_config(OrderConfig::scope_only());
///
/// let names: Vec<_> = engine.reorder(&items).into_iter().map(|item| item.0).collect();
/// assert_eq!(names, ["a", "c", "b"]);
/// ```
#[derive(Debug, Clone)]
pub struct OrderingEngine<'r, Keys> {
    keys: Keys,
    registry: Option<&'r PriorityRegistry>,
    config: OrderConfig,
}

impl<Keys> OrderingEngine<'static, Keys> {
    /// An engine using the process-wide registry and the default config.
    ///
    /// The process-wide registry is looked up on every ordering run, so an
    /// engine built before [`PriorityRegistry::install`] still sees it.
    pub fn new(keys: Keys) -> Self {
        Self {
            keys,
            registry: None,
            config: OrderConfig::default(),
        }
    }
}

impl<'r, Keys> OrderingEngine<'r, Keys> {
    pub fn with_registry<'w>(self, registry: &'w PriorityRegistry) -> OrderingEngine<'w, Keys> {
        OrderingEngine {
            keys: self.keys,
            registry: Some(registry),
            config: self.config,
        }
    }

    pub fn with_config(self, config: OrderConfig) -> Self {
        Self { config, ..self }
    }

    pub fn with_keys<WithKeys>(self, keys: WithKeys) -> OrderingEngine<'r, WithKeys> {
        OrderingEngine {
            keys,
            registry: self.registry,
            config: self.config,
        }
    }

    pub fn config(&self) -> &OrderConfig {
        &self.config
    }

    /// The new order as positions into `items`.
    pub fn permutation<T>(&self, items: &[T]) -> Vec<usize>
    where
        Keys: ResourceKeys<T>,
    {
        let registry = self.registry.unwrap_or(PriorityRegistry::global());
        let mut index = KeyIndex::build(items, &self.keys, registry, &self.config);
        debug!(
            items = items.len(),
            passes = index.pass_count(),
            keys = index.key_count(),
            "reordering items"
        );
        partition(&mut index, (0..items.len()).collect(), 0)
    }

    pub fn reorder<'t, T>(&self, items: &'t [T]) -> Vec<&'t T>
    where
        Keys: ResourceKeys<T>,
    {
        self.permutation(items)
            .into_iter()
            .map(|pos| &items[pos])
            .collect()
    }

    pub fn reorder_in_place<T>(&self, items: &mut Vec<T>)
    where
        Keys: ResourceKeys<T>,
    {
        let order = self.permutation(items);
        let mut slots: Vec<Option<T>> = items.drain(..).map(Some).collect();
        items.extend(order.into_iter().filter_map(|pos| slots[pos].take()));
    }
}

/// Order `items` for the pass at `pass` and every pass after it.
fn partition(index: &mut KeyIndex, items: Vec<ItemId>, pass: usize) -> Vec<ItemId> {
    if pass >= index.pass_count() || items.len() < 3 {
        return items;
    }

    let members: HashSet<ItemId> = items.iter().copied().collect();
    let mut ignore = HashSet::new();
    let mut queue = VecDeque::from(items);
    let mut done = IndexSet::with_capacity(members.len());

    while !queue.is_empty() {
        let mut no_key_group = IndexSet::new();
        let mut slicing_key = None;

        while let Some(item) = queue.pop_front() {
            if done.contains(&item) || no_key_group.contains(&item) {
                continue;
            }

            let Some(key) = index.pass(pass).last_open_key(item, &ignore) else {
                no_key_group.insert(item);
                continue;
            };

            let matching: Vec<ItemId> = index
                .pass(pass)
                .items_with(key)
                .filter(|i| members.contains(i))
                .collect();
            trace!(
                scope = %index.pass(pass).scope,
                key = ?index.key(key),
                matched = matching.len(),
                "slicing"
            );
            for &matched in matching.iter().rev() {
                index.promote(matched);
                queue.push_front(matched);
            }
            slicing_key = Some(key);
            break;
        }

        if !no_key_group.is_empty() {
            let group = partition(index, no_key_group.into_iter().collect(), pass + 1);
            done.extend(group);
        }

        if let Some(key) = slicing_key {
            ignore.insert(key);
        }
    }

    done.into_iter().collect()
}
