use std::collections::{HashMap, HashSet, VecDeque};

use indexmap::IndexSet;

use crate::{
    config::OrderConfig,
    key::{ResourceKey, ResourceKeys},
    registry::PriorityRegistry,
    scope::{ScopeLevel, VirtualScope},
};

/// Position of an item in the slice handed to the engine.
pub(crate) type ItemId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct KeyId(usize);

/// Forward and inverse key maps for a single virtual scope.
#[derive(Debug)]
pub(crate) struct PassIndex {
    pub(crate) scope: VirtualScope,
    item_keys: Vec<IndexSet<KeyId>>,
    key_items: HashMap<KeyId, VecDeque<ItemId>>,
}

impl PassIndex {
    fn new(scope: VirtualScope, items: usize) -> Self {
        Self {
            scope,
            item_keys: (0..items).map(|_| IndexSet::new()).collect(),
            key_items: HashMap::new(),
        }
    }

    fn insert(&mut self, item: ItemId, key: KeyId) {
        if self.item_keys[item].insert(key) {
            self.key_items.entry(key).or_default().push_back(item);
        }
    }

    /// The last key of `item` that is not in `ignore`.
    pub(crate) fn last_open_key(&self, item: ItemId, ignore: &HashSet<KeyId>) -> Option<KeyId> {
        self.item_keys[item]
            .iter()
            .rev()
            .find(|key| !ignore.contains(key))
            .copied()
    }

    /// Items holding `key`, in their current order.
    pub(crate) fn items_with(&self, key: KeyId) -> impl Iterator<Item = ItemId> + '_ {
        self.key_items.get(&key).into_iter().flatten().copied()
    }

    fn move_to_front(&mut self, item: ItemId) {
        let Self {
            item_keys,
            key_items,
            ..
        } = self;
        for key in &item_keys[item] {
            let Some(items) = key_items.get_mut(key) else {
                continue;
            };
            if let Some(pos) = items.iter().position(|&i| i == item) {
                items.remove(pos);
            }
            items.push_front(item);
        }
    }
}

/// Resource keys of every item, split by virtual scope.
///
/// Keys are interned once across all passes. The per-pass inverse maps start
/// out in item order and are only ever rotated by [`KeyIndex::promote`].
#[derive(Debug)]
pub(crate) struct KeyIndex {
    keys: IndexSet<ResourceKey>,
    passes: Vec<PassIndex>,
}

impl KeyIndex {
    pub(crate) fn build<T, Keys>(
        items: &[T],
        provider: &Keys,
        registry: &PriorityRegistry,
        config: &OrderConfig,
    ) -> Self
    where
        Keys: ResourceKeys<T>,
    {
        let mut keys = IndexSet::new();
        let mut passes: Vec<_> = config
            .virtual_scopes()
            .map(|scope| PassIndex::new(scope, items.len()))
            .collect();

        for level in (0..config.levels()).map(ScopeLevel::new) {
            for (item_id, item) in items.iter().enumerate() {
                let mut item_keys: Vec<_> = provider.resource_keys(item, level).into_iter().collect();
                item_keys.sort();
                for key in item_keys {
                    let priority = registry.priority_of(level, &key.fixture, config.lowest_band());
                    let scope = VirtualScope {
                        level,
                        band: config.band_of(priority),
                    };
                    let Some(pass) = config.pass_of(scope) else {
                        continue;
                    };
                    let (key_id, _) = keys.insert_full(key);
                    passes[pass].insert(item_id, KeyId(key_id));
                }
            }
        }

        Self { keys, passes }
    }

    pub(crate) fn pass_count(&self) -> usize {
        self.passes.len()
    }

    pub(crate) fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn pass(&self, pass: usize) -> &PassIndex {
        &self.passes[pass]
    }

    pub(crate) fn key(&self, key: KeyId) -> Option<&ResourceKey> {
        self.keys.get_index(key.0)
    }

    /// Move `item` to the front of every inverse list it appears in, across
    /// all passes.
    ///
    /// Must complete before the next slicing key is read.
    pub(crate) fn promote(&mut self, item: ItemId) {
        for pass in &mut self.passes {
            pass.move_to_front(item);
        }
    }
}
