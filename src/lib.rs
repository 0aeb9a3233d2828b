//! Priority-aware ordering of parametrized test items.
//!
//! Tests that share an expensive scoped resource (a database per session, a
//! server per module, ...) are cheapest to run back to back, so that the
//! resource is set up and torn down as few times as possible. This crate
//! computes such an order. It groups items by the resource keys they share,
//! coarsest scope first, and lets callers rank resources at the same scope with
//! explicit priorities instead of relying on declaration order.
//!
//! The entry point is [`OrderingEngine`]. It is generic over the item type and
//! learns about resources through a [`ResourceKeys`] implementation. Hosts that
//! model their tests with [`item::TestItem`] can use [`item::CallSpecKeys`] and
//! [`item::reorder_items`] directly.

pub mod config;
pub mod formatter;
pub mod item;
pub mod registry;
pub mod scope;

mod engine;
pub use engine::*;

mod index;

mod key;
pub use key::*;

pub use config::OrderConfig;
pub use registry::{PriorityRegistry, RegistryError};
pub use scope::{ScopeLevel, VirtualScope};

pub mod prelude {
    pub use crate::{
        OrderConfig, OrderingEngine, PriorityRegistry, ResourceKey, ResourceKeys, ScopeId,
        ScopeLevel,
        formatter::{ListFormatter, list, tree::TreeFormatter},
        item::{CallSpec, CallSpecKeys, FixtureDef, TestItem, reorder_items},
    };
}
