use indoc::indoc;
use param_priority::{
    OrderConfig, OrderingEngine, PriorityRegistry,
    item::{CallSpecKeys, FixtureDef, TestItem},
    scope::ScopeLevel,
};
use pretty_assertions::assert_eq;

use crate::lib::{Params, listing, parametrize};

const MODULE: &str = "test_example.py";

/// Collection order of `test_one` and `test_two`, both depending on module
/// scoped `color`, `letter` and `number` fixtures through intermediate fixtures.
fn collected() -> Vec<TestItem> {
    parametrize(
        &["test_one", "test_two"],
        MODULE,
        &[
            Params {
                argname: "color",
                scope: ScopeLevel::MODULE,
                ids: &["red", "green", "blue"],
            },
            Params {
                argname: "letter",
                scope: ScopeLevel::MODULE,
                ids: &["a", "b", "c"],
            },
            Params {
                argname: "number",
                scope: ScopeLevel::MODULE,
                ids: &["1", "2", "3"],
            },
        ],
    )
}

fn registry() -> PriorityRegistry {
    let mut registry = PriorityRegistry::new();
    for (argname, priority) in [("number", 0), ("color", 1), ("letter", 2)] {
        FixtureDef::new(argname, ScopeLevel::MODULE, MODULE)
            .register_priority(&mut registry, priority)
            .unwrap();
    }
    registry
}

/// The host orders by scope first; the prioritized pass runs on its result.
fn host_default(items: &mut Vec<TestItem>, registry: &PriorityRegistry) {
    OrderingEngine::new(CallSpecKeys)
        .with_registry(registry)
        .with_config(OrderConfig::scope_only())
        .reorder_in_place(items);
}

fn prioritized(items: &mut Vec<TestItem>, registry: &PriorityRegistry, config: OrderConfig) {
    OrderingEngine::new(CallSpecKeys)
        .with_registry(registry)
        .with_config(config)
        .reorder_in_place(items);
}

const PRIORITIZED: &str = indoc! {"
    <Module test_example.py>
      <Function test_one[red-a-1]>
      <Function test_two[red-a-1]>
      <Function test_one[red-c-1]>
      <Function test_two[red-c-1]>
      <Function test_one[red-b-1]>
      <Function test_two[red-b-1]>
      <Function test_one[green-b-1]>
      <Function test_two[green-b-1]>
      <Function test_one[green-c-1]>
      <Function test_two[green-c-1]>
      <Function test_one[green-a-1]>
      <Function test_two[green-a-1]>
      <Function test_one[blue-c-1]>
      <Function test_two[blue-c-1]>
      <Function test_one[blue-b-1]>
      <Function test_two[blue-b-1]>
      <Function test_one[blue-a-1]>
      <Function test_two[blue-a-1]>
      <Function test_one[red-a-2]>
      <Function test_two[red-a-2]>
      <Function test_one[red-b-2]>
      <Function test_two[red-b-2]>
      <Function test_one[red-c-2]>
      <Function test_two[red-c-2]>
      <Function test_one[green-b-2]>
      <Function test_two[green-b-2]>
      <Function test_one[green-c-2]>
      <Function test_two[green-c-2]>
      <Function test_one[green-a-2]>
      <Function test_two[green-a-2]>
      <Function test_one[blue-c-2]>
      <Function test_two[blue-c-2]>
      <Function test_one[blue-b-2]>
      <Function test_two[blue-b-2]>
      <Function test_one[blue-a-2]>
      <Function test_two[blue-a-2]>
      <Function test_one[green-b-3]>
      <Function test_two[green-b-3]>
      <Function test_one[green-a-3]>
      <Function test_two[green-a-3]>
      <Function test_one[green-c-3]>
      <Function test_two[green-c-3]>
      <Function test_one[red-c-3]>
      <Function test_two[red-c-3]>
      <Function test_one[red-b-3]>
      <Function test_two[red-b-3]>
      <Function test_one[red-a-3]>
      <Function test_two[red-a-3]>
      <Function test_one[blue-c-3]>
      <Function test_two[blue-c-3]>
      <Function test_one[blue-b-3]>
      <Function test_two[blue-b-3]>
      <Function test_one[blue-a-3]>
      <Function test_two[blue-a-3]>
"};

#[test]
fn priorities_cluster_number_then_color_then_letter() {
    let registry = registry();
    let mut items = collected();
    host_default(&mut items, &registry);
    prioritized(&mut items, &registry, OrderConfig::default());

    assert_eq!(listing(&items), PRIORITIZED);
}

#[test]
fn extra_bands_do_not_change_the_order() {
    let registry = registry();
    for bands in [3, 4, 8] {
        let mut items = collected();
        host_default(&mut items, &registry);
        prioritized(&mut items, &registry, OrderConfig::default().with_bands(bands));

        assert_eq!(listing(&items), PRIORITIZED, "with {bands} bands");
    }
}

#[test]
fn scope_only_ordering_ignores_priorities() {
    let mut items = collected();
    host_default(&mut items, &registry());

    assert_eq!(
        listing(&items),
        indoc! {"
            <Module test_example.py>
              <Function test_one[red-a-1]>
              <Function test_two[red-a-1]>
              <Function test_one[red-a-2]>
              <Function test_two[red-a-2]>
              <Function test_one[red-b-2]>
              <Function test_two[red-b-2]>
              <Function test_one[green-b-2]>
              <Function test_two[green-b-2]>
              <Function test_one[green-b-1]>
              <Function test_two[green-b-1]>
              <Function test_one[green-b-3]>
              <Function test_two[green-b-3]>
              <Function test_one[green-a-3]>
              <Function test_two[green-a-3]>
              <Function test_one[green-c-3]>
              <Function test_two[green-c-3]>
              <Function test_one[red-c-3]>
              <Function test_two[red-c-3]>
              <Function test_one[blue-c-3]>
              <Function test_two[blue-c-3]>
              <Function test_one[blue-c-2]>
              <Function test_two[blue-c-2]>
              <Function test_one[blue-c-1]>
              <Function test_two[blue-c-1]>
              <Function test_one[blue-b-3]>
              <Function test_two[blue-b-3]>
              <Function test_one[blue-a-3]>
              <Function test_two[blue-a-3]>
              <Function test_one[blue-b-2]>
              <Function test_two[blue-b-2]>
              <Function test_one[blue-b-1]>
              <Function test_two[blue-b-1]>
              <Function test_one[blue-a-2]>
              <Function test_two[blue-a-2]>
              <Function test_one[blue-a-1]>
              <Function test_two[blue-a-1]>
              <Function test_one[green-c-2]>
              <Function test_two[green-c-2]>
              <Function test_one[green-c-1]>
              <Function test_two[green-c-1]>
              <Function test_one[red-c-2]>
              <Function test_two[red-c-2]>
              <Function test_one[red-c-1]>
              <Function test_two[red-c-1]>
              <Function test_one[red-b-3]>
              <Function test_two[red-b-3]>
              <Function test_one[red-a-3]>
              <Function test_two[red-a-3]>
              <Function test_one[green-a-2]>
              <Function test_two[green-a-2]>
              <Function test_one[green-a-1]>
              <Function test_two[green-a-1]>
              <Function test_one[red-b-1]>
              <Function test_two[red-b-1]>
        "}
    );
}

#[test]
fn prioritized_pass_on_collection_order() {
    let mut items = collected();
    prioritized(&mut items, &registry(), OrderConfig::default());

    assert_eq!(
        listing(&items),
        indoc! {"
            <Module test_example.py>
              <Function test_one[red-a-1]>
              <Function test_two[red-a-1]>
              <Function test_one[red-b-1]>
              <Function test_two[red-b-1]>
              <Function test_one[red-c-1]>
              <Function test_two[red-c-1]>
              <Function test_one[green-a-1]>
              <Function test_two[green-a-1]>
              <Function test_one[green-b-1]>
              <Function test_two[green-b-1]>
              <Function test_one[green-c-1]>
              <Function test_two[green-c-1]>
              <Function test_one[blue-a-1]>
              <Function test_two[blue-a-1]>
              <Function test_one[blue-b-1]>
              <Function test_two[blue-b-1]>
              <Function test_one[blue-c-1]>
              <Function test_two[blue-c-1]>
              <Function test_one[red-a-2]>
              <Function test_two[red-a-2]>
              <Function test_one[red-b-2]>
              <Function test_two[red-b-2]>
              <Function test_one[red-c-2]>
              <Function test_two[red-c-2]>
              <Function test_one[green-a-2]>
              <Function test_two[green-a-2]>
              <Function test_one[green-b-2]>
              <Function test_two[green-b-2]>
              <Function test_one[green-c-2]>
              <Function test_two[green-c-2]>
              <Function test_one[blue-a-2]>
              <Function test_two[blue-a-2]>
              <Function test_one[blue-b-2]>
              <Function test_two[blue-b-2]>
              <Function test_one[blue-c-2]>
              <Function test_two[blue-c-2]>
              <Function test_one[red-a-3]>
              <Function test_two[red-a-3]>
              <Function test_one[red-b-3]>
              <Function test_two[red-b-3]>
              <Function test_one[red-c-3]>
              <Function test_two[red-c-3]>
              <Function test_one[green-a-3]>
              <Function test_two[green-a-3]>
              <Function test_one[green-b-3]>
              <Function test_two[green-b-3]>
              <Function test_one[green-c-3]>
              <Function test_two[green-c-3]>
              <Function test_one[blue-a-3]>
              <Function test_two[blue-a-3]>
              <Function test_one[blue-b-3]>
              <Function test_two[blue-b-3]>
              <Function test_one[blue-c-3]>
              <Function test_two[blue-c-3]>
        "}
    );
}

#[test]
fn every_color_block_shares_one_number() {
    let registry = registry();
    let mut items = collected();
    host_default(&mut items, &registry);
    prioritized(&mut items, &registry, OrderConfig::default());

    // 9 runs of 6 items, each run on a single number and color
    for run in items.chunks(6) {
        let params: Vec<_> = run
            .iter()
            .map(|item| {
                let callspec = item.callspec.as_ref().unwrap();
                (
                    callspec.param("number").unwrap().index,
                    callspec.param("color").unwrap().index,
                )
            })
            .collect();
        assert!(params.windows(2).all(|w| w[0] == w[1]), "{params:?}");
    }
}
