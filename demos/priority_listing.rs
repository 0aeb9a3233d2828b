//! Lists a parametrized module before and after registering fixture priorities.
//!
//! Run with `cargo run --example priority_listing`.

use param_priority::{
    OrderConfig, OrderingEngine, PriorityRegistry, RegistryError,
    formatter::{list, tree::TreeFormatter},
    item::{CallSpec, CallSpecKeys, FixtureDef, TestItem},
    scope::ScopeLevel,
};

const MODULE: &str = "test_example.py";
const FIXTURES: [(&str, &[&str]); 3] = [
    ("color", &["red", "green", "blue"]),
    ("letter", &["a", "b", "c"]),
    ("number", &["1", "2", "3"]),
];

fn collect() -> Vec<TestItem> {
    let mut items = Vec::new();
    for test in ["test_one", "test_two"] {
        for (color, color_id) in FIXTURES[0].1.iter().enumerate() {
            for (letter, letter_id) in FIXTURES[1].1.iter().enumerate() {
                for (number, number_id) in FIXTURES[2].1.iter().enumerate() {
                    let callspec = CallSpec::new()
                        .with_param("color", color, ScopeLevel::MODULE)
                        .with_param("letter", letter, ScopeLevel::MODULE)
                        .with_param("number", number, ScopeLevel::MODULE);
                    items.push(
                        TestItem::new(format!("{test}[{color_id}-{letter_id}-{number_id}]"), MODULE)
                            .with_callspec(callspec),
                    );
                }
            }
        }
    }
    items
}

fn print(title: &str, items: &[TestItem]) {
    println!("{title}:");
    let errors = list(items, &mut TreeFormatter::default());
    for (event, error) in errors {
        eprintln!("could not write {event}: {error}");
    }
    println!();
}

fn main() -> Result<(), RegistryError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut items = collect();
    OrderingEngine::new(CallSpecKeys)
        .with_config(OrderConfig::scope_only())
        .reorder_in_place(&mut items);
    print("scope order", &items);

    let mut registry = PriorityRegistry::new();
    for (argname, priority) in [("number", 0), ("color", 1), ("letter", 2)] {
        FixtureDef::new(argname, ScopeLevel::MODULE, MODULE)
            .register_priority(&mut registry, priority)?;
    }
    OrderingEngine::new(CallSpecKeys)
        .with_registry(&registry)
        .reorder_in_place(&mut items);
    print("prioritized", &items);

    Ok(())
}
