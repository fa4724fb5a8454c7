//! End-to-end use of the agent and queue layers together.

use std::collections::BTreeMap;

use componentry::{Error, FrameworkConfig, Rank, Record, Shared, Sorter, Value};
use proptest::prelude::*;

fn drain<T>(queue: &componentry::Queue<T>) -> Vec<T> {
    let mut values = Vec::new();
    while let Some(value) = queue.remove_first() {
        values.push(value);
    }
    values
}

#[test]
fn configured_pipeline_sorts_records() {
    let config =
        FrameworkConfig::from_json(r#"{"collator": {"maximum_depth": 4}, "queue": {"capacity": 2}}"#)
            .unwrap();
    let collator = config.collator().unwrap();
    let group = componentry::group();
    let input = config.queue::<Value>().unwrap();

    let branches = componentry::split(&group, &input, 3).unwrap();
    let merged = componentry::join(&group, &branches).unwrap();
    assert_eq!(merged.capacity(), 2);

    {
        let input = input.clone();
        group
            .spawn("producer", move || {
                for (name, age) in [("carol", 41i64), ("alice", 30), ("bob", 30), ("dave", 7)] {
                    let person = Record::new("Person").field("age", age).field("name", name);
                    input.add_value(Value::from(person)).unwrap();
                }
                input.close().unwrap();
            })
            .unwrap();
    }

    let mut people = drain(&merged);
    group.wait().unwrap();

    Sorter::with_fallible_ranker(collator.ranker::<Value>())
        .sort_values(&mut people)
        .unwrap();
    let names: Vec<&str> = people
        .iter()
        .map(|person| match person {
            Value::Record(record) => match record.get("name") {
                Some(Value::String(name)) => name.as_str(),
                other => panic!("expected a name, got {:?}", other),
            },
            other => panic!("expected a record, got {:?}", other),
        })
        .collect();
    assert_eq!(names, ["dave", "alice", "bob", "carol"]);
}

#[test]
fn cyclic_values_fail_through_the_facade() {
    let node = Shared::new(Value::Null);
    node.set(Value::Map(vec![(Value::from("next"), Value::Shared(node.clone()))]));

    let collator = componentry::collator_with_maximum_depth(8).unwrap();
    let result: componentry::Result<Rank> = collator
        .rank_values(&Value::Shared(node.clone()), &Value::Shared(node))
        .map_err(Error::from);
    match result {
        Err(Error::Agent(componentry::agent::Error::MaximumDepthExceeded { maximum_depth })) => {
            assert_eq!(maximum_depth, 8)
        }
        other => panic!("expected depth failure, got {:?}", other),
    }
}

#[test]
fn fork_feeds_independent_sorters() {
    let group = componentry::group();
    let input = componentry::queue_from_values(vec![3i64, 1, 2]);
    input.close().unwrap();
    let outputs = componentry::fork(&group, &input, 2).unwrap();
    group.wait().unwrap();

    let mut ascending = drain(&outputs[0]);
    componentry::sorter::<i64>().sort_values(&mut ascending).unwrap();
    assert_eq!(ascending, [1, 2, 3]);

    let mut descending = drain(&outputs[1]);
    componentry::sorter_with_ranker(|a: &i64, b: &i64| Rank::of(b, a))
        .sort_values(&mut descending)
        .unwrap();
    assert_eq!(descending, [3, 2, 1]);
}

#[test]
fn maps_collate_regardless_of_container() {
    let collator = componentry::collator();
    let ordered: BTreeMap<&str, i64> = [("one", 1), ("two", 2)].into_iter().collect();
    let listed = Value::Map(vec![
        (Value::from("two"), Value::from(2i64)),
        (Value::from("one"), Value::from(1i64)),
    ]);
    assert!(collator
        .compare_values(&Value::from(ordered), &listed)
        .unwrap());
}

#[test]
fn adding_after_close_surfaces_queue_error() {
    let queue = componentry::queue::<u8>();
    queue.close().unwrap();
    let result: componentry::Result<()> = queue.add_value(1).map_err(Error::from);
    assert!(matches!(
        result,
        Err(Error::Queue(componentry::queue::Error::ClosedQueue))
    ));
}

proptest! {
    #[test]
    fn prop_split_join_then_sort_matches_sorted_input(
        values in prop::collection::vec(any::<i32>(), 0..100),
        branches in 2usize..5,
    ) {
        let group = componentry::group();
        let input = componentry::queue_from_values(values.clone());
        input.close().unwrap();
        let outputs = componentry::split(&group, &input, branches).unwrap();
        let merged = componentry::join(&group, &outputs).unwrap();

        let mut received = drain(&merged);
        group.wait().unwrap();
        componentry::sorter::<i32>().sort_values(&mut received).unwrap();

        let mut expected = values;
        expected.sort();
        prop_assert_eq!(received, expected);
    }
}
