//! Property-based tests for the canonical task table.
//!
//! Uses proptest to verify, for arbitrary operation sequences:
//! 1. The table stays sorted by ascending priority.
//! 2. Task ids stay unique.
//! 3. A response decoded from the table's JSON passes the duplicate-id check
//!    and preserves order.
//! 4. Random bytes never cause a panic when parsed as a response.

#![allow(clippy::expect_used)]

use proptest::prelude::*;
use tasklist_proto::api::TaskListResponse;
use tasklist_proto::table::TaskTable;

/// One store operation, with indices resolved modulo the current length.
#[derive(Debug, Clone)]
enum Op {
    Create { name: String, priority: i64 },
    Rename { index: usize, name: String },
    Toggle { index: usize, status: bool },
    Remove { index: usize },
}

/// Strategy for names that may or may not pass validation.
fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{1,19}",
        "[a-z]{20,30}",
        Just("   ".to_string()),
    ]
}

/// Strategy for a single operation.
fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (arb_name(), -5i64..20).prop_map(|(name, priority)| Op::Create { name, priority }),
        (any::<usize>(), arb_name()).prop_map(|(index, name)| Op::Rename { index, name }),
        (any::<usize>(), any::<bool>()).prop_map(|(index, status)| Op::Toggle { index, status }),
        any::<usize>().prop_map(|index| Op::Remove { index }),
    ]
}

/// Applies `op`, ignoring validation failures the way a store answers 4xx.
fn apply(table: &mut TaskTable, op: &Op) {
    let len = table.tasks().len();
    let pick = |index: usize| table.tasks()[index % len].id.clone();
    match op {
        Op::Create { name, priority } => {
            let _ = table.create(name, *priority);
        }
        Op::Rename { index, name } if len > 0 => {
            let id = pick(*index);
            let _ = table.rename(&id, name);
        }
        Op::Toggle { index, status } if len > 0 => {
            let id = pick(*index);
            let _ = table.toggle_status(&id, *status);
        }
        Op::Remove { index } if len > 0 => {
            let id = pick(*index);
            let _ = table.remove(&id);
        }
        _ => {}
    }
}

proptest! {
    /// Any operation sequence leaves the table sorted by priority.
    #[test]
    fn table_stays_sorted_by_priority(ops in prop::collection::vec(arb_op(), 0..64)) {
        let mut table = TaskTable::new();
        for op in &ops {
            apply(&mut table, op);
        }
        let priorities: Vec<i64> = table.tasks().iter().map(|t| t.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        prop_assert_eq!(priorities, sorted);
    }

    /// The response survives JSON and keeps ids unique and ordered.
    #[test]
    fn response_json_is_canonical(ops in prop::collection::vec(arb_op(), 0..64)) {
        let mut table = TaskTable::new();
        for op in &ops {
            apply(&mut table, op);
        }
        let json = serde_json::to_string(&table.to_response()).expect("serialize");
        let decoded: TaskListResponse = serde_json::from_str(&json).expect("deserialize");
        let tasks = decoded.into_tasks().expect("ids must be unique");
        prop_assert_eq!(tasks.as_slice(), table.tasks());
    }

    /// Every stored name is trimmed and within the length limit.
    #[test]
    fn stored_names_are_valid(ops in prop::collection::vec(arb_op(), 0..64)) {
        let mut table = TaskTable::new();
        for op in &ops {
            apply(&mut table, op);
        }
        for task in table.tasks() {
            prop_assert!(!task.name.is_empty());
            prop_assert_eq!(task.name.trim(), task.name.as_str());
            prop_assert!(task.name.chars().count() <= 19);
        }
    }

    /// Random bytes never cause a panic when parsed as a response.
    #[test]
    fn random_bytes_parse_no_panic(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = serde_json::from_slice::<TaskListResponse>(&bytes);
    }
}
