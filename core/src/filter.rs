//! Read-only projection of the store for display.

use crate::types::{FilterMode, Todo};

/// Todos admitted by `mode`, in their original relative order.
pub fn project(todos: &[Todo], mode: FilterMode) -> Vec<Todo> {
    todos.iter().filter(|t| mode.admits(t)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn todo(id: i64, completed: bool) -> Todo {
        Todo {
            id,
            title: format!("todo {id}"),
            completed,
        }
    }

    fn arb_todos() -> impl Strategy<Value = Vec<Todo>> {
        prop::collection::vec(any::<bool>(), 0..24).prop_map(|flags| {
            flags
                .into_iter()
                .enumerate()
                .map(|(i, completed)| todo(i as i64 + 1, completed))
                .collect()
        })
    }

    fn arb_mode() -> impl Strategy<Value = FilterMode> {
        prop_oneof![
            Just(FilterMode::All),
            Just(FilterMode::Completed),
            Just(FilterMode::Pending),
        ]
    }

    #[test]
    fn all_is_identity() {
        let todos = vec![todo(1, true), todo(2, false)];
        assert_eq!(project(&todos, FilterMode::All), todos);
    }

    #[test]
    fn completed_and_pending_split_the_list() {
        let todos = vec![todo(1, true), todo(2, false), todo(3, true)];
        let done: Vec<_> = project(&todos, FilterMode::Completed).iter().map(|t| t.id).collect();
        let open: Vec<_> = project(&todos, FilterMode::Pending).iter().map(|t| t.id).collect();
        assert_eq!(done, vec![1, 3]);
        assert_eq!(open, vec![2]);
    }

    proptest! {
        #[test]
        fn projecting_all_first_changes_nothing(todos in arb_todos(), mode in arb_mode()) {
            prop_assert_eq!(project(&project(&todos, FilterMode::All), mode), project(&todos, mode));
        }

        #[test]
        fn projection_is_idempotent(todos in arb_todos(), mode in arb_mode()) {
            let once = project(&todos, mode);
            prop_assert_eq!(project(&once, mode), once);
        }

        #[test]
        fn projection_preserves_relative_order(todos in arb_todos(), mode in arb_mode()) {
            let ids: Vec<i64> = project(&todos, mode).iter().map(|t| t.id).collect();
            let mut sorted = ids.clone();
            sorted.sort_unstable();
            prop_assert_eq!(ids, sorted);
        }
    }
}
