//! Ordered in-memory mirror of the remote collection.
//!
//! Every mutator takes a value the server has already confirmed. Order is the
//! order the server listed, with creations appended at the end.

use crate::types::{Todo, TodoId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoStore {
    todos: Vec<Todo>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a full listing. Later duplicates of an id are dropped.
    pub fn replace_all(&mut self, todos: Vec<Todo>) {
        self.todos.clear();
        for todo in todos {
            if !self.contains(todo.id) {
                self.todos.push(todo);
            }
        }
    }

    /// Add a freshly created todo at the end. An id that is already present is
    /// replaced in place instead, keeping ids unique.
    pub fn append(&mut self, todo: Todo) {
        if !self.replace(todo.clone()) {
            self.todos.push(todo);
        }
    }

    /// Swap in the server's value for `todo.id`. Returns false if absent.
    pub fn replace(&mut self, todo: Todo) -> bool {
        match self.todos.iter_mut().find(|t| t.id == todo.id) {
            Some(slot) => {
                *slot = todo;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: TodoId) -> Option<Todo> {
        let index = self.todos.iter().position(|t| t.id == id)?;
        Some(self.todos.remove(index))
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    pub fn as_slice(&self) -> &[Todo] {
        &self.todos
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.todos.iter()
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }
}

impl<'a> IntoIterator for &'a TodoStore {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: TodoId, title: &str, completed: bool) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            completed,
        }
    }

    fn ids(store: &TodoStore) -> Vec<TodoId> {
        store.iter().map(|t| t.id).collect()
    }

    #[test]
    fn replace_all_keeps_server_order_and_first_duplicate() {
        let mut store = TodoStore::new();
        store.replace_all(vec![todo(3, "c", false), todo(1, "a", false), todo(3, "dup", true)]);
        assert_eq!(ids(&store), vec![3, 1]);
        assert_eq!(store.get(3).unwrap().title, "c");
    }

    #[test]
    fn append_goes_to_the_end() {
        let mut store = TodoStore::new();
        store.replace_all(vec![todo(1, "a", false)]);
        store.append(todo(42, "write spec", false));
        assert_eq!(ids(&store), vec![1, 42]);
    }

    #[test]
    fn append_with_known_id_replaces_in_place() {
        let mut store = TodoStore::new();
        store.replace_all(vec![todo(1, "a", false), todo(2, "b", false)]);
        store.append(todo(1, "again", true));
        assert_eq!(ids(&store), vec![1, 2]);
        assert_eq!(store.get(1).unwrap().title, "again");
    }

    #[test]
    fn replace_keeps_position() {
        let mut store = TodoStore::new();
        store.replace_all(vec![todo(1, "a", false), todo(2, "b", false), todo(3, "c", false)]);
        assert!(store.replace(todo(2, "b", true)));
        assert_eq!(ids(&store), vec![1, 2, 3]);
        assert!(store.get(2).unwrap().completed);
        assert!(!store.replace(todo(9, "missing", false)));
    }

    #[test]
    fn remove_returns_the_entry() {
        let mut store = TodoStore::new();
        store.replace_all(vec![todo(1, "a", false), todo(2, "b", false)]);
        assert_eq!(store.remove(1).unwrap().title, "a");
        assert_eq!(store.remove(1), None);
        assert_eq!(ids(&store), vec![2]);
    }
}
