//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! `FilterMode` and `Theme` are pure UI state. They live here next to the
//! entity because the FFI layer maps all of them across the boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a todo.
pub type TodoId = i64;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
}

/// Request payload for creating a new todo. The server assigns `id` and
/// defaults `completed` to false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

/// Request payload for updating an existing todo. Both mutable fields are
/// always sent; the server replaces them wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub title: String,
    pub completed: bool,
}

/// Which subset of the list is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Completed,
    Pending,
}

impl FilterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Completed => "completed",
            FilterMode::Pending => "pending",
        }
    }

    /// Whether `todo` belongs in this view.
    pub fn admits(self, todo: &Todo) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Completed => todo.completed,
            FilterMode::Pending => !todo.completed,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "completed" => Ok(FilterMode::Completed),
            "pending" => Ok(FilterMode::Pending),
            other => Err(format!("unknown filter mode: {other}")),
        }
    }
}

/// Light or dark presentation. Has no effect on sync behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_uses_integer_ids_on_the_wire() {
        let todo: Todo =
            serde_json::from_str(r#"{"id":7,"title":"buy milk","completed":false}"#).unwrap();
        assert_eq!(todo.id, 7);
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn create_payload_carries_only_title() {
        let json = serde_json::to_value(CreateTodo {
            title: "write spec".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"title": "write spec"}));
    }

    #[test]
    fn filter_mode_parses_case_insensitively() {
        assert_eq!("Completed".parse::<FilterMode>().unwrap(), FilterMode::Completed);
        assert_eq!(" pending ".parse::<FilterMode>().unwrap(), FilterMode::Pending);
        assert!("done".parse::<FilterMode>().is_err());
    }

    #[test]
    fn filter_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_value(FilterMode::All).unwrap(), "all");
        assert_eq!(FilterMode::Pending.to_string(), "pending");
    }

    #[test]
    fn theme_toggles_back_and_forth() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
