//! Turns user intents into remote calls and applies confirmed results.
//!
//! # Design
//! All UI state lives in one [`AppState`] value owned by the [`Controller`].
//! Each operation makes at most one remote call, and the local state changes
//! only after the server has answered successfully. On failure the store and
//! edit session are left exactly as they were, the error is logged, and a
//! dismissible [`Notice`] is recorded. Nothing is retried.
//!
//! The state sits behind a `Mutex` that is never held across a remote call:
//! an action reads what it needs under the lock, releases it for the round
//! trip, then locks again to apply the response. Readers and other actions
//! proceed while a request is in flight.
//!
//! Actions are not queued or sequenced. When two actions touch the same todo
//! concurrently, whichever response is applied last wins; there is no
//! conflict detection.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tracing::{info, warn};

use crate::config::Config;
use crate::edit::EditSession;
use crate::error::{ActionError, ApiError, ValidationError};
use crate::filter::project;
use crate::loading::LoadingGate;
use crate::remote::RemoteTodoClient;
use crate::store::TodoStore;
use crate::types::{FilterMode, Theme, Todo, TodoId};

/// What a successful call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server confirmed and local state now reflects it.
    Applied,
    /// Nothing to do (unknown id, no active edit), or the server confirmed
    /// a change to a todo that a concurrent action had already removed.
    Skipped,
}

/// Actions that involve the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Load,
    Add,
    ToggleComplete,
    Delete,
    SaveEdit,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Load => "load",
            ActionKind::Add => "add",
            ActionKind::ToggleComplete => "toggle_complete",
            ActionKind::Delete => "delete",
            ActionKind::SaveEdit => "save_edit",
        }
    }
}

/// Where the most recent network action stands. No action yet means idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPhase {
    Pending,
    Applied,
    Failed,
}

/// Last failed action, for a transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub action: ActionKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub todos: TodoStore,
    /// Text of the "add a task" field.
    pub input: String,
    pub edit: EditSession,
    pub filter: FilterMode,
    pub theme: Theme,
    pub loading: LoadingGate,
    pub notice: Option<Notice>,
    pub last_action: Option<(ActionKind, ActionPhase)>,
}

impl AppState {
    pub fn new(loading: LoadingGate) -> Self {
        Self {
            todos: TodoStore::new(),
            input: String::new(),
            edit: EditSession::new(),
            filter: FilterMode::default(),
            theme: Theme::default(),
            loading,
            notice: None,
            last_action: None,
        }
    }

    /// Adopt the server's copy of an updated todo. A reply for a different
    /// id is a protocol error; a reply for a todo that is no longer held
    /// locally (deleted while the update was in flight) is dropped.
    fn adopt_update(&mut self, requested: TodoId, updated: Todo) -> Result<Outcome, ApiError> {
        if updated.id != requested {
            return Err(ApiError::Deserialization(format!(
                "update of todo {requested} answered with todo {}",
                updated.id
            )));
        }
        if self.todos.replace(updated) {
            Ok(Outcome::Applied)
        } else {
            warn!(id = requested, "update confirmed for a todo no longer in the store");
            Ok(Outcome::Skipped)
        }
    }
}

pub struct Controller<R> {
    remote: R,
    state: Mutex<AppState>,
}

impl<R: RemoteTodoClient> Controller<R> {
    /// Starts the loading gate at `now`. Call [`Controller::load`] right after;
    /// the gate does not wait for it.
    pub fn new(remote: R, config: &Config, now: Instant) -> Self {
        let gate = LoadingGate::new(now, config.splash_min(), config.loading_policy);
        Self {
            remote,
            state: Mutex::new(AppState::new(gate)),
        }
    }

    /// Current state. Responses that arrive while the guard is held wait
    /// for it to drop before they are applied.
    pub fn state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Initial full fetch. On failure the previous contents are kept.
    pub fn load(&self) -> Result<Outcome, ActionError> {
        self.call(
            ActionKind::Load,
            |remote| remote.list_all(),
            |state, todos| {
                info!(count = todos.len(), "loaded todos");
                state.todos.replace_all(todos);
                Ok(Outcome::Applied)
            },
        )
    }

    /// Re-fetch the whole list.
    pub fn refresh(&self) -> Result<Outcome, ActionError> {
        self.load()
    }

    pub fn set_input(&self, text: &str) {
        self.state().input = text.to_string();
    }

    /// Create a todo from the input field. The field is cleared once the
    /// server has confirmed, unless it was edited while the request was out.
    pub fn add(&self) -> Result<Outcome, ActionError> {
        let title = self.state().input.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::BlankTitle.into());
        }
        self.call(
            ActionKind::Add,
            |remote| remote.create(&title),
            |state, created| {
                state.todos.append(created);
                if state.input.trim() == title {
                    state.input.clear();
                }
                Ok(Outcome::Applied)
            },
        )
    }

    pub fn toggle_complete(&self, id: TodoId) -> Result<Outcome, ActionError> {
        let Some(todo) = self.state().todos.get(id).cloned() else {
            return Ok(Outcome::Skipped);
        };
        self.call(
            ActionKind::ToggleComplete,
            |remote| remote.update(id, &todo.title, !todo.completed),
            |state, updated| state.adopt_update(id, updated),
        )
    }

    pub fn delete(&self, id: TodoId) -> Result<Outcome, ActionError> {
        self.call(
            ActionKind::Delete,
            |remote| remote.remove(id),
            |state, ()| {
                state.todos.remove(id);
                if state.edit.is_editing(id) {
                    state.edit.clear();
                }
                Ok(Outcome::Applied)
            },
        )
    }

    /// Open `id` for renaming, discarding any other unsaved draft.
    pub fn begin_edit(&self, id: TodoId) -> Outcome {
        let mut state = self.state();
        let Some(title) = state.todos.get(id).map(|t| t.title.clone()) else {
            return Outcome::Skipped;
        };
        state.edit.begin(id, &title);
        Outcome::Applied
    }

    pub fn set_edit_draft(&self, text: &str) {
        self.state().edit.set_draft(text);
    }

    /// Send the draft, as typed, as the new title. On failure the session
    /// stays open with the draft intact.
    pub fn save_edit(&self) -> Result<Outcome, ActionError> {
        let (id, title, completed) = {
            let mut state = self.state();
            let Some(id) = state.edit.active_id() else {
                return Ok(Outcome::Skipped);
            };
            if state.edit.draft().trim().is_empty() {
                return Err(ValidationError::BlankTitle.into());
            }
            let Some(completed) = state.todos.get(id).map(|t| t.completed) else {
                state.edit.clear();
                return Ok(Outcome::Skipped);
            };
            (id, state.edit.draft().to_string(), completed)
        };
        self.call(
            ActionKind::SaveEdit,
            |remote| remote.update(id, &title, completed),
            |state, updated| {
                let outcome = state.adopt_update(id, updated)?;
                if state.edit.is_editing(id) {
                    state.edit.clear();
                }
                Ok(outcome)
            },
        )
    }

    pub fn cancel_edit(&self) {
        self.state().edit.clear();
    }

    pub fn set_filter(&self, mode: FilterMode) {
        self.state().filter = mode;
    }

    pub fn toggle_theme(&self) -> Theme {
        let mut state = self.state();
        state.theme = state.theme.toggled();
        state.theme
    }

    pub fn dismiss_notice(&self) {
        self.state().notice = None;
    }

    /// The store filtered by the current mode.
    pub fn visible_todos(&self) -> Vec<Todo> {
        let state = self.state();
        project(state.todos.as_slice(), state.filter)
    }

    pub fn is_loading(&self, now: Instant) -> bool {
        self.state().loading.is_loading(now)
    }

    /// Run one remote call without holding the state lock, then apply its
    /// result under the lock. Failures, including a response `apply`
    /// rejects, are logged and recorded as the current notice; state is
    /// otherwise untouched. A load settles the loading gate either way.
    fn call<T>(
        &self,
        kind: ActionKind,
        op: impl FnOnce(&R) -> Result<T, ApiError>,
        apply: impl FnOnce(&mut AppState, T) -> Result<Outcome, ApiError>,
    ) -> Result<Outcome, ActionError> {
        self.state().last_action = Some((kind, ActionPhase::Pending));
        let response = op(&self.remote);

        let mut state = self.state();
        if kind == ActionKind::Load {
            state.loading.mark_fetch_settled();
        }
        match response.and_then(|value| apply(&mut *state, value)) {
            Ok(outcome) => {
                state.last_action = Some((kind, ActionPhase::Applied));
                state.notice = None;
                Ok(outcome)
            }
            Err(err) => {
                warn!(action = kind.as_str(), error = %err, "remote call failed");
                state.last_action = Some((kind, ActionPhase::Failed));
                state.notice = Some(Notice {
                    action: kind,
                    message: err.to_string(),
                });
                Err(err.into())
            }
        }
    }
}
