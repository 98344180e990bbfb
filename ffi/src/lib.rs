//! C-ABI wrapper around the `tasklist-core` controller.
//!
//! # Overview
//! A native mobile shell creates one `FfiTodoApp`, hands it a transport
//! callback that performs HTTP, and then forwards user intents
//! (`todo_app_add`, `todo_app_toggle_complete`, ...) and reads back the state
//! it renders (`todo_app_visible_todos`, `todo_app_edit_draft`, ...).
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - The controller locks its state only to read inputs and apply results,
//!   never across the transport callback. Getters called while an action is
//!   in flight return immediately with the pre-response state. Concurrent
//!   actions on the same todo apply last-wins.
//! - Action functions return an `FfiStatus`; the detailed failure text is
//!   kept as the app's notice (`todo_app_notice`).
//! - The C caller owns every returned pointer and must release it with the
//!   matching `todo_free_*` / `todo_app_free` function.

pub mod types;

use std::ffi::c_void;
use std::os::raw::c_char;
use std::panic::catch_unwind;
use std::time::Instant;

use tasklist_core::{Config, Controller, HttpRemote, Theme};
use tracing::warn;

use types::*;

/// Run `f` against the controller behind `app`. `None` if `app` is null.
fn with_app<T>(app: *const FfiTodoApp, f: impl FnOnce(&AppController) -> T) -> Option<T> {
    if app.is_null() {
        return None;
    }
    let app = unsafe { &*app };
    Some(f(&app.inner))
}

/// Run an action that reports an `FfiStatus`.
fn action(app: *const FfiTodoApp, f: impl FnOnce(&AppController) -> FfiStatus) -> FfiStatus {
    with_app(app, f).unwrap_or(FfiStatus::NullArg)
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Create an app handle from a JSON config (see `tasklist_core::Config`)
/// and a host transport. `ctx` is passed back to `transport` untouched.
///
/// Starts the loading timer; call `todo_app_load` right after.
/// Returns null if any argument is null or the config is invalid.
/// The caller must free the returned pointer with `todo_app_free`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_new(
    config_json: *const c_char,
    transport: Option<FfiTransportFn>,
    ctx: *mut c_void,
) -> *mut FfiTodoApp {
    catch_unwind(|| {
        let (Some(raw), Some(callback)) = (read_c_str(config_json), transport) else {
            return std::ptr::null_mut();
        };
        let config = match Config::from_json(&raw) {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "rejecting app config");
                return std::ptr::null_mut();
            }
        };
        let remote = HttpRemote::new(&config.base_url, CallbackTransport { callback, ctx });
        let controller = Controller::new(remote, &config, Instant::now());
        Box::into_raw(Box::new(FfiTodoApp { inner: controller }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free an app created by `todo_app_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_free(app: *mut FfiTodoApp) {
    if !app.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(app) });
        });
    }
}

// ---------------------------------------------------------------------------
// Network actions
// ---------------------------------------------------------------------------

/// Fetch the full list. Also usable as pull-to-refresh.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_load(app: *const FfiTodoApp) -> FfiStatus {
    catch_unwind(|| action(app, |c| c.load().into())).unwrap_or(FfiStatus::Panic)
}

/// Create a todo from the current input text.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_add(app: *const FfiTodoApp) -> FfiStatus {
    catch_unwind(|| action(app, |c| c.add().into())).unwrap_or(FfiStatus::Panic)
}

#[unsafe(no_mangle)]
pub extern "C" fn todo_app_toggle_complete(app: *const FfiTodoApp, id: i64) -> FfiStatus {
    catch_unwind(|| action(app, |c| c.toggle_complete(id).into())).unwrap_or(FfiStatus::Panic)
}

#[unsafe(no_mangle)]
pub extern "C" fn todo_app_delete(app: *const FfiTodoApp, id: i64) -> FfiStatus {
    catch_unwind(|| action(app, |c| c.delete(id).into())).unwrap_or(FfiStatus::Panic)
}

/// Send the edit draft as the new title of the todo being edited.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_save_edit(app: *const FfiTodoApp) -> FfiStatus {
    catch_unwind(|| action(app, |c| c.save_edit().into())).unwrap_or(FfiStatus::Panic)
}

// ---------------------------------------------------------------------------
// Local state
// ---------------------------------------------------------------------------

/// Replace the "add a task" text. Null `text` is `NullArg`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_set_input(app: *const FfiTodoApp, text: *const c_char) -> FfiStatus {
    catch_unwind(|| {
        let Some(text) = read_c_str(text) else {
            return FfiStatus::NullArg;
        };
        action(app, |c| {
            c.set_input(&text);
            FfiStatus::Applied
        })
    })
    .unwrap_or(FfiStatus::Panic)
}

/// Open `id` for renaming; any other open edit is discarded.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_begin_edit(app: *const FfiTodoApp, id: i64) -> FfiStatus {
    catch_unwind(|| action(app, |c| c.begin_edit(id).into())).unwrap_or(FfiStatus::Panic)
}

#[unsafe(no_mangle)]
pub extern "C" fn todo_app_set_edit_draft(app: *const FfiTodoApp, text: *const c_char) -> FfiStatus {
    catch_unwind(|| {
        let Some(text) = read_c_str(text) else {
            return FfiStatus::NullArg;
        };
        action(app, |c| {
            c.set_edit_draft(&text);
            FfiStatus::Applied
        })
    })
    .unwrap_or(FfiStatus::Panic)
}

#[unsafe(no_mangle)]
pub extern "C" fn todo_app_cancel_edit(app: *const FfiTodoApp) -> FfiStatus {
    catch_unwind(|| {
        action(app, |c| {
            c.cancel_edit();
            FfiStatus::Applied
        })
    })
    .unwrap_or(FfiStatus::Panic)
}

#[unsafe(no_mangle)]
pub extern "C" fn todo_app_set_filter(app: *const FfiTodoApp, mode: FfiFilterMode) -> FfiStatus {
    catch_unwind(|| {
        action(app, |c| {
            c.set_filter(mode.into());
            FfiStatus::Applied
        })
    })
    .unwrap_or(FfiStatus::Panic)
}

/// Current filter. `All` for a null handle.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_filter(app: *const FfiTodoApp) -> FfiFilterMode {
    catch_unwind(|| with_app(app, |c| c.state().filter.into()).unwrap_or(FfiFilterMode::All))
        .unwrap_or(FfiFilterMode::All)
}

/// Flip light/dark. Returns true if the theme is now dark.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_toggle_theme(app: *const FfiTodoApp) -> bool {
    catch_unwind(|| with_app(app, |c| c.toggle_theme() == Theme::Dark).unwrap_or(false)).unwrap_or(false)
}

#[unsafe(no_mangle)]
pub extern "C" fn todo_app_is_dark(app: *const FfiTodoApp) -> bool {
    catch_unwind(|| with_app(app, |c| c.state().theme == Theme::Dark).unwrap_or(false)).unwrap_or(false)
}

/// Whether the startup loading screen should still show.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_is_loading(app: *const FfiTodoApp) -> bool {
    catch_unwind(|| with_app(app, |c| c.is_loading(Instant::now())).unwrap_or(false)).unwrap_or(false)
}

#[unsafe(no_mangle)]
pub extern "C" fn todo_app_dismiss_notice(app: *const FfiTodoApp) -> FfiStatus {
    catch_unwind(|| {
        action(app, |c| {
            c.dismiss_notice();
            FfiStatus::Applied
        })
    })
    .unwrap_or(FfiStatus::Panic)
}

// ---------------------------------------------------------------------------
// Snapshots (caller frees)
// ---------------------------------------------------------------------------

/// The todos to render under the current filter, in list order.
///
/// Returns null if `app` is null. Free with `todo_free_todo_list`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_visible_todos(app: *const FfiTodoApp) -> *mut FfiTodoList {
    catch_unwind(|| {
        with_app(app, |c| FfiTodoList::from_core(c.visible_todos())).unwrap_or(std::ptr::null_mut())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Writes the id under edit to `out_id` and returns true, or returns false
/// when nothing is being edited.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_editing_id(app: *const FfiTodoApp, out_id: *mut i64) -> bool {
    catch_unwind(|| {
        if out_id.is_null() {
            return false;
        }
        match with_app(app, |c| c.state().edit.active_id()).flatten() {
            Some(id) => {
                unsafe { *out_id = id };
                true
            }
            None => false,
        }
    })
    .unwrap_or(false)
}

/// Current edit draft (empty when not editing). Free with `todo_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_edit_draft(app: *const FfiTodoApp) -> *mut c_char {
    catch_unwind(|| {
        with_app(app, |c| to_c_string(c.state().edit.draft())).unwrap_or(std::ptr::null_mut())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Current "add a task" text. Free with `todo_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_input(app: *const FfiTodoApp) -> *mut c_char {
    catch_unwind(|| {
        with_app(app, |c| to_c_string(c.state().input.as_str())).unwrap_or(std::ptr::null_mut())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Message of the last failed action, or null if there is none.
/// Free with `todo_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_notice(app: *const FfiTodoApp) -> *mut c_char {
    catch_unwind(|| {
        with_app(app, |c| c.state().notice.as_ref().map(|n| to_c_string(n.message.as_str())))
            .flatten()
            .unwrap_or(std::ptr::null_mut())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a list returned by `todo_app_visible_todos`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_todo_list(list: *mut FfiTodoList) {
    if !list.is_null() {
        let _ = catch_unwind(|| FfiTodoList::free(list));
    }
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
