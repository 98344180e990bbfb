//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.
//!
//! Requests are allocated here and freed here: the host only borrows an
//! `FfiHttpRequest` for the duration of its transport callback.

use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;

use tasklist_core::{
    ActionError, ApiError, Controller, FilterMode, HttpMethod, HttpRemote, HttpRequest, HttpResponse, Outcome,
    Todo, Transport,
};

pub(crate) type AppController = Controller<HttpRemote<CallbackTransport>>;

/// Opaque handle to the sync controller. C callers receive a pointer to this
/// and pass it back into every `todo_app_*` function, from any thread.
pub struct FfiTodoApp {
    pub(crate) inner: AppController,
}

/// Host-provided HTTP round trip.
///
/// Executes `request` and fills `response`. Returns false when no response
/// was obtained (offline, DNS, reset). Called on the thread that issued the
/// action; actions issued from several threads call it concurrently. `response.body` must stay valid until
/// the callback returns control to the `todo_app_*` call that triggered it;
/// the library copies it before returning.
pub type FfiTransportFn =
    extern "C" fn(ctx: *mut c_void, request: *const FfiHttpRequest, response: *mut FfiHttpResponse) -> bool;

/// `Transport` that forwards each request to the host callback.
pub(crate) struct CallbackTransport {
    pub(crate) callback: FfiTransportFn,
    pub(crate) ctx: *mut c_void,
}

impl Transport for CallbackTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let ffi_req = FfiHttpRequest::from_core(request);
        let mut out = FfiHttpResponse {
            status: 0,
            body: std::ptr::null(),
        };
        let delivered = (self.callback)(self.ctx, ffi_req, &mut out);
        let result = if delivered {
            Ok(out.to_core())
        } else {
            Err(ApiError::Transport("host transport reported failure".to_string()))
        };
        FfiHttpRequest::free(ffi_req);
        result
    }
}

/// Copy a Rust string into a heap C string. Interior NULs are dropped.
pub(crate) fn to_c_string(s: impl Into<String>) -> *mut c_char {
    let s: String = s.into();
    let bytes: Vec<u8> = s.into_bytes().into_iter().filter(|b| *b != 0).collect();
    CString::new(bytes).unwrap_or_default().into_raw()
}

/// Read a borrowed C string. Returns `None` for null; invalid UTF-8 is
/// replaced rather than rejected.
pub(crate) fn read_c_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data. `path` is the
/// absolute URL. `body` is null when there is none.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let body = match req.body {
            Some(b) => to_c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: to_c_string(req.path),
            headers,
            headers_len,
            body,
        }))
    }

    /// Release a request built by `from_core`. Null is ignored.
    pub(crate) fn free(req: *mut Self) {
        if req.is_null() {
            return;
        }
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.path);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    }
}

pub(crate) fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Response input (host-written, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response written by the host's transport callback. The library
/// reads but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

impl FfiHttpResponse {
    fn to_core(&self) -> HttpResponse {
        HttpResponse::new(self.status, read_c_str(self.body).unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Action results and UI state
// ---------------------------------------------------------------------------

/// Result of a `todo_app_*` action.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiStatus {
    Applied = 0,
    Skipped = 1,
    Validation = 2,
    NotFound = 3,
    Http = 4,
    Transport = 5,
    Deserialization = 6,
    Serialization = 7,
    NullArg = 8,
    Panic = 9,
}

impl From<Result<Outcome, ActionError>> for FfiStatus {
    fn from(result: Result<Outcome, ActionError>) -> Self {
        match result {
            Ok(Outcome::Applied) => FfiStatus::Applied,
            Ok(Outcome::Skipped) => FfiStatus::Skipped,
            Err(ActionError::Validation(_)) => FfiStatus::Validation,
            Err(ActionError::Api(err)) => match err {
                ApiError::NotFound => FfiStatus::NotFound,
                ApiError::Http { .. } => FfiStatus::Http,
                ApiError::Transport(_) => FfiStatus::Transport,
                ApiError::Deserialization(_) => FfiStatus::Deserialization,
                ApiError::Serialization(_) => FfiStatus::Serialization,
            },
        }
    }
}

impl From<Outcome> for FfiStatus {
    fn from(outcome: Outcome) -> Self {
        FfiStatus::from(Ok(outcome))
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiFilterMode {
    All = 0,
    Completed = 1,
    Pending = 2,
}

impl From<FfiFilterMode> for FilterMode {
    fn from(mode: FfiFilterMode) -> Self {
        match mode {
            FfiFilterMode::All => FilterMode::All,
            FfiFilterMode::Completed => FilterMode::Completed,
            FfiFilterMode::Pending => FilterMode::Pending,
        }
    }
}

impl From<FilterMode> for FfiFilterMode {
    fn from(mode: FilterMode) -> Self {
        match mode {
            FilterMode::All => FfiFilterMode::All,
            FilterMode::Completed => FfiFilterMode::Completed,
            FilterMode::Pending => FfiFilterMode::Pending,
        }
    }
}

/// A single todo item exposed to C.
#[repr(C)]
pub struct FfiTodo {
    pub id: i64,
    pub title: *mut c_char,
    pub completed: bool,
}

/// A list of todo items exposed to C. Free with `todo_free_todo_list`.
#[repr(C)]
pub struct FfiTodoList {
    pub items: *mut FfiTodo,
    pub len: u32,
}

impl FfiTodoList {
    pub(crate) fn from_core(todos: Vec<Todo>) -> *mut Self {
        let len = todos.len() as u32;
        let items = if todos.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_todos: Box<[FfiTodo]> = todos
                .into_iter()
                .map(|t| FfiTodo {
                    id: t.id,
                    title: to_c_string(t.title),
                    completed: t.completed,
                })
                .collect();
            Box::into_raw(ffi_todos) as *mut FfiTodo
        };
        Box::into_raw(Box::new(FfiTodoList { items, len }))
    }

    pub(crate) fn free(list: *mut Self) {
        if list.is_null() {
            return;
        }
        let list = unsafe { Box::from_raw(list) };
        if !list.items.is_null() && list.len > 0 {
            let items = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(list.items, list.len as usize))
            };
            for item in items.iter() {
                free_c_string(item.title);
            }
        }
    }
}
