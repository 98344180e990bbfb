//! The four network operations the controller depends on.
//!
//! `RemoteTodoClient` is the seam tests stub out. `HttpRemote` is the real
//! implementation: it pairs the stateless `TodoClient` codec with a
//! `Transport` that performs the round trip.

use tracing::debug;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};

/// Remote todo collection. Each method is exactly one request/response round
/// trip with no retries.
pub trait RemoteTodoClient {
    fn list_all(&self) -> Result<Vec<Todo>, ApiError>;

    fn create(&self, title: &str) -> Result<Todo, ApiError>;

    /// Full replace of the mutable fields. The returned entity is canonical.
    fn update(&self, id: TodoId, title: &str, completed: bool) -> Result<Todo, ApiError>;

    fn remove(&self, id: TodoId) -> Result<(), ApiError>;
}

impl<R: RemoteTodoClient + ?Sized> RemoteTodoClient for &R {
    fn list_all(&self) -> Result<Vec<Todo>, ApiError> {
        (**self).list_all()
    }

    fn create(&self, title: &str) -> Result<Todo, ApiError> {
        (**self).create(title)
    }

    fn update(&self, id: TodoId, title: &str, completed: bool) -> Result<Todo, ApiError> {
        (**self).update(id, title, completed)
    }

    fn remove(&self, id: TodoId) -> Result<(), ApiError> {
        (**self).remove(id)
    }
}

/// `RemoteTodoClient` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRemote<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> HttpRemote<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: TodoClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

impl<T: Transport> RemoteTodoClient for HttpRemote<T> {
    fn list_all(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.round_trip(self.client.build_list_todos())?;
        self.client.parse_list_todos(response)
    }

    fn create(&self, title: &str) -> Result<Todo, ApiError> {
        let input = CreateTodo {
            title: title.to_string(),
        };
        let response = self.round_trip(self.client.build_create_todo(&input)?)?;
        self.client.parse_create_todo(response)
    }

    fn update(&self, id: TodoId, title: &str, completed: bool) -> Result<Todo, ApiError> {
        let input = UpdateTodo {
            title: title.to_string(),
            completed,
        };
        let response = self.round_trip(self.client.build_update_todo(id, &input)?)?;
        self.client.parse_update_todo(response)
    }

    fn remove(&self, id: TodoId) -> Result<(), ApiError> {
        let response = self.round_trip(self.client.build_delete_todo(id))?;
        self.client.parse_delete_todo(response)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::http::HttpMethod;

    /// Replays canned responses and records every request it sees.
    struct Scripted {
        responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Scripted {
        fn new(responses: Vec<Result<HttpResponse, ApiError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Scripted {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .expect("no scripted response left")
        }
    }

    #[test]
    fn update_sends_put_and_adopts_server_value() {
        let transport = Scripted::new(vec![Ok(HttpResponse::new(
            200,
            r#"{"id":1,"title":"server title","completed":true}"#,
        ))]);
        let remote = HttpRemote::new("http://api", &transport);

        let todo = remote.update(1, "client title", true).unwrap();
        assert_eq!(todo.title, "server title");

        let seen = transport.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, HttpMethod::Put);
        assert_eq!(seen[0].path, "http://api/todos/1");
    }

    #[test]
    fn transport_failure_is_propagated() {
        let transport = Scripted::new(vec![Err(ApiError::Transport("connection reset".into()))]);
        let remote = HttpRemote::new("http://api", &transport);
        assert_eq!(
            remote.list_all().unwrap_err(),
            ApiError::Transport("connection reset".into())
        );
    }

    #[test]
    fn remove_maps_404_to_not_found() {
        let transport = Scripted::new(vec![Ok(HttpResponse::new(404, ""))]);
        let remote = HttpRemote::new("http://api", &transport);
        assert_eq!(remote.remove(9).unwrap_err(), ApiError::NotFound);
    }

    #[test]
    fn each_call_is_a_single_round_trip() {
        let transport = Scripted::new(vec![Ok(HttpResponse::new(503, "busy"))]);
        let remote = HttpRemote::new("http://api", &transport);
        assert!(remote.create("x").is_err());
        assert_eq!(transport.seen.borrow().len(), 1);
    }
}
