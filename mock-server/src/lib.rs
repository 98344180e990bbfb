use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

/// Full replace: both fields are required.
#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: String,
    pub completed: bool,
}

/// Todos keyed by id. Ids are handed out in increasing order, so iteration
/// order is creation order.
#[derive(Debug)]
pub struct Todos {
    items: BTreeMap<i64, Todo>,
    next_id: i64,
}

impl Default for Todos {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: 1,
        }
    }
}

pub type Db = Arc<RwLock<Todos>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Todos::default()));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock todo server listening");
    }
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let todos = db.read().await;
    Json(todos.items.values().cloned().collect())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), StatusCode> {
    if input.title.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let mut todos = db.write().await;
    let todo = Todo {
        id: todos.next_id,
        title: input.title,
        completed: false,
    };
    todos.next_id += 1;
    todos.items.insert(todo.id, todo.clone());
    debug!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    if input.title.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let mut todos = db.write().await;
    let todo = todos.items.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    todo.title = input.title;
    todo.completed = input.completed;
    debug!(id, "updated todo");
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut todos = db.write().await;
    todos
        .items
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
