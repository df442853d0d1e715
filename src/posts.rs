//! The `/posts` resource.
//!
//! Five routes, mounted under a prefix by [`App::mount`](crate::App::mount):
//!
//! | Route | Store calls | Success |
//! |---|---|---|
//! | `GET /` | `find` | 200, array |
//! | `GET /{id}` | `find_by_id` | 200, post |
//! | `POST /` | `insert`, then `find_by_id(new id)` | 201, post |
//! | `PUT /{id}` | `update`, then `find_by_id` if a row changed | 201, post |
//! | `DELETE /{id}` | `find_by_id`, then `remove` if found | 200, removed post |
//!
//! Store calls within a request are strictly sequential and each result
//! gates the next call. Nothing is retried and nothing outlives the request.
//!
//! `PUT` answers 201, not 200.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::handler::with_state;
use crate::method::Method;
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::Router;
use crate::status::Status;
use crate::store::{Inserted, NewPost, PostStore, StoreError};

type Store = Arc<dyn PostStore>;

/// Every way a posts request can fail, each with its own status.
#[derive(Debug, Error)]
pub enum PostsError {
    /// `title` or `contents` key absent from the body.
    #[error("Please provide title and contents for the post")]
    MissingFields,

    #[error("The post with the specified ID does not exist")]
    NotFound,

    /// The post existed when checked but the remove matched nothing.
    #[error("uh, it was there a second ago")]
    Vanished,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PostsError {
    pub fn status(&self) -> Status {
        match self {
            Self::MissingFields | Self::Vanished => Status::BadRequest,
            Self::NotFound => Status::NotFound,
            Self::Store(_) => Status::InternalServerError,
        }
    }
}

impl IntoResponse for PostsError {
    fn into_response(self) -> Response {
        Response::message(self.status(), &self.to_string())
    }
}

/// Builds the posts router over `store`.
pub fn router(store: Store) -> Router {
    Router::new()
        .on(Method::Get,    "/",     with_state(Arc::clone(&store), list))
        .on(Method::Get,    "/{id}", with_state(Arc::clone(&store), get_one))
        .on(Method::Post,   "/",     with_state(Arc::clone(&store), create))
        .on(Method::Put,    "/{id}", with_state(Arc::clone(&store), replace))
        .on(Method::Delete, "/{id}", with_state(store, delete))
}

/// Projects a request body onto the writable fields.
///
/// Only key presence is checked: `{"title": "", "contents": ""}` passes, and
/// so does `{"title": null, "contents": 5}`. Values are handed to the store
/// untouched; whether it accepts them is its call. Any other keys are dropped
/// here and never reach the store.
pub fn validated(body: &Value) -> Option<NewPost> {
    let fields = body.as_object()?;
    let title = fields.get("title")?.clone();
    let contents = fields.get("contents")?.clone();
    Some(NewPost { title, contents })
}

fn path_id(req: &Request) -> &str {
    req.param("id").unwrap_or_default()
}

async fn list(store: Store, _req: Request) -> Result<Response, PostsError> {
    let posts = store.find().await?;
    Ok(Response::json(Status::Ok, &posts))
}

async fn get_one(store: Store, req: Request) -> Result<Response, PostsError> {
    let post = store.find_by_id(path_id(&req)).await?.ok_or(PostsError::NotFound)?;
    Ok(Response::json(Status::Ok, &post))
}

async fn create(store: Store, req: Request) -> Result<Response, PostsError> {
    let post = validated(req.body()).ok_or(PostsError::MissingFields)?;
    let Inserted { id } = store.insert(post).await?;
    // The store's answer is forwarded as-is, even if the read-back is empty.
    let created = store.find_by_id(&id.to_string()).await?;
    Ok(Response::json(Status::Created, &created))
}

async fn replace(store: Store, req: Request) -> Result<Response, PostsError> {
    let post = validated(req.body()).ok_or(PostsError::MissingFields)?;
    let id = path_id(&req);
    if store.update(id, post).await? == 0 {
        return Err(PostsError::NotFound);
    }
    let updated = store.find_by_id(id).await?;
    Ok(Response::json(Status::Created, &updated))
}

async fn delete(store: Store, req: Request) -> Result<Response, PostsError> {
    let id = path_id(&req);
    let snapshot = store.find_by_id(id).await?.ok_or(PostsError::NotFound)?;
    if store.remove(id).await? == 0 {
        return Err(PostsError::Vanished);
    }
    Ok(Response::json(Status::Ok, &snapshot))
}
