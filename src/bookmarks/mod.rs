//! Bookmarks HTTP API
//!
//! CRUD endpoints for bookmark records, mounted under a configurable base path
//! (`/bookmarks` by default):
//!
//! - `GET    {base}`     list every bookmark
//! - `POST   {base}`     create a bookmark
//! - `GET    {base}/:id` fetch one bookmark
//! - `PATCH  {base}/:id` update some fields of a bookmark
//! - `DELETE {base}/:id` delete a bookmark
//!
//! Text fields are HTML-escaped on the way out; stored data is never rewritten.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookmarks::bookmarks;
//!
//! let app = Router::new()
//!     .merge(bookmarks::routes("/api/bookmarks"))
//!     .with_state(app_state);
//! ```

mod handler;
mod routes;

pub use routes::routes;
