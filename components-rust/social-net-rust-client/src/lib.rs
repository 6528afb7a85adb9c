//! Client for the linked-posts social network REST API.
//!
//! All data lives on the remote API; this crate sends the requests, keeps a
//! client-side mirror of the last responses in a [`store::Store`], and
//! persists the auth token between runs.

pub mod auth;
pub mod client;
pub mod comment;
pub mod common;
pub mod config;
pub mod error;
pub mod notify;
pub mod post;
pub mod profile;
pub mod session;
pub mod store;

pub use auth::AuthApi;
pub use client::SocialClient;
pub use comment::CommentApi;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use post::{NewPost, PostApi};
pub use profile::ProfileApi;
