//! REST API endpoint implementations.
//!
//! Each function issues exactly one request through [`request::send_request`]
//! and decodes the normalized body. Filtering, sorting and polling live in
//! [`crate::client`].

mod apps;
mod auth;
mod indexes;
mod jobs;
mod request;
mod saved;
mod server;
mod url_encoding;

pub use apps::list_apps;
pub use auth::{login, verify_token};
pub use indexes::list_indexes;
pub use jobs::{CreateJobOptions, create_job, delete_job, get_job_status, get_results};
pub use request::{ApiRequest, send_request};
pub use saved::list_saved_searches;
pub use server::get_server_info;
