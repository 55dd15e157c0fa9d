//! API server and routes

pub mod auth;
mod embedded;
pub mod extractors;
pub mod middleware;
pub mod openapi;
mod pages;
pub mod routes;
mod server;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use server::{ApiServer, build_router};
