//! Backend REST API collaborators. Only the response shapes are owned here;
//! the endpoints themselves belong to the GoStock backend.

pub mod client;

pub use client::BackendClient;
