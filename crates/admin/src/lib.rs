//! Shopdesk admin client library.
//!
//! Everything an admin front end needs to manage a store through its REST
//! backend, independent of how screens are rendered:
//!
//! - [`client::ApiClient`] - authenticated HTTP context, one method per
//!   backend operation (see [`api`])
//! - [`controller`] - list screens: fetch, search, mutate, refetch
//! - [`dialog`] - create/edit forms with required-field validation
//! - [`reorder`] - moving carousel images and persisting the new order
//! - [`notify`] - success/error toasts
//! - [`config`] and [`session`] - environment configuration and the
//!   persisted login
//!
//! # Security
//!
//! The session file holds a bearer token with full admin rights. It is
//! never logged; `Debug` output redacts it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod client;
pub mod config;
pub mod controller;
pub mod dialog;
pub mod error;
pub mod filter;
pub mod models;
pub mod notify;
pub mod reorder;
pub mod session;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
