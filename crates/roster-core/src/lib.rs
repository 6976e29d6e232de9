//! Core types and trait definitions for the Roster employee directory.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the credential discipline (hash on write, hash-then-compare on verify) and
//! the role policy; storage backends and transports plug in through
//! [`store::EmployeeStore`] and [`authz::Authorizer`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod authz;
pub mod employee;
pub mod error;
pub mod hasher;
pub mod memory;
pub mod service;
pub mod store;

pub use error::{Error, Result};
pub use service::EmployeeAccessService;
