//! Core handler infrastructure.
//!
//! This module contains the rule table, the response types produced by
//! handler factories, and message template rendering.
//!
//! ## Two-Phase Dispatch
//!
//! - [`Registry::lookup`] picks the first rule whose pattern matches a line.
//! - The rule's factory turns the [`LineMatch`] into a [`Response`] with no I/O.
//! - [`Response::resolve`] produces the outbound line, awaiting a
//!   [`Producer`] when the response was deferred.

pub mod registry;
pub mod response;
pub mod template;

pub use registry::{HandlerFactory, LineMatch, Registry, Rule};
pub use response::{Producer, Response};
pub use template::{escape, render};
