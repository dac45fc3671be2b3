//! # Datapunt Core
//!
//! Fundamental building blocks shared by the Datapunt HAL-JSON serializers:
//!
//! - [`exception`]: the error taxonomy surfaced by every shaping rule
//! - [`types`]: [`RenderedObject`], the [`Record`] trait and route kwargs
//! - [`context`]: the read-only [`RequestContext`] handed to each rule
//! - [`reverse`]: URL reversal through the [`UrlReverser`] trait, plus an
//!   in-memory [`RouteTable`] implementation
//!
//! None of these types hold mutable shared state; a context can be cloned
//! and used from several threads at once.

pub mod context;
pub mod exception;
pub mod reverse;
pub mod types;

pub use context::{RequestContext, ViewContext};
pub use exception::{DecodeError, Error, MalformedFilterError, ResolutionError, Result};
pub use reverse::{RouteTable, UrlReverser, to_url_param};
pub use types::{Kwargs, Record, RenderedObject};
