//! azrm - Azure Resource Manager core
//!
//! Building blocks shared by ARM clients:
//!
//! - [`resourceids`] - Typed resource IDs: segment grammar, strict and
//!   case-insensitive parsing, formatting
//! - [`recaser`] - Re-casing of service-echoed IDs against registered schemas
//! - [`polymorphic`] - Decoding of discriminated payloads with a lossless
//!   fallback for unknown discriminators
//! - [`arm`] - Async request plumbing built on the above
//! - [`config`] - Persistent client configuration
//! - [`logging`] - Subscriber setup for embedding applications

pub mod arm;
pub mod config;
pub mod logging;
pub mod polymorphic;
pub mod recaser;
pub mod resourceids;
