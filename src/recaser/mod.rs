//! Resource ID recasing
//!
//! Some APIs echo resource IDs back with arbitrarily cased labels
//! (`/SUBSCRIPTIONS/.../RESOURCEGROUPS/...`). The [`Registry`] matches such an
//! ID against every known schema, insensitively and in registration order,
//! and reformats it with the schema's canonical casing.
//!
//! Registration happens once at start-up; the registry is then sealed and
//! only read. [`default_registry`] provides a sealed registry of every
//! built-in schema for callers that do not assemble their own.

mod registry;

pub use registry::{default_registry, RecaseError, Registry};
