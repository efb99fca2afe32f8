//! Resource ID grammar
//!
//! Typed representation of hierarchical ARM resource IDs such as
//! `/subscriptions/{id}/resourceGroups/{rg}/providers/{ns}/{type}/{name}`.
//!
//! # Module Structure
//!
//! - [`segment`] - The segment kinds an ID is built from
//! - [`schema`] - Ordered segment lists, one per resource type
//! - [`parser`] - Strict and case-insensitive parsing, and formatting
//! - [`ids`] - Typed IDs for the resource types this crate knows about
//! - [`validate`] - Validators for user supplied values
//!
//! # Example
//!
//! ```
//! use azrm::resourceids::{EventHubId, ResourceId};
//!
//! let id = EventHubId::parse(
//!     "/subscriptions/abc/resourceGroups/rg1/providers/Microsoft.EventHub/namespaces/ns1/eventhubs/eh1",
//! )
//! .unwrap();
//! assert_eq!(id.event_hub_name, "eh1");
//! ```

mod error;
pub mod ids;
pub mod parser;
pub mod schema;
pub mod segment;
pub mod validate;

pub use error::IdError;
pub use ids::*;
pub use parser::{parse, ParsedIdentifier};
pub use schema::IdentifierSchema;
pub use segment::Segment;
