//! Azure Resource Manager request plumbing
//!
//! A thin async client: typed resource IDs become request URLs and responses
//! decode into models whose echoed IDs are re-cased.

pub mod client;
pub mod http;
pub mod models;

pub use client::ArmClient;
pub use http::{format_arm_error, ArmHttpClient};
pub use models::{MachineLearningCompute, Page, ReplicationProtectedItem, ReplicationProtectedItemProperties};
