//! CloudVision backend data adapter.
//!
//! Wraps every read operation the chatbot issues behind the `CloudVision`
//! trait, with a reqwest-backed `CvpRestClient` for real instances and a
//! fixture-backed `MockCloudVision` for tests.

pub mod client;
pub mod error;
pub mod mock;
pub mod rest;

pub use client::CloudVision;
pub use error::{BackendError, BackendResult};
pub use mock::MockCloudVision;
pub use rest::{AuthMode, CvpRestClient};
