//! Shared types for CloudVision ChatOps (chatbot + backend adapter).
//!
//! Re-exports the record, choice, and report types so both the backend
//! adapter crate and the chatbot crate speak the same vocabulary.

pub mod choices;
pub mod records;
pub mod report;
pub mod time;

pub use choices::{Choice, CommandStatus, EventSeverity};
pub use records::{
    BugInfo, BundleAssignments, Configlet, Container, Device, EventRecord, ImageBundle, ImageInfo,
    StreamingDevice, StreamingStatus, TagAssignment, TaskRecord,
};
pub use report::{Report, ReportBody};
pub use time::TimeWindow;
