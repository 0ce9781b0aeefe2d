//! inframe-api: Shared backend types
//!
//! Contains the response envelope, resource records and asset upload types
//! exchanged with the Inframe backend, used by the client, CLI, and TUI.

pub use inframe_table;

pub mod envelope;
pub mod resources;
pub mod upload;

pub use envelope::{Details, ErrorBody};
pub use resources::{
    AboutUsSection, BlogPost, Company, ContactSubmission, LifePost, Membership, Resource,
    ResourceKind, UnknownResource,
};
pub use upload::UploadResponse;
