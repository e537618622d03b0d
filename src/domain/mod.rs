//! Domain logic - pure release rules independent of the hosting service

pub mod catalog;
pub mod change_request;
pub mod tag;
pub mod version;

pub use catalog::TagCatalog;
pub use change_request::ChangeRequestSummary;
pub use tag::{ResolvedTag, Tag};
pub use version::{normalize, Version};
