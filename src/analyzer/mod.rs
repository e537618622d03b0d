//! Resolution of the release tag and its predecessor from a tag catalog

pub mod previous;
pub mod release;

pub use previous::resolve_previous;
pub use release::resolve_release;
