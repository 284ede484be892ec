// crates/tagflow-core/src/lib.rs
pub mod animation;
pub mod elements;
pub mod events;
pub mod geometry;
pub mod resources;
pub mod scene;
pub mod text;

pub use animation::*;
pub use elements::*;
pub use events::*;
pub use geometry::*;
pub use resources::*;
pub use scene::*;
pub use text::*;

#[derive(Debug, thiserror::Error)]
pub enum TagflowError {
    #[error("Resource not found: {0}")]
    ResourceNotFound(ResourceId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, TagflowError>;
