pub mod content_root;
pub mod memory;
pub mod resource;

pub use content_root::ContentRoot;
pub use memory::MemoryResources;
pub use resource::{extension_of, normalize, ResourceAccessor};
