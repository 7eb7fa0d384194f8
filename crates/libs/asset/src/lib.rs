pub mod error;
pub mod loader_context;
pub mod logger;
pub mod node;
pub mod node_loader;
pub mod node_type;
pub mod registry;

pub use error::{BoxError, LoadError};
pub use loader_context::{ContentLoader, LoadResult, LoaderContext};
pub use logger::{error_chain, LogLogger, Logger};
pub use node::{Node, NodeAny, NodeKind};
pub use node_loader::{read_to_string, NodeLoader};
pub use node_type::{NodeType, ResourceType};
pub use registry::{NodeTypeRegistry, NodeTypes};
