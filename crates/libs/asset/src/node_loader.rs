use std::io::Read;

use crate::{error::LoadError, loader_context::LoaderContext, node::Node};

/// Converts the raw bytes of one resource type into a node.
///
/// The context gives access to nested resources, so a loader may recursively
/// load whatever its content references.
pub trait NodeLoader: Send + Sync + 'static {
    fn load(
        &self,
        context: &dyn LoaderContext,
        contents: &mut dyn Read,
    ) -> Result<Box<dyn Node>, LoadError>;
}

impl<F> NodeLoader for F
where
    F: Fn(&dyn LoaderContext, &mut dyn Read) -> Result<Box<dyn Node>, LoadError>
        + Send
        + Sync
        + 'static,
{
    fn load(
        &self,
        context: &dyn LoaderContext,
        contents: &mut dyn Read,
    ) -> Result<Box<dyn Node>, LoadError> {
        self(context, contents)
    }
}

/// Reads the whole stream as UTF-8 text.
pub fn read_to_string(contents: &mut dyn Read) -> Result<String, LoadError> {
    let mut bytes = Vec::new();
    contents.read_to_end(&mut bytes)?;
    String::from_utf8(bytes).map_err(LoadError::format)
}
