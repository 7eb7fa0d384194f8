use std::{
    error::Error,
    io::{Cursor, Read},
    sync::Arc,
};

use resource::ResourceAccessor;

use crate::{
    error::LoadError,
    logger::Logger,
    node::{Node, NodeKind},
    registry::NodeTypeRegistry,
};

/// `Ok(None)` means there was nothing to load: an empty path, a missing
/// resource or an unregistered type. Errors are reserved for failures while
/// reading or parsing.
pub type LoadResult = Result<Option<Box<dyn Node>>, LoadError>;

/// Capabilities handed to every [`NodeLoader`](crate::NodeLoader) call.
pub trait LoaderContext {
    fn load_node(&self, path: &str) -> LoadResult;

    fn load_node_opt(&self, path: Option<&str>) -> LoadResult {
        match path {
            Some(path) => self.load_node(path),
            None => Ok(None),
        }
    }

    fn load_node_from_stream(&self, extension: &str, contents: &mut dyn Read) -> LoadResult;

    fn load_node_from_template_kind(&self, kind: NodeKind) -> LoadResult;

    fn load_node_from_template(&self, extension: &str) -> LoadResult;

    fn log_exception(&self, error: &(dyn Error + 'static));

    fn node_type_registry(&self) -> &dyn NodeTypeRegistry;
}

impl<'a> dyn LoaderContext + 'a {
    pub fn load_node_from_template_of<N: Node>(&self) -> LoadResult {
        self.load_node_from_template_kind(NodeKind::of::<N>())
    }
}

/// Resolves resources to node types and runs their loaders.
///
/// Holds no state besides its collaborators: nothing is cached, every call
/// looks the type up again and reads the bytes again.
#[derive(Clone)]
pub struct ContentLoader {
    resources: Arc<dyn ResourceAccessor>,
    registry: Arc<dyn NodeTypeRegistry>,
    logger: Arc<dyn Logger>,
}

impl ContentLoader {
    pub fn new(
        resources: Arc<dyn ResourceAccessor>,
        registry: Arc<dyn NodeTypeRegistry>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            resources,
            registry,
            logger,
        }
    }

    #[inline]
    pub fn resources(&self) -> &dyn ResourceAccessor {
        self.resources.as_ref()
    }

    pub fn load_node_from_template_of<N: Node>(&self) -> LoadResult {
        self.load_node_from_template_kind(NodeKind::of::<N>())
    }
}

impl LoaderContext for ContentLoader {
    fn load_node(&self, path: &str) -> LoadResult {
        if path.is_empty() {
            return Ok(None);
        }
        if !self.resources.exists(path) {
            log::debug!("{} does not exist", path);
            return Ok(None);
        }
        let extension = self.resources.extension_of(path).unwrap_or_default();
        let mut contents = self.resources.open(path)?;
        log::debug!("loading {}", path);
        self.load_node_from_stream(&extension, &mut *contents)
    }

    fn load_node_from_stream(&self, extension: &str, contents: &mut dyn Read) -> LoadResult {
        match self.registry.get_node_type_from_extension(extension) {
            Some(node_type) => node_type.loader().load(self, contents).map(Some),
            None => {
                log::trace!("no node type registered for .{}", extension);
                Ok(None)
            }
        }
    }

    fn load_node_from_template_kind(&self, kind: NodeKind) -> LoadResult {
        match self.registry.get_node_type(kind) {
            Some(node_type) => self.load_node_from_template(node_type.extension()),
            None => {
                log::trace!("no node type registered for {}", kind);
                Ok(None)
            }
        }
    }

    fn load_node_from_template(&self, extension: &str) -> LoadResult {
        match self.registry.get_node_type_from_extension(extension) {
            Some(node_type) => {
                let mut template = Cursor::new(node_type.resource_type().template_data());
                self.load_node_from_stream(extension, &mut template)
            }
            None => {
                log::trace!("no template registered for .{}", extension);
                Ok(None)
            }
        }
    }

    fn log_exception(&self, error: &(dyn Error + 'static)) {
        self.logger.log_exception(error);
    }

    fn node_type_registry(&self) -> &dyn NodeTypeRegistry {
        self.registry.as_ref()
    }
}
