use std::{fmt, sync::Arc};

use crate::{
    node::{Node, NodeKind},
    node_loader::NodeLoader,
};

/// Resource side of a node type: identity plus the data new files start from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceType {
    id: String,
    name: String,
    template_data: Vec<u8>,
}

impl ResourceType {
    pub fn new<B: Into<Vec<u8>>>(id: &str, name: &str, template_data: B) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            template_data: template_data.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn template_data(&self) -> &[u8] {
        &self.template_data
    }
}

/// Registry entry binding an extension and a node kind to a loader.
#[derive(Clone)]
pub struct NodeType {
    extension: String,
    kind: NodeKind,
    loader: Arc<dyn NodeLoader>,
    resource_type: ResourceType,
}

impl NodeType {
    pub fn new<N, L, B>(extension: &str, name: &str, loader: L, template_data: B) -> Self
    where
        N: Node,
        L: NodeLoader,
        B: Into<Vec<u8>>,
    {
        let extension = normalize_extension(extension);
        let resource_type = ResourceType::new(extension, name, template_data);
        Self {
            extension: extension.to_string(),
            kind: NodeKind::of::<N>(),
            loader: Arc::new(loader),
            resource_type,
        }
    }

    #[inline]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    pub fn loader(&self) -> &dyn NodeLoader {
        self.loader.as_ref()
    }

    #[inline]
    pub fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }
}

impl fmt::Debug for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeType")
            .field("extension", &self.extension)
            .field("kind", &self.kind)
            .field("resource_type", &self.resource_type)
            .finish()
    }
}

pub(crate) fn normalize_extension(extension: &str) -> &str {
    extension.strip_prefix('.').unwrap_or(extension)
}
