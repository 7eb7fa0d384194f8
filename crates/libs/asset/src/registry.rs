use std::collections::HashMap;

use crate::{
    node::NodeKind,
    node_type::{normalize_extension, NodeType},
};

/// Lookup table from extension, or node kind, to node type.
pub trait NodeTypeRegistry: Send + Sync {
    fn get_node_type_from_extension(&self, extension: &str) -> Option<&NodeType>;

    fn get_node_type(&self, kind: NodeKind) -> Option<&NodeType>;

    fn node_types(&self) -> Vec<&NodeType>;
}

/// Default registry, filled once at startup and read-only afterwards.
///
/// Extensions are matched exactly (case-sensitive), ignoring one leading `.`.
/// Registering an extension or kind a second time rebinds it to the newer
/// type.
#[derive(Default, Debug)]
pub struct NodeTypes {
    node_types: Vec<NodeType>,
    extension_to_index: HashMap<String, usize>,
    kind_to_index: HashMap<NodeKind, usize>,
}

impl NodeTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, node_type: NodeType) -> &mut Self {
        let extension = node_type.extension().to_string();
        let kind = node_type.kind();

        let index = match self.extension_to_index.get(&extension) {
            Some(&index) => {
                let replaced = std::mem::replace(&mut self.node_types[index], node_type);
                log::warn!(
                    "node type for .{} replaced: {} -> {}",
                    extension,
                    replaced.kind(),
                    kind
                );
                if self.kind_to_index.get(&replaced.kind()) == Some(&index) {
                    self.kind_to_index.remove(&replaced.kind());
                }
                index
            }
            None => {
                let index = self.node_types.len();
                self.node_types.push(node_type);
                self.extension_to_index.insert(extension.clone(), index);
                index
            }
        };

        if let Some(previous) = self.kind_to_index.insert(kind, index) {
            if previous != index {
                log::warn!(
                    "{} now resolves to .{} instead of .{}",
                    kind,
                    extension,
                    self.node_types[previous].extension()
                );
            }
        }
        log::debug!("registered .{} as {}", extension, kind);
        self
    }

    pub fn len(&self) -> usize {
        self.node_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_types.is_empty()
    }
}

impl NodeTypeRegistry for NodeTypes {
    fn get_node_type_from_extension(&self, extension: &str) -> Option<&NodeType> {
        let index = self
            .extension_to_index
            .get(normalize_extension(extension))?;
        self.node_types.get(*index)
    }

    fn get_node_type(&self, kind: NodeKind) -> Option<&NodeType> {
        let index = self.kind_to_index.get(&kind)?;
        self.node_types.get(*index)
    }

    fn node_types(&self) -> Vec<&NodeType> {
        self.node_types.iter().collect()
    }
}
