use std::{collections::HashSet, io::Read};

use asset::{LoadError, LoaderContext, Node, NodeLoader};
use serde::Deserialize;

use crate::{
    error::SceneError,
    format::{self, check_unique},
    transform::Transform,
};

pub const GAME_OBJECT_EXTENSION: &str = "go";

pub const GAME_OBJECT_TEMPLATE: &str = "\
components: []
embedded_components: []
";

#[derive(Deserialize, Default)]
#[serde(default)]
struct GameObjectDesc {
    components: Vec<ComponentDesc>,
    embedded_components: Vec<EmbeddedComponentDesc>,
}

#[derive(Deserialize)]
struct ComponentDesc {
    id: String,
    component: String,
    #[serde(flatten)]
    transform: Transform,
}

#[derive(Deserialize)]
struct EmbeddedComponentDesc {
    id: String,
    #[serde(rename = "type")]
    type_tag: String,
    #[serde(default)]
    data: String,
    #[serde(flatten)]
    transform: Transform,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComponentSource {
    /// Path of the component resource.
    Reference(String),
    /// Type tag of the inline data.
    Embedded(String),
}

#[derive(Debug)]
pub struct ComponentNode {
    pub id: String,
    pub transform: Transform,
    pub source: ComponentSource,
    /// `None` when a referenced resource could not be resolved.
    pub node: Option<Box<dyn Node>>,
}

impl ComponentNode {
    pub fn is_resolved(&self) -> bool {
        self.node.is_some()
    }
}

impl Node for ComponentNode {
    fn label(&self) -> String {
        match &self.source {
            ComponentSource::Reference(path) if self.node.is_none() => {
                format!("{} ({}, unresolved)", self.id, path)
            }
            ComponentSource::Reference(path) => format!("{} ({})", self.id, path),
            ComponentSource::Embedded(type_tag) => format!("{} (embedded {})", self.id, type_tag),
        }
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.node.iter().map(|node| &**node).collect()
    }
}

#[derive(Debug, Default)]
pub struct GameObjectNode {
    components: Vec<ComponentNode>,
}

impl GameObjectNode {
    pub fn new(components: Vec<ComponentNode>) -> Self {
        Self { components }
    }

    #[inline]
    pub fn components(&self) -> &[ComponentNode] {
        &self.components
    }

    pub fn component(&self, id: &str) -> Option<&ComponentNode> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &ComponentNode> {
        self.components.iter().filter(|c| !c.is_resolved())
    }
}

impl Node for GameObjectNode {
    fn label(&self) -> String {
        format!("game object ({} components)", self.components.len())
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.components.iter().map(|c| c as &dyn Node).collect()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GameObjectLoader;

impl NodeLoader for GameObjectLoader {
    fn load(
        &self,
        context: &dyn LoaderContext,
        contents: &mut dyn Read,
    ) -> Result<Box<dyn Node>, LoadError> {
        let desc: GameObjectDesc = format::parse(contents)?;

        {
            let mut ids = HashSet::new();
            for id in desc.components.iter().map(|c| c.id.as_str()) {
                check_unique(&mut ids, id)?;
            }
            for id in desc.embedded_components.iter().map(|c| c.id.as_str()) {
                check_unique(&mut ids, id)?;
            }
        }

        let mut components =
            Vec::with_capacity(desc.components.len() + desc.embedded_components.len());
        for component in desc.components {
            let node = format::load_reference(context, &component.component)?;
            if node.is_none() {
                log::warn!(
                    "component `{}` references {}, which could not be resolved",
                    component.id,
                    component.component
                );
            }
            components.push(ComponentNode {
                id: component.id,
                transform: component.transform,
                source: ComponentSource::Reference(component.component),
                node,
            });
        }
        for component in desc.embedded_components {
            let node = context
                .load_node_from_stream(&component.type_tag, &mut component.data.as_bytes())?
                .ok_or_else(|| SceneError::UnknownEmbeddedType {
                    id: component.id.clone(),
                    type_tag: component.type_tag.clone(),
                })?;
            components.push(ComponentNode {
                id: component.id,
                transform: component.transform,
                source: ComponentSource::Embedded(component.type_tag),
                node: Some(node),
            });
        }

        Ok(Box::new(GameObjectNode::new(components)))
    }
}
