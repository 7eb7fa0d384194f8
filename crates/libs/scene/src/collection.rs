use std::{
    collections::{HashMap, HashSet},
    io::Read,
};

use asset::{LoadError, LoaderContext, Node, NodeLoader};
use glam::Mat4;
use serde::Deserialize;

use crate::{
    error::SceneError,
    format::{self, check_unique},
    game_object::{GameObjectNode, GAME_OBJECT_EXTENSION},
    transform::Transform,
};

pub const COLLECTION_EXTENSION: &str = "collection";

pub const COLLECTION_TEMPLATE: &str = "\
name: default
instances: []
embedded_instances: []
collection_instances: []
";

#[derive(Deserialize, Default)]
#[serde(default)]
struct CollectionDesc {
    name: String,
    instances: Vec<InstanceDesc>,
    embedded_instances: Vec<EmbeddedInstanceDesc>,
    collection_instances: Vec<CollectionInstanceDesc>,
}

#[derive(Deserialize)]
struct InstanceDesc {
    id: String,
    prototype: String,
    #[serde(default)]
    children: Vec<String>,
    #[serde(flatten)]
    transform: Transform,
}

#[derive(Deserialize)]
struct EmbeddedInstanceDesc {
    id: String,
    #[serde(default)]
    data: String,
    #[serde(default)]
    children: Vec<String>,
    #[serde(flatten)]
    transform: Transform,
}

#[derive(Deserialize)]
struct CollectionInstanceDesc {
    id: String,
    collection: String,
    #[serde(flatten)]
    transform: Transform,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstanceSource {
    Prototype(String),
    Embedded,
}

/// Game object placed in a collection.
#[derive(Debug)]
pub struct InstanceNode {
    pub id: String,
    pub transform: Transform,
    pub source: InstanceSource,
    pub children: Vec<String>,
    /// `None` when the prototype could not be resolved.
    pub game_object: Option<Box<GameObjectNode>>,
}

impl Node for InstanceNode {
    fn label(&self) -> String {
        match &self.source {
            InstanceSource::Prototype(path) if self.game_object.is_none() => {
                format!("{} ({}, unresolved)", self.id, path)
            }
            InstanceSource::Prototype(path) => format!("{} ({})", self.id, path),
            InstanceSource::Embedded => format!("{} (embedded)", self.id),
        }
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.game_object
            .iter()
            .map(|go| &**go as &dyn Node)
            .collect()
    }
}

/// Sub-collection placed in a collection.
#[derive(Debug)]
pub struct CollectionInstanceNode {
    pub id: String,
    pub collection: String,
    pub transform: Transform,
    pub node: Option<Box<CollectionNode>>,
}

impl Node for CollectionInstanceNode {
    fn label(&self) -> String {
        if self.node.is_some() {
            format!("{} ({})", self.id, self.collection)
        } else {
            format!("{} ({}, unresolved)", self.id, self.collection)
        }
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.node
            .iter()
            .map(|c| &**c as &dyn Node)
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct CollectionNode {
    name: String,
    instances: Vec<InstanceNode>,
    collection_instances: Vec<CollectionInstanceNode>,
    parents: HashMap<String, String>,
}

impl CollectionNode {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn instances(&self) -> &[InstanceNode] {
        &self.instances
    }

    #[inline]
    pub fn collection_instances(&self) -> &[CollectionInstanceNode] {
        &self.collection_instances
    }

    pub fn instance(&self, id: &str) -> Option<&InstanceNode> {
        self.instances.iter().find(|i| i.id == id)
    }

    pub fn collection_instance(&self, id: &str) -> Option<&CollectionInstanceNode> {
        self.collection_instances.iter().find(|i| i.id == id)
    }

    pub fn parent_of(&self, id: &str) -> Option<&InstanceNode> {
        self.parents.get(id).and_then(|parent| self.instance(parent))
    }

    /// Instances without a parent, in declaration order.
    pub fn root_instances(&self) -> impl Iterator<Item = &InstanceNode> {
        self.instances
            .iter()
            .filter(|i| !self.parents.contains_key(&i.id))
    }

    /// Transform of an instance relative to the collection, through all of
    /// its ancestors.
    pub fn world_matrix(&self, id: &str) -> Option<Mat4> {
        let mut matrix = self.instance(id)?.transform.compute_matrix();
        let mut current = id;
        while let Some(parent) = self.parents.get(current) {
            let parent_instance = self.instance(parent)?;
            matrix = parent_instance.transform.compute_matrix() * matrix;
            current = parent.as_str();
        }
        Some(matrix)
    }
}

impl Node for CollectionNode {
    fn label(&self) -> String {
        format!("collection {}", self.name)
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.instances
            .iter()
            .map(|i| i as &dyn Node)
            .chain(self.collection_instances.iter().map(|c| c as &dyn Node))
            .collect()
    }
}

/// Maps every child to its parent, rejecting unknown children, children with
/// two parents and cycles.
fn build_hierarchy(
    game_objects: &HashSet<&str>,
    children: &[(&str, &[String])],
) -> Result<HashMap<String, String>, SceneError> {
    let mut parents: HashMap<String, String> = HashMap::new();
    for (parent, kids) in children {
        for child in kids.iter() {
            if !game_objects.contains(child.as_str()) {
                return Err(SceneError::UnknownChild {
                    parent: parent.to_string(),
                    child: child.clone(),
                });
            }
            if parents.insert(child.clone(), parent.to_string()).is_some() {
                return Err(SceneError::MultipleParents(child.clone()));
            }
        }
    }

    for start in parents.keys() {
        let mut current = start.as_str();
        let mut steps = 0;
        while let Some(parent) = parents.get(current) {
            if parent == start || steps > parents.len() {
                return Err(SceneError::ParentCycle(start.clone()));
            }
            current = parent.as_str();
            steps += 1;
        }
    }
    Ok(parents)
}

fn expect_game_object(
    id: &str,
    path: &str,
    node: Option<Box<dyn Node>>,
) -> Result<Option<Box<GameObjectNode>>, SceneError> {
    match node {
        None => Ok(None),
        Some(node) => node
            .downcast::<GameObjectNode>()
            .map(Some)
            .map_err(|node| SceneError::WrongKind {
                id: id.to_string(),
                path: path.to_string(),
                expected: "game object",
                found: node.kind(),
            }),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CollectionLoader;

impl NodeLoader for CollectionLoader {
    fn load(
        &self,
        context: &dyn LoaderContext,
        contents: &mut dyn Read,
    ) -> Result<Box<dyn Node>, LoadError> {
        let desc: CollectionDesc = format::parse(contents)?;

        let parents = {
            let mut ids = HashSet::new();
            for id in desc.instances.iter().map(|i| i.id.as_str()) {
                check_unique(&mut ids, id)?;
            }
            for id in desc.embedded_instances.iter().map(|i| i.id.as_str()) {
                check_unique(&mut ids, id)?;
            }
            let game_objects = ids.clone();
            for id in desc.collection_instances.iter().map(|i| i.id.as_str()) {
                check_unique(&mut ids, id)?;
            }

            let children: Vec<(&str, &[String])> = desc
                .instances
                .iter()
                .map(|i| (i.id.as_str(), i.children.as_slice()))
                .chain(
                    desc.embedded_instances
                        .iter()
                        .map(|i| (i.id.as_str(), i.children.as_slice())),
                )
                .collect();
            build_hierarchy(&game_objects, &children)?
        };

        let mut instances =
            Vec::with_capacity(desc.instances.len() + desc.embedded_instances.len());
        for instance in desc.instances {
            let node = format::load_reference(context, &instance.prototype)?;
            if node.is_none() {
                log::warn!(
                    "instance `{}` references {}, which could not be resolved",
                    instance.id,
                    instance.prototype
                );
            }
            let game_object = expect_game_object(&instance.id, &instance.prototype, node)?;
            instances.push(InstanceNode {
                id: instance.id,
                transform: instance.transform,
                source: InstanceSource::Prototype(instance.prototype),
                children: instance.children,
                game_object,
            });
        }
        for instance in desc.embedded_instances {
            let node = context
                .load_node_from_stream(GAME_OBJECT_EXTENSION, &mut instance.data.as_bytes())?
                .ok_or_else(|| SceneError::UnknownEmbeddedType {
                    id: instance.id.clone(),
                    type_tag: GAME_OBJECT_EXTENSION.to_string(),
                })?;
            let game_object = expect_game_object(&instance.id, "<embedded>", Some(node))?;
            instances.push(InstanceNode {
                id: instance.id,
                transform: instance.transform,
                source: InstanceSource::Embedded,
                children: instance.children,
                game_object,
            });
        }

        let mut collection_instances = Vec::with_capacity(desc.collection_instances.len());
        for instance in desc.collection_instances {
            let node = match format::load_reference(context, &instance.collection)? {
                None => {
                    log::warn!(
                        "collection instance `{}` references {}, which could not be resolved",
                        instance.id,
                        instance.collection
                    );
                    None
                }
                Some(node) => Some(node.downcast::<CollectionNode>().map_err(|node| {
                    SceneError::WrongKind {
                        id: instance.id.clone(),
                        path: instance.collection.clone(),
                        expected: "collection",
                        found: node.kind(),
                    }
                })?),
            };
            collection_instances.push(CollectionInstanceNode {
                id: instance.id,
                collection: instance.collection,
                transform: instance.transform,
                node,
            });
        }

        Ok(Box::new(CollectionNode {
            name: desc.name,
            instances,
            collection_instances,
            parents,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use asset::{ContentLoader, LogLogger, NodeKind, NodeTypes};
    use glam::Vec3;
    use resource::MemoryResources;

    use super::*;
    use crate::sprite::SpriteNode;

    fn context(resources: MemoryResources) -> ContentLoader {
        let mut registry = NodeTypes::new();
        crate::register_node_types(&mut registry);
        ContentLoader::new(Arc::new(resources), Arc::new(registry), Arc::new(LogLogger))
    }

    fn scene_error(error: LoadError) -> String {
        std::error::Error::source(&error).unwrap().to_string()
    }

    const LEVEL: &str = "\
name: level
instances:
  - id: hero
    prototype: /main/hero.go
    position: [1.0, 0.0, 0.0]
    children: [sword]
  - id: ghost
    prototype: /main/ghost.go
embedded_instances:
  - id: sword
    position: [0.0, 2.0, 0.0]
    data: |
      embedded_components:
        - id: blade
          type: sprite
          data: \"tile_source: /graphics/sword.atlas\"
collection_instances:
  - id: hud
    collection: /main/hud.collection
";

    fn level_resources() -> MemoryResources {
        MemoryResources::new()
            .with("/main/level.collection", LEVEL)
            .with("/main/hero.go", "components:\n  - id: body\n    component: /main/hero.sprite\n")
            .with("/main/hero.sprite", "tile_source: /graphics/hero.atlas\n")
            .with("/main/hud.collection", "name: hud\n")
    }

    #[test]
    fn loads_nested_collection() {
        let context = context(level_resources());
        let node = context.load_node("/main/level.collection").unwrap().unwrap();
        let level = node.downcast_ref::<CollectionNode>().unwrap();
        assert_eq!("level", level.name());
        assert_eq!(3, level.instances().len());

        let hero = level.instance("hero").unwrap();
        assert_eq!(InstanceSource::Prototype("/main/hero.go".to_string()), hero.source);
        let body = hero.game_object.as_ref().unwrap().component("body").unwrap();
        assert!(body.node.as_ref().unwrap().is::<SpriteNode>());

        assert!(level.instance("ghost").unwrap().game_object.is_none());

        let sword = level.instance("sword").unwrap();
        assert_eq!(InstanceSource::Embedded, sword.source);
        assert_eq!("hero", level.parent_of("sword").unwrap().id);
        let blade = sword.game_object.as_ref().unwrap().component("blade").unwrap();
        assert_eq!(
            "/graphics/sword.atlas",
            blade.node.as_ref().unwrap().downcast_ref::<SpriteNode>().unwrap().tile_source
        );

        let hud = level.collection_instance("hud").unwrap();
        assert_eq!("hud", hud.node.as_ref().unwrap().name());

        let roots: Vec<_> = level.root_instances().map(|i| i.id.as_str()).collect();
        assert_eq!(vec!["hero", "ghost"], roots);
    }

    #[test]
    fn world_matrix_follows_parents() {
        let context = context(level_resources());
        let node = context.load_node("/main/level.collection").unwrap().unwrap();
        let level = node.downcast_ref::<CollectionNode>().unwrap();

        let sword = level.world_matrix("sword").unwrap().transform_point3(Vec3::ZERO);
        assert!(sword.abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-6));
        let hero = level.world_matrix("hero").unwrap().transform_point3(Vec3::ZERO);
        assert!(hero.abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-6));
        assert!(level.world_matrix("nobody").is_none());
    }

    #[test]
    fn children_must_exist() {
        let context = context(MemoryResources::new().with(
            "/a.collection",
            "instances:\n  - id: a\n    prototype: /a.go\n    children: [b]\n",
        ));
        let error = context.load_node("/a.collection").unwrap_err();
        assert_eq!("`a` lists unknown child `b`", scene_error(error));
    }

    #[test]
    fn child_with_two_parents_is_rejected() {
        let context = context(MemoryResources::new().with(
            "/a.collection",
            "\
instances:
  - id: a
    prototype: /a.go
    children: [c]
  - id: b
    prototype: /b.go
    children: [c]
  - id: c
    prototype: /c.go
",
        ));
        let error = context.load_node("/a.collection").unwrap_err();
        assert_eq!("`c` has more than one parent", scene_error(error));
    }

    #[test]
    fn parent_cycle_is_rejected() {
        let context = context(MemoryResources::new().with(
            "/a.collection",
            "\
instances:
  - id: a
    prototype: /a.go
    children: [b]
  - id: b
    prototype: /b.go
    children: [a]
",
        ));
        let error = context.load_node("/a.collection").unwrap_err();
        assert!(scene_error(error).ends_with("is its own ancestor"));
    }

    #[test]
    fn collection_instances_cannot_be_children() {
        let context = context(MemoryResources::new().with(
            "/a.collection",
            "\
instances:
  - id: a
    prototype: /a.go
    children: [sub]
collection_instances:
  - id: sub
    collection: /sub.collection
",
        ));
        let error = context.load_node("/a.collection").unwrap_err();
        assert_eq!("`a` lists unknown child `sub`", scene_error(error));
    }

    #[test]
    fn ids_are_unique_across_lists() {
        let context = context(MemoryResources::new().with(
            "/a.collection",
            "\
instances:
  - id: a
    prototype: /a.go
collection_instances:
  - id: a
    collection: /sub.collection
",
        ));
        let error = context.load_node("/a.collection").unwrap_err();
        assert_eq!("id `a` is used more than once", scene_error(error));
    }

    #[test]
    fn prototype_must_be_game_object() {
        let context = context(
            MemoryResources::new()
                .with("/a.collection", "instances:\n  - id: a\n    prototype: /a.sprite\n")
                .with("/a.sprite", "tile_source: x\n"),
        );
        let error = context.load_node("/a.collection").unwrap_err();
        match std::error::Error::source(&error)
            .and_then(|e| e.downcast_ref::<SceneError>())
        {
            Some(SceneError::WrongKind { id, found, .. }) => {
                assert_eq!("a", id.as_str());
                assert_eq!(NodeKind::of::<SpriteNode>(), *found);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn collection_instance_must_be_collection() {
        let context = context(
            MemoryResources::new()
                .with("/a.collection", "collection_instances:\n  - id: sub\n    collection: /a.go\n")
                .with("/a.go", "components: []\n"),
        );
        let error = context.load_node("/a.collection").unwrap_err();
        assert!(scene_error(error).contains("not a collection"));
    }

    #[test]
    fn self_instancing_collection_is_rejected() {
        let context = context(MemoryResources::new().with(
            "/a.collection",
            "collection_instances:\n  - id: me\n    collection: /a.collection\n",
        ));
        let error = context.load_node("/a.collection").unwrap_err();
        assert!(error.is_format());
        match std::error::Error::source(&error).and_then(|e| e.downcast_ref::<SceneError>()) {
            Some(SceneError::ReferenceCycle(path)) => assert_eq!("/a.collection", path.as_str()),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn shared_prototypes_are_not_cycles() {
        let context = context(
            MemoryResources::new()
                .with(
                    "/a.collection",
                    "instances:\n  - id: one\n    prototype: /hero.go\n  - id: two\n    prototype: /hero.go\n\
                     collection_instances:\n  - id: sub\n    collection: /b.collection\n",
                )
                .with("/b.collection", "instances:\n  - id: three\n    prototype: /hero.go\n")
                .with("/hero.go", "components: []\n"),
        );
        let node = context.load_node("/a.collection").unwrap().unwrap();
        let collection = node.downcast_ref::<CollectionNode>().unwrap();
        assert!(collection.instances().iter().all(|i| i.game_object.is_some()));
        let sub = collection.collection_instance("sub").unwrap();
        assert!(sub.node.as_ref().unwrap().instance("three").unwrap().game_object.is_some());
    }

    #[test]
    fn template_is_empty_collection() {
        let context = context(MemoryResources::new());
        let node = context
            .load_node_from_template_of::<CollectionNode>()
            .unwrap()
            .unwrap();
        let collection = node.downcast_ref::<CollectionNode>().unwrap();
        assert_eq!("default", collection.name());
        assert!(collection.instances().is_empty());
        assert!(collection.collection_instances().is_empty());
    }
}
