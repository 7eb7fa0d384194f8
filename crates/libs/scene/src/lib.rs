pub mod collection;
pub mod error;
mod format;
pub mod game_object;
pub mod sprite;
pub mod transform;

use asset::{NodeType, NodeTypes};

pub use collection::{
    CollectionInstanceNode, CollectionLoader, CollectionNode, InstanceNode, InstanceSource,
    COLLECTION_EXTENSION,
};
pub use error::SceneError;
pub use game_object::{
    ComponentNode, ComponentSource, GameObjectLoader, GameObjectNode, GAME_OBJECT_EXTENSION,
};
pub use sprite::{BlendMode, SpriteLoader, SpriteNode, SPRITE_EXTENSION};
pub use transform::Transform;

/// Registers every node type this crate knows how to load.
pub fn register_node_types(registry: &mut NodeTypes) {
    registry
        .register(NodeType::new::<SpriteNode, _, _>(
            SPRITE_EXTENSION,
            "Sprite",
            SpriteLoader,
            sprite::SPRITE_TEMPLATE,
        ))
        .register(NodeType::new::<GameObjectNode, _, _>(
            GAME_OBJECT_EXTENSION,
            "Game Object",
            GameObjectLoader,
            game_object::GAME_OBJECT_TEMPLATE,
        ))
        .register(NodeType::new::<CollectionNode, _, _>(
            COLLECTION_EXTENSION,
            "Collection",
            CollectionLoader,
            collection::COLLECTION_TEMPLATE,
        ));
}
