use std::io::Read;

use asset::{LoadError, LoaderContext, Node, NodeLoader};
use serde::{Deserialize, Serialize};

use crate::format;

pub const SPRITE_EXTENSION: &str = "sprite";

pub const SPRITE_TEMPLATE: &str = "\
tile_source: \"\"
default_animation: \"\"
blend_mode: alpha
";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    #[default]
    Alpha,
    Add,
    Multiply,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteNode {
    pub tile_source: String,
    pub default_animation: String,
    pub blend_mode: BlendMode,
}

impl Node for SpriteNode {
    fn label(&self) -> String {
        if self.tile_source.is_empty() {
            "sprite".to_string()
        } else {
            format!("sprite {}#{}", self.tile_source, self.default_animation)
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SpriteLoader;

impl NodeLoader for SpriteLoader {
    fn load(
        &self,
        _context: &dyn LoaderContext,
        contents: &mut dyn Read,
    ) -> Result<Box<dyn Node>, LoadError> {
        let sprite: SpriteNode = format::parse(contents)?;
        Ok(Box::new(sprite))
    }
}
