use asset::{LoadError, NodeKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("invalid document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("id `{0}` is used more than once")]
    DuplicateId(String),

    #[error("`{id}` embeds unregistered type `{type_tag}`")]
    UnknownEmbeddedType { id: String, type_tag: String },

    #[error("`{id}` references {path}, which is a {found} and not a {expected}")]
    WrongKind {
        id: String,
        path: String,
        expected: &'static str,
        found: NodeKind,
    },

    #[error("`{parent}` lists unknown child `{child}`")]
    UnknownChild { parent: String, child: String },

    #[error("`{0}` has more than one parent")]
    MultipleParents(String),

    #[error("`{0}` is its own ancestor")]
    ParentCycle(String),

    #[error("{0} references itself, directly or through other resources")]
    ReferenceCycle(String),
}

impl From<SceneError> for LoadError {
    fn from(error: SceneError) -> Self {
        LoadError::format(error)
    }
}
