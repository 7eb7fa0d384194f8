use std::{
    any::{Any, TypeId},
    fmt,
    hash::{Hash, Hasher},
};

/// Runtime kind of a node, used for reverse registry lookups.
#[derive(Clone, Copy)]
pub struct NodeKind {
    id: TypeId,
    name: &'static str,
}

impl NodeKind {
    pub fn of<N: Node>() -> Self {
        Self {
            id: TypeId::of::<N>(),
            name: std::any::type_name::<N>(),
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeKind").field(&self.name).finish()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.short_name())
    }
}

impl PartialEq for NodeKind {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for NodeKind {}

impl Hash for NodeKind {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Implemented for every [`Node`], do not implement by hand.
pub trait NodeAny {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
    fn kind(&self) -> NodeKind;
}

impl<N: Node> NodeAny for N {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }

    fn kind(&self) -> NodeKind {
        NodeKind::of::<N>()
    }
}

/// In-memory result of loading a resource.
pub trait Node: NodeAny + fmt::Debug + Send + Sync + 'static {
    fn label(&self) -> String {
        self.kind().short_name().to_string()
    }

    fn children(&self) -> Vec<&dyn Node> {
        Vec::new()
    }
}

impl dyn Node {
    #[inline]
    pub fn is<N: Node>(&self) -> bool {
        self.as_any().is::<N>()
    }

    #[inline]
    pub fn downcast_ref<N: Node>(&self) -> Option<&N> {
        self.as_any().downcast_ref::<N>()
    }

    pub fn downcast<N: Node>(self: Box<Self>) -> Result<Box<N>, Box<dyn Node>> {
        if !self.is::<N>() {
            return Err(self);
        }
        match self.into_any().downcast::<N>() {
            Ok(node) => Ok(node),
            Err(_) => unreachable!("kind checked above"),
        }
    }

    /// Depth-first walk over this node and all of its descendants.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(usize, &'a dyn Node)) {
        fn walk_inner<'a>(node: &'a dyn Node, depth: usize, visit: &mut dyn FnMut(usize, &'a dyn Node)) {
            visit(depth, node);
            for child in node.children() {
                walk_inner(child, depth + 1, visit);
            }
        }
        walk_inner(self, 0, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Leaf(u32);

    impl Node for Leaf {}

    #[derive(Debug)]
    struct Branch(Vec<Box<dyn Node>>);

    impl Node for Branch {
        fn label(&self) -> String {
            format!("branch ({})", self.0.len())
        }

        fn children(&self) -> Vec<&dyn Node> {
            self.0.iter().map(|c| &**c).collect()
        }
    }

    #[test]
    fn kind_identifies_concrete_type() {
        let leaf: Box<dyn Node> = Box::new(Leaf(1));
        assert_eq!(NodeKind::of::<Leaf>(), leaf.kind());
        assert_ne!(NodeKind::of::<Branch>(), leaf.kind());
        assert_eq!("Leaf", leaf.kind().short_name());
        assert_eq!("Leaf", leaf.label());
    }

    #[test]
    fn downcasting() {
        let leaf: Box<dyn Node> = Box::new(Leaf(7));
        assert!(leaf.is::<Leaf>());
        assert_eq!(7, leaf.downcast_ref::<Leaf>().unwrap().0);
        assert!(leaf.downcast_ref::<Branch>().is_none());

        let leaf = leaf.downcast::<Branch>().unwrap_err();
        assert_eq!(7, leaf.downcast::<Leaf>().unwrap().0);
    }

    #[test]
    fn walk_visits_depth_first() {
        let tree: Box<dyn Node> = Box::new(Branch(vec![
            Box::new(Leaf(1)),
            Box::new(Branch(vec![Box::new(Leaf(2))])),
        ]));
        let mut visited = Vec::new();
        tree.walk(&mut |depth, node| visited.push((depth, node.label())));
        assert_eq!(
            vec![
                (0, "branch (2)".to_string()),
                (1, "Leaf".to_string()),
                (1, "branch (1)".to_string()),
                (2, "Leaf".to_string()),
            ],
            visited
        );
    }
}
