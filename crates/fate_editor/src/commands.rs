use asset::{error_chain, LoaderContext, Node, NodeTypeRegistry};

pub fn render_types(registry: &dyn NodeTypeRegistry) -> String {
    let mut out = String::new();
    for node_type in registry.node_types() {
        out.push_str(&format!(
            "{:<12} {:<14} {:<16} {} bytes template\n",
            format!(".{}", node_type.extension()),
            node_type.resource_type().name(),
            node_type.kind(),
            node_type.resource_type().template_data().len()
        ));
    }
    out
}

pub fn render_tree(node: &dyn Node) -> String {
    let mut out = String::new();
    node.walk(&mut |depth, node| {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&node.label());
        out.push('\n');
    });
    out
}

/// Loads every path, reporting failures through the context's logger.
///
/// Returns false if any path failed to load.
pub fn load(context: &dyn LoaderContext, paths: &[String]) -> (String, bool) {
    let mut out = String::new();
    let mut ok = true;
    for path in paths {
        match context.load_node(path) {
            Ok(Some(node)) => {
                out.push_str(&format!("{}:\n", path));
                out.push_str(&render_tree(node.as_ref()));
            }
            Ok(None) => out.push_str(&format!("{}: not found\n", path)),
            Err(error) => {
                context.log_exception(&error);
                out.push_str(&format!("{}: {}\n", path, error_chain(&error)));
                ok = false;
            }
        }
    }
    (out, ok)
}

pub fn template(context: &dyn LoaderContext, extension: &str) -> anyhow::Result<Option<String>> {
    let node = context.load_node_from_template(extension)?;
    Ok(node.map(|node| render_tree(node.as_ref())))
}
