mod cli;
mod commands;
mod config;

use std::{process::ExitCode, sync::Arc};

use anyhow::Result;
use asset::{ContentLoader, LogLogger, LoaderContext, NodeTypes};
use clap::Parser;
use resource::ContentRoot;

use crate::{
    cli::{Cli, Command},
    config::Config,
};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?.with_overrides(cli.root, cli.log_level);

    env_logger::Builder::new()
        .filter_level(config.level_filter()?)
        .parse_env("RUST_LOG")
        .init();
    log::debug!("content root {}", config.content_root().display());

    let mut registry = NodeTypes::new();
    scene::register_node_types(&mut registry);
    let context = ContentLoader::new(
        Arc::new(ContentRoot::new(config.content_root())),
        Arc::new(registry),
        Arc::new(LogLogger),
    );

    match cli.command {
        Command::Types => print!("{}", commands::render_types(context.node_type_registry())),
        Command::Load { paths } => {
            let (out, ok) = commands::load(&context, &paths);
            print!("{}", out);
            if !ok {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Template { extension } => match commands::template(&context, &extension)? {
            Some(tree) => print!("{}", tree),
            None => {
                log::error!("no node type registered for .{}", extension);
                return Ok(ExitCode::FAILURE);
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}
