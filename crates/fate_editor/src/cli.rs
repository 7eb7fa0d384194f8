use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(name = "fate_editor", version, about = "Loads editor content and prints the resulting node trees")]
pub struct Cli {
    /// Configuration file, defaults to fate_editor.yaml when present
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Content root, overrides the configuration
    #[clap(short, long)]
    pub root: Option<PathBuf>,

    /// error, warn, info, debug or trace
    #[clap(long)]
    pub log_level: Option<String>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List registered node types
    Types,
    /// Load resources below the content root
    Load {
        #[clap(required = true)]
        paths: Vec<String>,
    },
    /// Load the template of a node type
    Template { extension: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_load() {
        let cli = Cli::try_parse_from([
            "fate_editor",
            "--root",
            "content",
            "load",
            "/main/level.collection",
            "/main/hero.go",
        ])
        .unwrap();
        assert_eq!(Some(PathBuf::from("content")), cli.root);
        assert_eq!(
            Command::Load {
                paths: vec!["/main/level.collection".to_string(), "/main/hero.go".to_string()]
            },
            cli.command
        );
    }

    #[test]
    fn load_needs_a_path() {
        assert!(Cli::try_parse_from(["fate_editor", "load"]).is_err());
    }

    #[test]
    fn parses_template() {
        let cli = Cli::try_parse_from(["fate_editor", "--log-level", "debug", "template", "go"]).unwrap();
        assert_eq!(Some("debug".to_string()), cli.log_level);
        assert_eq!(Command::Template { extension: "go".to_string() }, cli.command);
    }
}
