use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use calltag_engine::{CallRegistry, RenderConfig, RendererRegistry, load_data_context, parse_node_file};
use calltag_types::Value;
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "calltag", version, about = "Render declarative call nodes against a data context")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a node document and print the result as JSON
    Render {
        /// Path to the node document (YAML or JSON)
        #[arg(long, short = 'n')]
        node: PathBuf,
        /// Path to the data context (YAML or JSON); defaults to null
        #[arg(long, short = 'd')]
        data: Option<PathBuf>,
        /// Path to a render config file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
        /// Fail when an argument data path does not resolve
        #[arg(long)]
        strict: bool,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List the registered static targets and methods
    Targets,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let registry = Arc::new(CallRegistry::with_builtins());

    match cli.command {
        Command::Render {
            node,
            data,
            config,
            strict,
            pretty,
        } => {
            let config = load_config(config, strict)?;
            let output = render_node(registry, config, &node, data.as_deref())?;
            println!("{}", format_output(&output, pretty)?);
        }
        Command::Targets => {
            for name in registry.static_names() {
                println!("static  {name}");
            }
            for name in registry.method_names() {
                println!("method  {name}");
            }
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<PathBuf>, strict: bool) -> Result<RenderConfig> {
    let config = match path {
        Some(path) => RenderConfig::from_file(&path)?,
        None => RenderConfig::default(),
    };
    let mut config = config.with_env_overrides();
    if strict {
        config.strict_arguments = true;
    }
    debug!(?config, "render config loaded");
    Ok(config)
}

fn render_node(registry: Arc<CallRegistry>, config: RenderConfig, node_path: &Path, data_path: Option<&Path>) -> Result<Value> {
    let node = parse_node_file(node_path)?;
    let context = match data_path {
        Some(path) => load_data_context(path)?,
        None => Value::Null,
    };
    let renderers = RendererRegistry::with_call_renderer(registry, config);
    renderers
        .render(&node, &context)
        .with_context(|| format!("failed to render node '{}' from {}", node.name, node_path.display()))
}

fn format_output(value: &Value, pretty: bool) -> Result<String> {
    let formatted = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(formatted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn renders_node_and_data_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let node_path = temp_dir.path().join("node.yaml");
        let data_path = temp_dir.path().join("data.json");
        fs::write(&node_path, "name: call\nattributes:\n  data: logger\n  method: getName\n").unwrap();
        fs::write(&data_path, r#"{"logger": {"name": "svc"}}"#).unwrap();

        let output = render_node(
            Arc::new(CallRegistry::with_builtins()),
            RenderConfig::default(),
            &node_path,
            Some(data_path.as_path()),
        )
        .expect("render");
        assert_eq!(format_output(&output, false).unwrap(), r#""svc""#);
    }

    #[test]
    fn render_failures_carry_the_node_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let node_path = temp_dir.path().join("node.yaml");
        fs::write(&node_path, "name: call\nattributes:\n  data: logger\n  method: getName\n").unwrap();

        let error = render_node(Arc::new(CallRegistry::with_builtins()), RenderConfig::default(), &node_path, None).unwrap_err();
        assert!(error.to_string().contains("node.yaml"), "{error}");
    }

    #[test]
    fn strict_flag_overrides_config() {
        let config = load_config(None, true).expect("config");
        assert!(config.strict_arguments);
    }

    #[test]
    fn cli_parses_render_arguments() {
        let cli = Cli::try_parse_from(["calltag", "render", "--node", "n.yaml", "--strict", "--pretty"]).expect("parse");
        match cli.command {
            Command::Render { node, strict, pretty, data, .. } => {
                assert_eq!(node, PathBuf::from("n.yaml"));
                assert!(strict && pretty);
                assert!(data.is_none());
            }
            Command::Targets => panic!("expected render"),
        }
    }
}
