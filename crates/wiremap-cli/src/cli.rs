//! Command-line interface for the wiremap utility
//!
//! One verb per invocation around a load/dispatch/save cycle: the persisted
//! state is decoded before the verb runs and encoded back afterwards, for
//! read-only verbs too. Command-level failures (bad reference, lookup miss)
//! are user messages, not process errors: the invocation still saves and
//! exits successfully, matching the historical behavior the GUI front end
//! relies on.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

use crate::color::{colorize_draw, colorize_list, should_colorize, ColorChoice};
use wiremap::core::logging::init_logging;
use wiremap::ops;
use wiremap::render::{dot_source, draw, list_module, GraphvizRunner};
use wiremap::{ArchitectureStore, MoveDirection, StoreError};

/// Default persistence path, shared with the GUI front end
const DEFAULT_DATA_FILE: &str = "links_data.xml";

/// Default DOT output path; rendered images land beside it
const DEFAULT_DOT_FILE: &str = "graph.dot";

/// Wiremap - document and visualize module/port dataflow architectures
#[derive(Parser)]
#[command(name = "wiremap")]
#[command(about = "Manage links between module ports and export Graphviz diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Persistence file (defaults to WIREMAP_FILE or links_data.xml,
    /// shared with the GUI front end)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// When to use colors in output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a link from a source port to a destination port
    ///
    /// References use the form Module::Port[:Type]. A missing source type
    /// defaults to "unknown"; a missing destination port inherits the
    /// source port name.
    Add {
        /// Source reference (Module::Port[:Type])
        src: String,
        /// Destination reference (Module[::Port[:Type]])
        dst: String,
    },

    /// Remove an existing link between two ports
    Remove {
        /// Source reference (Module::Port)
        src: String,
        /// Destination reference (Module::Port)
        dst: String,
    },

    /// Edit a port's type and direction (in|out|none)
    #[command(alias = "ed")]
    Edit {
        /// Target reference (Module::Port)
        target: String,
        /// New type label
        #[arg(value_name = "TYPE")]
        ty: String,
        /// New direction token; unrecognized tokens mean none
        direction: String,
    },

    /// Move a port up in its module's list (changes order in list/draw)
    Mvu {
        /// Target reference (Module::Port)
        target: String,
    },

    /// Move a port down in its module's list
    Mvd {
        /// Target reference (Module::Port)
        target: String,
    },

    /// List all ports and details for a specific module
    List {
        /// Module name
        module: String,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print a text-based hierarchy diagram to the console
    Draw,

    /// Generate graph.dot and render graph.svg / graph.png (requires Graphviz)
    Dot {
        /// DOT output path; image artifacts are written beside it
        #[arg(short, long, default_value = DEFAULT_DOT_FILE)]
        output: PathBuf,
    },
}

/// One row of `list --json` output
#[derive(Serialize)]
struct PortRow<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    ty: &'a str,
    dir: &'a str,
    destination: Option<String>,
}

/// Main CLI application
pub struct WiremapApp {
    graphviz: GraphvizRunner,
}

impl WiremapApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self {
            graphviz: GraphvizRunner::new(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Initialize logging with CLI flags (environment variables take precedence)
        let log_level_str = std::env::var("WIREMAP_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("WIREMAP_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        let data_file = Self::resolve_data_file(cli.file.as_deref());

        if cli.verbose {
            eprintln!("Wiremap v{}", env!("CARGO_PKG_VERSION"));
            eprintln!("Data file: {}", data_file.display());
        }

        let mut store = wiremap::load(&data_file);
        self.dispatch(&cli.command, &mut store, cli.color);

        // The store is flushed after every verb, read-only ones included
        if let Err(e) = wiremap::save(&data_file, &store) {
            warn!(path = %data_file.display(), error = %e, "Failed to persist state");
        }

        Ok(())
    }

    /// Resolve the persistence path: flag, then WIREMAP_FILE, then default
    fn resolve_data_file(flag: Option<&std::path::Path>) -> PathBuf {
        flag.map(PathBuf::from)
            .or_else(|| std::env::var("WIREMAP_FILE").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    /// Execute one verb against the loaded store
    ///
    /// Outcome messages go to stdout; failures are reported the same way and
    /// deliberately do not become process errors.
    fn dispatch(&self, command: &Commands, store: &mut ArchitectureStore, color: ColorChoice) {
        match command {
            Commands::Add { src, dst } => match ops::add_link(store, src, dst) {
                Ok(summary) => {
                    if summary.inherited_port {
                        println!("Info: Dest port not specified, using '{}'", summary.dest_port);
                    }
                    println!(
                        "Linked: [{}::{}:{}] -> [{}::{}:{}]",
                        summary.src_module,
                        summary.src_port,
                        summary.src_type,
                        summary.dest_module,
                        summary.dest_port,
                        summary.dest_type
                    );
                }
                Err(e) => println!("Error: {}", e),
            },

            Commands::Remove { src, dst } => match ops::remove_link(store, src, dst) {
                Ok(()) => println!("Link removed."),
                Err(StoreError::LinkNotFound { .. }) => println!("Link not found."),
                Err(e) => println!("Error: {}", e),
            },

            Commands::Edit { target, ty, direction } => {
                match ops::edit_port(store, target, ty, direction) {
                    Ok(summary) => {
                        println!(
                            "Edited port [{}::{}]. New Type: {}, New Dir: {}",
                            summary.module, summary.port, summary.ty, summary.dir
                        );
                        println!("Note: To change destination for an 'out' port, use 'add' to relink.");
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }

            Commands::Mvu { target } => self.move_command(store, target, MoveDirection::Up),
            Commands::Mvd { target } => self.move_command(store, target, MoveDirection::Down),

            Commands::List { module, json } => {
                if *json {
                    match self.list_json(store, module) {
                        Ok(out) => println!("{}", out),
                        Err(e) => println!("Error: {}", e),
                    }
                } else {
                    match list_module(store, module) {
                        Ok(table) => {
                            if should_colorize(color) {
                                print!("{}", colorize_list(&table));
                            } else {
                                print!("{}", table);
                            }
                        }
                        Err(StoreError::ModuleNotFound { .. }) => println!("Module not found."),
                        Err(e) => println!("Error: {}", e),
                    }
                }
            }

            Commands::Draw => {
                let diagram = draw(store);
                if should_colorize(color) {
                    print!("{}", colorize_draw(&diagram));
                } else {
                    print!("{}", diagram);
                }
            }

            Commands::Dot { output } => self.dot_command(store, output),
        }
    }

    fn move_command(&self, store: &mut ArchitectureStore, target: &str, direction: MoveDirection) {
        match ops::move_port(store, target, direction) {
            Ok(()) => println!("Moved port '{}' {}.", target, direction),
            Err(e) => println!("Error: {}", e),
        }
    }

    fn list_json(&self, store: &ArchitectureStore, name: &str) -> Result<String, StoreError> {
        let module = store
            .module(name)
            .ok_or_else(|| StoreError::module_not_found(name))?;

        let rows: Vec<PortRow> = module
            .ports()
            .map(|p| PortRow {
                name: &p.name,
                ty: &p.ty,
                dir: p.dir.as_str(),
                destination: p.destination_label(),
            })
            .collect();

        let doc = serde_json::json!({
            "module": module.name.as_str(),
            "ports": rows,
        });
        serde_json::to_string_pretty(&doc)
            .map_err(|e| StoreError::render(format!("JSON encoding failed: {}", e)))
    }

    fn dot_command(&self, store: &ArchitectureStore, output: &PathBuf) {
        let source = dot_source(store);
        if let Err(e) = std::fs::write(output, &source) {
            println!("Error: Failed to write '{}': {}", output.display(), e);
            return;
        }

        for (format, outcome) in self.graphviz.render_all(output) {
            match outcome {
                Ok(path) => println!("Generated {} successfully.", path.display()),
                Err(e) => println!("Warning: {} render failed: {}", format.as_str(), e),
            }
        }
    }
}

impl Default for WiremapApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing_add_command() {
        let args = vec!["wiremap", "add", "Sensor::Out:int", "Proc::In"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Add { src, dst } => {
                assert_eq!(src, "Sensor::Out:int");
                assert_eq!(dst, "Proc::In");
            }
            _ => panic!("Expected Add command"),
        }
        assert!(cli.file.is_none());
        assert_eq!(cli.color, ColorChoice::Auto);
    }

    #[test]
    fn test_resolve_data_file_flag_wins() {
        let flag = PathBuf::from("/tmp/custom.xml");
        assert_eq!(
            WiremapApp::resolve_data_file(Some(flag.as_path())),
            PathBuf::from("/tmp/custom.xml")
        );
    }

    #[test]
    fn test_cli_parsing_edit_command() {
        let args = vec!["wiremap", "edit", "Sensor::Out", "int", "out"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Edit { target, ty, direction } => {
                assert_eq!(target, "Sensor::Out");
                assert_eq!(ty, "int");
                assert_eq!(direction, "out");
            }
            _ => panic!("Expected Edit command"),
        }
    }

    #[test]
    fn test_cli_parsing_edit_alias() {
        let args = vec!["wiremap", "ed", "Sensor::Out", "int", "in"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Commands::Edit { .. }));
    }

    #[test]
    fn test_cli_parsing_move_commands() {
        let cli = Cli::try_parse_from(vec!["wiremap", "mvu", "M::P"]).unwrap();
        assert!(matches!(cli.command, Commands::Mvu { .. }));

        let cli = Cli::try_parse_from(vec!["wiremap", "mvd", "M::P"]).unwrap();
        assert!(matches!(cli.command, Commands::Mvd { .. }));
    }

    #[test]
    fn test_cli_parsing_list_json() {
        let args = vec!["wiremap", "list", "Sensor", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::List { module, json } => {
                assert_eq!(module, "Sensor");
                assert!(json);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_cli_parsing_dot_default_output() {
        let cli = Cli::try_parse_from(vec!["wiremap", "dot"]).unwrap();
        match cli.command {
            Commands::Dot { output } => {
                assert_eq!(output, PathBuf::from(DEFAULT_DOT_FILE));
            }
            _ => panic!("Expected Dot command"),
        }
    }

    #[test]
    fn test_cli_parsing_file_flag() {
        let args = vec!["wiremap", "--file", "/tmp/other.xml", "draw"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/other.xml")));
    }

    #[test]
    fn test_cli_parsing_missing_args_rejected() {
        assert!(Cli::try_parse_from(vec!["wiremap", "add", "only-one"]).is_err());
        assert!(Cli::try_parse_from(vec!["wiremap", "edit", "M::P", "t"]).is_err());
        assert!(Cli::try_parse_from(vec!["wiremap", "list"]).is_err());
        assert!(Cli::try_parse_from(vec!["wiremap", "bogus-verb"]).is_err());
    }

    #[test]
    fn test_verbose_flag() {
        let cli = Cli::try_parse_from(vec!["wiremap", "--verbose", "draw"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_app_creation() {
        let _app = WiremapApp::new();
        let _app = WiremapApp::default();
    }

    #[test]
    fn test_dispatch_add_and_list_json() {
        let app = WiremapApp::new();
        let mut store = ArchitectureStore::new();

        app.dispatch(
            &Commands::Add {
                src: "Sensor::Out:int".to_string(),
                dst: "Proc::In".to_string(),
            },
            &mut store,
            ColorChoice::Never,
        );
        assert_eq!(store.module_count(), 2);

        let json = app.list_json(&store, "Sensor").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["module"], "Sensor");
        assert_eq!(parsed["ports"][0]["name"], "Out");
        assert_eq!(parsed["ports"][0]["type"], "int");
        assert_eq!(parsed["ports"][0]["dir"], "out");
        assert_eq!(parsed["ports"][0]["destination"], "Proc::In");
    }

    #[test]
    fn test_dispatch_failed_add_mutates_nothing() {
        let app = WiremapApp::new();
        let mut store = ArchitectureStore::new();

        app.dispatch(
            &Commands::Add {
                src: "NoPortHere".to_string(),
                dst: "Proc::In".to_string(),
            },
            &mut store,
            ColorChoice::Never,
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_json_missing_module() {
        let app = WiremapApp::new();
        let store = ArchitectureStore::new();
        assert!(app.list_json(&store, "Ghost").is_err());
    }
}
