//! Command-line interface for the javapuml utility
//!
//! Provides a CLI to turn a Java project tree into a PlantUML class diagram.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use javapuml::core::logging::init_logging;
use javapuml::plugins::plantuml::TypeClassifier;
use javapuml::plugins::Orchestrator;
use javapuml::{CompilationUnit, GeneratorConfig, TypeDeclaration, DEFAULT_OUTPUT_PATH};

/// javapuml - Generate PlantUML class diagrams from Java sources
#[derive(Parser)]
#[command(name = "javapuml")]
#[command(about = "A Rust utility to generate PlantUML class diagrams from Java source trees")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
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
    /// Generate a class diagram for a project tree
    Generate {
        /// Project root containing the source sub-directories
        root: PathBuf,

        /// Output file for the diagram (use - for stdout)
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        output: PathBuf,

        /// Sub-directory to scan, relative to the root (repeatable)
        #[arg(long = "subdir", value_name = "DIR")]
        subdirs: Vec<PathBuf>,

        /// Extra type name that never produces an association (repeatable)
        #[arg(long = "ignore", value_name = "TYPE")]
        ignore: Vec<String>,
    },

    /// Print the declarations parsed from one Java file
    Inspect {
        /// Input Java file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List the type names that never produce associations
    Ignored {
        /// Extra type name to include in the listing (repeatable)
        #[arg(long = "ignore", value_name = "TYPE")]
        ignore: Vec<String>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Main CLI application
#[derive(Default)]
pub struct JavapumlApp;

impl JavapumlApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI defaults
        let log_level_str = std::env::var(javapuml::LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());

        let log_format_str = std::env::var(javapuml::LOG_FORMAT_ENV)
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level_str), Some(&log_format_str)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("javapuml v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Generate {
                root,
                output,
                subdirs,
                ignore,
            } => self.generate_command(&root, output, subdirs, ignore, cli.verbose),
            Commands::Inspect { input, json } => self.inspect_command(input, json, cli.verbose),
            Commands::Ignored { ignore, json } => self.ignored_command(ignore, json),
        }
    }

    /// Handle the generate command
    fn generate_command(
        &self,
        root: &Path,
        output: PathBuf,
        subdirs: Vec<PathBuf>,
        ignore: Vec<String>,
        verbose: bool,
    ) -> Result<()> {
        let config = GeneratorConfig::new()
            .with_source_roots(subdirs)
            .with_extra_ignored(ignore)
            .with_output_path(output);
        debug!(?config, "Generating diagram");

        if verbose {
            for sub_path in &config.source_roots {
                eprintln!("Scanning {}", root.join(sub_path).display());
            }
        }

        let orchestrator = Orchestrator::with_config(config);

        if is_stdio(&orchestrator.config().output_path) {
            let document = orchestrator.generate_project(root)?;
            return self.write_stdout(&document);
        }

        let path = orchestrator.write_project(root)?;
        println!("PlantUML code has been written to: {}", path.display());
        Ok(())
    }

    /// Handle the inspect command
    fn inspect_command(&self, input: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let unit = javapuml::parse(&content)?;
        let rendered = if json {
            serde_json::to_string_pretty(&unit)?
        } else {
            describe_unit(&unit)
        };
        self.write_stdout(&rendered)
    }

    /// Handle the ignored command
    fn ignored_command(&self, extra: Vec<String>, json: bool) -> Result<()> {
        let classifier = TypeClassifier::with_extra(extra);
        let names: Vec<&str> = classifier.ignored_names().collect();

        if json {
            let listing = serde_json::json!({
                "ignored_types": names,
                "total": names.len(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Ignored types:");
            for name in &names {
                println!("  {}", name);
            }
            println!();
            println!("Total: {} type names", names.len());
        }
        Ok(())
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if !is_stdio(&path) => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to stdout
    ///
    /// Files are written by the orchestrator; this is the `-` path.
    pub fn write_stdout(&self, content: &str) -> Result<()> {
        print!("{}", line_terminated(content));
        io::stdout().flush()?;
        Ok(())
    }
}

fn line_terminated(content: &str) -> String {
    if content.is_empty() || content.ends_with('\n') {
        content.to_string()
    } else {
        format!("{}\n", content)
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Human-readable outline of a parsed compilation unit
pub fn describe_unit(unit: &CompilationUnit) -> String {
    let mut out = String::new();
    if let Some(package) = &unit.package {
        let _ = writeln!(out, "package {}", package);
    }
    for import in &unit.imports {
        let _ = writeln!(out, "import {}", import);
    }
    for declaration in &unit.types {
        describe_declaration(&mut out, declaration, 0);
    }
    out
}

fn describe_declaration(out: &mut String, declaration: &TypeDeclaration, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{}{} {}", indent, declaration.kind, declaration.name);
    if !declaration.extends.is_empty() {
        let _ = write!(out, " extends {}", declaration.extends.join(", "));
    }
    if !declaration.implements.is_empty() {
        let _ = write!(out, " implements {}", declaration.implements.join(", "));
    }
    out.push('\n');

    for field in &declaration.fields {
        let _ = writeln!(out, "{}  field {}: {}", indent, field.name, field.ty.text);
    }
    for method in &declaration.methods {
        let tag = if method.is_static { "static " } else { "" };
        let _ = writeln!(out, "{}  method {}{}", indent, tag, method.signature());
    }
    for nested in &declaration.nested {
        describe_declaration(out, nested, depth + 1);
    }
}
