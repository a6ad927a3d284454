//! `confval` CLI: query and edit JSON configuration from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Read a typed setting (stdin → stdout)
//! echo '{"server":{"port":8080}}' | confval get server.port --as u16
//!
//! # Parse numeric strings instead of rejecting them
//! confval -i app.json get limits.retries --as i32 --coerce
//!
//! # Inspect the shape of the document
//! confval -i app.json kind server
//! confval -i app.json keys server
//!
//! # Set a value, creating intermediate objects, and print the result
//! confval -i app.json set server.tls.enabled true
//!
//! # Build the document in a bump arena instead of on the heap
//! confval --arena -i app.json get server.host --as string
//! ```
//!
//! Paths are dot-separated keys. A segment made only of digits indexes an
//! array when the current node is an array. An empty path or `.` names the
//! root.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use confval_core::{
    from_json_in, to_json_pretty, Arena, FromValue, Global, Object, Strategy, Value,
};
use std::fmt::Display;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "confval",
    version,
    about = "Typed queries and edits on JSON configuration"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Input JSON file (reads from stdin if omitted)
    #[arg(short, long, global = true)]
    input: Option<String>,

    /// Build the document in a bump arena instead of on the heap
    #[arg(long, global = true)]
    arena: bool,

    /// Log debug events to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at PATH converted to a type
    Get {
        path: String,
        /// Target type of the conversion
        #[arg(long = "as", value_enum)]
        target: TargetType,
        /// Parse string values as numbers when the target is numeric
        #[arg(long)]
        coerce: bool,
    },
    /// Print the kind of the value at PATH
    Kind { path: String },
    /// Print the keys of the object at PATH, in document order
    Keys { path: String },
    /// Assign LITERAL at PATH, creating missing objects, and print the document
    Set {
        path: String,
        /// JSON literal; anything that does not parse as JSON is stored as a string
        literal: String,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TargetType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = read_input(cli.input.as_deref())?;

    if cli.arena {
        let arena = Arena::new();
        let root = from_json_in(&json, &arena).context("Failed to parse input JSON")?;
        run(root, cli.command)?;
        tracing::debug!(bytes = arena.allocated_bytes(), "arena released");
    } else {
        let root = from_json_in(&json, Global).context("Failed to parse input JSON")?;
        run(root, cli.command)?;
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run<A: Strategy>(mut root: Value<A>, command: Commands) -> Result<()> {
    match command {
        Commands::Get {
            path,
            target,
            coerce,
        } => {
            let node = resolve(&root, &path)?;
            let text = render(node, target, coerce)
                .with_context(|| format!("Failed to read '{}'", display_path(&path)))?;
            println!("{text}");
        }
        Commands::Kind { path } => {
            let node = resolve(&root, &path)?;
            println!("{}", node.kind());
        }
        Commands::Keys { path } => {
            let node = resolve(&root, &path)?;
            let object = node
                .get_ref::<Object<A>>()
                .with_context(|| format!("Cannot list keys of '{}'", display_path(&path)))?;
            for (key, _) in object.iter() {
                println!("{key}");
            }
        }
        Commands::Set {
            path,
            literal,
            output,
        } => {
            let parsed = match from_json_in(&literal, root.allocator().clone()) {
                Ok(value) => value,
                Err(_) => {
                    let mut text = Value::new_in(root.allocator().clone());
                    text.assign(literal.as_str());
                    text
                }
            };
            resolve_mut(&mut root, &path)?.assign(parsed);
            let mut rendered = to_json_pretty(&root).context("Failed to render document")?;
            rendered.push('\n');
            write_output(output.as_deref(), &rendered)?;
        }
    }
    Ok(())
}

/// Convert `node` to `target` and format it for printing.
fn render<A: Strategy>(
    node: &Value<A>,
    target: TargetType,
    coerce: bool,
) -> confval_core::Result<String> {
    match target {
        TargetType::Bool => convert::<bool, A>(node, coerce),
        TargetType::I8 => convert::<i8, A>(node, coerce),
        TargetType::I16 => convert::<i16, A>(node, coerce),
        TargetType::I32 => convert::<i32, A>(node, coerce),
        TargetType::I64 => convert::<i64, A>(node, coerce),
        TargetType::U8 => convert::<u8, A>(node, coerce),
        TargetType::U16 => convert::<u16, A>(node, coerce),
        TargetType::U32 => convert::<u32, A>(node, coerce),
        TargetType::U64 => convert::<u64, A>(node, coerce),
        TargetType::F32 => convert::<f32, A>(node, coerce),
        TargetType::F64 => convert::<f64, A>(node, coerce),
        TargetType::String => convert::<String, A>(node, coerce),
    }
}

fn convert<T, A>(node: &Value<A>, coerce: bool) -> confval_core::Result<String>
where
    T: FromValue<A> + Display,
    A: Strategy,
{
    let value: T = if coerce { node.coerce()? } else { node.get()? };
    Ok(value.to_string())
}

/// Split a dotted path into segments. `""` and `"."` are the root.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    let path = if path == "." { "" } else { path };
    path.split('.').filter(|segment| !segment.is_empty())
}

fn array_index(segment: &str) -> Option<usize> {
    if segment.bytes().all(|b| b.is_ascii_digit()) {
        segment.parse().ok()
    } else {
        None
    }
}

/// Walk `path` without modifying anything.
fn resolve<'v, A: Strategy>(root: &'v Value<A>, path: &str) -> Result<&'v Value<A>> {
    let mut node = root;
    for segment in segments(path) {
        node = match array_index(segment) {
            Some(index) if node.is_array() => node.at_index(index),
            _ => node.at(segment),
        }
        .with_context(|| {
            format!(
                "Cannot resolve '{}' at segment '{segment}'",
                display_path(path)
            )
        })?;
    }
    Ok(node)
}

/// Walk `path`, creating objects for missing keys. An array segment may name
/// an existing element or the slot one past the end, which appends.
fn resolve_mut<'v, A: Strategy>(
    root: &'v mut Value<A>,
    path: &str,
) -> Result<&'v mut Value<A>> {
    let mut node = root;
    for segment in segments(path) {
        node = match array_index(segment) {
            Some(index) if node.is_array() => {
                let len = node.as_array().len();
                if index == len {
                    node.push(None::<bool>)
                } else if index < len {
                    node.at_index_mut(index)?
                } else {
                    bail!(
                        "Cannot set '{}': index {index} is past the end of an array of length {len}",
                        display_path(path)
                    );
                }
            }
            _ => &mut node[segment],
        };
    }
    Ok(node)
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "."
    } else {
        path
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
