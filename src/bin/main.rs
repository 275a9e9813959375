//! Pack datagen CLI
//!
//! Generate Minecraft resource pack JSON from a manifest, flatten nested
//! language files, and preview multipart conditions.

use clap::{Parser, Subcommand};
use pack_datagen::{
    CompactJsonFormatter, Condition, FlattenedJson, JsonFormatter, Manifest, PrettyJsonFormatter,
};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pack-datagen")]
#[command(author, version, about = "Generate Minecraft resource pack JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every resource listed in a manifest
    Generate {
        /// Manifest JSON file
        #[arg(short, long)]
        manifest: PathBuf,

        /// Base directory of the generated pack
        #[arg(short, long)]
        output: PathBuf,

        /// Namespace to generate under (overrides the manifest)
        #[arg(short, long)]
        namespace: Option<String>,

        /// Write single-line JSON instead of pretty-printed JSON
        #[arg(long)]
        compact: bool,
    },

    /// Flatten a nested JSON object (e.g. a language file) into dotted keys
    Flatten {
        /// Nested JSON input file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Separator placed between nested keys
        #[arg(short, long, default_value = ".")]
        separator: String,

        /// Write single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the multipart "when" object for one or more conditions
    Condition {
        /// Conditions such as "north=true, east=side|up"
        #[arg(required = true)]
        conditions: Vec<String>,

        /// Combine the conditions with AND
        #[arg(long, conflicts_with = "any")]
        all: bool,

        /// Combine the conditions with OR
        #[arg(long)]
        any: bool,

        /// Block property to test the condition against (repeatable)
        #[arg(short, long = "property", value_name = "KEY=VALUE", value_parser = parse_property)]
        properties: Vec<(String, String)>,
    },
}

fn parse_property(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid property '{}': expected KEY=VALUE", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Invalid property '{}': missing name", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,pack_datagen=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            manifest,
            output,
            namespace,
            compact,
        } => {
            generate_from_manifest(&manifest, &output, namespace, compact)?;
        }
        Commands::Flatten {
            input,
            output,
            separator,
            compact,
        } => {
            flatten_file(&input, output.as_deref(), &separator, compact)?;
        }
        Commands::Condition {
            conditions,
            all,
            any,
            properties,
        } => {
            print_condition(&conditions, all, any, properties)?;
        }
    }

    Ok(())
}

fn formatter(compact: bool) -> Box<dyn JsonFormatter> {
    if compact {
        Box::new(CompactJsonFormatter)
    } else {
        Box::new(PrettyJsonFormatter)
    }
}

fn generate_from_manifest(
    manifest_path: &Path,
    output_path: &Path,
    namespace: Option<String>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut manifest = Manifest::load(manifest_path)?;
    if let Some(namespace) = namespace {
        manifest.namespace = namespace;
    }
    info!(
        "Loaded manifest {:?} with {} resources",
        manifest_path,
        manifest.resource_count()
    );

    let source_root = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    let mut generator = manifest.into_generator(output_path, source_root)?;
    if compact {
        generator = generator.with_formatter(CompactJsonFormatter);
    }

    let written = generator.generate()?;
    println!("Wrote {} files to {:?}", written, output_path);

    Ok(())
}

fn flatten_file(
    input_path: &Path,
    output_path: Option<&Path>,
    separator: &str,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let flat = FlattenedJson::from_file(input_path, "")?
        .with_separator(separator)
        .generate()?;
    let text = formatter(compact).format(&flat)?;

    match output_path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &text)?;
            info!("Flattened {:?} into {:?}", input_path, path);
        }
        None => print!("{}", text),
    }

    Ok(())
}

fn print_condition(
    conditions: &[String],
    all: bool,
    any: bool,
    properties: Vec<(String, String)>,
) -> Result<(), Box<dyn std::error::Error>> {
    let condition = if all {
        Condition::all(conditions)?
    } else if any {
        Condition::any(conditions)?
    } else if let [single] = conditions {
        Condition::parse(single)?
    } else {
        return Err("several conditions need --all or --any".into());
    };

    if properties.is_empty() {
        let text = PrettyJsonFormatter.format(&condition.to_json())?;
        print!("{}", text);
        return Ok(());
    }

    let properties: HashMap<String, String> = properties.into_iter().collect();
    if condition.matches(&properties) {
        println!("matches");
    } else {
        println!("does not match");
    }

    Ok(())
}
