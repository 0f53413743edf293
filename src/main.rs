use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use schema_to_tool::converter::{DEFAULT_INDENT, to_pretty_json};
use schema_to_tool::{SchemaConverter, ToolFormat};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-to-tool")]
#[command(
    version,
    about = "Convert JSON Schema to OpenAI/Anthropic tool definitions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Openai,
    Anthropic,
}

impl From<FormatArg> for ToolFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Openai => ToolFormat::OpenAi,
            FormatArg::Anthropic => ToolFormat::Anthropic,
        }
    }
}

#[derive(Args, Clone)]
struct ConvertArgs {
    /// Path to the JSON Schema file to convert
    schema_file: PathBuf,
    /// Output format for the tool definition
    #[arg(short, long, value_enum)]
    format: FormatArg,
    /// Output file path; prints to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// JSON indentation level
    #[arg(short, long, default_value_t = DEFAULT_INDENT)]
    indent: usize,
}

#[derive(Args, Clone)]
struct ValidateArgs {
    /// Path to the tool definition JSON file (single tool or array)
    tool_file: PathBuf,
    /// Format of the tool definition to validate
    #[arg(short, long, value_enum)]
    format: FormatArg,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a JSON Schema file to a tool definition
    Convert(ConvertArgs),
    /// Validate a tool definition file
    Validate(ValidateArgs),
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert(args) => run_convert(args),
        Commands::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_json(path: &Path, invalid: &'static str) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).context(invalid)
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let format = ToolFormat::from(args.format);
    let schema = read_json(&args.schema_file, "Invalid JSON in schema file")?;
    let converter = SchemaConverter::new(schema)?;
    let tool = converter.convert_to(format)?;
    let output = to_pretty_json(&tool, args.indent)?;

    match args.output {
        Some(path) => {
            fs::write(&path, &output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote tool definition");
            println!("Tool definition written to {}", path.display());
        }
        None => println!("{output}"),
    }
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<()> {
    let format = ToolFormat::from(args.format);
    let document = read_json(&args.tool_file, "Invalid JSON")?;

    let tools = match document {
        Value::Array(tools) => tools,
        tool => vec![tool],
    };
    debug!(count = tools.len(), format = %format, "validating tool definitions");

    let mut all_valid = true;
    for (index, tool) in tools.iter().enumerate() {
        let validation = format.validate(tool);
        let name = format
            .tool_name(tool)
            .map(str::to_string)
            .unwrap_or_else(|| format!("tool[{index}]"));

        if validation.is_valid() {
            println!("[OK] {name}: Valid {format} tool definition");
        } else {
            all_valid = false;
            println!("[ERROR] {name}: Invalid {format} tool definition");
            for error in &validation.errors {
                println!("  - {error}");
            }
        }
    }

    if all_valid {
        println!("\nAll tool definitions are valid.");
        Ok(())
    } else {
        eprintln!("\nSome tool definitions have errors.");
        process::exit(1);
    }
}
