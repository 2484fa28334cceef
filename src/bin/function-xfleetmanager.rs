//! function-xfleetmanager CLI - run the fleet manager function against a request document
//!
//! Reads a RunFunctionRequest (JSON or YAML) from a file or stdin and prints the
//! response. Logs go to stderr so stdout carries only the response document.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use xfleetmanager::{
    FleetManagerFunction, FunctionConfig, FunctionRunner, Outcome, RunFunctionRequest,
    RunFunctionResponse,
};

const EXIT_FATAL: i32 = 1;
const EXIT_BAD_INPUT: i32 = 2;

#[derive(Parser)]
#[command(name = "function-xfleetmanager")]
#[command(version, about = "Composition function that synthesizes a fleet manager resource", long_about = None)]
struct Cli {
    /// Emit debug logs
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the function against a request document
    Run {
        /// Path to the request document, or '-' for stdin
        #[arg(short, long, default_value = "-")]
        request: PathBuf,

        /// Response document format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,

        /// Response TTL in seconds (overrides FUNCTION_RESPONSE_TTL_SECS)
        #[arg(long)]
        ttl_secs: Option<u64>,
    },

    /// Print a sample request document
    Example,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let code = match cli.command {
        Commands::Run {
            request,
            output,
            ttl_secs,
        } => match run(&request, output, ttl_secs) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                EXIT_BAD_INPUT
            }
        },
        Commands::Example => match print_example() {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                EXIT_BAD_INPUT
            }
        },
    };

    process::exit(code);
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(request: &Path, output: OutputFormat, ttl_secs: Option<u64>) -> Result<i32> {
    let req = read_request(request)?;

    let mut config = FunctionConfig::from_env();
    if let Some(secs) = ttl_secs {
        config = config.with_response_ttl(Duration::from_secs(secs));
    }

    let span = tracing::info_span!("function", function = "xfleetmanager");
    let function = FleetManagerFunction::new(span, config);
    let rsp = function.run_function(&req);

    print_response(&rsp, output)?;

    Ok(match rsp.outcome() {
        Outcome::Success => 0,
        Outcome::Fatal(_) | Outcome::Pending => EXIT_FATAL,
    })
}

fn read_request(path: &Path) -> Result<RunFunctionRequest> {
    if path.as_os_str() == "-" {
        let mut contents = String::new();
        io::stdin()
            .read_to_string(&mut contents)
            .context("Failed to read request from stdin")?;
        RunFunctionRequest::from_document(&contents).context("Failed to parse request from stdin")
    } else {
        RunFunctionRequest::load_from_file(path)
            .with_context(|| format!("Failed to load request {}", path.display()))
    }
}

fn print_response(rsp: &RunFunctionResponse, output: OutputFormat) -> Result<()> {
    let rendered = match output {
        OutputFormat::Json => serde_json::to_string_pretty(rsp)?,
        OutputFormat::Yaml => serde_yaml::to_string(rsp)?,
    };
    println!("{}", rendered);
    Ok(())
}

fn print_example() -> Result<()> {
    let example = json!({
        "meta": {"tag": "example"},
        "observed": {
            "composite": {
                "resource": {
                    "apiVersion": "example.crossplane.io/v1alpha1",
                    "kind": "XFleetManager",
                    "metadata": {"name": "prod-web"},
                    "spec": {
                        "parameters": {
                            "fleetName": "prod-web",
                            "region": "us-east-1",
                            "instanceCount": 5,
                            "environment": "prod",
                            "tags": {"team": "infra"}
                        }
                    }
                }
            }
        }
    });

    print!("{}", serde_yaml::to_string(&example)?);
    Ok(())
}
