use std::{io, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand, ValueEnum};
use felt_response_check::{
    felt_to_string, felts_to_string, parse_felt_array, string_to_felt, string_to_felts,
    FieldElement, Strategy,
};
use felt_response_check_cli::{
    is_inline_list, load_response, run_check, ConsoleReporter, FileReference, JsonReporter,
};
use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Checks a verifier response against a reference record
    Check {
        /// Inline felt list (`[0x0, 0x20, ...]`) or a file containing one.
        #[arg(short, long, value_name = "RESPONSE")]
        response: String,

        /// JSON reference record with `hashed_message` and `expected_address`.
        #[arg(long, value_name = "REFERENCE", default_value = "inputs.json")]
        reference: PathBuf,

        /// Layout of the public outputs in the payload.
        #[arg(long, value_enum, default_value_t = Layout::Paired)]
        strategy: Layout,

        /// Mismatches listed in the console report.
        #[arg(long, value_name = "COUNT", default_value_t = 5)]
        max_listed: usize,

        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,

        /// Fail on decode warnings.
        #[arg(long)]
        strict: bool,
    },

    /// Converts a felt, or an array of felts, to a short string
    Felt2str {
        #[arg(short, long, value_name = "INPUT")]
        input: String,

        /// Skip the first felt of an array, usually a length prefix.
        #[arg(short, long)]
        skip_first: bool,
    },

    /// Converts a string to a felt
    Str2felt {
        #[arg(short, long, value_name = "INPUT")]
        input: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Layout {
    /// Two limbs per byte, one of them zero.
    Paired,
    /// Address limb followed by one limb per byte.
    Flattened,
}

impl From<Layout> for Strategy {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Paired => Strategy::Paired,
            Layout::Flattened => Strategy::Flattened,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let Cli { cmd } = Cli::parse();

    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    tracing::debug!("executing command `{:?}`...", cmd);

    match cmd {
        Commands::Check {
            response,
            reference,
            strategy,
            max_listed,
            json,
            strict,
        } => {
            let response = load_response(&response).await?;
            let source = FileReference::new(reference);
            let strategy = Strategy::from(strategy);

            tracing::info!(
                "checking {} response elements with the `{:?}` layout...",
                response.elements().len(),
                strategy
            );

            let valid = if json {
                let mut reporter = JsonReporter::new(io::stdout().lock());

                run_check(&response, &source, strategy, strict, &mut reporter).await?
            } else {
                let mut reporter = ConsoleReporter::new(io::stdout().lock(), max_listed);

                run_check(&response, &source, strategy, strict, &mut reporter).await?
            };

            if !valid {
                tracing::error!("response does not match the reference.");

                return Ok(ExitCode::from(2));
            }

            tracing::info!("response matches the reference.");
        }

        Commands::Felt2str { input, skip_first } => {
            if is_inline_list(&input) {
                let mut felts = parse_felt_array(&input)?;

                if skip_first && !felts.is_empty() {
                    felts.remove(0);
                }

                let decoded = felts_to_string(&felts);

                if !decoded.skipped.is_empty() {
                    tracing::warn!("skipped non-ascii felts at {:?}.", decoded.skipped);
                }

                println!("{}", decoded.text);
            } else {
                let felt: FieldElement = input.parse()?;

                println!("{}", felt_to_string(&felt)?);
            }
        }

        Commands::Str2felt { input } => {
            match string_to_felt(&input) {
                Ok(felt) => {
                    println!("Decimal: {}", felt.to_decimal_string());
                    println!("Hex: {felt}");
                }
                Err(e) => tracing::warn!("input does not fit a single felt: {e}"),
            }

            let felts = string_to_felts(&input)?;
            let decimal: Vec<_> = felts.iter().map(|f| f.to_decimal_string()).collect();
            let hex: Vec<_> = felts.iter().map(|f| f.to_string()).collect();

            println!("\nAs felt array:");
            println!("Decimal: {decimal:?}");
            println!("Hex: {hex:?}");
        }
    }

    Ok(ExitCode::SUCCESS)
}
