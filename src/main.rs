use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use grblwire::{decode_to_writer, describe_alarm, describe_error, init_logging, FailurePolicy};
use grblwire_settings::{Config, OutputFormat};
use tokio::io::{AsyncBufRead, BufReader, BufWriter};

#[derive(Parser, Debug)]
#[command(name = "grblwire")]
#[command(version, long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
#[command(
    about = "Decode GRBL controller output into structured messages.",
    long_about = None,
    after_help = "Examples:\n  grblwire decode session.log --format text\n  cat /dev/ttyUSB0 | grblwire decode --on-failure forward\n  grblwire describe error 22"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode controller output, one message per line
    Decode {
        /// Input file; standard input when omitted
        input: Option<PathBuf>,

        /// Configuration file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format, overriding the configuration
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Handling of undecodable lines, overriding the configuration
        #[arg(long, value_enum)]
        on_failure: Option<PolicyArg>,
    },
    /// Print the description of an error or alarm code
    Describe {
        #[arg(value_enum)]
        kind: CodeKind,

        /// Numeric code as printed by the controller
        code: u8,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Json,
    JsonPretty,
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::JsonPretty => Self::JsonPretty,
            FormatArg::Text => Self::Text,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    Skip,
    Forward,
    Stop,
}

impl From<PolicyArg> for FailurePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Skip => Self::Skip,
            PolicyArg::Forward => Self::Forward,
            PolicyArg::Stop => Self::Stop,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CodeKind {
    Error,
    Alarm,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            input,
            config,
            format,
            on_failure,
        } => cmd_decode(input, config, format, on_failure).await,
        Commands::Describe { kind, code } => cmd_describe(kind, code),
    }
}

async fn cmd_decode(
    input: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: Option<FormatArg>,
    on_failure: Option<PolicyArg>,
) -> Result<()> {
    let mut config = Config::load_or_default(config_path.as_deref())
        .context("failed to load configuration")?;
    if let Some(format) = format {
        config.output.format = format.into();
    }
    if let Some(policy) = on_failure {
        config.stream.failure_policy = policy.into();
    }

    init_logging(&config.logging)?;
    tracing::debug!(
        version = grblwire::VERSION,
        build_date = grblwire::BUILD_DATE,
        failure_policy = %config.stream.failure_policy,
        output = %config.output.format,
        "starting decode"
    );

    let reader: Box<dyn AsyncBufRead + Unpin + Send> = match &input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let mut out = BufWriter::new(tokio::io::stdout());
    let stats = decode_to_writer(reader, &config, &mut out).await?;

    tracing::info!(
        lines = stats.lines,
        decoded = stats.decoded,
        failed = stats.failed,
        "decode finished"
    );
    Ok(())
}

fn cmd_describe(kind: CodeKind, code: u8) -> Result<()> {
    let (label, description) = match kind {
        CodeKind::Error => ("error", describe_error(code)),
        CodeKind::Alarm => ("ALARM", describe_alarm(code)),
    };

    match description {
        Some(description) => {
            println!("{}:{} {}", label, code, description);
            Ok(())
        }
        None => bail!("unknown {} code {}", label, code),
    }
}
