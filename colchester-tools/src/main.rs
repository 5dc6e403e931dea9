//! colchester-tools
//!
//! Parse, build and inspect Colchestercoin payment request URIs from the shell.

use std::{fmt, fs, path::Path, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colchester_params::{AddressValidator, Network};
use colchester_uri::{decimal_to_units, units_to_decimal, PaymentRequestBuilder, UriConfig};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "colchester-tools",
    about = "Utility commands for Colchestercoin payment request URIs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a payment URI.
    Parse(ParseArgs),
    /// Build a canonical payment URI.
    Build(BuildArgs),
    /// Convert between decimal coin amounts and smallest units.
    Amount(AmountArgs),
}

/// Network selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum NetworkArg {
    /// Production network.
    Mainnet,
    /// Test network.
    Testnet,
    /// Accept a checksum-valid address from any network.
    Any,
}

impl NetworkArg {
    fn network(self) -> Option<Network> {
        match self {
            Self::Mainnet => Some(Network::Mainnet),
            Self::Testnet => Some(Network::Testnet),
            Self::Any => None,
        }
    }
}

#[derive(Args)]
struct ParseArgs {
    /// The URI to parse.
    uri: String,
    /// JSON parser configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Network the address must belong to (overrides the config file).
    #[arg(long, value_enum)]
    network: Option<NetworkArg>,
    /// Reject the non-canonical `colchestercoin://` form.
    #[arg(long)]
    strict: bool,
    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct BuildArgs {
    /// Payee address.
    #[arg(long)]
    address: String,
    /// Amount in coins, e.g. 12.34.
    #[arg(long)]
    amount: Option<String>,
    /// Label for the payee.
    #[arg(long)]
    label: Option<String>,
    /// Message describing the payment.
    #[arg(long)]
    message: Option<String>,
    /// Network the address must belong to.
    #[arg(long, value_enum, default_value_t = NetworkArg::Mainnet)]
    network: NetworkArg,
}

#[derive(Args)]
struct AmountArgs {
    /// Decimal amount in coins.
    #[arg(conflicts_with = "units")]
    value: Option<String>,
    /// Amount in smallest units, printed back as decimal coins.
    #[arg(long)]
    units: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "colchester_tools=info,colchester_uri=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Parse(args) => parse(args),
        Commands::Build(args) => build(args),
        Commands::Amount(args) => amount(args),
    }
}

fn parse(args: ParseArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    tracing::debug!(?config, "parsing payment URI");

    let request = config
        .parse(&args.uri)
        .with_context(|| format!("failed to parse {}", args.uri))?;

    let summary = RequestSummary {
        network: config.network.map(|network| network.to_string()),
        canonical_uri: request.to_uri(),
        request,
    };
    output_summary(&summary, args.json)
}

fn build(args: BuildArgs) -> Result<()> {
    let config = UriConfig {
        network: args.network.network(),
        strict: false,
    };
    let validator = config.validator();

    let mut builder = PaymentRequestBuilder::new(args.address);
    if let Some(amount) = &args.amount {
        let units = decimal_to_units(amount, validator.max_supply_units())
            .with_context(|| format!("invalid amount {}", amount))?;
        builder = builder.amount(units);
    }
    if let Some(label) = args.label {
        builder = builder.label(label);
    }
    if let Some(message) = args.message {
        builder = builder.message(message);
    }

    let request = builder.build(validator).context("invalid payment request")?;
    println!("{}", request.to_uri());
    Ok(())
}

fn amount(args: AmountArgs) -> Result<()> {
    match (args.value, args.units) {
        (Some(value), None) => {
            let units = decimal_to_units(&value, colchester_params::MAX_SUPPLY_UNITS)
                .with_context(|| format!("invalid amount {}", value))?;
            println!("{}", units);
        }
        (None, Some(units)) => println!("{}", units_to_decimal(units)),
        _ => bail!("pass either a decimal amount or --units"),
    }
    Ok(())
}

/// Config file first, then command-line overrides.
fn resolve_config(args: &ParseArgs) -> Result<UriConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => UriConfig::default(),
    };
    if let Some(network) = args.network {
        config.network = network.network();
    }
    if args.strict {
        config.strict = true;
    }
    Ok(config)
}

fn load_config(path: &Path) -> Result<UriConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn output_summary<T>(summary: &T, json: bool) -> Result<()>
where
    T: Serialize + fmt::Display,
{
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!("{}", summary);
    }
    Ok(())
}

#[derive(Serialize)]
struct RequestSummary {
    network: Option<String>,
    canonical_uri: String,
    request: colchester_uri::PaymentRequest,
}

impl fmt::Display for RequestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "network: {}", self.network.as_deref().unwrap_or("any"))?;
        writeln!(f, "address: {}", self.request.address())?;
        if let Some(units) = self.request.amount() {
            writeln!(f, "amount: {} ({} units)", units_to_decimal(units), units)?;
        }
        if let Some(label) = self.request.label() {
            writeln!(f, "label: {}", label)?;
        }
        if let Some(message) = self.request.message() {
            writeln!(f, "message: {}", message)?;
        }
        for (name, value) in self.request.extensions().iter() {
            writeln!(f, "{}: {}", name, value)?;
        }
        write!(f, "canonical: {}", self.canonical_uri)
    }
}
