//! Command-line entry point for the OTC settlement solver.
//!
//! Wires the configured wallet, token registry and venue adapter together,
//! reads a swap order from JSON and prints the settlement plan. Executing
//! the plan is left to the surrounding submission flow.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use solver_account::implementations::local::LocalWallet;
use solver_config::{ConfigLoader, SolverConfig};
use solver_order::implementations::venues::bebop::BebopVenue;
use solver_order::nonce::RandomNonce;
use solver_order::{OrderService, SettlementContext, VenueAdapter};
use solver_types::{Address, SwapOrder, TokenRegistry, U256, NATIVE_TOKEN};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Name under which the Bebop adapter is registered.
const BEBOP_VENUE: &str = "bebop";

#[derive(Parser)]
#[command(name = "otc-solver")]
#[command(about = "Builds signed settlement call batches for OTC swap orders", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[arg(short, long, value_name = "FILE", default_value = "config/local.toml")]
	config: PathBuf,

	#[arg(long, env = "SOLVER_LOG_LEVEL", default_value = "info")]
	log_level: String,
}

#[derive(Subcommand)]
enum Commands {
	/// Build the settlement plan for a swap order
	Build {
		/// Path to the swap order JSON
		#[arg(short, long, value_name = "FILE")]
		order: PathBuf,
		/// Taker address whose sell-side tokens the venue pulls
		#[arg(long)]
		taker: Address,
		/// Optional receiver override for settlement proceeds
		#[arg(long)]
		receiver: Option<Address>,
	},
	/// Validate the configuration file
	Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_tracing(&cli.log_level)?;

	match cli.command {
		Commands::Build {
			order,
			taker,
			receiver,
		} => build(&cli.config, &order, taker, receiver).await,
		Commands::Validate => validate(&cli.config).await,
	}
}

async fn build(
	config_path: &Path,
	order_path: &Path,
	taker: Address,
	receiver: Option<Address>,
) -> Result<()> {
	let config = load_config(config_path).await?;

	let maker = Arc::new(
		LocalWallet::new(&config.account.private_key).context("Failed to create maker wallet")?,
	);
	let service = order_service(&config)?;

	let content = tokio::fs::read_to_string(order_path)
		.await
		.with_context(|| format!("Failed to read order from {:?}", order_path))?;
	let order: SwapOrder = serde_json::from_str(&content).context("Failed to parse swap order")?;

	let ctx = SettlementContext {
		taker,
		maker,
		receiver,
	};
	let plan = service.build_settlement(BEBOP_VENUE, &order, &ctx).await?;

	info!(
		maker_approvals = plan.maker_approvals.len(),
		calls = plan.calls.len(),
		"Settlement plan built"
	);
	println!("{}", serde_json::to_string_pretty(&plan)?);

	Ok(())
}

async fn validate(config_path: &Path) -> Result<()> {
	let config = load_config(config_path).await?;

	// Wiring is part of validation: a config that parses but cannot
	// produce a venue or wallet is still unusable.
	LocalWallet::new(&config.account.private_key).context("Failed to create maker wallet")?;
	order_service(&config)?;

	info!("Configuration is valid");
	Ok(())
}

async fn load_config(config_path: &Path) -> Result<SolverConfig> {
	info!("Loading configuration from: {:?}", config_path);

	let config = ConfigLoader::new()
		.with_file(config_path)
		.load()
		.await
		.context("Failed to load configuration")?;

	info!("Solver name: {}", config.solver.name);
	Ok(config)
}

fn order_service(config: &SolverConfig) -> Result<OrderService> {
	let settlement_address: Address = config
		.venue
		.settlement_address
		.parse()
		.context("Invalid settlement address")?;

	let native_sentinel = match &config.tokens.native_sentinel {
		Some(sentinel) => sentinel.parse().context("Invalid native sentinel")?,
		None => NATIVE_TOKEN,
	};
	let wrapped_native = config
		.tokens
		.wrapped_native
		.as_ref()
		.map(|wrapped| wrapped.parse::<Address>())
		.transpose()
		.context("Invalid wrapped native address")?;
	let registry = TokenRegistry::new(native_sentinel, wrapped_native);

	let domain = alloy_sol_types::Eip712Domain::new(
		Some(config.venue.domain_name.clone().into()),
		Some(config.venue.domain_version.clone().into()),
		Some(U256::from(config.venue.chain_id)),
		Some(settlement_address),
		None,
	);

	let venue = BebopVenue::with_parameters(
		settlement_address,
		domain,
		registry,
		config.venue.solver_excess,
		Duration::from_secs(config.venue.order_ttl_seconds),
		Box::new(RandomNonce),
	);

	let mut venues: HashMap<String, Box<dyn VenueAdapter>> = HashMap::new();
	venues.insert(BEBOP_VENUE.to_string(), Box::new(venue));

	Ok(OrderService::new(venues))
}

fn setup_tracing(log_level: &str) -> Result<()> {
	let filter = EnvFilter::try_new(log_level).context("Invalid log level")?;
	tracing_subscriber::fmt().with_env_filter(filter).init();
	Ok(())
}
