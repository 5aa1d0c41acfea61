//! Command-line front end for the courier order lifecycle.
//!
//! This binary stands in for the marketplace's UI surfaces: every
//! subcommand maps to one lifecycle operation and goes through the same
//! `LifecycleService` facade the screens would call. State lives in the
//! storage backend named by the configuration file, so a sequence of
//! invocations against the file backend walks a real order through its
//! lifecycle.

use clap::{Parser, Subcommand, ValueEnum};
use courier_config::Config;
use courier_core::{EventBus, LifecycleService};
use courier_storage::{OrderStore, StorageService};
use courier_types::{ActorRole, Order, OrderStatus};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Command-line arguments for the courier service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

/// Actor role for commands that are not runner-specific.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
	Student,
	Runner,
	Admin,
}

impl From<RoleArg> for ActorRole {
	fn from(role: RoleArg) -> Self {
		match role {
			RoleArg::Student => ActorRole::Student,
			RoleArg::Runner => ActorRole::Runner,
			RoleArg::Admin => ActorRole::Admin,
		}
	}
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Place a new order for a student
	Create {
		/// Id of the ordering student
		#[arg(long)]
		student: String,
	},
	/// Claim a pending order as a runner
	Accept {
		#[arg(long)]
		order: String,
		#[arg(long)]
		runner: String,
	},
	/// Start shopping for a claimed order
	StartShopping {
		#[arg(long)]
		order: String,
		#[arg(long)]
		runner: String,
	},
	/// Start delivering a shopped order
	StartDelivery {
		#[arg(long)]
		order: String,
		#[arg(long)]
		runner: String,
	},
	/// Mark an order as delivered
	Complete {
		#[arg(long)]
		order: String,
		#[arg(long)]
		runner: String,
	},
	/// Cancel an order, giving a reason
	Cancel {
		#[arg(long)]
		order: String,
		#[arg(long, value_enum)]
		role: RoleArg,
		#[arg(long)]
		actor: String,
		#[arg(long)]
		reason: String,
	},
	/// Show an order and what the given actor may do with it
	Show {
		#[arg(long)]
		order: String,
		#[arg(long, value_enum)]
		role: RoleArg,
		#[arg(long)]
		actor: String,
	},
}

/// Current wall-clock time in Unix seconds.
fn unix_now() -> Result<u64, Box<dyn std::error::Error>> {
	Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

/// Builds the lifecycle service on the storage backend named in config.
fn build_service(config: &Config) -> Result<LifecycleService, Box<dyn std::error::Error>> {
	let factory = courier_storage::get_all_implementations()
		.into_iter()
		.find(|(name, _)| *name == config.storage.primary)
		.map(|(_, factory)| factory)
		.ok_or_else(|| format!("unknown storage backend '{}'", config.storage.primary))?;

	let backend = factory(config.primary_storage())?;
	let storage = Arc::new(StorageService::new(backend));
	let store = Arc::new(OrderStore::new(storage));
	Ok(LifecycleService::new(store, EventBus::default()))
}

fn print_order(order: &Order) -> Result<(), Box<dyn std::error::Error>> {
	println!("{}", serde_json::to_string_pretty(order)?);
	Ok(())
}

/// Main entry point for the courier service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Builds the lifecycle service over the configured storage backend
/// 5. Executes the requested lifecycle operation
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	let config = Config::from_file_async(
		args.config
			.to_str()
			.ok_or("configuration path is not valid UTF-8")?,
	)
	.await?;
	tracing::info!("Loaded configuration [{}]", config.service.id);

	let service = build_service(&config)?;
	let now = unix_now()?;

	match args.command {
		Command::Create { student } => {
			let order = service.create_order(&student, now).await?;
			print_order(&order)?;
		}
		Command::Accept { order, runner } => {
			let updated = service
				.transition(&order, ActorRole::Runner, &runner, OrderStatus::Accepted, now, None)
				.await?;
			print_order(&updated)?;
		}
		Command::StartShopping { order, runner } => {
			let updated = service
				.transition(&order, ActorRole::Runner, &runner, OrderStatus::Shopping, now, None)
				.await?;
			print_order(&updated)?;
		}
		Command::StartDelivery { order, runner } => {
			let updated = service
				.transition(
					&order,
					ActorRole::Runner,
					&runner,
					OrderStatus::Delivering,
					now,
					None,
				)
				.await?;
			print_order(&updated)?;
		}
		Command::Complete { order, runner } => {
			let updated = service
				.transition(
					&order,
					ActorRole::Runner,
					&runner,
					OrderStatus::Completed,
					now,
					None,
				)
				.await?;
			print_order(&updated)?;
		}
		Command::Cancel {
			order,
			role,
			actor,
			reason,
		} => {
			let updated = service
				.transition(
					&order,
					role.into(),
					&actor,
					OrderStatus::Cancelled,
					now,
					Some(&reason),
				)
				.await?;
			print_order(&updated)?;
		}
		Command::Show { order, role, actor } => {
			let (order, view) = service.view(&order, role.into(), &actor, now).await?;
			print_order(&order)?;
			println!("{}", serde_json::to_string_pretty(&view)?);
		}
	}

	Ok(())
}
