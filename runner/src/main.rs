mod config;
mod events;
mod wallet;

use clap::Parser;
use tokio::sync::mpsc;

use arena::config::ConfigManager;
use arena::games::SessionRng;
use arena::games::snake::{EngineSettings, GameEngine};
use arena::log;
use arena::logger;
use arena::matches::{MatchCoordinator, MatchSettings, SimulatedOpponent, run_match};

use config::RunnerConfig;
use events::{EngineEventLog, MatchEventLog};
use wallet::Wallet;

#[derive(Parser)]
#[command(name = "arena_runner")]
struct Args {
    /// Path to the YAML config; missing file falls back to defaults.
    #[arg(long, default_value = "arena.yaml")]
    config: String,

    /// Table stake to play for; defaults to the configured table.
    #[arg(long)]
    stake: Option<f64>,

    /// Fixed session seed for reproducible matches.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config: RunnerConfig = ConfigManager::from_yaml_file(&args.config).get_config()?;

    let stake = args.stake.unwrap_or(config.wallet.default_stake);
    if !config.wallet.tables.contains(&stake) {
        return Err(format!(
            "No table plays for {:.2}; available tables: {:?}",
            stake, config.wallet.tables
        )
        .into());
    }

    let mut wallet = Wallet::new(config.wallet.starting_balance);
    wallet.debit(stake)?;

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Session seed: {}", rng.seed());

    let engine = GameEngine::new(&EngineSettings::from(&config.engine), EngineEventLog::default());
    let mut coordinator = MatchCoordinator::new(
        engine,
        SimulatedOpponent,
        MatchSettings::from(&config.matches),
        MatchEventLog,
        rng,
    );

    if !config.autopilot.enabled {
        log!("Autopilot disabled and no input source attached; expect a quiet match");
    }

    let (_commands_tx, mut commands_rx) = mpsc::unbounded_channel();

    match run_match(&mut coordinator, &mut commands_rx, stake, config.autopilot.enabled).await {
        Some(result) => {
            let payout = result.payout();
            if payout > 0.0 {
                wallet.credit(payout);
                log!("Ranking service notified of a {:.2} prize", payout);
            }
            log!("Final balance: {:.2}", wallet.balance());
        }
        None => {
            log!("Match abandoned, stake forfeited. Balance: {:.2}", wallet.balance());
        }
    }

    Ok(())
}
