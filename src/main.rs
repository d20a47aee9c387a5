// Fleet command - entry point
use clap::Parser;
use fleet_command::operations::shutdown;
use fleet_command::{o_error, o_info, o_summary};
use fleet_command::{Admiral, FleetCommandConfig, OutputBroker, SpaceTradersClient, SystemClock};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "fleet_command", about = "Autonomous SpaceTraders fleet command loop")]
struct Cli {
    /// Configuration file, created with defaults when missing
    #[arg(long, default_value = "fleet.toml")]
    config: String,

    /// Raise verbosity (-v info, -vv debug and trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only errors and summaries
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (config, created) = FleetCommandConfig::load_or_create(&cli.config)?;
    config.validate()?;

    let verbosity = if cli.quiet {
        0
    } else {
        config.output.verbosity.saturating_add(cli.verbose)
    };
    let broker = OutputBroker::new(verbosity, Duration::from_secs(config.output.summary_interval_seconds));
    let log = broker.logger("🖥️ TERMINAL");

    if created {
        o_info!(log, "📋 Created default configuration at {}", cli.config);
    } else {
        o_info!(log, "📋 Loaded configuration from {}", cli.config);
    }
    config.print_summary(&log);

    let token = config.read_token()?;
    let client = SpaceTradersClient::from_config(&config.api, &token, broker.logger("🌐 API"))?;

    let (handle, signal) = shutdown::channel();
    let ctrl_c_log = log.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            o_info!(ctrl_c_log, "🛑 Ctrl+C received, letting in-flight actions finish...");
            if let Some(report) = handle.shutdown().await {
                o_info!(ctrl_c_log, "✅ Drain acknowledged: {} ships home", report.reported + report.parked);
            }
        }
    });

    let admiral = Admiral::new(config, Arc::new(client), Arc::new(SystemClock), broker.clone());
    let outcome = admiral.run(signal).await;

    match outcome {
        Ok(report) => {
            o_summary!(log, "🎖️ Fleet stood down ({} reported, {} parked, {} lost)", report.reported, report.parked, report.failed);
            broker.flush().await;
            Ok(())
        }
        Err(e) => {
            o_error!(log, "❌ Fatal: {}", e);
            broker.flush().await;
            Err(e.into())
        }
    }
}
