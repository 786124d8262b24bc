use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use microflow_lib::MicroFlow;
use microflow_lib::constants::CHANNEL_COUNT;
use microflow_lib::spi::{DEFAULT_SPEED_HZ, SpidevTransport};
use std::process;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Talk to a MICROFLOW multi-channel pressure/flow controller over SPI.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The spidev node the controller is wired to.
    #[arg(short, long, default_value = "/dev/spidev0.0")]
    device: String,

    /// SPI clock rate in Hz.
    #[arg(long, default_value_t = DEFAULT_SPEED_HZ)]
    speed_hz: u32,

    /// Pause between sending a command and reading the reply, in
    /// milliseconds. The controller has no ready signal; this must
    /// cover its worst-case turnaround.
    #[arg(long, default_value_t = 10)]
    reply_pause_ms: u64,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Query the controller identity and check it against "MICROFLOW".
    Id,
    /// Set the target pressure of every channel, in millibar.
    Set {
        #[arg(num_args = CHANNEL_COUNT, value_name = "MBAR")]
        targets_mbar: Vec<f64>,
    },
    /// Read back the commanded target pressures.
    Targets,
    /// Read the measured pressures.
    Actual,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(cli.verbose.tracing_level_filter().into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let transport = SpidevTransport::open(&cli.device, cli.speed_hz)
        .with_context(|| format!("failed to open SPI device {}", cli.device))?;
    let mut controller = MicroFlow::new(transport, Duration::from_millis(cli.reply_pause_ms));

    let ok = match cli.command {
        Cmd::Id => {
            let identification = controller.get_id()?;
            println!("{identification}");
            identification.status_ok && identification.id_matches
        }
        Cmd::Set { targets_mbar } => {
            let targets: [f64; CHANNEL_COUNT] = targets_mbar
                .try_into()
                .map_err(|v: Vec<f64>| anyhow!("expected {CHANNEL_COUNT} targets, got {}", v.len()))?;
            let accepted = controller.set_pressure_targets(targets)?;
            println!("{}", if accepted { "accepted" } else { "rejected" });
            accepted
        }
        Cmd::Targets => {
            let report = controller.get_pressure_targets()?;
            println!("{report}");
            report.status_ok
        }
        Cmd::Actual => {
            let report = controller.get_pressure_actual()?;
            println!("{report}");
            report.status_ok
        }
    };

    if !ok {
        error!("controller reported an error status or an invalid reply");
        process::exit(1);
    }
    Ok(())
}
