use std::net::{IpAddr, SocketAddr};
use std::process::ExitCode;
use std::thread;

use anyhow::Context;
use clap::{Parser, Subcommand};

use dmxwatch_core::{
    ARTNET_PORT, ArtNetPacket, DisplayFilter, Monitor, PacketRecord, PacketSource, UdpSource,
    parse_packet, run_receiver,
};

mod ui;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("DMXWATCH_BUILD_COMMIT"),
    " ",
    env!("DMXWATCH_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "dmxwatch")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Live terminal monitor for Art-Net DMX-512 and timecode.",
    long_about = None,
    after_help = "Examples:\n  dmxwatch watch\n  dmxwatch watch --universe 3\n  dmxwatch log --limit 100"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the live channel grid in the terminal.
    #[command(
        after_help = "Keys:\n  a        show all universes\n  0-9 ⏎    show a specific universe\n  q        quit"
    )]
    Watch {
        /// Interface address to listen on
        #[arg(long, default_value = "0.0.0.0")]
        listen: IpAddr,

        /// UDP port to bind
        #[arg(long, default_value_t = ARTNET_PORT)]
        port: u16,

        /// Show only this universe (default: all)
        #[arg(short = 'u', long)]
        universe: Option<u16>,
    },

    /// Print one JSON record per received packet (headless).
    Log {
        /// Interface address to listen on
        #[arg(long, default_value = "0.0.0.0")]
        listen: IpAddr,

        /// UDP port to bind
        #[arg(long, default_value_t = ARTNET_PORT)]
        port: u16,

        /// Record only this universe (default: all)
        #[arg(short = 'u', long)]
        universe: Option<u16>,

        /// Stop after this many records
        #[arg(long)]
        limit: Option<u64>,

        /// Suppress the startup status line
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Watch {
            listen,
            port,
            universe,
        } => cmd_watch(listen, port, universe),
        Commands::Log {
            listen,
            port,
            universe,
            limit,
            quiet,
        } => cmd_log(listen, port, universe, limit, quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn bind_source(listen: IpAddr, port: u16) -> Result<UdpSource, CliError> {
    let addr = SocketAddr::new(listen, port);
    UdpSource::bind(addr).map_err(|err| {
        CliError::new(
            format!("failed to bind {addr}: {err}"),
            Some("is another Art-Net tool already listening on this port?".to_string()),
        )
    })
}

fn filter_for(universe: Option<u16>) -> DisplayFilter {
    universe.map_or(DisplayFilter::All, DisplayFilter::Only)
}

fn cmd_watch(listen: IpAddr, port: u16, universe: Option<u16>) -> Result<(), CliError> {
    let source = bind_source(listen, port)?;
    let monitor = Monitor::new();
    monitor.set_filter(filter_for(universe));

    let receiver = monitor.clone();
    thread::spawn(move || {
        // A recv error after a successful bind leaves the grid static;
        // there is nothing to retry at this layer.
        let _ = run_receiver(source, &receiver);
    });

    ui::run(&monitor).map_err(|err| CliError::new(format!("terminal UI failed: {err}"), None))
}

fn cmd_log(
    listen: IpAddr,
    port: u16,
    universe: Option<u16>,
    limit: Option<u64>,
    quiet: bool,
) -> Result<(), CliError> {
    let mut source = bind_source(listen, port)?;
    let filter = filter_for(universe);

    if !quiet {
        match source.local_addr() {
            Ok(addr) => eprintln!("dmxwatch: listening on udp {addr}"),
            Err(_) => eprintln!("dmxwatch: listening"),
        }
    }

    let mut printed = 0u64;
    while limit.is_none_or(|n| printed < n) {
        let event = match source.next_packet() {
            Ok(Some(event)) => event,
            Ok(None) => break,
            Err(err) => return Err(CliError::new(format!("receive failed: {err}"), None)),
        };
        let packet = match parse_packet(&event.data) {
            Ok(Some(packet)) => packet,
            // Malformed or undisplayed: background noise, keep listening.
            Ok(None) | Err(_) => continue,
        };
        if let ArtNetPacket::Dmx(ref dmx) = packet {
            if !filter.should_display(u16::from(dmx.universe_id())) {
                continue;
            }
        }

        let record = PacketRecord::from_packet(&packet, event.from, event.ts);
        let line = serde_json::to_string(&record)
            .context("serialize record")
            .map_err(CliError::from)?;
        println!("{line}");
        printed += 1;
    }
    Ok(())
}
