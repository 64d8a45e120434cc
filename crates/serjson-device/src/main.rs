//! `serjson-device`: reads commands from stdin, answers on stdout.
//!
//! ```sh
//! printf '{"mode":1,"v":0.5}\n{"req":0}\n' | serjson-device
//! # {}
//! # {"status":{"led":0.5,"mode":1}}
//!
//! # Attach to a serial port with small reads and verbose codec logs
//! serjson-device --chunk-size 8 --log-filter serjson=debug < /dev/ttyACM0 > /dev/ttyACM0
//! ```

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use serjson_device::{Args, DeviceConfig, Dispatcher, LoggingLed, Session, init_tracing};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_filter.as_deref(), args.log_json)
        .context("could not set up logging")?;
    let config = DeviceConfig::try_from(&args)?;

    tracing::info!(
        capacity = config.reassembly.capacity,
        chunk_size = config.chunk_size,
        max_depth = config.parser.max_depth,
        "ready",
    );

    let mut session = Session::new(&config, Dispatcher::new(LoggingLed::default()));
    session
        .run(io::stdin().lock(), io::stdout().lock(), config.chunk_size)
        .context("command loop stopped")?;

    tracing::info!("input closed");
    Ok(())
}
