use clap::Parser;
use serjson::{ParserOptions, ReassemblyOptions};

use crate::error::DeviceError;

/// Command line of the `serjson-device` binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "serjson-device",
    version,
    about = "Drive an LED from newline-delimited serjson commands on stdin"
)]
pub struct Args {
    /// Carry-over buffer size in bytes; bounds the longest token
    #[arg(long, default_value_t = 64)]
    pub capacity: usize,

    /// Bytes requested per read from stdin
    #[arg(long, default_value_t = 64)]
    pub chunk_size: usize,

    /// Deepest container nesting accepted in a command
    #[arg(long, default_value_t = 32)]
    pub max_depth: usize,

    /// Emit log lines as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Log filter directives, overriding RUST_LOG
    #[arg(long)]
    pub log_filter: Option<String>,
}

/// Runtime settings of a [`Session`](crate::Session).
#[derive(Debug, Clone, Copy)]
pub struct DeviceConfig {
    pub reassembly: ReassemblyOptions,
    pub parser: ParserOptions,
    /// # Default
    ///
    /// `64`, the read size of the serial firmware.
    pub chunk_size: usize,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            reassembly: ReassemblyOptions::default(),
            parser: ParserOptions::default(),
            chunk_size: 64,
        }
    }
}

impl TryFrom<&Args> for DeviceConfig {
    type Error = DeviceError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        if args.capacity == 0 {
            return Err(DeviceError::InvalidConfig("--capacity must be at least 1"));
        }
        if args.chunk_size == 0 {
            return Err(DeviceError::InvalidConfig("--chunk-size must be at least 1"));
        }
        Ok(Self {
            reassembly: ReassemblyOptions {
                capacity: args.capacity,
            },
            parser: ParserOptions {
                max_depth: args.max_depth,
            },
            chunk_size: args.chunk_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_firmware() {
        let args = Args::parse_from(["serjson-device"]);
        let config = DeviceConfig::try_from(&args).unwrap();
        assert_eq!(config.reassembly.capacity, 64);
        assert_eq!(config.parser.max_depth, 32);
        assert_eq!(config.chunk_size, 64);
        assert!(!args.log_json);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "serjson-device",
            "--capacity",
            "16",
            "--chunk-size",
            "3",
            "--max-depth",
            "4",
            "--log-filter",
            "serjson=trace",
        ]);
        let config = DeviceConfig::try_from(&args).unwrap();
        assert_eq!(config.reassembly.capacity, 16);
        assert_eq!(config.chunk_size, 3);
        assert_eq!(config.parser.max_depth, 4);
        assert_eq!(args.log_filter.as_deref(), Some("serjson=trace"));
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let args = Args::parse_from(["serjson-device", "--chunk-size", "0"]);
        assert!(matches!(
            DeviceConfig::try_from(&args),
            Err(DeviceError::InvalidConfig(_))
        ));
    }
}
