//! `lenstr` - concatenate two byte strings through a checked allocator
//!
//! Prints the joined bytes followed by a newline. Exhausting the selected
//! heap terminates the process with `out of memory` on stderr and status 1.

mod config;

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lenstr_memory::allocator::{
    Allocator, BumpAllocator, SystemAllocator, TrackedAllocator, out_of_memory,
};
use lenstr_memory::{OwnedBuffer, concatenate_in};
use tracing::{debug, info};

use crate::config::{AppConfig, HeapKind};

/// Exit status for configuration and I/O failures
const USAGE_EXIT_CODE: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "lenstr")]
#[command(version)]
#[command(about = "Concatenate two byte strings through a checked allocator", long_about = None)]
struct Cli {
    /// Left operand
    #[arg(default_value = "Hello ")]
    left: OsString,

    /// Right operand
    #[arg(default_value = "world!!!")]
    right: OsString,

    /// TOML config file
    #[arg(short, long, env = "LENSTR_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Allocator backend
    #[arg(long, value_enum)]
    heap: Option<HeapKind>,

    /// Bump heap capacity in bytes
    #[arg(long, value_name = "BYTES")]
    heap_size: Option<usize>,

    /// Print allocation stats to stderr on exit
    #[arg(long)]
    stats: bool,

    /// Log filter directive (e.g. "debug", "lenstr_memory=trace")
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormat> for lenstr_log::Format {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
            LogFormat::Json => Self::Json,
        }
    }
}

impl Cli {
    /// Flags take precedence over every other layer.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(kind) = self.heap {
            config.heap.kind = kind;
        }
        if let Some(size) = self.heap_size {
            config.heap.size = size;
        }
        if let Some(level) = &self.log_level {
            config.log.level.clone_from(level);
        }
        if let Some(format) = self.log_format {
            config.log.format = format.into();
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(USAGE_EXIT_CODE)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    let _guard =
        lenstr_log::init_with(config.log.clone()).context("failed to initialize logging")?;
    debug!(?config, "configuration loaded");

    let left = cli.left.into_encoded_bytes();
    let right = cli.right.into_encoded_bytes();

    match config.heap.kind {
        HeapKind::System => emit(SystemAllocator, &left, &right, cli.stats),
        HeapKind::Bump => {
            let heap =
                BumpAllocator::new(config.heap.size).unwrap_or_else(|err| out_of_memory(&err));
            emit(&heap, &left, &right, cli.stats)
        }
    }
}

fn emit<A: Allocator>(alloc: A, left: &[u8], right: &[u8], stats: bool) -> Result<()> {
    info!(
        heap = alloc.name(),
        left = left.len(),
        right = right.len(),
        "concatenating"
    );

    if !stats {
        return write_line(&concatenate_in(alloc, left, right));
    }

    let tracked = TrackedAllocator::new(alloc);
    write_line(&concatenate_in(&tracked, left, right))?;
    eprintln!("stats: {}", tracked.stats());
    Ok(())
}

fn write_line<A: Allocator>(joined: &OwnedBuffer<A>) -> Result<()> {
    let mut stdout = io::stdout().lock();
    joined
        .write_to(&mut stdout)
        .and_then(|()| stdout.write_all(b"\n"))
        .and_then(|()| stdout.flush())
        .context("failed to write output")
}
