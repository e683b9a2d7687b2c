use std::io::Write;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use retroboy_i8080::{
    signal, Cpu8080, CpuConfig, InterruptPolicy, IoBus, RunOutcome, Signal, SignalSender,
    DEFAULT_MEMORY_SIZE,
};
use typed_builder::TypedBuilder;

/// Periodic `RST n` interrupt source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterruptTimer {
    pub rst: u8,
    pub every: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct RunOptions {
    #[builder(default)]
    pub offset: u16,
    #[builder(default = DEFAULT_MEMORY_SIZE)]
    pub memory_size: usize,
    #[builder(default)]
    pub timer: Option<InterruptTimer>,
    #[builder(default)]
    pub limit: Option<u64>,
    #[builder(default)]
    pub auto_reenable: bool,
    #[builder(default)]
    pub delayed_ei: bool,
}

/// Ports wired to a byte sink: every `OUT` writes its byte, every `IN`
/// reads 0.
pub struct ConsoleBus<W: Write> {
    out: W,
}

impl<W: Write> ConsoleBus<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> IoBus for ConsoleBus<W> {
    fn io_read(&mut self, port: u8) -> u8 {
        log::debug!("IN 0x{:02X} -> 0x00", port);
        0
    }

    fn io_write(&mut self, port: u8, value: u8) {
        log::debug!("OUT 0x{:02X} <- 0x{:02X}", port, value);
        if let Err(err) = self.out.write_all(&[value]).and_then(|_| self.out.flush()) {
            log::warn!("Console write failed: {}", err);
        }
    }
}

fn spawn_timer(sender: SignalSender, timer: InterruptTimer) -> JoinHandle<()> {
    thread::spawn(move || loop {
        thread::sleep(timer.every);
        // The receiver is gone once the run has finished.
        if !sender.send(Signal::rst(timer.rst)) {
            break;
        }
    })
}

/// Load `program` into a fresh CPU and run it against console ports until
/// it halts, is powered off or reaches the instruction limit.
pub fn run(program: &[u8], options: &RunOptions) -> Result<RunOutcome> {
    let policy = if options.auto_reenable {
        InterruptPolicy::AutoReenable
    } else {
        InterruptPolicy::Manual
    };
    let config = CpuConfig::builder()
        .memory_size(options.memory_size)
        .interrupt_policy(policy)
        .delayed_ei(options.delayed_ei)
        .build();

    let mut cpu = Cpu8080::new(config).context("Failed to create CPU")?;
    cpu.load(program, options.offset)
        .context("Failed to load program")?;

    let (sender, mut receiver) = signal::channel();
    let timer = options.timer.map(|timer| {
        log::info!("RST {} every {:?}", timer.rst, timer.every);
        spawn_timer(sender.clone(), timer)
    });
    drop(sender);

    let mut bus = ConsoleBus::new(std::io::stdout().lock());
    let result = cpu.run(&mut bus, &mut receiver, options.limit);
    drop(receiver);

    if let Some(handle) = timer {
        handle
            .join()
            .map_err(|_| anyhow!("Interrupt timer thread panicked"))?;
    }

    let outcome = result.with_context(|| format!("CPU stopped at PC=0x{:04X}", cpu.regs.pc))?;
    log::info!(
        "{:?}: {} instructions, {} interrupts, {} states",
        outcome.reason,
        outcome.instructions,
        outcome.interrupts,
        outcome.states
    );
    Ok(outcome)
}

/// Command line of the `i8080` runner.
#[derive(Parser, Debug)]
#[command(name = "i8080", about = "Run an Intel 8080 program against console ports")]
pub struct Args {
    /// Raw program image to load.
    #[arg(value_name = "PROGRAM")]
    pub program: PathBuf,

    /// Load address; PC starts here.
    #[arg(long, value_parser = parse_u16, default_value_t = 0)]
    pub offset: u16,

    /// Memory size in bytes.
    #[arg(
        long = "memory",
        value_parser = parse_usize,
        default_value_t = DEFAULT_MEMORY_SIZE
    )]
    pub memory_size: usize,

    /// Deliver `RST n` periodically.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=7), requires = "every")]
    pub rst: Option<u8>,

    /// Period of the `--rst` interrupt.
    #[arg(long, value_name = "MS", value_parser = parse_u64, requires = "rst")]
    pub every: Option<u64>,

    /// Stop after this many instructions.
    #[arg(long, value_parser = parse_u64)]
    pub limit: Option<u64>,

    /// Turn interrupts back on after each one is taken.
    #[arg(long)]
    pub auto_reenable: bool,

    /// Hold interrupts off for one instruction after EI.
    #[arg(long)]
    pub delayed_ei: bool,
}

impl Args {
    pub fn options(&self) -> RunOptions {
        let timer = self.rst.zip(self.every).map(|(rst, ms)| InterruptTimer {
            rst,
            every: Duration::from_millis(ms),
        });
        RunOptions::builder()
            .offset(self.offset)
            .memory_size(self.memory_size)
            .timer(timer)
            .limit(self.limit)
            .auto_reenable(self.auto_reenable)
            .delayed_ei(self.delayed_ei)
            .build()
    }
}

/// Parse a decimal or `0x`-prefixed hexadecimal number.
pub fn parse_u64(text: &str) -> Result<u64, ParseIntError> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse(),
    }
}

fn parse_u16(text: &str) -> Result<u16, String> {
    let value = parse_u64(text).map_err(|err| err.to_string())?;
    u16::try_from(value).map_err(|_| format!("{} does not fit in 16 bits", text))
}

fn parse_usize(text: &str) -> Result<usize, String> {
    let value = parse_u64(text).map_err(|err| err.to_string())?;
    usize::try_from(value).map_err(|err| err.to_string())
}
