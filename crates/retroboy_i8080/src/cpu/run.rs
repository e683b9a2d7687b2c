use super::Cpu8080;
use crate::error::Fault;
use crate::io::IoBus;
use crate::signal::SignalReceiver;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// A `Signal::PowerOff` arrived.
    PowerOff,
    /// HLT with no way to be woken: interrupts disabled or every sender gone.
    Halted,
    /// The instruction limit passed to `run` was reached.
    InstructionLimit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    pub reason: StopReason,
    /// Instructions fetched from memory.
    pub instructions: u64,
    /// Interrupts serviced.
    pub interrupts: u64,
    /// Sum of nominal states of everything executed.
    pub states: u64,
}

impl Cpu8080 {
    /// Fetch loop.
    ///
    /// Signals are sampled only between instructions. A pending interrupt is
    /// taken as soon as the CPU accepts interrupts; a halted CPU blocks on the
    /// receiver until something arrives. A fault ends the loop with `Err`.
    pub fn run<B: IoBus>(
        &mut self,
        io: &mut B,
        signals: &mut SignalReceiver,
        limit: Option<u64>,
    ) -> Result<RunOutcome, Fault> {
        let mut instructions = 0u64;
        let mut interrupts = 0u64;
        let mut states = 0u64;

        let reason = loop {
            signals.poll();
            if signals.power_off_requested() {
                log::debug!("Power-off at PC=0x{:04X}", self.regs.pc);
                break StopReason::PowerOff;
            }

            if self.accepts_interrupts() {
                if let Some(opcode) = signals.take_interrupt() {
                    if let Some(cost) = self.interrupt(io, opcode)? {
                        interrupts += 1;
                        states += u64::from(cost);
                        continue;
                    }
                }
            }

            if self.halted {
                if !self.interrupts_enabled || !signals.wait() {
                    break StopReason::Halted;
                }
                continue;
            }

            if limit.is_some_and(|limit| instructions >= limit) {
                break StopReason::InstructionLimit;
            }

            states += u64::from(self.step(io)?);
            instructions += 1;
        };

        log::debug!(
            "Stopped ({:?}) after {} instructions, {} interrupts",
            reason,
            instructions,
            interrupts
        );
        Ok(RunOutcome {
            reason,
            instructions,
            interrupts,
            states,
        })
    }
}
