//! Asynchronous signals delivered to the CPU between instructions.
//!
//! Producers (timers, peripherals, a host UI) hold a [`SignalSender`]; the
//! fetch loop owns the single [`SignalReceiver`] and samples it only at
//! instruction boundaries.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Request an interrupt carrying a one-byte opcode, usually an `RST n`.
    Interrupt(u8),
    /// Stop the fetch loop at the next instruction boundary.
    PowerOff,
}

impl Signal {
    /// Interrupt request for `RST n` (`n` in 0..=7).
    pub const fn rst(n: u8) -> Self {
        Signal::Interrupt(0xC7 | ((n & 0x07) << 3))
    }
}

#[derive(Clone, Debug)]
pub struct SignalSender {
    sender: Sender<Signal>,
}

impl SignalSender {
    /// Returns false once the receiving CPU has gone away.
    pub fn send(&self, signal: Signal) -> bool {
        self.sender.send(signal).is_ok()
    }

    pub fn interrupt(&self, opcode: u8) -> bool {
        self.send(Signal::Interrupt(opcode))
    }

    pub fn power_off(&self) -> bool {
        self.send(Signal::PowerOff)
    }
}

/// Receiving side of the handoff.
///
/// At most one interrupt is latched at a time. A newer request replaces an
/// older one that has not been taken yet.
#[derive(Debug)]
pub struct SignalReceiver {
    receiver: Receiver<Signal>,
    pending: Option<u8>,
    power_off: bool,
    connected: bool,
}

pub fn channel() -> (SignalSender, SignalReceiver) {
    let (sender, receiver) = mpsc::channel::<Signal>();
    (
        SignalSender { sender },
        SignalReceiver {
            receiver,
            pending: None,
            power_off: false,
            connected: true,
        },
    )
}

impl SignalReceiver {
    fn accept(&mut self, signal: Signal) {
        match signal {
            Signal::Interrupt(opcode) => {
                if let Some(dropped) = self.pending.replace(opcode) {
                    log::warn!(
                        "Interrupt 0x{:02X} replaced by 0x{:02X} before it was taken",
                        dropped,
                        opcode
                    );
                }
            }
            Signal::PowerOff => {
                log::debug!("Power-off requested");
                self.power_off = true;
            }
        }
    }

    /// Drain everything queued so far without blocking.
    pub fn poll(&mut self) {
        while self.connected {
            match self.receiver.try_recv() {
                Ok(signal) => self.accept(signal),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.connected = false,
            }
        }
    }

    /// Block until at least one signal arrives. Returns false when every
    /// sender has been dropped and nothing more can arrive.
    pub fn wait(&mut self) -> bool {
        if !self.connected {
            return false;
        }
        match self.receiver.recv() {
            Ok(signal) => {
                self.accept(signal);
                self.poll();
                true
            }
            Err(_) => {
                self.connected = false;
                false
            }
        }
    }

    pub fn pending_interrupt(&self) -> Option<u8> {
        self.pending
    }

    pub fn take_interrupt(&mut self) -> Option<u8> {
        self.pending.take()
    }

    pub fn power_off_requested(&self) -> bool {
        self.power_off
    }

    /// False once every sender has been dropped.
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}
