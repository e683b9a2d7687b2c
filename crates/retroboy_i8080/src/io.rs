/// Port interface for the 8080's `IN` and `OUT` instructions.
///
/// The CPU owns its memory; only the 256 I/O ports are delegated to the
/// machine it is embedded in.
pub trait IoBus {
    fn io_read(&mut self, port: u8) -> u8;
    fn io_write(&mut self, port: u8, value: u8);
}

/// Bus with nothing attached: reads return 0, writes are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullBus;

impl IoBus for NullBus {
    fn io_read(&mut self, _port: u8) -> u8 {
        0
    }

    fn io_write(&mut self, _port: u8, _value: u8) {}
}
