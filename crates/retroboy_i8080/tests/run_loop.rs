use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use retroboy_i8080::{
    signal, Cpu8080, CpuConfig, Fault, IoBus, NullBus, Signal, StopReason, UndefinedOpcodePolicy,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Reports every `OUT` back to the test thread.
struct AckBus {
    acks: mpsc::Sender<u8>,
}

impl IoBus for AckBus {
    fn io_read(&mut self, _port: u8) -> u8 {
        0
    }

    fn io_write(&mut self, _port: u8, value: u8) {
        let _ = self.acks.send(value);
    }
}

/// Main loop that waits in HLT with interrupts enabled, and an RST 1 handler
/// that counts in A, reports the count on port 1 and re-enables interrupts.
fn interrupt_counter() -> Cpu8080 {
    let config = CpuConfig::builder().interrupts_enabled(false).build();
    let mut cpu = Cpu8080::new(config).unwrap();
    cpu.load(
        &[
            0x31, 0x00, 0x20, // 0000: LXI SP,2000h
            0xFB, //             0003: EI
            0x76, //             0004: HLT
            0xC3, 0x03, 0x00, // 0005: JMP 0003h
            0x3C, //             0008: INR A
            0xD3, 0x01, //       0009: OUT 1
            0xFB, //             000B: EI
            0xC9, //             000C: RET
        ],
        0,
    )
    .unwrap();
    cpu
}

#[test]
fn timer_interrupts_wake_halted_cpu() {
    init_logger();
    let mut cpu = interrupt_counter();
    let (tx, mut rx) = signal::channel();
    let (ack_tx, ack_rx) = mpsc::channel();

    let timer = thread::spawn(move || {
        for _ in 0..3 {
            assert!(tx.send(Signal::rst(1)));
            ack_rx.recv().unwrap();
        }
        // Dropping the sender leaves the halted CPU with nothing to wait for.
    });

    let mut bus = AckBus { acks: ack_tx };
    let outcome = cpu.run(&mut bus, &mut rx, None).unwrap();
    timer.join().unwrap();

    assert_eq!(outcome.reason, StopReason::Halted);
    assert_eq!(outcome.interrupts, 3);
    assert_eq!(cpu.regs.a, 3);
    assert!(cpu.halted);
    assert!(cpu.interrupts_enabled);
}

#[test]
fn power_off_stops_a_busy_loop() {
    init_logger();
    let mut cpu = Cpu8080::default();
    cpu.load(&[0xC3, 0x00, 0x00], 0).unwrap(); // JMP 0000h
    let (tx, mut rx) = signal::channel();

    let switch = thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        tx.power_off();
    });

    let outcome = cpu.run(&mut NullBus, &mut rx, None).unwrap();
    switch.join().unwrap();

    assert_eq!(outcome.reason, StopReason::PowerOff);
    assert!(outcome.instructions > 0);
    assert_eq!(outcome.states, outcome.instructions * 10);
}

#[test]
fn instruction_limit_ends_run() {
    init_logger();
    let mut cpu = Cpu8080::default();
    cpu.load(&[0xC3, 0x00, 0x00], 0).unwrap();
    let (tx, mut rx) = signal::channel();
    drop(tx);

    let outcome = cpu.run(&mut NullBus, &mut rx, Some(100)).unwrap();
    assert_eq!(outcome.reason, StopReason::InstructionLimit);
    assert_eq!(outcome.instructions, 100);
    assert_eq!(outcome.states, 1000);
}

#[test]
fn halt_with_interrupts_disabled_ends_run() {
    init_logger();
    let mut cpu = Cpu8080::default();
    cpu.load(&[0xF3, 0x76], 0).unwrap(); // DI; HLT
    let (_tx, mut rx) = signal::channel();

    let outcome = cpu.run(&mut NullBus, &mut rx, None).unwrap();
    assert_eq!(outcome.reason, StopReason::Halted);
    assert_eq!(outcome.instructions, 2);
    assert_eq!(cpu.regs.pc, 0x0002);
}

#[test]
fn pending_interrupt_waits_for_ei() {
    init_logger();
    let config = CpuConfig::builder().interrupts_enabled(false).build();
    let mut cpu = Cpu8080::new(config).unwrap();
    cpu.load(
        &[
            0x31, 0x00, 0x10, // LXI SP,1000h
            0xFB, //             EI
            0x00, //             NOP
            0x76, //             HLT
        ],
        0,
    )
    .unwrap();
    cpu.memory.load(0x38, &[0x3C, 0xC9]).unwrap(); // INR A; RET

    let (tx, mut rx) = signal::channel();
    tx.send(Signal::rst(7));

    let outcome = cpu.run(&mut NullBus, &mut rx, None).unwrap();

    assert_eq!(outcome.reason, StopReason::Halted);
    assert_eq!(outcome.interrupts, 1);
    assert_eq!(cpu.regs.a, 1);
    // Taken right after EI, so the NOP is the return address.
    assert_eq!(cpu.memory.read_word(0x0FFE), Ok(0x0004));
    assert!(!cpu.interrupts_enabled);
}

#[test]
fn fault_ends_run_with_error() {
    init_logger();
    let config = CpuConfig::builder()
        .undefined_opcodes(UndefinedOpcodePolicy::Fault)
        .build();
    let mut cpu = Cpu8080::new(config).unwrap();
    cpu.load(&[0x00, 0x00, 0x38], 0).unwrap();
    let (_tx, mut rx) = signal::channel();

    let err = cpu.run(&mut NullBus, &mut rx, None).unwrap_err();
    assert_eq!(
        err,
        Fault::UndefinedOpcode {
            opcode: 0x38,
            pc: 0x0002
        }
    );
    assert_eq!(cpu.fault(), Some(err));
}
