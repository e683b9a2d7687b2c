use typed_builder::TypedBuilder;

use crate::DEFAULT_MEMORY_SIZE;

/// What happens to the interrupt-enable flag after an interrupt opcode runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InterruptPolicy {
    /// Interrupts stay disabled until the program executes `EI`.
    #[default]
    Manual,
    /// Interrupts are enabled again as soon as the interrupt opcode finishes.
    AutoReenable,
}

/// How the 12 unassigned opcodes are executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UndefinedOpcodePolicy {
    /// Run them as the silicon does: 0x08..=0x38 step 8 as NOP, 0xCB as JMP,
    /// 0xD9 as RET, 0xDD/0xED/0xFD as CALL.
    #[default]
    Alias,
    /// Refuse them with `Fault::UndefinedOpcode`.
    Fault,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, TypedBuilder)]
pub struct CpuConfig {
    /// Size of the memory image in bytes, 1..=0x10000.
    #[builder(default = DEFAULT_MEMORY_SIZE)]
    pub memory_size: usize,
    #[builder(default)]
    pub interrupt_policy: InterruptPolicy,
    #[builder(default)]
    pub undefined_opcodes: UndefinedOpcodePolicy,
    /// Interrupt-enable state after reset.
    #[builder(default = true)]
    pub interrupts_enabled: bool,
    /// Hold interrupts off for one more instruction after EI, as the 8080
    /// silicon does. When false, EI takes effect at the next boundary.
    #[builder(default)]
    pub delayed_ei: bool,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
