pub mod chip8;

use thiserror::Error;

/// A chip that can be driven by an event loop.
pub trait Chip {
    type PinAddress;

    /// Copies a program image into memory at the program origin and returns the
    /// number of bytes loaded.
    fn load_program_bytes(&mut self, program: &[u8]) -> Result<usize, LoadProgramError>;

    /// Fetches, decodes and executes a single instruction.
    fn cycle(&mut self) -> Result<(), ChipError>;

    fn read_output_pins(&self) -> &[bool];

    fn set_input_pin(&mut self, pin: Self::PinAddress, value: bool) -> Result<(), ChipError>;

    fn reset_input_pins(&mut self);
}

/// Errors that occur while loading a program image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadProgramError {
    #[error("program is too large ({size} bytes), at most {max} bytes fit into memory")]
    ProgramTooLarge { size: usize, max: usize },
}

/// Faults raised by the emulated program. None of them take the host down.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChipError {
    #[error("memory access out of bounds at address {address:#06X}")]
    OutOfBoundsAccess { address: usize },

    #[error("instruction class {got:#X} does not match the expected class {expected:#X}")]
    InvalidInstructionClass { got: u8, expected: u8 },

    #[error("input pin {0:#X} does not exist")]
    InvalidInputPin(u8),

    #[error("program halted at {pc:#06X}: {reason}")]
    Halted { pc: u16, reason: Box<ChipError> },
}
