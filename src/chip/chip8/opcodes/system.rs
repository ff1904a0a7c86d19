use core::convert::TryFrom;
use std::marker::PhantomData;

use log::debug;

use crate::chip::{
    chip8::{
        constants::{CHIP8_DISPLAY_HEIGHT, CHIP8_DISPLAY_WIDTH},
        opcodes::{ExecutableOpcode, InstructionWithAddress, Opcode},
        Chip8,
    },
    ChipError,
};

define_instruction_with_address!(Sys, SysInstruction, 0x0);
impl ExecutableOpcode for SysInstruction {
    fn execute(&self, state: &mut Chip8) -> Result<(), ChipError> {
        match self.address {
            0x0E0 => {
                state.output_pins = [false; CHIP8_DISPLAY_WIDTH * CHIP8_DISPLAY_HEIGHT];
            }
            0x0EE => {
                state.program_counter = state.stack.pop();
            }
            // 0NNN calls a machine code routine of the original hardware.
            address => debug!("Ignoring machine code routine call to {:#05X}", address),
        };
        Ok(())
    }
}
