use core::convert::TryFrom;
use std::marker::PhantomData;

use log::debug;

use crate::chip::{
    chip8::{
        constants::CHIP8_MEMORY_SIZE,
        opcodes::{
            ExecutableOpcode, InstructionWithAddress, InstructionWithOperands,
            InstructionWithRegAndValue, Opcode,
        },
        util, Chip8,
    },
    ChipError,
};

define_instruction_with_address!(Jmp, JmpInstruction, 0x1);
impl ExecutableOpcode for JmpInstruction {
    fn execute(&self, state: &mut Chip8) -> Result<(), ChipError> {
        state.program_counter = self.address;
        Ok(())
    }
}

define_instruction_with_address!(Call, CallInstruction, 0x2);
impl ExecutableOpcode for CallInstruction {
    fn execute(&self, state: &mut Chip8) -> Result<(), ChipError> {
        state.stack.push(state.program_counter);
        state.program_counter = self.address;
        Ok(())
    }
}

define_instruction_with_reg_and_value!(Se, SeInstruction, 0x3);
impl ExecutableOpcode for SeInstruction {
    fn execute(&self, state: &mut Chip8) -> Result<(), ChipError> {
        util::conditional_skip(self, state, |instruction, state| {
            state.registers[instruction.reg as usize] == instruction.value
        });
        Ok(())
    }
}

define_instruction_with_reg_and_value!(Sne, SneInstruction, 0x4);
impl ExecutableOpcode for SneInstruction {
    fn execute(&self, state: &mut Chip8) -> Result<(), ChipError> {
        util::conditional_skip(self, state, |instruction, state| {
            state.registers[instruction.reg as usize] != instruction.value
        });
        Ok(())
    }
}

define_instruction_with_operands!(Sre, SreInstruction, 0x5);
impl ExecutableOpcode for SreInstruction {
    fn execute(&self, state: &mut Chip8) -> Result<(), ChipError> {
        if self.op3 != 0 {
            debug!("Ignoring unknown opcode 5{:X}{:X}{:X}", self.op1, self.op2, self.op3);
            return Ok(());
        }
        util::conditional_skip(self, state, |instruction, state| {
            state.registers[instruction.op1 as usize] == state.registers[instruction.op2 as usize]
        });
        Ok(())
    }
}

define_instruction_with_operands!(Srne, SrneInstruction, 0x9);
impl ExecutableOpcode for SrneInstruction {
    fn execute(&self, state: &mut Chip8) -> Result<(), ChipError> {
        if self.op3 != 0 {
            debug!("Ignoring unknown opcode 9{:X}{:X}{:X}", self.op1, self.op2, self.op3);
            return Ok(());
        }
        util::conditional_skip(self, state, |instruction, state| {
            state.registers[instruction.op1 as usize] != state.registers[instruction.op2 as usize]
        });
        Ok(())
    }
}

define_instruction_with_address!(Jmpr, JmprInstruction, 0xB);
impl ExecutableOpcode for JmprInstruction {
    fn execute(&self, state: &mut Chip8) -> Result<(), ChipError> {
        let target = self.address as usize + state.registers[0] as usize;
        if target >= CHIP8_MEMORY_SIZE {
            return Err(ChipError::OutOfBoundsAccess { address: target });
        }
        state.program_counter = target as u16;
        Ok(())
    }
}

define_instruction_with_reg_and_value!(Sk, SkInstruction, 0xE);
impl ExecutableOpcode for SkInstruction {
    fn execute(&self, state: &mut Chip8) -> Result<(), ChipError> {
        // Only the low nibble of VX addresses a pin.
        let pin = (state.registers[self.reg as usize] & 0xF) as usize;
        let skip = match self.value {
            0x9E => state.input_pins[pin],
            0xA1 => !state.input_pins[pin],
            value => {
                debug!("Ignoring unknown opcode E{:X}{:02X}", self.reg, value);
                false
            }
        };
        if skip {
            util::increment_program_counter(state);
        }
        Ok(())
    }
}
