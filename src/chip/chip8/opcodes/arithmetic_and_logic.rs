use core::convert::TryFrom;
use rand::{thread_rng, Rng};
use std::marker::PhantomData;

use log::debug;

use crate::chip::{
    chip8::{
        constants::{
            CHIP8_CHARSET_OFFSET, CHIP8_DISPLAY_HEIGHT, CHIP8_DISPLAY_WIDTH, CHIP8_FLAG_REGISTER,
            CHIP8_GLYPH_LEN, CHIP8_INPUT_PIN_COUNT, CHIP8_REGISTER_COUNT,
        },
        opcodes::{
            ExecutableOpcode, InstructionWithAddress, InstructionWithOperands,
            InstructionWithRegAndValue, Opcode,
        },
        util, Chip8,
    },
    ChipError,
};

define_instruction_with_reg_and_value!(Ldr, LdrInstruction, 0x6);
impl ExecutableOpcode for LdrInstruction {
    fn execute(&self, state: &mut Chip8) -> Result<(), ChipError> {
        state.registers[self.reg as usize] = self.value;
        Ok(())
    }
}

define_instruction_with_reg_and_value!(Add, AddInstruction, 0x7);
impl ExecutableOpcode for AddInstruction {
    fn execute(&self, state: &mut Chip8) -> Result<(), ChipError> {
        state.registers[self.reg as usize] =
            state.registers[self.reg as usize].wrapping_add(self.value);
        Ok(())
    }
}

define_instruction_with_operands!(Reg, RegInstruction, 0x8);
impl ExecutableOpcode for RegInstruction {
    fn execute(&self, state: &mut Chip8) -> Result<(), ChipError> {
        /// Stores `f(VX, VY)` in VX. The flag is written last, so it wins if X is VF.
        fn modify_registers(
            state: &mut Chip8,
            r1: u8,
            r2: u8,
            f: fn(u8, u8) -> (u8, Option<bool>),
        ) {
            let (val, flag) = f(state.registers[r1 as usize], state.registers[r2 as usize]);
            state.registers[r1 as usize] = val;
            match flag {
                Some(true) => state.registers[CHIP8_FLAG_REGISTER] = 1,
                Some(false) => state.registers[CHIP8_FLAG_REGISTER] = 0,
                _ => {}
            }
        }

        match self.op3 {
            0x0 => modify_registers(state, self.op1, self.op2, |_, v2| (v2, None)),
            0x1 => modify_registers(state, self.op1, self.op2, |v1, v2| (v1 | v2, None)),
            0x2 => modify_registers(state, self.op1, self.op2, |v1, v2| (v1 & v2, None)),
            0x3 => modify_registers(state, self.op1, self.op2, |v1, v2| (v1 ^ v2, None)),
            0x4 => modify_registers(state, self.op1, self.op2, |v1, v2| {
                let (result, overflow) = v1.overflowing_add(v2);
                (result, Some(overflow))
            }),
            0x5 => modify_registers(state, self.op1, self.op2, |v1, v2| {
                let (result, overflow) = v1.overflowing_sub(v2);
                (result, Some(!overflow))
            }),
            0x6 => modify_registers(state, self.op1, self.op2, |v1, _| {
                (v1 >> 1, Some(v1 & 1 != 0))
            }),
            0x7 => modify_registers(state, self.op1, self.op2, |v1, v2| {
                (v2.wrapping_sub(v1), Some(v2 > v1))
            }),
            0xE => modify_registers(state, self.op1, self.op2, |v1, _| {
                (v1 << 1, Some(v1 & 0x80 != 0))
            }),
            op => debug!("Ignoring unknown opcode 8{:X}{:X}{:X}", self.op1, self.op2, op),
        };
        Ok(())
    }
}

define_instruction_with_address!(Ld, LdInstruction, 0xA);
impl ExecutableOpcode for LdInstruction {
    fn execute(&self, state: &mut Chip8) -> Result<(), ChipError> {
        state.index = self.address;
        Ok(())
    }
}

define_instruction_with_reg_and_value!(Rnd, RndInstruction, 0xC);
impl ExecutableOpcode for RndInstruction {
    fn execute(&self, state: &mut Chip8) -> Result<(), ChipError> {
        let mut rng = thread_rng();
        let sample: u8 = rng.gen();

        state.registers[self.reg as usize] = sample & self.value;
        Ok(())
    }
}

define_instruction_with_operands!(Drw, DrwInstruction, 0xD);
impl ExecutableOpcode for DrwInstruction {
    fn execute(&self, state: &mut Chip8) -> Result<(), ChipError> {
        let x = state.registers[self.op1 as usize] as usize % CHIP8_DISPLAY_WIDTH;
        let y = state.registers[self.op2 as usize] as usize % CHIP8_DISPLAY_HEIGHT;
        let n = self.op3 as usize;

        // Read the whole sprite up front so that a fault leaves the display untouched.
        let mut sprite = [0u8; 0xF];
        sprite[..n].copy_from_slice(state.memory_slice(state.index, n)?);

        state.registers[CHIP8_FLAG_REGISTER] = 0;
        for (y_pos, pixel_byte) in sprite[..n].iter().enumerate() {
            let row = y + y_pos;
            if row >= CHIP8_DISPLAY_HEIGHT {
                break;
            }

            let mut pixel_mask = 0x80;
            for x_pos in 0..8 {
                let column = x + x_pos;
                if column >= CHIP8_DISPLAY_WIDTH {
                    break;
                }

                if pixel_byte & pixel_mask != 0 {
                    let pixel = &mut state.output_pins[row * CHIP8_DISPLAY_WIDTH + column];
                    if *pixel {
                        state.registers[CHIP8_FLAG_REGISTER] = 1;
                    }
                    *pixel ^= true;
                }

                pixel_mask >>= 1;
            }
        }

        state.emit_frame();
        Ok(())
    }
}

define_instruction_with_reg_and_value!(Ldu, LduInstruction, 0xF);
impl ExecutableOpcode for LduInstruction {
    fn execute(&self, state: &mut Chip8) -> Result<(), ChipError> {
        let reg = self.reg as usize;
        match self.value {
            0x07 => {
                state.registers[reg] = state.timers.delay();
            }
            0x0A => {
                let input_pin = (0..CHIP8_INPUT_PIN_COUNT).find(|&pin| state.input_pins[pin]);
                match input_pin {
                    Some(pin) => state.registers[reg] = pin as u8,
                    // No input pin is set, so wait by executing this instruction again.
                    None => util::repeat_instruction(state),
                }
            }
            0x15 => {
                state.timers.set_delay(state.registers[reg]);
            }
            0x18 => {
                state.timers.set_sound(state.registers[reg]);
            }
            0x1E => {
                state.index = state.index.wrapping_add(state.registers[reg] as u16);
            }
            0x29 => {
                let character = (state.registers[reg] & 0xF) as u16;
                state.index = CHIP8_CHARSET_OFFSET + character * CHIP8_GLYPH_LEN;
            }
            0x33 => {
                let value = state.registers[reg];
                let digits = state.memory_slice_mut(state.index, 3)?;
                digits[0] = value / 100;
                digits[1] = value / 10 % 10;
                digits[2] = value % 10;
            }
            0x55 => {
                let registers: [u8; CHIP8_REGISTER_COUNT] = state.registers;
                state
                    .memory_slice_mut(state.index, reg + 1)?
                    .copy_from_slice(&registers[..=reg]);
            }
            0x65 => {
                let mut loaded = [0u8; CHIP8_REGISTER_COUNT];
                loaded[..=reg].copy_from_slice(state.memory_slice(state.index, reg + 1)?);
                state.registers[..=reg].copy_from_slice(&loaded[..=reg]);
            }
            value => debug!("Ignoring unknown opcode F{:X}{:02X}", self.reg, value),
        }
        Ok(())
    }
}
