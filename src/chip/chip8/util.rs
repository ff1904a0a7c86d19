use crate::chip::chip8::Chip8;

/// Skips the next instruction if `f` holds. The program counter already
/// points past the current instruction when this is called.
pub fn conditional_skip<T>(opcode: &T, state: &mut Chip8, f: fn(&T, &Chip8) -> bool) {
    if f(opcode, state) {
        increment_program_counter(state);
    }
}

pub fn increment_program_counter(state: &mut Chip8) {
    state.program_counter = state.program_counter.wrapping_add(2);
}

/// Moves the program counter back onto the current instruction, so that it
/// is executed again on the next cycle.
pub fn repeat_instruction(state: &mut Chip8) {
    state.program_counter = state.program_counter.wrapping_sub(2);
}
