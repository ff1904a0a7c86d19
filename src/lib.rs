//! An implementation of a CHIP-8 interpreter. The implementation follows the instruction set
//! described [here](https://en.wikipedia.org/wiki/CHIP-8#Opcode_table). The interpreter core
//! is driven by calling `cycle` repeatedly; rendered frames are handed to a consumer over a
//! blocking channel and the delay and sound timers tick on a background thread.
pub mod chip;
