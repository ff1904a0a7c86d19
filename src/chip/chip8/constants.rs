use std::time::Duration;

pub const CHIP8_MEMORY_SIZE: usize = 4096;

/// Programs are loaded to and start executing from this address.
pub const CHIP8_PROGRAM_OFFSET: u16 = 0x200;

pub const CHIP8_MAX_PROGRAM_SIZE: usize = CHIP8_MEMORY_SIZE - CHIP8_PROGRAM_OFFSET as usize;

pub const CHIP8_CHARSET_OFFSET: u16 = 0x50; // 80

pub const CHIP8_CHARSET_LEN: u16 = 0x50; // 80

/// Every glyph of the charset is 5 bytes tall.
pub const CHIP8_GLYPH_LEN: u16 = 5;

pub const CHIP8_DISPLAY_WIDTH: usize = 64;

pub const CHIP8_DISPLAY_HEIGHT: usize = 32;

pub const CHIP8_REGISTER_COUNT: usize = 16;

/// Register VF doubles as carry, borrow and collision flag.
pub const CHIP8_FLAG_REGISTER: usize = 0xF;

pub const CHIP8_INPUT_PIN_COUNT: usize = 16;

/// How often the delay and sound timers are decremented.
pub const CHIP8_TIMER_INTERVAL: Duration = Duration::from_secs(1);

pub const CHIP8_CHARSET: [u8; CHIP8_CHARSET_LEN as usize] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
