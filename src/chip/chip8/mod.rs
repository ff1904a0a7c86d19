/// CHIP-8 constants.
pub mod constants;
/// Rendering of the display and the channel frames are handed over on.
pub mod frame;
/// Decoding of opcodes and their execution.
mod opcodes;
/// The call stack.
pub mod stack;
/// The delay and sound timers and the thread ticking them.
pub mod timers;
/// Convenience functions for modification of the CHIP-8 state.
mod util;


use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use log::{error, info, trace, warn};

use crate::chip::{
    chip8::{
        constants::{
            CHIP8_CHARSET, CHIP8_CHARSET_LEN, CHIP8_CHARSET_OFFSET, CHIP8_DISPLAY_HEIGHT,
            CHIP8_DISPLAY_WIDTH, CHIP8_INPUT_PIN_COUNT, CHIP8_MAX_PROGRAM_SIZE,
            CHIP8_MEMORY_SIZE, CHIP8_PROGRAM_OFFSET, CHIP8_REGISTER_COUNT, CHIP8_TIMER_INTERVAL,
        },
        frame::Frame,
        opcodes::Opcode,
        stack::CallStack,
        timers::{TimerThread, Timers},
    },
    Chip, ChipError, LoadProgramError,
};

/// Represents the state of the CHIP-8.
pub struct Chip8 {
    /// 4096 bytes of main memory
    memory: [u8; CHIP8_MEMORY_SIZE],

    /// 16 registers where each can store one byte
    registers: [u8; CHIP8_REGISTER_COUNT],

    /// An index register
    index: u16,

    /// A program counter. It is advanced past an instruction as soon as the
    /// instruction is fetched.
    program_counter: u16,

    /// The output pins. Note that those are usually directly wired
    /// up to the pixels of the display, row-major, addressed as `y * 64 + x`.
    output_pins: [bool; CHIP8_DISPLAY_WIDTH * CHIP8_DISPLAY_HEIGHT],

    /// The delay and sound timers, shared with `timer_thread`.
    timers: Arc<Timers>,

    /// Decrements `timers` once per timer interval for as long as the chip lives.
    timer_thread: TimerThread,

    /// The input pins. Note that those input pins are usually directly wired
    /// up to the keys. However, we do not prescribe how this is handled and
    /// hence refer to them as input pins rather than as keys.
    input_pins: [bool; CHIP8_INPUT_PIN_COUNT],

    /// Return addresses pushed by the call instruction.
    stack: CallStack,

    /// Receives a rendered frame after every draw instruction, if attached.
    frame_sink: Option<Sender<Frame>>,

    /// Set once the program faulted. Every following cycle reports it again.
    fault: Option<ChipError>,
}

impl Chip for Chip8 {
    /// The CHIP-8's pins can actually be addressed by using just half a byte.
    /// However, we use a whole byte here and check whether it is in the right
    /// range, because it is more convenient to handle.
    type PinAddress = u8;

    fn load_program_bytes(&mut self, program: &[u8]) -> Result<usize, LoadProgramError> {
        if program.len() > CHIP8_MAX_PROGRAM_SIZE {
            return Err(LoadProgramError::ProgramTooLarge {
                size: program.len(),
                max: CHIP8_MAX_PROGRAM_SIZE,
            });
        }

        let start = CHIP8_PROGRAM_OFFSET as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        info!(
            "Loaded program of {} bytes at {:#05X}",
            program.len(),
            CHIP8_PROGRAM_OFFSET
        );

        Ok(program.len())
    }

    fn cycle(&mut self) -> Result<(), ChipError> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }

        let pc = self.program_counter;
        let result = match self.fetch() {
            Ok(opcode) => opcode.execute(self),
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            let fault = ChipError::Halted {
                pc,
                reason: Box::new(e),
            };
            error!("{}", fault);
            self.fault = Some(fault.clone());
            return Err(fault);
        }

        Ok(())
    }

    fn read_output_pins(&self) -> &[bool] {
        &self.output_pins
    }

    fn set_input_pin(&mut self, pin: u8, value: bool) -> Result<(), ChipError> {
        match self.input_pins.get_mut(pin as usize) {
            Some(input_pin) => {
                *input_pin = value;
                Ok(())
            }
            None => Err(ChipError::InvalidInputPin(pin)),
        }
    }

    fn reset_input_pins(&mut self) {
        self.input_pins = [false; CHIP8_INPUT_PIN_COUNT];
    }
}

impl Chip8 {
    /// Constructs a new CHIP-8 and appropriately initializes all fields so that
    /// it is ready for the first execution cycle. Essentially this means that
    /// the program counter is set to 0x200 and the default CHIP-8 charset is
    /// loaded at memory address `CHIP8_CHARSET_OFFSET`. The timers start ticking
    /// right away. Note that no program is loaded upon initialization.
    pub fn new() -> Self {
        Chip8::with_timer_interval(CHIP8_TIMER_INTERVAL)
    }

    /// Like `new`, but decrements the timers every `interval` instead of once per second.
    pub fn with_timer_interval(interval: Duration) -> Self {
        let mut memory = [0; CHIP8_MEMORY_SIZE];
        let charset_start = CHIP8_CHARSET_OFFSET as usize;
        memory[charset_start..charset_start + CHIP8_CHARSET_LEN as usize]
            .copy_from_slice(&CHIP8_CHARSET);

        let timers = Arc::new(Timers::new());
        let timer_thread = TimerThread::spawn(timers.clone(), interval);

        Chip8 {
            memory,
            registers: [0; CHIP8_REGISTER_COUNT],
            index: 0,
            program_counter: CHIP8_PROGRAM_OFFSET,
            output_pins: [false; CHIP8_DISPLAY_WIDTH * CHIP8_DISPLAY_HEIGHT],
            timers,
            timer_thread,
            input_pins: [false; CHIP8_INPUT_PIN_COUNT],
            stack: CallStack::new(),
            frame_sink: None,
            fault: None,
        }
    }

    /// Constructs a new CHIP-8 with `program` loaded at the program origin.
    pub fn with_program(program: &[u8]) -> Result<Self, LoadProgramError> {
        let mut chip8 = Chip8::new();
        chip8.load_program_bytes(program)?;
        Ok(chip8)
    }

    /// Attaches a frame consumer and returns its receiving end. From now on every
    /// draw instruction blocks until the returned receiver accepted the frame.
    /// A previously attached consumer is detached.
    pub fn attach_frame_sink(&mut self) -> Receiver<Frame> {
        let (sender, receiver) = frame::frame_channel();
        self.frame_sink = Some(sender);
        receiver
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Stops the background timer thread. The timers keep their values.
    pub fn stop_timers(&mut self) {
        self.timer_thread.stop();
    }

    pub fn is_halted(&self) -> bool {
        self.fault.is_some()
    }

    /// Fetches the instruction at the program counter and advances the program
    /// counter past it.
    fn fetch(&mut self) -> Result<Opcode, ChipError> {
        let bytes = self.memory_slice(self.program_counter, 2)?;
        let opcode = Opcode::new(&[bytes[0], bytes[1]]);
        trace!("{:#05X}: {:04X}", self.program_counter, opcode.word());
        util::increment_program_counter(self);
        Ok(opcode)
    }

    /// Returns `len` bytes of memory starting at `address`.
    fn memory_slice(&self, address: u16, len: usize) -> Result<&[u8], ChipError> {
        let range = memory_range(address, len)?;
        Ok(&self.memory[range])
    }

    fn memory_slice_mut(&mut self, address: u16, len: usize) -> Result<&mut [u8], ChipError> {
        let range = memory_range(address, len)?;
        Ok(&mut self.memory[range])
    }

    /// Hands the current display over to the frame sink, if one is attached.
    fn emit_frame(&mut self) {
        let disconnected = match &self.frame_sink {
            Some(sink) => sink.send(frame::render_frame(&self.output_pins)).is_err(),
            None => false,
        };

        if disconnected {
            warn!("Frame consumer went away, detaching the frame sink");
            self.frame_sink = None;
        }
    }
}

/// Maps `len` bytes starting at `address` to a range of memory indices.
fn memory_range(address: u16, len: usize) -> Result<Range<usize>, ChipError> {
    let start = address as usize;
    let end = start + len;
    if end > CHIP8_MEMORY_SIZE {
        return Err(ChipError::OutOfBoundsAccess {
            address: start.max(CHIP8_MEMORY_SIZE),
        });
    }
    Ok(start..end)
}

impl Default for Chip8 {
    fn default() -> Self {
        Chip8::new()
    }
}
