use crossbeam_channel::Receiver;
use log::{error, info};
use std::env;
use std::fs;
use std::thread;
use std::time::Duration;
use thiserror::Error;

use chip8_interpreter::chip::{
    chip8::{frame::Frame, Chip8},
    Chip, LoadProgramError,
};

/// The delay between two cycles if none is given on the command line.
const DEFAULT_CYCLE_DELAY_MS: u64 = 100;

/// Error type for errors that occur during parsing the command line arguments
/// and loading the program based on the arguments.
#[derive(Debug, Error)]
enum Error {
    #[error("Usage: {0}")]
    InvalidUsage(String),

    #[error("Could not read program {path}: {source}")]
    CouldNotReadFile {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    InvalidProgram(#[from] LoadProgramError),
}

/// Options taken from the command line: `<rom-path> [cycle-delay-ms]`.
struct Options {
    program_path: String,
    cycle_delay: Duration,
}

fn parse_args() -> Result<Options, Error> {
    let usage = || {
        Error::InvalidUsage("chip8_terminal <path-to-program> [cycle-delay-ms]".to_string())
    };

    let mut args = env::args().skip(1);
    let program_path = args.next().ok_or_else(usage)?;
    let cycle_delay = match args.next() {
        Some(delay) => delay.parse::<u64>().map_err(|_| usage())?,
        None => DEFAULT_CYCLE_DELAY_MS,
    };

    Ok(Options {
        program_path,
        cycle_delay: Duration::from_millis(cycle_delay),
    })
}

/// Reads the program at `path` and loads it into `chip8`.
fn load_program(chip8: &mut Chip8, path: &str) -> Result<usize, Error> {
    let program = fs::read(path).map_err(|source| Error::CouldNotReadFile {
        path: path.to_string(),
        source,
    })?;
    Ok(chip8.load_program_bytes(&program)?)
}

/// Prints every frame until the chip goes away.
fn print_frames(frames: Receiver<Frame>) {
    for frame in frames.iter() {
        println!("{}", frame);
    }
}

/// The event loop. Constantly loops over (1) invoke cycle on the chip,
/// (2) sleep for the cycle delay, (3) start over. Returns once the program
/// faulted.
fn event_loop<T: Chip>(mut chip: T, cycle_delay: Duration) {
    loop {
        if let Err(e) = chip.cycle() {
            error!("Stopping: {}", e);
            return;
        }
        thread::sleep(cycle_delay);
    }
}

fn run() -> Result<(), Error> {
    let options = parse_args()?;

    let mut chip8 = Chip8::new();
    let size = load_program(&mut chip8, &options.program_path)?;
    info!("Running {} ({} bytes)", options.program_path, size);

    let frames = chip8.attach_frame_sink();
    let printer = thread::spawn(move || print_frames(frames));

    // Dropping the chip at the end of the loop closes the frame channel.
    event_loop(chip8, options.cycle_delay);

    if printer.join().is_err() {
        error!("Frame printer panicked");
    }
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
