//! Line buffer between the control loop and the USB serial port.
//!
//! Log records and display readouts are formatted into fixed-size lines and
//! queued here from any priority. The tick task hands them to the host.

use core::cell::RefCell;
use core::fmt::{self, Write};

use cortex_m::interrupt::{self, Mutex};
use heapless::{Deque, String};
use log::{LevelFilter, Metadata, Record};

use crate::config::{CONSOLE_LINES, LINE_LENGTH};

pub type Line = String<LINE_LENGTH>;

static LINES: Mutex<RefCell<Deque<Line, CONSOLE_LINES>>> = Mutex::new(RefCell::new(Deque::new()));

/// Queue one line, dropping the oldest when the host is not keeping up.
/// Lines are cut short to leave room for the `\r\n` they end with.
pub fn push(args: fmt::Arguments) {
    let mut line = Line::new();
    write!(line, "{}", args).ok();

    let mut end = line.len().min(LINE_LENGTH - 2);
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    line.truncate(end);
    line.push_str("\r\n").ok();

    interrupt::free(|cs| {
        let mut lines = LINES.borrow(cs).borrow_mut();

        if lines.is_full() {
            lines.pop_front();
        }
        lines.push_back(line).ok();
    });
}

pub fn pop() -> Option<Line> {
    interrupt::free(|cs| LINES.borrow(cs).borrow_mut().pop_front())
}

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            push(format_args!("{} {}: {}", record.level(), record.target(), record.args()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

pub fn init_logger(level: LevelFilter) {
    // Only fails if a logger is already installed
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
