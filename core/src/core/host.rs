//! Host provider contracts.
//!
//! The core calls out of the emulation through these narrow traits; the
//! front-end (or a test fixture) supplies the implementations. Everything
//! platform-specific (SDL, timers, file systems) stays on the other side
//! of this boundary.

use std::collections::VecDeque;

/// Host services consumed by the PIA pair.
pub trait HostPort {
    /// Monotonic microsecond counter.
    fn system_timer(&mut self) -> u32;

    /// One PS/2-style make/break scan code, `0` when none is pending.
    /// Bit 7 set marks a break (key release) code.
    fn keyboard_read(&mut self) -> u8;

    /// DAC-versus-potentiometer comparator output.
    fn joystick_comparator(&mut self) -> bool;

    /// Right joystick fire button, `true` while held.
    fn rjoystick_button(&mut self) -> bool;

    /// Select the analog multiplexer target (2-bit value:
    /// 0 = DAC, 1 = cassette, 2 = joystick X, 3 = joystick Y).
    fn audio_mux_set(&mut self, select: u8);

    /// Latch a 6-bit DAC sample.
    fn write_dac(&mut self, value: u8);
}

/// Cassette tape byte source feeding the PIA bit pump.
pub trait CassetteDeck {
    /// Motor-on edge: open the mounted file. Reopening an already open
    /// file does not rewind it. Motor-off is never signalled.
    fn motor_on(&mut self);

    /// Next byte of the tape stream, `None` at end of tape.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Scriptable host used by unit tests and headless runs. The clock only
/// advances when the test moves it.
#[derive(Default)]
pub struct NullHost {
    pub now: u32,
    pub scan_codes: VecDeque<u8>,
    pub comparator: bool,
    pub button: bool,
    pub mux: u8,
    pub dac: u8,
}

impl HostPort for NullHost {
    fn system_timer(&mut self) -> u32 {
        self.now
    }

    fn keyboard_read(&mut self) -> u8 {
        self.scan_codes.pop_front().unwrap_or(0)
    }

    fn joystick_comparator(&mut self) -> bool {
        self.comparator
    }

    fn rjoystick_button(&mut self) -> bool {
        self.button
    }

    fn audio_mux_set(&mut self, select: u8) {
        self.mux = select;
    }

    fn write_dac(&mut self, value: u8) {
        self.dac = value;
    }
}

/// Deck with no tape mounted: the bit pump sees end-of-tape forever.
#[derive(Default)]
pub struct NullDeck {
    pub motor_on_count: u32,
}

impl CassetteDeck for NullDeck {
    fn motor_on(&mut self) {
        self.motor_on_count += 1;
    }

    fn read_byte(&mut self) -> Option<u8> {
        None
    }
}
