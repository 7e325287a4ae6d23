//! The two MC6821 PIAs of the Dragon 32.
//!
//! PIA0 (`0xFF00..=0xFF03`) carries the keyboard matrix, the joystick
//! comparator inputs, audio-mux select bit 0 and the field-sync IRQ.
//! PIA1 (`0xFF20..=0xFF23`) carries the 6-bit DAC, the cassette input
//! bit, the VDG mode bits and audio-mux select bit 1.

use crate::core::{Bus, BusError, CassetteDeck, HostPort, IoDevice};
use crate::cpu::InterruptLines;
use crate::device::vdg::VdgSignals;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const PIA0_PA: u16 = 0xFF00;
pub const PIA0_CRA: u16 = 0xFF01;
pub const PIA0_PB: u16 = 0xFF02;
pub const PIA0_CRB: u16 = 0xFF03;

pub const PIA1_PA: u16 = 0xFF20;
pub const PIA1_CRA: u16 = 0xFF21;
pub const PIA1_PB: u16 = 0xFF22;
pub const PIA1_CRB: u16 = 0xFF23;

// CA2/CB2 field of a control register, and the "output high" pattern.
const CR_CAB2_MASK: u8 = 0x38;
const CR_CAB2_SET: u8 = 0x38;

/// CA1/CB1 interrupt enable bit.
const CR_INTR: u8 = 0x01;
/// IRQA1/IRQB1 status bit.
const CR_IRQ_STAT: u8 = 0x80;

/// Cassette motor control bit in PIA1 CRA.
const MOTOR_ON: u8 = 0x08;

// Square-wave read thresholds of the cassette bit pump. The Dragon ROM
// decides a bit's value by counting reads against a threshold of 18
// (RAM location 0x0092).
const BIT_THRESHOLD_HI: u32 = 4;
const BIT_THRESHOLD_LO: u32 = 20;

/// Field-sync interrupt interval (50 Hz).
const PIA_VSYNC_INTERVAL: u32 = 1_000_000 / 50;

const SCAN_CODE_F1: u8 = 58;

const KBD_ROWS: usize = 7;
const NO_ROW: u8 = 255;

// Dragon keyboard map
//
//       LSB              $FF02                    MSB
//     | PB0   PB1   PB2   PB3   PB4   PB5   PB6   PB7 | <- column
// ----|-----------------------------------------------|-----------
// PA0 |   0     1     2     3     4     5     6     7 |   LSB
// PA1 |   8     9     :     ;     ,     -     .     / |
// PA2 |   @     A     B     C     D     E     F     G |
// PA3 |   H     I     J     K     L     M     N     O | $FF00
// PA4 |   P     Q     R     S     T     U     V     W |
// PA5 |   X     Y     Z    Up  Down  Left Right Space |
// PA6 | ENT   CLR   BRK   N/C   N/C   N/C   N/C  SHFT |
// PA7 | Comparator input                              |   MSB
//
/// Scan code to (column closure mask, row index). `(0xFF, NO_ROW)` marks
/// codes with no matrix position.
static SCAN_CODE_TABLE: [(u8, u8); 81] = [
    (0xFF, NO_ROW),      // #0
    (0b1111_1011, 6),    //      Break (ESC key)
    (0b1111_1101, 0),    //      1
    (0b1111_1011, 0),    //      2
    (0b1111_0111, 0),    //      3
    (0b1110_1111, 0),    //      4
    (0b1101_1111, 0),    //      5
    (0b1011_1111, 0),    //      6
    (0b0111_1111, 0),    //      7
    (0b1111_1110, 1),    //      8
    (0b1111_1101, 1),    // #10  9
    (0b1111_1110, 0),    //      0
    (0b1101_1111, 1),    //      -
    (0b1111_1011, 1),    //      :
    (0b1111_1101, 6),    //      CLEAR
    (0xFF, NO_ROW),
    (0b1111_1101, 4),    //      Q
    (0b0111_1111, 4),    //      W
    (0b1101_1111, 2),    //      E
    (0b1111_1011, 4),    //      R
    (0b1110_1111, 4),    // #20  T
    (0b1111_1101, 5),    //      Y
    (0b1101_1111, 4),    //      U
    (0b1111_1101, 3),    //      I
    (0b0111_1111, 3),    //      O
    (0b1111_1110, 4),    //      P
    (0b1111_1110, 2),    //      @
    (0xFF, NO_ROW),
    (0b1111_1110, 6),    //      Enter
    (0xFF, NO_ROW),
    (0b1111_1101, 2),    // #30  A
    (0b1111_0111, 4),    //      S
    (0b1110_1111, 2),    //      D
    (0b1011_1111, 2),    //      F
    (0b0111_1111, 2),    //      G
    (0b1111_1110, 3),    //      H
    (0b1111_1011, 3),    //      J
    (0b1111_0111, 3),    //      K
    (0b1110_1111, 3),    //      L
    (0b1111_0111, 1),    //      ;
    (0xFF, NO_ROW),      // #40
    (0xFF, NO_ROW),
    (0b0111_1111, 6),    //      Shift key
    (0xFF, NO_ROW),
    (0b1111_1011, 5),    //      Z
    (0b1111_1110, 5),    //      X
    (0b1111_0111, 2),    //      C
    (0b1011_1111, 4),    //      V
    (0b1111_1011, 2),    //      B
    (0b1011_1111, 3),    //      N
    (0b1101_1111, 3),    // #50  M
    (0b1110_1111, 1),    //      ,
    (0b1011_1111, 1),    //      .
    (0b0111_1111, 1),    //      /
    (0xFF, NO_ROW),
    (0xFF, NO_ROW),
    (0xFF, NO_ROW),
    (0b0111_1111, 5),    //      Space bar
    (0xFF, NO_ROW),
    (0xFF, NO_ROW),      //      F1
    (0xFF, NO_ROW),      // #60  F2
    (0xFF, NO_ROW),      //      F3
    (0xFF, NO_ROW),      //      F4
    (0xFF, NO_ROW),      //      F5
    (0xFF, NO_ROW),      //      F6
    (0xFF, NO_ROW),      //      F7
    (0xFF, NO_ROW),      //      F8
    (0xFF, NO_ROW),      //      F9
    (0xFF, NO_ROW),      //      F10
    (0xFF, NO_ROW),
    (0xFF, NO_ROW),      // #70
    (0xFF, NO_ROW),
    (0b1111_0111, 5),    //      Up arrow
    (0xFF, NO_ROW),
    (0xFF, NO_ROW),
    (0b1101_1111, 5),    //      Left arrow
    (0xFF, NO_ROW),
    (0b1011_1111, 5),    //      Right arrow
    (0xFF, NO_ROW),
    (0xFF, NO_ROW),
    (0b1110_1111, 5),    // #80  Down arrow
];

/// Two-bit analog multiplexer select shared by both PIAs.
#[derive(Clone, Default)]
pub struct AudioMux {
    select: Rc<Cell<u8>>,
}

impl AudioMux {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&self) -> u8 {
        self.select.get()
    }

    /// Set or clear one select bit and return the combined value.
    fn apply(&self, bit: u8, on: bool) -> u8 {
        let value = if on {
            self.select.get() | bit
        } else {
            self.select.get() & !bit
        };
        self.select.set(value);
        value
    }
}

/// PIA0: keyboard, joystick inputs, audio-mux bit 0, field-sync IRQ.
pub struct Pia0 {
    cra: u8,
    crb: u8,
    cb1_int_enabled: bool,
    /// Row closure matrix, one byte per PA row line; bits are active low.
    keyboard_rows: [u8; KBD_ROWS],
    /// Row-scan response latched into PA by the last column write.
    row_scan: u8,
    function_key: u8,
    last_vsync: u32,

    host: Rc<RefCell<dyn HostPort>>,
    mux: AudioMux,
    lines: InterruptLines,
}

impl Pia0 {
    pub fn new(host: Rc<RefCell<dyn HostPort>>, mux: AudioMux, lines: InterruptLines) -> Self {
        Self {
            cra: 0,
            crb: 0,
            cb1_int_enabled: false,
            keyboard_rows: [0xFF; KBD_ROWS],
            row_scan: 0x7F,
            function_key: 0,
            last_vsync: 0,
            host,
            mux,
            lines,
        }
    }

    /// Register the four-address window on the bus.
    pub fn attach(this: &Rc<RefCell<Self>>, bus: &mut Bus) -> Result<(), BusError> {
        bus.define_io(PIA0_PA, PIA0_CRB, this.clone())
    }

    /// Called by the scheduler once per render slot: raise the field-sync
    /// IRQ when at least one 50 Hz interval has elapsed and the interrupt
    /// is enabled through CRB bit 0.
    pub fn vsync_irq(&mut self) {
        let now = self.host.borrow_mut().system_timer();
        if now.wrapping_sub(self.last_vsync) < PIA_VSYNC_INTERVAL {
            return;
        }
        self.last_vsync = now;

        if self.cb1_int_enabled {
            self.crb |= CR_IRQ_STAT;
            self.lines.set_irq(true);
        }
    }

    /// Latched function key (1..=10 for F1..F10), cleared by the read.
    pub fn function_key(&mut self) -> u8 {
        std::mem::take(&mut self.function_key)
    }

    /// Row-scan response: a row bit asserts when the complement of the
    /// column drive pattern matches that row's closure mask.
    fn keyboard_row_scan(&self, column_drive: u8) -> u8 {
        let mut response = 0;
        for (row, closures) in self.keyboard_rows.iter().enumerate() {
            if (!column_drive & closures) == !column_drive {
                response |= 1 << row;
            }
        }
        response
    }

    /// Column-select write: the ROM is probing for a key press, which is
    /// the moment to pull a scan code from the host and fold it into the
    /// row matrix.
    fn column_write(&mut self, column_drive: u8) {
        let scan_code = self.host.borrow_mut().keyboard_read();

        if (59..=68).contains(&scan_code) {
            // F1..F10 escape the emulation; latch one at a time.
            if self.function_key == 0 {
                self.function_key = scan_code - SCAN_CODE_F1;
            }
        } else if scan_code != 0 {
            let index = (scan_code & 0x7F) as usize;
            if let Some(&(closure_mask, row)) = SCAN_CODE_TABLE.get(index)
                && row != NO_ROW
            {
                // Make codes close row switches, break codes (bit 7)
                // release them.
                if scan_code & 0x80 != 0 {
                    self.keyboard_rows[row as usize] |= !closure_mask;
                } else {
                    self.keyboard_rows[row as usize] &= closure_mask;
                }
            }
            // Codes with no matrix position are dropped.
        }

        let mut response = self.keyboard_row_scan(column_drive);
        if self.host.borrow_mut().joystick_comparator() {
            response |= 0x80;
        } else {
            response &= 0x7F;
        }
        self.row_scan = response;
    }
}

impl IoDevice for Pia0 {
    fn on_read(&mut self, _bus: &mut Bus, addr: u16, data: u8) -> u8 {
        match addr {
            PIA0_PA => {
                // Bits 1..6 are the latched row scan; bit 7 follows the
                // joystick comparator live; bit 0 is forced low unless
                // the right joystick button is held, so an open button
                // does not disturb the keyboard scan.
                let mut response = self.row_scan;
                if self.host.borrow_mut().joystick_comparator() {
                    response |= 0x80;
                } else {
                    response &= 0x7F;
                }
                if !self.host.borrow_mut().rjoystick_button() {
                    response &= 0xFE;
                }
                response
            }
            // Reading the data port deasserts the field-sync IRQ.
            PIA0_PB => {
                self.crb &= !CR_IRQ_STAT;
                self.lines.set_irq(false);
                data
            }
            PIA0_CRA => self.cra,
            _ => self.crb,
        }
    }

    fn on_write(&mut self, _bus: &mut Bus, addr: u16, data: u8) {
        match addr {
            PIA0_PA => {}
            PIA0_PB => self.column_write(data),
            PIA0_CRA => {
                self.cra = data;
                let select = self.mux.apply(0x01, data & CR_CAB2_MASK == CR_CAB2_SET);
                self.host.borrow_mut().audio_mux_set(select);
            }
            _ => {
                self.crb = data;
                self.cb1_int_enabled = data & CR_INTR != 0;
            }
        }
    }
}

/// Cassette bit-pump state: the current tape byte is serialized LSB
/// first, each bit synthesized as a square wave over a read-count
/// threshold (narrow for one bits, wide for zeros).
#[derive(Default)]
struct BitPump {
    byte: u8,
    bit_index: u8,
    threshold: u32,
    count: u32,
}

/// PIA1: DAC output, cassette input, VDG mode bits, audio-mux bit 1.
pub struct Pia1 {
    cra: u8,
    crb: u8,
    pump: BitPump,

    host: Rc<RefCell<dyn HostPort>>,
    deck: Rc<RefCell<dyn CassetteDeck>>,
    video: VdgSignals,
    mux: AudioMux,
}

impl Pia1 {
    pub fn new(
        host: Rc<RefCell<dyn HostPort>>,
        deck: Rc<RefCell<dyn CassetteDeck>>,
        video: VdgSignals,
        mux: AudioMux,
    ) -> Self {
        Self {
            cra: 0,
            crb: 0,
            pump: BitPump::default(),
            host,
            deck,
            video,
            mux,
        }
    }

    /// Register the four-address window on the bus.
    pub fn attach(this: &Rc<RefCell<Self>>, bus: &mut Bus) -> Result<(), BusError> {
        bus.define_io(PIA1_PA, PIA1_CRB, this.clone())
    }

    /// Synthesize the cassette input on PA bit 0.
    ///
    /// Bits leave the tape byte LSB first. A one bit holds PA0 low for
    /// `BIT_THRESHOLD_HI / 2` reads and high for the rest; a zero bit
    /// uses the wide threshold. Because the wave advances on CPU reads,
    /// the stream self-synchronizes with the ROM's bit-timing loop. At
    /// end of tape the pump feeds 0x55 leader bytes forever; the file is
    /// never closed.
    fn cassette_bit(&mut self, data: u8) -> u8 {
        if self.pump.bit_index == 0 {
            self.pump.byte = self.deck.borrow_mut().read_byte().unwrap_or(0x55);
            self.pump.bit_index = 9;
            self.pump.threshold = 0;
            self.pump.count = 0;
        }

        if self.pump.count == self.pump.threshold {
            self.pump.threshold = if self.pump.byte & 0x01 != 0 {
                BIT_THRESHOLD_HI
            } else {
                BIT_THRESHOLD_LO
            };
            self.pump.count = 0;
            self.pump.byte >>= 1;
            self.pump.bit_index -= 1;
        }

        let out = if self.pump.count < self.pump.threshold / 2 {
            data & 0xFE
        } else {
            data | 0x01
        };
        self.pump.count += 1;
        out
    }
}

impl IoDevice for Pia1 {
    fn on_read(&mut self, _bus: &mut Bus, addr: u16, data: u8) -> u8 {
        match addr {
            PIA1_PA => self.cassette_bit(data),
            PIA1_PB => {
                self.video.set_mode_pia((data >> 3) & 0x1F);
                data
            }
            PIA1_CRA => self.cra,
            _ => self.crb,
        }
    }

    fn on_write(&mut self, _bus: &mut Bus, addr: u16, data: u8) {
        match addr {
            // PA bits 2..7 drive the 6-bit DAC.
            PIA1_PA => {
                let value = (data >> 2) & 0x3F;
                self.host.borrow_mut().write_dac(value);
            }
            // PB bits 3..7 are the VDG mode byte.
            PIA1_PB => self.video.set_mode_pia((data >> 3) & 0x1F),
            PIA1_CRA => {
                self.cra = data;
                // CA2 as output: motor-on opens the mounted cassette
                // file. Reopening does not rewind, and motor-off is
                // deliberately a no-op.
                if data & 0x30 != 0 && data & MOTOR_ON != 0 {
                    self.deck.borrow_mut().motor_on();
                }
            }
            _ => {
                self.crb = data;
                let select = self.mux.apply(0x02, data & CR_CAB2_MASK == CR_CAB2_SET);
                self.host.borrow_mut().audio_mux_set(select);
            }
        }
    }
}
