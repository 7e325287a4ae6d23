//! Dragon 32 home computer.
//!
//! Hardware: Motorola MC6809E @ ~1 MHz, 32 KiB RAM, 16 KiB BASIC ROM,
//! MC6883 (SAM) address multiplexer, two MC6821 PIAs carrying the
//! keyboard matrix, joysticks, cassette interface and 6-bit DAC, and an
//! MC6847 VDG for video.
//!
//! Memory map: `0x0000..=0x7FFF` RAM, `0x8000..=0xFEFF` ROM,
//! PIA0 at `0xFF00`, PIA1 at `0xFF20`, SAM toggles at `0xFFC0..=0xFFDF`,
//! CPU vectors at `0xFFF0..=0xFFFF` (shadowed to the ROM top by the SAM).

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use ember_core::core::machine::{InputButton, Machine};
use ember_core::core::{Bus, CassetteDeck, HostPort};
use ember_core::cpu::{InterruptLines, M6809, RunState};
use ember_core::device::pia::{AudioMux, Pia0, Pia1};
use ember_core::device::sam::Sam;
use ember_core::device::vdg::{Vdg, VdgSignals, VideoMode};

use crate::registry::MachineSpec;
use crate::rom_loader::{RomImage, RomLoadError};

pub const DRAGON_ROM_START: u16 = 0x8000;
pub const DRAGON_ROM_END: u16 = 0xFEFF;

/// CPU instructions per render slot, approximating a 20 ms screen
/// refresh at the emulated clock rate.
pub const VDG_RENDER_CYCLES: u32 = 4500;

/// Holding reset at least this long forces a cold start.
pub const LONG_RESET_US: u32 = 1_500_000;

/// BASIC warm/cold start flag; anything but 0x55 forces a cold start.
const COLD_START_FLAG: u16 = 0x0071;

/// Input ID for the reset button (keyboard scan codes stay below this).
pub const INPUT_RESET: u8 = 0xF0;

/// Keyboard input IDs are the make scan codes themselves.
static DRAGON_INPUT_MAP: &[InputButton] = &[
    InputButton { id: 1, name: "Break" },
    InputButton { id: 2, name: "1" },
    InputButton { id: 3, name: "2" },
    InputButton { id: 4, name: "3" },
    InputButton { id: 5, name: "4" },
    InputButton { id: 6, name: "5" },
    InputButton { id: 7, name: "6" },
    InputButton { id: 8, name: "7" },
    InputButton { id: 9, name: "8" },
    InputButton { id: 10, name: "9" },
    InputButton { id: 11, name: "0" },
    InputButton { id: 12, name: "-" },
    InputButton { id: 13, name: ":" },
    InputButton { id: 14, name: "Clear" },
    InputButton { id: 16, name: "Q" },
    InputButton { id: 17, name: "W" },
    InputButton { id: 18, name: "E" },
    InputButton { id: 19, name: "R" },
    InputButton { id: 20, name: "T" },
    InputButton { id: 21, name: "Y" },
    InputButton { id: 22, name: "U" },
    InputButton { id: 23, name: "I" },
    InputButton { id: 24, name: "O" },
    InputButton { id: 25, name: "P" },
    InputButton { id: 26, name: "@" },
    InputButton { id: 28, name: "Enter" },
    InputButton { id: 30, name: "A" },
    InputButton { id: 31, name: "S" },
    InputButton { id: 32, name: "D" },
    InputButton { id: 33, name: "F" },
    InputButton { id: 34, name: "G" },
    InputButton { id: 35, name: "H" },
    InputButton { id: 36, name: "J" },
    InputButton { id: 37, name: "K" },
    InputButton { id: 38, name: "L" },
    InputButton { id: 39, name: ";" },
    InputButton { id: 42, name: "Shift" },
    InputButton { id: 44, name: "Z" },
    InputButton { id: 45, name: "X" },
    InputButton { id: 46, name: "C" },
    InputButton { id: 47, name: "V" },
    InputButton { id: 48, name: "B" },
    InputButton { id: 49, name: "N" },
    InputButton { id: 50, name: "M" },
    InputButton { id: 51, name: "," },
    InputButton { id: 52, name: "." },
    InputButton { id: 53, name: "/" },
    InputButton { id: 57, name: "Space" },
    InputButton { id: 59, name: "F1" },
    InputButton { id: 60, name: "F2" },
    InputButton { id: 61, name: "F3" },
    InputButton { id: 62, name: "F4" },
    InputButton { id: 63, name: "F5" },
    InputButton { id: 64, name: "F6" },
    InputButton { id: 65, name: "F7" },
    InputButton { id: 66, name: "F8" },
    InputButton { id: 67, name: "F9" },
    InputButton { id: 68, name: "F10" },
    InputButton { id: 72, name: "Up" },
    InputButton { id: 75, name: "Left" },
    InputButton { id: 77, name: "Right" },
    InputButton { id: 80, name: "Down" },
    InputButton { id: INPUT_RESET, name: "Reset" },
];

/// Host providers backed by the process clock and front-end-fed queues.
struct DragonHost {
    epoch: Instant,
    scan_codes: VecDeque<u8>,
    dac: u8,
    mux: u8,
    joystick_x: u8,
    joystick_y: u8,
    joystick_button: bool,
}

impl DragonHost {
    fn new() -> Self {
        Self {
            epoch: Instant::now(),
            scan_codes: VecDeque::new(),
            dac: 0,
            mux: 0,
            joystick_x: 32,
            joystick_y: 32,
            joystick_button: false,
        }
    }
}

impl HostPort for DragonHost {
    fn system_timer(&mut self) -> u32 {
        self.epoch.elapsed().as_micros() as u32
    }

    fn keyboard_read(&mut self) -> u8 {
        self.scan_codes.pop_front().unwrap_or(0)
    }

    fn joystick_comparator(&mut self) -> bool {
        // The BASIC ROM ramps the DAC through successive approximation
        // and watches this comparator against the selected pot.
        let pot = match self.mux {
            2 => self.joystick_x,
            3 => self.joystick_y,
            _ => 0,
        };
        self.dac > pot
    }

    fn rjoystick_button(&mut self) -> bool {
        self.joystick_button
    }

    fn audio_mux_set(&mut self, select: u8) {
        self.mux = select;
    }

    fn write_dac(&mut self, value: u8) {
        self.dac = value;
    }
}

/// Cassette deck holding one mounted CAS image in memory.
///
/// The PIA opens the deck on motor-on; reopening never rewinds, and end
/// of tape is reported as `None` so the bit pump pads leader bytes.
#[derive(Default)]
pub struct CasDeck {
    mounted: Option<Vec<u8>>,
    position: usize,
    open: bool,
}

impl CasDeck {
    /// Mount a CAS image, rewinding to the start. The file stays closed
    /// until the emulated machine turns the motor on.
    pub fn mount(&mut self, data: Vec<u8>) {
        self.mounted = Some(data);
        self.position = 0;
        self.open = false;
    }
}

impl CassetteDeck for CasDeck {
    fn motor_on(&mut self) {
        if self.mounted.is_some() {
            self.open = true;
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        if !self.open {
            return None;
        }
        let byte = self.mounted.as_ref()?.get(self.position).copied();
        if byte.is_some() {
            self.position += 1;
        }
        byte
    }
}

/// The assembled Dragon 32.
pub struct Dragon32System {
    cpu: M6809,
    bus: Bus,
    vdg: Vdg,

    #[allow(dead_code)]
    sam: Rc<RefCell<Sam>>,
    pia0: Rc<RefCell<Pia0>>,
    #[allow(dead_code)]
    pia1: Rc<RefCell<Pia1>>,

    host: Rc<RefCell<DragonHost>>,
    deck: Rc<RefCell<CasDeck>>,
    lines: InterruptLines,

    reset_down_at: Option<u32>,
    reset_pending: bool,
}

impl Dragon32System {
    /// Build the machine: ROM mapped and protected, SAM and both PIAs
    /// registered on the bus, CPU held in reset until the first frame.
    pub fn new(rom: &RomImage) -> Result<Self, RomLoadError> {
        let mut bus = Bus::new();
        bus.load(DRAGON_ROM_START, rom.bytes())?;
        bus.define_rom(DRAGON_ROM_START, DRAGON_ROM_END)?;

        let cpu = M6809::new();
        let lines = cpu.lines();
        let signals = VdgSignals::new();
        let mux = AudioMux::new();
        let host = Rc::new(RefCell::new(DragonHost::new()));
        let deck = Rc::new(RefCell::new(CasDeck::default()));

        let sam = Rc::new(RefCell::new(Sam::new(signals.clone())));
        Sam::attach(&sam, &mut bus)?;

        let pia0 = Rc::new(RefCell::new(Pia0::new(
            host.clone(),
            mux.clone(),
            lines.clone(),
        )));
        Pia0::attach(&pia0, &mut bus)?;

        let pia1 = Rc::new(RefCell::new(Pia1::new(
            host.clone(),
            deck.clone(),
            signals.clone(),
            mux,
        )));
        Pia1::attach(&pia1, &mut bus)?;

        let vdg = Vdg::new(signals);

        lines.set_reset(true);
        Ok(Self {
            cpu,
            bus,
            vdg,
            sam,
            pia0,
            pia1,
            host,
            deck,
            lines,
            reset_down_at: None,
            reset_pending: true,
        })
    }

    /// Mount a cassette image; the machine opens it on motor-on.
    pub fn mount_cassette(&mut self, data: Vec<u8>) {
        self.deck.borrow_mut().mount(data);
    }

    /// Latched emulator escape key (1..=10 for F1..F10), cleared by the
    /// read.
    pub fn function_key(&mut self) -> u8 {
        self.pia0.borrow_mut().function_key()
    }

    /// Joystick pot positions (0..=63) and right fire button.
    pub fn set_joystick(&mut self, x: u8, y: u8, button: bool) {
        let mut host = self.host.borrow_mut();
        host.joystick_x = x & 0x3F;
        host.joystick_y = y & 0x3F;
        host.joystick_button = button;
    }

    /// Current 6-bit DAC level, for host-side audio output.
    pub fn dac_level(&self) -> u8 {
        self.host.borrow().dac
    }

    /// Current audio multiplexer target.
    pub fn audio_mux(&self) -> u8 {
        self.host.borrow().mux
    }

    /// Video mode switch since the last call, if any.
    pub fn video_mode_change(&mut self) -> Option<VideoMode> {
        self.vdg.take_mode_change()
    }

    pub fn cpu(&self) -> &M6809 {
        &self.cpu
    }

    /// Execute a single CPU instruction (diagnostics/tests).
    pub fn step(&mut self) -> RunState {
        let state = self.cpu.step(&mut self.bus);
        if self.reset_pending {
            self.lines.set_reset(false);
            self.reset_pending = false;
        }
        state
    }

    pub fn read_mem(&mut self, addr: u16) -> u8 {
        self.bus.read(addr)
    }

    pub fn write_mem(&mut self, addr: u16, data: u8) {
        let _ = self.bus.write(addr, data);
    }

    /// Spoil the warm-start flag and pulse reset: BASIC cold-boots when
    /// the flag holds anything but 0x55.
    pub fn force_cold_start(&mut self) {
        let _ = self.bus.write(COLD_START_FLAG, 0);
        self.lines.set_reset(true);
        self.reset_pending = true;
    }

    fn reset_input(&mut self, pressed: bool) {
        if pressed {
            let now = self.host.borrow_mut().system_timer();
            self.reset_down_at = Some(now);
            return;
        }

        let Some(down_at) = self.reset_down_at.take() else {
            return;
        };
        let held = self.host.borrow_mut().system_timer().wrapping_sub(down_at);
        if held >= LONG_RESET_US {
            self.force_cold_start();
        } else {
            self.lines.set_reset(true);
            self.reset_pending = true;
        }
    }
}

impl Machine for Dragon32System {
    fn display_size(&self) -> (u32, u32) {
        let (w, h) = self.vdg.size();
        (w as u32, h as u32)
    }

    /// One render slot: a screen refresh worth of CPU work, then a full
    /// VDG redraw and the field-sync interrupt.
    fn run_frame(&mut self) {
        for _ in 0..VDG_RENDER_CYCLES {
            self.cpu.step(&mut self.bus);
            if self.reset_pending {
                // One step in reset latches the vector; release the line
                // so execution starts next step.
                self.lines.set_reset(false);
                self.reset_pending = false;
            }
        }

        self.vdg.render(&mut self.bus);
        self.pia0.borrow_mut().vsync_irq();
    }

    fn render_frame(&self, buffer: &mut [u8]) {
        let frame = self.vdg.frame();
        for (pixel, chunk) in frame.iter().zip(buffer.chunks_exact_mut(3)) {
            let [b, g, r] = Vdg::PALETTE[*pixel as usize];
            chunk[0] = r;
            chunk[1] = g;
            chunk[2] = b;
        }
    }

    fn set_input(&mut self, button: u8, pressed: bool) {
        match button {
            INPUT_RESET => self.reset_input(pressed),
            // Keyboard: forward make codes as-is, releases as break
            // codes (bit 7).
            1..=80 => {
                let code = if pressed { button } else { button | 0x80 };
                self.host.borrow_mut().scan_codes.push_back(code);
            }
            _ => {}
        }
    }

    fn input_map(&self) -> &[InputButton] {
        DRAGON_INPUT_MAP
    }

    fn reset(&mut self) {
        self.host.borrow_mut().scan_codes.clear();
        self.lines.set_reset(true);
        self.reset_pending = true;
    }
}

fn build_dragon32(rom: &RomImage) -> Result<Box<dyn Machine>, RomLoadError> {
    Ok(Box::new(Dragon32System::new(rom)?))
}

inventory::submit! {
    MachineSpec {
        name: "dragon32",
        rom_file: "dragon32.rom",
        build: build_dragon32,
    }
}
