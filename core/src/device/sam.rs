//! MC6883 / SN74LS785 Synchronous Address Multiplexer, as wired in the
//! Dragon 32.
//!
//! The SAM has no data registers on the bus. Writes to `0xFFC0..=0xFFDF`
//! land on 32 toggle addresses: the even address of a pair clears one bit
//! of a configuration field, the odd address sets it. Reads of the CPU
//! vector area `0xFFF2..=0xFFFF` are redirected to the `0xBFF2..=0xBFFF`
//! shadow at the top of the ROM.

use crate::core::{Bus, BusError, IoDevice};
use crate::device::vdg::VdgSignals;
use std::cell::RefCell;
use std::rc::Rc;

pub const SAM_TOGGLE_START: u16 = 0xFFC0;
pub const SAM_TOGGLE_END: u16 = 0xFFDF;
pub const VECTOR_SHADOW_START: u16 = 0xFFF2;
pub const VECTOR_SHADOW_END: u16 = 0xFFFF;

/// SAM configuration register file.
///
/// Only the VDG mode and display offset are consumed by this machine;
/// page, MPU rate, memory size and map type are kept for completeness
/// (a Dragon 64 would need them).
pub struct Sam {
    vdg_mode: u8,
    vdg_display_offset: u8,
    page: u8,
    mpu_rate: u8,
    memory_size: u8,
    memory_map_type: u8,

    video: VdgSignals,
}

impl Sam {
    /// Power-on state: alphanumeric mode, display offset 2 (the Dragon
    /// text page at 0x0400).
    pub fn new(video: VdgSignals) -> Self {
        let sam = Self {
            vdg_mode: 0,
            vdg_display_offset: 2,
            page: 1,
            mpu_rate: 0,
            memory_size: 2,
            memory_map_type: 0,
            video,
        };
        sam.publish();
        sam
    }

    /// Register the toggle window and the vector shadow on the bus.
    pub fn attach(this: &Rc<RefCell<Self>>, bus: &mut Bus) -> Result<(), BusError> {
        bus.define_io(VECTOR_SHADOW_START, VECTOR_SHADOW_END, this.clone())?;
        bus.define_io(SAM_TOGGLE_START, SAM_TOGGLE_END, this.clone())
    }

    pub fn vdg_mode(&self) -> u8 {
        self.vdg_mode
    }

    pub fn vdg_display_offset(&self) -> u8 {
        self.vdg_display_offset
    }

    pub fn page(&self) -> u8 {
        self.page
    }

    pub fn mpu_rate(&self) -> u8 {
        self.mpu_rate
    }

    pub fn memory_size(&self) -> u8 {
        self.memory_size
    }

    pub fn memory_map_type(&self) -> u8 {
        self.memory_map_type
    }

    fn publish(&self) {
        self.video.set_mode_sam(self.vdg_mode);
        self.video.set_video_offset(self.vdg_display_offset);
    }

    /// Apply one toggle slot: even slots clear, odd slots set, one bit of
    /// the field the slot pair addresses.
    fn toggle(&mut self, slot: u8) {
        let set = slot & 0x01 != 0;
        match slot {
            // VDG mode, bits 0..2
            0x00..=0x05 => {
                let bit = 1u8 << (slot / 2);
                if set {
                    self.vdg_mode |= bit;
                } else {
                    self.vdg_mode &= !bit;
                }
            }
            // Display offset, bits 0..6
            0x06..=0x13 => {
                let bit = 1u8 << ((slot - 0x06) / 2);
                if set {
                    self.vdg_display_offset |= bit;
                } else {
                    self.vdg_display_offset &= !bit;
                }
            }
            // Page #1
            0x14..=0x15 => self.page = set as u8,
            // MPU rate, bits 0..1
            0x16..=0x19 => {
                let bit = 1u8 << ((slot - 0x16) / 2);
                if set {
                    self.mpu_rate |= bit;
                } else {
                    self.mpu_rate &= !bit;
                }
            }
            // Memory size, bits 0..1
            0x1A..=0x1D => {
                let bit = 1u8 << ((slot - 0x1A) / 2);
                if set {
                    self.memory_size |= bit;
                } else {
                    self.memory_size &= !bit;
                }
            }
            // Memory map type
            _ => self.memory_map_type = set as u8,
        }
    }
}

impl IoDevice for Sam {
    fn on_read(&mut self, bus: &mut Bus, addr: u16, _data: u8) -> u8 {
        if (VECTOR_SHADOW_START..=VECTOR_SHADOW_END).contains(&addr) {
            // Vector table shadow: the CPU fetches its vectors from the
            // top of the ROM image.
            bus.read(addr & 0xBFFF)
        } else {
            // Toggle addresses carry no data.
            0
        }
    }

    fn on_write(&mut self, _bus: &mut Bus, addr: u16, _data: u8) {
        if (SAM_TOGGLE_START..=SAM_TOGGLE_END).contains(&addr) {
            self.toggle((addr & 0x1F) as u8);
            self.publish();
        }
    }
}
