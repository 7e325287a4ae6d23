//! MC6809E CPU core.
//!
//! Instruction-stepped: each [`M6809::step`] call performs at most one
//! instruction and returns the run state afterwards. Base cycle and byte
//! counts come from the machine-code tables in [`opcodes`]; addressing
//! modes and stack-heavy instructions add their documented adjustments.
//!
//! Resources: MC6809E data sheet, Motorola Inc. 1984 DS9846-R2
//! (programming model, instruction flow chart, cycle-by-cycle
//! performance), and the Motorola 6809 / Hitachi 6309 Programmer's
//! Reference (Darren Atkinson).

mod addressing;
mod alu;
mod branch;
pub mod opcodes;
mod stack;
mod transfer;

pub use opcodes::{AddrMode, Opcode, mnemonic_at};

use crate::core::Bus;
use std::cell::Cell;
use std::rc::Rc;

/// Interrupt vector addresses; each vector is two big-endian bytes.
pub const VEC_RESET: u16 = 0xFFFE;
pub const VEC_NMI: u16 = 0xFFFC;
pub const VEC_SWI: u16 = 0xFFFA;
pub const VEC_IRQ: u16 = 0xFFF8;
pub const VEC_FIRQ: u16 = 0xFFF6;
pub const VEC_SWI2: u16 = 0xFFF4;
pub const VEC_SWI3: u16 = 0xFFF2;

/// CPU run state reported by [`M6809::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Normal instruction execution.
    Exec,
    /// HALT input asserted; no work performed.
    Halted,
    /// Waiting for an unmasked interrupt (SYNC or CWAI).
    Sync,
    /// Held in reset; PC follows the reset vector.
    Reset,
    /// Emulation fault (illegal encoding). Only RESET recovers.
    Exception,
}

/// Identifies the decode path that froze the CPU in
/// [`RunState::Exception`], with the offending byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeFault {
    /// Unassigned page-1 opcode.
    Opcode(u8),
    /// Unassigned opcode behind the 0x10 prefix.
    Page2Opcode(u8),
    /// Unassigned opcode behind the 0x11 prefix.
    Page3Opcode(u8),
    /// Indexed post-byte names a reserved sub-mode.
    IndexedSubMode(u8),
    /// EXG/TFR post-byte names a reserved register number.
    TransferRegister(u8),
}

/// Condition-code register held as individual flags, packed on demand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cc {
    /// Entire machine state was stacked.
    pub e: bool,
    /// FIRQ mask.
    pub f: bool,
    /// Half carry; valid only after additive operations.
    pub h: bool,
    /// IRQ mask.
    pub i: bool,
    pub n: bool,
    pub z: bool,
    pub v: bool,
    pub c: bool,
}

impl Cc {
    pub fn pack(self) -> u8 {
        (self.e as u8) << 7
            | (self.f as u8) << 6
            | (self.h as u8) << 5
            | (self.i as u8) << 4
            | (self.n as u8) << 3
            | (self.z as u8) << 2
            | (self.v as u8) << 1
            | self.c as u8
    }

    pub fn unpack(value: u8) -> Self {
        Self {
            e: value & 0x80 != 0,
            f: value & 0x40 != 0,
            h: value & 0x20 != 0,
            i: value & 0x10 != 0,
            n: value & 0x08 != 0,
            z: value & 0x04 != 0,
            v: value & 0x02 != 0,
            c: value & 0x01 != 0,
        }
    }
}

/// Shared interrupt/control line record.
///
/// The CPU owns the canonical copy; peripherals hold clones and drive the
/// lines through the setters; the CPU never calls back into a peripheral.
/// IRQ, FIRQ, HALT and RESET are level-driven and sampled once per step;
/// NMI is an edge latch consumed when serviced.
#[derive(Clone, Default)]
pub struct InterruptLines {
    inner: Rc<Lines>,
}

#[derive(Default)]
struct Lines {
    irq: Cell<bool>,
    firq: Cell<bool>,
    nmi: Cell<bool>,
    halt: Cell<bool>,
    reset: Cell<bool>,
}

impl InterruptLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_irq(&self, level: bool) {
        self.inner.irq.set(level);
    }

    pub fn set_firq(&self, level: bool) {
        self.inner.firq.set(level);
    }

    /// Latch an NMI edge. The latch holds until the CPU services it.
    pub fn trigger_nmi(&self) {
        self.inner.nmi.set(true);
    }

    pub fn set_halt(&self, level: bool) {
        self.inner.halt.set(level);
    }

    pub fn set_reset(&self, level: bool) {
        self.inner.reset.set(level);
    }

    pub fn irq(&self) -> bool {
        self.inner.irq.get()
    }

    pub fn firq(&self) -> bool {
        self.inner.firq.get()
    }

    pub fn nmi_latched(&self) -> bool {
        self.inner.nmi.get()
    }

    pub fn halt(&self) -> bool {
        self.inner.halt.get()
    }

    pub fn reset(&self) -> bool {
        self.inner.reset.get()
    }

    fn clear_nmi(&self) {
        self.inner.nmi.set(false);
    }
}

/// MC6809E register file and execution state.
pub struct M6809 {
    pub a: u8,
    pub b: u8,
    pub dp: u8,
    pub x: u16,
    pub y: u16,
    pub u: u16,
    pub s: u16,
    pub pc: u16,
    pub cc: Cc,

    lines: InterruptLines,
    /// NMI stays disabled until the first load of S.
    nmi_armed: bool,
    state: RunState,

    /// PC of the last instruction, preserved across the step.
    pub last_pc: u16,
    pub last_opcode_bytes: u8,
    pub last_opcode_cycles: u8,
    fault: Option<DecodeFault>,
}

impl M6809 {
    pub fn new() -> Self {
        Self {
            a: 0,
            b: 0,
            dp: 0,
            x: 0,
            y: 0,
            u: 0,
            s: 0,
            pc: 0,
            cc: Cc::default(),
            lines: InterruptLines::new(),
            nmi_armed: false,
            state: RunState::Halted,
            last_pc: 0,
            last_opcode_bytes: 0,
            last_opcode_cycles: 0,
            fault: None,
        }
    }

    /// Handle to the interrupt/control lines, for wiring to peripherals.
    pub fn lines(&self) -> InterruptLines {
        self.lines.clone()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Fault that froze the CPU, if it is in [`RunState::Exception`].
    pub fn fault(&self) -> Option<DecodeFault> {
        self.fault
    }

    /// Accumulator D (A:B).
    pub fn d(&self) -> u16 {
        u16::from_be_bytes([self.a, self.b])
    }

    pub fn set_d(&mut self, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.a = hi;
        self.b = lo;
    }

    /// Execute at most one instruction and return the run state.
    ///
    /// Per-step ordering: RESET is honored first (asynchronous response);
    /// an existing exception freezes the CPU; then HALT; then the
    /// interrupt lines are sampled once and serviced in priority order
    /// NMI > FIRQ > IRQ; a still-pending SYNC suspends the step; only
    /// then is an opcode fetched and executed.
    pub fn step(&mut self, bus: &mut Bus) -> RunState {
        if self.lines.reset() {
            self.cc.f = true;
            self.cc.i = true;
            self.dp = 0;
            self.nmi_armed = false;
            self.lines.clear_nmi();
            self.fault = None;
            self.state = RunState::Reset;
            self.pc = self.read_word(bus, VEC_RESET);
            self.last_pc = self.pc;
            self.last_opcode_bytes = 0;
            self.last_opcode_cycles = 0;
            return self.state;
        }

        if self.state == RunState::Exception {
            return self.state;
        }

        self.last_pc = self.pc;

        if self.lines.halt() {
            self.state = RunState::Halted;
            return self.state;
        }

        // Sample the interrupt lines once, before opcode fetch. NMI is an
        // edge latch consumed on service; a level interrupt asserted and
        // released before this point is not observed.
        let nmi = self.lines.nmi_latched();
        let firq = self.lines.firq();
        let irq = self.lines.irq();

        if self.nmi_armed && nmi {
            self.state = RunState::Exec;
            self.cc.e = true;
            self.push_entire_frame(bus);
            self.lines.clear_nmi();
            self.cc.f = true;
            self.cc.i = true;
            self.pc = self.read_word(bus, VEC_NMI);
        } else if !self.cc.f && firq {
            self.state = RunState::Exec;
            self.cc.e = false;
            let pc = self.pc;
            self.push_word_s(bus, pc);
            self.push_byte_s(bus, self.cc.pack());
            self.cc.f = true;
            self.cc.i = true;
            self.pc = self.read_word(bus, VEC_FIRQ);
        } else if !self.cc.i && irq {
            self.state = RunState::Exec;
            self.cc.e = true;
            self.push_entire_frame(bus);
            self.cc.i = true;
            self.pc = self.read_word(bus, VEC_IRQ);
        }

        // SYNC/CWAI suspension: without an accepted interrupt the CPU
        // stays parked. An accepted interrupt flipped the state to Exec
        // above and execution resumes at the handler.
        if self.state == RunState::Sync {
            return self.state;
        }

        self.state = RunState::Exec;

        let op = self.fetch_byte(bus);
        let executed = match op {
            0x10 => {
                let sub = self.fetch_byte(bus);
                self.exec_page2(bus, sub)
            }
            0x11 => {
                let sub = self.fetch_byte(bus);
                self.exec_page3(bus, sub)
            }
            _ => self.exec_page1(bus, op),
        };

        match executed {
            Ok((cycles, bytes)) => {
                self.last_opcode_cycles = cycles;
                self.last_opcode_bytes = bytes;
            }
            Err(fault) => {
                self.state = RunState::Exception;
                self.fault = Some(fault);
            }
        }

        self.state
    }

    // -- bus access helpers -------------------------------------------------

    pub(crate) fn fetch_byte(&mut self, bus: &mut Bus) -> u8 {
        let byte = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    pub(crate) fn fetch_word(&mut self, bus: &mut Bus) -> u16 {
        let hi = self.fetch_byte(bus);
        let lo = self.fetch_byte(bus);
        u16::from_be_bytes([hi, lo])
    }

    pub(crate) fn read_word(&mut self, bus: &mut Bus, addr: u16) -> u16 {
        let hi = bus.read(addr);
        let lo = bus.read(addr.wrapping_add(1));
        u16::from_be_bytes([hi, lo])
    }

    /// Store a byte; a rejected ROM write is dropped, as on hardware.
    pub(crate) fn store(&mut self, bus: &mut Bus, addr: u16, value: u8) {
        let _ = bus.write(addr, value);
    }

    pub(crate) fn store_word(&mut self, bus: &mut Bus, addr: u16, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.store(bus, addr, hi);
        self.store(bus, addr.wrapping_add(1), lo);
    }

    // -- instruction dispatch -----------------------------------------------

    fn exec_page1(&mut self, bus: &mut Bus, op: u8) -> Result<(u8, u8), DecodeFault> {
        let info = opcodes::page1(op).ok_or(DecodeFault::Opcode(op))?;
        let mut cycles = info.cycles;
        let mut bytes = info.bytes;
        let ea = self.effective_address(bus, info.mode, &mut cycles, &mut bytes)?;

        match op {
            // ABX
            0x3A => self.x = self.x.wrapping_add(self.b as u16),

            // ADCA / ADCB
            0x89 | 0x99 | 0xA9 | 0xB9 => {
                let m = bus.read(ea);
                self.a = self.adc8(self.a, m);
            }
            0xC9 | 0xD9 | 0xE9 | 0xF9 => {
                let m = bus.read(ea);
                self.b = self.adc8(self.b, m);
            }

            // ADDA / ADDB / ADDD
            0x8B | 0x9B | 0xAB | 0xBB => {
                let m = bus.read(ea);
                self.a = self.add8(self.a, m);
            }
            0xCB | 0xDB | 0xEB | 0xFB => {
                let m = bus.read(ea);
                self.b = self.add8(self.b, m);
            }
            0xC3 | 0xD3 | 0xE3 | 0xF3 => {
                let m = self.read_word(bus, ea);
                let d = self.add16(self.d(), m);
                self.set_d(d);
            }

            // ANDA / ANDB / ANDCC
            0x84 | 0x94 | 0xA4 | 0xB4 => {
                let m = bus.read(ea);
                self.a = self.and8(self.a, m);
            }
            0xC4 | 0xD4 | 0xE4 | 0xF4 => {
                let m = bus.read(ea);
                self.b = self.and8(self.b, m);
            }
            0x1C => {
                let m = bus.read(ea);
                self.cc = Cc::unpack(self.cc.pack() & m);
            }

            // ASL (LSL) / ASR
            0x08 | 0x68 | 0x78 => {
                let m = bus.read(ea);
                let r = self.asl8(m);
                self.store(bus, ea, r);
            }
            0x48 => self.a = self.asl8(self.a),
            0x58 => self.b = self.asl8(self.b),
            0x07 | 0x67 | 0x77 => {
                let m = bus.read(ea);
                let r = self.asr8(m);
                self.store(bus, ea, r);
            }
            0x47 => self.a = self.asr8(self.a),
            0x57 => self.b = self.asr8(self.b),

            // BITA / BITB
            0x85 | 0x95 | 0xA5 | 0xB5 => {
                let m = bus.read(ea);
                self.bit8(self.a, m);
            }
            0xC5 | 0xD5 | 0xE5 | 0xF5 => {
                let m = bus.read(ea);
                self.bit8(self.b, m);
            }

            // CLR
            0x0F | 0x6F | 0x7F => {
                let r = self.clr8();
                self.store(bus, ea, r);
            }
            0x4F => self.a = self.clr8(),
            0x5F => self.b = self.clr8(),

            // CMPA / CMPB / CMPX
            0x81 | 0x91 | 0xA1 | 0xB1 => {
                let m = bus.read(ea);
                self.sub8(self.a, m);
            }
            0xC1 | 0xD1 | 0xE1 | 0xF1 => {
                let m = bus.read(ea);
                self.sub8(self.b, m);
            }
            0x8C | 0x9C | 0xAC | 0xBC => {
                let m = self.read_word(bus, ea);
                self.sub16(self.x, m);
            }

            // COM
            0x03 | 0x63 | 0x73 => {
                let m = bus.read(ea);
                let r = self.com8(m);
                self.store(bus, ea, r);
            }
            0x43 => self.a = self.com8(self.a),
            0x53 => self.b = self.com8(self.b),

            // CWAI
            0x3C => {
                let m = bus.read(ea);
                self.cwai(bus, m);
            }

            // DAA
            0x19 => self.daa(),

            // DEC
            0x0A | 0x6A | 0x7A => {
                let m = bus.read(ea);
                let r = self.dec8(m);
                self.store(bus, ea, r);
            }
            0x4A => self.a = self.dec8(self.a),
            0x5A => self.b = self.dec8(self.b),

            // EORA / EORB
            0x88 | 0x98 | 0xA8 | 0xB8 => {
                let m = bus.read(ea);
                self.a = self.eor8(self.a, m);
            }
            0xC8 | 0xD8 | 0xE8 | 0xF8 => {
                let m = bus.read(ea);
                self.b = self.eor8(self.b, m);
            }

            // EXG / TFR
            0x1E => {
                let post = bus.read(ea);
                self.exg(post)?;
            }
            0x1F => {
                let post = bus.read(ea);
                self.tfr(post)?;
            }

            // INC
            0x0C | 0x6C | 0x7C => {
                let m = bus.read(ea);
                let r = self.inc8(m);
                self.store(bus, ea, r);
            }
            0x4C => self.a = self.inc8(self.a),
            0x5C => self.b = self.inc8(self.b),

            // JMP
            0x0E | 0x6E | 0x7E => self.pc = ea,

            // JSR
            0x9D | 0xAD | 0xBD => {
                let pc = self.pc;
                self.push_word_s(bus, pc);
                self.pc = ea;
            }

            // Loads
            0x86 | 0x96 | 0xA6 | 0xB6 => {
                self.a = bus.read(ea);
                self.flags_load8(self.a);
            }
            0xC6 | 0xD6 | 0xE6 | 0xF6 => {
                self.b = bus.read(ea);
                self.flags_load8(self.b);
            }
            0xCC | 0xDC | 0xEC | 0xFC => {
                let m = self.read_word(bus, ea);
                self.set_d(m);
                self.flags_load16(m);
            }
            0xCE | 0xDE | 0xEE | 0xFE => {
                self.u = self.read_word(bus, ea);
                self.flags_load16(self.u);
            }
            0x8E | 0x9E | 0xAE | 0xBE => {
                self.x = self.read_word(bus, ea);
                self.flags_load16(self.x);
            }

            // LEA
            0x30 => {
                self.x = ea;
                self.cc.z = self.x == 0;
            }
            0x31 => {
                self.y = ea;
                self.cc.z = self.y == 0;
            }
            0x32 => {
                self.s = ea;
                self.nmi_armed = true;
            }
            0x33 => self.u = ea,

            // LSR
            0x04 | 0x64 | 0x74 => {
                let m = bus.read(ea);
                let r = self.lsr8(m);
                self.store(bus, ea, r);
            }
            0x44 => self.a = self.lsr8(self.a),
            0x54 => self.b = self.lsr8(self.b),

            // MUL
            0x3D => self.mul(),

            // NEG
            0x00 | 0x60 | 0x70 => {
                let m = bus.read(ea);
                let r = self.neg8(m);
                self.store(bus, ea, r);
            }
            0x40 => self.a = self.neg8(self.a),
            0x50 => self.b = self.neg8(self.b),

            // NOP
            0x12 => {}

            // ORA / ORB / ORCC
            0x8A | 0x9A | 0xAA | 0xBA => {
                let m = bus.read(ea);
                self.a = self.or8(self.a, m);
            }
            0xCA | 0xDA | 0xEA | 0xFA => {
                let m = bus.read(ea);
                self.b = self.or8(self.b, m);
            }
            0x1A => {
                let m = bus.read(ea);
                self.cc = Cc::unpack(self.cc.pack() | m);
            }

            // PSHS / PULS / PSHU / PULU
            0x34 => {
                let mask = bus.read(ea);
                self.pshs(bus, mask, &mut cycles);
            }
            0x35 => {
                let mask = bus.read(ea);
                self.puls(bus, mask, &mut cycles);
            }
            0x36 => {
                let mask = bus.read(ea);
                self.pshu(bus, mask, &mut cycles);
            }
            0x37 => {
                let mask = bus.read(ea);
                self.pulu(bus, mask, &mut cycles);
            }

            // ROL / ROR
            0x09 | 0x69 | 0x79 => {
                let m = bus.read(ea);
                let r = self.rol8(m);
                self.store(bus, ea, r);
            }
            0x49 => self.a = self.rol8(self.a),
            0x59 => self.b = self.rol8(self.b),
            0x06 | 0x66 | 0x76 => {
                let m = bus.read(ea);
                let r = self.ror8(m);
                self.store(bus, ea, r);
            }
            0x46 => self.a = self.ror8(self.a),
            0x56 => self.b = self.ror8(self.b),

            // RTI / RTS
            0x3B => self.rti(bus, &mut cycles),
            0x39 => self.pc = self.pull_word_s(bus),

            // SBCA / SBCB
            0x82 | 0x92 | 0xA2 | 0xB2 => {
                let m = bus.read(ea);
                self.a = self.sbc8(self.a, m);
            }
            0xC2 | 0xD2 | 0xE2 | 0xF2 => {
                let m = bus.read(ea);
                self.b = self.sbc8(self.b, m);
            }

            // SEX
            0x1D => self.sex(),

            // Stores
            0x97 | 0xA7 | 0xB7 => {
                let a = self.a;
                self.store(bus, ea, a);
                self.flags_load8(a);
            }
            0xD7 | 0xE7 | 0xF7 => {
                let b = self.b;
                self.store(bus, ea, b);
                self.flags_load8(b);
            }
            0xDD | 0xED | 0xFD => {
                let d = self.d();
                self.store_word(bus, ea, d);
                self.flags_load16(d);
            }
            0xDF | 0xEF | 0xFF => {
                let u = self.u;
                self.store_word(bus, ea, u);
                self.flags_load16(u);
            }
            0x9F | 0xAF | 0xBF => {
                let x = self.x;
                self.store_word(bus, ea, x);
                self.flags_load16(x);
            }

            // SUBA / SUBB / SUBD
            0x80 | 0x90 | 0xA0 | 0xB0 => {
                let m = bus.read(ea);
                self.a = self.sub8(self.a, m);
            }
            0xC0 | 0xD0 | 0xE0 | 0xF0 => {
                let m = bus.read(ea);
                self.b = self.sub8(self.b, m);
            }
            0x83 | 0x93 | 0xA3 | 0xB3 => {
                let m = self.read_word(bus, ea);
                let d = self.sub16(self.d(), m);
                self.set_d(d);
            }

            // SWI
            0x3F => self.software_interrupt(bus, VEC_SWI, true),

            // SYNC: stop executing and wait for an interrupt. No flags
            // are affected and nothing is stacked.
            0x13 => self.state = RunState::Sync,

            // TST
            0x4D => self.tst8(self.a),
            0x5D => self.tst8(self.b),
            0x0D | 0x6D | 0x7D => {
                let m = bus.read(ea);
                self.tst8(m);
            }

            // BRA / LBRA / BRN
            0x20 | 0x16 => self.pc = ea,
            0x21 => {}

            // BSR / LBSR
            0x8D | 0x17 => {
                let pc = self.pc;
                self.push_word_s(bus, pc);
                self.pc = ea;
            }

            // Short conditional branches
            0x22..=0x2F => self.branch(op, false, ea, &mut cycles),

            _ => return Err(DecodeFault::Opcode(op)),
        }

        Ok((cycles, bytes))
    }

    fn exec_page2(&mut self, bus: &mut Bus, op: u8) -> Result<(u8, u8), DecodeFault> {
        let info = opcodes::page2(op).ok_or(DecodeFault::Page2Opcode(op))?;
        let mut cycles = info.cycles;
        let mut bytes = info.bytes;
        let ea = self.effective_address(bus, info.mode, &mut cycles, &mut bytes)?;

        match op {
            // CMPD / CMPY
            0x83 | 0x93 | 0xA3 | 0xB3 => {
                let m = self.read_word(bus, ea);
                self.sub16(self.d(), m);
            }
            0x8C | 0x9C | 0xAC | 0xBC => {
                let m = self.read_word(bus, ea);
                self.sub16(self.y, m);
            }

            // LDS: loading the system stack pointer arms NMI.
            0xCE | 0xDE | 0xEE | 0xFE => {
                self.s = self.read_word(bus, ea);
                self.flags_load16(self.s);
                self.nmi_armed = true;
            }

            // LDY
            0x8E | 0x9E | 0xAE | 0xBE => {
                self.y = self.read_word(bus, ea);
                self.flags_load16(self.y);
            }

            // STS / STY
            0xDF | 0xEF | 0xFF => {
                let s = self.s;
                self.store_word(bus, ea, s);
                self.flags_load16(s);
            }
            0x9F | 0xAF | 0xBF => {
                let y = self.y;
                self.store_word(bus, ea, y);
                self.flags_load16(y);
            }

            // LBRN
            0x21 => {}

            // Long conditional branches
            0x22..=0x2F => self.branch(op, true, ea, &mut cycles),

            // SWI2
            0x3F => self.software_interrupt(bus, VEC_SWI2, false),

            _ => return Err(DecodeFault::Page2Opcode(op)),
        }

        Ok((cycles, bytes))
    }

    fn exec_page3(&mut self, bus: &mut Bus, op: u8) -> Result<(u8, u8), DecodeFault> {
        let info = opcodes::page3(op).ok_or(DecodeFault::Page3Opcode(op))?;
        let mut cycles = info.cycles;
        let mut bytes = info.bytes;
        let ea = self.effective_address(bus, info.mode, &mut cycles, &mut bytes)?;

        match op {
            // CMPU / CMPS
            0x83 | 0x93 | 0xA3 | 0xB3 => {
                let m = self.read_word(bus, ea);
                self.sub16(self.u, m);
            }
            0x8C | 0x9C | 0xAC | 0xBC => {
                let m = self.read_word(bus, ea);
                self.sub16(self.s, m);
            }

            // SWI3
            0x3F => self.software_interrupt(bus, VEC_SWI3, false),

            _ => return Err(DecodeFault::Page3Opcode(op)),
        }

        Ok((cycles, bytes))
    }
}

impl Default for M6809 {
    fn default() -> Self {
        Self::new()
    }
}

/// Sign-extend a byte to 16 bits.
pub(crate) fn sign_extend(byte: u8) -> u16 {
    byte as i8 as u16
}
