//! Stack traffic: push/pull instructions, interrupt frames, RTI, CWAI
//! and the software interrupts.
//!
//! The stack pointer decrements before every pushed byte and increments
//! after every pulled byte; 16-bit values go high-byte-at-lower-address.
//! Push order (highest mask bit first): PC, U/S, Y, X, DP, B, A, CC;
//! pull order is the reverse.

use super::{Cc, M6809, RunState};
use crate::core::Bus;

impl M6809 {
    pub(crate) fn push_byte_s(&mut self, bus: &mut Bus, value: u8) {
        self.s = self.s.wrapping_sub(1);
        let s = self.s;
        self.store(bus, s, value);
    }

    pub(crate) fn push_word_s(&mut self, bus: &mut Bus, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.push_byte_s(bus, lo);
        self.push_byte_s(bus, hi);
    }

    fn push_byte_u(&mut self, bus: &mut Bus, value: u8) {
        self.u = self.u.wrapping_sub(1);
        let u = self.u;
        self.store(bus, u, value);
    }

    fn push_word_u(&mut self, bus: &mut Bus, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.push_byte_u(bus, lo);
        self.push_byte_u(bus, hi);
    }

    fn pull_byte_s(&mut self, bus: &mut Bus) -> u8 {
        let value = bus.read(self.s);
        self.s = self.s.wrapping_add(1);
        value
    }

    pub(crate) fn pull_word_s(&mut self, bus: &mut Bus) -> u16 {
        let hi = self.pull_byte_s(bus);
        let lo = self.pull_byte_s(bus);
        u16::from_be_bytes([hi, lo])
    }

    fn pull_byte_u(&mut self, bus: &mut Bus) -> u8 {
        let value = bus.read(self.u);
        self.u = self.u.wrapping_add(1);
        value
    }

    fn pull_word_u(&mut self, bus: &mut Bus) -> u16 {
        let hi = self.pull_byte_u(bus);
        let lo = self.pull_byte_u(bus);
        u16::from_be_bytes([hi, lo])
    }

    /// Stack the entire machine state onto S (NMI, IRQ, SWIx, CWAI).
    pub(crate) fn push_entire_frame(&mut self, bus: &mut Bus) {
        let (pc, u, y, x) = (self.pc, self.u, self.y, self.x);
        self.push_word_s(bus, pc);
        self.push_word_s(bus, u);
        self.push_word_s(bus, y);
        self.push_word_s(bus, x);
        let (dp, b, a, cc) = (self.dp, self.b, self.a, self.cc.pack());
        self.push_byte_s(bus, dp);
        self.push_byte_s(bus, b);
        self.push_byte_s(bus, a);
        self.push_byte_s(bus, cc);
    }

    /// PSHS: push the masked registers onto the system stack.
    /// One extra cycle for the operation plus one per 16-bit register.
    pub(crate) fn pshs(&mut self, bus: &mut Bus, mask: u8, cycles: &mut u8) {
        *cycles += 1;
        if mask & 0x80 != 0 {
            *cycles += 1;
            let pc = self.pc;
            self.push_word_s(bus, pc);
        }
        if mask & 0x40 != 0 {
            *cycles += 1;
            let u = self.u;
            self.push_word_s(bus, u);
        }
        if mask & 0x20 != 0 {
            *cycles += 1;
            let y = self.y;
            self.push_word_s(bus, y);
        }
        if mask & 0x10 != 0 {
            *cycles += 1;
            let x = self.x;
            self.push_word_s(bus, x);
        }
        if mask & 0x08 != 0 {
            let dp = self.dp;
            self.push_byte_s(bus, dp);
        }
        if mask & 0x04 != 0 {
            let b = self.b;
            self.push_byte_s(bus, b);
        }
        if mask & 0x02 != 0 {
            let a = self.a;
            self.push_byte_s(bus, a);
        }
        if mask & 0x01 != 0 {
            let cc = self.cc.pack();
            self.push_byte_s(bus, cc);
        }
    }

    /// PSHU: push the masked registers onto the user stack. Mask bit 6
    /// names the other stack pointer, S.
    pub(crate) fn pshu(&mut self, bus: &mut Bus, mask: u8, cycles: &mut u8) {
        *cycles += 1;
        if mask & 0x80 != 0 {
            *cycles += 1;
            let pc = self.pc;
            self.push_word_u(bus, pc);
        }
        if mask & 0x40 != 0 {
            *cycles += 1;
            let s = self.s;
            self.push_word_u(bus, s);
        }
        if mask & 0x20 != 0 {
            *cycles += 1;
            let y = self.y;
            self.push_word_u(bus, y);
        }
        if mask & 0x10 != 0 {
            *cycles += 1;
            let x = self.x;
            self.push_word_u(bus, x);
        }
        if mask & 0x08 != 0 {
            let dp = self.dp;
            self.push_byte_u(bus, dp);
        }
        if mask & 0x04 != 0 {
            let b = self.b;
            self.push_byte_u(bus, b);
        }
        if mask & 0x02 != 0 {
            let a = self.a;
            self.push_byte_u(bus, a);
        }
        if mask & 0x01 != 0 {
            let cc = self.cc.pack();
            self.push_byte_u(bus, cc);
        }
    }

    /// PULS: pull the masked registers from the system stack.
    pub(crate) fn puls(&mut self, bus: &mut Bus, mask: u8, cycles: &mut u8) {
        *cycles += 1;
        if mask & 0x01 != 0 {
            let cc = self.pull_byte_s(bus);
            self.cc = Cc::unpack(cc);
        }
        if mask & 0x02 != 0 {
            self.a = self.pull_byte_s(bus);
        }
        if mask & 0x04 != 0 {
            self.b = self.pull_byte_s(bus);
        }
        if mask & 0x08 != 0 {
            self.dp = self.pull_byte_s(bus);
        }
        if mask & 0x10 != 0 {
            *cycles += 1;
            self.x = self.pull_word_s(bus);
        }
        if mask & 0x20 != 0 {
            *cycles += 1;
            self.y = self.pull_word_s(bus);
        }
        if mask & 0x40 != 0 {
            *cycles += 1;
            self.u = self.pull_word_s(bus);
        }
        if mask & 0x80 != 0 {
            *cycles += 1;
            self.pc = self.pull_word_s(bus);
        }
    }

    /// PULU: pull the masked registers from the user stack. Mask bit 6
    /// loads S, which arms NMI.
    pub(crate) fn pulu(&mut self, bus: &mut Bus, mask: u8, cycles: &mut u8) {
        *cycles += 1;
        if mask & 0x01 != 0 {
            let cc = self.pull_byte_u(bus);
            self.cc = Cc::unpack(cc);
        }
        if mask & 0x02 != 0 {
            self.a = self.pull_byte_u(bus);
        }
        if mask & 0x04 != 0 {
            self.b = self.pull_byte_u(bus);
        }
        if mask & 0x08 != 0 {
            self.dp = self.pull_byte_u(bus);
        }
        if mask & 0x10 != 0 {
            *cycles += 1;
            self.x = self.pull_word_u(bus);
        }
        if mask & 0x20 != 0 {
            *cycles += 1;
            self.y = self.pull_word_u(bus);
        }
        if mask & 0x40 != 0 {
            *cycles += 1;
            self.s = self.pull_word_u(bus);
            self.nmi_armed = true;
        }
        if mask & 0x80 != 0 {
            *cycles += 1;
            self.pc = self.pull_word_u(bus);
        }
    }

    /// RTI: pop CC; an `E = 1` frame restores the full register set for
    /// nine extra cycles; PC is always popped last.
    pub(crate) fn rti(&mut self, bus: &mut Bus, cycles: &mut u8) {
        let cc = self.pull_byte_s(bus);
        self.cc = Cc::unpack(cc);

        if self.cc.e {
            self.a = self.pull_byte_s(bus);
            self.b = self.pull_byte_s(bus);
            self.dp = self.pull_byte_s(bus);
            self.x = self.pull_word_s(bus);
            self.y = self.pull_word_s(bus);
            self.u = self.pull_word_s(bus);
            *cycles += 9;
        }

        self.pc = self.pull_word_s(bus);
    }

    /// CWAI: AND CC with the immediate operand, set E, stack the entire
    /// state, and park until an unmasked interrupt.
    pub(crate) fn cwai(&mut self, bus: &mut Bus, mask: u8) {
        self.cc = Cc::unpack(self.cc.pack() & mask);
        self.cc.e = true;
        self.push_entire_frame(bus);
        self.state = RunState::Sync;
    }

    /// SWI/SWI2/SWI3: stack the entire state and vector. Only SWI raises
    /// the interrupt masks.
    pub(crate) fn software_interrupt(&mut self, bus: &mut Bus, vector: u16, mask_interrupts: bool) {
        self.cc.e = true;
        self.push_entire_frame(bus);
        if mask_interrupts {
            self.cc.i = true;
            self.cc.f = true;
        }
        self.pc = self.read_word(bus, vector);
    }
}
