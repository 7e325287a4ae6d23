//! Effective-address resolution for all addressing modes, including the
//! indexed post-byte decoder.

use super::opcodes::AddrMode;
use super::{DecodeFault, M6809, sign_extend};
use crate::core::Bus;

// Indexed post-byte fields.
const POST_5BIT_OFF: u8 = 0x80;
const POST_REG: u8 = 0x60;
const POST_INDIRECT: u8 = 0x10;
const POST_MODE: u8 = 0x0F;

/// Cycle and byte adjustments for one indexed sub-mode. Reserved slots
/// are `None` and fault the CPU when named.
struct SubMode {
    cycles: u8,
    cycles_indirect: u8,
    extra_bytes: u8,
}

const fn sub(cycles: u8, cycles_indirect: u8, extra_bytes: u8) -> Option<SubMode> {
    Some(SubMode {
        cycles,
        cycles_indirect,
        extra_bytes,
    })
}

/// Indexed sub-mode table, indexed by post-byte bits 0-3. Sub-modes 0 and
/// 2 (auto inc/dec by one) never indirect, so only one cycle figure
/// applies to them.
static SUB_MODES: [Option<SubMode>; 16] = [
    sub(2, 2, 0),  // 0: ,R+
    sub(3, 6, 0),  // 1: ,R++
    sub(2, 2, 0),  // 2: ,-R
    sub(3, 6, 0),  // 3: ,--R
    sub(0, 3, 0),  // 4: ,R
    sub(1, 4, 0),  // 5: B,R
    sub(1, 4, 0),  // 6: A,R
    None,          // 7: reserved
    sub(1, 4, 1),  // 8: imm8,R
    sub(4, 7, 2),  // 9: imm16,R
    None,          // 10: reserved
    sub(4, 7, 0),  // 11: D,R
    sub(1, 4, 1),  // 12: imm8,PC
    sub(5, 8, 2),  // 13: imm16,PC
    None,          // 14: reserved
    sub(5, 5, 2),  // 15: [imm16], always indirect
];

#[derive(Clone, Copy)]
enum IndexReg {
    X,
    Y,
    U,
    S,
}

impl M6809 {
    /// Resolve the effective address for `mode`, consuming post-bytes and
    /// advancing PC. `cycles` and `bytes` receive the mode-dependent
    /// adjustments on top of the table base counts.
    pub(crate) fn effective_address(
        &mut self,
        bus: &mut Bus,
        mode: AddrMode,
        cycles: &mut u8,
        bytes: &mut u8,
    ) -> Result<u16, DecodeFault> {
        let ea = match mode {
            AddrMode::Inherent | AddrMode::Illegal => 0,

            AddrMode::Direct => {
                let lo = self.fetch_byte(bus);
                (self.dp as u16) << 8 | lo as u16
            }

            AddrMode::Relative => {
                let offset = self.fetch_byte(bus);
                self.pc.wrapping_add(sign_extend(offset))
            }

            AddrMode::LongRelative => {
                let offset = self.fetch_word(bus);
                self.pc.wrapping_add(offset)
            }

            AddrMode::Extended => self.fetch_word(bus),

            AddrMode::Immediate => {
                let ea = self.pc;
                self.pc = self.pc.wrapping_add(1);
                ea
            }

            AddrMode::LongImmediate => {
                let ea = self.pc;
                self.pc = self.pc.wrapping_add(2);
                ea
            }

            AddrMode::Indexed => {
                let post = self.fetch_byte(bus);
                self.indexed(bus, post, cycles, bytes)?
            }
        };

        Ok(ea)
    }

    fn indexed(
        &mut self,
        bus: &mut Bus,
        post: u8,
        cycles: &mut u8,
        bytes: &mut u8,
    ) -> Result<u16, DecodeFault> {
        let reg = match post & POST_REG {
            0x00 => IndexReg::X,
            0x20 => IndexReg::Y,
            0x40 => IndexReg::U,
            _ => IndexReg::S,
        };

        // Post-byte bit 7 clear: the 5-bit signed offset lives in the
        // post-byte itself, one extra cycle, never indirect.
        if post & POST_5BIT_OFF == 0 {
            let mut offset = (post & 0x1F) as u16;
            if offset & 0x0010 != 0 {
                offset |= 0xFFF0;
            }
            *cycles += 1;
            return Ok(self.index_reg(reg).wrapping_add(offset));
        }

        let indirect = post & POST_INDIRECT != 0;
        let info = SUB_MODES[(post & POST_MODE) as usize]
            .as_ref()
            .ok_or(DecodeFault::IndexedSubMode(post))?;
        *cycles += if indirect {
            info.cycles_indirect
        } else {
            info.cycles
        };
        *bytes += info.extra_bytes;

        let mut ea = match post & POST_MODE {
            // ,R+ and ,R++: post-increment
            0 => {
                let ea = self.index_reg(reg);
                self.set_index_reg(reg, ea.wrapping_add(1));
                ea
            }
            1 => {
                let ea = self.index_reg(reg);
                self.set_index_reg(reg, ea.wrapping_add(2));
                ea
            }

            // ,-R and ,--R: pre-decrement
            2 => {
                let ea = self.index_reg(reg).wrapping_sub(1);
                self.set_index_reg(reg, ea);
                ea
            }
            3 => {
                let ea = self.index_reg(reg).wrapping_sub(2);
                self.set_index_reg(reg, ea);
                ea
            }

            // ,R
            4 => self.index_reg(reg),

            // B,R and A,R: sign-extended accumulator offsets
            5 => self.index_reg(reg).wrapping_add(sign_extend(self.b)),
            6 => self.index_reg(reg).wrapping_add(sign_extend(self.a)),

            // imm8,R / imm16,R
            8 => {
                let offset = sign_extend(self.fetch_byte(bus));
                self.index_reg(reg).wrapping_add(offset)
            }
            9 => {
                let offset = self.fetch_word(bus);
                self.index_reg(reg).wrapping_add(offset)
            }

            // D,R
            11 => self.index_reg(reg).wrapping_add(self.d()),

            // imm8,PC / imm16,PC: offsets from the advanced PC
            12 => {
                let offset = sign_extend(self.fetch_byte(bus));
                self.pc.wrapping_add(offset)
            }
            13 => {
                let offset = self.fetch_word(bus);
                self.pc.wrapping_add(offset)
            }

            // [imm16]: the indirect bit is part of the encoding
            15 => self.fetch_word(bus),

            _ => unreachable!("reserved sub-modes rejected above"),
        };

        // Auto inc/dec by one carry no indirect variant; the encoding is
        // trusted not to set the bit for them.
        if indirect {
            ea = self.read_word(bus, ea);
        }

        Ok(ea)
    }

    fn index_reg(&self, reg: IndexReg) -> u16 {
        match reg {
            IndexReg::X => self.x,
            IndexReg::Y => self.y,
            IndexReg::U => self.u,
            IndexReg::S => self.s,
        }
    }

    fn set_index_reg(&mut self, reg: IndexReg, value: u16) {
        match reg {
            IndexReg::X => self.x = value,
            IndexReg::Y => self.y = value,
            IndexReg::U => self.u = value,
            IndexReg::S => self.s = value,
        }
    }
}
