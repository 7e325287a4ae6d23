//! MC6809E machine-code tables.
//!
//! Base cycle and byte counts per opcode from the CPU data sheet,
//! Motorola Inc. 1984 DS9846-R2. Addressing-mode dependent adjustments
//! (indexed post-bytes, push/pull masks, taken long branches, RTI frame
//! size) are applied by the execution layer on top of these base figures.

use crate::core::Bus;

/// Addressing modes of the MC6809E.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddrMode {
    Inherent,
    Direct,
    /// 8-bit signed branch offset.
    Relative,
    /// 16-bit branch offset.
    LongRelative,
    Indexed,
    Extended,
    /// 8-bit immediate operand.
    Immediate,
    /// 16-bit immediate operand.
    LongImmediate,
    Illegal,
}

/// One machine-code table entry.
pub struct Opcode {
    pub mnemonic: &'static str,
    pub mode: AddrMode,
    pub cycles: u8,
    pub bytes: u8,
}

const fn op(mnemonic: &'static str, mode: AddrMode, cycles: u8, bytes: u8) -> Opcode {
    Opcode {
        mnemonic,
        mode,
        cycles,
        bytes,
    }
}

use AddrMode::*;

const fn bad() -> Opcode {
    op("???", Illegal, 0, 1)
}

/// Page-1 table, indexed directly by opcode.
pub static PAGE1: [Opcode; 256] = [
    // 0x00
    op("neg", Direct, 6, 2),
    bad(),
    bad(),
    op("com", Direct, 6, 2),
    op("lsr", Direct, 6, 2),
    bad(),
    op("ror", Direct, 6, 2),
    op("asr", Direct, 6, 2),
    op("asl", Direct, 6, 2), // lsl
    op("rol", Direct, 6, 2),
    op("dec", Direct, 6, 2),
    bad(),
    op("inc", Direct, 6, 2),
    op("tst", Direct, 6, 2),
    op("jmp", Direct, 3, 2),
    op("clr", Direct, 6, 2),
    // 0x10: prefix bytes are dispatched before table lookup
    bad(),
    bad(),
    op("nop", Inherent, 2, 1),
    op("sync", Inherent, 4, 1),
    bad(),
    bad(),
    op("lbra", LongRelative, 5, 3),
    op("lbsr", LongRelative, 9, 3),
    bad(),
    op("daa", Inherent, 2, 1),
    op("orcc", Immediate, 3, 2),
    bad(),
    op("andcc", Immediate, 3, 2),
    op("sex", Inherent, 2, 1),
    op("exg", Immediate, 8, 2),
    op("tfr", Immediate, 6, 2),
    // 0x20
    op("bra", Relative, 3, 2),
    op("brn", Relative, 3, 2),
    op("bhi", Relative, 3, 2),
    op("bls", Relative, 3, 2),
    op("bcc", Relative, 3, 2), // bhs
    op("bcs", Relative, 3, 2), // blo
    op("bne", Relative, 3, 2),
    op("beq", Relative, 3, 2),
    op("bvc", Relative, 3, 2),
    op("bvs", Relative, 3, 2),
    op("bpl", Relative, 3, 2),
    op("bmi", Relative, 3, 2),
    op("bge", Relative, 3, 2),
    op("blt", Relative, 3, 2),
    op("bgt", Relative, 3, 2),
    op("ble", Relative, 3, 2),
    // 0x30
    op("leax", Indexed, 4, 2),
    op("leay", Indexed, 4, 2),
    op("leas", Indexed, 4, 2),
    op("leau", Indexed, 4, 2),
    op("pshs", Immediate, 5, 2),
    op("puls", Immediate, 5, 2),
    op("pshu", Immediate, 5, 2),
    op("pulu", Immediate, 5, 2),
    bad(),
    op("rts", Inherent, 5, 1),
    op("abx", Inherent, 3, 1),
    op("rti", Inherent, 6, 1),
    op("cwai", Immediate, 20, 2),
    op("mul", Inherent, 11, 1),
    bad(),
    op("swi", Inherent, 19, 1),
    // 0x40
    op("nega", Inherent, 2, 1),
    bad(),
    bad(),
    op("coma", Inherent, 2, 1),
    op("lsra", Inherent, 2, 1),
    bad(),
    op("rora", Inherent, 2, 1),
    op("asra", Inherent, 2, 1),
    op("asla", Inherent, 2, 1),
    op("rola", Inherent, 2, 1),
    op("deca", Inherent, 2, 1),
    bad(),
    op("inca", Inherent, 2, 1),
    op("tsta", Inherent, 2, 1),
    bad(),
    op("clra", Inherent, 2, 1),
    // 0x50
    op("negb", Inherent, 2, 1),
    bad(),
    bad(),
    op("comb", Inherent, 2, 1),
    op("lsrb", Inherent, 2, 1),
    bad(),
    op("rorb", Inherent, 2, 1),
    op("asrb", Inherent, 2, 1),
    op("aslb", Inherent, 2, 1),
    op("rolb", Inherent, 2, 1),
    op("decb", Inherent, 2, 1),
    bad(),
    op("incb", Inherent, 2, 1),
    op("tstb", Inherent, 2, 1),
    bad(),
    op("clrb", Inherent, 2, 1),
    // 0x60
    op("neg", Indexed, 6, 2),
    bad(),
    bad(),
    op("com", Indexed, 6, 2),
    op("lsr", Indexed, 6, 2),
    bad(),
    op("ror", Indexed, 6, 2),
    op("asr", Indexed, 6, 2),
    op("asl", Indexed, 6, 2),
    op("rol", Indexed, 6, 2),
    op("dec", Indexed, 6, 2),
    bad(),
    op("inc", Indexed, 6, 2),
    op("tst", Indexed, 6, 2),
    op("jmp", Indexed, 3, 2),
    op("clr", Indexed, 6, 2),
    // 0x70
    op("neg", Extended, 7, 3),
    bad(),
    bad(),
    op("com", Extended, 7, 3),
    op("lsr", Extended, 7, 3),
    bad(),
    op("ror", Extended, 7, 3),
    op("asr", Extended, 7, 3),
    op("asl", Extended, 7, 3),
    op("rol", Extended, 7, 3),
    op("dec", Extended, 7, 3),
    bad(),
    op("inc", Extended, 7, 3),
    op("tst", Extended, 7, 3),
    op("jmp", Extended, 4, 3),
    op("clr", Extended, 7, 3),
    // 0x80
    op("suba", Immediate, 2, 2),
    op("cmpa", Immediate, 2, 2),
    op("sbca", Immediate, 2, 2),
    op("subd", LongImmediate, 4, 3),
    op("anda", Immediate, 2, 2),
    op("bita", Immediate, 2, 2),
    op("lda", Immediate, 2, 2),
    bad(),
    op("eora", Immediate, 2, 2),
    op("adca", Immediate, 2, 2),
    op("ora", Immediate, 2, 2),
    op("adda", Immediate, 2, 2),
    op("cmpx", LongImmediate, 4, 3),
    op("bsr", Relative, 7, 2),
    op("ldx", LongImmediate, 3, 3),
    bad(),
    // 0x90
    op("suba", Direct, 4, 2),
    op("cmpa", Direct, 4, 2),
    op("sbca", Direct, 4, 2),
    op("subd", Direct, 6, 2),
    op("anda", Direct, 4, 2),
    op("bita", Direct, 4, 2),
    op("lda", Direct, 4, 2),
    op("sta", Direct, 4, 2),
    op("eora", Direct, 4, 2),
    op("adca", Direct, 4, 2),
    op("ora", Direct, 4, 2),
    op("adda", Direct, 4, 2),
    op("cmpx", Direct, 6, 2),
    op("jsr", Direct, 7, 2),
    op("ldx", Direct, 5, 2),
    op("stx", Direct, 5, 2),
    // 0xA0
    op("suba", Indexed, 4, 2),
    op("cmpa", Indexed, 4, 2),
    op("sbca", Indexed, 4, 2),
    op("subd", Indexed, 6, 2),
    op("anda", Indexed, 4, 2),
    op("bita", Indexed, 4, 2),
    op("lda", Indexed, 4, 2),
    op("sta", Indexed, 4, 2),
    op("eora", Indexed, 4, 2),
    op("adca", Indexed, 4, 2),
    op("ora", Indexed, 4, 2),
    op("adda", Indexed, 4, 2),
    op("cmpx", Indexed, 6, 2),
    op("jsr", Indexed, 7, 2),
    op("ldx", Indexed, 5, 2),
    op("stx", Indexed, 5, 2),
    // 0xB0
    op("suba", Extended, 5, 3),
    op("cmpa", Extended, 5, 3),
    op("sbca", Extended, 5, 3),
    op("subd", Extended, 7, 3),
    op("anda", Extended, 5, 3),
    op("bita", Extended, 5, 3),
    op("lda", Extended, 5, 3),
    op("sta", Extended, 5, 3),
    op("eora", Extended, 5, 3),
    op("adca", Extended, 5, 3),
    op("ora", Extended, 5, 3),
    op("adda", Extended, 5, 3),
    op("cmpx", Extended, 7, 3),
    op("jsr", Extended, 8, 3),
    op("ldx", Extended, 6, 3),
    op("stx", Extended, 6, 3),
    // 0xC0
    op("subb", Immediate, 2, 2),
    op("cmpb", Immediate, 2, 2),
    op("sbcb", Immediate, 2, 2),
    op("addd", LongImmediate, 4, 3),
    op("andb", Immediate, 2, 2),
    op("bitb", Immediate, 2, 2),
    op("ldb", Immediate, 2, 2),
    bad(),
    op("eorb", Immediate, 2, 2),
    op("adcb", Immediate, 2, 2),
    op("orb", Immediate, 2, 2),
    op("addb", Immediate, 2, 2),
    op("ldd", LongImmediate, 3, 3),
    bad(),
    op("ldu", LongImmediate, 3, 3),
    bad(),
    // 0xD0
    op("subb", Direct, 4, 2),
    op("cmpb", Direct, 4, 2),
    op("sbcb", Direct, 4, 2),
    op("addd", Direct, 6, 2),
    op("andb", Direct, 4, 2),
    op("bitb", Direct, 4, 2),
    op("ldb", Direct, 4, 2),
    op("stb", Direct, 4, 2),
    op("eorb", Direct, 4, 2),
    op("adcb", Direct, 4, 2),
    op("orb", Direct, 4, 2),
    op("addb", Direct, 4, 2),
    op("ldd", Direct, 5, 2),
    op("std", Direct, 5, 2),
    op("ldu", Direct, 5, 2),
    op("stu", Direct, 5, 2),
    // 0xE0
    op("subb", Indexed, 4, 2),
    op("cmpb", Indexed, 4, 2),
    op("sbcb", Indexed, 4, 2),
    op("addd", Indexed, 6, 2),
    op("andb", Indexed, 4, 2),
    op("bitb", Indexed, 4, 2),
    op("ldb", Indexed, 4, 2),
    op("stb", Indexed, 4, 2),
    op("eorb", Indexed, 4, 2),
    op("adcb", Indexed, 4, 2),
    op("orb", Indexed, 4, 2),
    op("addb", Indexed, 4, 2),
    op("ldd", Indexed, 5, 2),
    op("std", Indexed, 5, 2),
    op("ldu", Indexed, 5, 2),
    op("stu", Indexed, 5, 2),
    // 0xF0
    op("subb", Extended, 5, 3),
    op("cmpb", Extended, 5, 3),
    op("sbcb", Extended, 5, 3),
    op("addd", Extended, 7, 3),
    op("andb", Extended, 5, 3),
    op("bitb", Extended, 5, 3),
    op("ldb", Extended, 5, 3),
    op("stb", Extended, 5, 3),
    op("eorb", Extended, 5, 3),
    op("adcb", Extended, 5, 3),
    op("orb", Extended, 5, 3),
    op("addb", Extended, 5, 3),
    op("ldd", Extended, 6, 3),
    op("std", Extended, 6, 3),
    op("ldu", Extended, 6, 3),
    op("stu", Extended, 6, 3),
];

/// Page-2 (0x10 prefix) entries, searched linearly. Byte counts include
/// the prefix byte.
pub static PAGE2: &[(u8, Opcode)] = &[
    (0x21, op("lbrn", LongRelative, 5, 4)),
    (0x22, op("lbhi", LongRelative, 5, 4)),
    (0x23, op("lbls", LongRelative, 5, 4)),
    (0x24, op("lbcc", LongRelative, 5, 4)), // lbhs
    (0x25, op("lbcs", LongRelative, 5, 4)), // lblo
    (0x26, op("lbne", LongRelative, 5, 4)),
    (0x27, op("lbeq", LongRelative, 5, 4)),
    (0x28, op("lbvc", LongRelative, 5, 4)),
    (0x29, op("lbvs", LongRelative, 5, 4)),
    (0x2A, op("lbpl", LongRelative, 5, 4)),
    (0x2B, op("lbmi", LongRelative, 5, 4)),
    (0x2C, op("lbge", LongRelative, 5, 4)),
    (0x2D, op("lblt", LongRelative, 5, 4)),
    (0x2E, op("lbgt", LongRelative, 5, 4)),
    (0x2F, op("lble", LongRelative, 5, 4)),
    (0x3F, op("swi2", Inherent, 20, 2)),
    (0x83, op("cmpd", LongImmediate, 5, 4)),
    (0x8C, op("cmpy", LongImmediate, 5, 4)),
    (0x8E, op("ldy", LongImmediate, 4, 4)),
    (0x93, op("cmpd", Direct, 7, 3)),
    (0x9C, op("cmpy", Direct, 7, 3)),
    (0x9E, op("ldy", Direct, 6, 3)),
    (0x9F, op("sty", Direct, 6, 3)),
    (0xA3, op("cmpd", Indexed, 7, 3)),
    (0xAC, op("cmpy", Indexed, 7, 3)),
    (0xAE, op("ldy", Indexed, 6, 3)),
    (0xAF, op("sty", Indexed, 6, 3)),
    (0xB3, op("cmpd", Extended, 8, 4)),
    (0xBC, op("cmpy", Extended, 8, 4)),
    (0xBE, op("ldy", Extended, 7, 4)),
    (0xBF, op("sty", Extended, 7, 4)),
    (0xCE, op("lds", LongImmediate, 4, 4)),
    (0xDE, op("lds", Direct, 6, 3)),
    (0xDF, op("sts", Direct, 6, 3)),
    (0xEE, op("lds", Indexed, 6, 3)),
    (0xEF, op("sts", Indexed, 6, 3)),
    (0xFE, op("lds", Extended, 7, 4)),
    (0xFF, op("sts", Extended, 7, 4)),
];

/// Page-3 (0x11 prefix) entries.
pub static PAGE3: &[(u8, Opcode)] = &[
    (0x3F, op("swi3", Inherent, 20, 2)),
    (0x83, op("cmpu", LongImmediate, 5, 4)),
    (0x8C, op("cmps", LongImmediate, 5, 4)),
    (0x93, op("cmpu", Direct, 7, 3)),
    (0x9C, op("cmps", Direct, 7, 3)),
    (0xA3, op("cmpu", Indexed, 7, 3)),
    (0xAC, op("cmps", Indexed, 7, 3)),
    (0xB3, op("cmpu", Extended, 8, 4)),
    (0xBC, op("cmps", Extended, 8, 4)),
];

/// Page-1 lookup; `None` for an illegal opcode.
pub fn page1(code: u8) -> Option<&'static Opcode> {
    let entry = &PAGE1[code as usize];
    if entry.mode == Illegal { None } else { Some(entry) }
}

/// Page-2 lookup; `None` for an illegal 0x10-prefixed opcode.
pub fn page2(code: u8) -> Option<&'static Opcode> {
    PAGE2.iter().find(|(c, _)| *c == code).map(|(_, e)| e)
}

/// Page-3 lookup; `None` for an illegal 0x11-prefixed opcode.
pub fn page3(code: u8) -> Option<&'static Opcode> {
    PAGE3.iter().find(|(c, _)| *c == code).map(|(_, e)| e)
}

/// Mnemonic of the instruction at `addr`, for diagnostics. `"???"` for an
/// illegal encoding.
pub fn mnemonic_at(bus: &mut Bus, addr: u16) -> &'static str {
    match bus.read(addr) {
        0x10 => page2(bus.read(addr.wrapping_add(1))),
        0x11 => page3(bus.read(addr.wrapping_add(1))),
        code => page1(code),
    }
    .map_or("???", |e| e.mnemonic)
}
