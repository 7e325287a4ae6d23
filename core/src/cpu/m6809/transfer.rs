//! EXG and TFR inter-register moves.
//!
//! The post-byte nibble pair names source and destination: 0=D, 1=X,
//! 2=Y, 3=U, 4=S, 5=PC, 8=A, 9=B, 10=CC, 11=DP. Mixing 8- and 16-bit
//! registers has undefined hardware behavior and is not special-cased;
//! the encoding is trusted the way an assembler emits it. Writing S
//! arms NMI.

use super::{Cc, DecodeFault, M6809};

impl M6809 {
    fn read_register(&self, reg: u8) -> Result<u16, DecodeFault> {
        Ok(match reg {
            0 => self.d(),
            1 => self.x,
            2 => self.y,
            3 => self.u,
            4 => self.s,
            5 => self.pc,
            8 => self.a as u16,
            9 => self.b as u16,
            10 => self.cc.pack() as u16,
            11 => self.dp as u16,
            _ => return Err(DecodeFault::TransferRegister(reg)),
        })
    }

    fn write_register(&mut self, reg: u8, value: u16) -> Result<(), DecodeFault> {
        match reg {
            0 => self.set_d(value),
            1 => self.x = value,
            2 => self.y = value,
            3 => self.u = value,
            4 => {
                self.s = value;
                self.nmi_armed = true;
            }
            5 => self.pc = value,
            8 => self.a = value as u8,
            9 => self.b = value as u8,
            10 => self.cc = Cc::unpack(value as u8),
            11 => self.dp = value as u8,
            _ => return Err(DecodeFault::TransferRegister(reg)),
        }
        Ok(())
    }

    /// EXG: swap two like-sized registers.
    pub(crate) fn exg(&mut self, post: u8) -> Result<(), DecodeFault> {
        let src = (post >> 4) & 0x0F;
        let dst = post & 0x0F;
        let from_src = self.read_register(src)?;
        let from_dst = self.read_register(dst)?;
        self.write_register(dst, from_src)?;
        self.write_register(src, from_dst)
    }

    /// TFR: copy source register into destination.
    pub(crate) fn tfr(&mut self, post: u8) -> Result<(), DecodeFault> {
        let src = (post >> 4) & 0x0F;
        let dst = post & 0x0F;
        let value = self.read_register(src)?;
        self.write_register(dst, value)
    }
}
