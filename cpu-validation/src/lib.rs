//! CPU single-step validation harness.
//!
//! Test vectors are JSON files of [`TestCase`] records: a named initial
//! CPU+RAM state, the state after exactly one instruction, and the
//! reported cycle/byte counts. The generator binary produces vectors
//! from randomized register states; the regression test replays them.

use ember_core::core::Bus;
use ember_core::cpu::{Cc, M6809};
use serde::{Deserialize, Serialize};

/// One single-step test vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub initial: CpuState,
    #[serde(rename = "final")]
    pub final_state: CpuState,
    pub cycles: u8,
    pub bytes: u8,
}

/// Register file plus the sparse RAM cells the case touches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuState {
    pub pc: u16,
    pub s: u16,
    pub u: u16,
    pub a: u8,
    pub b: u8,
    pub dp: u8,
    pub x: u16,
    pub y: u16,
    pub cc: u8,
    pub ram: Vec<(u16, u8)>,
}

impl CpuState {
    /// Capture the registers, plus the listed RAM addresses.
    pub fn capture(cpu: &M6809, bus: &mut Bus, addrs: &[u16]) -> Self {
        Self {
            pc: cpu.pc,
            s: cpu.s,
            u: cpu.u,
            a: cpu.a,
            b: cpu.b,
            dp: cpu.dp,
            x: cpu.x,
            y: cpu.y,
            cc: cpu.cc.pack(),
            ram: addrs.iter().map(|&a| (a, bus.read(a))).collect(),
        }
    }

    /// Load this state into a CPU and bus.
    pub fn apply(&self, cpu: &mut M6809, bus: &mut Bus) {
        cpu.pc = self.pc;
        cpu.s = self.s;
        cpu.u = self.u;
        cpu.a = self.a;
        cpu.b = self.b;
        cpu.dp = self.dp;
        cpu.x = self.x;
        cpu.y = self.y;
        cpu.cc = Cc::unpack(self.cc);
        for &(addr, value) in &self.ram {
            bus.write(addr, value).unwrap();
        }
    }
}

/// Replay one vector and panic with a labelled message on any mismatch.
pub fn run_case(tc: &TestCase) {
    let mut cpu = M6809::new();
    let mut bus = Bus::new();
    tc.initial.apply(&mut cpu, &mut bus);

    cpu.step(&mut bus);

    assert_eq!(cpu.pc, tc.final_state.pc, "{}: PC", tc.name);
    assert_eq!(cpu.a, tc.final_state.a, "{}: A", tc.name);
    assert_eq!(cpu.b, tc.final_state.b, "{}: B", tc.name);
    assert_eq!(cpu.dp, tc.final_state.dp, "{}: DP", tc.name);
    assert_eq!(cpu.x, tc.final_state.x, "{}: X", tc.name);
    assert_eq!(cpu.y, tc.final_state.y, "{}: Y", tc.name);
    assert_eq!(cpu.u, tc.final_state.u, "{}: U", tc.name);
    assert_eq!(cpu.s, tc.final_state.s, "{}: S", tc.name);
    assert_eq!(cpu.cc.pack(), tc.final_state.cc, "{}: CC", tc.name);

    for &(addr, expected) in &tc.final_state.ram {
        assert_eq!(
            bus.read(addr),
            expected,
            "{}: RAM[0x{:04X}]",
            tc.name,
            addr
        );
    }

    assert_eq!(cpu.last_opcode_cycles, tc.cycles, "{}: cycles", tc.name);
    assert_eq!(cpu.last_opcode_bytes, tc.bytes, "{}: bytes", tc.name);
}
