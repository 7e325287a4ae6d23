use ember_core::core::Bus;
use ember_core::cpu::M6809;

/// Bus preloaded with a program at `addr`; everything is RAM.
pub fn bus_with(addr: u16, program: &[u8]) -> Bus {
    let mut bus = Bus::new();
    bus.load(addr, program).unwrap();
    bus
}

/// CPU parked at `pc` with a usable stack, ready to execute.
pub fn cpu_at(pc: u16) -> M6809 {
    let mut cpu = M6809::new();
    cpu.pc = pc;
    cpu.s = 0x7F00;
    cpu
}

/// Run `n` instructions.
#[allow(dead_code)]
pub fn step_n(cpu: &mut M6809, bus: &mut Bus, n: usize) {
    for _ in 0..n {
        cpu.step(bus);
    }
}
