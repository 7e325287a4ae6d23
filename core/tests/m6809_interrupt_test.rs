use ember_core::cpu::RunState;
mod common;
use common::{bus_with, cpu_at};

/// Bus with vectors for RESET, IRQ, FIRQ, NMI, SWI pointing at distinct
/// handler addresses.
fn vectored_bus() -> ember_core::core::Bus {
    let mut bus = bus_with(0x0500, &[0x12, 0x12, 0x12, 0x12]); // NOPs
    bus.load(0xFFFE, &[0xC0, 0x00]).unwrap(); // RESET -> 0xC000
    bus.load(0xFFFC, &[0xC1, 0x00]).unwrap(); // NMI   -> 0xC100
    bus.load(0xFFFA, &[0xC2, 0x00]).unwrap(); // SWI   -> 0xC200
    bus.load(0xFFF8, &[0x80, 0x00]).unwrap(); // IRQ   -> 0x8000
    bus.load(0xFFF6, &[0xC4, 0x00]).unwrap(); // FIRQ  -> 0xC400
    bus.load(0xFFF4, &[0xC5, 0x00]).unwrap(); // SWI2  -> 0xC500
    bus.load(0xFFF2, &[0xC6, 0x00]).unwrap(); // SWI3  -> 0xC600
    // Handlers are NOP sleds.
    for base in [0xC000u16, 0xC100, 0xC200, 0x8000, 0xC400, 0xC500, 0xC600] {
        bus.load(base, &[0x12, 0x12]).unwrap();
    }
    bus
}

#[test]
fn test_reset_loads_vector_and_masks() {
    let mut cpu = cpu_at(0x0500);
    let mut bus = vectored_bus();
    cpu.dp = 0x12;
    let lines = cpu.lines();

    lines.set_reset(true);
    assert_eq!(cpu.step(&mut bus), RunState::Reset);
    assert_eq!(cpu.pc, 0xC000);
    assert_eq!(cpu.dp, 0x00);
    assert!(cpu.cc.i);
    assert!(cpu.cc.f);

    // Held reset keeps reloading the vector.
    assert_eq!(cpu.step(&mut bus), RunState::Reset);
    assert_eq!(cpu.pc, 0xC000);

    // Released: execution resumes at the vector target.
    lines.set_reset(false);
    assert_eq!(cpu.step(&mut bus), RunState::Exec);
    assert_eq!(cpu.pc, 0xC001);
}

#[test]
fn test_halt_freezes_registers() {
    let mut cpu = cpu_at(0x0500);
    let mut bus = vectored_bus();
    let lines = cpu.lines();
    cpu.a = 0x42;

    lines.set_halt(true);
    for _ in 0..3 {
        assert_eq!(cpu.step(&mut bus), RunState::Halted);
        assert_eq!(cpu.pc, 0x0500);
        assert_eq!(cpu.a, 0x42);
    }

    lines.set_halt(false);
    assert_eq!(cpu.step(&mut bus), RunState::Exec);
    assert_eq!(cpu.pc, 0x0501);
}

#[test]
fn test_irq_stacks_entire_state() {
    let mut cpu = cpu_at(0x0500);
    let mut bus = vectored_bus();
    let lines = cpu.lines();
    cpu.s = 0x7FFF;
    cpu.cc.i = false;
    lines.set_irq(true);

    cpu.step(&mut bus);

    // Twelve bytes stacked, vector taken, IRQ masked, E set.
    assert_eq!(cpu.s, 0x7FFF - 12);
    assert_eq!(cpu.pc, 0x8001); // handler NOP already executed this step
    assert!(cpu.cc.i);
    assert!(cpu.cc.e);
    // Frame top-down: CC, A, B, DP, X, Y, U, PC.
    assert_eq!(bus.read(0x7FFD), 0x05); // PC high
    assert_eq!(bus.read(0x7FFE), 0x00); // PC low
}

#[test]
fn test_irq_masked_is_ignored() {
    let mut cpu = cpu_at(0x0500);
    let mut bus = vectored_bus();
    let lines = cpu.lines();
    cpu.cc.i = true;
    lines.set_irq(true);

    cpu.step(&mut bus);
    assert_eq!(cpu.pc, 0x0501); // plain NOP executed
}

#[test]
fn test_firq_stacks_short_frame() {
    let mut cpu = cpu_at(0x0500);
    let mut bus = vectored_bus();
    let lines = cpu.lines();
    cpu.s = 0x7FFF;
    lines.set_firq(true);

    cpu.step(&mut bus);

    // Only PC and CC stacked, E clear in the stacked CC.
    assert_eq!(cpu.s, 0x7FFF - 3);
    assert!(cpu.cc.f);
    assert!(cpu.cc.i);
    assert!(!cpu.cc.e);
    assert_eq!(bus.read(0x7FFC) & 0x80, 0); // stacked CC has E clear
}

#[test]
fn test_nmi_requires_arming() {
    let mut cpu = cpu_at(0x0500);
    let mut bus = vectored_bus();
    let lines = cpu.lines();
    cpu.cc.i = true;
    cpu.cc.f = true;

    // NMI latched before S was ever loaded: not serviced, latch holds.
    lines.trigger_nmi();
    cpu.step(&mut bus);
    assert_eq!(cpu.pc, 0x0501);
    assert!(lines.nmi_latched());

    // Load S (arms NMI); the pending edge is taken on the next step.
    let mut cpu = cpu_at(0x0500);
    let mut bus = vectored_bus();
    bus.load(0x0500, &[0x10, 0xCE, 0x7F, 0xFF, 0x12]).unwrap(); // LDS #$7FFF
    let lines = cpu.lines();
    lines.trigger_nmi();
    cpu.step(&mut bus); // LDS arms
    cpu.step(&mut bus); // NMI serviced
    assert_eq!(cpu.pc, 0xC101);
    assert!(!lines.nmi_latched());
    assert!(cpu.cc.i);
    assert!(cpu.cc.f);
}

#[test]
fn test_level_irq_released_before_sample_not_observed() {
    let mut cpu = cpu_at(0x0500);
    let mut bus = vectored_bus();
    let lines = cpu.lines();
    cpu.cc.i = false;

    lines.set_irq(true);
    lines.set_irq(false);
    cpu.step(&mut bus);
    assert_eq!(cpu.pc, 0x0501); // no service
}

#[test]
fn test_rti_full_frame_restores_all() {
    let mut cpu = cpu_at(0x0500);
    let mut bus = vectored_bus();
    let lines = cpu.lines();
    cpu.s = 0x7FFF;
    cpu.a = 0x11;
    cpu.b = 0x22;
    cpu.dp = 0x33;
    cpu.x = 0x4444;
    cpu.y = 0x5555;
    cpu.u = 0x6666;
    cpu.cc.i = false;
    lines.set_irq(true);
    bus.load(0x8000, &[0x3B]).unwrap(); // handler: RTI

    cpu.step(&mut bus); // IRQ service + RTI executes
    lines.set_irq(false);

    assert_eq!(cpu.pc, 0x0500);
    assert_eq!(cpu.s, 0x7FFF);
    assert_eq!(cpu.a, 0x11);
    assert_eq!(cpu.b, 0x22);
    assert_eq!(cpu.dp, 0x33);
    assert_eq!(cpu.x, 0x4444);
    assert_eq!(cpu.y, 0x5555);
    assert_eq!(cpu.u, 0x6666);
    assert!(!cpu.cc.i);
    // Full frame costs nine extra cycles over the base RTI.
    assert_eq!(cpu.last_opcode_cycles, 15);
}

#[test]
fn test_rti_fast_frame_restores_cc_and_pc_only() {
    let mut cpu = cpu_at(0x0500);
    let mut bus = vectored_bus();
    let lines = cpu.lines();
    cpu.s = 0x7FFF;
    cpu.x = 0x4444;
    lines.set_firq(true);
    bus.load(0xC400, &[0x8E, 0x99, 0x99, 0x3B]).unwrap(); // LDX #$9999, RTI

    cpu.step(&mut bus); // FIRQ service + LDX
    lines.set_firq(false);
    cpu.step(&mut bus); // RTI

    assert_eq!(cpu.pc, 0x0500);
    assert_eq!(cpu.s, 0x7FFF);
    // X was not part of the fast frame: the handler's clobber survives.
    assert_eq!(cpu.x, 0x9999);
    assert_eq!(cpu.last_opcode_cycles, 6);
}

#[test]
fn test_swi_families() {
    let mut cpu = cpu_at(0x0500);
    let mut bus = vectored_bus();
    bus.load(0x0500, &[0x3F]).unwrap(); // SWI
    cpu.s = 0x7FFF;
    cpu.step(&mut bus);
    assert_eq!(cpu.pc, 0xC200);
    assert_eq!(cpu.s, 0x7FFF - 12);
    assert!(cpu.cc.i);
    assert!(cpu.cc.f);
    assert!(cpu.cc.e);

    // SWI2 and SWI3 do not mask interrupts.
    let mut cpu = cpu_at(0x0500);
    let mut bus = vectored_bus();
    bus.load(0x0500, &[0x10, 0x3F]).unwrap();
    cpu.s = 0x7FFF;
    cpu.step(&mut bus);
    assert_eq!(cpu.pc, 0xC500);
    assert!(!cpu.cc.i);
    assert!(!cpu.cc.f);

    let mut cpu = cpu_at(0x0500);
    let mut bus = vectored_bus();
    bus.load(0x0500, &[0x11, 0x3F]).unwrap();
    cpu.s = 0x7FFF;
    cpu.step(&mut bus);
    assert_eq!(cpu.pc, 0xC600);
    assert!(!cpu.cc.i);
}

#[test]
fn test_sync_waits_for_unmasked_interrupt() {
    let mut cpu = cpu_at(0x0500);
    let mut bus = vectored_bus();
    bus.load(0x0500, &[0x13]).unwrap(); // SYNC
    let lines = cpu.lines();
    cpu.s = 0x7FFF;
    cpu.cc.i = false;

    assert_eq!(cpu.step(&mut bus), RunState::Sync);
    assert_eq!(cpu.step(&mut bus), RunState::Sync);
    assert_eq!(cpu.pc, 0x0501);

    lines.set_irq(true);
    assert_eq!(cpu.step(&mut bus), RunState::Exec);
    assert_eq!(cpu.pc, 0x8001);
}

#[test]
fn test_cwai_stacks_then_waits() {
    let mut cpu = cpu_at(0x0500);
    let mut bus = vectored_bus();
    bus.load(0x0500, &[0x3C, 0xEF]).unwrap(); // CWAI #$EF (clear I)
    let lines = cpu.lines();
    cpu.s = 0x7FFF;
    cpu.cc.i = true;

    assert_eq!(cpu.step(&mut bus), RunState::Sync);
    // Entire state already stacked with E set.
    assert_eq!(cpu.s, 0x7FFF - 12);
    assert!(cpu.cc.e);
    assert!(!cpu.cc.i);

    // An unmasked interrupt wakes the CPU through the normal service
    // path and vectors to the handler.
    lines.set_irq(true);
    assert_eq!(cpu.step(&mut bus), RunState::Exec);
    assert_eq!(cpu.pc, 0x8001);
}

#[test]
fn test_illegal_opcode_freezes_until_reset() {
    let mut cpu = cpu_at(0x0500);
    let mut bus = vectored_bus();
    bus.load(0x0500, &[0x01]).unwrap(); // illegal
    let lines = cpu.lines();

    assert_eq!(cpu.step(&mut bus), RunState::Exception);
    assert!(cpu.fault().is_some());

    // Further steps make no progress.
    assert_eq!(cpu.step(&mut bus), RunState::Exception);
    assert_eq!(cpu.pc, 0x0501);

    // RESET recovers.
    lines.set_reset(true);
    assert_eq!(cpu.step(&mut bus), RunState::Reset);
    assert!(cpu.fault().is_none());
    lines.set_reset(false);
    assert_eq!(cpu.step(&mut bus), RunState::Exec);
}

#[test]
fn test_illegal_prefixed_opcodes_fault() {
    for program in [&[0x10u8, 0x00], &[0x11u8, 0x00]] {
        let mut cpu = cpu_at(0x0500);
        let mut bus = vectored_bus();
        bus.load(0x0500, program).unwrap();
        assert_eq!(cpu.step(&mut bus), RunState::Exception);
    }
}
