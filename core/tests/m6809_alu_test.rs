use ember_core::core::Bus;
use ember_core::cpu::M6809;
mod common;
use common::{bus_with, cpu_at};

fn one(program: &[u8]) -> (M6809, Bus) {
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, program);
    cpu.step(&mut bus);
    (cpu, bus)
}

#[test]
fn test_adda_imm_half_carry() {
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x8B, 0x27]); // ADDA #$27
    cpu.a = 0x2B;
    cpu.step(&mut bus);

    assert_eq!(cpu.a, 0x52);
    assert_eq!(cpu.pc, 0x1002);
    assert!(cpu.cc.h);
    assert!(!cpu.cc.n);
    assert!(!cpu.cc.z);
    assert!(!cpu.cc.v);
    assert!(!cpu.cc.c);
}

#[test]
fn test_adda_imm_signed_overflow() {
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x8B, 0x50]); // ADDA #$50
    cpu.a = 0x50;
    cpu.step(&mut bus);

    assert_eq!(cpu.a, 0xA0);
    assert!(cpu.cc.n);
    assert!(cpu.cc.v);
    assert!(!cpu.cc.c);
}

#[test]
fn test_adca_uses_carry_in() {
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x89, 0x00]); // ADCA #$00
    cpu.a = 0xFF;
    cpu.cc.c = true;
    cpu.step(&mut bus);

    assert_eq!(cpu.a, 0x00);
    assert!(cpu.cc.z);
    assert!(cpu.cc.c);
    assert!(cpu.cc.h);
}

#[test]
fn test_suba_borrow_sets_carry() {
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x80, 0x10]); // SUBA #$10
    cpu.a = 0x05;
    cpu.step(&mut bus);

    assert_eq!(cpu.a, 0xF5);
    assert!(cpu.cc.c);
    assert!(cpu.cc.n);
    assert!(!cpu.cc.z);
}

#[test]
fn test_cmpa_leaves_accumulator() {
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x81, 0x42]); // CMPA #$42
    cpu.a = 0x42;
    cpu.step(&mut bus);

    assert_eq!(cpu.a, 0x42);
    assert!(cpu.cc.z);
    assert!(!cpu.cc.c);
}

#[test]
fn test_subd_imm() {
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x83, 0x00, 0x01]); // SUBD #$0001
    cpu.a = 0x00;
    cpu.b = 0x00;
    cpu.step(&mut bus);

    assert_eq!(cpu.d(), 0xFFFF);
    assert!(cpu.cc.c);
    assert!(cpu.cc.n);
}

#[test]
fn test_addd_carry16() {
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0xC3, 0x00, 0x01]); // ADDD #$0001
    cpu.set_d(0xFFFF);
    cpu.step(&mut bus);

    assert_eq!(cpu.d(), 0x0000);
    assert!(cpu.cc.z);
    assert!(cpu.cc.c);
}

#[test]
fn test_anda_ora_eora_clear_v() {
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x84, 0x0F, 0x8A, 0x80, 0x88, 0xFF]);
    cpu.a = 0x3C;
    cpu.cc.v = true;
    cpu.step(&mut bus); // ANDA #$0F
    assert_eq!(cpu.a, 0x0C);
    assert!(!cpu.cc.v);

    cpu.step(&mut bus); // ORA #$80
    assert_eq!(cpu.a, 0x8C);
    assert!(cpu.cc.n);

    cpu.step(&mut bus); // EORA #$FF
    assert_eq!(cpu.a, 0x73);
    assert!(!cpu.cc.n);
}

#[test]
fn test_bita_preserves_accumulator() {
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x85, 0x0F]); // BITA #$0F
    cpu.a = 0xF0;
    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0xF0);
    assert!(cpu.cc.z);
}

#[test]
fn test_com_sets_carry() {
    let (cpu, _) = {
        let mut cpu = cpu_at(0x1000);
        let mut bus = bus_with(0x1000, &[0x43]); // COMA
        cpu.a = 0x0F;
        cpu.cc.v = true;
        cpu.step(&mut bus);
        (cpu, bus)
    };
    assert_eq!(cpu.a, 0xF0);
    assert!(cpu.cc.c);
    assert!(!cpu.cc.v);
    assert!(cpu.cc.n);
}

#[test]
fn test_neg_of_0x80_overflows() {
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x40]); // NEGA
    cpu.a = 0x80;
    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x80);
    assert!(cpu.cc.v);
    assert!(cpu.cc.c);
    assert!(cpu.cc.n);
}

#[test]
fn test_inc_dec_overflow_edges() {
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x4C, 0x4A, 0x4A]); // INCA, DECA, DECA
    cpu.a = 0x7F;
    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x80);
    assert!(cpu.cc.v);
    assert!(cpu.cc.n);

    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x7F);
    assert!(cpu.cc.v);

    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x7E);
    assert!(!cpu.cc.v);
}

#[test]
fn test_clr_flags() {
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x4F]); // CLRA
    cpu.a = 0x55;
    cpu.cc.c = true;
    cpu.cc.n = true;
    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x00);
    assert!(cpu.cc.z);
    assert!(!cpu.cc.n);
    assert!(!cpu.cc.v);
    assert!(!cpu.cc.c);
}

#[test]
fn test_shifts_and_rotates() {
    // ASLA: MSB into carry, V = b7 ^ b6.
    let (cpu, _) = {
        let mut cpu = cpu_at(0x1000);
        let mut bus = bus_with(0x1000, &[0x48]);
        cpu.a = 0xC1;
        cpu.step(&mut bus);
        (cpu, bus)
    };
    assert_eq!(cpu.a, 0x82);
    assert!(cpu.cc.c);
    assert!(!cpu.cc.v);

    // LSRA: LSB into carry, N cleared.
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x44]);
    cpu.a = 0x81;
    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x40);
    assert!(cpu.cc.c);
    assert!(!cpu.cc.n);

    // ASRA: sign replicated.
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x47]);
    cpu.a = 0x81;
    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0xC0);
    assert!(cpu.cc.c);

    // ROLA pulls carry into bit 0.
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x49]);
    cpu.a = 0x80;
    cpu.cc.c = true;
    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x01);
    assert!(cpu.cc.c);

    // RORA pushes carry into bit 7.
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x46]);
    cpu.a = 0x01;
    cpu.cc.c = true;
    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x80);
    assert!(cpu.cc.c);
    assert!(cpu.cc.n);
}

#[test]
fn test_memory_shift_writes_back() {
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x78, 0x20, 0x00]); // ASL $2000
    bus.write(0x2000, 0x40).unwrap();
    cpu.step(&mut bus);
    assert_eq!(bus.read(0x2000), 0x80);
    assert!(cpu.cc.n);
    assert!(cpu.cc.v);
}

#[test]
fn test_mul() {
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x3D]); // MUL
    cpu.a = 0x0C;
    cpu.b = 0x64;
    cpu.step(&mut bus);
    assert_eq!(cpu.d(), 0x04B0);
    assert!(!cpu.cc.z);
    // C copies bit 7 of the product low byte (B).
    assert!(cpu.cc.c);

    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x3D]);
    cpu.a = 0x00;
    cpu.b = 0x55;
    cpu.step(&mut bus);
    assert_eq!(cpu.d(), 0x0000);
    assert!(cpu.cc.z);
    assert!(!cpu.cc.c);
}

#[test]
fn test_daa_bcd_addition() {
    // 0x19 + 0x28 = 0x41 binary; DAA corrects to BCD 47.
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x8B, 0x28, 0x19]); // ADDA #$28, DAA
    cpu.a = 0x19;
    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x41);
    assert!(cpu.cc.h);
    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x47);
    assert!(!cpu.cc.c);

    // 0x99 + 0x01 = 0x9A; DAA corrects to 0x00 with carry.
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x8B, 0x01, 0x19]);
    cpu.a = 0x99;
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x00);
    assert!(cpu.cc.c);
    assert!(cpu.cc.z);
}

#[test]
fn test_sex_abx_tst() {
    let (mut cpu, mut bus) = one(&[0x1D]); // SEX with B = 0
    assert_eq!(cpu.a, 0x00);
    assert!(cpu.cc.z);

    cpu = cpu_at(0x1000);
    bus = bus_with(0x1000, &[0x1D, 0x3A, 0x5D]);
    cpu.b = 0x80;
    cpu.x = 0x1000;
    cpu.step(&mut bus); // SEX
    assert_eq!(cpu.a, 0xFF);
    assert!(cpu.cc.n);

    cpu.step(&mut bus); // ABX: unsigned add, no flags
    assert_eq!(cpu.x, 0x1080);

    cpu.step(&mut bus); // TSTB
    assert!(cpu.cc.n);
    assert!(!cpu.cc.z);
    assert!(!cpu.cc.v);
}

#[test]
fn test_orcc_andcc() {
    let mut cpu = cpu_at(0x1000);
    let mut bus = bus_with(0x1000, &[0x1A, 0x50, 0x1C, 0xEF]); // ORCC #$50, ANDCC #$EF
    cpu.step(&mut bus);
    assert!(cpu.cc.f);
    assert!(cpu.cc.i);

    cpu.step(&mut bus);
    assert!(cpu.cc.f);
    assert!(!cpu.cc.i);
}
