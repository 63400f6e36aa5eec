//! Tests for PHP/PLP status push and pull masking.

use emu6502::{Cpu, FlatMemory, MemoryBus};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    Cpu::new(memory)
}

#[test]
fn test_php_forces_break_and_unused() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x08); // PHP
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.sp(), 0xFE);
    let pushed = cpu.memory_mut().read(0x01FF);
    // Live flags were U|I|C; the pushed byte adds B
    assert_eq!(pushed, 0b0011_0101);
    // The live B flag itself stays clear
    assert!(!cpu.flag_b());
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_plp_clears_break_and_implies_unused() {
    let mut cpu = setup_cpu();

    // Plant a status byte with B set and pull it
    cpu.set_sp(0xFE);
    cpu.memory_mut().write(0x01FF, 0b1101_1011); // N V B D Z C
    cpu.memory_mut().write(0x8000, 0x28); // PLP

    cpu.step().unwrap();

    assert_eq!(cpu.sp(), 0xFF);
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(!cpu.flag_b()); // cleared on pull
    assert!(cpu.flag_d());
    assert!(!cpu.flag_i());
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    // Packed view: B clear, U set
    assert_eq!(cpu.status(), 0b1110_1011);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_php_plp_roundtrip_is_lossless_modulo_b() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x08); // PHP
    cpu.memory_mut().write(0x8001, 0x28); // PLP

    cpu.set_flag_n(true);
    cpu.set_flag_d(true);
    cpu.set_flag_c(true);
    let before = cpu.status();

    cpu.step().unwrap();

    // Scramble everything between push and pull
    cpu.set_flag_n(false);
    cpu.set_flag_d(false);
    cpu.set_flag_c(false);
    cpu.set_flag_v(true);

    cpu.step().unwrap();

    assert_eq!(cpu.status(), before);
}

#[test]
fn test_pha_pla_updates_flags_on_pull_only() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x48); // PHA
    cpu.memory_mut().write(0x8001, 0x68); // PLA

    cpu.set_a(0x80);
    cpu.step().unwrap();
    // PHA leaves flags alone
    assert!(!cpu.flag_n());

    cpu.set_a(0x00);
    cpu.step().unwrap();
    // PLA restored 0x80 and set N
    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.cycles(), 3 + 4);
}
