//! Tests for BRK and RTI: the software interrupt layout.
//!
//! BRK pushes PC+2 (it carries a padding byte) and status with B and U
//! forced set, sets I, then vectors through $FFFE. RTI pulls status (B
//! cleared, U implied) then PC, with no +1 adjustment.

use emu6502::{Cpu, FlatMemory, MemoryBus};

/// Helper: reset vector at 0x8000, IRQ/BRK vector at 0x9000
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.write(0xFFFE, 0x00);
    memory.write(0xFFFF, 0x90);
    Cpu::new(memory)
}

#[test]
fn test_brk_stack_layout() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x00); // BRK
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x9000);
    assert_eq!(cpu.sp(), 0xFC);
    assert!(cpu.flag_i());
    assert_eq!(cpu.cycles(), 7);

    // Return address is PC+2 from the BRK opcode
    assert_eq!(cpu.memory_mut().read(0x01FF), 0x80); // high
    assert_eq!(cpu.memory_mut().read(0x01FE), 0x02); // low

    // Pushed status has B and U set alongside the live flags (C, I, U)
    let pushed = cpu.memory_mut().read(0x01FD);
    assert_eq!(pushed, 0b0011_0101);
}

#[test]
fn test_brk_does_not_set_live_b_flag() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x00);
    cpu.step().unwrap();

    // B exists only in the pushed byte
    assert!(!cpu.flag_b());
    assert_eq!(cpu.status() & 0b0001_0000, 0);
}

#[test]
fn test_rti_restores_status_and_pc() {
    let mut cpu = setup_cpu();

    // BRK at 0x8000, handler at 0x9000 is RTI
    cpu.memory_mut().write(0x8000, 0x00);
    cpu.memory_mut().write(0x9000, 0x40);

    cpu.set_flag_c(true);
    cpu.set_flag_z(true);

    cpu.step().unwrap(); // BRK
    cpu.step().unwrap(); // RTI

    // RTI lands on the pushed address as-is (BRK pushed PC+2)
    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!(cpu.sp(), 0xFF);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_b());
    assert_eq!(cpu.cycles(), 13); // 7 + 6
}

#[test]
fn test_rti_clears_break_and_forces_unused() {
    let mut cpu = setup_cpu();

    // Hand-craft an interrupt frame with every status bit set
    cpu.set_sp(0xFC);
    cpu.memory_mut().write(0x01FD, 0xFF); // status with B set
    cpu.memory_mut().write(0x01FE, 0x34); // PC low
    cpu.memory_mut().write(0x01FF, 0x12); // PC high
    cpu.memory_mut().write(0x8000, 0x40); // RTI

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x1234);
    // All flags restored except B; U reads 1
    assert_eq!(cpu.status(), 0b1110_1111);
    assert!(!cpu.flag_b());
}

#[test]
fn test_brk_sets_interrupt_disable() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x58); // CLI
    cpu.memory_mut().write(0x8001, 0x00); // BRK

    cpu.step().unwrap();
    assert!(!cpu.flag_i());

    cpu.step().unwrap();
    assert!(cpu.flag_i());
}
