//! # Stack Instructions
//!
//! PHA/PLA push and pull the accumulator; PHP/PLP push and pull status.
//! PHP pushes with B and U forced set; PLP clears B and implies U when
//! restoring, so a pushed status never leaks the break bit into the live
//! register.

use crate::{Cpu, MemoryBus, OPCODE_TABLE};

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let a = cpu.a;
    cpu.push_byte(a);
    cpu.cycles += OPCODE_TABLE[opcode as usize].base_cycles as u64;
}

/// Executes the PLA (Pull Accumulator) instruction.
///
/// Unlike PHA this updates Z and N from the pulled value.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let value = cpu.pull_byte();
    cpu.a = value;
    cpu.update_zn(value);
    cpu.cycles += OPCODE_TABLE[opcode as usize].base_cycles as u64;
}

/// Executes the PHP (Push Processor Status) instruction.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let status = cpu.status() | 0b0011_0000; // B and U forced set
    cpu.push_byte(status);
    cpu.cycles += OPCODE_TABLE[opcode as usize].base_cycles as u64;
}

/// Executes the PLP (Pull Processor Status) instruction.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let status = cpu.pull_byte();
    cpu.set_status_from_pull(status);
    cpu.cycles += OPCODE_TABLE[opcode as usize].base_cycles as u64;
}
