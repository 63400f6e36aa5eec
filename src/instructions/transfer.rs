//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA, TSX and TXS. All implied-mode, 2 cycles. Every
//! transfer updates Z and N except TXS, which writes the stack pointer
//! without touching flags.

use crate::{Cpu, MemoryBus, OPCODE_TABLE};

/// Executes the TAX (Transfer Accumulator to X) instruction.
pub(crate) fn execute_tax<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.x = cpu.a;
    let x = cpu.x;
    cpu.update_zn(x);
    cpu.cycles += OPCODE_TABLE[opcode as usize].base_cycles as u64;
}

/// Executes the TAY (Transfer Accumulator to Y) instruction.
pub(crate) fn execute_tay<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.y = cpu.a;
    let y = cpu.y;
    cpu.update_zn(y);
    cpu.cycles += OPCODE_TABLE[opcode as usize].base_cycles as u64;
}

/// Executes the TXA (Transfer X to Accumulator) instruction.
pub(crate) fn execute_txa<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.a = cpu.x;
    let a = cpu.a;
    cpu.update_zn(a);
    cpu.cycles += OPCODE_TABLE[opcode as usize].base_cycles as u64;
}

/// Executes the TYA (Transfer Y to Accumulator) instruction.
pub(crate) fn execute_tya<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.a = cpu.y;
    let a = cpu.a;
    cpu.update_zn(a);
    cpu.cycles += OPCODE_TABLE[opcode as usize].base_cycles as u64;
}

/// Executes the TSX (Transfer Stack Pointer to X) instruction.
pub(crate) fn execute_tsx<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.x = cpu.sp;
    let x = cpu.x;
    cpu.update_zn(x);
    cpu.cycles += OPCODE_TABLE[opcode as usize].base_cycles as u64;
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction.
///
/// The only transfer that does not touch flags.
pub(crate) fn execute_txs<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.sp = cpu.x;
    cpu.cycles += OPCODE_TABLE[opcode as usize].base_cycles as u64;
}
