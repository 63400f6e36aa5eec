//! # Load and Store Instructions
//!
//! - LDA / LDX / LDY: load a register and update Z/N; reads in indexed
//!   absolute and (zp),Y modes pay the page-cross penalty
//! - STA / STX / STY: store a register; no flags, no penalty (the indexed
//!   entries carry the fixup cycle in their base count)

use crate::{Cpu, MemoryBus, OPCODE_TABLE};

/// Executes the LDA (Load Accumulator) instruction.
pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let info = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.operand_value(info.addressing_mode);

    cpu.a = value;
    cpu.update_zn(value);

    cpu.cycles += info.base_cycles as u64 + page_crossed as u64;
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let info = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.operand_value(info.addressing_mode);

    cpu.x = value;
    cpu.update_zn(value);

    cpu.cycles += info.base_cycles as u64 + page_crossed as u64;
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let info = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.operand_value(info.addressing_mode);

    cpu.y = value;
    cpu.update_zn(value);

    cpu.cycles += info.base_cycles as u64 + page_crossed as u64;
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let info = &OPCODE_TABLE[opcode as usize];

    let (addr, _) = cpu.operand_address(info.addressing_mode);
    let a = cpu.a;
    cpu.memory.write(addr, a);

    cpu.cycles += info.base_cycles as u64;
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let info = &OPCODE_TABLE[opcode as usize];

    let (addr, _) = cpu.operand_address(info.addressing_mode);
    let x = cpu.x;
    cpu.memory.write(addr, x);

    cpu.cycles += info.base_cycles as u64;
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let info = &OPCODE_TABLE[opcode as usize];

    let (addr, _) = cpu.operand_address(info.addressing_mode);
    let y = cpu.y;
    cpu.memory.write(addr, y);

    cpu.cycles += info.base_cycles as u64;
}
