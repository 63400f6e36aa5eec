//! # Increment and Decrement Instructions
//!
//! - INC / DEC: read-modify-write on memory
//! - INX / INY / DEX / DEY: register forms
//!
//! All update Z and N from the result. The memory forms never pay a
//! page-cross penalty; the indexed absolute entries carry the fixup cycle
//! in their base count.

use crate::{Cpu, MemoryBus, OPCODE_TABLE};

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let info = &OPCODE_TABLE[opcode as usize];

    let (addr, _) = cpu.operand_address(info.addressing_mode);
    let result = cpu.memory.read(addr).wrapping_add(1);
    cpu.memory.write(addr, result);
    cpu.update_zn(result);

    cpu.cycles += info.base_cycles as u64;
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    let info = &OPCODE_TABLE[opcode as usize];

    let (addr, _) = cpu.operand_address(info.addressing_mode);
    let result = cpu.memory.read(addr).wrapping_sub(1);
    cpu.memory.write(addr, result);
    cpu.update_zn(result);

    cpu.cycles += info.base_cycles as u64;
}

/// Executes the INX (Increment X Register) instruction.
pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.x = cpu.x.wrapping_add(1);
    let x = cpu.x;
    cpu.update_zn(x);
    cpu.cycles += OPCODE_TABLE[opcode as usize].base_cycles as u64;
}

/// Executes the INY (Increment Y Register) instruction.
pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.y = cpu.y.wrapping_add(1);
    let y = cpu.y;
    cpu.update_zn(y);
    cpu.cycles += OPCODE_TABLE[opcode as usize].base_cycles as u64;
}

/// Executes the DEX (Decrement X Register) instruction.
pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.x = cpu.x.wrapping_sub(1);
    let x = cpu.x;
    cpu.update_zn(x);
    cpu.cycles += OPCODE_TABLE[opcode as usize].base_cycles as u64;
}

/// Executes the DEY (Decrement Y Register) instruction.
pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.y = cpu.y.wrapping_sub(1);
    let y = cpu.y;
    cpu.update_zn(y);
    cpu.cycles += OPCODE_TABLE[opcode as usize].base_cycles as u64;
}
