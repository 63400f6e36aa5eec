//! # Status Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED and CLV. All are implied-mode, 2 cycles,
//! and touch exactly one flag.

use crate::{Cpu, MemoryBus, OPCODE_TABLE};

fn charge<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.cycles += OPCODE_TABLE[opcode as usize].base_cycles as u64;
}

/// CLC - Clear Carry Flag.
pub(crate) fn execute_clc<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_c = false;
    charge(cpu, opcode);
}

/// SEC - Set Carry Flag.
pub(crate) fn execute_sec<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_c = true;
    charge(cpu, opcode);
}

/// CLI - Clear Interrupt Disable.
pub(crate) fn execute_cli<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_i = false;
    charge(cpu, opcode);
}

/// SEI - Set Interrupt Disable.
pub(crate) fn execute_sei<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_i = true;
    charge(cpu, opcode);
}

/// CLD - Clear Decimal Mode.
pub(crate) fn execute_cld<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_d = false;
    charge(cpu, opcode);
}

/// SED - Set Decimal Mode.
pub(crate) fn execute_sed<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_d = true;
    charge(cpu, opcode);
}

/// CLV - Clear Overflow Flag.
pub(crate) fn execute_clv<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_v = false;
    charge(cpu, opcode);
}
