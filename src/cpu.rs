//! # CPU State and Execution
//!
//! This module contains the Cpu struct representing the 6502 processor
//! state and the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, B, D, I, Z, C (individual bool fields; the
//!   unused bit reads 1 in the packed byte)
//! - **Cycle counter**: u64 monotonically increasing cycle count
//!
//! ## Execution Model
//!
//! - `step()`: execute exactly one instruction; an undocumented opcode is
//!   reported as `ExecutionError::IllegalOpcode` after the fetch, leaving
//!   the rest of the machine untouched
//! - `run_for_cycles()`: execute until a cycle budget is exhausted
//! - `reset()`: the 6502 reset sequence (registers cleared, SP = 0xFF,
//!   P = U|I, PC loaded from the vector at 0xFFFC/0xFFFD)

use crate::addressing::AddressingMode;
use crate::opcodes::Mnemonic;
use crate::{ExecutionError, MemoryBus, OPCODE_TABLE};

/// Address of the 16-bit reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Address of the 16-bit IRQ/BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Base address of the hardware stack page.
const STACK_BASE: u16 = 0x0100;

/// 6502 CPU state and execution context.
///
/// The Cpu struct contains all processor state including registers, flags,
/// program counter, stack pointer, and cycle counter. It is generic over
/// the memory implementation via the `MemoryBus` trait and owns its bus.
///
/// # Examples
///
/// ```
/// use emu6502::{Cpu, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80); // PC = 0x8000
///
/// let cpu = Cpu::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFF);
/// assert!(cpu.flag_i());
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct Cpu<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Negative flag (set if bit 7 of result is 1)
    pub(crate) flag_n: bool,

    /// Overflow flag (set on signed overflow)
    pub(crate) flag_v: bool,

    /// Break flag (only ever observed in pushed status bytes)
    pub(crate) flag_b: bool,

    /// Decimal mode flag (enables BCD arithmetic)
    pub(crate) flag_d: bool,

    /// Interrupt disable flag
    pub(crate) flag_i: bool,

    /// Zero flag (set if result is zero)
    pub(crate) flag_z: bool,

    /// Carry flag (set on unsigned overflow/underflow)
    pub(crate) flag_c: bool,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> Cpu<M> {
    /// Creates a new CPU with the given memory bus.
    ///
    /// The CPU starts in the power-on reset state; see [`Cpu::reset`].
    pub fn new(memory: M) -> Self {
        let mut cpu = Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: 0x0000,
            sp: 0xFF,
            flag_n: false,
            flag_v: false,
            flag_b: false,
            flag_d: false,
            flag_i: true,
            flag_z: false,
            flag_c: false,
            cycles: 0,
            memory,
        };
        cpu.reset();
        cpu
    }

    /// Applies the 6502 reset sequence.
    ///
    /// - A, X and Y are cleared
    /// - SP is set to 0xFF
    /// - Status is U|I (0x24 as a packed byte)
    /// - PC is loaded from the little-endian reset vector at 0xFFFC/0xFFFD
    /// - The cycle counter restarts at 0
    ///
    /// Memory contents are untouched; only the bus reads for the vector are
    /// issued.
    pub fn reset(&mut self) {
        self.a = 0x00;
        self.x = 0x00;
        self.y = 0x00;
        self.sp = 0xFF;
        self.flag_n = false;
        self.flag_v = false;
        self.flag_b = false;
        self.flag_d = false;
        self.flag_i = true;
        self.flag_z = false;
        self.flag_c = false;

        let lo = self.memory.read(RESET_VECTOR) as u16;
        let hi = self.memory.read(RESET_VECTOR + 1) as u16;
        self.pc = (hi << 8) | lo;
        self.cycles = 0;
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// Performs the fetch-decode-execute cycle:
    /// 1. Fetch the opcode byte at PC and advance PC past it
    /// 2. Look up the instruction descriptor in the opcode table
    /// 3. Resolve the operand and execute; the handler charges base cycles
    ///    plus any page-crossing penalty
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the instruction executed
    /// - `Err(ExecutionError::IllegalOpcode(op))` for an undocumented
    ///   opcode. Exactly one cycle (the fetch) has been charged and PC
    ///   points past the opcode byte; registers and memory are untouched.
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        let opcode = self.fetch_byte();
        let info = &OPCODE_TABLE[opcode as usize];

        use crate::instructions::*;
        match info.mnemonic {
            Mnemonic::ADC => alu::execute_adc(self, opcode),
            Mnemonic::AND => alu::execute_and(self, opcode),
            Mnemonic::ASL => shifts::execute_asl(self, opcode),
            Mnemonic::BCC => branches::execute_bcc(self, opcode),
            Mnemonic::BCS => branches::execute_bcs(self, opcode),
            Mnemonic::BEQ => branches::execute_beq(self, opcode),
            Mnemonic::BIT => alu::execute_bit(self, opcode),
            Mnemonic::BMI => branches::execute_bmi(self, opcode),
            Mnemonic::BNE => branches::execute_bne(self, opcode),
            Mnemonic::BPL => branches::execute_bpl(self, opcode),
            Mnemonic::BRK => control::execute_brk(self, opcode),
            Mnemonic::BVC => branches::execute_bvc(self, opcode),
            Mnemonic::BVS => branches::execute_bvs(self, opcode),
            Mnemonic::CLC => flags::execute_clc(self, opcode),
            Mnemonic::CLD => flags::execute_cld(self, opcode),
            Mnemonic::CLI => flags::execute_cli(self, opcode),
            Mnemonic::CLV => flags::execute_clv(self, opcode),
            Mnemonic::CMP => alu::execute_cmp(self, opcode),
            Mnemonic::CPX => alu::execute_cpx(self, opcode),
            Mnemonic::CPY => alu::execute_cpy(self, opcode),
            Mnemonic::DEC => inc_dec::execute_dec(self, opcode),
            Mnemonic::DEX => inc_dec::execute_dex(self, opcode),
            Mnemonic::DEY => inc_dec::execute_dey(self, opcode),
            Mnemonic::EOR => alu::execute_eor(self, opcode),
            Mnemonic::INC => inc_dec::execute_inc(self, opcode),
            Mnemonic::INX => inc_dec::execute_inx(self, opcode),
            Mnemonic::INY => inc_dec::execute_iny(self, opcode),
            Mnemonic::JMP => control::execute_jmp(self, opcode),
            Mnemonic::JSR => control::execute_jsr(self, opcode),
            Mnemonic::LDA => load_store::execute_lda(self, opcode),
            Mnemonic::LDX => load_store::execute_ldx(self, opcode),
            Mnemonic::LDY => load_store::execute_ldy(self, opcode),
            Mnemonic::LSR => shifts::execute_lsr(self, opcode),
            Mnemonic::NOP => control::execute_nop(self, opcode),
            Mnemonic::ORA => alu::execute_ora(self, opcode),
            Mnemonic::PHA => stack::execute_pha(self, opcode),
            Mnemonic::PHP => stack::execute_php(self, opcode),
            Mnemonic::PLA => stack::execute_pla(self, opcode),
            Mnemonic::PLP => stack::execute_plp(self, opcode),
            Mnemonic::ROL => shifts::execute_rol(self, opcode),
            Mnemonic::ROR => shifts::execute_ror(self, opcode),
            Mnemonic::RTI => control::execute_rti(self, opcode),
            Mnemonic::RTS => control::execute_rts(self, opcode),
            Mnemonic::SBC => alu::execute_sbc(self, opcode),
            Mnemonic::SEC => flags::execute_sec(self, opcode),
            Mnemonic::SED => flags::execute_sed(self, opcode),
            Mnemonic::SEI => flags::execute_sei(self, opcode),
            Mnemonic::STA => load_store::execute_sta(self, opcode),
            Mnemonic::STX => load_store::execute_stx(self, opcode),
            Mnemonic::STY => load_store::execute_sty(self, opcode),
            Mnemonic::TAX => transfer::execute_tax(self, opcode),
            Mnemonic::TAY => transfer::execute_tay(self, opcode),
            Mnemonic::TSX => transfer::execute_tsx(self, opcode),
            Mnemonic::TXA => transfer::execute_txa(self, opcode),
            Mnemonic::TXS => transfer::execute_txs(self, opcode),
            Mnemonic::TYA => transfer::execute_tya(self, opcode),
            Mnemonic::Illegal => {
                // Only the fetch is charged; PC already sits past the
                // opcode byte.
                self.cycles += 1;
                return Err(ExecutionError::IllegalOpcode(opcode));
            }
        }

        Ok(())
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes instructions until the cycle budget is exhausted or an
    /// illegal opcode is hit. Returns the actual number of cycles consumed
    /// (may exceed the budget by the tail of the final instruction).
    ///
    /// Useful for frame-locked execution models where the CPU must run for
    /// an exact number of cycles per frame.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles + cycle_budget;

        while self.cycles < target_cycles {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows
    /// downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: U (unused, always 1)
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    pub fn status(&self) -> u8 {
        let mut status: u8 = 0b0010_0000; // U always reads 1

        if self.flag_n {
            status |= 0b1000_0000;
        }
        if self.flag_v {
            status |= 0b0100_0000;
        }
        if self.flag_b {
            status |= 0b0001_0000;
        }
        if self.flag_d {
            status |= 0b0000_1000;
        }
        if self.flag_i {
            status |= 0b0000_0100;
        }
        if self.flag_z {
            status |= 0b0000_0010;
        }
        if self.flag_c {
            status |= 0b0000_0001;
        }

        status
    }

    /// Returns the total number of CPU cycles executed since reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flag_b
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Register Setters (testing and monitor surfaces) ==========

    /// Sets the accumulator register value.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register value.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register value.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter value.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer value.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Sets the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }

    /// Sets the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    /// Sets the Interrupt Disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    /// Sets the Decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    /// Sets the Break flag.
    pub fn set_flag_b(&mut self, value: bool) {
        self.flag_b = value;
    }

    /// Sets the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    /// Sets the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    /// Returns a shared reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    ///
    /// This allows tests and host code to write to memory.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Fetch and Stack Helpers ==========

    /// Reads the byte at PC and advances PC past it.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Reads the little-endian word at PC and advances PC past it.
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    /// Pushes a byte: write to 0x0100 + SP, then decrement SP.
    pub(crate) fn push_byte(&mut self, value: u8) {
        self.memory.write(STACK_BASE + self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pulls a byte: increment SP, then read from 0x0100 + SP.
    pub(crate) fn pull_byte(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_BASE + self.sp as u16)
    }

    /// Pushes a word, high byte first, so it pulls back little-endian.
    pub(crate) fn push_word(&mut self, value: u16) {
        self.push_byte((value >> 8) as u8);
        self.push_byte((value & 0xFF) as u8);
    }

    /// Pulls a word: low byte first, then high.
    pub(crate) fn pull_word(&mut self) -> u16 {
        let lo = self.pull_byte() as u16;
        let hi = self.pull_byte() as u16;
        (hi << 8) | lo
    }

    /// Unpacks a pulled status byte into the live flags.
    ///
    /// B is cleared and U is implied set, matching PLP/RTI hardware
    /// behavior.
    pub(crate) fn set_status_from_pull(&mut self, value: u8) {
        self.flag_n = value & 0b1000_0000 != 0;
        self.flag_v = value & 0b0100_0000 != 0;
        self.flag_b = false;
        self.flag_d = value & 0b0000_1000 != 0;
        self.flag_i = value & 0b0000_0100 != 0;
        self.flag_z = value & 0b0000_0010 != 0;
        self.flag_c = value & 0b0000_0001 != 0;
    }

    /// Updates the Z and N flags from a result byte.
    pub(crate) fn update_zn(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = value & 0x80 != 0;
    }

    // ========== Addressing Mode Resolution ==========

    /// Resolves the operand value for a read instruction.
    ///
    /// Consumes the operand bytes (PC advances past them) and returns the
    /// value together with a page-crossing flag. Only AbsoluteX, AbsoluteY
    /// and IndirectY can report a crossing; all other modes return `false`.
    pub(crate) fn operand_value(&mut self, mode: AddressingMode) -> (u8, bool) {
        match mode {
            AddressingMode::Immediate => (self.fetch_byte(), false),
            AddressingMode::Accumulator => (self.a, false),
            _ => {
                let (addr, page_crossed) = self.operand_address(mode);
                (self.memory.read(addr), page_crossed)
            }
        }
    }

    /// Resolves the effective address for a memory instruction.
    ///
    /// Consumes the operand bytes and returns the address together with a
    /// page-crossing flag. Store and read-modify-write callers ignore the
    /// flag; their base cycle counts already cover the indexed fixup.
    pub(crate) fn operand_address(&mut self, mode: AddressingMode) -> (u16, bool) {
        match mode {
            AddressingMode::ZeroPage => (self.fetch_byte() as u16, false),
            AddressingMode::ZeroPageX => {
                let base = self.fetch_byte();
                (base.wrapping_add(self.x) as u16, false)
            }
            AddressingMode::ZeroPageY => {
                let base = self.fetch_byte();
                (base.wrapping_add(self.y) as u16, false)
            }
            AddressingMode::Absolute => (self.fetch_word(), false),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word();
                let addr = base.wrapping_add(self.x as u16);
                (addr, page_crossed(base, addr))
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word();
                let addr = base.wrapping_add(self.y as u16);
                (addr, page_crossed(base, addr))
            }
            AddressingMode::IndirectX => {
                let zp = self.fetch_byte().wrapping_add(self.x);
                let addr = self.read_zero_page_word(zp);
                (addr, false)
            }
            AddressingMode::IndirectY => {
                let zp = self.fetch_byte();
                let base = self.read_zero_page_word(zp);
                let addr = base.wrapping_add(self.y as u16);
                (addr, page_crossed(base, addr))
            }
            AddressingMode::Indirect => {
                // JMP only. The pointer word is read without the NMOS
                // page-wrap quirk.
                let ptr = self.fetch_word();
                let lo = self.memory.read(ptr) as u16;
                let hi = self.memory.read(ptr.wrapping_add(1)) as u16;
                ((hi << 8) | lo, false)
            }
            AddressingMode::Implicit
            | AddressingMode::Accumulator
            | AddressingMode::Immediate
            | AddressingMode::Relative => {
                unreachable!("no effective address for {:?}", mode)
            }
        }
    }

    /// Reads a pointer word from page zero; the high pointer byte wraps
    /// within the page.
    fn read_zero_page_word(&mut self, zp: u8) -> u16 {
        let lo = self.memory.read(zp as u16) as u16;
        let hi = self.memory.read(zp.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }
}

/// True when two addresses fall on different 256-byte pages.
pub(crate) fn page_crossed(base: u16, addr: u16) -> bool {
    (base & 0xFF00) != (addr & 0xFF00)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    fn setup_cpu() -> Cpu<FlatMemory> {
        let mut memory = FlatMemory::new();
        memory.write(0xFFFC, 0x00);
        memory.write(0xFFFD, 0x80);
        Cpu::new(memory)
    }

    #[test]
    fn test_cpu_initialization() {
        let cpu = setup_cpu();

        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.y(), 0x00);
        assert_eq!(cpu.cycles(), 0);

        assert!(cpu.flag_i());
        assert!(!cpu.flag_n());
        assert!(!cpu.flag_v());
        assert!(!cpu.flag_b());
        assert!(!cpu.flag_d());
        assert!(!cpu.flag_z());
        assert!(!cpu.flag_c());
    }

    #[test]
    fn test_reset_packed_status() {
        let cpu = setup_cpu();
        // U and I set, everything else clear
        assert_eq!(cpu.status(), 0x24);
    }

    #[test]
    fn test_reset_restores_state() {
        let mut cpu = setup_cpu();
        cpu.set_a(0x55);
        cpu.set_x(0xAA);
        cpu.set_y(0x12);
        cpu.set_sp(0x80);
        cpu.set_flag_c(true);
        cpu.set_flag_d(true);
        cpu.memory_mut().write(0x8000, 0xEA);
        cpu.step().unwrap();

        cpu.reset();

        assert_eq!(cpu.a(), 0);
        assert_eq!(cpu.x(), 0);
        assert_eq!(cpu.y(), 0);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.status(), 0x24);
        assert_eq!(cpu.cycles(), 0);
    }

    #[test]
    fn test_step_illegal_opcode() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, 0x02); // undocumented opcode

        match cpu.step() {
            Err(ExecutionError::IllegalOpcode(0x02)) => {
                // Exactly the fetch was charged and PC moved past the byte
                assert_eq!(cpu.pc(), 0x8001);
                assert_eq!(cpu.cycles(), 1);
            }
            other => panic!("expected IllegalOpcode, got {:?}", other),
        }
    }

    #[test]
    fn test_illegal_opcode_preserves_registers() {
        let mut cpu = setup_cpu();
        cpu.set_a(0x11);
        cpu.set_x(0x22);
        cpu.set_y(0x33);
        cpu.memory_mut().write(0x8000, 0xFF);

        let _ = cpu.step();

        assert_eq!(cpu.a(), 0x11);
        assert_eq!(cpu.x(), 0x22);
        assert_eq!(cpu.y(), 0x33);
        assert_eq!(cpu.sp(), 0xFF);
    }

    #[test]
    fn test_run_for_cycles() {
        let mut cpu = setup_cpu();

        // Fill memory with NOP instructions (0xEA, 2 cycles each)
        for addr in 0x8000..=0x8010 {
            cpu.memory_mut().write(addr, 0xEA);
        }

        let result = cpu.run_for_cycles(10);

        assert!(result.is_ok());
        assert_eq!(cpu.cycles(), 10); // 5 NOPs
        assert_eq!(cpu.pc(), 0x8005);
    }

    #[test]
    fn test_zero_page_pointer_wrap() {
        let mut cpu = setup_cpu();
        // (zp,X): base 0xF0, X = 0x0F puts the pointer at 0xFF, whose high
        // byte wraps to 0x00
        cpu.set_x(0x0F);
        cpu.memory_mut().write(0x00FF, 0x34);
        cpu.memory_mut().write(0x0000, 0x12);
        cpu.memory_mut().write(0x1234, 0x99);
        cpu.memory_mut().write(0x8000, 0xA1); // LDA (zp,X)
        cpu.memory_mut().write(0x8001, 0xF0);

        cpu.step().unwrap();

        assert_eq!(cpu.a(), 0x99);
        assert_eq!(cpu.cycles(), 6);
    }
}
