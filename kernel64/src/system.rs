//! System wiring and step loop.
//!
//! `System` owns the CPU (which owns the bus, which owns the devices) and
//! the host's file store. It loads the kernel ROM from a segment map,
//! applies reset, and drives the instruction loop, pumping the
//! peripheral's pending file operation between steps.

use emu6502::{Cpu, ExecutionError, MemoryBus};
use log::{debug, info};

use crate::bus::SystemBus;
use crate::loader::{self, LoadError, SEG_CODE, SEG_JUMPS, SEG_VECS};
use crate::peripheral::FileStore;
use crate::video::Framebuffer;

/// The assembled computer: CPU, bus, devices and the host file store.
pub struct System<S: FileStore> {
    cpu: Cpu<SystemBus>,
    store: S,
}

impl<S: FileStore> System<S> {
    /// Wires a fresh machine around the host's file store.
    ///
    /// The CPU comes up through its reset sequence; with empty RAM the
    /// reset vector reads as $0000 until `power_on` installs the ROM.
    pub fn new(store: S) -> Self {
        Self {
            cpu: Cpu::new(SystemBus::new()),
            store,
        }
    }

    /// Loads the kernel ROM and applies the power-on reset.
    ///
    /// The map text is parsed for the segment table; the `CODE`, `JUMPS`
    /// and `VECS` segments are copied from the image (offset by the ROM
    /// origin) to their start addresses. Any other segment in the map is
    /// ignored. On success the CPU is reset, picking up the freshly
    /// installed vector.
    pub fn power_on(&mut self, rom_image: &[u8], map_text: &str) -> Result<(), LoadError> {
        let segments = loader::parse_map(map_text)?;

        // Resolve every required segment before touching memory, so a bad
        // map or short image cannot leave the machine half-loaded.
        let mut resolved = Vec::new();
        for name in [SEG_CODE, SEG_JUMPS, SEG_VECS] {
            let segment = loader::find_segment(&segments, name)
                .ok_or(LoadError::MissingSegment(name))?;
            let bytes = loader::segment_bytes(rom_image, segment)?;
            resolved.push((segment, bytes));
        }

        for (segment, bytes) in resolved {
            self.cpu.memory_mut().load_image(bytes, segment.start);
            debug!(
                "loaded segment {} at ${:04X} ({} bytes)",
                segment.name, segment.start, segment.size
            );
        }

        self.trigger_reset();
        info!("power-on reset complete, PC=${:04X}", self.cpu.pc());
        Ok(())
    }

    /// Applies the reset sequence: registers cleared, PC reloaded from the
    /// vector at $FFFC. Keyboard FIFO and file-I/O state persist.
    pub fn trigger_reset(&mut self) {
        self.cpu.reset();
    }

    /// Executes up to `max_steps` instructions, pumping the peripheral's
    /// file operation after each one.
    ///
    /// Returns the number of instructions executed. An illegal opcode
    /// halts the loop early; that is a clean stop, not an error.
    pub fn run(&mut self, max_steps: u64) -> u64 {
        for executed in 0..max_steps {
            match self.cpu.step() {
                Ok(()) => {}
                Err(ExecutionError::IllegalOpcode(opcode)) => {
                    info!(
                        "halted on illegal opcode 0x{:02X} at ${:04X}",
                        opcode,
                        self.cpu.pc()
                    );
                    return executed;
                }
            }

            self.cpu.memory_mut().pump_file_ops(&mut self.store);
        }
        max_steps
    }

    // ========== Host surface ==========

    /// Injects a keystroke into the peripheral FIFO.
    pub fn enqueue_key(&mut self, code: u8) {
        self.cpu.memory_mut().pia.enqueue(code);
    }

    /// The video framebuffer, for the renderer.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.cpu.memory().video
    }

    /// Reads a byte through the mapped bus (monitor/debug surface).
    pub fn peek(&mut self, addr: u16) -> u8 {
        self.cpu.memory_mut().read(addr)
    }

    /// Writes a byte through the mapped bus (monitor/debug surface).
    pub fn poke(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }

    /// The CPU, for register inspection.
    pub fn cpu(&self) -> &Cpu<SystemBus> {
        &self.cpu
    }

    /// Mutable CPU access, for monitor-style register edits.
    pub fn cpu_mut(&mut self) -> &mut Cpu<SystemBus> {
        &mut self.cpu
    }

    /// The bus, for device access beyond the convenience passthroughs.
    pub fn bus_mut(&mut self) -> &mut SystemBus {
        self.cpu.memory_mut()
    }

    /// The host file store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;

    #[derive(Default)]
    struct MemStore {
        files: HashMap<String, Vec<u8>>,
    }

    impl FileStore for MemStore {
        fn load(&mut self, name: &str) -> io::Result<Vec<u8>> {
            self.files
                .get(name)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))
        }

        fn save(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
            self.files.insert(name.to_string(), bytes.to_vec());
            Ok(())
        }
    }

    const MAP: &str = "\
Segment list:
-------------
Name                   Start   End     Size    Align
----------------------------------------------------
CODE                  00F000  00F002  000003  00001
JUMPS                 00FF00  00FF02  000003  00001
VECS                  00FFFA  00FFFF  000006  00001

";

    /// Builds a 4 KiB image whose CODE segment is an infinite loop and
    /// whose reset vector points at it.
    fn tiny_rom() -> Vec<u8> {
        let mut image = vec![0u8; 0x1000];
        // CODE at $F000: JMP $F000
        image[0x0000] = 0x4C;
        image[0x0001] = 0x00;
        image[0x0002] = 0xF0;
        // JUMPS at $FF00: three NOPs
        image[0x0F00] = 0xEA;
        image[0x0F01] = 0xEA;
        image[0x0F02] = 0xEA;
        // VECS at $FFFA: NMI, reset = $F000, IRQ
        image[0x0FFC] = 0x00;
        image[0x0FFD] = 0xF0;
        image
    }

    #[test]
    fn test_power_on_loads_segments_and_resets() {
        let mut system = System::new(MemStore::default());
        system.power_on(&tiny_rom(), MAP).unwrap();

        assert_eq!(system.cpu().pc(), 0xF000);
        assert_eq!(system.peek(0xF000), 0x4C);
        assert_eq!(system.peek(0xFF00), 0xEA);
        assert_eq!(system.peek(0xFFFC), 0x00);
        assert_eq!(system.peek(0xFFFD), 0xF0);
    }

    #[test]
    fn test_power_on_requires_all_segments() {
        let mut system = System::new(MemStore::default());
        let map_without_vecs = "\
Segment list:
-------------
Name                   Start   End     Size    Align
----------------------------------------------------
CODE                  00F000  00F002  000003  00001
JUMPS                 00FF00  00FF02  000003  00001

";
        assert_eq!(
            system.power_on(&tiny_rom(), map_without_vecs),
            Err(LoadError::MissingSegment(SEG_VECS))
        );
    }

    #[test]
    fn test_run_executes_bounded_steps() {
        let mut system = System::new(MemStore::default());
        system.power_on(&tiny_rom(), MAP).unwrap();

        // The ROM spins on JMP; every step is legal
        assert_eq!(system.run(100), 100);
        assert_eq!(system.cpu().pc(), 0xF000);
        assert_eq!(system.cpu().cycles(), 300); // JMP abs is 3 cycles
    }

    #[test]
    fn test_run_halts_cleanly_on_illegal_opcode() {
        let mut system = System::new(MemStore::default());
        system.power_on(&tiny_rom(), MAP).unwrap();

        // Replace the loop with NOP, NOP, illegal
        system.poke(0xF000, 0xEA);
        system.poke(0xF001, 0xEA);
        system.poke(0xF002, 0x02);
        system.trigger_reset();

        assert_eq!(system.run(100), 2);
    }

    #[test]
    fn test_reset_preserves_fifo() {
        let mut system = System::new(MemStore::default());
        system.power_on(&tiny_rom(), MAP).unwrap();

        system.enqueue_key(b'H');
        system.enqueue_key(b'I');
        system.trigger_reset();

        assert_eq!(system.bus_mut().pia.fifo_len(), 2);
        assert_eq!(system.peek(0xDC00), b'H');
    }

    #[test]
    fn test_run_pumps_file_operations() {
        let mut system = System::new(MemStore::default());
        system.power_on(&tiny_rom(), MAP).unwrap();
        system
            .store_mut()
            .files
            .insert("DATA.BIN".into(), vec![0x77]);

        // Latch a load at $0800 and let the run loop pump it
        system.poke(0xDC12, 0x00);
        system.poke(0xDC13, 0x08);
        for (i, b) in b"DATA.BIN".iter().enumerate() {
            system.poke(0xDC14 + i as u16, *b);
        }
        system.poke(0xDC10, 0x01); // load command

        system.run(1);

        assert_eq!(system.peek(0x0800), 0x77);
        assert_eq!(system.peek(0xDC11), 0x02); // success status
    }
}
