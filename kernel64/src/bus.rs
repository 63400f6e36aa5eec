//! System memory bus.
//!
//! A 64 KiB byte-addressable store with two mapped device windows. Every
//! CPU access routes here; addresses inside the framebuffer or peripheral
//! windows go to the device, everything else is plain RAM. There is no
//! write protection: the ROM image is ordinary RAM written once at load
//! time.

use emu6502::MemoryBus;
use log::{debug, warn};

use crate::peripheral::{
    FileStore, Peripheral, FILE_CMD_LOAD, FILE_CMD_SAVE, FILE_STATUS_ERROR, FILE_STATUS_SUCCESS,
};
use crate::video::Framebuffer;

/// The system bus: RAM plus the framebuffer and peripheral windows.
pub struct SystemBus {
    /// 64 KiB backing RAM (covers everything outside the device windows).
    ram: Box<[u8; 0x10000]>,

    /// Text-mode video at $0400-$07E7.
    pub video: Framebuffer,

    /// Keyboard/file-I/O adapter at $DC00-$DC21.
    pub pia: Peripheral,
}

impl SystemBus {
    /// Creates a bus with zeroed RAM and fresh devices.
    pub fn new() -> Self {
        Self {
            ram: Box::new([0; 0x10000]),
            video: Framebuffer::new(),
            pia: Peripheral::new(),
        }
    }

    /// Reads the little-endian word at `addr`.
    ///
    /// Both byte reads are dispatched, so a word that straddles a window
    /// boundary reads each byte from its own target.
    pub fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        lo | (hi << 8)
    }

    /// Writes the little-endian word at `addr` directly into RAM.
    ///
    /// This deliberately bypasses the device windows: the word helpers are
    /// how ROM vectors get installed, and that path has always gone
    /// straight to RAM.
    pub fn write_word(&mut self, addr: u16, value: u16) {
        self.ram[addr as usize] = (value & 0xFF) as u8;
        self.ram[addr.wrapping_add(1) as usize] = (value >> 8) as u8;
    }

    /// Copies `bytes` into RAM starting at `base`, without dispatching to
    /// the device windows. Bytes past the end of the address space are
    /// dropped.
    pub fn load_image(&mut self, bytes: &[u8], base: u16) {
        for (i, &b) in bytes.iter().enumerate() {
            let Some(addr) = (base as usize).checked_add(i).filter(|&a| a <= 0xFFFF) else {
                break;
            };
            self.ram[addr] = b;
        }
    }

    /// Executes the peripheral's pending file operation, if any.
    ///
    /// Called by the system between CPU steps. A load copies the store's
    /// bytes through the mapped write path starting at the file address; a
    /// save reads the inclusive [start, end] range through the mapped read
    /// path. The outcome lands in the status register; the CPU never sees
    /// an error.
    pub fn pump_file_ops(&mut self, store: &mut dyn FileStore) {
        let Some(op) = self.pia.pending_file_op() else {
            return;
        };

        match op.command {
            FILE_CMD_LOAD => match store.load(&op.filename) {
                Ok(bytes) => {
                    let mut addr = op.start as u32;
                    for &b in &bytes {
                        if addr > 0xFFFF {
                            break;
                        }
                        self.write(addr as u16, b);
                        addr += 1;
                    }
                    debug!(
                        "file load '{}': {} bytes at ${:04X}",
                        op.filename,
                        addr - op.start as u32,
                        op.start
                    );
                    self.pia.complete_file_op(FILE_STATUS_SUCCESS);
                }
                Err(err) => {
                    warn!("file load '{}' failed: {}", op.filename, err);
                    self.pia.complete_file_op(FILE_STATUS_ERROR);
                }
            },
            FILE_CMD_SAVE => {
                if op.end < op.start {
                    warn!(
                        "file save '{}' rejected: end ${:04X} below start ${:04X}",
                        op.filename, op.end, op.start
                    );
                    self.pia.complete_file_op(FILE_STATUS_ERROR);
                    return;
                }

                let mut bytes = Vec::with_capacity((op.end - op.start + 1) as usize);
                for addr in op.start..=op.end {
                    bytes.push(self.read(addr));
                }

                match store.save(&op.filename, &bytes) {
                    Ok(()) => {
                        debug!(
                            "file save '{}': {} bytes from ${:04X}-${:04X}",
                            op.filename,
                            bytes.len(),
                            op.start,
                            op.end
                        );
                        self.pia.complete_file_op(FILE_STATUS_SUCCESS);
                    }
                    Err(err) => {
                        warn!("file save '{}' failed: {}", op.filename, err);
                        self.pia.complete_file_op(FILE_STATUS_ERROR);
                    }
                }
            }
            _ => {}
        }
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for SystemBus {
    fn read(&mut self, addr: u16) -> u8 {
        if Peripheral::contains(addr) {
            self.pia.read(addr)
        } else if Framebuffer::contains(addr) {
            self.video.read(addr)
        } else {
            self.ram[addr as usize]
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if Peripheral::contains(addr) {
            self.pia.write(addr, value);
        } else if Framebuffer::contains(addr) {
            self.video.write(addr, value);
        } else {
            self.ram[addr as usize] = value;
        }
    }
}
