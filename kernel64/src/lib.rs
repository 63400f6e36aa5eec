//! # kernel64 - a 64 KiB 6502 kernel computer
//!
//! A small computer built around the [`emu6502`] CPU core:
//!
//! - a [`SystemBus`] mapping 64 KiB of RAM with two device windows
//! - a 40x25 text-mode [`Framebuffer`] at $0400-$07E7
//! - a keyboard/file-I/O [`Peripheral`] at $DC00-$DC21
//! - a kernel ROM loader driven by a linker segment map (origin $F000)
//! - a [`System`] that wires everything, applies reset, and drives the
//!   step loop
//!
//! The CPU only ever sees the bus; the framebuffer and peripheral are
//! indistinguishable from RAM to the running program. The host UI talks to
//! the other side: it pushes keystrokes into the peripheral FIFO, polls the
//! framebuffer dirty flag, and supplies a [`FileStore`] for the
//! peripheral's load/save commands.
//!
//! ## Memory map
//!
//! | Range | Target |
//! |---|---|
//! | $0000-$03FF | RAM (zero page, stack, system) |
//! | $0400-$07E7 | text framebuffer (40x25 cells) |
//! | $0800-$CFFF | user RAM |
//! | $DC00-$DC21 | peripheral registers |
//! | $E000-$FFFF | ROM image (plain RAM, written once at load) |

pub mod bus;
pub mod loader;
pub mod peripheral;
pub mod system;
pub mod video;

pub use bus::SystemBus;
pub use loader::{parse_map, LoadError, Segment, ROM_ORIGIN};
pub use peripheral::{FileStore, Peripheral};
pub use system::System;
pub use video::Framebuffer;
