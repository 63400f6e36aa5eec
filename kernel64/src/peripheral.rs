//! Keyboard and file-I/O peripheral adapter.
//!
//! Mapped at $DC00-$DC21. The low offsets are a classic two-port adapter:
//! Port A carries keyboard data (reading the data register consumes one
//! keystroke from a 32-byte FIFO), Port B is opaque scratch. The upper
//! offsets extend the chip with a file-operation register block used by
//! the kernel monitor's load and save commands.
//!
//! The adapter never performs file I/O itself: the host supplies a
//! [`FileStore`] and the bus pumps pending commands between CPU steps.
//! Failures are reported only through the status register; nothing ever
//! reaches the CPU as an error.

use log::{debug, trace};

/// First mapped peripheral address.
pub const PERIPHERAL_START: u16 = 0xDC00;
/// Last mapped peripheral address (inclusive).
pub const PERIPHERAL_END: u16 = 0xDC21;

/// Keyboard FIFO capacity.
pub const KEYBOARD_BUFFER_SIZE: usize = 32;

// Register offsets from PERIPHERAL_START.
const PORT_A_DATA: u16 = 0x00;
const PORT_A_DDR: u16 = 0x01;
const PORT_A_CONTROL: u16 = 0x02;
const PORT_B_DATA: u16 = 0x03;
const PORT_B_DDR: u16 = 0x04;
const PORT_B_CONTROL: u16 = 0x05;
const FILE_COMMAND: u16 = 0x10;
const FILE_STATUS: u16 = 0x11;
const FILE_ADDR_LO: u16 = 0x12;
const FILE_ADDR_HI: u16 = 0x13;
const FILENAME_START: u16 = 0x14;
const FILENAME_LEN: u16 = 12;
const FILE_END_ADDR_LO: u16 = 0x20;
const FILE_END_ADDR_HI: u16 = 0x21;

/// File command code: nothing requested.
pub const FILE_CMD_IDLE: u8 = 0x00;
/// File command code: load a file into memory.
pub const FILE_CMD_LOAD: u8 = 0x01;
/// File command code: save a memory range to a file.
pub const FILE_CMD_SAVE: u8 = 0x02;

/// File status: no operation queued.
pub const FILE_STATUS_IDLE: u8 = 0x00;
/// File status: command accepted, waiting for the pump.
pub const FILE_STATUS_IN_PROGRESS: u8 = 0x01;
/// File status: last operation completed.
pub const FILE_STATUS_SUCCESS: u8 = 0x02;
/// File status: last operation failed.
pub const FILE_STATUS_ERROR: u8 = 0xFF;

// Port A control register bits.
/// Bit 0: at least one keystroke is buffered.
pub const CTRL_DATA_AVAILABLE: u8 = 0x01;
/// Bit 1: the keyboard FIFO is full.
pub const CTRL_BUFFER_FULL: u8 = 0x02;
/// Bit 2: interrupt latch (data available while enabled).
pub const CTRL_INTERRUPT_FLAG: u8 = 0x04;
/// Bit 3: interrupt enable, host controlled.
pub const CTRL_INTERRUPT_ENABLE: u8 = 0x08;

/// Host-side storage backing the peripheral's load and save commands.
///
/// The core resolves a command to a filename (the 12-byte register buffer)
/// and asks the store for the bytes; where they actually come from or go
/// to is the host's business (a directory, a dialog, an archive, a test
/// map).
pub trait FileStore {
    /// Fetches the contents of the named file.
    fn load(&mut self, name: &str) -> std::io::Result<Vec<u8>>;

    /// Writes `bytes` as the named file.
    fn save(&mut self, name: &str, bytes: &[u8]) -> std::io::Result<()>;
}

/// A file operation latched by the CPU and awaiting the pump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FileOp {
    pub command: u8,
    pub start: u16,
    pub end: u16,
    pub filename: String,
}

/// One I/O port: data latch, data-direction register, control register.
#[derive(Debug, Clone, Copy, Default)]
struct Port {
    data: u8,
    ddr: u8,
    control: u8,
}

/// Circular keyboard FIFO with head/tail indices.
#[derive(Debug, Clone)]
struct KeyboardFifo {
    buffer: [u8; KEYBOARD_BUFFER_SIZE],
    head: usize,
    tail: usize,
    count: usize,
}

impl KeyboardFifo {
    fn new() -> Self {
        Self {
            buffer: [0; KEYBOARD_BUFFER_SIZE],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    fn is_full(&self) -> bool {
        self.count >= KEYBOARD_BUFFER_SIZE
    }

    fn push(&mut self, code: u8) {
        if self.is_full() {
            return;
        }
        self.buffer[self.head] = code;
        self.head = (self.head + 1) % KEYBOARD_BUFFER_SIZE;
        self.count += 1;
    }

    fn pop(&mut self) -> u8 {
        if self.count == 0 {
            return 0x00;
        }
        let code = self.buffer[self.tail];
        self.tail = (self.tail + 1) % KEYBOARD_BUFFER_SIZE;
        self.count -= 1;
        code
    }

    fn clear(&mut self) {
        self.buffer = [0; KEYBOARD_BUFFER_SIZE];
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }
}

/// The keyboard/file-I/O adapter.
pub struct Peripheral {
    fifo: KeyboardFifo,
    port_a: Port,
    port_b: Port,

    file_command: u8,
    file_status: u8,
    file_address: u16,
    file_end_address: u16,
    filename: [u8; FILENAME_LEN as usize],
}

impl Peripheral {
    /// Creates the adapter with an empty FIFO and idle file state.
    pub fn new() -> Self {
        let mut pia = Self {
            fifo: KeyboardFifo::new(),
            port_a: Port::default(),
            port_b: Port::default(),
            file_command: FILE_CMD_IDLE,
            file_status: FILE_STATUS_IDLE,
            file_address: 0x0000,
            file_end_address: 0x0000,
            filename: [0; FILENAME_LEN as usize],
        };
        pia.refresh_control_flags();
        pia
    }

    /// True when `addr` falls inside the mapped register window.
    pub fn contains(addr: u16) -> bool {
        (PERIPHERAL_START..=PERIPHERAL_END).contains(&addr)
    }

    /// Reads the register mapped at `addr`.
    ///
    /// Reading the Port A data register consumes one keystroke; every
    /// other register reads without side effects. Unmapped offsets read 0.
    pub fn read(&mut self, addr: u16) -> u8 {
        if !Self::contains(addr) {
            return 0x00;
        }

        match addr - PERIPHERAL_START {
            PORT_A_DATA => {
                let key = self.dequeue();
                trace!(
                    "keyboard data register read: 0x{:02X}, {} buffered",
                    key,
                    self.fifo.count
                );
                key
            }
            PORT_A_DDR => self.port_a.ddr,
            PORT_A_CONTROL => {
                self.refresh_control_flags();
                self.port_a.control
            }
            PORT_B_DATA => self.port_b.data,
            PORT_B_DDR => self.port_b.ddr,
            PORT_B_CONTROL => self.port_b.control,
            FILE_COMMAND | FILE_STATUS => self.file_status,
            FILE_ADDR_LO => (self.file_address & 0xFF) as u8,
            FILE_ADDR_HI => (self.file_address >> 8) as u8,
            FILE_END_ADDR_LO => (self.file_end_address & 0xFF) as u8,
            FILE_END_ADDR_HI => (self.file_end_address >> 8) as u8,
            // Filename buffer and unused offsets read 0
            _ => 0x00,
        }
    }

    /// Writes the register mapped at `addr`. Unmapped offsets are ignored.
    pub fn write(&mut self, addr: u16, value: u8) {
        if !Self::contains(addr) {
            return;
        }

        match addr - PERIPHERAL_START {
            PORT_A_DATA => self.port_a.data = value,
            PORT_A_DDR => self.port_a.ddr = value,
            PORT_A_CONTROL => {
                // The FIFO-derived bits are recomputed immediately; only
                // the interrupt-enable bit and untouched high bits stick.
                self.port_a.control = value;
                self.refresh_control_flags();
            }
            PORT_B_DATA => self.port_b.data = value,
            PORT_B_DDR => self.port_b.ddr = value,
            PORT_B_CONTROL => self.port_b.control = value,
            FILE_COMMAND => {
                debug!("file command register written: 0x{:02X}", value);
                self.file_command = value;
                if value == FILE_CMD_LOAD || value == FILE_CMD_SAVE {
                    self.file_status = FILE_STATUS_IN_PROGRESS;
                }
            }
            FILE_STATUS => {} // read-only
            FILE_ADDR_LO => {
                self.file_address = (self.file_address & 0xFF00) | value as u16;
            }
            FILE_ADDR_HI => {
                self.file_address = (self.file_address & 0x00FF) | (value as u16) << 8;
            }
            FILE_END_ADDR_LO => {
                self.file_end_address = (self.file_end_address & 0xFF00) | value as u16;
            }
            FILE_END_ADDR_HI => {
                self.file_end_address = (self.file_end_address & 0x00FF) | (value as u16) << 8;
            }
            offset @ FILENAME_START..=0x1F => {
                self.filename[(offset - FILENAME_START) as usize] = value;
            }
            _ => {}
        }
    }

    // ========== Keyboard FIFO (host side) ==========

    /// Appends a keystroke; silently dropped when the FIFO is full.
    pub fn enqueue(&mut self, code: u8) {
        if self.fifo.is_full() {
            trace!("keyboard buffer full, dropping 0x{:02X}", code);
            return;
        }
        self.fifo.push(code);
        self.refresh_control_flags();
    }

    /// Consumes the next keystroke, or 0 when the FIFO is empty.
    pub fn dequeue(&mut self) -> u8 {
        let code = self.fifo.pop();
        self.refresh_control_flags();
        code
    }

    /// Empties the FIFO.
    pub fn clear_fifo(&mut self) {
        self.fifo.clear();
        self.refresh_control_flags();
    }

    /// True when at least one keystroke is buffered.
    pub fn has_keypress(&self) -> bool {
        self.fifo.count > 0
    }

    /// Number of buffered keystrokes (0..=32).
    pub fn fifo_len(&self) -> usize {
        self.fifo.count
    }

    /// True when the FIFO cannot accept more keystrokes.
    pub fn is_buffer_full(&self) -> bool {
        self.fifo.is_full()
    }

    // ========== File operation latch (bus side) ==========

    /// The latched file operation, if one is waiting for the pump.
    pub(crate) fn pending_file_op(&self) -> Option<FileOp> {
        let pending = (self.file_command == FILE_CMD_LOAD || self.file_command == FILE_CMD_SAVE)
            && self.file_status == FILE_STATUS_IN_PROGRESS;
        if !pending {
            return None;
        }
        Some(FileOp {
            command: self.file_command,
            start: self.file_address,
            end: self.file_end_address,
            filename: self.filename_string(),
        })
    }

    /// Records the outcome of a pumped operation and returns the command
    /// register to idle.
    pub(crate) fn complete_file_op(&mut self, status: u8) {
        self.file_status = status;
        self.file_command = FILE_CMD_IDLE;
    }

    /// Current file status register value.
    pub fn file_status(&self) -> u8 {
        self.file_status
    }

    /// The filename buffer as a string, trimmed at the first NUL.
    fn filename_string(&self) -> String {
        let len = self
            .filename
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.filename.len());
        String::from_utf8_lossy(&self.filename[..len]).into_owned()
    }

    /// Recomputes the FIFO-derived control register bits.
    ///
    /// bit0 = data available, bit1 = buffer full, bit2 = bit0 AND bit3.
    /// Bit 3 and the high bits keep whatever the host last wrote.
    fn refresh_control_flags(&mut self) {
        let mut control = self.port_a.control & !(CTRL_DATA_AVAILABLE | CTRL_BUFFER_FULL);

        if self.has_keypress() {
            control |= CTRL_DATA_AVAILABLE;
        }
        if self.fifo.is_full() {
            control |= CTRL_BUFFER_FULL;
        }
        if self.has_keypress() && control & CTRL_INTERRUPT_ENABLE != 0 {
            control |= CTRL_INTERRUPT_FLAG;
        } else {
            control &= !CTRL_INTERRUPT_FLAG;
        }

        self.port_a.control = control;
    }
}

impl Default for Peripheral {
    fn default() -> Self {
        Self::new()
    }
}
