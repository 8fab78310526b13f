//! WD1770 floppy disk controller.
//!
//! Four registers (command/status, track, sector, data) in front of a timed
//! command state machine. Writing the command register starts an operation
//! whose completion is a cycle countdown scaled from real-world mechanics:
//! 6 ms per track step, 15 ms head settle, 200 ms per disk revolution. The
//! machine's CPU clock converts those to cycles at construction.
//!
//! Sector data transfer is stubbed: a read primes the data register and
//! raises DRQ; the byte stream itself is not modelled.

use emu_core::MachineClock;

/// Status: command in progress.
pub const STATUS_BUSY: u8 = 0x01;
/// Status: data register wants service.
pub const STATUS_DRQ: u8 = 0x02;
/// Status: CRC error.
pub const STATUS_CRCERR: u8 = 0x08;
/// Status: record not found.
pub const STATUS_RNF: u8 = 0x10;
/// Status: write protect.
pub const STATUS_WP: u8 = 0x40;
/// Status: interrupt pending.
pub const STATUS_INTRQ: u8 = 0x80;

const STEP_MS: f64 = 6.0;
const SETTLE_MS: f64 = 15.0;
const REVOLUTION_MS: f64 = 200.0;
const QUICK_FAIL_MS: f64 = 1.0;

/// Worst-case restore distance in tracks.
const RESTORE_TRACKS: f64 = 40.0;

/// WD1770 floppy disk controller.
pub struct Wd1770 {
    status: u8,
    track: u8,
    sector: u8,
    data: u8,

    irq: bool,
    drq: bool,
    busy: bool,
    command: u8,

    /// Cycles until the running command completes.
    countdown: u32,
    /// In-memory disk image.
    image: Vec<u8>,
    inserted: bool,

    clock: MachineClock,
}

impl Wd1770 {
    /// Create a controller timed against the given CPU clock.
    #[must_use]
    pub fn new(clock: MachineClock) -> Self {
        Self {
            status: 0,
            track: 0,
            sector: 0,
            data: 0,
            irq: false,
            drq: false,
            busy: false,
            command: 0,
            countdown: 0,
            image: Vec::new(),
            inserted: false,
            clock,
        }
    }

    pub fn reset(&mut self) {
        self.status = 0;
        self.track = 0;
        self.sector = 0;
        self.data = 0;
        self.irq = false;
        self.drq = false;
        self.busy = false;
        self.command = 0;
        self.countdown = 0;
        self.image.clear();
        self.inserted = false;
    }

    /// Insert a disk image. The controller takes ownership of the bytes.
    pub fn insert_disk(&mut self, image: Vec<u8>) {
        self.image = image;
        self.inserted = true;
    }

    /// Eject the disk, returning the image.
    pub fn eject_disk(&mut self) -> Vec<u8> {
        self.inserted = false;
        std::mem::take(&mut self.image)
    }

    /// Read a register (low 2 address bits). Reading data clears DRQ.
    pub fn read(&mut self, reg: u16) -> u8 {
        match reg & 0x03 {
            0x00 => self.status,
            0x01 => self.track,
            0x02 => self.sector,
            _ => {
                self.drq = false;
                self.status &= !STATUS_DRQ;
                self.data
            }
        }
    }

    /// Write a register (low 2 address bits). A command write enters the
    /// command state machine; writing data clears DRQ.
    pub fn write(&mut self, reg: u16, value: u8) {
        match reg & 0x03 {
            0x00 => self.execute_command(value),
            0x01 => self.track = value,
            0x02 => self.sector = value,
            _ => {
                self.data = value;
                self.drq = false;
                self.status &= !STATUS_DRQ;
            }
        }
    }

    /// Advance one CPU cycle; a running command finishes when its countdown
    /// expires.
    pub fn tick(&mut self) {
        if self.busy && self.countdown > 0 {
            self.countdown -= 1;
            if self.countdown == 0 {
                let error = self.status & (STATUS_RNF | STATUS_WP) != 0;
                self.finish(error);
            }
        }
    }

    /// IRQ output line.
    #[must_use]
    pub fn irq_line(&self) -> bool {
        self.irq
    }

    /// DRQ output line.
    #[must_use]
    pub fn drq_line(&self) -> bool {
        self.drq
    }

    /// True while a command is in flight.
    #[must_use]
    pub fn busy(&self) -> bool {
        self.busy
    }

    /// The last command byte written.
    #[must_use]
    pub fn command(&self) -> u8 {
        self.command
    }

    /// Decode the command high nibble: $0 restore, $1 seek, $8 read sector,
    /// $A write sector. Anything else fails fast.
    fn execute_command(&mut self, cmd: u8) {
        self.command = cmd;
        self.busy = true;
        self.status |= STATUS_BUSY;
        self.irq = false;
        self.drq = false;
        self.status &= !(STATUS_DRQ | STATUS_INTRQ);

        self.countdown = match cmd & 0xF0 {
            0x00 => {
                // Restore: worst-case walk to track 0 plus settle
                self.clock.cycles_for_ms(STEP_MS * RESTORE_TRACKS + SETTLE_MS)
            }
            0x10 => self.clock.cycles_for_ms(STEP_MS + SETTLE_MS),
            0x80 => {
                if self.inserted {
                    self.data = 0x00;
                    self.drq = true;
                    self.status |= STATUS_DRQ;
                    // Worst case: one revolution until the sector passes
                    self.clock.cycles_for_ms(REVOLUTION_MS)
                } else {
                    self.status |= STATUS_RNF;
                    self.clock.cycles_for_ms(QUICK_FAIL_MS)
                }
            }
            0xA0 => {
                if self.inserted {
                    self.clock.cycles_for_ms(REVOLUTION_MS)
                } else {
                    self.status |= STATUS_WP;
                    self.clock.cycles_for_ms(QUICK_FAIL_MS)
                }
            }
            _ => {
                self.status |= STATUS_RNF;
                self.clock.cycles_for_ms(QUICK_FAIL_MS)
            }
        };
    }

    fn finish(&mut self, error: bool) {
        self.busy = false;
        self.status &= !STATUS_BUSY;
        if error {
            self.status |= STATUS_CRCERR;
        }
        self.irq = true;
        self.status |= STATUS_INTRQ;
    }
}
