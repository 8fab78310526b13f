//! Motorola 6850 ACIA (Asynchronous Communications Interface Adapter).
//!
//! Two memory-mapped slots: data (transmit on write, receive on read) and
//! status/control. Transmission is modelled as a cycle countdown keyed on the
//! control register's clock-divide bits; reception arrives from the host via
//! [`Acia6850::receive_byte`], which latches framing/parity errors and flags
//! overrun when a byte is still pending.
//!
//! # Registers
//!
//! | Reg | Read   | Write   |
//! |-----|--------|---------|
//! | $0  | RX data| TX data |
//! | $1  | Status | Control |

/// Status: receive data register full.
pub const SR_RDRF: u8 = 0x01;
/// Status: transmit data register empty.
pub const SR_TDRE: u8 = 0x02;
/// Status: data carrier detect.
pub const SR_DCD: u8 = 0x04;
/// Status: clear to send.
pub const SR_CTS: u8 = 0x08;
/// Status: framing error.
pub const SR_FE: u8 = 0x10;
/// Status: receiver overrun.
pub const SR_OVRN: u8 = 0x20;
/// Status: parity error.
pub const SR_PE: u8 = 0x40;
/// Status: interrupt request.
pub const SR_IRQ: u8 = 0x80;

/// Control bits 0-1: clock divide select.
pub const CR_CLK_DIV_1: u8 = 0x00;
pub const CR_CLK_DIV_16: u8 = 0x01;
pub const CR_CLK_DIV_64: u8 = 0x02;

/// Control bits 2-4: word select (data bits, parity, stop bits).
pub const CR_WS_8N1: u8 = 0x10;
pub const CR_WS_8E1: u8 = 0x14;
pub const CR_WS_8O1: u8 = 0x16;

/// Control bit 5: transmit enable.
pub const CR_TX_ENABLE: u8 = 0x20;

/// Control bit 7: receive interrupt enable.
pub const CR_RIE: u8 = 0x80;

/// Motorola 6850 ACIA.
pub struct Acia6850 {
    /// Last received byte, returned by data reads.
    data: u8,
    /// Status register.
    status: u8,
    /// Control register.
    control: u8,
    /// Byte waiting in the transmit buffer.
    tx_buffer: u8,
    tx_empty: bool,
    rx_full: bool,
    /// Cycles left until the TX buffer drains.
    tx_countdown: u32,
}

impl Acia6850 {
    /// Power-on state: transmit buffer empty, nothing received.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: 0,
            status: SR_TDRE,
            control: 0,
            tx_buffer: 0,
            tx_empty: true,
            rx_full: false,
            tx_countdown: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Read a register (low address bit).
    ///
    /// A data read returns the last received byte, clears RDRF, and drops
    /// the receive interrupt.
    pub fn read(&mut self, reg: u8) -> u8 {
        if reg & 0x01 == 0 {
            let v = self.data;
            self.rx_full = false;
            self.status &= !SR_RDRF;
            self.update_irq();
            v
        } else {
            self.status
        }
    }

    /// Write a register (low address bit).
    ///
    /// A data write loads the transmit buffer, clears TDRE, and starts the
    /// transmit countdown for the configured clock divide.
    pub fn write(&mut self, reg: u8, value: u8) {
        if reg & 0x01 == 0 {
            self.tx_buffer = value;
            self.tx_empty = false;
            self.status &= !SR_TDRE;
            self.tx_countdown = self.tx_cycles();
        } else {
            self.control = value;
            self.update_irq();
        }
    }

    /// Deliver a byte from the external serial line.
    ///
    /// If a received byte is still unread the incoming byte is discarded and
    /// OVRN latches; otherwise the byte lands in the receive buffer with the
    /// given framing/parity error flags.
    pub fn receive_byte(&mut self, data: u8, framing_error: bool, parity_error: bool) {
        if self.rx_full {
            self.status |= SR_OVRN;
        } else {
            self.data = data;
            self.rx_full = true;
            self.status |= SR_RDRF;
            if framing_error {
                self.status |= SR_FE;
            }
            if parity_error {
                self.status |= SR_PE;
            }
        }
        self.update_irq();
    }

    /// Per-cycle tick: run down the transmit countdown; on expiry the buffer
    /// byte has gone out on the line and TDRE returns.
    pub fn tick(&mut self) {
        if !self.tx_empty && self.tx_countdown > 0 {
            self.tx_countdown -= 1;
            if self.tx_countdown == 0 {
                self.tx_empty = true;
                self.status |= SR_TDRE;
                self.update_irq();
            }
        }
    }

    /// IRQ output: status bit 7.
    #[must_use]
    pub fn irq_line(&self) -> bool {
        self.status & SR_IRQ != 0
    }

    /// The byte currently sitting in the transmit buffer.
    #[must_use]
    pub fn tx_byte(&self) -> u8 {
        self.tx_buffer
    }

    fn update_irq(&mut self) {
        let irq = self.control & CR_RIE != 0 && self.status & SR_RDRF != 0;
        if irq {
            self.status |= SR_IRQ;
        } else {
            self.status &= !SR_IRQ;
        }
    }

    /// Transmit time in cycles for the configured clock divide.
    fn tx_cycles(&self) -> u32 {
        match self.control & 0x03 {
            CR_CLK_DIV_16 => 160,
            CR_CLK_DIV_64 => 640,
            _ => 10,
        }
    }
}

impl Default for Acia6850 {
    fn default() -> Self {
        Self::new()
    }
}
