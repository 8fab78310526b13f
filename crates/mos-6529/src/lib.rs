//! MOS 6529 Single Port Interface.
//!
//! An 8-bit parallel port with one global direction control. No timers, no
//! interrupts, no handshaking: the simplest chip on the bus. In output mode
//! the latch drives the pins and reads return it; in input mode reads return
//! the external pin state and writes are dropped, as on the real part.

/// MOS 6529 single-port chip.
pub struct Mos6529 {
    /// Latched output value.
    latch: u8,
    /// External input pin state.
    pins: u8,
    /// true = output mode, false = input mode.
    output_mode: bool,
}

impl Mos6529 {
    /// Power-on state: latch and pins high (pull-ups), input mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            latch: 0xFF,
            pins: 0xFF,
            output_mode: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Read the port register: latch in output mode, pins in input mode.
    #[must_use]
    pub fn read(&self) -> u8 {
        if self.output_mode {
            self.latch
        } else {
            self.pins
        }
    }

    /// Write the port register. Ignored in input mode.
    pub fn write(&mut self, value: u8) {
        if self.output_mode {
            self.latch = value;
        }
    }

    /// Select the port direction: true = output, false = input.
    pub fn set_direction(&mut self, output: bool) {
        self.output_mode = output;
    }

    /// Drive the external input pins (seen by reads in input mode).
    pub fn set_input_pins(&mut self, value: u8) {
        self.pins = value;
    }

    /// Current output latch contents.
    #[must_use]
    pub fn output_latch(&self) -> u8 {
        self.latch
    }
}

impl Default for Mos6529 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_mode_reads_pins_and_drops_writes() {
        let mut io = Mos6529::new();
        io.set_input_pins(0x5A);
        io.write(0x00); // dropped
        assert_eq!(io.read(), 0x5A);
        assert_eq!(io.output_latch(), 0xFF);
    }

    #[test]
    fn output_mode_reads_latch() {
        let mut io = Mos6529::new();
        io.set_direction(true);
        io.write(0xA5);
        io.set_input_pins(0x00); // irrelevant in output mode
        assert_eq!(io.read(), 0xA5);
    }

    #[test]
    fn reset_restores_pullups() {
        let mut io = Mos6529::new();
        io.set_direction(true);
        io.write(0x12);
        io.reset();
        assert_eq!(io.read(), 0xFF);
    }
}
