//! Memory and I/O bus interface.

/// Memory and I/O bus interface.
///
/// The CPU accesses memory and peripherals through this trait. The bus
/// handles address decoding, ROM write protection, and routing to the
/// appropriate device. It also carries the per-cycle clock fanout and the
/// aggregate interrupt line, so the CPU never touches a peripheral directly.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);

    /// Advance every attached peripheral by one CPU cycle.
    fn clock(&mut self);

    /// Aggregate IRQ line: true when any attached peripheral is requesting
    /// an interrupt. Sampling must not disturb peripheral state.
    fn irq_line(&self) -> bool {
        false
    }
}
