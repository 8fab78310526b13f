//! 65xx machine assemblies.
//!
//! A [`Machine`] wires a 6502 to a [`Memory`] bus carrying the peripherals
//! its [`MachineProfile`] calls for: the 2600 family gets the TIA and RIOT
//! behind the 6507's 13-bit address mask, the BBC Micro gets two VIAs and a
//! floppy controller, the PET gets a PIA, and so on. Profiles without
//! peripherals are plain 64 KiB pass-through machines with the profile's
//! ROM regions write-protected.

mod machine;
mod memory;
mod profile;
mod snapshot;

pub use machine::Machine;
pub use memory::Memory;
pub use profile::MachineProfile;
pub use snapshot::{BeamSnapshot, CpuSnapshot, MachineSnapshot};
