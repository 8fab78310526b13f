//! JSON state snapshots for host-side debugging.
//!
//! A snapshot is a one-way serialisation of the externally observable
//! machine state (registers, cycle counters, beam position). It exists for
//! logging and test diffing; restoring a machine from one is not supported.

use serde::Serialize;

use crate::Machine;

/// CPU register file at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct CpuSnapshot {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub p: u8,
    pub cycles_remaining: u32,
    pub halted: bool,
}

/// Video beam position, present on machines with a TIA.
#[derive(Debug, Clone, Serialize)]
pub struct BeamSnapshot {
    pub scanline: u16,
    pub dot: u16,
    pub frame: u64,
    pub vblank: bool,
}

/// Externally observable machine state.
#[derive(Debug, Clone, Serialize)]
pub struct MachineSnapshot {
    pub profile: &'static str,
    pub total_cycles: u64,
    pub cpu: CpuSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beam: Option<BeamSnapshot>,
}

impl Machine {
    /// Capture the current machine state.
    #[must_use]
    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            profile: self.memory.profile().name(),
            total_cycles: self.total_cycles(),
            cpu: CpuSnapshot {
                a: self.cpu.a,
                x: self.cpu.x,
                y: self.cpu.y,
                sp: self.cpu.sp,
                pc: self.cpu.pc,
                p: self.cpu.p.0,
                cycles_remaining: self.cpu.cycles_remaining(),
                halted: self.cpu.is_halted(),
            },
            beam: self.memory.tia.as_ref().map(|tia| BeamSnapshot {
                scanline: tia.scanline(),
                dot: tia.dot(),
                frame: tia.frame_count(),
                vblank: tia.in_vblank(),
            }),
        }
    }

    /// Snapshot as pretty-printed JSON.
    pub fn snapshot_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(&self.snapshot()).map_err(|e| e.to_string())
    }
}
