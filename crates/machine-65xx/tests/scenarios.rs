//! End-to-end machine scenarios: program images executed through the full
//! CPU/bus/peripheral stack.

use emu_core::Bus;
use machine_65xx::{Machine, MachineProfile, Memory};

#[test]
fn minimal_program_stores_and_breaks() {
    let mut machine = Machine::generic();
    // LDA #$42; STA $0200; BRK
    machine.load_image(0x8000, &[0xA9, 0x42, 0x8D, 0x00, 0x02, 0x00]);
    machine.set_reset_vector(0x8000);
    machine.reset();
    machine.run_for(50);
    assert_eq!(machine.memory.peek(0x0200), 0x42);
    assert_eq!(machine.cpu.a, 0x42);
}

#[test]
fn brk_takes_the_vector_and_pushes_three_bytes() {
    let mut machine = Machine::generic();
    machine.set_reset_vector(0xC000);
    machine.load_image(0xC000, &[0x00]); // BRK
    machine.memory.poke(0xFFFE, 0xD0);
    machine.memory.poke(0xFFFF, 0xC0);
    machine.load_image(0xC0D0, &[0xA9, 0x7F, 0x00]); // LDA #$7F; BRK

    machine.reset();
    // Reset (7) + BRK (7) + LDA (2)
    machine.run_for(16);
    assert_eq!(machine.cpu.a, 0x7F);

    // Three bytes pushed relative to power-on SP ($FD): PCH, PCL, P
    assert_eq!(machine.memory.peek(0x01FD), 0xC0);
    assert_eq!(machine.memory.peek(0x01FC), 0x02);
    assert_eq!(machine.memory.peek(0x01FB) & 0x30, 0x30); // B and U pushed set
}

#[test]
fn riot_timer_prescale_64() {
    let mut mem = Memory::new(MachineProfile::Atari2600);
    // Write 4 into the /64 timer slot of the I/O window
    mem.write(0x0296, 0x04);
    for _ in 0..256 {
        mem.clock();
    }
    {
        let riot = mem.riot.as_ref().unwrap();
        assert_eq!(riot.timer_value(), 0);
        assert!(riot.irq_line());
    }
    // Status read returns the counter and drops the latch
    assert_eq!(mem.read(0x0285), 0x00);
    assert!(!mem.riot.as_ref().unwrap().irq_line());
}

#[test]
fn wsync_stall_reaches_the_cpu_budget() {
    let mut machine = Machine::atari_2600();
    // STA WSYNC as the first instruction after reset
    machine.load_image(0x1000, &[0x85, 0x02, 0xEA, 0xEA]);
    machine.set_reset_vector(0x1000);
    machine.reset();

    machine.run_for(7); // reset budget; TIA advances 3 dots per cycle
    let dot_before = machine.memory.tia.as_ref().unwrap().dot();
    assert_eq!(dot_before, 21);

    machine.step(); // STA $02 executes, WSYNC latches the stall
    // (228 - 21) / 3 = 69 stall cycles on top of STA's 3-cycle base,
    // with the first of those cycles already burned by this step
    assert_eq!(machine.cpu.cycles_remaining(), 3 + 69 - 1);

    // Burning the stretched budget leaves the beam on the next line
    let remaining = u64::from(machine.cpu.cycles_remaining());
    machine.run_for(remaining);
    let tia = machine.memory.tia.as_ref().unwrap();
    assert_eq!(tia.scanline(), 1);
    assert_eq!(machine.cpu.cycles_remaining(), 0);
}

#[test]
fn serial_transmit_timing_through_the_bus() {
    let mut mem = Memory::new(MachineProfile::Oric);
    mem.write(0xD001, motorola_6850::CR_CLK_DIV_1);
    mem.write(0xD000, 0x55);
    assert_eq!(mem.read(0xD001) & motorola_6850::SR_TDRE, 0);
    for _ in 0..10 {
        mem.clock();
    }
    assert_eq!(mem.read(0xD001) & motorola_6850::SR_TDRE, motorola_6850::SR_TDRE);
}

#[test]
fn indirect_jmp_page_boundary_bug() {
    let mut machine = Machine::generic();
    machine.load_image(0x8000, &[0x6C, 0xFF, 0x30]); // JMP ($30FF)
    machine.memory.poke(0x30FF, 0x80);
    machine.memory.poke(0x3000, 0x40);
    machine.memory.poke(0x3100, 0xFF); // would be the high byte without the bug
    machine.set_reset_vector(0x8000);
    machine.reset();
    machine.run_for(8); // reset budget + JMP fetch
    assert_eq!(machine.cpu.pc, 0x4080);
}

#[test]
fn rom_protect_round_trip_property() {
    let mut machine = Machine::new(MachineProfile::C64);
    machine.load_image(0xE000, &[0x12]);
    machine.memory.write(0xE000, 0x34);
    assert_eq!(machine.memory.read(0xE000), 0x12);

    // Unprotected RAM takes the write
    machine.memory.write(0x4000, 0x34);
    assert_eq!(machine.memory.read(0x4000), 0x34);
}

#[test]
fn bbc_floppy_command_completes_with_irq() {
    let mut mem = Memory::new(MachineProfile::BbcMicro);
    mem.write(0x1C00, 0x10); // seek: one step plus settle
    // 21 ms at 2 MHz
    for _ in 0..42_000 {
        mem.clock();
    }
    let fdc = mem.fdc.as_ref().unwrap();
    assert!(!fdc.busy());
    assert!(fdc.irq_line());
    assert!(mem.irq_line());
}

#[test]
fn tia_frame_advances_once_per_sweep() {
    let mut machine = Machine::atari_2600();
    machine.load_image(0x1000, &[0x4C, 0x00, 0x10]); // JMP $1000
    machine.set_reset_vector(0x1000);
    machine.reset();

    // One frame is 228 * 262 dots at 3 dots per CPU cycle
    machine.run_for(228 * 262 / 3);
    let tia = machine.memory.tia.as_ref().unwrap();
    assert_eq!(tia.frame_count(), 1);
}
