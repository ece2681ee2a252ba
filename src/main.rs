//! Minimal CLI driver: load a flat ROM image, reset the CPU, and step it
//! until a user-supplied instruction budget is exhausted, printing the
//! register snapshot after each step. Anything beyond this (TUI, ROM
//! directory scanning, wall-clock pacing) is host-shell territory and
//! out of scope for this crate.

use std::env;
use std::process::ExitCode;

use mos6502_core::{Bus, Cpu};

const DEFAULT_STEP_BUDGET: usize = 1000;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(rom_path) = args.next() else {
        eprintln!("usage: mos6502-core <rom-path> [step-count]");
        return ExitCode::FAILURE;
    };
    let step_budget = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_STEP_BUDGET);

    let mut bus = Bus::new();
    if let Err(e) = bus.load_rom_file(&rom_path) {
        eprintln!("failed to load {rom_path}: {e}");
        return ExitCode::FAILURE;
    }

    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);

    for _ in 0..step_budget {
        cpu.step(&mut bus);
        let snap = cpu.snapshot();
        println!(
            "PC={:04X} A={:02X} X={:02X} Y={:02X} SP={:02X} SR={:02X}",
            snap.pc, snap.ac, snap.xr, snap.yr, snap.sp, snap.sr
        );
    }

    ExitCode::SUCCESS
}
