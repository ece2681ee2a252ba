//! Integration coverage for the six canonical programs and the
//! invariants/round-trip laws that motivated them. Each program is
//! placed at $F000 with every vector pointed at $F000, matching a fresh
//! reset from that address.

use mos6502_core::cpu::state::{CARRY, NEGATIVE, OVERFLOW, ZERO};
use mos6502_core::{Bus, Cpu, disassemble, disassembly_index};

fn boot(program: &[u8]) -> (Cpu, Bus) {
    let mut rom = vec![0u8; 0x8000];
    rom[0xF000 - 0x8000..0xF000 - 0x8000 + program.len()].copy_from_slice(program);
    let target = 0xF000u16;
    let lo = target as u8;
    let hi = (target >> 8) as u8;
    for vec_offset in [0x7FFA, 0x7FFC, 0x7FFE] {
        rom[vec_offset] = lo;
        rom[vec_offset + 1] = hi;
    }
    let mut bus = Bus::with_rom(&rom).expect("rom fits in 32 KiB");
    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    (cpu, bus)
}

#[test]
fn scenario_1_lda_sta_brk() {
    let (mut cpu, mut bus) = boot(&[0xA9, 0x42, 0x85, 0x20, 0x00]);
    for _ in 0..3 {
        cpu.step(&mut bus);
    }
    assert_eq!(bus.read(0x0020), 0x42);
    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cpu.status() & ZERO, 0);
    assert_eq!(cpu.status() & NEGATIVE, 0);
}

#[test]
fn scenario_2_inx_cpx_bne_loop() {
    let (mut cpu, mut bus) = boot(&[0xA2, 0x00, 0xE8, 0xE0, 0x05, 0xD0, 0xFB]);
    while cpu.pc() != 0xF007 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.x(), 5);
    assert_ne!(cpu.status() & ZERO, 0);
    assert_ne!(cpu.status() & CARRY, 0);
}

#[test]
fn scenario_3_asl_chain() {
    let (mut cpu, mut bus) = boot(&[0xA9, 0x01, 0x0A, 0x0A, 0x0A]);
    for _ in 0..4 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.a(), 0x08);
    assert_eq!(cpu.status() & CARRY, 0);
    assert_eq!(cpu.status() & NEGATIVE, 0);
    assert_eq!(cpu.status() & ZERO, 0);
}

#[test]
fn scenario_4_adc_overflow_to_zero() {
    let (mut cpu, mut bus) = boot(&[0xA9, 0xFF, 0x69, 0x01]);
    for _ in 0..2 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.a(), 0x00);
    assert_ne!(cpu.status() & CARRY, 0);
    assert_ne!(cpu.status() & ZERO, 0);
    assert_eq!(cpu.status() & OVERFLOW, 0);
    assert_eq!(cpu.status() & NEGATIVE, 0);
}

#[test]
fn scenario_5_jsr_pushes_return_address_minus_one() {
    let (mut cpu, mut bus) = boot(&[0x20, 0x05, 0xF0, 0x00, 0x00, 0x60]);
    let sp_before = cpu.sp();
    cpu.step(&mut bus); // JSR $F005
    assert_eq!(cpu.sp(), sp_before.wrapping_sub(2));
    assert_eq!(cpu.pc(), 0xF005);
    let lo = bus.read(0x0100 | (cpu.sp().wrapping_add(1) as u16));
    let hi = bus.read(0x0100 | (cpu.sp().wrapping_add(2) as u16));
    assert_eq!((hi, lo), (0xF0, 0x02));
}

#[test]
fn scenario_6_rol_through_carry() {
    let (mut cpu, mut bus) = boot(&[0xA9, 0x80, 0x2A]);
    cpu.set_status(cpu.status() | CARRY);
    for _ in 0..2 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.a(), 0x01);
    assert_ne!(cpu.status() & CARRY, 0);
    assert_eq!(cpu.status() & NEGATIVE, 0);
    assert_eq!(cpu.status() & ZERO, 0);
}

#[test]
fn pha_pla_round_trip_leaves_sp_net_unchanged() {
    let (mut cpu, mut bus) = boot(&[0xA9, 0x37, 0x48, 0xA9, 0x00, 0x68]);
    let sp_before = cpu.sp();
    cpu.step(&mut bus); // LDA #$37
    cpu.step(&mut bus); // PHA
    cpu.step(&mut bus); // LDA #$00 clobbers A
    cpu.step(&mut bus); // PLA restores A
    assert_eq!(cpu.a(), 0x37);
    assert_eq!(cpu.sp(), sp_before);
}

#[test]
fn php_plp_round_trip_forces_break_clear_and_unused_set() {
    let (mut cpu, mut bus) = boot(&[0x08, 0x28]);
    let sr_before = cpu.status();
    cpu.step(&mut bus); // PHP
    cpu.step(&mut bus); // PLP
    assert_eq!(cpu.status(), sr_before);
}

#[test]
fn jsr_rts_returns_to_instruction_following_jsr() {
    let (mut cpu, mut bus) = boot(&[0x20, 0x05, 0xF0, 0xEA, 0xEA, 0x60]);
    cpu.step(&mut bus); // JSR $F005
    cpu.step(&mut bus); // RTS
    assert_eq!(cpu.pc(), 0xF003);
}

#[test]
fn disassembly_lengths_sum_to_buffer_size() {
    use mos6502_core::cpu::table::INSTRUCTION_TABLE;

    let program = [0xA9, 0x42, 0x85, 0x20, 0xEA, 0x4C, 0x00, 0xF0];
    let records = disassemble(&program, 0xF000);
    let total: u16 = records
        .iter()
        .map(|r| {
            let opcode = program[(r.program_address - 0xF000) as usize];
            INSTRUCTION_TABLE[opcode as usize].mode.length()
        })
        .sum();
    assert_eq!(total as usize, program.len());

    let idx = disassembly_index(&records);
    assert_eq!(idx.len(), records.len());
    assert_eq!(idx[&0xF000], 0);
}

#[test]
fn unused_flag_always_reads_set() {
    let (cpu, _bus) = boot(&[0xEA]);
    assert_ne!(cpu.status() & mos6502_core::cpu::state::UNUSED, 0);
}
