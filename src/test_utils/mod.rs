//! Shared test utilities for building minimal flat ROM images.
//!
//! These helpers de-duplicate ROM construction logic across tests in the
//! CPU, Bus, and disassembler modules. A ROM image here is just a flat,
//! `Bus::load_rom`-shaped byte buffer (at most 32 KiB) with the reset/NMI/IRQ
//! vectors poked into its final six bytes.

#![allow(dead_code)]

const ROM_SIZE: usize = 0x8000;
const ROM_BASE: u16 = 0x8000;

/// Build a 32 KiB flat ROM image with `program` placed at the start of the
/// ROM window ($8000) and all three vectors (NMI, RESET, IRQ) pointing at
/// `reset`.
pub fn build_flat_rom_with_reset_vector(program: &[u8], reset: u16) -> Vec<u8> {
    build_flat_rom(program, reset, reset, reset)
}

/// Build a 32 KiB flat ROM image with `program` placed at the start of the
/// ROM window ($8000) and explicit NMI/RESET/IRQ vectors.
pub fn build_flat_rom(program: &[u8], nmi: u16, reset: u16, irq: u16) -> Vec<u8> {
    assert!(
        program.len() <= ROM_SIZE - 6,
        "program must leave room for the vector table"
    );
    let mut rom = vec![0u8; ROM_SIZE];
    rom[..program.len()].copy_from_slice(program);
    write_le_u16(&mut rom, 0x7FFA, nmi);
    write_le_u16(&mut rom, 0x7FFC, reset);
    write_le_u16(&mut rom, 0x7FFE, irq);
    rom
}

/// Build a 32 KiB flat ROM image with `program` placed at `load_addr`
/// (relative to the $8000 ROM window) and vectors pointing at `reset`.
pub fn build_flat_rom_at(program: &[u8], load_addr: u16, reset: u16) -> Vec<u8> {
    let offset = (load_addr.wrapping_sub(ROM_BASE)) as usize;
    assert!(
        offset + program.len() <= ROM_SIZE - 6,
        "program must fit in the ROM window and leave room for vectors"
    );
    let mut rom = vec![0u8; ROM_SIZE];
    rom[offset..offset + program.len()].copy_from_slice(program);
    write_le_u16(&mut rom, 0x7FFA, reset);
    write_le_u16(&mut rom, 0x7FFC, reset);
    write_le_u16(&mut rom, 0x7FFE, reset);
    rom
}

#[inline]
fn write_le_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset] = (value & 0x00FF) as u8;
    buf[offset + 1] = (value >> 8) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_rom_with_reset_vector() {
        let rom = build_flat_rom_with_reset_vector(&[0xEA, 0x00], 0x8123);
        assert_eq!(rom.len(), ROM_SIZE);
        assert_eq!(rom[0], 0xEA);
        assert_eq!(rom[0x7FFC], 0x23);
        assert_eq!(rom[0x7FFD], 0x81);
        assert_eq!(rom[0x7FFA], 0x23);
        assert_eq!(rom[0x7FFE], 0x23);
    }

    #[test]
    fn builds_rom_at_explicit_offset() {
        let rom = build_flat_rom_at(&[0xA9, 0x01], 0x8010, 0x8010);
        assert_eq!(rom[0x10], 0xA9);
        assert_eq!(rom[0x11], 0x01);
        assert_eq!(rom[0x7FFC], 0x10);
        assert_eq!(rom[0x7FFD], 0x80);
    }
}
