#![doc = r#"
mos6502-core: a cycle-counted MOS 6502 CPU interpreter.

This crate exposes the fetch-decode-execute engine, the flat RAM/ROM bus
it reaches memory through, and a disassembler sharing the CPU's own
instruction table.

Modules:
- bus: flat 64 KiB memory map (32 KiB RAM, 32 KiB ROM) with vector storage
- cpu: register file, addressing modes, instruction semantics, dispatch
- disassembler: static listing of a byte buffer via the CPU instruction table
- error: `RomLoadError`, the crate's sole fallible surface

In tests, shared flat-ROM builders are available under `crate::test_utils`.
"#]

pub mod bus;
pub mod cpu;
pub mod disassembler;
pub mod error;

pub use bus::Bus;
pub use cpu::Cpu;
pub use cpu::snapshot::{FlagView, RegisterSnapshot, TraceRecord};
pub use disassembler::{DisassemblyRecord, disassemble, disassembly_index};
pub use error::RomLoadError;

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
