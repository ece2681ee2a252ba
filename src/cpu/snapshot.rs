/*!
snapshot.rs - Point-in-time views over CPU architectural state, for
driver/debugger composition.

`RegisterSnapshot` and `FlagView` are produced by `Cpu::snapshot()`.
`TraceRecord` is not built by this crate's `step` loop; it is assembled by
a caller that combines a pre-step `disassemble` call with the post-step
snapshot (see crate docs for `disassembler`).
*/

use crate::cpu::state::{
    BREAK, CARRY, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, UNUSED, ZERO,
};

/// Flat, point-in-time view of the 6502 register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterSnapshot {
    pub pc: u16,
    pub ac: u8,
    pub xr: u8,
    pub yr: u8,
    pub sp: u8,
    pub sr: u8,
}

/// Individual status-register bits decoded from a `RegisterSnapshot::sr`
/// byte, for display or assertions without manual bit masking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagView {
    pub carry: bool,
    pub zero: bool,
    pub irq_disable: bool,
    pub decimal: bool,
    pub brk: bool,
    pub unused: bool,
    pub overflow: bool,
    pub negative: bool,
}

impl From<u8> for FlagView {
    fn from(sr: u8) -> Self {
        FlagView {
            carry: sr & CARRY != 0,
            zero: sr & ZERO != 0,
            irq_disable: sr & IRQ_DISABLE != 0,
            decimal: sr & DECIMAL != 0,
            brk: sr & BREAK != 0,
            unused: sr & UNUSED != 0,
            overflow: sr & OVERFLOW != 0,
            negative: sr & NEGATIVE != 0,
        }
    }
}

impl RegisterSnapshot {
    /// Decode `sr` into its constituent flags.
    pub fn flags(&self) -> FlagView {
        FlagView::from(self.sr)
    }
}

/// A single instruction's before/after register state plus its
/// disassembled text, built by a driver that wants a trace log. Not
/// produced internally by `Cpu::step` — callers compose it from a
/// pre-step `disassembler::disassemble` call and a post-step
/// `Cpu::snapshot()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRecord {
    pub pre_pc: u16,
    pub post_pc: u16,
    pub ac: u8,
    pub xr: u8,
    pub yr: u8,
    pub sp: u8,
    pub sr: u8,
    pub disassembly_text: String,
}
