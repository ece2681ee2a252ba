/*!
disassembler.rs - Static disassembly of a byte buffer using the CPU's own
instruction table, with no dependency on a `Bus` or `Cpu` instance.

Overview
========
`disassemble` walks a byte slice exactly once, decoding each instruction
with the same `INSTRUCTION_TABLE` the CPU core dispatches against, so the
two are guaranteed to agree on opcode length and mnemonic. `BRK` records
are flagged via `is_break` so a driver can highlight them without
re-parsing the textual form. `disassembly_index` builds the address-keyed
lookup a tracer needs to find "what instruction starts at this PC" in
O(1).

`textual_form` renders the address, the raw instruction bytes, and the
mnemonic/operand syntax on one line, e.g. `"F000: A9 42     LDA #$42"`,
so a trace listing never has to re-derive the raw bytes from the operand
text.
*/

use std::collections::HashMap;

use crate::cpu::table::{AddrMode, INSTRUCTION_TABLE, Mnemonic};

/// Widest raw-byte column: a 3-byte instruction renders as `"XX XX XX"`.
const RAW_BYTES_WIDTH: usize = 8;

/// One decoded instruction: where it starts, its rendered text, and
/// whether it is a `BRK` (useful for a driver highlighting breakpoints
/// without re-parsing `textual_form`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassemblyRecord {
    pub program_address: u16,
    pub textual_form: String,
    pub is_break: bool,
}

/// Decode `bytes` as a contiguous instruction stream starting at
/// `base_addr`. Runs to the end of the slice; an opcode whose operand
/// bytes would run past the end of `bytes` is rendered with whatever
/// operand bytes are available, padded with zero (this only affects the
/// trailing partial instruction, if any).
pub fn disassemble(bytes: &[u8], base_addr: u16) -> Vec<DisassemblyRecord> {
    let mut records = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let addr = base_addr.wrapping_add(i as u16);
        let opcode = bytes[i];
        let instr = INSTRUCTION_TABLE[opcode as usize];
        let len = instr.mode.length() as usize;

        let operand_byte = |offset: usize| -> u8 { bytes.get(i + offset).copied().unwrap_or(0) };

        let mnemonic_text = if instr.mnemonic == Mnemonic::Ill {
            "???".to_string()
        } else {
            render(instr.mnemonic, instr.mode, addr, operand_byte)
        };

        let raw_bytes: Vec<u8> = (0..len.max(1)).map(operand_byte).collect();
        let raw_hex = raw_bytes
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ");
        let textual_form =
            format!("{addr:04X}: {raw_hex:<RAW_BYTES_WIDTH$} {mnemonic_text}");

        records.push(DisassemblyRecord {
            program_address: addr,
            textual_form,
            is_break: instr.mnemonic == Mnemonic::Brk,
        });

        i += len.max(1);
    }

    records
}

/// Build an address -> record-index map for O(1) "what's at this PC"
/// lookups while tracing.
pub fn disassembly_index(records: &[DisassemblyRecord]) -> HashMap<u16, usize> {
    records
        .iter()
        .enumerate()
        .map(|(idx, rec)| (rec.program_address, idx))
        .collect()
}

fn render(mnemonic: Mnemonic, mode: AddrMode, addr: u16, operand_byte: impl Fn(usize) -> u8) -> String {
    let name = mnemonic.as_str();
    match mode {
        AddrMode::Imp => name.to_string(),
        AddrMode::Acc => format!("{name} A"),
        AddrMode::Imm => format!("{name} #${:02X}", operand_byte(1)),
        AddrMode::Zpg => format!("{name} ${:02X}", operand_byte(1)),
        AddrMode::Zpx => format!("{name} ${:02X},X", operand_byte(1)),
        AddrMode::Zpy => format!("{name} ${:02X},Y", operand_byte(1)),
        AddrMode::Abs => format!("{name} ${:04X}", word(operand_byte)),
        AddrMode::Abx => format!("{name} ${:04X},X", word(operand_byte)),
        AddrMode::Aby => format!("{name} ${:04X},Y", word(operand_byte)),
        AddrMode::Ind => format!("{name} (${:04X})", word(operand_byte)),
        AddrMode::Xiz => format!("{name} (${:02X},X)", operand_byte(1)),
        AddrMode::Yiz => format!("{name} (${:02X}),Y", operand_byte(1)),
        AddrMode::Rel => {
            let offset = operand_byte(1) as i8;
            // Target is relative to the address immediately after this
            // two-byte branch instruction, matching `branch_cond`.
            let target = (addr.wrapping_add(2) as i16).wrapping_add(offset as i16) as u16;
            format!("{name} ${target:04X}")
        }
    }
}

fn word(operand_byte: impl Fn(usize) -> u8) -> u16 {
    (operand_byte(1) as u16) | ((operand_byte(2) as u16) << 8)
}
