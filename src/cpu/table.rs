/*!
table.rs - Tagged-variant opcode metadata: `Mnemonic`, `AddrMode`, and the
256-entry `INSTRUCTION_TABLE` that drives both the CPU dispatcher and the
disassembler.

Design
======
Every one of the 256 opcode slots is described by an `Instruction` literal:
the symbolic mnemonic, the addressing mode, and the base cycle count (the
non-page-cross, non-branch-taken case). Unassigned (undocumented) opcodes
get `Mnemonic::Ill`, `AddrMode::Imp`, and a base cost of 0 — the dispatcher
treats them as a one-byte no-op, never halting and never attempting to
reproduce real undocumented-opcode behavior (see crate docs on non-goals).

This replaces function-pointer or trait-object dispatch with a plain data
table plus two `match` statements (one over `AddrMode` for operand
resolution, one over `Mnemonic` for semantics) — both implemented in
`cpu::step`.
*/

/// Addressing mode for one opcode slot. Names mirror the canonical 6502
/// mnemonics for these modes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AddrMode {
    Imp,
    Acc,
    Imm,
    Zpg,
    Zpx,
    Zpy,
    Abs,
    Abx,
    Aby,
    Ind,
    Xiz,
    Yiz,
    Rel,
}

impl AddrMode {
    /// Instruction length in bytes (opcode + operand) for this addressing
    /// mode.
    pub const fn length(self) -> u16 {
        match self {
            AddrMode::Imp | AddrMode::Acc => 1,
            AddrMode::Imm
            | AddrMode::Zpg
            | AddrMode::Zpx
            | AddrMode::Zpy
            | AddrMode::Xiz
            | AddrMode::Yiz
            | AddrMode::Rel => 2,
            AddrMode::Abs | AddrMode::Abx | AddrMode::Aby | AddrMode::Ind => 3,
        }
    }
}

/// Symbolic instruction name: the 56 documented 6502 mnemonics plus `Ill`,
/// the placeholder used for every unassigned opcode byte.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Mnemonic {
    Lda,
    Ldx,
    Ldy,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Txa,
    Tya,
    Tsx,
    Txs,
    Pha,
    Pla,
    Php,
    Plp,
    And,
    Ora,
    Eor,
    Bit,
    Adc,
    Sbc,
    Inc,
    Inx,
    Iny,
    Dec,
    Dex,
    Dey,
    Asl,
    Lsr,
    Rol,
    Ror,
    Cmp,
    Cpx,
    Cpy,
    Bpl,
    Bmi,
    Bvc,
    Bvs,
    Bcc,
    Bcs,
    Bne,
    Beq,
    Clc,
    Sec,
    Cli,
    Sei,
    Cld,
    Sed,
    Clv,
    Jmp,
    Jsr,
    Rts,
    Rti,
    Brk,
    Nop,
    /// Placeholder for every opcode byte with no documented 6502 instruction.
    Ill,
}

impl Mnemonic {
    /// Three-letter mnemonic text, as used by the disassembler. `Ill` is
    /// rendered by the disassembler as `"???"`, not via this method.
    pub const fn as_str(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Tax => "TAX",
            Tay => "TAY",
            Txa => "TXA",
            Tya => "TYA",
            Tsx => "TSX",
            Txs => "TXS",
            Pha => "PHA",
            Pla => "PLA",
            Php => "PHP",
            Plp => "PLP",
            And => "AND",
            Ora => "ORA",
            Eor => "EOR",
            Bit => "BIT",
            Adc => "ADC",
            Sbc => "SBC",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Asl => "ASL",
            Lsr => "LSR",
            Rol => "ROL",
            Ror => "ROR",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Bpl => "BPL",
            Bmi => "BMI",
            Bvc => "BVC",
            Bvs => "BVS",
            Bcc => "BCC",
            Bcs => "BCS",
            Bne => "BNE",
            Beq => "BEQ",
            Clc => "CLC",
            Sec => "SEC",
            Cli => "CLI",
            Sei => "SEI",
            Cld => "CLD",
            Sed => "SED",
            Clv => "CLV",
            Jmp => "JMP",
            Jsr => "JSR",
            Rts => "RTS",
            Rti => "RTI",
            Brk => "BRK",
            Nop => "NOP",
            Ill => "ILL",
        }
    }
}

/// One 256-entry slot: mnemonic, addressing mode, and base cycle count
/// (before page-cross / branch-taken penalties).
#[derive(Copy, Clone, Debug)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub mode: AddrMode,
    pub base_cycles: u8,
}

impl Instruction {
    const fn new(mnemonic: Mnemonic, mode: AddrMode, base_cycles: u8) -> Self {
        Self {
            mnemonic,
            mode,
            base_cycles,
        }
    }

    const ILL: Instruction = Instruction::new(Mnemonic::Ill, AddrMode::Imp, 0);
}

/// The canonical 256-entry opcode table. Indexed directly by opcode byte.
pub static INSTRUCTION_TABLE: [Instruction; 256] = build_table();

const fn build_table() -> [Instruction; 256] {
    use AddrMode::*;
    use Mnemonic::*;

    let mut t = [Instruction::ILL; 256];

    // ---- LDA ----
    t[0xA9] = Instruction::new(Lda, Imm, 2);
    t[0xA5] = Instruction::new(Lda, Zpg, 3);
    t[0xB5] = Instruction::new(Lda, Zpx, 4);
    t[0xAD] = Instruction::new(Lda, Abs, 4);
    t[0xBD] = Instruction::new(Lda, Abx, 4);
    t[0xB9] = Instruction::new(Lda, Aby, 4);
    t[0xA1] = Instruction::new(Lda, Xiz, 6);
    t[0xB1] = Instruction::new(Lda, Yiz, 5);

    // ---- LDX ----
    t[0xA2] = Instruction::new(Ldx, Imm, 2);
    t[0xA6] = Instruction::new(Ldx, Zpg, 3);
    t[0xB6] = Instruction::new(Ldx, Zpy, 4);
    t[0xAE] = Instruction::new(Ldx, Abs, 4);
    t[0xBE] = Instruction::new(Ldx, Aby, 4);

    // ---- LDY ----
    t[0xA0] = Instruction::new(Ldy, Imm, 2);
    t[0xA4] = Instruction::new(Ldy, Zpg, 3);
    t[0xB4] = Instruction::new(Ldy, Zpx, 4);
    t[0xAC] = Instruction::new(Ldy, Abs, 4);
    t[0xBC] = Instruction::new(Ldy, Abx, 4);

    // ---- STA ----
    t[0x85] = Instruction::new(Sta, Zpg, 3);
    t[0x95] = Instruction::new(Sta, Zpx, 4);
    t[0x8D] = Instruction::new(Sta, Abs, 4);
    t[0x9D] = Instruction::new(Sta, Abx, 5);
    t[0x99] = Instruction::new(Sta, Aby, 5);
    t[0x81] = Instruction::new(Sta, Xiz, 6);
    t[0x91] = Instruction::new(Sta, Yiz, 6);

    // ---- STX / STY ----
    t[0x86] = Instruction::new(Stx, Zpg, 3);
    t[0x96] = Instruction::new(Stx, Zpy, 4);
    t[0x8E] = Instruction::new(Stx, Abs, 4);
    t[0x84] = Instruction::new(Sty, Zpg, 3);
    t[0x94] = Instruction::new(Sty, Zpx, 4);
    t[0x8C] = Instruction::new(Sty, Abs, 4);

    // ---- Transfers ----
    t[0xAA] = Instruction::new(Tax, Imp, 2);
    t[0xA8] = Instruction::new(Tay, Imp, 2);
    t[0x8A] = Instruction::new(Txa, Imp, 2);
    t[0x98] = Instruction::new(Tya, Imp, 2);
    t[0xBA] = Instruction::new(Tsx, Imp, 2);
    t[0x9A] = Instruction::new(Txs, Imp, 2);

    // ---- Stack ----
    t[0x48] = Instruction::new(Pha, Imp, 3);
    t[0x68] = Instruction::new(Pla, Imp, 4);
    t[0x08] = Instruction::new(Php, Imp, 3);
    t[0x28] = Instruction::new(Plp, Imp, 4);

    // ---- AND ----
    t[0x29] = Instruction::new(And, Imm, 2);
    t[0x25] = Instruction::new(And, Zpg, 3);
    t[0x35] = Instruction::new(And, Zpx, 4);
    t[0x2D] = Instruction::new(And, Abs, 4);
    t[0x3D] = Instruction::new(And, Abx, 4);
    t[0x39] = Instruction::new(And, Aby, 4);
    t[0x21] = Instruction::new(And, Xiz, 6);
    t[0x31] = Instruction::new(And, Yiz, 5);

    // ---- ORA ----
    t[0x09] = Instruction::new(Ora, Imm, 2);
    t[0x05] = Instruction::new(Ora, Zpg, 3);
    t[0x15] = Instruction::new(Ora, Zpx, 4);
    t[0x0D] = Instruction::new(Ora, Abs, 4);
    t[0x1D] = Instruction::new(Ora, Abx, 4);
    t[0x19] = Instruction::new(Ora, Aby, 4);
    t[0x01] = Instruction::new(Ora, Xiz, 6);
    t[0x11] = Instruction::new(Ora, Yiz, 5);

    // ---- EOR ----
    t[0x49] = Instruction::new(Eor, Imm, 2);
    t[0x45] = Instruction::new(Eor, Zpg, 3);
    t[0x55] = Instruction::new(Eor, Zpx, 4);
    t[0x4D] = Instruction::new(Eor, Abs, 4);
    t[0x5D] = Instruction::new(Eor, Abx, 4);
    t[0x59] = Instruction::new(Eor, Aby, 4);
    t[0x41] = Instruction::new(Eor, Xiz, 6);
    t[0x51] = Instruction::new(Eor, Yiz, 5);

    // ---- BIT ----
    t[0x24] = Instruction::new(Bit, Zpg, 3);
    t[0x2C] = Instruction::new(Bit, Abs, 4);

    // ---- ADC ----
    t[0x69] = Instruction::new(Adc, Imm, 2);
    t[0x65] = Instruction::new(Adc, Zpg, 3);
    t[0x75] = Instruction::new(Adc, Zpx, 4);
    t[0x6D] = Instruction::new(Adc, Abs, 4);
    t[0x7D] = Instruction::new(Adc, Abx, 4);
    t[0x79] = Instruction::new(Adc, Aby, 4);
    t[0x61] = Instruction::new(Adc, Xiz, 6);
    t[0x71] = Instruction::new(Adc, Yiz, 5);

    // ---- SBC ----
    t[0xE9] = Instruction::new(Sbc, Imm, 2);
    t[0xE5] = Instruction::new(Sbc, Zpg, 3);
    t[0xF5] = Instruction::new(Sbc, Zpx, 4);
    t[0xED] = Instruction::new(Sbc, Abs, 4);
    t[0xFD] = Instruction::new(Sbc, Abx, 4);
    t[0xF9] = Instruction::new(Sbc, Aby, 4);
    t[0xE1] = Instruction::new(Sbc, Xiz, 6);
    t[0xF1] = Instruction::new(Sbc, Yiz, 5);

    // ---- INC / INX / INY ----
    t[0xE6] = Instruction::new(Inc, Zpg, 5);
    t[0xF6] = Instruction::new(Inc, Zpx, 6);
    t[0xEE] = Instruction::new(Inc, Abs, 6);
    t[0xFE] = Instruction::new(Inc, Abx, 7);
    t[0xE8] = Instruction::new(Inx, Imp, 2);
    t[0xC8] = Instruction::new(Iny, Imp, 2);

    // ---- DEC / DEX / DEY ----
    t[0xC6] = Instruction::new(Dec, Zpg, 5);
    t[0xD6] = Instruction::new(Dec, Zpx, 6);
    t[0xCE] = Instruction::new(Dec, Abs, 6);
    t[0xDE] = Instruction::new(Dec, Abx, 7);
    t[0xCA] = Instruction::new(Dex, Imp, 2);
    t[0x88] = Instruction::new(Dey, Imp, 2);

    // ---- ASL ----
    t[0x0A] = Instruction::new(Asl, Acc, 2);
    t[0x06] = Instruction::new(Asl, Zpg, 5);
    t[0x16] = Instruction::new(Asl, Zpx, 6);
    t[0x0E] = Instruction::new(Asl, Abs, 6);
    t[0x1E] = Instruction::new(Asl, Abx, 7);

    // ---- LSR ----
    t[0x4A] = Instruction::new(Lsr, Acc, 2);
    t[0x46] = Instruction::new(Lsr, Zpg, 5);
    t[0x56] = Instruction::new(Lsr, Zpx, 6);
    t[0x4E] = Instruction::new(Lsr, Abs, 6);
    t[0x5E] = Instruction::new(Lsr, Abx, 7);

    // ---- ROL ----
    t[0x2A] = Instruction::new(Rol, Acc, 2);
    t[0x26] = Instruction::new(Rol, Zpg, 5);
    t[0x36] = Instruction::new(Rol, Zpx, 6);
    t[0x2E] = Instruction::new(Rol, Abs, 6);
    t[0x3E] = Instruction::new(Rol, Abx, 7);

    // ---- ROR ----
    t[0x6A] = Instruction::new(Ror, Acc, 2);
    t[0x66] = Instruction::new(Ror, Zpg, 5);
    t[0x76] = Instruction::new(Ror, Zpx, 6);
    t[0x6E] = Instruction::new(Ror, Abs, 6);
    t[0x7E] = Instruction::new(Ror, Abx, 7);

    // ---- CMP ----
    t[0xC9] = Instruction::new(Cmp, Imm, 2);
    t[0xC5] = Instruction::new(Cmp, Zpg, 3);
    t[0xD5] = Instruction::new(Cmp, Zpx, 4);
    t[0xCD] = Instruction::new(Cmp, Abs, 4);
    t[0xDD] = Instruction::new(Cmp, Abx, 4);
    t[0xD9] = Instruction::new(Cmp, Aby, 4);
    t[0xC1] = Instruction::new(Cmp, Xiz, 6);
    t[0xD1] = Instruction::new(Cmp, Yiz, 5);

    // ---- CPX / CPY ----
    t[0xE0] = Instruction::new(Cpx, Imm, 2);
    t[0xE4] = Instruction::new(Cpx, Zpg, 3);
    t[0xEC] = Instruction::new(Cpx, Abs, 4);
    t[0xC0] = Instruction::new(Cpy, Imm, 2);
    t[0xC4] = Instruction::new(Cpy, Zpg, 3);
    t[0xCC] = Instruction::new(Cpy, Abs, 4);

    // ---- Branches ----
    t[0x10] = Instruction::new(Bpl, Rel, 2);
    t[0x30] = Instruction::new(Bmi, Rel, 2);
    t[0x50] = Instruction::new(Bvc, Rel, 2);
    t[0x70] = Instruction::new(Bvs, Rel, 2);
    t[0x90] = Instruction::new(Bcc, Rel, 2);
    t[0xB0] = Instruction::new(Bcs, Rel, 2);
    t[0xD0] = Instruction::new(Bne, Rel, 2);
    t[0xF0] = Instruction::new(Beq, Rel, 2);

    // ---- Flags ----
    t[0x18] = Instruction::new(Clc, Imp, 2);
    t[0x38] = Instruction::new(Sec, Imp, 2);
    t[0x58] = Instruction::new(Cli, Imp, 2);
    t[0x78] = Instruction::new(Sei, Imp, 2);
    t[0xD8] = Instruction::new(Cld, Imp, 2);
    t[0xF8] = Instruction::new(Sed, Imp, 2);
    t[0xB8] = Instruction::new(Clv, Imp, 2);

    // ---- Jumps / Subroutines / Returns / BRK ----
    t[0x4C] = Instruction::new(Jmp, Abs, 3);
    t[0x6C] = Instruction::new(Jmp, Ind, 5);
    t[0x20] = Instruction::new(Jsr, Abs, 6);
    t[0x60] = Instruction::new(Rts, Imp, 6);
    t[0x40] = Instruction::new(Rti, Imp, 6);
    t[0x00] = Instruction::new(Brk, Imp, 7);

    // ---- NOP ----
    t[0xEA] = Instruction::new(Nop, Imp, 2);

    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_opcode_count_is_151() {
        let documented = INSTRUCTION_TABLE
            .iter()
            .filter(|i| !matches!(i.mnemonic, Mnemonic::Ill))
            .count();
        assert_eq!(documented, 151);
    }

    #[test]
    fn spot_check_entries() {
        assert_eq!(INSTRUCTION_TABLE[0xA9].mnemonic.as_str(), "LDA");
        assert_eq!(INSTRUCTION_TABLE[0xA9].mode, AddrMode::Imm);
        assert_eq!(INSTRUCTION_TABLE[0xA9].base_cycles, 2);

        assert_eq!(INSTRUCTION_TABLE[0x00].mnemonic.as_str(), "BRK");
        assert_eq!(INSTRUCTION_TABLE[0x00].base_cycles, 7);

        assert_eq!(INSTRUCTION_TABLE[0x6C].mnemonic.as_str(), "JMP");
        assert_eq!(INSTRUCTION_TABLE[0x6C].mode, AddrMode::Ind);
    }

    #[test]
    fn unassigned_opcode_is_ill() {
        // 0x02 has no documented 6502 instruction.
        assert_eq!(INSTRUCTION_TABLE[0x02].mnemonic, Mnemonic::Ill);
        assert_eq!(INSTRUCTION_TABLE[0x02].base_cycles, 0);
    }

    #[test]
    fn addr_mode_lengths_match_spec() {
        assert_eq!(AddrMode::Imp.length(), 1);
        assert_eq!(AddrMode::Acc.length(), 1);
        assert_eq!(AddrMode::Imm.length(), 2);
        assert_eq!(AddrMode::Zpg.length(), 2);
        assert_eq!(AddrMode::Rel.length(), 2);
        assert_eq!(AddrMode::Abs.length(), 3);
        assert_eq!(AddrMode::Ind.length(), 3);
    }
}
