/*!
cpu/mod.rs - MOS 6502 CPU: register file, fetch-decode-execute loop,
interrupt entry points.

Architecture
============
- `state` owns the architectural register/flag bits (`CpuState`).
- `regs` provides the generic `CpuRegs` trait so shared helpers work over
  any register representation.
- `addressing` resolves effective addresses/operands per `AddrMode`.
- `execute` implements the side effects (ALU, stack, loads/stores) as
  small generic functions, shared across every opcode that needs them.
- `table` is the 256-entry `INSTRUCTION_TABLE`: pure data mapping opcode
  byte to `(Mnemonic, AddrMode, base_cycles)`.
- `snapshot` is the read-only register/flag view returned to callers.

`Cpu::step` is the only place these pieces are assembled: fetch the
opcode, look it up, resolve the operand per `AddrMode`, execute per
`Mnemonic`, apply page-cross/branch penalties, return total cycles. The
per-step address/value/cycle bookkeeping lives entirely in `step`'s local
variables; nothing about one instruction survives into the next.

There is no `halted` flag. `BRK` and the `Ill` catch-all never stop the
CPU; they are ordinary instructions. `reset`/`irq`/`nmi` are explicit
methods; nothing here polls the bus for pending interrupts.
*/

pub mod addressing;
pub mod execute;
pub mod regs;
pub mod snapshot;
pub mod state;
pub mod table;

use crate::bus::{Bus, VECTOR_IRQ, VECTOR_NMI};
use addressing::{
    addr_abs, addr_abs_x, addr_abs_x_pc, addr_abs_y, addr_abs_y_pc, addr_ind_x, addr_ind_y,
    addr_ind_y_pc, addr_zp, addr_zp_x, addr_zp_y, fetch_byte, read_word_indirect_bug,
};
use execute::*;
use snapshot::RegisterSnapshot;
use state::{CARRY, CpuState, IRQ_DISABLE, NEGATIVE, OVERFLOW, ZERO};
use table::{AddrMode, INSTRUCTION_TABLE, Instruction, Mnemonic};

/// Cycle cost of a `reset`, fixed regardless of what was loaded.
const RESET_CYCLES: u32 = 8;
/// Cycle cost of a taken `irq`/`nmi` entry sequence.
const INTERRUPT_CYCLES: u32 = 7;
/// Cycle cost charged to an unassigned opcode byte: matches the `ILL`
/// table entry's `base_cycles` (treated as a one-byte no-op; real
/// undocumented-opcode timing is not modeled).
const ILLEGAL_OPCODE_CYCLES: u32 = 0;

/// The MOS 6502 CPU core: register file plus the fetch-decode-execute
/// loop. Holds no reference to any particular `Bus` instance; every
/// operation takes the bus it should act on explicitly.
#[derive(Debug, Clone, Copy)]
pub struct Cpu {
    state: CpuState,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Construct a CPU at power-up defaults (PC = 0 until `reset` loads
    /// the real vector).
    pub fn new() -> Self {
        Self {
            state: CpuState::new(),
        }
    }

    /// Borrow the architectural state directly. Used by lower-level
    /// helpers (`addressing`, `execute`) that are generic over `CpuRegs`.
    pub fn state(&self) -> &CpuState {
        &self.state
    }

    /// Mutably borrow the architectural state.
    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    // -----------------------------------------------------------------
    // Register accessors
    // -----------------------------------------------------------------

    pub fn a(&self) -> u8 {
        self.state.a()
    }
    pub fn x(&self) -> u8 {
        self.state.x()
    }
    pub fn y(&self) -> u8 {
        self.state.y()
    }
    pub fn sp(&self) -> u8 {
        self.state.sp()
    }
    pub fn pc(&self) -> u16 {
        self.state.pc()
    }
    pub fn status(&self) -> u8 {
        self.state.status()
    }

    pub fn set_a(&mut self, v: u8) {
        self.state.set_a(v);
    }
    pub fn set_x(&mut self, v: u8) {
        self.state.set_x(v);
    }
    pub fn set_y(&mut self, v: u8) {
        self.state.set_y(v);
    }
    pub fn set_sp(&mut self, v: u8) {
        self.state.set_sp(v);
    }
    pub fn set_pc(&mut self, v: u16) {
        self.state.set_pc(v);
    }
    pub fn set_status(&mut self, v: u8) {
        self.state.set_status(v);
    }

    /// Read-only snapshot of the register file, suitable for a debugger
    /// or trace log.
    pub fn snapshot(&self) -> RegisterSnapshot {
        RegisterSnapshot {
            pc: self.pc(),
            ac: self.a(),
            xr: self.x(),
            yr: self.y(),
            sp: self.sp(),
            sr: self.status(),
        }
    }

    // -----------------------------------------------------------------
    // Lifecycle: reset / interrupts / step
    // -----------------------------------------------------------------

    /// Reload `PC` from the reset vector, reinitialize registers to
    /// power-up defaults (`SP = 0xFD`, `SR = U | I`, `A/X/Y = 0`).
    /// Always costs 8 cycles.
    pub fn reset(&mut self, bus: &mut Bus) -> u32 {
        self.state.reset(bus);
        log::debug!("cpu reset: pc={:#06x}", self.pc());
        RESET_CYCLES
    }

    /// Service a maskable interrupt request if `I` is clear. No-op,
    /// 0 cycles, if `I` is set. Pushes `PC` then `SR` (`B=0, U=1`), sets
    /// `I`, loads `PC` from the IRQ/BRK vector.
    pub fn irq(&mut self, bus: &mut Bus) -> u32 {
        if self.state.is_flag_set(IRQ_DISABLE) {
            log::trace!("irq ignored: I set");
            return 0;
        }
        self.service_interrupt(bus, VECTOR_IRQ);
        log::debug!("irq serviced: pc={:#06x}", self.pc());
        INTERRUPT_CYCLES
    }

    /// Service a non-maskable interrupt unconditionally. Same entry
    /// sequence as `irq`, loading the NMI vector instead.
    pub fn nmi(&mut self, bus: &mut Bus) -> u32 {
        self.service_interrupt(bus, VECTOR_NMI);
        log::debug!("nmi serviced: pc={:#06x}", self.pc());
        INTERRUPT_CYCLES
    }

    fn service_interrupt(&mut self, bus: &mut Bus, vector: u16) {
        push_word(&mut self.state, bus, self.state.pc());
        push_status_with_break(&mut self.state, bus, false);
        set_flag(&mut self.state, IRQ_DISABLE, true);
        let target = bus.read_word(vector);
        self.state.set_pc(target);
    }

    /// Execute exactly one instruction: fetch the opcode at `PC`,
    /// advance `PC`, resolve the operand per the opcode's addressing
    /// mode, execute its semantics, and return the total cycle cost
    /// (base cost plus any page-cross/branch-taken penalty).
    pub fn step(&mut self, bus: &mut Bus) -> u32 {
        let opcode = fetch_byte(&mut self.state, bus);
        let instr: Instruction = INSTRUCTION_TABLE[opcode as usize];

        if instr.mnemonic == Mnemonic::Ill {
            log::trace!("illegal opcode {:#04x} at {:#06x}", opcode, self.pc());
            return ILLEGAL_OPCODE_CYCLES;
        }

        let mut cycles = instr.base_cycles as u32;
        self.execute(bus, instr, &mut cycles);
        cycles
    }

    /// Resolve the operand for read-class instructions (loads, logic,
    /// arithmetic, compares): returns the fetched byte and whether the
    /// effective-address computation crossed a page boundary.
    fn read_operand(&mut self, bus: &mut Bus, mode: AddrMode) -> (u8, bool) {
        match mode {
            AddrMode::Imm => (fetch_byte(&mut self.state, bus), false),
            AddrMode::Zpg => {
                let addr = addr_zp(&mut self.state, bus);
                (bus.read(addr), false)
            }
            AddrMode::Zpx => {
                let addr = addr_zp_x(&mut self.state, bus);
                (bus.read(addr), false)
            }
            AddrMode::Zpy => {
                let addr = addr_zp_y(&mut self.state, bus);
                (bus.read(addr), false)
            }
            AddrMode::Abs => {
                let addr = addr_abs(&mut self.state, bus);
                (bus.read(addr), false)
            }
            AddrMode::Abx => {
                let (addr, crossed) = addr_abs_x_pc(&mut self.state, bus);
                (bus.read(addr), crossed)
            }
            AddrMode::Aby => {
                let (addr, crossed) = addr_abs_y_pc(&mut self.state, bus);
                (bus.read(addr), crossed)
            }
            AddrMode::Xiz => {
                let addr = addr_ind_x(&mut self.state, bus);
                (bus.read(addr), false)
            }
            AddrMode::Yiz => {
                let (addr, crossed) = addr_ind_y_pc(&mut self.state, bus);
                (bus.read(addr), crossed)
            }
            other => unreachable!("addressing mode {:?} has no readable operand", other),
        }
    }

    /// Resolve the effective address for write/RMW-class instructions.
    /// Never reports page-cross: stores and RMW ops never carry a
    /// variable page-cross penalty (their fixed cycle cost already
    /// assumes the worst case).
    fn operand_address(&mut self, bus: &mut Bus, mode: AddrMode) -> u16 {
        match mode {
            AddrMode::Zpg => addr_zp(&mut self.state, bus),
            AddrMode::Zpx => addr_zp_x(&mut self.state, bus),
            AddrMode::Zpy => addr_zp_y(&mut self.state, bus),
            AddrMode::Abs => addr_abs(&mut self.state, bus),
            AddrMode::Abx => addr_abs_x(&mut self.state, bus),
            AddrMode::Aby => addr_abs_y(&mut self.state, bus),
            AddrMode::Xiz => addr_ind_x(&mut self.state, bus),
            AddrMode::Yiz => addr_ind_y(&mut self.state, bus),
            other => unreachable!("addressing mode {:?} has no effective address", other),
        }
    }

    fn branch_condition(&self, mnemonic: Mnemonic) -> bool {
        match mnemonic {
            Mnemonic::Bpl => !self.state.is_flag_set(NEGATIVE),
            Mnemonic::Bmi => self.state.is_flag_set(NEGATIVE),
            Mnemonic::Bvc => !self.state.is_flag_set(OVERFLOW),
            Mnemonic::Bvs => self.state.is_flag_set(OVERFLOW),
            Mnemonic::Bcc => !self.state.is_flag_set(CARRY),
            Mnemonic::Bcs => self.state.is_flag_set(CARRY),
            Mnemonic::Bne => !self.state.is_flag_set(ZERO),
            Mnemonic::Beq => self.state.is_flag_set(ZERO),
            other => unreachable!("{:?} is not a branch", other),
        }
    }

    fn execute(&mut self, bus: &mut Bus, instr: Instruction, cycles: &mut u32) {
        use Mnemonic::*;

        match instr.mnemonic {
            // ---- Read-class: loads, logic, arithmetic, compare-to-A ----
            Lda | Ldx | Ldy | And | Ora | Eor | Adc | Sbc | Cmp => {
                let (v, crossed) = self.read_operand(bus, instr.mode);
                if crossed {
                    *cycles += 1;
                }
                match instr.mnemonic {
                    Lda => lda(&mut self.state, v),
                    Ldx => ldx(&mut self.state, v),
                    Ldy => ldy(&mut self.state, v),
                    And => and(&mut self.state, v),
                    Ora => ora(&mut self.state, v),
                    Eor => eor(&mut self.state, v),
                    Adc => adc(&mut self.state, v),
                    Sbc => sbc(&mut self.state, v),
                    Cmp => cmp_generic(&mut self.state, self.state.a(), v),
                    _ => unreachable!(),
                }
            }
            // CPX/CPY/BIT never use the page-crossing addressing modes.
            Cpx | Cpy | Bit => {
                let (v, _) = self.read_operand(bus, instr.mode);
                match instr.mnemonic {
                    Cpx => cmp_generic(&mut self.state, self.state.x(), v),
                    Cpy => cmp_generic(&mut self.state, self.state.y(), v),
                    Bit => bit(&mut self.state, v),
                    _ => unreachable!(),
                }
            }

            // ---- Stores: never pay a page-cross penalty ----
            Sta | Stx | Sty => {
                let addr = self.operand_address(bus, instr.mode);
                let v = match instr.mnemonic {
                    Sta => self.state.a(),
                    Stx => self.state.x(),
                    Sty => self.state.y(),
                    _ => unreachable!(),
                };
                bus.write(addr, v);
            }

            // ---- Register transfers ----
            Tax => tax(&mut self.state),
            Tay => tay(&mut self.state),
            Txa => txa(&mut self.state),
            Tya => tya(&mut self.state),
            Tsx => tsx(&mut self.state),
            Txs => txs(&mut self.state),

            // ---- Stack ----
            Pha => pha(&mut self.state, bus),
            Pla => pla(&mut self.state, bus),
            Php => php(&mut self.state, bus),
            Plp => plp(&mut self.state, bus),

            // ---- Increment / decrement, register ----
            Inx => inx(&mut self.state),
            Iny => iny(&mut self.state),
            Dex => dex(&mut self.state),
            Dey => dey(&mut self.state),

            // ---- Increment / decrement, memory ----
            Inc | Dec => {
                let addr = self.operand_address(bus, instr.mode);
                match instr.mnemonic {
                    Inc => inc_mem(&mut self.state, bus, addr),
                    Dec => dec_mem(&mut self.state, bus, addr),
                    _ => unreachable!(),
                }
            }

            // ---- Shifts / rotates ----
            Asl | Lsr | Rol | Ror => {
                if instr.mode == AddrMode::Acc {
                    match instr.mnemonic {
                        Asl => asl_acc(&mut self.state),
                        Lsr => lsr_acc(&mut self.state),
                        Rol => rol_acc(&mut self.state),
                        Ror => ror_acc(&mut self.state),
                        _ => unreachable!(),
                    }
                } else {
                    let addr = self.operand_address(bus, instr.mode);
                    match instr.mnemonic {
                        Asl => asl_mem(&mut self.state, bus, addr),
                        Lsr => lsr_mem(&mut self.state, bus, addr),
                        Rol => rol_mem(&mut self.state, bus, addr),
                        Ror => ror_mem(&mut self.state, bus, addr),
                        _ => unreachable!(),
                    }
                }
            }

            // ---- Branches ----
            Bpl | Bmi | Bvc | Bvs | Bcc | Bcs | Bne | Beq => {
                let take = self.branch_condition(instr.mnemonic);
                *cycles += branch_cond(&mut self.state, bus, take);
            }

            // ---- Flags ----
            Clc => set_flag(&mut self.state, CARRY, false),
            Sec => set_flag(&mut self.state, CARRY, true),
            Cli => set_flag(&mut self.state, IRQ_DISABLE, false),
            Sei => set_flag(&mut self.state, IRQ_DISABLE, true),
            Cld => set_flag(&mut self.state, state::DECIMAL, false),
            Sed => set_flag(&mut self.state, state::DECIMAL, true),
            Clv => set_flag(&mut self.state, OVERFLOW, false),

            // ---- Jumps / subroutine / return ----
            Jmp => {
                let target = match instr.mode {
                    AddrMode::Abs => addr_abs(&mut self.state, bus),
                    AddrMode::Ind => {
                        let ptr = addr_abs(&mut self.state, bus);
                        read_word_indirect_bug(bus, ptr)
                    }
                    other => unreachable!("JMP has no {:?} form", other),
                };
                self.state.set_pc(target);
            }
            Jsr => {
                let target = addr_abs(&mut self.state, bus);
                let return_to = self.state.pc().wrapping_sub(1);
                push_word(&mut self.state, bus, return_to);
                self.state.set_pc(target);
            }
            Rts => {
                let ret = pop_word(&mut self.state, bus);
                self.state.set_pc(ret.wrapping_add(1));
            }
            Rti => {
                plp(&mut self.state, bus);
                let target = pop_word(&mut self.state, bus);
                self.state.set_pc(target);
            }
            Brk => {
                // Skip BRK's signature byte before pushing the return address.
                self.state.advance_pc_one();
                let pc = self.state.pc();
                push_word(&mut self.state, bus, pc);
                php(&mut self.state, bus);
                set_flag(&mut self.state, IRQ_DISABLE, true);
                let target = bus.read_word(VECTOR_IRQ);
                self.state.set_pc(target);
                *cycles = 7;
            }

            Nop => {}
            Ill => unreachable!("Ill is handled before dispatch"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::build_flat_rom_with_reset_vector;

    fn setup(prg: &[u8]) -> (Cpu, Bus) {
        let rom = build_flat_rom_with_reset_vector(prg, 0x8000);
        let mut bus = Bus::with_rom(&rom).expect("rom fits in 32KiB");
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        (cpu, bus)
    }

    #[test]
    fn reset_loads_vector_and_costs_eight_cycles() {
        let (cpu, _bus) = setup(&[0xEA]);
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFD);
        assert!(cpu.status() & IRQ_DISABLE != 0);
    }

    #[test]
    fn lda_immediate_sets_flags_and_advances_pc() {
        let (mut cpu, mut bus) = setup(&[0xA9, 0x00, 0xA9, 0x80]);
        let c = cpu.step(&mut bus);
        assert_eq!(c, 2);
        assert_eq!(cpu.a(), 0x00);
        assert!(cpu.status() & ZERO != 0);
        cpu.step(&mut bus);
        assert_eq!(cpu.a(), 0x80);
        assert!(cpu.status() & NEGATIVE != 0);
    }

    #[test]
    fn lda_abs_x_page_cross_adds_cycle() {
        // LDX #$10 ; LDA $80F5,X crosses from page 0x80 to 0x81.
        let (mut cpu, mut bus) = setup(&[0xA2, 0x10, 0xBD, 0xF5, 0x80]);
        cpu.step(&mut bus); // LDX
        let c = cpu.step(&mut bus); // LDA abs,X
        assert_eq!(c, 5);
    }

    #[test]
    fn sta_never_pays_page_cross_penalty() {
        let (mut cpu, mut bus) = setup(&[0xA2, 0xFF, 0x9D, 0x01, 0x02]);
        cpu.step(&mut bus); // LDX #$FF
        let c = cpu.step(&mut bus); // STA $0201,X -> $0300
        assert_eq!(c, 5);
        assert_eq!(bus.read(0x0300), 0x00);
    }

    #[test]
    fn inx_wraps_and_sets_zero() {
        let (mut cpu, mut bus) = setup(&[0xA2, 0xFF, 0xE8]);
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        assert_eq!(cpu.x(), 0x00);
        assert!(cpu.status() & ZERO != 0);
    }

    #[test]
    fn branch_not_taken_then_taken_same_page() {
        let (mut cpu, mut bus) = setup(&[0xA9, 0x00, 0xD0, 0x02, 0xA9, 0x01, 0xD0, 0x02]);
        cpu.step(&mut bus); // LDA #0 -> Z set
        let c = cpu.step(&mut bus); // BNE not taken
        assert_eq!(c, 2);
        cpu.step(&mut bus); // LDA #1 -> Z clear
        let c = cpu.step(&mut bus); // BNE taken, no page cross
        assert_eq!(c, 3);
    }

    #[test]
    fn jsr_rts_round_trip() {
        let mut prg = vec![0x20, 0x10, 0x80];
        prg.resize(0x10, 0xEA);
        prg.push(0x60); // RTS at offset 0x10 -> $8010
        let (mut cpu, mut bus) = setup(&prg);
        let sp_before = cpu.sp();
        cpu.step(&mut bus); // JSR
        assert_eq!(cpu.pc(), 0x8010);
        cpu.step(&mut bus); // RTS
        assert_eq!(cpu.pc(), 0x8003);
        assert_eq!(cpu.sp(), sp_before);
    }

    #[test]
    fn brk_pushes_return_address_past_signature_byte_and_loads_irq_vector() {
        let mut rom = build_flat_rom_with_reset_vector(&[0x00, 0xEA], 0x8000);
        rom[0xFFFE - 0x8000] = 0x00;
        rom[0xFFFF - 0x8000] = 0x90;
        let mut bus = Bus::with_rom(&rom).unwrap();
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        let c = cpu.step(&mut bus);
        assert_eq!(c, 7);
        assert_eq!(cpu.pc(), 0x9000);
        assert!(cpu.status() & IRQ_DISABLE != 0);
        let ret = bus.read(0x01FD) as u16 | ((bus.read(0x01FE) as u16) << 8);
        assert_eq!(ret, 0x8002);
    }

    #[test]
    fn irq_ignored_when_i_flag_set() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        cpu.set_status(cpu.status() | IRQ_DISABLE);
        let c = cpu.irq(&mut bus);
        assert_eq!(c, 0);
    }

    #[test]
    fn nmi_always_fires_and_sets_i() {
        let mut rom = build_flat_rom_with_reset_vector(&[0xEA], 0x8000);
        rom[0xFFFA - 0x8000] = 0x00;
        rom[0xFFFB - 0x8000] = 0x91;
        let mut bus = Bus::with_rom(&rom).unwrap();
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.set_status(cpu.status() | IRQ_DISABLE);
        let c = cpu.nmi(&mut bus);
        assert_eq!(c, 7);
        assert_eq!(cpu.pc(), 0x9100);
        assert!(cpu.status() & IRQ_DISABLE != 0);
    }

    #[test]
    fn illegal_opcode_is_single_byte_noop_and_never_halts() {
        let (mut cpu, mut bus) = setup(&[0x02, 0xA9, 0x42]);
        let start = cpu.pc();
        let c = cpu.step(&mut bus);
        assert_eq!(c, ILLEGAL_OPCODE_CYCLES);
        assert_eq!(cpu.pc(), start.wrapping_add(1));
        cpu.step(&mut bus); // LDA #$42 still executes normally
        assert_eq!(cpu.a(), 0x42);
    }

    #[test]
    fn jmp_indirect_reproduces_page_boundary_bug() {
        let mut rom = build_flat_rom_with_reset_vector(&[0x6C, 0xFF, 0x20], 0x8000);
        rom[0x20FF - 0x8000] = 0x34;
        rom[0x2000 - 0x8000] = 0x12;
        let mut bus = Bus::with_rom(&rom).unwrap();
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.step(&mut bus);
        assert_eq!(cpu.pc(), 0x1234);
    }

    #[test]
    fn rol_accumulator_through_carry() {
        let (mut cpu, mut bus) = setup(&[0xA9, 0x80, 0x2A]);
        cpu.step(&mut bus); // LDA #$80
        cpu.step(&mut bus); // ROL A -> carry set, A = 0
        assert_eq!(cpu.a(), 0x00);
        assert!(cpu.status() & CARRY != 0);
        assert!(cpu.status() & ZERO != 0);
    }
}
