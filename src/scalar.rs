//! Scalar integer primitives: ALU ops, shifts, compares, conditional moves,
//! and every addressed memory access including the unaligned word/doubleword
//! merges. One function per original machine instruction.
//!
//! Addresses are the base register's low 32 bits plus a signed immediate,
//! computed with unsigned wraparound. Word-sized results are always sign
//! extended into the 64-bit destination lane; byte and halfword loads extend
//! per the instruction's declared signedness. Destination writes touch only
//! the low 64-bit lane unless noted.

use crate::mem::Memory;
use crate::regs::{Reg128, Registers};

// Merge tables for the unaligned word/doubleword loads, indexed by the low
// address bits. These are the specification of the instructions, transcribed
// literally and pinned by tests; do not re-derive them.
const LWL_MASK: [u32; 4] = [0x00FF_FFFF, 0x0000_FFFF, 0x0000_00FF, 0x0000_0000];
const LWL_SHIFT: [u32; 4] = [24, 16, 8, 0];
const LWR_MASK: [u32; 4] = [0x0000_0000, 0xFF00_0000, 0xFFFF_0000, 0xFFFF_FF00];
const LWR_SHIFT: [u32; 4] = [0, 8, 16, 24];

#[rustfmt::skip]
const LDL_MASK: [u64; 8] = [
    0x00FF_FFFF_FFFF_FFFF, 0x0000_FFFF_FFFF_FFFF, 0x0000_00FF_FFFF_FFFF, 0x0000_0000_FFFF_FFFF,
    0x0000_0000_00FF_FFFF, 0x0000_0000_0000_FFFF, 0x0000_0000_0000_00FF, 0x0000_0000_0000_0000,
];
#[rustfmt::skip]
const LDR_MASK: [u64; 8] = [
    0x0000_0000_0000_0000, 0xFF00_0000_0000_0000, 0xFFFF_0000_0000_0000, 0xFFFF_FF00_0000_0000,
    0xFFFF_FFFF_0000_0000, 0xFFFF_FFFF_FF00_0000, 0xFFFF_FFFF_FFFF_0000, 0xFFFF_FFFF_FFFF_FF00,
];
const LDL_SHIFT: [u32; 8] = [56, 48, 40, 32, 24, 16, 8, 0];
const LDR_SHIFT: [u32; 8] = [0, 8, 16, 24, 32, 40, 48, 56];

impl Registers {
    #[inline]
    pub(crate) fn addr(&self, base: usize, offset: i32) -> u32 {
        self.gpr_addr(base).wrapping_add(offset as u32)
    }

    // loads

    pub fn lb(&mut self, mem: &Memory, dst: usize, offset: i32, src: usize) {
        let val = mem.read_u8(self.addr(src, offset)) as i8;
        self.gprs[dst].set_s64(0, val as i64);
    }

    pub fn lbu(&mut self, mem: &Memory, dst: usize, offset: i32, src: usize) {
        let val = mem.read_u8(self.addr(src, offset));
        self.gprs[dst].set_u64(0, val as u64);
    }

    pub fn lh(&mut self, mem: &Memory, dst: usize, offset: i32, src: usize) {
        let val = mem.read_u16(self.addr(src, offset)) as i16;
        self.gprs[dst].set_s64(0, val as i64);
    }

    pub fn lhu(&mut self, mem: &Memory, dst: usize, offset: i32, src: usize) {
        let val = mem.read_u16(self.addr(src, offset));
        self.gprs[dst].set_u64(0, val as u64);
    }

    pub fn lw(&mut self, mem: &Memory, dst: usize, offset: i32, src: usize) {
        let val = mem.read_u32(self.addr(src, offset)) as i32;
        self.gprs[dst].set_s64(0, val as i64);
    }

    pub fn lwu(&mut self, mem: &Memory, dst: usize, offset: i32, src: usize) {
        let val = mem.read_u32(self.addr(src, offset));
        self.gprs[dst].set_u64(0, val as u64);
    }

    pub fn ld(&mut self, mem: &Memory, dst: usize, offset: i32, src: usize) {
        let val = mem.read_u64(self.addr(src, offset));
        self.gprs[dst].set_u64(0, val);
    }

    /// Quadword load; the computed address is forced to 16-byte alignment.
    pub fn lq(&mut self, mem: &Memory, dst: usize, offset: i32, src: usize) {
        let addr = self.addr(src, offset) & !0xF;
        self.gprs[dst] = Reg128::from(mem.read_qw(addr));
    }

    /// Left half of an unaligned word load. The memory read happens even when
    /// the destination is r0; only the register update is discarded.
    pub fn lwl(&mut self, mem: &Memory, dst: usize, offset: i32, src: usize) {
        let addr = self.addr(src, offset);
        let shift = (addr & 3) as usize;
        let word = mem.read_u32(addr & !3);
        if dst == 0 {
            return;
        }
        let merged = (self.gprs[dst].u32s()[0] & LWL_MASK[shift]) | (word << LWL_SHIFT[shift]);
        // always sign extended into the upper 32 bits
        self.gprs[dst].set_s64(0, merged as i32 as i64);
    }

    /// Right half of an unaligned word load. Sign extension into the upper 32
    /// bits happens only when the shift amount is zero; every other shift
    /// updates the low 32 bits and leaves the upper half untouched.
    pub fn lwr(&mut self, mem: &Memory, dst: usize, offset: i32, src: usize) {
        let addr = self.addr(src, offset);
        let shift = (addr & 3) as usize;
        let word = mem.read_u32(addr & !3);
        if dst == 0 {
            return;
        }
        let merged = (self.gprs[dst].u32s()[0] & LWR_MASK[shift]) | (word >> LWR_SHIFT[shift]);
        if shift == 0 {
            self.gprs[dst].set_s64(0, merged as i32 as i64);
        } else {
            self.gprs[dst].set_u32(0, merged);
        }
    }

    pub fn ldl(&mut self, mem: &Memory, dst: usize, offset: i32, src: usize) {
        let addr = self.addr(src, offset);
        let shift = (addr & 7) as usize;
        let dword = mem.read_u64(addr & !7);
        if dst == 0 {
            return;
        }
        let merged = (self.gprs[dst].u64s()[0] & LDL_MASK[shift]) | (dword << LDL_SHIFT[shift]);
        self.gprs[dst].set_u64(0, merged);
    }

    pub fn ldr(&mut self, mem: &Memory, dst: usize, offset: i32, src: usize) {
        let addr = self.addr(src, offset);
        let shift = (addr & 7) as usize;
        let dword = mem.read_u64(addr & !7);
        if dst == 0 {
            return;
        }
        let merged = (self.gprs[dst].u64s()[0] & LDR_MASK[shift]) | (dword >> LDR_SHIFT[shift]);
        self.gprs[dst].set_u64(0, merged);
    }

    // stores. storing r0 is legal and writes architectural zero.

    pub fn sb(&self, mem: &mut Memory, src: usize, offset: i32, addr: usize) {
        mem.write_u8(self.addr(addr, offset), self.gpr_src(src).u8s()[0]);
    }

    pub fn sh(&self, mem: &mut Memory, src: usize, offset: i32, addr: usize) {
        mem.write_u16(self.addr(addr, offset), self.gpr_src(src).u16s()[0]);
    }

    pub fn sw(&self, mem: &mut Memory, src: usize, offset: i32, addr: usize) {
        mem.write_u32(self.addr(addr, offset), self.gpr_src(src).u32s()[0]);
    }

    pub fn sd(&self, mem: &mut Memory, src: usize, offset: i32, addr: usize) {
        mem.write_u64(self.addr(addr, offset), self.gpr_src(src).u64s()[0]);
    }

    pub fn sq(&self, mem: &mut Memory, src: usize, offset: i32, addr: usize) {
        if offset & 0xF != 0 {
            panic!("sq: offset not quadword aligned offset=${:04X}", offset);
        }
        mem.write_qw(self.addr(addr, offset), self.gpr_src(src).u8s());
    }

    // immediates and moves

    pub fn lui(&mut self, dst: usize, imm: u32) {
        self.gprs[dst].set_s64(0, ((imm << 16) as i32) as i64);
    }

    /// Materializes a 32-bit float constant's bit pattern into a GPR the way
    /// a word load from the constant pool would.
    pub fn lw_float_constant(&mut self, dst: usize, bits: u32) {
        self.gprs[dst].set_s64(0, bits as i32 as i64);
    }

    pub fn mov64(&mut self, dst: usize, src: usize) {
        self.gprs[dst].set_u64(0, self.gpr64(src));
    }

    pub fn movz(&mut self, dst: usize, src0: usize, src1: usize) {
        if self.gpr64(src1) == 0 {
            self.gprs[dst].set_u64(0, self.gpr64(src0));
        }
    }

    pub fn movn(&mut self, dst: usize, src0: usize, src1: usize) {
        if self.gpr64(src1) != 0 {
            self.gprs[dst].set_u64(0, self.gpr64(src0));
        }
    }

    /// Reads a symbol cell (sign extending its 32-bit value) into a GPR.
    pub fn load_symbol(&mut self, mem: &Memory, dst: usize, sym_addr: u32) {
        self.gprs[dst].set_s64(0, mem.read_u32(sym_addr) as i32 as i64);
    }

    /// Loads the address of a symbol cell itself.
    pub fn load_symbol_addr(&mut self, dst: usize, sym_addr: u32) {
        self.gprs[dst].set_u64(0, sym_addr as u64);
    }

    /// Computes an address inside the scratchpad mirror: the scratchpad base
    /// held in a symbol cell plus a fixed offset.
    pub fn load_spad_addr(&mut self, mem: &Memory, dst: usize, spad_sym: u32, offset: u32) {
        let base = mem.read_u32(spad_sym);
        self.gprs[dst].set_u64(0, base.wrapping_add(offset) as u64);
    }

    // arithmetic

    pub fn addu(&mut self, dst: usize, src0: usize, src1: usize) {
        let val = (self.gpr64(src0).wrapping_add(self.gpr64(src1))) as i32;
        self.gprs[dst].set_s64(0, val as i64);
    }

    pub fn addiu(&mut self, dst: usize, src0: usize, imm: i64) {
        let val = (self.gpr64(src0).wrapping_add(imm as u64)) as i32;
        self.gprs[dst].set_s64(0, val as i64);
    }

    pub fn daddu(&mut self, dst: usize, src0: usize, src1: usize) {
        self.gprs[dst].set_u64(0, self.gpr64(src0).wrapping_add(self.gpr64(src1)));
    }

    pub fn daddiu(&mut self, dst: usize, src0: usize, imm: i64) {
        self.gprs[dst].set_u64(0, self.gpr64(src0).wrapping_add(imm as u64));
    }

    pub fn subu(&mut self, dst: usize, src0: usize, src1: usize) {
        let val = self.gpr_src(src0).s32s()[0].wrapping_sub(self.gpr_src(src1).s32s()[0]);
        self.gprs[dst].set_s64(0, val as i64);
    }

    pub fn dsubu(&mut self, dst: usize, src0: usize, src1: usize) {
        self.gprs[dst].set_u64(0, self.gpr64(src0).wrapping_sub(self.gpr64(src1)));
    }

    /// Three-operand 32-bit multiply; the product's low word is sign extended
    /// into the destination.
    pub fn mult3(&mut self, dst: usize, src0: usize, src1: usize) {
        let val = self.gpr_src(src0).s32s()[0].wrapping_mul(self.gpr_src(src1).s32s()[0]);
        self.gprs[dst].set_s64(0, val as i64);
    }

    pub fn multu3(&mut self, dst: usize, src0: usize, src1: usize) {
        let val = self.gpr_src(src0).u32s()[0].wrapping_mul(self.gpr_src(src1).u32s()[0]);
        self.gprs[dst].set_s64(0, val as i32 as i64);
    }

    // logic

    pub fn and(&mut self, dst: usize, src0: usize, src1: usize) {
        self.gprs[dst].set_u64(0, self.gpr64(src0) & self.gpr64(src1));
    }

    pub fn or(&mut self, dst: usize, src0: usize, src1: usize) {
        self.gprs[dst].set_u64(0, self.gpr64(src0) | self.gpr64(src1));
    }

    pub fn xor(&mut self, dst: usize, src0: usize, src1: usize) {
        self.gprs[dst].set_u64(0, self.gpr64(src0) ^ self.gpr64(src1));
    }

    pub fn andi(&mut self, dst: usize, src: usize, imm: u64) {
        self.gprs[dst].set_u64(0, self.gpr64(src) & imm);
    }

    pub fn ori(&mut self, dst: usize, src: usize, imm: u64) {
        self.gprs[dst].set_u64(0, self.gpr64(src) | imm);
    }

    pub fn xori(&mut self, dst: usize, src: usize, imm: u64) {
        self.gprs[dst].set_u64(0, self.gpr64(src) ^ imm);
    }

    // compares

    pub fn slt(&mut self, dst: usize, src0: usize, src1: usize) {
        self.gprs[dst].set_u64(0, (self.sgpr64(src0) < self.sgpr64(src1)) as u64);
    }

    pub fn sltu(&mut self, dst: usize, src0: usize, src1: usize) {
        self.gprs[dst].set_u64(0, (self.gpr64(src0) < self.gpr64(src1)) as u64);
    }

    // shifts. immediate shift amounts are the instruction's 5-bit field;
    // variable amounts are masked the way the hardware masks them.

    pub fn sll(&mut self, dst: usize, src: usize, sa: u32) {
        let val = self.gpr_src(src).u32s()[0] << sa;
        self.gprs[dst].set_s64(0, val as i32 as i64);
    }

    pub fn srl(&mut self, dst: usize, src: usize, sa: u32) {
        let val = self.gpr_src(src).u32s()[0] >> sa;
        self.gprs[dst].set_s64(0, val as i32 as i64);
    }

    pub fn sra(&mut self, dst: usize, src: usize, sa: u32) {
        let val = self.gpr_src(src).s32s()[0] >> sa;
        self.gprs[dst].set_s64(0, val as i64);
    }

    pub fn dsll(&mut self, dst: usize, src: usize, sa: u32) {
        self.gprs[dst].set_u64(0, self.gpr64(src) << sa);
    }

    pub fn dsll32(&mut self, dst: usize, src: usize, sa: u32) {
        self.gprs[dst].set_u64(0, self.gpr64(src) << (32 + sa));
    }

    pub fn dsrl(&mut self, dst: usize, src: usize, sa: u32) {
        self.gprs[dst].set_u64(0, self.gpr64(src) >> sa);
    }

    pub fn dsrl32(&mut self, dst: usize, src: usize, sa: u32) {
        self.gprs[dst].set_u64(0, self.gpr64(src) >> (32 + sa));
    }

    pub fn dsra(&mut self, dst: usize, src: usize, sa: u32) {
        self.gprs[dst].set_s64(0, self.sgpr64(src) >> sa);
    }

    pub fn dsra32(&mut self, dst: usize, src: usize, sa: u32) {
        self.gprs[dst].set_s64(0, self.sgpr64(src) >> (32 + sa));
    }

    pub fn dsllv(&mut self, dst: usize, src: usize, sa_reg: usize) {
        let sa = self.gpr_addr(sa_reg) & 0x3F;
        self.gprs[dst].set_s64(0, self.sgpr64(src) << sa);
    }

    pub fn dsrav(&mut self, dst: usize, src: usize, sa_reg: usize) {
        let sa = self.gpr_addr(sa_reg) & 0x3F;
        self.gprs[dst].set_s64(0, self.sgpr64(src) >> sa);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regs::gpr::*;

    fn setup() -> (Registers, Memory) {
        (Registers::new(), Memory::new(0x1_0000))
    }

    #[test]
    fn quadword_store_load_round_trip() {
        let (mut c, mut mem) = setup();
        let pattern = Reg128::from([0x0123_4567_89AB_CDEF_u64, 0xFEDC_BA98_7654_3210]);
        c.set_gpr(A0, pattern);
        c.lui(A1, 0); // a1 = 0
        c.daddiu(A1, A1, 0x100);
        c.sq(&mut mem, A0, 0, A1);
        c.lq(&mem, V0, 0, A1);
        assert_eq!(c.gpr_src(V0), pattern);
    }

    #[test]
    fn word_load_sign_extends() {
        let (mut c, mut mem) = setup();
        mem.write_u32(0x40, 0x8000_0001);
        c.lw(&mem, V0, 0x40, R0);
        assert_eq!(c.gpr64(V0), 0xFFFF_FFFF_8000_0001);
        c.lwu(&mem, V0, 0x40, R0);
        assert_eq!(c.gpr64(V0), 0x0000_0000_8000_0001);
    }

    #[test]
    fn byte_and_half_loads_extend_per_signedness() {
        let (mut c, mut mem) = setup();
        mem.write_u8(0x10, 0x80);
        mem.write_u16(0x12, 0x8000);
        c.lb(&mem, V0, 0x10, R0);
        assert_eq!(c.sgpr64(V0), -128);
        c.lbu(&mem, V0, 0x10, R0);
        assert_eq!(c.gpr64(V0), 0x80);
        c.lh(&mem, V0, 0x12, R0);
        assert_eq!(c.sgpr64(V0), -32768);
        c.lhu(&mem, V0, 0x12, R0);
        assert_eq!(c.gpr64(V0), 0x8000);
    }

    // lwl at addr then lwr at addr+3 reconstructs the 4 bytes at addr
    #[test]
    fn unaligned_pair_reconstructs_word() {
        let (mut c, mut mem) = setup();
        mem.write_u64(0x20, 0x8877_6655_4433_2211);
        for a in 0x20..0x24u32 {
            c.set_gpr(V0, Reg128::from([0xAAAA_AAAA_AAAA_AAAA_u64, 0]));
            c.lwr(&mem, V0, a as i32, R0);
            c.lwl(&mem, V0, a as i32 + 3, R0);
            let expect = mem.read_u32(a);
            assert_eq!(c.gpr_src(V0).u32s()[0], expect, "addr ${:08X}", a);
        }
    }

    #[test]
    fn lwr_sign_extends_only_at_shift_zero() {
        let (mut c, mut mem) = setup();
        mem.write_u32(0x20, 0x8000_0000);
        // shift 0: full 64-bit sign extension
        c.set_gpr(V0, Reg128::from([0x1111_1111_1111_1111_u64, 0]));
        c.lwr(&mem, V0, 0x20, R0);
        assert_eq!(c.gpr64(V0), 0xFFFF_FFFF_8000_0000);
        // shift != 0: upper 32 bits of the destination are untouched
        c.set_gpr(V0, Reg128::from([0x1111_1111_1111_1111_u64, 0]));
        c.lwr(&mem, V0, 0x22, R0);
        assert_eq!(c.gpr64(V0) >> 32, 0x1111_1111);
    }

    #[test]
    fn unaligned_load_to_r0_still_reads_memory() {
        let (mut c, mut mem) = setup();
        mem.write_u32(0x20, 0x1234_5678);
        c.lwl(&mem, R0, 0x21, R0);
        assert_eq!(c.gpr64(R0), 0);
    }

    #[test]
    fn doubleword_pair_reconstructs() {
        let (mut c, mut mem) = setup();
        mem.write_u64(0x40, 0x1122_3344_5566_7788);
        mem.write_u64(0x48, 0x99AA_BBCC_DDEE_FF00);
        for a in 0x41..0x48u32 {
            c.set_gpr(V0, Reg128::ZERO);
            c.ldr(&mem, V0, a as i32, R0);
            c.ldl(&mem, V0, a as i32 + 7, R0);
            assert_eq!(c.gpr64(V0), mem.read_u64(a), "addr ${:08X}", a);
        }
    }

    #[test]
    fn address_wraps_as_unsigned_32() {
        let (mut c, mut mem) = setup();
        mem.write_u32(0x0C, 0xCAFE_F00D);
        c.daddiu(V1, R0, 0x10);
        c.lw(&mem, V0, -4, V1);
        assert_eq!(c.gpr_addr(V0), 0xCAFE_F00D);
    }

    #[test]
    fn addiu_truncates_and_sign_extends() {
        let mut c = Registers::new();
        c.daddiu(A0, R0, 0x7FFF_FFFF);
        c.addiu(V0, A0, 1);
        assert_eq!(c.gpr64(V0), 0xFFFF_FFFF_8000_0000);
        c.daddiu(V0, A0, 1);
        assert_eq!(c.gpr64(V0), 0x0000_0000_8000_0000);
    }

    #[test]
    fn store_of_r0_writes_zero() {
        let (c, mut mem) = setup();
        mem.write_u64(0x30, u64::MAX);
        c.sd(&mut mem, R0, 0x30, R0);
        assert_eq!(mem.read_u64(0x30), 0);
    }

    #[test]
    #[should_panic(expected = "sq: offset not quadword aligned")]
    fn sq_rejects_misaligned_offset() {
        let (c, mut mem) = setup();
        c.sq(&mut mem, A0, 4, R0);
    }

    #[test]
    fn slt_compares_signed_sltu_unsigned() {
        let mut c = Registers::new();
        c.daddiu(A0, R0, -1);
        c.daddiu(A1, R0, 1);
        c.slt(V0, A0, A1);
        assert_eq!(c.gpr64(V0), 1);
        c.sltu(V0, A0, A1);
        assert_eq!(c.gpr64(V0), 0);
    }

    #[test]
    fn shift_results_sign_extend() {
        let mut c = Registers::new();
        c.daddiu(A0, R0, 1);
        c.sll(V0, A0, 31);
        assert_eq!(c.gpr64(V0), 0xFFFF_FFFF_8000_0000);
        c.sra(V1, V0, 31);
        assert_eq!(c.sgpr64(V1), -1);
        c.dsll32(V1, A0, 0);
        assert_eq!(c.gpr64(V1), 1u64 << 32);
    }

    #[test]
    fn conditional_moves() {
        let mut c = Registers::new();
        c.daddiu(A0, R0, 7);
        c.daddiu(V0, R0, 99);
        c.movz(V0, A0, R0); // r0 == 0, move taken
        assert_eq!(c.gpr64(V0), 7);
        c.daddiu(V0, R0, 99);
        c.movn(V0, A0, R0); // r0 != 0 never holds
        assert_eq!(c.gpr64(V0), 99);
    }

    #[test]
    fn symbol_loads() {
        let (mut c, mut mem) = setup();
        mem.write_u32(0x200, 0xFFFF_FFF0);
        c.load_symbol(&mem, V0, 0x200);
        assert_eq!(c.sgpr64(V0), -16);
        c.load_symbol_addr(V1, 0x200);
        assert_eq!(c.gpr64(V1), 0x200);
        c.load_spad_addr(&mem, A0, 0x200, 0x10);
        assert_eq!(c.gpr64(A0), 0); // 0xFFFFFFF0 + 0x10 wraps
    }
}
