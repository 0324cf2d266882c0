//! Scalar floating point primitives over the 32 single-precision FPRs.
//! Square roots take the absolute value of the operand first (hardware never
//! traps on a negative), negation is a raw sign-bit flip, and float/integer
//! conversion truncates toward zero.

use crate::mem::Memory;
use crate::regs::Registers;

impl Registers {
    pub fn lwc1(&mut self, mem: &Memory, dst: usize, offset: i32, src: usize) {
        self.fprs[dst] = f32::from_bits(mem.read_u32(self.addr(src, offset)));
    }

    pub fn swc1(&self, mem: &mut Memory, src: usize, offset: i32, addr: usize) {
        mem.write_u32(self.addr(addr, offset), self.fprs[src].to_bits());
    }

    /// GPR <- FPR bit pattern, sign extended as a 32-bit value.
    pub fn mfc1(&mut self, dst: usize, src: usize) {
        self.gprs[dst].set_s64(0, self.fprs[src].to_bits() as i32 as i64);
    }

    /// FPR <- low 32 bits of a GPR, reinterpreted.
    pub fn mtc1(&mut self, dst: usize, src: usize) {
        self.fprs[dst] = f32::from_bits(self.gpr_src(src).u32s()[0]);
    }

    pub fn adds(&mut self, dst: usize, src0: usize, src1: usize) {
        self.fprs[dst] = self.fprs[src0] + self.fprs[src1];
    }

    pub fn subs(&mut self, dst: usize, src0: usize, src1: usize) {
        self.fprs[dst] = self.fprs[src0] - self.fprs[src1];
    }

    pub fn muls(&mut self, dst: usize, src0: usize, src1: usize) {
        self.fprs[dst] = self.fprs[src0] * self.fprs[src1];
    }

    // divide by zero is defined behavior, not an error
    pub fn divs(&mut self, dst: usize, src0: usize, src1: usize) {
        self.fprs[dst] = self.fprs[src0] / self.fprs[src1];
    }

    pub fn movs(&mut self, dst: usize, src: usize) {
        self.fprs[dst] = self.fprs[src];
    }

    pub fn abss(&mut self, dst: usize, src: usize) {
        self.fprs[dst] = self.fprs[src].abs();
    }

    pub fn negs(&mut self, dst: usize, src: usize) {
        self.fprs[dst] = f32::from_bits(self.fprs[src].to_bits() ^ 0x8000_0000);
    }

    pub fn sqrts(&mut self, dst: usize, src: usize) {
        self.fprs[dst] = self.fprs[src].abs().sqrt();
    }

    /// Float to word: truncate toward zero, leaving the integer bit pattern
    /// in the destination FPR.
    pub fn cvtws(&mut self, dst: usize, src: usize) {
        let val = self.fprs[src] as i32;
        self.fprs[dst] = f32::from_bits(val as u32);
    }

    /// Word to float: the source FPR holds an integer bit pattern.
    pub fn cvtsw(&mut self, dst: usize, src: usize) {
        let val = self.fprs[src].to_bits() as i32;
        self.fprs[dst] = val as f32;
    }
}
