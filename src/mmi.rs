//! Parallel multimedia integer primitives over the 128-bit GPR lanes: the
//! fixed interleave/pack permutations, packed arithmetic and compares,
//! uniform packed shifts, leading-zero counts, and the 16-bit multiply
//! chain through the hi/lo pair.
//!
//! Every permutation here is a fixed table from the instruction set, not a
//! design choice; the tests pin them lane by lane.

use num_traits::{WrappingAdd, WrappingSub};

use crate::regs::{Reg128, Registers};

#[inline]
fn packed_add<T, const N: usize>(s: [T; N], t: [T; N]) -> [T; N]
where
    T: WrappingAdd + Copy + Default,
{
    let mut out = [T::default(); N];
    for i in 0..N {
        out[i] = s[i].wrapping_add(&t[i]);
    }
    out
}

#[inline]
fn packed_sub<T, const N: usize>(s: [T; N], t: [T; N]) -> [T; N]
where
    T: WrappingSub + Copy + Default,
{
    let mut out = [T::default(); N];
    for i in 0..N {
        out[i] = s[i].wrapping_sub(&t[i]);
    }
    out
}

// counts leading zeros of the sign-folded value: negative inputs are
// one's-complemented first, an all-zero/all-one lane counts as 32
#[inline]
fn lzocw(v: i32) -> u32 {
    let v = if v < 0 { !v } else { v };
    if v == 0 {
        32
    } else {
        v.leading_zeros()
    }
}

impl Registers {
    // interleave low/high halves, alternating source order

    pub fn pextlb(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).u8s();
        let t = self.gpr_src(src1).u8s();
        let mut out = [0u8; 16];
        for i in 0..8 {
            out[2 * i] = t[i];
            out[2 * i + 1] = s[i];
        }
        self.gprs[dst] = Reg128::from(out);
    }

    pub fn pextub(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).u8s();
        let t = self.gpr_src(src1).u8s();
        let mut out = [0u8; 16];
        for i in 0..8 {
            out[2 * i] = t[i + 8];
            out[2 * i + 1] = s[i + 8];
        }
        self.gprs[dst] = Reg128::from(out);
    }

    pub fn pextlh(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).u16s();
        let t = self.gpr_src(src1).u16s();
        let mut out = [0u16; 8];
        for i in 0..4 {
            out[2 * i] = t[i];
            out[2 * i + 1] = s[i];
        }
        self.gprs[dst] = Reg128::from(out);
    }

    pub fn pextuh(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).u16s();
        let t = self.gpr_src(src1).u16s();
        let mut out = [0u16; 8];
        for i in 0..4 {
            out[2 * i] = t[i + 4];
            out[2 * i + 1] = s[i + 4];
        }
        self.gprs[dst] = Reg128::from(out);
    }

    pub fn pextlw(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).u32s();
        let t = self.gpr_src(src1).u32s();
        self.gprs[dst] = Reg128::from([t[0], s[0], t[1], s[1]]);
    }

    pub fn pextuw(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).u32s();
        let t = self.gpr_src(src1).u32s();
        self.gprs[dst] = Reg128::from([t[2], s[2], t[3], s[3]]);
    }

    /// Interleaves the even halfwords of both sources.
    pub fn pinteh(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).u16s();
        let t = self.gpr_src(src1).u16s();
        let mut out = [0u16; 8];
        for i in 0..4 {
            out[2 * i] = t[2 * i];
            out[2 * i + 1] = s[2 * i];
        }
        self.gprs[dst] = Reg128::from(out);
    }

    // doubleword/halfword copies and rotations

    pub fn pcpyld(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).u64s();
        let t = self.gpr_src(src1).u64s();
        self.gprs[dst] = Reg128::from([t[0], s[0]]);
    }

    pub fn pcpyud(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).u64s();
        let t = self.gpr_src(src1).u64s();
        self.gprs[dst] = Reg128::from([s[1], t[1]]);
    }

    /// Splats halfword 0 across the low doubleword and halfword 4 across the
    /// high doubleword.
    pub fn pcpyh(&mut self, dst: usize, src: usize) {
        let s = self.gpr_src(src).u16s();
        self.gprs[dst] = Reg128::from([s[0], s[0], s[0], s[0], s[4], s[4], s[4], s[4]]);
    }

    /// Exchanges the x and z words.
    pub fn pexew(&mut self, dst: usize, src: usize) {
        let s = self.gpr_src(src).u32s();
        self.gprs[dst] = Reg128::from([s[2], s[1], s[0], s[3]]);
    }

    /// Rotates the low three words left by one.
    pub fn prot3w(&mut self, dst: usize, src: usize) {
        let s = self.gpr_src(src).u32s();
        self.gprs[dst] = Reg128::from([s[1], s[2], s[0], s[3]]);
    }

    // pack: keep the even-indexed lanes of each source

    pub fn ppacb(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).u8s();
        let t = self.gpr_src(src1).u8s();
        let mut out = [0u8; 16];
        for i in 0..8 {
            out[i] = t[2 * i];
            out[i + 8] = s[2 * i];
        }
        self.gprs[dst] = Reg128::from(out);
    }

    pub fn ppach(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).u16s();
        let t = self.gpr_src(src1).u16s();
        let mut out = [0u16; 8];
        for i in 0..4 {
            out[i] = t[2 * i];
            out[i + 4] = s[2 * i];
        }
        self.gprs[dst] = Reg128::from(out);
    }

    // packed arithmetic: two's complement wraparound, no saturation here

    pub fn paddw(&mut self, dst: usize, src0: usize, src1: usize) {
        let out = packed_add(self.gpr_src(src0).u32s(), self.gpr_src(src1).u32s());
        self.gprs[dst] = Reg128::from(out);
    }

    pub fn paddh(&mut self, dst: usize, src0: usize, src1: usize) {
        let out = packed_add(self.gpr_src(src0).u16s(), self.gpr_src(src1).u16s());
        self.gprs[dst] = Reg128::from(out);
    }

    pub fn psubw(&mut self, dst: usize, src0: usize, src1: usize) {
        let out = packed_sub(self.gpr_src(src0).u32s(), self.gpr_src(src1).u32s());
        self.gprs[dst] = Reg128::from(out);
    }

    pub fn psubh(&mut self, dst: usize, src0: usize, src1: usize) {
        let out = packed_sub(self.gpr_src(src0).u16s(), self.gpr_src(src1).u16s());
        self.gprs[dst] = Reg128::from(out);
    }

    // packed compares: all-ones/all-zero result masks

    pub fn pcgtw(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).s32s();
        let t = self.gpr_src(src1).s32s();
        let mut out = [0u32; 4];
        for i in 0..4 {
            out[i] = if s[i] > t[i] { 0xFFFF_FFFF } else { 0 };
        }
        self.gprs[dst] = Reg128::from(out);
    }

    pub fn pceqb(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).u8s();
        let t = self.gpr_src(src1).u8s();
        let mut out = [0u8; 16];
        for i in 0..16 {
            out[i] = if s[i] == t[i] { 0xFF } else { 0 };
        }
        self.gprs[dst] = Reg128::from(out);
    }

    // packed min/max

    pub fn pminh(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).s16s();
        let t = self.gpr_src(src1).s16s();
        let mut out = [0i16; 8];
        for i in 0..8 {
            out[i] = s[i].min(t[i]);
        }
        self.gprs[dst] = Reg128::from(out);
    }

    pub fn pmaxh(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).s16s();
        let t = self.gpr_src(src1).s16s();
        let mut out = [0i16; 8];
        for i in 0..8 {
            out[i] = s[i].max(t[i]);
        }
        self.gprs[dst] = Reg128::from(out);
    }

    pub fn pminw(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).s32s();
        let t = self.gpr_src(src1).s32s();
        let mut out = [0i32; 4];
        for i in 0..4 {
            out[i] = s[i].min(t[i]);
        }
        self.gprs[dst] = Reg128::from(out);
    }

    pub fn pmaxw(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).s32s();
        let t = self.gpr_src(src1).s32s();
        let mut out = [0i32; 4];
        for i in 0..4 {
            out[i] = s[i].max(t[i]);
        }
        self.gprs[dst] = Reg128::from(out);
    }

    // packed logic over the full width

    pub fn pand(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).u64s();
        let t = self.gpr_src(src1).u64s();
        self.gprs[dst] = Reg128::from([s[0] & t[0], s[1] & t[1]]);
    }

    pub fn por(&mut self, dst: usize, src0: usize, src1: usize) {
        let s = self.gpr_src(src0).u64s();
        let t = self.gpr_src(src1).u64s();
        self.gprs[dst] = Reg128::from([s[0] | t[0], s[1] | t[1]]);
    }

    // uniform packed shifts; the amount is masked to the lane width

    pub fn psllw(&mut self, dst: usize, src: usize, sa: u32) {
        let s = self.gpr_src(src).s32s();
        let mut out = [0i32; 4];
        for i in 0..4 {
            out[i] = s[i] << (sa & 0x1F);
        }
        self.gprs[dst] = Reg128::from(out);
    }

    pub fn psraw(&mut self, dst: usize, src: usize, sa: u32) {
        let s = self.gpr_src(src).s32s();
        let mut out = [0i32; 4];
        for i in 0..4 {
            out[i] = s[i] >> (sa & 0x1F);
        }
        self.gprs[dst] = Reg128::from(out);
    }

    pub fn psrah(&mut self, dst: usize, src: usize, sa: u32) {
        let s = self.gpr_src(src).s16s();
        let mut out = [0i16; 8];
        for i in 0..8 {
            out[i] = s[i] >> (sa & 0xF);
        }
        self.gprs[dst] = Reg128::from(out);
    }

    pub fn psrlh(&mut self, dst: usize, src: usize, sa: u32) {
        let s = self.gpr_src(src).u16s();
        let mut out = [0u16; 8];
        for i in 0..8 {
            out[i] = s[i] >> (sa & 0xF);
        }
        self.gprs[dst] = Reg128::from(out);
    }

    /// Per-word leading-zero (or leading-one, for negatives) count over the
    /// low two words, biased by minus one.
    pub fn plzcw(&mut self, dst: usize, src: usize) {
        let s = self.gpr_src(src).s32s();
        self.gprs[dst].set_u32(0, lzocw(s[0]) - 1);
        self.gprs[dst].set_u32(1, lzocw(s[1]) - 1);
    }

    // 16-bit multiply chain through hi/lo. products land in the pair
    // unconditionally; the destination register only sees the even products
    // and only when its index is non-zero.

    pub fn pmulth(&mut self, rd: usize, rs: usize, rt: usize) {
        let s = self.gpr_src(rs).s16s();
        let t = self.gpr_src(rt).s16s();
        let mut p = [0i32; 8];
        for i in 0..8 {
            p[i] = (s[i] as i32).wrapping_mul(t[i] as i32);
        }
        self.lo = Reg128::from([p[0], p[1], p[4], p[5]]);
        self.hi = Reg128::from([p[2], p[3], p[6], p[7]]);
        if rd != 0 {
            self.gprs[rd] = Reg128::from([p[0], p[2], p[4], p[6]]);
        }
    }

    pub fn pmaddh(&mut self, rd: usize, rs: usize, rt: usize) {
        let s = self.gpr_src(rs).s16s();
        let t = self.gpr_src(rt).s16s();
        let lo = self.lo.u32s();
        let hi = self.hi.u32s();
        let mut p = [0u32; 8];
        for i in 0..8 {
            p[i] = (s[i] as i32).wrapping_mul(t[i] as i32) as u32;
        }
        let l = [
            lo[0].wrapping_add(p[0]),
            lo[1].wrapping_add(p[1]),
            lo[2].wrapping_add(p[4]),
            lo[3].wrapping_add(p[5]),
        ];
        let h = [
            hi[0].wrapping_add(p[2]),
            hi[1].wrapping_add(p[3]),
            hi[2].wrapping_add(p[6]),
            hi[3].wrapping_add(p[7]),
        ];
        self.lo = Reg128::from(l);
        self.hi = Reg128::from(h);
        if rd != 0 {
            self.gprs[rd] = Reg128::from([l[0], h[0], l[2], h[2]]);
        }
    }

    /// Gathers the even halfwords of the lo/hi pair into one register.
    pub fn pmfhl_lh(&mut self, dst: usize) {
        let lo = self.lo.u16s();
        let hi = self.hi.u16s();
        self.gprs[dst] = Reg128::from([lo[0], lo[2], hi[0], hi[2], lo[4], lo[6], hi[4], hi[6]]);
    }
}
