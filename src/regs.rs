use std::fmt;

use bytemuck::{Pod, Zeroable};

/// One 128-bit register. The backing store is an explicit byte buffer and
/// every width/sign/float interpretation is a view of those same bytes, so a
/// write through any view is immediately visible through all of the others.
#[derive(Copy, Clone, PartialEq, Pod, Zeroable)]
#[repr(transparent)]
pub struct Reg128 {
    bytes: [u8; 16],
}

macro_rules! lane_views {
    ($(($get:ident, $set:ident, $t:ty, $n:expr)),* $(,)?) => {
        impl Reg128 {
            $(
                #[inline]
                pub fn $get(self) -> [$t; $n] {
                    bytemuck::cast(self.bytes)
                }

                #[inline]
                pub fn $set(&mut self, lane: usize, value: $t) {
                    let mut lanes: [$t; $n] = bytemuck::cast(self.bytes);
                    lanes[lane] = value;
                    self.bytes = bytemuck::cast(lanes);
                }
            )*
        }

        $(
            impl From<[$t; $n]> for Reg128 {
                #[inline]
                fn from(lanes: [$t; $n]) -> Reg128 {
                    Reg128 { bytes: bytemuck::cast(lanes) }
                }
            }
        )*
    };
}

impl Reg128 {
    pub const ZERO: Reg128 = Reg128 { bytes: [0; 16] };
}

lane_views!(
    (u8s, set_u8, u8, 16),
    (s8s, set_s8, i8, 16),
    (u16s, set_u16, u16, 8),
    (s16s, set_s16, i16, 8),
    (u32s, set_u32, u32, 4),
    (s32s, set_s32, i32, 4),
    (u64s, set_u64, u64, 2),
    (s64s, set_s64, i64, 2),
    (f32s, set_f32, f32, 4),
);

impl fmt::Debug for Reg128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.u64s();
        write!(f, "${:016X}_{:016X}", d[1], d[0])
    }
}

/// 4-bit destination write mask for vector operations; bit `i` selects float
/// lane `i` (0 = x .. 3 = w). Unselected lanes keep their prior bits exactly.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Dest(u8);

#[rustfmt::skip]
impl Dest {
    pub const NONE: Dest = Dest(0b0000);
    pub const X   : Dest = Dest(0b0001);
    pub const Y   : Dest = Dest(0b0010);
    pub const XY  : Dest = Dest(0b0011);
    pub const Z   : Dest = Dest(0b0100);
    pub const XZ  : Dest = Dest(0b0101);
    pub const YZ  : Dest = Dest(0b0110);
    pub const XYZ : Dest = Dest(0b0111);
    pub const W   : Dest = Dest(0b1000);
    pub const XW  : Dest = Dest(0b1001);
    pub const YW  : Dest = Dest(0b1010);
    pub const XYW : Dest = Dest(0b1011);
    pub const ZW  : Dest = Dest(0b1100);
    pub const XZW : Dest = Dest(0b1101);
    pub const YZW : Dest = Dest(0b1110);
    pub const XYZW: Dest = Dest(0b1111);

    #[inline]
    pub fn writes(self, lane: usize) -> bool {
        (self.0 >> lane) & 1 != 0
    }
}

/// Broadcast lane selector: which lane of an operand is applied uniformly
/// across every active destination lane.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Bc {
    X = 0,
    Y = 1,
    Z = 2,
    W = 3,
}

impl Bc {
    #[inline]
    pub fn lane(self) -> usize {
        self as usize
    }
}

/// GPR index names under the target ABI the translated code follows.
#[rustfmt::skip]
pub mod gpr {
    pub const R0: usize = 0;  // hardwired zero
    pub const AT: usize = 1;
    pub const V0: usize = 2;  // return value
    pub const V1: usize = 3;
    pub const A0: usize = 4;  // args 0..7 live in a0-a3, t0-t3
    pub const A1: usize = 5;
    pub const A2: usize = 6;
    pub const A3: usize = 7;
    pub const T0: usize = 8;
    pub const T1: usize = 9;
    pub const T2: usize = 10;
    pub const T3: usize = 11;
    pub const T4: usize = 12;
    pub const T5: usize = 13;
    pub const T6: usize = 14;
    pub const T7: usize = 15;
    pub const S0: usize = 16;
    pub const S1: usize = 17;
    pub const S2: usize = 18;
    pub const S3: usize = 19;
    pub const S4: usize = 20;
    pub const S5: usize = 21;
    pub const S6: usize = 22; // process pointer
    pub const S7: usize = 23; // symbol table
    pub const T8: usize = 24;
    pub const T9: usize = 25; // function pointer
    pub const K0: usize = 26;
    pub const K1: usize = 27;
    pub const GP: usize = 28;
    pub const SP: usize = 29;
    pub const FP: usize = 30;
    pub const RA: usize = 31;
}

// reading vector register 0 always yields (0, 0, 0, 1.0)
const VF0_READ: Reg128 = Reg128 {
    bytes: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x00, 0x00, 0x80, 0x3F],
};

/// Per-invocation architectural state of the scalar core and its vector
/// coprocessor. Created fresh for each routine invocation, mutated only
/// through the primitive calls, discarded at return. No locking: each
/// instance is exclusively owned by its calling thread.
pub struct Registers {
    pub(crate) gprs: [Reg128; 32],
    pub(crate) fprs: [f32; 32],
    pub(crate) vfs: [Reg128; 32],
    pub(crate) acc: Reg128,
    /// division/square-root pipeline result
    pub(crate) q: f32,
    /// immediate pipeline value consumed by the I-form vector ops
    pub(crate) i: f32,
    // 128-bit multiply-result pair
    pub(crate) hi: Reg128,
    pub(crate) lo: Reg128,
}

// the register file is copied around by generated code; keep it small
const _: () = assert!(std::mem::size_of::<Registers>() <= 1280);

impl Registers {
    pub fn new() -> Registers {
        Registers {
            gprs: [Reg128::ZERO; 32],
            fprs: [0f32; 32],
            vfs: [Reg128::ZERO; 32],
            acc: Reg128::ZERO,
            q: 0.0,
            i: 0.0,
            hi: Reg128::ZERO,
            lo: Reg128::ZERO,
        }
    }

    /// Source read of a general register. Register 0 always reads as zero no
    /// matter what was stored there.
    #[inline]
    pub fn gpr_src(&self, idx: usize) -> Reg128 {
        if idx == 0 {
            Reg128::ZERO
        } else {
            self.gprs[idx]
        }
    }

    /// Source read of a vector register. Register 0 always reads as
    /// (0, 0, 0, 1) no matter what was stored there.
    #[inline]
    pub fn vf_src(&self, idx: usize) -> Reg128 {
        if idx == 0 {
            VF0_READ
        } else {
            self.vfs[idx]
        }
    }

    /// Low 64 bits of a general register, unsigned.
    #[inline]
    pub fn gpr64(&self, idx: usize) -> u64 {
        self.gpr_src(idx).u64s()[0]
    }

    /// Low 64 bits of a general register, signed, for arithmetic convenience.
    #[inline]
    pub fn sgpr64(&self, idx: usize) -> i64 {
        self.gpr_src(idx).s64s()[0]
    }

    /// Low 32 bits of a general register, as an arena address.
    #[inline]
    pub fn gpr_addr(&self, idx: usize) -> u32 {
        self.gpr_src(idx).u32s()[0]
    }

    pub fn set_gpr(&mut self, idx: usize, value: Reg128) {
        self.gprs[idx] = value;
    }

    pub fn set_vf(&mut self, idx: usize, value: Reg128) {
        self.vfs[idx] = value;
    }

    pub fn fpr(&self, idx: usize) -> f32 {
        self.fprs[idx]
    }

    pub fn set_fpr(&mut self, idx: usize, value: f32) {
        self.fprs[idx] = value;
    }

    pub fn acc(&self) -> Reg128 {
        self.acc
    }

    pub fn set_acc(&mut self, value: Reg128) {
        self.acc = value;
    }

    pub fn q(&self) -> f32 {
        self.q
    }

    pub fn set_q(&mut self, value: f32) {
        self.q = value;
    }

    pub fn hi(&self) -> Reg128 {
        self.hi
    }

    pub fn lo(&self) -> Reg128 {
        self.lo
    }

    /// Replicates another register file's entire vector bank into this one,
    /// used to snapshot vector state across nested invocations.
    pub fn copy_vfs_from(&mut self, other: &Registers) {
        self.vfs = other.vfs;
    }
}

impl Default for Registers {
    fn default() -> Registers {
        Registers::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpr0_reads_zero_after_write() {
        let mut c = Registers::new();
        c.set_gpr(0, Reg128::from([u64::MAX, u64::MAX]));
        assert_eq!(c.gpr_src(0), Reg128::ZERO);
        assert_eq!(c.gpr64(0), 0);
        assert_eq!(c.sgpr64(0), 0);
    }

    #[test]
    fn vf0_reads_unit_w_after_write() {
        let mut c = Registers::new();
        c.set_vf(0, Reg128::from([5.0f32, 6.0, 7.0, 8.0]));
        assert_eq!(c.vf_src(0).f32s(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn lane_views_share_backing_bytes() {
        let mut r = Reg128::ZERO;
        r.set_f32(1, 1.0);
        assert_eq!(r.u32s()[1], 0x3F80_0000);
        r.set_u64(1, 0x1122_3344_5566_7788);
        assert_eq!(r.u16s()[4], 0x7788);
        assert_eq!(r.u8s()[15], 0x11);
        assert_eq!(r.s32s()[0], 0);
    }

    #[test]
    fn copy_vfs_snapshots_whole_bank() {
        let mut a = Registers::new();
        let mut b = Registers::new();
        for i in 1..32 {
            a.set_vf(i, Reg128::from([i as u32, 0, 0, 0]));
        }
        b.copy_vfs_from(&a);
        for i in 1..32 {
            assert_eq!(b.vf_src(i), a.vf_src(i));
        }
    }
}
