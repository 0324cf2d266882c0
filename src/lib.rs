//! Instruction-level runtime for routines a static translation pass could not
//! lift into structured code. The translator emits one call into this crate
//! per original machine instruction, in program order, against a fresh
//! [`Registers`] per routine invocation; the externally observable effect on
//! registers and the [`Memory`] arena matches the original scalar core and
//! its attached 4-lane vector coprocessor bit for bit.
//!
//! Control flow (branches, loops) is expressed by the generated host code
//! around these calls and never appears here. The only failure mode is a
//! precondition violation (misalignment, out-of-window address), which is a
//! defect in the upstream analysis and panics with the values involved.

pub mod call;
pub mod cop1;
pub mod dma;
pub mod mem;
pub mod mmi;
pub mod regs;
pub mod scalar;
pub mod vu;

pub use call::{NativeTrampoline, Trampoline};
pub use mem::Memory;
pub use regs::{Bc, Dest, Reg128, Registers};
pub use vu::VuRng;

// Register lane views and the arena are raw little-endian byte images, same
// as the hardware being reproduced.
#[cfg(target_endian = "big")]
compile_error!("this runtime requires a little-endian host");
