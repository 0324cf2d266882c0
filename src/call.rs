//! Native call bridge. Translated routines sometimes call back into code
//! that lives in the arena as host machine code; the bridge marshals the
//! first eight argument registers into a flat array, hands over the two
//! context registers and the arena base, and routes the native return value
//! back into the return register.
//!
//! The bridge is a capability: callers pass a [`Trampoline`] explicitly, so
//! tests can substitute a recording fake and nothing in the crate can reach
//! native code without being handed the means to.

use cfg_if::cfg_if;
use tracing::debug;

use crate::mem::Memory;
use crate::regs::{gpr, Registers};

/// Dispatches a call to a function address inside the arena.
///
/// `args` holds the eight argument-register values in order, `pp` and `st`
/// are the process-pointer and symbol-table context values, and the return
/// value lands in the caller's return register.
pub trait Trampoline {
    fn invoke(&mut self, func: u32, args: &[u64; 8], pp: u64, st: u64, mem: &mut Memory) -> u64;
}

cfg_if! {
    if #[cfg(all(unix, target_arch = "x86_64"))] {
        type RawEntry = unsafe extern "sysv64" fn(*const u64, u64, u64, u64, *mut u8) -> u64;
    } else if #[cfg(all(windows, target_arch = "x86_64"))] {
        type RawEntry = unsafe extern "win64" fn(*const u64, u64, u64, u64, *mut u8) -> u64;
    } else {
        type RawEntry = unsafe extern "C" fn(*const u64, u64, u64, u64, *mut u8) -> u64;
    }
}

/// The real bridge: treats the function address as host machine code at a
/// fixed calling convention selected at build time.
pub struct NativeTrampoline;

impl Trampoline for NativeTrampoline {
    fn invoke(&mut self, func: u32, args: &[u64; 8], pp: u64, st: u64, mem: &mut Memory) -> u64 {
        let code = mem.code_ptr(func);
        let base = mem.base_mut_ptr();
        // Safety: the caller guarantees `func` addresses a complete routine
        // of host machine code with the build-selected convention. The entry
        // receives the arena base and addresses everything relative to it,
        // so the borrow of `mem` covers every byte the callee may touch.
        unsafe {
            let entry: RawEntry = std::mem::transmute(code);
            entry(args.as_ptr(), 0, pp, st, base)
        }
    }
}

impl Registers {
    /// Calls through the bridge with the live register file: a0-a3 and t0-t3
    /// become the argument array, s6/s7 supply the context values, and the
    /// result is written to v0.
    pub fn jalr(&mut self, mem: &mut Memory, tramp: &mut dyn Trampoline, addr: u32) {
        let args = [
            self.gpr64(gpr::A0),
            self.gpr64(gpr::A1),
            self.gpr64(gpr::A2),
            self.gpr64(gpr::A3),
            self.gpr64(gpr::T0),
            self.gpr64(gpr::T1),
            self.gpr64(gpr::T2),
            self.gpr64(gpr::T3),
        ];
        let pp = self.gpr64(gpr::S6);
        let st = self.gpr64(gpr::S7);
        debug!(target: "CALL", "jalr addr=${:08X}", addr);
        let result = tramp.invoke(addr, &args, pp, st, mem);
        self.gprs[gpr::V0].set_u64(0, result);
    }
}
