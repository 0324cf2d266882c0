//! Scratchpad transfer bridge. The scratchpad is a fixed 16 KiB window that
//! lives inside the arena; its base address is published through a symbol
//! cell, and every transfer moves whole quadwords between the window and
//! main memory in one shot.
//!
//! A transfer either happens completely or panics before touching a byte:
//! misalignment or a span outside the window is a translation bug, never a
//! runtime condition to recover from.

use tracing::debug;

use crate::mem::Memory;

/// Size of the scratchpad window in bytes.
pub const SPAD_SIZE: u32 = 0x4000;

fn check_transfer(madr: u32, sadr: u32, qwc: u32) {
    if madr & 0xF != 0 {
        panic!("DMA: madr not quadword aligned madr=${:08X}", madr);
    }
    if sadr & 0xF != 0 {
        panic!("DMA: sadr not quadword aligned sadr=${:08X}", sadr);
    }
    if sadr >= SPAD_SIZE {
        panic!("DMA: sadr outside scratchpad sadr=${:08X}", sadr);
    }
    if sadr as u64 + 16 * qwc as u64 > SPAD_SIZE as u64 {
        panic!(
            "DMA: transfer overruns scratchpad sadr=${:08X} qwc={}",
            sadr, qwc
        );
    }
    if qwc > SPAD_SIZE {
        panic!("DMA: quadword count out of range qwc={}", qwc);
    }
}

#[inline]
fn spad_base(mem: &Memory, spad_sym: u32) -> u32 {
    mem.read_u32(spad_sym)
}

/// Main memory to scratchpad; `sadr` is an absolute address inside the
/// window, so the published base is subtracted first.
pub fn spad_to_dma(mem: &mut Memory, spad_sym: u32, madr: u32, sadr: u32, qwc: u32) {
    let base = spad_base(mem, spad_sym);
    let sadr = sadr.wrapping_sub(base);
    check_transfer(madr, sadr, qwc);
    debug!(target: "DMA", "to spad madr=${:08X} sadr=${:04X} qwc={}", madr, sadr, qwc);
    mem.copy(madr, base + sadr, qwc as usize * 16);
}

/// Main memory to scratchpad; `sadr` is already an offset into the window.
pub fn spad_to_dma_no_sadr_off(mem: &mut Memory, spad_sym: u32, madr: u32, sadr: u32, qwc: u32) {
    let base = spad_base(mem, spad_sym);
    check_transfer(madr, sadr, qwc);
    debug!(target: "DMA", "to spad madr=${:08X} sadr=${:04X} qwc={}", madr, sadr, qwc);
    mem.copy(madr, base + sadr, qwc as usize * 16);
}

/// Scratchpad to main memory, absolute `sadr`.
pub fn spad_from_dma(mem: &mut Memory, spad_sym: u32, madr: u32, sadr: u32, qwc: u32) {
    let base = spad_base(mem, spad_sym);
    let sadr = sadr.wrapping_sub(base);
    check_transfer(madr, sadr, qwc);
    debug!(target: "DMA", "from spad madr=${:08X} sadr=${:04X} qwc={}", madr, sadr, qwc);
    mem.copy(base + sadr, madr, qwc as usize * 16);
}

/// Scratchpad to main memory, window-offset `sadr`.
pub fn spad_from_dma_no_sadr_off(mem: &mut Memory, spad_sym: u32, madr: u32, sadr: u32, qwc: u32) {
    let base = spad_base(mem, spad_sym);
    check_transfer(madr, sadr, qwc);
    debug!(target: "DMA", "from spad madr=${:08X} sadr=${:04X} qwc={}", madr, sadr, qwc);
    mem.copy(base + sadr, madr, qwc as usize * 16);
}

/// Interleaved main-memory to scratchpad transfer: copy 4 quadwords, then
/// skip the 5th in the source. `qwc` counts the quadwords actually copied
/// and must be a multiple of 4.
pub fn spad_to_dma_no_sadr_off_interleave(
    mem: &mut Memory,
    spad_sym: u32,
    madr: u32,
    sadr: u32,
    qwc: u32,
) {
    let base = spad_base(mem, spad_sym);
    check_transfer(madr, sadr, qwc);
    if qwc & 3 != 0 {
        panic!("DMA: interleave quadword count not a multiple of 4 qwc={}", qwc);
    }
    debug!(target: "DMA", "to spad interleaved madr=${:08X} sadr=${:04X} qwc={}", madr, sadr, qwc);
    let mut src = madr;
    let mut dst = base + sadr;
    let mut left = qwc;
    while left > 0 {
        mem.copy(src, dst, 4 * 16);
        dst += 4 * 16;
        src += 5 * 16;
        left -= 4;
    }
}
