use tracing::error;

/// The main memory arena: one contiguous byte buffer standing in for the
/// target's entire address space. Every address in this crate is an offset
/// into it. One arena is created at process startup and outlives all
/// [`crate::Registers`] instances; concurrent routine invocations must
/// serialize their access externally, exactly as the single address space of
/// the original machine implied.
pub struct Memory {
    bytes: Vec<u8>,
}

impl Memory {
    pub fn new(size: usize) -> Memory {
        Memory { bytes: vec![0u8; size] }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    // All accessors bounds-check and die loudly: an out-of-arena address can
    // only come from a broken translation, never from well-formed input.
    #[inline]
    fn range(&self, addr: u32, len: usize) -> std::ops::Range<usize> {
        let start = addr as usize;
        match start.checked_add(len) {
            Some(end) if end <= self.bytes.len() => start..end,
            _ => {
                error!(target: "MEM", "access out of arena addr=${:08X} len={} arena_size={}", addr, len, self.bytes.len());
                panic!("MEM: access out of arena addr=${:08X} len={} arena_size={}", addr, len, self.bytes.len());
            }
        }
    }

    #[inline]
    pub fn read_u8(&self, addr: u32) -> u8 {
        self.bytes[self.range(addr, 1)][0]
    }

    #[inline]
    pub fn read_u16(&self, addr: u32) -> u16 {
        bytemuck::pod_read_unaligned(&self.bytes[self.range(addr, 2)])
    }

    #[inline]
    pub fn read_u32(&self, addr: u32) -> u32 {
        bytemuck::pod_read_unaligned(&self.bytes[self.range(addr, 4)])
    }

    #[inline]
    pub fn read_u64(&self, addr: u32) -> u64 {
        bytemuck::pod_read_unaligned(&self.bytes[self.range(addr, 8)])
    }

    #[inline]
    pub fn read_qw(&self, addr: u32) -> [u8; 16] {
        let mut qw = [0u8; 16];
        qw.copy_from_slice(&self.bytes[self.range(addr, 16)]);
        qw
    }

    #[inline]
    pub fn write_u8(&mut self, addr: u32, value: u8) {
        let r = self.range(addr, 1);
        self.bytes[r][0] = value;
    }

    #[inline]
    pub fn write_u16(&mut self, addr: u32, value: u16) {
        let r = self.range(addr, 2);
        self.bytes[r].copy_from_slice(bytemuck::bytes_of(&value));
    }

    #[inline]
    pub fn write_u32(&mut self, addr: u32, value: u32) {
        let r = self.range(addr, 4);
        self.bytes[r].copy_from_slice(bytemuck::bytes_of(&value));
    }

    #[inline]
    pub fn write_u64(&mut self, addr: u32, value: u64) {
        let r = self.range(addr, 8);
        self.bytes[r].copy_from_slice(bytemuck::bytes_of(&value));
    }

    #[inline]
    pub fn write_qw(&mut self, addr: u32, value: [u8; 16]) {
        let r = self.range(addr, 16);
        self.bytes[r].copy_from_slice(&value);
    }

    /// Bulk copy within the arena. Overlap copies the source bytes as they
    /// were before the call.
    pub fn copy(&mut self, src: u32, dst: u32, len: usize) {
        let s = self.range(src, len);
        let d = self.range(dst, len);
        self.bytes.copy_within(s, d.start);
    }

    /// Host pointer to a code address inside the arena, for the native call
    /// bridge.
    pub fn code_ptr(&self, addr: u32) -> *const u8 {
        let r = self.range(addr, 1);
        self.bytes[r].as_ptr()
    }

    /// Base of the arena; foreign code receives this so it can perform the
    /// same relative-offset addressing.
    pub fn base_mut_ptr(&mut self) -> *mut u8 {
        self.bytes.as_mut_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_access_shares_bytes() {
        let mut mem = Memory::new(64);
        mem.write_u32(8, 0x1122_3344);
        assert_eq!(mem.read_u8(8), 0x44);
        assert_eq!(mem.read_u8(11), 0x11);
        assert_eq!(mem.read_u16(10), 0x1122);
        mem.write_u64(16, 0x0102_0304_0506_0708);
        assert_eq!(mem.read_u32(20), 0x0102_0304);
    }

    #[test]
    fn unaligned_access_is_legal() {
        let mut mem = Memory::new(32);
        mem.write_u32(1, 0xDEAD_BEEF);
        assert_eq!(mem.read_u32(1), 0xDEAD_BEEF);
    }

    #[test]
    #[should_panic(expected = "out of arena")]
    fn read_past_end_is_fatal() {
        let mem = Memory::new(16);
        mem.read_u32(14);
    }

    #[test]
    #[should_panic(expected = "out of arena")]
    fn address_overflow_is_fatal() {
        let mem = Memory::new(16);
        mem.read_u64(u32::MAX - 2);
    }

    #[test]
    fn copy_moves_whole_blocks() {
        let mut mem = Memory::new(64);
        for i in 0..16 {
            mem.write_u8(i, i as u8);
        }
        mem.copy(0, 32, 16);
        for i in 0..16u32 {
            assert_eq!(mem.read_u8(32 + i), i as u8);
        }
    }
}
