//! Abstract access to the engine's linear memory.
//!
//! The engine runs with flat little-endian memory and hands the bridge raw
//! addresses. Decoders operate over this capability instead of an ambient
//! heap so they can be exercised against fixture buffers in tests.
//!
//! Out-of-range access is a programming error, not a recoverable condition:
//! the engine is trusted and the decoder is not a hardening boundary.

/// Little-endian view of the engine's linear memory.
///
/// Only byte access and allocation are required; the wider reads and the
/// string helpers are derived.
pub trait EngineMemory {
    fn read_u8(&self, addr: u32) -> u8;

    fn write_u8(&mut self, addr: u32, value: u8);

    /// Reserves `size` fresh bytes on the engine heap and returns their
    /// address. Used to marshal variable-length results back to the engine.
    fn alloc(&mut self, size: u32) -> u32;

    fn read_i8(&self, addr: u32) -> i8 {
        self.read_u8(addr) as i8
    }

    fn read_i16(&self, addr: u32) -> i16 {
        i16::from_le_bytes([self.read_u8(addr), self.read_u8(addr + 1)])
    }

    fn read_i32(&self, addr: u32) -> i32 {
        i32::from_le_bytes([
            self.read_u8(addr),
            self.read_u8(addr + 1),
            self.read_u8(addr + 2),
            self.read_u8(addr + 3),
        ])
    }

    /// Reads a pointer-sized field (32-bit addresses on the engine side).
    fn read_ptr(&self, addr: u32) -> u32 {
        self.read_i32(addr) as u32
    }

    /// Reads a NUL-terminated string starting at `addr`.
    fn read_cstr(&self, addr: u32) -> String {
        let mut bytes = Vec::new();
        let mut cursor = addr;
        loop {
            let byte = self.read_u8(cursor);
            if byte == 0 {
                break;
            }
            bytes.push(byte);
            cursor += 1;
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn write_i16(&mut self, addr: u32, value: i16) {
        let bytes = value.to_le_bytes();
        self.write_u8(addr, bytes[0]);
        self.write_u8(addr + 1, bytes[1]);
    }

    fn write_i32(&mut self, addr: u32, value: i32) {
        for (offset, byte) in value.to_le_bytes().into_iter().enumerate() {
            self.write_u8(addr + offset as u32, byte);
        }
    }

    /// Writes `text` into a fixed-capacity caller-supplied buffer, truncating
    /// if needed. The buffer always ends up NUL-terminated.
    fn write_cstr(&mut self, addr: u32, text: &str, capacity: u32) {
        assert!(capacity > 0, "cannot write a string into a zero-byte buffer");
        let budget = (capacity - 1) as usize;
        let mut written = 0u32;
        for byte in text.bytes().take(budget) {
            self.write_u8(addr + written, byte);
            written += 1;
        }
        self.write_u8(addr + written, 0);
    }
}

/// Growable in-memory implementation backed by a `Vec<u8>`.
///
/// Serves decoder tests and embedders that mirror the engine heap into a
/// plain buffer. Allocation is a bump pointer at the end of the buffer.
#[derive(Clone, Debug, Default)]
pub struct VecMemory {
    bytes: Vec<u8>,
}

impl VecMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Appends a NUL-terminated string to the buffer and returns its address.
    /// Fixture helper for decoder tests.
    pub fn push_cstr(&mut self, text: &str) -> u32 {
        let addr = self.bytes.len() as u32;
        self.bytes.extend_from_slice(text.as_bytes());
        self.bytes.push(0);
        addr
    }

    /// Appends raw bytes and returns their address.
    pub fn push_bytes(&mut self, data: &[u8]) -> u32 {
        let addr = self.bytes.len() as u32;
        self.bytes.extend_from_slice(data);
        addr
    }
}

impl EngineMemory for VecMemory {
    fn read_u8(&self, addr: u32) -> u8 {
        self.bytes[addr as usize]
    }

    fn write_u8(&mut self, addr: u32, value: u8) {
        self.bytes[addr as usize] = value;
    }

    fn alloc(&mut self, size: u32) -> u32 {
        let addr = self.bytes.len() as u32;
        self.bytes.resize(self.bytes.len() + size as usize, 0);
        addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn little_endian_reads_compose_from_bytes() {
        let mem = VecMemory::from_bytes(vec![0x78, 0x56, 0x34, 0x12]);
        assert_eq!(mem.read_i16(0), 0x5678);
        assert_eq!(mem.read_i32(0), 0x1234_5678);
        assert_eq!(mem.read_ptr(0), 0x1234_5678);
    }

    #[test]
    fn cstr_roundtrip_respects_capacity() {
        let mut mem = VecMemory::with_size(8);
        mem.write_cstr(0, "abcdefghij", 5);
        assert_eq!(mem.read_cstr(0), "abcd");
        assert_eq!(mem.read_u8(4), 0);
    }

    #[test]
    fn alloc_appends_zeroed_region() {
        let mut mem = VecMemory::with_size(4);
        let addr = mem.alloc(8);
        assert_eq!(addr, 4);
        assert_eq!(mem.len(), 12);
        assert_eq!(mem.read_i32(4), 0);
    }

    #[test]
    fn push_cstr_returns_readable_address() {
        let mut mem = VecMemory::new();
        let addr = mem.push_cstr("Valkyrie");
        assert_eq!(mem.read_cstr(addr), "Valkyrie");
    }
}
