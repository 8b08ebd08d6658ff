//! Fixed-layout binary record decoding.
//!
//! Record strides and field offsets are part of the wire contract with the
//! engine and are kept as named constants next to each reader. Every
//! variable-length table ends at the first record whose name pointer is
//! null (or whose self-mask is zero, where noted).

use crate::memory::EngineMemory;

pub mod commands;
pub mod conditions;
pub mod glyph;
pub mod player;

pub use commands::{read_commands, EXTCMD_SCAN_LIMIT, EXTCMD_STRIDE};
pub use conditions::{read_conditions, ConditionRecord, CONDITION_STRIDE};
pub use glyph::read_glyph_info;
pub use player::{
    read_alignments, read_genders, read_races, read_roles, Alignment, Gender, MaskTables, Race,
    Role,
};

/// Reads a string field holding a pointer to NUL-terminated text.
///
/// Returns `None` when the pointer itself is null, which doubles as the
/// table-termination sentinel for all variable-length record tables.
pub fn read_str_field<M: EngineMemory + ?Sized>(mem: &M, addr: u32) -> Option<String> {
    match mem.read_ptr(addr) {
        0 => None,
        target => Some(mem.read_cstr(target)),
    }
}

/// Walks a variable-length record table with a fixed stride, stopping at the
/// first record the reader rejects.
pub fn read_table<M, T>(
    mem: &M,
    base: u32,
    stride: u32,
    reader: impl Fn(&M, u32) -> Option<T>,
) -> Vec<T>
where
    M: EngineMemory + ?Sized,
{
    let mut records = Vec::new();
    let mut cursor = base;
    while let Some(record) = reader(mem, cursor) {
        records.push(record);
        cursor += stride;
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::VecMemory;

    #[test]
    fn null_pointer_reads_as_absent() {
        let mut mem = VecMemory::with_size(8);
        assert_eq!(read_str_field(&mem, 0), None);

        let text = mem.push_cstr("Archeologist");
        mem.write_i32(0, text as i32);
        assert_eq!(read_str_field(&mem, 0).as_deref(), Some("Archeologist"));
    }

    #[test]
    fn table_walk_stops_at_first_rejected_record() {
        // Three 4-byte records holding 7, 9, 0; zero terminates.
        let mut mem = VecMemory::with_size(12);
        mem.write_i32(0, 7);
        mem.write_i32(4, 9);
        let values = read_table(&mem, 0, 4, |m, addr| match m.read_i32(addr) {
            0 => None,
            v => Some(v),
        });
        assert_eq!(values, vec![7, 9]);
    }
}
