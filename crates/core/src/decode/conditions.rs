//! Static condition table decoding.
//!
//! Unlike the player catalogs this table has a fixed, engine-reported record
//! count rather than a sentinel terminator. Records are joined against the
//! status bitmask at update time (see `status`).

use crate::decode::read_str_field;
use crate::memory::EngineMemory;

pub const CONDITION_STRIDE: u32 = 24;
const CONDITION_MASK_OFFSET: u32 = 4;
const CONDITION_TEXT_OFFSET: u32 = 12;

/// Substituted when a condition record lacks one of its display strings.
const MISSING_TEXT: &str = "-";

/// One row of the engine's condition table: ranking, identity mask, and the
/// long/medium/short display forms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConditionRecord {
    pub ranking: i32,
    pub mask: u32,
    pub text: [String; 3],
}

pub fn read_conditions<M: EngineMemory + ?Sized>(
    mem: &M,
    base: u32,
    count: u32,
) -> Vec<ConditionRecord> {
    (0..count)
        .map(|index| {
            let addr = base + index * CONDITION_STRIDE;
            let text_at = |slot: u32| {
                read_str_field(mem, addr + CONDITION_TEXT_OFFSET + slot * 4)
                    .unwrap_or_else(|| MISSING_TEXT.to_owned())
            };
            ConditionRecord {
                ranking: mem.read_i32(addr),
                mask: mem.read_i32(addr + CONDITION_MASK_OFFSET) as u32,
                text: [text_at(0), text_at(1), text_at(2)],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::VecMemory;

    #[test]
    fn reads_fixed_count_with_text_defaults() {
        let mut mem = VecMemory::with_size((CONDITION_STRIDE * 2) as usize);
        let long = mem.push_cstr("Stoned");
        let short = mem.push_cstr("Ston");
        mem.write_i32(0, 3);
        mem.write_i32(4, 0x0010_0000);
        mem.write_i32(12, long as i32);
        // medium form missing: pointer stays null
        mem.write_i32(20, short as i32);

        mem.write_i32(24, 7);
        mem.write_i32(28, 0x2);

        let table = read_conditions(&mem, 0, 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].ranking, 3);
        assert_eq!(table[0].mask, 0x0010_0000);
        assert_eq!(table[0].text, ["Stoned".to_owned(), "-".into(), "Ston".into()]);
        assert_eq!(table[1].text, ["-".to_owned(), "-".into(), "-".into()]);
    }
}
