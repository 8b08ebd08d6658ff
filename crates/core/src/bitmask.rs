//! Positional bitmask decoding against ordered name tables.
//!
//! The engine reports many sets (allowed races, glyph flags, active
//! conditions) as bitmasks whose symbolic names live in ordered tables.

/// Returns the items whose mask intersects `value`, in table order.
///
/// A table entry with mask 0 can never match, so sentinel rows are inert.
pub fn decode_bitmask<T: Clone>(value: u32, table: &[(u32, T)]) -> Vec<T> {
    table
        .iter()
        .filter(|(mask, _)| value & mask != 0)
        .map(|(_, item)| item.clone())
        .collect()
}

/// Exact-match lookup of a single mask value (self-mask → identifier).
pub fn lookup_mask<'a, T>(table: &'a [(u32, T)], mask: u32) -> Option<&'a T> {
    table
        .iter()
        .find(|(entry, _)| *entry == mask)
        .map(|(_, item)| item)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[(u32, &str)] = &[(0x1, "human"), (0x2, "elf"), (0x4, "dwarf"), (0x8, "gnome")];

    #[test]
    fn returns_matches_in_table_order() {
        assert_eq!(decode_bitmask(0x5, TABLE), vec!["human", "dwarf"]);
        assert_eq!(decode_bitmask(0xf, TABLE), vec!["human", "elf", "dwarf", "gnome"]);
    }

    #[test]
    fn zero_mask_decodes_to_nothing() {
        assert!(decode_bitmask(0, TABLE).is_empty());
    }

    #[test]
    fn unknown_bits_are_ignored() {
        assert_eq!(decode_bitmask(0x12, TABLE), vec!["elf"]);
    }

    #[test]
    fn exact_lookup_finds_self_mask() {
        assert_eq!(lookup_mask(TABLE, 0x4), Some(&"dwarf"));
        assert_eq!(lookup_mask(TABLE, 0x40), None);
    }
}
