//! Status board: the field-value table plus the active-condition list.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use crate::decode::ConditionRecord;
use crate::display::{Color, CondAttr, HlAttr};
use crate::memory::EngineMemory;

/// Status field identifiers as the engine numbers them. `Flush` and `Reset`
/// are sentinels: they carry no value and only drive the display flag.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::FromRepr,
)]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
pub enum StatusField {
    Reset = -2,
    Flush = -1,
    Title = 0,
    Str = 1,
    Dx = 2,
    Co = 3,
    In = 4,
    Wi = 5,
    Ch = 6,
    Align = 7,
    Score = 8,
    Cap = 9,
    Gold = 10,
    Ene = 11,
    EneMax = 12,
    Xp = 13,
    Ac = 14,
    Hd = 15,
    Time = 16,
    Hunger = 17,
    Hp = 18,
    HpMax = 19,
    LevelDesc = 20,
    Exp = 21,
    Condition = 22,
}

/// Condition identity bits (`BL_MASK_*`), in the engine's canonical order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[repr(u32)]
pub enum ConditionFlag {
    BareHanded = 0x0000_0001,
    Blind = 0x0000_0002,
    Busy = 0x0000_0004,
    Confused = 0x0000_0008,
    Deaf = 0x0000_0010,
    ElfIron = 0x0000_0020,
    Flying = 0x0000_0040,
    FoodPoisoned = 0x0000_0080,
    GlowingHands = 0x0000_0100,
    Grabbed = 0x0000_0200,
    Hallucinating = 0x0000_0400,
    Held = 0x0000_0800,
    Icy = 0x0000_1000,
    InLava = 0x0000_2000,
    Levitating = 0x0000_4000,
    Paralyzed = 0x0000_8000,
    Riding = 0x0001_0000,
    Sleeping = 0x0002_0000,
    Slimed = 0x0004_0000,
    Slippery = 0x0008_0000,
    Stoned = 0x0010_0000,
    Strangled = 0x0020_0000,
    Stunned = 0x0040_0000,
    Submerged = 0x0080_0000,
    TerminallyIll = 0x0100_0000,
    Tethered = 0x0200_0000,
    Trapped = 0x0400_0000,
    Unconscious = 0x0800_0000,
    WoundedLegs = 0x1000_0000,
    Holding = 0x2000_0000,
}

impl ConditionFlag {
    pub fn mask(self) -> u32 {
        self as u32
    }

    /// Active flags in a reported bitmask, in declaration (ascending bit)
    /// order.
    pub fn decode(bits: u32) -> Vec<ConditionFlag> {
        Self::iter().filter(|flag| bits & flag.mask() != 0).collect()
    }
}

/// A decoded condition bit with no matching row in the static condition
/// table: the table and the bitmask disagree about the engine version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("condition bit {0:#010x} has no entry in the condition table")]
pub struct UnknownCondition(pub u32);

/// One active condition, joined against the static table and styled from
/// the per-update colormask array.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActiveCondition {
    pub flag: ConditionFlag,
    pub ranking: i32,
    /// Long, medium, and short display forms.
    pub text: [String; 3],
    pub color: Color,
    pub attrs: Vec<CondAttr>,
}

/// Number of leading color slots in the colormask array.
const COLOR_SLOTS: u32 = 16;

/// Resolves the reported condition bitmask into styled active conditions.
///
/// For each active bit: join against the static `table` (a miss is an
/// [`UnknownCondition`], never swallowed), take the first of the 16 color
/// slots whose mask contains the bit (default no color), and collect every
/// matching attribute slot.
pub fn resolve_conditions<M: EngineMemory + ?Sized>(
    mem: &M,
    bits: u32,
    colormasks: u32,
    table: &[ConditionRecord],
) -> Result<Vec<ActiveCondition>, UnknownCondition> {
    ConditionFlag::decode(bits)
        .into_iter()
        .map(|flag| {
            let record = table
                .iter()
                .find(|record| record.mask == flag.mask())
                .ok_or(UnknownCondition(flag.mask()))?;

            let mut color = Color::NoColor;
            for slot in 0..COLOR_SLOTS {
                let mask = mem.read_i32(colormasks + slot * 4) as u32;
                if mask & flag.mask() != 0 {
                    color = Color::from_index(slot as i32);
                    break;
                }
            }

            let attrs = CondAttr::iter()
                .filter(|attr| {
                    let mask = mem.read_i32(colormasks + (*attr as u32) * 4) as u32;
                    mask & flag.mask() != 0
                })
                .collect();

            Ok(ActiveCondition {
                flag,
                ranking: record.ranking,
                text: record.text.clone(),
                color,
                attrs,
            })
        })
        .collect()
}

/// Value cell for one status field.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldValue {
    pub value: String,
    pub color: Color,
    pub attr: HlAttr,
}

/// Field-value table plus the ordered active-condition list.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct StatusBoard {
    pub displayed: bool,
    values: HashMap<StatusField, FieldValue>,
    conditions: Vec<ActiveCondition>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts one field. The `Flush` and `Reset` sentinels store nothing
    /// and only mark the board displayable.
    pub fn update(&mut self, field: StatusField, value: FieldValue) {
        match field {
            StatusField::Flush | StatusField::Reset => self.displayed = true,
            _ => {
                self.values.insert(field, value);
            }
        }
    }

    pub fn value(&self, field: StatusField) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    /// Replaces the active-condition list atomically.
    pub fn set_conditions(&mut self, conditions: Vec<ActiveCondition>) {
        self.conditions = conditions;
    }

    pub fn conditions(&self) -> &[ActiveCondition] {
        &self.conditions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::VecMemory;

    fn field(value: &str) -> FieldValue {
        FieldValue {
            value: value.into(),
            color: Color::Gray,
            attr: HlAttr::None,
        }
    }

    #[test]
    fn sentinel_fields_only_touch_the_display_flag() {
        let mut board = StatusBoard::new();
        board.update(StatusField::Flush, field("ignored"));
        assert!(board.displayed);
        assert_eq!(board.value(StatusField::Flush), None);
        board.update(StatusField::Reset, field("ignored"));
        assert_eq!(board.value(StatusField::Reset), None);
    }

    #[test]
    fn updates_round_trip_until_overwritten() {
        let mut board = StatusBoard::new();
        board.update(StatusField::Hp, field("15"));
        assert_eq!(board.value(StatusField::Hp).unwrap().value, "15");
        board.update(StatusField::Hp, field("11"));
        assert_eq!(board.value(StatusField::Hp).unwrap().value, "11");
    }

    #[test]
    fn flag_decode_follows_declaration_order() {
        let bits = ConditionFlag::Stoned.mask() | ConditionFlag::Blind.mask();
        assert_eq!(
            ConditionFlag::decode(bits),
            vec![ConditionFlag::Blind, ConditionFlag::Stoned]
        );
        assert!(ConditionFlag::decode(0).is_empty());
    }

    fn condition_table() -> Vec<ConditionRecord> {
        vec![
            ConditionRecord {
                ranking: 1,
                mask: ConditionFlag::Stoned.mask(),
                text: ["Stoned".into(), "Stone".into(), "Ston".into()],
            },
            ConditionRecord {
                ranking: 9,
                mask: ConditionFlag::Blind.mask(),
                text: ["Blind".into(), "Blnd".into(), "Bl".into()],
            },
        ]
    }

    #[test]
    fn conditions_pick_first_color_slot_and_all_attr_slots() {
        // 24 i32 slots: color slots 0..16, attribute slots 18..24.
        let mut mem = VecMemory::with_size(24 * 4);
        let stoned = ConditionFlag::Stoned.mask();
        mem.write_i32(2 * 4, stoned as i32); // green
        mem.write_i32(11 * 4, stoned as i32); // later slot, must lose
        mem.write_i32(18 * 4, stoned as i32); // bold
        mem.write_i32(23 * 4, stoned as i32); // inverse

        let resolved = resolve_conditions(&mem, stoned, 0, &condition_table()).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].color, Color::Green);
        assert_eq!(resolved[0].attrs, vec![CondAttr::Bold, CondAttr::Inverse]);
        assert_eq!(resolved[0].ranking, 1);
    }

    #[test]
    fn unstyled_conditions_default_to_no_color() {
        let mem = VecMemory::with_size(24 * 4);
        let blind = ConditionFlag::Blind.mask();
        let resolved = resolve_conditions(&mem, blind, 0, &condition_table()).unwrap();
        assert_eq!(resolved[0].color, Color::NoColor);
        assert!(resolved[0].attrs.is_empty());
    }

    #[test]
    fn missing_table_row_is_a_version_mismatch() {
        let mem = VecMemory::with_size(24 * 4);
        let held = ConditionFlag::Held.mask();
        assert_eq!(
            resolve_conditions(&mem, held, 0, &condition_table()),
            Err(UnknownCondition(held))
        );
    }
}
