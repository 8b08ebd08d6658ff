//! Role, race, gender, and alignment catalog decoding.
//!
//! The engine stores these as fixed-stride record tables. Allow-masks are
//! decoded against engine-supplied mask tables (mask value → identifier);
//! the tables travel with the session configuration because their contents
//! are engine constants, not part of this crate.

use crate::bitmask::{decode_bitmask, lookup_mask};
use crate::decode::read_str_field;
use crate::decode::read_table;
use crate::memory::EngineMemory;

pub const ROLE_STRIDE: u32 = 204;
const ROLE_FEMALE_NAME_OFFSET: u32 = 4;
const ROLE_ALLOW_OFFSET: u32 = 122;

pub const RACE_STRIDE: u32 = 88;
const RACE_ALLOW_OFFSET: u32 = 30;
const RACE_SELF_MASK_OFFSET: u32 = 32;

pub const GENDER_STRIDE: u32 = 24;
const GENDER_SELF_MASK_OFFSET: u32 = 20;

pub const ALIGN_STRIDE: u32 = 16;
const ALIGN_NAME_OFFSET: u32 = 4;
const ALIGN_SELF_MASK_OFFSET: u32 = 12;

/// Engine-supplied mask tables for the three allow-mask namespaces, in
/// ascending mask order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MaskTables {
    pub races: Vec<(u32, String)>,
    pub genders: Vec<(u32, String)>,
    pub aligns: Vec<(u32, String)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Role {
    pub name: String,
    /// Some roles carry a distinct female form (Priest/Priestess).
    pub female_name: Option<String>,
    pub allowed_races: Vec<String>,
    pub allowed_genders: Vec<String>,
    pub allowed_alignments: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Race {
    pub id: Option<String>,
    pub name: String,
    pub allowed_genders: Vec<String>,
    pub allowed_alignments: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gender {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alignment {
    pub id: Option<String>,
    pub name: String,
}

pub fn read_roles<M: EngineMemory + ?Sized>(mem: &M, base: u32, masks: &MaskTables) -> Vec<Role> {
    read_table(mem, base, ROLE_STRIDE, |mem, addr| {
        let name = read_str_field(mem, addr)?;
        let allow = mem.read_i16(addr + ROLE_ALLOW_OFFSET) as u16 as u32;
        Some(Role {
            name,
            female_name: read_str_field(mem, addr + ROLE_FEMALE_NAME_OFFSET),
            allowed_races: decode_bitmask(allow, &masks.races),
            allowed_genders: decode_bitmask(allow, &masks.genders),
            allowed_alignments: decode_bitmask(allow, &masks.aligns),
        })
    })
}

pub fn read_races<M: EngineMemory + ?Sized>(mem: &M, base: u32, masks: &MaskTables) -> Vec<Race> {
    read_table(mem, base, RACE_STRIDE, |mem, addr| {
        let name = read_str_field(mem, addr)?;
        let allow = mem.read_i16(addr + RACE_ALLOW_OFFSET) as u16 as u32;
        let self_mask = mem.read_i16(addr + RACE_SELF_MASK_OFFSET) as u16 as u32;
        Some(Race {
            id: lookup_mask(&masks.races, self_mask).cloned(),
            name,
            allowed_genders: decode_bitmask(allow, &masks.genders),
            allowed_alignments: decode_bitmask(allow, &masks.aligns),
        })
    })
}

pub fn read_genders<M: EngineMemory + ?Sized>(
    mem: &M,
    base: u32,
    masks: &MaskTables,
) -> Vec<Gender> {
    read_table(mem, base, GENDER_STRIDE, |mem, addr| {
        let name = read_str_field(mem, addr)?;
        let self_mask = mem.read_i16(addr + GENDER_SELF_MASK_OFFSET) as u16 as u32;
        if self_mask == 0 {
            return None;
        }
        Some(Gender {
            id: lookup_mask(&masks.genders, self_mask).cloned(),
            name,
        })
    })
}

pub fn read_alignments<M: EngineMemory + ?Sized>(
    mem: &M,
    base: u32,
    masks: &MaskTables,
) -> Vec<Alignment> {
    read_table(mem, base, ALIGN_STRIDE, |mem, addr| {
        let name = read_str_field(mem, addr + ALIGN_NAME_OFFSET)?;
        let self_mask = mem.read_i16(addr + ALIGN_SELF_MASK_OFFSET) as u16 as u32;
        if self_mask == 0 {
            return None;
        }
        Some(Alignment {
            id: lookup_mask(&masks.aligns, self_mask).cloned(),
            name,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::VecMemory;

    fn masks() -> MaskTables {
        MaskTables {
            races: vec![
                (0x1, "human".into()),
                (0x2, "elf".into()),
                (0x4, "dwarf".into()),
            ],
            genders: vec![(0x10, "male".into()), (0x20, "female".into())],
            aligns: vec![(0x100, "lawful".into()), (0x200, "chaotic".into())],
        }
    }

    fn write_role(
        mem: &mut VecMemory,
        base: u32,
        name: &str,
        female: Option<&str>,
        allow: u16,
    ) {
        let name_ptr = mem.push_cstr(name);
        mem.write_i32(base, name_ptr as i32);
        if let Some(female) = female {
            let ptr = mem.push_cstr(female);
            mem.write_i32(base + 4, ptr as i32);
        }
        mem.write_i16(base + 122, allow as i16);
    }

    #[test]
    fn roles_decode_until_null_name() {
        let mut mem = VecMemory::with_size((ROLE_STRIDE * 3) as usize);
        write_role(&mut mem, 0, "Priest", Some("Priestess"), 0x0131);
        write_role(&mut mem, ROLE_STRIDE, "Samurai", None, 0x0211);

        let roles = read_roles(&mem, 0, &masks());
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].name, "Priest");
        assert_eq!(roles[0].female_name.as_deref(), Some("Priestess"));
        assert_eq!(roles[0].allowed_races, vec!["human"]);
        assert_eq!(roles[0].allowed_genders, vec!["male", "female"]);
        assert_eq!(roles[0].allowed_alignments, vec!["lawful"]);
        assert_eq!(roles[1].female_name, None);
        assert_eq!(roles[1].allowed_alignments, vec!["chaotic"]);
    }

    #[test]
    fn races_resolve_self_mask_to_id() {
        let mut mem = VecMemory::with_size((RACE_STRIDE * 2) as usize);
        let name_ptr = mem.push_cstr("dwarf");
        mem.write_i32(0, name_ptr as i32);
        mem.write_i16(30, 0x110);
        mem.write_i16(32, 0x4);

        let races = read_races(&mem, 0, &masks());
        assert_eq!(races.len(), 1);
        assert_eq!(races[0].id.as_deref(), Some("dwarf"));
        assert_eq!(races[0].allowed_genders, vec!["male"]);
    }

    #[test]
    fn gender_table_ends_at_zero_self_mask() {
        let mut mem = VecMemory::with_size((GENDER_STRIDE * 2) as usize);
        let male = mem.push_cstr("male");
        let neuter = mem.push_cstr("neuter");
        mem.write_i32(0, male as i32);
        mem.write_i16(20, 0x10);
        // Second record has a name but self-mask 0: terminator.
        mem.write_i32(GENDER_STRIDE, neuter as i32);

        let genders = read_genders(&mem, 0, &masks());
        assert_eq!(genders.len(), 1);
        assert_eq!(genders[0].id.as_deref(), Some("male"));
    }

    #[test]
    fn alignment_name_lives_behind_offset_four() {
        let mut mem = VecMemory::with_size((ALIGN_STRIDE * 2) as usize);
        let name = mem.push_cstr("lawful");
        mem.write_i32(4, name as i32);
        mem.write_i16(12, 0x100);

        let aligns = read_alignments(&mem, 0, &masks());
        assert_eq!(aligns.len(), 1);
        assert_eq!(aligns[0].name, "lawful");
        assert_eq!(aligns[0].id.as_deref(), Some("lawful"));
    }
}
