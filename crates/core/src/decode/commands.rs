//! Extended-command table decoding.

use crate::command::ExtCommand;
use crate::decode::read_str_field;
use crate::memory::EngineMemory;

pub const EXTCMD_STRIDE: u32 = 24;
const EXTCMD_NAME_OFFSET: u32 = 4;
const EXTCMD_DESC_OFFSET: u32 = 8;
const EXTCMD_FLAGS_OFFSET: u32 = 16;
const EXTCMD_AUTOCOMPLETE_BIT: i32 = 0x2;

/// Upper bound on the table walk; the real table is far shorter and ends at
/// the first record with an empty name.
pub const EXTCMD_SCAN_LIMIT: u32 = 100;

/// Substituted when a command record has no description string.
const MISSING_DESCRIPTION: &str = "unknown description";

pub fn read_commands<M: EngineMemory + ?Sized>(mem: &M, base: u32) -> Vec<ExtCommand> {
    let mut commands = Vec::new();
    for index in 0..EXTCMD_SCAN_LIMIT {
        let addr = base + index * EXTCMD_STRIDE;
        let Some(name) = read_str_field(mem, addr + EXTCMD_NAME_OFFSET) else {
            break;
        };
        if name.is_empty() {
            break;
        }
        commands.push(ExtCommand {
            key: mem.read_i8(addr) as u8 as char,
            name,
            description: read_str_field(mem, addr + EXTCMD_DESC_OFFSET)
                .unwrap_or_else(|| MISSING_DESCRIPTION.to_owned()),
            autocomplete: mem.read_i32(addr + EXTCMD_FLAGS_OFFSET) & EXTCMD_AUTOCOMPLETE_BIT != 0,
        });
    }
    commands
}
