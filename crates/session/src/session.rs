//! The bridge session: one engine process, one dispatcher.
//!
//! [`GameSession`] owns the engine memory view, the window table, the status
//! board, and the input broker, and executes engine calls strictly in
//! arrival order. A handler that suspends on input runs to completion before
//! the next call is considered; the engine is single-threaded and never
//! issues a call while one is outstanding.
//!
//! Window ids are handed out by this session, so a call naming an id that
//! was never created (or already destroyed) is a programming error on the
//! engine side and panics rather than being mapped to an error reply.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use bridge_core::{
    BACKSPACE, Color, CommandList, ConditionRecord, ENTER, ESC, EngineMemory, FieldValue, HlAttr,
    InputEvent, MapWindow, MenuSelect, MenuSelection, MenuWindow, MessageWindow, SelectionStep,
    StatusBoard, StatusField, TextAttr, TextWindow, Window, WindowId, WindowKind, read_alignments,
    read_commands, read_conditions, read_genders, read_glyph_info, read_races, read_roles,
    resolve_conditions,
};

use crate::args::{ArgReader, CallArg};
use crate::broker::{InputBroker, InputHandle};
use crate::config::{PlayerIndices, SessionConfig};
use crate::error::{BridgeError, Result};
use crate::ops::Op;
use crate::oracle::{FileOracle, NullFiles};
use crate::prompt::Prompt;
use crate::snapshot::{Snapshot, WindowSnapshot};

/// Capacity of the caller-supplied line-entry buffer.
const GETLIN_BUFFER: u32 = 1024;

/// Marshalled size of one selected menu item: identifier pointer slot at
/// offset 0, count at 4, item flags at 8.
const MENU_ITEM_STRIDE: u32 = 12;

/// Pause length for the engine's dramatic-pause call.
const DELAY_OUTPUT_MS: u64 = 50;

/// Reply value of one dispatched call, shaped as the wire expects it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallReply {
    Unit,
    Int(i32),
    Text(String),
}

impl CallReply {
    /// The integer payload, if this reply carries one.
    pub fn int(&self) -> Option<i32> {
        match self {
            CallReply::Int(value) => Some(*value),
            _ => None,
        }
    }
}

pub struct GameSession<M: EngineMemory> {
    mem: M,
    config: SessionConfig,
    files: Box<dyn FileOracle>,
    broker: InputBroker,
    windows: HashMap<WindowId, Window>,
    next_window_id: u32,
    status: StatusBoard,
    prompt: Option<Prompt>,
    map_window: Option<WindowId>,
    message_window: Option<WindowId>,
    ready: bool,
    player: Option<PlayerIndices>,
    conditions: Option<Vec<ConditionRecord>>,
    commands: Option<CommandList>,
    snapshot_tx: watch::Sender<Snapshot>,
}

impl<M: EngineMemory> GameSession<M> {
    pub fn new(mem: M, config: SessionConfig) -> Self {
        let (snapshot_tx, _) = watch::channel(Snapshot::default());
        Self {
            mem,
            config,
            files: Box::new(NullFiles),
            broker: InputBroker::new(),
            windows: HashMap::new(),
            next_window_id: 0,
            status: StatusBoard::new(),
            prompt: None,
            map_window: None,
            message_window: None,
            ready: false,
            player: None,
            conditions: None,
            commands: None,
            snapshot_tx,
        }
    }

    /// Replaces the file oracle consulted by `display_file`.
    pub fn with_files(mut self, files: impl FileOracle + 'static) -> Self {
        self.files = Box::new(files);
        self
    }

    /// Submitter for the presentation layer; cloneable.
    pub fn input_handle(&self) -> InputHandle {
        self.broker.handle()
    }

    /// Receiver for presentation snapshots; one is published after every
    /// dispatched call and at every suspension point.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn memory(&self) -> &M {
        &self.mem
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.mem
    }

    /// Run-control option text the embedder hands to the engine at startup.
    pub fn run_control(&self) -> &str {
        &self.config.run_control
    }

    /// The resolved pre-made character, once `player_selection_or_tty` has
    /// accepted one. Writing it into the engine globals is the embedder's
    /// concern.
    pub fn player(&self) -> Option<&PlayerIndices> {
        self.player.as_ref()
    }

    /// Decoded extended-command table, read from engine memory on first use.
    pub fn commands(&mut self) -> &CommandList {
        let Self {
            commands,
            mem,
            config,
            ..
        } = self;
        commands
            .get_or_insert_with(|| CommandList::new(read_commands(mem, config.pointers.extcmdlist)))
    }

    /// Executes one engine call. Calls are strictly ordered: an interactive
    /// handler holds the dispatcher until its input arrives.
    pub async fn dispatch(&mut self, raw_name: &str, args: Vec<CallArg>) -> Result<CallReply> {
        let Some(op) = Op::from_wire(raw_name) else {
            warn!(name = raw_name, "unknown engine method");
            return Err(BridgeError::UnknownMethod {
                name: raw_name.to_owned(),
                args,
            });
        };
        debug!(op = op.key(), ?args, "engine call");
        let mut a = ArgReader::new(op.key(), &args);

        let reply = match op {
            // A. Low-level routines
            Op::RawPrint => {
                info!(text = a.str_()?, "raw print");
                CallReply::Unit
            }
            Op::RawPrintBold => {
                info!(text = a.str_()?, "raw print (bold)");
                CallReply::Unit
            }
            Op::Curs => {
                let id = WindowId(a.ptr()?);
                let x = a.int()?;
                let y = a.int()?;
                if let Window::Map(map) = self.window_mut(id) {
                    map.set_cursor(x, y);
                }
                CallReply::Unit
            }
            Op::Putstr => {
                let id = WindowId(a.ptr()?);
                let attr = TextAttr::from_repr(a.int()?).unwrap_or_default();
                let text = a.str_()?;
                self.window_mut(id).put_str(text, attr);
                CallReply::Unit
            }
            Op::GetNhEvent => CallReply::Unit,
            Op::Nhgetch => {
                warn!(op = op.key(), "not implemented");
                CallReply::Int(0)
            }
            Op::NhPoskey => {
                let xp = a.ptr()?;
                let yp = a.ptr()?;
                let modp = a.ptr()?;
                self.set_prompt(Prompt::PosKey);
                let event = self.broker.get_char_or_pos().await?;
                self.prompt = None;
                match event {
                    InputEvent::Char(ch) => CallReply::Int(ch as i32),
                    InputEvent::Pos { x, y, modifier } => {
                        self.mem.write_i16(xp, x);
                        self.mem.write_i16(yp, y);
                        self.mem.write_i32(modp, modifier);
                        CallReply::Int(0)
                    }
                    InputEvent::Submit => CallReply::Int(0),
                }
            }

            // B. High-level routines
            Op::PrintGlyph => {
                let id = WindowId(a.ptr()?);
                let x = a.int()?;
                let y = a.int()?;
                let glyph = read_glyph_info(&self.mem, a.ptr()?);
                let backglyph = read_glyph_info(&self.mem, a.ptr()?);
                self.window_mut(id).as_map_mut().print_glyph(x, y, glyph, backglyph);
                CallReply::Unit
            }
            Op::YnFunction => {
                let question = a.str_()?;
                let choices = a.str_()?;
                let default = a.ch()?;
                self.set_prompt(Prompt::Yn {
                    question: question.to_owned(),
                    choices: choices.to_owned(),
                    default,
                });
                let answer = loop {
                    let ch = self.broker.get_char().await?;
                    if ch == ESC {
                        // Escape prefers the "quit"/"no" choices when the
                        // question offers them.
                        break if choices.contains('q') {
                            'q'
                        } else if choices.contains('n') {
                            'n'
                        } else {
                            default.unwrap_or(ESC)
                        };
                    }
                    if ch == ' ' || ch == ENTER {
                        break default.unwrap_or(ch);
                    }
                    if choices.is_empty() || choices.contains(ch) {
                        break ch;
                    }
                };
                self.prompt = None;
                CallReply::Int(answer as i32)
            }
            Op::Getlin => {
                let question = a.str_()?;
                let outp = a.ptr()?;
                let mut entered = String::new();
                self.set_prompt(Prompt::Getlin {
                    prompt: question.to_owned(),
                    entered: entered.clone(),
                });
                let result = loop {
                    match self.broker.get_line_event().await? {
                        // A cancelled entry hands the literal escape string
                        // back; the engine recognizes it.
                        InputEvent::Char(ESC) => break ESC.to_string(),
                        InputEvent::Char(ENTER) | InputEvent::Submit => break entered,
                        InputEvent::Char(BACKSPACE) => {
                            entered.pop();
                        }
                        InputEvent::Char(ch) => entered.push(ch),
                        InputEvent::Pos { .. } => continue,
                    }
                    self.set_prompt(Prompt::Getlin {
                        prompt: question.to_owned(),
                        entered: entered.clone(),
                    });
                };
                self.prompt = None;
                self.mem.write_cstr(outp, &result, GETLIN_BUFFER);
                CallReply::Unit
            }
            Op::GetExtCmd => {
                let mut entered = String::new();
                self.set_prompt(Prompt::ExtCmd {
                    entered: entered.clone(),
                });
                let index = loop {
                    match self.broker.get_line_event().await? {
                        InputEvent::Char(ESC) => break -1,
                        InputEvent::Char(ENTER) | InputEvent::Submit => {
                            break self.commands().index_of(&entered);
                        }
                        InputEvent::Char(BACKSPACE) => {
                            entered.pop();
                        }
                        InputEvent::Char(ch) => entered.push(ch),
                        InputEvent::Pos { .. } => continue,
                    }
                    self.set_prompt(Prompt::ExtCmd {
                        entered: entered.clone(),
                    });
                };
                self.prompt = None;
                CallReply::Int(index)
            }
            Op::PlayerSelectionOrTty => match self.config.player.clone() {
                // 1 lets the engine's own text chooser run.
                None => CallReply::Int(1),
                Some(selection) => {
                    let pointers = self.config.pointers;
                    let masks = self.config.masks.clone();
                    let roles = read_roles(&self.mem, pointers.roles, &masks);
                    let races = read_races(&self.mem, pointers.races, &masks);
                    let genders = read_genders(&self.mem, pointers.genders, &masks);
                    let aligns = read_alignments(&self.mem, pointers.aligns, &masks);

                    let role = roles.iter().position(|role| {
                        role.name == selection.role
                            || role.female_name.as_deref() == Some(selection.role.as_str())
                    });
                    let race = races.iter().position(|race| {
                        race.name == selection.race
                            || race.id.as_deref() == Some(selection.race.as_str())
                    });
                    let gender = genders.iter().position(|gender| {
                        gender.name == selection.gender
                            || gender.id.as_deref() == Some(selection.gender.as_str())
                    });
                    let align = aligns.iter().position(|align| {
                        align.name == selection.align
                            || align.id.as_deref() == Some(selection.align.as_str())
                    });
                    match (role, race, gender, align) {
                        (Some(role), Some(race), Some(gender), Some(align)) => {
                            self.player = Some(PlayerIndices {
                                name: selection.name.clone(),
                                role: role as i32,
                                race: race as i32,
                                gender: gender as i32,
                                align: align as i32,
                            });
                            CallReply::Int(0)
                        }
                        _ => {
                            warn!(
                                role = %selection.role,
                                race = %selection.race,
                                "configured player does not match the engine catalogs"
                            );
                            CallReply::Int(1)
                        }
                    }
                }
            },
            Op::DisplayFile => {
                let name = a.str_()?;
                let complain = a.flag()?;
                match self.files.read_text(name) {
                    None => {
                        if complain {
                            warn!(file = name, "cannot display missing file");
                        }
                    }
                    Some(contents) => {
                        let id = self.insert_window(Window::Text(TextWindow::new()));
                        let win = self.window_mut(id);
                        for line in contents.lines() {
                            win.put_str(line, TextAttr::None);
                        }
                        win.set_displayed(true);
                        self.acknowledge(id).await?;
                        self.windows.remove(&id);
                    }
                }
                CallReply::Unit
            }
            Op::UpdateInventory => {
                warn!(op = op.key(), "not implemented");
                CallReply::Unit
            }
            Op::DoprevMessage => CallReply::Int(0),
            Op::UpdatePositionbar => {
                warn!(op = op.key(), "not implemented");
                CallReply::Unit
            }

            // C. Window utility routines
            Op::InitNhwindows => {
                self.ready = true;
                CallReply::Unit
            }
            Op::ExitNhwindows => {
                let farewell = a.str_()?;
                if let Some(id) = self.message_window
                    && let Some(win) = self.windows.get_mut(&id)
                {
                    win.clear();
                    win.put_str(farewell, TextAttr::None);
                }
                if let Some(id) = self.map_window
                    && let Some(win) = self.windows.get_mut(&id)
                {
                    win.clear();
                }
                self.status.displayed = false;
                self.ready = false;
                CallReply::Unit
            }
            Op::CreateNhwindow => {
                let code = a.int()?;
                let window = match WindowKind::from_repr(code) {
                    Some(WindowKind::Message) => Window::Message(MessageWindow::new()),
                    Some(WindowKind::Map) => Window::Map(MapWindow::new()),
                    Some(WindowKind::Menu) => Window::Menu(MenuWindow::new()),
                    Some(WindowKind::Text) => Window::Text(TextWindow::new()),
                    // The status board replaces the status window; the
                    // engine is configured not to ask for one.
                    Some(WindowKind::Status) | None => {
                        return Err(BridgeError::UnknownWindowType(code));
                    }
                };
                let id = self.insert_window(window);
                CallReply::Int(id.0 as i32)
            }
            Op::ClearNhwindow => {
                let id = WindowId(a.ptr()?);
                self.window_mut(id).clear();
                CallReply::Unit
            }
            Op::DisplayNhwindow => {
                let id = WindowId(a.ptr()?);
                let blocking = a.flag()?;
                match self.window_mut(id).kind() {
                    WindowKind::Message => {
                        self.message_window = Some(id);
                        self.window_mut(id).set_displayed(true);
                    }
                    // Glyph paint already marked the map displayed; the
                    // display call only carries the blocking handshake.
                    WindowKind::Map => {
                        self.map_window = Some(id);
                        if blocking {
                            self.acknowledge(id).await?;
                        }
                    }
                    // Menus and text always wait for acknowledgment.
                    WindowKind::Menu | WindowKind::Text => {
                        self.window_mut(id).set_displayed(true);
                        self.acknowledge(id).await?;
                    }
                    WindowKind::Status => {}
                }
                CallReply::Unit
            }
            Op::DestroyNhwindow => {
                let id = WindowId(a.ptr()?);
                self.windows.remove(&id);
                if self.map_window == Some(id) {
                    self.map_window = None;
                }
                if self.message_window == Some(id) {
                    self.message_window = None;
                }
                CallReply::Unit
            }
            Op::StartMenu => {
                let id = WindowId(a.ptr()?);
                let _behavior = a.int()?;
                self.window_mut(id).as_menu_mut().start_menu();
                CallReply::Unit
            }
            Op::AddMenu => {
                let id = WindowId(a.ptr()?);
                let glyph_ptr = a.ptr()?;
                let identifier = a.int()?;
                let accelerator = a.ch()?;
                let group_accel = a.ch()?;
                let attr = TextAttr::from_repr(a.int()?).unwrap_or_default();
                let color = Color::from_index(a.int()?);
                let label = a.str_()?.to_owned();
                let item_flags = a.int()?;
                let glyph = read_glyph_info(&self.mem, glyph_ptr);
                self.window_mut(id).as_menu_mut().add_entry(
                    glyph,
                    identifier,
                    accelerator,
                    group_accel,
                    attr,
                    color,
                    label,
                    item_flags,
                );
                CallReply::Unit
            }
            Op::EndMenu => {
                let id = WindowId(a.ptr()?);
                let prompt = a.str_()?;
                self.window_mut(id).as_menu_mut().end_menu(prompt);
                CallReply::Unit
            }
            Op::SelectMenu => {
                let id = WindowId(a.ptr()?);
                let how_code = a.int()?;
                let outp = a.ptr()?;
                let how = MenuSelect::from_repr(how_code).ok_or(BridgeError::BadArgument {
                    op: op.key(),
                    index: 1,
                    expected: "selection mode 0..=2",
                })?;
                self.window_mut(id).set_displayed(true);
                self.publish();

                let mut selection = MenuSelection::new(how);
                let items = loop {
                    let ch = self.broker.get_char().await?;
                    let step = selection.feed(self.window_mut(id).as_menu_mut(), ch);
                    if let SelectionStep::Done(items) = step {
                        break items;
                    }
                    self.publish();
                };
                self.window_mut(id).set_displayed(false);

                let block = self.mem.alloc(items.len() as u32 * MENU_ITEM_STRIDE);
                for (index, item) in items.iter().enumerate() {
                    let addr = block + index as u32 * MENU_ITEM_STRIDE;
                    self.mem.write_i32(addr, item.identifier);
                    self.mem.write_i32(addr + 4, item.count);
                    self.mem.write_i32(addr + 8, item.item_flags);
                }
                self.mem.write_i32(outp, block as i32);
                CallReply::Int(items.len() as i32)
            }
            Op::MessageMenu => {
                warn!(op = op.key(), "not implemented");
                CallReply::Int('y' as i32)
            }

            // D. Status display routines
            Op::StatusInit | Op::StatusFinish => CallReply::Unit,
            Op::StatusEnablefield => {
                warn!(op = op.key(), "not implemented");
                CallReply::Unit
            }
            Op::StatusUpdate => {
                let field_code = a.int()?;
                let value_ptr = a.ptr()?;
                let _chg = a.int()?;
                let _percent = a.int()?;
                let color_word = a.int()?;
                let colormasks = a.ptr()?;
                let field =
                    StatusField::from_repr(field_code).ok_or(BridgeError::BadArgument {
                        op: op.key(),
                        index: 0,
                        expected: "status field code",
                    })?;
                if field == StatusField::Condition {
                    let bits = self.mem.read_i32(value_ptr) as u32;
                    if self.conditions.is_none() {
                        self.conditions = Some(read_conditions(
                            &self.mem,
                            self.config.pointers.conditions,
                            self.config.pointers.condition_count,
                        ));
                    }
                    let table = self.conditions.as_deref().unwrap_or_default();
                    let active = resolve_conditions(&self.mem, bits, colormasks, table)?;
                    self.status.set_conditions(active);
                } else {
                    let value = self.mem.read_cstr(value_ptr);
                    self.status.update(
                        field,
                        FieldValue {
                            value,
                            color: Color::from_index(color_word & 0xff),
                            attr: HlAttr::from_index(color_word >> 8),
                        },
                    );
                }
                CallReply::Unit
            }

            // E. Misc. routines
            Op::DelayOutput => {
                tokio::time::sleep(Duration::from_millis(DELAY_OUTPUT_MS)).await;
                CallReply::Unit
            }
            Op::Askname => {
                warn!(op = op.key(), "not implemented");
                CallReply::Text("wizard".to_owned())
            }
            Op::Cliparound => {
                let x = a.int()?;
                let y = a.int()?;
                if let Some(id) = self.map_window
                    && let Some(win) = self.windows.get_mut(&id)
                {
                    win.as_map_mut().set_center(x, y);
                }
                CallReply::Unit
            }
            Op::NumberPad | Op::SuspendNhwindows | Op::ResumeNhwindows | Op::Putmixed => {
                warn!(op = op.key(), "not implemented");
                CallReply::Unit
            }
            // Deliberately empty: the message window keeps its own history
            // and save files do not round-trip through the bridge.
            Op::Getmsghistory => CallReply::Text(String::new()),
            Op::Putmsghistory => CallReply::Unit,
            Op::Nhbell
            | Op::MarkSynch
            | Op::WaitSynch
            | Op::CanSuspend
            | Op::StartScreen
            | Op::EndScreen
            | Op::Outrip
            | Op::PreferenceUpdate => CallReply::Unit,
        };

        self.publish();
        Ok(reply)
    }

    fn insert_window(&mut self, window: Window) -> WindowId {
        let id = WindowId(self.next_window_id);
        self.next_window_id += 1;
        self.windows.insert(id, window);
        id
    }

    fn window_mut(&mut self, id: WindowId) -> &mut Window {
        match self.windows.get_mut(&id) {
            Some(window) => window,
            None => panic!("{id} does not exist"),
        }
    }

    /// Blocking-display handshake: mark the window blocking, publish so the
    /// presentation layer shows it, and consume one acknowledgment key.
    async fn acknowledge(&mut self, id: WindowId) -> Result<()> {
        self.window_mut(id).set_blocking(true);
        self.publish();
        self.broker.get_char().await?;
        self.window_mut(id).set_blocking(false);
        Ok(())
    }

    fn set_prompt(&mut self, prompt: Prompt) {
        self.prompt = Some(prompt);
        self.publish();
    }

    fn publish(&mut self) {
        let mut ids: Vec<_> = self.windows.keys().copied().collect();
        ids.sort_unstable();
        let windows = ids
            .into_iter()
            .map(|id| WindowSnapshot {
                id,
                kind: self.windows[&id].kind(),
                window: self.windows[&id].clone(),
            })
            .collect();
        self.snapshot_tx.send_replace(Snapshot {
            ready: self.ready,
            windows,
            status: self.status.clone(),
            prompt: self.prompt.clone(),
            map_window: self.map_window,
            message_window: self.message_window,
            player: self.player.clone(),
        });
    }
}
