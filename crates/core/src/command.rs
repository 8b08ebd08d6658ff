//! Extended-command catalog and prefix resolution.

/// One entry of the engine's extended-command table.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExtCommand {
    pub key: char,
    pub name: String,
    pub description: String,
    pub autocomplete: bool,
}

/// Decoded command table with the resolution rules used by the command
/// prompt: unique autocomplete-eligible prefix match first, exact-name
/// fallback second.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandList {
    commands: Vec<ExtCommand>,
}

impl CommandList {
    pub fn new(commands: Vec<ExtCommand>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[ExtCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All commands whose name starts with `prefix`, eligibility ignored.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a ExtCommand> {
        self.commands
            .iter()
            .filter(move |cmd| cmd.name.starts_with(prefix))
    }

    /// Resolves `prefix` to a single command.
    ///
    /// Among autocomplete-eligible commands, a unique prefix match wins.
    /// Failing that, a unique exact-name match over the whole table (the
    /// eligibility flag no longer filters) still resolves; anything else is
    /// ambiguous or unknown.
    pub fn unique_autocomplete(&self, prefix: &str) -> Option<&ExtCommand> {
        let mut eligible = self
            .commands
            .iter()
            .filter(|cmd| cmd.autocomplete && cmd.name.starts_with(prefix));
        if let (Some(hit), None) = (eligible.next(), eligible.next()) {
            return Some(hit);
        }

        let mut exact = self.commands.iter().filter(|cmd| cmd.name == prefix);
        match (exact.next(), exact.next()) {
            (Some(hit), None) => Some(hit),
            _ => None,
        }
    }

    /// Resolves entered text (case-insensitively) to its position in the
    /// full table, or -1 when nothing resolves. This is the value the
    /// command prompt hands back to the engine.
    pub fn index_of(&self, text: &str) -> i32 {
        let Some(command) = self.unique_autocomplete(&text.to_lowercase()) else {
            return -1;
        };
        self.commands
            .iter()
            .position(|cmd| cmd.name == command.name)
            .map(|index| index as i32)
            .unwrap_or(-1)
    }
}
