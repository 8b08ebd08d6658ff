//! Positional-argument decoding for engine calls.
//!
//! The engine passes a flat list of integers (values, pointers, character
//! codes, flags) and strings. [`ArgReader`] is a cursor that converts each
//! position into the shape its handler expects, failing with a descriptive
//! [`BridgeError::BadArgument`] on mismatch. Argument shape is part of the
//! wire contract, so a mismatch means the catalogs disagree.

use std::fmt;

use crate::error::{BridgeError, Result};

/// One positional argument as received from the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallArg {
    Int(i32),
    Str(String),
}

impl fmt::Display for CallArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallArg::Int(value) => write!(f, "{value}"),
            CallArg::Str(text) => write!(f, "{text:?}"),
        }
    }
}

impl From<i32> for CallArg {
    fn from(value: i32) -> Self {
        CallArg::Int(value)
    }
}

impl From<&str> for CallArg {
    fn from(text: &str) -> Self {
        CallArg::Str(text.to_owned())
    }
}

impl From<String> for CallArg {
    fn from(text: String) -> Self {
        CallArg::Str(text)
    }
}

/// Cursor over one call's positional arguments.
pub struct ArgReader<'a> {
    op: &'static str,
    args: &'a [CallArg],
    cursor: usize,
}

impl<'a> ArgReader<'a> {
    pub fn new(op: &'static str, args: &'a [CallArg]) -> Self {
        Self {
            op,
            args,
            cursor: 0,
        }
    }

    fn next(&mut self, expected: &'static str) -> Result<&'a CallArg> {
        let arg = self.args.get(self.cursor).ok_or(BridgeError::BadArgument {
            op: self.op,
            index: self.cursor,
            expected,
        })?;
        self.cursor += 1;
        Ok(arg)
    }

    pub fn int(&mut self) -> Result<i32> {
        let index = self.cursor;
        match self.next("integer")? {
            CallArg::Int(value) => Ok(*value),
            CallArg::Str(_) => Err(BridgeError::BadArgument {
                op: self.op,
                index,
                expected: "integer",
            }),
        }
    }

    /// A pointer-valued integer (engine addresses are unsigned).
    pub fn ptr(&mut self) -> Result<u32> {
        Ok(self.int()? as u32)
    }

    /// A character code where zero means "absent".
    pub fn ch(&mut self) -> Result<Option<char>> {
        let code = self.int()?;
        Ok(char::from_u32(code as u32).filter(|_| code != 0))
    }

    /// A boolean passed as an integer.
    pub fn flag(&mut self) -> Result<bool> {
        Ok(self.int()? != 0)
    }

    pub fn str_(&mut self) -> Result<&'a str> {
        let index = self.cursor;
        match self.next("string")? {
            CallArg::Str(text) => Ok(text),
            CallArg::Int(_) => Err(BridgeError::BadArgument {
                op: self.op,
                index,
                expected: "string",
            }),
        }
    }
}
