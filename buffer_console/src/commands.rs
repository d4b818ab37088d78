//! # Menu Commands
//!
//! The numbered command surface of the console.
//!
//! ## Command Set
//!
//! - `1` append text, `2` start a new line
//! - `3` save as file, `4` load file
//! - `5` print the text, `6` find text
//! - `7` insert (and optionally replace) at a position
//! - `8` clear the console
//! - `9` undo, `10` redo
//! - `11` delete, `12` cut, `13` copy, `14` paste
//! - `15` show the buffer state as JSON
//! - `0` exit

use thiserror::Error;

/// Menu parsing error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),
}

/// Menu commands, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Exit,
    Append,
    NewLine,
    Save,
    Load,
    Print,
    Find,
    Insert,
    Clear,
    Undo,
    Redo,
    Delete,
    Cut,
    Copy,
    Paste,
    State,
}

impl MenuCommand {
    /// Display order of the menu; `Exit` goes last
    pub const MENU: [MenuCommand; 16] = [
        MenuCommand::Append,
        MenuCommand::NewLine,
        MenuCommand::Save,
        MenuCommand::Load,
        MenuCommand::Print,
        MenuCommand::Find,
        MenuCommand::Insert,
        MenuCommand::Clear,
        MenuCommand::Undo,
        MenuCommand::Redo,
        MenuCommand::Delete,
        MenuCommand::Cut,
        MenuCommand::Copy,
        MenuCommand::Paste,
        MenuCommand::State,
        MenuCommand::Exit,
    ];

    pub fn number(self) -> u8 {
        match self {
            MenuCommand::Exit => 0,
            MenuCommand::Append => 1,
            MenuCommand::NewLine => 2,
            MenuCommand::Save => 3,
            MenuCommand::Load => 4,
            MenuCommand::Print => 5,
            MenuCommand::Find => 6,
            MenuCommand::Insert => 7,
            MenuCommand::Clear => 8,
            MenuCommand::Undo => 9,
            MenuCommand::Redo => 10,
            MenuCommand::Delete => 11,
            MenuCommand::Cut => 12,
            MenuCommand::Copy => 13,
            MenuCommand::Paste => 14,
            MenuCommand::State => 15,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::Exit => "Exit",
            MenuCommand::Append => "Append text",
            MenuCommand::NewLine => "Start new line",
            MenuCommand::Save => "Save as file",
            MenuCommand::Load => "Load file",
            MenuCommand::Print => "Print current saved text",
            MenuCommand::Find => "Find text",
            MenuCommand::Insert => "Insert text at position",
            MenuCommand::Clear => "Clear console",
            MenuCommand::Undo => "Undo",
            MenuCommand::Redo => "Redo",
            MenuCommand::Delete => "Delete text",
            MenuCommand::Cut => "Cut text",
            MenuCommand::Copy => "Copy text",
            MenuCommand::Paste => "Paste text",
            MenuCommand::State => "Show buffer state",
        }
    }

    /// The full menu as displayed before each prompt
    pub fn menu_text() -> String {
        let mut text = String::from("Choose the command:\n");
        for command in Self::MENU {
            text.push_str(&format!("{}. {}\n", command.number(), command.label()));
        }
        text
    }
}

/// Menu and argument parser
pub struct MenuParser;

impl MenuParser {
    /// Parse a menu choice line
    pub fn parse(input: &str) -> Result<MenuCommand, CommandError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CommandError::InvalidCommand(String::new()));
        }

        let number: u8 = trimmed
            .parse()
            .map_err(|_| CommandError::InvalidCommand(trimmed.to_string()))?;

        MenuCommand::MENU
            .into_iter()
            .find(|command| command.number() == number)
            .ok_or_else(|| CommandError::InvalidCommand(trimmed.to_string()))
    }

    /// Parse a single byte offset
    pub fn parse_position(input: &str) -> Result<usize, CommandError> {
        Self::parse_single(input, "position")
    }

    /// Parse a single byte count
    pub fn parse_length(input: &str) -> Result<usize, CommandError> {
        Self::parse_single(input, "length")
    }

    /// Parse `<pos> <len>` separated by whitespace
    pub fn parse_range(input: &str) -> Result<(usize, usize), CommandError> {
        let mut parts = input.split_whitespace();
        let pos = parts
            .next()
            .ok_or(CommandError::MissingArgument("position"))?;
        let len = parts.next().ok_or(CommandError::MissingArgument("length"))?;

        if let Some(extra) = parts.next() {
            return Err(CommandError::UnexpectedArgument(extra.to_string()));
        }

        Ok((Self::parse_number(pos)?, Self::parse_number(len)?))
    }

    fn parse_single(input: &str, name: &'static str) -> Result<usize, CommandError> {
        let mut parts = input.split_whitespace();
        let token = parts.next().ok_or(CommandError::MissingArgument(name))?;
        if let Some(extra) = parts.next() {
            return Err(CommandError::UnexpectedArgument(extra.to_string()));
        }
        Self::parse_number(token)
    }

    fn parse_number(token: &str) -> Result<usize, CommandError> {
        token
            .parse()
            .map_err(|_| CommandError::InvalidNumber(token.to_string()))
    }
}
