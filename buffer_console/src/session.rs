//! # Console Session
//!
//! The interactive loop: show the menu, read a choice, prompt for its
//! arguments, run one buffer operation, report the outcome.

use std::io::{BufRead, Write};
use std::path::Path;

use buffer_core::{BufferError, TextBuffer};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::commands::{CommandError, MenuCommand, MenuParser};
use crate::io::DocumentIo;

/// ANSI erase-display plus cursor-home
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Session error types
///
/// Only failures of the terminal streams end a session; buffer and document
/// errors are reported to the user and the loop continues.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Console session over arbitrary input/output streams
pub struct Session<R, W, D> {
    buffer: TextBuffer,
    input: R,
    output: W,
    io: D,
    show_menu: bool,
}

impl<R: BufRead, W: Write, D: DocumentIo> Session<R, W, D> {
    pub fn new(buffer: TextBuffer, input: R, output: W, io: D) -> Self {
        Self {
            buffer,
            input,
            output,
            io,
            show_menu: true,
        }
    }

    pub fn with_menu(mut self, show_menu: bool) -> Self {
        self.show_menu = show_menu;
        self
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Run until `0` or end of input
    pub fn run(&mut self) -> Result<(), SessionError> {
        info!("session started");
        loop {
            if self.show_menu {
                self.output.write_all(MenuCommand::menu_text().as_bytes())?;
                self.output.flush()?;
            }

            let Some(line) = self.read_line()? else {
                break;
            };

            let flow = match MenuParser::parse(&String::from_utf8_lossy(&line)) {
                Ok(command) => self.execute(command)?,
                Err(err) => {
                    debug!(%err, "rejected menu input");
                    writeln!(self.output, "Invalid command")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }
        self.output.flush()?;
        info!("session ended");
        Ok(())
    }

    /// Prompt for the command's arguments and run it
    pub fn execute(&mut self, command: MenuCommand) -> Result<Flow, SessionError> {
        debug!(?command, "executing");
        match command {
            MenuCommand::Exit => return Ok(Flow::Exit),
            MenuCommand::Append => {
                let Some(text) = self.prompt("Enter text to append:")? else {
                    return Ok(Flow::Exit);
                };
                self.buffer.append(text);
            }
            MenuCommand::NewLine => self.buffer.append("\n"),
            MenuCommand::Save => {
                let Some(path) = self.prompt_text("Enter the filename to save:")? else {
                    return Ok(Flow::Exit);
                };
                self.save(&path)?;
            }
            MenuCommand::Load => {
                let Some(path) = self.prompt_text("Enter the filename to load:")? else {
                    return Ok(Flow::Exit);
                };
                self.load(&path)?;
            }
            MenuCommand::Print => {
                writeln!(self.output, "Current saved text:")?;
                self.output.write_all(self.buffer.text())?;
                writeln!(self.output)?;
            }
            MenuCommand::Find => {
                let Some(needle) = self.prompt("Enter the text to find:")? else {
                    return Ok(Flow::Exit);
                };
                match self.buffer.find_text(&needle) {
                    Some(pos) => writeln!(self.output, "Found text at position {}", pos)?,
                    None => writeln!(self.output, "Text not found.")?,
                }
            }
            MenuCommand::Insert => return self.insert(),
            MenuCommand::Clear => self.output.write_all(CLEAR_SCREEN.as_bytes())?,
            MenuCommand::Undo => {
                let result = self.buffer.undo();
                self.report(result)?;
            }
            MenuCommand::Redo => {
                let result = self.buffer.redo();
                self.report(result)?;
            }
            MenuCommand::Delete | MenuCommand::Cut | MenuCommand::Copy => {
                return self.edit_range(command);
            }
            MenuCommand::Paste => {
                let Some(line) = self.prompt_text("Enter the position to paste:")? else {
                    return Ok(Flow::Exit);
                };
                match MenuParser::parse_position(&line) {
                    Ok(pos) => {
                        let result = self.buffer.paste_text(pos);
                        self.report(result)?;
                    }
                    Err(err) => self.report_command_error(err)?,
                }
            }
            MenuCommand::State => match serde_json::to_string_pretty(&self.buffer.state()) {
                Ok(json) => writeln!(self.output, "{}", json)?,
                Err(err) => writeln!(self.output, "Failed to render state: {}", err)?,
            },
        }
        Ok(Flow::Continue)
    }

    fn insert(&mut self) -> Result<Flow, SessionError> {
        let Some(pos_line) = self.prompt_text("Enter the position to insert text:")? else {
            return Ok(Flow::Exit);
        };
        let pos = match MenuParser::parse_position(&pos_line) {
            Ok(pos) => pos,
            Err(err) => {
                self.report_command_error(err)?;
                return Ok(Flow::Continue);
            }
        };

        let Some(text) = self.prompt("Enter the text to insert:")? else {
            return Ok(Flow::Exit);
        };
        let Some(replace_line) = self.prompt_text(
            "Enter the number of characters to replace at the insertion point (0 for none):",
        )?
        else {
            return Ok(Flow::Exit);
        };
        let replace_len = match MenuParser::parse_length(&replace_line) {
            Ok(len) => len,
            Err(err) => {
                self.report_command_error(err)?;
                return Ok(Flow::Continue);
            }
        };

        let result = self.buffer.insert_and_replace(pos, text, replace_len);
        self.report(result)?;
        Ok(Flow::Continue)
    }

    fn edit_range(&mut self, command: MenuCommand) -> Result<Flow, SessionError> {
        let verb = match command {
            MenuCommand::Delete => "delete",
            MenuCommand::Cut => "cut",
            _ => "copy",
        };
        let message = format!("Enter the starting position and length to {}:", verb);
        let Some(line) = self.prompt_text(&message)? else {
            return Ok(Flow::Exit);
        };

        let (pos, len) = match MenuParser::parse_range(&line) {
            Ok(range) => range,
            Err(err) => {
                self.report_command_error(err)?;
                return Ok(Flow::Continue);
            }
        };

        let result = match command {
            MenuCommand::Delete => self.buffer.delete_text(pos, len),
            MenuCommand::Cut => self.buffer.cut_text(pos, len),
            _ => self.buffer.copy_text(pos, len),
        };
        self.report(result)?;
        Ok(Flow::Continue)
    }

    fn save(&mut self, path: &str) -> Result<(), SessionError> {
        match self.io.save(Path::new(path), self.buffer.save_raw()) {
            Ok(()) => writeln!(self.output, "Saved to {}", path)?,
            Err(err) => {
                warn!(%err, "save failed");
                writeln!(self.output, "Failed to save to {}: {}", path, err)?;
            }
        }
        Ok(())
    }

    fn load(&mut self, path: &str) -> Result<(), SessionError> {
        match self.io.load(Path::new(path)) {
            Ok(content) => {
                self.buffer.load_raw(content);
                writeln!(self.output, "Loaded from {}", path)?;
            }
            Err(err) => {
                warn!(%err, "load failed");
                writeln!(self.output, "Failed to load from {}: {}", path, err)?;
            }
        }
        Ok(())
    }

    fn report(&mut self, result: Result<(), BufferError>) -> Result<(), SessionError> {
        if let Err(err) = result {
            writeln!(self.output, "{}.", err)?;
        }
        Ok(())
    }

    fn report_command_error(&mut self, err: CommandError) -> Result<(), SessionError> {
        writeln!(self.output, "{}", err)?;
        Ok(())
    }

    /// Prompt for raw bytes destined for the buffer
    fn prompt(&mut self, message: &str) -> Result<Option<Vec<u8>>, SessionError> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Prompt for a number or path; invalid UTF-8 is replaced
    fn prompt_text(&mut self, message: &str) -> Result<Option<String>, SessionError> {
        Ok(self
            .prompt(message)?
            .map(|line| String::from_utf8_lossy(&line).into_owned()))
    }

    /// One line of raw bytes without its terminator; `None` at end of input
    fn read_line(&mut self) -> Result<Option<Vec<u8>>, SessionError> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::FsDocumentIo;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_script(script: impl AsRef<[u8]>) -> (TextBuffer, String) {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new(
            TextBuffer::new(),
            Cursor::new(script.as_ref().to_vec()),
            Vec::new(),
            FsDocumentIo::with_root(dir.path()),
        )
        .with_menu(false);
        session.run().unwrap();

        let output = String::from_utf8_lossy(session.output()).into_owned();
        (session.buffer, output)
    }

    #[test]
    fn test_exit_immediately() {
        let (buffer, output) = run_script("0\n");
        assert!(buffer.is_empty());
        assert!(output.is_empty());
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let (buffer, _) = run_script("1\nabc\n");
        assert_eq!(buffer.text(), b"abc");
    }

    #[test]
    fn test_end_of_input_mid_prompt() {
        let (buffer, output) = run_script("1\n");
        assert!(buffer.is_empty());
        assert_eq!(output, "Enter text to append:\n");
    }

    #[test]
    fn test_append_and_new_line() {
        let (buffer, _) = run_script("1\nfirst\n2\n1\nsecond\n0\n");
        assert_eq!(buffer.text(), b"first\nsecond");
    }

    #[test]
    fn test_crlf_input() {
        let (buffer, _) = run_script("1\r\nabc\r\n0\r\n");
        assert_eq!(buffer.text(), b"abc");
    }

    #[test]
    fn test_non_utf8_input_is_kept_raw() {
        let (buffer, output) = run_script(b"1\nok\n1\ncaf\xe9\n1\nafter\n6\ncaf\xe9\n5\n0\n");
        assert_eq!(buffer.text(), b"okcaf\xe9after");
        assert!(output.contains("Found text at position 2\n"));
        assert!(output.contains("Current saved text:\nokcaf\u{fffd}after\n"));
    }

    #[test]
    fn test_replace_length_errors_name_the_length() {
        let (buffer, output) = run_script("1\nabc\n7\n1\nx\n\n0\n");
        assert_eq!(buffer.text(), b"abc");
        assert!(output.contains("Missing argument: length"));
    }

    #[test]
    fn test_print() {
        let (_, output) = run_script("1\nhello\n5\n0\n");
        assert!(output.ends_with("Current saved text:\nhello\n"));
    }

    #[test]
    fn test_invalid_menu_choice() {
        let (_, output) = run_script("42\nabc\n0\n");
        assert_eq!(output, "Invalid command\nInvalid command\n");
    }

    #[test]
    fn test_undo_when_empty_reports() {
        let (_, output) = run_script("9\n10\n0\n");
        assert_eq!(output, "Cannot undo further.\nCannot redo further.\n");
    }

    #[test]
    fn test_bad_range_is_reported() {
        let (buffer, output) = run_script("1\nabc\n11\n2 5\n11\nx 1\n0\n");
        assert_eq!(buffer.text(), b"abc");
        assert!(output.contains("Invalid position or length: 2+5 outside 0..3."));
        assert!(output.contains("Invalid number: x"));
    }

    #[test]
    fn test_clear_console() {
        let (_, output) = run_script("8\n0\n");
        assert_eq!(output, CLEAR_SCREEN);
    }

    #[test]
    fn test_state_report_is_json() {
        let (_, output) = run_script("1\nab\n13\n0 1\n15\n0\n");
        let json_start = output.find('{').unwrap();
        let state: serde_json::Value = serde_json::from_str(&output[json_start..]).unwrap();
        assert_eq!(state["length"], 2);
        assert_eq!(state["capacity"], 10);
        assert_eq!(state["clipboard"], serde_json::json!([b'a']));
        assert_eq!(state["undo_depth"], 1);
    }
}
