//! Line-based console capability used by the menu.
//!
//! The menu only ever talks to a [`Console`], so it can be driven by real
//! standard streams or by a scripted double in tests.

use mockall::automock;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

#[automock]
pub trait Console {
    /// Reads one line without its line ending. `None` means input is closed.
    fn read_line(&mut self) -> io::Result<Option<String>>;
    /// Writes a prompt without a trailing newline.
    fn write(&mut self, message: &str) -> io::Result<()>;
    fn write_line(&mut self, message: &str) -> io::Result<()>;
}

/// Console backed by the process's standard input and output.
pub struct StdConsole {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn write(&mut self, message: &str) -> io::Result<()> {
        let mut out = self.stdout.lock();
        out.write_all(message.as_bytes())?;
        out.flush()
    }

    fn write_line(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.stdout.lock(), "{message}")
    }
}

/// Console fed from a fixed list of input lines that records everything written.
///
/// Prompts written with [`Console::write`] are recorded as their own entries.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Whether any written entry equals `message` exactly.
    pub fn printed(&self, message: &str) -> bool {
        self.output.iter().any(|line| line == message)
    }

    /// Number of written entries equal to `message`.
    pub fn count(&self, message: &str) -> usize {
        self.output.iter().filter(|line| *line == message).count()
    }

    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn write(&mut self, message: &str) -> io::Result<()> {
        self.output.push(message.to_string());
        Ok(())
    }

    fn write_line(&mut self, message: &str) -> io::Result<()> {
        self.output.push(message.to_string());
        Ok(())
    }
}
