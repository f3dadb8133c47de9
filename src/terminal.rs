//! Line oriented terminal I/O used by the interactive commands.
//!
//! Commands receive a [`Terminal`] instead of touching the process streams
//! so the prompts can be driven from tests.

use std::io::{self, BufRead, Write};

/// Reads a secret without echoing it.
pub trait PasswordReader {
    fn read_password(&self) -> io::Result<String>;
}

/// Reads from the controlling terminal with echo disabled.
pub struct StdinPasswordReader;

impl PasswordReader for StdinPasswordReader {
    fn read_password(&self) -> io::Result<String> {
        rpassword::read_password()
    }
}

pub struct Terminal<'a> {
    pub input: &'a mut dyn BufRead,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
    pub password: &'a dyn PasswordReader,
}

impl<'a> Terminal<'a> {
    pub fn new(
        input: &'a mut dyn BufRead,
        out: &'a mut dyn Write,
        err: &'a mut dyn Write,
        password: &'a dyn PasswordReader,
    ) -> Self {
        Terminal {
            input,
            out,
            err,
            password,
        }
    }

    /// Writes the prompt text without a line break.
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush()
    }

    /// Reads one line and trims surrounding whitespace.
    ///
    /// Returns `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompts and reads a masked value. The prompt line is ended even when
    /// the read fails.
    pub fn read_password(&mut self, text: &str) -> io::Result<String> {
        self.prompt(text)?;
        let password = self.password.read_password();
        writeln!(self.out)?;
        password
    }

    pub fn println(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    pub fn eprintln(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.err, "{text}")?;
        self.err.flush()
    }
}
