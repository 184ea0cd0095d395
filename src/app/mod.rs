//! Line-oriented archive browser
//!
//! Reads one command per line and prints listings and the folder tree as
//! plain text.

mod commands;
mod render;

use std::io::{self, BufRead, Write};

use arcnav::Navigator;

/// Result of executing a command
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    None,
    Redraw,
    Exit,
}

pub struct App {
    pub navigator: Navigator,
}

impl App {
    pub fn new(navigator: Navigator) -> Self {
        Self { navigator }
    }

    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        self.render_listing(&mut out)?;
        let mut lines = input.lines();
        loop {
            write!(out, "/{}> ", self.navigator.current_path().unwrap_or_default())?;
            out.flush()?;
            let Some(line) = lines.next() else {
                writeln!(out)?;
                break;
            };
            match self.execute(line?.trim(), &mut out)? {
                CommandResult::Exit => break,
                CommandResult::Redraw => self.render_listing(&mut out)?,
                CommandResult::None => {}
            }
        }
        Ok(())
    }
}
