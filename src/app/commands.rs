//! Command implementations

use std::io::{self, Write};

use arcnav::{Activation, NodeId, Result};

use super::{App, CommandResult};

impl App {
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> io::Result<CommandResult> {
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        let outcome = match cmd {
            "" => return Ok(CommandResult::None),
            "q" | "quit" | "exit" => return Ok(CommandResult::Exit),
            "ls" | "l" => return Ok(CommandResult::Redraw),
            "pwd" => {
                writeln!(out, "/{}", self.navigator.current_path().unwrap_or_default())?;
                return Ok(CommandResult::None);
            }
            "tree" | "t" => {
                self.render_tree(out)?;
                return Ok(CommandResult::None);
            }
            "help" | "?" => {
                writeln!(out, "ls, cd NAME, open NAME, up, back, fwd, tree, pwd, q")?;
                return Ok(CommandResult::None);
            }
            "cd" if arg == ".." => self.navigator.go_up(),
            "cd" => match self.find_row(arg) {
                Some(node) => self.navigator.enter(node),
                None => return report_missing(arg, out),
            },
            "open" | "o" => return self.cmd_open(arg, out),
            "up" | "u" => self.navigator.go_up(),
            "back" | "b" => self.navigator.go_back(),
            "fwd" | "forward" | "f" => self.navigator.go_forward(),
            _ => {
                writeln!(out, "unknown command '{cmd}', try 'help'")?;
                return Ok(CommandResult::None);
            }
        };

        self.finish_move(outcome, out)
    }

    fn cmd_open(&mut self, name: &str, out: &mut impl Write) -> io::Result<CommandResult> {
        let Some(node) = self.find_row(name) else {
            return report_missing(name, out);
        };
        match self.navigator.activate(node) {
            Ok(Activation::Entered) => self.finish_move(Ok(()), out),
            Ok(Activation::File(node)) => {
                self.render_file(node, out)?;
                Ok(CommandResult::None)
            }
            Err(e) => self.finish_move(Err(e), out),
        }
    }

    fn finish_move(&mut self, outcome: Result<()>, out: &mut impl Write) -> io::Result<CommandResult> {
        match outcome {
            Ok(()) => {
                self.sync_tree();
                Ok(CommandResult::Redraw)
            }
            Err(e) => {
                writeln!(out, "error: {e}")?;
                Ok(CommandResult::None)
            }
        }
    }

    /// Keep the current folder visible in the folder tree
    fn sync_tree(&mut self) {
        if let Some(current) = self.navigator.current()
            && let Some(panel) = self.navigator.directory_tree_mut()
        {
            panel.expand_to(current);
        }
    }

    fn find_row(&self, name: &str) -> Option<NodeId> {
        self.navigator
            .listing()
            .iter()
            .find(|row| row.name == name)
            .map(|row| row.node)
    }
}

fn report_missing(name: &str, out: &mut impl Write) -> io::Result<CommandResult> {
    writeln!(out, "no entry named '{name}'")?;
    Ok(CommandResult::None)
}
