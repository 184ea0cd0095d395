//! Plain-text rendering of listings and the folder tree

use std::io::{self, Write};

use arcnav::utils::{format_size, format_time};
use arcnav::{DirectoryTreeNode, NodeId};

use super::App;

impl App {
    pub fn render_listing(&self, out: &mut impl Write) -> io::Result<()> {
        let rows = self.navigator.listing();
        if rows.is_empty() {
            return writeln!(out, "  (empty)");
        }

        let name_width = rows.iter().map(|r| r.name.len() + 1).max().unwrap_or(4).max(4);
        let type_width = rows.iter().map(|r| r.type_label.len()).max().unwrap_or(4).max(4);
        writeln!(
            out,
            "  {:<name_width$}  {:<type_width$}  {:>8}  {:>8}  {:>5}  {:<16}  Directory",
            "Name", "Type", "Size", "Packed", "Ratio", "Modified"
        )?;
        for row in rows {
            let name = if row.is_container {
                format!("{}/", row.name)
            } else {
                row.name.clone()
            };
            writeln!(
                out,
                "  {:<name_width$}  {:<type_width$}  {:>8}  {:>8}  {:>5}  {:<16}  {}",
                name,
                row.type_label,
                row.size_text(),
                row.compressed_size_text(),
                row.ratio_text(),
                format_time(&row.modified),
                row.relative_directory
            )?;
        }

        let affordances = self.navigator.affordances();
        writeln!(
            out,
            "  [up: {}] [back: {}] [fwd: {}]",
            on_off(affordances.can_go_up),
            on_off(affordances.can_go_back),
            on_off(affordances.can_go_forward)
        )
    }

    pub fn render_tree(&self, out: &mut impl Write) -> io::Result<()> {
        let Some(panel) = self.navigator.directory_tree() else {
            return writeln!(out, "  (no archive)");
        };
        let current = self.navigator.current();
        render_tree_node(panel, 0, current, out)
    }

    pub fn render_file(&self, node: NodeId, out: &mut impl Write) -> io::Result<()> {
        let Some(row) = self.navigator.listing().iter().find(|r| r.node == node) else {
            return Ok(());
        };
        writeln!(out, "  {}", row.name)?;
        writeln!(out, "    type:      {}", row.type_label)?;
        writeln!(
            out,
            "    size:      {} ({} bytes)",
            format_size(row.decompressed_size),
            row.decompressed_size
        )?;
        writeln!(
            out,
            "    packed:    {} ({} bytes)",
            format_size(row.compressed_size),
            row.compressed_size
        )?;
        writeln!(out, "    ratio:     {}", row.ratio_text())?;
        writeln!(out, "    modified:  {}", format_time(&row.modified))
    }
}

fn render_tree_node(
    node: &DirectoryTreeNode,
    depth: usize,
    current: Option<NodeId>,
    out: &mut impl Write,
) -> io::Result<()> {
    let marker = if node.children().is_empty() {
        ' '
    } else if node.is_expanded() {
        '-'
    } else {
        '+'
    };
    let here = if current == Some(node.node) { "  <" } else { "" };
    writeln!(out, "  {}{} {}{}", "  ".repeat(depth), marker, node.name, here)?;

    if node.is_expanded() {
        for child in node.children() {
            render_tree_node(child, depth + 1, current, out)?;
        }
    }
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
