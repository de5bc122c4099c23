// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pretty printers for reporting information.

use std::{
    borrow::Cow,
    sync::{Mutex, MutexGuard},
};

const VERTICAL: char = '│';
const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

lazy_static::lazy_static! {
    static ref WARNING_PRINTER: Mutex<Vec<Vec<Cow<'static, str>>>> = Mutex::new(vec![]);
}

/// Get the queued warnings. A panic while holding the lock can't leave the
/// queue in a bad state, so poisoning is ignored.
fn warnings() -> MutexGuard<'static, Vec<Vec<Cow<'static, str>>>> {
    WARNING_PRINTER
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// The tree symbol to put in front of a line, given its position.
fn tree_symbol(i_line: usize, last_line: bool, last_block: bool) -> char {
    match (i_line, last_line, last_block) {
        (0, true, true) => UP_AND_RIGHT,
        (0, _, _) => VERTICAL_AND_RIGHT,
        _ => VERTICAL,
    }
}

/// Render blocks of lines as a tree.
fn tree_lines(blocks: &[Vec<Cow<'static, str>>]) -> Vec<String> {
    let num_blocks = blocks.len();
    blocks
        .iter()
        .enumerate()
        .flat_map(|(i_block, block)| {
            let num_lines = block.len();
            block.iter().enumerate().map(move |(i_line, line)| {
                let symbol = tree_symbol(i_line, i_line + 1 == num_lines, i_block + 1 == num_blocks);
                format!("{symbol} {line}")
            })
        })
        .collect()
}

/// Groups of related lines under a bold title, displayed as a tree at info
/// level.
pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    blocks: Vec<Vec<Cow<'static, str>>>,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            blocks: vec![],
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.push(vec![line]);
    }

    pub(crate) fn push_block(&mut self, block: Vec<Cow<'static, str>>) {
        if !block.is_empty() {
            self.blocks.push(block);
        }
    }

    pub(crate) fn display(self) {
        log::info!("{}", console::style(self.title).bold());
        for line in tree_lines(&self.blocks) {
            log::info!("{line}");
        }
        log::info!("");
    }
}

pub(crate) trait Warn {
    /// Queue this warning; it's displayed by [`display_warnings`].
    fn warn(self);
}

impl Warn for &'static str {
    fn warn(self) {
        warnings().push(vec![self.into()]);
    }
}

impl Warn for String {
    fn warn(self) {
        warnings().push(vec![self.into()]);
    }
}

impl Warn for Cow<'static, str> {
    fn warn(self) {
        warnings().push(vec![self]);
    }
}

impl Warn for Vec<Cow<'static, str>> {
    fn warn(self) {
        warnings().push(self);
    }
}

/// Print out any warnings that have been collected as CLI arguments have been
/// parsed, then forget them.
pub(crate) fn display_warnings() {
    let mut warnings = warnings();
    log::debug!("Displaying {} warnings", warnings.len());
    if warnings.is_empty() {
        return;
    }

    log::warn!("{}", console::style("Warnings").bold());
    for line in tree_lines(&warnings) {
        log::warn!("{line}");
    }
    log::warn!("");
    warnings.clear();
}
