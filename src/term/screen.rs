//! Screen helpers

use std::io;

use super::Terminal;
use crate::style::escape::{ALTERNATE_BUFFER, MAIN_BUFFER};

/// Blank every row from `row` to the bottom of the window.
///
/// The cursor is returned to where it was before the call.
pub fn clear_below<T: Terminal + ?Sized>(term: &mut T, row: u16) -> io::Result<()> {
    let (col, current_row) = term.cursor_position()?;
    let (width, height) = term.size()?;
    let blank = " ".repeat(width as usize);
    for y in row..height {
        term.set_cursor_position(0, y)?;
        term.write(&blank)?;
    }
    term.set_cursor_position(col, current_row)
}

pub fn switch_to_alternate_buffer<T: Terminal + ?Sized>(term: &mut T) -> io::Result<()> {
    term.write(ALTERNATE_BUFFER)
}

pub fn switch_to_main_buffer<T: Terminal + ?Sized>(term: &mut T) -> io::Result<()> {
    term.write(MAIN_BUFFER)
}
