//! Text editing for form fields
//!
//! Field text lives in the form; the app keeps a cursor per field (a char
//! index) and applies edits to both together.

/// A single editing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Insert(char),
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

fn byte_index(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map_or(text.len(), |(index, _)| index)
}

/// Start of the line the cursor is on, as a char index
fn line_start(text: &str, cursor: usize) -> usize {
    let before: Vec<char> = text.chars().take(cursor).collect();
    before.iter().rposition(|c| *c == '\n').map_or(0, |i| i + 1)
}

/// End of the line the cursor is on, as a char index
fn line_end(text: &str, cursor: usize) -> usize {
    cursor
        + text
            .chars()
            .skip(cursor)
            .take_while(|c| *c != '\n')
            .count()
}

/// Apply `edit` to `text` at `cursor`
///
/// The cursor is clamped to the text first, so it stays valid after the
/// text was changed elsewhere. Returns whether the text changed.
pub fn apply(text: &mut String, cursor: &mut usize, edit: Edit) -> bool {
    let len = text.chars().count();
    *cursor = (*cursor).min(len);

    match edit {
        Edit::Insert(c) => {
            let index = byte_index(text, *cursor);
            text.insert(index, c);
            *cursor += 1;
            true
        }
        Edit::Newline => apply(text, cursor, Edit::Insert('\n')),
        Edit::Backspace => {
            if *cursor == 0 {
                return false;
            }
            *cursor -= 1;
            let index = byte_index(text, *cursor);
            text.remove(index);
            true
        }
        Edit::Delete => {
            if *cursor == len {
                return false;
            }
            let index = byte_index(text, *cursor);
            text.remove(index);
            true
        }
        Edit::Left => {
            *cursor = cursor.saturating_sub(1);
            false
        }
        Edit::Right => {
            *cursor = (*cursor + 1).min(len);
            false
        }
        Edit::Home => {
            *cursor = line_start(text, *cursor);
            false
        }
        Edit::End => {
            *cursor = line_end(text, *cursor);
            false
        }
    }
}

/// Line and column of the cursor, both 0-based
pub fn cursor_position(text: &str, cursor: usize) -> (usize, usize) {
    let before: Vec<char> = text.chars().take(cursor).collect();
    let line = before.iter().filter(|c| **c == '\n').count();
    let column = cursor.min(before.len()) - line_start(text, cursor);
    (line, column)
}
