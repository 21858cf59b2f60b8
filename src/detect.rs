//! Command-name detection from editor context.

/// What the editor knows about the cursor when a command is invoked.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorContext<'a> {
    /// Text of the line holding the cursor.
    pub line: &'a str,
    /// Cursor position as a character offset into `line`.
    pub column: usize,
    /// Selected text, if any.
    pub selection: Option<&'a str>,
}

/// Cuts a call expression down to the command name.
///
/// `"CHANGE LICENSES(arg1; arg2)"` becomes `"CHANGE LICENSES"`.
pub fn clean_command_name(text: &str) -> String {
    let name = match text.find('(') {
        Some(paren) => &text[..paren],
        None => text,
    };
    name.trim().to_string()
}

/// Picks a command name from the cursor context.
///
/// A non-blank selection wins. Otherwise an uppercase span around the cursor
/// is used when it looks like a command (`ARRAY TO LIST`), and as a last
/// resort the word under the cursor.
pub fn detect_command_name(context: &CursorContext<'_>) -> Option<String> {
    if let Some(selection) = context.selection {
        let selected = selection.trim();
        if !selected.is_empty() {
            return non_empty(clean_command_name(selected));
        }
    }

    let chars: Vec<char> = context.line.chars().collect();
    let column = context.column.min(chars.len());

    let span: String = expand(&chars, column, is_command_char).iter().collect();
    let span = span.trim();
    if looks_like_command(span) {
        return non_empty(clean_command_name(span));
    }

    let word: String = expand(&chars, column, is_word_char).iter().collect();
    non_empty(clean_command_name(&word))
}

/// Validates user input from a command-name prompt.
pub fn validate_command_name(input: &str) -> Result<String, &'static str> {
    let name = input.trim();
    if name.is_empty() {
        return Err("Command name cannot be empty");
    }
    Ok(name.to_string())
}

fn expand(chars: &[char], column: usize, accept: fn(char) -> bool) -> &[char] {
    let mut start = column;
    let mut end = column;
    while start > 0 && accept(chars[start - 1]) {
        start -= 1;
    }
    while end < chars.len() && accept(chars[end]) {
        end += 1;
    }
    &chars[start..end]
}

fn is_command_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c.is_whitespace()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn looks_like_command(span: &str) -> bool {
    let mut chars = span.chars();
    matches!(chars.next(), Some(first) if first.is_ascii_uppercase())
        && span.chars().count() > 1
        && chars.all(is_command_char)
}

fn non_empty(name: String) -> Option<String> {
    (!name.is_empty()).then_some(name)
}
