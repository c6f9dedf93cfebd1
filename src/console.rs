//! Renders a token stream as indented, optionally colored terminal text.
//!
//! The formatter never looks at the original value: every decision is made
//! from the tokens and a small amount of presentation state.
//!
//! ## Examples
//!
//! ```rust
//! use dumper::{ConsoleFormatter, Parser, Realm, Theme, Value};
//!
//! let realm = Realm::new();
//! let user = realm.object();
//! user.insert("id", 1);
//! user.insert("tags", realm.array(["admin"]));
//!
//! let mut parser = Parser::default();
//! parser.parse(&Value::from(&user));
//!
//! let output = ConsoleFormatter::new(Theme::plain()).format(&parser.flush());
//! assert_eq!(output, "{\n  id: 1,\n  tags: [\n    'admin',\n  ],\n}");
//! ```

use crate::inspect;
use crate::theme::Theme;
use crate::token::Token;
use owo_colors::Style;

/// Columns after which string values are wrapped.
const WRAP_WIDTH: usize = 70;

/// Presentation state for a single `format` call.
#[derive(Debug, Default)]
struct FormatterState {
    indentation: usize,
    /// The last key was `stack`.
    is_stack: bool,
    is_static_member: bool,
    static_depth: usize,
}

impl FormatterState {
    fn spaces(&self) -> String {
        " ".repeat(self.indentation * 2)
    }

    fn newline(&self) -> String {
        format!("\n{}", self.spaces())
    }

    fn increment(&mut self) {
        self.indentation += 1;
    }

    fn decrement(&mut self) {
        self.indentation = self.indentation.saturating_sub(1);
    }
}

/// Formats tokens for the terminal.
#[derive(Clone, Debug, Default)]
pub struct ConsoleFormatter {
    theme: Theme,
}

impl ConsoleFormatter {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        ConsoleFormatter { theme }
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Formats a complete token stream.
    #[must_use]
    pub fn format(&self, tokens: &[Token]) -> String {
        let mut state = FormatterState::default();
        let mut out = String::new();
        for token in tokens {
            out.push_str(&self.print(token, &mut state));
        }
        out
    }

    fn paint(&self, style: &Style, text: &str) -> String {
        self.theme.paint(style, text)
    }

    fn open_brace(&self) -> String {
        self.paint(&self.theme.braces, "{")
    }

    fn close_brace(&self) -> String {
        self.paint(&self.theme.braces, "}")
    }

    fn open_bracket(&self) -> String {
        self.paint(&self.theme.brackets, "[")
    }

    fn close_bracket(&self) -> String {
        self.paint(&self.theme.brackets, "]")
    }

    fn more_items(
        &self,
        state: &FormatterState,
        style: &Style,
        limit: usize,
        size: usize,
    ) -> String {
        let left = size.saturating_sub(limit);
        if left == 0 {
            return String::new();
        }
        let label = if left == 1 {
            "1 more item".to_string()
        } else {
            format!("{left} more items")
        };
        state.newline() + &self.paint(style, &format!("[...{label}]"))
    }

    fn print(&self, token: &Token, state: &mut FormatterState) -> String {
        let theme = &self.theme;
        match token {
            Token::Collapse { name, token } => {
                let (label_style, open, close) = match token.as_ref() {
                    Token::ObjectStart { .. } => {
                        (&theme.object_label, self.open_brace(), self.close_brace())
                    }
                    _ => (&theme.array_label, self.open_bracket(), self.close_bracket()),
                };
                format!(
                    "{} {open} {} {close}",
                    self.paint(label_style, name),
                    self.paint(&theme.collapse_label, "collapsed"),
                )
            }

            Token::ObjectStart { constructor_name } => {
                state.increment();
                let hide_label = (state.is_static_member && state.static_depth == 0)
                    || constructor_name.as_deref() == Some("Object");
                let label = if hide_label {
                    String::new()
                } else {
                    let name = constructor_name.as_deref().unwrap_or("Object [null]");
                    self.paint(&theme.object_label, name) + " "
                };
                label + &self.open_brace()
            }
            Token::ObjectEnd => {
                state.decrement();
                state.newline() + &self.close_brace()
            }
            Token::ObjectKey {
                value, is_symbol, ..
            } => {
                state.is_stack = value == "stack";
                let key = if *is_symbol {
                    format!("[{value}]")
                } else {
                    value.clone()
                };

                let mut prefix = String::new();
                if state.is_static_member {
                    state.static_depth += 1;
                    if state.static_depth == 1 {
                        prefix = self.paint(&theme.object_key_prefix, "static") + " ";
                    }
                }
                state.newline() + &prefix + &self.paint(&theme.object_key, &key) + ": "
            }
            Token::ObjectValueStart => String::new(),
            Token::ObjectValueEnd => {
                if state.is_static_member {
                    state.static_depth = state.static_depth.saturating_sub(1);
                }
                ",".to_string()
            }
            Token::ObjectValueGetter => {
                if state.is_static_member {
                    state.static_depth = state.static_depth.saturating_sub(1);
                }
                self.paint(&theme.getter_label, "[Getter]") + ","
            }
            Token::ObjectCircularRef
            | Token::ArrayCircularRef
            | Token::MapCircularRef
            | Token::SetCircularRef => self.paint(&theme.circular_label, "[*Circular]"),
            Token::ObjectMaxDepthRef => self.paint(&theme.object_label, "[Object]"),

            Token::ArrayStart { name, .. } => {
                state.increment();
                let label = if name == "Array" {
                    String::new()
                } else {
                    self.paint(&theme.array_label, name) + " "
                };
                label + &self.open_bracket()
            }
            Token::ArrayEnd { .. } => {
                state.decrement();
                state.newline() + &self.close_bracket()
            }
            Token::ArrayValueStart { .. } | Token::SetValueStart { .. } => state.newline(),
            Token::ArrayValueEnd { .. } | Token::SetValueEnd { .. } => ",".to_string(),
            Token::ArrayValueHole { .. } => {
                state.newline() + &self.paint(&theme.undefined, "<hole>") + ","
            }
            Token::ArrayMaxDepthRef => self.paint(&theme.array_label, "[Array]"),
            Token::ArrayMaxLengthRef { limit, size } => {
                self.more_items(state, &theme.array_label, *limit, *size)
            }

            Token::PrototypeStart => {
                let indent = state.newline();
                state.increment();
                indent + &self.paint(&theme.prototype_label, "[[Prototype]] ") + &self.open_brace()
            }
            Token::PrototypeEnd => {
                state.decrement();
                state.newline() + &self.close_brace()
            }

            Token::MapStart { size } => {
                state.increment();
                self.paint(&theme.map_label, &format!("Map({size}) ")) + &self.open_brace()
            }
            Token::MapEnd { .. } => {
                state.decrement();
                state.newline() + &self.close_brace()
            }
            Token::MapRowStart { .. } => {
                let indent = state.newline();
                state.increment();
                indent + &self.open_bracket()
            }
            Token::MapRowEnd { .. } => {
                state.decrement();
                state.newline() + &self.close_bracket() + ","
            }
            Token::MapKeyStart { .. } => {
                state.newline() + &self.paint(&theme.object_key, "key") + ": "
            }
            Token::MapValueStart { .. } => {
                state.newline() + &self.paint(&theme.object_key, "value") + ": "
            }
            Token::MapKeyEnd { .. } | Token::MapValueEnd { .. } => ",".to_string(),
            Token::MapMaxDepthRef => self.paint(&theme.map_label, "[Map]"),
            Token::MapMaxLengthRef { limit, size } => {
                self.more_items(state, &theme.map_label, *limit, *size)
            }

            Token::SetStart { size } => {
                state.increment();
                self.paint(&theme.set_label, &format!("Set({size}) ")) + &self.open_bracket()
            }
            Token::SetEnd { .. } => {
                state.decrement();
                state.newline() + &self.close_bracket()
            }
            Token::SetMaxDepthRef => self.paint(&theme.set_label, "[Set]"),
            Token::SetMaxLengthRef { limit, size } => {
                self.more_items(state, &theme.set_label, *limit, *size)
            }

            Token::StaticMembersStart => {
                state.is_static_member = true;
                state.static_depth = 0;
                " ".to_string()
            }
            Token::StaticMembersEnd => {
                state.is_static_member = false;
                state.static_depth = 0;
                String::new()
            }

            Token::String { value } => {
                let value = if state.is_stack {
                    reindent_stack(value, &state.spaces())
                } else {
                    word_wrap(value, WRAP_WIDTH, &state.spaces())
                };
                self.paint(&theme.string, &value)
            }
            Token::Number { value } => {
                self.paint(&theme.number, &inspect::number_to_string(*value))
            }
            Token::Boolean { value } => self.paint(&theme.boolean, &value.to_string()),
            Token::BigInt { value } => self.paint(&theme.big_int, value),
            Token::Undefined => self.paint(&theme.undefined, "undefined"),
            Token::Null => self.paint(&theme.null, "null"),
            Token::Symbol { value } => self.paint(&theme.symbol, value),
            Token::Date { value } => self.paint(&theme.date, value),
            Token::Regexp { value } => self.paint(&theme.regex, value),
            Token::Buffer { value } => self.paint(&theme.buffer, value),
            Token::Function {
                name,
                is_class,
                is_async,
                is_generator,
            } => {
                if *is_class {
                    self.paint(&theme.class_label, &format!("[class {name}]"))
                } else {
                    let asyncness = if *is_async { "async " } else { "" };
                    let generator = if *is_generator { "*" } else { "" };
                    self.paint(
                        &theme.function_label,
                        &format!("[{asyncness}{generator}function {name}]"),
                    )
                }
            }
            Token::Unknown { value, .. } => self.paint(&theme.unknown_label, value),

            Token::WeakSet => self.paint(&theme.weak_set_label, "[WeakSet]"),
            Token::WeakMap => self.paint(&theme.weak_map_label, "[WeakMap]"),
            Token::WeakRef => self.paint(&theme.weak_ref_label, "[WeakRef]"),
            Token::Observable => self.paint(&theme.observable_label, "[Observable]"),
            Token::Generator { is_async } => {
                let label = if *is_async {
                    "[AsyncGenerator] {}"
                } else {
                    "[Generator] {}"
                };
                self.paint(&theme.generator_label, label)
            }
            Token::Promise { is_fulfilled } => {
                let label = if *is_fulfilled { "resolved" } else { "pending" };
                self.paint(&theme.promise_label, &format!("[Promise<{label}>]"))
            }
            Token::Blob { size, content_type } => {
                let kind = if content_type.is_empty() {
                    String::new()
                } else {
                    format!(
                        ", {}{}",
                        self.paint(&theme.object_key, "type: "),
                        self.paint(&theme.string, content_type)
                    )
                };
                format!(
                    "{} {}{}{}{kind}{}",
                    self.paint(&theme.blob_label, "[Blob]"),
                    self.open_brace(),
                    self.paint(&theme.object_key, "size: "),
                    self.paint(&theme.number, &size.to_string()),
                    self.close_brace(),
                )
            }
        }
    }
}

/// Puts each frame of an escaped stack trace on its own line, aligned with
/// the current indentation.
fn reindent_stack(value: &str, indent: &str) -> String {
    value
        .split("\\n")
        .enumerate()
        .map(|(index, row)| {
            if index > 0 {
                format!("{indent}{}", row.trim())
            } else {
                row.trim().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_wrap_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{200B}'
}

/// Breaks `value` into lines of at most `width` characters at whitespace.
/// Words longer than `width` stay whole. Continuation lines start with
/// `indent`.
///
/// # Examples
///
/// ```rust
/// use dumper::console::word_wrap;
///
/// assert_eq!(word_wrap("aaa bbb ccc", 7, "  "), "aaa bbb \n  ccc");
/// ```
#[must_use]
pub fn word_wrap(value: &str, width: usize, indent: &str) -> String {
    wrap_lines(value, width).join(format!("\n{indent}").as_str())
}

/// Splits `value` into the lines [`word_wrap`] joins.
pub(crate) fn wrap_lines(value: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = value.chars().collect();
    let mut lines: Vec<String> = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        match next_line_end(&chars, start, width) {
            Some(end) => {
                let mut line: String = chars[start..end].iter().collect();
                if line.ends_with('\n') {
                    line.pop();
                }
                lines.push(line);
                start = end;
            }
            None => start += 1,
        }
    }

    lines
}

/// End (exclusive) of the line that starts at `start`, including the run of
/// whitespace that follows it.
fn next_line_end(chars: &[char], start: usize, width: usize) -> Option<usize> {
    let take_spaces = |mut end: usize| {
        while end < chars.len() && is_wrap_space(chars[end]) {
            end += 1;
        }
        end
    };

    // Up to `width` characters (no line breaks) followed by whitespace or the end.
    let run = chars[start..]
        .iter()
        .take(width)
        .take_while(|c| **c != '\n' && **c != '\r')
        .count();
    for length in (1..=run).rev() {
        let end = start + length;
        if end == chars.len() {
            return Some(end);
        }
        if is_wrap_space(chars[end]) {
            return Some(take_spaces(end));
        }
    }

    // A single word longer than `width`.
    let word = chars[start..]
        .iter()
        .take_while(|c| !is_wrap_space(**c))
        .count();
    if word == 0 {
        return None;
    }
    let end = start + word;
    if end == chars.len() || is_wrap_space(chars[end]) {
        Some(take_spaces(end))
    } else {
        None
    }
}
