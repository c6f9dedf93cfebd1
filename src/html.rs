//! Renders a token stream as HTML.
//!
//! The output is one `<pre>` element with inline styles taken from
//! [`HtmlStyles`]. Every object, array, map, set and prototype block opens a
//! `dumper-group` span holding a `dumper-toggle` button and a hidden `<samp>`
//! body. Expanding those groups is up to a script on the embedding page; this
//! module only emits the markup. All text that comes from the dumped value is
//! HTML-escaped.
//!
//! ## Examples
//!
//! ```rust
//! use dumper::{HtmlFormatter, HtmlStyles, Realm, Value};
//!
//! let realm = Realm::new();
//! let tags = realm.array(["<admin>"]);
//!
//! let tokens = dumper::tokenize(&Value::from(&tags));
//! let html = HtmlFormatter::new(HtmlStyles::unstyled()).format(&tokens);
//! assert!(html.starts_with("<pre style=\"\"><code>"));
//! assert!(html.contains("'&lt;admin&gt;'"));
//! ```

use crate::console::wrap_lines;
use crate::inspect;
use crate::token::Token;

/// Columns after which string values are wrapped.
const WRAP_WIDTH: usize = 70;

const DROPDOWN_ICON: &str = "&#9660;";

/// Inline CSS for each kind of output fragment. Values go verbatim into
/// `style` attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlStyles {
    pub pre: String,
    pub toggle: String,
    pub braces: String,
    pub brackets: String,
    pub number: String,
    pub big_int: String,
    pub boolean: String,
    pub string: String,
    pub null: String,
    pub undefined: String,
    pub prototype_label: String,
    pub symbol: String,
    pub regex: String,
    pub date: String,
    pub buffer: String,
    pub function_label: String,
    pub class_label: String,
    pub array_label: String,
    pub object_label: String,
    pub map_label: String,
    pub set_label: String,
    pub object_key: String,
    pub object_key_prefix: String,
    pub weak_set_label: String,
    pub weak_ref_label: String,
    pub weak_map_label: String,
    pub collapse_label: String,
    pub circular_label: String,
    pub getter_label: String,
    pub observable_label: String,
    pub promise_label: String,
    pub generator_label: String,
    pub blob_label: String,
    pub unknown_label: String,
}

/// The "Night Owl" palette.
impl Default for HtmlStyles {
    fn default() -> Self {
        let css = |value: &str| value.to_string();
        HtmlStyles {
            pre: css("background-color: #061626; color: #c792ea;"),
            toggle: css("color: #637777;"),
            braces: css("color: #ffd700;"),
            brackets: css("color: #ffd700;"),
            number: css("color: #f78c6c;"),
            big_int: css("color: #f78c6c; font-weight: bold;"),
            boolean: css("color: #ff5874; font-style: italic;"),
            string: css("color: #ecc48d;"),
            null: css("color: #7fdbca;"),
            undefined: css("color: #7fdbca;"),
            prototype_label: css("color: #637777;"),
            symbol: css("color: #82aaff;"),
            regex: css("color: #ff5874;"),
            date: css("color: #7fdbca;"),
            buffer: css("color: #7fdbca;"),
            function_label: css("color: #89b4fa;"),
            class_label: css("color: #82aaff;"),
            array_label: css("color: #82aaff;"),
            object_label: css("color: #82aaff;"),
            map_label: css("color: #82aaff;"),
            set_label: css("color: #82aaff;"),
            object_key: css("color: #c792ea;"),
            object_key_prefix: css("color: #637777; font-style: italic; font-weight: bold;"),
            weak_set_label: css("color: #7fdbca;"),
            weak_ref_label: css("color: #7fdbca;"),
            weak_map_label: css("color: #7fdbca;"),
            collapse_label: css("color: #637777; font-style: italic;"),
            circular_label: css("color: #7fdbca;"),
            getter_label: css("color: #7fdbca;"),
            observable_label: css("color: #7fdbca;"),
            promise_label: css("color: #7fdbca;"),
            generator_label: css("color: #7fdbca;"),
            blob_label: css("color: #7fdbca;"),
            unknown_label: css("color: #7fdbca;"),
        }
    }
}

impl HtmlStyles {
    /// Styles with every entry empty. The markup is unchanged, each `style`
    /// attribute is just `""`.
    #[must_use]
    pub fn unstyled() -> Self {
        HtmlStyles {
            pre: String::new(),
            toggle: String::new(),
            braces: String::new(),
            brackets: String::new(),
            number: String::new(),
            big_int: String::new(),
            boolean: String::new(),
            string: String::new(),
            null: String::new(),
            undefined: String::new(),
            prototype_label: String::new(),
            symbol: String::new(),
            regex: String::new(),
            date: String::new(),
            buffer: String::new(),
            function_label: String::new(),
            class_label: String::new(),
            array_label: String::new(),
            object_label: String::new(),
            map_label: String::new(),
            set_label: String::new(),
            object_key: String::new(),
            object_key_prefix: String::new(),
            weak_set_label: String::new(),
            weak_ref_label: String::new(),
            weak_map_label: String::new(),
            collapse_label: String::new(),
            circular_label: String::new(),
            getter_label: String::new(),
            observable_label: String::new(),
            promise_label: String::new(),
            generator_label: String::new(),
            blob_label: String::new(),
            unknown_label: String::new(),
        }
    }
}

/// Presentation state for a single `format` call.
#[derive(Debug, Default)]
struct HtmlState {
    indentation: usize,
    is_stack: bool,
    is_static_member: bool,
    static_depth: usize,
}

impl HtmlState {
    fn spaces(&self) -> String {
        "&nbsp;".repeat(self.indentation * 2)
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

    fn leave_static_member(&mut self) {
        if self.is_static_member {
            self.static_depth = self.static_depth.saturating_sub(1);
        }
    }
}

/// Formats tokens as HTML.
#[derive(Clone, Debug, Default)]
pub struct HtmlFormatter {
    styles: HtmlStyles,
}

impl HtmlFormatter {
    #[must_use]
    pub fn new(styles: HtmlStyles) -> Self {
        HtmlFormatter { styles }
    }

    #[must_use]
    pub fn styles(&self) -> &HtmlStyles {
        &self.styles
    }

    /// Formats a complete token stream into a `<pre><code>` block.
    #[must_use]
    pub fn format(&self, tokens: &[Token]) -> String {
        let mut state = HtmlState::default();
        let mut code = String::new();
        for token in tokens {
            code.push_str(&self.print(token, &mut state));
        }
        format!(
            "<pre style=\"{}\"><code>{code}</code></pre>",
            self.styles.pre
        )
    }

    fn span(style: &str, text: &str) -> String {
        format!("<span style=\"{style}\">{text}</span>")
    }

    fn classed(class: &str, style: &str, text: &str) -> String {
        format!("<span class=\"{class}\" style=\"{style}\">{text}</span>")
    }

    fn open_brace(&self) -> String {
        Self::span(&self.styles.braces, "{")
    }

    fn close_brace(&self) -> String {
        Self::span(&self.styles.braces, "}")
    }

    fn open_bracket(&self) -> String {
        Self::span(&self.styles.brackets, "[")
    }

    fn close_bracket(&self) -> String {
        Self::span(&self.styles.brackets, "]")
    }

    /// Opens a collapsible group: label, opening brace, toggle and the hidden
    /// body that the matching [`HtmlFormatter::close_group`] ends.
    fn open_group(&self, group: &str, label_style: &str, label: &str, open: &str) -> String {
        format!(
            "<span class=\"dumper-group dumper-{group}-group\">{}{open}\
             <button class=\"dumper-toggle\" style=\"{}\"><span>{DROPDOWN_ICON}</span></button>\
             <samp hidden=\"true\">",
            Self::span(label_style, label),
            self.styles.toggle,
        )
    }

    fn close_group(state: &HtmlState, close: &str) -> String {
        format!("{}</samp>{close}</span>", state.newline())
    }

    fn more_items(state: &HtmlState, style: &str, limit: usize, size: usize) -> String {
        let left = size.saturating_sub(limit);
        if left == 0 {
            return String::new();
        }
        let label = if left == 1 {
            "1 more item".to_string()
        } else {
            format!("{left} more items")
        };
        state.newline() + &Self::span(style, &format!("[...{label}]"))
    }

    fn print(&self, token: &Token, state: &mut HtmlState) -> String {
        let styles = &self.styles;
        match token {
            Token::Collapse { name, token } => {
                let (label_style, open, close) = match token.as_ref() {
                    Token::ObjectStart { .. } => {
                        (&styles.object_label, self.open_brace(), self.close_brace())
                    }
                    _ => (&styles.array_label, self.open_bracket(), self.close_bracket()),
                };
                format!(
                    "{} {open} {} {close}",
                    Self::span(label_style, &html_escape(name)),
                    Self::span(&styles.collapse_label, "collapsed"),
                )
            }

            Token::ObjectStart { constructor_name } => {
                state.increment();
                let label = if state.is_static_member && state.static_depth == 0 {
                    " ".to_string()
                } else {
                    let name = constructor_name.as_deref().unwrap_or("Object [null]");
                    format!("{} ", html_escape(name))
                };
                self.open_group("object", &styles.object_label, &label, &self.open_brace())
            }
            Token::ObjectEnd => {
                state.decrement();
                Self::close_group(state, &self.close_brace())
            }
            Token::ObjectKey {
                value, is_symbol, ..
            } => {
                state.is_stack = value == "stack";
                let key = if *is_symbol {
                    format!("[{}]", html_escape(value))
                } else if is_identifier(value) {
                    value.clone()
                } else {
                    format!("\"{}\"", html_escape(&value.replace('"', "\\\"")))
                };

                let mut prefix = String::new();
                if state.is_static_member {
                    state.static_depth += 1;
                    if state.static_depth == 1 {
                        prefix = Self::classed(
                            "dumper-object-prefix",
                            &styles.object_key_prefix,
                            "static ",
                        );
                    }
                }
                state.newline()
                    + &prefix
                    + &Self::classed("dumper-object-key", &styles.object_key, &key)
                    + ": "
            }
            Token::ObjectValueStart => String::new(),
            Token::ObjectValueEnd => {
                state.leave_static_member();
                ",".to_string()
            }
            Token::ObjectValueGetter => {
                state.leave_static_member();
                Self::span(&styles.getter_label, "[Getter]") + ","
            }
            Token::ObjectCircularRef
            | Token::ArrayCircularRef
            | Token::MapCircularRef
            | Token::SetCircularRef => Self::span(&styles.circular_label, "[*Circular]"),
            Token::ObjectMaxDepthRef => Self::span(&styles.object_label, "[Object]"),

            Token::ArrayStart { name, size } => {
                state.increment();
                let label = format!("{}:{size} ", html_escape(name));
                self.open_group("array", &styles.array_label, &label, &self.open_bracket())
            }
            Token::ArrayEnd { .. } => {
                state.decrement();
                Self::close_group(state, &self.close_bracket())
            }
            Token::ArrayValueStart { .. } | Token::SetValueStart { .. } => state.newline(),
            Token::ArrayValueEnd { .. } | Token::SetValueEnd { .. } => ",".to_string(),
            Token::ArrayValueHole { .. } => {
                state.newline()
                    + &Self::classed("dumper-undefined", &styles.undefined, "&lt;hole&gt;,")
            }
            Token::ArrayMaxDepthRef => Self::span(&styles.array_label, "[Array]"),
            Token::ArrayMaxLengthRef { limit, size } => {
                Self::more_items(state, &styles.array_label, *limit, *size)
            }

            Token::PrototypeStart => {
                let indent = state.newline();
                state.increment();
                indent
                    + &self.open_group(
                        "prototype",
                        &styles.prototype_label,
                        "[[Prototype]] ",
                        &self.open_brace(),
                    )
            }
            Token::PrototypeEnd => {
                state.decrement();
                Self::close_group(state, &self.close_brace())
            }

            Token::MapStart { size } => {
                state.increment();
                let label = format!("Map:{size} ");
                self.open_group("map", &styles.map_label, &label, &self.open_brace())
            }
            Token::MapEnd { .. } => {
                state.decrement();
                Self::close_group(state, &self.close_brace())
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
                state.newline() + &Self::span(&styles.object_key, "key") + ": "
            }
            Token::MapValueStart { .. } => {
                state.newline() + &Self::span(&styles.object_key, "value") + ": "
            }
            Token::MapKeyEnd { .. } | Token::MapValueEnd { .. } => ",".to_string(),
            Token::MapMaxDepthRef => Self::span(&styles.map_label, "[Map]"),
            Token::MapMaxLengthRef { limit, size } => {
                Self::more_items(state, &styles.map_label, *limit, *size)
            }

            Token::SetStart { size } => {
                state.increment();
                let label = format!("Set:{size} ");
                self.open_group("set", &styles.set_label, &label, &self.open_bracket())
            }
            Token::SetEnd { .. } => {
                state.decrement();
                Self::close_group(state, &self.close_bracket())
            }
            Token::SetMaxDepthRef => Self::span(&styles.set_label, "[Set]"),
            Token::SetMaxLengthRef { limit, size } => {
                Self::more_items(state, &styles.set_label, *limit, *size)
            }

            Token::StaticMembersStart => {
                state.is_static_member = true;
                state.static_depth = 0;
                String::new()
            }
            Token::StaticMembersEnd => {
                state.is_static_member = false;
                state.static_depth = 0;
                String::new()
            }

            Token::String { value } => {
                let value = if state.is_stack {
                    stack_rows(value, &state.spaces())
                } else {
                    wrap_lines(value, WRAP_WIDTH)
                        .iter()
                        .map(|line| html_escape(line))
                        .collect::<Vec<_>>()
                        .join(state.newline().as_str())
                };
                Self::classed("dumper-string", &styles.string, &value)
            }
            Token::Number { value } => Self::classed(
                "dumper-number",
                &styles.number,
                &inspect::number_to_string(*value),
            ),
            Token::Boolean { value } => {
                Self::classed("dumper-boolean", &styles.boolean, &value.to_string())
            }
            Token::BigInt { value } => Self::classed("dumper-big-int", &styles.big_int, value),
            Token::Undefined => Self::classed("dumper-undefined", &styles.undefined, "undefined"),
            Token::Null => Self::classed("dumper-null", &styles.null, "null"),
            Token::Symbol { value } => {
                Self::classed("dumper-symbol", &styles.symbol, &html_escape(value))
            }
            Token::Date { value } => {
                Self::classed("dumper-date", &styles.date, &html_escape(value))
            }
            Token::Regexp { value } => {
                Self::classed("dumper-regex", &styles.regex, &html_escape(value))
            }
            Token::Buffer { value } => {
                Self::classed("dumper-buffer", &styles.buffer, &html_escape(value))
            }
            Token::Function {
                name,
                is_class,
                is_async,
                is_generator,
            } => {
                let name = html_escape(name);
                if *is_class {
                    Self::classed(
                        "dumper-class",
                        &styles.class_label,
                        &format!("[class {name}]"),
                    )
                } else {
                    let asyncness = if *is_async { "async " } else { "" };
                    let generator = if *is_generator { "*" } else { "" };
                    Self::classed(
                        "dumper-function",
                        &styles.function_label,
                        &format!("[{asyncness}{generator}function {name}]"),
                    )
                }
            }
            Token::Unknown { value, .. } => Self::classed(
                "dumper-value-unknown",
                &styles.unknown_label,
                &html_escape(value),
            ),

            Token::WeakSet => Self::classed("dumper-weak-set", &styles.weak_set_label, "[WeakSet]"),
            Token::WeakMap => Self::classed("dumper-weak-map", &styles.weak_map_label, "[WeakMap]"),
            Token::WeakRef => Self::classed("dumper-weak-ref", &styles.weak_ref_label, "[WeakRef]"),
            Token::Observable => Self::classed(
                "dumper-observable",
                &styles.observable_label,
                "[Observable]",
            ),
            Token::Generator { is_async } => {
                let label = if *is_async {
                    "[AsyncGenerator] {}"
                } else {
                    "[Generator] {}"
                };
                Self::classed("dumper-generator", &styles.generator_label, label)
            }
            Token::Promise { is_fulfilled } => {
                let label = if *is_fulfilled { "resolved" } else { "pending" };
                Self::classed(
                    "dumper-promise",
                    &styles.promise_label,
                    &format!("[Promise&lt;{label}&gt;]"),
                )
            }
            Token::Blob { size, content_type } => {
                let kind = if content_type.is_empty() {
                    String::new()
                } else {
                    format!(
                        ", {}{}",
                        Self::span(&styles.object_key, "type: "),
                        Self::span(&styles.string, &html_escape(content_type)),
                    )
                };
                format!(
                    "{} {}{}{}{kind}{}",
                    Self::classed("dumper-blob", &styles.blob_label, "[Blob]"),
                    self.open_brace(),
                    Self::span(&styles.object_key, "size: "),
                    Self::span(&styles.number, &size.to_string()),
                    self.close_brace(),
                )
            }
        }
    }
}

/// Puts each frame of an escaped stack trace in its own span on its own
/// line, aligned with the current indentation.
fn stack_rows(value: &str, indent: &str) -> String {
    value
        .split("\\n")
        .enumerate()
        .map(|(index, row)| {
            let row = format!("<span>{}</span>", html_escape(row.trim()));
            if index > 0 {
                format!("{indent}{row}")
            } else {
                row
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Keys that can be printed without quotes.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '$' || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '$' || c == '_')
        }
        _ => false,
    }
}

/// Escapes `value` for use inside a `<pre>` element. An escaped double quote
/// (`\"`) becomes `&bsol;&quot;`.
///
/// # Examples
///
/// ```rust
/// use dumper::html::html_escape;
///
/// assert_eq!(html_escape("<a & b>"), "&lt;a &amp; b&gt;");
/// assert_eq!(html_escape(r#"say \"hi\""#), "say &bsol;&quot;hi&bsol;&quot;");
/// ```
#[must_use]
pub fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace("\\\"", "&bsol;&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
