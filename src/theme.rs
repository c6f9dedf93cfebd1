//! Styles used by the console formatter.
//!
//! ## Examples
//!
//! ```rust
//! use dumper::Theme;
//! use owo_colors::Style;
//!
//! let mut theme = Theme::default();
//! theme.string = Style::new().bright_green();
//!
//! let plain = Theme::plain();
//! assert_eq!(plain.paint(&plain.string, "'hi'"), "'hi'");
//! ```

use owo_colors::{OwoColorize, Style};

/// One style per kind of output fragment.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    /// When `false`, [`Theme::paint`] never emits escape codes.
    pub colored: bool,
    pub braces: Style,
    pub brackets: Style,
    pub number: Style,
    pub big_int: Style,
    pub boolean: Style,
    pub string: Style,
    pub null: Style,
    pub undefined: Style,
    pub prototype_label: Style,
    pub symbol: Style,
    pub regex: Style,
    pub date: Style,
    pub buffer: Style,
    pub function_label: Style,
    pub class_label: Style,
    pub array_label: Style,
    pub object_label: Style,
    pub map_label: Style,
    pub set_label: Style,
    pub object_key: Style,
    pub object_key_prefix: Style,
    pub weak_set_label: Style,
    pub weak_ref_label: Style,
    pub weak_map_label: Style,
    pub collapse_label: Style,
    pub circular_label: Style,
    pub getter_label: Style,
    pub observable_label: Style,
    pub promise_label: Style,
    pub generator_label: Style,
    pub blob_label: Style,
    pub unknown_label: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            colored: true,
            braces: Style::new().yellow(),
            brackets: Style::new().yellow(),
            number: Style::new().yellow(),
            big_int: Style::new().yellow().bold(),
            boolean: Style::new().yellow().italic(),
            string: Style::new().green(),
            null: Style::new().dimmed(),
            undefined: Style::new().dimmed(),
            prototype_label: Style::new().dimmed(),
            symbol: Style::new().magenta(),
            regex: Style::new().red(),
            date: Style::new().magenta(),
            buffer: Style::new().magenta(),
            function_label: Style::new().cyan().italic(),
            class_label: Style::new().cyan(),
            array_label: Style::new().cyan(),
            object_label: Style::new().cyan(),
            map_label: Style::new().cyan(),
            set_label: Style::new().cyan(),
            object_key: Style::new().blue(),
            object_key_prefix: Style::new().dimmed(),
            weak_set_label: Style::new().cyan(),
            weak_ref_label: Style::new().cyan(),
            weak_map_label: Style::new().cyan(),
            collapse_label: Style::new().dimmed(),
            circular_label: Style::new().cyan(),
            getter_label: Style::new().cyan(),
            observable_label: Style::new().cyan(),
            promise_label: Style::new().blue(),
            generator_label: Style::new().cyan(),
            blob_label: Style::new().magenta(),
            unknown_label: Style::new().magenta(),
        }
    }
}

impl Theme {
    /// A theme that renders without any escape codes.
    #[must_use]
    pub fn plain() -> Self {
        Theme {
            colored: false,
            ..Theme::default()
        }
    }

    /// The default theme, or the plain one when `NO_COLOR` is set.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var_os("NO_COLOR") {
            Some(value) if !value.is_empty() => Theme::plain(),
            _ => Theme::default(),
        }
    }

    /// Applies `style` to `text` unless colors are disabled.
    #[must_use]
    pub fn paint(&self, style: &Style, text: &str) -> String {
        if self.colored {
            text.style(*style).to_string()
        } else {
            text.to_string()
        }
    }
}
