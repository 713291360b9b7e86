//! Serializing atoms to regex syntax.

use std::fmt;

use super::{CharRange, RangeItem, RegexAtom, Repeat};

/// How alternations are grouped when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// `(a|b)`
    #[default]
    Capturing,
    /// `(?:a|b)`
    NonCapturing,
}

impl RegexAtom {
    /// Render to regex syntax using the given grouping style.
    pub fn render(&self, style: RenderStyle) -> String {
        let mut out = String::new();
        self.render_into(&mut out, style);
        out
    }

    fn render_into(&self, out: &mut String, style: RenderStyle) {
        match self {
            RegexAtom::Empty => {}
            RegexAtom::Word => out.push_str(r"\b"),
            RegexAtom::Start => out.push('^'),
            RegexAtom::End => out.push('$'),
            RegexAtom::Dot => out.push('.'),
            RegexAtom::Literal(text) => out.push_str(&escape_literal(text)),
            RegexAtom::Range(range) => out.push_str(&render_range(range)),
            RegexAtom::And(items) => {
                for item in items {
                    item.render_into(out, style);
                }
            }
            RegexAtom::Or(items) => {
                out.push_str(match style {
                    RenderStyle::Capturing => "(",
                    RenderStyle::NonCapturing => "(?:",
                });
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push('|');
                    }
                    item.render_into(out, style);
                }
                out.push(')');
            }
            RegexAtom::Repeat(repeat) => render_repeat(repeat, out, style),
        }
    }
}

impl fmt::Display for RegexAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(RenderStyle::Capturing))
    }
}

/// Backslash-escape `] [ ^ . + * ? { } | ( ) \ $`.
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            ']' | '[' | '^' | '.' | '+' | '*' | '?' | '{' | '}' | '|' | '(' | ')' | '\\' | '$'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn class_char(c: char, out: &mut String) {
    if matches!(c, '\\' | '[' | ']' | '^' | '&' | '~' | '-') {
        out.push('\\');
    }
    out.push(c);
}

fn render_item(item: &RangeItem) -> String {
    if item.is_single() && matches!(item.start, '-' | ']') {
        return item.start.to_string();
    }
    let mut out = String::new();
    class_char(item.start, &mut out);
    if item.start != item.end {
        if item.start as u32 + 1 != item.end as u32 {
            out.push('-');
        }
        class_char(item.end, &mut out);
    }
    out
}

fn render_range(range: &CharRange) -> String {
    let mut content: Vec<String> = range.items.iter().map(render_item).collect();

    // a lone '-' goes last and a lone ']' goes first so neither reads as syntax
    let suffix = take_item(&mut content, "-");
    let prefix = take_item(&mut content, "]");

    let mut body = String::new();
    if prefix {
        body.push(']');
    }
    body.push_str(&content.concat());
    if suffix {
        body.push('-');
    }

    if range.exclude {
        format!("[^{}]", body)
    } else {
        format!("[{}]", body)
    }
}

fn take_item(content: &mut Vec<String>, needle: &str) -> bool {
    match content.iter().position(|s| s == needle) {
        Some(pos) => {
            content.remove(pos);
            true
        }
        None => false,
    }
}

fn render_repeat(repeat: &Repeat, out: &mut String, style: RenderStyle) {
    let inner = repeat.atom.render(style);
    let needs_group = match &repeat.atom {
        RegexAtom::And(_) | RegexAtom::Repeat(_) => true,
        RegexAtom::Literal(text) => text.chars().count() > 1,
        _ => false,
    };
    if needs_group {
        match style {
            RenderStyle::Capturing => out.push('('),
            RenderStyle::NonCapturing => out.push_str("(?:"),
        }
        out.push_str(&inner);
        out.push(')');
    } else {
        out.push_str(&inner);
    }

    match (repeat.min, repeat.max) {
        (0, Some(1)) => out.push('?'),
        (min, Some(max)) if min == max => out.push_str(&format!("{{{}}}", min)),
        (0, None) => out.push('*'),
        (1, None) => out.push('+'),
        (min, None) => out.push_str(&format!("{{{},}}", min)),
        (min, Some(max)) => out.push_str(&format!("{{{},{}}}", min, max)),
    }
}
