use crate::document::Document;
use crate::types::{NodeKey, NodeKind, PropValue, format_number};
use std::fmt::{self, Write};

/// Deterministic subtree serialization for tests.
/// Not a public stable format; intended for line-based comparisons.
///
/// Line rules:
/// - Elements render as `<name prop=value ...>`, properties in insertion order.
/// - Text renders quoted with `\n`, `\t`, `"` and control characters escaped.
/// - Fragments render as `#fragment`.
/// - Each depth level indents by two spaces.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomSnapshotOptions {
    pub ignore_props: bool,
}

#[derive(Debug)]
pub struct DomSnapshot {
    lines: Vec<String>,
}

impl DomSnapshot {
    pub fn new(doc: &Document, root: NodeKey, options: DomSnapshotOptions) -> Self {
        let mut lines = Vec::new();
        let mut stack = vec![(root, 0usize)];
        while let Some((key, depth)) = stack.pop() {
            let Some(kind) = doc.kind(key) else {
                continue;
            };
            let mut line = "  ".repeat(depth);
            match kind {
                NodeKind::Element { name } => {
                    line.push('<');
                    line.push_str(name);
                    if !options.ignore_props {
                        for (prop, value) in doc.properties(key) {
                            line.push(' ');
                            line.push_str(prop);
                            line.push('=');
                            push_prop_value(&mut line, value);
                        }
                    }
                    line.push('>');
                }
                NodeKind::Text { text } => {
                    line.push('"');
                    line.push_str(&escape_text(text));
                    line.push('"');
                }
                NodeKind::Fragment => line.push_str("#fragment"),
            }
            lines.push(line);
            for &child in doc.children(key).iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for DomSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

fn push_prop_value(line: &mut String, value: &PropValue) {
    match value {
        PropValue::Null => line.push_str("null"),
        PropValue::Bool(value) => {
            let _ = write!(line, "{value}");
        }
        PropValue::Number(value) => line.push_str(&format_number(*value)),
        PropValue::Text(text) => {
            line.push('"');
            line.push_str(&escape_text(text));
            line.push('"');
        }
    }
}

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' => {
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}

pub fn diff_lines(expected: &[&str], actual: &[String]) -> String {
    let max = expected.len().max(actual.len());
    let mut out = String::new();
    let missing = "<missing>";
    for i in 0..max {
        let left = expected.get(i).copied().unwrap_or(missing);
        let right = actual.get(i).map(String::as_str).unwrap_or(missing);
        let marker = if left == right { ' ' } else { '!' };
        let _ = writeln!(&mut out, "{marker} {i:>3} expected: {left}");
        if left != right {
            let _ = writeln!(&mut out, "{marker} {i:>3} actual:   {right}");
        }
    }
    out
}

/// Panic with a line diff when the subtree at `root` does not render as `expected`.
pub fn assert_snapshot(doc: &Document, root: NodeKey, expected: &[&str]) {
    let snapshot = DomSnapshot::new(doc, root, DomSnapshotOptions::default());
    let actual = snapshot.as_lines();
    let matches = expected.len() == actual.len()
        && expected.iter().zip(actual).all(|(e, a)| *e == a.as_str());
    if !matches {
        panic!(
            "DOM snapshot mismatch for {root}:\n{}",
            diff_lines(expected, actual)
        );
    }
}

/// Human-oriented outline of a subtree, at most `cap` lines.
/// Text previews are trimmed and cut at 40 characters.
pub fn outline(doc: &Document, root: NodeKey, cap: usize) -> Vec<String> {
    const PREVIEW_CHARS: usize = 40;

    fn walk(doc: &Document, key: NodeKey, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        let indent = "  ".repeat(depth);
        match doc.kind(key) {
            Some(NodeKind::Element { name }) => {
                *left -= 1;
                let mut line = format!("{indent}<{name}");
                for prop in ["id", "className"] {
                    if let Some(value) = doc.property(key, prop).and_then(PropValue::as_str) {
                        if !value.is_empty() {
                            let _ = write!(&mut line, r#" {prop}="{value}""#);
                        }
                    }
                }
                line.push('>');
                out.push(line);
            }
            Some(NodeKind::Text { text }) => {
                let t = text.trim();
                if !t.is_empty() {
                    *left -= 1;
                    let mut show: String = t
                        .chars()
                        .take(PREVIEW_CHARS)
                        .map(|ch| if ch == '\n' { ' ' } else { ch })
                        .collect();
                    if t.chars().count() > PREVIEW_CHARS {
                        show.push('…');
                    }
                    out.push(format!("{indent}\"{show}\""));
                }
                return;
            }
            Some(NodeKind::Fragment) => {
                *left -= 1;
                out.push(format!("{indent}#fragment"));
            }
            None => return,
        }
        for &child in doc.children(key) {
            walk(doc, child, depth + 1, out, left);
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    walk(doc, root, 0, &mut out, &mut left);
    out
}
