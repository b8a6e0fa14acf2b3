//! Rendering of property trees into the supported textual encodings.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::tree::PropertyTree;

/// Textual encodings a structured result can be rendered into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON, child order preserved.
    Json,
    /// XML with a declaration line.
    Xml,
    /// Indented `key value` lines with brace nesting.
    #[default]
    Info,
    /// Bare leaf scalars, whitespace joined.
    Native,
}

impl OutputFormat {
    /// The lowercase tag used on the command line.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Info => "info",
            Self::Native => "native",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            "info" => Ok(Self::Info),
            "native" => Ok(Self::Native),
            other => Err(Error::UnsupportedFormat(other.to_owned())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Render `tree` in the requested format.
///
/// The returned text does not end with a newline; the caller owns line
/// termination.
#[must_use]
pub fn render(tree: &PropertyTree, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(tree),
        OutputFormat::Xml => to_xml(tree),
        OutputFormat::Info => to_info(tree),
        OutputFormat::Native => tree.leaves().join(" "),
    }
}

/// Parse a format tag and render, the combined contract used by
/// commands carrying a `--format` option.
pub fn render_as(tree: &PropertyTree, tag: &str) -> Result<String> {
    Ok(render(tree, tag.parse()?))
}

fn to_json(tree: &PropertyTree) -> String {
    // Serialization of string maps cannot fail.
    serde_json::to_string_pretty(tree).expect("property tree serializes to JSON")
}

/// Re-parse rendered JSON into an equivalent tree.
pub fn from_json(text: &str) -> Result<PropertyTree> {
    serde_json::from_str(text).map_err(|e| Error::Usage(format!("malformed JSON: {e}")))
}

fn to_xml(tree: &PropertyTree) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    write_xml(tree, &mut out);
    out
}

fn write_xml(tree: &PropertyTree, out: &mut String) {
    match tree {
        PropertyTree::Scalar(value) => out.push_str(&escape_xml(value)),
        PropertyTree::Node(children) => {
            for (key, child) in children {
                let _ = write!(out, "<{key}>");
                write_xml(child, out);
                let _ = write!(out, "</{key}>");
            }
        }
    }
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

fn to_info(tree: &PropertyTree) -> String {
    let mut out = String::new();
    match tree {
        PropertyTree::Scalar(value) => out.push_str(&quote_info(value)),
        PropertyTree::Node(children) => {
            for (key, child) in children {
                write_info(key, child, 0, &mut out);
            }
        }
    }
    out
}

fn write_info(key: &str, tree: &PropertyTree, depth: usize, out: &mut String) {
    let pad = "    ".repeat(depth);
    match tree {
        PropertyTree::Scalar(value) => {
            let _ = writeln!(out, "{pad}{key} {}", quote_info(value));
        }
        PropertyTree::Node(children) => {
            let _ = writeln!(out, "{pad}{key}");
            let _ = writeln!(out, "{pad}{{");
            for (child_key, child) in children {
                write_info(child_key, child, depth + 1, out);
            }
            let _ = writeln!(out, "{pad}}}");
        }
    }
}

fn quote_info(value: &str) -> String {
    if value.is_empty() || value.contains(char::is_whitespace) {
        format!("\"{value}\"")
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PropertyTree {
        PropertyTree::node().with(
            "wrapper",
            PropertyTree::node()
                .with_value("checksum", "1475514977")
                .with_value("payload", "031bab84e687e36514eeaf5a017c30d32c1f59dd4ea6629da7970ca374513dd006")
                .with_value("version", "0"),
        )
    }

    #[test]
    fn test_format_tag_parse() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("xml".parse::<OutputFormat>().unwrap(), OutputFormat::Xml);
        assert_eq!("info".parse::<OutputFormat>().unwrap(), OutputFormat::Info);
        assert_eq!(
            "native".parse::<OutputFormat>().unwrap(),
            OutputFormat::Native
        );
    }

    #[test]
    fn test_format_tag_rejects_unknown() {
        assert!(matches!(
            "yaml".parse::<OutputFormat>(),
            Err(Error::UnsupportedFormat(tag)) if tag == "yaml"
        ));
    }

    #[test]
    fn test_json_round_trip_preserves_order_and_values() {
        let tree = sample();
        let rendered = render(&tree, OutputFormat::Json);
        let reparsed = from_json(&rendered).unwrap();
        assert_eq!(reparsed, tree);
    }

    #[test]
    fn test_native_joins_leaves() {
        let tree = PropertyTree::node()
            .with_value("a", "one")
            .with_value("b", "two");
        assert_eq!(render(&tree, OutputFormat::Native), "one two");
    }

    #[test]
    fn test_native_sole_scalar() {
        let tree = PropertyTree::node().with_value("value", "abc");
        assert_eq!(render(&tree, OutputFormat::Native), "abc");
    }

    #[test]
    fn test_xml_nesting_and_escaping() {
        let tree = PropertyTree::node().with(
            "uri",
            PropertyTree::node().with_value("label", "a&b"),
        );
        assert_eq!(
            render(&tree, OutputFormat::Xml),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<uri><label>a&amp;b</label></uri>"
        );
    }

    #[test]
    fn test_info_nesting() {
        let rendered = render(&sample(), OutputFormat::Info);
        assert!(rendered.starts_with("wrapper\n{\n"));
        assert!(rendered.contains("    checksum 1475514977\n"));
        assert!(rendered.ends_with("}\n"));
    }

    #[test]
    fn test_info_quotes_whitespace() {
        let tree = PropertyTree::node().with_value("label", "two words");
        assert_eq!(render(&tree, OutputFormat::Info), "label \"two words\"\n");
    }
}
