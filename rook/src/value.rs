//! Values bound to a command's arguments and options for one invocation.

use std::collections::BTreeMap;
use std::str::FromStr;

/// A resolved argument or option value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// A boolean switch.
    Switch(bool),
    /// An unsigned integer.
    Integer(u64),
    /// A single text token, already validated against its value type.
    Text(String),
    /// Tokens of a repeated option or multi-token argument.
    List(Vec<String>),
}

/// The per-invocation mapping from spec name to resolved value.
///
/// Populated by the dispatcher and fallback resolver in precedence
/// order, then read-only while the command runs. Getters are total:
/// unbound names read as the zero value of their kind, so handlers
/// never branch on presence unless absence is meaningful to them.
#[derive(Debug, Default)]
pub struct BoundValues {
    values: BTreeMap<&'static str, Value>,
}

impl BoundValues {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` unless it already holds a higher-precedence value.
    pub fn bind(&mut self, name: &'static str, value: Value) {
        self.values.entry(name).or_insert(value);
    }

    /// Whether `name` has been bound by any source.
    #[must_use]
    pub fn is_bound(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The raw bound value, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// A switch; false when unbound.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(Value::Switch(true)))
    }

    /// An integer; zero when unbound.
    #[must_use]
    pub fn integer(&self, name: &str) -> u64 {
        match self.values.get(name) {
            Some(Value::Integer(n)) => *n,
            _ => 0,
        }
    }

    /// A text value; empty when unbound.
    #[must_use]
    pub fn text(&self, name: &str) -> &str {
        match self.values.get(name) {
            Some(Value::Text(s)) => s,
            _ => "",
        }
    }

    /// An integer, distinguishing absence.
    #[must_use]
    pub fn maybe_integer(&self, name: &str) -> Option<u64> {
        match self.values.get(name) {
            Some(Value::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// A text value, distinguishing absence.
    #[must_use]
    pub fn maybe_text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(Value::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// List tokens; empty when unbound. A singly-bound text value reads
    /// as a one-element list.
    #[must_use]
    pub fn list(&self, name: &str) -> Vec<&str> {
        match self.values.get(name) {
            Some(Value::List(items)) => items.iter().map(String::as_str).collect(),
            Some(Value::Text(s)) => vec![s.as_str()],
            _ => Vec::new(),
        }
    }

    /// Re-parse a bound text value through its domain type.
    ///
    /// Dispatch has already validated the token, so this only fails if
    /// a handler asks for a name it never declared.
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<T, T::Err> {
        self.text(name).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_keeps_first_value() {
        let mut bound = BoundValues::new();
        bound.bind("version", Value::Integer(5));
        bound.bind("version", Value::Integer(9));
        assert_eq!(bound.integer("version"), 5);
    }

    #[test]
    fn test_total_getters_default() {
        let bound = BoundValues::new();
        assert!(!bound.flag("testnet"));
        assert_eq!(bound.integer("index"), 0);
        assert_eq!(bound.text("label"), "");
        assert_eq!(bound.maybe_text("label"), None);
        assert!(bound.list("inputs").is_empty());
    }

    #[test]
    fn test_list_reads_single_text() {
        let mut bound = BoundValues::new();
        bound.bind("WORD", Value::Text("abandon".into()));
        assert_eq!(bound.list("WORD"), ["abandon"]);
    }
}
