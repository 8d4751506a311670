//! Terminal variables and expression evaluation.

use std::collections::BTreeMap;

use serde_json::Value;
use tessera_types::error::{Result, TesseraError};

/// Named values set with `set` and expanded with `$name`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    values: BTreeMap<String, Value>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Remove a variable, returning its previous value.
    pub fn unset(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Text form of a value: strings bare, everything else as JSON.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Evaluates the expressions used by `set` and `${{expr}}`.
pub trait Evaluator {
    fn evaluate(&self, expr: &str, vars: &Variables) -> Result<Value>;
}

/// Evaluator for variable references and JSON literals.
///
/// `name` yields the variable's value; anything else must parse as JSON
/// (`42`, `"text"`, `[1, 2]`, `{"a": true}`).
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralEvaluator;

impl Evaluator for LiteralEvaluator {
    fn evaluate(&self, expr: &str, vars: &Variables) -> Result<Value> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err(TesseraError::Eval("empty expression".to_string()));
        }
        if let Some(value) = vars.get(expr) {
            return Ok(value.clone());
        }
        serde_json::from_str(expr).map_err(|e| TesseraError::Eval(format!("{expr}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_get_unset() {
        let mut vars = Variables::new();
        vars.set("x", json!(1));
        assert_eq!(vars.get("x"), Some(&json!(1)));
        assert_eq!(vars.unset("x"), Some(json!(1)));
        assert!(vars.get("x").is_none());
        assert!(vars.unset("x").is_none());
    }

    #[test]
    fn iter_is_sorted_by_name() {
        let mut vars = Variables::new();
        vars.set("b", json!(2));
        vars.set("a", json!(1));
        let names: Vec<&str> = vars.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn render_strings_bare() {
        assert_eq!(render(&json!("hi")), "hi");
        assert_eq!(render(&json!(3)), "3");
        assert_eq!(render(&json!([1, 2])), "[1,2]");
        assert_eq!(render(&json!({"a": true})), r#"{"a":true}"#);
    }

    #[test]
    fn literal_evaluator_parses_json() {
        let vars = Variables::new();
        let ev = LiteralEvaluator;
        assert_eq!(ev.evaluate("42", &vars).unwrap(), json!(42));
        assert_eq!(ev.evaluate(" \"a b\" ", &vars).unwrap(), json!("a b"));
        assert_eq!(ev.evaluate("[1, 2]", &vars).unwrap(), json!([1, 2]));
        assert_eq!(ev.evaluate("null", &vars).unwrap(), Value::Null);
    }

    #[test]
    fn literal_evaluator_resolves_variables_first() {
        let mut vars = Variables::new();
        vars.set("name", json!("tessera"));
        assert_eq!(
            LiteralEvaluator.evaluate("name", &vars).unwrap(),
            json!("tessera")
        );
    }

    #[test]
    fn literal_evaluator_rejects_bare_words_and_empty() {
        let vars = Variables::new();
        assert!(matches!(
            LiteralEvaluator.evaluate("hello", &vars),
            Err(TesseraError::Eval(_))
        ));
        assert!(matches!(
            LiteralEvaluator.evaluate("   ", &vars),
            Err(TesseraError::Eval(_))
        ));
    }
}
