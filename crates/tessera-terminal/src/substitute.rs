//! Variable substitution, applied to a line before it is tokenized.

use tessera_types::error::Result;

use crate::variables::{Evaluator, Variables, render};

/// Expand `$name`, `${name}`, and `${{expr}}` in `input`.
///
/// - `$CWD` expands to the working directory.
/// - Undefined variables expand to nothing.
/// - `${{expr}}` is handed to `evaluator`; an evaluation failure fails the
///   whole line.
/// - A backslash keeps the next character (and itself) untouched, so `\$x`
///   reaches the tokenizer, which drops the backslash.
pub fn substitute(
    input: &str,
    vars: &Variables,
    evaluator: &dyn Evaluator,
    cwd: &str,
) -> Result<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut result = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if ch == '\\' && i + 1 < chars.len() {
            result.push(ch);
            result.push(chars[i + 1]);
            i += 2;
            continue;
        }
        if ch != '$' || i + 1 >= chars.len() {
            result.push(ch);
            i += 1;
            continue;
        }

        // ${{expr}}
        if chars[i + 1] == '{'
            && chars.get(i + 2) == Some(&'{')
            && let Some(end) = find_double_brace(&chars, i + 3)
        {
            let expr: String = chars[i + 3..end].iter().collect();
            let value = evaluator.evaluate(&expr, vars)?;
            result.push_str(&render(&value));
            i = end + 2;
            continue;
        }

        // ${name}
        if chars[i + 1] == '{'
            && let Some(len) = chars[i + 2..].iter().position(|&c| c == '}')
        {
            let name: String = chars[i + 2..i + 2 + len].iter().collect();
            result.push_str(&lookup(&name, vars, cwd));
            i += 3 + len;
            continue;
        }

        // $name
        let start = i + 1;
        let mut end = start;
        while end < chars.len() && (chars[end].is_ascii_alphanumeric() || chars[end] == '_') {
            end += 1;
        }
        if end > start {
            let name: String = chars[start..end].iter().collect();
            result.push_str(&lookup(&name, vars, cwd));
            i = end;
            continue;
        }

        result.push('$');
        i += 1;
    }

    Ok(result)
}

/// Index of the first `}}` at or after `from`.
fn find_double_brace(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len().saturating_sub(1)).find(|&j| chars[j] == '}' && chars[j + 1] == '}')
}

fn lookup(name: &str, vars: &Variables, cwd: &str) -> String {
    match name {
        "CWD" => cwd.to_string(),
        _ => vars.get(name).map(render).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::LiteralEvaluator;
    use serde_json::json;

    fn vars() -> Variables {
        let mut v = Variables::new();
        v.set("name", json!("world"));
        v.set("n", json!(3));
        v.set("list", json!([1, 2]));
        v
    }

    fn sub(input: &str) -> String {
        substitute(input, &vars(), &LiteralEvaluator, "/home").unwrap()
    }

    #[test]
    fn bare_variable() {
        assert_eq!(sub("echo hello $name"), "echo hello world");
    }

    #[test]
    fn braced_variable() {
        assert_eq!(sub("echo ${name}s"), "echo worlds");
    }

    #[test]
    fn non_string_values_render_as_json() {
        assert_eq!(sub("echo $n $list"), "echo 3 [1,2]");
    }

    #[test]
    fn cwd_variable() {
        assert_eq!(sub("echo $CWD"), "echo /home");
    }

    #[test]
    fn undefined_variable_expands_to_nothing() {
        assert_eq!(sub("echo [$missing]"), "echo []");
    }

    #[test]
    fn expression_substitution() {
        assert_eq!(sub("echo ${{ [1, 2] }}"), "echo [1,2]");
        assert_eq!(sub("echo ${{name}}!"), "echo world!");
    }

    #[test]
    fn expression_failure_is_an_error() {
        let err = substitute("echo ${{ oops }}", &vars(), &LiteralEvaluator, "/").unwrap_err();
        assert!(err.to_string().contains("evaluation error"));
    }

    #[test]
    fn escaped_dollar_is_left_for_the_tokenizer() {
        assert_eq!(sub(r"echo \$name"), r"echo \$name");
    }

    #[test]
    fn bare_names_stop_at_non_ascii() {
        let mut v = vars();
        v.set("h", json!("X"));
        let out = substitute("echo $héllo", &v, &LiteralEvaluator, "/").unwrap();
        assert_eq!(out, "echo Xéllo");
    }

    #[test]
    fn lone_dollar_is_literal() {
        assert_eq!(sub("cost $ 5 $"), "cost $ 5 $");
    }

    #[test]
    fn unterminated_brace_is_literal() {
        assert_eq!(sub("echo ${name"), "echo ${name");
    }

    #[test]
    fn no_variables_is_identity() {
        assert_eq!(sub(r#"cmd "a b" c\ d"#), r#"cmd "a b" c\ d"#);
    }
}
