//! Managed method names in the form ``Name`arity(Type1,Type2)``.
//!
//! Names that are not plain identifiers are single-quoted, with `\\` and `\'`
//! escapes. Parameter types may nest `<>`, `[]` and `()`; only top-level commas
//! separate parameters.

use super::descriptor::TestMethodDescriptor;
use crate::error::ManagedNameError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMethodName {
    pub method_name: String,
    pub arity: u32,
    /// `None` when the name carries no parameter list at all.
    pub parameter_types: Option<Vec<String>>,
}

impl ParsedMethodName {
    /// True when the descriptor is the method this name refers to. The name
    /// may be bare (`Method`) or class-qualified (`NS.Class.Method`); a
    /// parameter list, when present, must match exactly.
    pub fn matches(&self, descriptor: &TestMethodDescriptor) -> bool {
        let method = &descriptor.test_method;
        let name_matches = self.method_name == method.name
            || self.method_name == descriptor.fully_qualified_name();
        let parameters_match = self
            .parameter_types
            .as_ref()
            .map_or(true, |types| *types == method.parameter_types);
        name_matches && parameters_match
    }
}

pub fn parse_managed_method_name(input: &str) -> Result<ParsedMethodName, ManagedNameError> {
    if input.is_empty() {
        return Err(ManagedNameError::Empty);
    }

    let chars: Vec<char> = input.chars().collect();
    let mut pos = 0;

    let method_name = if chars[0] == '\'' {
        parse_quoted(input, &chars, &mut pos)?
    } else {
        parse_unquoted(input, &chars, &mut pos)?
    };

    let mut arity = 0;
    if chars.get(pos) == Some(&'`') {
        pos += 1;
        let start = pos;
        while pos < chars.len() && chars[pos].is_ascii_digit() {
            pos += 1;
        }
        let digits: String = chars[start..pos].iter().collect();
        arity = digits
            .parse()
            .map_err(|_| ManagedNameError::malformed(input, "missing or invalid arity"))?;
    }

    let mut parameter_types = None;
    match chars.get(pos) {
        None => {}
        Some('(') => parameter_types = Some(parse_parameters(input, &chars, &mut pos)?),
        Some(c) => {
            return Err(ManagedNameError::malformed(
                input,
                format!("unexpected character '{c}' at position {pos}"),
            ))
        }
    }

    if pos < chars.len() {
        return Err(ManagedNameError::malformed(
            input,
            "unexpected characters after parameter list",
        ));
    }

    Ok(ParsedMethodName {
        method_name,
        arity,
        parameter_types,
    })
}

fn parse_unquoted(input: &str, chars: &[char], pos: &mut usize) -> Result<String, ManagedNameError> {
    let mut name = String::new();
    while let Some(&c) = chars.get(*pos) {
        match c {
            '`' | '(' => break,
            ')' | ',' | '\'' => {
                return Err(ManagedNameError::malformed(
                    input,
                    format!("unexpected character '{c}' in method name"),
                ))
            }
            c if c.is_whitespace() => {
                return Err(ManagedNameError::malformed(
                    input,
                    "whitespace is not allowed in an unquoted method name",
                ))
            }
            c => name.push(c),
        }
        *pos += 1;
    }
    if name.is_empty() {
        return Err(ManagedNameError::malformed(input, "method name is empty"));
    }
    Ok(name)
}

fn parse_quoted(input: &str, chars: &[char], pos: &mut usize) -> Result<String, ManagedNameError> {
    let mut name = String::new();
    *pos = 1;
    loop {
        match chars.get(*pos) {
            None => return Err(ManagedNameError::malformed(input, "unterminated quoted name")),
            Some('\\') => {
                let escaped = chars
                    .get(*pos + 1)
                    .ok_or_else(|| ManagedNameError::malformed(input, "unterminated quoted name"))?;
                name.push(*escaped);
                *pos += 2;
            }
            Some('\'') => {
                *pos += 1;
                break;
            }
            Some(&c) => {
                name.push(c);
                *pos += 1;
            }
        }
    }
    if name.is_empty() {
        return Err(ManagedNameError::malformed(input, "method name is empty"));
    }
    Ok(name)
}

fn parse_parameters(
    input: &str,
    chars: &[char],
    pos: &mut usize,
) -> Result<Vec<String>, ManagedNameError> {
    let mut parameters = Vec::new();
    let mut current = String::new();
    let mut nesting: Vec<char> = Vec::new();
    *pos += 1;

    loop {
        let Some(&c) = chars.get(*pos) else {
            return Err(ManagedNameError::malformed(input, "unbalanced parentheses"));
        };
        match c {
            ')' if nesting.is_empty() => {
                *pos += 1;
                if current.is_empty() {
                    if parameters.is_empty() {
                        return Ok(parameters);
                    }
                    return Err(ManagedNameError::malformed(input, "empty parameter type"));
                }
                parameters.push(current);
                return Ok(parameters);
            }
            ',' if nesting.is_empty() => {
                if current.is_empty() {
                    return Err(ManagedNameError::malformed(input, "empty parameter type"));
                }
                parameters.push(std::mem::take(&mut current));
            }
            '(' | '[' | '<' => {
                nesting.push(c);
                current.push(c);
            }
            ')' | ']' | '>' => {
                let opener = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '<',
                };
                if nesting.pop() != Some(opener) {
                    return Err(ManagedNameError::malformed(
                        input,
                        format!("unbalanced '{c}' in parameter list"),
                    ));
                }
                current.push(c);
            }
            c if c.is_whitespace() => {
                return Err(ManagedNameError::malformed(
                    input,
                    "whitespace is not allowed in a parameter list",
                ))
            }
            c => current.push(c),
        }
        *pos += 1;
    }
}

/// Canonical managed name for a method; the inverse of [`parse_managed_method_name`].
pub fn format_managed_method_name(method_name: &str, arity: u32, parameters: &[String]) -> String {
    let needs_quotes = method_name.is_empty()
        || method_name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | ',' | '`' | '\'' | '\\'));

    let mut out = String::new();
    if needs_quotes {
        out.push('\'');
        for c in method_name.chars() {
            if c == '\'' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('\'');
    } else {
        out.push_str(method_name);
    }

    if arity > 0 {
        out.push('`');
        out.push_str(&arity.to_string());
    }
    if !parameters.is_empty() {
        out.push('(');
        out.push_str(&parameters.join(","));
        out.push(')');
    }
    out
}
