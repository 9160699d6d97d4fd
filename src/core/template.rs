//! Restricted interpolation mini-language for widget templates.
//!
//! A template is literal text with `${path}` expressions, where `path` is a
//! dot-separated identifier chain resolved against an explicit key/value
//! context. A leading `this.` segment is accepted and ignored so templates
//! written against a host object read naturally (`Hello, ${this.name}!`).
//! `$$` escapes a literal `$`. There is no expression language beyond field
//! lookup and no dynamic code execution.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub type TemplateResult<T> = Result<T, TemplateError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unterminated `${{` expression starting at byte {offset}")]
    UnterminatedExpression { offset: usize },

    #[error("empty `${{}}` expression at byte {offset}")]
    EmptyExpression { offset: usize },

    #[error("invalid field path `{path}`")]
    InvalidPath { path: String },

    #[error("unknown field `{path}`")]
    UnknownField { path: String },
}

/// One parsed piece of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateSegment {
    Literal(String),
    /// Dot-separated field path, `this.` prefix already stripped.
    Expression { path: String },
}

/// A template parsed ahead of evaluation so syntax errors surface once,
/// not on every render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledTemplate {
    segments: Vec<TemplateSegment>,
}

impl CompiledTemplate {
    pub fn parse(source: &str) -> TemplateResult<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let bytes = source.as_bytes();
        let mut index = 0;

        while index < bytes.len() {
            if bytes[index] == b'$' && bytes.get(index + 1) == Some(&b'$') {
                literal.push('$');
                index += 2;
                continue;
            }

            if bytes[index] == b'$' && bytes.get(index + 1) == Some(&b'{') {
                let open = index;
                let body_start = index + 2;
                let Some(close) = source[body_start..].find('}').map(|at| body_start + at)
                else {
                    return Err(TemplateError::UnterminatedExpression { offset: open });
                };

                let raw = source[body_start..close].trim();
                if raw.is_empty() {
                    return Err(TemplateError::EmptyExpression { offset: open });
                }

                if !literal.is_empty() {
                    segments.push(TemplateSegment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(TemplateSegment::Expression {
                    path: normalize_path(raw)?,
                });
                index = close + 1;
                continue;
            }

            let Some(ch) = source[index..].chars().next() else {
                break;
            };
            literal.push(ch);
            index += ch.len_utf8();
        }

        if !literal.is_empty() {
            segments.push(TemplateSegment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Evaluates the template against a field lookup function.
    ///
    /// Resolution receives the first path segment; nested segments index into
    /// the returned JSON value. Any unresolved step fails the whole pass.
    pub fn evaluate<'ctx, F>(&self, lookup: F) -> TemplateResult<String>
    where
        F: Fn(&str) -> Option<&'ctx Value>,
    {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                TemplateSegment::Literal(text) => output.push_str(text),
                TemplateSegment::Expression { path } => {
                    let mut steps = path.split('.');
                    let root = steps
                        .next()
                        .ok_or_else(|| TemplateError::InvalidPath { path: path.clone() })?;
                    let mut value = lookup(root)
                        .ok_or_else(|| TemplateError::UnknownField { path: path.clone() })?;
                    for step in steps {
                        value = value
                            .get(step)
                            .ok_or_else(|| TemplateError::UnknownField { path: path.clone() })?;
                    }
                    render_value(value, &mut output);
                }
            }
        }
        Ok(output)
    }

    #[must_use]
    pub fn segments(&self) -> &[TemplateSegment] {
        &self.segments
    }

    /// Field paths the template reads, in first-use order.
    #[must_use]
    pub fn referenced_paths(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                TemplateSegment::Expression { path } => Some(path.as_str()),
                TemplateSegment::Literal(_) => None,
            })
            .collect()
    }
}

/// Strips an optional `this.` prefix and validates identifier syntax.
fn normalize_path(raw: &str) -> TemplateResult<String> {
    let path = raw.strip_prefix("this.").unwrap_or(raw);
    if path.is_empty() || path == "this" {
        return Err(TemplateError::InvalidPath {
            path: raw.to_owned(),
        });
    }

    let valid = path.split('.').all(|step| {
        let mut chars = step.chars();
        chars
            .next()
            .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
            && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
    });
    if !valid {
        return Err(TemplateError::InvalidPath {
            path: raw.to_owned(),
        });
    }

    Ok(path.to_owned())
}

fn render_value(value: &Value, output: &mut String) {
    match value {
        Value::Null => {}
        Value::String(text) => output.push_str(text),
        Value::Bool(flag) => output.push_str(if *flag { "true" } else { "false" }),
        Value::Number(number) => output.push_str(&number.to_string()),
        // Arrays and objects keep their compact JSON form.
        other => output.push_str(&other.to_string()),
    }
}
