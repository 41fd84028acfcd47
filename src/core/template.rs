//! Placeholder rendering for file contents and file names.
//!
//! A placeholder is `{{ Field }}` (or the dotted `{{.Field}}` form) where
//! `Field` names one of the five substitution record fields. Anything else
//! inside `{{ }}` is a malformed template, as is a `{{` that never closes.
//! Comments (`{{/* ... */}}`) render to nothing, and `{{- ` / ` -}}` trim
//! the adjacent whitespace.
//! Rendering works on raw bytes so binary assets without placeholders are
//! passed through untouched.

use crate::domain::model::{Placeholder, SubstitutionRecord};
use crate::utils::error::{Result, ScaffoldError};
use regex::bytes::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static ACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s-u)\{\{(.*?)\}\}").expect("placeholder pattern is valid"));

/// Renders `template` against `record`. Returns the input borrowed when it
/// holds no placeholders.
pub fn render<'a>(template: &'a [u8], record: &SubstitutionRecord) -> Result<Cow<'a, [u8]>> {
    let mut rendered: Option<Vec<u8>> = None;
    let mut last = 0;

    for found in ACTION.find_iter(template) {
        let action = parse_action(&template[found.start() + 2..found.end() - 2])?;
        let out = rendered.get_or_insert_with(|| Vec::with_capacity(template.len()));

        let mut text = &template[last..found.start()];
        if action.trim_left {
            text = text.trim_ascii_end();
        }
        out.extend_from_slice(text);
        if let Some(field) = action.field {
            out.extend_from_slice(record.value(field).as_bytes());
        }

        last = found.end();
        if action.trim_right {
            last += template[last..]
                .iter()
                .take_while(|b| b.is_ascii_whitespace())
                .count();
        }
    }

    let tail = &template[last..];
    if let Some(offset) = tail.windows(2).position(|w| w == b"{{") {
        return Err(ScaffoldError::template(format!(
            "unclosed placeholder at byte {}",
            last + offset
        )));
    }

    match rendered {
        None => Ok(Cow::Borrowed(template)),
        Some(mut out) => {
            out.extend_from_slice(tail);
            Ok(Cow::Owned(out))
        }
    }
}

/// Renders a single path component. The result must still be one
/// component: a value that introduces a separator or renders to `.`/`..`
/// is rejected.
pub fn render_name<'a>(name: &'a str, record: &SubstitutionRecord) -> Result<Cow<'a, str>> {
    match render(name.as_bytes(), record)? {
        Cow::Borrowed(_) => Ok(Cow::Borrowed(name)),
        Cow::Owned(bytes) => {
            let rendered =
                String::from_utf8(bytes).map_err(|e| ScaffoldError::template(e.to_string()))?;
            if !is_single_component(&rendered) {
                return Err(ScaffoldError::template(format!(
                    "'{}' renders to '{}', which is not a single file name",
                    name, rendered
                )));
            }
            Ok(Cow::Owned(rendered))
        }
    }
}

/// True when `name` is a plain file name: non-empty, not `.` or `..`, and
/// free of path separators.
pub fn is_single_component(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.chars().any(std::path::is_separator)
}

pub fn contains_placeholder(text: &str) -> bool {
    ACTION.is_match(text.as_bytes())
}

/// One `{{ }}` action: a field reference or a comment, with optional
/// `{{- ` / ` -}}` markers trimming the whitespace around it.
#[derive(Debug, PartialEq, Eq)]
struct Action {
    field: Option<Placeholder>,
    trim_left: bool,
    trim_right: bool,
}

fn parse_action(inner: &[u8]) -> Result<Action> {
    let raw = std::str::from_utf8(inner)
        .map_err(|_| ScaffoldError::template("placeholder is not valid UTF-8"))?;

    let mut text = raw;
    let trim_left = text.len() > 1
        && text.starts_with('-')
        && text[1..].starts_with(|c: char| c.is_ascii_whitespace());
    if trim_left {
        text = &text[1..];
    }
    let trim_right = text.len() > 1
        && text.ends_with('-')
        && text[..text.len() - 1].ends_with(|c: char| c.is_ascii_whitespace());
    if trim_right {
        text = &text[..text.len() - 1];
    }
    let text = text.trim();

    if text.len() >= 4 && text.starts_with("/*") && text.ends_with("*/") {
        return Ok(Action {
            field: None,
            trim_left,
            trim_right,
        });
    }

    let name = text.strip_prefix('.').unwrap_or(text).trim();
    if name.is_empty() {
        return Err(ScaffoldError::template("empty placeholder"));
    }

    let field = Placeholder::from_name(name)
        .ok_or_else(|| ScaffoldError::template(format!("unknown placeholder '{}'", raw.trim())))?;
    Ok(Action {
        field: Some(field),
        trim_left,
        trim_right,
    })
}
