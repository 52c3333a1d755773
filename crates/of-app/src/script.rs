//! Textual edit instructions.
//!
//! One instruction per line:
//!
//! ```text
//! set:regions=North Pacific,Arctic Ocean
//! nested:temperature.min=10
//! add:seasons=Summer
//! toggle:qualityFlags=Bad Data
//! remove:qualityFlags=Bad Data
//! remove:temperature
//! clear
//! ```
//!
//! Blank lines and lines starting with `#` are skipped by [`parse_script`].

use crate::error::{AppError, AppResult};
use of_spec::{Dimension, FieldValue, FilterEdit, NestedKey, NestedValue};

/// Parse a single instruction.
pub fn parse_edit(line: &str) -> AppResult<FilterEdit> {
    parse_line(line).map_err(|message| AppError::Script { line: 1, message })
}

/// Parse a whole script, reporting 1-based line numbers on failure.
pub fn parse_script(text: &str) -> AppResult<Vec<FilterEdit>> {
    let mut edits = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let edit = parse_line(line).map_err(|message| AppError::Script {
            line: idx + 1,
            message,
        })?;
        edits.push(edit);
    }
    Ok(edits)
}

fn parse_line(line: &str) -> Result<FilterEdit, String> {
    let line = line.trim();
    if line == "clear" {
        return Ok(FilterEdit::ClearAll);
    }

    let (verb, rest) = line
        .split_once(':')
        .ok_or_else(|| format!("expected `<verb>:<dimension>...`, got {line:?}"))?;
    let (target, value) = match rest.split_once('=') {
        Some((target, value)) => (target.trim(), Some(value.trim())),
        None => (rest.trim(), None),
    };

    match verb.trim() {
        "set" => {
            let dimension = dimension(target)?;
            let value = value.ok_or("`set` needs `=<values>`")?;
            let literals: Vec<&str> = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            let field =
                FieldValue::from_literals(dimension, &literals).map_err(|e| e.to_string())?;
            Ok(FilterEdit::SetField(field))
        }
        "nested" => {
            let (dim, key) = target
                .split_once('.')
                .ok_or("`nested` needs `<dimension>.<key>`")?;
            let dimension = dimension(dim)?;
            let key: NestedKey = key.trim().parse().map_err(|e| format!("{e}"))?;
            let value = value.ok_or("`nested` needs `=<value>`")?;
            Ok(FilterEdit::SetNested {
                dimension,
                key,
                value: NestedValue::Text(value.to_string()),
            })
        }
        "add" => Ok(FilterEdit::AddValue {
            dimension: dimension(target)?,
            value: value.ok_or("`add` needs `=<value>`")?.to_string(),
        }),
        "toggle" => Ok(FilterEdit::ToggleValue {
            dimension: dimension(target)?,
            value: value.ok_or("`toggle` needs `=<value>`")?.to_string(),
        }),
        "remove" => Ok(FilterEdit::RemoveValue {
            dimension: dimension(target)?,
            value: value.map(str::to_string),
        }),
        other => Err(format!("unknown verb {other:?}")),
    }
}

fn dimension(name: &str) -> Result<Dimension, String> {
    name.trim().parse().map_err(|e| format!("{e}"))
}
