//! Parsing of the precipitation frequency data server's text responses.
//!
//! The server answers with a small JavaScript snippet rather than JSON:
//!
//! ```text
//! result = 'values';
//! quantiles = [['0.364', '0.427', ...], ['0.582', ...], ...];
//! upper = [['0.422', ...], ...];
//! lower = [['0.316', ...], ...];
//! ```
//!
//! Each matrix has one row per storm duration and one column per recurrence
//! interval.

use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use serde::Deserialize;

use crate::error::{FreeboardError, Result};
use crate::models::{Ari, Statistic, StormDuration};

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.*?);\s*$")
        .expect("assignment pattern is valid")
});

/// Frequency matrices parsed from one server response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrequencyTable {
    pub quantiles: Vec<Vec<f64>>,
    pub upper: Option<Vec<Vec<f64>>>,
    pub lower: Option<Vec<Vec<f64>>>,
}

impl FrequencyTable {
    pub fn matrix(&self, statistic: Statistic) -> Option<&[Vec<f64>]> {
        match statistic {
            Statistic::Estimate => Some(self.quantiles.as_slice()),
            Statistic::Upper => self.upper.as_deref(),
            Statistic::Lower => self.lower.as_deref(),
        }
    }

    /// Reads one depth out of the table.
    pub fn depth(&self, statistic: Statistic, duration: StormDuration, ari: Ari) -> Result<f64> {
        let matrix = self.matrix(statistic).ok_or_else(|| {
            FreeboardError::MalformedResponse(format!(
                "response has no '{}' table",
                statistic.table_name()
            ))
        })?;

        matrix
            .get(duration.row())
            .and_then(|row| row.get(ari.column()))
            .copied()
            .ok_or_else(|| {
                FreeboardError::MalformedResponse(format!(
                    "'{}' table has no entry for {duration} / {ari}",
                    statistic.table_name()
                ))
            })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Number(f64),
    Text(String),
}

/// Outcome of parsing a response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    Values(FrequencyTable),
    /// The server has no estimates for the requested point.
    NoCoverage,
}

pub fn parse_response(body: &str) -> Result<ParsedResponse> {
    let mut result = None;
    let mut quantiles = None;
    let mut upper = None;
    let mut lower = None;

    for captures in ASSIGNMENT.captures_iter(body) {
        let (Some(name), Some(value)) = (captures.get(1), captures.get(2)) else {
            continue;
        };
        let value = value.as_str().trim();
        match name.as_str() {
            "result" => result = Some(unquote(value).to_string()),
            "quantiles" => quantiles = Some(value),
            "upper" => upper = Some(value),
            "lower" => lower = Some(value),
            _ => {}
        }
    }

    if let Some(result) = result.as_deref() {
        if !result.eq_ignore_ascii_case("values") {
            tracing::debug!("Server reported result '{}'", result);
            return Ok(ParsedResponse::NoCoverage);
        }
    }

    let quantiles = quantiles
        .ok_or_else(|| FreeboardError::MalformedResponse("no 'quantiles' table found".into()))?;

    Ok(ParsedResponse::Values(FrequencyTable {
        quantiles: parse_matrix("quantiles", quantiles)?,
        upper: upper.map(|v| parse_matrix("upper", v)).transpose()?,
        lower: lower.map(|v| parse_matrix("lower", v)).transpose()?,
    }))
}

fn unquote(value: &str) -> &str {
    value
        .trim()
        .trim_matches(|c| c == '\'' || c == '"')
}

/// Parses a nested list literal of quoted or bare numbers.
fn parse_matrix(name: &str, literal: &str) -> Result<Vec<Vec<f64>>> {
    // The server quotes with single quotes; none of the cells contain quotes themselves.
    let json = literal.replace('\'', "\"");
    let cells: Vec<Vec<Cell>> = serde_json::from_str(&json).map_err(|e| {
        FreeboardError::MalformedResponse(format!("'{name}' is not a list of lists: {e}"))
    })?;

    let matrix = cells
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| parse_cell(name, cell))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    check_shape(name, &matrix)?;
    Ok(matrix)
}

/// Every matrix must hold one row per duration and one column per interval.
fn check_shape(name: &str, matrix: &[Vec<f64>]) -> Result<()> {
    let rows = StormDuration::value_variants().len();
    let columns = Ari::value_variants().len();

    if matrix.len() != rows {
        return Err(FreeboardError::MalformedResponse(format!(
            "'{name}' table has {} rows, expected {rows}",
            matrix.len()
        )));
    }
    if let Some((i, row)) = matrix.iter().enumerate().find(|(_, row)| row.len() != columns) {
        return Err(FreeboardError::MalformedResponse(format!(
            "'{name}' table row {i} has {} values, expected {columns}",
            row.len()
        )));
    }
    Ok(())
}

fn parse_cell(name: &str, cell: Cell) -> Result<f64> {
    let value = match cell {
        Cell::Number(n) => n,
        Cell::Text(s) => s.trim().parse::<f64>().map_err(|_| {
            FreeboardError::MalformedResponse(format!("'{name}' has non-numeric value '{s}'"))
        })?,
    };

    if !value.is_finite() || value < 0.0 {
        return Err(FreeboardError::MalformedResponse(format!(
            "'{name}' has invalid depth {value}"
        )));
    }
    Ok(value)
}

/// A well-formed response with a full 19 x 10 table for each statistic.
#[cfg(test)]
pub(crate) fn sample_body() -> String {
    let row = |base: f64| {
        let cells: Vec<String> = (0..10)
            .map(|col| format!("'{:.3}'", base + col as f64 * 0.5))
            .collect();
        format!("[{}]", cells.join(", "))
    };
    let matrix = |offset: f64| {
        let rows: Vec<String> = (0..19).map(|r| row(offset + r as f64)).collect();
        format!("[{}]", rows.join(", "))
    };
    format!(
        "result = 'values';\nquantiles = {};\nupper = {};\nlower = {};\nfile = 'orb/se_pf.h5';\nunit = 'english';\n",
        matrix(0.1),
        matrix(0.2),
        matrix(0.0)
    )
}
