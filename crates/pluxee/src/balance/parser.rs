//! Decoding of the provider's balance payload.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use serde_json::value::RawValue;

use crate::error::ParseError;

use super::snapshot::BalanceSnapshot;

/// Balance payload as sent by the provider.
///
/// Every category is optional; the provider leaves out cards with nothing
/// on them. Values stay raw until [`amount`] decodes them, so a bad number
/// is reported against its own field.
#[derive(Debug, Default, Deserialize)]
struct RawBalance<'a> {
    #[serde(default, borrow, alias = "lunchPass", alias = "lunch_pass")]
    lunch: Option<&'a RawValue>,
    #[serde(default, borrow, alias = "ecoPass", alias = "eco_pass")]
    eco: Option<&'a RawValue>,
    #[serde(default, borrow, alias = "giftPass", alias = "gift_pass")]
    gift: Option<&'a RawValue>,
    #[serde(default, borrow, alias = "consoPass", alias = "conso_pass")]
    conso: Option<&'a RawValue>,
}

/// Parse a balance response body into a snapshot stamped with `fetched_at`.
///
/// Missing or `null` categories read as `0.0`. A present value must be a
/// finite JSON number or a decimal string such as `"89,19 €"`.
///
/// # Errors
///
/// [`ParseError::MalformedBody`] if the body is not a JSON object,
/// [`ParseError::MalformedField`] for the first category that is not a
/// decimal amount.
pub fn parse_balance(body: &[u8], fetched_at: DateTime<Utc>) -> Result<BalanceSnapshot, ParseError> {
    let malformed_body = |e: serde_json::Error| ParseError::MalformedBody {
        message: e.to_string(),
    };

    let document: &RawValue = serde_json::from_slice(body).map_err(malformed_body)?;
    if !document.get().trim_start().starts_with('{') {
        return Err(ParseError::MalformedBody {
            message: "expected a JSON object".to_string(),
        });
    }

    let raw: RawBalance<'_> = serde_json::from_str(document.get()).map_err(malformed_body)?;

    Ok(BalanceSnapshot::new(
        amount("lunch", raw.lunch)?,
        amount("eco", raw.eco)?,
        amount("gift", raw.gift)?,
        amount("conso", raw.conso)?,
        fetched_at,
    ))
}

fn amount(field: &'static str, raw: Option<&RawValue>) -> Result<f64, ParseError> {
    let Some(raw) = raw else {
        return Ok(0.0);
    };
    let malformed = || ParseError::MalformedField {
        field,
        value: raw.get().to_string(),
    };

    // Out-of-range numbers such as `1e400` fail here.
    let value: Value = serde_json::from_str(raw.get()).map_err(|_| malformed())?;

    match value {
        Value::Null => Ok(0.0),
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).ok_or_else(malformed),
        Value::String(s) => parse_decimal(&s).ok_or_else(malformed),
        _ => Err(malformed()),
    }
}

/// Parse a decimal amount as the portal formats it.
///
/// Accepts either `.` or `,` as the decimal separator; when both appear the
/// last one is the decimal separator and the other groups thousands.
fn parse_decimal(s: &str) -> Option<f64> {
    let trimmed = s.trim().trim_matches('€').trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = match (trimmed.rfind('.'), trimmed.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => trimmed.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => trimmed.replace(',', ""),
        (None, Some(_)) => trimmed.replace(',', "."),
        _ => trimmed.to_string(),
    };

    let digits = normalized.strip_prefix('-').unwrap_or(&normalized);
    let well_formed = !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1
        && digits.chars().any(|c| c.is_ascii_digit());
    if !well_formed {
        return None;
    }

    normalized.parse::<f64>().ok()
}
