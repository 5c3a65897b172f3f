use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PlayerError, Result};

/// Seconds relative to the start of the recording.
pub type Seconds = f64;

/// A timed label, for example a word or a phone, with an optional
/// aligner-specific confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentItem {
    pub symbol: String,
    pub start: Seconds,
    pub duration: Seconds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl AlignmentItem {
    pub fn new(symbol: impl Into<String>, start: Seconds, duration: Seconds) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            duration,
            score: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// `start + duration` rounded to 8 decimals.
    pub fn end(&self) -> Seconds {
        round_to(self.start + self.duration, 8)
    }

    /// Accepts either a positional list `[symbol, start, duration, score?]`
    /// or a mapping keyed by field name.
    pub fn from_value(data: &Value) -> Result<Self> {
        match data {
            Value::Array(fields) => {
                if !(3..=4).contains(&fields.len()) {
                    return Err(PlayerError::UnsupportedSourceKind(format!(
                        "alignment item needs 3 or 4 fields, got {}",
                        fields.len()
                    )));
                }
                let symbol = fields[0]
                    .as_str()
                    .ok_or_else(|| invalid_field("symbol", &fields[0]))?;
                let start = as_seconds("start", &fields[1])?;
                let duration = as_seconds("duration", &fields[2])?;
                let score = match fields.get(3) {
                    None | Some(Value::Null) => None,
                    Some(value) => {
                        Some(value.as_f64().ok_or_else(|| invalid_field("score", value))?)
                    }
                };
                Ok(Self {
                    symbol: symbol.to_string(),
                    start,
                    duration,
                    score,
                })
            }
            Value::Object(_) => serde_json::from_value(data.clone()).map_err(|err| {
                PlayerError::UnsupportedSourceKind(format!("alignment item: {err}"))
            }),
            other => Err(PlayerError::UnsupportedSourceKind(format!(
                "alignment item must be a list or a mapping, got {other}"
            ))),
        }
    }

    /// Positional form, the inverse of [`AlignmentItem::from_value`] for lists.
    pub fn to_value(&self) -> Value {
        let mut fields = vec![
            Value::from(self.symbol.clone()),
            Value::from(self.start),
            Value::from(self.duration),
        ];
        if let Some(score) = self.score {
            fields.push(Value::from(score));
        }
        Value::Array(fields)
    }
}

pub(crate) fn round_to(value: f64, ndigits: i32) -> f64 {
    let factor = 10f64.powi(ndigits);
    (value * factor).round() / factor
}

fn as_seconds(field: &str, value: &Value) -> Result<Seconds> {
    value.as_f64().ok_or_else(|| invalid_field(field, value))
}

fn invalid_field(field: &str, value: &Value) -> PlayerError {
    PlayerError::UnsupportedSourceKind(format!(
        "alignment item field '{field}' has invalid value {value}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn end_is_rounded_to_eight_decimals() {
        let item = AlignmentItem::new("a", 0.1, 0.2);
        assert_eq!(item.end(), 0.3);

        let item = AlignmentItem::new("b", 1.123456789, 0.000000004);
        assert_eq!(item.end(), 1.12345679);
    }

    #[test]
    fn deserialize_positional_list() {
        let item = AlignmentItem::from_value(&json!(["hello", 0.5, 0.25, 0.9])).unwrap();
        assert_eq!(item, AlignmentItem::new("hello", 0.5, 0.25).with_score(0.9));
        assert_eq!(item.to_value(), json!(["hello", 0.5, 0.25, 0.9]));
    }

    #[test]
    fn deserialize_mapping_without_score() {
        let value = json!({"symbol": "x", "start": 1.0, "duration": 2.0});
        let item = AlignmentItem::from_value(&value).unwrap();
        assert_eq!(item.score, None);
        assert_eq!(item.end(), 3.0);
    }

    #[test]
    fn deserialize_rejects_scalars_and_short_lists() {
        assert!(matches!(
            AlignmentItem::from_value(&json!(3)),
            Err(PlayerError::UnsupportedSourceKind(_))
        ));
        assert!(matches!(
            AlignmentItem::from_value(&json!(["x", 1.0])),
            Err(PlayerError::UnsupportedSourceKind(_))
        ));
    }
}
