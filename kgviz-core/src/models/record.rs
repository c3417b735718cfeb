use serde::{Serialize, Serializer};
use serde_json::Value;

/// One tagged item of a source document.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceRecord {
    Entity(Entity),
    Relationship(Relationship),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    pub entity_type: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub source_entity: String,
    pub target_entity: String,
    pub description: Option<String>,
    pub strength: Strength,
}

impl Entity {
    pub fn from_value(v: &Value) -> Self {
        Self {
            name: text(v.get("name")).unwrap_or_default(),
            entity_type: text(v.get("type")),
            description: text(v.get("description")),
        }
    }
}

impl Relationship {
    pub fn from_value(v: &Value) -> Self {
        Self {
            source_entity: text(v.get("source_entity")).unwrap_or_default(),
            target_entity: text(v.get("target_entity")).unwrap_or_default(),
            description: text(v.get("description")),
            strength: Strength::parse(v.get("strength")),
        }
    }
}

/// Strings pass through, other scalars are stringified, null and
/// containers count as absent.
fn text(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Relationship weight. `None` is the not-a-number sentinel and is
/// carried through rendering untouched (serialized as `null`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Strength(pub Option<i64>);

impl Strength {
    pub const NAN: Strength = Strength(None);

    pub fn new(value: i64) -> Self {
        Strength(Some(value))
    }

    pub fn value(self) -> Option<i64> {
        self.0
    }

    pub fn is_nan(self) -> bool {
        self.0.is_none()
    }

    /// Integer-prefix parse of a raw JSON value.
    pub fn parse(raw: Option<&Value>) -> Self {
        match raw {
            Some(Value::String(s)) => Self::parse_str(s),
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    Strength(Some(i))
                } else {
                    match n.as_f64() {
                        Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => {
                            Strength(Some(f.trunc() as i64))
                        }
                        _ => Self::NAN,
                    }
                }
            }
            _ => Self::NAN,
        }
    }

    /// Leading whitespace, optional sign, optional `0x`, then the longest
    /// run of digits. Trailing garbage is ignored.
    pub fn parse_str(s: &str) -> Self {
        let s = s.trim_start();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (radix, digits) = match rest.get(..2) {
            Some("0x") | Some("0X") => (16, &rest[2..]),
            _ => (10, rest),
        };

        let end = digits
            .char_indices()
            .find(|(_, c)| !c.is_digit(radix))
            .map(|(i, _)| i)
            .unwrap_or(digits.len());
        if end == 0 {
            return Self::NAN;
        }

        match i64::from_str_radix(&digits[..end], radix) {
            Ok(v) if negative => Strength(Some(-v)),
            Ok(v) => Strength(Some(v)),
            Err(_) => Self::NAN,
        }
    }
}

impl From<i64> for Strength {
    fn from(value: i64) -> Self {
        Strength::new(value)
    }
}

impl Serialize for Strength {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(v) => serializer.serialize_i64(v),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strength_parses_plain_integer_string() {
        assert_eq!(Strength::parse(Some(&json!("10"))), Strength::new(10));
    }

    #[test]
    fn test_strength_ignores_trailing_text_and_leading_space() {
        assert_eq!(Strength::parse_str("  7 units"), Strength::new(7));
        assert_eq!(Strength::parse_str("8.9"), Strength::new(8));
    }

    #[test]
    fn test_strength_sign_and_hex() {
        assert_eq!(Strength::parse_str("-3"), Strength::new(-3));
        assert_eq!(Strength::parse_str("+4"), Strength::new(4));
        assert_eq!(Strength::parse_str("0x1A"), Strength::new(26));
    }

    #[test]
    fn test_strength_non_numeric_is_nan() {
        assert!(Strength::parse_str("strong").is_nan());
        assert!(Strength::parse_str("").is_nan());
        assert!(Strength::parse_str("-").is_nan());
        assert!(Strength::parse(None).is_nan());
        assert!(Strength::parse(Some(&json!(null))).is_nan());
        assert!(Strength::parse(Some(&json!(true))).is_nan());
    }

    #[test]
    fn test_strength_overflow_is_nan() {
        assert!(Strength::parse_str("99999999999999999999999").is_nan());
    }

    #[test]
    fn test_strength_json_number_truncates() {
        assert_eq!(Strength::parse(Some(&json!(12))), Strength::new(12));
        assert_eq!(Strength::parse(Some(&json!(12.9))), Strength::new(12));
        assert_eq!(Strength::parse(Some(&json!(-2.5))), Strength::new(-2));
    }

    #[test]
    fn test_strength_serializes_nan_as_null() {
        assert_eq!(serde_json::to_string(&Strength::NAN).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Strength::new(5)).unwrap(), "5");
    }

    #[test]
    fn test_entity_from_value_stringifies_scalars() {
        let e = Entity::from_value(&json!({"name": 42, "type": "Person"}));

        assert_eq!(e.name, "42");
        assert_eq!(e.entity_type.as_deref(), Some("Person"));
        assert_eq!(e.description, None);
    }

    #[test]
    fn test_relationship_missing_endpoints_default_to_empty() {
        let r = Relationship::from_value(&json!({"description": "knows"}));

        assert_eq!(r.source_entity, "");
        assert_eq!(r.target_entity, "");
        assert!(r.strength.is_nan());
    }
}
