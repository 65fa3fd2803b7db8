//! Input validation and output serialization for pizza payloads.
//!
//! `load`/`load_partial` turn a raw JSON body into typed fields; `dump`
//! projects stored rows into the wire shape. `id` and the timestamps are
//! output-only and never accepted as input.

use crate::error::{AppError, BLANK_FIELD_MSG};
use crate::store::Pizza;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

const NAME_MAX_LEN: usize = 128;
const INPUT_FIELDS: &[&str] = &["name", "price"];

/// Validated fields for an insert. Both fields are required.
#[derive(Debug)]
pub struct NewPizza {
    pub name: String,
    pub price: f64,
}

/// Validated fields for a partial overwrite. Fields that are present must
/// still pass the same checks as on create.
#[derive(Debug, Default)]
pub struct PizzaPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
}

/// Output projection of a stored row.
#[derive(Debug, Serialize)]
pub struct PizzaOut {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<Pizza> for PizzaOut {
    fn from(p: Pizza) -> Self {
        PizzaOut {
            id: p.id,
            name: p.name,
            price: p.price,
            created_at: p.created_at,
            modified_at: p.modified_at,
        }
    }
}

pub fn load(payload: &Value) -> Result<NewPizza, AppError> {
    let fields = as_object(payload)?;
    reject_unknown(fields)?;
    let name = match fields.get("name") {
        None | Some(Value::Null) => return Err(blank()),
        Some(v) => parse_name(v)?,
    };
    let price = match fields.get("price") {
        None | Some(Value::Null) => return Err(blank()),
        Some(v) => parse_price(v)?,
    };
    Ok(NewPizza { name, price })
}

pub fn load_partial(payload: &Value) -> Result<PizzaPatch, AppError> {
    let fields = as_object(payload)?;
    reject_unknown(fields)?;
    let name = match fields.get("name") {
        None => None,
        Some(Value::Null) => return Err(blank()),
        Some(v) => Some(parse_name(v)?),
    };
    let price = match fields.get("price") {
        None => None,
        Some(Value::Null) => return Err(blank()),
        Some(v) => Some(parse_price(v)?),
    };
    Ok(PizzaPatch { name, price })
}

pub fn dump(pizza: Pizza) -> PizzaOut {
    pizza.into()
}

pub fn dump_many(pizzas: Vec<Pizza>) -> Vec<PizzaOut> {
    pizzas.into_iter().map(Into::into).collect()
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, AppError> {
    payload
        .as_object()
        .ok_or_else(|| AppError::Validation("body must be a JSON object".into()))
}

fn reject_unknown(fields: &Map<String, Value>) -> Result<(), AppError> {
    for key in fields.keys() {
        if !INPUT_FIELDS.contains(&key.as_str()) {
            return Err(AppError::Validation(format!("unknown field '{}'", key)));
        }
    }
    Ok(())
}

fn parse_name(v: &Value) -> Result<String, AppError> {
    let s = v.as_str().ok_or_else(blank)?;
    if s.is_empty() {
        return Err(blank());
    }
    if s.len() > NAME_MAX_LEN {
        return Err(AppError::Validation(format!(
            "name must be at most {} characters",
            NAME_MAX_LEN
        )));
    }
    Ok(s.to_string())
}

/// Accepts a JSON number or a numeric string ("22.83").
fn parse_price(v: &Value) -> Result<f64, AppError> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|f| f.is_finite()).ok_or_else(blank)
}

fn blank() -> AppError {
    AppError::Validation(BLANK_FIELD_MSG.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_blank(err: AppError) {
        match err {
            AppError::Validation(msg) => assert_eq!(msg, BLANK_FIELD_MSG),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn load_accepts_name_and_numeric_price() {
        let draft = load(&json!({"name": "test-pizza", "price": 22.83})).unwrap();
        assert_eq!(draft.name, "test-pizza");
        assert_eq!(draft.price, 22.83);
    }

    #[test]
    fn load_coerces_numeric_string_price() {
        let draft = load(&json!({"name": "test-pizza", "price": "22.83"})).unwrap();
        assert_eq!(draft.price, 22.83);
    }

    #[test]
    fn load_rejects_missing_or_blank_name() {
        assert_blank(load(&json!({"price": "22.83"})).unwrap_err());
        assert_blank(load(&json!({"name": "", "price": "22.83"})).unwrap_err());
        assert_blank(load(&json!({"name": null, "price": "22.83"})).unwrap_err());
    }

    #[test]
    fn load_rejects_missing_or_non_numeric_price() {
        assert_blank(load(&json!({"name": "test-pizza"})).unwrap_err());
        assert_blank(load(&json!({"name": "test-pizza", "price": "test-price"})).unwrap_err());
        assert_blank(load(&json!({"name": "test-pizza", "price": ""})).unwrap_err());
        assert_blank(load(&json!({"name": "test-pizza", "price": true})).unwrap_err());
    }

    #[test]
    fn load_rejects_unknown_fields() {
        let err = load(&json!({"name": "a", "price": 1.0, "id": 7})).unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("unknown field")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn load_rejects_overlong_name() {
        let name = "x".repeat(NAME_MAX_LEN + 1);
        let err = load(&json!({"name": name, "price": 1.0})).unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("at most")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn load_partial_accepts_any_subset() {
        let patch = load_partial(&json!({})).unwrap();
        assert!(patch.name.is_none() && patch.price.is_none());

        let patch = load_partial(&json!({"price": "29.99"})).unwrap();
        assert!(patch.name.is_none());
        assert_eq!(patch.price, Some(29.99));
    }

    #[test]
    fn load_partial_still_rejects_blank_fields() {
        assert_blank(load_partial(&json!({"name": ""})).unwrap_err());
        assert_blank(load_partial(&json!({"price": "not-a-number"})).unwrap_err());
    }

    #[test]
    fn dump_round_trips_load_output() {
        let draft = load(&json!({"name": "test-pizza", "price": "22.83"})).unwrap();
        let now = Utc::now();
        let out = dump(Pizza {
            id: 1,
            name: draft.name.clone(),
            price: draft.price,
            created_at: now,
            modified_at: now,
        });
        assert_eq!(out.name, "test-pizza");
        assert_eq!(out.price, 22.83);

        let value = serde_json::to_value(&out).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["created_at", "id", "modified_at", "name", "price"]
        );
    }
}
