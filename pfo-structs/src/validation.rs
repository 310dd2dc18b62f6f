use crate::{api::OptimizeReq, error::FieldError};
use pfo_challenges::knapsack::{Challenge, Item};
use serde_json::{Map, Number, Value};

const POSITIVE_NUMBER: &str = "a positive number";
const NON_NEGATIVE_NUMBER: &str = "a non-negative number";
const WHOLE_NUMBER: &str = "a whole number";
const NON_EMPTY_LIST: &str = "a non-empty list";
const NON_EMPTY_STRING: &str = "a non-empty string";

// 2^64 as f64; anything at or above it does not fit in a u64
const U64_LIMIT: f64 = 18446744073709551616.0;

impl OptimizeReq {
    pub fn validate(&self) -> Result<Challenge, FieldError> {
        validate(self)
    }
}

/// Checks a raw request and converts it into a [`Challenge`].
///
/// Capacity is truncated toward zero. Item weights and gains must be whole
/// numbers; `2000.0` is accepted, `2000.5` is not.
pub fn validate(req: &OptimizeReq) -> Result<Challenge, FieldError> {
    let capacidad = req.capacidad().ok_or(FieldError::Missing {
        field: "capacidad",
        item: None,
    })?;
    let objetos = req.objetos().ok_or(FieldError::Missing {
        field: "objetos",
        item: None,
    })?;

    let capacity = match capacidad {
        Value::Number(n) => truncate_positive(n),
        _ => None,
    }
    .ok_or_else(|| invalid("capacidad", None, POSITIVE_NUMBER))?;

    let objetos = match objetos {
        Value::Array(arr) if !arr.is_empty() => arr,
        _ => return Err(invalid("objetos", None, NON_EMPTY_LIST)),
    };

    let items = objetos
        .iter()
        .enumerate()
        .map(|(i, obj)| match obj {
            Value::Object(obj) => validate_item(i, obj),
            _ => Err(FieldError::NotAnObject { item: i }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Challenge::new(capacity, items))
}

fn validate_item(i: usize, obj: &Map<String, Value>) -> Result<Item, FieldError> {
    let field = |name: &'static str| {
        obj.get(name).ok_or(FieldError::Missing {
            field: name,
            item: Some(i),
        })
    };
    let nombre = field("nombre")?;
    let peso = field("peso")?;
    let ganancia = field("ganancia")?;

    let name = match nombre {
        Value::String(s) if !s.is_empty() => s.clone(),
        _ => return Err(invalid("nombre", Some(i), NON_EMPTY_STRING)),
    };
    let weight = whole_number("peso", i, peso, false)?;
    let gain = whole_number("ganancia", i, ganancia, true)?;

    Ok(Item::new(name, weight, gain))
}

fn truncate_positive(n: &Number) -> Option<u64> {
    if let Some(u) = n.as_u64() {
        return (u > 0).then_some(u);
    }
    match n.as_f64() {
        // `as` saturates above u64::MAX
        Some(f) if f > 0.0 => Some(f.trunc() as u64),
        _ => None,
    }
}

fn whole_number(
    field: &'static str,
    i: usize,
    value: &Value,
    allow_zero: bool,
) -> Result<u64, FieldError> {
    let sign = if allow_zero {
        NON_NEGATIVE_NUMBER
    } else {
        POSITIVE_NUMBER
    };
    let n = match value {
        Value::Number(n) => n,
        _ => return Err(invalid(field, Some(i), sign)),
    };
    if let Some(u) = n.as_u64() {
        if u == 0 && !allow_zero {
            return Err(invalid(field, Some(i), sign));
        }
        return Ok(u);
    }
    // negative integers and floats end up here
    let f = n.as_f64().unwrap_or(-1.0);
    if f < 0.0 || (f == 0.0 && !allow_zero) {
        return Err(invalid(field, Some(i), sign));
    }
    if f.fract() != 0.0 {
        return Err(invalid(field, Some(i), WHOLE_NUMBER));
    }
    if f >= U64_LIMIT {
        return Err(invalid(
            field,
            Some(i),
            &format!("at most {}", u64::MAX),
        ));
    }
    Ok(f as u64)
}

fn invalid(field: &'static str, item: Option<usize>, expected: &str) -> FieldError {
    FieldError::Invalid {
        field,
        item,
        expected: expected.to_string(),
    }
}
