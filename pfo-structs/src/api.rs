use crate::{error::BodyError, serializable_struct_with_getters};
use pfo_challenges::knapsack::{Challenge, Solution};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// Fields are kept as raw json so validation can report exactly which one is wrong.
serializable_struct_with_getters! {
    OptimizeReq {
        capacidad: Option<Value>,
        objetos: Option<Value>,
    }
}

serializable_struct_with_getters! {
    OptimizeResp {
        seleccionados: Vec<String>,
        ganancia_total: u64,
        peso_total: u64,
    }
}

serializable_struct_with_getters! {
    HealthResp {
        status: String,
        service: String,
        version: String,
    }
}

serializable_struct_with_getters! {
    ErrorResp {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    }
}

impl OptimizeReq {
    /// Parses a request body. An empty body, `null` and `{}` all count as missing.
    pub fn from_body(body: &[u8]) -> Result<Self, BodyError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(BodyError::Empty);
        }
        let value: Value =
            serde_json::from_slice(body).map_err(|e| BodyError::Unparsable(e.to_string()))?;
        match value {
            Value::Null => Err(BodyError::Empty),
            Value::Object(ref obj) if obj.is_empty() => Err(BodyError::Empty),
            Value::Object(_) => {
                serde_json::from_value(value).map_err(|e| BodyError::Unparsable(e.to_string()))
            }
            _ => Err(BodyError::NotAnObject),
        }
    }
}

impl From<&Challenge> for OptimizeReq {
    fn from(challenge: &Challenge) -> Self {
        let objetos = challenge
            .items
            .iter()
            .map(|item| json!({"nombre": item.name, "peso": item.weight, "ganancia": item.gain}))
            .collect();
        Self {
            capacidad: Some(json!(challenge.capacity)),
            objetos: Some(Value::Array(objetos)),
        }
    }
}

impl From<Solution> for OptimizeResp {
    fn from(solution: Solution) -> Self {
        Self {
            seleccionados: solution.selected,
            ganancia_total: solution.total_gain,
            peso_total: solution.total_weight,
        }
    }
}

impl HealthResp {
    pub fn healthy(service: &str, version: &str) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.to_string(),
            version: version.to_string(),
        }
    }
}

impl ErrorResp {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
