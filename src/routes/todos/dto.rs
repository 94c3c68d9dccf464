use serde_json::{Map, Value};

use crate::error::ApiError;

/// Validated create payload. Parsed by hand from the raw body rather
/// than through the `Json` extractor's typed path, so that a wrongly
/// typed field comes back as a 400 with a message naming the field.
#[derive(Debug)]
pub struct NewTodo {
    pub task: String,
    pub completed: bool,
    pub extra: Map<String, Value>,
}

impl NewTodo {
    pub fn parse(body: Value) -> Result<Self, ApiError> {
        let mut fields = into_object(body)?;
        // The store owns id assignment.
        fields.remove("id");

        let task = match fields.remove("task") {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            Some(Value::String(_)) => {
                return Err(ApiError::Validation("task must not be empty".into()))
            }
            Some(_) => return Err(ApiError::Validation("task must be a string".into())),
            None => return Err(ApiError::Validation("task is required".into())),
        };

        let completed = match fields.remove("completed") {
            Some(Value::Bool(b)) => b,
            Some(_) => return Err(ApiError::Validation("completed must be a boolean".into())),
            None => return Err(ApiError::Validation("completed is required".into())),
        };

        Ok(Self {
            task,
            completed,
            extra: fields,
        })
    }
}

/// Partial update payload for PATCH. Absent fields are left untouched.
pub struct UpdateTodo {
    pub task: Option<String>,
    pub completed: Option<bool>,
    pub extra: Map<String, Value>,
}

impl UpdateTodo {
    pub fn parse(body: Value) -> Result<Self, ApiError> {
        let mut fields = into_object(body)?;
        fields.remove("id");

        let task = match fields.remove("task") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
            Some(Value::String(_)) => {
                return Err(ApiError::Validation("task must not be empty".into()))
            }
            Some(_) => return Err(ApiError::Validation("task must be a string".into())),
            None => None,
        };

        let completed = match fields.remove("completed") {
            Some(Value::Bool(b)) => Some(b),
            Some(_) => return Err(ApiError::Validation("completed must be a boolean".into())),
            None => None,
        };

        Ok(Self {
            task,
            completed,
            extra: fields,
        })
    }
}

fn into_object(body: Value) -> Result<Map<String, Value>, ApiError> {
    match body {
        Value::Object(fields) => Ok(fields),
        _ => Err(ApiError::Validation("body must be a JSON object".into())),
    }
}
