//! Schema descriptors for structured extraction.
//!
//! A `Schema` is consumed twice: once by the prompt builder (it renders the
//! field list the model must produce) and once by the strict decoder (it
//! rejects responses with missing required fields, wrong types, or values
//! outside declared bounds). Model output is never accepted as a bare
//! dynamic map.

use serde_json::Value;

/// Value shape of a single schema field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    TextList,
    BoundedInt { min: i64, max: i64 },
}

/// One field in a schema: name, shape, and whether the model must supply it.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// A named set of typed fields describing one record the model must return.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    /// Renders the instruction block appended to every extraction prompt.
    /// Field names, types, bounds and cardinality all come from the
    /// descriptor so prompt and decoder can never drift apart.
    pub fn instructions(&self) -> String {
        let mut out = format!(
            "Return ONLY a valid JSON object (the {} record) with exactly these fields:\n",
            self.name
        );
        for field in self.fields {
            let ty = match field.kind {
                FieldKind::Text => "string".to_string(),
                FieldKind::TextList => "array of strings".to_string(),
                FieldKind::BoundedInt { min, max } => {
                    format!("integer between {min} and {max}")
                }
            };
            let req = if field.required {
                "required"
            } else {
                "optional — use null if not stated in the input"
            };
            out.push_str(&format!("- \"{}\": {} ({})\n", field.name, ty, req));
        }
        out.push_str(
            "Do NOT add fields that are not listed. \
             Do NOT fabricate values that are not present in the input; \
             use null for missing optional fields and [] for empty lists.",
        );
        out
    }

    /// Validates a parsed response against this schema. Returns a
    /// human-readable description of the first violation found.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        let obj = value
            .as_object()
            .ok_or_else(|| format!("{} response is not a JSON object", self.name))?;

        for field in self.fields {
            let entry = obj.get(field.name);
            match entry {
                None | Some(Value::Null) => {
                    if field.required {
                        return Err(format!("missing required field `{}`", field.name));
                    }
                }
                Some(v) => check_kind(field.name, field.kind, v)?,
            }
        }
        Ok(())
    }
}

fn check_kind(name: &str, kind: FieldKind, value: &Value) -> Result<(), String> {
    match kind {
        FieldKind::Text => {
            if !value.is_string() {
                return Err(format!("field `{name}` must be a string"));
            }
        }
        FieldKind::TextList => {
            let arr = value
                .as_array()
                .ok_or_else(|| format!("field `{name}` must be an array of strings"))?;
            if arr.iter().any(|v| !v.is_string()) {
                return Err(format!("field `{name}` must contain only strings"));
            }
        }
        FieldKind::BoundedInt { min, max } => {
            let n = value
                .as_i64()
                .ok_or_else(|| format!("field `{name}` must be an integer"))?;
            if n < min || n > max {
                return Err(format!(
                    "field `{name}` is {n}, outside the allowed range [{min}, {max}]"
                ));
            }
        }
    }
    Ok(())
}
