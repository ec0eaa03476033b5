//! Turning model output into an [`Intent`].
//!
//! Model replies are not trusted to be clean JSON: they may wrap the object
//! in prose or code fences, use non-breaking spaces, or send a list where a
//! single value was asked for. Everything loose is normalised here so the
//! query engine only ever sees a typed `Intent`.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{Action, Direction, Intent, IntentError, TimeOfDay, TimeRelation};

/// Find the first balanced `{...}` block in `text`.
///
/// Braces inside JSON string literals are ignored. Returns `None` when there
/// is no opening brace or the first one is never closed.
///
/// # Examples
///
/// ```
/// use bus_bot::resolver::extract_json_object;
///
/// let reply = "Claro: {\"hora\": \"15:00\", \"x\": {\"y\": 1}} ¡listo!";
/// assert_eq!(
///     extract_json_object(reply),
///     Some("{\"hora\": \"15:00\", \"x\": {\"y\": 1}}")
/// );
/// assert_eq!(extract_json_object("sin datos"), None);
/// ```
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse a model reply into an actionable intent.
///
/// Fails when the reply has no JSON object, the object is malformed,
/// carries an `error` key, names an unknown direction, or names neither a
/// direction nor a line.
pub fn parse_intent(reply: &str) -> Result<Intent, IntentError> {
    let block = extract_json_object(reply).ok_or(IntentError::NoJsonObject)?;
    let normalized = block.replace('\u{a0}', " ");

    let object: Map<String, Value> =
        serde_json::from_str(&normalized).map_err(|e| IntentError::Json(e.to_string()))?;

    if let Some(marker) = object.get("error") {
        let marker = match marker {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(IntentError::Unclear(marker));
    }

    let raw: RawIntent = serde_json::from_value(Value::Object(object))
        .map_err(|e| IntentError::Json(e.to_string()))?;

    let intent = raw.into_intent()?;
    if !intent.is_actionable() {
        return Err(IntentError::NotActionable);
    }
    Ok(intent)
}

/// A field the model may send either as a value or as a list of values.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// The value, or the first element of the list.
    fn first(self) -> Option<T> {
        match self {
            OneOrMany::One(v) => Some(v),
            OneOrMany::Many(vs) => vs.into_iter().next(),
        }
    }
}

/// A JSON scalar of any type.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl Scalar {
    /// Non-empty trimmed text form of the value.
    fn into_text(self) -> Option<String> {
        let text = match self {
            Scalar::Text(s) => s.trim().to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Flag(b) => b.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }

    fn into_count(self) -> Option<usize> {
        let n = match self {
            Scalar::Number(n) => n.as_u64()?,
            Scalar::Text(s) => s.trim().parse::<u64>().ok()?,
            Scalar::Flag(_) => return None,
        };
        usize::try_from(n).ok().filter(|&n| n > 0)
    }

    fn is_true(&self) -> bool {
        match self {
            Scalar::Flag(b) => *b,
            Scalar::Text(s) => s.trim().eq_ignore_ascii_case("true"),
            Scalar::Number(_) => false,
        }
    }
}

type Field = Option<OneOrMany<Scalar>>;

/// Model output as decoded, before normalisation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawIntent {
    direccion: Field,
    hora: Field,
    accion: Field,
    micro_linea: Field,
    condicion_horario: Field,
    cantidad: Field,
    listado_completo: Field,
}

fn first(field: Field) -> Option<Scalar> {
    field.and_then(OneOrMany::first)
}

fn text(field: Field) -> Option<String> {
    first(field).and_then(Scalar::into_text)
}

impl RawIntent {
    fn into_intent(self) -> Result<Intent, IntentError> {
        let direction = text(self.direccion)
            .map(|d| Direction::parse(&d))
            .transpose()?;

        Ok(Intent {
            direction,
            time_of_day: text(self.hora).map(|h| TimeOfDay::from_raw(&h)),
            action: text(self.accion).and_then(|a| Action::parse(&a)),
            line_filter: text(self.micro_linea),
            time_relation: text(self.condicion_horario).and_then(|r| TimeRelation::parse(&r)),
            requested_count: first(self.cantidad).and_then(Scalar::into_count),
            full_listing: first(self.listado_completo).is_some_and(|f| f.is_true()),
        })
    }
}
