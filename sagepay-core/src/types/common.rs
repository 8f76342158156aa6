//! Miscellaneous helpers shared by requests, responses and server requests.

/// Represents any JSON value. Used for serializing/deserializing arbitrary JSON data.
pub type AnyJson = serde_json::Value;

/// Returns the value only when it holds at least one character.
///
/// Gateway and ACS payloads use empty strings and missing keys interchangeably,
/// so every "is this field set" decision goes through here.
///
/// ```
/// use sagepay_core::types::non_empty;
///
/// assert_eq!(non_empty(Some("abc")), Some("abc"));
/// assert_eq!(non_empty(Some("")), None);
/// assert_eq!(non_empty(None), None);
/// ```
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Renders a scalar JSON value as a string.
///
/// Strings are returned as-is, numbers and booleans in their JSON text form.
/// Arrays, objects and `null` have no scalar rendering and yield `None`.
pub fn scalar_to_string(value: &AnyJson) -> Option<String> {
    match value {
        AnyJson::String(s) => Some(s.clone()),
        AnyJson::Number(n) => Some(n.to_string()),
        AnyJson::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Whether a `Content-Type` header value names a JSON body.
///
/// Parameters such as `charset` are ignored, and structured-syntax types
/// like `application/problem+json` count as JSON.
///
/// ```
/// use sagepay_core::types::is_json_media_type;
///
/// assert!(is_json_media_type("application/json"));
/// assert!(is_json_media_type("Application/JSON; charset=utf-8"));
/// assert!(is_json_media_type("application/problem+json"));
/// assert!(!is_json_media_type("text/html"));
/// assert!(!is_json_media_type("application/x-www-form-urlencoded"));
/// ```
pub fn is_json_media_type(content_type: &str) -> bool {
    let Ok(media_type) = content_type.trim().parse::<mime::Mime>() else {
        return false;
    };

    media_type.essence_str() == mime::APPLICATION_JSON.essence_str()
        || (media_type.type_() == mime::APPLICATION && media_type.suffix().is_some_and(|suffix| suffix == mime::JSON))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn scalars_render_as_text() {
        assert_eq!(scalar_to_string(&json!("1003")), Some("1003".to_string()));
        assert_eq!(scalar_to_string(&json!(1003)), Some("1003".to_string()));
        assert_eq!(scalar_to_string(&json!(true)), Some("true".to_string()));
        assert_eq!(scalar_to_string(&json!(null)), None);
        assert_eq!(scalar_to_string(&json!({"code": 1})), None);
        assert_eq!(scalar_to_string(&json!([1])), None);
    }

    #[test]
    fn json_media_types() {
        assert!(is_json_media_type("APPLICATION/JSON"));
        assert!(is_json_media_type("application/json; charset=UTF-8"));
        assert!(is_json_media_type("application/vnd.api+json"));
        assert!(!is_json_media_type("text/json+xml"));
        assert!(!is_json_media_type("text/plain+json"));
        assert!(!is_json_media_type("json"));
        assert!(!is_json_media_type(""));
    }
}
