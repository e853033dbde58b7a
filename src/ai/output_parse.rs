use super::GeneratedCopy;
use serde_json::Value;

/// Returns the first balanced top-level `{...}` span in `text`. Braces inside
/// JSON string literals are ignored.
pub fn extract_first_json_object(text: &str) -> Option<&str> {
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

pub fn parse_generated_copy(text: &str) -> Result<GeneratedCopy, String> {
    let span = extract_first_json_object(text)
        .ok_or_else(|| "no JSON object found in reply".to_string())?;
    let value: Value =
        serde_json::from_str(span).map_err(|err| format!("invalid JSON object: {err}"))?;
    if !value.is_object() {
        return Err("reply JSON was not an object".to_string());
    }
    serde_json::from_value(value).map_err(|err| format!("unexpected copy shape: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_object_surrounded_by_prose() {
        let text = "Sure! Here you go:\n{\"tagline\": \"Hi {there}\"}\nThanks {later}";
        assert_eq!(
            extract_first_json_object(text),
            Some("{\"tagline\": \"Hi {there}\"}")
        );
    }

    #[test]
    fn handles_escaped_quotes_inside_strings() {
        let text = r#"{"tagline": "say \"}\" twice"} trailing"#;
        assert_eq!(
            extract_first_json_object(text),
            Some(r#"{"tagline": "say \"}\" twice"}"#)
        );
    }

    #[test]
    fn unbalanced_reply_has_no_object() {
        assert_eq!(extract_first_json_object("{\"tagline\": \"x\""), None);
        assert_eq!(extract_first_json_object("no braces"), None);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let copy = parse_generated_copy("{\"tagline\":\"Bread, better\"}").expect("parse");
        assert_eq!(copy.tagline, "Bread, better");
        assert!(copy.services.is_empty());
        assert_eq!(copy.seo_description, "");
    }

    #[test]
    fn wrong_field_type_is_parse_error() {
        let err = parse_generated_copy("{\"services\": \"none\"}").expect_err("shape");
        assert!(err.contains("unexpected copy shape"));
    }
}
