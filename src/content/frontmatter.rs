//! Front matter extraction
//!
//! A content file may open with a `---` line, a YAML mapping and a closing
//! `---` line. Files without front matter yield an empty object.

use serde_json::{Map, Value};

/// Splits a document into its raw front matter and body.
///
/// Returns `None` for the front matter if the file does not open with a
/// delimiter line. An opening delimiter without a closing one is an error.
pub fn split_front_matter(source: &str) -> Result<(Option<&str>, &str), String> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let rest = match strip_delimiter_line(source) {
        Some(rest) => rest,
        None => return Ok((None, source)),
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((Some(yaml), body));
        }
        offset += line.len();
    }

    Err("front matter is not terminated by '---'".to_string())
}

fn strip_delimiter_line(source: &str) -> Option<&str> {
    let rest = source.strip_prefix("---")?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

/// Parses a document's front matter into a JSON object.
pub fn parse_front_matter(source: &str) -> Result<Value, String> {
    let (yaml, _body) = split_front_matter(source)?;

    let yaml = match yaml {
        Some(yaml) if !yaml.trim().is_empty() => yaml,
        _ => return Ok(Value::Object(Map::new())),
    };

    let parsed: serde_yaml::Value =
        serde_yaml::from_str(yaml).map_err(|e| format!("invalid YAML: {e}"))?;
    match yaml_to_json(parsed)? {
        Value::Object(map) => Ok(Value::Object(map)),
        Value::Null => Ok(Value::Object(Map::new())),
        _ => Err("front matter must be a mapping".to_string()),
    }
}

/// Converts parsed YAML front matter into JSON.
///
/// Tags are dropped. Scalar mapping keys become strings (`2024: x` gives
/// `"2024"`); other keys are rejected, as are non-finite numbers.
pub fn yaml_to_json(yaml: serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    match yaml {
        Yaml::Null => Ok(Value::Null),
        Yaml::Bool(b) => Ok(Value::Bool(b)),
        Yaml::Number(n) => match serde_json::to_value(&n) {
            Ok(Value::Number(number)) => Ok(Value::Number(number)),
            _ => Err(format!("number {} has no JSON representation", n)),
        },
        Yaml::String(s) => Ok(Value::String(s)),
        Yaml::Sequence(items) => items
            .into_iter()
            .map(yaml_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Yaml::Mapping(mapping) => {
            let mut object = Map::new();
            for (key, value) in mapping {
                object.insert(mapping_key(key)?, yaml_to_json(value)?);
            }
            Ok(Value::Object(object))
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn mapping_key(key: serde_yaml::Value) -> Result<String, String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Tagged(tagged) => mapping_key(tagged.value),
        other => Err(format!("front matter keys must be scalars, found {:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_mapping() {
        let doc = "---\ntitle: Hello\nlabel:\n  - a\n  - b\nweight: 3\n---\n\n# Body\n";
        let value = parse_front_matter(doc).unwrap();
        assert_eq!(value, json!({ "title": "Hello", "label": ["a", "b"], "weight": 3 }));
    }

    #[test]
    fn test_body_is_returned() {
        let (yaml, body) = split_front_matter("---\na: 1\n---\nbody text").unwrap();
        assert_eq!(yaml, Some("a: 1\n"));
        assert_eq!(body, "body text");
    }

    #[test]
    fn test_no_front_matter_is_empty_object() {
        assert_eq!(parse_front_matter("# Just markdown\n").unwrap(), json!({}));
    }

    #[test]
    fn test_empty_front_matter() {
        assert_eq!(parse_front_matter("---\n---\nbody").unwrap(), json!({}));
    }

    #[test]
    fn test_crlf_line_endings() {
        let value = parse_front_matter("---\r\ntitle: Windows\r\n---\r\nbody").unwrap();
        assert_eq!(value["title"], "Windows");
    }

    #[test]
    fn test_unterminated_front_matter() {
        let err = parse_front_matter("---\ntitle: open\n").unwrap_err();
        assert!(err.contains("not terminated"));
    }

    #[test]
    fn test_non_mapping_rejected() {
        assert!(parse_front_matter("---\n- a\n- b\n---\n").is_err());
    }

    #[test]
    fn test_dates_stay_strings() {
        let doc = "---\nstartDate: 2024-01-10\nstartTime: '09:00+00:00'\n---\n";
        let value = parse_front_matter(doc).unwrap();
        assert_eq!(value["startDate"], "2024-01-10");
        assert_eq!(value["startTime"], "09:00+00:00");
    }

    #[test]
    fn test_quoted_hash_color() {
        let value = parse_front_matter("---\ncolor: \"#ff0000\"\n---\n").unwrap();
        assert_eq!(value["color"], "#ff0000");
    }

    #[test]
    fn test_bom_is_ignored() {
        let value = parse_front_matter("\u{feff}---\ntitle: x\n---\n").unwrap();
        assert_eq!(value["title"], "x");
    }

    #[test]
    fn test_tags_dropped_and_scalar_keys_stringified() {
        let doc = "---\ntitle: !md Hello\nyears:\n  2024: rnaseq\n  true: yes\n---\n";
        let value = parse_front_matter(doc).unwrap();
        assert_eq!(value["title"], "Hello");
        assert_eq!(value["years"], json!({ "2024": "rnaseq", "true": "yes" }));
    }

    #[test]
    fn test_non_finite_number_rejected() {
        let err = parse_front_matter("---\nweight: .nan\n---\n").unwrap_err();
        assert!(err.contains("no JSON representation"));
    }

    #[test]
    fn test_sequence_keys_rejected() {
        assert!(parse_front_matter("---\n? [a, b]\n: x\n---\n").is_err());
    }
}
