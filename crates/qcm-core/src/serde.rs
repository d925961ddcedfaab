use serde::{Deserialize, Deserializer};

/// Deserializes a string and strips surrounding whitespace.
pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// Like [`deserialize_trimmed`], for optional fields. Use together with
/// `#[serde(default)]`.
pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.map(|s| s.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "deserialize_trimmed")]
        name: String,
        #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
        nickname: Option<String>,
    }

    #[test]
    fn test_trims_required_and_optional() {
        let sample: Sample =
            serde_json::from_str(r#"{"name":"  alice ","nickname":" al "}"#).unwrap();
        assert_eq!(sample.name, "alice");
        assert_eq!(sample.nickname.as_deref(), Some("al"));
    }

    #[test]
    fn test_missing_optional_is_none() {
        let sample: Sample = serde_json::from_str(r#"{"name":"bob"}"#).unwrap();
        assert_eq!(sample.nickname, None);

        let sample: Sample = serde_json::from_str(r#"{"name":"bob","nickname":null}"#).unwrap();
        assert_eq!(sample.nickname, None);
    }
}
