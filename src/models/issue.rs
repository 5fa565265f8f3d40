//! Issue schema for audit exports produced by the axe browser extension.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
/// One finding from an exported JSON array. Absent or `null` fields
/// default to empty values.
pub struct Issue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default, rename = "help", deserialize_with = "null_as_default")]
    pub help_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub help_url: String,
    #[serde(default, rename = "selector", deserialize_with = "null_as_default")]
    pub selectors: Vec<String>,
}

impl Issue {
    /// First selector, or an empty string when the export lists none.
    pub fn first_selector(&self) -> &str {
        self.selectors.first().map(String::as_str).unwrap_or("")
    }
}

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_null_fields_default() {
        let issues: Vec<Issue> = serde_json::from_str(
            r#"[{"id":"color-contrast","summary":"Low contrast","help":null},{}]"#,
        )
        .unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].id, "color-contrast");
        assert_eq!(issues[0].help_text, "");
        assert!(issues[1].selectors.is_empty());
        assert_eq!(issues[1].first_selector(), "");
    }

    #[test]
    fn test_selector_and_help_url_keys() {
        let issue: Issue = serde_json::from_str(
            r##"{"help_url":"https://dequeuniversity.com/rules/axe/4.4/label","selector":["#a",".b"]}"##,
        )
        .unwrap();
        assert_eq!(issue.help_url, "https://dequeuniversity.com/rules/axe/4.4/label");
        assert_eq!(issue.first_selector(), "#a");
    }

    #[test]
    fn test_non_object_element_is_rejected() {
        assert!(serde_json::from_str::<Vec<Issue>>(r#"[1, 2]"#).is_err());
        assert!(serde_json::from_str::<Vec<Issue>>(r#"{"id":"x"}"#).is_err());
    }
}
