//! Path template interpolation
//!
//! Endpoint paths are declared as templates with `:name` segments, e.g.
//! `/open-apis/im/v1/chats/:chat_id/members`. Values are percent-encoded
//! before they are substituted.

use crate::error::{Error, Result};
use crate::types::StringMap;
use regex::Regex;
use std::sync::LazyLock;

/// Regex for matching path parameters: `:name`
static PATH_PARAM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([a-zA-Z_][a-zA-Z0-9_]*)").unwrap());

/// Fill a path template with the given parameters
///
/// Every `:name` in the template must have a value in `params`; extra
/// parameters are ignored. Missing names are reported together.
pub fn fill_path(template: &str, params: &StringMap) -> Result<String> {
    let mut missing = Vec::new();

    let filled = PATH_PARAM_REGEX.replace_all(template, |caps: &regex::Captures<'_>| {
        let name = &caps[1];
        match params.get(name) {
            Some(value) => encode_segment(value),
            None => {
                missing.push(name.to_string());
                String::new()
            }
        }
    });

    if missing.is_empty() {
        Ok(filled.into_owned())
    } else {
        Err(Error::undefined_var(missing.join(", ")))
    }
}

/// List the parameter names a template expects, in order of appearance
pub fn path_params(template: &str) -> Vec<String> {
    PATH_PARAM_REGEX
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Percent-encode a single path segment
fn encode_segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> StringMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_fill_single_param() {
        let path = fill_path(
            "/open-apis/im/v1/chats/:chat_id",
            &params(&[("chat_id", "oc_123")]),
        )
        .unwrap();
        assert_eq!(path, "/open-apis/im/v1/chats/oc_123");
    }

    #[test]
    fn test_fill_multiple_params() {
        let path = fill_path(
            "/open-apis/aily/v1/sessions/:aily_session_id/messages/:aily_message_id",
            &params(&[("aily_session_id", "s1"), ("aily_message_id", "m2")]),
        )
        .unwrap();
        assert_eq!(path, "/open-apis/aily/v1/sessions/s1/messages/m2");
    }

    #[test]
    fn test_fill_no_params() {
        let path = fill_path("/open-apis/im/v1/chats", &StringMap::new()).unwrap();
        assert_eq!(path, "/open-apis/im/v1/chats");
    }

    #[test]
    fn test_fill_ignores_extra_params() {
        let path = fill_path("/chats/:chat_id", &params(&[("chat_id", "a"), ("x", "y")])).unwrap();
        assert_eq!(path, "/chats/a");
    }

    #[test]
    fn test_fill_missing_params() {
        let err = fill_path("/sessions/:session_id/messages/:message_id", &StringMap::new())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UndefinedVariable { ref variable } if variable == "session_id, message_id"
        ));
    }

    #[test]
    fn test_fill_encodes_values() {
        let path = fill_path("/users/:user_id", &params(&[("user_id", "a b/c")])).unwrap();
        assert_eq!(path, "/users/a%20b%2Fc");
    }

    #[test]
    fn test_path_params() {
        assert_eq!(
            path_params("/chats/:chat_id/members/:member_id"),
            vec!["chat_id".to_string(), "member_id".to_string()]
        );
        assert!(path_params("/chats").is_empty());
    }
}
