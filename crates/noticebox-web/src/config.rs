#![forbid(unsafe_code)]

//! JSON configuration accepted by `mount()`.

use noticebox_core::ModalConfig;

use crate::error::ConfigError;

/// Parse an optional JSON document into a [`ModalConfig`].
///
/// `None`, an empty string, and whitespace all mean "defaults". Unknown keys
/// are ignored; missing keys keep their defaults.
pub fn parse_config(json: Option<&str>) -> Result<ModalConfig, ConfigError> {
    match json.map(str::trim) {
        None | Some("") => Ok(ModalConfig::default()),
        Some(text) => Ok(serde_json::from_str(text)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn empty_input_means_defaults() {
        assert_eq!(parse_config(None).unwrap(), ModalConfig::default());
        assert_eq!(parse_config(Some("  ")).unwrap(), ModalConfig::default());
        assert_eq!(parse_config(Some("{}")).unwrap(), ModalConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let json = r#"{
            "load_delay_ms": 0,
            "default_title": "Hinweis",
            "selectors": {"hidden_class": "is-hidden"}
        }"#;
        let config = parse_config(Some(json)).unwrap();
        assert_eq!(config.timing.load_delay, Duration::ZERO);
        assert_eq!(config.timing.close_delay, Duration::from_millis(220));
        assert_eq!(config.default_title, "Hinweis");
        assert_eq!(config.selectors.hidden_class, "is-hidden");
        assert_eq!(config.selectors.root_id, "noticeModal");
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = parse_config(Some("{\"close_delay_ms\": \"soon\"}")).unwrap_err();
        assert!(err.to_string().starts_with("invalid modal config"));
    }
}
