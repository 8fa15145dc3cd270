//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the redirect rules
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::codes::CodeSpec;
use crate::config::schema::ProxyConfig;
use crate::redirect::emitter::resolve_output_status;
use crate::redirect::RedirectTemplate;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl fmt::Display) -> Self {
        Self {
            field: field.into(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a parsed configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("invalid socket address {:?}", config.listener.bind_address),
        ));
    }

    if config.upstream.address.trim().is_empty() {
        errors.push(ValidationError::new("upstream.address", "must be set"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("invalid socket address {:?}", config.observability.metrics_address),
        ));
    }

    for (i, token) in config.redirect.status.iter().enumerate() {
        if let Err(e) = token.parse::<CodeSpec>() {
            errors.push(ValidationError::new(format!("redirect.status[{}]", i), e));
        }
    }

    if let Err(e) = RedirectTemplate::new(config.redirect.target.clone()) {
        errors.push(ValidationError::new("redirect.target", e));
    }

    if let Err(e) = resolve_output_status(config.redirect.output_status) {
        errors.push(ValidationError::new("redirect.output_status", e));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ProxyConfig {
        let mut config = ProxyConfig::default();
        config.redirect.status = vec!["401".into(), "5xx".into()];
        config.redirect.target = "http://target/?status={status}&url={url}".into();
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid();
        config.listener.bind_address = "nope".into();
        config.redirect.status = vec!["abc".into(), "404".into(), "600-700".into()];
        config.redirect.target = String::new();
        config.redirect.output_status = 7;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "redirect.status[0]",
                "redirect.status[2]",
                "redirect.target",
                "redirect.output_status",
            ]
        );
        assert_eq!(errors[3].message, "target url must be set");
    }
}
