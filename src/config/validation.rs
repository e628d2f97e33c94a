//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check command definitions (names, patterns, duplicates)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use regex::Regex;
use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Check `config` and report every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.timeouts.callback_secs == 0 {
        errors.push(ValidationError::new("timeouts.callback_secs", "must be greater than 0"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    if !config.commands.is_empty() && config.security.token.is_empty() {
        errors.push(ValidationError::new(
            "security.token",
            "required when commands are configured",
        ));
    }

    let mut catch_all = HashSet::new();
    for (i, command) in config.commands.iter().enumerate() {
        let field = format!("commands[{i}]");

        if !command.name.starts_with('/') || command.name.len() < 2 {
            errors.push(ValidationError::new(
                format!("{field}.name"),
                format!("'{}' must start with '/'", command.name),
            ));
        }

        match &command.pattern {
            Some(pattern) => {
                if let Err(e) = Regex::new(pattern) {
                    errors.push(ValidationError::new(format!("{field}.pattern"), e.to_string()));
                }
            }
            None => {
                // A second pattern-less entry for the same name could never match.
                if !catch_all.insert(command.name.as_str()) {
                    errors.push(ValidationError::new(
                        format!("{field}.name"),
                        format!("'{}' is already defined without a pattern", command.name),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
