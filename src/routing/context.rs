//! Request-scoped context carried alongside a command.

use std::collections::HashMap;

/// Named capture groups produced by a matcher.
pub type Params = HashMap<String, String>;

/// Per-invocation context handed to every handler.
///
/// Holds the parameters of the routes matched so far. Nested muxes merge
/// their parameters on top; a key set by an inner route replaces the outer
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    params: Params,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a context with `params` merged in.
    pub fn with_params(mut self, params: Params) -> Self {
        self.params.extend(params);
        self
    }

    /// All route parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// A single route parameter by capture-group name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_params_merges_and_overrides() {
        let outer = Context::new().with_params(Params::from([
            ("repo".to_string(), "acme".to_string()),
            ("env".to_string(), "staging".to_string()),
        ]));
        let inner = outer.with_params(Params::from([("env".to_string(), "prod".to_string())]));

        assert_eq!(inner.param("repo"), Some("acme"));
        assert_eq!(inner.param("env"), Some("prod"));
        assert_eq!(inner.params().len(), 2);
        assert_eq!(inner.param("missing"), None);
    }
}
