//! Invocation context: selectors passed by whoever launched the editor.
//!
//! Accepts a query string like `?model=combo&lang=de`. Unknown keys are
//! ignored and bad values fall back to the supplied defaults.

use std::str::FromStr;

use tracing::debug;

use crate::types::{BaseModel, Locale};

/// Selectors read once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvocationContext {
    pub model: BaseModel,
    pub locale: Locale,
}

impl InvocationContext {
    pub fn new(model: BaseModel, locale: Locale) -> Self {
        Self { model, locale }
    }

    /// Parse a query string, using built-in defaults for anything missing.
    pub fn from_query(query: &str) -> Self {
        Self::from_query_or(query, Self::default())
    }

    /// Parse a query string, using `defaults` for anything missing or invalid.
    pub fn from_query_or(query: &str, defaults: Self) -> Self {
        let mut ctx = defaults;
        let query = query.trim().trim_start_matches('?');

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "model" => ctx.model = parse_or(value, defaults.model),
                "lang" | "locale" => ctx.locale = parse_or(value, defaults.locale),
                _ => debug!(key, "ignoring unknown query parameter"),
            }
        }

        ctx
    }
}

fn parse_or<T: FromStr + Copy>(value: &str, fallback: T) -> T {
    value.parse().unwrap_or(fallback)
}
