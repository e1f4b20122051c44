//! Credential resolution for the analysis service.
//!
//! The API key is resolved at call time from an ordered list of named
//! sources: the operator override in the settings store, then the
//! deployment environment, then (debug builds only) an embedded fallback.
//! Nothing is cached — every resolve re-reads all sources, so an override
//! written by the settings store takes effect on the very next call.

use std::sync::{Arc, RwLock};

/// The secret authentication string for the external inference service.
///
/// Debug output is redacted so the key never lands in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential(****)")
    }
}

/// Shared, in-memory operator settings.
///
/// The CLI seeds this from the config file at startup and rewrites it when
/// the operator changes the key; the resolver only ever reads it. Reads and
/// writes are cheap (one `RwLock`), so concurrent analyses can resolve
/// freely.
#[derive(Clone, Default)]
pub struct SettingsStore {
    api_key_override: Arc<RwLock<Option<String>>>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_api_key_override(&self, value: Option<String>) {
        *self.api_key_override.write().expect("settings lock poisoned") = value;
    }

    pub fn api_key_override(&self) -> Option<String> {
        self.api_key_override
            .read()
            .expect("settings lock poisoned")
            .clone()
    }
}

/// One place a credential may come from.
///
/// Implementations must be cheap — no network or disk I/O — because every
/// source is polled on every resolve.
pub trait CredentialSource: Send + Sync {
    /// Source name for logging (e.g., "settings", "environment").
    fn name(&self) -> &str;

    /// Current value, if any. Empty strings are treated as absent by the
    /// resolver.
    fn get(&self) -> Option<String>;
}

/// Operator override held in the shared settings store.
pub struct SettingsSource {
    store: SettingsStore,
}

impl SettingsSource {
    pub fn new(store: SettingsStore) -> Self {
        Self { store }
    }
}

impl CredentialSource for SettingsSource {
    fn name(&self) -> &str {
        "settings"
    }

    fn get(&self) -> Option<String> {
        self.store.api_key_override()
    }
}

/// Deployment-environment variable.
pub struct EnvSource {
    var: String,
}

impl EnvSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialSource for EnvSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn get(&self) -> Option<String> {
        std::env::var(&self.var).ok()
    }
}

/// Fixed value known at construction time.
pub struct StaticSource {
    name: String,
    value: Option<String>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Build-time fallback key, compiled in only for debug builds. Release
    /// builds carry no static credential.
    #[cfg(debug_assertions)]
    pub fn embedded_fallback() -> Self {
        Self::new(
            "embedded",
            option_env!("THUMBDUEL_DEV_API_KEY").map(String::from),
        )
    }
}

impl CredentialSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self) -> Option<String> {
        self.value.clone()
    }
}

/// Ordered credential resolution: first non-empty source wins.
pub struct CredentialResolver {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl CredentialResolver {
    /// Build a resolver over an explicit ordered source list.
    pub fn new(sources: Vec<Box<dyn CredentialSource>>) -> Self {
        Self { sources }
    }

    /// The production order: settings override, then environment, then the
    /// debug-build embedded fallback.
    pub fn with_default_sources(store: SettingsStore) -> Self {
        #[allow(unused_mut)]
        let mut sources: Vec<Box<dyn CredentialSource>> = vec![
            Box::new(SettingsSource::new(store)),
            Box::new(EnvSource::new("GEMINI_API_KEY")),
        ];
        #[cfg(debug_assertions)]
        sources.push(Box::new(StaticSource::embedded_fallback()));
        Self::new(sources)
    }

    /// Walk the sources in order and return the first non-empty value.
    ///
    /// Every source is checked unconditionally on every call; an all-empty
    /// configuration yields `None`, never an empty credential.
    pub fn resolve(&self) -> Option<Credential> {
        for source in &self.sources {
            if let Some(value) = source.get().filter(|v| !v.trim().is_empty()) {
                tracing::debug!("Resolved API credential from '{}' source", source.name());
                return Some(Credential::new(value));
            }
        }
        tracing::debug!("No API credential found in any source");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(name: &str, value: Option<&str>) -> Box<dyn CredentialSource> {
        Box::new(StaticSource::new(name, value.map(String::from)))
    }

    #[test]
    fn test_priority_matrix() {
        // (override, environment, fallback) → expected winner. Covers every
        // combination of empty / non-empty / absent per source.
        let cases: &[(Option<&str>, Option<&str>, Option<&str>, Option<&str>)] = &[
            (Some("ovr"), Some("env"), Some("fb"), Some("ovr")),
            (Some("ovr"), None, None, Some("ovr")),
            (Some(""), Some("env"), Some("fb"), Some("env")),
            (None, Some("env"), Some("fb"), Some("env")),
            (None, Some(""), Some("fb"), Some("fb")),
            (None, None, Some("fb"), Some("fb")),
            (Some(""), Some(""), Some(""), None),
            (None, None, None, None),
        ];

        for (ovr, env, fb, expected) in cases {
            let resolver = CredentialResolver::new(vec![
                fixed("settings", *ovr),
                fixed("environment", *env),
                fixed("embedded", *fb),
            ]);
            let resolved = resolver.resolve().map(|c| c.expose().to_string());
            assert_eq!(
                resolved.as_deref(),
                *expected,
                "override={ovr:?} env={env:?} fallback={fb:?}"
            );
        }
    }

    #[test]
    fn test_whitespace_only_value_is_absent() {
        let resolver = CredentialResolver::new(vec![fixed("settings", Some("  \t"))]);
        assert!(resolver.resolve().is_none());
    }

    #[test]
    fn test_settings_change_visible_on_next_resolve() {
        let store = SettingsStore::new();
        let resolver =
            CredentialResolver::new(vec![Box::new(SettingsSource::new(store.clone()))]);

        assert!(resolver.resolve().is_none());

        store.set_api_key_override(Some("fresh-key".to_string()));
        assert_eq!(resolver.resolve().unwrap().expose(), "fresh-key");

        store.set_api_key_override(None);
        assert!(resolver.resolve().is_none());
    }

    #[test]
    fn test_env_source_reads_live_value() {
        let var = "THUMBDUEL_TEST_CREDENTIAL_XYZ";
        std::env::remove_var(var);
        let resolver = CredentialResolver::new(vec![Box::new(EnvSource::new(var))]);
        assert!(resolver.resolve().is_none());

        std::env::set_var(var, "from-env");
        assert_eq!(resolver.resolve().unwrap().expose(), "from-env");
        std::env::remove_var(var);
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("super-secret");
        let printed = format!("{credential:?}");
        assert!(!printed.contains("super-secret"));
    }
}
