/// Configuración del proveedor de embeddings, resuelta desde el entorno.
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// Base del endpoint de preprocesamiento (`<base>/candidate`, `<base>/offer`).
    pub preprocess_endpoint: Option<String>,
    /// Endpoint del modelo de embeddings.
    pub embedding_endpoint: Option<String>,
    /// Dimensión fija de los vectores (por despliegue).
    pub dimension: usize,
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            preprocess_endpoint: None,
            embedding_endpoint: None,
            dimension: 768,
            timeout_secs: 30,
        }
    }
}

impl EmbeddingConfig {
    pub fn from_env() -> Self {
        fn non_empty(key: &str) -> Option<String> {
            std::env::var(key)
                .ok()
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        }

        fn parse_usize(key: &str, default: usize) -> usize {
            std::env::var(key)
                .ok()
                .and_then(|raw| raw.parse::<usize>().ok())
                .unwrap_or(default)
        }

        fn parse_u64(key: &str, default: u64) -> u64 {
            std::env::var(key)
                .ok()
                .and_then(|raw| raw.parse::<u64>().ok())
                .unwrap_or(default)
        }

        Self {
            preprocess_endpoint: non_empty("TM_PREPROCESS_ENDPOINT"),
            embedding_endpoint: non_empty("TM_EMBEDDING_ENDPOINT"),
            dimension: parse_usize("TM_EMBEDDING_DIMENSION", 768).max(1),
            timeout_secs: parse_u64("TM_EMBEDDING_TIMEOUT_SECONDS", 30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_env(vars: &[(&str, Option<&str>)], f: impl FnOnce()) {
        use std::sync::Mutex;
        static ENV_GUARD: Mutex<()> = Mutex::new(());
        let _guard = ENV_GUARD.lock().unwrap();

        let prev: Vec<(String, Option<String>)> = vars
            .iter()
            .map(|(key, value)| {
                let previous = std::env::var(key).ok();
                match value {
                    Some(v) => std::env::set_var(key, v),
                    None => std::env::remove_var(key),
                }
                (key.to_string(), previous)
            })
            .collect();

        f();

        for (key, previous) in prev {
            if let Some(v) = previous {
                std::env::set_var(&key, v);
            } else {
                std::env::remove_var(&key);
            }
        }
    }

    #[test]
    fn defaults_apply_without_env() {
        with_env(
            &[
                ("TM_PREPROCESS_ENDPOINT", None),
                ("TM_EMBEDDING_ENDPOINT", None),
                ("TM_EMBEDDING_DIMENSION", None),
                ("TM_EMBEDDING_TIMEOUT_SECONDS", None),
            ],
            || {
                let config = EmbeddingConfig::from_env();
                assert!(config.preprocess_endpoint.is_none());
                assert!(config.embedding_endpoint.is_none());
                assert_eq!(config.dimension, 768);
                assert_eq!(config.timeout_secs, 30);
            },
        );
    }

    #[test]
    fn env_overrides_are_read() {
        with_env(
            &[
                ("TM_PREPROCESS_ENDPOINT", Some("http://pre.local/preprocess")),
                ("TM_EMBEDDING_ENDPOINT", Some("http://model.local/embed")),
                ("TM_EMBEDDING_DIMENSION", Some("384")),
                ("TM_EMBEDDING_TIMEOUT_SECONDS", Some("5")),
            ],
            || {
                let config = EmbeddingConfig::from_env();
                assert_eq!(
                    config.preprocess_endpoint.as_deref(),
                    Some("http://pre.local/preprocess")
                );
                assert_eq!(
                    config.embedding_endpoint.as_deref(),
                    Some("http://model.local/embed")
                );
                assert_eq!(config.dimension, 384);
                assert_eq!(config.timeout_secs, 5);
            },
        );
    }

    #[test]
    fn blank_endpoints_count_as_unset() {
        with_env(
            &[
                ("TM_PREPROCESS_ENDPOINT", Some("   ")),
                ("TM_EMBEDDING_DIMENSION", Some("0")),
            ],
            || {
                let config = EmbeddingConfig::from_env();
                assert!(config.preprocess_endpoint.is_none());
                // La dimensión nunca baja de 1.
                assert_eq!(config.dimension, 1);
            },
        );
    }
}
