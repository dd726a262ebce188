use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

const ALL_VARS: [&str; 17] = [
    "FLAVOR_PORT",
    "FLAVOR_BIND_ADDR",
    "FLAVOR_CATALOG_PATH",
    "FLAVOR_QDRANT_URL",
    "FLAVOR_COLLECTION",
    "FLAVOR_EMBEDDING_URL",
    "FLAVOR_EMBEDDING_MODEL",
    "FLAVOR_EMBEDDING_API_KEY",
    "FLAVOR_EMBEDDING_DIM",
    "FLAVOR_LLM_MODEL",
    "FLAVOR_MOCK_PROVIDER",
    "FLAVOR_MAX_TOKENS",
    "FLAVOR_TOP_K",
    "FLAVOR_RATE_LIMIT",
    "FLAVOR_RATE_WINDOW_SECS",
    "FLAVOR_CLIENT_IP_HEADER",
    "FLAVOR_KV_CAPACITY",
];

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_flavor_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for key in ALL_VARS {
        unsafe { env::remove_var(key) };
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8787);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert!(config.catalog_path.is_none());
    assert_eq!(config.qdrant_url, "http://localhost:6334");
    assert_eq!(config.collection, "ingredients");
    assert!(config.embedding_url.is_none());
    assert_eq!(config.embedding_dim, 384);
    assert_eq!(config.llm_model, DEFAULT_LLM_MODEL);
    assert!(!config.mock_provider);
    assert_eq!(config.max_tokens, 256);
    assert_eq!(config.top_k, 6);
    assert_eq!(config.rate_limit, 10);
    assert_eq!(config.rate_window_secs, 60);
    assert_eq!(
        config.client_ip_headers,
        vec!["cf-connecting-ip", "x-forwarded-for"]
    );
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8787");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_flavor_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8787);
    assert_eq!(config.top_k, 6);
    assert!(config.embedder_config().is_none());
}

#[test]
#[serial]
fn test_from_env_custom_port() {
    clear_flavor_env();

    with_env_vars(&[("FLAVOR_PORT", "3000")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.port, 3000);
    });
}

#[test]
#[serial]
fn test_from_env_ipv6_bind_addr() {
    clear_flavor_env();

    with_env_vars(&[("FLAVOR_BIND_ADDR", "::1")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.bind_addr,
            IpAddr::V6(std::net::Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))
        );
    });
}

#[test]
#[serial]
fn test_invalid_port_zero() {
    clear_flavor_env();

    with_env_vars(&[("FLAVOR_PORT", "0")], || {
        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
    });
}

#[test]
#[serial]
fn test_invalid_port_not_number() {
    clear_flavor_env();

    with_env_vars(&[("FLAVOR_PORT", "abc")], || {
        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::PortParseError { .. })));
    });
}

#[test]
#[serial]
fn test_invalid_bind_addr() {
    clear_flavor_env();

    with_env_vars(&[("FLAVOR_BIND_ADDR", "not-an-ip")], || {
        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidBindAddr { .. })));
    });
}

#[test]
#[serial]
fn test_full_config_parse() {
    clear_flavor_env();

    with_env_vars(
        &[
            ("FLAVOR_PORT", "9000"),
            ("FLAVOR_BIND_ADDR", "0.0.0.0"),
            ("FLAVOR_CATALOG_PATH", "/data/ingredients.json"),
            ("FLAVOR_QDRANT_URL", "http://qdrant.cluster:6334"),
            ("FLAVOR_COLLECTION", "flavors"),
            ("FLAVOR_EMBEDDING_URL", "http://tei:8080/v1/embeddings"),
            ("FLAVOR_EMBEDDING_MODEL", "bge-base-en-v1.5"),
            ("FLAVOR_EMBEDDING_API_KEY", "secret"),
            ("FLAVOR_EMBEDDING_DIM", "768"),
            ("FLAVOR_LLM_MODEL", "claude-3-haiku-20240307"),
            ("FLAVOR_MOCK_PROVIDER", "true"),
            ("FLAVOR_MAX_TOKENS", "128"),
            ("FLAVOR_TOP_K", "10"),
            ("FLAVOR_RATE_LIMIT", "5"),
            ("FLAVOR_RATE_WINDOW_SECS", "30"),
            ("FLAVOR_CLIENT_IP_HEADER", "X-Real-IP"),
            ("FLAVOR_KV_CAPACITY", "500"),
        ],
        || {
            let config = Config::from_env().expect("should parse full config");

            assert_eq!(config.socket_addr(), "0.0.0.0:9000");
            assert_eq!(
                config.catalog_path,
                Some(PathBuf::from("/data/ingredients.json"))
            );
            assert_eq!(config.qdrant_url, "http://qdrant.cluster:6334");
            assert_eq!(config.collection, "flavors");
            assert_eq!(config.embedding_dim, 768);
            assert_eq!(config.llm_model, "claude-3-haiku-20240307");
            assert!(config.mock_provider);
            assert_eq!(config.max_tokens, 128);
            assert_eq!(config.top_k, 10);
            assert_eq!(config.rate_limit, 5);
            assert_eq!(config.rate_window_secs, 30);
            assert_eq!(config.client_ip_headers, vec!["x-real-ip"]);
            assert_eq!(config.kv_capacity, 500);

            let embedder = config.embedder_config().expect("embedder configured");
            assert_eq!(embedder.endpoint, "http://tei:8080/v1/embeddings");
            assert_eq!(embedder.model, "bge-base-en-v1.5");
            assert_eq!(embedder.api_key.as_deref(), Some("secret"));
            assert_eq!(embedder.embedding_dim, 768);
        },
    );
}

#[test]
#[serial]
fn test_client_ip_header_list() {
    clear_flavor_env();

    with_env_vars(
        &[("FLAVOR_CLIENT_IP_HEADER", "X-Real-IP, X-Forwarded-For,")],
        || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.client_ip_headers, vec!["x-real-ip", "x-forwarded-for"]);
        },
    );
}

#[test]
#[serial]
fn test_blank_optional_values_ignored() {
    clear_flavor_env();

    with_env_vars(
        &[("FLAVOR_EMBEDDING_URL", "   "), ("FLAVOR_COLLECTION", "")],
        || {
            let config = Config::from_env().unwrap();
            assert!(config.embedding_url.is_none());
            assert_eq!(config.collection, "ingredients");
        },
    );
}

#[test]
#[serial]
fn test_invalid_numbers_use_default() {
    clear_flavor_env();

    with_env_vars(&[("FLAVOR_TOP_K", "many"), ("FLAVOR_KV_CAPACITY", "-1")], || {
        let config = Config::from_env().unwrap();
        assert_eq!(config.top_k, 6);
        assert_eq!(config.kv_capacity, 100_000);
    });
}

#[test]
#[serial]
fn test_invalid_mock_provider_flag() {
    clear_flavor_env();

    with_env_vars(&[("FLAVOR_MOCK_PROVIDER", "maybe")], || {
        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                name: "FLAVOR_MOCK_PROVIDER",
                ..
            })
        ));
    });
}

#[test]
#[serial]
fn test_rate_limit_out_of_range() {
    clear_flavor_env();

    with_env_vars(&[("FLAVOR_RATE_LIMIT", "99999999999")], || {
        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    });
}

#[test]
fn test_rate_limit_config() {
    let config = Config {
        rate_limit: 3,
        rate_window_secs: 5,
        ..Default::default()
    };

    let limiter = config.rate_limit_config();
    assert_eq!(limiter.limit, 3);
    assert_eq!(limiter.window, std::time::Duration::from_secs(5));
    assert_eq!(limiter.retry_after_secs, 5);
}

#[test]
fn test_validate_zero_values() {
    let config = Config {
        top_k: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MustBeNonZero {
            name: "FLAVOR_TOP_K"
        })
    ));

    let config = Config {
        rate_window_secs: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MustBeNonZero { .. })
    ));
}

#[test]
fn test_validate_nonexistent_catalog_path() {
    let config = Config {
        catalog_path: Some(PathBuf::from("/nonexistent/ingredients.json")),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_catalog_path_is_directory() {
    let config = Config {
        catalog_path: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src")),
        ..Default::default()
    };

    assert!(matches!(config.validate(), Err(ConfigError::NotAFile { .. })));
}

#[test]
fn test_validate_success_with_catalog_file() {
    let config = Config {
        catalog_path: Some(
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/catalog/ingredients.json"),
        ),
        ..Default::default()
    };

    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_success_with_defaults() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = ConfigError::MustBeNonZero {
        name: "FLAVOR_TOP_K",
    };
    assert_eq!(err.to_string(), "FLAVOR_TOP_K must be greater than zero");

    let err = ConfigError::InvalidValue {
        name: "FLAVOR_MOCK_PROVIDER",
        value: "maybe".to_string(),
    };
    assert!(err.to_string().contains("FLAVOR_MOCK_PROVIDER"));
    assert!(err.to_string().contains("maybe"));
}
