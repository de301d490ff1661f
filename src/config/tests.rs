use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    for (key, value) in vars {
        env::set_var(key, value);
    }

    let result = f();

    for (key, _) in vars {
        env::remove_var(key);
    }

    result
}

fn clear_moniker_env() {
    for var in [
        "MONIKER_PORT",
        "MONIKER_BIND_ADDR",
        "MONIKER_VECTOR_DIMENSION",
        "MONIKER_INDEX_PATH",
        "MONIKER_EMBEDDER_URL",
        "MONIKER_EMBEDDER_TIMEOUT_SECS",
        "MONIKER_EMBEDDER_RETRIES",
        "MONIKER_MMR_LAMBDA",
        "MONIKER_K_MODIFIERS",
        "MONIKER_K_NOUNS",
        "MONIKER_RECOMMEND_K",
        "MONIKER_TOP_SIMILAR",
        "MONIKER_FALLBACK_CANDIDATES",
        "MONIKER_MODIFIER_PATH",
        "MONIKER_NOUN_PATH",
    ] {
        env::remove_var(var);
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.vector_dimension, 768);
    assert_eq!(config.index_path, PathBuf::from("./index"));
    assert_eq!(config.embedder_url, "http://localhost:8001");
    assert_eq!(config.embedder_timeout.as_secs(), 30);
    assert_eq!(config.embedder_retries, 3);
    assert!((config.mmr_lambda - 0.7).abs() < f32::EPSILON);
    assert_eq!(config.k_modifiers, 20);
    assert_eq!(config.k_nouns, 30);
    assert_eq!(config.recommend_k, 3);
    assert_eq!(config.top_similar, 5);
    assert_eq!(config.fallback_candidates, 50);
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");

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
    clear_moniker_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8080);
    assert_eq!(config.vector_dimension, 768);
}

#[test]
#[serial]
fn test_from_env_custom_port() {
    clear_moniker_env();

    with_env_vars(&[("MONIKER_PORT", "3000")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.port, 3000);
    });
}

#[test]
#[serial]
fn test_from_env_pipeline_overrides() {
    clear_moniker_env();

    with_env_vars(
        &[
            ("MONIKER_K_MODIFIERS", "8"),
            ("MONIKER_K_NOUNS", "12"),
            ("MONIKER_RECOMMEND_K", "5"),
            ("MONIKER_MMR_LAMBDA", "0.5"),
            ("MONIKER_EMBEDDER_URL", "http://embedder.cluster:8001"),
            ("MONIKER_EMBEDDER_TIMEOUT_SECS", "10"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.k_modifiers, 8);
            assert_eq!(config.k_nouns, 12);
            assert_eq!(config.recommend_k, 5);
            assert!((config.mmr_lambda - 0.5).abs() < f32::EPSILON);
            assert_eq!(config.embedder_url, "http://embedder.cluster:8001");
            assert_eq!(config.embedder_timeout.as_secs(), 10);
        },
    );
}

#[test]
#[serial]
fn test_invalid_port_zero() {
    clear_moniker_env();

    with_env_vars(&[("MONIKER_PORT", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
        assert!(err.to_string().contains("invalid port"));
    });
}

#[test]
#[serial]
fn test_invalid_port_not_number() {
    clear_moniker_env();

    with_env_vars(&[("MONIKER_PORT", "not_a_port")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::PortParseError { .. }));
    });
}

#[test]
#[serial]
fn test_invalid_bind_addr() {
    clear_moniker_env();

    with_env_vars(&[("MONIKER_BIND_ADDR", "not.an.ip.address")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    });
}

#[test]
#[serial]
fn test_lambda_out_of_range() {
    clear_moniker_env();

    with_env_vars(&[("MONIKER_MMR_LAMBDA", "1.5")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLambda { .. }));
    });
}

#[test]
#[serial]
fn test_invalid_numeric_setting() {
    clear_moniker_env();

    with_env_vars(&[("MONIKER_K_NOUNS", "thirty")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
        assert!(err.to_string().contains("MONIKER_K_NOUNS"));
    });
}

#[test]
fn test_validate_index_path_is_file() {
    let config = Config {
        index_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml"),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::NotADirectory { .. }));
}

#[test]
fn test_validate_rejects_bad_embedder_url() {
    let config = Config {
        embedder_url: "localhost:8001".to_string(),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEmbedderUrl { .. }));
}

#[test]
fn test_validate_nonexistent_vocab_path() {
    let config = Config {
        modifier_path: Some(PathBuf::from("/nonexistent/modifiers.txt")),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::PathNotFound { .. }));
}

#[test]
fn test_validate_vocab_path_is_directory() {
    let config = Config {
        noun_path: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src")),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::NotAFile { .. }));
}

#[test]
fn test_validate_success_with_defaults() {
    let config = Config::default();
    assert!(config.validate().is_ok());
}
