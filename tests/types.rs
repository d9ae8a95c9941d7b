// ABOUTME: Integration tests for type-safe identifiers and validated types.
// ABOUTME: Tests image references, service endpoints, API keys and phantom-typed ids.

use vigil::types::*;

mod image_ref_tests {
    use super::*;

    #[test]
    fn parse_simple_name() {
        let img = ImageRef::parse("nginx").unwrap();
        assert_eq!(img.name(), "nginx");
        assert_eq!(img.tag(), Some("latest"));
        assert!(img.registry().is_none());
        assert!(img.digest().is_none());
    }

    #[test]
    fn parse_name_with_tag() {
        let img = ImageRef::parse("nginx:1.25").unwrap();
        assert_eq!(img.name(), "nginx");
        assert_eq!(img.tag(), Some("1.25"));
    }

    #[test]
    fn parse_with_registry() {
        let img = ImageRef::parse("registry.example.com/myapp:v1.2.3").unwrap();
        assert_eq!(img.registry(), Some("registry.example.com"));
        assert_eq!(img.name(), "myapp");
        assert_eq!(img.tag(), Some("v1.2.3"));
    }

    #[test]
    fn parse_with_org() {
        let img = ImageRef::parse("ghcr.io/org/repo:latest").unwrap();
        assert_eq!(img.registry(), Some("ghcr.io"));
        assert_eq!(img.name(), "org/repo");
        assert_eq!(img.tag(), Some("latest"));
    }

    #[test]
    fn parse_with_digest() {
        let digest = "sha256:abc123def456";
        let img = ImageRef::parse(&format!("nginx@{}", digest)).unwrap();
        assert_eq!(img.name(), "nginx");
        assert_eq!(img.digest(), Some(digest));
        assert!(img.tag().is_none());
    }

    #[test]
    fn parse_full_reference() {
        let img = ImageRef::parse("ghcr.io/org/repo:v1@sha256:abc123").unwrap();
        assert_eq!(img.registry(), Some("ghcr.io"));
        assert_eq!(img.name(), "org/repo");
        assert_eq!(img.tag(), Some("v1"));
        assert_eq!(img.digest(), Some("sha256:abc123"));
    }

    #[test]
    fn parse_empty_returns_error() {
        assert!(ImageRef::parse("").is_err());
    }

    #[test]
    fn parse_invalid_chars_returns_error() {
        assert!(ImageRef::parse("invalid image!").is_err());
    }

    #[test]
    fn parse_registry_with_port() {
        let img = ImageRef::parse("localhost:5000/app").unwrap();
        assert_eq!(img.registry(), Some("localhost:5000"));
        assert_eq!(img.name(), "app");
        assert_eq!(img.tag(), Some("latest"));
    }

    #[test]
    fn parse_dangling_separators_returns_error() {
        assert!(ImageRef::parse("nginx:").is_err());
        assert!(ImageRef::parse("nginx@").is_err());
    }

    #[test]
    fn display_formats_correctly() {
        let img = ImageRef::parse("ghcr.io/org/repo:v1").unwrap();
        assert_eq!(img.to_string(), "ghcr.io/org/repo:v1");
    }

    #[test]
    fn pinned_means_digest_or_explicit_tag() {
        assert!(!ImageRef::parse("nginx").unwrap().is_pinned());
        assert!(!ImageRef::parse("nginx:latest").unwrap().is_pinned());
        assert!(ImageRef::parse("nginx:1.25").unwrap().is_pinned());
        assert!(ImageRef::parse("nginx@sha256:abc").unwrap().is_pinned());
    }

    #[test]
    fn from_str_matches_parse() {
        let img: ImageRef = "ghcr.io/org/repo:v1".parse().unwrap();
        assert_eq!(img, ImageRef::parse("ghcr.io/org/repo:v1").unwrap());
    }
}

mod endpoint_tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let url = ServiceEndpoint::parse("https://app.onrender.com/").unwrap();
        assert_eq!(url.as_str(), "https://app.onrender.com");
        assert_eq!(url.join("/health"), "https://app.onrender.com/health");
    }

    #[test]
    fn join_adds_missing_slash() {
        let url = ServiceEndpoint::parse("http://localhost:8080").unwrap();
        assert_eq!(url.join("ready"), "http://localhost:8080/ready");
    }

    #[test]
    fn rejects_other_schemes() {
        assert_eq!(
            ServiceEndpoint::parse("ftp://example.com"),
            Err(EndpointError::UnsupportedScheme("ftp://example.com".into()))
        );
        assert_eq!(ServiceEndpoint::parse("  "), Err(EndpointError::Empty));
    }
}

mod api_key_tests {
    use super::*;

    #[test]
    fn debug_and_display_are_redacted() {
        let key = ApiKey::new("rnd_secret_value");
        assert!(!format!("{key:?}").contains("rnd_secret_value"));
        assert!(!key.to_string().contains("rnd_secret_value"));
        assert_eq!(key.expose(), "rnd_secret_value");
    }
}

mod id_tests {
    use super::*;

    #[test]
    fn deploy_id_stores_value() {
        let id = DeployId::new("dep-abc123");
        assert_eq!(id.as_str(), "dep-abc123");
        assert_eq!(id.to_string(), "dep-abc123");
    }

    #[test]
    fn service_id_round_trips_through_serde() {
        let id: ServiceId = serde_json::from_str("\"srv-xyz\"").unwrap();
        assert_eq!(id.as_str(), "srv-xyz");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"srv-xyz\"");
    }

    #[test]
    fn blank_ids_are_detected() {
        assert!(DeployId::new("   ").is_blank());
        assert!(!DeployId::new("dep-1").is_blank());
    }
}

