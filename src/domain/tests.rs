// Domain module tests.

use super::*;
use proptest::prelude::*;

#[test]
fn test_url_decode_hex_pairs() {
    assert_eq!(url_decode("http%3A%2F%2Fexample.com"), "http://example.com");
    assert_eq!(url_decode("a%20b"), "a b");
}

#[test]
fn test_url_decode_leaves_invalid_sequences() {
    assert_eq!(url_decode("100%"), "100%");
    assert_eq!(url_decode("%zz"), "%zz");
    assert_eq!(url_decode("%4"), "%4");
}

#[test]
fn test_url_decode_multibyte() {
    assert_eq!(url_decode("caf%C3%A9"), "café");
}

#[test]
fn test_normalize_prefixes_scheme() {
    let target = normalize("example.com").expect("should normalize");
    assert_eq!(target.domain, "http://example.com");
    assert_eq!(target.path, "http://example.com/");
}

#[test]
fn test_normalize_keeps_https_and_port() {
    let target = normalize("https://example.com:8443/a/b?q=1").expect("should normalize");
    assert_eq!(target.domain, "https://example.com:8443");
    assert_eq!(target.path, "https://example.com:8443/a/b?q=1");
}

#[test]
fn test_normalize_uppercase_scheme_is_not_doubled() {
    let target = normalize("HTTP://Example.com/x").expect("should normalize");
    assert_eq!(target.domain, "http://example.com");
}

#[test]
fn test_normalize_decodes_input() {
    let target = normalize("http%3A%2F%2Fexample.com%2Fpage").expect("should normalize");
    assert_eq!(target.domain, "http://example.com");
    assert_eq!(target.path, "http://example.com/page");
}

#[test]
fn test_normalize_schemeless_with_url_in_query() {
    let target =
        normalize("example.com/login?next=http://other.com/").expect("should normalize");
    assert_eq!(target.domain, "http://example.com");
    assert_eq!(target.path, "http://example.com/login?next=http://other.com/");
}

#[test]
fn test_normalize_schemeless_with_encoded_url_in_query() {
    let target = normalize("example.com/login?next=http%3A%2F%2Fother.com%2F")
        .expect("should normalize");
    assert_eq!(target.domain, "http://example.com");
    assert!(target.path.starts_with("http://example.com/login?next="));
}

#[test]
fn test_normalize_schemeless_with_port() {
    let target = normalize("localhost:8080/a").expect("should normalize");
    assert_eq!(target.domain, "http://localhost:8080");
}

#[test]
fn test_normalize_domain_key_ignores_host_case() {
    let upper = normalize("Example.COM/Page").expect("should normalize");
    let lower = normalize("example.com/Page").expect("should normalize");
    assert_eq!(upper.domain, "http://example.com");
    assert_eq!(upper.domain, lower.domain);
    // Path case is kept.
    assert_eq!(upper.path, "http://example.com/Page");
}

#[test]
fn test_normalize_rejects_malformed() {
    assert!(matches!(normalize("http://"), Err(ResolveError::InvalidUrl(_))));
    assert!(matches!(normalize(""), Err(ResolveError::InvalidUrl(_))));
    assert!(matches!(
        normalize("ftp://example.com"),
        Err(ResolveError::InvalidUrl(_))
    ));
    assert!(matches!(
        normalize("http://exa mple.com"),
        Err(ResolveError::InvalidUrl(_))
    ));
}

#[test]
fn test_normalize_error_carries_input() {
    let err = normalize("http://").unwrap_err();
    assert_eq!(err, ResolveError::InvalidUrl("http://".to_string()));
}

#[test]
fn test_parent_domain() {
    assert_eq!(
        parent_domain("http://a.b.example.com"),
        Some("http://b.example.com".to_string())
    );
    assert_eq!(
        parent_domain("http://b.example.com"),
        Some("http://example.com".to_string())
    );
    assert_eq!(parent_domain("http://example.com"), None);
    assert_eq!(parent_domain("http://localhost"), None);
}

#[test]
fn test_parent_domain_keeps_scheme_and_port() {
    assert_eq!(
        parent_domain("https://blog.example.com:8443"),
        Some("https://example.com:8443".to_string())
    );
}

#[test]
fn test_www_domain() {
    assert_eq!(
        www_domain("http://example.com"),
        Some("http://www.example.com".to_string())
    );
    assert_eq!(www_domain("http://www.example.com"), None);
    // Any occurrence of "www" counts as already covered.
    assert_eq!(www_domain("http://www2.example.com"), None);
    assert_eq!(
        www_domain("https://example.com:8443"),
        Some("https://www.example.com:8443".to_string())
    );
}

#[test]
fn test_ip_hosts_have_no_variants() {
    assert_eq!(parent_domain("http://10.0.0.1"), None);
    assert_eq!(www_domain("http://10.0.0.1"), None);
    assert_eq!(parent_domain("http://127.0.0.1:8080"), None);
    assert_eq!(www_domain("http://[::1]:8080"), None);
}

#[test]
fn test_variants_of_garbage_are_none() {
    assert_eq!(parent_domain("not a domain"), None);
    assert_eq!(www_domain(""), None);
}

fn label() -> impl Strategy<Value = String> {
    "[a-v][a-z0-9]{0,8}"
}

/// Empty, plain, or carrying another URL (raw or percent-encoded).
fn query_string() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{1,5}=[a-z0-9]{0,5}".prop_map(|kv| format!("?{kv}")),
        label().prop_map(|h| format!("?next=http://{h}.com/")),
        label().prop_map(|h| format!("?next=https%3A%2F%2F{h}.org%2Fx")),
    ]
}

proptest! {
    #[test]
    fn prop_parent_strips_exactly_one_label(labels in prop::collection::vec(label(), 3..6)) {
        let host = labels.join(".");
        let parent = parent_domain(&format!("http://{host}"));
        let expected = format!("http://{}", labels[1..].join("."));
        prop_assert_eq!(parent, Some(expected));
    }

    #[test]
    fn prop_two_label_hosts_have_no_parent(a in label(), b in label()) {
        prop_assert_eq!(parent_domain(&format!("http://{a}.{b}")), None);
    }

    #[test]
    fn prop_www_prepends_once(labels in prop::collection::vec(label(), 2..5)) {
        let host = labels.join(".");
        prop_assume!(!host.contains("www"));
        let www = www_domain(&format!("https://{host}"));
        prop_assert_eq!(www.clone(), Some(format!("https://www.{host}")));
        // The derived domain is already covered.
        prop_assert_eq!(www_domain(&www.unwrap_or_default()), None);
    }

    #[test]
    fn prop_normalize_domain_is_stable(
        labels in prop::collection::vec(label(), 2..5),
        path in "[a-z]{0,6}",
        query in query_string(),
    ) {
        let host = labels.join(".");
        let first = normalize(&format!("{host}/{path}{query}")).expect("valid host");
        prop_assert_eq!(&first.domain, &format!("http://{host}"));
        let second = normalize(&first.path).expect("normalized path re-normalizes");
        prop_assert_eq!(first.domain, second.domain);
    }
}
