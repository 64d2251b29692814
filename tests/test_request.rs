use statik::http::request::Method;

#[test]
fn test_method_parse_get() {
    assert_eq!(Method::parse("GET"), Method::Get);
    assert!(Method::parse("GET").is_supported());
}

#[test]
fn test_method_parse_is_case_sensitive() {
    let method = Method::parse("get");
    assert_eq!(method, Method::Other("get".to_string()));
    assert!(!method.is_supported());
}

#[test]
fn test_method_other_keeps_token() {
    for token in ["POST", "HEAD", "DELETE", "BREW"] {
        let method = Method::parse(token);
        assert_eq!(method.as_str(), token);
        assert!(!method.is_supported());
    }
}
