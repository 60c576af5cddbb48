use super::*;

fn base(url: &str) -> Url {
    parse_base_url(url).expect("base URL should parse")
}

#[test]
fn endpoint_appends_key_after_trailing_slash() {
    let url = endpoint(&base("https://rdap.registro.br/domain/"), "example.com.br");
    assert_eq!(url.as_str(), "https://rdap.registro.br/domain/example.com.br");
}

#[test]
fn endpoint_appends_key_without_trailing_slash() {
    let url = endpoint(&base("https://receitaws.com.br/v1/cnpj"), "12345678000190");
    assert_eq!(url.as_str(), "https://receitaws.com.br/v1/cnpj/12345678000190");
}

#[test]
fn endpoint_on_bare_host() {
    let url = endpoint(&base("http://127.0.0.1:8080"), "example.com.br");
    assert_eq!(url.as_str(), "http://127.0.0.1:8080/example.com.br");
}

#[test]
fn parse_base_url_rejects_garbage() {
    let err = parse_base_url("not a url").unwrap_err();
    assert!(matches!(err, RegistryError::InvalidBaseUrl { .. }));
}

#[test]
fn parse_base_url_rejects_cannot_be_a_base() {
    let err = parse_base_url("mailto:someone@example.com").unwrap_err();
    assert!(matches!(err, RegistryError::InvalidBaseUrl { .. }));
}

#[test]
fn check_api_error_passes_ok_status() {
    let body = serde_json::json!({ "status": "OK", "nome": "ACME" });
    assert!(check_api_error(&body).is_ok());
}

#[test]
fn check_api_error_passes_missing_status() {
    let body = serde_json::json!({ "nome": "ACME" });
    assert!(check_api_error(&body).is_ok());
}

#[test]
fn check_api_error_surfaces_message() {
    let body = serde_json::json!({ "status": "ERROR", "message": "CNPJ inválido" });
    match check_api_error(&body) {
        Err(RegistryError::Api(msg)) => assert_eq!(msg, "CNPJ inválido"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn check_api_error_without_message() {
    let body = serde_json::json!({ "status": "ERROR" });
    match check_api_error(&body) {
        Err(RegistryError::Api(msg)) => assert_eq!(msg, "unknown error"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn new_points_at_production_registries() {
    let client = RegistryClient::new(30, "brdomain-test").expect("client should build");
    assert_eq!(client.rdap_base_url.as_str(), DEFAULT_RDAP_BASE_URL);
    assert_eq!(client.receitaws_base_url.as_str(), DEFAULT_RECEITAWS_BASE_URL);
}
