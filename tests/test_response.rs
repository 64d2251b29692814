use statik::http::response::{StatusCode, error_page, render_error, status_message};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::Forbidden.as_u16(), 403);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
}

#[test]
fn test_status_message_known_codes() {
    assert_eq!(status_message(200), ("OK", "Request fulfilled, document follows"));
    assert_eq!(
        status_message(400),
        ("Bad Request", "Bad request syntax or unsupported method")
    );
    assert_eq!(
        status_message(403),
        ("Forbidden", "Request forbidden -- authorization will not help")
    );
    assert_eq!(status_message(404), ("Not Found", "Nothing matches the given URI"));
    assert_eq!(
        status_message(500),
        ("Internal Server Error", "Server got itself in trouble")
    );
    assert_eq!(
        status_message(501),
        ("Not Implemented", "Server does not support this operation")
    );
}

#[test]
fn test_status_message_unknown_codes_are_empty() {
    for code in [0, 100, 201, 302, 405, 418, 502, 999, u16::MAX] {
        assert_eq!(status_message(code), ("", ""), "code {}", code);
        assert_eq!(StatusCode::from_u16(code), None);
    }
}

#[test]
fn test_render_error_substitutes_verbatim() {
    let page = render_error(404, "Not Found", "Nothing matches the given URI");

    assert_eq!(page.matches("404").count(), 2);
    assert_eq!(page.matches("Not Found").count(), 1);
    assert_eq!(page.matches("Nothing matches the given URI").count(), 1);
    assert!(page.contains("<p>Error code: 404</p>"));
    assert!(page.contains("<p>Error code explanation: 404 - Nothing matches the given URI.</p>"));
}

#[test]
fn test_render_error_accepts_empty_strings() {
    let page = render_error(418, "", "");

    assert!(page.contains("<p>Error code: 418</p>"));
    assert!(page.contains("<p>Message: </p>"));
    assert!(page.contains("<p>Error code explanation: 418 - .</p>"));
}

#[test]
fn test_render_error_is_deterministic() {
    assert_eq!(
        render_error(500, "Internal Server Error", "Server got itself in trouble"),
        error_page(StatusCode::InternalServerError)
    );
}
