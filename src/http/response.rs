/// HTTP status codes produced by the server.
///
/// The set is closed: a static file server that only answers `GET` never
/// needs anything beyond these six.
/// - `Ok` (200): File found and streamed
/// - `BadRequest` (400): Malformed or unreadable request line
/// - `Forbidden` (403): File exists but is not world-readable
/// - `NotFound` (404): Nothing at the requested path
/// - `InternalServerError` (500): File exists but could not be opened
/// - `NotImplemented` (501): Any method other than `GET`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use statik::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Looks up a status code by number. Returns `None` outside the catalog.
    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            200 => Some(StatusCode::Ok),
            400 => Some(StatusCode::BadRequest),
            403 => Some(StatusCode::Forbidden),
            404 => Some(StatusCode::NotFound),
            500 => Some(StatusCode::InternalServerError),
            501 => Some(StatusCode::NotImplemented),
            _ => None,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use statik::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }

    /// One-line explanation shown on the error page.
    pub fn explanation(&self) -> &'static str {
        match self {
            StatusCode::Ok => "Request fulfilled, document follows",
            StatusCode::BadRequest => "Bad request syntax or unsupported method",
            StatusCode::Forbidden => "Request forbidden -- authorization will not help",
            StatusCode::NotFound => "Nothing matches the given URI",
            StatusCode::InternalServerError => "Server got itself in trouble",
            StatusCode::NotImplemented => "Server does not support this operation",
        }
    }
}

/// Returns `(reason_phrase, explanation)` for a numeric status code.
///
/// Codes outside the catalog yield two empty strings rather than an error.
pub fn status_message(code: u16) -> (&'static str, &'static str) {
    StatusCode::from_u16(code)
        .map(|status| (status.reason_phrase(), status.explanation()))
        .unwrap_or(("", ""))
}

/// Content type of every rendered error page.
pub const ERROR_CONTENT_TYPE: &str = "text/html;charset=utf-8";

/// Renders the HTML error page.
///
/// Inputs are substituted verbatim, empty strings included; the code appears
/// twice and each message once.
pub fn render_error(code: u16, message: &str, explanation: &str) -> String {
    format!(
        r#"
<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN"
        "http://www.w3.org/TR/html4/strict.dtd">
<html>
    <head>
        <meta http-equiv="Content-Type" content="text/html;charset=utf-8">
        <title>Error response</title>
    </head>
    <body>
        <h1>Error response</h1>
        <p>Error code: {code}</p>
        <p>Message: {message}</p>
        <p>Error code explanation: {code} - {explanation}.</p>
    </body>
</html>
"#
    )
}

/// Renders the error page for a catalog status.
pub fn error_page(status: StatusCode) -> String {
    let (message, explanation) = status_message(status.as_u16());
    render_error(status.as_u16(), message, explanation)
}
