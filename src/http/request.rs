/// Protocol version assumed when a request line carries none.
pub const DEFAULT_PROTOCOL: &str = "HTTP/1.0";

/// HTTP request method.
///
/// Only `GET` is served. Anything else is kept verbatim so the handler can
/// answer 501 Not Implemented instead of rejecting the line outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    Get,
    /// Any other token in method position
    Other(String),
}

impl Method {
    /// Classifies a method token. Matching is case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use statik::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::Get);
    /// assert_eq!(Method::parse("get"), Method::Other("get".to_string()));
    /// ```
    pub fn parse(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Other(token) => token,
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Method::Get)
    }
}

/// A validated request line.
///
/// Built once per connection from exactly one line of input and never
/// mutated afterwards. An invalid line never produces one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// The request method
    pub method: Method,
    /// The request target as sent (e.g., "/index.html")
    pub target: String,
    /// Protocol version, [`DEFAULT_PROTOCOL`] for two-token lines
    pub version: String,
}
