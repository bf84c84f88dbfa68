//! Default response descriptions keyed by HTTP status code.
//!
//! Every response entry in the generated document needs a `description`. When a route
//! declaration does not supply one, the registrar falls back to the reason phrase returned
//! by [`describe`]. Codes outside the standard set (custom codes such as `299` or `999`)
//! are legal and simply get an empty description.

/// Reason phrase for `code`, or `""` when the code is not a standard HTTP status.
#[must_use]
pub fn describe(code: u16) -> &'static str {
    match code {
        100 => "Continue",
        101 => "Switching Protocols",
        102 => "Processing",

        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non-Authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",
        207 => "Multi-Status",
        208 => "Already Reported",
        226 => "IM Used",

        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        305 => "Use Proxy",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",

        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        407 => "Proxy Authentication Required",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Payload Too Large",
        414 => "URI Too Long",
        415 => "Unsupported Media Type",
        416 => "Range Not Satisfiable",
        417 => "Expectation Failed",
        418 => "I'm a teapot",
        421 => "Misdirected Request",
        422 => "Unprocessable Entity",
        423 => "Locked",
        424 => "Failed Dependency",
        425 => "Too Early",
        426 => "Upgrade Required",
        428 => "Precondition Required",
        429 => "Too Many Requests",
        431 => "Request Header Fields Too Large",
        451 => "Unavailable For Legal Reasons",

        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        506 => "Variant Also Negotiates",
        507 => "Insufficient Storage",
        508 => "Loop Detected",
        510 => "Not Extended",
        511 => "Network Authentication Required",

        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::describe;
    use proptest::prelude::*;

    #[test]
    fn test_common_codes() {
        assert_eq!(describe(200), "OK");
        assert_eq!(describe(201), "Created");
        assert_eq!(describe(204), "No Content");
        assert_eq!(describe(404), "Not Found");
        assert_eq!(describe(418), "I'm a teapot");
        assert_eq!(describe(500), "Internal Server Error");
    }

    #[test]
    fn test_unknown_codes_are_empty() {
        assert_eq!(describe(0), "");
        assert_eq!(describe(299), "");
        assert_eq!(describe(306), "");
        assert_eq!(describe(509), "");
        assert_eq!(describe(999), "");
    }

    proptest! {
        #[test]
        fn describe_is_total_and_stable(code in any::<u16>()) {
            let first = describe(code);
            prop_assert_eq!(first, describe(code));
            if !(100..600).contains(&code) {
                prop_assert_eq!(first, "");
            }
        }
    }
}
