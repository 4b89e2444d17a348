//! Mapping of SDK failures onto core errors
//!
//! Failures are classified once from the full error context and never
//! retried.

use aws_sdk_s3::error::DisplayErrorContext;
use spaces_core::Error;

const NOT_FOUND_CODES: [&str; 3] = ["NoSuchKey", "NoSuchBucket", "NotFound"];
const AUTH_CODES: [&str; 4] = [
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
    "AccessDenied",
    "Forbidden",
];

/// Convert an SDK error about `resource` into a core error
pub(crate) fn map_sdk_error(err: impl std::error::Error, resource: &str) -> Error {
    classify(DisplayErrorContext(&err).to_string(), resource)
}

fn classify(message: String, resource: &str) -> Error {
    if NOT_FOUND_CODES.iter().any(|code| message.contains(code)) {
        Error::NotFound(resource.to_string())
    } else if AUTH_CODES.iter().any(|code| message.contains(code)) {
        Error::Auth(message)
    } else {
        Error::Network(message)
    }
}
