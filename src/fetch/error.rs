use std::fmt;

/// Broad class of a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// The bucket or the key does not exist.
    NotFound,
    /// Credentials were missing, invalid or not allowed to read the object.
    AccessDenied,
    /// The request never produced a usable response (connect, timeout, body read).
    Transport,
    /// Any other error reported by the storage service.
    Service,
}

impl FetchErrorKind {
    /// Classifies a storage-service error from its error code and HTTP status.
    ///
    /// The code wins when it is recognized, otherwise the status decides.
    pub fn from_service(code: Option<&str>, status: Option<u16>) -> Self {
        match code {
            Some("NoSuchKey" | "NoSuchBucket" | "NotFound") => return Self::NotFound,
            Some(
                "AccessDenied"
                | "InvalidAccessKeyId"
                | "SignatureDoesNotMatch"
                | "ExpiredToken"
                | "InvalidToken"
                | "AllAccessDisabled",
            ) => return Self::AccessDenied,
            _ => {}
        }

        match status {
            Some(404) => Self::NotFound,
            Some(401 | 403) => Self::AccessDenied,
            _ => Self::Service,
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotFound => "object not found",
            Self::AccessDenied => "access denied",
            Self::Transport => "transport failure",
            Self::Service => "storage service error",
        };
        f.write_str(s)
    }
}

/// A failed object fetch, tagged with what was being fetched.
#[derive(Debug, thiserror::Error)]
#[error("{kind} for s3://{bucket}/{key}: {message}")]
pub struct FetchError {
    kind: FetchErrorKind,
    bucket: String,
    key: String,
    message: String,
}

impl FetchError {
    pub fn new(
        kind: FetchErrorKind,
        bucket: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            bucket: bucket.into(),
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}
