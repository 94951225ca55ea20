use std::time::Duration;

use crate::domain::{
    errors::{StorageError, StorageResult},
    models::ObjectMetadata,
};

/// Longest validity window accepted by GCS and S3 for a signed URL
pub const MAX_SIGNED_URL_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Validity window used unless configured otherwise: 10 minutes
pub const DEFAULT_URL_EXPIRY: (u64, TimeUnit) = (10, TimeUnit::Minutes);

/// Unit of a signed URL validity window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    pub fn to_duration(self, amount: u64) -> Duration {
        let seconds = match self {
            TimeUnit::Seconds => amount,
            TimeUnit::Minutes => amount.saturating_mul(60),
            TimeUnit::Hours => amount.saturating_mul(60 * 60),
            TimeUnit::Days => amount.saturating_mul(24 * 60 * 60),
        };
        Duration::from_secs(seconds)
    }
}

/// Where the bucket appears in a signed URL.
///
/// Path style puts it in the path (`https://host/bucket/object`); virtual
/// hosted style puts it in the hostname (`https://bucket.host/object`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UrlStyle {
    #[default]
    PathStyle,
    VirtualHostedStyle,
}

impl UrlStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrlStyle::PathStyle => "path-style",
            UrlStyle::VirtualHostedStyle => "virtual-hosted-style",
        }
    }
}

/// A request to sign read access to an existing object
#[derive(Debug, Clone, PartialEq)]
pub struct SigningRequest {
    pub metadata: ObjectMetadata,
    pub duration: u64,
    pub unit: TimeUnit,
    pub style: UrlStyle,
}

impl SigningRequest {
    pub fn path_style(metadata: ObjectMetadata, duration: u64, unit: TimeUnit) -> Self {
        Self {
            metadata,
            duration,
            unit,
            style: UrlStyle::PathStyle,
        }
    }

    /// The validity window, checked against what the backends accept
    pub fn expires_in(&self) -> StorageResult<Duration> {
        let expires_in = self.unit.to_duration(self.duration);
        if expires_in.is_zero() || expires_in > MAX_SIGNED_URL_EXPIRY {
            return Err(StorageError::InvalidExpiry {
                seconds: expires_in.as_secs(),
                max_seconds: MAX_SIGNED_URL_EXPIRY.as_secs(),
            });
        }
        Ok(expires_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        models::ObjectIdentifier,
        value_objects::{BucketName, ObjectKey},
    };

    fn metadata() -> ObjectMetadata {
        ObjectMetadata::new(ObjectIdentifier::new(
            BucketName::new("mybucket").unwrap(),
            ObjectKey::new("report.txt"),
        ))
    }

    #[test]
    fn test_default_expiry_is_ten_minutes() {
        let (duration, unit) = DEFAULT_URL_EXPIRY;
        let request = SigningRequest::path_style(metadata(), duration, unit);
        assert_eq!(request.expires_in().unwrap(), Duration::from_secs(600));
        assert_eq!(request.style, UrlStyle::PathStyle);
    }

    #[test]
    fn test_expiry_bounds() {
        let zero = SigningRequest::path_style(metadata(), 0, TimeUnit::Minutes);
        assert!(matches!(
            zero.expires_in(),
            Err(StorageError::InvalidExpiry { seconds: 0, .. })
        ));

        let week = SigningRequest::path_style(metadata(), 7, TimeUnit::Days);
        assert_eq!(week.expires_in().unwrap(), MAX_SIGNED_URL_EXPIRY);

        let too_long = SigningRequest::path_style(metadata(), 169, TimeUnit::Hours);
        assert!(too_long.expires_in().is_err());
    }
}
