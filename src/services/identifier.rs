use crate::domain::{
    models::ObjectIdentifier,
    value_objects::{BucketName, ObjectKey},
};

/// Compose the identifier an uploaded file is stored under.
///
/// The key is `subdirectory/filename` when a subdirectory is given (even an
/// empty one) and `filename` otherwise. The filename is trusted as sent.
pub fn build_identifier(
    bucket: &BucketName,
    subdirectory: Option<&str>,
    filename: &str,
) -> ObjectIdentifier {
    ObjectIdentifier::new(bucket.clone(), ObjectKey::from_parts(subdirectory, filename))
}
