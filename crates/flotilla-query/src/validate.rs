// SPDX-License-Identifier: Apache-2.0

use flotilla_model::{RepoAnnouncement, ValidationError};

/// Per-record acceptance check run on everything a source returns before it
/// counts toward that source's results. Signature verification plugs in
/// here; the aggregator only sees pass or fail.
pub trait RecordValidator<R>: Send + Sync + 'static {
    fn validate(&self, record: &R) -> Result<(), ValidationError>;
}

/// Accepts every record. The default when callers filter upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl<R> RecordValidator<R> for AcceptAll {
    fn validate(&self, _record: &R) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Structural announcement check: field limits plus the id having to equal
/// the record's own content digest.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl RecordValidator<RepoAnnouncement> for StructuralValidator {
    fn validate(&self, record: &RepoAnnouncement) -> Result<(), ValidationError> {
        record.validate_strict()?;
        let digest = record.content_digest()?;
        if digest != record.id.as_str() {
            return Err(ValidationError(format!(
                "announcement id does not match content digest {digest}"
            )));
        }
        Ok(())
    }
}
