#![forbid(unsafe_code)]

pub mod platform;

pub use platform::{Platform, PlatformParseError};

pub mod ids {
    /// Identifier of one training job. The local store derives a file name from it, so it must
    /// never be able to escape the store directory.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct JobId(String);

    impl JobId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn into_string(self) -> String {
            self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, JobIdError> {
            let value = value.into();
            validate_job_id(&value)?;
            Ok(Self(value))
        }
    }

    impl std::fmt::Display for JobId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum JobIdError {
        Empty,
        TooLong,
        ContainsSeparator,
        ParentReference,
        ContainsControl,
    }

    impl JobIdError {
        pub fn message(&self) -> &'static str {
            match self {
                Self::Empty => "job_id must not be empty",
                Self::TooLong => "job_id is too long (max 128 bytes)",
                Self::ContainsSeparator => "job_id must not contain path separators",
                Self::ParentReference => "job_id must not contain '..'",
                Self::ContainsControl => "job_id contains control characters",
            }
        }
    }

    impl std::fmt::Display for JobIdError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.message())
        }
    }

    impl std::error::Error for JobIdError {}

    fn validate_job_id(value: &str) -> Result<(), JobIdError> {
        if value.trim().is_empty() {
            return Err(JobIdError::Empty);
        }
        if value.len() > 128 {
            return Err(JobIdError::TooLong);
        }
        if value.contains('/') || value.contains('\\') {
            return Err(JobIdError::ContainsSeparator);
        }
        if value.contains("..") {
            return Err(JobIdError::ParentReference);
        }
        if value.chars().any(|c| c.is_control()) {
            return Err(JobIdError::ContainsControl);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ids::{JobId, JobIdError};

    #[test]
    fn job_id_accepts_typical_names() {
        for raw in ["demo-001", "run_42", "resnet.v2-2024-01-01", "a"] {
            let id = JobId::try_new(raw).unwrap();
            assert_eq!(id.as_str(), raw);
        }
    }

    #[test]
    fn job_id_rejects_names_that_escape_the_store() {
        assert_eq!(JobId::try_new(""), Err(JobIdError::Empty));
        assert_eq!(JobId::try_new("   "), Err(JobIdError::Empty));
        assert_eq!(
            JobId::try_new("../etc/passwd"),
            Err(JobIdError::ContainsSeparator)
        );
        assert_eq!(JobId::try_new("a\\b"), Err(JobIdError::ContainsSeparator));
        assert_eq!(JobId::try_new(".."), Err(JobIdError::ParentReference));
        assert_eq!(JobId::try_new("a\nb"), Err(JobIdError::ContainsControl));
        assert_eq!(JobId::try_new("x".repeat(129)), Err(JobIdError::TooLong));
    }
}
