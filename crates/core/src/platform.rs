#![forbid(unsafe_code)]

/// Source of job status information.
///
/// The declaration order of [`Platform::ALL`] is the aggregation order: when no platform filter is
/// given, remote platforms are consulted first and the local store last, and the first platform to
/// find a specific job wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    SageMaker,
    VertexAi,
    Local,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::SageMaker, Platform::VertexAi, Platform::Local];

    pub fn tag(self) -> &'static str {
        match self {
            Self::SageMaker => "sagemaker",
            Self::VertexAi => "vertex-ai",
            Self::Local => "local",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::SageMaker => "SageMaker",
            Self::VertexAi => "Vertex AI",
            Self::Local => "Local",
        }
    }

    pub fn is_remote(self) -> bool {
        !matches!(self, Self::Local)
    }

    pub fn parse(tag: &str) -> Result<Self, PlatformParseError> {
        match tag.trim() {
            "sagemaker" => Ok(Self::SageMaker),
            "vertex-ai" => Ok(Self::VertexAi),
            "local" => Ok(Self::Local),
            other => Err(PlatformParseError(other.to_string())),
        }
    }

    pub fn tags() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.tag()).collect()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformParseError(pub String);

impl std::fmt::Display for PlatformParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown platform '{}' (expected one of: {})",
            self.0,
            Platform::tags().join(", ")
        )
    }
}

impl std::error::Error for PlatformParseError {}
