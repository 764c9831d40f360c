#![forbid(unsafe_code)]

use std::path::PathBuf;

pub(crate) const LOG_DIR_ENV: &str = "TRAINING_LOG_DIR";
pub(crate) const DEMO_JOB_ENV: &str = "TRAINING_MONITOR_DEMO_JOB";
const DEFAULT_LOG_DIR: &str = "./training_logs";
const DEFAULT_AWS_REGION: &str = "us-east-1";
const DEFAULT_VERTEX_LOCATION: &str = "us-central1";

/// Process configuration, resolved once at startup from CLI args and the environment.
#[derive(Clone, Debug)]
pub(crate) struct MonitorConfig {
    pub(crate) log_dir: PathBuf,
    pub(crate) seed_demo_job: bool,
    pub(crate) sagemaker: SageMakerSettings,
    pub(crate) vertex: VertexSettings,
}

impl MonitorConfig {
    pub(crate) fn from_env(args: &[String]) -> Self {
        Self::from_lookup(args, |key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(args: &[String], lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut cli_log_dir: Option<PathBuf> = None;
        let mut no_demo_job = false;
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--log-dir" => {
                    if let Some(value) = iter.next() {
                        cli_log_dir = Some(PathBuf::from(value));
                    }
                }
                "--no-demo-job" => no_demo_job = true,
                _ => {}
            }
        }

        let log_dir = cli_log_dir
            .or_else(|| env(LOG_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
        let seed_demo_job = !no_demo_job && parse_bool(env(DEMO_JOB_ENV).as_deref(), true);

        Self {
            log_dir,
            seed_demo_job,
            sagemaker: SageMakerSettings {
                access_key_id: env("AWS_ACCESS_KEY_ID"),
                secret_access_key: env("AWS_SECRET_ACCESS_KEY"),
                region: env("AWS_REGION"),
            },
            vertex: VertexSettings {
                credentials_path: env("GOOGLE_APPLICATION_CREDENTIALS"),
                project: env("GOOGLE_CLOUD_PROJECT"),
                location: env("GOOGLE_CLOUD_LOCATION"),
            },
        }
    }
}

fn parse_bool(value: Option<&str>, default: bool) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "0" | "false" | "off" | "no") => false,
        Some(v) if matches!(v.as_str(), "1" | "true" | "on" | "yes") => true,
        _ => default,
    }
}

#[derive(Clone, Default)]
pub(crate) struct SageMakerSettings {
    pub(crate) access_key_id: Option<String>,
    pub(crate) secret_access_key: Option<String>,
    pub(crate) region: Option<String>,
}

impl SageMakerSettings {
    pub(crate) fn missing(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.access_key_id.is_none() {
            out.push("AWS_ACCESS_KEY_ID");
        }
        if self.secret_access_key.is_none() {
            out.push("AWS_SECRET_ACCESS_KEY");
        }
        if self.region.is_none() {
            out.push("AWS_REGION");
        }
        out
    }

    pub(crate) fn is_configured(&self) -> bool {
        self.missing().is_empty()
    }

    pub(crate) fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_AWS_REGION)
    }
}

impl std::fmt::Debug for SageMakerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SageMakerSettings")
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| "<set>"))
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("region", &self.region)
            .finish()
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct VertexSettings {
    pub(crate) credentials_path: Option<String>,
    pub(crate) project: Option<String>,
    pub(crate) location: Option<String>,
}

impl VertexSettings {
    pub(crate) fn is_configured(&self) -> bool {
        self.credentials_path.is_some() || self.project.is_some()
    }

    pub(crate) fn location(&self) -> &str {
        self.location.as_deref().unwrap_or(DEFAULT_VERTEX_LOCATION)
    }
}

pub(crate) fn usage() -> &'static str {
    "tm_mcp - pico training monitor (MCP server over newline-delimited JSON-RPC on stdio)\n\n\
USAGE:\n\
  tm_mcp [--log-dir DIR] [--no-demo-job]\n\
\n\
FLAGS:\n\
  -h, --help       Print this help and exit\n\
  -V, --version    Print version and exit\n\
\n\
ENVIRONMENT:\n\
  TRAINING_LOG_DIR            Local job store directory (default ./training_logs)\n\
  TRAINING_MONITOR_DEMO_JOB   Set to 0 to skip seeding the demo-001 job\n\
  AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, AWS_REGION   Enable SageMaker\n\
  GOOGLE_APPLICATION_CREDENTIALS or GOOGLE_CLOUD_PROJECT Enable Vertex AI\n\
  RUST_LOG                    Log filter for stderr diagnostics (default tm_mcp=info)\n"
}

pub(crate) fn version_line() -> String {
    format!("tm_mcp {}", crate::SERVER_VERSION)
}
