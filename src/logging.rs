use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

const DEFAULT_LOG_FILTER: &str = "warn,routerchat=info";
const DEFAULT_LOG_FILE_PATH: &str = "logs/routerchat.log";
const DEFAULT_LOG_FILE_NAME: &str = "routerchat.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

type InitResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum LogOutput {
    #[default]
    Stderr,
    File,
    Both,
}

impl LogOutput {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Stderr => "stderr",
            Self::File => "file",
            Self::Both => "both",
        }
    }
}

/// Logging destination settings, read from `LOG_FORMAT`, `LOG_OUTPUT` and
/// `LOG_FILE_PATH`. The filter itself comes from `RUST_LOG`.
#[derive(Clone, Debug, PartialEq, Eq)]
struct LogSettings {
    format: LogFormat,
    output: LogOutput,
    file_path: PathBuf,
}

impl LogSettings {
    fn from_env() -> Self {
        Self::from_env_with(|key| env::var(key).ok())
    }

    fn from_env_with(mut get_var: impl FnMut(&str) -> Option<String>) -> Self {
        let format = match normalized(get_var("LOG_FORMAT")).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        let output = match normalized(get_var("LOG_OUTPUT")).as_deref() {
            Some("file") => LogOutput::File,
            Some("both") => LogOutput::Both,
            _ => LogOutput::Stderr,
        };
        let file_path = get_var("LOG_FILE_PATH")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE_PATH));

        Self {
            format,
            output,
            file_path,
        }
    }
}

fn normalized(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_ascii_lowercase())
}

fn build_file_writer(path: &Path) -> std::io::Result<(non_blocking::NonBlocking, WorkerGuard)> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE_NAME));

    fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::daily(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

fn fallback_notice(output: LogOutput, path: &Path, err: &std::io::Error) -> String {
    let fallback = if output == LogOutput::Both {
        "using stderr only"
    } else {
        "using stderr instead"
    };
    format!(
        "routerchat: failed to initialize LOG_OUTPUT={} at '{}': {}; {}",
        output.as_str(),
        path.display(),
        err,
        fallback
    )
}

fn env_filter_from_env() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn install(format: LogFormat, writer: BoxMakeWriter) -> InitResult {
    let env_filter = env_filter_from_env();
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .try_init(),
    }
}

fn init_with(settings: &LogSettings) -> InitResult {
    if settings.output == LogOutput::Stderr {
        return install(settings.format, BoxMakeWriter::new(std::io::stderr));
    }

    match build_file_writer(&settings.file_path) {
        Ok((file_writer, guard)) => {
            let writer = if settings.output == LogOutput::Both {
                BoxMakeWriter::new(std::io::stderr.and(file_writer))
            } else {
                BoxMakeWriter::new(file_writer)
            };
            install(settings.format, writer)?;
            let _ = LOG_GUARD.set(guard);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", fallback_notice(settings.output, &settings.file_path, &err));
            install(settings.format, BoxMakeWriter::new(std::io::stderr))
        }
    }
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init() {
    let settings = LogSettings::from_env();
    if init_with(&settings).is_ok() {
        debug!(
            format = ?settings.format,
            output = settings.output.as_str(),
            file_path = %settings.file_path.display(),
            "logging initialized"
        );
    }
}
