use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_INTERPRETER: &str = "python";
const DEFAULT_COMPILER_SCRIPT: &str = "/root/compiler/cllcompiler.py";
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Everything tunable about the relay, resolved once in `main` and handed to
/// the server constructor. No process-wide mutable state anywhere.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub compiler: CompilerCommand,
    pub scratch_dir: PathBuf,
    pub public_dir: PathBuf,
    pub compile_timeout: Duration,
}

/// The fixed two-part command prefix the compiler is invoked with. The
/// per-request scratch path is the only argument ever appended to it.
#[derive(Debug, Clone)]
pub struct CompilerCommand {
    pub interpreter: String,
    pub script: PathBuf,
}

impl Config {
    /// Resolve the configuration from the environment, falling back to a
    /// default for anything unset or unparseable.
    pub fn from_env() -> Self {
        Config {
            port: parse_port(env::var("APP_PORT").ok()),
            compiler: CompilerCommand {
                interpreter: env::var("COMPILER_INTERPRETER")
                    .unwrap_or_else(|_| DEFAULT_INTERPRETER.to_string()),
                script: env::var("COMPILER_SCRIPT")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_COMPILER_SCRIPT)),
            },
            scratch_dir: env::var("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
            public_dir: env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_PUBLIC_DIR)),
            compile_timeout: parse_timeout(env::var("COMPILE_TIMEOUT_SECS").ok()),
        }
    }
}

fn parse_port(value: Option<String>) -> u16 {
    value.and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_PORT)
}

fn parse_timeout(value: Option<String>) -> Duration {
    let secs = value
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_when_unset_or_invalid() {
        assert_eq!(parse_port(None), DEFAULT_PORT);
        assert_eq!(parse_port(Some("not a port".into())), DEFAULT_PORT);
        assert_eq!(parse_port(Some("8080".into())), 8080);
    }

    #[test]
    fn timeout_defaults_when_unset_or_invalid() {
        assert_eq!(
            parse_timeout(None),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert_eq!(
            parse_timeout(Some("soon".into())),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert_eq!(parse_timeout(Some("2".into())), Duration::from_secs(2));
    }
}
