use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;
use crate::realtime::broker::OverflowPolicy;
use crate::services::game_flow::FlowSettings;

/// How the process presents phase cues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Serve the API and narrate cues in-process.
    Local,
    /// Serve the API and expose cues on `/client`.
    Server,
    /// Long-poll a remote server's `/client` endpoint and narrate.
    Client { server: String },
}

impl RunMode {
    /// Parses the process arguments (without the program name).
    pub fn from_args<I>(mut args: I) -> Result<Self, AppError>
    where
        I: Iterator<Item = String>,
    {
        match args.next().as_deref() {
            None | Some("local") => Ok(RunMode::Local),
            Some("server") => Ok(RunMode::Server),
            Some("client") => {
                let server = args.next().ok_or_else(|| {
                    AppError::config("client mode requires a server address, e.g. `client 127.0.0.1:80`")
                })?;
                Ok(RunMode::Client { server })
            }
            Some(other) => Err(AppError::config(format!(
                "unknown mode '{other}', expected local | server | client <addr>"
            ))),
        }
    }
}

/// Process settings read from `WEREWOLF_*` environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub pacing: Duration,
    pub decision_timeout: Option<Duration>,
    pub cue_capacity: usize,
    pub cue_overflow: OverflowPolicy,
    pub long_poll: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 80,
            pacing: Duration::from_millis(2000),
            decision_timeout: None,
            cue_capacity: 16,
            cue_overflow: OverflowPolicy::Block,
            long_poll: Duration::from_secs(60),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; unset keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("WEREWOLF_HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "WEREWOLF_PORT")?.unwrap_or(defaults.port),
            pacing: parsed(&lookup, "WEREWOLF_PACING_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.pacing),
            decision_timeout: parsed(&lookup, "WEREWOLF_DECISION_TIMEOUT_SECS")?
                .map(Duration::from_secs),
            cue_capacity: parsed(&lookup, "WEREWOLF_CUE_CAPACITY")?
                .unwrap_or(defaults.cue_capacity),
            cue_overflow: match lookup("WEREWOLF_CUE_OVERFLOW") {
                Some(raw) => raw.parse().map_err(AppError::config)?,
                None => defaults.cue_overflow,
            },
            long_poll: parsed(&lookup, "WEREWOLF_LONG_POLL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.long_poll),
        })
    }

    pub fn flow_settings(&self) -> FlowSettings {
        FlowSettings {
            pacing: self.pacing,
            decision_timeout: self.decision_timeout,
        }
    }
}

fn parsed<F, T>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| AppError::config(format!("{key} is invalid ('{raw}'): {e}")))
        })
        .transpose()
}
