use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use log::warn;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8787;
const DEFAULT_BINARY: &str = "codex";
const DEFAULT_TIMEOUT_SECS: u64 = 180;
const DEFAULT_REASONING_EFFORT: &str = "high";
const DEFAULT_MODEL: &str = "gpt-5-codex";

/// Settings that shape every agent invocation.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub binary: String,
    pub timeout: Duration,
    pub reasoning_effort: String,
    /// `None` means no `--model` flag unless the request names one.
    pub default_model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Shared bearer secret. `None` runs the router in open mode.
    pub token: Option<String>,
    pub agent: AgentSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("MINI_ROUTER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("MINI_ROUTER_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("MINI_ROUTER_PORT must be a port number, got '{}'", raw))?,
            None => DEFAULT_PORT,
        };

        let token = lookup("MINI_ROUTER_TOKEN").filter(|t| !t.is_empty());

        let agent = AgentSettings {
            binary: lookup("CODEX_BIN").unwrap_or_else(|| DEFAULT_BINARY.to_string()),
            timeout: resolve_timeout(&lookup),
            reasoning_effort: lookup("CODEX_REASONING_EFFORT")
                .unwrap_or_else(|| DEFAULT_REASONING_EFFORT.to_string()),
            default_model: match lookup("CODEX_DEFAULT_MODEL") {
                Some(model) if model.is_empty() => None,
                Some(model) => Some(model),
                None => Some(DEFAULT_MODEL.to_string()),
            },
        };

        Ok(Self {
            host,
            port,
            token,
            agent,
        })
    }
}

fn resolve_timeout<F>(lookup: &F) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    let fallback = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

    if let Some(raw) = lookup("CODEX_EXEC_TIMEOUT_SECONDS") {
        return match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!("Ignoring invalid CODEX_EXEC_TIMEOUT_SECONDS '{}', using {}s", raw, DEFAULT_TIMEOUT_SECS);
                fallback
            }
        };
    }

    if let Some(raw) = lookup("CODEX_EXEC_TIMEOUT_MS") {
        return match raw.trim().parse::<u64>() {
            Ok(ms) if ms > 0 => Duration::from_millis(ms),
            _ => {
                warn!("Ignoring invalid CODEX_EXEC_TIMEOUT_MS '{}', using {}s", raw, DEFAULT_TIMEOUT_SECS);
                fallback
            }
        };
    }

    fallback
}
