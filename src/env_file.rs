// `.env` loading that tolerates the hyphenated API key name.
//
// dotenvy rejects `-` in keys, and its bulk loaders stop at the first bad
// line. Lines are read one at a time here so a single bad line only loses
// itself.

use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::constants::API_KEY_ENV_VARS;

/// Variables parsed from one `.env` file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EnvFile {
    pub vars: Vec<(String, String)>,
    /// Lines that could not be parsed, verbatim.
    pub skipped: Vec<String>,
}

/// Result of looking for and applying a `.env` file at startup. Logged
/// once tracing is up, since `RUST_LOG` itself may come from the file.
#[derive(Debug)]
pub enum DotenvOutcome {
    NotFound,
    Loaded {
        path: PathBuf,
        applied: usize,
        skipped: Vec<String>,
    },
    Failed {
        path: PathBuf,
        error: dotenvy::Error,
    },
}

impl DotenvOutcome {
    pub fn log(&self) {
        match self {
            DotenvOutcome::NotFound => debug!("No .env file found"),
            DotenvOutcome::Loaded {
                path,
                applied,
                skipped,
            } => {
                debug!(path = %path.display(), applied, "Loaded .env file");
                for line in skipped {
                    // Only the key is logged; the value may be a secret.
                    let key = line.split('=').next().unwrap_or_default().trim();
                    warn!(path = %path.display(), key, "Skipped unparseable .env line");
                }
            }
            DotenvOutcome::Failed { path, error } => {
                warn!(path = %path.display(), %error, "Failed to read .env file");
            }
        }
    }
}

/// Parses `path` line by line. Hyphenated API key lines, which dotenvy
/// refuses, are split by hand; other bad lines land in `skipped`.
pub fn parse_env_file(path: &Path) -> Result<EnvFile, dotenvy::Error> {
    let mut parsed = EnvFile::default();
    for item in dotenvy::from_path_iter(path)? {
        match item {
            Ok(pair) => parsed.vars.push(pair),
            Err(dotenvy::Error::LineParse(line, _)) => match parse_api_key_line(&line) {
                Some(pair) => parsed.vars.push(pair),
                None => parsed.skipped.push(line),
            },
            Err(e) => return Err(e),
        }
    }
    Ok(parsed)
}

fn parse_api_key_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if !API_KEY_ENV_VARS.contains(&key) {
        return None;
    }

    let value = value.trim();
    let value = ['"', '\'']
        .iter()
        .find_map(|quote| value.strip_prefix(*quote)?.strip_suffix(*quote))
        .unwrap_or(value);
    Some((key.to_string(), value.to_string()))
}

/// Sets every parsed variable the process environment doesn't already
/// have. Returns how many were set.
pub fn apply(env_file: &EnvFile) -> usize {
    let mut applied = 0;
    for (key, value) in &env_file.vars {
        if env::var_os(key).is_none() {
            env::set_var(key, value);
            applied += 1;
        }
    }
    applied
}

fn find_env_file() -> Option<PathBuf> {
    let cwd = env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(".env"))
        .find(|candidate| candidate.is_file())
}

/// Finds `.env` in the working directory or its parents and applies it.
pub fn load_dotenv() -> DotenvOutcome {
    let Some(path) = find_env_file() else {
        return DotenvOutcome::NotFound;
    };
    match parse_env_file(&path) {
        Ok(env_file) => DotenvOutcome::Loaded {
            applied: apply(&env_file),
            skipped: env_file.skipped,
            path,
        },
        Err(error) => DotenvOutcome::Failed { path, error },
    }
}
