use std::{collections::HashSet, env::VarError, fmt::Display, fs, time::Duration};

/// Bots watched when `TARGET_BOTS` isn't set or makes no sense.
pub const DEFAULT_TRACKED_SOURCES: [&str; 2] = ["instagrambot", "SaveMedia_bot"];

/// Texts with more characters than this are "long".
pub const DEFAULT_LENGTH_THRESHOLD: usize = 150;

/// Upper bound on how long a single Telegram API call may take.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not valid unicode")]
    NotUnicode(&'static str),
    #[error("{0} does not contain any usernames")]
    NoHandles(&'static str),
    #[error("{name} is not a valid number: {value:?}")]
    NotANumber { name: &'static str, value: String },
    #[error("{0} can't be zero")]
    Zero(&'static str),
    #[error("no bot token in TELEGRAM_BOT_TOKEN or in the {0:?} file")]
    NoToken(&'static str),
}

/// Usernames of the bots whose spam we delete. Compared exactly, case and all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedSources(HashSet<String>);

impl TrackedSources {
    /// Parse a comma-separated list like `"instagrambot, @SaveMedia_bot"`.
    /// Whitespace around entries and a leading `@` are ignored, empty entries skipped.
    ///
    /// # Errors
    /// Errors if no usernames are left after that.
    pub fn parse(list: &str) -> Result<Self, ConfigError> {
        let set: HashSet<String> = list
            .split(',')
            .map(str::trim)
            .map(|handle| handle.strip_prefix('@').unwrap_or(handle))
            .filter(|handle| !handle.is_empty())
            .map(str::to_owned)
            .collect();

        if set.is_empty() {
            return Err(ConfigError::NoHandles("TARGET_BOTS"));
        }
        Ok(TrackedSources(set))
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.0.contains(handle)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Default for TrackedSources {
    fn default() -> Self {
        TrackedSources(
            DEFAULT_TRACKED_SOURCES
                .iter()
                .map(|&handle| handle.to_owned())
                .collect(),
        )
    }
}

impl Display for TrackedSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut handles: Vec<&str> = self.0.iter().map(String::as_str).collect();
        handles.sort_unstable();
        for (i, handle) in handles.into_iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "@{handle}")?;
        }
        Ok(())
    }
}

/// Everything the handlers need to know that doesn't change while running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tracked_sources: TrackedSources,
    pub length_threshold: usize,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tracked_sources: TrackedSources::default(),
            length_threshold: DEFAULT_LENGTH_THRESHOLD,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name))
    }

    /// Build the config out of whatever `lookup` returns for each variable name.
    /// Bad values are logged and replaced with defaults; this never fails.
    pub fn from_lookup(lookup: impl Fn(&str) -> Result<String, VarError>) -> Self {
        let defaults = Config::default();

        let tracked_sources = match lookup("TARGET_BOTS") {
            Ok(list) => TrackedSources::parse(&list),
            Err(VarError::NotPresent) => {
                log::info!("TARGET_BOTS is not set, using the default list.");
                Ok(defaults.tracked_sources.clone())
            }
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode("TARGET_BOTS")),
        }
        .unwrap_or_else(|e| {
            log::error!("Failed to parse TARGET_BOTS: {e}. Using the default list.");
            defaults.tracked_sources
        });

        let length_threshold = parse_number(&lookup, "LENGTH_THRESHOLD")
            .unwrap_or(defaults.length_threshold);

        // Zero would time out every single request.
        let request_timeout = match parse_number(&lookup, "REQUEST_TIMEOUT_SECS") {
            Some(0) => {
                let e = ConfigError::Zero("REQUEST_TIMEOUT_SECS");
                log::error!("{e}. Using the default.");
                defaults.request_timeout
            }
            Some(secs) => Duration::from_secs(secs),
            None => defaults.request_timeout,
        };

        Config {
            tracked_sources,
            length_threshold,
            request_timeout,
        }
    }
}

/// `None` if the variable is unset or broken. Broken ones get logged.
fn parse_number<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Result<String, VarError>,
    name: &'static str,
) -> Option<T> {
    let result = match lookup(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::NotANumber { name, value }),
        Err(VarError::NotPresent) => return None,
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(name)),
    };

    match result {
        Ok(number) => Some(number),
        Err(e) => {
            log::error!("{e}. Using the default.");
            None
        }
    }
}

/// Get the bot token from `TELEGRAM_BOT_TOKEN`, or from the key file if that's not set.
///
/// # Errors
/// Errors if neither is available.
pub fn load_bot_token() -> Result<String, ConfigError> {
    let key_file = match cfg!(debug_assertions) {
        true => "key_debug",
        false => "key",
    };

    if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
        let token = token.trim();
        if !token.is_empty() {
            return Ok(token.to_owned());
        }
    }

    match fs::read_to_string(key_file) {
        Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_owned()),
        _ => Err(ConfigError::NoToken(key_file)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, VarError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn parses_handle_list() {
        let tracked =
            TrackedSources::parse(" instagrambot ,@SaveMedia_bot,, other_bot ,").unwrap();
        assert_eq!(tracked.len(), 3);
        assert!(tracked.contains("instagrambot"));
        assert!(tracked.contains("SaveMedia_bot"));
        assert!(tracked.contains("other_bot"));
    }

    #[test]
    fn membership_is_exact() {
        let tracked = TrackedSources::parse("SaveMedia_bot").unwrap();
        assert!(!tracked.contains("savemedia_bot"));
        assert!(!tracked.contains("SaveMedia"));
        assert!(!tracked.contains("SaveMedia_bot2"));
        assert!(!tracked.contains(""));
    }

    #[test]
    fn empty_list_is_an_error() {
        assert!(matches!(
            TrackedSources::parse(" , ,"),
            Err(ConfigError::NoHandles(_))
        ));
        assert!(TrackedSources::parse("").is_err());
    }

    #[test]
    fn falls_back_to_default_sources() {
        let expected = TrackedSources::default();
        assert!(expected.contains("instagrambot"));
        assert!(expected.contains("SaveMedia_bot"));
        assert_eq!(expected.len(), 2);

        // Unset.
        assert_eq!(
            Config::from_lookup(lookup_from(&[])).tracked_sources,
            expected
        );
        // Set, but nothing useful in it.
        assert_eq!(
            Config::from_lookup(lookup_from(&[("TARGET_BOTS", "  ,  ")])).tracked_sources,
            expected
        );
        // Not unicode.
        let config = Config::from_lookup(|name| match name {
            "TARGET_BOTS" => Err(VarError::NotUnicode(std::ffi::OsString::from("x"))),
            _ => Err(VarError::NotPresent),
        });
        assert_eq!(config.tracked_sources, expected);
    }

    #[test]
    fn reads_all_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("TARGET_BOTS", "spam_bot"),
            ("LENGTH_THRESHOLD", " 200 "),
            ("REQUEST_TIMEOUT_SECS", "3"),
        ]));
        assert_eq!(config.tracked_sources, TrackedSources::parse("spam_bot").unwrap());
        assert_eq!(config.length_threshold, 200);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn bad_numbers_use_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("LENGTH_THRESHOLD", "a lot"),
            ("REQUEST_TIMEOUT_SECS", "-1"),
        ]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn zero_timeout_uses_default() {
        let config = Config::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_SECS", "0")]));
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);

        let config = Config::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_SECS", " 1 ")]));
        assert_eq!(config.request_timeout, Duration::from_secs(1));
    }

    #[test]
    fn display_is_sorted() {
        let tracked = TrackedSources::parse("b_bot,a_bot").unwrap();
        assert_eq!(tracked.to_string(), "@a_bot, @b_bot");
    }
}
