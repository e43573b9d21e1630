//! Constants, host signatures, and runtime configuration.
//!
//! Host class names and JNI type signatures are assembled at compile time
//! so that every lookup in [`crate::bridge`] shares one spelling.
use const_format::concatcp;
use log::LevelFilter;

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Number of seats the adapter assumes at the table.
pub const PLAYERS: Seat = 2;
/// Exact referee message for a rejected try.
pub const ILLEGAL_MOVE: &str = "Illegal move";
/// Short action description carried by pending promotion moves.
pub const PROMOTE: &str = "Promote";
/// Separator between notes in a feedback message.
pub const DELIMITER: char = ';';

/// 1-based seat index in the host's numbering.
pub type Seat = i32;

// ============================================================================
// HOST CLASSES
// ============================================================================
pub const GAME_WRAPPER: &str = "utils/LudiiGameWrapper";
pub const STATE_WRAPPER: &str = "utils/LudiiStateWrapper";
pub const GAME: &str = "game/Game";
pub const CONTEXT: &str = "other/context/Context";
pub const MOVE: &str = "other/move/Move";
pub const RUNTIME_EXCEPTION: &str = "java/lang/RuntimeException";
/// `long` field on the host-side adapter object holding its registry handle.
pub const HANDLE_FIELD: &str = "nativeHandle";

// ============================================================================
// HOST SIGNATURES
// ============================================================================
pub const SIG_GAME_WRAPPER_CTOR: &str = concatcp!("(L", GAME, ";)V");
pub const SIG_STATE_WRAPPER_CTOR: &str = concatcp!("(L", GAME_WRAPPER, ";L", CONTEXT, ";)V");
pub const SIG_LEGAL_MOVES: &str = concatcp!("()[L", MOVE, ";");
pub const SIG_APPLY_MOVE: &str = concatcp!("(L", MOVE, ";)V");
pub const SIG_BOOLEAN: &str = "()Z";
pub const SIG_INT: &str = "()I";
pub const SIG_VOID: &str = "()V";
pub const SIG_DOUBLES: &str = "()[D";
pub const SIG_SCORE: &str = "(I)I";
pub const SIG_STRING: &str = "()Ljava/lang/String;";
pub const SIG_INT_FIELD: &str = "I";
pub const SIG_LONG_FIELD: &str = "J";

// ============================================================================
// ENVIRONMENT
// ============================================================================
/// Log level filter, e.g. `debug` or `warn`.
pub const ENV_LOG: &str = "KRIEGSPIEL_LOG";
/// Fixed seed for reproducible move selection.
pub const ENV_SEED: &str = "KRIEGSPIEL_SEED";

/// Runtime settings read from the environment when the host loads the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub level: LevelFilter,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            seed: None,
        }
    }
}

/// An environment variable whose value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub var: &'static str,
    pub value: String,
}

impl std::fmt::Display for Rejected {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "ignoring {}={:?}", self.var, self.value)
    }
}

impl Config {
    pub fn from_env() -> (Self, Vec<Rejected>) {
        Self::from_vars(
            std::env::var(ENV_LOG).ok().as_deref(),
            std::env::var(ENV_SEED).ok().as_deref(),
        )
    }

    /// Malformed values fall back to defaults and are handed back so they
    /// can be reported once a logger is installed.
    pub fn from_vars(level: Option<&str>, seed: Option<&str>) -> (Self, Vec<Rejected>) {
        let ref mut rejected = Vec::new();
        let config = Self {
            level: parsed(ENV_LOG, level, rejected).unwrap_or(Self::default().level),
            seed: parsed(ENV_SEED, seed, rejected),
        };
        (config, std::mem::take(rejected))
    }
}

fn parsed<T: std::str::FromStr>(
    var: &'static str,
    value: Option<&str>,
    rejected: &mut Vec<Rejected>,
) -> Option<T> {
    let value = value?.trim();
    let parsed = value.parse().ok();
    if parsed.is_none() {
        rejected.push(Rejected {
            var,
            value: value.to_string(),
        });
    }
    parsed
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Install a stderr logger. The host may load several adapters into one
/// process, so only the first call takes effect.
pub fn log(level: LevelFilter) {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let _ = simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signatures_compose() {
        assert!(SIG_GAME_WRAPPER_CTOR == "(Lgame/Game;)V");
        assert!(SIG_STATE_WRAPPER_CTOR == "(Lutils/LudiiGameWrapper;Lother/context/Context;)V");
        assert!(SIG_LEGAL_MOVES == "()[Lother/move/Move;");
        assert!(SIG_APPLY_MOVE == "(Lother/move/Move;)V");
    }

    #[test]
    fn empty_environment_is_default() {
        assert!(Config::from_vars(None, None) == (Config::default(), vec![]));
    }

    #[test]
    fn parses_level_and_seed() {
        let (config, rejected) = Config::from_vars(Some("debug"), Some(" 42 "));
        assert!(config.level == LevelFilter::Debug);
        assert!(config.seed == Some(42));
        assert!(rejected.is_empty());
    }

    #[test]
    fn malformed_values_fall_back() {
        let (config, _) = Config::from_vars(Some("loud"), Some("-1"));
        assert!(config == Config::default());
    }

    #[test]
    fn malformed_values_are_reported() {
        let (_, rejected) = Config::from_vars(Some("loud"), Some("-1"));
        assert!(rejected.len() == 2);
        assert!(rejected[0].var == ENV_LOG && rejected[0].value == "loud");
        assert!(rejected[1].var == ENV_SEED && rejected[1].value == "-1");
        assert!(rejected[1].to_string() == "ignoring KRIEGSPIEL_SEED=\"-1\"");
    }
}
