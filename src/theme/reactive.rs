//! Reactive theme mode.
//!
//! Process-wide dark/light flag: always exactly one of the two values,
//! mutated only through [`set_mode`]/[`toggle_mode`], read reactively by
//! the render effect via [`active_theme`].

use std::str::FromStr;

use spark_signals::{Signal, signal};

use super::{Theme, presets};

// =============================================================================
// Mode
// =============================================================================

/// The two-value theme setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Dark,
    Light,
}

impl Mode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(format!("unknown theme mode '{other}' (dark|light)")),
        }
    }
}

// =============================================================================
// Reactive state
// =============================================================================

thread_local! {
    static MODE: Signal<Mode> = signal(Mode::Dark);
}

/// Current mode.
pub fn mode() -> Mode {
    MODE.with(|m| m.get())
}

/// The mode signal, for reactive tracking.
pub fn mode_signal() -> Signal<Mode> {
    MODE.with(|m| m.clone())
}

/// Set the mode. The single writer for theme state.
pub fn set_mode(new_mode: Mode) {
    MODE.with(|m| {
        if m.get() != new_mode {
            m.set(new_mode);
        }
    });
}

/// Flip dark <-> light. Returns the new mode.
pub fn toggle_mode() -> Mode {
    let next = mode().toggled();
    set_mode(next);
    next
}

/// Resolve the preset for the current mode. Reading this inside an effect
/// tracks the mode signal.
pub fn active_theme() -> Theme {
    match mode() {
        Mode::Dark => presets::dark(),
        Mode::Light => presets::light(),
    }
}

/// Reset to the default mode (for testing).
pub fn reset_theme_state() {
    set_mode(Mode::Dark);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset_theme_state();
    }

    #[test]
    fn test_default_mode_is_dark() {
        setup();
        assert_eq!(mode(), Mode::Dark);
        assert_eq!(active_theme().name, "dark");
    }

    #[test]
    fn test_toggle_flips_between_two_values() {
        setup();

        assert_eq!(toggle_mode(), Mode::Light);
        assert_eq!(mode(), Mode::Light);

        assert_eq!(toggle_mode(), Mode::Dark);
        assert_eq!(mode(), Mode::Dark);
    }

    #[test]
    fn test_set_mode() {
        setup();

        set_mode(Mode::Light);
        assert_eq!(mode(), Mode::Light);
        assert_eq!(active_theme().name, "light");

        set_mode(Mode::Light); // idempotent
        assert_eq!(mode(), Mode::Light);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("dark".parse::<Mode>(), Ok(Mode::Dark));
        assert_eq!("LIGHT".parse::<Mode>(), Ok(Mode::Light));
        assert!("solarized".parse::<Mode>().is_err());
    }

    #[test]
    fn test_toggled_is_involutive() {
        assert_eq!(Mode::Dark.toggled().toggled(), Mode::Dark);
        assert_eq!(Mode::Light.toggled(), Mode::Dark);
    }
}
