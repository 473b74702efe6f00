//! TUI constants: colors, timing, and layout sizes.

use std::time::Duration;

use ratatui::style::Color;

/// Accent green color (#98FB98).
pub(super) const ACCENT: Color = Color::Rgb(152, 251, 152);

/// Secondary accent, soft cyan (#7EC8E3). Used for buttons.
pub(super) const ACCENT_SECONDARY: Color = Color::Rgb(126, 200, 227);

/// Event poll timeout in milliseconds (main loop).
pub(crate) const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// How long a banner stays up unless dismissed.
pub(crate) const BANNER_TTL: Duration = Duration::from_secs(5);

/// Most banners drawn at once; older ones are still tracked until they expire.
pub(crate) const MAX_VISIBLE_BANNERS: usize = 4;

/// Label of the "unspecified" context size choice.
pub(super) const CONTEXT_UNSPECIFIED: &str = "default";

/// Minimalist logo when idle (single character).
pub(super) const LOGO_IDLE: &str = "◆";

/// Spinner frames while a request is in flight (braille pattern, 4 frames).
pub(super) const LOGO_BUSY: &[&str] = &["⠋", "⠙", "⠹", "⠸"];
