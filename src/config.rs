use std::str::FromStr;
use tracing::warn;

/// Fewest boxes a game may have.
pub const MIN_BOXES: usize = 5;
/// Most boxes a game may have.
pub const MAX_BOXES: usize = 10;
/// Largest value `max_number` may take.
pub const MAX_NUMBER_LIMIT: u16 = 999;
pub const DEFAULT_BOXES: usize = 5;
pub const DEFAULT_MAX_NUMBER: u16 = 20;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("not a number: '{0}'")]
    NotANumber(String),
    #[error("box count out of range: expected {min}..={max}, got {got}")]
    BoxCountOutOfRange { min: usize, max: usize, got: usize },
    #[error("max number out of range: expected {min}..={max}, got {got}")]
    MaxNumberOutOfRange { min: u16, max: u16, got: u16 },
}

/// Immutable per-session settings.
///
/// Always satisfies `MIN_BOXES <= box_count <= MAX_BOXES` and
/// `box_count <= max_number <= MAX_NUMBER_LIMIT`.
///
/// ```
/// use roskis::config::GameConfig;
///
/// let cfg = GameConfig::clamped(7, 3);
/// assert_eq!(cfg.box_count(), 7);
/// assert_eq!(cfg.max_number(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameConfig {
    box_count: usize,
    max_number: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { box_count: DEFAULT_BOXES, max_number: DEFAULT_MAX_NUMBER }
    }
}

impl GameConfig {
    /// Strict constructor: rejects anything outside the valid ranges.
    pub fn try_new(box_count: usize, max_number: u16) -> Result<Self, ConfigError> {
        if !(MIN_BOXES..=MAX_BOXES).contains(&box_count) {
            return Err(ConfigError::BoxCountOutOfRange {
                min: MIN_BOXES,
                max: MAX_BOXES,
                got: box_count,
            });
        }
        let min = box_count as u16;
        if !(min..=MAX_NUMBER_LIMIT).contains(&max_number) {
            return Err(ConfigError::MaxNumberOutOfRange {
                min,
                max: MAX_NUMBER_LIMIT,
                got: max_number,
            });
        }
        Ok(Self { box_count, max_number })
    }

    /// Lenient constructor used at session start. Never fails: the box count
    /// is clamped into range, a zero max number falls back to the default,
    /// and the max number is then clamped into `[box_count, MAX_NUMBER_LIMIT]`.
    pub fn clamped(box_count: usize, max_number: u16) -> Self {
        let boxes = box_count.clamp(MIN_BOXES, MAX_BOXES);
        if boxes != box_count {
            warn!(requested = box_count, used = boxes, "box count clamped");
        }
        let requested = if max_number == 0 {
            warn!(used = DEFAULT_MAX_NUMBER, "max number not positive, using default");
            DEFAULT_MAX_NUMBER
        } else {
            max_number
        };
        let max = requested.clamp(boxes as u16, MAX_NUMBER_LIMIT);
        if max != requested {
            warn!(requested, used = max, "max number clamped");
        }
        Self { box_count: boxes, max_number: max }
    }

    /// Build a config from raw text such as a form field or CLI argument.
    /// Non-numeric input falls back to the defaults before clamping.
    ///
    /// ```
    /// use roskis::config::GameConfig;
    ///
    /// let cfg = GameConfig::from_input("abc", "2000");
    /// assert_eq!(cfg.box_count(), 5);
    /// assert_eq!(cfg.max_number(), 999);
    /// ```
    pub fn from_input(box_text: &str, max_text: &str) -> Self {
        let boxes = match parse_number::<usize>(box_text) {
            Ok(v) => v,
            Err(err) => {
                warn!(%err, used = DEFAULT_BOXES, "invalid box count");
                DEFAULT_BOXES
            }
        };
        let max = match parse_number::<u64>(max_text) {
            // Anything past u16 is past the limit anyway.
            Ok(v) => u16::try_from(v).unwrap_or(u16::MAX),
            Err(err) => {
                warn!(%err, used = DEFAULT_MAX_NUMBER, "invalid max number");
                DEFAULT_MAX_NUMBER
            }
        };
        Self::clamped(boxes, max)
    }

    /// Strict parse of both fields; reports the first problem found.
    pub fn parse(box_text: &str, max_text: &str) -> Result<Self, ConfigError> {
        let boxes = parse_number::<usize>(box_text)?;
        let max = parse_number::<u16>(max_text)?;
        Self::try_new(boxes, max)
    }

    pub fn box_count(&self) -> usize {
        self.box_count
    }

    pub fn max_number(&self) -> u16 {
        self.max_number
    }
}

fn parse_number<T: FromStr>(s: &str) -> Result<T, ConfigError> {
    let t = s.trim();
    t.parse::<T>().map_err(|_| ConfigError::NotANumber(t.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_five_boxes_up_to_twenty() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.box_count(), 5);
        assert_eq!(cfg.max_number(), 20);
    }

    #[test]
    fn clamped_raises_max_to_box_count() {
        let cfg = GameConfig::clamped(8, 6);
        assert_eq!(cfg.max_number(), 8);
    }

    #[test]
    fn clamped_limits_box_count_and_max() {
        assert_eq!(GameConfig::clamped(2, 50).box_count(), 5);
        assert_eq!(GameConfig::clamped(42, 50).box_count(), 10);
        assert_eq!(GameConfig::clamped(5, 5000).max_number(), 999);
    }

    #[test]
    fn zero_max_uses_default() {
        assert_eq!(GameConfig::clamped(5, 0).max_number(), 20);
        // Default is still raised to the box count when needed.
        assert_eq!(GameConfig::clamped(10, 0).max_number(), 20);
    }

    #[test]
    fn from_input_handles_garbage_and_whitespace() {
        let cfg = GameConfig::from_input(" 7 ", "x");
        assert_eq!(cfg.box_count(), 7);
        assert_eq!(cfg.max_number(), 20);

        let cfg = GameConfig::from_input("6", "-3");
        assert_eq!(cfg.max_number(), 20);

        let cfg = GameConfig::from_input("9", "100000");
        assert_eq!(cfg.max_number(), 999);
    }

    #[test]
    fn try_new_rejects_out_of_range() {
        assert!(matches!(
            GameConfig::try_new(4, 10),
            Err(ConfigError::BoxCountOutOfRange { got: 4, .. })
        ));
        assert!(matches!(
            GameConfig::try_new(6, 5),
            Err(ConfigError::MaxNumberOutOfRange { min: 6, got: 5, .. })
        ));
        assert!(GameConfig::try_new(10, 999).is_ok());
    }

    #[test]
    fn parse_reports_non_numeric() {
        assert_eq!(GameConfig::parse("five", "20"), Err(ConfigError::NotANumber("five".into())));
        assert_eq!(GameConfig::parse("5", "20"), GameConfig::try_new(5, 20));
    }
}
