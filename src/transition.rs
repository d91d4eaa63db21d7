//! CSS transition shorthand parsing and sampling.
//!
//! Only what the card reveal needs: a comma-separated `transition` list with
//! keyword timing functions, and numeric interpolation of `opacity` and a
//! `translateY(..)` offset.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimingFunction {
    Linear,
    #[default]
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl TimingFunction {
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "linear" => Some(Self::Linear),
            "ease" => Some(Self::Ease),
            "ease-in" => Some(Self::EaseIn),
            "ease-out" => Some(Self::EaseOut),
            "ease-in-out" => Some(Self::EaseInOut),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }

    /// Maps linear progress in `[0, 1]` onto the eased curve. `ease` follows
    /// `cubic-bezier(0.25, 0.1, 0.25, 1)`; the `ease-in`/`ease-out`/
    /// `ease-in-out` keywords use cubic polynomial curves with the same
    /// end points and symmetry, so their intermediate samples are approximate.
    pub fn apply(self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => simple_easing::cubic_in(t),
            Self::EaseOut => simple_easing::cubic_out(t),
            Self::EaseInOut => simple_easing::cubic_in_out(t),
        }
    }
}

/// Samples a CSS `cubic-bezier(x1, y1, x2, y2)` curve at horizontal position
/// `x`: solves the x polynomial for the curve parameter, then returns its y.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    let at = |p1: f64, p2: f64, t: f64| {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    };
    let slope = |p1: f64, p2: f64, t: f64| {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    };
    let (x1, y1, x2, y2, x) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64, x as f64);
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let mut t = x;
    for _ in 0..8 {
        let err = at(x1, x2, t) - x;
        if err.abs() < 1e-7 {
            return at(y1, y2, t) as f32;
        }
        let d = slope(x1, x2, t);
        if d.abs() < 1e-6 {
            break;
        }
        t -= err / d;
    }

    // Newton stalled on a flat stretch; bisect instead.
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    t = x;
    for _ in 0..64 {
        let value = at(x1, x2, t);
        if (value - x).abs() < 1e-7 {
            break;
        }
        if value < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    at(y1, y2, t) as f32
}

impl fmt::Display for TimingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionSpec {
    pub property: String,
    pub duration_ms: i64,
    pub timing: TimingFunction,
    pub delay_ms: i64,
}

impl TransitionSpec {
    pub fn new(property: &str, duration_ms: i64, timing: TimingFunction) -> Self {
        Self {
            property: property.to_ascii_lowercase(),
            duration_ms,
            timing,
            delay_ms: 0,
        }
    }

    /// Eased progress `elapsed_ms` after the value changed.
    pub fn progress_at(&self, elapsed_ms: i64) -> f32 {
        let active = elapsed_ms.saturating_sub(self.delay_ms);
        if active <= 0 {
            return 0.0;
        }
        if self.duration_ms <= 0 || active >= self.duration_ms {
            return 1.0;
        }
        self.timing
            .apply(active as f32 / self.duration_ms as f32)
    }
}

impl fmt::Display for TransitionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.property,
            format_time(self.duration_ms),
            self.timing
        )?;
        if self.delay_ms != 0 {
            write!(f, " {}", format_time(self.delay_ms))?;
        }
        Ok(())
    }
}

/// Formats a transition list the way it appears in an inline style.
pub(crate) fn format_transition_list(specs: &[TransitionSpec]) -> String {
    specs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses a `transition` shorthand list. Entries that do not name a
/// property are skipped; the first time value is the duration, the second
/// the delay.
pub fn parse_transition_list(value: &str) -> Vec<TransitionSpec> {
    value
        .split(',')
        .filter_map(|entry| {
            let mut property = None;
            let mut times = Vec::new();
            let mut timing = TimingFunction::Ease;
            for token in entry.split_whitespace() {
                if let Some(ms) = parse_time_ms(token) {
                    times.push(ms);
                } else if let Some(parsed) = TimingFunction::parse(token) {
                    timing = parsed;
                } else if property.is_none() {
                    property = Some(token.to_ascii_lowercase());
                }
            }
            let property = property?;
            Some(TransitionSpec {
                property,
                duration_ms: times.first().copied().unwrap_or(0),
                timing,
                delay_ms: times.get(1).copied().unwrap_or(0),
            })
        })
        .collect()
}

pub(crate) fn parse_time_ms(token: &str) -> Option<i64> {
    let token = token.trim().to_ascii_lowercase();
    let (number, scale) = if let Some(ms) = token.strip_suffix("ms") {
        (ms, 1.0)
    } else if let Some(s) = token.strip_suffix('s') {
        (s, 1000.0)
    } else {
        return None;
    };
    let value = number.parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some((value * scale).round() as i64)
}

pub(crate) fn format_time(ms: i64) -> String {
    if ms % 1000 == 0 {
        format!("{}s", ms / 1000)
    } else if ms % 10 == 0 {
        format!("{}s", ms as f64 / 1000.0)
    } else {
        format!("{ms}ms")
    }
}

/// Parses the offset out of `translateY(<n>px)` or `translateY(0)`.
pub(crate) fn parse_translate_y(transform: &str) -> Option<f32> {
    let inner = transform
        .trim()
        .strip_prefix("translateY(")?
        .strip_suffix(')')?
        .trim();
    let number = inner.strip_suffix("px").unwrap_or(inner).trim();
    number.parse::<f32>().ok()
}

pub(crate) fn format_translate_y(offset_px: i64) -> String {
    if offset_px == 0 {
        "translateY(0)".to_string()
    } else {
        format!("translateY({offset_px}px)")
    }
}

/// Sampled appearance of a card: how opaque it is and how far below its
/// resting position it sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub opacity: f32,
    pub offset_px: f32,
}

impl VisualState {
    pub const RESTING: Self = Self {
        opacity: 1.0,
        offset_px: 0.0,
    };

    pub fn is_resting(&self) -> bool {
        (self.opacity - 1.0).abs() < f32::EPSILON && self.offset_px.abs() < f32::EPSILON
    }
}

pub(crate) fn interpolate(from: f32, to: f32, progress: f32) -> f32 {
    from + (to - from) * progress
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_follows_the_css_bezier_curve() {
        let ease = TimingFunction::Ease;
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        assert!((ease.apply(0.5) - 0.8024).abs() < 1e-3);
        assert!((ease.apply(0.25) - 0.4085).abs() < 1e-3);
        let samples = (0..=20)
            .map(|step| ease.apply(step as f32 / 20.0))
            .collect::<Vec<_>>();
        assert!(samples.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn keyword_curves_keep_their_end_points() {
        for timing in [
            TimingFunction::Linear,
            TimingFunction::EaseIn,
            TimingFunction::EaseOut,
            TimingFunction::EaseInOut,
        ] {
            assert_eq!(timing.apply(-1.0), 0.0, "{timing}");
            assert!((timing.apply(2.0) - 1.0).abs() < 1e-6, "{timing}");
        }
        assert!((TimingFunction::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(TimingFunction::Linear.apply(0.3), 0.3);
    }

    #[test]
    fn parses_reveal_transition_list() {
        let specs = parse_transition_list("opacity 0.5s ease, transform 0.5s ease");
        assert_eq!(
            specs,
            vec![
                TransitionSpec::new("opacity", 500, TimingFunction::Ease),
                TransitionSpec::new("transform", 500, TimingFunction::Ease),
            ]
        );
    }

    #[test]
    fn parses_delay_and_skips_entries_without_property() {
        let specs = parse_transition_list("color 250ms linear 1s, 0.3s");
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].duration_ms, 250);
        assert_eq!(specs[0].delay_ms, 1000);
        assert_eq!(specs[0].timing, TimingFunction::Linear);
    }

    #[test]
    fn formats_like_inline_style() {
        let specs = vec![
            TransitionSpec::new("opacity", 500, TimingFunction::Ease),
            TransitionSpec::new("transform", 1000, TimingFunction::EaseOut),
        ];
        assert_eq!(
            format_transition_list(&specs),
            "opacity 0.5s ease, transform 1s ease-out"
        );
        assert_eq!(format_time(250), "0.25s");
        assert_eq!(format_time(125), "125ms");
        assert_eq!(format_time(1), "1ms");
    }

    #[test]
    fn translate_y_round_trips_through_inline_form() {
        assert_eq!(format_translate_y(20), "translateY(20px)");
        assert_eq!(format_translate_y(0), "translateY(0)");
        assert_eq!(parse_translate_y("translateY(20px)"), Some(20.0));
        assert_eq!(parse_translate_y(" translateY(0) "), Some(0.0));
        assert_eq!(parse_translate_y("scale(2)"), None);
    }

    #[test]
    fn progress_is_clamped_and_monotonic() {
        let spec = TransitionSpec::new("opacity", 500, TimingFunction::Ease);
        assert_eq!(spec.progress_at(-10), 0.0);
        assert_eq!(spec.progress_at(0), 0.0);
        assert_eq!(spec.progress_at(500), 1.0);
        assert_eq!(spec.progress_at(10_000), 1.0);
        let mut previous = 0.0;
        for elapsed in (0..=500).step_by(25) {
            let progress = spec.progress_at(elapsed);
            assert!(progress >= previous, "progress went backwards at {elapsed}ms");
            previous = progress;
        }
    }

    #[test]
    fn zero_duration_jumps_to_end() {
        let spec = TransitionSpec::new("opacity", 0, TimingFunction::Linear);
        assert_eq!(spec.progress_at(1), 1.0);
    }
}
