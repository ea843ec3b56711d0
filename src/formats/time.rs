use crate::error::TimeFormatError;

/// Formats seconds as `HH:MM:SS.mmm`. Negative, NaN and infinite inputs render as zero.
pub fn seconds_to_vtt_time(seconds: f64) -> String {
    let ms = clamp_to_millis(seconds);

    let milli = ms % 1000;
    let total_seconds = ms / 1000;
    let sec = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let min = total_minutes % 60;
    let hour = total_minutes / 60;

    format!("{hour:02}:{min:02}:{sec:02}.{milli:03}")
}

/// Formats a playback clock readout: `MM:SS`, or `HH:MM:SS` from one hour on.
pub fn format_display_time(seconds: f64) -> String {
    let total_seconds = clamp_to_millis(seconds) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

/// Parses a timestamp from a cue timing line. Accepts `HH:MM:SS.mmm` and `MM:SS.mmm`,
/// with `,` allowed in place of `.`. Clock components may drop their leading zero, so
/// `0:00:01.000` and `1:05.000` read the way other subtitle tools write them.
pub fn parse_strict_vtt_time(text: &str) -> Result<f64, TimeFormatError> {
    parse_clock(text).ok_or_else(|| TimeFormatError::new(text))
}

/// Parses a hand-edited timestamp. Same grammar as [`parse_strict_vtt_time`], but
/// returns `None` instead of an error so it can run on every keystroke.
pub fn parse_lenient_edit_time(text: &str) -> Option<f64> {
    parse_clock(text)
}

/// Format-only check for live input feedback; no ordering rules apply.
pub fn probe_time_input(text: &str) -> bool {
    parse_lenient_edit_time(text).is_some()
}

fn clamp_to_millis(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds < 0.0 {
        return 0;
    }
    (seconds * 1000.0).round() as u64
}

fn parse_clock(text: &str) -> Option<f64> {
    let t = text.trim();
    let (clock, frac) = t.split_once(['.', ','])?;

    if frac.is_empty() || frac.len() > 3 || !is_digits(frac) {
        return None;
    }

    let mut parts = clock.split(':');
    let first = parts.next()?;
    let second = parts.next()?;
    let third = parts.next();
    if parts.next().is_some() {
        return None;
    }

    let (hours, minutes, seconds) = match third {
        Some(s) => (component(first)?, component(second)?, component(s)?),
        None => (0, component(first)?, component(second)?),
    };

    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    // "5" means 500 ms, "25" means 250 ms.
    let scale = 10u64.pow(3 - frac.len() as u32);
    let millis: u64 = frac.parse::<u64>().ok()? * scale;

    let total_ms = ((hours * 60 + minutes) * 60 + seconds) * 1000 + millis;
    Some(total_ms as f64 / 1000.0)
}

/// One or two digits per clock component.
fn component(s: &str) -> Option<u64> {
    if !(1..=2).contains(&s.len()) || !is_digits(s) {
        return None;
    }
    s.parse().ok()
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_vtt_time() {
        assert_eq!(seconds_to_vtt_time(65.5), "00:01:05.500");
        assert_eq!(seconds_to_vtt_time(0.0), "00:00:00.000");
        assert_eq!(seconds_to_vtt_time(3723.042), "01:02:03.042");
        assert_eq!(seconds_to_vtt_time(359_999.999), "99:59:59.999");
    }

    #[test]
    fn clamps_bad_input_to_zero() {
        assert_eq!(seconds_to_vtt_time(-4.0), "00:00:00.000");
        assert_eq!(seconds_to_vtt_time(f64::NAN), "00:00:00.000");
        assert_eq!(seconds_to_vtt_time(f64::INFINITY), "00:00:00.000");
    }

    #[test]
    fn display_time_drops_hours_below_one_hour() {
        assert_eq!(format_display_time(65.9), "01:05");
        assert_eq!(format_display_time(3600.0), "01:00:00");
        assert_eq!(format_display_time(f64::NAN), "00:00");
        assert_eq!(format_display_time(-1.0), "00:00");
    }

    #[test]
    fn strict_accepts_both_shapes_and_comma() {
        assert_eq!(parse_strict_vtt_time("00:00:01.000"), Ok(1.0));
        assert_eq!(parse_strict_vtt_time("01:05.500"), Ok(65.5));
        assert_eq!(parse_strict_vtt_time("00:00:03,500"), Ok(3.5));
        assert_eq!(parse_strict_vtt_time("01:00:00.5"), Ok(3600.5));
    }

    #[test]
    fn strict_accepts_single_digit_components() {
        assert_eq!(parse_strict_vtt_time("0:00:01.000"), Ok(1.0));
        assert_eq!(parse_strict_vtt_time("1:05.000"), Ok(65.0));
        assert_eq!(parse_strict_vtt_time("1:5.25"), Ok(65.25));
    }

    #[test]
    fn strict_rejects_malformed_forms() {
        for bad in [
            "00:00:01",
            "bad",
            "100:00:00.000",
            "00:123:00.000",
            "00:60:00.000",
            "00:00:60.000",
            "00:00:01.0000",
            "00:00:00:01.000",
            "00:00:01.",
            "-0:00:01.000",
            "",
        ] {
            let err = parse_strict_vtt_time(bad).unwrap_err();
            assert_eq!(err.text, bad);
        }
    }

    #[test]
    fn lenient_accepts_missing_leading_zeros() {
        assert_eq!(parse_lenient_edit_time("1:5.25"), Some(65.25));
        assert_eq!(parse_lenient_edit_time("1:2:3,4"), Some(3723.4));
        assert_eq!(parse_lenient_edit_time("00:00:00.500"), Some(0.5));
    }

    #[test]
    fn lenient_rejects_out_of_range_components() {
        assert_eq!(parse_lenient_edit_time("0:60.000"), None);
        assert_eq!(parse_lenient_edit_time("0:0:75.000"), None);
        assert_eq!(parse_lenient_edit_time("12"), None);
        assert_eq!(parse_lenient_edit_time("1:5"), None);
        assert!(!probe_time_input("abc"));
        assert!(probe_time_input("0:01.2"));
    }

    #[test]
    fn strict_output_round_trips_through_formatter() {
        let mut ms: u64 = 0;
        while ms < 359_999_999 {
            let t = ms as f64 / 1000.0;
            let parsed = parse_strict_vtt_time(&seconds_to_vtt_time(t)).unwrap();
            assert!((parsed - t).abs() < 0.0005, "t={t} parsed={parsed}");
            ms += 7_919_113;
        }
    }

    #[test]
    fn everything_strict_accepts_lenient_accepts_identically() {
        for s in [
            "00:00:01.000",
            "00:01.5",
            "12:34:56,789",
            "99:59:59.999",
            "00:00:00.05",
            "0:0:1.5",
            "7:07.070",
        ] {
            let strict = parse_strict_vtt_time(s).unwrap();
            assert_eq!(parse_lenient_edit_time(s), Some(strict));
        }
    }
}
