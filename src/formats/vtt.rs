use crate::{
    error::CueTimingError,
    formats::time::{parse_strict_vtt_time, seconds_to_vtt_time},
    model::Cue,
};

const ARROW: &str = "-->";

/// Cues recovered from a VTT document plus what had to be dropped on the way.
#[derive(Debug, Clone, Default)]
pub struct VttReport {
    pub cues: Vec<Cue>,
    /// Timing lines that could not be read; each one cost exactly one cue.
    pub dropped: Vec<CueTimingError>,
    /// Indices into `cues` whose start is not before their end.
    pub misordered: Vec<usize>,
}

/// Parses WebVTT text into cues, skipping anything it cannot make sense of.
pub fn parse_vtt(raw: &str) -> Vec<Cue> {
    parse_vtt_with_report(raw).cues
}

pub fn parse_vtt_with_report(raw: &str) -> VttReport {
    let lines: Vec<&str> = raw.lines().collect();
    let mut report = VttReport::default();
    let mut idx = skip_prologue(&lines);

    while idx < lines.len() {
        let line = lines[idx].trim();

        if line.is_empty() || is_cue_number(line) {
            idx += 1;
            continue;
        }

        if is_comment_block(line) {
            idx = skip_to_blank(&lines, idx + 1);
            continue;
        }

        if !line.contains(ARROW) {
            tracing::trace!(line_number = idx + 1, "skipping unexpected line");
            idx += 1;
            continue;
        }

        let timing_line = idx + 1;
        match parse_timing_line(line) {
            Ok((start, end)) => {
                idx += 1;
                let mut text_lines: Vec<&str> = Vec::new();
                while idx < lines.len() && !lines[idx].trim().is_empty() {
                    text_lines.push(lines[idx].trim());
                    idx += 1;
                }

                if start >= end {
                    tracing::warn!(
                        cue = report.cues.len(),
                        line_number = timing_line,
                        start,
                        end,
                        "cue start is not before its end"
                    );
                    report.misordered.push(report.cues.len());
                }

                report.cues.push(Cue::new(start, end, text_lines.join("\n")));
            }
            Err(cause) => {
                let err = CueTimingError {
                    line_number: timing_line,
                    line: line.to_string(),
                    cause,
                };
                tracing::warn!(
                    line_number = err.line_number,
                    line = err.line.as_str(),
                    cause = err.cause.as_str(),
                    "dropping cue with unreadable timing line"
                );
                report.dropped.push(err);

                idx += 1;
                while idx < lines.len() {
                    let next = lines[idx].trim();
                    if next.is_empty() || next.contains(ARROW) {
                        break;
                    }
                    idx += 1;
                }
            }
        }
    }

    tracing::debug!(
        cues = report.cues.len(),
        dropped = report.dropped.len(),
        misordered = report.misordered.len(),
        "parsed vtt"
    );

    report
}

/// Renders cues as a WebVTT document in sequence order.
pub fn write_vtt(cues: &[Cue]) -> String {
    let mut out = String::from("WEBVTT\n\n");

    for cue in cues {
        out.push_str(&format!(
            "{} {ARROW} {}\n",
            seconds_to_vtt_time(cue.start),
            seconds_to_vtt_time(cue.end)
        ));
        // A blank line inside the text would end the cue early.
        for line in cue.text.trim().lines().map(str::trim).filter(|l| !l.is_empty()) {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

fn skip_prologue(lines: &[&str]) -> usize {
    let mut idx = 0;
    while idx < lines.len() {
        let line = lines[idx].trim();
        if line.is_empty() || line.to_uppercase().starts_with("WEBVTT") {
            idx += 1;
        } else if is_comment_block(line) {
            idx = skip_to_blank(lines, idx + 1);
        } else {
            break;
        }
    }
    idx
}

/// Skips the body of a comment block. Stops early at a timing line so a missing
/// blank line after a note does not swallow the next cue.
fn skip_to_blank(lines: &[&str], mut idx: usize) -> usize {
    while idx < lines.len() {
        let line = lines[idx].trim();
        if line.is_empty() || line.contains(ARROW) {
            break;
        }
        idx += 1;
    }
    idx
}

fn is_comment_block(line: &str) -> bool {
    if line.contains(ARROW) {
        return false;
    }
    ["NOTE", "COMMENT"].iter().any(|kw| {
        line.strip_prefix(kw)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t']))
    })
}

fn is_cue_number(line: &str) -> bool {
    line.bytes().all(|b| b.is_ascii_digit())
}

fn parse_timing_line(line: &str) -> Result<(f64, f64), String> {
    let (left, right) = line
        .split_once(ARROW)
        .ok_or_else(|| format!("missing '{ARROW}'"))?;
    if right.contains(ARROW) {
        return Err(format!("more than one '{ARROW}'"));
    }

    let start = parse_time_token(left)?;
    let end = parse_time_token(right)?;
    Ok((start, end))
}

/// Reads the first whitespace-delimited token, leaving cue settings behind.
fn parse_time_token(half: &str) -> Result<f64, String> {
    let token = half.split_whitespace().next().unwrap_or("");
    parse_strict_vtt_time(token).map_err(|e| e.to_string())
}
