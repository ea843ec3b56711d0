use anyhow::{Context, Result, anyhow, bail};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    cli::{CheckCmd, ExportCmd, LocateCmd},
    config::Config,
    formats::{
        ExportFormat, default_save_filename,
        time::{parse_lenient_edit_time, seconds_to_vtt_time},
        vtt::{VttReport, parse_vtt_with_report},
    },
    model::TranscriptMeta,
    save::save_document,
    store::CueStore,
    sync::{SyncUpdate, Synchronizer, Tick},
    validate::revalidate_all,
};

pub fn run_check(cmd: &CheckCmd, cfg: &Config) -> Result<()> {
    let span = tracing::info_span!("check", input = %cmd.input.display());
    let _g = span.enter();

    let (mut store, report) = load_document(&cmd.input, cfg)?;

    for err in &report.dropped {
        println!("dropped: {err}");
    }

    let invalid = revalidate_all(&mut store);
    for (index, cue) in store.cues().iter().enumerate() {
        if store.flags(index).is_some_and(|f| f.invalid_fields() > 0) {
            println!(
                "invalid: cue {} [{} - {}] start must be before end",
                index + 1,
                seconds_to_vtt_time(cue.start),
                seconds_to_vtt_time(cue.end)
            );
        }
    }

    println!(
        "{} cue(s), {} dropped, {} invalid timestamp(s)",
        store.len(),
        report.dropped.len(),
        invalid
    );

    if invalid > 0 {
        bail!("{invalid} invalid timestamp(s) in {}", cmd.input.display());
    }
    Ok(())
}

pub fn run_export(cmd: &ExportCmd, cfg: &Config) -> Result<()> {
    let format = cmd.to.unwrap_or(cfg.save.default_format);
    let span = tracing::info_span!("export", input = %cmd.input.display(), to = ?format);
    let _g = span.enter();

    let (mut store, _) = load_document(&cmd.input, cfg)?;
    let rendered = save_document(&mut store, format)
        .with_context(|| format!("cannot export {}", cmd.input.display()))?;

    if cmd.stdout {
        print!("{rendered}");
        tracing::info!(mode = "stdout", "wrote output");
        return Ok(());
    }

    let out_path = derive_output_path(cmd, store.meta(), format, cfg);
    write_output(&out_path, &rendered, cmd.overwrite)?;
    tracing::info!(path = %out_path.display(), "wrote output file");

    Ok(())
}

pub fn run_locate(cmd: &LocateCmd, cfg: &Config) -> Result<()> {
    let (store, update) = locate(&cmd.input, &cmd.at, cfg)?;
    match update.active.and_then(|i| store.cue(i).map(|c| (i, c))) {
        Some((index, cue)) => println!(
            "{} cue {} [{} - {}] {}",
            update.clock,
            index + 1,
            seconds_to_vtt_time(cue.start),
            seconds_to_vtt_time(cue.end),
            cue.text.trim()
        ),
        None => println!("{} no active cue", update.clock),
    }
    Ok(())
}

/// Runs the synchronizer once at `at` over the cues in `input`.
pub fn locate(input: &Path, at: &str, cfg: &Config) -> Result<(CueStore, SyncUpdate)> {
    let time = parse_position(at)?;
    let (mut store, _) = load_document(input, cfg)?;
    let mut sync = Synchronizer::new(&cfg.playback);

    let update = sync.on_time_update(
        &mut store,
        Tick {
            time,
            playing: false,
            editor_focused: false,
        },
    );
    Ok((store, update))
}

pub fn load_document(path: &Path, cfg: &Config) -> Result<(CueStore, VttReport)> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading VTT file: {}", path.display()))?;
    tracing::info!(bytes = raw.len(), "read input");

    let report = parse_vtt_with_report(&raw);
    let store = CueStore::with_cues(report.cues.clone(), TranscriptMeta::from_vtt_path(path));
    log_transcript_summary(&store, &report, cfg);
    Ok((store, report))
}

fn parse_position(at: &str) -> Result<f64> {
    if let Some(t) = parse_lenient_edit_time(at) {
        return Ok(t);
    }
    match at.trim().parse::<f64>() {
        Ok(t) if t.is_finite() && t >= 0.0 => Ok(t),
        _ => Err(anyhow!("unrecognized playback position: '{at}'")),
    }
}

fn log_transcript_summary(store: &CueStore, report: &VttReport, cfg: &Config) {
    tracing::info!(
        cues = store.len(),
        dropped = report.dropped.len(),
        misordered = report.misordered.len(),
        "transcript summary"
    );

    if tracing::enabled!(tracing::Level::DEBUG) {
        let n = cfg.logging.debug_cue_samples.min(store.len());
        for (i, c) in store.cues().iter().take(n).enumerate() {
            tracing::debug!(
                idx = i,
                start = c.start,
                end = c.end,
                chars = c.text.chars().count(),
                "cue sample"
            );
        }
    }
}

fn derive_output_path(
    cmd: &ExportCmd,
    meta: &TranscriptMeta,
    format: ExportFormat,
    cfg: &Config,
) -> PathBuf {
    if let Some(o) = &cmd.output {
        return o.clone();
    }

    let parent = cmd.input.parent().unwrap_or_else(|| Path::new("."));
    parent.join(default_save_filename(
        meta,
        format,
        &cfg.save.fallback_basename,
    ))
}

fn write_output(path: &Path, data: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        bail!(
            "refusing to overwrite existing file (pass --overwrite): {}",
            path.display()
        );
    }
    fs::write(path, data).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}
