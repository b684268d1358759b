use gait_score::config::{self, OutputFormat, RuntimeConfig};
use gait_score::diagnostics::DiagnosticsReport;
use gait_score::io::{load_recording, write_json_file, write_text_file};
use gait_score::scoring::{normalize_features, NormalizationStats};
use gait_score::{AnalysisSession, FEATURE_NAMES};
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "Usage: gait_report <config.json>".to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportOutput<'a> {
    report: &'a DiagnosticsReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    normalized_features: Option<[f32; 9]>,
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: RuntimeConfig = config::load_config(Path::new(&config_path))?;

    let recording = load_recording(&config.input).map_err(|e| e.to_string())?;
    let session =
        AnalysisSession::from_raw(recording.fps, recording.signals).map_err(|e| e.to_string())?;
    let analysis = session.analyze(&config.params).map_err(|e| e.to_string())?;

    let stats = match &config.artifacts.normalization {
        Some(path) => Some(config::load_normalization_stats(path).map_err(|e| e.to_string())?),
        None => None,
    };
    let normalized: Option<[f32; 9]> = stats
        .as_ref()
        .map(|s| normalize_features(&analysis.features, s).into());

    let format = config.output.format;
    if format.includes_text() {
        print_text_summary(&analysis.report, normalized.as_ref(), stats.as_ref());
    }

    let output = ReportOutput {
        report: &analysis.report,
        normalized_features: normalized,
    };
    if let Some(path) = &config.output.json_out {
        write_json_file(path, &output).map_err(|e| e.to_string())?;
        println!("JSON report written to {}", path.display());
    } else if format.includes_json() {
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
        if format == OutputFormat::Both {
            println!("\nJSON report:\n{json}");
        } else {
            println!("{json}");
        }
    }

    if let Some(path) = &config.output.csv_out {
        write_text_file(path, &analysis.report.to_csv()).map_err(|e| e.to_string())?;
        println!("CSV report written to {}", path.display());
    }

    Ok(())
}

fn print_text_summary(
    report: &DiagnosticsReport,
    normalized: Option<&[f32; 9]>,
    stats: Option<&NormalizationStats>,
) {
    let s = &report.summary;
    println!("Recording summary");
    println!("  fps: {:.2}", s.fps);
    println!(
        "  frames: total={} detected={} rate={:.3} tier={}",
        s.total_frames, s.detected_frames, s.detection_rate, s.quality_tier
    );
    println!(
        "  valid left-knee frames: {} (sufficient: {})",
        s.valid_frames, s.meets_min_valid_frames
    );
    let c = &s.cleaning;
    println!(
        "  cleaning: spikes={} ({:.2}%) gaps_filled={} ({:.2}%)",
        c.total_spikes_rejected, c.spike_pct, c.total_gaps_filled, c.interpolation_pct
    );

    println!("\nFeatures ({} missing)", s.missing_features);
    for (i, (name, value)) in s.features.named().enumerate() {
        let raw = value.map_or_else(|| "missing".to_string(), |v| format!("{v:.4}"));
        match normalized {
            Some(z) => println!("  {name:<16} {raw:>10}  z={:+.3}", z[i]),
            None => println!("  {name:<16} {raw:>10}"),
        }
    }
    if let Some(stats) = stats {
        let floored = stats.std().iter().filter(|&&v| v < 1e-6).count();
        if floored > 0 {
            println!("  ({floored} of {} std entries floored)", FEATURE_NAMES.len());
        }
    }

    let t = &report.timing;
    let stages: Vec<String> = t
        .stages
        .iter()
        .map(|st| format!("{}={:.3}", st.label, st.elapsed_ms))
        .collect();
    println!("\nTimings (ms): {} total={:.3}", stages.join(" "), t.total_ms);
}
