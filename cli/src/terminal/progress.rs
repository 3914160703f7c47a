use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

pub fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg} {wide_bar:.green/black} {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICKS)
}

pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS)
}

/// A span whose bar starts as a spinner and turns into a counted bar once
/// the number of probes is known.
pub fn run_span(message: &'static str) -> Span {
    let span: Span = info_span!("relaygen", indicatif.pb_show = true);
    span.pb_set_style(&spinner_style());
    span.pb_set_message(message);
    span
}

pub fn start_probing(span: &Span, total: usize) {
    span.pb_set_style(&bar_style());
    span.pb_set_length(total as u64);
    span.pb_set_position(0);
    span.pb_set_message("testing relays");
}

pub fn advance(span: &Span) {
    span.pb_inc(1);
}
