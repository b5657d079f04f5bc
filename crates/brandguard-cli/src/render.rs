//! Plain-text rendering of the synchronized collections.

use std::fmt::Write as _;

use brandguard_core::{Alert, Mention};
use chrono::{DateTime, NaiveDateTime, Utc};

/// How many items the live panel shows per collection.
pub(crate) const LIVE_PANEL_LEN: usize = 5;

/// Everything a frame of the feed needs.
pub(crate) struct FeedView<'a> {
    pub loading: bool,
    pub live: bool,
    pub mentions: &'a [Mention],
    pub alerts: &'a [Alert],
}

pub(crate) fn render_feed(view: &FeedView<'_>) -> String {
    let mut out = String::new();
    let status = if view.live { "Connected" } else { "Disconnected" };
    let _ = writeln!(
        out,
        "Live Feed: {status} • {} total mentions",
        view.mentions.len()
    );
    out.push('\n');

    out.push_str("Recent mentions\n");
    if view.loading {
        out.push_str("  Loading mentions...\n");
    } else {
        out.push_str(&render_mentions(view.mentions, LIVE_PANEL_LEN));
    }

    out.push_str("\nAlerts\n");
    out.push_str(&render_alerts(view.alerts, LIVE_PANEL_LEN));
    out
}

pub(crate) fn render_mentions(mentions: &[Mention], limit: usize) -> String {
    if mentions.is_empty() {
        return "  No mentions found.\n".to_string();
    }
    let mut out = String::new();
    for mention in mentions.iter().take(limit) {
        let _ = writeln!(
            out,
            "  [{}] {}: {}",
            mention.source,
            sentiment_label(mention),
            mention.text
        );
        let _ = writeln!(out, "    {}", mention_meta(mention));
        if !mention.url.is_empty() {
            let _ = writeln!(out, "    {}", mention.url);
        }
    }
    out
}

pub(crate) fn render_alerts(alerts: &[Alert], limit: usize) -> String {
    if alerts.is_empty() {
        return "  No alerts yet.\n".to_string();
    }
    let mut out = String::new();
    for alert in alerts.iter().take(limit) {
        let _ = writeln!(
            out,
            "  {} ({}): {}",
            alert_label(&alert.alert_type),
            format_timestamp(&alert.created_at),
            alert.message
        );
    }
    out
}

/// `positive` or `negative` when the backend says so, otherwise `neutral`.
pub(crate) fn sentiment_label(mention: &Mention) -> String {
    mention.sentiment_class().to_string()
}

fn mention_meta(mention: &Mention) -> String {
    let author = if mention.author.is_empty() {
        "Unknown"
    } else {
        mention.author.as_str()
    };
    let mut meta = format!("By: {author}");
    if !mention.published_at.is_empty() {
        let _ = write!(meta, " • {}", format_timestamp(&mention.published_at));
    }
    if let Some(reach) = format_reach(mention.reach) {
        let _ = write!(meta, " • Reach: {reach}");
    }
    if let Some(cluster) = mention.cluster_id {
        let _ = write!(meta, " • Topic: {cluster}");
    }
    meta
}

/// `volume_spike` → `VOLUME SPIKE`. Only the first underscore is replaced.
pub(crate) fn alert_label(alert_type: &str) -> String {
    alert_type.replacen('_', " ", 1).to_uppercase()
}

/// Rounded reach; zero and missing values are not shown.
pub(crate) fn format_reach(reach: Option<f64>) -> Option<String> {
    reach
        .filter(|r| *r != 0.0 && r.is_finite())
        .map(|r| format!("{:.0}", r.round()))
}

/// Formats a backend timestamp for display.
///
/// Accepts RFC 3339 (shown in UTC) and the backend's naive ISO-8601 form
/// with optional fractional seconds. Anything else is returned unchanged.
pub(crate) fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return format!("{} UTC", ts.with_timezone(&Utc).format(DISPLAY));
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return ts.format(DISPLAY).to_string();
    }
    raw.to_string()
}
