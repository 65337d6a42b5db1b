//! ==============================================================================
//! dashboard.rs - Dashboard Page Renderer
//! ==============================================================================
//!
//! purpose:
//!     renders the monitor page as one self-contained HTML document: inline
//!     styles, inline polling script, no build step and no static assets.
//!
//! behavior:
//!     - placeholder cards are rendered server-side with fixed demo values
//!       and marked OFFLINE.
//!     - the live card is rendered client-side from /api/data, and only once
//!       a non-null timestamp proves a sensor has reported.
//!     - the script polls on a fixed interval and clears its timer on
//!       pagehide, so a closed tab leaks nothing.
//!     - fetch failures are logged to the console and swallowed; the page
//!       keeps showing stale data until the next tick succeeds.
//!
//! ==============================================================================

use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::api::AppState;
use crate::config::PlaceholderCard;
use crate::domain::FillStatus;

/// GET / - the monitor page
pub async fn page_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state.config.dashboard))
}

fn render_page(dash: &crate::config::DashboardConfig) -> String {
    let placeholder_cards: String = dash
        .placeholders
        .iter()
        .map(render_placeholder_card)
        .collect();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
  body {{ margin: 0; font-family: system-ui, sans-serif; background: #1a1a2e; color: #eee; }}
  .wrap {{ max-width: 1100px; margin: 0 auto; padding: 3rem 1rem; }}
  h1 {{ text-align: center; font-size: 2.2rem; margin-bottom: 0.25rem; }}
  .subtitle {{ text-align: center; color: #889; margin-bottom: 2.5rem; }}
  .grid {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 1.5rem; }}
  .card {{ background: #16213e; border-radius: 16px; overflow: hidden; box-shadow: 0 8px 24px rgba(0,0,0,.4); }}
  .card-head {{ background: linear-gradient(90deg, #2563eb, #7c3aed); padding: 1.25rem; position: relative; }}
  .card-head h3 {{ margin: 0 0 .25rem; font-size: 1.3rem; }}
  .card-head p {{ margin: 0; color: #cfe; font-size: .85rem; }}
  .badge {{ position: absolute; top: 1rem; right: 1rem; font-size: .7rem; font-weight: 700;
           padding: .25rem .6rem; border-radius: 999px; }}
  .badge.live {{ background: #22c55e; }}
  .badge.offline {{ background: #64748b; }}
  .card-body {{ padding: 1.25rem; }}
  .fill-row {{ display: flex; justify-content: space-between; margin-bottom: .5rem; }}
  .fill-pct {{ font-size: 1.4rem; font-weight: 700; }}
  .bar {{ background: #0f172a; border-radius: 999px; height: 14px; overflow: hidden; }}
  .bar > div {{ height: 100%; border-radius: 999px; transition: width .5s; }}
  .status-text {{ margin: .5rem 0 1rem; font-size: .85rem; font-weight: 600; }}
  .meta {{ background: #0f172a; border-radius: 12px; padding: .75rem 1rem; margin-top: .75rem;
          display: flex; justify-content: space-between; font-size: .9rem; }}
  .meta span:first-child {{ color: #889; }}
  .waiting {{ padding: 3rem 1.5rem; text-align: center; color: #889; }}
  .footer {{ text-align: center; color: #667; font-size: .8rem; margin-top: 2.5rem; }}
</style>
</head>
<body>
<div class="wrap">
  <h1>{title}</h1>
  <p class="subtitle">Real-time IoT Trash Management System</p>
  <div class="grid">
    <div class="card" id="live-slot">
      <div class="waiting" id="loading">Loading&hellip;</div>
    </div>
{placeholder_cards}  </div>
  <p class="footer">Live data auto-refreshing every {poll_secs} seconds</p>
</div>
<script>
const LIVE_NAME = "{live_name}";
const LIVE_LOCATION = "{live_location}";
const POLL_MS = {poll_ms};

function statusFor(fill) {{
  if (fill >= 80) return {{ label: "{critical_label}", color: "{critical_color}" }};
  if (fill >= 50) return {{ label: "{moderate_label}", color: "{moderate_color}" }};
  return {{ label: "{good_label}", color: "{good_color}" }};
}}

function renderLive(data) {{
  const slot = document.getElementById("live-slot");
  if (!data.timestamp) {{
    slot.innerHTML = '<div class="waiting">No data received yet.<br>Waiting for sensor data&hellip;</div>';
    return;
  }}
  const s = statusFor(data.fillLevel);
  const when = new Date(data.timestamp).toLocaleTimeString();
  slot.innerHTML =
    '<div class="card-head"><h3>' + LIVE_NAME + '</h3><p>' + LIVE_LOCATION + '</p>' +
    '<span class="badge live">LIVE</span></div>' +
    '<div class="card-body">' +
    '<div class="fill-row"><span>Fill Level</span><span class="fill-pct">' + data.fillLevel + '%</span></div>' +
    '<div class="bar"><div style="width:' + Math.max(0, Math.min(100, data.fillLevel)) + '%;background:' + s.color + '"></div></div>' +
    '<p class="status-text" style="color:' + s.color + '">' + s.label + '</p>' +
    '<div class="meta"><span>Distance</span><span>' + data.distance + ' cm</span></div>' +
    '<div class="meta"><span>Last Updated</span><span>' + when + '</span></div>' +
    '</div>';
}}

async function tick() {{
  try {{
    const res = await fetch("/api/data");
    renderLive(await res.json());
  }} catch (err) {{
    // stale data stays up until the next tick succeeds
    console.error(err);
  }}
}}

tick();
const timer = setInterval(tick, POLL_MS);
window.addEventListener("pagehide", () => clearInterval(timer));
</script>
</body>
</html>"#,
        title = html_escape(&dash.title),
        placeholder_cards = placeholder_cards,
        poll_secs = dash.poll_interval_ms as f64 / 1000.0,
        poll_ms = dash.poll_interval_ms,
        live_name = html_escape(&dash.live_card.name),
        live_location = html_escape(&dash.live_card.location),
        critical_label = FillStatus::Critical.label(),
        critical_color = FillStatus::Critical.color(),
        moderate_label = FillStatus::Moderate.label(),
        moderate_color = FillStatus::Moderate.color(),
        good_label = FillStatus::Good.label(),
        good_color = FillStatus::Good.color(),
    )
}

fn render_placeholder_card(card: &PlaceholderCard) -> String {
    let status = FillStatus::from_fill_level(card.fill_level);
    format!(
        r#"    <div class="card">
      <div class="card-head"><h3>{name}</h3><p>{location}</p><span class="badge offline">OFFLINE</span></div>
      <div class="card-body">
        <div class="fill-row"><span>Fill Level</span><span class="fill-pct">{fill}%</span></div>
        <div class="bar"><div style="width:{width}%;background:{color}"></div></div>
        <p class="status-text" style="color:{color}">{label}</p>
        <div class="meta"><span>Distance</span><span>{distance} cm</span></div>
      </div>
    </div>
"#,
        name = html_escape(&card.name),
        location = html_escape(&card.location),
        fill = card.fill_level,
        width = card.fill_level.clamp(0.0, 100.0),
        color = status.color(),
        label = status.label(),
        distance = card.distance,
    )
}

/// escape html special characters to prevent xss
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;

    #[test]
    fn page_contains_placeholders_and_poll_interval() {
        let dash = DashboardConfig::default();
        let html = render_page(&dash);
        assert!(html.contains("Room No 202"));
        assert!(html.contains("Room No 203"));
        assert!(html.contains("OFFLINE"));
        assert!(html.contains("const POLL_MS = 2000;"));
        assert!(html.contains("clearInterval(timer)"));
    }

    #[test]
    fn placeholder_card_gets_tier_styling() {
        // fill 72 sits in the moderate tier
        let card = PlaceholderCard {
            name: "Room No 203".to_string(),
            location: "2nd floor".to_string(),
            fill_level: 72.0,
            distance: 28.0,
        };
        let html = render_placeholder_card(&card);
        assert!(html.contains(FillStatus::Moderate.label()));
        assert!(html.contains(FillStatus::Moderate.color()));
        assert!(html.contains("28 cm"));
    }

    #[test]
    fn config_strings_are_escaped() {
        let mut dash = DashboardConfig::default();
        dash.title = "<script>alert(1)</script>".to_string();
        let html = render_page(&dash);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
