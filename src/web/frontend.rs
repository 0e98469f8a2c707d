//! Embedded HTML/CSS/JS for the mockboard dashboard.
//!
//! The whole page is compiled into the binary. Tabs switch client-side
//! with `history.pushState`; the data comes from the `/api/*` endpoints.
//! The tab bar and the path-to-tab table are filled in from [`Tab`] when
//! the page is served.

use crate::dashboard::Tab;

/// Render the page with `active` highlighted in the tab bar.
pub fn render_page(active: Tab) -> String {
    let links: Vec<String> = Tab::ALL
        .iter()
        .map(|tab| {
            let class = if *tab == active { r#" class="active""# } else { "" };
            format!(
                r#"    <a href="{}" data-tab="{}"{class}>{}</a>"#,
                tab.path(),
                tab.id(),
                tab.label()
            )
        })
        .collect();
    let routes: Vec<String> = Tab::ALL
        .iter()
        .map(|tab| format!(r#""{}": "{}""#, tab.path(), tab.id()))
        .collect();

    INDEX_HTML
        .replace("{{TAB_LINKS}}", &links.join("\n"))
        .replace("{{TAB_ROUTES}}", &format!("{{ {} }}", routes.join(", ")))
}

/// Page template; see [`render_page`].
const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en" data-theme="light">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Analytics Dashboard</title>
<style>
:root {
  --bg: #f4f4f4;
  --surface: #ffffff;
  --border: #d5dbdb;
  --text: #16191f;
  --text-muted: #5f6b7a;
  --accent: #0972d3;
  --success: #037f0c;
  --warning: #8d6605;
  --error: #d91515;
  --stripe: #f8f8f8;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
}

[data-theme="dark"] {
  --bg: #0f1b2a;
  --surface: #192534;
  --border: #414d5c;
  --text: #e9ebed;
  --text-muted: #a4a4ad;
  --accent: #539fe5;
  --success: #29ad32;
  --warning: #e0ca57;
  --error: #ff5d64;
  --stripe: #1f2c3c;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body { background: var(--bg); color: var(--text); font-family: var(--font); font-size: 14px; line-height: 1.5; }
.app { max-width: 1200px; margin: 0 auto; padding: 24px; }
h1 { font-size: 28px; font-weight: 700; margin-bottom: 16px; }
h2 { font-size: 18px; font-weight: 700; margin-bottom: 12px; }

.tabs { display: flex; gap: 4px; border-bottom: 1px solid var(--border); margin-bottom: 20px; }
.tabs a { padding: 8px 16px; color: var(--text-muted); text-decoration: none; border-bottom: 3px solid transparent; font-weight: 600; }
.tabs a.active { color: var(--accent); border-bottom-color: var(--accent); }

.container { background: var(--surface); border: 1px solid var(--border); border-radius: var(--radius); padding: 20px; margin-bottom: 20px; }
.cards { display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px; text-align: center; }
.cards .title { font-size: 16px; font-weight: 600; color: var(--text-muted); }
.cards .value { font-size: 32px; font-weight: 700; }

.chart-wrap { display: flex; gap: 16px; }
.chart-wrap svg { flex: 1; height: 400px; }
.legend { min-width: 220px; }
.legend label { display: flex; align-items: center; gap: 8px; padding: 2px 0; cursor: pointer; }
.legend .swatch { width: 14px; height: 3px; display: inline-block; }
.axis text { fill: var(--text-muted); font-size: 11px; }
.axis line, .grid line { stroke: var(--border); }

.filter { display: flex; align-items: center; gap: 12px; margin-bottom: 12px; }
.filter input { flex: 1; max-width: 420px; padding: 6px 10px; border: 1px solid var(--border); border-radius: var(--radius); background: var(--surface); color: var(--text); }
.filter .count { color: var(--text-muted); }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 8px; border-bottom: 1px solid var(--border); }
th { position: sticky; top: 0; background: var(--surface); }
tbody tr:nth-child(even) { background: var(--stripe); }
.status-success { color: var(--success); font-weight: 600; }
.status-warning { color: var(--warning); font-weight: 600; }
.status-error { color: var(--error); font-weight: 600; }
.empty { text-align: center; padding: 24px; color: var(--text-muted); }

.field { margin-bottom: 16px; }
.field label { display: block; font-weight: 600; }
.field .desc { color: var(--text-muted); font-size: 12px; margin-bottom: 4px; }
.field select, .field input { padding: 6px 10px; border: 1px solid var(--border); border-radius: var(--radius); background: var(--surface); color: var(--text); }
.toggle { display: flex; align-items: center; gap: 8px; margin-bottom: 8px; }
[hidden] { display: none !important; }
</style>
</head>
<body>
<div class="app">
  <h1>Analytics Dashboard</h1>
  <nav class="tabs">
{{TAB_LINKS}}
  </nav>

  <section id="tab-dashboard">
    <div class="container">
      <h2>Key Metrics</h2>
      <div class="cards" id="cards"></div>
    </div>
    <div class="container">
      <h2>Monthly Performance Metrics</h2>
      <div class="chart-wrap">
        <svg id="chart" viewBox="0 0 760 400" preserveAspectRatio="none" role="img"
             aria-label="Monthly performance metrics line chart"></svg>
        <div class="legend" id="legend"></div>
      </div>
    </div>
  </section>

  <section id="tab-logs" hidden>
    <div class="filter">
      <input id="log-filter" type="search" placeholder="Search logs..." aria-label="Filter logs">
      <span class="count" id="log-count"></span>
    </div>
    <div class="container">
      <h2>System Logs <span id="log-counter"></span></h2>
      <table>
        <thead><tr><th>Timestamp</th><th>Type</th><th>User</th><th>Action</th><th>Details</th></tr></thead>
        <tbody id="log-rows"></tbody>
      </table>
      <div class="empty" id="log-empty" hidden><b>No logs found</b><br>No logs match the current filter criteria</div>
    </div>
  </section>

  <section id="tab-settings" hidden>
    <div class="container">
      <h2>Display Settings</h2>
      <div class="field">
        <label for="theme">Theme</label>
        <div class="desc">Switch between light and dark mode</div>
        <select id="theme"><option value="light">Light</option><option value="dark">Dark</option></select>
      </div>
      <div class="field">
        <label>Refresh Interval (minutes)</label>
        <input id="refresh" type="number" disabled>
      </div>
      <div class="toggle"><input type="checkbox" id="realtime" disabled><span>Enable real-time updates</span></div>
      <div class="toggle"><input type="checkbox" id="notifications" disabled><span>Show notifications</span></div>
    </div>
    <div class="container">
      <h2>Data Settings</h2>
      <div class="field">
        <label>Data retention period</label>
        <select id="retention" disabled></select>
      </div>
      <div class="toggle"><input type="checkbox" id="export" disabled><span>Enable data export</span></div>
      <div class="toggle"><input type="checkbox" id="advanced" disabled><span>Advanced metrics</span></div>
    </div>
  </section>
</div>

<script>
const TABS = {{TAB_ROUTES}};
const $ = (id) => document.getElementById(id);
const esc = (s) => String(s).replace(/[&<>"]/g, (c) => ({ "&": "&amp;", "<": "&lt;", ">": "&gt;", '"': "&quot;" }[c]));
const hidden = new Set();
let metrics = null;

function showTab(path) {
  const tab = TABS[path] || "dashboard";
  for (const id of Object.values(TABS)) $("tab-" + id).hidden = id !== tab;
  document.querySelectorAll(".tabs a").forEach((a) => a.classList.toggle("active", a.dataset.tab === tab));
  if (tab === "logs") loadLogs();
}

document.querySelectorAll(".tabs a").forEach((a) => a.addEventListener("click", (e) => {
  e.preventDefault();
  const path = a.getAttribute("href");
  history.pushState({}, "", path);
  showTab(path);
}));
window.addEventListener("popstate", () => showTab(location.pathname));

async function api(path, opts) {
  const resp = await fetch(path, opts);
  if (!resp.ok) throw new Error((await resp.json()).error || resp.statusText);
  return resp.json();
}

// Dashboard
function drawChart() {
  const svg = $("chart");
  const W = 760, H = 400, L = 40, R = 10, T = 10, B = 30;
  const [x0, x1] = metrics.x_domain.map((d) => new Date(d).getTime());
  const [y0, y1] = metrics.y_domain;
  const sx = (d) => L + (new Date(d).getTime() - x0) / (x1 - x0) * (W - L - R);
  const sy = (v) => T + (1 - (Math.min(Math.max(v, y0), y1) - y0) / (y1 - y0)) * (H - T - B);
  let out = '<g class="grid">';
  for (let v = y0; v <= y1; v += 20) out += `<line x1="${L}" x2="${W - R}" y1="${sy(v)}" y2="${sy(v)}"/>`;
  out += '</g><g class="axis">';
  for (let v = y0; v <= y1; v += 20) out += `<text x="${L - 6}" y="${sy(v) + 4}" text-anchor="end">${v}</text>`;
  for (const p of metrics.series[0].points) {
    const label = new Date(p.x).toLocaleDateString(undefined, { month: "short", year: "numeric", timeZone: "UTC" });
    out += `<text x="${sx(p.x)}" y="${H - 8}" text-anchor="middle">${label}</text>`;
  }
  out += "</g>";
  for (const s of metrics.series) {
    if (hidden.has(s.key)) continue;
    const d = s.points.map((p, i) => `${i ? "L" : "M"}${sx(p.x)},${sy(p.y)}`).join(" ");
    out += `<path d="${d}" fill="none" stroke="${s.color}" stroke-width="2"><title>${esc(s.title)}</title></path>`;
  }
  svg.innerHTML = out;
}

async function loadDashboard() {
  metrics = await api("/api/metrics");
  $("cards").innerHTML = metrics.key_metrics
    .map((m) => `<div><div class="title">${esc(m.title)}</div><div class="value">${esc(m.value)}</div></div>`)
    .join("");
  $("legend").innerHTML = metrics.series
    .map((s) => `<label><input type="checkbox" data-key="${s.key}" checked><span class="swatch" style="background:${s.color}"></span>${esc(s.title)}</label>`)
    .join("");
  $("legend").querySelectorAll("input").forEach((cb) => cb.addEventListener("change", () => {
    cb.checked ? hidden.delete(cb.dataset.key) : hidden.add(cb.dataset.key);
    drawChart();
  }));
  drawChart();
}

// Logs
let filterTimer = null;
async function loadLogs() {
  const text = $("log-filter").value;
  const data = await api("/api/logs?filter=" + encodeURIComponent(text));
  $("log-count").textContent = data.count_text;
  $("log-counter").textContent = `(${data.matches})`;
  $("log-empty").hidden = data.matches > 0;
  $("log-rows").innerHTML = data.records.map((r) => `<tr>
    <td>${esc(new Date(r.timestamp).toLocaleString())}</td>
    <td class="status-${r.status}">${r.type}</td>
    <td>${esc(r.user)}</td><td>${esc(r.action)}</td><td>${esc(r.details)}</td></tr>`).join("");
}
$("log-filter").addEventListener("input", () => {
  clearTimeout(filterTimer);
  filterTimer = setTimeout(loadLogs, 150);
});

// Settings
function applySettings(s) {
  document.documentElement.dataset.theme = s.theme;
  $("theme").value = s.theme;
  $("refresh").value = s.refresh_interval_minutes;
  $("realtime").checked = s.realtime_updates;
  $("notifications").checked = s.notifications;
  $("retention").innerHTML = s.retention_choices
    .map((d) => `<option value="${d}"${d === s.retention_days ? " selected" : ""}>${d} days</option>`)
    .join("");
  $("export").checked = s.data_export;
  $("advanced").checked = s.advanced_metrics;
}
$("theme").addEventListener("change", async (e) => {
  applySettings(await api("/api/settings/theme", {
    method: "PUT",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({ theme: e.target.value }),
  }));
});

api("/api/settings").then(applySettings);
loadDashboard();
showTab(location.pathname);
</script>
</body>
</html>
"##;
