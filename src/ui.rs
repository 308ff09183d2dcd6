use crate::history::{RECENT_COUNT, month_grid, recent, to_backend_scale};
use crate::models::{
    DashboardResponse, HistoryResponse, ProcessedMoodEntry, UserSettings, WeeklyMoodTrend,
};
use crate::theme::MoodTheme;
use chrono::{Datelike, NaiveDate};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    History,
    Settings,
}

impl Page {
    const ALL: [Page; 3] = [Page::Dashboard, Page::History, Page::Settings];

    fn path(self) -> &'static str {
        match self {
            Page::Dashboard => "/",
            Page::History => "/history",
            Page::Settings => "/settings",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::History => "History",
            Page::Settings => "Settings",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Avatar {
    pub initials: String,
    pub picture: Option<String>,
}

/// Mood picker options as (UI score, emoji, label).
const MOOD_OPTIONS: [(u8, &str, &str); 5] = [
    (20, "😢", "Sad"),
    (40, "😕", "Meh"),
    (60, "😐", "Neutral"),
    (80, "🙂", "Good"),
    (100, "😁", "Great"),
];

pub fn render_dashboard_page(view: &DashboardResponse, avatar: &Avatar) -> String {
    let pending = view.location.location.is_none() && view.location.loading;
    let content = format!(
        r#"<section id="dashboard" data-location-pending="{pending}">{body}</section>
<div class="status" id="status"></div>"#,
        body = view.html,
    );
    render_page(Page::Dashboard, "MoodUp", avatar, &content, DASHBOARD_SCRIPT)
}

/// Dashboard body; also sent to the page script after each refresh.
pub fn render_dashboard_body(view: &DashboardResponse) -> String {
    let mut html = String::new();

    if let Some(error) = &view.error {
        let _ = write!(html, r#"<div class="banner error">{}</div>"#, text(error));
    }
    if let Some(error) = &view.location.error {
        let _ = write!(html, r#"<div class="banner warn">{}</div>"#, text(error));
    }

    let place = match &view.location.location {
        Some(location) => match &location.name {
            Some(name) => text(name).into_owned(),
            None => format!("{:.3}, {:.3}", location.latitude, location.longitude),
        },
        None if view.location.loading => "Locating…".to_string(),
        None => "Location unavailable".to_string(),
    };

    let _ = write!(
        html,
        r#"<div class="grid">
<div class="card">
  <h2>Today's Mood Prediction</h2>
  <p class="subtitle">Based on your environment and habits · {place}</p>
  <div class="ring-wrap">{svg}</div>
  <p class="ring-caption">Mood Score{loading}</p>
  <div class="factors">"#,
        svg = view.ring_svg,
        loading = if view.loading { " · updating…" } else { "" },
    );

    for factor in &view.factors {
        let _ = write!(
            html,
            r#"<div class="inset factor"><span class="swatch" style="background: {color}"></span><span class="label">{name}</span><span class="value">{points} pts · {impact}%</span></div>"#,
            color = attr(&factor.color),
            name = text(&factor.name),
            points = format_points(factor.points),
            impact = factor.impact,
        );
    }
    html.push_str("</div>\n");
    html.push_str(&render_mood_input());
    html.push_str("</div>\n<div class=\"card\">");

    match view
        .statistics
        .as_ref()
        .and_then(|stats| stats.ai_mood_analysis.as_ref())
    {
        Some(analysis) => {
            let _ = write!(
                html,
                r#"<h2>Mood Insight</h2>
<p class="state">{state}</p>
<p>{description}</p>
<p class="insight">{insight}</p>"#,
                state = text(&analysis.emotional_state),
                description = text(&analysis.mood_description),
                insight = text(&analysis.mood_insight),
            );
            if !analysis.recommendations.is_empty() {
                html.push_str("<h3>Recommendations</h3><ol class=\"recommendations\">");
                for item in &analysis.recommendations {
                    let _ = write!(
                        html,
                        "<li><strong>{}</strong><span>{}</span></li>",
                        text(&item.title),
                        text(&item.description),
                    );
                }
                html.push_str("</ol>");
            }
        }
        None => html.push_str(
            r#"<h2>Mood Insight</h2><p class="subtitle">Insights appear once enough moods are logged.</p>"#,
        ),
    }

    if let Some(stats) = &view.statistics {
        let _ = write!(
            html,
            r#"<div class="stats">
  <div class="inset"><span class="label">Entries</span><span class="value">{count}</span></div>
  <div class="inset"><span class="label">Average</span><span class="value">{average:.1}</span></div>
"#,
            count = stats.entries_count,
            average = stats.average_mood,
        );
        for (label, extreme) in [("Best day", &stats.highest_mood), ("Toughest day", &stats.lowest_mood)] {
            if let Some(extreme) = extreme {
                let _ = write!(
                    html,
                    r#"  <div class="inset"><span class="label">{label}</span><span class="value">{value}</span><span class="hint">{date}{place}</span></div>
"#,
                    value = format_points(extreme.value),
                    date = text(&extreme.date),
                    place = extreme
                        .location
                        .as_deref()
                        .map(|place| format!(" · {}", text(place)))
                        .unwrap_or_default(),
                );
            }
        }
        html.push_str("</div>");
    }

    html.push_str("</div>\n</div>");
    html
}

fn render_mood_input() -> String {
    let mut html = String::from(
        r#"<div class="mood-input"><h3>How are you feeling?</h3><div class="mood-options">"#,
    );
    for (score, emoji, label) in MOOD_OPTIONS {
        let _ = write!(
            html,
            r#"<button class="mood-option" type="button" data-value="{value}" title="{label}"><span class="emoji">{emoji}</span><span>{label}</span></button>"#,
            value = to_backend_scale(score),
        );
    }
    html.push_str("</div></div>\n");
    html
}

pub fn render_history_page(
    view: &HistoryResponse,
    trend: Option<&WeeklyMoodTrend>,
    today: NaiveDate,
    avatar: &Avatar,
) -> String {
    let mut html = String::new();
    if let Some(error) = &view.error {
        let _ = write!(html, r#"<div class="banner error">{}</div>"#, text(error));
    }

    let _ = write!(
        html,
        r#"<section class="stats summary">
  <div class="card"><span class="label">Total Entries</span><span class="value">{total}</span></div>
  <div class="card"><span class="label">Prediction Accuracy</span><span class="value mood-great">{accuracy}%</span></div>
  <div class="card"><span class="label">Average Mood</span><span class="value mood-good">{average}</span></div>
</section>
"#,
        total = view.total_entries,
        accuracy = view.accuracy,
        average = view.average_mood,
    );

    if let Some(trend) = trend {
        let points = trend
            .dates
            .iter()
            .zip(&trend.values)
            .map(|(date, value)| format!("{}: {}", text(date), format_points(*value)))
            .collect::<Vec<_>>()
            .join(" · ");
        let _ = write!(
            html,
            r#"<p class="trend">This week your mood is <strong>{trend:?}</strong>. <span class="hint">{points}</span></p>"#,
            trend = trend.trend,
        );
    }

    html.push_str(&render_calendar(today, &view.entries));

    html.push_str(r#"<section class="card"><h3>Recent Mood History</h3><div class="recent">"#);
    let latest = recent(&view.entries, RECENT_COUNT);
    if latest.is_empty() {
        html.push_str(r#"<p class="subtitle">No moods logged yet.</p>"#);
    }
    for entry in latest {
        html.push_str(&render_recent_row(entry));
    }
    html.push_str("</div></section>");

    render_page(Page::History, "Mood History", avatar, &html, "")
}

fn render_calendar(today: NaiveDate, entries: &[ProcessedMoodEntry]) -> String {
    let Some(grid) = month_grid(today.year(), today.month(), entries) else {
        return String::new();
    };

    let mut html = format!(
        r#"<section class="card calendar"><h3>{title}</h3><div class="calendar-grid">"#,
        title = text(&grid.title),
    );
    for weekday in ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"] {
        let _ = write!(html, r#"<div class="weekday">{weekday}</div>"#);
    }

    for cell in &grid.cells {
        let Some(day) = cell else {
            html.push_str(r#"<div class="day empty"></div>"#);
            continue;
        };
        let marker = if day.day == today.day() { " today" } else { "" };
        let _ = write!(html, r#"<div class="day{marker}"><span>{}</span>"#, day.day);
        if let Some(entry) = &day.entry {
            html.push_str(r#"<div class="dots">"#);
            let _ = write!(
                html,
                r#"<span class="dot predicted mood-{}" title="Predicted: {}"></span>"#,
                MoodTheme::from_score(entry.predicted_mood).as_str(),
                entry.predicted_mood,
            );
            if let Some(actual) = entry.actual_mood {
                let _ = write!(
                    html,
                    r#"<span class="dot actual mood-{}" title="Actual: {actual}"></span>"#,
                    MoodTheme::from_score(actual).as_str(),
                );
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");
    }

    html.push_str(
        r#"</div><div class="legend"><span><span class="dot predicted"></span>Predicted</span><span><span class="dot actual"></span>Actual</span></div></section>"#,
    );
    html
}

fn render_recent_row(entry: &ProcessedMoodEntry) -> String {
    let day = NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d")
        .map(|date| date.format("%A, %b %-d").to_string())
        .unwrap_or_else(|_| entry.date.clone());
    let actual = match entry.actual_mood {
        Some(actual) => format!(" Actual: {actual}"),
        None => " Awaiting your input".to_string(),
    };

    let mut badges = format!(
        r#"<span class="badge mood-{}">P</span>"#,
        MoodTheme::from_score(entry.predicted_mood).as_str()
    );
    if let Some(actual) = entry.actual_mood {
        let _ = write!(
            badges,
            r#"<span class="badge mood-{}">A</span>"#,
            MoodTheme::from_score(actual).as_str()
        );
    }

    format!(
        r#"<div class="inset row"><div><div class="label">{day}</div><div class="hint">Predicted: {predicted} |{actual}</div></div><div class="badges">{badges}</div></div>"#,
        day = text(&day),
        predicted = entry.predicted_mood,
    )
}

pub fn render_settings_page(settings: &UserSettings, avatar: &Avatar) -> String {
    let preview = match &settings.profile_picture {
        Some(picture) => format!(
            r#"<img class="avatar large" src="{}" alt="Profile picture" />"#,
            attr(picture)
        ),
        None => format!(
            r#"<div class="avatar large">{}</div>"#,
            text(&avatar.initials)
        ),
    };
    let remove = if settings.profile_picture.is_some() {
        r#"<button type="button" id="remove-picture" class="secondary">Remove picture</button>"#
    } else {
        ""
    };

    let content = format!(
        r#"<section class="card settings">
  <h2>Profile</h2>
  <div class="profile-preview">{preview}</div>
  <form id="profile-form">
    <label for="name">Display name</label>
    <input id="name" name="name" type="text" value="{name}" placeholder="Your name" />
    <label for="picture">Profile picture</label>
    <input id="picture" name="picture" type="file" accept="image/*" />
    <div class="actions"><button type="submit">Save</button>{remove}</div>
  </form>
</section>
<div class="status" id="status"></div>"#,
        name = attr(&settings.name),
    );
    render_page(Page::Settings, "Settings", avatar, &content, SETTINGS_SCRIPT)
}

fn render_page(active: Page, title: &str, avatar: &Avatar, content: &str, script: &str) -> String {
    LAYOUT_HTML
        .replace("{{TITLE}}", &text(title))
        .replace("{{SCRIPT}}", script)
        .replace("{{NAV}}", &render_nav(active))
        .replace("{{AVATAR}}", &render_avatar(avatar))
        .replace("{{CONTENT}}", content)
}

fn render_avatar(avatar: &Avatar) -> String {
    match &avatar.picture {
        Some(picture) => format!(
            r#"<img class="avatar" src="{}" alt="{}" />"#,
            attr(picture),
            attr(&avatar.initials)
        ),
        None => format!(r#"<div class="avatar">{}</div>"#, text(&avatar.initials)),
    }
}

fn render_nav(active: Page) -> String {
    let mut nav = String::from(r#"<nav class="navigation">"#);
    for page in Page::ALL {
        let class = if page == active { " class=\"active\"" } else { "" };
        let _ = write!(nav, r#"<a href="{}"{class}>{}</a>"#, page.path(), page.label());
    }
    nav.push_str("</nav>");
    nav
}

fn format_points(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

const LAYOUT_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg: #eef0f8;
      --ink: #2b2a33;
      --muted: #6f6a7d;
      --accent: #9333ea;
      --card: #f3f4fb;
      --raised: 8px 8px 16px rgba(163, 167, 196, 0.45), -8px -8px 16px rgba(255, 255, 255, 0.9);
      --sunken: inset 4px 4px 8px rgba(163, 167, 196, 0.4), inset -4px -4px 8px rgba(255, 255, 255, 0.9);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Trebuchet MS", sans-serif;
      padding: 24px 18px 96px;
    }

    main {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    h1 {
      margin: 0;
      color: var(--accent);
      font-size: 1.6rem;
    }

    h2, h3 {
      margin: 0 0 8px;
      color: var(--accent);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 24px;
    }

    .card {
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--raised);
      padding: 24px;
    }

    .inset {
      border-radius: 16px;
      box-shadow: var(--sunken);
      padding: 12px 14px;
      display: grid;
      gap: 4px;
    }

    .subtitle, .hint {
      margin: 0;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: var(--muted);
    }

    .value {
      font-size: 1.5rem;
      font-weight: 600;
    }

    .avatar {
      width: 40px;
      height: 40px;
      border-radius: 50%;
      background: #ede9fe;
      color: var(--accent);
      display: grid;
      place-items: center;
      font-weight: 600;
      object-fit: cover;
    }

    .avatar.large {
      width: 96px;
      height: 96px;
      font-size: 2rem;
    }

    .ring-wrap {
      display: grid;
      place-items: center;
      margin: 16px 0 4px;
    }

    .mood-rings {
      width: 192px;
      height: 192px;
    }

    .ring-track {
      stroke: rgba(163, 167, 196, 0.25);
    }

    .ring-score {
      font-size: 44px;
      font-weight: 700;
    }

    .ring-caption {
      text-align: center;
      color: var(--muted);
      margin: 0 0 16px;
    }

    .factors, .stats, .recent {
      display: grid;
      gap: 12px;
    }

    .stats {
      grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
      margin-top: 16px;
    }

    .factor {
      grid-template-columns: 14px 1fr auto;
      align-items: center;
    }

    .swatch {
      width: 12px;
      height: 12px;
      border-radius: 50%;
    }

    .mood-options {
      display: grid;
      grid-template-columns: repeat(5, 1fr);
      gap: 8px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-weight: 600;
      cursor: pointer;
      background: var(--card);
      color: var(--accent);
      box-shadow: var(--raised);
    }

    button:active, button.selected {
      box-shadow: var(--sunken);
    }

    .mood-option {
      border-radius: 16px;
      display: grid;
      gap: 4px;
      justify-items: center;
      padding: 10px 4px;
      font-size: 0.8rem;
    }

    .mood-option .emoji {
      font-size: 1.6rem;
    }

    .mood-input {
      margin-top: 24px;
    }

    .recommendations {
      display: grid;
      gap: 10px;
      padding-left: 20px;
    }

    .recommendations span {
      display: block;
      color: var(--muted);
    }

    .calendar-grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
    }

    .weekday {
      text-align: center;
      font-size: 0.75rem;
      color: var(--muted);
    }

    .day {
      min-height: 48px;
      border-radius: 12px;
      box-shadow: var(--sunken);
      padding: 6px;
      font-size: 0.8rem;
    }

    .day.empty {
      box-shadow: none;
    }

    .day.today {
      outline: 2px solid var(--accent);
    }

    .dots {
      display: flex;
      gap: 4px;
      margin-top: 4px;
    }

    .dot {
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 50%;
      background: #d1d5db;
    }

    .dot.actual {
      border: 2px solid white;
    }

    .legend {
      display: flex;
      gap: 16px;
      margin-top: 12px;
      font-size: 0.8rem;
      color: var(--muted);
    }

    .row {
      grid-template-columns: 1fr auto;
      align-items: center;
    }

    .badges {
      display: flex;
      gap: 6px;
    }

    .badge {
      width: 24px;
      height: 24px;
      border-radius: 50%;
      display: grid;
      place-items: center;
      color: white;
      font-size: 0.75rem;
    }

    .mood-great { color: #22c55e; }
    .mood-good { color: #3b82f6; }
    .mood-neutral { color: #eab308; }
    .mood-low { color: #f97316; }
    .mood-poor { color: #ef4444; }
    .dot.mood-great, .badge.mood-great { background: #22c55e; }
    .dot.mood-good, .badge.mood-good { background: #3b82f6; }
    .dot.mood-neutral, .badge.mood-neutral { background: #eab308; }
    .dot.mood-low, .badge.mood-low { background: #f97316; }
    .dot.mood-poor, .badge.mood-poor { background: #ef4444; }

    .banner {
      border-radius: 16px;
      padding: 12px 16px;
      margin-bottom: 16px;
    }

    .banner.error {
      background: #fee2e2;
      color: #b91c1c;
    }

    .banner.warn {
      background: #fef3c7;
      color: #92400e;
    }

    .settings form {
      display: grid;
      gap: 10px;
      max-width: 420px;
    }

    .settings input[type="text"] {
      border: none;
      border-radius: 12px;
      padding: 12px;
      box-shadow: var(--sunken);
      background: var(--card);
      font: inherit;
    }

    .actions {
      display: flex;
      gap: 12px;
    }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .navigation {
      position: fixed;
      left: 50%;
      bottom: 16px;
      transform: translateX(-50%);
      display: flex;
      gap: 6px;
      padding: 6px;
      border-radius: 999px;
      background: var(--card);
      box-shadow: var(--raised);
    }

    .navigation a {
      padding: 10px 16px;
      border-radius: 999px;
      color: var(--muted);
      text-decoration: none;
      font-weight: 600;
    }

    .navigation a.active {
      color: var(--accent);
      box-shadow: var(--sunken);
    }
  </style>
</head>
<body>
  <main>
    <header>
      <h1>{{TITLE}}</h1>
      {{AVATAR}}
    </header>
    {{CONTENT}}
  </main>
  {{NAV}}
  <script>
    const statusEl = document.getElementById('status');

    const setStatus = (message, type) => {
      if (!statusEl) {
        return;
      }
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };
{{SCRIPT}}
  </script>
</body>
</html>
"##;

const DASHBOARD_SCRIPT: &str = r##"
    const root = document.getElementById('dashboard');

    const localDate = () => {
      const now = new Date();
      const month = String(now.getMonth() + 1).padStart(2, '0');
      const day = String(now.getDate()).padStart(2, '0');
      return `${now.getFullYear()}-${month}-${day}`;
    };

    const animateScore = () => {
      const label = root.querySelector('.ring-score');
      if (!label) {
        return;
      }
      const target = Number(label.dataset.score);
      const duration = Number(label.dataset.duration);
      const start = performance.now();
      const step = (now) => {
        const progress = Math.min((now - start) / duration, 1);
        label.textContent = Math.round(target * progress);
        if (progress < 1) {
          requestAnimationFrame(step);
        }
      };
      requestAnimationFrame(step);
    };

    const locate = () => new Promise((resolve) => {
      if (!navigator.geolocation) {
        resolve({ error: 'Geolocation is not supported by your browser' });
        return;
      }
      navigator.geolocation.getCurrentPosition(
        (position) => resolve({
          latitude: position.coords.latitude,
          longitude: position.coords.longitude
        }),
        (error) => resolve({ error: error.message }),
        { enableHighAccuracy: true, timeout: 10000, maximumAge: 60000 }
      );
    });

    const reportLocation = async () => {
      const report = await locate();
      const res = await fetch('/api/location', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(report)
      });
      if (!res.ok) {
        throw new Error('Unable to save location');
      }
    };

    const render = (data) => {
      root.innerHTML = data.html;
      bindMoodButtons();
      animateScore();
    };

    const loadDashboard = async () => {
      const res = await fetch('/api/dashboard');
      if (!res.ok) {
        throw new Error('Unable to load dashboard');
      }
      render(await res.json());
    };

    const submitMood = async (value) => {
      setStatus('Saving...', 'info');
      const res = await fetch('/api/moods', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ value, note: '', date: localDate() })
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      render(await res.json());
      setStatus('Saved', 'ok');
      setTimeout(() => setStatus('', ''), 1200);
    };

    function bindMoodButtons() {
      root.querySelectorAll('.mood-option').forEach((button) => {
        button.addEventListener('click', () => {
          button.classList.add('selected');
          submitMood(Number(button.dataset.value)).catch((err) => setStatus(err.message, 'error'));
        });
      });
    }

    const start = async () => {
      if (root.dataset.locationPending === 'true') {
        await reportLocation().catch((err) => setStatus(err.message, 'error'));
      }
      await loadDashboard();
    };

    bindMoodButtons();
    animateScore();
    start().catch((err) => setStatus(err.message, 'error'));
"##;

const SETTINGS_SCRIPT: &str = r##"
    const form = document.getElementById('profile-form');
    const nameInput = document.getElementById('name');
    const pictureInput = document.getElementById('picture');
    const removeButton = document.getElementById('remove-picture');

    const saveProfile = async (payload) => {
      const res = await fetch('/api/profile', {
        method: 'PUT',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(payload)
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Unable to save profile');
      }
    };

    const uploadPicture = async (file) => {
      const res = await fetch('/api/profile/avatar', {
        method: 'POST',
        headers: { 'content-type': file.type || 'application/octet-stream' },
        body: file
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Unable to upload picture');
      }
    };

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      setStatus('Saving...', 'info');
      const file = pictureInput.files[0];
      saveProfile({ name: nameInput.value })
        .then(() => (file ? uploadPicture(file) : null))
        .then(() => window.location.reload())
        .catch((err) => setStatus(err.message, 'error'));
    });

    if (removeButton) {
      removeButton.addEventListener('click', () => {
        saveProfile({ profilePicture: null })
          .then(() => window.location.reload())
          .catch((err) => setStatus(err.message, 'error'));
      });
    }
"##;
