//! Embedded web dashboard.
//!
//! A synchronous `tiny_http` server that serves:
//! - the single-page dashboard at `/`, `/logs` and `/settings`
//! - JSON endpoints for metrics, filtered logs and the theme setting
//!
//! Requests are handled one at a time on the calling thread, which is all a
//! local single-user dashboard needs and keeps the session state free of
//! locks. Launched via `mockboard serve` (default `http://127.0.0.1:9747`).

mod api;
mod frontend;

use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::config::MockboardConfig;
use crate::dashboard::{Session, Tab};
use crate::settings::{KeyValueStore, SettingsService};

pub(crate) type HttpResponse = Response<Cursor<Vec<u8>>>;

/// Everything a request handler may read or change.
pub struct AppState<S: KeyValueStore> {
    pub config: MockboardConfig,
    pub session: Session,
    pub settings: SettingsService<S>,
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Serve the dashboard on `addr` until the process is stopped.
///
/// A failing handler produces a 500 response; the server keeps running.
pub fn serve<S: KeyValueStore>(addr: &str, mut state: AppState<S>) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("mockboard dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    if state.config.server.open_browser
        && let Err(e) = open_browser(&format!("http://{addr}"))
    {
        eprintln!("[mockboard] {e:#}");
    }

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let body = if matches!(method, Method::Put | Method::Post) {
            read_body(request.as_reader()).map(Some)
        } else {
            Ok(None)
        };

        let resp = match body {
            Ok(body) => match dispatch(&mut state, &method, &url, body.as_deref()) {
                Ok(resp) => resp,
                Err(e) => {
                    crate::journal::record("error", format!("{method} {url}: {e:#}"));
                    error_response(500, &format!("{e:#}"))
                }
            },
            Err(e) => error_response(400, &format!("{e:#}")),
        };
        let _ = request.respond(resp);

        println!(
            "{} {} {}",
            method,
            url,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

/// Largest request body accepted, in bytes.
const MAX_BODY_BYTES: u64 = 64 * 1024;

/// Read a request body as UTF-8, refusing anything over [`MAX_BODY_BYTES`].
fn read_body(reader: &mut dyn Read) -> Result<String> {
    let mut buf = String::new();
    reader
        .take(MAX_BODY_BYTES + 1)
        .read_to_string(&mut buf)
        .context("failed to read request body")?;
    if buf.len() as u64 > MAX_BODY_BYTES {
        anyhow::bail!("request body exceeds {MAX_BODY_BYTES} bytes");
    }
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Route a request to its handler.
pub(crate) fn dispatch<S: KeyValueStore>(
    state: &mut AppState<S>,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> Result<HttpResponse> {
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        (&Method::Get, "/api/metrics") => api::get_metrics(&state.session),
        (&Method::Get, "/api/logs") => api::get_logs(&state.session, url),
        (&Method::Get, "/api/settings") => api::get_settings(state),
        (&Method::Put, "/api/settings/theme") => api::put_theme(state, body.unwrap_or("{}")),
        (&Method::Get, "/api/health") => api::get_health(state),
        (_, p) if p.starts_with("/api/") => Ok(error_response(404, "not found")),

        (&Method::Get, "/index.html") => Ok(serve_frontend(Tab::Dashboard)),
        (&Method::Get, p) if Tab::from_path(p).is_some() => {
            Ok(serve_frontend(Tab::active_for(p)))
        }
        (&Method::Get, _) => Ok(redirect_home()),

        _ => Ok(error_response(405, "method not allowed")),
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn serve_frontend(active: Tab) -> HttpResponse {
    Response::from_data(frontend::render_page(active).into_bytes())
        .with_header(header("Content-Type", "text/html; charset=utf-8"))
        .with_status_code(StatusCode(200))
}

/// Unknown page paths land on the dashboard tab.
fn redirect_home() -> HttpResponse {
    Response::from_data(Vec::new())
        .with_header(header("Location", Tab::Dashboard.path()))
        .with_status_code(StatusCode(302))
}

fn error_response(status: u16, message: &str) -> HttpResponse {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(status))
}

pub(crate) fn content_type_json() -> Header {
    header("Content-Type", "application/json; charset=utf-8")
}

/// Build a header from static parts. Both parts are ASCII literals, so
/// construction cannot fail.
fn header(name: &'static str, value: &'static str) -> Header {
    Header::from_bytes(name.as_bytes(), value.as_bytes())
        .unwrap_or_else(|()| unreachable!("invalid static header {name}"))
}

/// Open a URL in the system browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;
    use crate::settings::MemoryStore;

    pub(super) fn state() -> AppState<MemoryStore> {
        let config = MockboardConfig::default();
        let session = Session::generate(&config, chrono::Utc::now(), &mut SeededRandom::new(5));
        AppState {
            config,
            session,
            settings: SettingsService::load(MemoryStore::default()),
        }
    }

    pub(super) fn body_of(resp: HttpResponse) -> String {
        let mut out = String::new();
        resp.into_reader().read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn tab_paths_serve_the_page() {
        let mut st = state();
        for path in ["/", "/logs", "/settings", "/index.html"] {
            let resp = dispatch(&mut st, &Method::Get, path, None).unwrap();
            assert_eq!(resp.status_code(), StatusCode(200), "{path}");
        }
    }

    #[test]
    fn page_highlights_the_requested_tab() {
        let resp = dispatch(&mut state(), &Method::Get, "/settings", None).unwrap();
        let page = body_of(resp);
        assert!(page.contains(r#"data-tab="settings" class="active""#));
        assert!(!page.contains(r#"data-tab="dashboard" class="active""#));
    }

    #[test]
    fn body_reads_up_to_the_cap() {
        let body = r#"{"theme":"dark"}"#;
        assert_eq!(read_body(&mut Cursor::new(body.as_bytes())).unwrap(), body);

        let exact = vec![b'a'; MAX_BODY_BYTES as usize];
        assert_eq!(read_body(&mut Cursor::new(exact)).unwrap().len(), 64 * 1024);

        let oversized = vec![b'a'; MAX_BODY_BYTES as usize + 1];
        let err = read_body(&mut Cursor::new(oversized)).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn unreadable_body_is_an_error() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("connection reset"))
            }
        }
        let err = read_body(&mut Broken).unwrap_err();
        assert!(format!("{err:#}").contains("connection reset"));

        let not_utf8 = read_body(&mut Cursor::new(vec![0xff, 0xfe]));
        assert!(not_utf8.is_err());
    }

    #[test]
    fn unknown_page_redirects_home() {
        let resp = dispatch(&mut state(), &Method::Get, "/reports", None).unwrap();
        assert_eq!(resp.status_code(), StatusCode(302));
    }

    #[test]
    fn unknown_api_is_404() {
        let resp = dispatch(&mut state(), &Method::Get, "/api/nope", None).unwrap();
        assert_eq!(resp.status_code(), StatusCode(404));
        assert!(body_of(resp).contains("not found"));
    }

    #[test]
    fn wrong_method_is_405() {
        let resp = dispatch(&mut state(), &Method::Delete, "/", None).unwrap();
        assert_eq!(resp.status_code(), StatusCode(405));
    }
}
