use crate::cli::WebArgs;
use crate::signal::setup_shutdown_handlers;
use fomezero::config::Config;
use fomezero::dashboard::Dashboard;
use fomezero::engine::Selection;
use fomezero::export::{self, EXPORT_FILE_NAME};
use fomezero::map::MapMarker;
use fomezero::metrics::Summary;
use fomezero::report::{ChartSpec, ReportKind};
use fomezero::table::TableError;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tiny_http::{Header, Method, Response, Server, StatusCode};
use tracing::{debug, error, info, warn};

const INDEX_HTML: &str = include_str!("index.html");
const TICK_INTERVAL_MS: u64 = 150;

#[derive(Serialize)]
struct BasicResponse {
    ok: bool,
    message: Option<String>,
}

#[derive(Serialize)]
struct MetricsResponse {
    #[serde(flatten)]
    summary: Summary,
    widgets: Vec<WidgetView>,
}

#[derive(Serialize)]
struct WidgetView {
    label: &'static str,
    text: String,
}

#[derive(Serialize)]
struct CountriesResponse {
    countries: Vec<String>,
    defaults: Vec<String>,
}

#[derive(Serialize)]
struct ReportInfo {
    slug: &'static str,
    #[serde(flatten)]
    chart: ChartSpec,
}

#[derive(Serialize)]
struct MapResponse {
    markers: Vec<MapMarker>,
}

/// Response built by the router, converted to tiny_http at the edge.
#[derive(Debug)]
struct WebResponse {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
    attachment: Option<&'static str>,
}

impl WebResponse {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        Self {
            status,
            content_type: "application/json; charset=utf-8",
            body: to_json_string(value).into_bytes(),
            attachment: None,
        }
    }

    fn json_error(status: u16, message: impl Into<String>) -> Self {
        Self::json(
            status,
            &BasicResponse {
                ok: false,
                message: Some(message.into()),
            },
        )
    }

    fn html(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body: body.as_bytes().to_vec(),
            attachment: None,
        }
    }

    fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: Vec::new(),
            attachment: None,
        }
    }

    fn table_error(err: TableError) -> Self {
        error!("{}", err.to_string().trim_end());
        Self::json_error(500, err.to_string())
    }
}

struct WebState {
    dashboard: Dashboard,
    defaults: Selection,
}

impl WebState {
    fn new(config: &Config) -> Self {
        Self {
            dashboard: Dashboard::new(config.data.clone(), config.cache_size),
            defaults: config.default_countries.iter().cloned().collect(),
        }
    }
}

pub fn run(args: WebArgs, config: &Config) -> Result<(), i32> {
    let host = args.host.unwrap_or_else(|| config.web.host.clone());
    let port = args.port.unwrap_or(config.web.port);

    if args.verbose {
        info!(data = %config.data.display(), "data file");
        info!(countries = ?config.default_countries, "default selection");
        info!(capacity = config.cache_size, "report cache");
    }

    let mut state = WebState::new(config);

    // Fail fast on a missing table instead of serving a page of errors.
    if let Err(err) = state.dashboard.table() {
        eprintln!("{}", err);
        return Err(1);
    }

    let bind_addr = format!("{}:{}", host, port);
    let server = match Server::http(&bind_addr) {
        Ok(server) => server,
        Err(err) => {
            eprintln!("error: Failed to bind web server on {}: {}", bind_addr, err);
            return Err(1);
        }
    };

    let open_host = if host == "0.0.0.0" { "127.0.0.1" } else { &host };
    println!("Fome Zero dashboard started at http://{}:{}/", open_host, port);
    println!("Press Ctrl+C to stop.");

    let shutdown_flag = match setup_shutdown_handlers() {
        Ok(flag) => flag,
        Err(err) => {
            eprintln!("warning: Failed to set signal handlers: {}", err);
            return Err(1);
        }
    };

    while !shutdown_flag.load(Ordering::SeqCst) {
        match server.recv_timeout(Duration::from_millis(TICK_INTERVAL_MS)) {
            Ok(Some(request)) => handle_request(request, &mut state),
            Ok(None) => {}
            Err(err) => {
                eprintln!("error: Web server receive error: {}", err);
                return Err(1);
            }
        }
    }

    let (hits, misses) = state.dashboard.cache_stats();
    info!(hits, misses, "dashboard stopped");
    Ok(())
}

fn handle_request(request: tiny_http::Request, state: &mut WebState) {
    let url = request.url().to_string();
    let response = route(request.method(), &url, state);
    debug!(method = %request.method(), url = %url, status = response.status, "request");

    let mut out = Response::from_data(response.body).with_status_code(StatusCode(response.status));
    if let Ok(header) = Header::from_bytes("Content-Type", response.content_type) {
        out = out.with_header(header);
    }
    if let Some(name) = response.attachment {
        let disposition = format!("attachment; filename=\"{}\"", name);
        if let Ok(header) = Header::from_bytes("Content-Disposition", disposition.as_bytes()) {
            out = out.with_header(header);
        }
    }
    if let Err(err) = request.respond(out) {
        warn!("failed to send response: {}", err);
    }
}

fn route(method: &Method, url: &str, state: &mut WebState) -> WebResponse {
    let (path, query) = split_url_and_query(url);

    if method != &Method::Get {
        return WebResponse::json_error(405, "Method not allowed");
    }

    match path {
        "/" => WebResponse::html(INDEX_HTML),
        "/favicon.ico" => WebResponse::empty(204),
        "/api/metrics" => match state.dashboard.summary() {
            Ok(summary) => WebResponse::json(
                200,
                &MetricsResponse {
                    widgets: summary
                        .widgets()
                        .into_iter()
                        .map(|(label, text)| WidgetView { label, text })
                        .collect(),
                    summary,
                },
            ),
            Err(err) => WebResponse::table_error(err),
        },
        "/api/countries" => match state.dashboard.countries() {
            Ok(countries) => WebResponse::json(
                200,
                &CountriesResponse {
                    countries,
                    defaults: state.defaults.iter().map(str::to_string).collect(),
                },
            ),
            Err(err) => WebResponse::table_error(err),
        },
        "/api/reports" => {
            let catalog: Vec<ReportInfo> = ReportKind::ALL
                .into_iter()
                .map(|kind| ReportInfo {
                    slug: kind.slug(),
                    chart: kind.chart(),
                })
                .collect();
            WebResponse::json(200, &catalog)
        }
        "/api/map" => {
            let selection = selection_from_query(&query, &state.defaults);
            match state.dashboard.markers(&selection) {
                Ok(markers) => WebResponse::json(200, &MapResponse { markers }),
                Err(err) => WebResponse::table_error(err),
            }
        }
        "/api/export" => match export::export_bytes(state.dashboard.data_path()) {
            Ok(body) => WebResponse {
                status: 200,
                content_type: "text/csv; charset=utf-8",
                body,
                attachment: Some(EXPORT_FILE_NAME),
            },
            Err(err) => WebResponse::table_error(err),
        },
        _ => match path.strip_prefix("/api/reports/") {
            Some(slug) => report_response(slug, &query, state),
            None => WebResponse::json_error(404, "Not found"),
        },
    }
}

fn report_response(slug: &str, query: &HashMap<String, String>, state: &mut WebState) -> WebResponse {
    let Some(kind) = ReportKind::from_slug(slug) else {
        let message = match ReportKind::suggest(slug) {
            Some(s) => format!("Unknown report '{}'. Did you mean '{}'?", slug, s),
            None => format!("Unknown report '{}'", slug),
        };
        return WebResponse::json_error(404, message);
    };

    let selection = selection_from_query(query, &state.defaults);
    match state.dashboard.report(kind, &selection) {
        Ok(report) => WebResponse::json(200, &report),
        Err(err) => WebResponse::table_error(err),
    }
}

/// `countries` absent → defaults; present → comma-separated list, where an
/// empty value selects nothing.
fn selection_from_query(query: &HashMap<String, String>, defaults: &Selection) -> Selection {
    match query.get("countries") {
        None => defaults.clone(),
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect(),
    }
}

fn split_url_and_query(url: &str) -> (&str, HashMap<String, String>) {
    if let Some(idx) = url.find('?') {
        (&url[..idx], parse_query_params(&url[idx + 1..]))
    } else {
        (url, HashMap::new())
    }
}

fn parse_query_params(query: &str) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        if let Some((k, v)) = pair.split_once('=') {
            out.insert(percent_decode(k), percent_decode(v));
        } else {
            out.insert(percent_decode(pair), String::new());
        }
    }
    out
}

/// Form-style decoding: `+` is a space, then `%XX` escapes. Invalid UTF-8
/// is replaced rather than rejected.
fn percent_decode(input: &str) -> String {
    let spaced = input.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned(),
    }
}

fn to_json_string<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const DATA: &str = "restaurant_id,restaurant_name,country,city,latitude,longitude,cuisines,currency,average_cost_for_two,color_name,aggregate_rating,votes
1,Cafe A,Brazil,São Paulo,-23.5,-46.6,Brazilian,Brazilian Real(R$),100,green,4.2,10
2,Cafe B,Brazil,São Paulo,-23.5,-46.6,Bar Food,Brazilian Real(R$),50,orange,3.0,20
3,Cafe C,Brazil,Rio,-22.9,-43.2,Seafood,Brazilian Real(R$),80,darkgreen,4.8,30
4,Pub D,England,London,51.5,-0.1,British,Pounds(£),40,green,4.0,5
";

    fn state(dir: &Path) -> WebState {
        let path = dir.join("data.csv");
        fs::write(&path, DATA).unwrap();
        let config = Config {
            data: path,
            ..Config::default()
        };
        WebState::new(&config)
    }

    fn json(response: &WebResponse) -> serde_json::Value {
        serde_json::from_slice(&response.body).unwrap()
    }

    #[test]
    fn test_report_with_explicit_selection() {
        let temp = TempDir::new().unwrap();
        let mut state = state(temp.path());

        let resp = route(
            &Method::Get,
            "/api/reports/top-cities-restaurants?countries=Brazil",
            &mut state,
        );
        assert_eq!(resp.status, 200);

        let body = json(&resp);
        let entries = body["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["city"], "São Paulo");
        assert_eq!(entries[0]["value"], 2);
        assert_eq!(entries[1]["city"], "Rio");
        assert_eq!(body["chart"]["title"], "Top 10 Cities with more restaurants");
    }

    #[test]
    fn test_report_uses_defaults_without_query() {
        let temp = TempDir::new().unwrap();
        let mut state = state(temp.path());

        let resp = route(&Method::Get, "/api/reports/countries-restaurants", &mut state);
        let body = json(&resp);
        let entries = body["entries"].as_array().unwrap();
        // Both Brazil and England are in the default list.
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["country"], "Brazil");
        assert_eq!(entries[0]["value"], 3);
    }

    #[test]
    fn test_empty_countries_selects_nothing() {
        let temp = TempDir::new().unwrap();
        let mut state = state(temp.path());

        let resp = route(&Method::Get, "/api/map?countries=", &mut state);
        assert_eq!(json(&resp)["markers"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_unknown_report_suggests() {
        let temp = TempDir::new().unwrap();
        let mut state = state(temp.path());

        let resp = route(&Method::Get, "/api/reports/most-cusines", &mut state);
        assert_eq!(resp.status, 404);
        let message = json(&resp)["message"].as_str().unwrap().to_string();
        assert!(message.contains("most-cuisines"));
    }

    #[test]
    fn test_metrics_ignore_selection() {
        let temp = TempDir::new().unwrap();
        let mut state = state(temp.path());

        let a = json(&route(&Method::Get, "/api/metrics", &mut state));
        let b = json(&route(&Method::Get, "/api/metrics?countries=England", &mut state));
        assert_eq!(a, b);
        assert_eq!(a["restaurants"], 4);
        assert_eq!(a["widgets"][0]["label"], "Restaurants");
    }

    #[test]
    fn test_export_is_semicolon_attachment() {
        let temp = TempDir::new().unwrap();
        let mut state = state(temp.path());

        let resp = route(&Method::Get, "/api/export?countries=England", &mut state);
        assert_eq!(resp.status, 200);
        assert_eq!(resp.attachment, Some("data.csv"));
        let text = String::from_utf8(resp.body).unwrap();
        assert!(text.starts_with("restaurant_id;restaurant_name;country"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_missing_table_is_server_error() {
        let temp = TempDir::new().unwrap();
        let mut state = state(temp.path());
        fs::remove_file(temp.path().join("data.csv")).unwrap();

        let resp = route(&Method::Get, "/api/metrics", &mut state);
        assert_eq!(resp.status, 500);
        assert_eq!(json(&resp)["ok"], false);
    }

    #[test]
    fn test_post_not_allowed() {
        let temp = TempDir::new().unwrap();
        let mut state = state(temp.path());

        assert_eq!(route(&Method::Post, "/api/metrics", &mut state).status, 405);
        assert_eq!(route(&Method::Get, "/nope", &mut state).status, 404);
    }

    #[test]
    fn test_percent_decoding() {
        let (_, query) = split_url_and_query("/api/map?countries=South%20Africa,S%C3%A3o+Tom%C3%A9&x=%zz");
        assert_eq!(query["countries"], "South Africa,São Tomé");
        assert_eq!(query["x"], "%zz");
    }

    #[test]
    fn test_query_keys_decoded_and_bad_utf8_replaced() {
        let query = parse_query_params("coun%74ries=Brazil&raw=%FF&flag");
        assert_eq!(query["countries"], "Brazil");
        assert_eq!(query["raw"], "\u{FFFD}");
        assert_eq!(query["flag"], "");
    }
}
