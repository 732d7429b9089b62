// Integration tests for the HTTP lap source and the viewer, run against a
// throwaway HTTP stub on the loopback interface.

use std::{
    io::{BufRead, BufReader, Write},
    net::{TcpListener, TcpStream},
    sync::{Arc, mpsc},
    thread,
    time::{Duration, Instant},
};

use lapchart::{
    HttpLapSource, LapForm, LapQuery, LapSource, LapViewer, LapchartError, ViewStatus, load_laps,
};

/// Canned response for one path prefix.
struct Route {
    path: &'static str,
    status_line: &'static str,
    body: &'static str,
}

/// Serves the given routes until the test ends. Returns the base URL and a
/// receiver with every request line the stub saw.
fn start_stub(routes: Vec<Route>) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub");
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let (seen_tx, seen_rx) = mpsc::channel();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { break };
            let request_line = handle(stream, &routes);
            if seen_tx.send(request_line).is_err() {
                break;
            }
        }
    });
    (base_url, seen_rx)
}

fn handle(mut stream: TcpStream, routes: &[Route]) -> String {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();
    // drain headers
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
            break;
        }
    }

    let target = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();
    let (status_line, body) = routes
        .iter()
        .find(|r| target.starts_with(r.path))
        .map(|r| (r.status_line, r.body))
        .unwrap_or(("404 Not Found", r#"{"detail":"Not Found"}"#));

    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).unwrap();
    stream.flush().unwrap();
    request_line.trim().to_string()
}

const LAPS_JSON: &str = r#"[{"lap": 1, "lap_time_sec": 95.512}, {"lap": 2, "lap_time_sec": 85.123}, {"lap": 3, "lap_time_sec": 84.876}, {"lap": 4, "lap_time_sec": 85.0}]"#;
const RACE_JSON: &str = r#"{"EventName": "Italian Grand Prix", "Location": "Monza", "Country": "Italy", "Date": "2023-09-03 15:00:00"}"#;

fn source(base_url: &str) -> HttpLapSource {
    HttpLapSource::new(base_url, Duration::from_secs(5)).unwrap()
}

fn query() -> LapQuery {
    LapQuery::from_form("2023", "Monza", "ver").unwrap()
}

fn wait_for_load(viewer: &mut LapViewer<HttpLapSource>) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while viewer.is_loading() {
        assert!(Instant::now() < deadline, "load did not finish in time");
        viewer.poll();
        thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn test_fetches_laps_with_query_parameters() {
    let (base_url, seen) = start_stub(vec![Route {
        path: "/laps",
        status_line: "200 OK",
        body: LAPS_JSON,
    }]);

    let laps = source(&base_url).laps(&query()).unwrap();
    assert_eq!(laps.len(), 4);
    assert_eq!(laps[2].lap, 3);
    assert_eq!(laps[2].lap_time_sec, 84.876);

    let request = seen.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(request, "GET /laps?year=2023&race=Monza&driver=VER HTTP/1.1");
}

#[test]
fn test_load_includes_race_info_and_stats() {
    let (base_url, _seen) = start_stub(vec![
        Route {
            path: "/laps",
            status_line: "200 OK",
            body: LAPS_JSON,
        },
        Route {
            path: "/race",
            status_line: "200 OK",
            body: RACE_JSON,
        },
    ]);

    let loaded = load_laps(&source(&base_url), &query()).unwrap();
    let stats = loaded.stats.unwrap();
    assert_eq!(stats.fastest, 84.876);
    assert_eq!(stats.slowest, 95.512);
    assert!((stats.median - 85.0615).abs() < 1e-9);
    assert_eq!(loaded.race_info.unwrap().country, "Italy");
}

#[test]
fn test_missing_race_info_is_not_fatal() {
    let (base_url, _seen) = start_stub(vec![Route {
        path: "/laps",
        status_line: "200 OK",
        body: LAPS_JSON,
    }]);

    let loaded = load_laps(&source(&base_url), &query()).unwrap();
    assert_eq!(loaded.series.len(), 4);
    assert!(loaded.race_info.is_none());
}

#[test]
fn test_empty_and_null_bodies_are_no_lap_data() {
    for body in ["[]", "null"] {
        let (base_url, _seen) = start_stub(vec![Route {
            path: "/laps",
            status_line: "200 OK",
            body,
        }]);
        match load_laps(&source(&base_url), &query()) {
            Err(LapchartError::NoLapData) => {}
            other => panic!("Expected NoLapData for {body}, got {:?}", other),
        }
    }
}

#[test]
fn test_malformed_body_is_invalid_response() {
    let (base_url, _seen) = start_stub(vec![Route {
        path: "/laps",
        status_line: "200 OK",
        body: r#"{"laps": "nope"}"#,
    }]);
    match source(&base_url).laps(&query()) {
        Err(LapchartError::InvalidResponse { .. }) => {}
        other => panic!("Expected InvalidResponse, got {:?}", other),
    }
}

#[test]
fn test_server_error_reaches_the_banner() {
    let (base_url, _seen) = start_stub(vec![Route {
        path: "/laps",
        status_line: "500 Internal Server Error",
        body: r#"{"detail":"boom"}"#,
    }]);

    let mut viewer = LapViewer::new(
        Arc::new(source(&base_url)),
        LapForm::new("2023", "Monza", "VER"),
    );
    assert!(viewer.submit());
    wait_for_load(&mut viewer);

    let message = viewer.error_message().unwrap().to_string();
    assert!(message.contains("500"), "{message}");
    assert!(message.ends_with(&format!(
        "Make sure the backend server is running on {base_url}"
    )));
    assert!(viewer.chart().is_none());
    assert!(viewer.stats().is_none());
}

#[test]
fn test_viewer_renders_successful_load() {
    let (base_url, _seen) = start_stub(vec![
        Route {
            path: "/laps",
            status_line: "200 OK",
            body: LAPS_JSON,
        },
        Route {
            path: "/race",
            status_line: "200 OK",
            body: RACE_JSON,
        },
    ]);

    let mut viewer = LapViewer::new(
        Arc::new(source(&base_url)),
        LapForm::new("2023", "Monza", "ver"),
    );
    viewer.submit();
    wait_for_load(&mut viewer);

    assert_eq!(viewer.status(), &ViewStatus::Ready);
    let chart = viewer.visible_chart().unwrap();
    assert_eq!(chart.title, "VER - Italian Grand Prix (Monza, Italy)");
    assert_eq!(chart.points[0], [1., 95.512]);
    assert_eq!(viewer.stats().unwrap().fastest, 84.876);
}

#[test]
fn test_connection_refused_is_reported() {
    // grab a free port and close it again so nothing is listening
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let base_url = format!("http://127.0.0.1:{port}");

    let mut viewer = LapViewer::new(
        Arc::new(source(&base_url)),
        LapForm::new("2023", "Monza", "VER"),
    );
    viewer.submit();
    wait_for_load(&mut viewer);

    let message = viewer.error_message().unwrap();
    assert!(message.starts_with("Failed to load data: "), "{message}");
    assert!(message.contains(&base_url));
}
