//! Integration tests for the `mvc-api tasks` and `mvc-api heroes` HTTP APIs.
//!
//! Each test starts the server as a child process on a unique port with its
//! own temporary data directory, makes HTTP requests, and verifies the
//! responses and the file left on disk.

use std::io::Read;
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use tempfile::TempDir;

/// Atomic port counter to avoid port conflicts between parallel tests.
/// Base port is derived from process ID so parallel test binaries don't
/// collide on the same port range.
static NEXT_PORT: AtomicU16 = AtomicU16::new(0);
static PORT_INIT: std::sync::Once = std::sync::Once::new();

fn next_port() -> u16 {
    PORT_INIT.call_once(|| {
        let base = 20000 + (std::process::id() as u16 % 20000);
        NEXT_PORT.store(base, Ordering::SeqCst);
    });
    NEXT_PORT.fetch_add(1, Ordering::SeqCst)
}

/// A running server plus the temp dir holding its data file.
struct Server {
    child: Child,
    port: u16,
    data_file: PathBuf,
    _dir: TempDir,
}

impl Drop for Server {
    fn drop(&mut self) {
        self.child.kill().ok();
        self.child.wait().ok();
    }
}

/// Helper: start `mvc-api <service>` with `seed` (if any) as its data file.
fn start_server(service: &str, seed: Option<&str>) -> Server {
    let dir = tempfile::tempdir().expect("temp dir");
    let data_file = dir.path().join("data.txt");
    if let Some(contents) = seed {
        std::fs::write(&data_file, contents).expect("write seed");
    }
    let port = next_port();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mvc-api"));
    cmd.arg(service)
        .arg("--port")
        .arg(port.to_string())
        .arg("--data-file")
        .arg(&data_file)
        .env("MVC_BIND", "127.0.0.1")
        .env("MVC_LOG", "warn");
    // Redirect stdout/stderr to avoid blocking
    cmd.stdout(std::process::Stdio::null());
    cmd.stderr(std::process::Stdio::null());

    let child = cmd.spawn().expect("failed to start mvc-api");
    // Wait for server to be ready by polling the port
    for _ in 0..50 {
        if TcpStream::connect(format!("127.0.0.1:{}", port)).is_ok() {
            break;
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    Server {
        child,
        port,
        data_file,
        _dir: dir,
    }
}

/// Helper: send one HTTP/1.1 request and return (status, body).
fn http(port: u16, method: &str, path: &str, body: Option<&str>) -> (u16, String) {
    let mut stream = TcpStream::connect(format!("127.0.0.1:{}", port)).expect("failed to connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();

    let body = body.unwrap_or("");
    let request = format!(
        "{} {} HTTP/1.1\r\nHost: localhost:{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        method,
        path,
        port,
        body.len(),
        body
    );
    std::io::Write::write_all(&mut stream, request.as_bytes()).expect("failed to write");

    let mut response = String::new();
    let _ = stream.read_to_string(&mut response);

    parse_http_response(&response)
}

/// Parse an HTTP response into (status_code, body).
fn parse_http_response(response: &str) -> (u16, String) {
    let parts: Vec<&str> = response.splitn(2, "\r\n\r\n").collect();
    let headers = parts.first().unwrap_or(&"");
    let body = parts.get(1).unwrap_or(&"").to_string();

    let status = headers
        .lines()
        .next()
        .unwrap_or("")
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(0);

    (status, body)
}

fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("invalid JSON ({e}): {body}"))
}

fn stored(path: &Path) -> serde_json::Value {
    json(&std::fs::read_to_string(path).expect("data file"))
}

const HEROES: &str = r#"[
  {"id": 1, "nombreSuperHeroe": "Spiderman", "nombreReal": "Peter Parker", "edad": 25,
   "planetaOrigen": "Tierra", "debilidad": "Radioactiva",
   "poder": ["Trepar paredes", "Sentido arácnido"], "aliados": ["Ironman"], "enemigos": ["Duende Verde"]},
  {"id": 2, "nombreSuperHeroe": "Ironman", "nombreReal": "Tony Stark", "edad": 45,
   "planetaOrigen": "Tierra", "debilidad": "Dependencia tecnológica",
   "poder": ["Armadura blindada", "Volar"], "aliados": ["Spiderman"], "enemigos": ["Mandarín"]},
  {"id": 3, "nombreSuperHeroe": "Superman", "nombreReal": "Clark Kent", "edad": 35,
   "planetaOrigen": "Krypton", "debilidad": "Kryptonita",
   "poder": ["Vuelo", "Fuerza"], "aliados": [], "enemigos": ["Lex Luthor"]}
]"#;

// ──────────────────────────────────────────────
// Tasks
// ──────────────────────────────────────────────

#[test]
fn tasks_health_returns_200() {
    let server = start_server("tasks", None);
    let (status, body) = http(server.port, "GET", "/health", None);
    assert_eq!(status, 200);
    let v = json(&body);
    assert_eq!(v["status"], "ok");
    assert_eq!(v["service"], "tasks");
}

#[test]
fn tasks_list_empty_without_data_file() {
    let server = start_server("tasks", None);
    let (status, body) = http(server.port, "GET", "/tareas", None);
    assert_eq!(status, 200);
    assert_eq!(json(&body), serde_json::json!([]));
}

#[test]
fn tasks_create_complete_delete_lifecycle() {
    let server = start_server("tasks", None);
    let port = server.port;

    let (status, body) = http(
        port,
        "POST",
        "/tareas",
        Some(r#"{"id": 1, "titulo": "Buy milk", "descripcion": "2%  milk", "completado": false}"#),
    );
    assert_eq!(status, 200, "body: {body}");
    assert_eq!(json(&body)["mensaje"], "Tarea creada con éxito");

    let (_, body) = http(port, "GET", "/tareas", None);
    assert_eq!(
        json(&body),
        serde_json::json!([{"id": 1, "titulo": "Buy milk", "descripcion": "2%  milk", "completado": false}])
    );
    let (_, body) = http(port, "GET", "/tareas/completadas", None);
    assert_eq!(json(&body), serde_json::json!([]));

    let (status, body) = http(port, "PUT", "/tareas/1/completar", None);
    assert_eq!(status, 200);
    assert_eq!(json(&body)["mensaje"], "Tarea marcada como completada");
    let (_, body) = http(port, "GET", "/tareas/completadas", None);
    assert_eq!(json(&body)[0]["completado"], true);

    let (status, body) = http(port, "DELETE", "/tareas/1", None);
    assert_eq!(status, 200);
    assert_eq!(json(&body)["mensaje"], "Tarea eliminada con éxito");
    let (_, body) = http(port, "GET", "/tareas", None);
    assert_eq!(json(&body), serde_json::json!([]));

    assert_eq!(stored(&server.data_file), serde_json::json!([]));
}

#[test]
fn tasks_create_writes_indented_file() {
    let server = start_server("tasks", None);
    let (status, _) = http(
        server.port,
        "POST",
        "/tareas",
        Some(r#"{"id": 7, "titulo": "Write report"}"#),
    );
    assert_eq!(status, 200);

    let text = std::fs::read_to_string(&server.data_file).expect("data file");
    assert!(text.starts_with("[\n  {\n    \"id\": 7,"), "{text}");
    assert_eq!(
        json(&text),
        serde_json::json!([{"id": 7, "titulo": "Write report", "descripcion": "", "completado": false}])
    );
}

#[test]
fn tasks_blank_title_returns_400_and_keeps_file() {
    let seed = r#"[{"id": 1, "titulo": "keep", "descripcion": "", "completado": false}]"#;
    let server = start_server("tasks", Some(seed));

    for title in ["", "   "] {
        let body = format!(r#"{{"id": 2, "titulo": "{title}", "descripcion": "x"}}"#);
        let (status, resp) = http(server.port, "POST", "/tareas", Some(&body));
        assert_eq!(status, 400, "title {title:?}");
        assert_eq!(json(&resp)["mensaje"], "El título de la tarea es obligatorio.");
    }
    assert_eq!(stored(&server.data_file), json(seed));
}

#[test]
fn tasks_duplicate_id_returns_409() {
    let seed = r#"[{"id": 1, "titulo": "first", "descripcion": "", "completado": false}]"#;
    let server = start_server("tasks", Some(seed));

    let (status, body) = http(
        server.port,
        "POST",
        "/tareas",
        Some(r#"{"id": 1, "titulo": "second"}"#),
    );
    assert_eq!(status, 409);
    assert!(json(&body)["mensaje"].as_str().unwrap().contains('1'));
    assert_eq!(stored(&server.data_file), json(seed));
}

#[test]
fn tasks_malformed_body_returns_400() {
    let server = start_server("tasks", None);
    let (status, body) = http(server.port, "POST", "/tareas", Some("{not json"));
    assert_eq!(status, 400);
    assert!(json(&body).get("mensaje").is_some());
}

#[test]
fn tasks_non_numeric_id_returns_400() {
    let server = start_server("tasks", None);
    let (status, body) = http(server.port, "PUT", "/tareas/abc/completar", None);
    assert_eq!(status, 400);
    assert!(json(&body).get("mensaje").is_some());
}

#[test]
fn tasks_complete_unknown_id_is_silent() {
    let seed = r#"[{"id": 1, "titulo": "a", "descripcion": "", "completado": false}]"#;
    let server = start_server("tasks", Some(seed));
    let (status, _) = http(server.port, "PUT", "/tareas/99/completar", None);
    assert_eq!(status, 200);
    assert_eq!(stored(&server.data_file), json(seed));
}

#[test]
fn tasks_delete_removes_duplicates() {
    let seed = r#"[
        {"id": 5, "titulo": "a", "descripcion": "", "completado": false},
        {"id": 6, "titulo": "b", "descripcion": "", "completado": true},
        {"id": 5, "titulo": "c", "descripcion": "", "completado": true}
    ]"#;
    let server = start_server("tasks", Some(seed));
    let (status, _) = http(server.port, "DELETE", "/tareas/5", None);
    assert_eq!(status, 200);

    let (_, body) = http(server.port, "GET", "/tareas", None);
    let tasks = json(&body);
    let tasks = tasks.as_array().expect("array");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], 6);
}

#[test]
fn tasks_corrupt_file_returns_500() {
    let server = start_server("tasks", Some("[{\"id\": 1,"));
    let (status, body) = http(server.port, "GET", "/tareas", None);
    assert_eq!(status, 500);
    assert_eq!(json(&body)["mensaje"], "Error interno del servidor");
}

#[test]
fn tasks_unknown_route_returns_404_envelope() {
    let server = start_server("tasks", None);
    let (status, body) = http(server.port, "GET", "/nada", None);
    assert_eq!(status, 404);
    assert_eq!(json(&body)["mensaje"], "Ruta no encontrada");
}

#[test]
fn tasks_wrong_method_returns_405_envelope() {
    let server = start_server("tasks", None);
    let (status, body) = http(server.port, "GET", "/tareas/5", None);
    assert_eq!(status, 405);
    assert_eq!(json(&body)["mensaje"], "Método no permitido");
}

#[test]
fn tasks_unknown_keys_survive_complete() {
    let seed = r#"[
        {"id": 1, "titulo": "a", "descripcion": "", "completado": false, "prioridad": "alta"},
        {"id": 2, "titulo": "b", "descripcion": "", "completado": false, "prioridad": "baja"}
    ]"#;
    let server = start_server("tasks", Some(seed));
    let (status, _) = http(server.port, "PUT", "/tareas/1/completar", None);
    assert_eq!(status, 200);

    let stored = stored(&server.data_file);
    assert_eq!(stored[0]["completado"], true);
    assert_eq!(stored[0]["prioridad"], "alta");
    assert_eq!(stored[1]["prioridad"], "baja");
}

// ──────────────────────────────────────────────
// Heroes
// ──────────────────────────────────────────────

#[test]
fn heroes_get_by_id() {
    let server = start_server("heroes", Some(HEROES));
    let (status, body) = http(server.port, "GET", "/superheroes/id/2", None);
    assert_eq!(status, 200);
    let hero = json(&body);
    assert_eq!(hero["nombreSuperHeroe"], "Ironman");
    assert_eq!(hero["poder"][1], "Volar");
}

#[test]
fn heroes_get_by_unknown_id_returns_404() {
    let server = start_server("heroes", Some(HEROES));
    let (status, body) = http(server.port, "GET", "/superheroes/id/42", None);
    assert_eq!(status, 404);
    assert_eq!(json(&body)["mensaje"], "Superhéroe no encontrado");
}

#[test]
fn heroes_attribute_search_is_case_insensitive() {
    let server = start_server("heroes", Some(HEROES));
    let (status, body) = http(
        server.port,
        "GET",
        "/superheroes/atributo/nombreSuperHeroe/MAN",
        None,
    );
    assert_eq!(status, 200);
    let names: Vec<String> = json(&body)
        .as_array()
        .expect("array")
        .iter()
        .map(|h| h["nombreSuperHeroe"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Spiderman", "Ironman", "Superman"]);
}

#[test]
fn heroes_attribute_search_without_matches_returns_404() {
    let server = start_server("heroes", Some(HEROES));
    let (status, body) = http(server.port, "GET", "/superheroes/atributo/name/joker", None);
    assert_eq!(status, 404);
    assert_eq!(
        json(&body)["mensaje"],
        "No se encontraron superhéroes con ese atributo"
    );
}

#[test]
fn heroes_unknown_attribute_returns_400() {
    let server = start_server("heroes", Some(HEROES));
    let (status, body) = http(server.port, "GET", "/superheroes/atributo/color/azul", None);
    assert_eq!(status, 400);
    assert!(json(&body)["mensaje"].as_str().unwrap().contains("color"));
}

#[test]
fn heroes_older_than_30_from_earth_with_two_powers() {
    let server = start_server("heroes", Some(HEROES));
    let (status, body) = http(server.port, "GET", "/superheroes/edad/mayorA30", None);
    assert_eq!(status, 200);
    let heroes = json(&body);
    let heroes = heroes.as_array().expect("array");
    assert_eq!(heroes.len(), 1);
    assert_eq!(heroes[0]["nombreSuperHeroe"], "Ironman");
}

#[test]
fn heroes_older_than_30_empty_returns_404() {
    let server = start_server("heroes", Some("[]"));
    let (status, body) = http(server.port, "GET", "/superheroes/edad/mayorA30", None);
    assert_eq!(status, 404);
    assert_eq!(json(&body)["mensaje"], "No se encontraron superhéroes");
}

#[test]
fn heroes_routes_do_not_write() {
    let server = start_server("heroes", Some(HEROES));
    let before = std::fs::read(&server.data_file).expect("data file");
    http(server.port, "GET", "/superheroes/id/1", None);
    http(server.port, "GET", "/superheroes/edad/mayorA30", None);
    assert_eq!(std::fs::read(&server.data_file).expect("data file"), before);
}

#[test]
fn heroes_wrong_method_returns_405_envelope() {
    let server = start_server("heroes", Some(HEROES));
    let (status, body) = http(server.port, "POST", "/superheroes/edad/mayorA30", Some("{}"));
    assert_eq!(status, 405);
    assert_eq!(json(&body)["mensaje"], "Método no permitido");
}

#[test]
fn heroes_extra_attributes_are_returned_and_searchable() {
    let seed = r#"[
      {"id": 1, "nombreSuperHeroe": "Batman", "edad": 40, "planetaOrigen": "Tierra",
       "poder": ["Inteligencia", "Artes marciales"], "genero": "Masculino"},
      {"id": 2, "nombreSuperHeroe": "Rara", "edad": null, "poder": null}
    ]"#;
    let server = start_server("heroes", Some(seed));

    let (status, body) = http(server.port, "GET", "/superheroes/id/1", None);
    assert_eq!(status, 200);
    assert_eq!(json(&body)["genero"], "Masculino");

    let (status, body) = http(server.port, "GET", "/superheroes/atributo/genero/masc", None);
    assert_eq!(status, 200);
    assert_eq!(json(&body)[0]["id"], 1);

    let (status, body) = http(server.port, "GET", "/superheroes/edad/mayorA30", None);
    assert_eq!(status, 200);
    assert_eq!(json(&body).as_array().map(Vec::len), Some(1));
}
