#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use recipe_box::config::Config;
use recipe_box::db::{self, RecipeStorage};
use recipe_box::router::{RecipeState, recipe_router};
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

pub const BOUNDARY: &str = "recipe-box-test-boundary";

/// A router over a throwaway SQLite file and upload directory.
pub struct TestApp {
    pub app: Router,
    pub storage: RecipeStorage,
    pub db_path: PathBuf,
    pub upload_dir: PathBuf,
}

impl TestApp {
    pub async fn spawn(label: &str) -> Self {
        Self::spawn_with(label, |_| {}).await
    }

    pub async fn spawn_with(label: &str, tweak: impl FnOnce(&mut Config)) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let stem = format!("recipe-box-{label}-{}-{nanos}", std::process::id());
        let db_path = std::env::temp_dir().join(format!("{stem}.sqlite"));
        let upload_dir = std::env::temp_dir().join(format!("{stem}-uploads"));

        let mut cfg = Config::default();
        cfg.storage.database_url = format!("sqlite:{}", db_path.display());
        cfg.storage.upload_dir = upload_dir.clone();
        tweak(&mut cfg);

        let pool = db::connect(&cfg.storage.database_url)
            .await
            .expect("failed to open database");
        let storage = RecipeStorage::new(pool);
        storage.init_schema().await.expect("failed to init schema");

        let state = RecipeState::new(storage.clone(), &cfg);
        state.images.ensure_dir().await.expect("failed to create upload dir");
        let app = recipe_router(state);

        Self {
            app,
            storage,
            db_path,
            upload_dir,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(req).await.expect("request failed")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
    }

    pub async fn post_empty(&self, uri: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
    }

    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(urlencode(fields)))
                .expect("failed to build request"),
        )
        .await
    }

    pub async fn post_multipart(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        image: Option<(&str, &[u8])>,
    ) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body(fields, image)))
                .expect("failed to build request"),
        )
        .await
    }

    pub fn cleanup(self) {
        let _ = fs::remove_file(&self.db_path);
        let _ = fs::remove_dir_all(&self.upload_dir);
    }
}

pub fn recipe_fields<'a>(
    title: &'a str,
    cuisine: &'a str,
    category: &'a str,
) -> Vec<(&'a str, &'a str)> {
    vec![
        ("title", title),
        ("cuisine", cuisine),
        ("category", category),
        ("ingredients", "flour\nsugar\neggs"),
        ("steps", "mix\nbake"),
    ]
}

pub fn urlencode(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(s: &str) -> String {
    let mut out = String::new();
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

pub fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    let (filename, bytes) = image.unwrap_or(("", b""));
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn body_string(resp: Response<Body>) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("missing Location header")
}
