mod api;
mod page;

use anyhow::Context;
use api::{apply_action, build_response, ActionRequest, ApiResponse, AppState};
use pairmatch_core::{parse_seed, AssetManifest};
use pairmatch_data::resolve_game_config;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tiny_http::{Header, Method, Response, Server, StatusCode};

struct ServerOptions {
    addr: String,
    assets: PathBuf,
    config: Option<PathBuf>,
    web_root: PathBuf,
    seed: Option<u64>,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:7878".to_string(),
            assets: PathBuf::from("assets"),
            config: None,
            web_root: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("..")
                .join("..")
                .join("web"),
            seed: None,
        }
    }
}

struct Shared {
    app: Mutex<AppState>,
    manifest: AssetManifest,
    assets: PathBuf,
    web_root: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_options(&args);

    let config = resolve_game_config(options.config.as_deref(), &options.assets)
        .context("load game config")?;
    let manifest = AssetManifest::for_config(&config);
    let app = AppState::new(config, options.seed).context("deal first round")?;
    let server = Server::http(options.addr.as_str())
        .map_err(|err| anyhow::anyhow!("{err}"))
        .with_context(|| format!("bind {}", options.addr))?;
    log::info!("pairmatch web server on http://{}", options.addr);

    let shared = Arc::new(Shared {
        app: Mutex::new(app),
        manifest,
        assets: options.assets,
        web_root: options.web_root,
    });
    for request in server.incoming_requests() {
        if let Err(err) = handle_request(request, &shared) {
            log::warn!("request error: {err:#}");
        }
    }
    Ok(())
}

fn parse_options(args: &[String]) -> ServerOptions {
    let mut options = ServerOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        let value = args.get(idx + 1).cloned();
        match (args[idx].as_str(), value) {
            ("--addr", Some(value)) => options.addr = value,
            ("--assets", Some(value)) => options.assets = PathBuf::from(value),
            ("--config", Some(value)) => options.config = Some(PathBuf::from(value)),
            ("--web-root", Some(value)) => options.web_root = PathBuf::from(value),
            ("--seed", Some(value)) => {
                options.seed = parse_seed(&value);
                if options.seed.is_none() {
                    log::warn!("ignoring unparseable seed {value}");
                }
            }
            (other, _) => {
                log::warn!("ignoring argument {other}");
                idx += 1;
                continue;
            }
        }
        idx += 2;
    }
    options
}

fn handle_request(mut request: tiny_http::Request, shared: &Shared) -> anyhow::Result<()> {
    let url = request.url().to_string();
    let path = page::route_path(&url);
    match (request.method(), path) {
        (&Method::Get, "/") | (&Method::Get, "/index.html") => {
            let template = std::fs::read_to_string(shared.web_root.join("index.html"))
                .context("read index.html")?;
            let body = page::render_index(&template);
            respond_bytes(request, body.into_bytes(), "text/html; charset=utf-8")?;
        }
        (&Method::Get, "/app.js") | (&Method::Get, "/styles.css") => {
            let file = shared.web_root.join(path.trim_start_matches('/'));
            respond_with_file(request, &file)?;
        }
        (&Method::Get, "/api/manifest") => {
            let body = serde_json::to_vec_pretty(&shared.manifest)?;
            respond_bytes(request, body, "application/json")?;
        }
        (&Method::Get, "/api/state") => {
            let response = {
                let mut guard = lock(shared);
                guard.tick();
                build_response(&mut guard, None)
            };
            respond_json(request, response)?;
        }
        (&Method::Post, "/api/action") => {
            let mut body = String::new();
            request.as_reader().read_to_string(&mut body)?;
            let response = {
                let mut guard = lock(shared);
                guard.tick();
                let err = match serde_json::from_str::<ActionRequest>(&body) {
                    Ok(action) => apply_action(&mut guard, action),
                    Err(err) => Some(format!("bad request: {err}")),
                };
                build_response(&mut guard, err)
            };
            respond_json(request, response)?;
        }
        (&Method::Get, _) if path.starts_with("/assets/") => {
            let name = &path["/assets/".len()..];
            if shared.manifest.by_file_name(name).is_some() {
                respond_with_file(request, &shared.assets.join(name))?;
            } else {
                request.respond(Response::empty(StatusCode(404)))?;
            }
        }
        _ => {
            request.respond(Response::empty(StatusCode(404)))?;
        }
    }
    Ok(())
}

fn lock(shared: &Shared) -> MutexGuard<'_, AppState> {
    shared
        .app
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn respond_with_file(request: tiny_http::Request, path: &Path) -> anyhow::Result<()> {
    match std::fs::read(path) {
        Ok(content) => respond_bytes(request, content, page::content_type_for(path)),
        Err(err) => {
            log::debug!("missing file {}: {err}", path.display());
            request.respond(Response::empty(StatusCode(404)))?;
            Ok(())
        }
    }
}

fn respond_bytes(
    request: tiny_http::Request,
    content: Vec<u8>,
    content_type: &str,
) -> anyhow::Result<()> {
    let header = Header::from_bytes(&b"Content-Type"[..], content_type)
        .map_err(|_| anyhow::anyhow!("invalid content type {content_type}"))?;
    request.respond(Response::from_data(content).with_header(header))?;
    Ok(())
}

fn respond_json(request: tiny_http::Request, response: ApiResponse) -> anyhow::Result<()> {
    let body = serde_json::to_vec_pretty(&response)?;
    respond_bytes(request, body, "application/json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_server_flags() {
        let options = parse_options(&args(&[
            "--addr",
            "127.0.0.1:9000",
            "--seed",
            "5",
            "--verbose",
            "--assets",
            "art",
        ]));
        assert_eq!(options.addr, "127.0.0.1:9000");
        assert_eq!(options.seed, Some(5));
        assert_eq!(options.assets, PathBuf::from("art"));
        assert_eq!(options.config, None);
    }

    #[test]
    fn seed_accepts_hex_and_drops_garbage() {
        assert_eq!(parse_options(&args(&["--seed", "0x2a"])).seed, Some(42));
        assert_eq!(parse_options(&args(&["--seed", "nope"])).seed, None);
    }
}
