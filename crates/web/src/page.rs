use rand::Rng;
use std::path::Path;

const CACHE_BUST_MARKER: &str = "{{CACHE_BUST}}";

/// Fills the page shell's cache-busting marker so browsers refetch the script.
pub fn render_index(template: &str) -> String {
    let value: u64 = rand::thread_rng().gen_range(1..=29_292_292_929);
    render_index_with(template, value)
}

pub fn render_index_with(template: &str, value: u64) -> String {
    template.replace(CACHE_BUST_MARKER, &value.to_string())
}

pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("css") => "text/css; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// Drops the query string and fragment from a request target.
pub fn route_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}
