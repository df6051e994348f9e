//! Request dispatcher.
//!
//! Classifies every request that is not a static asset and either hands it
//! to the application (setting the "serve application" marker) or answers
//! with a synthesized metadata document.

use crate::assets;
use crate::error::ServeError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use cookie::{Cookie, SameSite};
use seoshell_client::{RequestUrl, document};
use seoshell_core::{ClassificationContext, MARKER_VALUE, classify, resolve};

/// Caching directive on synthesized documents.
pub const SNIPPET_CACHE_CONTROL: &str = "public, max-age=3600";

/// Query parameter forcing synthesis, for debugging previews.
const OVERRIDE_PARAM: (&str, &str) = ("isBot", "true");

fn header_str<'a>(headers: &'a HeaderMap, name: &header::HeaderName) -> &'a str {
    headers.get(name).and_then(|value| value.to_str().ok()).unwrap_or("")
}

/// `isBot=true` anywhere in the query string.
fn override_requested(query: Option<&str>) -> bool {
    query.is_some_and(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .any(|(key, value)| key == OVERRIDE_PARAM.0 && value == OVERRIDE_PARAM.1)
    })
}

/// Whether any `Cookie` header carries `<name>=app`.
fn has_marker(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .any(|cookie| cookie.name() == name && cookie.value_trimmed() == MARKER_VALUE)
}

/// Public URL of the request as the client saw it.
fn request_url(request: &Request) -> RequestUrl {
    let headers = request.headers();

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("http");

    let host = match header_str(headers, &header::HOST) {
        "" => request.uri().authority().map(|authority| authority.as_str()).unwrap_or("localhost"),
        host => host,
    };

    let path_and_query = request.uri().path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    RequestUrl { scheme: scheme.to_string(), host: host.to_string(), path_and_query: path_and_query.to_string() }
}

/// The "serve application" marker for the `Set-Cookie` header.
fn marker_cookie(state: &AppState) -> Cookie<'static> {
    let config = &state.config;
    let max_age = cookie::time::Duration::try_from(config.marker_max_age()).unwrap_or(cookie::time::Duration::MAX);

    Cookie::build((config.marker_cookie.clone(), MARKER_VALUE))
        .max_age(max_age)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Fallback handler for every non-asset request.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Result<Response, ServeError> {
    let method = request.method();
    if method != Method::GET && method != Method::HEAD {
        return Err(ServeError::MethodNotAllowed(method.to_string()));
    }

    let decision = {
        let headers = request.headers();
        classify(&ClassificationContext {
            user_agent: header_str(headers, &header::USER_AGENT),
            referrer: header_str(headers, &header::REFERER),
            override_flag: override_requested(request.uri().query()),
            marker_present: has_marker(headers, &state.config.marker_cookie),
        })
    };

    let path = request.uri().path().to_string();
    tracing::debug!(
        bot = decision.signals.bot_agent,
        browser = decision.signals.browser_agent,
        in_app = decision.signals.in_app_agent,
        social = decision.signals.social_referrer,
        "signals for {}",
        path
    );
    tracing::info!(path = %path, synthesize = decision.synthesize, "classified request");

    if !decision.synthesize {
        let mut response = match assets::serve_index(&state, request).await {
            Ok(response) => response,
            Err(e) => e.into_response(),
        };
        if decision.set_marker
            && let Ok(cookie) = HeaderValue::from_str(&marker_cookie(&state).to_string())
        {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
        return Ok(response);
    }

    let route = resolve(&path);
    let meta = state.provider.resolve(&route).await;
    let html = document(&meta, &request_url(&request), &state.shell);

    tracing::debug!("synthesized {:?} for {}", meta.title, path);

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8"), (header::CACHE_CONTROL, SNIPPET_CACHE_CONTROL)],
        html,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ASSETS_MISSING_BODY;
    use crate::routes::router;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use seoshell_client::{ContentError, ContentSource};
    use seoshell_core::AppConfig;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;
    use tower::ServiceExt;
    use url::Url;

    const GOOGLEBOT: &str = "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";
    const CHROME: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
    const INDEX_HTML: &str = "<!DOCTYPE html><html><body><div id=\"root\"></div></body></html>";

    /// Serves one theme payload for any URL, counting calls.
    #[derive(Default)]
    struct ThemeSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ContentSource for ThemeSource {
        async fn get_json(&self, url: &Url) -> Result<Value, ContentError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if url.path() != "/api/themes/42" {
                return Err(ContentError::HttpError { status: 404 });
            }
            Ok(json!({"data": {"attributes": {
                "name": "Coastal",
                "description": "",
                "image": {"data": {"attributes": {"url": "/u/c.png"}}}
            }}}))
        }
    }

    fn build_dir(with_index: bool) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("static/css")).unwrap();
        std::fs::write(dir.path().join("static/css/main.css"), "body{}").unwrap();
        if with_index {
            std::fs::write(dir.path().join("index.html"), INDEX_HTML).unwrap();
        }
        dir
    }

    fn app(dir: &TempDir) -> (axum::Router, Arc<ThemeSource>) {
        let config = AppConfig {
            build_dir: dir.path().to_path_buf(),
            content_api_base: "https://cms.example".into(),
            ..Default::default()
        };
        let source = Arc::new(ThemeSource::default());
        let state = AppState::new(config, source.clone()).unwrap();
        (router(state), source)
    }

    fn get(uri: &str, user_agent: &str) -> axum::http::request::Builder {
        Request::builder().uri(uri).header(header::HOST, "example.com").header(header::USER_AGENT, user_agent)
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_bot_gets_synthesized_theme() {
        let dir = build_dir(true);
        let (app, _) = app(&dir);

        let response = app.oneshot(get("/single-theme/42", GOOGLEBOT).body(Body::empty()).unwrap()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(response.headers()[header::CACHE_CONTROL], SNIPPET_CACHE_CONTROL);
        assert!(response.headers().get(header::SET_COOKIE).is_none());

        let html = body_string(response).await;
        assert!(html.contains("<title>Coastal</title>"));
        assert!(html.contains(r#"<meta property="og:image" content="https://cms.example/u/c.png">"#));
        assert!(html.contains("Explore this exciting travel theme with Aventuras Holidays."));
        assert!(html.contains(r#"<meta property="og:url" content="http://example.com/single-theme/42">"#));
    }

    #[tokio::test]
    async fn test_browser_gets_application_and_marker() {
        let dir = build_dir(true);
        let (app, source) = app(&dir);

        let response = app.oneshot(get("/about", CHROME).body(Body::empty()).unwrap()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[&assets::RENDERED_APP], "spa-client");
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
        let marker = Cookie::parse(set_cookie).unwrap();
        assert_eq!(marker.name(), "render_mode");
        assert_eq!(marker.value(), "app");
        assert_eq!(marker.max_age(), Some(cookie::time::Duration::seconds(3600)));
        assert_eq!(marker.path(), Some("/"));
        assert_eq!(marker.http_only(), Some(true));
        assert_eq!(marker.same_site(), Some(SameSite::Lax));
        assert_eq!(body_string(response).await, INDEX_HTML);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_marker_cookie_wins_over_bot_agent() {
        let dir = build_dir(true);
        let (app, _) = app(&dir);

        let request = get("/single-theme/42", GOOGLEBOT)
            .header(header::COOKIE, "theme=dark; render_mode=app")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.headers()[&assets::RENDERED_APP], "spa-client");
    }

    #[tokio::test]
    async fn test_social_referrer_gets_application() {
        let dir = build_dir(true);
        let (app, _) = app(&dir);

        let request = get("/", "facebookexternalhit/1.1")
            .header(header::REFERER, "https://l.facebook.com/")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert!(response.headers().contains_key(&assets::RENDERED_APP));
        assert!(response.headers().contains_key(header::SET_COOKIE));
    }

    #[tokio::test]
    async fn test_override_query_forces_synthesis() {
        let dir = build_dir(true);
        let (app, _) = app(&dir);

        let request =
            get("/about?isBot=true", CHROME).header("x-forwarded-proto", "https").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        let html = body_string(response).await;
        assert!(html.contains(r#"<meta name="rendered-for" content="bot">"#));
        assert!(html.contains(r#"content="https://example.com/about?isBot=true""#));
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found_document_with_200() {
        let dir = build_dir(true);
        let (app, _) = app(&dir);

        let response = app.oneshot(get("/nope/nothing", GOOGLEBOT).body(Body::empty()).unwrap()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("<title>Not Found - Aventuras Holidays</title>"));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_placeholder_with_200() {
        let dir = build_dir(true);
        let (app, _) = app(&dir);

        let response = app.oneshot(get("/single-package/X", GOOGLEBOT).body(Body::empty()).unwrap()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("<title>Package X - Aventuras Holidays</title>"));
    }

    #[tokio::test]
    async fn test_missing_build_is_404() {
        let dir = build_dir(false);
        let (app, _) = app(&dir);

        let response = app.oneshot(get("/", CHROME).body(Body::empty()).unwrap()).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, ASSETS_MISSING_BODY);
    }

    #[tokio::test]
    async fn test_static_assets_skip_classification() {
        let dir = build_dir(true);
        let (app, _) = app(&dir);

        let response = app.oneshot(get("/static/css/main.css", GOOGLEBOT).body(Body::empty()).unwrap()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key(&assets::RENDERED_APP));
        assert_eq!(body_string(response).await, "body{}");
    }

    #[tokio::test]
    async fn test_post_is_rejected() {
        let dir = build_dir(true);
        let (app, _) = app(&dir);

        let request = get("/", CHROME).method(Method::POST).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_repeat_bot_requests_hit_cache() {
        let dir = build_dir(true);
        let (app, source) = app(&dir);

        for _ in 0..3 {
            let request = get("/single-theme/42", GOOGLEBOT).body(Body::empty()).unwrap();
            app.clone().oneshot(request).await.unwrap();
        }

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_has_marker() {
        let mut headers = HeaderMap::new();
        assert!(!has_marker(&headers, "render_mode"));

        headers.insert(header::COOKIE, HeaderValue::from_static("a=1; render_mode=spa"));
        assert!(!has_marker(&headers, "render_mode"));

        headers.append(header::COOKIE, HeaderValue::from_static("render_mode=app"));
        assert!(has_marker(&headers, "render_mode"));

        let mut quoted = HeaderMap::new();
        quoted.insert(header::COOKIE, HeaderValue::from_static("theme=dark;render_mode=\"app\""));
        assert!(has_marker(&quoted, "render_mode"));
    }

    #[test]
    fn test_marker_cookie_follows_config() {
        let dir = build_dir(true);
        let config = AppConfig {
            build_dir: dir.path().to_path_buf(),
            marker_cookie: "mode".into(),
            marker_max_age_secs: 90,
            ..Default::default()
        };
        let state = AppState::new(config, Arc::new(ThemeSource::default())).unwrap();

        let marker = marker_cookie(&state);
        assert_eq!(marker.name(), "mode");
        assert_eq!(marker.value(), MARKER_VALUE);
        assert_eq!(marker.max_age(), Some(cookie::time::Duration::seconds(90)));
        assert_eq!(marker.path(), Some("/"));
        assert_eq!(marker.http_only(), Some(true));
        assert_eq!(marker.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn test_override_requested() {
        assert!(override_requested(Some("isBot=true")));
        assert!(override_requested(Some("a=1&isBot=true")));
        assert!(!override_requested(Some("isBot=false")));
        assert!(!override_requested(Some("isbot=true")));
        assert!(!override_requested(None));
    }

    #[test]
    fn test_request_url_defaults() {
        let request = Request::builder().uri("/x?y=1").body(Body::empty()).unwrap();
        let url = request_url(&request);
        assert_eq!(url.to_string(), "http://localhost/x?y=1");
    }
}
