//! Synthesized document rendering.
//!
//! Produces the lightweight HTML served to crawlers: title, description,
//! Open Graph and Twitter card tags, the compiled stylesheet, a root
//! container holding a server-rendered fragment, and the compiled entry
//! script so a human who lands here can still boot the application.
//!
//! Rendering uses maud, so every interpolated value is HTML-escaped. The
//! only pre-escaped inputs are fragments produced by [`section`] and the
//! inline handoff script.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use seoshell_core::{AppConfig, MARKER_VALUE, PageMetadata};
use std::fmt;

/// Public URL of the request being answered, used for `og:url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUrl {
    pub scheme: String,
    pub host: String,
    /// Original path including the query string, if any.
    pub path_and_query: String,
}

impl fmt::Display for RequestUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.host, self.path_and_query)
    }
}

/// Site-wide settings for the document shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOptions {
    /// Href of the compiled stylesheet.
    pub stylesheet_href: String,
    /// Src of the compiled entry script.
    pub script_src: String,
    /// Cookie the handoff script sets for human visitors.
    pub marker_cookie: String,
    pub marker_max_age_secs: u64,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ShellOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            stylesheet_href: config.stylesheet_href.clone(),
            script_src: config.script_src.clone(),
            marker_cookie: config.marker_cookie.clone(),
            marker_max_age_secs: config.marker_max_age_secs,
        }
    }
}

/// Render a server-side body fragment.
///
/// `<div class="{class}"><h1>{heading}</h1><p>{description}</p>[<img>]</div>`
pub fn section(class: &str, heading: &str, description: &str, image: Option<&str>) -> String {
    let markup: Markup = html! {
        div class=(class) {
            h1 { (heading) }
            p { (description) }
            @if let Some(src) = image {
                img src=(src) alt=(heading);
            }
        }
    };
    markup.into_string()
}

/// Inline script handing a human visitor who followed a social link over
/// to the application: set the marker cookie, then reload once it sticks.
fn handoff_script(options: &ShellOptions) -> String {
    let marker = format!("{}={}", options.marker_cookie, MARKER_VALUE);
    format!(
        r#"(function () {{
  var ua = navigator.userAgent;
  var browser = /chrome|firefox|safari|edge|opera|msie|trident/i;
  var crawler = /bot|crawler|spider|facebook|whatsapp|instagram|linkedin/i;
  var social = /facebook|twitter|instagram|linkedin|whatsapp|t\.me|telegram/i;
  var human = browser.test(ua) && !crawler.test(ua);
  if (human && social.test(document.referrer) && document.cookie.indexOf("{marker}") === -1) {{
    try {{ window.localStorage.setItem("{name}", "{value}"); }} catch (e) {{}}
    document.cookie = "{marker}; max-age={max_age}; path=/; samesite=lax";
    if (document.cookie.indexOf("{marker}") !== -1) {{ window.location.reload(); }}
  }}
}})();"#,
        marker = marker,
        name = options.marker_cookie,
        value = MARKER_VALUE,
        max_age = options.marker_max_age_secs,
    )
}

/// Render the complete synthesized document.
///
/// Deterministic: identical inputs produce identical output. Image tags are
/// emitted if and only if `meta.image` is present.
pub fn document(meta: &PageMetadata, url: &RequestUrl, options: &ShellOptions) -> String {
    let page_url = url.to_string();

    let markup: Markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (meta.title) }
                meta name="description" content=(meta.description);
                meta property="og:title" content=(meta.title);
                meta property="og:description" content=(meta.description);
                meta property="og:type" content="website";
                meta property="og:url" content=(page_url);
                @if let Some(image) = &meta.image {
                    meta property="og:image" content=(image);
                }
                meta name="twitter:card" content="summary_large_image";
                meta name="twitter:title" content=(meta.title);
                meta name="twitter:description" content=(meta.description);
                @if let Some(image) = &meta.image {
                    meta name="twitter:image" content=(image);
                }
                meta name="rendered-for" content="bot";
                link rel="stylesheet" href=(options.stylesheet_href);
                script { (PreEscaped(handoff_script(options))) }
            }
            body {
                div id="root" { (PreEscaped(&meta.body)) }
                script src=(options.script_src) {}
            }
        }
    };

    markup.into_string()
}
