//! Bot classification.
//!
//! Decides whether a request should receive the synthesized metadata
//! document or the interactive application. The rule is
//!
//! ```text
//! synthesize = (override || (bot_agent && !browser_agent))
//!              && !in_app_agent && !social_referrer && !marker_present
//! ```
//!
//! Exclusions always win over the debug override. Every request that is not
//! synthesized should set the "serve application" marker so the same client
//! keeps getting the application for the marker's lifetime.

use regex::Regex;
use std::sync::LazyLock;

/// Value of the "serve application" marker cookie.
pub const MARKER_VALUE: &str = "app";

/// Crawlers, social preview fetchers and SEO tools.
static BOT_AGENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)bot|crawler|spider|googlebot|bingbot|yahoo|duckduckbot|facebookexternalhit|twitterbot|linkedinbot",
        r"|whatsapp|instagram|slackbot|pinterest|baiduspider|yandex|sogou|exabot|ahrefsbot|semrushbot",
        r"|lighthouse|screaming frog|chrome-lighthouse",
    ))
    .expect("bot agent pattern is valid")
});

/// Conventional desktop and mobile browser tokens.
static BROWSER_AGENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)chrome|firefox|safari|edge|opera|msie|trident").expect("browser pattern is valid")
});

/// In-app browsers of chat and social apps. These pre-fetch links, and the
/// human who taps through right after must get the application.
static IN_APP_AGENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)whatsapp|instagram|fban|fbav|fb_iab|micromessenger|line/").expect("in-app pattern is valid")
});

/// Social network referrers.
static SOCIAL_REFERRER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)facebook|instagram|twitter|linkedin|whatsapp|t\.me|telegram").expect("referrer pattern is valid")
});

/// Request signals relevant to classification.
///
/// A read-only snapshot taken from one request; never stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassificationContext<'a> {
    /// `User-Agent` header, empty when absent.
    pub user_agent: &'a str,
    /// `Referer` header, empty when absent.
    pub referrer: &'a str,
    /// Debug query flag forcing synthesis.
    pub override_flag: bool,
    /// The client already carries the "serve application" marker.
    pub marker_present: bool,
}

/// Individual pattern matches, kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signals {
    pub bot_agent: bool,
    pub browser_agent: bool,
    pub in_app_agent: bool,
    pub social_referrer: bool,
}

/// Classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Serve the synthesized document.
    pub synthesize: bool,
    /// Set the "serve application" marker on the outgoing response.
    pub set_marker: bool,
    pub signals: Signals,
}

/// Classify one request.
pub fn classify(ctx: &ClassificationContext<'_>) -> Decision {
    let signals = Signals {
        bot_agent: BOT_AGENT.is_match(ctx.user_agent),
        browser_agent: BROWSER_AGENT.is_match(ctx.user_agent),
        in_app_agent: IN_APP_AGENT.is_match(ctx.user_agent),
        social_referrer: SOCIAL_REFERRER.is_match(ctx.referrer),
    };

    let wants_snippet = ctx.override_flag || (signals.bot_agent && !signals.browser_agent);
    let excluded = signals.in_app_agent || signals.social_referrer || ctx.marker_present;
    let synthesize = wants_snippet && !excluded;

    Decision { synthesize, set_marker: !synthesize, signals }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOGLEBOT: &str = "Googlebot/2.1 (+http://www.google.com/bot.html)";
    const FACEBOOK: &str = "facebookexternalhit/1.1 (+http://www.facebook.com/externalhit_uatext.php)";
    const CHROME: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
    const WHATSAPP: &str = "WhatsApp/2.23.20.0";
    const FB_IN_APP: &str = "Mozilla/5.0 (iPhone) Mobile/15E148 [FBAN/FBIOS;FBAV/440.0]";
    const INSTAGRAM_IN_APP: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 \
        (KHTML, like Gecko) Mobile/15E148 Instagram 300.0.0.0 (iPhone14,2; iOS 17_0; en_US; en)";

    fn ctx(user_agent: &'static str) -> ClassificationContext<'static> {
        ClassificationContext { user_agent, ..Default::default() }
    }

    #[test]
    fn test_plain_bot_is_synthesized() {
        let decision = classify(&ctx(GOOGLEBOT));
        assert!(decision.synthesize);
        assert!(!decision.set_marker);
        assert!(classify(&ctx(FACEBOOK)).synthesize);
        assert!(classify(&ctx("Slackbot-LinkExpanding 1.0")).synthesize);
    }

    #[test]
    fn test_bot_pattern_is_case_insensitive() {
        assert!(classify(&ctx("SOME-CRAWLER/1.0")).synthesize);
    }

    #[test]
    fn test_bot_with_social_referrer_is_not_synthesized() {
        let context = ClassificationContext { referrer: "https://l.facebook.com/", ..ctx(GOOGLEBOT) };
        let decision = classify(&context);
        assert!(!decision.synthesize);
        assert!(decision.set_marker);
        assert!(decision.signals.social_referrer);
    }

    #[test]
    fn test_marker_always_wins() {
        for agent in [GOOGLEBOT, CHROME, ""] {
            let context = ClassificationContext { marker_present: true, override_flag: true, ..ctx(agent) };
            assert!(!classify(&context).synthesize, "marker ignored for {agent:?}");
        }
    }

    #[test]
    fn test_plain_browser_is_not_synthesized() {
        let decision = classify(&ctx(CHROME));
        assert!(!decision.synthesize);
        assert!(decision.set_marker);
        assert!(decision.signals.browser_agent);
    }

    #[test]
    fn test_browser_token_beats_bot_token() {
        let spoofing = "Mozilla/5.0 (compatible; Bot) Chrome/120.0";
        let decision = classify(&ctx(spoofing));
        assert!(decision.signals.bot_agent);
        assert!(!decision.synthesize);
    }

    #[test]
    fn test_override_forces_synthesis_for_browser() {
        let context = ClassificationContext { override_flag: true, ..ctx(CHROME) };
        assert!(classify(&context).synthesize);
    }

    #[test]
    fn test_exclusions_beat_override() {
        let context =
            ClassificationContext { override_flag: true, referrer: "https://t.me/somechannel", ..ctx(CHROME) };
        assert!(!classify(&context).synthesize);

        let context = ClassificationContext { override_flag: true, ..ctx(WHATSAPP) };
        assert!(!classify(&context).synthesize);
    }

    #[test]
    fn test_in_app_agents_are_not_synthesized() {
        let decision = classify(&ctx(WHATSAPP));
        assert!(decision.signals.bot_agent);
        assert!(decision.signals.in_app_agent);
        assert!(!decision.synthesize);
        assert!(!classify(&ctx(FB_IN_APP)).synthesize);
    }

    #[test]
    fn test_instagram_in_app_browser_gets_application() {
        let decision = classify(&ctx(INSTAGRAM_IN_APP));
        assert!(decision.signals.bot_agent);
        assert!(!decision.signals.browser_agent);
        assert!(decision.signals.in_app_agent);
        assert!(!decision.synthesize);
        assert!(decision.set_marker);
    }

    #[test]
    fn test_empty_agent_is_not_synthesized() {
        let decision = classify(&ClassificationContext::default());
        assert!(!decision.synthesize);
        assert!(decision.set_marker);
    }
}
