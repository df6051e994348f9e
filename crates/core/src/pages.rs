//! Site-wide pages with fixed metadata.
//!
//! Titles are `"<label> - <site>"` (the home page uses the bare site name)
//! and descriptions substitute `{site}` with the configured site name. The
//! home page has no description of its own; it carries the site default.

/// One entry of the static page table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticPage {
    /// Exact, case-sensitive request path.
    pub path: &'static str,
    /// Title prefix; `None` for the home page.
    pub label: Option<&'static str>,
    /// Description template containing `{site}`; `None` means the site default.
    pub description: Option<&'static str>,
}

impl StaticPage {
    /// Rendered page title for the given site name.
    pub fn title(&self, site: &str) -> String {
        match self.label {
            Some(label) => format!("{label} - {site}"),
            None => site.to_string(),
        }
    }

    /// Rendered description for the given site name, if the page has its own.
    pub fn description(&self, site: &str) -> Option<String> {
        self.description.map(|template| template.replace("{site}", site))
    }
}

const fn page(path: &'static str, label: Option<&'static str>, description: &'static str) -> StaticPage {
    StaticPage { path, label, description: Some(description) }
}

/// Static page table, checked in order before any dynamic prefix.
pub const STATIC_PAGES: &[StaticPage] = &[
    StaticPage { path: "/", label: None, description: None },
    page("/register", Some("Register"), "Create an account with {site} to start planning your next adventure."),
    page("/all-destinations", Some("All Destinations"), "Explore our wide range of travel destinations with {site}."),
    page("/all-packages", Some("All Packages"), "Browse our exclusive travel packages for your perfect holiday."),
    page("/group-tour", Some("Group Tours"), "Join our exciting group tours for a memorable travel experience."),
    page(
        "/group-tour-pay-now",
        Some("Pay for Group Tour"),
        "Secure your spot on our group tours with easy payment options.",
    ),
    page("/all-themes", Some("Travel Themes"), "Discover travel themes tailored to your interests with {site}."),
    page("/flight", Some("Book Flights"), "Find and book flights for your travel with {site}."),
    page("/pay-now", Some("Pay Now"), "Complete your booking with secure payment options."),
    page("/pay-now-with-package", Some("Pay for Package"), "Secure your travel package with easy payment options."),
    page("/about-us", Some("About Us"), "Learn more about {site} and our passion for travel."),
    page("/contact-us", Some("Contact Us"), "Get in touch with {site} for travel inquiries and support."),
    page("/Why_choose", Some("Why Choose Us"), "Discover why {site} is your trusted travel partner."),
    page("/disclaimer", Some("Disclaimer"), "Read the disclaimer for {site} services."),
    page("/privacy-policy", Some("Privacy Policy"), "Understand how {site} protects your privacy."),
    page("/cancelation-policy", Some("Cancellation Policy"), "Review the cancellation policy for {site} bookings."),
    page(
        "/terms-and-condition",
        Some("Terms and Conditions"),
        "Read the terms and conditions for using {site} services.",
    ),
    page("/myprofile", Some("My Profile"), "Manage your profile and bookings with {site}."),
];

/// Find the static page registered for `path`.
pub fn lookup(path: &str) -> Option<&'static StaticPage> {
    STATIC_PAGES.iter().find(|page| page.path == path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_unique() {
        let paths: HashSet<_> = STATIC_PAGES.iter().map(|p| p.path).collect();
        assert_eq!(paths.len(), STATIC_PAGES.len());
    }

    #[test]
    fn test_home_title_is_site_name() {
        let home = lookup("/").unwrap();
        assert_eq!(home.title("Aventuras Holidays"), "Aventuras Holidays");
        assert_eq!(home.description("Aventuras Holidays"), None);
    }

    #[test]
    fn test_labelled_title() {
        let page = lookup("/about-us").unwrap();
        assert_eq!(page.title("Acme"), "About Us - Acme");
        assert_eq!(page.description("Acme").as_deref(), Some("Learn more about Acme and our passion for travel."));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(lookup("/Why_choose").is_some());
        assert!(lookup("/why_choose").is_none());
        assert!(lookup("/About-Us").is_none());
    }
}
