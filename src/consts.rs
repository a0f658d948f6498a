//! Selectors, ids and class names the page markup is expected to provide.

// ── Element ids ─────────────────────────────────────────────────

pub const NAVBAR_ID: &str = "navbar";
pub const HAMBURGER_ID: &str = "hamburger";
pub const NAV_MENU_ID: &str = "nav-menu";
pub const THEME_TOGGLE_ID: &str = "theme-toggle";
pub const BACK_TO_TOP_ID: &str = "back-to-top";
pub const CONTACT_FORM_ID: &str = "contact-form";
pub const CONFIG_SCRIPT_ID: &str = "folio-config";

// ── Selectors ───────────────────────────────────────────────────

pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const SECTION_SELECTOR: &str = "section[id]";
pub const THEME_ICON_SELECTOR: &str = "i";
pub const SUBMIT_BUTTON_SELECTOR: &str = "button[type=\"submit\"]";
pub const SUBTITLE_SELECTOR: &str = ".hero-subtitle";
pub const SKILL_BAR_SELECTOR: &str = ".skill-progress";
pub const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";
pub const RESUME_LINK_SELECTOR: &str = ".resume-download a";

// ── Classes ─────────────────────────────────────────────────────

/// Toggled on hamburger, nav menu and the current nav link.
pub const ACTIVE_CLASS: &str = "active";
/// Added to revealed elements and the shown back-to-top button.
pub const VISIBLE_CLASS: &str = "visible";
pub const SCROLLED_CLASS: &str = "scrolled";
pub const LAZY_CLASS: &str = "lazy";
pub const LOADED_CLASS: &str = "loaded";

pub const LIGHT_ICON_CLASS: &str = "fas fa-moon";
pub const DARK_ICON_CLASS: &str = "fas fa-sun";

// ── Attributes and styles ───────────────────────────────────────

pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const DEFERRED_SRC_ATTRIBUTE: &str = "data-src";
pub const LOADING_LABEL_HTML: &str = "<span class=\"loading\"></span> Sending...";
pub const SKILL_BAR_EMPTY_WIDTH: &str = "0%";
