// Scroll-driven chrome: navbar state, mobile menu, smooth anchors,
// active-link highlight, progress bar, back-to-top.

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::dom;
use crate::error::Error;

/// Navbar condenses once the page has scrolled past this.
pub const NAV_SCROLLED_AT: f64 = 60.0;
/// Back-to-top button shows up past this.
pub const BACK_TO_TOP_AT: f64 = 500.0;
/// Anchor jumps land this far above the section, clearing the navbar.
pub const ANCHOR_OFFSET: f64 = 80.0;
/// How far above a section's edge the highlight switches over.
pub const SECTION_PROBE_OFFSET: f64 = 120.0;

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAV_SCROLLED_AT
}

pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_AT
}

/// Progress through the document as a percentage. Zero when the page
/// doesn't scroll at all.
pub fn progress_pct(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let span = scroll_height - client_height;
    if span > 0.0 {
        scroll_top / span * 100.0
    } else {
        0.0
    }
}

pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Which section the viewport is in. When windows overlap the last one
/// in document order wins.
pub fn active_section(spans: &[SectionSpan], scroll_y: f64) -> Option<&str> {
    let mut active = None;
    for span in spans {
        let top = span.top - SECTION_PROBE_OFFSET;
        if scroll_y >= top && scroll_y < top + span.height {
            active = Some(span.id.as_str());
        }
    }
    active
}

pub fn mount() -> Result<(), Error> {
    mount_navbar()?;
    mount_menu()?;
    mount_active_links()?;
    mount_progress()?;
    mount_back_to_top()?;
    Ok(())
}

fn mount_navbar() -> Result<(), Error> {
    let navbar = match dom::optional_element("navbar")? {
        Some(el) => el,
        None => return Ok(()),
    };

    apply_scrolled(&navbar, is_scrolled(dom::scroll_y()))?;
    let window = dom::window()?;
    dom::listen::<Event>(&window, "scroll", move |_| {
        if let Err(err) = apply_scrolled(&navbar, is_scrolled(dom::scroll_y())) {
            log::error!("navbar state update failed: {}", err);
        }
    })
}

fn apply_scrolled(navbar: &Element, scrolled: bool) -> Result<(), Error> {
    if scrolled {
        navbar.class_list().add_1("scrolled").map_err(Error::from)
    } else {
        navbar.class_list().remove_1("scrolled").map_err(Error::from)
    }
}

fn mount_menu() -> Result<(), Error> {
    let nav_toggle = dom::optional_element("navToggle")?;
    let nav_links = dom::optional_query(".nav-links")?;

    if let (Some(toggle), Some(links)) = (nav_toggle.clone(), nav_links.clone()) {
        let toggle_for_handler = toggle.clone();
        dom::listen::<Event>(&toggle, "click", move |_| {
            if let Err(err) = toggle_menu(&toggle_for_handler, &links) {
                log::error!("nav toggle failed: {}", err);
            }
        })?;
    }

    for link in dom::query_all(".nav-link")? {
        let toggle = nav_toggle.clone();
        let links = nav_links.clone();
        let link_el = link.clone();
        dom::listen::<Event>(&link, "click", move |event| {
            let followed = match follow_anchor(&event, &link_el) {
                Ok(followed) => followed,
                Err(err) => {
                    log::error!("nav link scroll failed: {}", err);
                    return;
                }
            };
            if followed {
                if let Err(err) = close_menu(toggle.as_ref(), links.as_ref()) {
                    log::error!("menu close failed: {}", err);
                }
            }
        })?;
    }

    // Remaining anchors (logo, inline links) get the same smooth jump
    // without touching the menu.
    for anchor in dom::query_all("a[href^=\"#\"]")? {
        if anchor.class_list().contains("nav-link") {
            continue;
        }
        if anchor.get_attribute("href").as_deref() == Some("#") {
            continue;
        }
        let anchor_el = anchor.clone();
        dom::listen::<Event>(&anchor, "click", move |event| {
            if let Err(err) = follow_anchor(&event, &anchor_el) {
                log::error!("anchor scroll failed: {}", err);
            }
        })?;
    }

    Ok(())
}

fn toggle_menu(toggle: &Element, links: &Element) -> Result<(), Error> {
    toggle.class_list().toggle("active").map_err(Error::from)?;
    links.class_list().toggle("active").map_err(Error::from)?;
    let body = dom::body()?;
    if links.class_list().contains("active") {
        body.style()
            .set_property("overflow", "hidden")
            .map_err(Error::from)?;
    } else {
        body.style().remove_property("overflow").map_err(Error::from)?;
    }
    Ok(())
}

fn close_menu(toggle: Option<&Element>, links: Option<&Element>) -> Result<(), Error> {
    if let Some(toggle) = toggle {
        toggle.class_list().remove_1("active").map_err(Error::from)?;
    }
    if let Some(links) = links {
        links.class_list().remove_1("active").map_err(Error::from)?;
    }
    dom::body()?.style().remove_property("overflow").map_err(Error::from)?;
    Ok(())
}

/// Smooth-scrolls to the anchor's target if it exists on the page.
/// Returns whether the default jump was replaced.
fn follow_anchor(event: &Event, anchor: &Element) -> Result<bool, Error> {
    let href = match anchor.get_attribute("href") {
        Some(href) => href,
        None => return Ok(false),
    };
    if !href.starts_with('#') || href.len() < 2 {
        return Ok(false);
    }

    // The target is looked up at click time; sections can come and go.
    let target = match dom::document()?.get_element_by_id(&href[1..]) {
        Some(el) => el,
        None => return Ok(false),
    };
    let target = match target.dyn_into::<HtmlElement>() {
        Ok(el) => el,
        Err(_) => return Ok(false),
    };

    event.prevent_default();
    scroll_to_smooth(f64::from(target.offset_top()) - ANCHOR_OFFSET)?;
    Ok(true)
}

#[allow(deprecated)]
fn scroll_to_smooth(top: f64) -> Result<(), Error> {
    let window = dom::window()?;
    let mut options = ScrollToOptions::new();
    options.top(top);
    options.behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
    Ok(())
}

fn mount_active_links() -> Result<(), Error> {
    let sections: Vec<HtmlElement> = dom::query_all("section[id]")?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    let links = dom::query_all(".nav-link")?;
    if sections.is_empty() || links.is_empty() {
        return Ok(());
    }

    if let Err(err) = highlight_active(&sections, &links) {
        log::error!("active link highlight failed: {}", err);
    }
    let window = dom::window()?;
    dom::listen::<Event>(&window, "scroll", move |_| {
        if let Err(err) = highlight_active(&sections, &links) {
            log::error!("active link highlight failed: {}", err);
        }
    })
}

fn highlight_active(sections: &[HtmlElement], links: &[Element]) -> Result<(), Error> {
    // Geometry is read fresh on every pass; layout shifts as images and
    // fonts land.
    let spans: Vec<SectionSpan> = sections
        .iter()
        .filter_map(|section| {
            section.get_attribute("id").map(|id| SectionSpan {
                id,
                top: f64::from(section.offset_top()),
                height: f64::from(section.offset_height()),
            })
        })
        .collect();

    if let Some(active_id) = active_section(&spans, dom::scroll_y()) {
        let wanted = format!("#{}", active_id);
        for link in links {
            link.class_list().remove_1("active").map_err(Error::from)?;
            if link.get_attribute("href").as_deref() == Some(wanted.as_str()) {
                link.class_list().add_1("active").map_err(Error::from)?;
            }
        }
    }
    Ok(())
}

fn mount_progress() -> Result<(), Error> {
    let bar = match dom::optional_html_element("scrollProgress")? {
        Some(el) => el,
        None => return Ok(()),
    };

    let window = dom::window()?;
    dom::listen::<Event>(&window, "scroll", move |_| {
        if let Err(err) = update_progress(&bar) {
            log::error!("scroll progress update failed: {}", err);
        }
    })
}

fn update_progress(bar: &HtmlElement) -> Result<(), Error> {
    let root = dom::document()?
        .document_element()
        .ok_or_else(|| Error::MissingElement("documentElement".to_string()))?;
    let pct = progress_pct(
        f64::from(root.scroll_top()),
        f64::from(root.scroll_height()),
        f64::from(root.client_height()),
    );
    bar.style()
        .set_property("width", &format!("{}%", pct))
        .map_err(Error::from)
}

fn mount_back_to_top() -> Result<(), Error> {
    let button = match dom::optional_element("backToTop")? {
        Some(el) => el,
        None => return Ok(()),
    };

    apply_back_to_top(&button, back_to_top_visible(dom::scroll_y()))?;

    let window = dom::window()?;
    let button_for_scroll = button.clone();
    dom::listen::<Event>(&window, "scroll", move |_| {
        let visible = back_to_top_visible(dom::scroll_y());
        if let Err(err) = apply_back_to_top(&button_for_scroll, visible) {
            log::error!("back-to-top state update failed: {}", err);
        }
    })?;

    dom::listen::<Event>(&button, "click", move |event| {
        event.prevent_default();
        if let Err(err) = scroll_to_smooth(0.0) {
            log::error!("back-to-top scroll failed: {}", err);
        }
    })
}

fn apply_back_to_top(button: &Element, visible: bool) -> Result<(), Error> {
    if visible {
        button.class_list().add_1("visible").map_err(Error::from)
    } else {
        button.class_list().remove_1("visible").map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        active_section, back_to_top_visible, is_scrolled, progress_pct, SectionSpan,
    };

    #[test]
    fn navbar_threshold_is_strict() {
        assert!(!is_scrolled(60.0));
        assert!(is_scrolled(60.1));
        assert!(!is_scrolled(0.0));
    }

    #[test]
    fn back_to_top_threshold_is_strict() {
        assert!(!back_to_top_visible(500.0));
        assert!(back_to_top_visible(500.1));
    }

    #[test]
    fn progress_is_zero_when_nothing_scrolls() {
        assert_eq!(progress_pct(0.0, 800.0, 800.0), 0.0);
        assert_eq!(progress_pct(10.0, 600.0, 800.0), 0.0);
    }

    #[test]
    fn progress_tracks_the_scrollable_span() {
        assert_eq!(progress_pct(0.0, 2000.0, 1000.0), 0.0);
        assert_eq!(progress_pct(500.0, 2000.0, 1000.0), 50.0);
        assert_eq!(progress_pct(1000.0, 2000.0, 1000.0), 100.0);
    }

    fn span(id: &str, top: f64, height: f64) -> SectionSpan {
        SectionSpan {
            id: id.to_string(),
            top,
            height,
        }
    }

    #[test]
    fn active_section_window_is_shifted_up() {
        let spans = vec![span("about", 200.0, 400.0)];
        assert_eq!(active_section(&spans, 79.9), None);
        assert_eq!(active_section(&spans, 80.0), Some("about"));
        assert_eq!(active_section(&spans, 479.9), Some("about"));
        assert_eq!(active_section(&spans, 480.0), None);
    }

    #[test]
    fn contiguous_sections_switch_at_the_boundary() {
        let spans = vec![span("a", 0.0, 600.0), span("b", 600.0, 600.0)];
        assert_eq!(active_section(&spans, 479.9), Some("a"));
        assert_eq!(active_section(&spans, 480.0), Some("b"));
    }

    #[test]
    fn overlapping_windows_give_the_later_section() {
        let spans = vec![span("a", 100.0, 1000.0), span("b", 300.0, 200.0)];
        assert_eq!(active_section(&spans, 250.0), Some("b"));
    }

    #[test]
    fn no_sections_means_no_active_link() {
        assert_eq!(active_section(&[], 500.0), None);
    }
}
