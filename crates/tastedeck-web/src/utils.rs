#![forbid(unsafe_code)]

//! Exported page-customization helpers.
//!
//! Stateless DOM mutations; each is a silent no-op when the element it
//! needs is missing.

use js_sys::{Array, Object};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlAnchorElement, HtmlElement, HtmlImageElement, Node};

use tastedeck_core::customize::{self, CONTACT_ROWS, ContactInfo, LogoSpec, style};

const CONTACT_ITEM_SELECTOR: &str = ".contact-item";
const CONTACT_TEXT_SELECTOR: &str = ".contact-text";
const CONTACT_CONTAINER_SELECTOR: &str = ".contact-container";
const SOCIAL_CONTAINER_CLASS: &str = "social-container";
const BRAND_NAME_SELECTOR: &str = ".brand-name";

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn apply_styles(el: &HtmlElement, rules: &[(&str, &str)]) {
    let css = el.style();
    for (prop, value) in rules {
        let _ = css.set_property(prop, value);
    }
}

fn create_html<T: JsCast>(document: &Document, tag: &str) -> Option<T> {
    document.create_element(tag).ok()?.dyn_into::<T>().ok()
}

fn set_hover_scale(link: &HtmlElement, event: &str, scale: &'static str) {
    let target = link.clone();
    let handler = Closure::<dyn FnMut()>::new(move || {
        let _ = target.style().set_property("transform", scale);
    });
    let _ = link.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref());
    // The link lives as long as the page.
    handler.forget();
}

/// Rewrite the three contact rows as `Email: ..`, `Phone: ..`, `Location: ..`.
#[wasm_bindgen(js_name = updateContactInfo)]
pub fn update_contact_info(email: &str, phone: &str, location: &str) {
    let Some(document) = document() else {
        return;
    };
    let Ok(items) = document.query_selector_all(CONTACT_ITEM_SELECTOR) else {
        return;
    };
    if (items.length() as usize) < CONTACT_ROWS {
        return;
    }
    let lines = ContactInfo::new(email, phone, location).lines();
    for (idx, line) in lines.iter().enumerate() {
        let Some(item) = items
            .item(idx as u32)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        if let Ok(Some(text)) = item.query_selector(CONTACT_TEXT_SELECTOR) {
            text.set_text_content(Some(line.as_str()));
        }
    }
}

/// Append a row of icon links built from a `{ platform: url }` object.
#[wasm_bindgen(js_name = addSocialLinks)]
pub fn add_social_links(links: &JsValue) {
    let Some(document) = document() else {
        return;
    };
    let Some(container) = document.query_selector(CONTACT_CONTAINER_SELECTOR).ok().flatten()
    else {
        return;
    };
    let Some(links) = links.dyn_ref::<Object>() else {
        return;
    };
    let Some(row) = create_html::<HtmlElement>(&document, "div") else {
        return;
    };
    row.set_class_name(SOCIAL_CONTAINER_CLASS);
    apply_styles(&row, style::SOCIAL_ROW);

    let entries = Object::entries(links).iter().filter_map(|entry| {
        let pair = entry.dyn_into::<Array>().ok()?;
        Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
    });
    for link in customize::social_links(entries) {
        let Some(anchor) = create_html::<HtmlAnchorElement>(&document, "a") else {
            continue;
        };
        anchor.set_href(&link.url);
        anchor.set_target("_blank");
        anchor.set_inner_html(link.icon);
        let el: &HtmlElement = anchor.as_ref();
        apply_styles(el, style::SOCIAL_LINK);
        set_hover_scale(el, "mouseenter", style::SOCIAL_LINK_HOVER_SCALE);
        set_hover_scale(el, "mouseleave", style::SOCIAL_LINK_REST_SCALE);
        let _ = row.append_child(&anchor);
    }

    let _ = container.append_child(&row);
}

/// Insert a logo image right before the brand name.
#[wasm_bindgen(js_name = addLogo)]
pub fn add_logo(url: &str, alt: Option<String>) {
    let Some(spec) = LogoSpec::new(url, alt.as_deref()) else {
        return;
    };
    let Some(document) = document() else {
        return;
    };
    let Some(brand) = document.query_selector(BRAND_NAME_SELECTOR).ok().flatten() else {
        return;
    };
    let Some(parent) = brand.parent_node() else {
        return;
    };
    let Some(logo) = create_html::<HtmlImageElement>(&document, "img") else {
        return;
    };
    logo.set_src(&spec.url);
    logo.set_alt(&spec.alt);
    apply_styles(logo.as_ref(), style::LOGO);
    let brand: &Node = &brand;
    let _ = parent.insert_before(&logo, Some(brand));
}
