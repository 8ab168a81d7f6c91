// src/infrastructure/discovery/microformats.rs
//! Client metadata embedded in HTML as an `h-app` (or `h-x-app`) item.
use crate::domain::authorization::ClientMetadata;
use scraper::{ElementRef, Html};
use url::Url;

const APP_TYPES: [&str; 2] = ["h-app", "h-x-app"];
const REDIRECT_REL: &str = "redirect_uri";

/// Extract client metadata from `html` served at `client_id`.
///
/// Only the first top-level app item is read. Missing properties are left
/// empty and every `rel="redirect_uri"` link in the page is collected.
pub fn metadata_from_html(html: &str, client_id: &str) -> ClientMetadata {
    let base = Url::parse(client_id).ok();
    let document = Html::parse_document(html);

    let mut metadata = ClientMetadata {
        client_id: client_id.to_owned(),
        ..ClientMetadata::default()
    };

    if let Some(app) = first_app(&document) {
        let properties = AppProperties::collect(app, base.as_ref());
        metadata.client_name = properties
            .name
            .or_else(|| (!properties.has_explicit_p).then(|| implied_name(app)))
            .unwrap_or_default();
        metadata.logo_uri = properties.logo.unwrap_or_default();
        metadata.client_uri = properties
            .url
            .or_else(|| implied_url(app, base.as_ref()))
            .unwrap_or_default();
    }

    metadata.redirect_uris = redirect_uris(&document, base.as_ref());
    metadata
}

fn is_root(element: ElementRef<'_>) -> bool {
    element.value().classes().any(|class| class.starts_with("h-"))
}

fn is_app(element: ElementRef<'_>) -> bool {
    element
        .value()
        .classes()
        .any(|class| APP_TYPES.contains(&class))
}

/// First app item that is not nested inside another item.
fn first_app(document: &Html) -> Option<ElementRef<'_>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|element| {
            is_app(*element)
                && !element
                    .ancestors()
                    .filter_map(ElementRef::wrap)
                    .any(is_root)
        })
}

#[derive(Default)]
struct AppProperties {
    name: Option<String>,
    logo: Option<String>,
    url: Option<String>,
    has_explicit_p: bool,
}

impl AppProperties {
    fn collect(app: ElementRef<'_>, base: Option<&Url>) -> Self {
        let mut properties = Self::default();
        let mut pending: Vec<ElementRef<'_>> = app.children().filter_map(ElementRef::wrap).collect();
        pending.reverse();

        // Depth-first in document order; nested items own their descendants.
        while let Some(element) = pending.pop() {
            if is_root(element) {
                continue;
            }

            for class in element.value().classes() {
                match class {
                    "p-name" => {
                        properties.has_explicit_p = true;
                        properties.name.get_or_insert_with(|| text_value(element));
                    }
                    "u-logo" => {
                        if properties.logo.is_none() {
                            properties.logo = url_value(element, base);
                        }
                    }
                    "u-url" => {
                        if properties.url.is_none() {
                            properties.url = url_value(element, base);
                        }
                    }
                    other if other.starts_with("p-") || other.starts_with("e-") => {
                        properties.has_explicit_p = true;
                    }
                    _ => {}
                }
            }

            let mut children: Vec<_> = element.children().filter_map(ElementRef::wrap).collect();
            children.reverse();
            pending.extend(children);
        }

        properties
    }
}

fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn text_value(element: ElementRef<'_>) -> String {
    let el = element.value();
    let attribute = match el.name() {
        "abbr" | "link" => el.attr("title"),
        "data" | "input" => el.attr("value"),
        "img" | "area" => el.attr("alt"),
        _ => None,
    };

    attribute.map_or_else(|| collapsed_text(element), |value| value.trim().to_owned())
}

fn url_value(element: ElementRef<'_>, base: Option<&Url>) -> Option<String> {
    let el = element.value();
    let raw = match el.name() {
        "a" | "area" | "link" => el.attr("href"),
        "img" | "audio" | "video" | "source" | "iframe" => el.attr("src"),
        "object" => el.attr("data"),
        "data" | "input" => el.attr("value"),
        "abbr" => el.attr("title"),
        _ => None,
    };

    let raw = raw.map_or_else(|| collapsed_text(element), |value| value.trim().to_owned());
    if raw.is_empty() {
        return None;
    }
    Some(resolve(&raw, base))
}

fn implied_name(app: ElementRef<'_>) -> String {
    let el = app.value();
    match el.name() {
        "img" | "area" => el.attr("alt").unwrap_or_default().trim().to_owned(),
        "abbr" => el.attr("title").unwrap_or_default().trim().to_owned(),
        _ => collapsed_text(app),
    }
}

fn implied_url(app: ElementRef<'_>, base: Option<&Url>) -> Option<String> {
    let el = app.value();
    match el.name() {
        "a" | "area" => el.attr("href").map(|href| resolve(href.trim(), base)),
        _ => None,
    }
}

fn resolve(raw: &str, base: Option<&Url>) -> String {
    base.and_then(|base| base.join(raw).ok())
        .map_or_else(|| raw.to_owned(), String::from)
}

fn redirect_uris(document: &Html, base: Option<&Url>) -> Vec<String> {
    let mut uris: Vec<String> = Vec::new();

    for element in document.root_element().descendants().filter_map(ElementRef::wrap) {
        let el = element.value();
        if !matches!(el.name(), "a" | "area" | "link") {
            continue;
        }
        let is_redirect = el
            .attr("rel")
            .is_some_and(|rel| rel.split_whitespace().any(|r| r.eq_ignore_ascii_case(REDIRECT_REL)));
        let Some(href) = el.attr("href").filter(|_| is_redirect) else {
            continue;
        };
        let uri = resolve(href.trim(), base);
        if !uris.contains(&uri) {
            uris.push(uri);
        }
    }

    uris
}
