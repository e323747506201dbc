//! Record extraction from AniWatch pages.
//!
//! Each page shape is queried by class and attributes rather than by raw
//! text, so attribute order and whitespace in the markup do not matter.

use crate::error::{ProviderError, Result};
use crate::provider::models::{EpisodeItem, PosterItem, ServerItem};
use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ProviderError::Selector(e.to_string()))
}

/// Reads `attr` from the element itself or, failing that, from the first
/// descendant matching `inner`.
fn attr_here_or_within(element: &ElementRef, inner: &Selector, attr: &str) -> Option<String> {
    element
        .value()
        .attr(attr)
        .or_else(|| {
            element
                .select(inner)
                .find_map(|child| child.value().attr(attr))
        })
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Lenient float parsing: `"12"`, `"5.5"`, and `"7 "` parse; so does a
/// numeric prefix like `"3-end"`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<f64>() {
        return n.is_finite().then_some(n);
    }

    let prefix_len = raw
        .char_indices()
        .take_while(|(i, c)| {
            c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+'))
        })
        .map(|(i, c)| i + c.len_utf8())
        .last()?;

    raw[..prefix_len].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `film-poster` blocks on the search page, in page order.
pub fn poster_items(html: &str) -> Result<Vec<PosterItem>> {
    let document = Html::parse_document(html);
    let poster_selector = selector(".film-poster")?;
    let link_selector = selector("a[href]")?;
    let img_selector = selector("img[alt]")?;
    let titled_selector = selector("[title]")?;

    let mut items = Vec::new();

    for poster in document.select(&poster_selector) {
        let Some(href) = attr_here_or_within(&poster, &link_selector, "href") else {
            continue;
        };

        let title = poster
            .select(&img_selector)
            .find_map(|img| img.value().attr("alt"))
            .map(|alt| alt.trim().to_string())
            .filter(|alt| !alt.is_empty())
            .or_else(|| attr_here_or_within(&poster, &titled_selector, "title"));

        match title {
            Some(title) => items.push(PosterItem { href, title }),
            None => log::debug!("Skipping poster without a title: {}", href),
        }
    }

    Ok(items)
}

/// `ep-item` entries on a title page, in page order (not yet sorted).
pub fn episode_items(html: &str) -> Result<Vec<EpisodeItem>> {
    let document = Html::parse_document(html);
    let item_selector = selector(".ep-item")?;
    let link_selector = selector("a[href]")?;
    let number_selector = selector("[data-number]")?;

    let mut items = Vec::new();

    for item in document.select(&item_selector) {
        let Some(href) = attr_here_or_within(&item, &link_selector, "href") else {
            continue;
        };

        let raw_number = attr_here_or_within(&item, &number_selector, "data-number");
        match raw_number.as_deref().and_then(parse_number) {
            Some(number) => items.push(EpisodeItem { href, number }),
            None => log::debug!("Skipping episode {} with number {:?}", href, raw_number),
        }
    }

    Ok(items)
}

/// `server-item` entries on an episode page, in page order. Names are
/// trimmed and lowercased.
pub fn server_items(html: &str) -> Result<Vec<ServerItem>> {
    let document = Html::parse_document(html);
    let item_selector = selector(".server-item")?;
    let id_selector = selector("[data-id]")?;
    let link_selector = selector("a")?;

    let mut items = Vec::new();

    for item in document.select(&item_selector) {
        let Some(server_id) = attr_here_or_within(&item, &id_selector, "data-id") else {
            continue;
        };

        let label = item
            .select(&link_selector)
            .next()
            .unwrap_or(item)
            .text()
            .collect::<String>();

        items.push(ServerItem {
            server_id,
            name: label.trim().to_lowercase(),
        });
    }

    Ok(items)
}
