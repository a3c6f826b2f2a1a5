//! Reads search rows and offer rows out of marketplace HTML.
//!
//! `scraper::Html` is not `Send`, so every document is parsed and dropped
//! inside these synchronous functions and only owned values leave them.

use crate::config::settings::SelectorSettings;
use crate::domain::model::{CardRef, RawOfferRecord};
use crate::utils::error::{Result, ScanError};
use scraper::{ElementRef, Html, Selector};
use url::Url;

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScanError::SelectorError {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Card rows of a search results page, with detail URLs resolved against `page_url`.
pub fn extract_search_cards(
    html: &str,
    page_url: &Url,
    selectors: &SelectorSettings,
) -> Result<Vec<CardRef>> {
    let card_selector = compile(&selectors.search_card)?;
    let price_selector = compile(&selectors.card_price)?;
    let title_selector = compile(&selectors.card_title)?;
    let link_selector = compile("a[href]")?;

    let document = Html::parse_document(html);
    let mut cards = Vec::new();

    for element in document.select(&card_selector) {
        let href = element
            .value()
            .attr("href")
            .or_else(|| {
                element
                    .select(&link_selector)
                    .next()
                    .and_then(|link| link.value().attr("href"))
            });

        let Some(href) = href else {
            tracing::debug!("Search row without a link, skipping");
            continue;
        };

        let url = match page_url.join(href) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Unusable card link {:?}: {}", href, e);
                continue;
            }
        };

        let title = element
            .select(&title_selector)
            .next()
            .map(|title| collapse_whitespace(&title.text().collect::<String>()))
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| url.to_string());

        let mut card = CardRef::new(title, url.to_string());
        if let Some(price) = element.select(&price_selector).next() {
            card = card.with_listed_price(&price.text().collect::<String>());
        }
        cards.push(card);
    }

    Ok(cards)
}

/// Offer rows currently present in a detail page, in document order.
pub fn extract_offer_rows(html: &str, selectors: &SelectorSettings) -> Result<Vec<RawOfferRecord>> {
    let row_selector = compile(&selectors.offer_row)?;
    let tier_selector = compile(&selectors.tier_region)?;

    let document = Html::parse_document(html);
    Ok(document
        .select(&row_selector)
        .map(|row| offer_record(row, &tier_selector, selectors))
        .collect())
}

fn offer_record(row: ElementRef<'_>, tier_selector: &Selector, selectors: &SelectorSettings) -> RawOfferRecord {
    let attr = |name: &str| row.value().attr(name).map(str::to_string);

    RawOfferRecord {
        identity: attr(&selectors.identity_attribute),
        price: attr(&selectors.price_attribute),
        tier_markup: row.select(tier_selector).next().map(|region| region.inner_html()),
        markup: row.inner_html(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_PAGE: &str = r#"
        <html><body>
          <div class="results">
            <a class="blueprint-search-card" href="/cards/lightning-bolt">
              <span class="blueprint-search-card__title"> Lightning
                 Bolt </span>
              <span class="blueprint-search-card__price text-success">€0.35</span>
            </a>
            <div class="blueprint-search-card">
              <a href="https://www.example.com/cards/opt">Opt</a>
            </div>
            <div class="blueprint-search-card"><span>no link</span></div>
          </div>
        </body></html>
    "#;

    const DETAIL_PAGE: &str = r#"
        <html><body>
          <div class="products-table">
            <table>
              <thead><tr><th>Seller</th></tr></thead>
              <tbody>
                <tr class="products-table__header"><td>Sellers</td></tr>
                <tr id="product_1" gtm-price="5.00"><td>Plain</td></tr>
                <tr id="product_2" gtm-price="4.00">
                  <td class="products-table__zero"><a class="btn btn-success">1-Day</a></td>
                </tr>
                <tr id="product_3" gtm-price="4.50"><td><span class="btn-secondary">Zero</span></td></tr>
              </tbody>
            </table>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_extract_search_cards() {
        let page_url = Url::parse("https://www.example.com/manasearch_results?q=x").unwrap();
        let cards = extract_search_cards(SEARCH_PAGE, &page_url, &SelectorSettings::default()).unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Lightning Bolt");
        assert_eq!(cards[0].url, "https://www.example.com/cards/lightning-bolt");
        assert_eq!(cards[0].currency, "€");
        assert_eq!(cards[0].listed_price.as_deref(), Some("€0.35"));

        assert_eq!(cards[1].url, "https://www.example.com/cards/opt");
        assert_eq!(cards[1].title, "https://www.example.com/cards/opt");
        assert_eq!(cards[1].currency, "");
    }

    #[test]
    fn test_extract_offer_rows() {
        let rows = extract_offer_rows(DETAIL_PAGE, &SelectorSettings::default()).unwrap();

        assert_eq!(rows.len(), 4);
        assert!(!rows[0].has_identity());
        assert_eq!(rows[1].identity.as_deref(), Some("product_1"));
        assert_eq!(rows[1].price.as_deref(), Some("5.00"));
        assert!(rows[1].tier_markup.is_none());

        let tier_markup = rows[2].tier_markup.as_deref().unwrap();
        assert!(tier_markup.contains("btn-success"));

        assert!(rows[3].tier_markup.is_none());
        assert!(rows[3].tier_source().contains("btn-secondary"));
    }

    #[test]
    fn test_page_still_loading_has_no_rows() {
        let rows = extract_offer_rows("<html><body><div class=\"spinner\"></div></body></html>", &SelectorSettings::default())
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_invalid_selector() {
        let selectors = SelectorSettings {
            offer_row: "tr[[".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            extract_offer_rows(DETAIL_PAGE, &selectors),
            Err(ScanError::SelectorError { .. })
        ));
    }
}
