//! Display rows for catalog items.
//!
//! Price arithmetic stays in `BigDecimal` until the final string so discounts
//! never pick up float noise. Amounts are rounded half-up to two places and
//! grouped with the separators of the display language.

use crate::catalog::{CatalogItem, ItemId};
use crate::i18n::{LabelResolver, Language};
use bigdecimal::{BigDecimal, RoundingMode};
use serde::Serialize;

pub const DEFAULT_CURRENCY: &str = "đ";

const PRICE_SCALE: i64 = 2;

/// `price * (100 - discount) / 100`, rounded half-up to two places.
///
/// Discounts are clamped to `0..=100` so the result never goes negative or
/// above the original price.
pub fn discounted_price(price: &BigDecimal, discount_percent: &BigDecimal) -> BigDecimal {
    let hundred = BigDecimal::from(100);
    let discount = discount_percent.clone().clamp(BigDecimal::from(0), hundred.clone());
    let scaled = price.clone() * (hundred.clone() - discount) / hundred;
    scaled.with_scale_round(PRICE_SCALE, RoundingMode::HalfUp)
}

/// Render `amount` with the grouping and decimal marks of `language`.
///
/// Trailing fractional zeros are dropped: `270000` renders as `270.000` in
/// Vietnamese and `23.70` as `23.7` in English.
pub fn format_amount(amount: &BigDecimal, language: Language) -> String {
    let (group_mark, decimal_mark) = separators(language);
    let rounded = amount.with_scale_round(PRICE_SCALE, RoundingMode::HalfUp);
    let (digits, _) = rounded.as_bigint_and_exponent();
    let rendered = digits.to_string();
    let (negative, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, rendered.as_str()),
    };

    let width = PRICE_SCALE as usize + 1;
    let padded = format!("{unsigned:0>width$}");
    let (int_part, frac_part) = padded.split_at(padded.len() - PRICE_SCALE as usize);
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if negative && (int_part.trim_start_matches('0').len() + frac_part.len()) > 0 {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, group_mark));
    if !frac_part.is_empty() {
        out.push(decimal_mark);
        out.push_str(frac_part);
    }
    out
}

fn separators(language: Language) -> (char, char) {
    match language {
        Language::Vi => ('.', ','),
        Language::En | Language::Ko => (',', '.'),
    }
}

fn group_digits(int_part: &str, mark: char) -> String {
    let trimmed = int_part.trim_start_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
    let mut out = String::with_capacity(trimmed.len() + trimmed.len() / 3);
    for (idx, ch) in trimmed.chars().enumerate() {
        if idx > 0 && (trimmed.len() - idx) % 3 == 0 {
            out.push(mark);
        }
        out.push(ch);
    }
    out
}

/// Badge shown next to discounted prices; `None` when there is no discount.
///
/// The percentage uses the decimal mark of `language` (`-12,5%` in Vietnamese).
pub fn discount_badge(discount_percent: &BigDecimal, language: Language) -> Option<String> {
    (*discount_percent > BigDecimal::from(0))
        .then(|| format!("-{}%", format_amount(discount_percent, language)))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StockStatus {
    InStock(u32),
    SoldOut,
}

impl StockStatus {
    pub fn from_quantity(quantity: u32) -> Self {
        if quantity > 0 {
            StockStatus::InStock(quantity)
        } else {
            StockStatus::SoldOut
        }
    }

    pub fn label(&self, language: Language) -> String {
        match (self, language) {
            (StockStatus::InStock(n), Language::En) => format!("{n} in stock"),
            (StockStatus::InStock(n), Language::Vi) => format!("Còn {n} sản phẩm"),
            (StockStatus::InStock(n), Language::Ko) => format!("{n}개 남음"),
            (StockStatus::SoldOut, Language::En) => "Out of stock".to_string(),
            (StockStatus::SoldOut, Language::Vi) => "Hết hàng".to_string(),
            (StockStatus::SoldOut, Language::Ko) => "품절".to_string(),
        }
    }
}

/// Message shown when a search has no results.
pub fn no_results_message(language: Language) -> &'static str {
    match language {
        Language::En => "No products found",
        Language::Vi => "Không tìm thấy sản phẩm",
        Language::Ko => "상품을 찾을 수 없습니다",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// One display-ready row of a product list.
pub struct Listing {
    pub id: ItemId,
    pub display_name: String,
    pub price: String,
    pub original_price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_badge: Option<String>,
    pub stock: String,
    pub in_stock: bool,
    pub categories: Vec<String>,
}

#[derive(Clone, Debug)]
/// Turns catalog items into `Listing` rows for one language and currency.
pub struct ListingRenderer {
    resolver: LabelResolver,
    language: Language,
    currency: String,
}

impl ListingRenderer {
    pub fn new(resolver: LabelResolver, language: Language, currency: impl Into<String>) -> Self {
        Self {
            resolver,
            language,
            currency: currency.into(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn render(&self, item: &CatalogItem) -> Listing {
        let final_price = discounted_price(&item.price, &item.discount_percent);
        Listing {
            id: item.id,
            display_name: item.display_name.clone(),
            price: self.money(&final_price),
            original_price: self.money(&item.price),
            discount_badge: discount_badge(&item.discount_percent, self.language),
            stock: StockStatus::from_quantity(item.stock_quantity).label(self.language),
            in_stock: item.in_stock(),
            categories: self.resolver.resolve_all(&item.categories, self.language),
        }
    }

    pub fn render_all<'a, I>(&self, items: I) -> Vec<Listing>
    where
        I: IntoIterator<Item = &'a CatalogItem>,
    {
        items.into_iter().map(|item| self.render(item)).collect()
    }

    fn money(&self, amount: &BigDecimal) -> String {
        format!("{}{}", format_amount(amount, self.language), self.currency)
    }
}
