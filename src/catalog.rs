//! Short bilingual labels for the known PCBS commodity codes.
//!
//! Source names often carry brand and packaging detail; cards and charts
//! show these shorter labels when the code is known.

use crate::i18n::Language;
use crate::models::ProductWithPrices;

/// (code, Arabic, English)
const LABELS: &[(&str, &str, &str)] = &[
    ("011100103", "أرز حبة قصيرة", "Short-grain rice"),
    ("011100107", "أرز حبة طويلة", "Long-grain rice"),
    ("011100301", "خبز كماج", "Ka’maj bread"),
    ("011210102", "لحم عجل طازج", "Fresh veal"),
    ("011210201", "لحم عجل مجمد", "Frozen veal"),
    ("011220102", "دجاج منظف", "Cleaned chicken"),
    ("011420303", "جبنة غنم بيضاء", "White sheep cheese"),
    ("011430001", "بيض دجاج", "Chicken eggs"),
    ("011510203", "زيت الذرة", "Corn oil"),
    ("011510204", "زيت عباد الشمس", "Sunflower oil"),
    ("011520101", "سمنة نباتية", "Vegetable ghee"),
    ("011800105", "سكر", "Sugar"),
    ("011800202", "حلاوة", "Halawa"),
    ("011930206", "طحينية", "Tahini"),
    ("011100604", "قطايف", "Qatayef"),
    ("011101301", "فريكة", "Freekeh"),
    ("011740201", "عدس مجروش", "Cracked lentils"),
    ("011740302", "حمص حب", "Dried chickpeas"),
    ("011210107", "لحم خروف طازج", "Fresh lamb"),
    ("011210203", "لحم خروف مجمد", "Frozen lamb"),
    ("011420105", "لبن رايب", "Laban (raib)"),
];

/// Catalog label for a product code, if the code is known.
pub fn short_label(code: &str, language: Language) -> Option<&'static str> {
    LABELS
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, ar, en)| language.pick(ar, en))
}

/// The catalog label when known, otherwise the loaded name.
pub fn display_name(product: &ProductWithPrices, language: Language) -> &str {
    match short_label(product.id(), language) {
        Some(label) => label,
        None => product.name(),
    }
}

/// Fold text for search: lowercase, drop Arabic diacritics and tatweel, trim.
pub fn normalize_for_search(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !is_arabic_mark(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_arabic_mark(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{0640}')
}
