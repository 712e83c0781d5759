//! Built-in sample dataset, shown when the published tables cannot be loaded.

use crate::config;
use crate::i18n::Language;
use crate::icons;
use crate::models::{Product, ProductWithPrices, WeeklyPricePoint};

struct SampleProduct {
    id: &'static str,
    name_ar: &'static str,
    name_en: &'static str,
    unit_ar: &'static str,
    unit_en: &'static str,
    reference_price: f64,
    weekly: [f64; 4],
}

const SAMPLE: &[SampleProduct] = &[
    SampleProduct {
        id: "011100103",
        name_ar: "أرز حبة قصيرة",
        name_en: "Short-grain rice",
        unit_ar: "1 كغم",
        unit_en: "1 kg",
        reference_price: 7.5,
        weekly: [7.5, 7.8, 8.0, 7.9],
    },
    SampleProduct {
        id: "011220102",
        name_ar: "دجاج منظف",
        name_en: "Cleaned chicken",
        unit_ar: "1 كغم",
        unit_en: "1 kg",
        reference_price: 14.0,
        weekly: [14.5, 15.0, 13.5, 13.0],
    },
    SampleProduct {
        id: "011430001",
        name_ar: "بيض دجاج",
        name_en: "Chicken eggs",
        unit_ar: "طبق 30 بيضة",
        unit_en: "Tray of 30",
        reference_price: 18.0,
        weekly: [18.0, 18.0, 18.05, 17.95],
    },
    SampleProduct {
        id: "011800105",
        name_ar: "سكر",
        name_en: "Sugar",
        unit_ar: "1 كغم",
        unit_en: "1 kg",
        reference_price: 4.0,
        weekly: [4.2, 4.3, 4.5, 4.6],
    },
    SampleProduct {
        id: "011930206",
        name_ar: "طحينية",
        name_en: "Tahini",
        unit_ar: "1 كغم",
        unit_en: "1 kg",
        reference_price: 22.0,
        weekly: [21.0, 20.5, 20.0, 20.0],
    },
];

/// The fixed sample products, labels resolved for `language`.
///
/// Every product has weeks 1 to 4 and display ranks follow list order.
pub fn sample_products(language: Language) -> Vec<ProductWithPrices> {
    SAMPLE
        .iter()
        .enumerate()
        .map(|(idx, s)| {
            let name = language.pick(s.name_ar, s.name_en).to_string();
            let prices = s
                .weekly
                .iter()
                .enumerate()
                .map(|(week, price)| WeeklyPricePoint {
                    product_id: s.id.to_string(),
                    week_number: week as u32 + 1,
                    price: *price,
                    week_date: None,
                })
                .collect();
            ProductWithPrices {
                product: Product {
                    id: s.id.to_string(),
                    unit: language.pick(s.unit_ar, s.unit_en).to_string(),
                    icon: icons::resolve_icon(config::SENTINEL_ICON, &name),
                    color: icons::resolve_color(config::SENTINEL_COLOR, &name),
                    name,
                    reference_price: s.reference_price,
                    display_order: idx as f64 + 1.0,
                },
                prices,
            }
        })
        .collect()
}
