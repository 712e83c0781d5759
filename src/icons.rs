//! Icon and color tokens for products whose source row leaves them unset.
//!
//! The fallback is a plain rule table: each rule lists bilingual keywords
//! and the tokens to use when one of them occurs in the lowercased product
//! name. Rules are checked top to bottom and the first hit wins, so more
//! specific words sit above the words they contain or co-occur with:
//! tahini above flour, eggs and cheese above the animal they come from,
//! cheese above eggs ("بيضاء", white, contains "بيض").

use crate::config;

/// One keyword rule of the fallback table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconRule {
    pub keywords: &'static [&'static str],
    pub icon: &'static str,
    pub color: &'static str,
}

impl IconRule {
    /// Whether any keyword occurs in an already-lowercased name.
    pub fn matches(&self, lowered_name: &str) -> bool {
        self.keywords.iter().any(|k| lowered_name.contains(k))
    }
}

pub const RULES: &[IconRule] = &[
    IconRule { keywords: &["جبن", "cheese"], icon: "fa-cheese", color: "#4CAF50" },
    IconRule { keywords: &["بيض", "egg"], icon: "fa-egg", color: "#03A9F4" },
    IconRule { keywords: &["دجاج", "chicken"], icon: "fa-drumstick-bite", color: "#9C27B0" },
    IconRule { keywords: &["خروف", "sheep", "lamb"], icon: "fa-sheep", color: "#E91E63" },
    IconRule { keywords: &["عجل", "beef", "cow", "veal"], icon: "fa-cow", color: "#FF9800" },
    IconRule { keywords: &["زيت", "oil"], icon: "fa-oil-can", color: "#795548" },
    IconRule { keywords: &["سكر", "sugar"], icon: "fa-cubes", color: "#00BCD4" },
    IconRule { keywords: &["أرز", "rice"], icon: "fa-bowl-rice", color: "#2E7D32" },
    IconRule { keywords: &["طحينية", "tahini"], icon: "fa-bowl-food", color: "#8D6E63" },
    IconRule { keywords: &["طحين", "flour", "خبز", "كماج", "bread"], icon: "fa-bread-slice", color: "#F44336" },
    IconRule { keywords: &["حمص", "عدس", "فريكة", "chickpea", "lentil", "freekeh"], icon: "fa-seedling", color: "#607D8B" },
    IconRule { keywords: &["حلاوة", "halawa"], icon: "fa-candy-cane", color: "#E91E63" },
    IconRule { keywords: &["قطايف", "qatayef"], icon: "fa-cookie-bite", color: "#F97316" },
    IconRule { keywords: &["لبن", "raib", "yogurt"], icon: "fa-mug-hot", color: "#0EA5E9" },
    IconRule { keywords: &["سمنة", "ghee"], icon: "fa-droplet", color: "#64748B" },
];

/// First rule matching `name`, case-insensitively.
pub fn rule_for(name: &str) -> Option<&'static IconRule> {
    let lowered = name.to_lowercase();
    RULES.iter().find(|r| r.matches(&lowered))
}

/// Keep the source icon unless it is blank or the source default.
pub fn resolve_icon(source: &str, name: &str) -> String {
    let s = source.trim();
    if !s.is_empty() && s != config::SENTINEL_ICON {
        return s.to_string();
    }
    rule_for(name)
        .map(|r| r.icon)
        .unwrap_or(config::GENERIC_ICON)
        .to_string()
}

/// Keep the source color unless it is blank or the source default.
pub fn resolve_color(source: &str, name: &str) -> String {
    let s = source.trim();
    if !s.is_empty() && !s.eq_ignore_ascii_case(config::SENTINEL_COLOR) {
        return s.to_string();
    }
    rule_for(name)
        .map(|r| r.color)
        .unwrap_or(config::GENERIC_COLOR)
        .to_string()
}
