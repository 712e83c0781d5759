//! Display language and the fixed texts the core hands to a presentation layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Pick the language from a page path: any `/en` segment prefix means
    /// English (`/ramadan2026/en/`), everything else is Arabic.
    pub fn from_url_path(path: &str) -> Self {
        if path.to_lowercase().contains("/en") {
            Language::English
        } else {
            Language::Arabic
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Arabic => "ar",
            Language::English => "en",
        }
    }

    pub fn is_rtl(self) -> bool {
        self == Language::Arabic
    }

    /// Choose between an Arabic and an English variant, falling back to the
    /// other one when the preferred text is blank.
    pub fn pick<'a>(self, arabic: &'a str, english: &'a str) -> &'a str {
        let (preferred, other) = match self {
            Language::Arabic => (arabic.trim(), english.trim()),
            Language::English => (english.trim(), arabic.trim()),
        };
        if preferred.is_empty() {
            other
        } else {
            preferred
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ar" => Ok(Language::Arabic),
            "en" => Ok(Language::English),
            other => Err(MonitorError::InvalidArgument(format!(
                "Unknown language: {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Week,
    NotApplicable,
    FilterAll,
    FilterIncrease,
    FilterDecrease,
    FilterStable,
    HighestIncrease,
    LargestDecrease,
    WeeklyPrice,
    IndicativePrice,
    ChangeVsIndicative,
    SampleDataNotice,
    DataFilesNote,
    SelectCommodity,
    // Export columns
    ColCommodity,
    ColWeek,
    ColWeeklyPrice,
    ColIndicativePrice,
    ColChangeVsIndicativePct,
    ColChangeVsIndicativeAbs,
    ColPreviousWeekPrice,
    ColChangeVsPreviousPct,
    ColChangeVsPreviousAbs,
}

pub fn label(language: Language, key: Label) -> &'static str {
    match language {
        Language::Arabic => arabic(key),
        Language::English => english(key),
    }
}

fn arabic(key: Label) -> &'static str {
    match key {
        Label::Week => "الأسبوع",
        Label::NotApplicable => "NA",
        Label::FilterAll => "الكل",
        Label::FilterIncrease => "ارتفاع",
        Label::FilterDecrease => "انخفاض",
        Label::FilterStable => "ثابت",
        Label::HighestIncrease => "أعلى نسبة ارتفاع عن السعر الاسترشادي",
        Label::LargestDecrease => "أكبر نسبة انخفاض عن السعر الاسترشادي",
        Label::WeeklyPrice => "السعر الأسبوعي",
        Label::IndicativePrice => "السعر الإرشادي",
        Label::ChangeVsIndicative => "التغير % عن الإرشادي",
        Label::SampleDataNotice => "تم تشغيل بيانات تجريبية (تعذر قراءة ملفات CSV على الخادم).",
        Label::DataFilesNote => {
            "يرجى وضع ملفات CSV داخل مجلد /data/ على الخادم (products.csv و weekly_prices.csv)."
        }
        Label::SelectCommodity => "اختر سلعة لعرض الرسم البياني.",
        Label::ColCommodity => "المنتج",
        Label::ColWeek => "الأسبوع",
        Label::ColWeeklyPrice => "السعر الأسبوعي",
        Label::ColIndicativePrice => "السعر الإرشادي",
        Label::ColChangeVsIndicativePct => "التغير عن الإرشادي %",
        Label::ColChangeVsIndicativeAbs => "التغير عن الإرشادي (₪)",
        Label::ColPreviousWeekPrice => "السعر للأسبوع السابق",
        Label::ColChangeVsPreviousPct => "نسبة التغيير عن الأسبوع السابق",
        Label::ColChangeVsPreviousAbs => "التغير عن الأسبوع السابق (₪)",
    }
}

fn english(key: Label) -> &'static str {
    match key {
        Label::Week => "Week",
        Label::NotApplicable => "NA",
        Label::FilterAll => "All",
        Label::FilterIncrease => "Increase",
        Label::FilterDecrease => "Decrease",
        Label::FilterStable => "Stable",
        Label::HighestIncrease => "Highest percentage increase above the indicative price",
        Label::LargestDecrease => "Largest percentage decrease from the indicative price",
        Label::WeeklyPrice => "Weekly price",
        Label::IndicativePrice => "Indicative price",
        Label::ChangeVsIndicative => "Change % vs indicative",
        Label::SampleDataNotice => {
            "Showing sample data (CSV files were not reachable on the server)."
        }
        Label::DataFilesNote => {
            "Put the CSV files under /data/ on the server (products.csv and weekly_prices.csv)."
        }
        Label::SelectCommodity => "Select a commodity to see the chart.",
        Label::ColCommodity => "Commodity",
        Label::ColWeek => "Week",
        Label::ColWeeklyPrice => "Weekly price",
        Label::ColIndicativePrice => "Indicative price",
        Label::ColChangeVsIndicativePct => "Change vs indicative %",
        Label::ColChangeVsIndicativeAbs => "Change vs indicative (₪)",
        Label::ColPreviousWeekPrice => "Previous week price",
        Label::ColChangeVsPreviousPct => "% change vs previous week",
        Label::ColChangeVsPreviousAbs => "Change vs previous week (₪)",
    }
}
