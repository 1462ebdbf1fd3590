//! Whole-unit prices and their display formatting.

use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// Price in whole currency units (no fractional part is ever shown or stored).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Price of `quantity` units. Saturates instead of wrapping.
    pub fn times(self, quantity: u32) -> Price {
        Price(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Render with the grouping and currency conventions of `format`.
    pub fn display(self, format: PriceFormat) -> String {
        format.format(self)
    }
}

impl ValueObject for Price {}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

/// Display locale for prices.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Russian storefront: `12 500 ₽` with a no-break space between groups.
    #[default]
    Ru,
    /// English: `12,500 $`.
    En,
}

impl Locale {
    pub fn price_format(self) -> PriceFormat {
        match self {
            Locale::Ru => PriceFormat::RU,
            Locale::En => PriceFormat::EN,
        }
    }
}

impl FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" | "ru-ru" => Ok(Locale::Ru),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(DomainError::validation(format!("unsupported locale '{other}'"))),
        }
    }
}

/// Thousands grouping plus trailing currency suffix.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PriceFormat {
    pub group_separator: &'static str,
    pub currency_suffix: &'static str,
}

impl PriceFormat {
    pub const RU: PriceFormat = PriceFormat {
        group_separator: "\u{a0}",
        currency_suffix: " ₽",
    };

    pub const EN: PriceFormat = PriceFormat {
        group_separator: ",",
        currency_suffix: " $",
    };

    pub fn format(&self, price: Price) -> String {
        let digits = price.amount().to_string();
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3 * self.group_separator.len() + 8);

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push_str(self.group_separator);
            }
            out.push(ch);
        }

        out.push_str(self.currency_suffix);
        out
    }
}

impl Default for PriceFormat {
    fn default() -> Self {
        Locale::default().price_format()
    }
}
