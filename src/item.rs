use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::{ItemsError, Result};

/// Non-negative money amount with two decimal places, kept as whole cents
///
/// Text input is parsed leniently: an empty string is zero, a leading `+` is allowed,
/// and anything past the second fractional digit is rounded half-up. Negative and
/// non-numeric input is rejected. Rendering always uses exactly two decimals.
///
/// # Examples
/// ```
/// use itemsheet::item::Price;
///
/// let price: Price = "3.5".parse().unwrap();
/// assert_eq!(price.cents(), 350);
/// assert_eq!(price.to_string(), "3.50");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn from_cents(cents: u64) -> Self {
        Price(cents)
    }

    pub fn cents(self) -> u64 {
        self.0
    }
}

impl FromStr for Price {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Ok(Price::ZERO);
        }
        if text.starts_with('-') {
            return Err(format!("price must not be negative: '{}'", s));
        }
        let text = text.strip_prefix('+').unwrap_or(text);

        let (whole, frac) = text.split_once('.').unwrap_or((text, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(format!("price is not a number: '{}'", s));
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| format!("price is too large: '{}'", s))?
        };

        let digit = |i: usize| frac.as_bytes().get(i).map_or(0, |b| (b - b'0') as u64);
        let mut frac_cents = digit(0) * 10 + digit(1);
        if digit(2) >= 5 {
            frac_cents += 1;
        }

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(frac_cents))
            .map(Price)
            .ok_or_else(|| format!("price is too large: '{}'", s))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct PriceVisitor;

impl<'de> Visitor<'de> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative price as a number or decimal string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Price, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Price, E> {
        v.checked_mul(100)
            .map(Price)
            .ok_or_else(|| E::custom("price is too large"))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Price, E> {
        if v < 0 {
            return Err(E::custom("price must not be negative"));
        }
        self.visit_u64(v as u64)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Price, E> {
        if !v.is_finite() || v < 0.0 {
            return Err(E::custom("price must be a non-negative number"));
        }
        self.visit_str(&v.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

/// One row of the item table
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub category: String,
    pub item: String,
    pub unit: String,
    pub price: Price,
    pub notes: String,
}

impl ItemRecord {
    pub fn new(
        category: impl Into<String>,
        item: impl Into<String>,
        unit: impl Into<String>,
        price: Price,
        notes: impl Into<String>,
    ) -> Self {
        ItemRecord {
            category: category.into(),
            item: item.into(),
            unit: unit.into(),
            price,
            notes: notes.into(),
        }
    }

    /// Field values in storage column order.
    pub fn to_row(&self) -> [String; 5] {
        [
            self.category.clone(),
            self.item.clone(),
            self.unit.clone(),
            self.price.to_string(),
            self.notes.clone(),
        ]
    }
}

/// Submission of the add-item form
///
/// All inputs arrive as text; missing inputs are treated as empty.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewItem {
    pub category: String,
    pub item: String,
    pub unit: String,
    pub price: String,
    pub notes: String,
}

impl NewItem {
    /// Check the required fields and the price, producing the record to append
    ///
    /// Category and item must both be non-empty. The values are kept exactly as
    /// typed, so a lone space counts as a value.
    pub fn validate(self) -> Result<ItemRecord> {
        if self.category.is_empty() || self.item.is_empty() {
            return Err(ItemsError::ValidationFailure(
                "Item and category are required.".to_string(),
            ));
        }
        let price = self
            .price
            .parse::<Price>()
            .map_err(|reason| ItemsError::ValidationFailure(format!("Invalid price: {}", reason)))?;

        Ok(ItemRecord {
            category: self.category,
            item: self.item,
            unit: self.unit,
            price,
            notes: self.notes,
        })
    }
}

/// A row as posted back from the editable grid
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GridRow {
    pub category: String,
    pub item: String,
    pub unit: String,
    pub price: String,
    pub notes: String,
}

impl GridRow {
    /// Convert to a record; `index` is zero-based and only used in the message.
    pub fn into_record(self, index: usize) -> Result<ItemRecord> {
        let price = self.price.parse::<Price>().map_err(|reason| {
            ItemsError::ValidationFailure(format!("Row {}: {}", index + 1, reason))
        })?;
        Ok(ItemRecord {
            category: self.category,
            item: self.item,
            unit: self.unit,
            price,
            notes: self.notes,
        })
    }
}
