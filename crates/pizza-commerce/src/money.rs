//! Money and currency formatting.
//!
//! Catalog prices arrive as decimal dollars (`f64`) and are shown through
//! [`format_price`], which renders them the way an `en-US` currency formatter
//! does. Totals are accumulated as [`Money`] in integer cents so that summing
//! a cart never drifts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Currency of every catalog price. The backend only quotes US dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
        }
    }

    /// Get the symbol used by the `en-US` locale (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::USD => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Locale-aware currency formatter (`style: currency`).
///
/// Only the `en-US` conventions are implemented: symbol prefix, `,` digit
/// grouping, `.` decimal separator, leading `-` for negatives, and rounding
/// half away from zero on the shortest decimal form of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    locale: &'static str,
    currency: Currency,
    group_separator: char,
    decimal_separator: char,
}

impl CurrencyFormatter {
    /// Build an `en-US` formatter for a currency.
    pub fn en_us(currency: Currency) -> Self {
        Self {
            locale: "en-US",
            currency,
            group_separator: ',',
            decimal_separator: '.',
        }
    }

    /// The process-wide `en-US`/`USD` formatter used for every price display.
    pub fn usd() -> &'static CurrencyFormatter {
        static USD: OnceLock<CurrencyFormatter> = OnceLock::new();
        USD.get_or_init(|| CurrencyFormatter::en_us(Currency::USD))
    }

    pub fn locale(&self) -> &'static str {
        self.locale
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Format a decimal amount. `None` renders the zero value.
    pub fn format(&self, amount: Option<f64>) -> String {
        let amount = amount.unwrap_or(0.0);
        let symbol = self.currency.symbol();
        if amount.is_nan() {
            return format!("{symbol}NaN");
        }

        let sign = if amount.is_sign_negative() { "-" } else { "" };
        if amount.is_infinite() {
            return format!("{sign}{symbol}\u{221e}");
        }

        let places = self.currency.decimal_places() as usize;
        let (whole, fraction) = round_half_expand(amount.abs(), places);
        self.assemble(sign, symbol, &whole, &fraction)
    }

    /// Format an integer-cent amount.
    pub fn format_money(&self, money: &Money) -> String {
        let places = money.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let magnitude = money.amount_cents.unsigned_abs();
        let whole = (magnitude / divisor).to_string();
        let fraction = if places == 0 {
            String::new()
        } else {
            format!("{:0width$}", magnitude % divisor, width = places as usize)
        };
        let sign = if money.amount_cents < 0 { "-" } else { "" };
        self.assemble(sign, money.currency.symbol(), &whole, &fraction)
    }

    fn assemble(&self, sign: &str, symbol: &str, whole: &str, fraction: &str) -> String {
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(self.group_separator);
            }
            grouped.push(ch);
        }

        if fraction.is_empty() {
            format!("{sign}{symbol}{grouped}")
        } else {
            format!(
                "{sign}{symbol}{grouped}{}{fraction}",
                self.decimal_separator
            )
        }
    }
}

/// Format a price for display with the shared `en-US`/`USD` formatter.
///
/// ```
/// use pizza_commerce::money::format_price;
/// assert_eq!(format_price(Some(12.0)), "$12.00");
/// assert_eq!(format_price(None), "$0.00");
/// ```
pub fn format_price(amount: Option<f64>) -> String {
    CurrencyFormatter::usd().format(amount)
}

/// Split a non-negative finite value into whole and fraction digit strings,
/// rounded to `places` decimals.
fn round_half_expand(value: f64, places: usize) -> (String, String) {
    // f64 Display yields the shortest round-trip form without an exponent.
    let repr = value.to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part.bytes().map(|b| b - b'0').collect();
    digits.extend(
        frac_part
            .bytes()
            .map(|b| b - b'0')
            .chain(std::iter::repeat(0))
            .take(places),
    );

    let round_up = frac_part
        .as_bytes()
        .get(places)
        .is_some_and(|d| *d >= b'5');
    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let split = digits.len() - places;
    let render = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    (render(&digits[..split]), render(&digits[split..]))
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use pizza_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(12.25, Currency::USD);
    /// assert_eq!(price.amount_cents, 1225);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Multiply by a scalar, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Sum an iterator of Money values, returning None on mismatch or overflow.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    /// Format as a display string (e.g., "$1,249.99").
    pub fn display(&self) -> String {
        CurrencyFormatter::en_us(self.currency).format_money(self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
