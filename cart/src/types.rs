//! Domain types for the cart.
//!
//! Cart items are owned by the remote source: the store keeps whatever the
//! endpoint sent, decoding leniently and preserving fields it does not know.

use crate::error::CartError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Reason carried by every rejected load, whatever the underlying failure was
pub const LOAD_FAILED_MESSAGE: &str = "something went wrong";

/// Identifier of a cart line
///
/// The remote source uses opaque string ids; numeric ids are accepted too and
/// kept in their decimal form, so `1` and `"1"` name the same item.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawItemId", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Creates an id from anything string-like
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

/// Wire form of an id: either a JSON string or a JSON number
#[derive(Deserialize)]
#[serde(untagged)]
enum RawItemId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawItemId> for ItemId {
    fn from(raw: RawItemId) -> Self {
        match raw {
            RawItemId::Text(text) => Self(text),
            RawItemId::Number(number) => Self(number.to_string()),
        }
    }
}

/// Reads a price leniently
///
/// JSON numbers and numeric strings (`"399.99"`) decode to their value; `null`,
/// unparseable text and any other JSON type decode to `NaN`, which then flows
/// through totals like any other price.
fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => text.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    };
    Ok(price)
}

/// Reads a quantity leniently
///
/// Accepts integers, integral floats (`1.0`) and integral numeric strings
/// (`"2"`); `null` reads as 0. A fractional or non-numeric quantity has no
/// integer meaning and fails the item.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let amount = match &value {
        Value::Null => Some(0),
        Value::Number(number) => number.as_i64().or_else(|| number.as_f64().and_then(integral)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(integral))
        },
        _ => None,
    };

    amount.ok_or_else(|| serde::de::Error::custom(format!("invalid quantity {value}")))
}

/// Converts a float to `i64` when it is a whole number in range
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::float_cmp)] // Range and fraction checked first
fn integral(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (in_range && value.trunc() == value).then(|| value as i64)
}

/// A line in the cart
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Unique key at load time
    pub id: ItemId,
    /// Display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Unit price
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: f64,
    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    /// Quantity; not validated and may go negative
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: i64,
    /// Fields the store does not interpret, kept as received
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CartItem {
    /// Creates an item with no display fields
    #[must_use]
    pub fn new(id: impl Into<ItemId>, amount: i64, price: f64) -> Self {
        Self {
            id: id.into(),
            title: None,
            price,
            img: None,
            amount,
            extra: Map::new(),
        }
    }

    /// Sets the display title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Quantity × unit price
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Quantities are far below 2^52
    pub fn line_total(&self) -> f64 {
        self.amount as f64 * self.price
    }
}

/// Aggregates computed from the cart items
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CartTotals {
    /// Sum of all quantities
    pub amount: i64,
    /// Sum of quantity × unit price
    pub total: f64,
}

/// State of the cart
///
/// `amount` and `total` are cached aggregates: only
/// [`CartState::calculate_totals`] updates them, every other mutation leaves
/// them as they were.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    /// Items in server/display order
    pub cart_items: Vec<CartItem>,
    /// Total quantity as of the last recompute
    pub amount: i64,
    /// Total cost as of the last recompute
    pub total: f64,
    /// `true` while a load is in flight (and before the first load settles)
    pub is_loading: bool,
}

impl CartState {
    /// Creates the startup state: no items, loading
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cart_items: Vec::new(),
            amount: 0,
            total: 0.0,
            is_loading: true,
        }
    }

    /// Creates a settled state holding `items`
    #[must_use]
    pub const fn loaded(items: Vec<CartItem>) -> Self {
        Self {
            cart_items: items,
            amount: 0,
            total: 0.0,
            is_loading: false,
        }
    }

    /// Returns the number of cart lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.cart_items.len()
    }

    /// Returns `true` when the cart has no lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart_items.is_empty()
    }

    /// Returns the first item with the given id
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&CartItem> {
        self.cart_items.iter().find(|item| &item.id == id)
    }

    /// Returns the first item with the given id, mutably
    pub fn item_mut(&mut self, id: &ItemId) -> Option<&mut CartItem> {
        self.cart_items.iter_mut().find(|item| &item.id == id)
    }

    /// Removes every item
    pub fn clear(&mut self) {
        self.cart_items.clear();
    }

    /// Removes every item with the given id, returning how many went
    pub fn remove(&mut self, id: &ItemId) -> usize {
        let before = self.cart_items.len();
        self.cart_items.retain(|item| &item.id != id);
        before - self.cart_items.len()
    }

    /// Adds one to the quantity of the item with the given id
    ///
    /// Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no item has that id, or
    /// [`CartError::QuantityOverflow`] if the quantity is already `i64::MAX`.
    pub fn increase(&mut self, id: &ItemId) -> Result<i64, CartError> {
        self.adjust(id, 1)
    }

    /// Subtracts one from the quantity of the item with the given id
    ///
    /// There is no floor; quantities can go negative. Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no item has that id, or
    /// [`CartError::QuantityOverflow`] if the quantity is already `i64::MIN`.
    pub fn decrease(&mut self, id: &ItemId) -> Result<i64, CartError> {
        self.adjust(id, -1)
    }

    fn adjust(&mut self, id: &ItemId, delta: i64) -> Result<i64, CartError> {
        let item = self
            .item_mut(id)
            .ok_or_else(|| CartError::ItemNotFound(id.clone()))?;
        item.amount = item
            .amount
            .checked_add(delta)
            .ok_or_else(|| CartError::QuantityOverflow(id.clone()))?;
        Ok(item.amount)
    }

    /// Folds the items into fresh totals without touching the cached ones
    ///
    /// The quantity sum saturates at the `i64` bounds.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.cart_items
            .iter()
            .fold(CartTotals::default(), |acc, item| CartTotals {
                amount: acc.amount.saturating_add(item.amount),
                total: acc.total + item.line_total(),
            })
    }

    /// Recomputes and stores `amount` and `total`
    pub fn calculate_totals(&mut self) -> CartTotals {
        let totals = self.totals();
        self.amount = totals.amount;
        self.total = totals.total;
        totals
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle of one load
///
/// `Pending` marks the start; exactly one of `Fulfilled` or `Rejected` follows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CartLoad {
    /// The fetch has started
    Pending,
    /// The fetch returned items
    Fulfilled {
        /// Items as decoded from the response
        items: Vec<CartItem>,
    },
    /// The fetch failed
    Rejected {
        /// Fixed, caller-facing reason
        reason: String,
    },
}

impl CartLoad {
    /// A rejection carrying the standard reason
    #[must_use]
    pub fn rejected() -> Self {
        Self::Rejected {
            reason: LOAD_FAILED_MESSAGE.to_string(),
        }
    }

    /// `true` for `Fulfilled` and `Rejected`
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Everything the cart reducer accepts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CartAction {
    /// Fetch items from the remote endpoint and replace the cart with them
    LoadCart,

    /// Remove every item
    ClearCart,

    /// Remove every item with this id
    RemoveItem {
        /// Item to remove
        id: ItemId,
    },

    /// Add one to an item's quantity
    Increase {
        /// Item to change
        id: ItemId,
    },

    /// Subtract one from an item's quantity
    Decrease {
        /// Item to change
        id: ItemId,
    },

    /// Recompute `amount` and `total`
    CalculateTotals,

    /// A step of the load lifecycle
    Load(CartLoad),
}

impl CartAction {
    /// `true` if this action settles a load
    #[must_use]
    pub const fn is_load_settled(&self) -> bool {
        matches!(self, Self::Load(load) if load.is_settled())
    }
}
