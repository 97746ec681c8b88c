use indexmap::IndexMap;
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A token balance as reported by the balance tracker.
///
/// Hosts report balances as hex strings, decimal strings or plain numbers.
/// Anything else is kept as a malformed balance, which cannot answer
/// `is_zero` and is skipped when ranking holdings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Balance(Option<BigUint>);

impl Balance {
    pub fn new(amount: BigUint) -> Self {
        Self(Some(amount))
    }

    pub fn malformed() -> Self {
        Self(None)
    }

    /// Parse a `0x` hex or decimal string.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        let amount = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(digits) => BigUint::parse_bytes(digits.as_bytes(), 16),
            None => BigUint::parse_bytes(s.as_bytes(), 10),
        };
        Self(amount)
    }

    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::parse(s),
            serde_json::Value::Number(n) => Self(n.as_u64().map(BigUint::from)),
            _ => Self::malformed(),
        }
    }

    pub fn amount(&self) -> Option<&BigUint> {
        self.0.as_ref()
    }

    /// `None` when the balance is malformed.
    pub fn is_zero(&self) -> Option<bool> {
        self.0.as_ref().map(|n| *n == BigUint::ZERO)
    }

    /// The amount, if well formed and strictly positive.
    pub fn positive_amount(&self) -> Option<&BigUint> {
        match self.is_zero() {
            Some(false) => self.amount(),
            _ => None,
        }
    }
}

impl From<u64> for Balance {
    fn from(amount: u64) -> Self {
        Self::new(BigUint::from(amount))
    }
}

impl Serialize for Balance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(n) => serializer.serialize_str(&format!("0x{n:x}")),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Balance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// Balances keyed by token address, in insertion order.
///
/// Order matters: holdings with equal balances rank in the order the
/// tracker reported them. A repeated address keeps its first position and
/// takes the later balance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceMap {
    entries: IndexMap<String, Balance>,
}

impl BalanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: impl Into<String>, balance: Balance) {
        self.entries.insert(address.into(), balance);
    }

    pub fn get(&self, address: &str) -> Option<&Balance> {
        self.entries.get(address)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Balance)> {
        self.entries.iter().map(|(a, b)| (a.as_str(), b))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<A: Into<String>> FromIterator<(A, Balance)> for BalanceMap {
    fn from_iter<I: IntoIterator<Item = (A, Balance)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (address, balance) in iter {
            map.insert(address, balance);
        }
        map
    }
}
