//! Symbol catalog: display pair labels to provider ticker codes.

use crate::error::{Error, Result};

/// Static mapping from the pair labels offered to the user to the ticker
/// codes the provider expects in `fsym`. All pairs quote against the
/// configured quote currency.
pub struct SymbolCatalog;

impl SymbolCatalog {
    /// Resolve a pair label to its provider ticker code.
    pub fn resolve(label: &str) -> Result<&'static str> {
        match label {
            "BTC/JPY" => Ok("BTC"),
            "ETH/JPY" => Ok("ETH"),
            "XRP/JPY" => Ok("XRP"),
            "LTC/JPY" => Ok("LTC"),
            "BCH/JPY" => Ok("BCH"),
            "XLM/JPY" => Ok("XLM"),
            _ => Err(Error::UnknownSymbol(label.to_string())),
        }
    }

    /// All pair labels this catalog knows, in display order.
    pub fn labels() -> &'static [&'static str] {
        &[
            "BTC/JPY", "ETH/JPY", "XRP/JPY", "LTC/JPY", "BCH/JPY", "XLM/JPY",
        ]
    }
}
