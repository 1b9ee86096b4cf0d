//! The closed currency catalog.
//!
//! Supported symbols are a fixed, compile-time set. Extending the catalog is a
//! code change, not a runtime operation: add a line to the `catalog!` table.

use serde::{Deserialize, Serialize};

/// Declares the catalog: one variant per supported symbol, with its
/// human-readable display name.
macro_rules! catalog {
    ( $( $variant:ident => $name:literal ),* $(,)? ) => {
        /// A supported currency symbol.
        ///
        /// Serde accepts exactly the canonical upper-case codes; anything else
        /// is rejected at deserialization time, which is the single
        /// authoritative validation point for symbols entering the system.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum CryptoCurrency {
            $( $variant ),*
        }

        impl CryptoCurrency {
            /// Canonical symbol code, e.g. `"BTC"`.
            pub fn code(&self) -> &'static str {
                match self {
                    $( CryptoCurrency::$variant => stringify!($variant) ),*
                }
            }

            /// Display name, e.g. `"Bitcoin"`.
            pub fn display_name(&self) -> &'static str {
                match self {
                    $( CryptoCurrency::$variant => $name ),*
                }
            }

            /// Every symbol in the catalog, in declaration order.
            pub fn all() -> &'static [CryptoCurrency] {
                &[ $( CryptoCurrency::$variant ),* ]
            }
        }

        impl std::str::FromStr for CryptoCurrency {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_uppercase().as_str() {
                    $( stringify!($variant) => Ok(CryptoCurrency::$variant), )*
                    other => Err(format!("Unsupported currency symbol: {}", other)),
                }
            }
        }
    };
}

catalog! {
    BTC => "Bitcoin",
    ETH => "Ethereum",
    USDT => "Tether",
    USDC => "USD Coin",
    BNB => "BNB",
    XRP => "XRP",
    SOL => "Solana",
    ADA => "Cardano",
    DOGE => "Dogecoin",
    TRX => "TRON",
    TON => "Toncoin",
    DOT => "Polkadot",
    AVAX => "Avalanche",
    SHIB => "Shiba Inu",
    LINK => "Chainlink",
    MATIC => "Polygon",
    LTC => "Litecoin",
    BCH => "Bitcoin Cash",
    XLM => "Stellar",
    ETC => "Ethereum Classic",
    NEAR => "NEAR Protocol",
    ATOM => "Cosmos",
    XMR => "Monero",
    ICP => "Internet Computer",
    FIL => "Filecoin",
    HBAR => "Hedera",
    APT => "Aptos",
    SUI => "Sui",
    ARB => "Arbitrum",
    OP => "Optimism",
    STX => "Stacks",
    LDO => "Lido DAO",
    INJ => "Injective",
    AAVE => "Aave",
    MKR => "Maker",
    RNDR => "Render",
    IMX => "Immutable",
    SEI => "Sei",
    ALGO => "Algorand",
    SAND => "The Sandbox",
    AXS => "Axie Infinity",
    GRT => "The Graph",
    EGLD => "MultiversX",
    KAS => "Kaspa",
    CRO => "Cronos",
    FTM => "Fantom",
    THETA => "Theta Network",
    VET => "VeChain",
    MNT => "Mantle",
    BTT => "BitTorrent",
    PEPE => "Pepe",
    FLOKI => "FLOKI",
    BONK => "Bonk",
    JUP => "Jupiter",
}

impl std::fmt::Display for CryptoCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A (name, symbol) projection of an entry in the upstream catalog listing.
///
/// Transient: built from the upstream symbol map, never persisted. The symbol
/// is kept as a raw string because the upstream corpus is far larger than our
/// closed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySymbolEntry {
    pub name: String,
    pub symbol: String,
}
