use std::fmt;
use std::str::FromStr;

/// The set of coins the service tracks. Anything outside this set is
/// rejected at the edge, before any source or the fusion engine sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coin {
    Btc,
    Eth,
    Doge,
}

impl Coin {
    pub const ALL: [Coin; 3] = [Coin::Btc, Coin::Eth, Coin::Doge];

    /// Upper-cased ticker, the key used by sentiment data.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Eth => "ETH",
            Self::Doge => "DOGE",
        }
    }

    /// Lower-cased ticker, the key used by the prediction provider.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Btc => "btc",
            Self::Eth => "eth",
            Self::Doge => "doge",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Btc => "Bitcoin",
            Self::Eth => "Ethereum",
            Self::Doge => "Dogecoin",
        }
    }

    /// CoinGecko asset id.
    pub fn gecko_id(&self) -> &'static str {
        match self {
            Self::Btc => "bitcoin",
            Self::Eth => "ethereum",
            Self::Doge => "dogecoin",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Btc => "₿",
            Self::Eth => "Ξ",
            Self::Doge => "Ð",
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Coin {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "btc" => Ok(Coin::Btc),
            "eth" => Ok(Coin::Eth),
            "doge" => Ok(Coin::Doge),
            _ => anyhow::bail!("Unsupported coin: {}. Must be 'btc', 'eth', or 'doge'", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_coins() {
        assert_eq!("btc".parse::<Coin>().unwrap(), Coin::Btc);
        assert_eq!("ETH".parse::<Coin>().unwrap(), Coin::Eth);
        assert_eq!("Doge".parse::<Coin>().unwrap(), Coin::Doge);
    }

    #[test]
    fn test_reject_unknown_coin() {
        assert!("xrp".parse::<Coin>().is_err());
        assert!("".parse::<Coin>().is_err());
    }

    #[test]
    fn test_key_symbol_casing() {
        for coin in Coin::ALL {
            assert_eq!(coin.symbol(), coin.key().to_uppercase());
        }
    }
}
