use std::fmt;
use std::str::FromStr;

/// HTTP delivery strategy selected at deployment time.
///
/// Both strategies consume the same subscribe contract: polling drains
/// a short-lived subscription per request, streaming holds one open per
/// client. Embedders that want push delivery use
/// [`crate::BroadcastChannel::subscribe`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    Polling,
    Stream,
}

impl DeliveryMode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Polling => "polling",
            Self::Stream => "stream",
        }
    }
}

impl FromStr for DeliveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "polling" => Ok(Self::Polling),
            "stream" => Ok(Self::Stream),
            _ => Err(format!("invalid delivery mode: {}", s)),
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
