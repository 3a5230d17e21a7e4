use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub static BUS_COLORS: [BusColor; 4] = [
    BusColor::Red,
    BusColor::BlueDark,
    BusColor::BlueLight,
    BusColor::Orange,
];

pub static APP_TITLE: &str = "Delhi Bus Ticket Booking";
pub static AUTHORITY: &str = "Transport Dept. of Delhi";

pub static DATE_SEGMENT: &str = "27072025";
pub static BOOKING_TIME: &str = "27 Jul 25 | 12:28 PM";

pub static TXN_UPPER_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub static TXN_LOWER_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
pub const TXN_RANDOM_LEN: usize = 12;

pub static QR_PREFIX: &str = "gAAAAA";
pub static QR_SUFFIX: &str = "==";
pub static QR_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
pub const QR_BODY_LEN: usize = 160;

pub static QR_SERVICE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";
pub static QR_IMAGE_SIZE: &str = "150x150";

pub const DISCOUNT_RATE: f64 = 0.9;
pub const MIN_TICKETS: u8 = 1;
pub const MAX_TICKETS: u8 = 5;

/// Bus types run by the transport department, distinguished by livery.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum BusColor {
    #[default]
    Red,
    #[serde(rename = "Blue Dark")]
    BlueDark,
    #[serde(rename = "Blue Light")]
    BlueLight,
    Orange,
}

impl BusColor {
    pub fn label(self) -> &'static str {
        match self {
            BusColor::Red => "Red",
            BusColor::BlueDark => "Blue Dark",
            BusColor::BlueLight => "Blue Light",
            BusColor::Orange => "Orange",
        }
    }

    /// Background used by the ticket page for this bus type.
    pub fn hex(self) -> &'static str {
        match self {
            BusColor::Red => "#ef4444",
            BusColor::BlueDark => "#1e40af",
            BusColor::BlueLight => "#60a5fa",
            BusColor::Orange => "#f97316",
        }
    }
}

impl fmt::Display for BusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BusColor {
    type Err = String;

    /// Accepts the 1-based menu index, the display label or the kebab-case flag value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(idx) = s.parse::<usize>() {
            return idx
                .checked_sub(1)
                .and_then(|i| BUS_COLORS.get(i).copied())
                .ok_or_else(|| format!("no bus type numbered {idx}"));
        }

        let key = s.to_ascii_lowercase().replace(['-', '_'], " ");
        BUS_COLORS
            .iter()
            .copied()
            .find(|color| color.label().to_ascii_lowercase() == key)
            .ok_or_else(|| format!("unknown bus type: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_index_label_and_flag_forms() {
        assert_eq!("1".parse::<BusColor>().unwrap(), BusColor::Red);
        assert_eq!("4".parse::<BusColor>().unwrap(), BusColor::Orange);
        assert_eq!("Blue Dark".parse::<BusColor>().unwrap(), BusColor::BlueDark);
        assert_eq!("blue-light".parse::<BusColor>().unwrap(), BusColor::BlueLight);
        assert_eq!(" orange ".parse::<BusColor>().unwrap(), BusColor::Orange);
    }

    #[test]
    fn rejects_unknown_colors() {
        assert!("0".parse::<BusColor>().is_err());
        assert!("5".parse::<BusColor>().is_err());
        assert!("green".parse::<BusColor>().is_err());
    }

    #[test]
    fn serializes_with_display_labels() {
        let json = serde_json::to_string(&BusColor::BlueLight).unwrap();
        assert_eq!(json, "\"Blue Light\"");
    }
}
