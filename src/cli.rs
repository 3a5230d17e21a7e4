use std::path::PathBuf;

use clap::Parser;

use crate::schema::BusColor;

/// A CLI tool for booking Delhi bus tickets.
/// Run the program without flags will guide you through the booking process.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Bus type.
    /// To see available types, use the --list-colors option.
    #[arg(long, short = 'c', value_name = "COLOR", value_enum)]
    pub color: Option<BusColor>,

    /// Bus registration number, e.g. DL1PD6008
    #[arg(long, short = 'n', value_name = "NUMBER")]
    pub bus_number: Option<String>,

    /// Route code or name, e.g. 740
    #[arg(long, short = 'r', value_name = "ROUTE")]
    pub route: Option<String>,

    /// Boarding stop
    #[arg(long, short = 'f', value_name = "STOP")]
    pub from: Option<String>,

    /// Destination stop
    #[arg(long, short = 't', value_name = "STOP")]
    pub to: Option<String>,

    /// Fare per ticket in rupees
    #[arg(long, short = 'a', value_name = "AMOUNT")]
    pub fare: Option<f64>,

    /// Number of tickets, clamped to 1~5
    #[arg(long, short = 'k', value_name = "NUMBER", allow_negative_numbers = true)]
    pub tickets: Option<i64>,

    /// Generate the ticket without asking for confirmation, then exit
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Seed for the transaction ID and QR payload generator
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Write the finished ticket as JSON
    #[arg(long, value_name = "PATH")]
    pub export_json: Option<PathBuf>,

    /// Write the finished ticket as an HTML page
    #[arg(long, value_name = "PATH")]
    pub export_html: Option<PathBuf>,

    /// Download the QR code image
    #[arg(long, value_name = "PATH")]
    pub save_qr: Option<PathBuf>,

    /// Open the downloaded QR code image (requires --save-qr)
    #[arg(long, requires = "save_qr")]
    pub open_qr: bool,

    /// List available bus types
    #[arg(long)]
    pub list_colors: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prefilled_booking() {
        let args = Args::try_parse_from([
            "busticket",
            "-c",
            "blue-dark",
            "-n",
            "dl1pd6008",
            "--fare",
            "12.5",
            "--tickets",
            "-3",
            "--seed",
            "4",
            "-y",
        ])
        .unwrap();

        assert_eq!(args.color, Some(BusColor::BlueDark));
        assert_eq!(args.bus_number.as_deref(), Some("dl1pd6008"));
        assert_eq!(args.fare, Some(12.5));
        assert_eq!(args.tickets, Some(-3));
        assert_eq!(args.seed, Some(4));
        assert!(args.yes);
    }

    #[test]
    fn open_qr_needs_a_target_file() {
        assert!(Args::try_parse_from(["busticket", "--open-qr"]).is_err());
        assert!(Args::try_parse_from(["busticket", "--open-qr", "--save-qr", "qr.png"]).is_ok());
    }

    #[test]
    fn rejects_unknown_color() {
        assert!(Args::try_parse_from(["busticket", "--color", "green"]).is_err());
    }
}
