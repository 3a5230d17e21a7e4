//! Screens for each wizard step, plus the finished-ticket page.

use std::fmt;

use crate::generator::format_rupees;
use crate::qr::qr_image_url;
use crate::schema::{APP_TITLE, AUTHORITY, BUS_COLORS, BusColor, MAX_TICKETS, MIN_TICKETS};
use crate::ticket::Ticket;
use crate::wizard::{FORM_STEPS, Session, Step};

/// Everything one screen shows, independent of how it is printed.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub title: &'static str,
    /// `(current, total)` while the form is being filled.
    pub progress: Option<(u8, u8)>,
    pub heading: String,
    pub body: Vec<String>,
    pub prompt: Option<String>,
    pub hint: Option<&'static str>,
    pub action: &'static str,
}

impl View {
    fn form(step: Step, heading: &str) -> Self {
        View {
            title: APP_TITLE,
            progress: Some((step.number(), FORM_STEPS)),
            heading: heading.to_string(),
            body: Vec::new(),
            prompt: None,
            hint: None,
            action: "Next",
        }
    }

    fn prompt(mut self, label: &str, example: &str) -> Self {
        self.prompt = Some(format!("{label} (e.g. {example}):"));
        self
    }

    fn hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ===", self.title)?;
        if let Some((current, total)) = self.progress {
            writeln!(f, "Step {current} of {total}")?;
        }
        writeln!(f, "{}", self.heading)?;
        for line in &self.body {
            writeln!(f, "{line}")?;
        }
        if let Some(hint) = self.hint {
            writeln!(f, "{hint}")?;
        }
        if let Some(prompt) = &self.prompt {
            writeln!(f, "{prompt}")?;
        }
        write!(f, "[{}]", self.action)
    }
}

pub fn render(session: &Session) -> View {
    let step = session.step();
    let ticket = session.ticket();

    match step {
        Step::BusColor => {
            let mut view = View::form(step, "Select Bus Type");
            for (i, color) in BUS_COLORS.iter().enumerate() {
                let mark = if ticket.bus_color == Some(*color) { "*" } else { " " };
                view.body.push(format!("{mark}{}: {} Bus", i + 1, color));
            }
            view.prompt = Some("Choose a color (default: 1):".to_string());
            view
        }
        Step::BusNumber => View::form(step, "Enter Bus Number")
            .prompt("Bus Number", "DL1PD6008")
            .hint("Enter the bus registration number."),
        Step::BusRoute => View::form(step, "Enter Bus Route")
            .prompt("Route", "740, OMS(-)")
            .hint("Enter the route code or name."),
        Step::StartingStop => View::form(step, "Enter Starting Stop")
            .prompt("From", "D Block Janak Puri")
            .hint("Enter your boarding stop name."),
        Step::EndingStop => View::form(step, "Enter Ending Stop")
            .prompt("To", "Uttam Nagar Terminal")
            .hint("Enter your destination stop name."),
        Step::Fare => View::form(step, "Enter Fare")
            .prompt("Fare (₹)", "10.00")
            .hint("Enter the original fare per ticket in rupees."),
        Step::TicketCount => {
            let mut view = View::form(step, "Select Ticket Count");
            view.prompt = Some(format!(
                "Number of Tickets ({MIN_TICKETS}~{MAX_TICKETS}) (default: {MIN_TICKETS}):"
            ));
            view
        }
        Step::Confirm => {
            let mut view = View::form(step, "Confirm Your Booking");
            view.body = confirmation_lines(ticket);
            view.action = "Generate Ticket";
            view
        }
        Step::Display => View {
            title: APP_TITLE,
            progress: None,
            heading: "Ticket Booked Successfully".to_string(),
            body: ticket_lines(ticket),
            prompt: Some("Book another ticket? (y/n, default: n)".to_string()),
            hint: None,
            action: "Book Another Ticket",
        },
    }
}

fn color_label(color: Option<BusColor>) -> &'static str {
    color.map(BusColor::label).unwrap_or("")
}

fn confirmation_lines(ticket: &Ticket) -> Vec<String> {
    vec![
        format!("{:>21}{}", "Bus Type: ", color_label(ticket.bus_color)),
        format!("{:>21}{}", "Bus Number: ", ticket.bus_number),
        format!("{:>21}{}", "Route: ", ticket.bus_route),
        format!("{:>21}{}", "From: ", ticket.starting_stop),
        format!("{:>21}{}", "To: ", ticket.ending_stop),
        format!("{:>21}{}", "Tickets: ", ticket.ticket_count()),
        format!("{:>21}{}", "Original Fare: ", format_rupees(ticket.fare)),
        format!(
            "{:>21}{}",
            "You Pay (10% off): ",
            format_rupees(ticket.preview_discounted_fare())
        ),
    ]
}

/// The printed ticket. Expects a finalized ticket.
pub fn ticket_lines(ticket: &Ticket) -> Vec<String> {
    let discounted = ticket
        .discounted_fare
        .unwrap_or_else(|| ticket.preview_discounted_fare());

    vec![
        format!("-------({AUTHORITY})-------"),
        format!("{:>17}{}", "Bus No: ", ticket.bus_number),
        format!("{:>17}{}", "Route: ", ticket.bus_route),
        format!(
            "{:>17}{} → To: {}",
            "From: ", ticket.starting_stop, ticket.ending_stop
        ),
        format!("{:>17}{}", "Fare: ", format_rupees(ticket.fare)),
        format!("{:>17}{}", "Discounted Fare: ", format_rupees(discounted)),
        format!("{:>17}{}", "Booking Time: ", ticket.booking_time),
        format!("{:>17}{}", "Transaction ID: ", ticket.transaction_id),
        format!("{:>17}{}", "Tickets: ", ticket.ticket_count()),
        "Scan this QR with conductor:".to_string(),
        qr_image_url(&ticket.qr_data),
        "QR Code Data (Raw):".to_string(),
        ticket.qr_data.clone(),
    ]
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Standalone HTML page for a finalized ticket, themed by bus color.
pub fn render_html(ticket: &Ticket) -> String {
    let background = ticket.bus_color.unwrap_or_default().hex();
    let discounted = ticket
        .discounted_fare
        .unwrap_or_else(|| ticket.preview_discounted_fare());

    let field = |class: &str, label: &str, value: &str| {
        format!(
            "      <div class=\"field {class}\"><span class=\"label\">{label}</span><span class=\"value\">{}</span></div>\n",
            escape_html(value)
        )
    };

    let mut fields = String::new();
    fields.push_str(&field("bus-route", "Bus Route", &ticket.bus_route));
    fields.push_str(&field("fare", "Fare", &format_rupees(ticket.fare)));
    fields.push_str(&field("booking-time", "Booking Time", &ticket.booking_time));
    fields.push_str(&field(
        "ticket-count",
        "Tickets",
        &ticket.ticket_count().to_string(),
    ));
    fields.push_str(&field("starting-stop", "Starting stop", &ticket.starting_stop));
    fields.push_str(&field("ending-stop", "Ending stop", &ticket.ending_stop));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>
    body {{ margin: 0; padding: 1rem; font-family: sans-serif; background: {background}; }}
    .ticket {{ max-width: 28rem; margin: 2rem auto; padding: 1.5rem; background: #fff; border-radius: 0.5rem; }}
    .header {{ display: flex; justify-content: space-between; border-bottom: 2px solid #000; font-size: 1.5rem; font-weight: 600; }}
    .field {{ display: flex; justify-content: space-between; margin: 0.5rem 0; }}
    .label {{ color: #4b5563; }}
    .transaction-id, .qr-data {{ font-family: monospace; text-align: center; word-break: break-all; }}
    .qr {{ display: block; margin: 1rem auto; }}
  </style>
</head>
<body style="background: {background}">
  <div class="ticket">
    <h2 class="authority">{authority}</h2>
    <div class="header"><span class="bus-number">{bus_number}</span><span class="discounted-fare">{discounted}</span></div>
{fields}    <div class="transaction-id">{transaction_id}</div>
    <img class="qr" src="{qr_url}" alt="QR Code" width="150" height="150">
    <p class="caption">Scan this QR with conductor</p>
    <pre class="qr-data">{qr_data}</pre>
  </div>
</body>
</html>
"#,
        title = APP_TITLE,
        authority = AUTHORITY,
        bus_number = escape_html(&ticket.bus_number),
        discounted = format_rupees(discounted),
        transaction_id = escape_html(&ticket.transaction_id),
        qr_url = escape_html(&qr_image_url(&ticket.qr_data)),
        qr_data = escape_html(&ticket.qr_data),
    )
}
