pub mod cli;
pub mod error;
pub mod generator;
pub mod qr;
pub mod render;
pub mod schema;
pub mod ticket;
pub mod wizard;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{info, warn};

use std::fs;
use std::io::{BufRead, Write};
use std::sync::Once;

use crate::cli::Args;
use crate::error::{Error, Result};
use crate::render::{render, render_html};
use crate::schema::BusColor;
use crate::ticket::Ticket;
use crate::wizard::{Event, Session, Step};

static TRACING_INIT: Once = Once::new();

/// Sends diagnostics to stderr; `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("busticket=warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

pub const BACK_COMMAND: &str = ":back";

/// Values from the command line, each used for the first pass through its step.
#[derive(Debug, Default)]
struct Prefill {
    color: Option<BusColor>,
    bus_number: Option<String>,
    route: Option<String>,
    from: Option<String>,
    to: Option<String>,
    fare: Option<f64>,
    tickets: Option<i64>,
    confirm: bool,
}

impl Prefill {
    fn from_args(args: &Args) -> Self {
        Prefill {
            color: args.color,
            bus_number: args.bus_number.clone(),
            route: args.route.clone(),
            from: args.from.clone(),
            to: args.to.clone(),
            fare: args.fare,
            tickets: args.tickets,
            confirm: args.yes,
        }
    }

    fn take(&mut self, step: Step) -> Option<Event> {
        match step {
            Step::BusColor => self.color.take().map(Event::ChooseColor),
            Step::BusNumber => self.bus_number.take().map(Event::EnterBusNumber),
            Step::BusRoute => self.route.take().map(Event::EnterRoute),
            Step::StartingStop => self.from.take().map(Event::EnterStartingStop),
            Step::EndingStop => self.to.take().map(Event::EnterEndingStop),
            Step::Fare => self.fare.take().map(Event::EnterFare),
            Step::TicketCount => self.tickets.take().map(Event::SelectTicketCount),
            Step::Confirm => std::mem::take(&mut self.confirm).then_some(Event::Confirm),
            Step::Display => None,
        }
    }
}

/// Read one trimmed line. `None` once the input is exhausted.
fn get_input<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Turn a typed line into the event for `step`. `None` means the line is not
/// a usable answer and the screen is shown again.
pub fn read_event(step: Step, line: &str) -> Option<Event> {
    let line = line.trim();
    if line == BACK_COMMAND {
        return Some(Event::Back);
    }

    match step {
        Step::BusColor => {
            if line.is_empty() {
                Some(Event::ChooseColor(BusColor::default()))
            } else {
                line.parse().ok().map(Event::ChooseColor)
            }
        }
        Step::BusNumber => Some(Event::EnterBusNumber(line.to_string())),
        Step::BusRoute => Some(Event::EnterRoute(line.to_string())),
        Step::StartingStop => Some(Event::EnterStartingStop(line.to_string())),
        Step::EndingStop => Some(Event::EnterEndingStop(line.to_string())),
        Step::Fare => line.parse().ok().map(Event::EnterFare),
        Step::TicketCount => {
            if line.is_empty() {
                Some(Event::SelectTicketCount(1))
            } else {
                line.parse().ok().map(Event::SelectTicketCount)
            }
        }
        Step::Confirm => Some(Event::Confirm),
        Step::Display => matches!(line, "y" | "Y" | "yes").then_some(Event::BookAnother),
    }
}

pub fn run(args: Args) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_with(args, &mut stdin.lock(), &mut stdout.lock())
}

/// Drive the wizard over any line source and output sink.
pub fn run_with<R: BufRead, W: Write>(args: Args, input: &mut R, out: &mut W) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_os_rng(),
    };
    let mut prefill = Prefill::from_args(&args);
    let mut session = Session::new();

    loop {
        let step = session.step();
        let mut view = render(&session);
        if step == Step::Display && args.yes {
            view.prompt = None;
        }
        writeln!(out, "\n{view}")?;

        if step == Step::Display {
            export_ticket(&args, session.ticket(), out)?;
            if args.yes {
                return Ok(());
            }
        }

        let event = match prefill.take(step) {
            Some(event) => Some(event),
            None => match get_input(input)? {
                Some(line) => read_event(step, &line),
                None if step == Step::Display => return Ok(()),
                None => return Err(Error::InputClosed { step: step.number() }),
            },
        };

        match event {
            Some(event) => {
                if step == Step::Display && event != Event::BookAnother {
                    return Ok(());
                }
                session.apply(event, &mut rng);
                if step == Step::Confirm && session.step() == Step::Display {
                    info!(
                        transaction_id = %session.ticket().transaction_id,
                        "ticket generated"
                    );
                }
            }
            None if step == Step::Display => return Ok(()),
            None => {}
        }
    }
}

/// Write the requested exports. Failures are reported but never discard the
/// ticket already on screen.
fn export_ticket<W: Write>(args: &Args, ticket: &Ticket, out: &mut W) -> Result<()> {
    if let Some(path) = &args.export_json {
        match serde_json::to_string_pretty(ticket)
            .map_err(Error::from)
            .and_then(|json| fs::write(path, json).map_err(Error::from))
        {
            Ok(()) => {
                info!(path = %path.display(), "ticket exported as JSON");
                writeln!(out, "Ticket saved to {}", path.display())?;
            }
            Err(err) => report_export_failure(out, "JSON export", &err)?,
        }
    }

    if let Some(path) = &args.export_html {
        match fs::write(path, render_html(ticket)) {
            Ok(()) => {
                info!(path = %path.display(), "ticket exported as HTML");
                writeln!(out, "Ticket page saved to {}", path.display())?;
            }
            Err(err) => report_export_failure(out, "HTML export", &Error::from(err))?,
        }
    }

    if let Some(path) = &args.save_qr {
        let saved = qr::client()
            .and_then(|client| qr::save_qr_image(&client, &ticket.qr_data, path));
        match saved {
            Ok(()) => {
                writeln!(out, "QR code saved to {}", path.display())?;
                if args.open_qr {
                    if let Err(err) = qr::show_image(path) {
                        report_export_failure(out, "Opening QR code", &err)?;
                    }
                }
            }
            Err(err) => report_export_failure(out, "QR download", &err)?,
        }
    }

    Ok(())
}

fn report_export_failure<W: Write>(out: &mut W, what: &str, err: &Error) -> Result<()> {
    warn!(error = %err, "{what} failed");
    writeln!(out, "{what} failed: {err}")?;
    Ok(())
}
