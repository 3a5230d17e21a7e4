//! The booking wizard as an explicit state machine.
//!
//! A [`Session`] carries the current [`Step`] and the [`Ticket`] being built.
//! [`transition`] applies one [`Event`] and returns the next session. Input
//! that fails a step's check, or an event aimed at another step, hands the
//! session back unchanged: the wizard never reports validation errors.

use rand::Rng;
use tracing::debug;

use crate::schema::BusColor;
use crate::ticket::Ticket;

/// Number of steps that collect or confirm data; the ticket display comes after.
pub const FORM_STEPS: u8 = 8;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    BusColor = 1,
    BusNumber = 2,
    BusRoute = 3,
    StartingStop = 4,
    EndingStop = 5,
    Fare = 6,
    TicketCount = 7,
    Confirm = 8,
    Display = 9,
}

impl Step {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn next(self) -> Step {
        match self {
            Step::BusColor => Step::BusNumber,
            Step::BusNumber => Step::BusRoute,
            Step::BusRoute => Step::StartingStop,
            Step::StartingStop => Step::EndingStop,
            Step::EndingStop => Step::Fare,
            Step::Fare => Step::TicketCount,
            Step::TicketCount => Step::Confirm,
            Step::Confirm => Step::Display,
            Step::Display => Step::BusColor,
        }
    }

    /// The step `Back` returns to, if any.
    pub fn prev(self) -> Option<Step> {
        match self {
            Step::BusColor | Step::Display => None,
            Step::BusNumber => Some(Step::BusColor),
            Step::BusRoute => Some(Step::BusNumber),
            Step::StartingStop => Some(Step::BusRoute),
            Step::EndingStop => Some(Step::StartingStop),
            Step::Fare => Some(Step::EndingStop),
            Step::TicketCount => Some(Step::Fare),
            Step::Confirm => Some(Step::TicketCount),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ChooseColor(BusColor),
    EnterBusNumber(String),
    EnterRoute(String),
    EnterStartingStop(String),
    EnterEndingStop(String),
    EnterFare(f64),
    SelectTicketCount(i64),
    Confirm,
    Back,
    BookAnother,
}

/// Per-user booking context.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    step: Step,
    ticket: Ticket,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            step: Step::BusColor,
            ticket: Ticket::default(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    pub fn reset(&mut self) {
        *self = Session::new();
    }

    /// Apply one event in place. Returns whether the step changed.
    pub fn apply<R: Rng>(&mut self, event: Event, rng: &mut R) -> bool {
        let from = self.step;
        let accepted = match (from, event) {
            (_, Event::Back) => match from.prev() {
                Some(prev) => {
                    self.step = prev;
                    return self.log_move(from);
                }
                None => false,
            },
            (Step::BusColor, Event::ChooseColor(color)) => {
                self.ticket.bus_color = Some(color);
                true
            }
            (Step::BusNumber, Event::EnterBusNumber(number)) => match filled(number) {
                Some(number) => {
                    self.ticket.bus_number = number.to_uppercase();
                    true
                }
                None => false,
            },
            (Step::BusRoute, Event::EnterRoute(route)) => match filled(route) {
                Some(route) => {
                    self.ticket.bus_route = route;
                    true
                }
                None => false,
            },
            (Step::StartingStop, Event::EnterStartingStop(stop)) => match filled(stop) {
                Some(stop) => {
                    self.ticket.starting_stop = stop;
                    true
                }
                None => false,
            },
            (Step::EndingStop, Event::EnterEndingStop(stop)) => match filled(stop) {
                Some(stop) => {
                    self.ticket.ending_stop = stop;
                    true
                }
                None => false,
            },
            (Step::Fare, Event::EnterFare(fare)) => {
                if fare.is_finite() && fare > 0.0 {
                    self.ticket.fare = fare;
                    true
                } else {
                    false
                }
            }
            (Step::TicketCount, Event::SelectTicketCount(count)) => {
                self.ticket.set_ticket_count(count);
                true
            }
            (Step::Confirm, Event::Confirm) => self.ticket.finalize(rng),
            (Step::Display, Event::BookAnother) => {
                self.reset();
                return self.log_move(from);
            }
            (_, event) => {
                debug!(step = from.number(), ?event, "event does not belong to this step");
                false
            }
        };

        if !accepted {
            debug!(step = from.number(), "input rejected");
            return false;
        }

        self.step = from.next();
        self.log_move(from)
    }

    fn log_move(&self, from: Step) -> bool {
        debug!(from = from.number(), to = self.step.number(), "step changed");
        true
    }
}

fn filled(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

/// Pure form of [`Session::apply`].
pub fn transition<R: Rng>(mut session: Session, event: Event, rng: &mut R) -> Session {
    session.apply(event, rng);
    session
}
