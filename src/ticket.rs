use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use crate::generator::{
    booking_time, calculate_discounted_fare, generate_qr_data, generate_transaction_id,
};
use crate::schema::{BusColor, MAX_TICKETS, MIN_TICKETS};

/// The booking record filled in one field per wizard step.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub bus_color: Option<BusColor>,
    pub bus_number: String,
    pub bus_route: String,
    pub starting_stop: String,
    pub ending_stop: String,
    pub fare: f64,
    #[serde(deserialize_with = "clamped_ticket_count")]
    ticket_count: u8,

    // Set by `finalize`
    pub booking_time: String,
    pub discounted_fare: Option<f64>,
    pub transaction_id: String,
    pub qr_data: String,
}

impl Default for Ticket {
    fn default() -> Self {
        Ticket {
            bus_color: None,
            bus_number: "".to_string(),
            bus_route: "".to_string(),
            starting_stop: "".to_string(),
            ending_stop: "".to_string(),
            fare: 0.0,
            ticket_count: MIN_TICKETS,
            booking_time: "".to_string(),
            discounted_fare: None,
            transaction_id: "".to_string(),
            qr_data: "".to_string(),
        }
    }
}

fn clamp_ticket_count(requested: i64) -> u8 {
    requested.clamp(i64::from(MIN_TICKETS), i64::from(MAX_TICKETS)) as u8
}

fn clamped_ticket_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    i64::deserialize(deserializer).map(clamp_ticket_count)
}

impl Ticket {
    pub fn ticket_count(&self) -> u8 {
        self.ticket_count
    }

    pub fn set_ticket_count(&mut self, requested: i64) {
        self.ticket_count = clamp_ticket_count(requested);
    }

    /// Discount preview shown before the ticket is generated.
    pub fn preview_discounted_fare(&self) -> f64 {
        calculate_discounted_fare(self.fare)
    }

    /// Fill the derived fields. Returns false and leaves the ticket untouched
    /// when no positive fare has been entered yet.
    pub fn finalize<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.fare.is_nan() || self.fare <= 0.0 {
            return false;
        }

        self.booking_time = booking_time();
        self.discounted_fare = Some(calculate_discounted_fare(self.fare));
        self.transaction_id = generate_transaction_id(rng);
        self.qr_data = generate_qr_data(rng);
        true
    }

    pub fn is_finalized(&self) -> bool {
        self.discounted_fare.is_some() && !self.transaction_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn ticket_count_is_clamped() {
        let mut ticket = Ticket::default();
        assert_eq!(ticket.ticket_count(), 1);

        ticket.set_ticket_count(0);
        assert_eq!(ticket.ticket_count(), 1);
        ticket.set_ticket_count(-20);
        assert_eq!(ticket.ticket_count(), 1);
        ticket.set_ticket_count(3);
        assert_eq!(ticket.ticket_count(), 3);
        ticket.set_ticket_count(99);
        assert_eq!(ticket.ticket_count(), 5);
    }

    #[test]
    fn deserialized_ticket_count_is_clamped() {
        let mut value = serde_json::to_value(Ticket::default()).unwrap();

        value["ticketCount"] = serde_json::json!(40);
        let ticket: Ticket = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(ticket.ticket_count(), 5);

        value["ticketCount"] = serde_json::json!(-1);
        let ticket: Ticket = serde_json::from_value(value).unwrap();
        assert_eq!(ticket.ticket_count(), 1);
    }

    #[test]
    fn finalize_requires_positive_fare() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut ticket = Ticket::default();

        assert!(!ticket.finalize(&mut rng));
        assert_eq!(ticket, Ticket::default());

        ticket.fare = f64::NAN;
        assert!(!ticket.finalize(&mut rng));
        assert!(!ticket.is_finalized());
    }

    #[test]
    fn finalize_fills_derived_fields() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let mut ticket = Ticket {
            fare: 100.0,
            ..Ticket::default()
        };

        assert!(ticket.finalize(&mut rng));
        assert!(ticket.is_finalized());
        assert_eq!(ticket.discounted_fare, Some(90.0));
        assert_eq!(ticket.booking_time, "27 Jul 25 | 12:28 PM");
        assert_eq!(ticket.transaction_id.len(), 21);
        assert_eq!(ticket.qr_data.len(), 168);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let ticket = Ticket {
            bus_color: Some(BusColor::BlueDark),
            bus_number: "DL1PD6008".to_string(),
            ..Ticket::default()
        };
        let value = serde_json::to_value(&ticket).unwrap();

        assert_eq!(value["busColor"], "Blue Dark");
        assert_eq!(value["busNumber"], "DL1PD6008");
        assert_eq!(value["ticketCount"], 1);
        assert!(value["discountedFare"].is_null());
    }
}
