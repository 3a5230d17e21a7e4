//! Synthetic booking data: transaction IDs, QR payloads and the fare discount.
//!
//! Nothing here is unique or verifiable. Every generator takes the random
//! source as a parameter so a seeded RNG reproduces the same ticket.

use rand::Rng;

use crate::schema::{
    BOOKING_TIME, DATE_SEGMENT, DISCOUNT_RATE, QR_BODY_LEN, QR_CHARS, QR_PREFIX, QR_SUFFIX,
    TXN_LOWER_CHARS, TXN_RANDOM_LEN, TXN_UPPER_CHARS,
};

fn pick<R: Rng>(rng: &mut R, alphabet: &[u8]) -> u8 {
    alphabet[rng.random_range(0..alphabet.len())]
}

/// `T` + date segment + 12 uppercase alphanumerics with one or two positions
/// overwritten by a lowercase letter.
///
/// Positions are drawn with replacement, so two draws may land on the same
/// character and leave a single lowercase letter.
pub fn generate_transaction_id<R: Rng>(rng: &mut R) -> String {
    let mut txn: Vec<u8> = (0..TXN_RANDOM_LEN)
        .map(|_| pick(rng, TXN_UPPER_CHARS))
        .collect();

    let num_lower = rng.random_range(1..=2);
    for _ in 0..num_lower {
        let pos = rng.random_range(0..TXN_RANDOM_LEN);
        txn[pos] = pick(rng, TXN_LOWER_CHARS);
    }

    // Every byte comes from an ASCII alphabet.
    let txn: String = txn.into_iter().map(char::from).collect();
    format!("T{DATE_SEGMENT}{txn}")
}

pub fn generate_qr_data<R: Rng>(rng: &mut R) -> String {
    let mut data = String::with_capacity(QR_PREFIX.len() + QR_BODY_LEN + QR_SUFFIX.len());
    data.push_str(QR_PREFIX);
    for _ in 0..QR_BODY_LEN {
        data.push(char::from(pick(rng, QR_CHARS)));
    }
    data.push_str(QR_SUFFIX);
    data
}

/// Fare after the flat 10% discount, rounded to whole paise.
pub fn calculate_discounted_fare(original: f64) -> f64 {
    round_cents(original * DISCOUNT_RATE)
}

/// Round to two decimals on the exact value of `amount`, ties to even.
///
/// Scaling by 100 first would round twice and push values such as
/// 0.855 (really 0.85499..) up to 0.86.
pub fn round_cents(amount: f64) -> f64 {
    format!("{amount:.2}").parse().unwrap_or(amount)
}

pub fn booking_time() -> String {
    BOOKING_TIME.to_string()
}

pub fn format_rupees(amount: f64) -> String {
    format!("₹{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use regex::Regex;

    #[test]
    fn transaction_id_has_expected_shape() {
        let pattern = Regex::new(r"^T27072025[A-Za-z0-9]{12}$").unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(11);

        for _ in 0..500 {
            let id = generate_transaction_id(&mut rng);
            assert_eq!(id.len(), 21);
            assert!(pattern.is_match(&id), "bad id {id}");

            let lower = id[9..].chars().filter(|c| c.is_ascii_lowercase()).count();
            assert!((1..=2).contains(&lower), "{id} has {lower} lowercase letters");
        }
    }

    #[test]
    fn transaction_id_sometimes_carries_two_lowercase_letters() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let counts: Vec<usize> = (0..200)
            .map(|_| {
                let id = generate_transaction_id(&mut rng);
                id.chars().filter(|c| c.is_ascii_lowercase()).count()
            })
            .collect();

        assert!(counts.contains(&1));
        assert!(counts.contains(&2));
    }

    #[test]
    fn qr_data_has_prefix_suffix_and_safe_body() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);

        for _ in 0..100 {
            let qr = generate_qr_data(&mut rng);
            assert_eq!(qr.len(), 168);
            assert!(qr.starts_with("gAAAAA"));
            assert!(qr.ends_with("=="));
            assert!(
                qr[6..166]
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            );
        }
    }

    #[test]
    fn same_seed_same_output() {
        let mut a = ChaCha20Rng::seed_from_u64(42);
        let mut b = ChaCha20Rng::seed_from_u64(42);

        assert_eq!(generate_transaction_id(&mut a), generate_transaction_id(&mut b));
        assert_eq!(generate_qr_data(&mut a), generate_qr_data(&mut b));
    }

    #[test]
    fn discount_is_ten_percent_rounded_to_cents() {
        assert_eq!(calculate_discounted_fare(100.0), 90.0);
        assert_eq!(calculate_discounted_fare(45.0), 40.5);
        assert_eq!(calculate_discounted_fare(12.5), 11.25);
        assert_eq!(calculate_discounted_fare(33.33), 30.0);
        assert_eq!(calculate_discounted_fare(0.0), 0.0);
    }

    #[test]
    fn discount_rounds_the_exact_product() {
        assert_eq!(calculate_discounted_fare(0.95), 0.85);
        assert_eq!(calculate_discounted_fare(1.25), 1.12);
        assert_eq!(calculate_discounted_fare(1.65), 1.48);
        assert_eq!(calculate_discounted_fare(1.75), 1.57);
    }

    /// Round the full decimal expansion of `value` to cents, ties to even.
    fn exact_cents(value: f64) -> f64 {
        let expanded = format!("{value:.80}");
        let (whole, frac) = expanded.split_once('.').unwrap();
        let (kept, rest) = frac.split_at(2);
        let mut cents: u64 = format!("{whole}{kept}").parse().unwrap();

        let rest = rest.trim_end_matches('0');
        let round_up = match rest.as_bytes().first() {
            Some(b'5') if rest.len() == 1 => cents % 2 == 1,
            Some(d) => *d >= b'5',
            None => false,
        };
        if round_up {
            cents += 1;
        }
        cents as f64 / 100.0
    }

    #[test]
    fn discount_matches_exact_decimal_rounding_for_cent_fares() {
        for paise in 0..200_000u32 {
            let fare = f64::from(paise) / 100.0;
            assert_eq!(
                calculate_discounted_fare(fare),
                exact_cents(fare * 0.9),
                "fare {fare}"
            );
        }
    }

    #[test]
    fn discount_never_exceeds_cent_valued_fare() {
        for paise in 0..20_000u32 {
            let fare = f64::from(paise) / 100.0;
            let discounted = calculate_discounted_fare(fare);
            assert!(discounted <= fare, "{discounted} > {fare}");
        }
    }

    #[test]
    fn rupee_formatting() {
        assert_eq!(format_rupees(100.0), "₹100.00");
        assert_eq!(format_rupees(11.25), "₹11.25");
        assert_eq!(booking_time(), "27 Jul 25 | 12:28 PM");
    }
}
