use std::collections::HashSet;

use rand::Rng;

use crate::models::{Candidate, SeriesAddress};

/// Stochastically mixes `secondary` into `primary`
///
/// Each position of `primary` draws from `rng`. A draw below `factor` pops the
/// next unused `secondary` item and takes it if it is not already part of
/// `primary`; a rejected item is still consumed. Otherwise, or once
/// `secondary` runs dry, the primary item stays. The output always has the
/// length of `primary`.
pub fn reblend<R: Rng + ?Sized>(
    primary: &[Candidate],
    secondary: &[Candidate],
    factor: f64,
    rng: &mut R,
) -> Vec<Candidate> {
    let members: HashSet<SeriesAddress> = primary.iter().map(|c| c.address).collect();
    let mut pending = secondary.iter();
    let mut substituted = 0usize;

    let blended: Vec<Candidate> = primary
        .iter()
        .map(|own| {
            let draw: f64 = rng.gen();
            if draw < factor {
                match pending.next() {
                    Some(other) if !members.contains(&other.address) => {
                        substituted += 1;
                        return other.clone();
                    }
                    _ => {}
                }
            }
            own.clone()
        })
        .collect();

    tracing::debug!(
        primary = primary.len(),
        secondary = secondary.len(),
        factor,
        substituted,
        "Reblended rankings"
    );

    blended
}
