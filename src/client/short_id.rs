//! Short random identifiers for generated default values

use rand::Rng;
use rand::distr::Alphanumeric;

const SHORT_ID_LEN: usize = 10;

/// Random alphanumeric id, e.g. `k3J9xQ0aLm`
pub fn generate() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(SHORT_ID_LEN)
        .map(char::from)
        .collect()
}
