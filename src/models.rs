//! Ready-made model parameters and the on-disk model format.
use crate::error::{DecodeError, Result};
use crate::hmm::Hmm;
use serde::{Deserialize, Serialize};

// CpG-island model over ACGT. Each base has an island (+) and a
// background (-) state; emissions are deterministic, so the state path
// is pinned to the sequence and only the +/- regime is decoded.
const CPG_STATES: [&str; 8] = ["A+", "C+", "G+", "T+", "A-", "C-", "G-", "T-"];

const CPG_INIT: [f64; 8] = [
    0.0035, 0.0035, 0.0035, 0.0035, 0.2465, 0.2465, 0.2465, 0.2465,
];

#[rustfmt::skip]
const CPG_TRANS: [f64; 64] = [
    // A+       C+       G+        T+        A-       C-       G-       T-
    0.176,    0.268,   0.417,    0.117,    0.0037,  0.0056,  0.0086,  0.0025,
    0.167,    0.36,    0.268,    0.184,    0.00354, 0.00747, 0.00559, 0.00387,
    0.157,    0.332,   0.367,    0.112,    0.0034,  0.0069,  0.0076,  0.0026,
    0.077,    0.348,   0.376,    0.178,    0.0017,  0.0072,  0.0078,  0.00376,
    0.00042,  0.00033, 0.000408, 0.00033,  0.299,   0.2047,  0.285,   0.2097,
    0.000447, 0.00042, 0.0002,   0.000427, 0.321,   0.2975,  0.078,   0.301,
    0.0003,   0.00036, 0.000417, 0.000417, 0.177,   0.239,   0.2915,  0.2915,
    0.000372, 0.00037, 0.000423, 0.00033,  0.2476,  0.2456,  0.2975,  0.2077,
];

/// The CpG-island model: four island states and four background
/// states over the DNA alphabet.
pub fn cpg_island() -> Hmm {
    let mut emit = [0f64; 32];
    for state in 0..8 {
        emit[state * 4 + state % 4] = 1.0;
    }
    Hmm::new(&CPG_STATES, b"ACGT", &CPG_INIT, &CPG_TRANS, &emit).unwrap()
}

/// Does this state label denote the island regime?
pub fn is_island_state(label: &str) -> bool {
    label.ends_with('+')
}

/// A model as written in a JSON file: labels, an alphabet string and
/// linear-scale probability tables, row per state.
///
/// Linear scale keeps the file format free of infinities; zero means
/// impossible, exactly as in [`Hmm::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSpec {
    pub states: Vec<String>,
    pub alphabet: String,
    pub init: Vec<f64>,
    pub trans: Vec<Vec<f64>>,
    pub emit: Vec<Vec<f64>>,
}

impl ModelSpec {
    /// Validate the tables and build the model.
    pub fn into_hmm(self) -> Result<Hmm> {
        let n = self.states.len();
        for (name, rows, width) in &[
            ("trans", &self.trans, n),
            ("emit", &self.emit, self.alphabet.len()),
        ] {
            for row in rows.iter() {
                if row.len() != *width {
                    let why = format!("{} row has {} entries, expected {}", name, row.len(), width);
                    return Err(DecodeError::InvalidModel(why));
                }
            }
        }
        let states: Vec<&str> = self.states.iter().map(|s| s.as_str()).collect();
        let trans: Vec<f64> = self.trans.iter().flatten().copied().collect();
        let emit: Vec<f64> = self.emit.iter().flatten().copied().collect();
        Hmm::new(
            &states,
            self.alphabet.as_bytes(),
            &self.init,
            &trans,
            &emit,
        )
    }
}
