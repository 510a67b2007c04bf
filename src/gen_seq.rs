//! This module is to generate synthetic observation sequences to
//! assess the decoder. Usually, it would not be used in the
//! real-applications.
use crate::hmm::Hmm;
use rand::seq::SliceRandom;
use rand::Rng;

/// Sample a hidden path and its emitted sequence from `hmm`.
///
/// The first state is drawn from the initial distribution, later ones
/// from the transition row of their predecessor, and each position
/// emits one symbol from its state's emission row. Returns the emitted
/// bytes and the true state path, so a caller can compare the decoder
/// against the ground truth.
pub fn sample_from<R: Rng>(hmm: &Hmm, len: usize, rng: &mut R) -> (Vec<u8>, Vec<usize>) {
    let states: Vec<usize> = (0..hmm.nstates()).collect();
    let symbols: Vec<usize> = (0..hmm.alphabet().len()).collect();
    let mut path = Vec::with_capacity(len);
    let mut seq = Vec::with_capacity(len);
    for i in 0..len {
        let state = match i {
            0 => *states
                .choose_weighted(rng, |&s| hmm.init(s).exp())
                .unwrap(),
            _ => {
                let prev = path[i - 1];
                *states
                    .choose_weighted(rng, |&s| hmm.transition(prev, s).exp())
                    .unwrap()
            }
        };
        let symbol = *symbols
            .choose_weighted(rng, |&o| hmm.emission(state, o).exp())
            .unwrap();
        path.push(state);
        seq.push(hmm.alphabet()[symbol]);
    }
    (seq, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn sampled_sequences_stay_in_the_alphabet() {
        let hmm = crate::models::cpg_island();
        let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(3291);
        let (seq, path) = sample_from(&hmm, 300, &mut rng);
        assert_eq!(seq.len(), 300);
        assert_eq!(path.len(), 300);
        assert!(seq.iter().all(|&b| hmm.symbol_index(b).is_some()));
        // Deterministic emissions pin each sampled base to its state.
        for (&state, &base) in path.iter().zip(seq.iter()) {
            assert_eq!(hmm.label(state).as_bytes()[0], base);
        }
    }

    #[test]
    fn sampling_is_reproducible() {
        let hmm = crate::models::cpg_island();
        let mut one: Xoshiro256StarStar = SeedableRng::seed_from_u64(77);
        let mut two: Xoshiro256StarStar = SeedableRng::seed_from_u64(77);
        assert_eq!(sample_from(&hmm, 100, &mut one), sample_from(&hmm, 100, &mut two));
    }
}
