//! Viterbi decoding of hidden Markov models, plus extraction of the
//! contiguous runs of marked states (CpG islands, in the shipped
//! model) from the decoded path.
pub mod error;
pub mod gen_seq;
pub mod hmm;
pub mod models;
pub mod segment;

pub use error::{DecodeError, Result};
pub use hmm::{log_prob, Decoded, Hmm, Viterbi};
pub use segment::{marked_segments, Segment};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;
    use rayon::prelude::*;

    // Eight states, island (+) and background (-) per base, with
    // deterministic emissions. Island rows favour C/G moves and
    // background rows favour A/T moves, so a CG-rich stretch between
    // AT-rich flanks decodes as exactly one island.
    fn island_model() -> Hmm {
        let states = ["A+", "C+", "G+", "T+", "A-", "C-", "G-", "T-"];
        let island = [0.05, 0.4, 0.5, 0.03];
        let background = [0.45, 0.04, 0.04, 0.45];
        let mut trans = Vec::new();
        for s in 0..8 {
            for t in 0..8 {
                let p = match (s < 4, t < 4) {
                    (true, true) => island[t],
                    (false, false) => background[t - 4],
                    _ => 0.005,
                };
                trans.push(p);
            }
        }
        let mut emit = vec![0f64; 32];
        for s in 0..8 {
            emit[s * 4 + s % 4] = 1.0;
        }
        Hmm::new(&states, b"ACGT", &[0.125; 8], &trans, &emit).unwrap()
    }

    #[test]
    fn one_island_with_exact_bounds() {
        let hmm = island_model();
        let seq: Vec<u8> = b"TATATA"
            .iter()
            .chain(b"CGCGCGCG")
            .chain(b"ATATAT")
            .copied()
            .collect();
        let decoded = hmm.decode(&seq).unwrap();
        eprintln!("lk:{:.4}", decoded.log_prob);
        let segments = marked_segments(&decoded.path, |&s| {
            models::is_island_state(hmm.label(s))
        });
        assert_eq!(segments, vec![Segment { start: 6, end: 13 }]);
    }

    #[test]
    fn no_island_in_background_sequence() {
        let hmm = island_model();
        let decoded = hmm.decode(b"ATTATATAATAT").unwrap();
        let segments = marked_segments(&decoded.path, |&s| {
            models::is_island_state(hmm.label(s))
        });
        assert!(segments.is_empty());
    }

    #[test]
    fn decode_invariants_over_sampled_sequences() {
        let hmm = models::cpg_island();
        let checked = (0..50u64)
            .into_par_iter()
            .filter(|&seed| {
                let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(seed);
                let (seq, _) = gen_seq::sample_from(&hmm, 500, &mut rng);
                let decoded = hmm.decode(&seq).unwrap();
                if decoded.path.len() != seq.len() {
                    return false;
                }
                // The reported score is the best final column entry.
                let mut viterbi = Viterbi::new(&hmm, &seq).unwrap();
                viterbi.fill();
                if viterbi.best_score(seq.len()) != Some(decoded.log_prob) {
                    return false;
                }
                // Segments of the decoded path cover its island
                // positions exactly.
                let marks: Vec<bool> = decoded
                    .path
                    .iter()
                    .map(|&s| models::is_island_state(hmm.label(s)))
                    .collect();
                let segments = marked_segments(&decoded.path, |&s| {
                    models::is_island_state(hmm.label(s))
                });
                let mut covered = vec![false; marks.len()];
                for segment in &segments {
                    for slot in &mut covered[segment.start..=segment.end] {
                        *slot = true;
                    }
                }
                covered == marks
            })
            .count();
        assert_eq!(checked, 50);
    }
}
