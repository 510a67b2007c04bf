#![feature(test)]
extern crate test;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
const SEED: u64 = 1293890;
const LEN: usize = 2_000;

#[bench]
fn decode_cpg(b: &mut test::Bencher) {
    let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(SEED);
    let hmm = islet::models::cpg_island();
    let (seq, _) = islet::gen_seq::sample_from(&hmm, LEN, &mut rng);
    b.iter(|| hmm.decode(&seq).unwrap());
}

#[bench]
fn decode_and_extract_cpg(b: &mut test::Bencher) {
    let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(SEED);
    let hmm = islet::models::cpg_island();
    let (seq, _) = islet::gen_seq::sample_from(&hmm, LEN, &mut rng);
    b.iter(|| {
        let decoded = hmm.decode(&seq).unwrap();
        islet::marked_segments(&decoded.path, |&s| {
            islet::models::is_island_state(hmm.label(s))
        })
    });
}
