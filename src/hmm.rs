//! Viterbi decoding of discrete hidden Markov models.
use crate::error::{DecodeError, Result};

// Predecessor sentinel for the virtual begin state in front of the
// first observation.
const BEGIN: usize = usize::MAX;
const NO_SYMBOL: usize = usize::MAX;

/// Convert a linear-scale probability into natural-log space.
///
/// Zero maps to `f64::NEG_INFINITY`, the absorbing "impossible" value.
/// Log-space probabilities compose by addition, not multiplication.
pub fn log_prob(p: f64) -> f64 {
    if p == 0.0 {
        f64::NEG_INFINITY
    } else {
        p.ln()
    }
}

/// A fully specified hidden Markov model over a byte alphabet.
///
/// States keep the order they were given in, and every tie in the
/// decoder is broken toward the earlier state. All probabilities are
/// held in natural-log space; an impossible move is negative infinity.
#[derive(Debug, Clone)]
pub struct Hmm {
    states: Vec<String>,
    alphabet: Vec<u8>,
    /// Raw byte to index into `alphabet`, `NO_SYMBOL` elsewhere.
    index: [usize; 256],
    /// Log-probability of entering each state from the begin state.
    init: Vec<f64>,
    /// Row-major nstates x nstates, from -> to.
    trans: Vec<f64>,
    /// Row-major nstates x alphabet length.
    emit: Vec<f64>,
}

impl Hmm {
    /// Create a model from linear-scale probability tables.
    ///
    /// `init` has one entry per state, `trans` is row-major from -> to,
    /// and `emit` is row-major state x symbol. Entries may be zero to
    /// forbid a move or an emission. The tables are converted to
    /// natural-log space on construction.
    pub fn new(
        states: &[&str],
        alphabet: &[u8],
        init: &[f64],
        trans: &[f64],
        emit: &[f64],
    ) -> Result<Self> {
        if states.is_empty() {
            return Err(DecodeError::InvalidModel("empty state set".to_string()));
        }
        if alphabet.is_empty() {
            return Err(DecodeError::InvalidModel("empty alphabet".to_string()));
        }
        for (i, state) in states.iter().enumerate() {
            if states[..i].contains(state) {
                let why = format!("duplicate state label {}", state);
                return Err(DecodeError::InvalidModel(why));
            }
        }
        let mut index = [NO_SYMBOL; 256];
        for (i, &symbol) in alphabet.iter().enumerate() {
            if index[symbol as usize] != NO_SYMBOL {
                let why = format!("duplicate symbol {:?}", symbol as char);
                return Err(DecodeError::InvalidModel(why));
            }
            index[symbol as usize] = i;
        }
        let (n, m) = (states.len(), alphabet.len());
        if init.len() != n || trans.len() != n * n || emit.len() != n * m {
            let why = format!(
                "table sizes {}/{}/{} do not fit {} states over {} symbols",
                init.len(),
                trans.len(),
                emit.len(),
                n,
                m
            );
            return Err(DecodeError::InvalidModel(why));
        }
        for &p in init.iter().chain(trans).chain(emit) {
            if !p.is_finite() || p < 0f64 {
                let why = format!("probability {} is not finite and nonnegative", p);
                return Err(DecodeError::InvalidModel(why));
            }
        }
        Ok(Self {
            states: states.iter().map(|s| s.to_string()).collect(),
            alphabet: alphabet.to_vec(),
            index,
            init: init.iter().copied().map(log_prob).collect(),
            trans: trans.iter().copied().map(log_prob).collect(),
            emit: emit.iter().copied().map(log_prob).collect(),
        })
    }

    pub fn nstates(&self) -> usize {
        self.states.len()
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn label(&self, state: usize) -> &str {
        &self.states[state]
    }

    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    /// Index of a raw byte in the alphabet, if it belongs to it.
    pub fn symbol_index(&self, symbol: u8) -> Option<usize> {
        match self.index[symbol as usize] {
            NO_SYMBOL => None,
            i => Some(i),
        }
    }

    /// Log-probability of entering `state` from the begin state.
    pub fn init(&self, state: usize) -> f64 {
        self.init[state]
    }

    /// Log-probability that `from` transitions to `to`.
    pub fn transition(&self, from: usize, to: usize) -> f64 {
        self.trans[from * self.states.len() + to]
    }

    /// Log-probability that `state` emits the symbol with index `symbol`.
    pub fn emission(&self, state: usize, symbol: usize) -> f64 {
        self.emit[state * self.alphabet.len() + symbol]
    }

    /// Drop every byte of `raw` that is not in the alphabet.
    ///
    /// This is the input adapter for plain-text sequence files:
    /// newlines, headers and ambiguity codes disappear and the decoder
    /// sees a clean sequence.
    pub fn restrict_to_alphabet(&self, raw: &[u8]) -> Vec<u8> {
        raw.iter()
            .copied()
            .filter(|&b| self.index[b as usize] != NO_SYMBOL)
            .collect()
    }

    /// Decode the most probable state path for `seq`.
    ///
    /// Returns one state index per observation and the log-probability
    /// of that path. An empty sequence decodes to an empty path with
    /// log-probability zero.
    pub fn decode(&self, seq: &[u8]) -> Result<Decoded> {
        let mut viterbi = Viterbi::new(self, seq)?;
        viterbi.fill();
        viterbi.traceback()
    }
}

/// The decoded state path and its log-probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// One state index per observation.
    pub path: Vec<usize>,
    /// Log-probability of the best path. Negative infinity when no
    /// path has positive probability, which is a valid outcome.
    pub log_prob: f64,
}

/// Per state and position, the best log-probability of any path ending
/// there plus the state it came from. Position 0 is the begin column,
/// fixed at log-probability zero.
#[derive(Debug, Clone)]
struct DpTable {
    score: Vec<f64>,
    from: Vec<usize>,
    columns: usize,
}

impl DpTable {
    fn new(nstates: usize, columns: usize) -> Self {
        let mut score = vec![f64::NEG_INFINITY; nstates * columns];
        let from = vec![BEGIN; nstates * columns];
        for state in 0..nstates {
            score[state * columns] = 0f64;
        }
        Self {
            score,
            from,
            columns,
        }
    }
    fn get(&self, state: usize, pos: usize) -> f64 {
        self.score[state * self.columns + pos]
    }
    fn get_from(&self, state: usize, pos: usize) -> usize {
        self.from[state * self.columns + pos]
    }
    fn set(&mut self, state: usize, pos: usize, score: f64, from: usize) {
        let slot = state * self.columns + pos;
        self.score[slot] = score;
        self.from[slot] = from;
    }
}

/// Two-phase Viterbi decoder over one observation sequence.
///
/// `fill` populates the table by increasing position and `traceback`
/// walks the recorded predecessors back from the best final state.
/// [`Hmm::decode`] runs both; the split form is for callers that want
/// to inspect the table afterwards.
#[derive(Debug, Clone)]
pub struct Viterbi<'a> {
    hmm: &'a Hmm,
    obs: Vec<usize>,
    table: DpTable,
    filled: bool,
}

impl<'a> Viterbi<'a> {
    /// Check every observation against the model alphabet and allocate
    /// the table. Nothing is computed yet.
    pub fn new(hmm: &'a Hmm, seq: &[u8]) -> Result<Self> {
        let obs = seq
            .iter()
            .map(|&b| {
                hmm.symbol_index(b).ok_or_else(|| {
                    let why = format!("no emission entry for observation {:?}", b as char);
                    DecodeError::InvalidModel(why)
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let table = DpTable::new(hmm.nstates(), seq.len() + 1);
        Ok(Self {
            hmm,
            obs,
            table,
            filled: false,
        })
    }

    /// Fill the table iteratively by increasing position.
    ///
    /// Position 1 is entered from the begin state, so only the initial
    /// probability matters there. Later positions maximize over every
    /// predecessor in state order; a candidate must be strictly greater
    /// to displace the incumbent, so the earliest state wins ties.
    pub fn fill(&mut self) {
        let n = self.hmm.nstates();
        for (i, &symbol) in self.obs.iter().enumerate() {
            let pos = i + 1;
            for state in 0..n {
                let (mut best, from) = if pos == 1 {
                    (self.hmm.init(state), BEGIN)
                } else {
                    let mut best = self.hmm.transition(0, state) + self.table.get(0, pos - 1);
                    let mut from = 0;
                    for k in 1..n {
                        let cand = self.hmm.transition(k, state) + self.table.get(k, pos - 1);
                        if cand > best {
                            best = cand;
                            from = k;
                        }
                    }
                    (best, from)
                };
                best += self.hmm.emission(state, symbol);
                self.table.set(state, pos, best, from);
            }
        }
        self.filled = true;
    }

    /// Best log-probability of any path ending in `state` at `index`.
    ///
    /// Index 0 is the begin column, always zero. Queries beyond the
    /// sequence length (or for an unknown state) are `None`, not an
    /// error. Entries past index 0 are meaningful once `fill` has run.
    pub fn score(&self, state: usize, index: usize) -> Option<f64> {
        if state >= self.hmm.nstates() || index > self.obs.len() {
            None
        } else {
            Some(self.table.get(state, index))
        }
    }

    /// Best log-probability over all states at `index`, or `None`
    /// beyond the sequence length.
    pub fn best_score(&self, index: usize) -> Option<f64> {
        if index > self.obs.len() {
            return None;
        }
        let mut best = self.table.get(0, index);
        for state in 1..self.hmm.nstates() {
            let score = self.table.get(state, index);
            if score > best {
                best = score;
            }
        }
        Some(best)
    }

    /// Reconstruct the best path over the whole sequence.
    pub fn traceback(&self) -> Result<Decoded> {
        self.traceback_at(self.obs.len())
    }

    /// Reconstruct the best path ending at `length`.
    ///
    /// Fails with `DecoderNotRun` before `fill`, and with
    /// `IndexOutOfRange` past the sequence length. A final column of
    /// negative infinities still tracebacks deterministically; the
    /// earliest state wins as everywhere else.
    pub fn traceback_at(&self, length: usize) -> Result<Decoded> {
        if !self.filled {
            return Err(DecodeError::DecoderNotRun);
        }
        if length > self.obs.len() {
            return Err(DecodeError::IndexOutOfRange {
                index: length,
                len: self.obs.len(),
            });
        }
        if length == 0 {
            return Ok(Decoded {
                path: Vec::new(),
                log_prob: 0f64,
            });
        }
        let mut current = 0;
        let mut best = self.table.get(0, length);
        for state in 1..self.hmm.nstates() {
            let score = self.table.get(state, length);
            if score > best {
                best = score;
                current = state;
            }
        }
        let mut path = vec![0; length];
        for pos in (1..=length).rev() {
            path[pos - 1] = current;
            if pos > 1 {
                current = self.table.get_from(current, pos);
            }
        }
        Ok(Decoded {
            path,
            log_prob: best,
        })
    }
}
