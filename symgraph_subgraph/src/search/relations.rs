//! Candidate relation sets for the neighbours of one pattern node.
//!
//! A relation set pairs every neighbour with a distinct candidate thing;
//! neighbours that are already matched only accept their existing image. Nodes lying on a common symmetry cycle are interchangeable, so for
//! a run of neighbours forming a known cycle the candidates are only taken in
//! increasing pool position; all other pairings of that run are relabelings
//! of one already produced.

/// One complete pairing of neighbours with candidate things.
pub type RelationSet<N, T> = Vec<(N, T)>;

/// Every injective pairing of `sources` into `pool` accepted by `worth_trying`.
pub fn all_relations<N: Clone, T: Clone>(
    sources: &[N],
    pool: &[T],
    worth_trying: &impl Fn(&N, &T) -> bool,
) -> Vec<RelationSet<N, T>> {
    symmetric_relations(sources, pool, worth_trying, &|_: &[N]| 0)
}

/// Pairings of `sources` into `pool`, skipping relabelings along cycles.
///
/// `prefix_len` returns the length of the longest prefix of a source
/// sequence that is a known cycle, or 0.
pub fn symmetric_relations<N: Clone, T: Clone>(
    sources: &[N],
    pool: &[T],
    worth_trying: &impl Fn(&N, &T) -> bool,
    prefix_len: &impl Fn(&[N]) -> usize,
) -> Vec<RelationSet<N, T>> {
    let mut found = Vec::new();
    let mut current = Vec::with_capacity(sources.len());
    extend_relations(
        sources,
        pool,
        0,
        worth_trying,
        prefix_len,
        &mut current,
        &mut found,
    );
    found
}

fn extend_relations<N: Clone, T: Clone>(
    sources: &[N],
    pool: &[T],
    ordered: usize,
    worth_trying: &impl Fn(&N, &T) -> bool,
    prefix_len: &impl Fn(&[N]) -> usize,
    current: &mut Vec<(N, T)>,
    found: &mut Vec<RelationSet<N, T>>,
) {
    let Some((head, rest)) = sources.split_first() else {
        found.push(current.clone());
        return;
    };
    if pool.len() < sources.len() {
        return;
    }

    let ordered = if ordered == 0 {
        prefix_len(sources)
    } else {
        ordered
    };

    if ordered > 0 {
        // Leave enough of the pool for the remaining sources.
        let span = pool.len() - sources.len() + 1;
        for (index, candidate) in pool.iter().enumerate().take(span) {
            if !worth_trying(head, candidate) {
                continue;
            }
            current.push((head.clone(), candidate.clone()));
            extend_relations(
                rest,
                &pool[index + 1..],
                ordered - 1,
                worth_trying,
                prefix_len,
                current,
                found,
            );
            current.pop();
        }
    } else {
        for (index, candidate) in pool.iter().enumerate() {
            if !worth_trying(head, candidate) {
                continue;
            }
            let remaining: Vec<T> = pool[..index]
                .iter()
                .chain(&pool[index + 1..])
                .cloned()
                .collect();
            current.push((head.clone(), candidate.clone()));
            extend_relations(
                rest,
                &remaining,
                0,
                worth_trying,
                prefix_len,
                current,
                found,
            );
            current.pop();
        }
    }
}
