//! Set partition over wire indices with the merge/split pair action and
//! the derived cluster ordering.
//!
//! Each grouping pass owns one `Partition`. Groups hold sorted member
//! indices and the group list is kept sorted by smallest member, so a
//! partition has exactly one representation and renders stably.

/// A partition of `0..len` into disjoint, covering groups.
///
/// Invariants held after every operation: every group is non-empty and
/// sorted ascending, every index in `0..len` appears in exactly one
/// group, and groups are ordered by their smallest member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    groups: Vec<Vec<usize>>,
    len: usize,
}

impl Partition {
    /// The discrete partition: every index in its own group.
    pub fn discrete(len: usize) -> Self {
        let partition = Self {
            groups: (0..len).map(|i| vec![i]).collect(),
            len,
        };
        partition.debug_validate();
        partition
    }

    /// Number of indices partitioned.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Groups ordered by smallest member, members sorted ascending.
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Position of the group containing `index` in the ordered group
    /// list. Callers keep `index` below `len`; every in-range index sits
    /// in exactly one group.
    pub fn group_index_of(&self, index: usize) -> usize {
        debug_assert!(index < self.len, "index {index} out of range");
        self.groups.iter().position(|g| g.contains(&index)).unwrap()
    }

    /// Members of the group containing `index`.
    pub fn group_of(&self, index: usize) -> &[usize] {
        &self.groups[self.group_index_of(index)]
    }

    /// Midpoint of the span of the group containing `index`, as a
    /// fractional slot position.
    pub fn group_span_mid(&self, index: usize) -> f64 {
        let group = self.group_of(index);
        (group[0] + group[group.len() - 1]) as f64 * 0.5
    }

    /// The pair action. If `pending` and `clicked` share a group, that
    /// group splits back into singletons. Otherwise `clicked`'s whole
    /// group merges into `pending`'s. Selecting the same wire twice
    /// arrives here with `pending == clicked` and takes the split path.
    pub fn act_on_pair(&mut self, pending: usize, clicked: usize) {
        let clicked_ix = self.group_index_of(clicked);
        let pending_ix = self.group_index_of(pending);
        if clicked_ix == pending_ix {
            let members = self.groups.remove(clicked_ix);
            self.groups.extend(members.into_iter().map(|i| vec![i]));
        } else {
            let members = self.groups.remove(clicked_ix);
            // Removing clicked's group can shift pending's position.
            let pending_ix = pending_ix - usize::from(clicked_ix < pending_ix);
            self.groups[pending_ix].extend(members);
            self.groups[pending_ix].sort_unstable();
        }
        self.groups.sort_by_key(|g| g[0]);
        self.debug_validate();
    }

    /// Cluster the groups for rendering. Starting from the ordered group
    /// list, each cluster chains together groups whose spans do not
    /// overlap: take the first remaining group, then repeatedly append
    /// the first remaining group whose smallest member is above the
    /// chain's largest, until none qualifies. Groups skipped by one
    /// chain seed the next, so interleaved spans land in different
    /// clusters and get different bend angles.
    pub fn clusters(&self) -> Vec<Vec<Vec<usize>>> {
        let mut remaining = self.groups.clone();
        let mut clusters = Vec::new();
        while !remaining.is_empty() {
            let first = remaining.remove(0);
            let mut chain_max = first[first.len() - 1];
            let mut chain = vec![first];
            while let Some(found) = remaining.iter().position(|g| g[0] > chain_max) {
                let group = remaining.remove(found);
                chain_max = group[group.len() - 1];
                chain.push(group);
            }
            clusters.push(chain);
        }
        clusters
    }

    /// Position of the cluster containing `index` in cluster order.
    pub fn cluster_index_of(&self, index: usize) -> usize {
        debug_assert!(index < self.len, "index {index} out of range");
        self.clusters()
            .iter()
            .position(|chain| chain.iter().any(|g| g.contains(&index)))
            .unwrap()
    }

    fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        {
            let mut seen = vec![false; self.len];
            for group in &self.groups {
                assert!(!group.is_empty(), "empty group");
                assert!(
                    group.windows(2).all(|w| w[0] < w[1]),
                    "group not sorted: {group:?}"
                );
                for &index in group {
                    assert!(index < self.len, "index {index} out of range");
                    assert!(!seen[index], "index {index} in two groups");
                    seen[index] = true;
                }
            }
            assert!(seen.into_iter().all(|s| s), "partition does not cover range");
            assert!(
                self.groups.windows(2).all(|w| w[0][0] < w[1][0]),
                "groups not ordered by smallest member"
            );
        }
    }
}

// ─────────────────────────── Tests ───────────────────────────
