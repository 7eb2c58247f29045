use std::collections::HashSet;
use std::ptr;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Members = HashSet<String>;

/// A set of string members guarded by its own read/write lock.
///
/// Mutations take the write lock. Reads take the read lock and hand back copies, so a returned
/// snapshot never changes when the set is mutated afterwards.
#[derive(Debug, Default)]
pub struct MultiSet {
    members: RwLock<Members>,
}

impl MultiSet {
    pub fn new() -> MultiSet {
        MultiSet::default()
    }

    /// Adds every member not already present and returns how many were new.
    pub fn add<S: AsRef<str>>(&self, members: &[S]) -> usize {
        let mut set = self.write();
        let mut added = 0;
        for member in members {
            let member: &str = member.as_ref();
            if !set.contains(member) {
                set.insert(member.to_string());
                added += 1;
            }
        }
        added
    }

    /// Removes the given members and returns how many were present.
    pub fn delete<S: AsRef<str>>(&self, members: &[S]) -> usize {
        let mut set = self.write();
        let mut deleted = 0;
        for member in members {
            let member: &str = member.as_ref();
            if set.remove(member) {
                deleted += 1;
            }
        }
        deleted
    }

    pub fn exists(&self, member: &str) -> bool {
        self.read().contains(member)
    }

    pub fn card(&self) -> usize {
        self.read().len()
    }

    pub fn elems(&self) -> Vec<String> {
        self.read().iter().cloned().collect()
    }

    /// Members of `self` that are in none of `others`.
    pub fn diff(&self, others: &[&MultiSet]) -> Vec<String> {
        self.diff_members(others).into_iter().collect()
    }

    pub fn diff_set(&self, others: &[&MultiSet]) -> MultiSet {
        MultiSet::from(self.diff_members(others))
    }

    fn diff_members(&self, others: &[&MultiSet]) -> Members {
        let mut dup = self.snapshot();
        for other in others {
            for member in other.elems() {
                dup.remove(&member);
            }
        }
        dup
    }

    /// Members present in at least one of `sets`. An empty operand list yields an empty result.
    pub fn union(sets: &[&MultiSet]) -> Vec<String> {
        union_members(sets).into_iter().collect()
    }

    pub fn union_set(sets: &[&MultiSet]) -> MultiSet {
        MultiSet::from(union_members(sets))
    }

    /// Members present in every one of `sets`. An empty operand list yields an empty result.
    pub fn intersection(sets: &[&MultiSet]) -> Vec<String> {
        let Some(smallest) = smallest(sets) else {
            return vec![];
        };

        let candidates = sets[smallest].elems();
        if candidates.is_empty() {
            return vec![];
        }

        candidates
            .into_iter()
            .filter(|member| {
                sets.iter()
                    .enumerate()
                    .filter(|(i, _)| *i != smallest)
                    .all(|(_, set)| set.exists(member))
            })
            .collect()
    }

    pub fn intersection_set(sets: &[&MultiSet]) -> MultiSet {
        MultiSet::from_iter(MultiSet::intersection(sets))
    }

    /// Moves `member` from `src` into `dest`. Returns `false`, touching neither set, when `src`
    /// does not hold it.
    ///
    /// Both write locks are held for the whole move, taken in address order so concurrent moves
    /// in opposite directions cannot deadlock.
    pub fn move_member(member: &str, src: &MultiSet, dest: &MultiSet) -> bool {
        if ptr::eq(src, dest) {
            return src.exists(member);
        }

        let (mut src_members, mut dest_members) = if (src as *const MultiSet) < (dest as *const _)
        {
            let src_members = src.write();
            (src_members, dest.write())
        } else {
            let dest_members = dest.write();
            (src.write(), dest_members)
        };

        if !src_members.remove(member) {
            return false;
        }
        dest_members.insert(member.to_string());
        true
    }

    fn snapshot(&self) -> Members {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, Members> {
        self.members.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Members> {
        self.members.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Members> for MultiSet {
    fn from(members: Members) -> Self {
        MultiSet {
            members: RwLock::new(members),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for MultiSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        MultiSet::from(iter.into_iter().map(Into::into).collect::<Members>())
    }
}

// Seeds the accumulator with a copy of the largest operand so the fewest members are reinserted.
fn union_members(sets: &[&MultiSet]) -> Members {
    let Some(largest) = largest(sets) else {
        return Members::new();
    };

    let mut members = sets[largest].snapshot();
    for (_, set) in sets.iter().enumerate().filter(|(i, _)| *i != largest) {
        members.extend(set.elems());
    }
    members
}

/// Index of the first operand with the smallest cardinality.
fn smallest(sets: &[&MultiSet]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, set) in sets.iter().enumerate() {
        let card = set.card();
        if best.map_or(true, |(_, min)| card < min) {
            best = Some((i, card));
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the first operand with the largest cardinality.
fn largest(sets: &[&MultiSet]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, set) in sets.iter().enumerate() {
        let card = set.card();
        if best.map_or(true, |(_, max)| card > max) {
            best = Some((i, card));
        }
    }
    best.map(|(i, _)| i)
}
