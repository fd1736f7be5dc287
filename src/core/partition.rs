use crate::domain::model::{Participant, Partition, Team};
use crate::utils::error::{MixError, Result};
use std::collections::HashSet;

pub const POOL_SIZE: usize = 10;
pub const TEAM_SIZE: usize = POOL_SIZE / 2;

/// k-combinations of `0..n` as index vectors, in lexicographic order.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        // Rightmost slot that can still move forward.
        let mut i = self.k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] != i + self.n - self.k {
                break;
            }
        }

        self.indices[i] += 1;
        for j in i + 1..self.k {
            self.indices[j] = self.indices[j - 1] + 1;
        }

        Some(self.indices.clone())
    }
}

pub fn validate_pool(pool: &[Participant]) -> Result<()> {
    if pool.len() != POOL_SIZE {
        return Err(MixError::InvalidInput {
            reason: format!("expected {} participants, got {}", POOL_SIZE, pool.len()),
        });
    }

    let mut seen = HashSet::with_capacity(pool.len());
    for participant in pool {
        if !seen.insert(participant.id) {
            return Err(MixError::InvalidInput {
                reason: format!("participant {} appears more than once", participant.id),
            });
        }
    }

    Ok(())
}

/// Every split of the pool into two teams of five.
///
/// Team A walks the 5-combinations of the pool in lexicographic index order
/// and Team B is the complement in pool order, so each unordered split is
/// produced twice (once per labelling). Callers rely on this order for the
/// tie-break in [`crate::core::selector::select_best`].
pub fn partitions(pool: &[Participant]) -> Result<impl Iterator<Item = Partition> + '_> {
    validate_pool(pool)?;

    Ok(Combinations::new(pool.len(), TEAM_SIZE).map(move |combo| {
        let mut in_team_a = [false; POOL_SIZE];
        for &index in &combo {
            in_team_a[index] = true;
        }

        let team_a = combo.iter().map(|&index| pool[index].clone()).collect();
        let team_b = pool
            .iter()
            .enumerate()
            .filter(|(index, _)| !in_team_a[*index])
            .map(|(_, participant)| participant.clone())
            .collect();

        Partition {
            team_a: Team::new(team_a),
            team_b: Team::new(team_b),
        }
    }))
}
