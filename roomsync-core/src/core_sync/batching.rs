//! Member batch partitioning
//!
//! The remote member-join endpoint accepts at most `MEMBER_BATCH_LIMIT`
//! users per request. Batches carry no ordering guarantee between each
//! other; partitioning preserves input order within and across batches so
//! failure selection stays deterministic by submission index.

use crate::core_conversation::UserId;

/// Maximum users per member-join request
pub const MEMBER_BATCH_LIMIT: usize = 256;

/// Partition `users` into consecutive batches of at most `limit`
pub fn partition_members(users: &[UserId], limit: usize) -> Vec<Vec<UserId>> {
    users.chunks(limit).map(|chunk| chunk.to_vec()).collect()
}

/// Split `users` into the creation payload and the overflow added later
pub fn split_at_limit(users: &[UserId], limit: usize) -> (Vec<UserId>, Vec<UserId>) {
    if users.len() <= limit {
        (users.to_vec(), Vec::new())
    } else {
        let (initial, overflow) = users.split_at(limit);
        (initial.to_vec(), overflow.to_vec())
    }
}
