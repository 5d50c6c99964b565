//! Member-list reconciliation.
//!
//! Turns the stored members of a trip into the desired list with the fewest
//! row operations. Members are matched by normalized email; a matched member
//! keeps its identifier, status and customer link.

use std::collections::{HashMap, HashSet};

use super::{Member, MemberId, MemberList, TripId};

/// Row operations that take a trip's stored members to a desired list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberChanges {
    /// New rows, in desired-list order.
    pub inserts: Vec<Member>,
    /// Stored rows with new values, identifiers unchanged.
    pub updates: Vec<Member>,
    /// Stored rows to remove, in stored order.
    pub deletes: Vec<MemberId>,
}

impl MemberChanges {
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.updates.is_empty() && self.deletes.is_empty()
    }
}

#[tracing::instrument(name = "Reconciling trip members", skip_all)]
pub fn reconcile_members(
    trip_id: &TripId,
    stored: &[Member],
    desired: &MemberList,
) -> MemberChanges {
    let mut changes = MemberChanges::default();

    // A repeated stored email breaks the uniqueness invariant: the first row
    // wins and the rest are removed.
    let mut stored_by_email = HashMap::<String, &Member>::with_capacity(stored.len());
    for member in stored {
        let key = member.email.normalized();
        if stored_by_email.contains_key(&key) {
            changes.deletes.push(member.member_id);
        } else {
            stored_by_email.insert(key, member);
        }
    }

    let mut desired_emails = HashSet::with_capacity(desired.len());
    for draft in desired.iter() {
        let key = draft.email.normalized();
        match stored_by_email.get(&key) {
            Some(existing) => {
                if existing.name != draft.name || existing.email != draft.email {
                    changes.updates.push(Member {
                        name: draft.name.clone(),
                        email: draft.email.clone(),
                        ..(*existing).clone()
                    });
                }
            }
            None => changes.inserts.push(Member::new(*trip_id, draft)),
        }
        desired_emails.insert(key);
    }

    for member in stored {
        let key = member.email.normalized();
        let is_kept = stored_by_email
            .get(&key)
            .is_some_and(|kept| kept.member_id == member.member_id);
        if is_kept && !desired_emails.contains(&key) {
            changes.deletes.push(member.member_id);
        }
    }

    tracing::debug!(
        inserts = changes.inserts.len(),
        updates = changes.updates.len(),
        deletes = changes.deletes.len(),
        "member changes computed"
    );

    changes
}

/// Applies `changes` to an in-memory member list the way a store applies
/// them to rows: deletes, then updates in place, then inserts appended.
pub fn apply_member_changes(members: &mut Vec<Member>, changes: &MemberChanges) {
    members.retain(|member| !changes.deletes.contains(&member.member_id));
    for updated in changes.updates.iter() {
        if let Some(member) = members
            .iter_mut()
            .find(|member| member.member_id == updated.member_id)
        {
            *member = updated.clone();
        }
    }
    members.extend(changes.inserts.iter().cloned());
}
