use litmock::MemberId;
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::utils::{leak, member_name};

fn hash_of(id: &MemberId) -> u64 {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    #[test]
    fn test_identity_is_stable(owner in member_name(), name in member_name(), params in "[a-z0-9:, ]{0,24}") {
        let owner = leak(owner);
        let name = leak(name);
        let signature = leak(format!("fn {}(&self, {})", name, params));

        let first = MemberId::new(owner, name, signature);
        let second = MemberId::new(owner, name, signature);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first.key(), second.key());
        prop_assert_eq!(hash_of(&first), hash_of(&second));
    }

    #[test]
    fn test_overloads_do_not_collide(name in member_name(), a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        prop_assume!(a != b);
        let name = leak(name);
        let first = MemberId::new("Owner", name, leak(format!("fn {}(&self, x: {})", name, a)));
        let second = MemberId::new("Owner", name, leak(format!("fn {}(&self, x: {})", name, b)));
        prop_assert_ne!(first, second);
    }

    #[test]
    fn test_combined_key_mixes_owner_and_member(owner in member_name(), name in member_name()) {
        let owner = leak(owner);
        let name = leak(name);
        let id = MemberId::new(owner, name, name);
        prop_assert_eq!(id.key(), id.owner_key().wrapping_mul(397) ^ id.member_hash());
    }
}
