//! Member identity for mocked interfaces.
//!
//! Every method or property of a mocked trait is named by a typed token,
//! [`Member<T, R>`], generated next to the substitute type. The token carries
//! a [`MemberId`] computed at compile time from the owning type name and the
//! member's full signature, so setups, recorded calls and verifications all
//! agree on the key without inspecting arguments.

use crate::{MockError, Result};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over a string, usable in `const` context.
pub const fn fnv1a(text: &str) -> u64 {
    let bytes = text.as_bytes();
    let mut hash = FNV_OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Whether a member is called like a method or read like a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Method,
    Property,
}

/// Stable key for one interface member.
///
/// Equality and hashing only look at the combined hash of the owning type
/// and the member signature. The display name is kept for diagnostics.
#[derive(Clone, Copy)]
pub struct MemberId {
    owner_key: u64,
    member_hash: u64,
    combined: u64,
    display_name: &'static str,
}

impl MemberId {
    pub const fn new(owner: &'static str, name: &'static str, signature: &'static str) -> Self {
        let owner_key = fnv1a(owner);
        let member_hash = fnv1a(signature);
        Self {
            owner_key,
            member_hash,
            combined: owner_key.wrapping_mul(397) ^ member_hash,
            display_name: name,
        }
    }

    pub const fn owner_key(&self) -> u64 {
        self.owner_key
    }

    pub const fn member_hash(&self) -> u64 {
        self.member_hash
    }

    pub const fn key(&self) -> u64 {
        self.combined
    }

    pub const fn name(&self) -> &'static str {
        self.display_name
    }
}

impl PartialEq for MemberId {
    fn eq(&self, other: &Self) -> bool {
        self.combined == other.combined
    }
}

impl Eq for MemberId {}

impl Hash for MemberId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.combined);
    }
}

impl fmt::Debug for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{:016x}", self.display_name, self.combined)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name)
    }
}

/// Typed reference to a member of `T` returning `R`.
///
/// `T` is the mocked interface (usually `dyn Trait`) or a static surface
/// type. The result type ties `setup` values to the member at compile time.
pub struct Member<T: ?Sized, R> {
    id: MemberId,
    kind: MemberKind,
    signature: &'static str,
    _marker: PhantomData<fn(&T) -> R>,
}

impl<T: ?Sized, R> Member<T, R> {
    pub const fn method(owner: &'static str, name: &'static str, signature: &'static str) -> Self {
        Self {
            id: MemberId::new(owner, name, signature),
            kind: MemberKind::Method,
            signature,
            _marker: PhantomData,
        }
    }

    pub const fn property(
        owner: &'static str,
        name: &'static str,
        signature: &'static str,
    ) -> Self {
        Self {
            id: MemberId::new(owner, name, signature),
            kind: MemberKind::Property,
            signature,
            _marker: PhantomData,
        }
    }

    pub const fn id(&self) -> MemberId {
        self.id
    }

    pub const fn kind(&self) -> MemberKind {
        self.kind
    }

    pub const fn name(&self) -> &'static str {
        self.id.name()
    }

    pub const fn signature(&self) -> &'static str {
        self.signature
    }
}

impl<T: ?Sized, R> Clone for Member<T, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized, R> Copy for Member<T, R> {}

impl<T: ?Sized, R> fmt::Debug for Member<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Static description of one member, as listed by a [`crate::Mockable`] type.
#[derive(Debug, Clone, Copy)]
pub struct MemberDescriptor {
    pub id: MemberId,
    pub kind: MemberKind,
    pub name: &'static str,
    pub signature: &'static str,
    /// `(name, type)` pairs in declaration order.
    pub params: &'static [(&'static str, &'static str)],
    pub returns: &'static str,
}

/// Resolve `id` against the declared members of `owner`.
///
/// The reference must match exactly one declared member.
pub fn resolve(owner: &'static str, members: &[MemberDescriptor], id: MemberId) -> Result<MemberId> {
    let mut matches = members.iter().filter(|descriptor| descriptor.id == id);
    match (matches.next(), matches.next()) {
        (Some(descriptor), None) => Ok(descriptor.id),
        (None, _) => Err(MockError::InvalidReference {
            owner: owner.to_string(),
            member: id.name().to_string(),
            reason: "member is not declared on this type".to_string(),
        }),
        (Some(_), Some(_)) => Err(MockError::InvalidReference {
            owner: owner.to_string(),
            member: id.name().to_string(),
            reason: "reference matches more than one member".to_string(),
        }),
    }
}
