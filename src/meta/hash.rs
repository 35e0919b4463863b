//! Name hashing.

/// A 32-bit hash of a name. Ids of tree nodes and names of signals are hashed.
pub type HashedName = u32;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Hash a name with 32-bit FNV-1a.
///
/// Usable in `const` context so that ids and signals can be declared as
/// constants.
pub const fn hash(name: &str) -> HashedName {
    let bytes = name.as_bytes();
    let mut value = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        value ^= bytes[i] as u32;
        value = value.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    value
}
