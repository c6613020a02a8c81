//! Recipient resolution: literal addresses and ENS names.
//!
//! Name resolution implements the two-step registry lookup directly,
//! `resolver(node)` on the registry followed by `addr(node)` on the
//! resolver, instead of relying on provider-level name resolution.

use alloy::{
    primitives::{keccak256, Address, B256},
    providers::DynProvider,
    sol,
};
use tracing::debug;

use crate::error::Result;

sol! {
    #[sol(rpc)]
    interface EnsRegistry {
        function resolver(bytes32 node) external view returns (address);
    }

    #[sol(rpc)]
    interface EnsResolver {
        function addr(bytes32 node) external view returns (address);
    }
}

/// Canonical ENS registry deployment, shared by mainnet and the public
/// testnets.
pub const DEFAULT_ENS_REGISTRY: &str = "0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e";

/// Computes the ENS namehash of `name`.
///
/// The empty name hashes to zero and each label folds in right to left.
/// Callers are expected to pass an already normalized name; no case
/// folding or UTS-46 processing happens here.
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;
    if name.is_empty() {
        return node;
    }
    for label in name.rsplit('.') {
        let label_hash = keccak256(label.as_bytes());
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(node.as_slice());
        buf[32..].copy_from_slice(label_hash.as_slice());
        node = keccak256(buf);
    }
    node
}

/// Parses a literal hex address, enforcing the EIP-55 checksum for
/// mixed-case input.
///
/// All-lowercase and all-uppercase hex bypass the checksum, matching
/// standard address validation. Returns `None` for anything that is not a
/// 20-byte `0x` hex string.
pub fn parse_address(input: &str) -> Option<Address> {
    let s = input.trim();
    if !s.starts_with("0x") || s.len() != 42 {
        return None;
    }
    let address: Address = s.parse().ok()?;
    let hex = &s[2..];
    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(s, None).ok()?;
    }
    Some(address)
}

/// Resolves `name` through the ENS registry.
///
/// Returns `Ok(None)` when the name has no resolver or the resolver
/// reports the zero address.
pub async fn resolve_name(
    provider: &DynProvider,
    registry: Address,
    name: &str,
) -> Result<Option<Address>> {
    let node = namehash(name);

    let registry = EnsRegistry::new(registry, provider.clone());
    let resolver_address = registry.resolver(node).call().await?;
    if resolver_address == Address::ZERO {
        debug!(name, "no resolver registered");
        return Ok(None);
    }

    let resolver = EnsResolver::new(resolver_address, provider.clone());
    let resolved = resolver.addr(node).call().await?;
    if resolved == Address::ZERO {
        debug!(name, "resolver returned the zero address");
        return Ok(None);
    }
    Ok(Some(resolved))
}

/// Resolves a recipient identifier to an address.
///
/// Literal addresses are accepted without any network traffic. Everything
/// else goes through ENS; lookups that fail for any reason, including RPC
/// errors, yield `None`.
pub async fn resolve_recipient(
    provider: &DynProvider,
    registry: Address,
    input: &str,
) -> Option<Address> {
    if let Some(address) = parse_address(input) {
        return Some(address);
    }
    let name = input.trim();
    if name.is_empty() {
        return None;
    }
    match resolve_name(provider, registry, name).await {
        Ok(resolved) => resolved,
        Err(error) => {
            debug!(name, %error, "ENS resolution failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, b256};

    use super::*;

    #[test]
    fn namehash_of_empty_name_is_zero() {
        assert_eq!(namehash(""), B256::ZERO);
    }

    #[test]
    fn namehash_matches_reference_vectors() {
        assert_eq!(
            namehash("eth"),
            b256!("93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae")
        );
        assert_eq!(
            namehash("foo.eth"),
            b256!("de9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f")
        );
        assert_eq!(
            namehash("vitalik.eth"),
            b256!("ee6c4522aab0003e8d14cd40a6af439055fd2577951148c14b6cea9a53475835")
        );
    }

    #[test]
    fn parse_address_accepts_checksummed_input() {
        let expected = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
        assert_eq!(parse_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"), Some(expected));
    }

    #[test]
    fn parse_address_accepts_lowercase_input() {
        let expected = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
        assert_eq!(parse_address("0xd8da6bf26964af9d7eed9e03e53415d37aa96045"), Some(expected));
    }

    #[test]
    fn parse_address_rejects_bad_checksum() {
        // Leading hex digit uppercased, which breaks the EIP-55 casing.
        assert_eq!(parse_address("0xD8dA6BF26964aF9D7eEd9e03E53415D37aA96045"), None);
    }

    #[test]
    fn parse_address_trims_surrounding_whitespace() {
        let expected = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
        assert_eq!(parse_address("  0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045 "), Some(expected));
    }

    #[test]
    fn parse_address_rejects_non_addresses() {
        assert_eq!(parse_address(""), None);
        assert_eq!(parse_address("vitalik.eth"), None);
        assert_eq!(parse_address("0x1234"), None);
        assert_eq!(parse_address("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045"), None);
        assert_eq!(parse_address("0xzzzz6BF26964aF9D7eEd9e03E53415D37aA96045"), None);
    }
}
