//! Counter contract definition and deployment payload assembly
//!
//! The contract source is a compile-time constant: the whole service exists
//! to compile this one contract and hand out its deployment calldata. This
//! module owns everything derived from that constant: the cache key, the
//! compiler artifact parsing, and the calldata layout.

use serde::{Deserialize, Serialize};

/// The fixed Counter contract source written into the forge workspace.
pub const COUNTER_SOURCE: &str = "// SPDX-License-Identifier: MIT\n\
pragma solidity ^0.8.24;\n\
\n\
contract Counter {\n\
\tuint256 public number;\n\
\tfunction setNumber(uint256 newNumber) public {\n\
\t\tnumber = newNumber;\n\
\t}\n\
\n\
\tfunction increment() public {\n\
\t\tnumber++;\n\
\t}\n\
}";

/// Contract source file name inside the workspace `src/` directory.
pub const CONTRACT_FILE: &str = "Counter.sol";

/// Fully qualified contract identifier passed to `forge verify-contract`.
pub const CONTRACT_IDENTIFIER: &str = "src/Counter.sol:Counter";

/// Project configuration written once into the workspace root.
pub const FOUNDRY_TOML: &str = "[profile.default]\n\
src = 'src'\n\
libs = ['lib']\n\
fallback_oz = true\n\
is_system = false\n\
mode = \"3\"";

/// zkSync ContractDeployer `create(bytes32,bytes32,bytes)` selector plus the
/// zeroed salt word.
const PAYLOAD_PREFIX: &str =
    "0x9c4d535b0000000000000000000000000000000000000000000000000000000000000000";

/// Calldata offset word (0x60) plus the zero-length constructor args word.
const PAYLOAD_SUFFIX: &str =
    "00000000000000000000000000000000000000000000000000000000000000600000000000000000000000000000000000000000000000000000000000000000";

/// Deployment payload as stored in the cache and returned to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractData {
    pub contract_data_value: String,
}

/// The slice of the forge zksync build artifact we care about.
///
/// The artifact carries full ABI and bytecode sections; only the factory
/// dependency hash ends up in the deployment calldata.
#[derive(Debug, Deserialize)]
pub struct DeploymentArtifact {
    /// Bytecode hash of the compiled contract.
    pub hash: String,
}

impl DeploymentArtifact {
    /// Parse an artifact from the JSON produced by `forge build --zksync`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Cache key for the deployment payload, derived from the contract source.
///
/// Same source, same key: a new key (and a recompilation) only happens when
/// the contract constant changes.
pub fn cache_key() -> String {
    format!("counter_contract_{:x}", md5::compute(COUNTER_SOURCE.as_bytes()))
}

/// Assemble the deployment calldata from the compiled bytecode hash.
pub fn build_payload(bytecode_hash: &str) -> ContractData {
    ContractData {
        contract_data_value: format!("{}{}{}", PAYLOAD_PREFIX, bytecode_hash, PAYLOAD_SUFFIX),
    }
}

/// Check that an address is `0x` followed by 40 hex digits.
///
/// The address ends up as a forge argument; it is always passed as a
/// discrete argv element, but rejecting malformed input up front gives a
/// clear error instead of a forge usage dump.
pub fn is_valid_address(address: &str) -> bool {
    let Some(hex_part) = address.strip_prefix("0x") else {
        return false;
    };
    hex_part.len() == 40 && hex::decode(hex_part).is_ok()
}
