//! Contains the [ChannelCostEstimate], which compares the cost of calldata and blob channels.

use crate::{
    config::ChannelConfig,
    params::{DERIVATION_VERSION_BYTE_SIZE, MAX_BLOB_DATA_SIZE, TX_DATA_NON_ZERO_GAS_EIP2028, TX_GAS},
    traits::GasPriceCaps,
};
use alloy_eips::eip4844::DATA_GAS_PER_BLOB;
use alloy_primitives::{Uint, U256};

/// A 512 bit unsigned integer.
///
/// Every product of a [ChannelCostEstimate] is below `2^410`, so no fee can overflow it.
pub type U512 = Uint<512, 8>;

/// Widens a fee to 512 bits.
fn widen(value: U256) -> U512 {
    U512::from_limbs_slice(value.as_limbs())
}

/// The estimated cost of a full channel submitted as calldata or as blobs, and the number of
/// channel bytes each would carry.
///
/// A calldata transaction is assumed to carry exactly one full frame, and a blob transaction
/// `target_num_frames` full blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelCostEstimate {
    /// The bytes of a full calldata frame, including the version byte.
    pub calldata_bytes: U512,
    /// The cost of a calldata transaction carrying `calldata_bytes`.
    pub calldata_cost: U512,
    /// The channel bytes carried by a full blob transaction.
    pub blob_data_bytes: U512,
    /// The cost of a blob transaction, including its intrinsic gas.
    pub blob_cost: U512,
}

impl ChannelCostEstimate {
    /// Estimates the cost of the `calldata` and `blobs` configs at the given gas prices.
    pub fn new(calldata: &ChannelConfig, blobs: &ChannelConfig, caps: &GasPriceCaps) -> Self {
        let calldata_price = widen(caps.base_fee) + widen(caps.tip_cap);

        let calldata_bytes =
            U512::from(calldata.max_frame_size) + U512::from(DERIVATION_VERSION_BYTE_SIZE);
        let calldata_gas =
            calldata_bytes * U512::from(TX_DATA_NON_ZERO_GAS_EIP2028) + U512::from(TX_GAS);
        let calldata_cost = calldata_gas * calldata_price;

        let num_blobs = U512::from(blobs.target_num_frames);
        let blob_gas = U512::from(DATA_GAS_PER_BLOB) * num_blobs;
        // Blob transactions still pay the intrinsic gas at the calldata price.
        let blob_cost =
            blob_gas * widen(caps.blob_base_fee) + U512::from(TX_GAS) * calldata_price;
        let blob_data_bytes = U512::from(MAX_BLOB_DATA_SIZE) * num_blobs;

        Self { calldata_bytes, calldata_cost, blob_data_bytes, blob_cost }
    }

    /// Returns `true` if calldata is strictly cheaper per byte than blobs.
    ///
    /// Compares `blob_cost / blob_data_bytes` to `calldata_cost / calldata_bytes` by cross
    /// multiplication. Ties go to blobs.
    pub fn prefers_calldata(&self) -> bool {
        self.blob_cost * self.calldata_bytes > self.calldata_cost * self.blob_data_bytes
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    fn caps(tip_cap: u64, base_fee: u64, blob_base_fee: u64) -> GasPriceCaps {
        GasPriceCaps::new(U256::from(tip_cap), U256::from(base_fee), U256::from(blob_base_fee))
    }

    fn estimate(caps: &GasPriceCaps) -> ChannelCostEstimate {
        ChannelCostEstimate::new(&ChannelConfig::calldata(), &ChannelConfig::blobs(1), caps)
    }

    #[test]
    fn test_estimate_unit_fees() {
        let estimate = estimate(&caps(1, 1, 1));
        assert_eq!(estimate.calldata_bytes, U512::from(120_001u64));
        assert_eq!(estimate.calldata_cost, U512::from((120_001u64 * 16 + 21_000) * 2));
        assert_eq!(estimate.blob_data_bytes, U512::from(130_044u64));
        assert_eq!(estimate.blob_cost, U512::from(131_072u64 + 21_000 * 2));
        assert!(!estimate.prefers_calldata());
    }

    #[test]
    fn test_estimate_expensive_blobs() {
        // Blob base fee six orders of magnitude above the calldata price.
        assert!(estimate(&caps(1, 1, 2_000_000)).prefers_calldata());
        assert!(estimate(&caps(0, 1, 1_000_000)).prefers_calldata());
    }

    #[test]
    fn test_estimate_multiple_blobs() {
        let estimate = ChannelCostEstimate::new(
            &ChannelConfig::calldata(),
            &ChannelConfig::blobs(6),
            &caps(1, 1, 1),
        );
        assert_eq!(estimate.blob_data_bytes, U512::from(130_044u64 * 6));
        assert_eq!(estimate.blob_cost, U512::from(131_072u64 * 6 + 21_000 * 2));
    }

    #[test]
    fn test_estimate_zero_fees() {
        let estimate = estimate(&caps(0, 0, 0));
        assert_eq!(estimate.calldata_cost, U512::ZERO);
        assert_eq!(estimate.blob_cost, U512::ZERO);
        assert!(!estimate.prefers_calldata());
    }

    #[test]
    fn test_estimate_tie_favors_blobs() {
        let calldata_bytes = 120_001u64;
        let calldata_gas = calldata_bytes * 16 + 21_000;
        let blob_gas = 131_072u64;
        let blob_data_bytes = 130_044u64;

        // Solves calldata_bytes * (blob_gas * q + 21_000 * p) == calldata_gas * p * blob_data_bytes.
        let p = calldata_bytes * blob_gas;
        let q = calldata_gas * blob_data_bytes - calldata_bytes * 21_000;

        let tie = estimate(&caps(0, p, q));
        assert_eq!(
            tie.blob_cost * tie.calldata_bytes,
            tie.calldata_cost * tie.blob_data_bytes
        );
        assert!(!tie.prefers_calldata());
        assert!(estimate(&caps(0, p, q + 1)).prefers_calldata());
        assert!(!estimate(&caps(0, p, q - 1)).prefers_calldata());
    }

    #[test]
    fn test_estimate_max_fees() {
        let max = GasPriceCaps::new(U256::MAX, U256::MAX, U256::MAX);
        let estimate = ChannelCostEstimate::new(
            &ChannelConfig { max_frame_size: u64::MAX, ..ChannelConfig::calldata() },
            &ChannelConfig::blobs(u64::MAX),
            &max,
        );
        let price = widen(U256::MAX) + widen(U256::MAX);
        let calldata_gas = (U512::from(u64::MAX) + U512::from(1u64)) * U512::from(16u64)
            + U512::from(21_000u64);
        assert_eq!(estimate.calldata_cost, calldata_gas * price);
        assert_eq!(estimate.calldata_cost / price, calldata_gas);
        assert!(estimate.blob_cost > widen(U256::MAX));
        // Both sides of the comparison are computed without wrapping.
        assert_eq!(
            (estimate.blob_cost * estimate.calldata_bytes) / estimate.calldata_bytes,
            estimate.blob_cost
        );
        assert_eq!(
            (estimate.calldata_cost * estimate.blob_data_bytes) / estimate.blob_data_bytes,
            estimate.calldata_cost
        );
    }

    proptest! {
        #[test]
        fn test_decision_is_scale_invariant(
            tip_cap in 0u64..1_000_000_000,
            base_fee in 0u64..1_000_000_000_000,
            blob_base_fee in 0u64..1_000_000_000_000,
            scale in 1u64..1_000_000,
        ) {
            let scaled = GasPriceCaps::new(
                U256::from(tip_cap) * U256::from(scale),
                U256::from(base_fee) * U256::from(scale),
                U256::from(blob_base_fee) * U256::from(scale),
            );
            prop_assert_eq!(
                estimate(&caps(tip_cap, base_fee, blob_base_fee)).prefers_calldata(),
                estimate(&scaled).prefers_calldata()
            );
        }

        #[test]
        fn test_decision_is_monotonic_in_blob_fee(
            tip_cap in 0u64..1_000_000_000,
            base_fee in 0u64..1_000_000_000_000,
            blob_base_fee in 0u64..1_000_000_000_000,
            increase in 0u64..1_000_000_000_000,
        ) {
            if estimate(&caps(tip_cap, base_fee, blob_base_fee)).prefers_calldata() {
                prop_assert!(
                    estimate(&caps(tip_cap, base_fee, blob_base_fee + increase)).prefers_calldata()
                );
            }
        }
    }
}
