//! Online gas pricers backed by an L1 JSON-RPC endpoint.

mod gas_pricer;
pub use gas_pricer::{AlloyGasPricer, AlloyGasPricerError};
