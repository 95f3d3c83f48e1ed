#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(any(test, feature = "test-utils")), warn(unused_crate_dependencies))]

/// Re-export commonly used types and traits.
pub mod prelude {
    pub use crate::{
        config::ChannelConfig,
        cost::ChannelCostEstimate,
        errors::{ChannelConfigError, FeeQuoteError},
        selector::DynamicChannelConfig,
        traits::{ChannelConfigProvider, GasPriceCaps, GasPricer},
    };
}

pub mod config;
pub mod cost;
pub mod errors;
pub mod params;
pub mod selector;
pub mod traits;

pub use config::ChannelConfig;
pub use selector::DynamicChannelConfig;
pub use traits::{ChannelConfigProvider, GasPriceCaps, GasPricer};

#[cfg(feature = "online")]
pub mod online;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
