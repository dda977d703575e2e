// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use understory_radial::ConfigError;

/// Why a [`StrategyHost`](crate::StrategyHost) refused an operation or reports
/// itself as misconfigured.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HostError {
    /// The operation needs a layout strategy and none is assigned.
    MissingStrategy,
    /// The class resolver has no default class, so gap slots and items
    /// without a hint cannot be given a widget.
    MissingDefaultClass,
    /// The assigned strategy is misconfigured.
    Strategy(ConfigError),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStrategy => f.write_str("no layout strategy assigned"),
            Self::MissingDefaultClass => f.write_str("no default entry widget class set"),
            Self::Strategy(err) => write!(f, "layout strategy: {err}"),
        }
    }
}

impl core::error::Error for HostError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Strategy(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for HostError {
    fn from(err: ConfigError) -> Self {
        Self::Strategy(err)
    }
}
