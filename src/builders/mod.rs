//! Detector builders.
//!
//! Each builder owns the sub-builders it places: the world owns the
//! detector enclosure, which owns the cryostat, which owns the TPC. A
//! builder is configured once from validated parameters and constructed
//! once into a [`GeometryStore`](crate::store::GeometryStore).

pub mod cryostat;
pub mod enclosure;
pub mod materials;
pub mod tpc;
pub mod world;

pub use cryostat::CryostatBuilder;
pub use enclosure::DetectorEnclosureBuilder;
pub use tpc::{Crm, TpcBuilder};
pub use world::WorldBuilder;

use std::fmt;

use crate::error::BuilderError;

/// Life-cycle state of a builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuilderState {
    #[default]
    Unconfigured,
    Configured,
    Constructed,
}

impl fmt::Display for BuilderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuilderState::Unconfigured => f.write_str("unconfigured"),
            BuilderState::Configured => f.write_str("configured"),
            BuilderState::Constructed => f.write_str("constructed"),
        }
    }
}

impl BuilderState {
    /// Moves from `Unconfigured` to `Configured`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidTransition`] from any other state.
    pub fn begin_configure(&mut self, builder: &str) -> Result<(), BuilderError> {
        self.advance(builder, BuilderState::Unconfigured, BuilderState::Configured, "configure")
    }

    /// Moves from `Configured` to `Constructed`.
    ///
    /// The transition happens before any geometry is registered, so a
    /// construction that fails half way cannot be retried.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidTransition`] from any other state.
    pub fn begin_construct(&mut self, builder: &str) -> Result<(), BuilderError> {
        self.advance(builder, BuilderState::Configured, BuilderState::Constructed, "construct")
    }

    fn advance(
        &mut self,
        builder: &str,
        from: BuilderState,
        to: BuilderState,
        action: &'static str,
    ) -> Result<(), BuilderError> {
        if *self != from {
            return Err(BuilderError::InvalidTransition {
                builder: builder.to_owned(),
                state: *self,
                action,
            });
        }
        *self = to;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn states_advance_in_order() {
        let mut state = BuilderState::default();
        state.begin_configure("b").unwrap();
        assert_eq!(state, BuilderState::Configured);
        state.begin_construct("b").unwrap();
        assert_eq!(state, BuilderState::Constructed);
    }

    #[test]
    fn construct_before_configure_fails() {
        let mut state = BuilderState::default();
        let err = state.begin_construct("tpc").unwrap_err();
        assert!(matches!(
            err,
            BuilderError::InvalidTransition {
                state: BuilderState::Unconfigured,
                action: "construct",
                ..
            }
        ));
        assert_eq!(state, BuilderState::Unconfigured);
    }

    #[test]
    fn repeated_transitions_fail() {
        let mut state = BuilderState::default();
        state.begin_configure("b").unwrap();
        assert!(state.begin_configure("b").is_err());
        state.begin_construct("b").unwrap();
        assert!(state.begin_construct("b").is_err());
        assert!(state.begin_configure("b").is_err());
    }

    #[test]
    fn error_message_names_builder_and_state() {
        let mut state = BuilderState::Constructed;
        let err = state.begin_configure("TPC").unwrap_err();
        assert_eq!(
            err.to_string(),
            "builder `TPC` cannot configure while constructed"
        );
    }
}
