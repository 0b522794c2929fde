//! Access guard state machine for protected views.
//!
//! States: `Resolving` → `Unauthenticated` → `Authorized` | `Forbidden`.
//! `Forbidden` is terminal until the guard is reset by navigating away;
//! `Authorized` is terminal success but re-resolution after a store clear
//! still drops back to `Unauthenticated`.

use mbx_config::MbxConfig;
use mbx_core::RoleRequirement;

use crate::session::SessionRecord;

/// Which login experience to present when unauthenticated. Fixed
/// precedence: dev-bypass in development environments, the local form when
/// the federated broker is not configured, otherwise an automatic federated
/// redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginExperience {
    DevBypass,
    LocalForm,
    FederatedRedirect,
}

/// Environment facts the experience choice depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardEnvironment {
    pub development: bool,
    pub federated_configured: bool,
}

impl GuardEnvironment {
    #[must_use]
    pub fn from_config(config: &MbxConfig) -> Self {
        Self {
            development: config.app.is_development(),
            federated_configured: config.entra.is_configured(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Resolving,
    Unauthenticated(LoginExperience),
    Forbidden { required: RoleRequirement },
    Authorized(SessionRecord),
}

/// Per-view gate blocking protected content until an authenticated identity
/// with sufficient role exists.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    requirement: RoleRequirement,
    state: GuardState,
}

impl AccessGuard {
    #[must_use]
    pub const fn new(requirement: RoleRequirement) -> Self {
        Self {
            requirement,
            state: GuardState::Resolving,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &GuardState {
        &self.state
    }

    /// Feed one resolution result into the state machine.
    ///
    /// `Forbidden` is sticky — a forbidden view is not retried until the
    /// guard is [`reset`](Self::reset) by navigating away.
    pub fn on_resolution(
        &mut self,
        session: Option<SessionRecord>,
        env: GuardEnvironment,
    ) -> &GuardState {
        if matches!(self.state, GuardState::Forbidden { .. }) {
            return &self.state;
        }

        self.state = match session {
            None => GuardState::Unauthenticated(choose_experience(env)),
            Some(record) => {
                if self.requirement.is_satisfied_by(&record.identity.roles) {
                    GuardState::Authorized(record)
                } else {
                    GuardState::Forbidden {
                        required: self.requirement.clone(),
                    }
                }
            }
        };
        &self.state
    }

    /// Navigation away from the view: back to `Resolving`.
    pub fn reset(&mut self) {
        self.state = GuardState::Resolving;
    }
}

/// The unauthenticated login experience for a given environment.
#[must_use]
pub const fn choose_experience(env: GuardEnvironment) -> LoginExperience {
    if env.development {
        LoginExperience::DevBypass
    } else if !env.federated_configured {
        LoginExperience::LocalForm
    } else {
        LoginExperience::FederatedRedirect
    }
}
