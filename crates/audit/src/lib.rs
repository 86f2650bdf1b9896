// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use bunte_liga_domain::{BookingId, PitchId, ResultId, SeasonId, TeamId};
use std::str::FromStr;
use time::OffsetDateTime;

/// What kind of party performed an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    /// A team representative acting for their team.
    Team,
    /// A league administrator.
    Admin,
    /// The service itself (migrations, maintenance jobs).
    System,
}

impl ActorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::Admin => "admin",
            Self::System => "system",
        }
    }
}

impl FromStr for ActorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "team" => Ok(Self::Team),
            "admin" => Ok(Self::Admin),
            "system" => Ok(Self::System),
            other => Err(format!("unknown actor kind '{other}'")),
        }
    }
}

/// Represents the entity performing an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Subject identifier issued by the identity provider.
    pub id: String,
    pub kind: ActorKind,
    /// Team the actor represents, if any.
    pub team_id: Option<TeamId>,
}

impl Actor {
    /// Creates an actor representing a team.
    #[must_use]
    pub const fn team(id: String, team_id: TeamId) -> Self {
        Self {
            id,
            kind: ActorKind::Team,
            team_id: Some(team_id),
        }
    }

    /// Creates an admin actor.
    #[must_use]
    pub const fn admin(id: String) -> Self {
        Self {
            id,
            kind: ActorKind::Admin,
            team_id: None,
        }
    }

    #[must_use]
    pub fn system() -> Self {
        Self {
            id: String::from("system"),
            kind: ActorKind::System,
            team_id: None,
        }
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g. request id).
    pub id: String,
    pub description: String,
}

impl Cause {
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g. "`RequestSlot`", "`ConfirmResult`").
    pub name: String,
    /// Optional additional details, such as a deny reason.
    pub details: Option<String>,
}

impl Action {
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A compact textual snapshot of an entity before or after a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// Snapshot of an entity that did not exist before the change.
    #[must_use]
    pub fn absent() -> Self {
        Self {
            data: String::from("absent"),
        }
    }
}

/// The entity an audit event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Season(SeasonId),
    Team(TeamId),
    Pitch(PitchId),
    Booking(BookingId),
    Result(ResultId),
}

impl EntityRef {
    /// Entity type name used in storage.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Season(_) => "season",
            Self::Team(_) => "team",
            Self::Pitch(_) => "pitch",
            Self::Booking(_) => "booking",
            Self::Result(_) => "result",
        }
    }

    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Season(id) => id.value(),
            Self::Team(id) => id.value(),
            Self::Pitch(id) => id.value(),
            Self::Booking(id) => id.value(),
            Self::Result(id) => id.value(),
        }
    }

    /// Rebuilds a reference from its stored form.
    #[must_use]
    pub fn from_parts(kind: &str, id: i64) -> Option<Self> {
        match kind {
            "season" => Some(Self::Season(SeasonId::new(id))),
            "team" => Some(Self::Team(TeamId::new(id))),
            "pitch" => Some(Self::Pitch(PitchId::new(id))),
            "booking" => Some(Self::Booking(BookingId::new(id))),
            "result" => Some(Self::Result(ResultId::new(id))),
            _ => None,
        }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change produces exactly one audit event. The
/// entity reference is filled in by the caller once the entity has an id;
/// events for newly created entities carry a placeholder until persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// `None` until persisted.
    pub event_id: Option<i64>,
    pub season_id: Option<SeasonId>,
    pub entity: Option<EntityRef>,
    pub actor: Actor,
    pub cause: Cause,
    pub action: Action,
    pub before: StateSnapshot,
    pub after: StateSnapshot,
    pub recorded_at: OffsetDateTime,
}

impl AuditEvent {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        season_id: Option<SeasonId>,
        entity: Option<EntityRef>,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        recorded_at: OffsetDateTime,
    ) -> Self {
        Self {
            event_id: None,
            season_id,
            entity,
            actor,
            cause,
            action,
            before,
            after,
            recorded_at,
        }
    }

    /// Attaches the entity reference, used after an insert assigned the id.
    #[must_use]
    pub const fn with_entity(mut self, entity: EntityRef) -> Self {
        self.entity = Some(entity);
        self
    }
}

#[cfg(test)]
mod tests;
