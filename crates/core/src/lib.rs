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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod booking;
mod catalog;
mod command;
mod error;
mod result;
mod season;
mod slots;
mod state;

#[cfg(test)]
mod tests;

pub use booking::apply_booking_command;
pub use catalog::{save_pitch, save_team};
pub use command::{
    ActingParty, BookingCommand, CancelDisposition, RequestDecision, ResultCommand,
    ResultDecision, SeasonCommand,
};
pub use error::CoreError;
pub use result::{
    admin_create_result, admin_delete_result, apply_result_command, ensure_no_active_result,
    report_result,
};
pub use season::{apply_season_command, create_season};
pub use slots::{create_slot, plan_bulk_slots};
pub use state::{
    BookingContext, BookingTransition, BulkSlotOutcome, PitchTransition, ResultContext,
    ResultTransition, SeasonTransition, TeamTransition, booking_snapshot, result_snapshot,
    season_snapshot,
};
