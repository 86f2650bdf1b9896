// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! Each public function commits one change together with its audit event in
//! a single `BEGIN IMMEDIATE` transaction. Status changes are written with
//! compare-and-swap updates against the status the caller read.

pub mod audit;
pub mod bookings;
pub mod catalog;
pub mod results;
pub mod seasons;
