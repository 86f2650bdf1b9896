// Copyright (C) 2026 The Bunte Liga Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Every function takes the connection it runs on so that mutations can
//! re-run the same reads inside their transaction.

pub mod audit;
pub mod bookings;
pub mod catalog;
pub mod results;
pub mod seasons;
