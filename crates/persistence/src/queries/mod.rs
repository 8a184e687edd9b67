// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for the persistence layer.
//!
//! This module contains all read-only queries. Lookups of a single entity
//! return `Option` and leave the not-found decision to the caller.
//!
//! ## Module Organization
//!
//! - `audit`: Audit log queries
//! - `clubs`, `players`, `teams`, `matchdays`: Entity lookups
//! - `stats`: Stats record lookups and history
//! - `roster`: Recorded roster history
//! - `scores`: Score histories and league standings

pub mod audit;
pub mod clubs;
pub mod matchdays;
pub mod players;
pub mod roster;
pub mod scores;
pub mod stats;
pub mod teams;
