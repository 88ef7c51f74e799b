// Copyright (c) 2026 Specie Labs. MIT License.
// See LICENSE for details.

//! # SPECIE Protocol — Core Library
//!
//! SPECIE is an embeddable economy protocol for game servers: a small,
//! sharp vocabulary for *assets* (kinds of value), *amounts* (how much of
//! one), *points* (anything that holds or accounts for value — a wallet,
//! a chest, a guild bank), and *transactions* (auditable records of moving
//! or querying value at a point).
//!
//! The host application supplies the concrete world: which assets exist,
//! who the players are, which point backs whose wallet. SPECIE supplies the
//! invariants: amounts are never negative, mutations are atomic per point,
//! every attempt produces exactly one immutable receipt.
//!
//! ## Architecture
//!
//! The crate is split into modules that mirror the actual concerns of an
//! in-process economy:
//!
//! - **asset** — Asset identity and non-negative amounts of it.
//! - **party** — Stable identity handles for transaction participants.
//! - **balance** — The five balance capabilities, and in-memory reference
//!   points implementing them.
//! - **account** — Shared multi-party points with graded access.
//! - **transaction** — Intent records, capability-checked execution, and
//!   immutable receipts.
//! - **report** — The fire-and-forget seam that hands receipts to the host.
//! - **config** — Protocol constants and identifier grammars.
//!
//! ## Design Philosophy
//!
//! 1. A point exposes only the operations it semantically supports — five
//!    independent capabilities, not one fat interface.
//! 2. Expected failures are typed values carrying the offending amount,
//!    never strings, never panics.
//! 3. Each point owns its concurrency discipline; the protocol never locks
//!    across points.
//! 4. If it touches value, it has tests. Plural.

pub mod account;
pub mod asset;
pub mod balance;
pub mod config;
pub mod party;
pub mod report;
pub mod transaction;
