//! # Time Expression Language - Abstract Syntax Tree
//!
//! This module defines the tokens and expression nodes for the timex
//! language: a small notation for deriving timestamps and date ranges from
//! named datetimes, in the same spirit as regular expressions for strings.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (variables, ranges, range functions, operations)
//! - **[operators]** - The three duration operators (`+`, `-`, `@`)
//!
//! ## Quick Start
//!
//! ```text
//! day($event) + 6h
//! ```
//!
//! The calendar day containing `$event`, shifted to run from 6am to 6am, and
//! still containing `$event`.
//!
//! ## Core Concepts
//!
//! ### Points and Ranges
//!
//! Every expression evaluates either to a single instant (a *point*) or to a
//! half-open range `[begin, end)`:
//!
//! ```text
//! $start                  // point
//! $start to $end          // range
//! day($start)             // range: the day containing $start
//! day                     // range: the day containing $timestamp
//! ```
//!
//! ### Durations
//!
//! Durations are numbers followed by a unit: `us`, `s`/`sec`, `m`/`min`,
//! `h`/`hr`, `d`, `mo`, `y`/`yr`. Adjacent durations add up (`1d 2h`).
//!
//! - **Plus** `+` - shift forward
//! - **Minus** `-` - shift backward
//! - **Replace** `@` - set calendar fields (`@ 6h` means "at 6 o'clock")
//!
//! A bare number has no unit and is only allowed directly on a range or range
//! function; its unit is taken from the range length, so `day @ 2` means two
//! o'clock. `day + 6h @ 2` is rejected.
//!
//! ## Examples
//!
//! ```text
//! $a + 1d 2h              // a day and two hours after $a
//! ($a to $b) - 30m        // the range moved half an hour earlier
//! month($a) @ 15d         // the month containing $a, running from the 15th
//! ```
pub mod tokens;
pub mod expressions;
pub mod operators;

pub use tokens::Token;
pub use expressions::Expr;
pub use operators::DurationOp;
