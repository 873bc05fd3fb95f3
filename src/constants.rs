//! # Constants and type definitions for trajsquish
//!
//! Unit conversion factors and the type aliases shared by the reader, the
//! reduction engine and the reporting code.
//!
//! ## Overview
//!
//! - Degree ↔ meter conversion used by the reporting side
//! - Default parameters of the SQUISH-E reduction
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Length of one degree of latitude in meters (local planar approximation)
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Milliseconds in one second
pub const MILLIS_PER_SECOND: f64 = 1_000.0;

// -------------------------------------------------------------------------------------------------
// Reduction defaults
// -------------------------------------------------------------------------------------------------

/// Default starting capacity of the working set
pub const DEFAULT_INITIAL_CAPACITY: usize = 4;

/// Smallest capacity for which an interior point can exist
pub const MIN_CAPACITY: usize = 3;

/// Default number of ingested points per unit of capacity growth
pub const DEFAULT_RATIO: f64 = 1.0;

/// Number of leading rows in a Geolife `.plt` file before the first fix
pub const GEOLIFE_HEADER_ROWS: usize = 6;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;

/// Distance in meters
pub type Meter = f64;

/// Unix time in milliseconds
pub type Millis = f64;
