//! # Line Primitives
//!
//! Hardcoded runtime constants for the Sortline engine.
//!
//! These values are compiled into the binary and are immutable at runtime.
//! Configuration may replace the tables, never these constants.

use crate::Category;

/// Material name for items no sensor recognises.
pub const UNKNOWN_MATERIAL: &str = "unknown";

/// Signature reported for items no sensor recognises.
pub const UNKNOWN_SIGNATURE: u32 = 0;

/// Numerator of the chance that a drawn item is a known material.
///
/// Together with [`KNOWN_READING_DENOMINATOR`] this is the 90/10 split:
/// 9 in 10 items carry a known material, the rest read as "unknown".
pub const KNOWN_READING_NUMERATOR: u32 = 9;

/// Denominator of the known-material chance.
pub const KNOWN_READING_DENOMINATOR: u32 = 10;

/// Simulated belt travel time between two items, in milliseconds.
pub const BELT_TRAVEL_MILLIS: u64 = 2000;

/// Scale used for integer shares in tallies (parts per thousand).
pub const PER_MILLE: u64 = 1000;

/// Signature table used when no configuration is supplied, in lookup order.
pub const STANDARD_SIGNATURES: [(&str, u32); 5] = [
    ("organic", 680),
    ("plastic", 850),
    ("paper", 920),
    ("metal", 1050),
    (UNKNOWN_MATERIAL, UNKNOWN_SIGNATURE),
];

/// Stage list used when no configuration is supplied, in belt order.
pub const STANDARD_STAGES: [(&str, &str, Category); 4] = [
    ("organic", "dumping pits", Category::Dumped),
    ("plastic", "crushers", Category::Recycled),
    ("paper", "different conveyor belt to recycling", Category::Recycled),
    ("metal", "melting process", Category::Recycled),
];

/// Where items no stage claims are sent.
pub const END_OF_LINE_DESTINATION: &str = "manual inspection";

/// Items reaching the end of the line are never recycled.
pub const END_OF_LINE_CATEGORY: Category = Category::Dumped;
