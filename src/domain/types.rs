//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory between ingest and projection
//! - exported to CSV
//! - displayed by both the CLI report and the TUI

use std::collections::HashMap;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// One element of the feed's `rounds` array, as published (newest-first).
///
/// The live feed is loose about numeric fields: depending on the vintage of a
/// round, `drawNumber` and `drawCRS` arrive as JSON numbers or as quoted
/// strings. Deserialization accepts both; anything else is a shape mismatch
/// and is rejected at the fetch boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRound {
    #[serde(rename = "drawDate")]
    pub draw_date: String,
    #[serde(rename = "drawNumber", deserialize_with = "u32_from_number_or_string")]
    pub draw_number: u32,
    #[serde(rename = "drawName")]
    pub draw_name: String,
    #[serde(rename = "drawCRS", deserialize_with = "u32_from_number_or_string")]
    pub draw_crs: u32,
    #[serde(rename = "drawSize")]
    pub draw_size: String,
}

/// The feed document. Only `rounds` is consumed; the feed carries a number of
/// presentation fields we ignore.
#[derive(Debug, Clone, Deserialize)]
pub struct RoundsDocument {
    pub rounds: Vec<RawRound>,
}

fn u32_from_number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct NumberOrString;

    impl de::Visitor<'_> for NumberOrString {
        type Value = u32;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "an unsigned integer or an integer-valued string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::custom(format!("integer out of range: {v}")))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::custom(format!("integer out of range: {v}")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
            v.trim()
                .parse::<u32>()
                .map_err(|_| E::custom(format!("not an integer-valued string: '{v}'")))
        }
    }

    deserializer.deserialize_any(NumberOrString)
}

/// A validated draw round.
///
/// `size_raw` stays textual (thousands separators and all); it is parsed to an
/// integer at projection time so a malformed value can name the draw it came
/// from instead of failing deep inside deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub date: NaiveDate,
    pub number: u32,
    pub name: String,
    pub crs: u32,
    pub size_raw: String,
}

/// Reverse lookup from a displayed date label to its full record.
pub type DrawIndex = HashMap<NaiveDate, DrawRecord>;

/// Everything one successful fetch produces.
///
/// `series` is chronological ascending (the feed delivers newest-first and is
/// reversed exactly once during ingest). `by_date` holds one entry per
/// distinct date in the series.
#[derive(Debug, Clone)]
pub struct DrawData {
    pub series: Vec<DrawRecord>,
    pub by_date: DrawIndex,
}

/// Name of the query parameter that persists the selected window.
pub const PERIOD_PARAM: &str = "period";

/// User-selectable time window over the draw series.
///
/// The window→trailing-slice mapping lives in [`SelectedWindow::slice_len`] as
/// an explicit match over this closed enum; `AllDraws` (and any future
/// unmapped variant) means "no slicing", which is a defined fallback rather
/// than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum SelectedWindow {
    #[default]
    #[value(name = "last10Draws")]
    Last10Draws,
    #[value(name = "last25Draws")]
    Last25Draws,
    #[value(name = "last50Draws")]
    Last50Draws,
    #[value(name = "allDraws")]
    AllDraws,
}

impl SelectedWindow {
    pub const ALL: [SelectedWindow; 4] = [
        SelectedWindow::Last10Draws,
        SelectedWindow::Last25Draws,
        SelectedWindow::Last50Draws,
        SelectedWindow::AllDraws,
    ];

    /// Trailing-slice length for this window; `None` means no slicing.
    pub fn slice_len(self) -> Option<usize> {
        match self {
            SelectedWindow::Last10Draws => Some(10),
            SelectedWindow::Last25Draws => Some(25),
            SelectedWindow::Last50Draws => Some(50),
            SelectedWindow::AllDraws => None,
        }
    }

    /// Canonical identifier written to (and read from) the `period` query
    /// parameter. Round-trip exact.
    pub fn query_value(self) -> &'static str {
        match self {
            SelectedWindow::Last10Draws => "last10Draws",
            SelectedWindow::Last25Draws => "last25Draws",
            SelectedWindow::Last50Draws => "last50Draws",
            SelectedWindow::AllDraws => "allDraws",
        }
    }

    /// Parse a query value. Unrecognized values yield `None`; the caller
    /// falls back to the default window.
    pub fn from_query_value(value: &str) -> Option<SelectedWindow> {
        SelectedWindow::ALL
            .into_iter()
            .find(|w| w.query_value() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            SelectedWindow::Last10Draws => "Last 10 draws",
            SelectedWindow::Last25Draws => "Last 25 draws",
            SelectedWindow::Last50Draws => "Last 50 draws",
            SelectedWindow::AllDraws => "All draws",
        }
    }

    pub fn next(self) -> SelectedWindow {
        match self {
            SelectedWindow::Last10Draws => SelectedWindow::Last25Draws,
            SelectedWindow::Last25Draws => SelectedWindow::Last50Draws,
            SelectedWindow::Last50Draws => SelectedWindow::AllDraws,
            SelectedWindow::AllDraws => SelectedWindow::Last10Draws,
        }
    }

    pub fn prev(self) -> SelectedWindow {
        match self {
            SelectedWindow::Last10Draws => SelectedWindow::AllDraws,
            SelectedWindow::Last25Draws => SelectedWindow::Last10Draws,
            SelectedWindow::Last50Draws => SelectedWindow::Last25Draws,
            SelectedWindow::AllDraws => SelectedWindow::Last50Draws,
        }
    }
}
