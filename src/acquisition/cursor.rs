//! Cursor model
//!
//! A cursor is a user-placed marker on the capture's timeline. Every capture
//! session owns exactly [`MAX_CURSORS`] cursor slots; a slot's index never
//! changes, while its timestamp can be set and cleared at will.
//!
//! # Label styles
//!
//! [`Cursor::styled_label`] renders the text shown next to a cursor without
//! touching the cursor itself:
//!
//! | Style | Defined, labelled | Defined, no label |
//! |---|---|---|
//! | `IndexOnly` | `3` | `3` |
//! | `TimeOnly` | `1.500 µs` | `1.500 µs` |
//! | `LabelOnly` | `start` | `3` |
//! | `IndexLabel` | `3: start` | `3` |
//! | `LabelTime` | `start: 1.500 µs` | `1.500 µs` |
//!
//! The index shown is one-based. Without a sample rate the time is the raw
//! timestamp. Undefined cursors render an empty time.
//!
//! # Ordering
//!
//! [`Cursor::cmp_by_time`] orders defined cursors by timestamp, then by index.
//! Undefined cursors sort after every defined cursor, by index.
//!
//! Cursors carry no synchronization; mutate them from one thread.

use crate::error::{Result, SnifferError};
use crate::types::Color;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Number of cursor slots per capture session
pub const MAX_CURSORS: usize = 10;

/// How to represent a cursor label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LabelStyle {
    IndexOnly,
    TimeOnly,
    LabelOnly,
    #[default]
    IndexLabel,
    LabelTime,
}

impl LabelStyle {
    /// Get all label styles
    pub fn all() -> &'static [LabelStyle] {
        &[
            LabelStyle::IndexOnly,
            LabelStyle::TimeOnly,
            LabelStyle::LabelOnly,
            LabelStyle::IndexLabel,
            LabelStyle::LabelTime,
        ]
    }
}

/// A temporal marker on the capture's timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    index: usize,
    timestamp: Option<u64>,
    label: Option<String>,
    color: Option<Color>,
}

impl Cursor {
    /// Create an undefined cursor for slot `index` (`0..MAX_CURSORS`)
    pub fn new(index: usize) -> Result<Self> {
        if index >= MAX_CURSORS {
            return Err(SnifferError::InvalidArgument(format!(
                "cursor index must be below {}, got {}",
                MAX_CURSORS, index
            )));
        }
        Ok(Self::undefined(index))
    }

    fn undefined(index: usize) -> Self {
        Self {
            index,
            timestamp: None,
            label: None,
            color: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_defined(&self) -> bool {
        self.timestamp.is_some()
    }

    /// Timestamp of the cursor; fails while the cursor is undefined
    pub fn timestamp(&self) -> Result<u64> {
        self.timestamp.ok_or_else(|| {
            SnifferError::UndefinedState(format!("cursor {} has no timestamp", self.index))
        })
    }

    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = Some(timestamp);
    }

    /// Make the cursor undefined again; label and color are kept
    pub fn clear(&mut self) {
        self.timestamp = None;
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn has_label(&self) -> bool {
        self.label.is_some()
    }

    /// Set the label; an empty or blank string removes it
    pub fn set_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        self.label = if label.trim().is_empty() {
            None
        } else {
            Some(label)
        };
    }

    /// Color override, `None` means the renderer's default
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Whether the cursor is defined and within `delta` of `timestamp`
    pub fn in_area(&self, timestamp: u64, delta: f64) -> bool {
        match self.timestamp {
            Some(own) => (own.abs_diff(timestamp) as f64) <= delta,
            None => false,
        }
    }

    /// Render the cursor's label in the given style.
    ///
    /// `sample_rate` converts the timestamp to seconds; without it the raw
    /// timestamp is shown.
    pub fn styled_label(&self, style: LabelStyle, sample_rate: Option<u32>) -> String {
        let index = (self.index + 1).to_string();
        let time = self
            .timestamp
            .map(|ts| match sample_rate {
                Some(rate) if rate > 0 => format_time(ts as f64 / f64::from(rate)),
                _ => ts.to_string(),
            })
            .unwrap_or_default();

        match (style, self.label.as_deref()) {
            (LabelStyle::IndexOnly, _) => index,
            (LabelStyle::TimeOnly, _) => time,
            (LabelStyle::LabelOnly, Some(label)) => label.to_string(),
            (LabelStyle::LabelOnly, None) => index,
            (LabelStyle::IndexLabel, Some(label)) => format!("{}: {}", index, label),
            (LabelStyle::IndexLabel, None) => index,
            (LabelStyle::LabelTime, Some(label)) if self.is_defined() => {
                format!("{}: {}", label, time)
            }
            (LabelStyle::LabelTime, Some(label)) => label.to_string(),
            (LabelStyle::LabelTime, None) => time,
        }
    }

    /// Order by timestamp, undefined cursors last, ties broken by index
    pub fn cmp_by_time(&self, other: &Cursor) -> Ordering {
        match (self.timestamp, other.timestamp) {
            (Some(a), Some(b)) => a.cmp(&b).then(self.index.cmp(&other.index)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.index.cmp(&other.index),
        }
    }
}

/// Format a time in seconds with an engineering unit
fn format_time(seconds: f64) -> String {
    const UNITS: [(f64, &str); 5] = [
        (1.0, "s"),
        (1e-3, "ms"),
        (1e-6, "µs"),
        (1e-9, "ns"),
        (1e-12, "ps"),
    ];
    if seconds == 0.0 {
        return "0.000 s".to_string();
    }
    let magnitude = seconds.abs();
    let (scale, unit) = UNITS
        .iter()
        .copied()
        .find(|(scale, _)| magnitude >= *scale)
        .unwrap_or(UNITS[UNITS.len() - 1]);
    format!("{:.3} {}", seconds / scale, unit)
}

/// The fixed cursor slots of one capture session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorSet {
    cursors: Vec<Cursor>,
}

impl Default for CursorSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorSet {
    /// Create all slots, each undefined
    pub fn new() -> Self {
        Self {
            cursors: (0..MAX_CURSORS).map(Cursor::undefined).collect(),
        }
    }

    pub fn get(&self, index: usize) -> Result<&Cursor> {
        self.cursors.get(index).ok_or_else(|| out_of_range(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Cursor> {
        self.cursors.get_mut(index).ok_or_else(|| out_of_range(index))
    }

    /// All slots in index order
    pub fn iter(&self) -> impl Iterator<Item = &Cursor> {
        self.cursors.iter()
    }

    /// Defined cursors in timestamp order
    pub fn defined(&self) -> Vec<&Cursor> {
        let mut defined: Vec<&Cursor> = self.cursors.iter().filter(|c| c.is_defined()).collect();
        defined.sort_by(|a, b| a.cmp_by_time(b));
        defined
    }

    pub fn defined_count(&self) -> usize {
        self.cursors.iter().filter(|c| c.is_defined()).count()
    }

    /// Lowest index of an undefined slot
    pub fn first_undefined(&self) -> Option<usize> {
        self.cursors.iter().position(|c| !c.is_defined())
    }

    /// The defined cursor closest to `timestamp`, if it is within `delta`
    pub fn find_in_area(&self, timestamp: u64, delta: f64) -> Option<&Cursor> {
        self.cursors
            .iter()
            .filter(|c| c.in_area(timestamp, delta))
            .min_by_key(|c| c.timestamp.map(|ts| ts.abs_diff(timestamp)))
    }

    /// Make every cursor undefined
    pub fn clear_all(&mut self) {
        for cursor in &mut self.cursors {
            cursor.clear();
        }
    }
}

fn out_of_range(index: usize) -> SnifferError {
    SnifferError::InvalidArgument(format!(
        "cursor index must be below {}, got {}",
        MAX_CURSORS, index
    ))
}
