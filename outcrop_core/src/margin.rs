// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSS margin-shorthand parsing for the observer root margin.
//!
//! [`RootMargin`] accepts the 1/2/3/4-part shorthand accepted by
//! `IntersectionObserver` (`px` and `%` units only). Percentages are
//! resolved against the viewport height for the top/bottom boundary lines
//! the debug renderer draws.

use alloc::format;
use alloc::string::String;
use core::fmt;

/// Unit of a single root-margin component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarginUnit {
    /// Device-independent pixels.
    Px,
    /// Percent of the corresponding root dimension.
    Percent,
}

/// One component of a root margin (e.g. `-10%` or `24px`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarginValue {
    /// Signed magnitude.
    pub value: f64,
    /// Unit the magnitude is expressed in.
    pub unit: MarginUnit,
}

impl MarginValue {
    /// Zero pixels.
    pub const ZERO: Self = Self {
        value: 0.0,
        unit: MarginUnit::Px,
    };

    /// Resolves this component against a basis length (viewport height for
    /// top/bottom components).
    #[must_use]
    pub fn resolve(self, basis: f64) -> f64 {
        match self.unit {
            MarginUnit::Px => self.value,
            MarginUnit::Percent => self.value * basis / 100.0,
        }
    }

    fn parse(part: &str) -> Result<Self, MarginParseError> {
        // Bare `0` is the one unitless value CSS permits.
        if part == "0" {
            return Ok(Self::ZERO);
        }
        let (number, unit) = if let Some(number) = part.strip_suffix("px") {
            (number, MarginUnit::Px)
        } else if let Some(number) = part.strip_suffix('%') {
            (number, MarginUnit::Percent)
        } else {
            return Err(MarginParseError::BadComponent(String::from(part)));
        };
        let value: f64 = number
            .parse()
            .map_err(|_| MarginParseError::BadComponent(String::from(part)))?;
        Ok(Self { value, unit })
    }
}

impl fmt::Display for MarginValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            MarginUnit::Px => write!(f, "{}px", self.value),
            MarginUnit::Percent => write!(f, "{}%", self.value),
        }
    }
}

/// Parsed root margin, one component per side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMargin {
    /// Top component.
    pub top: MarginValue,
    /// Right component.
    pub right: MarginValue,
    /// Bottom component.
    pub bottom: MarginValue,
    /// Left component.
    pub left: MarginValue,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl RootMargin {
    /// All-zero root margin (the `'0px'` default).
    pub const ZERO: Self = Self {
        top: MarginValue::ZERO,
        right: MarginValue::ZERO,
        bottom: MarginValue::ZERO,
        left: MarginValue::ZERO,
    };

    /// Parses the CSS margin shorthand.
    ///
    /// Accepts 1 part (all sides), 2 parts (vertical, horizontal), 3 parts
    /// (top, horizontal, bottom), or 4 parts (top, right, bottom, left).
    /// Components must be `px`, `%`, or a bare `0`.
    pub fn parse(s: &str) -> Result<Self, MarginParseError> {
        let parts: alloc::vec::Vec<&str> = s.split_whitespace().collect();
        let values = match parts.as_slice() {
            [] => return Err(MarginParseError::Empty),
            [a] => {
                let v = MarginValue::parse(a)?;
                [v, v, v, v]
            }
            [v, h] => {
                let v = MarginValue::parse(v)?;
                let h = MarginValue::parse(h)?;
                [v, h, v, h]
            }
            [t, h, b] => {
                let t = MarginValue::parse(t)?;
                let h = MarginValue::parse(h)?;
                let b = MarginValue::parse(b)?;
                [t, h, b, h]
            }
            [t, r, b, l] => [
                MarginValue::parse(t)?,
                MarginValue::parse(r)?,
                MarginValue::parse(b)?,
                MarginValue::parse(l)?,
            ],
            more => return Err(MarginParseError::TooManyParts(more.len())),
        };
        Ok(Self {
            top: values[0],
            right: values[1],
            bottom: values[2],
            left: values[3],
        })
    }

    /// Renders the canonical four-part form for the observer options.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }

    /// Resolves the top component against the viewport height, in pixels.
    #[must_use]
    pub fn resolve_top(&self, viewport_height: f64) -> f64 {
        self.top.resolve(viewport_height)
    }

    /// Resolves the bottom component against the viewport height, in pixels.
    #[must_use]
    pub fn resolve_bottom(&self, viewport_height: f64) -> f64 {
        self.bottom.resolve(viewport_height)
    }
}

/// Error parsing a root-margin string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarginParseError {
    /// The input contained no components.
    Empty,
    /// The input contained more than four components.
    TooManyParts(usize),
    /// A component was not `<number>px`, `<number>%`, or `0`.
    BadComponent(String),
}

impl fmt::Display for MarginParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "root margin is empty"),
            Self::TooManyParts(n) => {
                write!(f, "root margin has {n} components, at most 4 allowed")
            }
            Self::BadComponent(part) => {
                write!(f, "root margin component {part:?} is not px, %, or 0")
            }
        }
    }
}

impl core::error::Error for MarginParseError {}
