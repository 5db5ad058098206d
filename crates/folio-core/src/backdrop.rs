//! Pointer-reactive grid behind every page.
//!
//! Each grid point's emphasis falls off linearly with distance from the last
//! known pointer position and bottoms out at a fixed baseline beyond
//! `radius`. Rendering styles differ only in what the emphasis drives.

use crate::geometry::{Point, Size};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const DEFAULT_SPACING: f64 = 50.0;
pub const DEFAULT_RADIUS: f64 = 180.0;
pub const DOT_SIZE: f64 = 1.2;
pub const DOT_SIZE_MAX: f64 = DOT_SIZE + 3.0;
pub const ALPHA_BASE: f64 = 0.08;
pub const ALPHA_MAX: f64 = ALPHA_BASE + 0.3;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GridStyle {
    /// Dots grow and brighten near the pointer.
    #[default]
    Dots,
    /// Lines between neighbouring points brighten near the pointer.
    Lattice,
}

pub fn emphasis(distance: f64, radius: f64, baseline: f64, max: f64) -> f64 {
    if distance >= radius {
        baseline
    } else {
        baseline + (1.0 - distance / radius) * (max - baseline)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridDot {
    pub at: Point,
    pub size: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLink {
    pub from: Point,
    pub to: Point,
    pub alpha: f64,
}

#[derive(Debug, Clone)]
pub struct GridField {
    style: GridStyle,
    spacing: f64,
    radius: f64,
    viewport: Size,
    cols: usize,
    rows: usize,
    pointer: Option<Point>,
}

impl GridField {
    pub fn new(style: GridStyle, spacing: f64, radius: f64) -> Self {
        Self {
            style,
            spacing: spacing.max(1.0),
            radius: radius.max(f64::EPSILON),
            viewport: Size::default(),
            cols: 0,
            rows: 0,
            pointer: None,
        }
    }

    pub fn style(&self) -> GridStyle {
        self.style
    }

    pub fn set_style(&mut self, style: GridStyle) {
        self.style = style;
    }

    pub fn configure(&mut self, spacing: f64, radius: f64) {
        self.spacing = spacing.max(1.0);
        self.radius = radius.max(f64::EPSILON);
        self.resize(self.viewport);
    }

    pub fn extents(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
        if viewport.is_empty() {
            self.cols = 0;
            self.rows = 0;
        } else {
            self.cols = (viewport.width / self.spacing).ceil() as usize;
            self.rows = (viewport.height / self.spacing).ceil() as usize;
        }
    }

    pub fn pointer_moved(&mut self, at: Point) {
        self.pointer = Some(at);
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    fn distance(&self, at: Point) -> f64 {
        self.pointer.map_or(f64::INFINITY, |p| p.distance_to(at))
    }

    fn factor(&self, at: Point) -> f64 {
        emphasis(self.distance(at), self.radius, 0.0, 1.0)
    }

    fn point(&self, col: usize, row: usize) -> Point {
        Point::new(col as f64 * self.spacing, row as f64 * self.spacing)
    }

    pub fn dots(&self) -> impl Iterator<Item = GridDot> + '_ {
        (0..self.cols)
            .flat_map(move |c| (0..self.rows).map(move |r| self.point(c, r)))
            .map(move |at| {
                let f = self.factor(at);
                GridDot {
                    at,
                    size: DOT_SIZE + f * (DOT_SIZE_MAX - DOT_SIZE),
                    alpha: ALPHA_BASE + f * (ALPHA_MAX - ALPHA_BASE),
                }
            })
    }

    /// Right and down neighbours of every grid point.
    pub fn links(&self) -> impl Iterator<Item = GridLink> + '_ {
        (0..self.cols)
            .flat_map(move |c| (0..self.rows).map(move |r| (c, r)))
            .flat_map(move |(c, r)| {
                let from = self.point(c, r);
                let right = (c + 1 < self.cols).then(|| self.point(c + 1, r));
                let down = (r + 1 < self.rows).then(|| self.point(c, r + 1));
                [right, down].into_iter().flatten().map(move |to| GridLink {
                    from,
                    to,
                    alpha: emphasis(
                        self.distance(from.midpoint(to)),
                        self.radius,
                        ALPHA_BASE / 2.0,
                        ALPHA_MAX,
                    ),
                })
            })
    }
}

impl Default for GridField {
    fn default() -> Self {
        Self::new(GridStyle::default(), DEFAULT_SPACING, DEFAULT_RADIUS)
    }
}
