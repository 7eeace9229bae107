//! Pie-slice layout and hit-testing.
//!
//! Two angle conventions are used, both in degrees:
//! - layout angles run counter-clockwise from screen east with y pointing up,
//!   the first sector starts at [`TOP`];
//! - menu angles run clockwise from straight up and live in `[0, 360)`.

use crate::entry::Label;
use crate::error::MenuError;
use crate::style::{Color, Fill, MenuStyle};

pub const FULL_TURN: f64 = 360.0;
pub const TOP: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset_from(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    fn enclosing(points: impl IntoIterator<Item = Point>) -> Self {
        let (mut min, mut max) = (
            Point::new(f64::INFINITY, f64::INFINITY),
            Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        );
        for p in points {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Point at `distance` from `center` along the layout angle `angle`.
pub fn polar(center: Point, distance: f64, angle: f64) -> Point {
    let rad = angle.to_radians();
    Point::new(
        center.x + distance * rad.cos(),
        center.y - distance * rad.sin(),
    )
}

/// Menu angle of a pointer offset given in screen coordinates (y down).
pub fn menu_angle(offset: Point) -> f64 {
    (offset.y.atan2(offset.x).to_degrees() + FULL_TURN + TOP).rem_euclid(FULL_TURN)
}

/// Index of the sector containing `angle`, clamped into `[0, count - 1]`.
pub fn sector_index(angle: f64, count: usize) -> Result<usize, MenuError> {
    if count == 0 {
        return Err(MenuError::EmptyMenu);
    }
    let step = FULL_TURN / count as f64;
    // saturating cast takes care of negative and NaN
    Ok(((angle / step).floor() as usize).min(count - 1))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: [ColorStop; 2],
}

impl LinearGradient {
    pub fn two_stop(start: Point, end: Point, fill: &Fill) -> Self {
        Self {
            start,
            end,
            stops: [
                ColorStop {
                    offset: 0.0,
                    color: fill.from,
                },
                ColorStop {
                    offset: 1.0,
                    color: fill.to,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    pub index: usize,
    /// Layout angle of the leading edge.
    pub start_angle: f64,
    /// Degrees swept clockwise from `start_angle`.
    pub span: f64,
    pub center: Point,
    pub radius: f64,
    pub idle_fill: LinearGradient,
    pub label_rect: Rect,
    pub label: Label,
}

impl Sector {
    pub fn end_angle(&self) -> f64 {
        self.start_angle - self.span
    }

    pub fn mid_angle(&self) -> f64 {
        self.start_angle - self.span / 2.0
    }

    /// Whether the layout angle `angle` falls inside this slice.
    pub fn sweeps(&self, angle: f64) -> bool {
        (self.start_angle - angle).rem_euclid(FULL_TURN) <= self.span
    }

    /// Tight bounding box of the slice.
    pub fn bounds(&self) -> Rect {
        let extremes = [0.0, 90.0, 180.0, 270.0]
            .into_iter()
            .filter(|&a| self.sweeps(a))
            .map(|a| polar(self.center, self.radius, a));

        Rect::enclosing(
            [
                self.center,
                polar(self.center, self.radius, self.start_angle),
                polar(self.center, self.radius, self.end_angle()),
            ]
            .into_iter()
            .chain(extremes),
        )
    }

    /// Highlight fill, derived from the slice's bounding box each time.
    pub fn hover_fill(&self, style: &MenuStyle) -> LinearGradient {
        let bounds = self.bounds();
        LinearGradient::two_stop(bounds.top_left(), bounds.bottom_right(), &style.hover_fill)
    }
}

/// Lays out one sector per label, clockwise from the top, in local
/// coordinates of a `2R x 2R` square.
pub fn layout<'a, I>(labels: I, style: &MenuStyle) -> Result<Vec<Sector>, MenuError>
where
    I: IntoIterator<Item = &'a Label>,
    I::IntoIter: ExactSizeIterator,
{
    let labels = labels.into_iter();
    let count = labels.len();
    if count == 0 {
        return Err(MenuError::EmptyMenu);
    }

    let step = FULL_TURN / count as f64;
    let radius = style.outer_radius;
    let center = Point::new(radius, radius);

    let sectors = labels
        .enumerate()
        .map(|(index, label)| {
            let start_angle = TOP - index as f64 * step;
            let mid_angle = start_angle - step / 2.0;

            Sector {
                index,
                start_angle,
                span: step,
                center,
                radius,
                idle_fill: LinearGradient::two_stop(
                    center,
                    polar(center, radius, mid_angle),
                    &style.idle_fill,
                ),
                label_rect: Rect::centered(
                    polar(center, style.label_distance(), mid_angle),
                    style.label_width,
                    style.label_height,
                ),
                label: label.clone(),
            }
        })
        .collect();

    Ok(sectors)
}
