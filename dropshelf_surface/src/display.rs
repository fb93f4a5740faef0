// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display topology and display-affinity resolution.
//!
//! A container remembers which display it lives on. Displays come and go (a laptop
//! lid closes, a monitor is unplugged), so the remembered id can go stale.
//! [`resolve_display`] never fails while at least one display exists; it walks a
//! fixed fallback chain instead:
//!
//! 1. the display with the largest overlap with the frame;
//! 2. the display containing the frame's center;
//! 3. the tracked (remembered) display id, if it still exists;
//! 4. the display under the pointer;
//! 5. the first listed display, which hosts treat as the primary display.

use kurbo::{Point, Rect, Vec2};

/// Identifier of a physical or virtual display.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayId(pub u32);

/// One display and its frame in global coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DisplayDescriptor {
    /// Display identifier.
    pub id: DisplayId,
    /// Global frame.
    pub frame: Rect,
}

/// Read-only view of the current display topology.
pub trait DisplayTopology {
    /// Displays currently attached, primary display first.
    fn displays(&self) -> Vec<DisplayDescriptor>;
}

impl DisplayTopology for [DisplayDescriptor] {
    fn displays(&self) -> Vec<DisplayDescriptor> {
        self.to_vec()
    }
}

impl DisplayTopology for Vec<DisplayDescriptor> {
    fn displays(&self) -> Vec<DisplayDescriptor> {
        self.clone()
    }
}

/// Which rule of the fallback chain picked the display.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Resolution {
    /// Largest overlap with the frame.
    Overlap,
    /// Display containing the frame's center.
    Center,
    /// The remembered display id still exists.
    Tracked,
    /// Display under the pointer.
    Pointer,
    /// First listed display.
    Primary,
}

/// Resolve the display a frame belongs to.
///
/// Returns `None` only when `displays` is empty.
pub fn resolve_display(
    frame: Rect,
    tracked: Option<DisplayId>,
    pointer: Option<Point>,
    displays: &[DisplayDescriptor],
) -> Option<(DisplayId, Resolution)> {
    let best_overlap = displays
        .iter()
        .map(|d| (d.id, overlap_area(frame, d.frame)))
        .filter(|(_, area)| *area > 0.0)
        .fold(None::<(DisplayId, f64)>, |best, (id, area)| match best {
            Some((_, best_area)) if best_area >= area => best,
            _ => Some((id, area)),
        });
    if let Some((id, _)) = best_overlap {
        return Some((id, Resolution::Overlap));
    }
    let center = frame.center();
    if let Some(d) = displays.iter().find(|d| d.frame.contains(center)) {
        return Some((d.id, Resolution::Center));
    }
    if let Some(id) = tracked
        && displays.iter().any(|d| d.id == id)
    {
        return Some((id, Resolution::Tracked));
    }
    if let Some(pt) = pointer
        && let Some(d) = displays.iter().find(|d| d.frame.contains(pt))
    {
        return Some((d.id, Resolution::Pointer));
    }
    displays.first().map(|d| (d.id, Resolution::Primary))
}

/// Look up a display frame by id.
pub fn display_frame(id: DisplayId, displays: &[DisplayDescriptor]) -> Option<Rect> {
    displays.iter().find(|d| d.id == id).map(|d| d.frame)
}

/// Translate `frame` so it lies inside `bounds`.
///
/// Frames larger than the bounds are pinned to the bounds' origin on that axis.
pub fn clamp_into(frame: Rect, bounds: Rect) -> Rect {
    let dx = if frame.width() >= bounds.width() || frame.x0 < bounds.x0 {
        bounds.x0 - frame.x0
    } else if frame.x1 > bounds.x1 {
        bounds.x1 - frame.x1
    } else {
        0.0
    };
    let dy = if frame.height() >= bounds.height() || frame.y0 < bounds.y0 {
        bounds.y0 - frame.y0
    } else if frame.y1 > bounds.y1 {
        bounds.y1 - frame.y1
    } else {
        0.0
    };
    frame + Vec2::new(dx, dy)
}

fn overlap_area(a: Rect, b: Rect) -> f64 {
    let i = a.intersect(b);
    if i.width() <= 0.0 || i.height() <= 0.0 {
        0.0
    } else {
        i.area()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_displays() -> Vec<DisplayDescriptor> {
        vec![
            DisplayDescriptor {
                id: DisplayId(1),
                frame: Rect::new(0.0, 0.0, 1000.0, 800.0),
            },
            DisplayDescriptor {
                id: DisplayId(2),
                frame: Rect::new(1000.0, 0.0, 2000.0, 800.0),
            },
        ]
    }

    #[test]
    fn largest_overlap_wins() {
        let frame = Rect::new(900.0, 100.0, 1200.0, 300.0);
        assert_eq!(
            resolve_display(frame, None, None, &two_displays()),
            Some((DisplayId(2), Resolution::Overlap))
        );
    }

    #[test]
    fn stale_tracked_id_falls_through_to_pointer() {
        let off_screen = Rect::new(5000.0, 5000.0, 5100.0, 5100.0);
        let got = resolve_display(
            off_screen,
            Some(DisplayId(9)),
            Some(Point::new(1500.0, 10.0)),
            &two_displays(),
        );
        assert_eq!(got, Some((DisplayId(2), Resolution::Pointer)));
    }

    #[test]
    fn live_tracked_id_is_used_for_off_screen_frames() {
        let off_screen = Rect::new(5000.0, 5000.0, 5100.0, 5100.0);
        let got = resolve_display(off_screen, Some(DisplayId(2)), None, &two_displays());
        assert_eq!(got, Some((DisplayId(2), Resolution::Tracked)));
    }

    #[test]
    fn primary_is_last_resort() {
        let off_screen = Rect::new(-500.0, -500.0, -400.0, -400.0);
        let got = resolve_display(off_screen, None, None, &two_displays());
        assert_eq!(got, Some((DisplayId(1), Resolution::Primary)));
        assert_eq!(resolve_display(off_screen, None, None, &[]), None);
    }

    #[test]
    fn clamp_moves_frame_inside() {
        let bounds = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let frame = Rect::new(950.0, -20.0, 1050.0, 80.0);
        assert_eq!(clamp_into(frame, bounds), Rect::new(900.0, 0.0, 1000.0, 100.0));
        let inside = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(clamp_into(inside, bounds), inside);
    }
}
