use crate::entry::{Label, MenuEntry};
use crate::error::MenuError;
use crate::geometry::{self, Point, Rect, Sector};
use crate::style::MenuStyle;

/// The window a menu is attached to.
///
/// The menu drives its own surface and its outside-press subscription
/// through this trait, so it never installs input filters by itself.
pub trait MenuHost {
    /// Move the menu surface over `bounds` (host coordinates) and show it.
    fn present(&mut self, bounds: Rect);
    fn conceal(&mut self);
    /// Start reporting presses that land anywhere but the menu.
    fn watch_outside_presses(&mut self);
    fn unwatch_outside_presses(&mut self);
    fn request_redraw(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other(u32),
}

impl From<u32> for PointerButton {
    fn from(button: u32) -> Self {
        match button {
            1 => Self::Primary,
            2 => Self::Middle,
            3 => Self::Secondary,
            n => Self::Other(n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressOutcome {
    Ignored,
    Dismissed,
    Triggered(Label),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Visibility {
    #[default]
    Hidden,
    Visible,
}

/// Pie menu state: entries, derived sectors, hover and visibility.
///
/// Lives on the UI thread only. Every change to the entry list or the style
/// rebuilds all sectors and bumps [`RadialMenu::layout_revision`], which
/// renderers use to tell when a pre-rendered bitmap went stale.
pub struct RadialMenu<H> {
    style: MenuStyle,
    entries: Vec<MenuEntry>,
    sectors: Vec<Sector>,
    hover: Option<usize>,
    visibility: Visibility,
    bounds: Rect,
    revision: u64,
    host: H,
}

impl<H: MenuHost> RadialMenu<H> {
    pub fn new(style: MenuStyle, host: H) -> Result<Self, MenuError> {
        style.validate()?;
        Ok(Self {
            style,
            ..Self::with_host(host)
        })
    }

    /// An empty menu using [`MenuStyle::default`].
    pub fn with_host(host: H) -> Self {
        Self {
            style: MenuStyle::default(),
            entries: Vec::new(),
            sectors: Vec::new(),
            hover: None,
            visibility: Visibility::Hidden,
            bounds: Rect::default(),
            revision: 0,
            host,
        }
    }

    pub fn add_entry(
        &mut self,
        label: impl Into<Label>,
        action: impl FnMut() -> anyhow::Result<()> + 'static,
    ) {
        self.entries.push(MenuEntry::new(label, action));
        self.rebuild();
    }

    pub fn set_style(&mut self, style: MenuStyle) -> Result<(), MenuError> {
        style.validate()?;
        self.style = style;
        self.rebuild();

        if self.is_visible() {
            let side = self.style.side();
            self.bounds = Rect::centered(self.bounds.center(), side, side);
            self.host.present(self.bounds);
        }
        Ok(())
    }

    fn rebuild(&mut self) {
        self.sectors = geometry::layout(self.entries.iter().map(MenuEntry::label), &self.style)
            .unwrap_or_default();
        self.revision = self.revision.wrapping_add(1);
        // indices now point at different slices
        self.hover = None;
        if self.is_visible() {
            self.host.request_redraw();
        }
        log::debug!(
            "Rebuilt {} sectors (revision {})",
            self.sectors.len(),
            self.revision
        );
    }

    /// Centers the menu on `point` (host coordinates) and shows it.
    pub fn show_at(&mut self, point: Point) -> Result<(), MenuError> {
        if self.entries.is_empty() {
            return Err(MenuError::EmptyMenu);
        }

        let side = self.style.side();
        self.bounds = Rect::centered(point, side, side);
        self.hover = None;
        self.host.present(self.bounds);

        if self.visibility == Visibility::Hidden {
            self.host.watch_outside_presses();
            self.visibility = Visibility::Visible;
        }
        self.host.request_redraw();

        log::debug!("Menu shown at ({}, {})", point.x, point.y);
        Ok(())
    }

    pub fn hide(&mut self) {
        if self.visibility == Visibility::Hidden {
            return;
        }
        self.visibility = Visibility::Hidden;
        self.host.conceal();
        self.host.unwatch_outside_presses();
        log::debug!("Menu hidden");
    }

    /// Updates the hover from a pointer position in menu-local coordinates.
    /// Returns whether the hovered sector changed.
    pub fn pointer_moved(&mut self, local: Point) -> bool {
        if !self.is_visible() {
            return false;
        }

        let r = self.style.outer_radius;
        let angle = geometry::menu_angle(local.offset_from(Point::new(r, r)));
        let Ok(idx) = geometry::sector_index(angle, self.entries.len()) else {
            return false;
        };

        let changed = self.hover != Some(idx);
        self.hover = Some(idx);
        if changed {
            self.host.request_redraw();
        }
        changed
    }

    /// Handles a press on the menu itself.
    ///
    /// A failing action still closes the menu, the error is handed back to
    /// the caller.
    pub fn pressed(&mut self, button: PointerButton) -> Result<PressOutcome, MenuError> {
        if !self.is_visible() || button != PointerButton::Primary {
            return Ok(PressOutcome::Ignored);
        }

        let Some(entry) = self.hover.and_then(|i| self.entries.get_mut(i)) else {
            self.hide();
            return Ok(PressOutcome::Dismissed);
        };

        let label = entry.label().clone();
        let result = entry.trigger();
        self.hide();

        match result {
            Ok(()) => {
                log::debug!("Triggered '{}'", label);
                Ok(PressOutcome::Triggered(label))
            }
            Err(source) => Err(MenuError::Action { label, source }),
        }
    }

    /// Handles a press reported by the host outside the menu.
    pub fn outside_press(&mut self) -> PressOutcome {
        if !self.is_visible() {
            return PressOutcome::Ignored;
        }
        self.hide();
        PressOutcome::Dismissed
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn style(&self) -> &MenuStyle {
        &self.style
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.hover
    }

    pub fn hovered_sector(&self) -> Option<&Sector> {
        self.hover.and_then(|i| self.sectors.get(i))
    }

    pub fn layout_revision(&self) -> u64 {
        self.revision
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct RecordingHost {
        presented: Vec<Rect>,
        concealed: usize,
        watching: bool,
        watch_calls: usize,
        redraws: usize,
    }

    impl MenuHost for RecordingHost {
        fn present(&mut self, bounds: Rect) {
            self.presented.push(bounds);
        }

        fn conceal(&mut self) {
            self.concealed += 1;
        }

        fn watch_outside_presses(&mut self) {
            self.watching = true;
            self.watch_calls += 1;
        }

        fn unwatch_outside_presses(&mut self) {
            self.watching = false;
        }

        fn request_redraw(&mut self) {
            self.redraws += 1;
        }
    }

    type Log = Rc<RefCell<Vec<String>>>;

    fn demo_menu() -> (RadialMenu<RecordingHost>, Log) {
        let log: Log = Rc::default();
        let mut menu = RadialMenu::new(MenuStyle::default(), RecordingHost::default()).unwrap();
        for name in ["EXIT", "MAXIMIZE", "MINIMIZE", "RANDOM"] {
            let log = log.clone();
            menu.add_entry(name, move || {
                log.borrow_mut().push(name.to_string());
                Ok(())
            });
        }
        (menu, log)
    }

    #[test]
    fn test_new_rejects_invalid_style() {
        let style = MenuStyle {
            outer_radius: 20.0,
            inner_radius: 30.0,
            ..MenuStyle::default()
        };
        assert!(matches!(
            RadialMenu::new(style, RecordingHost::default()),
            Err(MenuError::InvalidStyle(_))
        ));
    }

    #[test]
    fn test_show_without_entries_fails() {
        let mut menu = RadialMenu::new(MenuStyle::default(), RecordingHost::default()).unwrap();

        assert!(matches!(
            menu.show_at(Point::new(10.0, 10.0)),
            Err(MenuError::EmptyMenu)
        ));
        assert!(!menu.is_visible());
        assert!(menu.host().presented.is_empty());
        assert!(!menu.host().watching);
    }

    #[test]
    fn test_show_centers_on_point() {
        let (mut menu, _) = demo_menu();
        menu.show_at(Point::new(400.0, 300.0)).unwrap();

        let expected = Rect::new(300.0, 200.0, 200.0, 200.0);
        assert!(menu.is_visible());
        assert_eq!(menu.bounds(), expected);
        assert_eq!(menu.bounds().bottom_right(), Point::new(500.0, 400.0));
        assert_eq!(menu.host().presented, vec![expected]);
        assert!(menu.host().watching);
    }

    #[test]
    fn test_reshow_while_visible_subscribes_once() {
        let (mut menu, _) = demo_menu();
        menu.show_at(Point::new(400.0, 300.0)).unwrap();
        menu.show_at(Point::new(200.0, 200.0)).unwrap();

        assert_eq!(menu.host().watch_calls, 1);
        assert_eq!(menu.bounds(), Rect::new(100.0, 100.0, 200.0, 200.0));
    }

    #[test]
    fn test_hide_unsubscribes_and_is_idempotent() {
        let (mut menu, _) = demo_menu();
        menu.show_at(Point::new(400.0, 300.0)).unwrap();
        menu.hide();
        menu.hide();

        assert!(!menu.is_visible());
        assert!(!menu.host().watching);
        assert_eq!(menu.host().concealed, 1);
    }

    #[test]
    fn test_show_hide_show_round_trip() {
        let (mut menu, _) = demo_menu();

        menu.show_at(Point::new(400.0, 300.0)).unwrap();
        assert!(menu.pointer_moved(Point::new(150.0, 50.0)));

        menu.hide();
        assert!(!menu.pointer_moved(Point::new(50.0, 150.0)));
        assert_eq!(menu.hovered_index(), Some(0));

        menu.show_at(Point::new(400.0, 300.0)).unwrap();
        assert_eq!(menu.hovered_index(), None);
        assert!(menu.pointer_moved(Point::new(50.0, 150.0)));
        assert_eq!(menu.hovered_index(), Some(2));
    }

    #[test]
    fn test_click_at_45_degrees_triggers_first_entry() {
        let (mut menu, log) = demo_menu();
        menu.show_at(Point::new(400.0, 300.0)).unwrap();

        menu.pointer_moved(Point::new(150.0, 50.0));
        let outcome = menu.pressed(PointerButton::Primary).unwrap();

        assert_eq!(outcome, PressOutcome::Triggered(Label::new("EXIT")));
        assert_eq!(*log.borrow(), vec!["EXIT"]);
        assert!(!menu.is_visible());
        assert!(!menu.host().watching);
    }

    #[test]
    fn test_quadrants_map_to_entries_in_order() {
        let (mut menu, _) = demo_menu();
        menu.show_at(Point::new(400.0, 300.0)).unwrap();

        let cases = vec![
            (Point::new(150.0, 50.0), "EXIT"),
            (Point::new(150.0, 150.0), "MAXIMIZE"),
            (Point::new(50.0, 150.0), "MINIMIZE"),
            (Point::new(50.0, 50.0), "RANDOM"),
        ];

        for (pointer, expected) in cases {
            menu.pointer_moved(pointer);
            let sector = menu.hovered_sector().unwrap();
            assert_eq!(sector.label.as_str(), expected);
        }
    }

    #[test]
    fn test_hit_testing_covers_whole_slice() {
        let (mut menu, _) = demo_menu();
        menu.show_at(Point::new(400.0, 300.0)).unwrap();

        // well inside the inner radius
        menu.pointer_moved(Point::new(101.0, 99.0));
        assert_eq!(menu.hovered_index(), Some(0));

        // corner of the square, beyond the outer radius
        menu.pointer_moved(Point::new(2.0, 198.0));
        assert_eq!(menu.hovered_index(), Some(2));
    }

    #[test]
    fn test_redraw_only_on_hover_change() {
        let (mut menu, _) = demo_menu();
        menu.show_at(Point::new(400.0, 300.0)).unwrap();
        let before = menu.host().redraws;

        assert!(menu.pointer_moved(Point::new(150.0, 50.0)));
        assert!(!menu.pointer_moved(Point::new(160.0, 40.0)));
        assert!(menu.pointer_moved(Point::new(150.0, 150.0)));

        assert_eq!(menu.host().redraws, before + 2);
    }

    #[test]
    fn test_outside_press_dismisses_without_action() {
        let (mut menu, log) = demo_menu();
        menu.show_at(Point::new(400.0, 300.0)).unwrap();
        menu.pointer_moved(Point::new(150.0, 50.0));

        assert_eq!(menu.outside_press(), PressOutcome::Dismissed);
        assert!(!menu.is_visible());
        assert!(log.borrow().is_empty());

        assert_eq!(menu.outside_press(), PressOutcome::Ignored);
    }

    #[test]
    fn test_primary_without_hover_dismisses() {
        let (mut menu, log) = demo_menu();
        menu.show_at(Point::new(400.0, 300.0)).unwrap();

        assert_eq!(
            menu.pressed(PointerButton::Primary).unwrap(),
            PressOutcome::Dismissed
        );
        assert!(!menu.is_visible());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_other_buttons_are_ignored() {
        let (mut menu, log) = demo_menu();
        menu.show_at(Point::new(400.0, 300.0)).unwrap();
        menu.pointer_moved(Point::new(150.0, 50.0));

        for button in [3, 2, 8] {
            assert_eq!(
                menu.pressed(PointerButton::from(button)).unwrap(),
                PressOutcome::Ignored
            );
        }
        assert!(menu.is_visible());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_press_while_hidden_is_ignored() {
        let (mut menu, log) = demo_menu();
        assert_eq!(
            menu.pressed(PointerButton::Primary).unwrap(),
            PressOutcome::Ignored
        );
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_failing_action_still_hides() {
        let mut menu = RadialMenu::new(MenuStyle::default(), RecordingHost::default()).unwrap();
        menu.add_entry("BROKEN", || anyhow::bail!("window is gone"));
        menu.show_at(Point::new(100.0, 100.0)).unwrap();
        menu.pointer_moved(Point::new(150.0, 150.0));

        let err = menu.pressed(PointerButton::Primary).unwrap_err();

        match err {
            MenuError::Action { label, source } => {
                assert_eq!(label.as_str(), "BROKEN");
                assert_eq!(source.to_string(), "window is gone");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!menu.is_visible());
        assert!(!menu.host().watching);
    }

    #[test]
    fn test_add_entry_rebuilds_everything() {
        let mut menu = RadialMenu::new(MenuStyle::default(), RecordingHost::default()).unwrap();
        assert_eq!(menu.layout_revision(), 0);

        menu.add_entry("one", || Ok(()));
        assert_eq!(menu.sectors()[0].span, 360.0);

        menu.add_entry("two", || Ok(()));
        assert_eq!(menu.layout_revision(), 2);
        assert_eq!(menu.sectors().len(), 2);
        assert!(menu.sectors().iter().all(|s| s.span == 180.0));
        assert_eq!(menu.sectors()[1].start_angle, -90.0);
        assert_eq!(menu.entries()[1].label().as_str(), "two");
    }

    #[test]
    fn test_set_style_resizes_visible_menu() {
        let (mut menu, _) = demo_menu();
        menu.show_at(Point::new(400.0, 300.0)).unwrap();
        let revision = menu.layout_revision();

        let style = MenuStyle {
            outer_radius: 150.0,
            ..MenuStyle::default()
        };
        menu.set_style(style).unwrap();

        assert!(menu.layout_revision() > revision);
        assert_eq!(menu.bounds(), Rect::new(250.0, 150.0, 300.0, 300.0));
        assert_eq!(menu.host().presented.last(), Some(&menu.bounds()));
        assert!(menu.sectors().iter().all(|s| s.radius == 150.0));
    }

    #[test]
    fn test_add_entry_while_visible_repaints() {
        let (mut menu, log) = demo_menu();
        menu.show_at(Point::new(400.0, 300.0)).unwrap();
        menu.pointer_moved(Point::new(150.0, 50.0));
        let redraws = menu.host().redraws;
        let revision = menu.layout_revision();

        menu.add_entry("EXTRA", || Ok(()));

        assert!(menu.layout_revision() > revision);
        assert!(menu.host().redraws > redraws);
        assert_eq!(menu.hovered_index(), None);
        assert!(menu.is_visible());

        // the old hover must not fire the entry that used to own the slice
        assert_eq!(
            menu.pressed(PointerButton::Primary).unwrap(),
            PressOutcome::Dismissed
        );
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_add_entry_while_hidden_skips_redraw() {
        let (mut menu, _) = demo_menu();
        let redraws = menu.host().redraws;

        menu.add_entry("EXTRA", || Ok(()));

        assert_eq!(menu.host().redraws, redraws);
    }

    #[test]
    fn test_set_style_rejects_invalid() {
        let (mut menu, _) = demo_menu();
        let revision = menu.layout_revision();
        let style = MenuStyle {
            outer_radius: -1.0,
            ..MenuStyle::default()
        };

        assert!(menu.set_style(style).is_err());
        assert_eq!(menu.layout_revision(), revision);
        assert_eq!(menu.style().outer_radius, 100.0);
    }
}
