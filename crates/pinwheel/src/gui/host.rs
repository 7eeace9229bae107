use gtk::prelude::*;
use gtk4 as gtk;
use std::rc::Rc;
use wedge::{MenuHost, Rect};

/// Hosts the menu as a drawing area inside the overlay of a window.
pub struct GtkHost {
    window: gtk::ApplicationWindow,
    area: gtk::DrawingArea,
    on_outside_press: Rc<dyn Fn()>,
    press_watch: Option<gtk::GestureClick>,
}

impl GtkHost {
    pub fn new(
        window: gtk::ApplicationWindow,
        area: gtk::DrawingArea,
        on_outside_press: impl Fn() + 'static,
    ) -> Self {
        Self {
            window,
            area,
            on_outside_press: Rc::new(on_outside_press),
            press_watch: None,
        }
    }

    fn is_menu_widget(area: &gtk::DrawingArea, widget: &gtk::Widget) -> bool {
        widget == area.upcast_ref::<gtk::Widget>() || widget.is_ancestor(area)
    }
}

impl MenuHost for GtkHost {
    fn present(&mut self, bounds: Rect) {
        let side = bounds.width.ceil() as i32;
        self.area.set_content_width(side);
        self.area.set_content_height(side);
        // margins cannot go negative, a menu near the edge gets pushed inwards
        self.area.set_margin_start(bounds.x.max(0.0).round() as i32);
        self.area.set_margin_top(bounds.y.max(0.0).round() as i32);
        self.area.set_visible(true);
    }

    fn conceal(&mut self) {
        self.area.set_visible(false);
    }

    fn watch_outside_presses(&mut self) {
        if self.press_watch.is_some() {
            return;
        }

        let gesture = gtk::GestureClick::new();
        gesture.set_button(0);
        gesture.set_propagation_phase(gtk::PropagationPhase::Capture);

        let window = self.window.downgrade();
        let area = self.area.downgrade();
        let on_press = self.on_outside_press.clone();
        gesture.connect_pressed(move |_, _, x, y| {
            let (Some(window), Some(area)) = (window.upgrade(), area.upgrade()) else {
                return;
            };
            let on_menu = window
                .pick(x, y, gtk::PickFlags::DEFAULT)
                .is_some_and(|w| Self::is_menu_widget(&area, &w));
            if !on_menu {
                on_press();
            }
        });

        self.window.add_controller(gesture.clone());
        self.press_watch = Some(gesture);
    }

    fn unwatch_outside_presses(&mut self) {
        if let Some(gesture) = self.press_watch.take() {
            self.window.remove_controller(&gesture);
        }
    }

    fn request_redraw(&mut self) {
        self.area.queue_draw();
    }
}
