use crate::gui::host::GtkHost;
use crate::gui::render::{self, PixmapCache, RenderError};
use cairo::Context;
use thiserror::Error;
use wedge::{Label, MenuError, MenuStyle, Point, PointerButton, PressOutcome, RadialMenu};

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error(transparent)]
    Menu(#[from] MenuError),
    #[error("failed to pre-render menu: {0}")]
    Render(#[from] RenderError),
}

/// A [`RadialMenu`] living in a GTK window, plus its pre-rendered bitmap.
pub struct MenuWidget {
    menu: RadialMenu<GtkHost>,
    pixmap: PixmapCache,
}

impl MenuWidget {
    pub fn new(host: GtkHost) -> Self {
        Self {
            menu: RadialMenu::with_host(host),
            pixmap: PixmapCache::default(),
        }
    }

    pub fn add_entry(
        &mut self,
        label: impl Into<Label>,
        action: impl FnMut() -> anyhow::Result<()> + 'static,
    ) {
        self.menu.add_entry(label, action);
    }

    pub fn set_style(&mut self, style: MenuStyle) -> Result<(), WidgetError> {
        self.menu.set_style(style)?;
        if self.menu.is_visible() {
            self.pixmap.ensure(&self.menu)?;
        }
        Ok(())
    }

    /// Renders the bitmap ahead of the first show.
    pub fn initialize(&mut self) {
        match self.pixmap.ensure(&self.menu) {
            Ok(_) => log::debug!("Menu initialized with {} entries", self.menu.entries().len()),
            Err(e) => log::error!("Failed to pre-render menu: {}", e),
        }
    }

    pub fn show_at(&mut self, point: Point) -> Result<(), WidgetError> {
        if self.menu.entries().is_empty() {
            return Err(MenuError::EmptyMenu.into());
        }
        self.pixmap.ensure(&self.menu)?;
        self.menu.show_at(point)?;
        Ok(())
    }

    pub fn hide(&mut self) {
        self.menu.hide();
    }

    pub fn pointer_moved(&mut self, local: Point) -> bool {
        self.menu.pointer_moved(local)
    }

    pub fn pressed(&mut self, button: u32) -> Result<PressOutcome, MenuError> {
        self.menu.pressed(PointerButton::from(button))
    }

    pub fn outside_press(&mut self) -> PressOutcome {
        self.menu.outside_press()
    }

    pub fn draw(&mut self, cr: &Context) -> Result<(), RenderError> {
        let pixmap = self.pixmap.ensure(&self.menu)?;
        render::paint(cr, pixmap, &self.menu)?;
        Ok(())
    }
}
