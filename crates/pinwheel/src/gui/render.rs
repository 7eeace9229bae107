//! Cairo rendering of a [`RadialMenu`].
//!
//! The idle look of every sector is rasterized once into an offscreen
//! surface; repaints blit that surface and only draw the hovered sector on
//! top of it.

use cairo::{Antialias, Context, Format, ImageSurface, LineCap, LineJoin};
use std::path::Path;
use thiserror::Error;
use wedge::{Color, FontWeight, LinearGradient, MenuHost, MenuStyle, RadialMenu, Sector};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Cairo(#[from] cairo::Error),
    #[error("failed to encode png: {0}")]
    Png(#[from] cairo::IoError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

const PIXELS_PER_POINT: f64 = 96.0 / 72.0;

/// Traces the pie slice: center, arc, back to center.
pub fn trace_sector(cr: &Context, sector: &Sector) {
    let (cx, cy) = (sector.center.x, sector.center.y);
    cr.new_path();
    cr.move_to(cx, cy);
    // cairo angles grow clockwise on screen
    cr.arc(
        cx,
        cy,
        sector.radius,
        (-sector.start_angle).to_radians(),
        (-sector.end_angle()).to_radians(),
    );
    cr.close_path();
}

fn set_color(cr: &Context, color: &Color) {
    let (r, g, b, a) = color.components();
    cr.set_source_rgba(r, g, b, a);
}

fn set_gradient(cr: &Context, gradient: &LinearGradient) -> Result<(), cairo::Error> {
    let pattern = cairo::LinearGradient::new(
        gradient.start.x,
        gradient.start.y,
        gradient.end.x,
        gradient.end.y,
    );
    for stop in &gradient.stops {
        let (r, g, b, a) = stop.color.components();
        pattern.add_color_stop_rgba(stop.offset, r, g, b, a);
    }
    cr.set_source(&pattern)
}

fn fill_sector(
    cr: &Context,
    sector: &Sector,
    fill: &LinearGradient,
    style: &MenuStyle,
) -> Result<(), cairo::Error> {
    trace_sector(cr, sector);
    set_gradient(cr, fill)?;
    cr.fill_preserve()?;

    set_color(cr, &style.outline.color);
    cr.set_line_width(style.outline.width);
    cr.set_line_cap(LineCap::Round);
    cr.set_line_join(LineJoin::Round);
    cr.stroke()
}

fn draw_label(cr: &Context, sector: &Sector, style: &MenuStyle) -> Result<(), cairo::Error> {
    let weight = match style.font.weight {
        FontWeight::Bold => cairo::FontWeight::Bold,
        FontWeight::Normal => cairo::FontWeight::Normal,
    };
    cr.select_font_face(&style.font.family, cairo::FontSlant::Normal, weight);
    cr.set_font_size(style.font.size * PIXELS_PER_POINT);
    set_color(cr, &style.label_color);

    let ext = cr.text_extents(sector.label.as_str())?;
    let center = sector.label_rect.center();
    cr.move_to(
        center.x - ext.x_bearing() - ext.width() / 2.0,
        center.y - ext.y_bearing() - ext.height() / 2.0,
    );
    cr.show_text(sector.label.as_str())
}

/// Rasterizes the idle appearance into a transparent `2R x 2R` surface.
pub fn render_idle(sectors: &[Sector], style: &MenuStyle) -> Result<ImageSurface, RenderError> {
    let side = style.side().ceil() as i32;
    let surface = ImageSurface::create(Format::ARgb32, side, side)?;

    {
        let cr = Context::new(&surface)?;
        cr.set_antialias(Antialias::Best);
        for sector in sectors {
            fill_sector(&cr, sector, &sector.idle_fill, style)?;
            draw_label(&cr, sector, style)?;
        }
    }
    surface.flush();

    Ok(surface)
}

pub fn write_png(sectors: &[Sector], style: &MenuStyle, path: &Path) -> Result<(), RenderError> {
    let surface = render_idle(sectors, style)?;
    let mut file = fs_err::File::create(path)?;
    surface.write_to_png(&mut file)?;
    Ok(())
}

/// Blits the pre-rendered surface and highlights the hovered sector.
pub fn paint<H: MenuHost>(
    cr: &Context,
    pixmap: &ImageSurface,
    menu: &RadialMenu<H>,
) -> Result<(), cairo::Error> {
    cr.set_antialias(Antialias::Best);
    cr.set_source_surface(pixmap, 0.0, 0.0)?;
    cr.paint()?;

    if let Some(sector) = menu.hovered_sector() {
        let style = menu.style();
        fill_sector(cr, sector, &sector.hover_fill(style), style)?;
    }
    Ok(())
}

/// Idle bitmap, tagged with the layout revision it was drawn from.
#[derive(Default)]
pub struct PixmapCache {
    surface: Option<ImageSurface>,
    revision: Option<u64>,
}

impl PixmapCache {
    pub fn is_fresh<H: MenuHost>(&self, menu: &RadialMenu<H>) -> bool {
        self.surface.is_some() && self.revision == Some(menu.layout_revision())
    }

    pub fn ensure<H: MenuHost>(
        &mut self,
        menu: &RadialMenu<H>,
    ) -> Result<&ImageSurface, RenderError> {
        let fresh = self.is_fresh(menu);
        let surface = match self.surface.take() {
            Some(surface) if fresh => surface,
            _ => {
                let surface = render_idle(menu.sectors(), menu.style())?;
                log::debug!(
                    "Pre-rendered menu bitmap (revision {})",
                    menu.layout_revision()
                );
                surface
            }
        };
        self.revision = Some(menu.layout_revision());

        let surface: &ImageSurface = self.surface.insert(surface);
        Ok(surface)
    }
}
