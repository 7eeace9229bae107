use gtk::gdk;
use gtk4 as gtk;
use wedge::Color;

pub const HOST_CSS_CLASS: &str = "pinwheel-host";
pub const MENU_CSS_CLASS: &str = "pinwheel-menu";

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.pinwheel-menu {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);
    add_provider(&provider, gtk::STYLE_PROVIDER_PRIORITY_APPLICATION);
}

fn add_provider(provider: &gtk::CssProvider, priority: u32) {
    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(&display, provider, priority);
    }
}

/// Stylesheet owning the host window background.
#[derive(Clone)]
pub struct Backdrop {
    provider: gtk::CssProvider,
}

impl Backdrop {
    pub fn install() -> Self {
        let provider = gtk::CssProvider::new();
        add_provider(&provider, gtk::STYLE_PROVIDER_PRIORITY_APPLICATION + 1);
        Self { provider }
    }

    pub fn set_color(&self, color: &Color) {
        self.provider
            .load_from_data(&format!(".{HOST_CSS_CLASS} {{ background-color: {color}; }}"));
    }
}

pub fn random_color() -> Color {
    let rgb = glib::random_int_range(0, 0x100_0000) as u32;
    Color::from_rgb8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}
