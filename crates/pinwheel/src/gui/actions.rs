use crate::gui::theme::{self, Backdrop};
use crate::gui::widget::MenuWidget;
use anyhow::Context;
use gtk::prelude::*;
use gtk4 as gtk;
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};
use wedge::Label;

/// Entries of the demo menu, in clockwise order from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, StrumDisplay)]
#[strum(serialize_all = "UPPERCASE")]
pub enum DemoAction {
    Exit,
    Maximize,
    Minimize,
    Random,
}

impl DemoAction {
    pub fn labels() -> Vec<Label> {
        Self::iter().map(|a| Label::new(a.to_string())).collect()
    }

    pub fn perform(self, window: &gtk::ApplicationWindow, backdrop: &Backdrop) -> anyhow::Result<()> {
        match self {
            Self::Exit => window
                .application()
                .context("window is not attached to an application")?
                .quit(),
            Self::Maximize => window.maximize(),
            Self::Minimize => window.minimize(),
            Self::Random => {
                let color = theme::random_color();
                log::info!("Background set to {}", color);
                backdrop.set_color(&color);
            }
        }
        Ok(())
    }

    pub fn install_all(widget: &mut MenuWidget, window: &gtk::ApplicationWindow, backdrop: &Backdrop) {
        for action in Self::iter() {
            let window = window.clone();
            let backdrop = backdrop.clone();
            widget.add_entry(action.to_string(), move || action.perform(&window, &backdrop));
        }
    }
}
