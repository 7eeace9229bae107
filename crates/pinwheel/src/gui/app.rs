use crate::config::{self, StyleOverrides};
use crate::events::AppEvent;
use crate::gui::actions::DemoAction;
use crate::gui::host::GtkHost;
use crate::gui::theme::{self, Backdrop};
use crate::gui::widget::MenuWidget;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use wedge::{MenuStyle, Point};

const INITIALIZE_DELAY: Duration = Duration::from_millis(100);

pub struct AppModel {
    pub menu: Rc<RefCell<MenuWidget>>,
    pub config_path: PathBuf,
    pub overrides: StyleOverrides,
}

pub struct AppInit {
    pub style: MenuStyle,
    pub config_path: PathBuf,
    pub overrides: StyleOverrides,
    pub events: async_channel::Receiver<AppEvent>,
}

#[derive(Debug)]
pub enum AppMsg {
    Initialize,
    ContextMenu(Point),
    CursorMove(Point),
    Press(u32),
    OutsidePress,
    Hide,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

fn build_menu_area(sender: &ComponentSender<AppModel>) -> gtk::DrawingArea {
    let area = gtk::DrawingArea::new();
    area.set_halign(gtk::Align::Start);
    area.set_valign(gtk::Align::Start);
    area.set_visible(false);
    area.add_css_class(theme::MENU_CSS_CLASS);

    let motion = gtk::EventControllerMotion::new();
    let motion_sender = sender.clone();
    motion.connect_motion(move |_, x, y| {
        motion_sender.input(AppMsg::CursorMove(Point::new(x, y)));
    });
    area.add_controller(motion);

    let click = gtk::GestureClick::new();
    click.set_button(0); // Listen to all buttons
    let click_sender = sender.clone();
    click.connect_pressed(move |gesture, _, _, _| {
        // keep the press away from the host's context menu gesture
        gesture.set_state(gtk::EventSequenceState::Claimed);
        click_sender.input(AppMsg::Press(gesture.current_button()));
    });
    area.add_controller(click);

    area
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Pinwheel"),
            set_default_size: (800, 600),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Hide);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "overlay"]
            gtk::Overlay {
                add_css_class: theme::HOST_CSS_CLASS,

                add_controller = gtk::GestureClick {
                    set_button: gtk::gdk::BUTTON_SECONDARY,
                    connect_pressed[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::ContextMenu(Point::new(x, y)));
                    }
                },

                #[wrap(Some)]
                set_child = &gtk::Label {
                    set_label: "Right click anywhere to open the menu",
                    set_hexpand: true,
                    set_vexpand: true,
                },

                add_overlay: &menu_area,
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            style,
            config_path,
            overrides,
            events,
        } = init;

        theme::load_css();
        let backdrop = Backdrop::install();

        let menu_area = build_menu_area(&sender);
        let outside_sender = sender.clone();
        let host = GtkHost::new(root.clone(), menu_area.clone(), move || {
            outside_sender.input(AppMsg::OutsidePress);
        });

        let mut menu = MenuWidget::new(host);
        if let Err(e) = menu.set_style(style) {
            log::warn!("Falling back to the default menu style: {}", e);
        }
        DemoAction::install_all(&mut menu, &root, &backdrop);
        let menu = Rc::new(RefCell::new(menu));

        let menu_draw = menu.clone();
        menu_area.set_draw_func(move |_, cr, _, _| {
            if let Err(e) = menu_draw.borrow_mut().draw(cr) {
                log::error!("Drawing error: {}", e);
            }
        });

        let event_sender = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = events.recv().await {
                event_sender.input(AppMsg::from(event));
            }
        });

        let init_sender = sender.clone();
        glib::timeout_add_local_once(INITIALIZE_DELAY, move || {
            init_sender.input(AppMsg::Initialize);
        });

        let model = AppModel {
            menu,
            config_path,
            overrides,
        };

        let widgets = view_output!();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let mut menu = self.menu.borrow_mut();
        match msg {
            AppMsg::Initialize => menu.initialize(),
            AppMsg::ContextMenu(point) => {
                if let Err(e) = menu.show_at(point) {
                    log::error!("Cannot show menu: {}", e);
                }
            }
            AppMsg::CursorMove(point) => {
                menu.pointer_moved(point);
            }
            AppMsg::Press(button) => match menu.pressed(button) {
                Ok(outcome) => log::debug!("Menu press: {:?}", outcome),
                Err(e) => log::error!("{:#}", anyhow::Error::new(e)),
            },
            AppMsg::OutsidePress => {
                menu.outside_press();
            }
            AppMsg::Hide => menu.hide(),
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(new_config) => match menu.set_style(self.overrides.apply(new_config.menu)) {
                    Ok(()) => log::info!("Configuration reloaded"),
                    Err(e) => log::error!("Rejected reloaded style: {}", e),
                },
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
