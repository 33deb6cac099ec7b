use crate::config;
use crate::events::AppEvent;
use crate::gui::dial::{self, Dial, DialAction, MIN_SIZE, Point};
use crate::gui::theme::{self, ThemeColors};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub dial: Rc<RefCell<Dial>>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    KeyReleased(char),
    Wheel(f64),
    DragBegin(Point),
    DragMove(Point),
    DragEnd,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Dial, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Dial"),
            set_default_size: (200, 200),
            add_css_class: "dial-window",

            add_controller = gtk::EventControllerKey {
                connect_key_released[sender] => move |_, key, _, _| {
                    if let Some(ch) = key.to_unicode() {
                        sender.input(AppMsg::KeyReleased(ch));
                    }
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                set_focusable: true,
                set_size_request: (MIN_SIZE, MIN_SIZE),
                add_css_class: "dial-area",

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::DragBegin(Point::new(x, y)));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((sx, sy)) = gesture.start_point() {
                            sender.input(AppMsg::DragMove(Point::new(sx + dx, sy + dy)));
                        }
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(AppMsg::DragEnd);
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (mut dial, rx) = init;

        theme::load_css();

        dial.connect_turned(|dial, event| {
            log::debug!(
                "{}: value {:.2}, change {:+.2}",
                event.command,
                dial.value(),
                dial.change()
            );
        });

        let dial = Rc::new(RefCell::new(dial));

        let model = AppModel {
            dial: dial.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let scroll = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
        let scroll_sender = sender.clone();
        scroll.connect_scroll(move |_, _dx, dy| {
            scroll_sender.input(AppMsg::Wheel(dy));
            glib::Propagation::Stop
        });
        widgets.drawing_area.add_controller(scroll);

        let dial_draw = model.dial.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = dial::draw(cr, &dial_draw.borrow(), &colors, width, height) {
                    log::error!("Drawing error: {}", e);
                }
            });

        // the dial claims keyboard focus
        gtk4::prelude::GtkWindowExt::set_focus(&widgets.window, Some(&widgets.drawing_area));

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::KeyReleased(ch) => {
                let action = self.dial.borrow_mut().key_released(ch);
                self.redraw_if(action);
            }
            AppMsg::Wheel(rotation) => {
                let action = self.dial.borrow_mut().wheel(rotation);
                self.redraw_if(action);
            }
            AppMsg::DragBegin(position) => {
                self.dial.borrow_mut().begin_drag(position);
            }
            AppMsg::DragMove(position) => {
                let center = self.center();
                let action = self.dial.borrow_mut().drag_to(position, center);
                self.redraw_if(action);
            }
            AppMsg::DragEnd => {
                self.dial.borrow_mut().end_drag();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.dial.borrow_mut().retune(&new_config.dial);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn center(&self) -> Point {
        Point::new(
            f64::from(self.drawing_area.width()) / 2.0,
            f64::from(self.drawing_area.height()) / 2.0,
        )
    }

    fn redraw_if(&self, action: DialAction) {
        if action.should_redraw {
            self.drawing_area.queue_draw();
        }
    }
}
