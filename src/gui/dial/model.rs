use crate::config::{DialConfig, WrapMode};
use derive_more::{AsRef, Deref, Display, From, Into};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Command tag carried by a turn notification. Always [`TURN_COMMAND`];
/// listeners read magnitude through the dial accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct ActionCommand(String);

impl ActionCommand {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

pub const TURN_COMMAND: &str = "turn";

#[derive(Debug)]
pub struct TurnEvent {
    pub command: ActionCommand,
}

impl TurnEvent {
    fn turn() -> Self {
        Self {
            command: ActionCommand::new(TURN_COMMAND),
        }
    }
}

/// Handle returned by [`Dial::connect_turned`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into)]
pub struct ListenerId(u64);

type TurnCallback = Box<dyn FnMut(&Dial, &TurnEvent)>;

struct ListenerEntry {
    id: ListenerId,
    callback: TurnCallback,
}

/// What the host component should do after a model operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialAction {
    pub should_redraw: bool,
    pub turned: bool,
}

impl DialAction {
    pub fn new(should_redraw: bool, turned: bool) -> Self {
        Self {
            should_redraw,
            turned,
        }
    }
}

/// Rotary control state. Tracks an angular value in degrees, turns wheel,
/// drag and keyboard input into relative changes, and notifies listeners
/// with a "turn" command on every applied change.
///
/// Toolkit-free; the GTK side lives in [`crate::gui::app`] and the paint
/// routine in [`super::view`].
pub struct Dial {
    value: f64,
    change: f64,
    dragging: bool,
    drag_previous: Point,
    keyboard_step: f64,
    wheel_step: f64,
    wrap: WrapMode,
    listeners: Vec<ListenerEntry>,
    next_listener: u64,
}

impl Default for Dial {
    fn default() -> Self {
        Self::from_config(&DialConfig::default())
    }
}

impl Dial {
    pub fn from_config(config: &DialConfig) -> Self {
        Self {
            value: 0.0,
            change: 0.0,
            dragging: false,
            drag_previous: Point::default(),
            keyboard_step: *config.keyboard_step,
            wheel_step: *config.wheel_step,
            wrap: config.wrap,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Adopt new step sizes and wrap mode; value and listeners are kept.
    pub fn retune(&mut self, config: &DialConfig) {
        self.keyboard_step = *config.keyboard_step;
        self.wheel_step = *config.wheel_step;
        self.wrap = config.wrap;
    }

    /// Current value in degrees. Under [`WrapMode::Free`] this may leave
    /// [0, 360).
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The delta applied by the most recent update, in degrees.
    pub fn change(&self) -> f64 {
        self.change
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Set the value directly. Recomputes `change` and requests a redraw,
    /// but emits no turn event.
    pub fn set_value(&mut self, value: f64) -> DialAction {
        let value = self.wrap.apply(value);
        self.change = value - self.value;
        self.value = value;
        DialAction::new(true, false)
    }

    /// Apply a relative change and notify every listener, in registration
    /// order.
    pub fn apply_change(&mut self, delta: f64) -> DialAction {
        self.set_value(self.value + delta);
        self.fire_turn();
        DialAction::new(true, true)
    }

    /// `+` and `-` turn the dial one keyboard step; other keys are ignored.
    pub fn key_released(&mut self, ch: char) -> DialAction {
        match ch {
            '+' => self.apply_change(self.keyboard_step),
            '-' => self.apply_change(-self.keyboard_step),
            _ => DialAction::default(),
        }
    }

    /// One wheel notch turns the dial one wheel step, sign inverted.
    pub fn wheel(&mut self, rotation: f64) -> DialAction {
        self.apply_change(-rotation * self.wheel_step)
    }

    pub fn begin_drag(&mut self, position: Point) {
        self.dragging = true;
        self.drag_previous = position;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Advance an active drag to `position`. The signed angle swept between
    /// the previous and current cursor directions around `center` is applied
    /// as a change; a zero sweep leaves the value untouched and notifies
    /// nobody. The previous position is recorded either way.
    pub fn drag_to(&mut self, position: Point, center: Point) -> DialAction {
        if !self.dragging {
            return DialAction::default();
        }

        let delta = turn_angle(self.drag_previous, position, center);
        let action = if delta != 0.0 {
            self.apply_change(delta)
        } else {
            DialAction::default()
        };
        self.drag_previous = position;
        action
    }

    pub fn connect_turned(
        &mut self,
        callback: impl FnMut(&Dial, &TurnEvent) + 'static,
    ) -> ListenerId {
        let id = ListenerId::from(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(ListenerEntry {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Returns whether a listener was actually removed.
    pub fn disconnect_turned(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|entry| entry.id != id);
        self.listeners.len() != before
    }

    fn fire_turn(&mut self) {
        // Move the list out so each callback can borrow the dial and read
        // value()/change() while it runs.
        let mut active = std::mem::take(&mut self.listeners);
        let event = TurnEvent::turn();
        for entry in &mut active {
            (entry.callback)(self, &event);
        }
        self.listeners = active;
    }
}

/// Signed angle in degrees swept from the previous cursor direction to the
/// current one, both taken relative to `center`. A zero-length offset is
/// kept as the zero vector rather than normalized, so a drag through the
/// exact center yields a zero sweep.
pub fn turn_angle(previous: Point, current: Point, center: Point) -> f64 {
    let (dx, dy) = unit(current.x - center.x, current.y - center.y);
    let (px, py) = unit(previous.x - center.x, previous.y - center.y);

    // orthogonal of the previous direction
    let (ox, oy) = (-py, px);

    let sin_term = ox * dx + oy * dy;
    let cos_term = px * dx + py * dy;
    sin_term.atan2(cos_term).to_degrees()
}

fn unit(x: f64, y: f64) -> (f64, f64) {
    let length = x.hypot(y);
    if length != 0.0 { (x / length, y / length) } else { (x, y) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Degrees;
    use std::cell::RefCell;
    use std::rc::Rc;

    const EPSILON: f64 = 1e-9;

    fn counting_listener(dial: &mut Dial) -> Rc<RefCell<u32>> {
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        dial.connect_turned(move |_, _| *c.borrow_mut() += 1);
        count
    }

    #[test]
    fn starts_at_zero() {
        let dial = Dial::default();
        assert_eq!(dial.value(), 0.0);
        assert_eq!(dial.change(), 0.0);
        assert!(!dial.is_dragging());
    }

    #[test]
    fn set_value_round_trips_and_recomputes_change() {
        let mut dial = Dial::default();
        for v in [12.5, -30.0, 360.0, 720.25, 0.0] {
            let previous = dial.value();
            let action = dial.set_value(v);
            assert!(action.should_redraw);
            assert!(!action.turned);
            assert_eq!(dial.value(), v);
            assert!((dial.change() - (v - previous)).abs() < EPSILON);
        }
    }

    #[test]
    fn set_value_does_not_notify() {
        let mut dial = Dial::default();
        let count = counting_listener(&mut dial);
        dial.set_value(90.0);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn keyboard_plus_and_minus_step_by_one() {
        let mut dial = Dial::default();
        dial.key_released('+');
        dial.key_released('+');
        assert!((dial.value() - 2.0).abs() < EPSILON);
        dial.key_released('-');
        assert!((dial.value() - 1.0).abs() < EPSILON);
        assert!((dial.change() - (-1.0)).abs() < EPSILON);
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let mut dial = Dial::default();
        let count = counting_listener(&mut dial);
        for ch in ['a', '0', ' ', '\n', '*'] {
            let action = dial.key_released(ch);
            assert!(!action.should_redraw);
            assert!(!action.turned);
        }
        assert_eq!(dial.value(), 0.0);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn wheel_inverts_rotation() {
        let mut dial = Dial::default();
        dial.wheel(3.0);
        assert!((dial.value() - (-3.0)).abs() < EPSILON);
        assert!((dial.change() - (-3.0)).abs() < EPSILON);
        dial.wheel(-1.0);
        assert!((dial.value() - (-2.0)).abs() < EPSILON);
        assert!((dial.change() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn custom_steps_apply_after_retune() {
        let mut dial = Dial::default();
        dial.retune(&DialConfig {
            keyboard_step: Degrees::new(5.0),
            wheel_step: Degrees::new(2.5),
            wrap: WrapMode::Free,
        });
        dial.key_released('+');
        assert!((dial.value() - 5.0).abs() < EPSILON);
        dial.wheel(2.0);
        assert!((dial.value() - 0.0).abs() < EPSILON);
    }

    #[test]
    fn quarter_turn_has_ninety_degree_sweep() {
        let center = Point::new(0.0, 0.0);
        let delta = turn_angle(Point::new(1.0, 0.0), Point::new(0.0, 1.0), center);
        assert!((delta - 90.0).abs() < EPSILON);
        let delta = turn_angle(Point::new(0.0, 1.0), Point::new(1.0, 0.0), center);
        assert!((delta + 90.0).abs() < EPSILON);
    }

    #[test]
    fn sweep_is_radius_independent() {
        let center = Point::new(0.0, 0.0);
        let near = turn_angle(Point::new(2.0, 0.0), Point::new(0.0, 2.0), center);
        let far = turn_angle(Point::new(200.0, 0.0), Point::new(0.0, 200.0), center);
        assert!((near - far).abs() < EPSILON);
    }

    #[test]
    fn drag_through_center_is_silent() {
        let center = Point::new(25.0, 25.0);
        let mut dial = Dial::default();
        let count = counting_listener(&mut dial);

        dial.begin_drag(Point::new(30.0, 25.0));
        let action = dial.drag_to(center, center);
        assert!(!action.should_redraw);
        assert!(!action.turned);

        // the degenerate position became the new previous point
        let action = dial.drag_to(Point::new(25.0, 30.0), center);
        assert!(!action.turned);

        assert_eq!(dial.value(), 0.0);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn moves_without_an_active_drag_are_ignored() {
        let mut dial = Dial::default();
        let action = dial.drag_to(Point::new(10.0, 0.0), Point::new(0.0, 0.0));
        assert!(!action.should_redraw);
        assert_eq!(dial.value(), 0.0);
    }

    #[test]
    fn drag_state_follows_press_and_release() {
        let mut dial = Dial::default();
        dial.begin_drag(Point::new(1.0, 1.0));
        assert!(dial.is_dragging());
        dial.end_drag();
        assert!(!dial.is_dragging());
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut dial = Dial::default();
        for tag in ["first", "second", "third"] {
            let order = order.clone();
            dial.connect_turned(move |_, _| order.borrow_mut().push(tag));
        }
        dial.apply_change(5.0);
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn removed_listener_stays_silent() {
        let mut dial = Dial::default();
        let first_count = Rc::new(RefCell::new(0));
        let c = first_count.clone();
        let first = dial.connect_turned(move |_, _| *c.borrow_mut() += 1);
        let second_count = counting_listener(&mut dial);

        dial.apply_change(1.0);
        assert!(dial.disconnect_turned(first));
        assert!(!dial.disconnect_turned(first));
        dial.apply_change(1.0);

        assert_eq!(*first_count.borrow(), 1);
        assert_eq!(*second_count.borrow(), 2);
    }

    #[test]
    fn listener_reads_state_during_dispatch() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let mut dial = Dial::default();
        dial.connect_turned(move |dial, event| {
            s.borrow_mut()
                .push((event.command.to_string(), dial.value(), dial.change()));
        });
        dial.apply_change(2.0);
        assert_eq!(*seen.borrow(), vec![("turn".to_string(), 2.0, 2.0)]);
    }

    #[test]
    fn quarter_turn_drag_end_to_end() {
        let center = Point::new(25.0, 25.0);
        let mut dial = Dial::default();
        let count = counting_listener(&mut dial);

        dial.begin_drag(Point::new(25.0, 0.0));
        let action = dial.drag_to(Point::new(0.0, 25.0), center);
        dial.end_drag();

        assert!(action.turned);
        assert!(*count.borrow() >= 1);
        assert!(dial.value() != 0.0);
        assert!((dial.value() - (-90.0)).abs() < EPSILON);
    }

    #[test]
    fn wrapped_mode_normalizes_the_value() {
        let config = DialConfig {
            keyboard_step: Degrees::new(1.0),
            wheel_step: Degrees::new(1.0),
            wrap: WrapMode::Wrapped,
        };
        let mut dial = Dial::from_config(&config);

        dial.set_value(-90.0);
        assert!((dial.value() - 270.0).abs() < EPSILON);
        assert!((dial.change() - 270.0).abs() < EPSILON);

        dial.set_value(540.0);
        assert!((dial.value() - 180.0).abs() < EPSILON);
    }

    #[test]
    fn free_mode_keeps_the_raw_value() {
        let mut dial = Dial::default();
        dial.set_value(540.0);
        assert_eq!(dial.value(), 540.0);
        dial.set_value(-0.5);
        assert_eq!(dial.value(), -0.5);
    }
}
