use std::f64::consts::PI;

pub mod model;
pub mod view;

pub use model::{
    ActionCommand, Dial, DialAction, ListenerId, Point, TURN_COMMAND, TurnEvent, turn_angle,
};
pub use view::draw;

pub const MIN_SIZE: i32 = 50; // minimum widget edge in logical units
pub const AXIS_LIFT: f64 = 2.0; // ring and indicator sit 2 units above center
pub const EDGE_INSET: f64 = 3.0; // outer ring inset from the widget edge
pub const EDGE_WIDTH: f64 = 2.0; // ring stroke width
pub const INDICATOR_INSET: f64 = 6.0; // indicator stops short of the edge
pub const LABEL_INSET: f64 = 4.0; // tick labels sit inside the corners
pub const BEVEL_TILT: f64 = PI / 4.0; // hemisphere split runs corner to corner
