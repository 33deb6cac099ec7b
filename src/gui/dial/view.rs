use super::model::Dial;
use super::{AXIS_LIFT, BEVEL_TILT, EDGE_INSET, EDGE_WIDTH, INDICATOR_INSET, LABEL_INSET};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;

/// Paint the dial centered in a `width` x `height` area: beveled edge ring,
/// turn indicator at the current value, fixed `-`/`+` tick labels.
pub fn draw(
    cr: &Context,
    dial: &Dial,
    colors: &ThemeColors,
    width: i32,
    height: i32,
) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.translate(f64::from(width) / 2.0, f64::from(height) / 2.0);
    let radius = f64::from(width.min(height)) / 2.0;

    draw_edge(cr, colors, radius)?;
    draw_turn_indicator(cr, colors, radius, dial.value())?;
    draw_labels(cr, colors, radius)?;

    cr.restore()
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Stroke one tilted hemisphere of the ring. Cairo angles grow clockwise on
/// screen, so the upper half runs against the angle direction.
fn stroke_bevel_arc(cr: &Context, radius: f64, upper: bool) -> Result<(), cairo::Error> {
    if upper {
        cr.arc_negative(0.0, -AXIS_LIFT, radius, -BEVEL_TILT, -PI - BEVEL_TILT);
    } else {
        cr.arc(0.0, -AXIS_LIFT, radius, -BEVEL_TILT, PI - BEVEL_TILT);
    }
    cr.stroke()
}

fn draw_edge(cr: &Context, colors: &ThemeColors, radius: f64) -> Result<(), cairo::Error> {
    let r = radius - EDGE_INSET;
    cr.set_line_width(EDGE_WIDTH);

    // outline
    set_source(cr, colors.edge);
    stroke_bevel_arc(cr, r, true)?;
    stroke_bevel_arc(cr, r, false)?;

    // raised shading one unit in: light above, dark below
    set_source(cr, colors.bevel_light);
    stroke_bevel_arc(cr, r - 1.0, true)?;
    set_source(cr, colors.bevel_dark);
    stroke_bevel_arc(cr, r - 1.0, false)?;

    cr.set_line_width(1.0);
    Ok(())
}

fn draw_turn_indicator(
    cr: &Context,
    colors: &ThemeColors,
    radius: f64,
    value: f64,
) -> Result<(), cairo::Error> {
    let r = radius - INDICATOR_INSET;
    let radians = value.to_radians();

    set_source(cr, colors.indicator);
    cr.move_to(0.0, -AXIS_LIFT);
    cr.line_to(radians.cos() * r, radians.sin() * r - AXIS_LIFT);
    cr.stroke()
}

fn draw_labels(cr: &Context, colors: &ThemeColors, radius: f64) -> Result<(), cairo::Error> {
    let v = radius / 5.0;
    let y = -radius + v / 2.0 + LABEL_INSET;

    set_source(cr, colors.label);

    // decrease: a dash at the upper left
    let x = LABEL_INSET - radius;
    cr.move_to(x, y);
    cr.line_to(x + v, y);

    // increase: a cross at the upper right
    let x = radius - LABEL_INSET;
    cr.move_to(x - v, y);
    cr.line_to(x, y);
    cr.move_to(x - v / 2.0, -radius + LABEL_INSET);
    cr.line_to(x - v / 2.0, -radius + v + LABEL_INSET);

    cr.stroke()
}
