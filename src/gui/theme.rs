use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub edge: Srgba<f64>,
    pub bevel_light: Srgba<f64>,
    pub bevel_dark: Srgba<f64>,
    pub indicator: Srgba<f64>,
    pub label: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            edge: Self::lookup_color(
                context,
                "borders",
                Srgba::new(0.5, 0.5, 0.5, 1.0),
                None,
            ),
            bevel_light: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(0.75, 0.75, 0.75, 1.0),
                None,
            ),
            bevel_dark: Self::lookup_color(
                context,
                "theme_unfocused_fg_color",
                Srgba::new(0.25, 0.25, 0.25, 1.0),
                None,
            ),
            indicator: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.5, 0.5, 0.5, 1.0),
                Some(0.8),
            ),
            label: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.2, 0.2, 0.2, 1.0),
                None,
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.dial-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
