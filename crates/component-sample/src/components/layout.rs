use std::convert::Infallible;

use component_framework::{Component, View};

use super::{footer, nav};

/// Root layout: nav, the matched child route, footer.
#[derive(Debug, Default)]
pub struct RootLayout;

impl Component for RootLayout {
    type State = ();
    type Event = ();
    type Error = Infallible;

    fn view(&self, _state: &()) -> View {
        View::element("div")
            .attr("class", "app")
            .child(nav::view())
            .child(View::Outlet)
            .child(footer::view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_has_nav_outlet_footer() {
        let view = RootLayout.view(&());
        assert!(view.has_outlet());
        assert!(view.find("footer").is_some());
        assert_eq!(view.text_content(), "HomeAboutContactProfileNamaste React");
    }
}
