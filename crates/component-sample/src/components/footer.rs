use component_framework::View;

pub fn view() -> View {
    View::element("footer").with_text("Namaste React")
}
