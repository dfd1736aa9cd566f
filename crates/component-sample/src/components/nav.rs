use component_framework::View;

/// Links shown in the nav bar, in order.
pub const LINKS: [(&str, &str); 4] = [
    ("Home", "/"),
    ("About", "/about"),
    ("Contact", "/contact"),
    ("Profile", "/profile"),
];

pub fn view() -> View {
    LINKS.iter().fold(
        View::element("ul").attr("class", "nav"),
        |list, (label, href)| {
            list.child(View::element("li").child(View::element("a").attr("href", *href).with_text(*label)))
        },
    )
}
