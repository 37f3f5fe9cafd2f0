//! HTML sanitizing for rendered posts

use std::borrow::Cow;

/// Column alignments the table renderer emits
const TABLE_ALIGNMENTS: [&str; 3] = [
    "text-align: left",
    "text-align: center",
    "text-align: right",
];

/// Remove markup that can run script or escape the post container
///
/// Uses ammonia's allow-list, which drops `script`, `style` and embedding
/// elements, event handler and `style` attributes, and URLs with schemes
/// such as `javascript:`. On top of that it keeps what the markdown
/// extensions produce: highlight classes, heading and footnote anchors,
/// disabled task-list checkboxes and table column alignment.
pub fn sanitize(html: &str) -> String {
    let mut builder = ammonia::Builder::default();
    builder
        .add_tag_attributes("pre", &["class"])
        .add_tag_attributes("code", &["class"])
        .add_tag_attributes("span", &["class"])
        .add_tag_attributes("sup", &["class", "id"])
        .add_tag_attributes("div", &["class", "id"])
        .add_tag_attributes("th", &["style"])
        .add_tag_attributes("td", &["style"])
        .add_tags(&["input"])
        .add_tag_attributes("input", &["checked"])
        // Every input becomes an inert checkbox
        .set_tag_attribute_value("input", "type", "checkbox")
        .set_tag_attribute_value("input", "disabled", "")
        .attribute_filter(|element, attribute, value| match (element, attribute) {
            ("th" | "td", "style") => TABLE_ALIGNMENTS
                .contains(&value.trim())
                .then(|| Cow::Borrowed(value)),
            _ => Some(Cow::Borrowed(value)),
        });
    for heading in ["h1", "h2", "h3", "h4", "h5", "h6"] {
        builder.add_tag_attributes(heading, &["id", "class"]);
    }
    builder.clean(html).to_string()
}
