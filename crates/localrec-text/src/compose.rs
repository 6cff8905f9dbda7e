use localrec_core::Item;

/// Feature text for an item: name, category and description joined by a
/// single space. Casing and punctuation are left to the analyzer.
pub fn compose(item: &Item) -> String {
    let mut text = String::with_capacity(item.name.len() + item.category.len() + item.description.len() + 2);
    text.push_str(&item.name);
    text.push(' ');
    text.push_str(&item.category);
    text.push(' ');
    text.push_str(&item.description);
    text
}
