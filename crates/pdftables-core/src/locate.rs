use crate::partition::Element;

/// Keep the elements the engine classified as tables, in document order.
pub fn locate_tables(elements: Vec<Element>) -> Vec<Element> {
    elements.into_iter().filter(Element::is_table).collect()
}
