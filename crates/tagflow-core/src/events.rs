// crates/tagflow-core/src/events.rs

/// Observer of tag set changes.
///
/// The chip container only ever calls `on_tag_removed`, after a chip was
/// clicked away. Responding to additions is the adder's job, so the container
/// itself treats `on_tag_added` as a no-op when it acts as a listener.
pub trait TagChangeListener {
    fn on_tag_added(&mut self, tag: &str);
    fn on_tag_removed(&mut self, tag: &str);
}
