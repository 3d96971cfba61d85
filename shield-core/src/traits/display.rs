//! Time text sink

/// Trait for the layer that shows the time text underneath the shield
pub trait TimeDisplay {
    /// Replace the displayed text
    fn show_time(&mut self, text: &str);
}
