#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    /// Flip every panel's visibility at once.
    TogglePanels,
    /// Left click at (column, row); toggles when it lands on the settings pill.
    ClickAt(u16, u16),
    None,
}
