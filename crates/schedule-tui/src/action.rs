//! Action enum: everything the user can ask the schedule viewer to do.

/// All actions that can flow through the system.
/// Components and key handling produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ── Navigation ───────────────────────────────────────────────────────────
    SelectUp(usize),
    SelectDown(usize),
    SelectFirst,
    SelectLast,
    /// Select the row airing now (or the last one started) in today's column.
    JumpToToday,

    // ── Search ───────────────────────────────────────────────────────────────
    OpenSearch,
    /// Leave the search box, keeping the term.
    CloseSearch,
    /// Search box text changed; filtering waits for the debounce.
    SearchChanged(String),
    /// Run the filter with this term now.
    ApplySearch(String),
    ClearSearch,

    // ── UI ───────────────────────────────────────────────────────────────────
    ToggleTheme,
    Reload,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
}
