use shopping_core::ListState;

/// Plain-text view of the list: a header with progress, then one line per
/// item in list order.
pub fn render(state: &ListState) -> String {
    let mut out = format!(
        "Shopping List: {} of {} items bought\n",
        state.bought_count(),
        state.items.len()
    );

    if state.items.is_empty() {
        out.push_str("No items yet. Add one to get started!\n");
        return out;
    }

    for item in &state.items {
        let mark = if item.bought { 'x' } else { ' ' };
        out.push_str(&format!("[{mark}] {}  ({})\n", item.name, item.id));
    }
    out
}
