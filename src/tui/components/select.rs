//! Compact inline selector component for choice fields
//!
//! Displays as: Label: ◀ value ▶. The value is cycled with left/right.

use iocraft::prelude::*;

use crate::tui::theme::theme;

/// Shown when nothing is chosen yet
pub const PLACEHOLDER: &str = "Select...";

/// Props for the Select component
#[derive(Default, Props)]
pub struct SelectProps<'a> {
    /// Label to display before the selector
    pub label: Option<&'a str>,
    /// Currently chosen value, `None` renders the placeholder
    pub value: Option<String>,
    /// Whether the selector has focus
    pub has_focus: bool,
    /// Mark the label as required
    pub required: bool,
}

/// Compact inline selector component with arrow indicators
#[component]
pub fn Select<'a>(props: &SelectProps<'a>) -> impl Into<AnyElement<'a>> {
    let theme = theme();

    let label_color = theme.field_label(props.has_focus);
    let arrow_color = theme.field_label(props.has_focus);

    let (current_value, value_color) = match &props.value {
        Some(value) => (value.clone(), theme.text),
        None => (PLACEHOLDER.to_string(), theme.text_dimmed),
    };

    element! {
        View(flex_direction: FlexDirection::Row, gap: 1) {
            #(props.label.map(|label| element! {
                View(flex_direction: FlexDirection::Row) {
                    Text(
                        content: format!("{}:", label),
                        color: label_color,
                    )
                    #(props.required.then(|| element! {
                        Text(content: "*", color: theme.required_marker)
                    }))
                }
            }))
            Text(
                content: "◀",
                color: arrow_color,
            )
            Text(
                content: current_value,
                color: value_color,
            )
            Text(
                content: "▶",
                color: arrow_color,
            )
        }
    }
}

/// Step through `options` with an unset slot before the first entry.
///
/// Wraps in both directions. A `current` value not present in `options` is
/// treated as unset.
pub fn cycle<T: Copy + PartialEq>(options: &[T], current: Option<T>, forward: bool) -> Option<T> {
    if options.is_empty() {
        return None;
    }

    // Slot 0 is "unset", slots 1..=len map to options
    let slots = options.len() + 1;
    let index = current
        .and_then(|value| options.iter().position(|o| *o == value))
        .map_or(0, |pos| pos + 1);

    let next = if forward {
        (index + 1) % slots
    } else {
        (index + slots - 1) % slots
    };

    next.checked_sub(1).map(|pos| options[pos])
}
