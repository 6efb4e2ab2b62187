//! Bordered single- or multi-line text input

use iocraft::prelude::*;

use crate::tui::theme::theme;

/// Props for the TextField component
#[derive(Default, Props)]
pub struct TextFieldProps<'a> {
    pub label: &'a str,
    pub value: String,
    /// Fixed text rendered before the editable value (e.g. an order prefix)
    pub prefix: Option<String>,
    pub placeholder: Option<&'a str>,
    pub has_focus: bool,
    pub required: bool,
    /// Inline validation message under the input
    pub error: Option<String>,
    /// Render every line of the value instead of one
    pub multiline: bool,
}

#[component]
pub fn TextField<'a>(props: &TextFieldProps<'a>) -> impl Into<AnyElement<'a>> {
    let theme = theme();
    let focused = props.has_focus;

    let border_color = if props.error.is_some() {
        theme.field_error
    } else {
        theme.field_border(focused)
    };

    let cursor = if focused { "_" } else { "" };
    let lines: Vec<String> = if props.value.is_empty() {
        vec![String::new()]
    } else if props.multiline {
        props.value.split('\n').map(str::to_string).collect()
    } else {
        vec![props.value.clone()]
    };
    let last = lines.len() - 1;
    let show_placeholder = props.value.is_empty() && !focused;

    element! {
        View(flex_direction: FlexDirection::Column, width: 100pct) {
            View(flex_direction: FlexDirection::Row) {
                Text(content: format!("{}:", props.label), color: theme.field_label(focused))
                #(props.required.then(|| element! {
                    Text(content: "*", color: theme.required_marker)
                }))
            }
            View(
                border_style: BorderStyle::Round,
                border_color: border_color,
                padding_left: 1,
                padding_right: 1,
                width: 100pct,
                flex_direction: FlexDirection::Column,
            ) {
                #(lines.into_iter().enumerate().map(|(i, line)| {
                    let prefix = if i == 0 { props.prefix.clone() } else { None };
                    let (content, color) = if show_placeholder {
                        (props.placeholder.unwrap_or_default().to_string(), theme.text_dimmed)
                    } else if i == last {
                        (format!("{line}{cursor}"), theme.text)
                    } else {
                        (line, theme.text)
                    };
                    element! {
                        View(flex_direction: FlexDirection::Row) {
                            #(prefix.map(|p| element! {
                                Text(content: p, color: theme.order_prefix, weight: Weight::Bold)
                            }))
                            Text(content: content, color: color)
                        }
                    }
                }))
            }
            #(props.error.clone().map(|message| element! {
                Text(content: message, color: theme.field_error)
            }))
        }
    }
}
