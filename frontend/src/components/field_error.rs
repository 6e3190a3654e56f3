use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FieldErrorProps {
    pub message: Option<&'static str>,
}

#[function_component(FieldError)]
pub fn field_error(props: &FieldErrorProps) -> Html {
    match props.message {
        Some(message) => html! { <p class="field-error">{message}</p> },
        None => html! {},
    }
}

/// Message to show for a field once the user has left it or tried to submit
pub fn visible_error(message: Option<&'static str>, touched: bool, submitted: bool) -> Option<&'static str> {
    if touched || submitted {
        message
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_hidden_until_touched_or_submitted() {
        assert_eq!(visible_error(Some("Required"), false, false), None);
        assert_eq!(visible_error(Some("Required"), true, false), Some("Required"));
        assert_eq!(visible_error(Some("Required"), false, true), Some("Required"));
        assert_eq!(visible_error(None, true, true), None);
    }
}
