//! Field input → stored field.
//!
//! Mapping assigns fresh ids, fills variant defaults, and resolves a
//! dropdown's `selected` title into the id of the matching option.

use uuid::Uuid;

use super::{
    DropDownField, DropDownInput, DropDownOption, Field, FieldInput, FieldInputKind, FieldKind,
    SliderField, SliderInput, TextField, TextFieldInput,
};
use crate::types::DbId;

pub const DEFAULT_IS_REQUIRED: bool = false;
pub const DEFAULT_IS_TIK_TOK_LINK: bool = false;
pub const DEFAULT_HAS_OTHER_OPTION: bool = false;
pub const DEFAULT_SLIDER_MAX: f64 = 100.0;
pub const DEFAULT_SLIDER_LEFT_LABEL: &str = "Min";
pub const DEFAULT_SLIDER_RIGHT_LABEL: &str = "Max";
pub const DEFAULT_SLIDER_STEP: f64 = 5.0;

/// Map a list of inputs, generating ids with [`Uuid::new_v4`].
pub fn map_fields(inputs: Vec<FieldInput>) -> Vec<Field> {
    let mut next_id = Uuid::new_v4;
    inputs
        .into_iter()
        .map(|input| map_field_with(input, &mut next_id))
        .collect()
}

/// Map a single input, generating ids with [`Uuid::new_v4`].
pub fn map_field(input: FieldInput) -> Field {
    map_field_with(input, &mut Uuid::new_v4)
}

/// Map a single input with an explicit id generator.
///
/// The field id is drawn first, then one id per dropdown option in order.
pub fn map_field_with(input: FieldInput, next_id: &mut impl FnMut() -> DbId) -> Field {
    let id = next_id();
    let kind = match input.kind {
        FieldInputKind::TextField(text) => FieldKind::TextField(map_text(text)),
        FieldInputKind::DropDown(dropdown) => FieldKind::DropDown(map_dropdown(dropdown, next_id)),
        FieldInputKind::Slider(slider) => FieldKind::Slider(map_slider(slider)),
    };

    Field {
        id,
        label: input.label,
        description: input.description,
        is_required: input.is_required.unwrap_or(DEFAULT_IS_REQUIRED),
        kind,
    }
}

fn map_text(input: TextFieldInput) -> TextField {
    TextField {
        placeholder: input.placeholder,
        multiline: input.multiline,
        is_tik_tok_link: input.is_tik_tok_link.unwrap_or(DEFAULT_IS_TIK_TOK_LINK),
        max_lines: input.max_lines,
    }
}

fn map_dropdown(input: DropDownInput, next_id: &mut impl FnMut() -> DbId) -> DropDownField {
    let options: Vec<DropDownOption> = input
        .options
        .into_iter()
        .map(|option| DropDownOption {
            id: next_id(),
            title: option.title,
        })
        .collect();

    let selected = options
        .iter()
        .find(|option| option.title == input.selected)
        .map(|option| option.id.to_string())
        .unwrap_or_default();

    DropDownField {
        placeholder: input.placeholder,
        options,
        selected,
        has_other_option: input.has_other_option.unwrap_or(DEFAULT_HAS_OTHER_OPTION),
    }
}

fn map_slider(input: SliderInput) -> SliderField {
    SliderField {
        max: input.max.unwrap_or(DEFAULT_SLIDER_MAX),
        left_label: input
            .left_label
            .unwrap_or_else(|| DEFAULT_SLIDER_LEFT_LABEL.to_string()),
        right_label: input
            .right_label
            .unwrap_or_else(|| DEFAULT_SLIDER_RIGHT_LABEL.to_string()),
        step: input.step.unwrap_or(DEFAULT_SLIDER_STEP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::DropDownOptionInput;

    fn dropdown_input(selected: &str) -> FieldInput {
        FieldInput {
            label: "Platform".into(),
            description: "Where do you post?".into(),
            is_required: Some(true),
            kind: FieldInputKind::DropDown(DropDownInput {
                placeholder: "Choose".into(),
                options: vec![
                    DropDownOptionInput { title: "TikTok".into() },
                    DropDownOptionInput { title: "YouTube".into() },
                ],
                selected: selected.into(),
                has_other_option: None,
            }),
        }
    }

    fn slider_input() -> FieldInput {
        FieldInput {
            label: "Mood".into(),
            description: "Today".into(),
            is_required: None,
            kind: FieldInputKind::Slider(SliderInput {
                max: None,
                left_label: None,
                right_label: None,
                step: None,
            }),
        }
    }

    fn sequential_ids() -> impl FnMut() -> DbId {
        let mut n: u128 = 0;
        move || {
            n += 1;
            Uuid::from_u128(n)
        }
    }

    fn without_ids(mut field: Field) -> Field {
        field.id = Uuid::nil();
        if let FieldKind::DropDown(dropdown) = &mut field.kind {
            for option in &mut dropdown.options {
                option.id = Uuid::nil();
            }
            dropdown.selected.clear();
        }
        field
    }

    #[test]
    fn slider_defaults_are_applied() {
        let field = map_field(slider_input());
        assert!(!field.is_required);
        match field.kind {
            FieldKind::Slider(slider) => {
                assert_eq!(slider.max, 100.0);
                assert_eq!(slider.left_label, "Min");
                assert_eq!(slider.right_label, "Max");
                assert_eq!(slider.step, 5.0);
            }
            other => panic!("expected slider, got {other:?}"),
        }
    }

    #[test]
    fn explicit_slider_values_win() {
        let mut input = slider_input();
        input.kind = FieldInputKind::Slider(SliderInput {
            max: Some(10.0),
            left_label: Some("Sad".into()),
            right_label: Some("Happy".into()),
            step: Some(1.0),
        });
        let FieldKind::Slider(slider) = map_field(input).kind else {
            panic!("expected slider");
        };
        assert_eq!(slider.max, 10.0);
        assert_eq!(slider.left_label, "Sad");
        assert_eq!(slider.step, 1.0);
    }

    #[test]
    fn dropdown_selected_resolves_to_option_id() {
        let mut ids = sequential_ids();
        let field = map_field_with(dropdown_input("YouTube"), &mut ids);

        assert_eq!(field.id, Uuid::from_u128(1));
        let FieldKind::DropDown(dropdown) = field.kind else {
            panic!("expected dropdown");
        };
        assert_eq!(dropdown.options[0].id, Uuid::from_u128(2));
        assert_eq!(dropdown.options[1].id, Uuid::from_u128(3));
        assert_eq!(dropdown.selected, Uuid::from_u128(3).to_string());
        assert!(!dropdown.has_other_option);
    }

    #[test]
    fn unmatched_selected_becomes_empty() {
        let FieldKind::DropDown(dropdown) = map_field(dropdown_input("Snapchat")).kind else {
            panic!("expected dropdown");
        };
        assert!(dropdown.selected.is_empty());
    }

    #[test]
    fn text_defaults_are_applied() {
        let input = FieldInput {
            label: "Bio".into(),
            description: "About you".into(),
            is_required: Some(true),
            kind: FieldInputKind::TextField(TextFieldInput {
                placeholder: "...".into(),
                multiline: true,
                is_tik_tok_link: None,
                max_lines: 5,
            }),
        };
        let field = map_field(input);
        assert!(field.is_required);
        let FieldKind::TextField(text) = field.kind else {
            panic!("expected text");
        };
        assert!(!text.is_tik_tok_link);
        assert_eq!(text.max_lines, 5);
    }

    #[test]
    fn mapping_twice_differs_only_in_ids() {
        let first = map_field(dropdown_input("TikTok"));
        let second = map_field(dropdown_input("TikTok"));

        assert_ne!(first.id, second.id);
        assert_eq!(without_ids(first), without_ids(second));
    }

    #[test]
    fn map_fields_keeps_order_and_assigns_unique_ids() {
        let fields = map_fields(vec![slider_input(), dropdown_input("TikTok"), slider_input()]);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1].label, "Platform");
        assert_ne!(fields[0].id, fields[2].id);
    }
}
