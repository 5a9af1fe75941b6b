//! Flat text export of a session's accomplishments.

use rxqa_model::{FieldName, FieldTags, TagSet};

use crate::order::sort_for_display;

/// Prefix of form-level entries.
pub const FORM_PREFIX: &str = "form";

/// Render accomplishments as `"<field>_<tag>, ..., form_<tag>"`.
///
/// Fields appear in form order and tags within a field in display order;
/// form-level tags come last.
pub fn format_for_submission(accomplishments: &FieldTags, form_tags: &TagSet) -> String {
    let fields = FieldName::ALL.into_iter().flat_map(|field| {
        accomplishments
            .get(&field)
            .map(sort_for_display)
            .unwrap_or_default()
            .into_iter()
            .map(move |tag| format!("{}_{tag}", field.as_str()))
    });
    let form = sort_for_display(form_tags)
        .into_iter()
        .map(|tag| format!("{FORM_PREFIX}_{tag}"));

    fields.chain(form).collect::<Vec<_>>().join(", ")
}
