//! Example survey documents used by the survey-doc tests and docs.

/// A `checkbox` question with options "1" and "2" and a `text_area` question.
pub const LUNCH_ORDER: &str = include_str!("../surveys/lunch_order.json");

/// Every question type, nested three levels deep, with required options.
///
/// Identifiers: `contact_channel`, `phone_slot`, `pm_reason`, `interests`,
/// `event_city`, `terms`. Required: `contact_channel`, `phone_slot`,
/// `pm_reason`, `terms`.
pub const CUSTOMER_ONBOARDING: &str = include_str!("../surveys/customer_onboarding.json");

/// Invalid: `details` appears both nested and at the top level.
pub const DUPLICATE_NESTED: &str = include_str!("../surveys/duplicate_nested.json");

/// A single checkbox question, `new_generals`, ready to be added to a survey.
pub const NEW_GENERALS_QUESTION: &str = include_str!("../surveys/new_generals.json");

/// All well-formed example surveys, by name.
pub fn valid_surveys() -> [(&'static str, &'static str); 2] {
    [
        ("lunch_order", LUNCH_ORDER),
        ("customer_onboarding", CUSTOMER_ONBOARDING),
    ]
}
