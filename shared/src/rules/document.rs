//! Document form rules

use super::{FieldErrors, Rule, RuleContext, RuleResult, char_len, check, is_blank, parse_date_time};
use crate::models::{DocumentType, NewDocument};

pub const NUMBER_MIN_LEN: usize = 3;
pub const NUMBER_MAX_LEN: usize = 50;
pub const DESCRIPTION_MIN_LEN: usize = 10;
pub const DESCRIPTION_MAX_LEN: usize = 500;

fn type_required(v: &Option<DocumentType>, _: &RuleContext) -> RuleResult {
    if v.is_some() {
        Ok(())
    } else {
        Err("Document type is required")
    }
}

fn number_required(v: &str, _: &RuleContext) -> RuleResult {
    if is_blank(v) {
        Err("Document number is required")
    } else {
        Ok(())
    }
}

fn number_min(v: &str, _: &RuleContext) -> RuleResult {
    if char_len(v) >= NUMBER_MIN_LEN {
        Ok(())
    } else {
        Err("Minimum 3 characters")
    }
}

fn number_max(v: &str, _: &RuleContext) -> RuleResult {
    if !is_blank(v) && char_len(v) <= NUMBER_MAX_LEN {
        Ok(())
    } else {
        Err("Maximum 50 characters")
    }
}

fn date_required(v: &str, _: &RuleContext) -> RuleResult {
    if is_blank(v) {
        Err("Document date is required")
    } else {
        Ok(())
    }
}

// Date-only values count as local midnight.
fn date_not_future(v: &str, ctx: &RuleContext) -> RuleResult {
    match parse_date_time(v) {
        Some(date) if date <= ctx.current_time() => Ok(()),
        Some(_) => Err("Date cannot be in the future"),
        None => Err("Invalid date"),
    }
}

fn employee_required(v: &Option<i64>, _: &RuleContext) -> RuleResult {
    if v.is_some() {
        Ok(())
    } else {
        Err("Employee is required")
    }
}

fn description_required(v: &str, _: &RuleContext) -> RuleResult {
    if is_blank(v) {
        Err("Description is required")
    } else {
        Ok(())
    }
}

fn description_min(v: &str, _: &RuleContext) -> RuleResult {
    if char_len(v) >= DESCRIPTION_MIN_LEN {
        Ok(())
    } else {
        Err("Minimum 10 characters")
    }
}

fn description_max(v: &str, _: &RuleContext) -> RuleResult {
    if !is_blank(v) && char_len(v) <= DESCRIPTION_MAX_LEN {
        Ok(())
    } else {
        Err("Maximum 500 characters")
    }
}

pub const TYPE_RULES: &[Rule<Option<DocumentType>>] = &[type_required];
pub const NUMBER_RULES: &[Rule<str>] = &[number_required, number_min, number_max];
/// A date-only value is read as local midnight, not UTC midnight, so today's
/// date always passes regardless of the UTC offset.
pub const DATE_RULES: &[Rule<str>] = &[date_required, date_not_future];
pub const EMPLOYEE_RULES: &[Rule<Option<i64>>] = &[employee_required];
pub const DESCRIPTION_RULES: &[Rule<str>] = &[description_required, description_min, description_max];

/// Run every document field rule
pub fn validate_document(document: &NewDocument, ctx: &RuleContext) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.add("type", check(TYPE_RULES, &document.doc_type, ctx));
    errors.add("number", check(NUMBER_RULES, document.number.as_str(), ctx));
    errors.add("date", check(DATE_RULES, document.date.as_str(), ctx));
    errors.add("employeeId", check(EMPLOYEE_RULES, &document.employee_id, ctx));
    errors.add(
        "description",
        check(DESCRIPTION_RULES, document.description.as_str(), ctx),
    );
    errors.into_result()
}
