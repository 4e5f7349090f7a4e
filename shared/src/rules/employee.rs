//! Employee form rules

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use super::{FieldErrors, Rule, RuleContext, RuleResult, char_len, check, is_blank, parse_date_time};
use crate::models::{Gender, NewEmployee};

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 50;
pub const MIN_AGE: i32 = 16;
pub const MAX_AGE: i32 = 100;

const REQUIRED: &str = "This field is required";

static PASSPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{2}\d{7}$").expect("passport pattern is valid")
});

fn required(v: &str, _: &RuleContext) -> RuleResult {
    if is_blank(v) { Err(REQUIRED) } else { Ok(()) }
}

fn name_min(v: &str, _: &RuleContext) -> RuleResult {
    if char_len(v) >= NAME_MIN_LEN {
        Ok(())
    } else {
        Err("Minimum 2 characters")
    }
}

fn name_max(v: &str, _: &RuleContext) -> RuleResult {
    if !is_blank(v) && char_len(v) <= NAME_MAX_LEN {
        Ok(())
    } else {
        Err("Maximum 50 characters")
    }
}

fn passport_format(v: &str, _: &RuleContext) -> RuleResult {
    if PASSPORT_RE.is_match(v) {
        Ok(())
    } else {
        Err("Format: AD1234567")
    }
}

/// Birth date must put the employee between 16 and 100 years old.
///
/// Lower bound is January 1st of the year a hundred years back, upper bound
/// is today's calendar date sixteen years back.
fn age_range(v: &str, ctx: &RuleContext) -> RuleResult {
    const MESSAGE: &str = "Age must be between 16 and 100 years";

    let Some(date) = parse_date_time(v).map(|dt| dt.date()) else {
        return Err(MESSAGE);
    };
    let today = ctx.today();
    let Some(min) = NaiveDate::from_ymd_opt(today.year() - MAX_AGE, 1, 1) else {
        return Err(MESSAGE);
    };
    let Some(max) = years_back(today, MIN_AGE) else {
        return Err(MESSAGE);
    };
    if date >= min && date <= max {
        Ok(())
    } else {
        Err(MESSAGE)
    }
}

/// Same calendar day `years` years earlier; Feb 29 falls back to Feb 28.
fn years_back(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let year = date.year() - years;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 28))
}

fn gender_defined(v: &Option<Gender>, _: &RuleContext) -> RuleResult {
    if v.is_some() { Ok(()) } else { Err(REQUIRED) }
}

pub const NAME_RULES: &[Rule<str>] = &[required, name_min, name_max];
pub const PASSPORT_RULES: &[Rule<str>] = &[required, passport_format];
pub const BIRTH_DATE_RULES: &[Rule<str>] = &[required, age_range];
pub const GENDER_RULES: &[Rule<Option<Gender>>] = &[gender_defined];

/// Run every employee field rule
pub fn validate_employee(employee: &NewEmployee, ctx: &RuleContext) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.add("name", check(NAME_RULES, employee.name.as_str(), ctx));
    errors.add("passport", check(PASSPORT_RULES, employee.passport.as_str(), ctx));
    errors.add("birthDate", check(BIRTH_DATE_RULES, employee.birth_date.as_str(), ctx));
    errors.add("gender", check(GENDER_RULES, &employee.gender, ctx));
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::is_valid;

    fn ctx() -> RuleContext {
        RuleContext::at(
            NaiveDate::from_ymd_opt(2026, 10, 18)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_passport_format() {
        let ctx = ctx();
        assert!(is_valid(PASSPORT_RULES, "AB1234567", &ctx));
        assert!(!is_valid(PASSPORT_RULES, "AB123456", &ctx));
        assert!(!is_valid(PASSPORT_RULES, "ab1234567", &ctx));
        assert!(!is_valid(PASSPORT_RULES, "AB12345678", &ctx));
        assert_eq!(check(PASSPORT_RULES, "", &ctx), vec![REQUIRED, "Format: AD1234567"]);
    }

    #[test]
    fn test_name_length() {
        let ctx = ctx();
        assert!(!is_valid(NAME_RULES, "A", &ctx));
        assert!(is_valid(NAME_RULES, "Al", &ctx));
        assert!(is_valid(NAME_RULES, &"я".repeat(50), &ctx));
        assert!(!is_valid(NAME_RULES, &"я".repeat(51), &ctx));
        assert_eq!(
            check(NAME_RULES, "", &ctx),
            vec![REQUIRED, "Minimum 2 characters", "Maximum 50 characters"]
        );
    }

    #[test]
    fn test_birth_date_bounds() {
        let ctx = ctx();
        // exactly sixteen today
        assert!(is_valid(BIRTH_DATE_RULES, "2010-10-18", &ctx));
        // one day short of sixteen
        assert!(!is_valid(BIRTH_DATE_RULES, "2010-10-19", &ctx));
        // lower bound is Jan 1st a hundred years back
        assert!(is_valid(BIRTH_DATE_RULES, "1926-01-01", &ctx));
        assert!(!is_valid(BIRTH_DATE_RULES, "1925-12-31", &ctx));
        assert!(!is_valid(BIRTH_DATE_RULES, "not a date", &ctx));
    }

    #[test]
    fn test_years_back_leap_day() {
        let leap = NaiveDate::from_ymd_opt(2028, 2, 29).unwrap();
        assert_eq!(years_back(leap, 16), NaiveDate::from_ymd_opt(2012, 2, 29));
        assert_eq!(years_back(leap, 1), NaiveDate::from_ymd_opt(2027, 2, 28));
    }

    #[test]
    fn test_gender_defined() {
        let ctx = ctx();
        assert!(is_valid(GENDER_RULES, &Some(Gender::Male), &ctx));
        assert!(!is_valid(GENDER_RULES, &None, &ctx));
    }

    #[test]
    fn test_validate_employee() {
        let ctx = ctx();
        let mut employee = NewEmployee {
            name: "Anna Ivanova".into(),
            passport: "AB1234567".into(),
            birth_date: "1990-04-01".into(),
            gender: Some(Gender::Female),
            is_active: true,
        };
        assert!(validate_employee(&employee, &ctx).is_ok());

        employee.passport = "ab1234567".into();
        employee.gender = None;
        let errors = validate_employee(&employee, &ctx).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("passport"), Some(&["Format: AD1234567"][..]));
        assert_eq!(errors.get("gender"), Some(&[REQUIRED][..]));
    }
}
