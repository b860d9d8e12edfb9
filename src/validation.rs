use chrono::NaiveDate;

use crate::models::{
    BookingStatus, CarType, DeviceType, PartnershipStatus, ServiceType, CALL_SCHEDULES,
    INVESTMENT_CAPACITIES,
};

/// One declarative check on a single field. Rules are field-local; there
/// is no cross-field validation anywhere in the service.
#[derive(Debug)]
pub enum Check {
    Required,
    MinLen(usize),
    OneOf(&'static [&'static str]),
    Email,
    Date,
}

#[derive(Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub label: &'static str,
    pub checks: &'static [Check],
}

pub const BOOKING_RULES: &[FieldRule] = &[
    FieldRule {
        field: "name",
        label: "Name",
        checks: &[Check::Required, Check::MinLen(2)],
    },
    FieldRule {
        field: "email",
        label: "Email",
        checks: &[Check::Required, Check::Email],
    },
    FieldRule {
        field: "phone",
        label: "Phone number",
        checks: &[Check::Required, Check::MinLen(10)],
    },
    FieldRule {
        field: "carType",
        label: "Car type",
        checks: &[Check::Required, Check::OneOf(CarType::ALL)],
    },
    FieldRule {
        field: "serviceType",
        label: "Service type",
        checks: &[Check::Required, Check::OneOf(ServiceType::ALL)],
    },
    FieldRule {
        field: "date",
        label: "Preferred date",
        checks: &[Check::Required, Check::Date],
    },
    FieldRule {
        field: "address",
        label: "Address",
        checks: &[Check::Required, Check::MinLen(5)],
    },
    // Optional fields: validated only when supplied.
    FieldRule {
        field: "deviceType",
        label: "Device type",
        checks: &[Check::OneOf(DeviceType::ALL)],
    },
    FieldRule {
        field: "status",
        label: "Status",
        checks: &[Check::OneOf(BookingStatus::ALL)],
    },
];

pub const PARTNERSHIP_RULES: &[FieldRule] = &[
    FieldRule {
        field: "fullName",
        label: "Full name",
        checks: &[Check::Required, Check::MinLen(2)],
    },
    FieldRule {
        field: "email",
        label: "Email",
        checks: &[Check::Required, Check::Email],
    },
    FieldRule {
        field: "phone",
        label: "Phone number",
        checks: &[Check::Required, Check::MinLen(10)],
    },
    FieldRule {
        field: "city",
        label: "City",
        checks: &[Check::Required, Check::MinLen(2)],
    },
    FieldRule {
        field: "pincode",
        label: "Pincode",
        checks: &[Check::Required, Check::MinLen(6)],
    },
    FieldRule {
        field: "investmentCapacity",
        label: "Investment capacity",
        checks: &[Check::Required, Check::OneOf(INVESTMENT_CAPACITIES)],
    },
    FieldRule {
        field: "preferredLocation",
        label: "Preferred location",
        checks: &[Check::Required, Check::MinLen(3)],
    },
    FieldRule {
        field: "callSchedule",
        label: "Call schedule",
        checks: &[Check::Required, Check::OneOf(CALL_SCHEDULES)],
    },
    FieldRule {
        field: "status",
        label: "Status",
        checks: &[Check::OneOf(PartnershipStatus::ALL)],
    },
];

/// Run every rule against the candidate record and collect all violations,
/// not just the first. `get` maps a wire field name to its submitted value.
pub fn apply(rules: &[FieldRule], get: &dyn Fn(&str) -> Option<String>) -> Vec<String> {
    let mut errors = Vec::new();

    for rule in rules {
        let value = get(rule.field)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let Some(value) = value else {
            if rule.checks.iter().any(|c| matches!(c, Check::Required)) {
                errors.push(format!("{} is required", rule.label));
            }
            continue;
        };

        for check in rule.checks {
            match check {
                Check::Required => {}
                Check::MinLen(min) => {
                    if value.chars().count() < *min {
                        errors.push(format!(
                            "{} must be at least {} characters",
                            rule.label, min
                        ));
                    }
                }
                Check::OneOf(allowed) => {
                    if !allowed.contains(&value.as_str()) {
                        errors.push(format!(
                            "{} must be one of: {}",
                            rule.label,
                            allowed.join(", ")
                        ));
                    }
                }
                Check::Email => {
                    if !is_valid_email(&value) {
                        errors.push("Please enter a valid email address".to_string());
                    }
                }
                Check::Date => {
                    if NaiveDate::parse_from_str(&value, "%Y-%m-%d").is_err() {
                        errors.push(format!(
                            "{} must be a valid date (YYYY-MM-DD)",
                            rule.label
                        ));
                    }
                }
            }
        }
    }

    errors
}

/// Matches the shape `local@domain.tld` with no whitespace anywhere.
fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some(at) = s.find('@') else {
        return false;
    };
    if at == 0 {
        return false;
    }
    let domain = &s[at + 1..];
    match domain.rfind('.') {
        Some(dot) => dot > 0 && dot + 1 < domain.len(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn getter(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_booking_reports_every_required_field() {
        let fields: HashMap<String, String> = HashMap::new();
        let errors = apply(BOOKING_RULES, &|f| fields.get(f).cloned());

        assert!(errors.contains(&"Name is required".to_string()));
        assert!(errors.contains(&"Email is required".to_string()));
        assert!(errors.contains(&"Phone number is required".to_string()));
        assert!(errors.contains(&"Car type is required".to_string()));
        assert!(errors.contains(&"Service type is required".to_string()));
        assert!(errors.contains(&"Preferred date is required".to_string()));
        assert!(errors.contains(&"Address is required".to_string()));
        assert_eq!(errors.len(), 7);
    }

    #[test]
    fn valid_booking_passes() {
        let fields = getter(&[
            ("name", "Asha Rao"),
            ("email", "asha@example.com"),
            ("phone", "9876543210"),
            ("carType", "suv"),
            ("serviceType", "weekly-magic"),
            ("date", "2026-09-01"),
            ("address", "12 MG Road, Pune"),
        ]);
        let errors = apply(BOOKING_RULES, &|f| fields.get(f).cloned());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn bad_email_and_short_phone_both_reported() {
        let fields = getter(&[
            ("name", "Asha Rao"),
            ("email", "not-an-email"),
            ("phone", "12345"),
            ("carType", "suv"),
            ("serviceType", "weekly-magic"),
            ("date", "2026-09-01"),
            ("address", "12 MG Road, Pune"),
        ]);
        let errors = apply(BOOKING_RULES, &|f| fields.get(f).cloned());
        assert!(errors.contains(&"Please enter a valid email address".to_string()));
        assert!(errors.contains(&"Phone number must be at least 10 characters".to_string()));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn enum_value_outside_set_rejected() {
        let fields = getter(&[("carType", "boat")]);
        let errors = apply(BOOKING_RULES, &|f| fields.get(f).cloned());
        assert!(errors
            .iter()
            .any(|e| e.starts_with("Car type must be one of:")));
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let fields = getter(&[("name", "   ")]);
        let errors = apply(BOOKING_RULES, &|f| fields.get(f).cloned());
        assert!(errors.contains(&"Name is required".to_string()));
    }

    #[test]
    fn optional_device_type_checked_only_when_present() {
        let fields = getter(&[("deviceType", "blackberry")]);
        let errors = apply(BOOKING_RULES, &|f| fields.get(f).cloned());
        assert!(errors
            .iter()
            .any(|e| e.starts_with("Device type must be one of:")));
    }

    #[test]
    fn partnership_investment_bracket_must_match_exactly() {
        let fields = getter(&[("investmentCapacity", "₹2-5 lakhs")]);
        let errors = apply(PARTNERSHIP_RULES, &|f| fields.get(f).cloned());
        assert!(errors
            .iter()
            .any(|e| e.starts_with("Investment capacity must be one of:")));
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.domain.in"));
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@bco"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b."));
    }
}
